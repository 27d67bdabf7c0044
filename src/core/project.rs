//! Project settings: which credentials profile a project uses.

use crate::models::project_config::ProjectFile;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

pub fn load(path: &Path) -> Result<ProjectFile> {
    if !path.exists() {
        return Ok(ProjectFile::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("read project settings {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parse project settings {}", path.display()))
}

pub fn save(path: &Path, project: &ProjectFile) -> Result<()> {
    let content = toml::to_string_pretty(project).context("serialize project settings")?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir).context("create temp project settings")?;
    tmp.write_all(content.as_bytes())
        .context("write project settings")?;
    tmp.flush().ok();
    tmp.persist(path)
        .map_err(|err| anyhow::anyhow!("persist project settings: {}", err))?;
    Ok(())
}

/// Record `profile` as the project's profile, keeping other settings.
pub fn set_profile(path: &Path, profile: &str) -> Result<ProjectFile> {
    let mut project = load(path)?;
    project.project.profile = Some(profile.to_string());
    save(path, &project)?;
    Ok(project)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_defaults() {
        let dir = TempDir::new().unwrap();
        let project = load(&dir.path().join(".awsprofile.toml")).unwrap();
        assert_eq!(project.profile_name(), "default");
    }

    #[test]
    fn test_set_profile_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".awsprofile.toml");
        set_profile(&path, "staging").unwrap();
        let project = load(&path).unwrap();
        assert_eq!(project.profile_name(), "staging");
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("[project]"));
        assert!(raw.contains("profile = \"staging\""));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".awsprofile.toml");
        fs::write(&path, "not = [valid").unwrap();
        assert!(load(&path).is_err());
    }
}
