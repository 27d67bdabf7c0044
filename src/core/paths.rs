//! Credentials and project file location.

use crate::constants;
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct StorePaths {
    pub credentials: PathBuf,
    pub project_dir: PathBuf,
    pub project_config: PathBuf,
}

impl StorePaths {
    /// Resolve from CLI args, then the environment, then the home directory.
    pub fn resolve(credentials_arg: Option<PathBuf>, project_arg: Option<PathBuf>) -> Result<Self> {
        let credentials = match credentials_arg {
            Some(path) => path,
            None => match env::var_os(constants::CREDENTIALS_ENV_VAR) {
                Some(path) if !path.is_empty() => PathBuf::from(path),
                _ => default_credentials_path()?,
            },
        };
        let project_dir = match project_arg {
            Some(dir) => dir,
            None => env::current_dir().context("resolve current directory")?,
        };
        Ok(Self::new(credentials, project_dir))
    }

    pub fn new(credentials: PathBuf, project_dir: PathBuf) -> Self {
        let project_config = project_dir.join(constants::PROJECT_CONFIG_FILE);
        Self {
            credentials,
            project_dir,
            project_config,
        }
    }
}

/// `~/.aws/credentials` (`%USERPROFILE%\.aws\credentials` on Windows).
pub fn default_credentials_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("resolve home directory")?;
    Ok(credentials_path_in(&home))
}

pub fn credentials_path_in(home: &Path) -> PathBuf {
    home.join(constants::DEFAULT_CREDENTIALS_DIR)
        .join(constants::CREDENTIALS_FILE_NAME)
}

impl std::fmt::Display for StorePaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "credentials@{}", self.credentials.display())
    }
}
