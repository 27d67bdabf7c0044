//! The on-disk credentials store and its save protocol.
//!
//! A save never starts overwriting the canonical file until a numbered backup
//! of it exists (or, for a new store, an empty file has been created) and the
//! source has been fully parsed. The overwrite itself is a plain truncate and
//! rewrite: if the process dies mid-write the canonical file may be partial,
//! and the latest backup is the recovery point.

use crate::constants;
use crate::core::backup;
use crate::core::error::{MergeError, ParseError, StoreError};
use crate::core::merger::{self, MergeSummary};
use crate::core::parser::ProfileReader;
use crate::core::serializer;
use crate::models::profile::Profile;
use crate::util::fs as store_fs;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct BackupEntry {
    pub number: u32,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: Option<SystemTime>,
}

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Canonical store path.
    pub path: PathBuf,
    /// Backup taken before the overwrite; `None` when the store was new.
    pub backup: Option<PathBuf>,
    /// An existing profile was replaced rather than appended.
    pub replaced: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreOutcome {
    pub restored_from: PathBuf,
    /// Backup of the store as it was before the restore.
    pub previous: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the store and its backups.
    pub fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Check the containing directory is reachable; returns the store path.
    pub fn is_valid(&self) -> Result<&Path, StoreError> {
        let dir = self.dir();
        match fs::metadata(dir) {
            Ok(meta) if meta.is_dir() => Ok(self.path.as_path()),
            Ok(_) => Err(StoreError::PathNotFound {
                path: dir.to_path_buf(),
                source: io::Error::other("not a directory"),
            }),
            Err(source) => Err(StoreError::PathNotFound {
                path: dir.to_path_buf(),
                source,
            }),
        }
    }

    /// Stops reading at the first profile with a matching name.
    /// A store that does not exist yet holds no profiles.
    pub fn profile_exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.find_profile(name)?.is_some())
    }

    pub fn find_profile(&self, name: &str) -> Result<Option<Profile>, StoreError> {
        let Some(file) = self.open_existing()? else {
            return Ok(None);
        };
        for profile in ProfileReader::new(file) {
            let profile = profile.map_err(|e| StoreError::from_parse(self.path.clone(), e))?;
            if profile.name() == name {
                return Ok(Some(profile));
            }
        }
        Ok(None)
    }

    /// Every profile, in file order.
    pub fn profiles(&self) -> Result<Vec<Profile>, StoreError> {
        let Some(file) = self.open_existing()? else {
            return Ok(Vec::new());
        };
        ProfileReader::new(file)
            .collect::<Result<_, _>>()
            .map_err(|e| StoreError::from_parse(self.path.clone(), e))
    }

    /// Backups of this store, lowest number first.
    pub fn backups(&self) -> Result<Vec<BackupEntry>, StoreError> {
        let Some(base) = self.base_name() else {
            return Ok(Vec::new());
        };
        let names = match self.sibling_names() {
            Ok(names) => names,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::ReadFailure {
                    path: self.dir().to_path_buf(),
                    source,
                })
            }
        };
        let mut entries = Vec::new();
        for name in names {
            let Some(number) = backup::is_backup_of(&base, &name) else {
                continue;
            };
            let path = self.dir().join(&name);
            let meta = fs::metadata(&path).map_err(|source| StoreError::ReadFailure {
                path: path.clone(),
                source,
            })?;
            if !meta.is_file() {
                continue;
            }
            entries.push(BackupEntry {
                number,
                path,
                size_bytes: meta.len(),
                modified: meta.modified().ok(),
            });
        }
        entries.sort_by_key(|e| e.number);
        Ok(entries)
    }

    /// Insert or replace `profile`, backing the store up first.
    pub fn save_credentials(&self, profile: &Profile) -> Result<SaveOutcome, StoreError> {
        serializer::check_profile(profile).map_err(|fault| StoreError::Unrepresentable {
            name: profile.name().to_string(),
            fault,
        })?;
        let backup = if self.path.exists() {
            Some(self.backup()?)
        } else {
            self.create_empty()?;
            None
        };
        let source = backup.as_deref().unwrap_or(&self.path);

        // nothing has touched the canonical file yet; refuse to rewrite a
        // store we cannot parse in full
        let existing = self.validate(source)?;
        debug!("source {} holds {} profiles", source.display(), existing);

        let summary = self.rewrite(source, profile)?;
        if summary.replaced {
            info!("replaced profile [{}] in {}", profile.name(), self.path.display());
        } else {
            info!("added profile [{}] to {}", profile.name(), self.path.display());
        }

        Ok(SaveOutcome {
            path: self.path.clone(),
            backup,
            replaced: summary.replaced,
        })
    }

    /// Copy a backup over the store. The current store is backed up first.
    pub fn restore_backup(&self, number: Option<u32>) -> Result<RestoreOutcome, StoreError> {
        let backups = self.backups()?;
        let chosen = match number {
            Some(n) => backups.iter().find(|b| b.number == n),
            None => backups.last(),
        }
        .ok_or_else(|| StoreError::BackupNotFound {
            path: self.path.clone(),
        })?;

        let previous = if self.path.exists() {
            Some(self.backup()?)
        } else {
            None
        };

        let mut input = File::open(&chosen.path).map_err(|source| StoreError::WriteFailure {
            path: chosen.path.clone(),
            source,
        })?;
        let mut output = store_fs::create_truncated(&self.path, constants::CREDENTIALS_FILE_MODE)
            .map_err(|source| self.write_failure(source))?;
        io::copy(&mut input, &mut output).map_err(|source| self.write_failure(source))?;
        output.sync_all().map_err(|source| self.write_failure(source))?;

        info!(
            "restored {} from {}",
            self.path.display(),
            chosen.path.display()
        );
        Ok(RestoreOutcome {
            restored_from: chosen.path.clone(),
            previous,
        })
    }

    fn open_existing(&self) -> Result<Option<File>, StoreError> {
        match File::open(&self.path) {
            Ok(file) => Ok(Some(file)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::ReadFailure {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn base_name(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
    }

    fn sibling_names(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.dir())? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn create_empty(&self) -> Result<(), StoreError> {
        let dir = self.dir();
        if store_fs::ensure_dir(dir, constants::CREDENTIALS_DIR_MODE)
            .map_err(|source| StoreError::WriteFailure {
                path: dir.to_path_buf(),
                source,
            })?
        {
            debug!("created credentials directory {}", dir.display());
        }
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|source| self.write_failure(source))?;
        store_fs::set_permissions(&self.path, constants::CREDENTIALS_FILE_MODE)
            .map_err(|source| self.write_failure(source))?;
        info!("created empty credentials file {}", self.path.display());
        Ok(())
    }

    /// Byte-for-byte copy to the next free `<name>.<n>.bak`.
    fn backup(&self) -> Result<PathBuf, StoreError> {
        let base = self.base_name().ok_or_else(|| {
            self.write_failure(io::Error::new(
                ErrorKind::InvalidInput,
                "store path has no file name",
            ))
        })?;
        let names = self
            .sibling_names()
            .map_err(|source| StoreError::WriteFailure {
                path: self.dir().to_path_buf(),
                source,
            })?;
        let number = backup::next_backup_number(
            names
                .iter()
                .filter(|name| backup::is_backup_of(&base, name).is_some()),
        );
        let target = backup::backup_path(&self.path, number);

        let mut input = File::open(&self.path).map_err(|source| self.write_failure(source))?;
        // backups are write-once and as private as the store
        store_fs::copy_new(&mut input, &target, constants::CREDENTIALS_FILE_MODE).map_err(
            |source| StoreError::WriteFailure {
                path: target.clone(),
                source,
            },
        )?;

        info!("backed up {} to {}", self.path.display(), target.display());
        Ok(target)
    }

    /// Parse `source` in full, and check every profile in it can be written
    /// back, without writing anything.
    fn validate(&self, source: &Path) -> Result<usize, StoreError> {
        let file = File::open(source).map_err(|e| StoreError::WriteFailure {
            path: source.to_path_buf(),
            source: e,
        })?;
        let mut count = 0;
        for profile in ProfileReader::new(file) {
            let profile = profile.map_err(|e| self.save_parse_failure(source, e))?;
            serializer::check_profile(&profile).map_err(|fault| StoreError::Unrepresentable {
                name: profile.name().to_string(),
                fault,
            })?;
            count += 1;
        }
        Ok(count)
    }

    fn rewrite(&self, source: &Path, profile: &Profile) -> Result<MergeSummary, StoreError> {
        let input = File::open(source).map_err(|e| StoreError::WriteFailure {
            path: source.to_path_buf(),
            source: e,
        })?;
        let output = File::create(&self.path).map_err(|e| self.write_failure(e))?;
        let mut output = BufWriter::new(output);
        let summary = merger::merge(input, &mut output, profile).map_err(|e| match e {
            MergeError::Parse(e) => self.save_parse_failure(source, e),
            MergeError::Write(e) => self.write_failure(e),
        })?;
        output
            .get_ref()
            .sync_all()
            .map_err(|e| self.write_failure(e))?;
        Ok(summary)
    }

    fn save_parse_failure(&self, source: &Path, err: ParseError) -> StoreError {
        match err {
            ParseError::Io(e) => StoreError::WriteFailure {
                path: source.to_path_buf(),
                source: e,
            },
            other => StoreError::from_parse(self.path.clone(), other),
        }
    }

    fn write_failure(&self, source: io::Error) -> StoreError {
        StoreError::WriteFailure {
            path: self.path.clone(),
            source,
        }
    }
}
