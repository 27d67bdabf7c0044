//! Centralized constants for paths, permissions, and file format.

/// Directory under the user's home holding the credentials file.
pub const DEFAULT_CREDENTIALS_DIR: &str = ".aws";

/// File name of the credentials store.
pub const CREDENTIALS_FILE_NAME: &str = "credentials";

/// Environment variable overriding the credentials file location.
pub const CREDENTIALS_ENV_VAR: &str = "AWS_SHARED_CREDENTIALS_FILE";

/// Extension appended to numbered backups (`credentials.3.bak`).
pub const BACKUP_EXTENSION: &str = "bak";

/// Permission mode for a credentials directory we create.
pub const CREDENTIALS_DIR_MODE: u32 = 0o700;

/// Permission mode for the credentials file.
pub const CREDENTIALS_FILE_MODE: u32 = 0o600;

/// Size of each chunk pulled from a credentials source.
pub const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Profile name used when a project has none configured.
pub const DEFAULT_PROFILE: &str = "default";

/// Key holding the access key id.
pub const ACCESS_KEY_ID: &str = "aws_access_key_id";

/// Key holding the secret access key.
pub const SECRET_ACCESS_KEY: &str = "aws_secret_access_key";

/// Project settings file, relative to the project directory.
pub const PROJECT_CONFIG_FILE: &str = ".awsprofile.toml";
