//! CLI routing and command dispatch.

use crate::core::credstore::CredentialStore;
use crate::core::paths::StorePaths;
use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

pub mod doctor;
pub mod list;
pub mod profile;
pub mod prompt;
pub mod restore;

/// Shared context passed to all command handlers.
pub struct CliContext {
    pub paths: StorePaths,
    pub non_interactive: bool,
}

impl CliContext {
    pub fn store(&self) -> CredentialStore {
        CredentialStore::new(self.paths.credentials.clone())
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "awsprofile",
    version,
    about = "Manage named profiles in an AWS credentials file (backed up on every change)"
)]
pub struct Cli {
    /// Credentials file (default: $AWS_SHARED_CREDENTIALS_FILE or ~/.aws/credentials)
    #[arg(long, global = true, value_name = "PATH")]
    pub credentials: Option<PathBuf>,

    /// Project directory holding .awsprofile.toml (default: current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Run in non-interactive mode (no prompts, suitable for automation)
    #[arg(long, global = true, env = "AWSPROFILE_NON_INTERACTIVE")]
    pub non_interactive: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let paths = StorePaths::resolve(self.credentials, self.project_dir)?;
        debug!("using {}", paths);

        let ctx = CliContext {
            paths,
            non_interactive: self.non_interactive,
        };

        match self.command {
            Commands::Profile(args) => profile::run(&ctx, args),
            Commands::List(args) => list::run_list(&ctx, args),
            Commands::Backups(args) => list::run_backups(&ctx, args),
            Commands::Restore(args) => restore::run(&ctx, args),
            Commands::Doctor => doctor::run(&ctx),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show or set the project's profile; with --set, store its access keys
    Profile(profile::ProfileArgs),
    /// List profiles in the credentials file
    List(list::ListArgs),
    /// List numbered backups of the credentials file
    Backups(list::ListArgs),
    /// Restore the credentials file from a backup
    Restore(restore::RestoreArgs),
    /// Diagnose the credentials file and project settings (safe, read-only)
    Doctor,
}
