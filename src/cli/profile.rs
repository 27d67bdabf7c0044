use crate::cli::prompt::{Prompter, StdinPrompter, TerminalPrompter};
use crate::cli::CliContext;
use crate::core::credstore::{CredentialStore, SaveOutcome};
use crate::core::project;
use crate::models::profile::Profile;
use anyhow::{bail, Context, Result};
use clap::Args;

pub(crate) fn parse_profile_name(s: &str) -> Result<String, String> {
    let name = s.trim();
    if name.is_empty() {
        return Err("name cannot be empty".into());
    }
    if name
        .chars()
        .any(|c| matches!(c, '[' | ']' | '=' | '\r' | '\n'))
    {
        return Err("'[', ']', '=' and line breaks are not allowed".into());
    }
    Ok(name.to_string())
}

#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// Profile name this project should use
    #[arg(value_parser = parse_profile_name)]
    pub name: Option<String>,

    /// Prompt for an access key and secret key and store them under the profile
    #[arg(short, long, requires = "name")]
    pub set: bool,

    /// Read the access key and secret key (one per line) from stdin
    #[arg(long, requires = "set")]
    pub from_stdin: bool,

    /// Overwrite an existing profile without asking
    #[arg(long, requires = "set")]
    pub force: bool,
}

#[derive(Debug)]
pub enum ConfigureOutcome {
    Saved(SaveOutcome),
    /// The profile exists and the overwrite was not confirmed.
    Declined,
}

pub fn run(ctx: &CliContext, args: ProfileArgs) -> Result<()> {
    let paths = &ctx.paths;
    let Some(name) = args.name else {
        return show(ctx);
    };

    if args.set && ctx.non_interactive && !args.from_stdin {
        bail!("--non-interactive requires --from-stdin for --set");
    }

    project::set_profile(&paths.project_config, &name)?;

    if args.set {
        let store = ctx.store();
        let outcome = if args.from_stdin {
            let stdin = std::io::stdin();
            let mut prompter = StdinPrompter::new(stdin.lock());
            configure(&store, &name, &mut prompter, args.force)?
        } else {
            configure(&store, &name, &mut TerminalPrompter, args.force)?
        };
        match outcome {
            ConfigureOutcome::Saved(saved) => {
                if let Some(backup) = &saved.backup {
                    println!("Backed up {} to {}", saved.path.display(), backup.display());
                }
                let verb = if saved.replaced { "Updated" } else { "Added" };
                println!("{} profile [{}] in {}", verb, name, saved.path.display());
            }
            ConfigureOutcome::Declined => {
                println!("Kept existing profile [{}]; nothing written", name);
                if args.from_stdin && !args.force {
                    println!("(use --force to overwrite it)");
                }
            }
        }
    }

    show(ctx)
}

fn show(ctx: &CliContext) -> Result<()> {
    let project = project::load(&ctx.paths.project_config)?;
    let name = project.profile_name();
    println!("Profile: {}", name);

    let store = ctx.store();
    match store.profile_exists(name) {
        Ok(true) => {}
        Ok(false) => println!(
            "  (no [{}] profile in {}; run with --set to add one)",
            name,
            store.path().display()
        ),
        Err(e) => println!("  (cannot read {}: {})", store.path().display(), e),
    }
    Ok(())
}

/// Ask for a key pair and save it under `name`, confirming first when the
/// profile already exists (unless `force`).
pub fn configure(
    store: &CredentialStore,
    name: &str,
    prompter: &mut dyn Prompter,
    force: bool,
) -> Result<ConfigureOutcome> {
    let exists = store
        .profile_exists(name)
        .with_context(|| format!("look up profile [{}]", name))?;
    if exists && !force && !prompter.confirm_overwrite(name)? {
        return Ok(ConfigureOutcome::Declined);
    }

    let keys = prompter.credentials(name)?;
    check_value("access key", &keys.access_key_id)?;
    check_value("secret key", &keys.secret_access_key)?;

    let profile = Profile::aws(
        name,
        keys.access_key_id.trim(),
        keys.secret_access_key.trim(),
    );
    let saved = store
        .save_credentials(&profile)
        .with_context(|| format!("save profile [{}]", name))?;
    Ok(ConfigureOutcome::Saved(saved))
}

fn check_value(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("{} is empty", what);
    }
    if value.contains(['\r', '\n']) {
        bail!("{} must be a single line", what);
    }
    Ok(())
}
