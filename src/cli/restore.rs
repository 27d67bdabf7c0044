use crate::cli::CliContext;
use anyhow::{Context, Result};
use clap::Args;

#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// Backup number to restore (default: the most recent)
    #[arg(long, value_name = "N")]
    pub number: Option<u32>,
}

pub fn run(ctx: &CliContext, args: RestoreArgs) -> Result<()> {
    let store = ctx.store();
    let outcome = store
        .restore_backup(args.number)
        .with_context(|| format!("restore {}", store.path().display()))?;
    if let Some(previous) = &outcome.previous {
        println!("Backed up {} to {}", store.path().display(), previous.display());
    }
    println!(
        "Restored {} from {}",
        store.path().display(),
        outcome.restored_from.display()
    );
    Ok(())
}
