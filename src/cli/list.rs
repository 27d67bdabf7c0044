use crate::cli::CliContext;
use crate::core::project;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output format: table|json
    #[arg(long, default_value = "table")]
    pub format: String,
}

#[derive(Serialize)]
struct ListItem {
    name: String,
    keys: Vec<String>,
    active: bool,
}

#[derive(Serialize)]
struct BackupItem {
    number: u32,
    path: String,
    size_bytes: u64,
    modified: Option<String>,
}

fn check_format(format: &str) -> Result<()> {
    if format != "table" && format != "json" {
        bail!("invalid format: {} (use table|json)", format);
    }
    Ok(())
}

/// Profile names and key names. Values are never printed.
pub fn run_list(ctx: &CliContext, args: ListArgs) -> Result<()> {
    check_format(&args.format)?;
    let store = ctx.store();
    let active = project::load(&ctx.paths.project_config)?;
    let items: Vec<ListItem> = store
        .profiles()?
        .iter()
        .map(|p| ListItem {
            name: p.name().to_string(),
            keys: p.keys().map(str::to_string).collect(),
            active: p.name() == active.profile_name(),
        })
        .collect();

    if args.format == "json" {
        let json = serde_json::to_string_pretty(&items).context("serialize list")?;
        println!("{}", json);
        return Ok(());
    }

    if items.is_empty() {
        println!("No profiles in {}", store.path().display());
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Profile").add_attribute(Attribute::Bold),
        Cell::new("Keys").add_attribute(Attribute::Bold),
        Cell::new("Project").add_attribute(Attribute::Bold),
    ]);
    for item in items {
        let keys = if item.keys.is_empty() {
            "-".to_string()
        } else {
            item.keys.join(",")
        };
        let active = if item.active { "*" } else { "" };
        table.add_row(vec![item.name, keys, active.to_string()]);
    }
    println!("{}", table);
    Ok(())
}

pub fn run_backups(ctx: &CliContext, args: ListArgs) -> Result<()> {
    check_format(&args.format)?;
    let store = ctx.store();
    let items: Vec<BackupItem> = store
        .backups()?
        .into_iter()
        .map(|b| BackupItem {
            number: b.number,
            path: b.path.display().to_string(),
            size_bytes: b.size_bytes,
            modified: b.modified.map(|t| {
                let dt: DateTime<Local> = t.into();
                dt.format("%Y-%m-%d %H:%M:%S").to_string()
            }),
        })
        .collect();

    if args.format == "json" {
        let json = serde_json::to_string_pretty(&items).context("serialize backups")?;
        println!("{}", json);
        return Ok(());
    }

    if items.is_empty() {
        println!("No backups of {}", store.path().display());
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Path").add_attribute(Attribute::Bold),
        Cell::new("Size").add_attribute(Attribute::Bold),
        Cell::new("Modified").add_attribute(Attribute::Bold),
    ]);
    for item in items {
        table.add_row(vec![
            item.number.to_string(),
            item.path,
            format!("{} B", item.size_bytes),
            item.modified.unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{}", table);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_format() {
        assert!(check_format("table").is_ok());
        assert!(check_format("json").is_ok());
        assert!(check_format("yaml").is_err());
    }
}
