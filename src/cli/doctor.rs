//! Read-only diagnostics for the credentials store.

use crate::cli::CliContext;
use crate::constants;
use crate::core::project;
use crate::util::fs as store_fs;
use anyhow::{bail, Result};

pub fn run(ctx: &CliContext) -> Result<()> {
    let store = ctx.store();
    let mut ok = 0u32;
    let mut warn = 0u32;
    let mut fail = 0u32;

    println!("Doctor: {}", ctx.paths);

    match store.is_valid() {
        Ok(_) => {
            println!("  [PASS] credentials directory exists: {}", store.dir().display());
            ok += 1;
        }
        Err(e) => {
            println!("  [FAIL] {}", e);
            fail += 1;
        }
    }

    if store.exists() {
        println!("  [PASS] credentials file exists: {}", store.path().display());
        ok += 1;
        match store.profiles() {
            Ok(profiles) => {
                println!("  [PASS] credentials file parses: {} profile(s)", profiles.len());
                ok += 1;
            }
            Err(e) => {
                println!("  [FAIL] {}", e);
                fail += 1;
            }
        }
        if let Ok(Some(mode)) = store_fs::mode(store.path()) {
            if mode & 0o077 == 0 {
                println!("  [PASS] credentials file mode ok: {:04o}", mode);
                ok += 1;
            } else {
                println!(
                    "  [WARN] credentials file mode: {:04o} (expected {:04o})",
                    mode,
                    constants::CREDENTIALS_FILE_MODE
                );
                warn += 1;
            }
        }
    } else {
        println!(
            "  [WARN] credentials file missing: {} (created on first save)",
            store.path().display()
        );
        warn += 1;
    }

    match store.backups() {
        Ok(backups) => {
            println!("  [INFO] {} backup(s)", backups.len());
            if let Some(latest) = backups.last() {
                println!("    latest: {}", latest.path.display());
            }
        }
        Err(e) => {
            println!("  [WARN] cannot list backups: {}", e);
            warn += 1;
        }
    }

    match project::load(&ctx.paths.project_config) {
        Ok(p) => {
            let name = p.profile_name();
            match store.profile_exists(name) {
                Ok(true) => {
                    println!("  [PASS] project profile [{}] present", name);
                    ok += 1;
                }
                Ok(false) => {
                    println!("  [WARN] project profile [{}] not in credentials file", name);
                    warn += 1;
                }
                // already reported by the parse check above
                Err(_) => {}
            }
        }
        Err(e) => {
            println!("  [FAIL] {:#}", e);
            fail += 1;
        }
    }

    println!();
    println!("Doctor summary: {} pass, {} warn, {} fail", ok, warn, fail);
    if fail > 0 {
        bail!("{} check(s) failed", fail);
    }
    Ok(())
}
