use std::fs::{self, File, OpenOptions};
use std::io::{self, Read};
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

/// Create `path` (and parents) if missing, applying `mode` only to a
/// directory we created. Returns whether it was created.
pub fn ensure_dir(path: &Path, mode: u32) -> io::Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path)?;
    set_permissions(path, mode)?;
    Ok(true)
}

pub fn set_permissions(path: &Path, mode: u32) -> io::Result<()> {
    #[cfg(unix)]
    {
        fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    {
        let _ = (path, mode);
    }
    Ok(())
}

fn write_options(mode: u32) -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true);
    #[cfg(unix)]
    options.mode(mode);
    #[cfg(not(unix))]
    let _ = mode;
    options
}

/// Open `path` for writing and truncate it. A file created here gets `mode`;
/// an existing one keeps its permissions.
pub fn create_truncated(path: &Path, mode: u32) -> io::Result<File> {
    write_options(mode).create(true).truncate(true).open(path)
}

/// Copy `input` into a file at `target` that must not exist yet, created
/// with `mode` and synced. A partial target is removed if the copy fails.
pub fn copy_new(input: &mut impl Read, target: &Path, mode: u32) -> io::Result<u64> {
    let mut output = write_options(mode).create_new(true).open(target)?;
    let copied = io::copy(input, &mut output).and_then(|n| output.sync_all().map(|_| n));
    if copied.is_err() {
        drop(output);
        let _ = fs::remove_file(target);
    }
    copied
}

/// Permission bits of `path`, where the platform has them.
pub fn mode(path: &Path) -> io::Result<Option<u32>> {
    let meta = fs::metadata(path)?;
    #[cfg(unix)]
    {
        Ok(Some(meta.permissions().mode() & 0o777))
    }
    #[cfg(not(unix))]
    {
        let _ = meta;
        Ok(None)
    }
}
