//! Numbered backup naming: `<file>.<n>.bak`.

use crate::constants;
use std::path::{Path, PathBuf};

/// Extract `n` from a `<anything>.<n>.bak` file name.
pub fn parse_backup_number(file_name: &str) -> Option<u32> {
    let mut segments = file_name.rsplitn(3, '.');
    if segments.next()? != constants::BACKUP_EXTENSION {
        return None;
    }
    let number: u32 = segments.next()?.parse().ok()?;
    let base = segments.next()?;
    (!base.is_empty() && number > 0).then_some(number)
}

/// One past the highest backup number in `file_names`, or 1 when there is none.
/// Names that are not backups are ignored.
pub fn next_backup_number<I, S>(file_names: I) -> u32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    file_names
        .into_iter()
        .filter_map(|name| parse_backup_number(name.as_ref()))
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

/// `<basename(store_path)>.<number>.bak`
pub fn backup_name(store_path: &Path, number: u32) -> String {
    let base = store_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}.{}.{}", base, number, constants::BACKUP_EXTENSION)
}

/// Backup path colocated with the store.
pub fn backup_path(store_path: &Path, number: u32) -> PathBuf {
    store_path.with_file_name(backup_name(store_path, number))
}

/// Whether `file_name` is a backup of the store named `base`.
pub fn is_backup_of(base: &str, file_name: &str) -> Option<u32> {
    let number = parse_backup_number(file_name)?;
    let expected = format!("{}.{}.{}", base, number, constants::BACKUP_EXTENSION);
    (file_name == expected).then_some(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backups(numbers: &[u32]) -> Vec<String> {
        numbers.iter().map(|n| format!("credentials.{}.bak", n)).collect()
    }

    #[test]
    fn test_next_number_after_max() {
        assert_eq!(next_backup_number(backups(&[2, 4, 6, 3, 10, 5])), 11);
    }

    #[test]
    fn test_next_number_empty() {
        assert_eq!(next_backup_number(Vec::<String>::new()), 1);
    }

    #[test]
    fn test_non_backups_ignored() {
        let mut names = backups(&[1, 2]);
        names.extend(
            [
                "credentials",
                "config",
                "credentials.bak",
                "credentials.x.bak",
                "credentials.99.tmp",
                "credentials.-4.bak",
                ".7.bak",
                "notes.txt",
            ]
            .iter()
            .map(|s| s.to_string()),
        );
        assert_eq!(next_backup_number(names), 3);
    }

    #[test]
    fn test_only_non_backups_yield_one() {
        assert_eq!(next_backup_number(["credentials", "config"]), 1);
    }

    #[test]
    fn test_zero_is_not_a_backup() {
        assert_eq!(parse_backup_number("credentials.0.bak"), None);
        assert_eq!(next_backup_number(["credentials.0.bak"]), 1);
    }

    #[test]
    fn test_backup_name() {
        assert_eq!(
            backup_name(Path::new("/home/u/.aws/credentials"), 3),
            "credentials.3.bak"
        );
        assert_eq!(
            backup_path(Path::new("/home/u/.aws/credentials"), 1),
            PathBuf::from("/home/u/.aws/credentials.1.bak")
        );
    }

    #[test]
    fn test_is_backup_of() {
        assert_eq!(is_backup_of("credentials", "credentials.4.bak"), Some(4));
        assert_eq!(is_backup_of("credentials", "config.4.bak"), None);
        assert_eq!(is_backup_of("credentials", "credentials"), None);
    }
}
