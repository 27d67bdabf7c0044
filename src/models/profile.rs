//! A named credentials profile.

use crate::constants;
use std::fmt;
use zeroize::Zeroize;

/// A named, ordered set of key/value credential fields.
///
/// Key order is kept as read (or inserted) so a rewrite reproduces it, but
/// equality ignores order: two profiles are equal when they share a name and
/// the same key/value mapping.
#[derive(Clone, Default)]
pub struct Profile {
    name: String,
    entries: Vec<(String, String)>,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Build the two-key profile written by `profile --set`.
    pub fn aws(name: impl Into<String>, access_key_id: &str, secret_access_key: &str) -> Self {
        Self::new(name)
            .with_entry(constants::ACCESS_KEY_ID, access_key_id)
            .with_entry(constants::SECRET_ACCESS_KEY, secret_access_key)
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert a key, keeping its original position when it already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => {
                existing.zeroize();
                *existing = value;
            }
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Entries in stored order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// values stay out of debug output and panic messages
impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("name", &self.name)
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl PartialEq for Profile {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.entries.len() == other.entries.len()
            && self.entries().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for Profile {}

impl Drop for Profile {
    fn drop(&mut self) {
        for (_, value) in &mut self.entries {
            value.zeroize();
        }
    }
}
