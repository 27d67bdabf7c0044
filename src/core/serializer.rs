//! Canonical credentials encoding, the inverse of the parser.
//!
//! Each profile is a `[name]` header followed by `key = value` lines in
//! stored order. Profiles are separated by one blank line; the output ends
//! with a single newline and no trailing blank line.

use crate::core::error::FieldFault;
use crate::models::profile::Profile;
use std::io::{self, Write};

/// Check that `profile` parses back to itself once written.
pub fn check_profile(profile: &Profile) -> Result<(), FieldFault> {
    let name = profile.name();
    if name.trim().is_empty() {
        return Err(FieldFault::EmptyName);
    }
    check_text(name)?;
    for (key, value) in profile.entries() {
        if key.trim().is_empty() {
            return Err(FieldFault::EmptyKey);
        }
        check_text(key)?;
        check_text(value)?;
        if key.contains('=') {
            return Err(FieldFault::SeparatorInKey);
        }
        if key.starts_with('[') && value.ends_with(']') {
            return Err(FieldFault::ReadsAsHeader);
        }
    }
    Ok(())
}

fn check_text(text: &str) -> Result<(), FieldFault> {
    if text.contains(['\r', '\n']) {
        return Err(FieldFault::LineBreak);
    }
    if text.trim() != text {
        return Err(FieldFault::Padded);
    }
    Ok(())
}

pub struct ProfileWriter<W: Write> {
    sink: W,
    written: usize,
}

impl<W: Write> ProfileWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink, written: 0 }
    }

    /// Fails with `InvalidInput`, writing nothing, when the profile cannot
    /// be represented.
    pub fn write_profile(&mut self, profile: &Profile) -> io::Result<()> {
        check_profile(profile)
            .map_err(|fault| io::Error::new(io::ErrorKind::InvalidInput, fault))?;
        if self.written > 0 {
            self.sink.write_all(b"\n")?;
        }
        writeln!(self.sink, "[{}]", profile.name())?;
        for (key, value) in profile.entries() {
            writeln!(self.sink, "{} = {}", key, value)?;
        }
        self.written += 1;
        Ok(())
    }

    /// Number of profiles written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

/// Encode a full profile sequence into a string.
pub fn to_string<'a, I>(profiles: I) -> Result<String, FieldFault>
where
    I: IntoIterator<Item = &'a Profile>,
{
    let mut out = Vec::new();
    let mut writer = ProfileWriter::new(&mut out);
    for profile in profiles {
        check_profile(profile)?;
        // writing into a Vec cannot fail
        let _ = writer.write_profile(profile);
    }
    Ok(String::from_utf8_lossy(&out).into_owned())
}
