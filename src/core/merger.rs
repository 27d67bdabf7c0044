//! Single-profile rewrite of a credentials stream.

use crate::core::error::MergeError;
use crate::core::parser::ProfileReader;
use crate::core::serializer::ProfileWriter;
use crate::models::profile::Profile;
use std::io::{Read, Write};

/// What a merge did to the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeSummary {
    /// The replacement took the place of an existing profile.
    pub replaced: bool,
    /// Profiles written, replacement included.
    pub profiles: usize,
}

/// Copy `source` to `sink`, substituting `replacement` for the first profile
/// with the same name, or appending it when none matches.
///
/// Profiles are written one at a time as they are read. Later duplicates of
/// the replaced name pass through untouched.
pub fn merge<R, W>(source: R, sink: W, replacement: &Profile) -> Result<MergeSummary, MergeError>
where
    R: Read,
    W: Write,
{
    let mut writer = ProfileWriter::new(sink);
    let mut replaced = false;

    for profile in ProfileReader::new(source) {
        let profile = profile?;
        let out = if !replaced && profile.name() == replacement.name() {
            replaced = true;
            replacement
        } else {
            &profile
        };
        writer.write_profile(out).map_err(MergeError::Write)?;
    }

    if !replaced {
        writer.write_profile(replacement).map_err(MergeError::Write)?;
    }

    let profiles = writer.written();
    writer.finish().map_err(MergeError::Write)?;
    Ok(MergeSummary { replaced, profiles })
}
