//! Incremental credentials parser.
//!
//! `RecordParser` is a state machine fed raw byte chunks split at arbitrary
//! points; `ProfileReader` drives it from any `Read` and yields profiles
//! lazily, in file order.

use crate::constants;
use crate::core::error::{LineFault, ParseError};
use crate::models::profile::Profile;
use std::collections::VecDeque;
use std::io::{ErrorKind, Read};

/// Line-oriented parser state carried between chunks.
///
/// A profile is only handed out once the next header (or the end of input)
/// proves it complete.
#[derive(Debug, Default)]
pub struct RecordParser {
    carry: Vec<u8>,
    current: Option<Profile>,
    line_number: usize,
}

impl RecordParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one chunk, pushing every profile it completes onto `out`.
    pub fn feed(&mut self, chunk: &[u8], out: &mut VecDeque<Profile>) -> Result<(), ParseError> {
        let mut rest = chunk;
        while let Some(pos) = rest.iter().position(|&b| b == b'\n') {
            let (head, tail) = rest.split_at(pos);
            rest = &tail[1..];
            if self.carry.is_empty() {
                self.interpret(head, out)?;
            } else {
                let mut line = std::mem::take(&mut self.carry);
                line.extend_from_slice(head);
                self.interpret(&line, out)?;
            }
        }
        self.carry.extend_from_slice(rest);
        Ok(())
    }

    /// Flush the trailing line and the last open profile.
    pub fn finish(&mut self, out: &mut VecDeque<Profile>) -> Result<(), ParseError> {
        if !self.carry.is_empty() {
            let line = std::mem::take(&mut self.carry);
            self.interpret(&line, out)?;
        }
        if let Some(profile) = self.current.take() {
            out.push_back(profile);
        }
        Ok(())
    }

    fn interpret(&mut self, raw: &[u8], out: &mut VecDeque<Profile>) -> Result<(), ParseError> {
        self.line_number += 1;
        let line = std::str::from_utf8(raw).map_err(|_| self.fault(LineFault::InvalidUtf8))?;
        let line = if self.line_number == 1 {
            line.trim_start_matches('\u{feff}')
        } else {
            line
        };
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        if let Some(inner) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = inner.trim();
            if name.is_empty() {
                return Err(self.fault(LineFault::EmptyName));
            }
            if let Some(done) = self.current.replace(Profile::new(name)) {
                out.push_back(done);
            }
            return Ok(());
        }

        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| self.fault(LineFault::MissingSeparator))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(self.fault(LineFault::EmptyKey));
        }
        let line_number = self.line_number;
        match self.current.as_mut() {
            Some(profile) => {
                profile.insert(key, value.trim());
                Ok(())
            }
            None => Err(ParseError::MalformedLine {
                line_number,
                fault: LineFault::OrphanEntry,
            }),
        }
    }

    fn fault(&self, fault: LineFault) -> ParseError {
        ParseError::MalformedLine {
            line_number: self.line_number,
            fault,
        }
    }
}

/// Pull-based profile iterator over a byte source.
///
/// Profiles completed before an error are still yielded, then the error,
/// after which the iterator is fused and yields nothing more.
pub struct ProfileReader<R> {
    source: R,
    parser: RecordParser,
    ready: VecDeque<Profile>,
    failed: Option<ParseError>,
    buf: Vec<u8>,
    done: bool,
}

impl<R: Read> ProfileReader<R> {
    pub fn new(source: R) -> Self {
        Self::with_chunk_size(source, constants::READ_CHUNK_SIZE)
    }

    pub fn with_chunk_size(source: R, chunk_size: usize) -> Self {
        Self {
            source,
            parser: RecordParser::new(),
            ready: VecDeque::new(),
            failed: None,
            buf: vec![0; chunk_size.max(1)],
            done: false,
        }
    }

    fn pull(&mut self) -> Result<(), ParseError> {
        loop {
            match self.source.read(&mut self.buf) {
                Ok(0) => {
                    self.done = true;
                    return self.parser.finish(&mut self.ready);
                }
                Ok(n) => return self.parser.feed(&self.buf[..n], &mut self.ready),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R: Read> Iterator for ProfileReader<R> {
    type Item = Result<Profile, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(profile) = self.ready.pop_front() {
                return Some(Ok(profile));
            }
            if let Some(e) = self.failed.take() {
                return Some(Err(e));
            }
            if self.done {
                return None;
            }
            if let Err(e) = self.pull() {
                self.done = true;
                self.failed = Some(e);
            }
        }
    }
}

/// Parse a complete in-memory document.
pub fn parse_str(text: &str) -> Result<Vec<Profile>, ParseError> {
    ProfileReader::new(text.as_bytes()).collect()
}
