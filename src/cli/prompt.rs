//! Where access keys and overwrite answers come from.

use anyhow::{bail, Context, Result};
use dialoguer::{Confirm, Input, Password};
use std::io::BufRead;
use zeroize::Zeroizing;

/// Key pair entered for a profile.
pub struct KeyPair {
    pub access_key_id: String,
    pub secret_access_key: Zeroizing<String>,
}

pub trait Prompter {
    fn credentials(&mut self, profile: &str) -> Result<KeyPair>;

    fn confirm_overwrite(&mut self, profile: &str) -> Result<bool>;
}

/// Interactive terminal prompts.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn credentials(&mut self, profile: &str) -> Result<KeyPair> {
        let access_key_id: String = Input::new()
            .with_prompt(format!("Access Key for [{}]", profile))
            .interact_text()
            .context("read access key from prompt")?;
        let secret_access_key = Zeroizing::new(
            Password::new()
                .with_prompt(format!("Secret Key for [{}]", profile))
                .allow_empty_password(false)
                .interact()
                .context("read secret key from prompt")?,
        );
        Ok(KeyPair {
            access_key_id,
            secret_access_key,
        })
    }

    fn confirm_overwrite(&mut self, profile: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(format!(
                "Profile [{}] already exists in your credentials file. Overwrite it?",
                profile
            ))
            .default(false)
            .interact()
            .context("read overwrite confirmation")
    }
}

/// Reads the access key and secret key as two lines, for automation.
/// Never confirms an overwrite on its own.
pub struct StdinPrompter<R> {
    input: R,
}

impl<R: BufRead> StdinPrompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    fn line(&mut self, what: &str) -> Result<Zeroizing<String>> {
        let mut buf = Zeroizing::new(String::new());
        let n = self
            .input
            .read_line(&mut buf)
            .with_context(|| format!("read {} from stdin", what))?;
        if n == 0 {
            bail!("stdin ended before the {} was read", what);
        }
        Ok(Zeroizing::new(buf.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl<R: BufRead> Prompter for StdinPrompter<R> {
    fn credentials(&mut self, _profile: &str) -> Result<KeyPair> {
        let access_key_id = self.line("access key")?.to_string();
        let secret_access_key = self.line("secret key")?;
        Ok(KeyPair {
            access_key_id,
            secret_access_key,
        })
    }

    fn confirm_overwrite(&mut self, _profile: &str) -> Result<bool> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdin_reads_two_lines() {
        let mut prompter = StdinPrompter::new("AKIA\r\nsecret/value\n".as_bytes());
        let keys = prompter.credentials("default").unwrap();
        assert_eq!(keys.access_key_id, "AKIA");
        assert_eq!(keys.secret_access_key.as_str(), "secret/value");
    }

    #[test]
    fn test_stdin_missing_secret() {
        let mut prompter = StdinPrompter::new("AKIA\n".as_bytes());
        assert!(prompter.credentials("default").is_err());
    }

    #[test]
    fn test_stdin_never_confirms() {
        let mut prompter = StdinPrompter::new("".as_bytes());
        assert!(!prompter.confirm_overwrite("default").unwrap());
    }
}
