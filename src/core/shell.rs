//! Detection of the installed GNOME Shell version.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use tokio::process::Command;
use tracing::debug;

use crate::error::{EnvironmentError, Result};

/// A "major.minor" shell release line, e.g. `3.36` or `40.1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShellVersion(String);

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+)\.(\d+)").expect("valid version regex"))
}

impl ShellVersion {
    /// Extract the first dotted version from free text, keeping only major.minor.
    pub fn parse(output: &str) -> Result<Self> {
        let captures = version_pattern().captures(output).ok_or_else(|| {
            EnvironmentError::UnparsableVersion {
                output: output.trim().to_string(),
            }
        })?;

        Ok(Self(format!("{}.{}", &captures[1], &captures[2])))
    }

    /// Run `<command> --version` and parse what it prints.
    pub async fn probe(command: &str) -> Result<Self> {
        let output = Command::new(command)
            .arg("--version")
            .output()
            .await
            .map_err(|e| EnvironmentError::CommandFailed {
                command: format!("{} --version", command),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(EnvironmentError::CommandFailed {
                command: format!("{} --version", command),
                reason: output.status.to_string(),
            }
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let version = Self::parse(&stdout)?;
        debug!("Detected GNOME Shell {}", version);
        Ok(version)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShellVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
