//! Thin wrapper over the `gnome-extensions` executable.

use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::Path;
use std::process::Output;
use tokio::process::Command;
use tracing::debug;

use crate::error::{EnvironmentError, Result, ToolError};

#[async_trait]
pub trait ExtensionManager: Send + Sync {
    async fn install(&self, archive: &Path) -> Result<()>;
    async fn enable(&self, uuid: &str) -> Result<()>;
    async fn disable(&self, uuid: &str) -> Result<()>;
    async fn uninstall(&self, uuid: &str) -> Result<()>;
    /// UUIDs of the locally installed extensions.
    async fn list(&self) -> Result<Vec<String>>;
}

pub struct GnomeExtensions {
    command: String,
}

impl GnomeExtensions {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    async fn run<I, S>(&self, operation: &str, target: &str, args: I) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        debug!("Running {} {} for {}", self.command, operation, target);

        let output = Command::new(&self.command)
            .arg(operation)
            .args(args)
            .output()
            .await
            .map_err(|e| EnvironmentError::CommandFailed {
                command: format!("{} {}", self.command, operation),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ToolError::Failed {
                operation: operation.to_string(),
                target: target.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
            .into());
        }

        Ok(output)
    }
}

#[async_trait]
impl ExtensionManager for GnomeExtensions {
    async fn install(&self, archive: &Path) -> Result<()> {
        let target = archive.display().to_string();
        self.run("install", &target, [OsStr::new("--force"), archive.as_os_str()])
            .await
            .map(|_| ())
    }

    async fn enable(&self, uuid: &str) -> Result<()> {
        self.run("enable", uuid, [uuid]).await.map(|_| ())
    }

    async fn disable(&self, uuid: &str) -> Result<()> {
        self.run("disable", uuid, [uuid]).await.map(|_| ())
    }

    async fn uninstall(&self, uuid: &str) -> Result<()> {
        self.run("uninstall", uuid, [uuid]).await.map(|_| ())
    }

    async fn list(&self) -> Result<Vec<String>> {
        let output = self.run("list", "installed extensions", Vec::<&str>::new()).await?;
        Ok(parse_list(&String::from_utf8_lossy(&output.stdout)))
    }
}

pub fn parse_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GnomexError;

    #[test]
    fn test_parse_list_skips_blank_lines() {
        let stdout = "dash-to-dock@micxgx.gmail.com\n\n  user-theme@gnome-shell-extensions.gcampax.github.com \n";
        assert_eq!(
            parse_list(stdout),
            vec![
                "dash-to-dock@micxgx.gmail.com".to_string(),
                "user-theme@gnome-shell-extensions.gcampax.github.com".to_string(),
            ]
        );
        assert!(parse_list("").is_empty());
    }

    #[tokio::test]
    async fn test_missing_executable_is_environment_error() {
        let manager = GnomeExtensions::new("gnomex-test-no-such-extensions-binary");
        let err = manager.enable("a@x").await.unwrap_err();
        assert!(matches!(
            err,
            GnomexError::Environment(EnvironmentError::CommandFailed { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_tool_error() {
        // `false` ignores its arguments and exits 1
        let manager = GnomeExtensions::new("false");
        let err = manager.disable("a@x").await.unwrap_err();
        match err {
            GnomexError::Tool(ToolError::Failed { operation, target, .. }) => {
                assert_eq!(operation, "disable");
                assert_eq!(target, "a@x");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_list_reads_stdout_lines() {
        // `echo list` prints the operation name itself
        let manager = GnomeExtensions::new("echo");
        assert_eq!(manager.list().await.unwrap(), vec!["list".to_string()]);
    }
}
