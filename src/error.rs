//! Error handling for the gnomex application
//!
//! Errors are grouped by where they come from: the local environment, the
//! network, the catalog contents, and the external extension manager. Core
//! code only returns these; `main` is the single place that prints a
//! diagnostic and picks the exit code.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GnomexError {
    #[error("Environment error: {0}")]
    Environment(#[from] EnvironmentError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("Extension manager error: {0}")]
    Tool(#[from] ToolError),

    #[error("File system error: {0}")]
    FileSystem(#[from] FileSystemError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("unable to run `{command}`: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("unable to find a major.minor version in {output:?}")]
    UnparsableVersion { output: String },
}

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}{}", format_body(.body))]
    Status { url: String, status: u16, body: String },

    #[error("unable to parse response from {url}: {source}\n{body}")]
    Decode {
        url: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// The requested extension is missing, or published but not for this shell.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("extension with UUID {uuid} not found")]
    NotFound { uuid: String },

    #[error("extension {uuid} has no build for GNOME Shell {shell_version} (available: {})", format_available(.available))]
    IncompatibleShell {
        uuid: String,
        shell_version: String,
        available: Vec<String>,
    },
}

fn format_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{}", trimmed)
    }
}

fn format_available(available: &[String]) -> String {
    if available.is_empty() {
        "none".to_string()
    } else {
        available.join(", ")
    }
}

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("`{operation}` failed for {target} ({status}){}", format_stderr(.stderr))]
    Failed {
        operation: String,
        target: String,
        status: String,
        stderr: String,
    },
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

#[derive(Error, Debug)]
pub enum FileSystemError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to create temporary file: {0}")]
    TempFile(#[source] std::io::Error),

    #[error("unable to save artifact to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

pub type Result<T> = std::result::Result<T, GnomexError>;

impl GnomexError {
    /// Missing-from-catalog style failures, reported but not fatal to a batch.
    pub fn is_absence(&self) -> bool {
        matches!(self, GnomexError::Catalog(_))
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_absence() {
            3
        } else {
            1
        }
    }
}

impl From<std::io::Error> for GnomexError {
    fn from(err: std::io::Error) -> Self {
        GnomexError::FileSystem(FileSystemError::Io(err))
    }
}

impl From<reqwest::Error> for GnomexError {
    fn from(err: reqwest::Error) -> Self {
        GnomexError::Network(NetworkError::Http(err))
    }
}

impl From<toml::de::Error> for GnomexError {
    fn from(err: toml::de::Error) -> Self {
        GnomexError::Config(ConfigError::InvalidFormat(err))
    }
}

impl From<serde_json::Error> for GnomexError {
    fn from(err: serde_json::Error) -> Self {
        GnomexError::Internal(err.into())
    }
}
