use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use directories::ProjectDirs;
use tracing::debug;

use crate::error::{ConfigError, GnomexError, Result};

pub mod env;
pub mod validation;

use env::{EnvParser, EnvVars};
use validation::ConfigValidator;

pub const DEFAULT_EXTENSIONS_HOME: &str = "https://extensions.gnome.org";
pub const DEFAULT_SEARCH_URL: &str = "https://extensions.gnome.org/extension-query";
pub const DEFAULT_DOWNLOAD_URL_TEMPLATE: &str =
    "https://extensions.gnome.org/extension-data/UUID.vVERSION.shell-extension.zip";

/// extensions.gnome.org rejects clients that do not look like a browser.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:74.0) Gecko/20100101 Firefox/74.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the catalog website, used to build detail page links
    pub extensions_home: String,

    /// Paginated search endpoint
    pub search_url: String,

    /// Artifact URL with `UUID` and `VERSION` placeholders
    pub download_url_template: String,

    /// User-Agent sent with every request
    pub user_agent: String,

    /// Per-request timeout for catalog queries (seconds)
    pub request_timeout_secs: u64,

    /// Upper bound for a single artifact download (seconds)
    pub download_timeout_secs: u64,

    /// Executable that reports the installed shell version
    pub shell_command: String,

    /// Executable that installs and toggles extensions
    pub extensions_command: String,

    /// Skip probing and use this "major.minor" shell version
    pub shell_version: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions_home: DEFAULT_EXTENSIONS_HOME.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            download_url_template: DEFAULT_DOWNLOAD_URL_TEMPLATE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 2,
            download_timeout_secs: 120,
            shell_command: "gnome-shell".to_string(),
            extensions_command: "gnome-extensions".to_string(),
            shell_version: None,
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_file = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                if !path.exists() {
                    return Err(ConfigError::FileNotFound { path }.into());
                }
                Some(path)
            }
            None => Self::default_config_path().ok().filter(|p| p.exists()),
        };

        let mut config = match config_file {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };

        // Environment variables take priority over the file
        config.load_from_env()?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn load_from_env(&mut self) -> Result<()> {
        if let Some(url) = EnvParser::parse_string(EnvVars::EXTENSIONS_HOME, None)? {
            self.extensions_home = url;
        }

        if let Some(url) = EnvParser::parse_string(EnvVars::SEARCH_URL, None)? {
            self.search_url = url;
        }

        if let Some(template) = EnvParser::parse_string(
            EnvVars::DOWNLOAD_URL_TEMPLATE,
            Some(ConfigValidator::validate_download_template),
        )? {
            self.download_url_template = template;
        }

        if let Some(agent) = EnvParser::parse_string(EnvVars::USER_AGENT, None)? {
            self.user_agent = agent;
        }

        if let Some(secs) = EnvParser::parse_u64(EnvVars::REQUEST_TIMEOUT_SECS, 1, 300)? {
            self.request_timeout_secs = secs;
        }

        if let Some(secs) = EnvParser::parse_u64(EnvVars::DOWNLOAD_TIMEOUT_SECS, 1, 3600)? {
            self.download_timeout_secs = secs;
        }

        if let Some(command) = EnvParser::parse_string(EnvVars::SHELL_COMMAND, None)? {
            self.shell_command = command;
        }

        if let Some(command) = EnvParser::parse_string(EnvVars::EXTENSIONS_COMMAND, None)? {
            self.extensions_command = command;
        }

        if let Some(version) = EnvParser::parse_string(
            EnvVars::SHELL_VERSION,
            Some(ConfigValidator::validate_shell_version),
        )? {
            self.shell_version = Some(version);
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate_url(&self.extensions_home, "extensions_home")?;
        ConfigValidator::validate_url(&self.search_url, "search_url")?;
        ConfigValidator::validate_download_template(&self.download_url_template)?;
        ConfigValidator::validate_range(self.request_timeout_secs, 1, 300, "request_timeout_secs")?;
        ConfigValidator::validate_range(self.download_timeout_secs, 1, 3600, "download_timeout_secs")?;

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "user_agent".to_string(),
                value: self.user_agent.clone(),
            }
            .into());
        }

        if let Some(ref version) = self.shell_version {
            ConfigValidator::validate_shell_version(version)?;
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GnomexError::Internal(e.into()))
    }

    fn default_config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("org", "gnomex", "gnomex")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Self::default_config_path()
    }
}
