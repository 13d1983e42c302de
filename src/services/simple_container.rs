use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::config::Config;
use crate::core::acquire::HttpDownloader;
use crate::core::catalog::{CatalogClient, HttpCatalog};
use crate::core::manager::GnomeExtensions;
use crate::core::shell::ShellVersion;
use crate::error::Result;

pub struct SimpleServices {
    config: Arc<Config>,
    shell_override: Option<String>,
    shell_version: OnceCell<ShellVersion>,
}

impl SimpleServices {
    pub fn new(config: Config, shell_override: Option<String>) -> Self {
        Self {
            config: Arc::new(config),
            shell_override,
            shell_version: OnceCell::new(),
        }
    }

    pub fn config(&self) -> Arc<Config> {
        self.config.clone()
    }

    /// The CLI flag wins over the config value; otherwise ask the shell.
    /// Probed at most once per process.
    pub async fn shell_version(&self) -> Result<ShellVersion> {
        let version = self
            .shell_version
            .get_or_try_init(|| async {
                match self.shell_override.as_deref().or(self.config.shell_version.as_deref()) {
                    Some(version) => {
                        debug!("Using configured GNOME Shell version {}", version);
                        ShellVersion::parse(version)
                    }
                    None => ShellVersion::probe(&self.config.shell_command).await,
                }
            })
            .await?;
        Ok(version.clone())
    }

    pub async fn create_catalog_client(&self) -> Result<CatalogClient> {
        let shell_version = self.shell_version().await?;
        let source = HttpCatalog::new(&self.config)?;
        Ok(CatalogClient::new(Box::new(source), shell_version))
    }

    pub fn create_downloader(&self) -> Result<HttpDownloader> {
        HttpDownloader::new(&self.config)
    }

    pub fn create_extension_manager(&self) -> GnomeExtensions {
        GnomeExtensions::new(self.config.extensions_command.clone())
    }
}
