use clap::Args;
use tracing::debug;

use crate::core::acquire::{ArtifactDownloader, ProgressSink};
use crate::core::catalog::{CatalogClient, Extension};
use crate::core::manager::ExtensionManager;
use crate::error::Result;
use crate::services::SimpleServices;
use crate::ui::Output;
use crate::utils::progress::DownloadProgress;

#[derive(Args)]
pub struct InstallArgs {
    /// UUID of the extension, e.g. dash-to-dock@micxgx.gmail.com
    #[arg(value_name = "UUID")]
    uuid: String,
}

/// Catalog lookup, download, then `install` + `enable` through the manager.
pub struct Installer<'a> {
    catalog: &'a CatalogClient,
    downloader: &'a dyn ArtifactDownloader,
    manager: &'a dyn ExtensionManager,
    output: Output,
}

impl<'a> Installer<'a> {
    pub fn new(
        catalog: &'a CatalogClient,
        downloader: &'a dyn ArtifactDownloader,
        manager: &'a dyn ExtensionManager,
        output: Output,
    ) -> Self {
        Self {
            catalog,
            downloader,
            manager,
            output,
        }
    }

    pub async fn install(&self, uuid: &str, sink: &mut dyn ProgressSink) -> Result<Extension> {
        let extension = self.catalog.lookup(uuid).await?;
        println!("{}", self.output.short_info(&extension));

        println!("downloading extension");
        let artifact = self
            .downloader
            .acquire(&extension, self.catalog.shell_version(), sink)
            .await?;
        debug!(
            "Installing {} from {} ({} bytes)",
            uuid,
            artifact.path().display(),
            artifact.bytes()
        );

        let installed = self.manager.install(artifact.path()).await;
        // The archive is deleted whether or not the install succeeded
        drop(artifact);
        installed?;
        println!("extension installed");

        self.manager.enable(uuid).await?;
        println!("extension enabled");

        Ok(extension)
    }
}

pub async fn execute(args: InstallArgs, services: &SimpleServices) -> Result<()> {
    let catalog = services.create_catalog_client().await?;
    let downloader = services.create_downloader()?;
    let manager = services.create_extension_manager();
    let output = Output::detect();

    let installer = Installer::new(&catalog, &downloader, &manager, output);
    let mut progress = DownloadProgress::new();
    installer.install(&args.uuid, &mut progress).await?;

    println!("{}", output.restart_hint());
    Ok(())
}
