use clap::Args;
use std::path::{Path, PathBuf};

use crate::core::acquire::{megabytes, ArtifactDownloader, ProgressSink};
use crate::core::catalog::CatalogClient;
use crate::error::Result;
use crate::services::SimpleServices;
use crate::utils::progress::DownloadProgress;

#[derive(Args)]
pub struct DownloadArgs {
    /// UUID of the extension to fetch
    #[arg(value_name = "UUID")]
    uuid: String,

    /// Directory to save the archive in
    #[arg(short, long, default_value = ".")]
    output: PathBuf,
}

/// Fetch the archive for this shell and keep it instead of installing it.
pub async fn download_to(
    catalog: &CatalogClient,
    downloader: &dyn ArtifactDownloader,
    uuid: &str,
    dir: &Path,
    sink: &mut dyn ProgressSink,
) -> Result<PathBuf> {
    let extension = catalog.lookup(uuid).await?;
    let artifact = downloader.acquire(&extension, catalog.shell_version(), sink).await?;
    artifact.persist(dir)
}

pub async fn execute(args: DownloadArgs, services: &SimpleServices) -> Result<()> {
    let catalog = services.create_catalog_client().await?;
    let downloader = services.create_downloader()?;
    let mut progress = DownloadProgress::new();

    let path = download_to(&catalog, &downloader, &args.uuid, &args.output, &mut progress).await?;
    let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

    println!("saved {} ({:.2} MB)", path.display(), megabytes(size));
    Ok(())
}
