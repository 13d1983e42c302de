use clap::Args;
use tracing::{info, warn};

use crate::cli::operations::install::Installer;
use crate::core::acquire::ProgressSink;
use crate::core::manager::ExtensionManager;
use crate::error::Result;
use crate::services::SimpleServices;
use crate::ui::Output;
use crate::utils::progress::DownloadProgress;

#[derive(Args)]
pub struct UpgradeArgs {
    /// Extensions to upgrade; every installed extension when omitted
    #[arg(value_name = "UUID")]
    uuids: Vec<String>,
}

#[derive(Debug, Default)]
pub struct UpgradeSummary {
    pub upgraded: Vec<String>,
    /// UUID and the reason it was not upgraded
    pub skipped: Vec<(String, String)>,
}

/// Reinstall each UUID. Extensions missing from the catalog, or without a
/// build for this shell, are skipped; any other failure stops the run.
pub async fn upgrade_each<F, S>(installer: &Installer<'_>, uuids: &[String], mut make_sink: F) -> Result<UpgradeSummary>
where
    F: FnMut() -> S,
    S: ProgressSink,
{
    let mut summary = UpgradeSummary::default();

    for uuid in uuids {
        info!("Upgrading {}", uuid);
        let mut sink = make_sink();
        match installer.install(uuid, &mut sink).await {
            Ok(_) => summary.upgraded.push(uuid.clone()),
            Err(err) if err.is_absence() => {
                warn!("Skipping {}: {}", uuid, err);
                summary.skipped.push((uuid.clone(), err.to_string()));
            }
            Err(err) => return Err(err),
        }
    }

    Ok(summary)
}

pub async fn resolve_targets(uuids: Vec<String>, manager: &dyn ExtensionManager) -> Result<Vec<String>> {
    if uuids.is_empty() {
        manager.list().await
    } else {
        Ok(uuids)
    }
}

pub async fn execute(args: UpgradeArgs, services: &SimpleServices) -> Result<()> {
    let manager = services.create_extension_manager();
    let targets = resolve_targets(args.uuids, &manager).await?;
    if targets.is_empty() {
        println!("no extensions installed");
        return Ok(());
    }

    let catalog = services.create_catalog_client().await?;
    let downloader = services.create_downloader()?;
    let output = Output::detect();
    let installer = Installer::new(&catalog, &downloader, &manager, output);

    let summary = upgrade_each(&installer, &targets, DownloadProgress::new).await?;

    println!(
        "{} extension(s) upgraded, {} skipped",
        summary.upgraded.len(),
        summary.skipped.len()
    );
    for (uuid, reason) in &summary.skipped {
        println!("  skipped {}: {}", uuid, reason);
    }
    if !summary.upgraded.is_empty() {
        println!("{}", output.restart_hint());
    }

    Ok(())
}
