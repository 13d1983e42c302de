use clap::Args;

use crate::core::manager::ExtensionManager;
use crate::error::Result;

#[derive(Args)]
pub struct UuidArgs {
    /// UUID of an installed extension
    #[arg(value_name = "UUID")]
    pub uuid: String,
}

pub async fn list(manager: &dyn ExtensionManager) -> Result<()> {
    for uuid in manager.list().await? {
        println!("{}", uuid);
    }
    Ok(())
}

pub async fn enable(args: UuidArgs, manager: &dyn ExtensionManager) -> Result<()> {
    manager.enable(&args.uuid).await?;
    println!("extension enabled");
    Ok(())
}

pub async fn disable(args: UuidArgs, manager: &dyn ExtensionManager) -> Result<()> {
    manager.disable(&args.uuid).await?;
    println!("extension disabled");
    Ok(())
}

pub async fn uninstall(args: UuidArgs, manager: &dyn ExtensionManager) -> Result<()> {
    println!("uninstalling {}", args.uuid);
    manager.uninstall(&args.uuid).await?;
    println!("extension uninstalled");
    Ok(())
}
