use clap::{Args, Subcommand};

use crate::config::env::EnvParser;
use crate::config::Config as AppConfig;
use crate::error::Result;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,

    /// Show configuration file path
    Path,
}

pub async fn execute(args: ConfigArgs, config: &AppConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            print!("{}", config.to_toml()?);

            let overrides = EnvParser::get_all_gnomex_vars();
            if !overrides.is_empty() {
                println!();
                println!("# environment overrides");
                for (key, value) in overrides {
                    println!("# {}={}", key, value);
                }
            }
        }

        ConfigCommands::Path => {
            let path = AppConfig::config_path()?;
            let state = if path.exists() { "" } else { " (not created, defaults in use)" };
            println!("{}{}", path.display(), state);
        }
    }

    Ok(())
}
