use clap::{Parser, Subcommand};

mod cli;
mod config;
mod core;
mod error;
mod services;
mod ui;
mod utils;

use cli::catalog::{about, search};
use cli::management::{self, extensions};
use cli::operations::{download, install, upgrade};
use config::Config;
use error::Result;
use services::SimpleServices;

const EXAMPLES: &str = "\
Examples:
  Search extension with query \"user themes\"
    $ gnomex search \"user themes\"

  Search all extensions
    $ gnomex search

  Install dash-to-dock extension
    $ gnomex install dash-to-dock@micxgx.gmail.com

  Uninstall dash-to-dock extension
    $ gnomex uninstall dash-to-dock@micxgx.gmail.com

  List installed extensions
    $ gnomex list

  Upgrade all extensions
    $ gnomex upgrade

  Upgrade some extensions
    $ gnomex upgrade dash-to-dock@micxgx.gmail.com Resource_Monitor@Ory0n";

#[derive(Parser)]
#[command(name = "gnomex")]
#[command(about = "Search, install and uninstall GNOME Shell extensions")]
#[command(version)]
#[command(arg_required_else_help = true)]
#[command(after_help = EXAMPLES)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Use this GNOME Shell version instead of asking gnome-shell
    #[arg(long, global = true, value_name = "MAJOR.MINOR")]
    shell_version: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search extensions
    Search(search::SearchArgs),

    /// List installed extensions
    List,

    /// Install extension with the uuid
    Install(install::InstallArgs),

    /// Uninstall extension with the uuid
    Uninstall(extensions::UuidArgs),

    /// Enable an installed extension
    Enable(extensions::UuidArgs),

    /// Disable an installed extension
    Disable(extensions::UuidArgs),

    /// Upgrade extensions
    Upgrade(upgrade::UpgradeArgs),

    /// Print detailed information of the extension
    About(about::AboutArgs),

    /// Save an extension archive without installing it
    Download(download::DownloadArgs),

    /// Show configuration
    Config(management::config::ConfigArgs),

    /// Print gnomex version
    Version,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = utils::logging::init_logging(cli.verbose) {
        eprintln!("{}", e);
    }

    if let Err(err) = run(cli).await {
        if err.is_absence() {
            eprintln!("{}", err);
        } else {
            eprintln!("error: {}", err);
        }
        std::process::exit(err.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Version = cli.command {
        println!("gnomex version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;
    let services = SimpleServices::new(config, cli.shell_version);

    match cli.command {
        Commands::Search(args) => search::execute(args, &services).await,
        Commands::List => extensions::list(&services.create_extension_manager()).await,
        Commands::Install(args) => install::execute(args, &services).await,
        Commands::Uninstall(args) => extensions::uninstall(args, &services.create_extension_manager()).await,
        Commands::Enable(args) => extensions::enable(args, &services.create_extension_manager()).await,
        Commands::Disable(args) => extensions::disable(args, &services.create_extension_manager()).await,
        Commands::Upgrade(args) => upgrade::execute(args, &services).await,
        Commands::About(args) => about::execute(args, &services).await,
        Commands::Download(args) => download::execute(args, &services).await,
        Commands::Config(args) => management::config::execute(args, &services.config()).await,
        Commands::Version => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_query_is_optional() {
        let cli = Cli::try_parse_from(["gnomex", "search"]).unwrap();
        assert!(matches!(cli.command, Commands::Search(_)));

        assert!(Cli::try_parse_from(["gnomex", "search", "user themes"]).is_ok());
        assert!(Cli::try_parse_from(["gnomex", "search", "user", "themes"]).is_err());
    }

    #[test]
    fn test_single_uuid_commands_reject_wrong_argument_counts() {
        for command in ["install", "uninstall", "enable", "disable", "about"] {
            assert!(Cli::try_parse_from(["gnomex", command]).is_err(), "{} without uuid", command);
            assert!(Cli::try_parse_from(["gnomex", command, "a@x", "b@x"]).is_err(), "{} with two", command);
            assert!(Cli::try_parse_from(["gnomex", command, "a@x"]).is_ok());
        }
    }

    #[test]
    fn test_upgrade_accepts_zero_or_more_uuids() {
        assert!(Cli::try_parse_from(["gnomex", "upgrade"]).is_ok());
        assert!(Cli::try_parse_from(["gnomex", "upgrade", "a@x", "b@x"]).is_ok());
    }

    #[test]
    fn test_global_shell_version_flag() {
        let cli = Cli::try_parse_from(["gnomex", "search", "--shell-version", "3.38"]).unwrap();
        assert_eq!(cli.shell_version.as_deref(), Some("3.38"));
    }

    #[test]
    fn test_no_arguments_shows_help() {
        let err = Cli::try_parse_from(["gnomex"]).err().unwrap();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
    }
}
