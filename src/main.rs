use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use indicador::cli::setup::setup;
use indicador::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for indicador::AppCommand {
    fn from(cmd: Commands) -> indicador::AppCommand {
        match cmd {
            Commands::List => indicador::AppCommand::List,
            Commands::Convert { code, amount } => indicador::AppCommand::Convert { code, amount },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List available indicators
    List,
    /// Show the current value of an indicator, converting a CLP amount when it applies
    Convert {
        /// Indicator code, e.g. dolar, euro, uf, ipc
        code: String,

        /// Amount in CLP, written as 25.000,50
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => indicador::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
