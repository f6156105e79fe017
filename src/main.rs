mod api;
mod app;
mod background;
mod commands;
mod config;
mod errors;
mod format;
mod logging;
mod output;
mod parse;
mod session;
mod tui;

use clap::{Parser, Subcommand};

use crate::app::Runtime;
use crate::commands::ask::AskArgs;
use crate::commands::config::ConfigCommand;
use crate::commands::format::FormatArgs;
use crate::commands::tui::TuiArgs;
use crate::errors::CliError;
use crate::output::{OutputMode, print_error};

#[derive(Debug, Parser)]
#[command(
    name = "cosmo",
    version,
    about = "COSMO chat widget for the terminal: ask the UTD assistant questions."
)]
struct Cli {
    #[arg(long = "api-url", global = true)]
    api_url: Option<String>,
    #[arg(long = "asset-base", global = true)]
    asset_base: Option<String>,
    /// Request timeout in milliseconds; 0 waits indefinitely
    #[arg(long, global = true, default_value_t = 0)]
    timeout: u64,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, global = true)]
    quiet: bool,
    #[arg(long, global = true)]
    verbose: bool,
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interactive chat widget (default)
    Tui(TuiArgs),
    /// Ask one question and print the reply
    Ask(AskArgs),
    /// Render reply text as HTML
    Format(FormatArgs),
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let output = OutputMode {
        json: cli.json,
        quiet: cli.quiet,
        verbose: cli.verbose,
        debug: cli.debug,
    };

    let log_guard = logging::log_dir().and_then(|dir| logging::init_tracing(&dir, cli.debug));

    let result = run(cli, output.clone()).await;
    if let Err(err) = result {
        tracing::error!("{err}");
        print_error(&err, &output);
        // exit() skips destructors; flush the log writer first.
        drop(log_guard);
        std::process::exit(err.exit_code());
    }
}

async fn run(cli: Cli, output: OutputMode) -> Result<(), CliError> {
    let config_path = config::config_path()?;
    let config = if tolerates_broken_config(cli.command.as_ref()) {
        config::load_config_or_default(&config_path)
    } else {
        config::load_config_from(&config_path)?
    };

    let mut runtime = Runtime {
        output,
        config,
        config_path,
        api_url_override: cli.api_url,
        asset_base_override: cli.asset_base,
        timeout_ms: cli.timeout,
    };

    match cli.command.unwrap_or(Commands::Tui(TuiArgs::default())) {
        Commands::Tui(args) => commands::tui::handle(&runtime, args).await,
        Commands::Ask(args) => commands::ask::handle(&runtime, args).await,
        Commands::Format(args) => commands::format::handle(&runtime, args).await,
        Commands::Config { command } => commands::config::handle(&mut runtime, command).await,
    }
}

/// `config init` rewrites the file and `config path` never reads it, so a
/// corrupt file must not block them.
fn tolerates_broken_config(command: Option<&Commands>) -> bool {
    matches!(
        command,
        Some(Commands::Config {
            command: ConfigCommand::Init { .. } | ConfigCommand::Path,
        })
    )
}
