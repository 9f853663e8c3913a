use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use commands::{
    search::{run_search, SearchArgs},
    translate::{run_translate, TranslateArgs},
};
use config::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod report;

#[derive(Parser, Debug)]
#[command(author, version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true, env = "GEOSCAN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Search(SearchArgs),
    Translate(TranslateArgs),
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Search(args) => run_search(args, &config),
        Commands::Translate(args) => run_translate(args, &config),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", report::report(&err));
            ExitCode::FAILURE
        }
    }
}
