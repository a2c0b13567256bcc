//! Wiki CLI
//!
//! Command-line interface for composing wiki panels

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use wiki_core::logging_facility;
use wiki_core::WikiConfig;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "wiki")]
#[command(about = "Wiki - compose pages into rendered panels", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render the demonstration lineup of ghost pages
    Demo(commands::demo::DemoArgs),
    /// Fetch a remote page and render it as a panel
    Page(commands::page::PageArgs),
    /// Look up a page title across remote site maps
    Find(commands::find::FindArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match WikiConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    logging_facility::init(config.log_profile);

    let result = match cli.command {
        Commands::Demo(args) => commands::demo::execute(args, config).await,
        Commands::Page(args) => commands::page::execute(args, config).await,
        Commands::Find(args) => commands::find::execute(args, config).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
