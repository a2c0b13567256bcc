//! Demo command
//!
//! Usage: wiki demo [--output <FILE>]

use std::path::PathBuf;

use clap::Args;
use wiki_core::{demo_lineup, Wiki, WikiConfig};

use super::{document, emit, CommandResult};

#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute demo command
pub async fn execute(args: DemoArgs, config: WikiConfig) -> CommandResult {
    let panels = demo_lineup(&config.ghost_flag)?;

    let mut wiki = Wiki::new(config);
    for panel in panels {
        wiki.add_panel(panel, None)?;
    }
    let report = wiki.render().await;
    tracing::debug!(evaluated = report.evaluated, rejected = report.rejected, "demo rendered");

    let html = document(&wiki.config().mount, &wiki.markup());
    emit(&html, args.output.as_deref())
}
