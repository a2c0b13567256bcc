//! Page command
//!
//! Usage: wiki page <DOMAIN> <SLUG> [--output <FILE>]

use std::path::PathBuf;

use clap::Args;
use wiki_core::{Fetcher, Wiki, WikiConfig};

use super::{document, emit, CommandResult};

#[derive(Debug, Args)]
pub struct PageArgs {
    /// Site to fetch from, e.g. fed.wiki.org
    pub domain: String,

    /// Page slug, e.g. welcome-visitors
    pub slug: String,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute page command
pub async fn execute(args: PageArgs, config: WikiConfig) -> CommandResult {
    let fetcher = Fetcher::new(&config)?;
    let panel = match fetcher.panel(&args.domain, &args.slug).await {
        Ok(panel) => panel,
        Err(failure) => {
            println!("{}", serde_json::to_string(&failure)?);
            return Err(failure.into());
        }
    };

    let mut wiki = Wiki::new(config);
    wiki.add_panel(panel, None)?;
    wiki.render().await;

    let html = document(&wiki.config().mount, &wiki.markup());
    emit(&html, args.output.as_deref())
}
