//! Find command
//!
//! Usage: wiki find <TITLE> --site <DOMAIN> [--site <DOMAIN>...]

use clap::Args;
use wiki_core::{find_page, Fetcher, WikiConfig};

use super::CommandResult;

#[derive(Debug, Args)]
pub struct FindArgs {
    /// Page title, matched case-insensitively
    pub title: String,

    /// Sites whose site maps are searched, in order
    #[arg(short, long = "site", required = true)]
    pub sites: Vec<String>,
}

/// Execute find command
///
/// Prints the matching page descriptor as JSON, or `{}` when no site map
/// lists the title.
pub async fn execute(args: FindArgs, config: WikiConfig) -> CommandResult {
    let fetcher = Fetcher::new(&config)?;

    let mut context = Vec::with_capacity(args.sites.len());
    for site in &args.sites {
        match fetcher.sitemap(site).await {
            Ok(sitemap) => context.push(sitemap),
            Err(failure) => {
                println!("{}", serde_json::to_string(&failure)?);
                return Err(failure.into());
            }
        }
    }

    let found = match find_page(&args.title, &context) {
        Some(descriptor) => serde_json::to_string_pretty(descriptor)?,
        None => "{}".to_string(),
    };
    println!("{}", found);
    Ok(())
}
