//! Remote wiki collaborators: site maps and pages over HTTP
//!
//! Failures never surface as `Err(WikiError)`; every outcome is either the
//! parsed document or a [`FetchFailure`] that serializes as
//! `{"error": "..."}`.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wiki_core_types::random_id;

use crate::config::WikiConfig;
use crate::errors::{Result, WikiError};
use crate::model::{Page, Panel, Sitemap};
use crate::{log_op_end, log_op_error, log_op_start};

/// A failed fetch, carrying the failure description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{error}")]
pub struct FetchFailure {
    pub error: String,
}

impl From<WikiError> for FetchFailure {
    fn from(err: WikiError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

pub type Fetched<T> = std::result::Result<T, FetchFailure>;

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    scheme: String,
}

impl Fetcher {
    /// # Errors
    ///
    /// Returns `WikiError::Fetch` if the HTTP client cannot be built.
    pub fn new(config: &WikiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(client, &config.scheme))
    }

    pub fn with_client(client: reqwest::Client, scheme: &str) -> Self {
        Self {
            client,
            scheme: scheme.to_string(),
        }
    }

    pub fn sitemap_url(&self, domain: &str) -> String {
        format!("{}://{}/system/sitemap.json", self.scheme, domain)
    }

    pub fn page_url(&self, domain: &str, slug: &str) -> String {
        format!("{}://{}/{}.json", self.scheme, domain, slug)
    }

    /// Fetch the site map of `domain`
    pub async fn sitemap(&self, domain: &str) -> Fetched<Sitemap> {
        log_op_start!("fetch_sitemap", domain = %domain);
        let start = std::time::Instant::now();

        let sitemap: Sitemap = self.get_json(&self.sitemap_url(domain)).await.map_err(|e| {
            log_op_error!(
                "fetch_sitemap",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                domain = %domain
            );
            FetchFailure::from(e)
        })?;

        log_op_end!(
            "fetch_sitemap",
            duration_ms = start.elapsed().as_millis() as u64,
            domain = %domain,
            entries = sitemap.len()
        );
        Ok(sitemap)
    }

    /// Fetch page `slug` of `domain` and wrap it as a panel
    ///
    /// The panel gets a fresh id and the scheme-relative favicon of the
    /// domain as its flag.
    pub async fn panel(&self, domain: &str, slug: &str) -> Fetched<Panel> {
        log_op_start!("fetch_panel", domain = %domain, slug = %slug);
        let start = std::time::Instant::now();

        let page: Page = self.get_json(&self.page_url(domain, slug)).await.map_err(|e| {
            log_op_error!(
                "fetch_panel",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                domain = %domain
            );
            FetchFailure::from(e)
        })?;

        log_op_end!(
            "fetch_panel",
            duration_ms = start.elapsed().as_millis() as u64,
            domain = %domain,
            story_len = page.story.len()
        );
        Ok(Panel::new(
            random_id(),
            format!("//{}/favicon.png", domain),
            page,
        ))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let failed = |reason: String| WikiError::Fetch {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("status {}", status)));
        }

        let body = response.text().await.map_err(|e| failed(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| failed(format!("malformed document: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_use_configured_scheme() {
        let fetcher = Fetcher::with_client(reqwest::Client::new(), "https");
        assert_eq!(
            fetcher.sitemap_url("fed.wiki.org"),
            "https://fed.wiki.org/system/sitemap.json"
        );
        assert_eq!(
            fetcher.page_url("fed.wiki.org", "welcome-visitors"),
            "https://fed.wiki.org/welcome-visitors.json"
        );
    }

    #[test]
    fn test_failure_serializes_as_error_object() {
        let failure = FetchFailure {
            error: "boom".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            serde_json::json!({"error": "boom"})
        );
    }
}
