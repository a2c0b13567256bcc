#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{refused_addr, serve_once};
use wiki_core::config::WikiConfig;
use wiki_core::fetch::Fetcher;
use wiki_core::lineup::{PanelState, Wiki};

fn fetcher() -> Fetcher {
    Fetcher::new(&WikiConfig::default()).unwrap()
}

#[tokio::test]
async fn test_sitemap_success() {
    let domain = serve_once(
        "200 OK",
        r#"[{"title": "Welcome Visitors", "slug": "welcome-visitors"}, {"title": "Recent Changes", "slug": "recent-changes"}]"#,
    )
    .await;

    let sitemap = fetcher().sitemap(&domain).await.unwrap();

    assert_eq!(sitemap.len(), 2);
    let titles: Vec<&str> = sitemap.descriptors().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, vec!["Welcome Visitors", "Recent Changes"]);
}

#[tokio::test]
async fn test_panel_success() {
    let domain = serve_once(
        "200 OK",
        r#"{"title": "Welcome Visitors", "story": [{"id": "a1", "type": "paragraph", "text": "Hi"}], "journal": []}"#,
    )
    .await;

    let panel = fetcher().panel(&domain, "welcome-visitors").await.unwrap();

    assert_eq!(panel.title(), "Welcome Visitors");
    assert_eq!(panel.flag, format!("//{}/favicon.png", domain));
    assert_eq!(panel.page.story[0].id, "a1");
    assert!(!panel.id.is_empty());
}

#[tokio::test]
async fn test_not_found_status_is_a_failure() {
    let domain = serve_once("404 Not Found", r#"{"error": "missing"}"#).await;

    let failure = fetcher().panel(&domain, "nope").await.unwrap_err();

    assert!(failure.error.contains("404"), "{}", failure.error);
}

#[tokio::test]
async fn test_malformed_document_is_a_failure() {
    let domain = serve_once("200 OK", "<html>not json</html>").await;

    let failure = fetcher().sitemap(&domain).await.unwrap_err();

    assert!(failure.error.contains("malformed document"), "{}", failure.error);
}

#[tokio::test]
async fn test_connection_refused_is_a_failure() {
    let domain = refused_addr().await;

    let failure = fetcher().sitemap(&domain).await.unwrap_err();

    assert!(failure.error.contains(&domain), "{}", failure.error);
    let json = serde_json::to_value(&failure).unwrap();
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_panel_connection_refused_is_a_failure() {
    let domain = refused_addr().await;

    let failure = fetcher().panel(&domain, "welcome-visitors").await.unwrap_err();

    assert!(failure.error.contains(&domain), "{}", failure.error);
    let json = serde_json::to_value(&failure).unwrap();
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_malformed_item_degrades_only_itself() {
    let domain = serve_once(
        "200 OK",
        r#"{"title": "Mixed", "story": [
            {"id": "a1", "type": "paragraph", "text": "First [[Home]]"},
            {"id": "b2", "type": "image", "text": null},
            {"id": "c3", "type": "paragraph", "text": "Third"}
        ], "journal": [{"type": "create", "date": 1}]}"#,
    )
    .await;

    let panel = fetcher().panel(&domain, "mixed").await.unwrap();
    let panel_id = panel.id.clone();
    assert_eq!(panel.page.story.len(), 3);

    let mut wiki = Wiki::new(WikiConfig::default());
    wiki.add_panel(panel, None).unwrap();
    wiki.render().await;

    assert_eq!(wiki.lineup().state(&panel_id).unwrap(), PanelState::Rendered);
    let markup = wiki.markup();
    assert!(markup.contains("data-title=\"Home\""));
    assert!(markup.contains("Unknown type:</em> image"));
    assert!(markup.contains("<p>Third</p>"));
}
