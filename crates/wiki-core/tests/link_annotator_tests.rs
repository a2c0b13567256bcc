#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use wiki_core::render::{annotate_links, linked, Fragment, Navigation};

#[test]
fn test_internal_link_markup() {
    let markup = linked("Start at [[Welcome Visitors]].");
    assert_eq!(
        markup,
        r##"Start at <a class="internal" data-title="Welcome Visitors" href="#">Welcome Visitors</a>."##
    );
}

#[test]
fn test_external_link_drops_scheme() {
    assert_eq!(
        linked("[https://example.com/a/b Example Site]"),
        r#"<a href="//example.com/a/b">Example Site</a>"#
    );
    assert_eq!(
        linked("[http://example.com x]"),
        r#"<a href="//example.com">x</a>"#
    );
}

#[test]
fn test_mixed_links_in_one_text() {
    let fragment = annotate_links(Fragment::new(linked(
        "[[One]] then [https://two.org Two] then [[Three]]",
    )));
    let anchors = fragment.anchors();

    assert_eq!(anchors.len(), 3);
    assert!(anchors[0].is_internal());
    assert_eq!(anchors[1].href.as_deref(), Some("//two.org"));
    assert_eq!(anchors[1].target.as_deref(), Some("_blank"));
    assert_eq!(anchors[2].data_title.as_deref(), Some("Three"));

    assert_eq!(fragment.handler(0).unwrap().title(), "One");
    assert_eq!(fragment.handler(2).unwrap().title(), "Three");
}

#[test]
fn test_text_without_links_is_unchanged() {
    let text = "Nothing to see [here], or [[ here.";
    assert_eq!(linked(text), text);
    let fragment = annotate_links(Fragment::new(linked(text)));
    assert_eq!(fragment.markup(), text);
    assert_eq!(fragment.anchor_count(), 0);
}

#[test]
fn test_click_reports_target_title() {
    let fragment = annotate_links(Fragment::new(linked("[[Recent Changes]]")));
    let handler = fragment.handler(0).unwrap();
    assert_eq!(
        handler.click(),
        Navigation::Unresolved {
            title: "Recent Changes".to_string()
        }
    );
}

#[test]
fn test_title_punctuation_survives_as_navigation_target() {
    for title in ["Input -> Output", r#"The "Best" Page"#, "Q&A", "Bob's <Notes>"] {
        let fragment = annotate_links(Fragment::new(linked(&format!("[[{}]]", title))));
        let anchors = fragment.anchors();

        assert_eq!(anchors.len(), 1, "{}", title);
        assert_eq!(anchors[0].data_title.as_deref(), Some(title));
        assert_eq!(fragment.handler(0).unwrap().title(), title);
        assert_eq!(
            fragment.handler(0).unwrap().click(),
            Navigation::Unresolved {
                title: title.to_string()
            }
        );
    }
}

#[test]
fn test_authored_anchor_gets_blank_target() {
    let fragment = annotate_links(Fragment::new(
        r#"<p><a href="//x.org" class="ext">x</a></p>"#,
    ));
    assert_eq!(
        fragment.markup(),
        r#"<p><a href="//x.org" class="ext" target="_blank">x</a></p>"#
    );
}

proptest! {
    #[test]
    fn prop_every_internal_link_gets_a_handler(
        titles in prop::collection::vec("[A-Za-z][A-Za-z0-9 >\"&'-]{0,12}", 0..8)
    ) {
        let text = titles
            .iter()
            .map(|t| format!("[[{}]]", t))
            .collect::<Vec<_>>()
            .join(" and ");
        let fragment = annotate_links(Fragment::new(linked(&text)));

        prop_assert_eq!(fragment.anchor_count(), titles.len());
        prop_assert_eq!(fragment.handler_count(), titles.len());
        for (i, title) in titles.iter().enumerate() {
            prop_assert_eq!(fragment.handler(i).map(|h| h.title()), Some(title.as_str()));
        }
    }

    #[test]
    fn prop_external_links_are_scheme_relative_and_blank(
        host in "[a-z]{1,10}",
        path in "[a-z0-9/]{0,10}",
        label in "[A-Za-z]{1,10}",
        secure in any::<bool>(),
    ) {
        let scheme = if secure { "https" } else { "http" };
        let text = format!("[{}://{}.org/{} {}]", scheme, host, path, label);
        let fragment = annotate_links(Fragment::new(linked(&text)));
        let anchors = fragment.anchors();

        prop_assert_eq!(anchors.len(), 1);
        let expected_href = format!("//{}.org/{}", host, path);
        prop_assert_eq!(anchors[0].href.as_deref(), Some(expected_href.as_str()));
        prop_assert_eq!(anchors[0].target.as_deref(), Some("_blank"));
        prop_assert_eq!(anchors[0].label.as_str(), label.as_str());
        prop_assert_eq!(fragment.handler_count(), 0);
    }

    #[test]
    fn prop_annotation_is_idempotent(
        titles in prop::collection::vec("[A-Za-z]{1,8}", 0..5),
        hosts in prop::collection::vec("[a-z]{1,8}", 0..5),
    ) {
        let mut text = String::new();
        for t in &titles {
            text.push_str(&format!("[[{}]] ", t));
        }
        for h in &hosts {
            text.push_str(&format!("[https://{}.net {}] ", h, h));
        }
        let once = annotate_links(Fragment::new(linked(&text)));
        let twice = annotate_links(once.clone());
        prop_assert_eq!(once, twice);
    }
}
