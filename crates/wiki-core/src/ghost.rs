//! Ghost pages - panels synthesized locally rather than fetched
//!
//! A ghost page starts with a single `create` journal entry holding a
//! snapshot of its title and story.

use chrono::Utc;
use serde_json::{json, Map, Value};
use wiki_core_types::{random_id, random_u32};

use crate::errors::{Result, WikiError};
use crate::model::{Action, Item, JournalEntry, Page, Panel};
use crate::plugins::PARAGRAPH_TYPE;

/// Build a panel from partial item seeds
///
/// Each seed is a JSON object; a fresh `id` and the type `paragraph` are
/// supplied as defaults and any field present in the seed wins.
///
/// # Errors
///
/// Returns `WikiError::InvalidItem` if a seed is not an object.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use wiki_core::ghost::ghost;
///
/// let panel = ghost("Zip", vec![json!({"text": "hello"})], "./icon-120.png").unwrap();
/// assert_eq!(panel.page.story[0].kind, "paragraph");
/// ```
pub fn ghost(title: &str, seeds: Vec<Value>, flag: &str) -> Result<Panel> {
    let story = seeds
        .into_iter()
        .map(item_from_seed)
        .collect::<Result<Vec<_>>>()?;

    let snapshot = json!({ "title": title, "story": story });
    let journal = vec![JournalEntry {
        action: Action::Create,
        item: Some(snapshot),
        date: Some(Utc::now().timestamp_millis()),
        extra: Map::new(),
    }];

    Ok(Panel::new(
        random_id(),
        flag,
        Page {
            title: title.to_string(),
            story,
            journal,
        },
    ))
}

fn item_from_seed(seed: Value) -> Result<Item> {
    let fields = match seed {
        Value::Object(fields) => fields,
        other => {
            return Err(WikiError::InvalidItem {
                reason: format!("story seed must be an object, found {}", other),
            })
        }
    };

    let mut merged = Map::new();
    merged.insert("id".to_string(), Value::String(random_id()));
    merged.insert("type".to_string(), Value::String(PARAGRAPH_TYPE.to_string()));
    merged.extend(fields);

    Ok(Item::from(Value::Object(merged)))
}

const DEMO_TITLES: [&str; 4] = [
    "Zip",
    "Zippity Doo Dah. Zippity Eh. My, oh my.",
    "Hello, World!",
    "Welcome Visitors",
];

const DEMO_PARAGRAPH: &str = "This is a paragraph. With an unexpanded [[Internal Link]]";

const DEMO_MARKDOWN: &str = "This paragraph _has markdown_. \
[Markdown Link](//wiki.dbbs.co/apparatus.html)\n\n\
[https://wander.dbbs.co/commonplace-book.html External Link]";

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud \
exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute irure dolor in \
reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint \
occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.";

/// Four demonstration panels
///
/// Each holds a paragraph with an internal link, a Markdown item using both
/// link styles, and between two and six filler paragraphs.
///
/// # Errors
///
/// Propagates any failure from [`ghost`].
pub fn demo_lineup(flag: &str) -> Result<Vec<Panel>> {
    DEMO_TITLES
        .iter()
        .map(|title| {
            let mut seeds = vec![
                json!({ "text": DEMO_PARAGRAPH }),
                json!({ "type": "markdown", "text": DEMO_MARKDOWN }),
            ];
            let filler = 2 + (random_u32() % 5) as usize;
            seeds.extend((0..filler).map(|_| json!({ "text": LOREM })));
            ghost(title, seeds, flag)
        })
        .collect()
}
