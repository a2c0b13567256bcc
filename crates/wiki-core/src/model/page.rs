use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Item - a single content unit in a page's story
///
/// `kind` selects the plugin that renders the item. Fields specific to a
/// plugin are kept verbatim in `extra` so that unknown items can be shown
/// in full by the fallback renderer.
///
/// Deserialization never fails: a numeric `id` is read as its decimal form,
/// and an `id`, `type` or `text` of any other non-string kind reads as empty
/// with its raw value left in `extra`. A story
/// entry that is not an object becomes an untyped item holding it under
/// `value`. Such items fall through to the `unknown` plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Item {
    /// Identifier, intended to be unique within the story (never enforced)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Type tag used for plugin dispatch
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,

    /// Text payload; may carry link markup
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,

    /// Type-specific fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    /// Create an item with no type-specific fields
    pub fn new(id: impl Into<String>, kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            text: text.into(),
            extra: Map::new(),
        }
    }
}

impl From<Value> for Item {
    fn from(value: Value) -> Self {
        let mut extra = match value {
            Value::Object(fields) => fields,
            other => {
                let mut extra = Map::new();
                extra.insert("value".to_string(), other);
                extra
            }
        };
        let id = match extra.get("id") {
            Some(Value::Number(n)) => {
                let id = n.to_string();
                extra.remove("id");
                id
            }
            _ => take_string(&mut extra, "id"),
        };
        let kind = take_string(&mut extra, "type");
        let text = take_string(&mut extra, "text");
        Self {
            id,
            kind,
            text,
            extra,
        }
    }
}

/// Remove `key` if it holds a string or null; any other value is left in place
fn take_string(fields: &mut Map<String, Value>, key: &str) -> String {
    if !matches!(fields.get(key), Some(Value::String(_) | Value::Null)) {
        return String::new();
    }
    match fields.remove(key) {
        Some(Value::String(text)) => text,
        _ => String::new(),
    }
}

/// Journal action tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Add,
    Edit,
    Remove,
    Move,
    Fork,
    #[default]
    #[serde(other)]
    Other,
}

/// JournalEntry - one append-only record of an edit applied to a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// `Other` when missing or not a known action name
    #[serde(default, deserialize_with = "lenient_action")]
    pub action: Action,

    /// Payload of the action; the page snapshot for `create`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Value>,

    /// Epoch milliseconds; `None` when missing or not a number
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<i64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Page - a titled story of items plus its edit journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub title: String,

    #[serde(default)]
    pub story: Vec<Item>,

    /// Entries that are not objects are dropped
    #[serde(default, deserialize_with = "lenient_journal")]
    pub journal: Vec<JournalEntry>,
}

fn lenient_action<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Action, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_i64().or_else(|| value.as_f64().map(|ms| ms as i64)))
}

fn lenient_journal<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<JournalEntry>, D::Error> {
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        other => {
            tracing::debug!(journal = %other, "journal is not a list, ignored");
            return Ok(Vec::new());
        }
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!(error = %err, "journal entry ignored");
                None
            }
        })
        .collect())
}

impl Page {
    /// Create a page with an empty journal
    pub fn new(title: impl Into<String>, story: Vec<Item>) -> Self {
        Self {
            title: title.into(),
            story,
            journal: Vec::new(),
        }
    }
}
