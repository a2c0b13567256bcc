use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Minimal description of a page as listed in a site map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDescriptor {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PageDescriptor {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: None,
            synopsis: None,
            extra: Map::new(),
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }
}

/// Sitemap - an ordered collection of page descriptors under arbitrary keys
///
/// Entry order is document order. A JSON object keeps its keys; a JSON
/// array is keyed by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sitemap {
    entries: Vec<(String, PageDescriptor)>,
}

impl Sitemap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, keeping insertion order
    pub fn insert(&mut self, key: impl Into<String>, descriptor: PageDescriptor) {
        self.entries.push((key.into(), descriptor));
    }

    /// Build a sitemap keyed by position
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = PageDescriptor>) -> Self {
        Self {
            entries: descriptors
                .into_iter()
                .enumerate()
                .map(|(i, d)| (i.to_string(), d))
                .collect(),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &PageDescriptor)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d))
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &PageDescriptor> {
        self.entries.iter().map(|(_, d)| d)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Sitemap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, descriptor) in &self.entries {
            map.serialize_entry(key, descriptor)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Sitemap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = match Value::deserialize(deserializer)? {
            Value::Object(map) => map
                .into_iter()
                .map(|(key, value)| {
                    PageDescriptor::deserialize(value)
                        .map(|d| (key, d))
                        .map_err(D::Error::custom)
                })
                .collect::<Result<Vec<_>, _>>()?,
            Value::Array(values) => values
                .into_iter()
                .enumerate()
                .map(|(i, value)| {
                    PageDescriptor::deserialize(value)
                        .map(|d| (i.to_string(), d))
                        .map_err(D::Error::custom)
                })
                .collect::<Result<Vec<_>, _>>()?,
            other => {
                return Err(D::Error::custom(format!(
                    "expected sitemap object or array, found {}",
                    other
                )))
            }
        };
        Ok(Self { entries })
    }
}
