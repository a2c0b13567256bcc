//! Capabilities - named inputs that renderers declare as dependencies
//!
//! The reactive runtime resolves any node input that is not defined in a
//! module through a [`CapabilityProvider`]. [`StandardLibrary`] provides:
//!
//! - `html` - markup templating ([`Html`])
//! - `md` - Markdown rendering ([`Markdown`]), built lazily on first use
//! - `toJSON` - pretty JSON serialization for inspectors ([`JsonFormatter`])

use async_trait::async_trait;
use pulldown_cmark::{html, Options, Parser};
use serde::Serialize;
use tokio::sync::OnceCell;

use crate::config::MarkdownConfig;
use crate::errors::{Result, WikiError};
use crate::reactive::Value;
use crate::render::{escape_html, Fragment, FragmentBuilder};

pub const HTML: &str = "html";
pub const MARKDOWN: &str = "md";
pub const JSON: &str = "toJSON";

/// One interpolation in an [`Html::template`] call
#[derive(Debug, Clone, Copy)]
pub enum Part<'a> {
    /// Trusted markup, inserted as-is
    Markup(&'a str),
    /// Plain text, escaped on insertion
    Text(&'a str),
    /// A rendered fragment; its handlers are carried over
    Fragment(&'a Fragment),
}

/// Templating capability
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Html;

impl Html {
    /// Wrap raw markup as a fragment
    pub fn markup(&self, markup: impl Into<String>) -> Fragment {
        Fragment::new(markup)
    }

    /// Assemble a fragment from template parts, in order
    pub fn template(&self, parts: &[Part<'_>]) -> Fragment {
        let mut builder = FragmentBuilder::new();
        for part in parts {
            match part {
                Part::Markup(markup) => builder.push_markup(markup),
                Part::Text(text) => builder.push_markup(&escape_html(text)),
                Part::Fragment(fragment) => builder.push_fragment(fragment),
            };
        }
        builder.build()
    }
}

/// Markdown rendering capability (CommonMark; inline HTML passes through)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markdown {
    options: Options,
}

impl Markdown {
    pub fn new(config: &MarkdownConfig) -> Self {
        let mut options = Options::empty();
        options.set(Options::ENABLE_TABLES, config.tables);
        options.set(Options::ENABLE_STRIKETHROUGH, config.strikethrough);
        options.set(Options::ENABLE_TASKLISTS, config.tasklists);
        Self { options }
    }

    pub fn render(&self, source: &str) -> Fragment {
        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, Parser::new_ext(source, self.options));
        Fragment::new(out)
    }
}

/// Structured-serialization capability used by diagnostic output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn stringify<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

/// A resolved capability value
#[derive(Debug, Clone, PartialEq)]
pub enum Capability {
    Html(Html),
    Markdown(Markdown),
    Json(JsonFormatter),
}

impl Capability {
    pub fn name(&self) -> &'static str {
        match self {
            Capability::Html(_) => HTML,
            Capability::Markdown(_) => MARKDOWN,
            Capability::Json(_) => JSON,
        }
    }
}

/// Source of builtin node inputs for the reactive runtime
#[async_trait]
pub trait CapabilityProvider: Send + Sync {
    /// Resolve a builtin by name
    ///
    /// Returns `None` when the provider does not know the name, so the
    /// runtime can report the input as unresolved.
    async fn resolve(&self, name: &str) -> Option<Result<Value>>;
}

/// The default provider: `html`, `md`, `toJSON`
#[derive(Debug, Default)]
pub struct StandardLibrary {
    markdown_config: MarkdownConfig,
    markdown: OnceCell<Markdown>,
}

impl StandardLibrary {
    pub fn new(markdown_config: MarkdownConfig) -> Self {
        Self {
            markdown_config,
            markdown: OnceCell::new(),
        }
    }

    /// Whether the Markdown compiler has been built yet
    pub fn markdown_loaded(&self) -> bool {
        self.markdown.initialized()
    }
}

#[async_trait]
impl CapabilityProvider for StandardLibrary {
    async fn resolve(&self, name: &str) -> Option<Result<Value>> {
        let capability = match name {
            HTML => Capability::Html(Html),
            MARKDOWN => {
                let markdown = self
                    .markdown
                    .get_or_init(|| async {
                        tracing::debug!("building markdown capability");
                        Markdown::new(&self.markdown_config)
                    })
                    .await;
                Capability::Markdown(markdown.clone())
            }
            JSON => Capability::Json(JsonFormatter),
            _ => return None,
        };
        Some(Ok(Value::Capability(capability)))
    }
}

/// Fail with a capability mismatch unless `value` is the named capability
pub(crate) fn mismatch(expected: &str, found: &Value) -> WikiError {
    WikiError::CapabilityMismatch {
        expected: expected.to_string(),
        found: found.describe(),
    }
}
