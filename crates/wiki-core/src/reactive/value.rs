use crate::capabilities::{mismatch, Capability, Html, JsonFormatter, Markdown};
use crate::errors::Result;
use crate::render::{escape_html, Fragment};

/// A settled node value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Json(serde_json::Value),
    Capability(Capability),
    Fragment(Fragment),
}

impl Value {
    /// Short description used in mismatch errors
    pub fn describe(&self) -> String {
        match self {
            Value::Text(_) => "text".to_string(),
            Value::Json(_) => "json".to_string(),
            Value::Capability(c) => format!("capability {}", c.name()),
            Value::Fragment(_) => "fragment".to_string(),
        }
    }

    pub fn as_text(&self) -> Result<&str> {
        match self {
            Value::Text(text) => Ok(text),
            other => Err(mismatch("text", other)),
        }
    }

    pub fn as_fragment(&self) -> Result<&Fragment> {
        match self {
            Value::Fragment(fragment) => Ok(fragment),
            other => Err(mismatch("fragment", other)),
        }
    }

    pub fn as_html(&self) -> Result<&Html> {
        match self {
            Value::Capability(Capability::Html(html)) => Ok(html),
            other => Err(mismatch("html", other)),
        }
    }

    pub fn as_markdown(&self) -> Result<&Markdown> {
        match self {
            Value::Capability(Capability::Markdown(md)) => Ok(md),
            other => Err(mismatch("md", other)),
        }
    }

    pub fn as_json(&self) -> Result<&JsonFormatter> {
        match self {
            Value::Capability(Capability::Json(json)) => Ok(json),
            other => Err(mismatch("toJSON", other)),
        }
    }

    /// Markup for displaying this value on a surface
    pub fn to_fragment(&self) -> Fragment {
        match self {
            Value::Fragment(fragment) => fragment.clone(),
            Value::Text(text) => Fragment::new(escape_html(text)),
            Value::Json(json) => Fragment::new(format!(
                "<pre>{}</pre>",
                escape_html(&json.to_string())
            )),
            Value::Capability(c) => Fragment::new(format!("<code>{}</code>", c.name())),
        }
    }
}

impl From<Fragment> for Value {
    fn from(fragment: Fragment) -> Self {
        Value::Fragment(fragment)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_mismatch_names_both_sides() {
        let err = Value::from("hi").as_html().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Capability mismatch: expected html, found text"
        );
    }

    #[test]
    fn test_text_displays_escaped() {
        let value = Value::from("<b>");
        assert_eq!(value.to_fragment().markup(), "&lt;b&gt;");
    }
}
