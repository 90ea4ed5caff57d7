//! Substituting token values into a template.
//!
//! This is the same substitution the backend performs before a prompt is sent
//! to the model: known tokens are replaced, escapes are unescaped, and unknown
//! tokens survive verbatim as `{name}` so a missing value stays visible.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::document::{Document, Segment, TokenName};

use super::parser::parse;

/// Source of token values.
pub trait TemplateContext {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>>;
}

impl TemplateContext for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl TemplateContext for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

/// JSON objects: strings are used as-is, null renders empty, other values
/// render as compact JSON.
impl TemplateContext for serde_json::Map<String, serde_json::Value> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        use serde_json::Value;
        self.get(name).map(|value| match value {
            Value::String(s) => Cow::Borrowed(s.as_str()),
            Value::Null => Cow::Borrowed(""),
            other => Cow::Owned(other.to_string()),
        })
    }
}

/// Render a parsed document against a context.
pub fn render<C: TemplateContext + ?Sized>(document: &Document, context: &C) -> String {
    let mut out = String::new();
    for segment in document.segments() {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Token(name) => match context.lookup(name.as_str()) {
                Some(value) => out.push_str(&value),
                None => {
                    tracing::debug!(token = %name, "no value for token, leaving placeholder");
                    out.push_str(&name.placeholder());
                }
            },
        }
    }
    out
}

/// Parse and render a template string.
pub fn render_template<C: TemplateContext + ?Sized>(template: &str, context: &C) -> String {
    render(&parse(template), context)
}

/// Distinct token names in order of first appearance
pub fn referenced_tokens(document: &Document) -> Vec<TokenName> {
    let mut seen = HashSet::new();
    document
        .tokens()
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect()
}
