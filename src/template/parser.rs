//! Template string → [`Document`].
//!
//! Recognizes `{{`, `}}` and `{identifier}`; everything else, including stray
//! single braces, is literal text. Parsing never fails.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::{Document, Segment, TokenName};

/// Leftmost match wins, so `{{name}}` reads as the literal text `{name}`.
static TEMPLATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{|\}\}|\{([A-Za-z][A-Za-z0-9_]*)\}").expect("Invalid template pattern")
});

/// Iterator over the raw segments of a template, before adjacent text is
/// merged. `{{` and `}}` come out as their own single-brace text segments.
pub struct Scanner<'a> {
    source: Cow<'a, str>,
    position: usize,
    pending: Option<Segment>,
}

impl<'a> Scanner<'a> {
    pub fn new(template: &'a str) -> Self {
        let source = if template.contains("\r\n") {
            Cow::Owned(template.replace("\r\n", "\n"))
        } else {
            Cow::Borrowed(template)
        };
        Self {
            source,
            position: 0,
            pending: None,
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        if let Some(segment) = self.pending.take() {
            return Some(segment);
        }
        if self.position >= self.source.len() {
            return None;
        }

        let Some(captures) = TEMPLATE_PATTERN.captures_at(&self.source, self.position) else {
            let rest = self.source[self.position..].to_string();
            self.position = self.source.len();
            return Some(Segment::Text(rest));
        };

        let matched = captures.get(0)?;
        let segment = match matched.as_str() {
            "{{" => Segment::text("{"),
            "}}" => Segment::text("}"),
            _ => match captures.get(1) {
                Some(name) => Segment::Token(TokenName::from_scanned(name.as_str())),
                None => Segment::text(matched.as_str()),
            },
        };

        let preceding = &self.source[self.position..matched.start()];
        let leading = (!preceding.is_empty()).then(|| Segment::text(preceding));
        self.position = matched.end();

        match leading {
            Some(text) => {
                self.pending = Some(segment);
                Some(text)
            }
            None => Some(segment),
        }
    }
}

/// Parse a template string into a normalized document.
pub fn parse(template: &str) -> Document {
    Document::from_segments(Scanner::new(template))
}

/// Parse an optional template (missing values are treated as empty).
pub fn parse_opt(template: Option<&str>) -> Document {
    template.map(parse).unwrap_or_default()
}
