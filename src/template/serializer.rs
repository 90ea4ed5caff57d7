//! [`Document`] → template string.

use crate::document::{Document, Segment};

/// Escape literal braces so the scanner reads them back as text.
pub fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '{' => escaped.push_str("{{"),
            '}' => escaped.push_str("}}"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Serialize one segment.
pub fn serialize_segment(segment: &Segment) -> String {
    match segment {
        Segment::Text(text) => escape_literal(text),
        Segment::Token(name) => name.placeholder(),
    }
}

/// Serialize a whole document.
///
/// Every text segment is escaped on its own, so a brace at a segment boundary
/// can never pair up with a neighbouring token's brace.
pub fn serialize(document: &Document) -> String {
    document.segments().iter().map(serialize_segment).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TokenName;
    use crate::template::parse;

    #[test]
    fn test_escaping_round_trip() {
        assert_eq!(serialize(&parse("a{{b}}c")), "a{{b}}c");
    }

    #[test]
    fn test_token_serialization() {
        let doc = Document::from_segments(vec![
            Segment::text("Dear "),
            Segment::Token(TokenName::new("ai_role").unwrap()),
            Segment::text(",\n"),
        ]);
        assert_eq!(serialize(&doc), "Dear {ai_role},\n");
    }

    #[test]
    fn test_brace_next_to_token() {
        let doc = Document::from_segments(vec![
            Segment::text("{"),
            Segment::Token(TokenName::new("x").unwrap()),
            Segment::text("}"),
        ]);
        let value = serialize(&doc);
        assert_eq!(value, "{{{x}}}");
        assert_eq!(parse(&value), doc);
    }

    #[test]
    fn test_unmatched_brace_is_canonicalized() {
        // A stray brace parses as text and comes back escaped
        assert_eq!(serialize(&parse("a { b")), "a {{ b");
        assert_eq!(parse("a {{ b"), parse("a { b"));
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(serialize(&Document::new()), "");
    }
}
