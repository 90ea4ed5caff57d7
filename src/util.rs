//! Character classification for word-wise caret movement

use crate::document::Atom;

/// Full-width punctuation common in prompts written in CJK languages
const WIDE_PUNCTUATION: &[char] = &['，', '。', '、', '；', '：', '！', '？', '（', '）', '“', '”'];

/// Punctuation or symbol that ends a word. `_` belongs to identifiers.
pub fn is_punctuation(ch: char) -> bool {
    (ch.is_ascii_punctuation() && ch != '_') || WIDE_PUNCTUATION.contains(&ch)
}

/// Character type for word navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharType {
    Whitespace,
    /// Alphanumeric characters (word characters, `_` included)
    WordChar,
    /// Punctuation and symbols
    Punctuation,
}

/// Get the character type for word navigation
pub fn char_type(ch: char) -> CharType {
    if ch.is_whitespace() {
        CharType::Whitespace
    } else if is_punctuation(ch) {
        CharType::Punctuation
    } else {
        CharType::WordChar
    }
}

/// Word-navigation class of a document atom. A chip is a word of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomClass {
    Char(CharType),
    Token,
}

pub fn atom_class(atom: Atom<'_>) -> AtomClass {
    match atom {
        Atom::Char(ch) => AtomClass::Char(char_type(ch)),
        Atom::Token(_) => AtomClass::Token,
    }
}
