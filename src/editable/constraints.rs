//! Edit constraints for the editing surface.
//!
//! Constraints define what operations are allowed in a given field.

/// Character filter function type
pub type CharFilter = fn(char) -> bool;

/// Constraints that limit what operations are allowed on a surface.
#[derive(Debug, Clone)]
pub struct EditConstraints {
    /// Allow multiple lines (Enter inserts `\n`)
    pub allow_multiline: bool,

    /// Enable undo/redo tracking
    pub enable_undo: bool,

    /// Maximum length in atoms (None = unlimited)
    pub max_length: Option<usize>,

    /// Character filter (None = all characters allowed)
    pub char_filter: Option<CharFilter>,
}

impl Default for EditConstraints {
    fn default() -> Self {
        Self::surface()
    }
}

impl EditConstraints {
    /// Prompt template surface: multi-line, undoable, unbounded
    pub fn surface() -> Self {
        Self {
            allow_multiline: true,
            enable_undo: true,
            max_length: None,
            char_filter: None,
        }
    }

    /// Single-line surface (short labels or titles with tokens)
    pub fn single_line() -> Self {
        Self {
            allow_multiline: false,
            enable_undo: true,
            max_length: None,
            char_filter: Some(|c| c != '\n' && c != '\r'),
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Check if a character passes the filter (if any)
    pub fn is_char_allowed(&self, ch: char) -> bool {
        if ch == '\n' && !self.allow_multiline {
            return false;
        }
        match self.char_filter {
            Some(filter) => filter(ch),
            None => true,
        }
    }

    /// Check if inserting would exceed max length
    pub fn would_exceed_max_length(&self, current_len: usize, insert_len: usize) -> bool {
        match self.max_length {
            Some(max) => current_len + insert_len > max,
            None => false,
        }
    }
}
