//! Caret type for the editing surface.

/// Caret position, measured in atoms (a token chip counts as one atom).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    pub offset: usize,
}

impl Cursor {
    pub const fn new(offset: usize) -> Self {
        Self { offset }
    }

    pub const fn zero() -> Self {
        Self { offset: 0 }
    }

    /// Clamp to a document of `len` atoms
    pub fn clamped(self, len: usize) -> Self {
        Self::new(self.offset.min(len))
    }
}

impl From<usize> for Cursor {
    fn from(offset: usize) -> Self {
        Self::new(offset)
    }
}

impl From<Cursor> for usize {
    fn from(cursor: Cursor) -> Self {
        cursor.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_ordering() {
        assert!(Cursor::new(1) < Cursor::new(2));
        assert_eq!(Cursor::zero(), Cursor::default());
    }

    #[test]
    fn test_cursor_clamp() {
        assert_eq!(Cursor::new(10).clamped(4), Cursor::new(4));
        assert_eq!(Cursor::new(2).clamped(4), Cursor::new(2));
    }

    #[test]
    fn test_cursor_conversions() {
        let cursor = Cursor::from(7);
        let offset: usize = cursor.into();
        assert_eq!(offset, 7);
    }
}
