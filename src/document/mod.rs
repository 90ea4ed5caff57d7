//! Document model for template editing.
//!
//! A [`Document`] is an ordered list of [`Segment`]s: literal text and atomic
//! token references. Positions inside a document are measured in *atoms*:
//! every text character is one atom and every token is exactly one atom, so a
//! caret offset can never point into the middle of a token.

mod name;

use std::ops::Range;

use serde::{Deserialize, Serialize};

pub use name::{NameError, TokenName};

/// One unit of the document: literal text or a token reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Segment {
    Text(String),
    Token(TokenName),
}

impl Segment {
    pub fn text(value: impl Into<String>) -> Self {
        Segment::Text(value.into())
    }

    pub fn token(name: TokenName) -> Self {
        Segment::Token(name)
    }

    /// Number of atoms this segment occupies
    pub fn atom_len(&self) -> usize {
        match self {
            Segment::Text(text) => text.chars().count(),
            Segment::Token(_) => 1,
        }
    }

    pub fn is_token(&self) -> bool {
        matches!(self, Segment::Token(_))
    }

    pub fn as_token(&self) -> Option<&TokenName> {
        match self {
            Segment::Token(name) => Some(name),
            Segment::Text(_) => None,
        }
    }
}

/// A single atom of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Atom<'a> {
    Char(char),
    Token(&'a TokenName),
}

impl Atom<'_> {
    pub fn is_token(&self) -> bool {
        matches!(self, Atom::Token(_))
    }
}

/// Owned atom used while splicing.
#[derive(Debug, Clone)]
enum AtomBuf {
    Char(char),
    Token(TokenName),
}

/// A line/column pair (both 0-indexed, column counted in atoms).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Normalized segment list.
///
/// Invariants (kept by every constructor and mutation):
/// - no empty text segment
/// - no two adjacent text segments
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Document {
    segments: Vec<Segment>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from arbitrary segments, merging adjacent text and
    /// dropping empty text.
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Self {
        let mut merged: Vec<Segment> = Vec::new();
        for segment in segments {
            match segment {
                Segment::Text(text) if text.is_empty() => {}
                Segment::Text(text) => match merged.last_mut() {
                    Some(Segment::Text(prev)) => prev.push_str(&text),
                    _ => merged.push(Segment::Text(text)),
                },
                token => merged.push(token),
            }
        }
        Self { segments: merged }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// True when the document has no segments at all
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Empty state for placeholder display: no token and no visible text.
    pub fn is_blank(&self) -> bool {
        self.segments.iter().all(|segment| match segment {
            Segment::Token(_) => false,
            Segment::Text(text) => text
                .chars()
                .all(|ch| ch.is_whitespace() || ch == '\u{200b}'),
        })
    }

    pub fn len_atoms(&self) -> usize {
        self.segments.iter().map(Segment::atom_len).sum()
    }

    pub fn token_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_token()).count()
    }

    /// Token names in document order (duplicates included)
    pub fn tokens(&self) -> impl Iterator<Item = &TokenName> {
        self.segments.iter().filter_map(Segment::as_token)
    }

    /// Concatenated literal text (tokens skipped)
    pub fn plain_text(&self) -> String {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Text(text) => Some(text.as_str()),
                Segment::Token(_) => None,
            })
            .collect()
    }

    /// Iterate over every atom in order
    pub fn atoms(&self) -> impl Iterator<Item = Atom<'_>> {
        self.segments.iter().flat_map(segment_atom_refs)
    }

    /// Atom at `offset`, None past the end
    pub fn atom_at(&self, offset: usize) -> Option<Atom<'_>> {
        let mut start = 0;
        for segment in &self.segments {
            let len = segment.atom_len();
            if offset < start + len {
                return match segment {
                    Segment::Text(text) => text.chars().nth(offset - start).map(Atom::Char),
                    Segment::Token(name) => Some(Atom::Token(name)),
                };
            }
            start += len;
        }
        None
    }

    /// Atom offset of the chip with the given ordinal (0 = first token)
    pub fn token_offset(&self, ordinal: usize) -> Option<usize> {
        let mut offset = 0;
        let mut seen = 0;
        for segment in &self.segments {
            if segment.is_token() {
                if seen == ordinal {
                    return Some(offset);
                }
                seen += 1;
            }
            offset += segment.atom_len();
        }
        None
    }

    /// Whether any token lies in the atom range
    pub fn range_contains_token(&self, range: Range<usize>) -> bool {
        let mut start = 0;
        for segment in &self.segments {
            let len = segment.atom_len();
            if segment.is_token() && start >= range.start && start < range.end {
                return true;
            }
            start += len;
            if start >= range.end {
                break;
            }
        }
        false
    }

    /// Copy of the segments covering `range`
    pub fn slice(&self, range: Range<usize>) -> Vec<Segment> {
        let atoms = self.to_atoms();
        let end = range.end.min(atoms.len());
        let start = range.start.min(end);
        Self::from_atoms(atoms[start..end].iter().cloned()).segments
    }

    /// Remove the atoms in `range`, returning what was removed
    pub fn remove(&mut self, range: Range<usize>) -> Vec<Segment> {
        self.replace(range, &[])
    }

    /// Insert segments at an atom offset (clamped to the end)
    pub fn insert(&mut self, offset: usize, segments: &[Segment]) {
        self.replace(offset..offset, segments);
    }

    /// Replace the atoms in `range` with `segments`, returning the removed ones
    pub fn replace(&mut self, range: Range<usize>, segments: &[Segment]) -> Vec<Segment> {
        let mut atoms = self.to_atoms();
        let end = range.end.min(atoms.len());
        let start = range.start.min(end);
        let inserted = segments.iter().flat_map(segment_atoms);
        let removed: Vec<AtomBuf> = atoms.splice(start..end, inserted).collect();
        *self = Self::from_atoms(atoms);
        Self::from_atoms(removed).segments
    }

    /// Line/column of an atom offset (lines split on `\n`)
    pub fn position_of(&self, offset: usize) -> Position {
        let mut position = Position::default();
        for atom in self.atoms().take(offset) {
            if atom == Atom::Char('\n') {
                position.line += 1;
                position.column = 0;
            } else {
                position.column += 1;
            }
        }
        position
    }

    /// Offset of the start of the line containing `offset`
    pub fn line_start(&self, offset: usize) -> usize {
        let mut start = 0;
        for (i, atom) in self.atoms().enumerate().take(offset) {
            if atom == Atom::Char('\n') {
                start = i + 1;
            }
        }
        start
    }

    /// Offset of the end of the line containing `offset` (before the `\n`)
    pub fn line_end(&self, offset: usize) -> usize {
        let len = self.len_atoms();
        self.atoms()
            .enumerate()
            .skip(offset)
            .find(|(_, atom)| *atom == Atom::Char('\n'))
            .map(|(i, _)| i)
            .unwrap_or(len)
    }

    fn to_atoms(&self) -> Vec<AtomBuf> {
        self.segments.iter().flat_map(segment_atoms).collect()
    }

    fn from_atoms(atoms: impl IntoIterator<Item = AtomBuf>) -> Self {
        let mut segments = Vec::new();
        let mut text = String::new();
        for atom in atoms {
            match atom {
                AtomBuf::Char(ch) => text.push(ch),
                AtomBuf::Token(name) => {
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Token(name));
                }
            }
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }
        Self { segments }
    }
}

fn segment_atom_refs(segment: &Segment) -> Box<dyn Iterator<Item = Atom<'_>> + '_> {
    match segment {
        Segment::Text(text) => Box::new(text.chars().map(Atom::Char)),
        Segment::Token(name) => Box::new(std::iter::once(Atom::Token(name))),
    }
}

fn segment_atoms(segment: &Segment) -> Box<dyn Iterator<Item = AtomBuf> + '_> {
    match segment {
        Segment::Text(text) => Box::new(text.chars().map(AtomBuf::Char)),
        Segment::Token(name) => Box::new(std::iter::once(AtomBuf::Token(name.clone()))),
    }
}

impl FromIterator<Segment> for Document {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self::from_segments(iter)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let segments = Vec::<Segment>::deserialize(deserializer)?;
        Ok(Self::from_segments(segments))
    }
}
