//! Piece descriptors
//!
//! A piece names a contiguous span of exactly one of the table's two buffers.
//! Pieces are plain values: they never borrow from the buffers, so the
//! buffers can grow underneath them without invalidating anything.

/// Which buffer a piece refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    /// The immutable snapshot captured when the table was built
    Original,
    /// The append-only buffer holding every inserted string
    Addition,
}

/// A span `[start, start + len)` of one buffer, in characters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub source: Source,
    pub start: usize,
    pub len: usize,
}

impl Piece {
    pub const fn original(start: usize, len: usize) -> Self {
        Self {
            source: Source::Original,
            start,
            len,
        }
    }

    pub const fn addition(start: usize, len: usize) -> Self {
        Self {
            source: Source::Addition,
            start,
            len,
        }
    }

    /// Offset one past the last character of the span
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Split into `[0, offset)` and `[offset, len)`.
    /// Callers only split strictly inside the piece.
    pub(crate) fn split_at(&self, offset: usize) -> (Piece, Piece) {
        debug_assert!(offset > 0 && offset < self.len);
        (
            Piece {
                source: self.source,
                start: self.start,
                len: offset,
            },
            Piece {
                source: self.source,
                start: self.start + offset,
                len: self.len - offset,
            },
        )
    }

    /// Whether `next` continues this span in the same buffer
    #[must_use]
    pub fn abuts(&self, next: &Piece) -> bool {
        self.source == next.source && self.end() == next.start
    }

    /// The piece covering this span followed by `next`.
    /// Only meaningful when `self.abuts(next)`.
    pub(crate) fn joined(&self, next: &Piece) -> Piece {
        debug_assert!(self.abuts(next));
        Piece {
            source: self.source,
            start: self.start,
            len: self.len + next.len,
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self.source {
            Source::Original => "original",
            Source::Addition => "addition",
        };
        write!(f, "{}[{}..{}]", tag, self.start, self.end())
    }
}
