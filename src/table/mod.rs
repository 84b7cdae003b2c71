//! Piece table backed by an AVL tree
//!
//! A `PieceTable` represents an editable document as a sequence of pieces,
//! each naming a span of one of two buffers:
//! - the original buffer, captured once at construction and never modified
//! - the addition buffer, which receives every inserted string and only grows
//!
//! Edits rearrange pieces; they never copy or move document text. The piece
//! sequence lives in a balanced tree whose nodes carry subtree lengths, so
//! finding the piece at a position, splitting it and splicing in a new one
//! are all O(log pieces).
//!
//! Positions and lengths count `char`s (Unicode scalar values).

use std::ops::Range;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::error::RangeError;
use crate::settings::TableOptions;

mod buffer;
mod iter;
mod lines;
mod piece;
mod tree;

use buffer::{Buffer, Sources};
use tree::{Link, Node};

pub use iter::{Chars, Chunks, Pieces};
pub use piece::{Piece, Source};

/// A text document stored as pieces over an original and an addition buffer
#[derive(Clone)]
pub struct PieceTable {
    original: Arc<Buffer>,
    additions: Buffer,
    root: Link,
    options: TableOptions,
}

impl PieceTable {
    /// Build a table whose document is `text`, with default options
    pub fn new(text: &str) -> Self {
        Self::with_options(text, TableOptions::default())
    }

    pub fn with_options(text: &str, options: TableOptions) -> Self {
        let original = Buffer::from_text(text);
        let additions = Buffer::with_capacity(options.addition_capacity);

        let root = match original.len() {
            0 => None,
            len => {
                let sources = Sources::new(&original, &additions);
                Some(Node::leaf(Piece::original(0, len), &sources))
            }
        };

        let table = Self {
            original: Arc::new(original),
            additions,
            root,
            options,
        };
        debug!(len = table.len(), coalesce = options.coalesce, "piece table created");
        table
    }

    #[must_use]
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Document length in characters
    #[must_use]
    pub fn len(&self) -> usize {
        tree::len(&self.root)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Length of the materialized document in UTF-8 bytes
    #[must_use]
    pub fn byte_len(&self) -> usize {
        tree::byte_len(&self.root)
    }

    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    /// Characters appended to the addition buffer so far
    #[must_use]
    pub fn additions_len(&self) -> usize {
        self.additions.len()
    }

    /// Insert `text` so that it starts at `position`.
    ///
    /// `position` may equal `len()` to append. Inserting an empty string is a
    /// no-op.
    pub fn insert(&mut self, position: usize, text: &str) -> Result<(), RangeError> {
        let len = self.len();
        if position > len {
            let err = RangeError::Insert { position, len };
            warn!(%err, "insert rejected");
            return Err(err);
        }
        if text.is_empty() {
            return Ok(());
        }

        let start = self.additions.append(text);
        let piece = Piece::addition(start, self.additions.len() - start);

        let sources = Sources::new(&self.original, &self.additions);
        let (left, right) = tree::split(self.root.take(), position, &sources);

        let extends_last = self.options.coalesce
            && tree::last_piece(&left).is_some_and(|last| last.abuts(&piece));

        self.root = match left {
            Some(left) if extends_last => {
                let (rest, last) = tree::pop_last(left);
                let grown = last.piece.joined(&piece);
                trace!(piece = %grown, "insert extended previous piece");
                Some(tree::join(rest, Node::leaf(grown, &sources), right))
            }
            left => Some(tree::join(left, Node::leaf(piece, &sources), right)),
        };

        debug!(
            position,
            inserted = piece.len,
            len = self.len(),
            pieces = self.piece_count(),
            "insert"
        );
        Ok(())
    }

    /// Remove `length` characters starting at `position`.
    ///
    /// The whole span must lie inside the document. A zero length is a no-op.
    pub fn erase(&mut self, position: usize, length: usize) -> Result<(), RangeError> {
        let len = self.len();
        if position.checked_add(length).map_or(true, |end| end > len) {
            let err = RangeError::Erase {
                position,
                length,
                len,
            };
            warn!(%err, "erase rejected");
            return Err(err);
        }
        if length == 0 {
            return Ok(());
        }

        let sources = Sources::new(&self.original, &self.additions);
        let (left, rest) = tree::split(self.root.take(), position, &sources);
        let (_removed, right) = tree::split(rest, length, &sources);

        let fuses = self.options.coalesce
            && match (tree::last_piece(&left), tree::first_piece(&right)) {
                (Some(last), Some(first)) => last.abuts(first),
                _ => false,
            };

        self.root = match (left, right) {
            (Some(left), Some(right)) if fuses => {
                let (rest_left, last) = tree::pop_last(left);
                let (first, rest_right) = tree::pop_first(right);
                let fused = last.piece.joined(&first.piece);
                trace!(piece = %fused, "erase fused neighbouring pieces");
                Some(tree::join(rest_left, Node::leaf(fused, &sources), rest_right))
            }
            (left, right) => tree::concat(left, right),
        };

        debug!(
            position,
            erased = length,
            len = self.len(),
            pieces = self.piece_count(),
            "erase"
        );
        Ok(())
    }

    /// The full document text
    #[must_use]
    pub fn materialize(&self) -> String {
        let mut text = String::with_capacity(self.byte_len());
        for chunk in self.chunks() {
            text.extend(chunk);
        }
        text
    }

    /// Text of `range`, which must lie inside the document
    pub fn slice(&self, range: Range<usize>) -> Result<String, RangeError> {
        let len = self.len();
        if range.start > range.end || range.end > len {
            return Err(RangeError::Slice {
                start: range.start,
                end: range.end,
                len,
            });
        }
        Ok(self.chars_at(range.start)?.take(range.len()).collect())
    }

    /// Character at `position`, if inside the document
    #[must_use]
    pub fn char_at(&self, position: usize) -> Option<char> {
        let (node, offset) = tree::find(&self.root, position)?;
        self.sources().chars(&node.piece).get(offset).copied()
    }

    /// Piece descriptors in document order
    pub fn pieces(&self) -> Pieces<'_> {
        Pieces::new(&self.root)
    }

    /// Buffer spans in document order, one per piece
    pub fn chunks(&self) -> Chunks<'_> {
        Chunks::new(&self.root, self.sources(), 0)
    }

    pub fn chars(&self) -> Chars<'_> {
        Chars::new(self.chunks())
    }

    /// Characters from `position` to the end
    pub fn chars_at(&self, position: usize) -> Result<Chars<'_>, RangeError> {
        let len = self.len();
        if position > len {
            return Err(RangeError::Position { position, len });
        }
        Ok(Chars::new(Chunks::new(&self.root, self.sources(), position)))
    }

    /// UTF-8 byte offset of character `position` (`len()` maps to `byte_len()`)
    pub fn char_to_byte(&self, position: usize) -> Result<usize, RangeError> {
        let len = self.len();
        if position > len {
            return Err(RangeError::Position { position, len });
        }
        if position == len {
            return Ok(self.byte_len());
        }

        let sources = self.sources();
        let mut pos = position;
        let mut bytes = 0;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            let left_len = tree::len(&node.left);
            if pos < left_len {
                current = node.left.as_deref();
            } else if pos < left_len + node.piece.len {
                let offset = pos - left_len;
                return Ok(bytes
                    + tree::byte_len(&node.left)
                    + sources.prefix_stats(&node.piece, offset).bytes);
            } else {
                pos -= left_len + node.piece.len;
                bytes += tree::byte_len(&node.left) + node.piece_bytes;
                current = node.right.as_deref();
            }
        }
        Ok(bytes)
    }

    /// Character containing UTF-8 byte offset `byte` (`byte_len()` maps to `len()`)
    pub fn byte_to_char(&self, byte: usize) -> Result<usize, RangeError> {
        let byte_len = self.byte_len();
        if byte > byte_len {
            return Err(RangeError::Position {
                position: byte,
                len: byte_len,
            });
        }
        if byte == byte_len {
            return Ok(self.len());
        }

        let sources = self.sources();
        let mut target = byte;
        let mut chars = 0;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            let left_bytes = tree::byte_len(&node.left);
            if target < left_bytes {
                current = node.left.as_deref();
            } else if target < left_bytes + node.piece_bytes {
                let within = target - left_bytes;
                // Largest offset whose prefix still fits in `within` bytes
                let (mut lo, mut hi) = (0, node.piece.len);
                while lo < hi {
                    let mid = (lo + hi + 1) / 2;
                    if sources.prefix_stats(&node.piece, mid).bytes <= within {
                        lo = mid;
                    } else {
                        hi = mid - 1;
                    }
                }
                return Ok(chars + tree::len(&node.left) + lo);
            } else {
                target -= left_bytes + node.piece_bytes;
                chars += tree::len(&node.left) + node.piece.len;
                current = node.right.as_deref();
            }
        }
        Ok(chars)
    }

    fn sources(&self) -> Sources<'_> {
        Sources::new(&self.original, &self.additions)
    }

    #[cfg(test)]
    pub(crate) fn validate(&self) -> Result<(), String> {
        tree::validate(&self.root, &self.sources())?;
        let total: usize = self.pieces().map(|p| p.len).sum();
        if total != self.len() {
            return Err(format!("pieces sum to {} but len is {}", total, self.len()));
        }
        Ok(())
    }
}

impl Default for PieceTable {
    fn default() -> Self {
        Self::new("")
    }
}

impl From<&str> for PieceTable {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl std::fmt::Display for PieceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use std::fmt::Write;
        for c in self.chars() {
            f.write_char(c)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for PieceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PieceTable")
            .field("len", &self.len())
            .field("pieces", &self.piece_count())
            .field("additions", &self.additions.len())
            .finish()
    }
}
