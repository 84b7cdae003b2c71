//! Backing storage for pieces
//!
//! A `Buffer` is a character sequence that only ever grows at the end. Next to
//! the characters it keeps two sorted side indexes: the positions of `'\n'`
//! and the positions of characters wider than one UTF-8 byte. Both are
//! append-only as well, which lets any span answer "how many newlines" and
//! "how many bytes" with two binary searches instead of a scan.

use tracing::warn;

use super::piece::{Piece, Source};

/// Line and byte statistics of a span
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct SpanStats {
    pub newlines: usize,
    pub bytes: usize,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct Buffer {
    chars: Vec<char>,
    /// Positions of every `'\n'`
    newlines: Vec<usize>,
    /// `(position, extra)` for every multi-byte character, where `extra` is the
    /// running total of bytes beyond one per character, up to and including it
    wide: Vec<(usize, usize)>,
}

impl Buffer {
    /// Empty buffer with room for `capacity` characters. A reservation the
    /// allocator refuses is skipped and the buffer grows on demand instead.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut chars = Vec::new();
        if let Err(err) = chars.try_reserve_exact(capacity) {
            warn!(capacity, %err, "buffer reservation refused, growing on demand");
        }
        Self {
            chars,
            newlines: Vec::new(),
            wide: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.chars.capacity()
    }

    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::with_capacity(text.len());
        buffer.append(text);
        buffer
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Append `text`, returning the position its first character landed at
    pub fn append(&mut self, text: &str) -> usize {
        let start = self.chars.len();
        let mut extra = self.wide.last().map_or(0, |&(_, e)| e);

        for c in text.chars() {
            let pos = self.chars.len();
            if c == '\n' {
                self.newlines.push(pos);
            }
            let width = c.len_utf8();
            if width > 1 {
                extra += width - 1;
                self.wide.push((pos, extra));
            }
            self.chars.push(c);
        }

        start
    }

    pub fn span(&self, start: usize, len: usize) -> &[char] {
        &self.chars[start..start + len]
    }

    pub fn stats(&self, start: usize, len: usize) -> SpanStats {
        let end = start + len;
        let newlines = self.newlines.partition_point(|&p| p < end)
            - self.newlines.partition_point(|&p| p < start);
        let bytes = len + self.extra_before(end) - self.extra_before(start);
        SpanStats { newlines, bytes }
    }

    /// Position of the `n`th newline (1-based) at or after `start`
    pub fn nth_newline(&self, start: usize, n: usize) -> Option<usize> {
        debug_assert!(n > 0);
        let first = self.newlines.partition_point(|&p| p < start);
        self.newlines.get(first + n - 1).copied()
    }

    fn extra_before(&self, pos: usize) -> usize {
        match self.wide.partition_point(|&(p, _)| p < pos) {
            0 => 0,
            i => self.wide[i - 1].1,
        }
    }
}

/// Read access to both buffers, resolved by a piece's source
#[derive(Clone, Copy)]
pub(crate) struct Sources<'a> {
    pub original: &'a Buffer,
    pub additions: &'a Buffer,
}

impl<'a> Sources<'a> {
    pub fn new(original: &'a Buffer, additions: &'a Buffer) -> Self {
        Self {
            original,
            additions,
        }
    }

    pub fn buffer(&self, source: Source) -> &'a Buffer {
        match source {
            Source::Original => self.original,
            Source::Addition => self.additions,
        }
    }

    pub fn chars(&self, piece: &Piece) -> &'a [char] {
        self.buffer(piece.source).span(piece.start, piece.len)
    }

    pub fn stats(&self, piece: &Piece) -> SpanStats {
        self.buffer(piece.source).stats(piece.start, piece.len)
    }

    /// Stats for the first `offset` characters of `piece`
    pub fn prefix_stats(&self, piece: &Piece, offset: usize) -> SpanStats {
        self.buffer(piece.source).stats(piece.start, offset)
    }
}
