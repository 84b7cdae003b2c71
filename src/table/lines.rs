//! Line queries
//!
//! Lines are separated by `'\n'`; a document with k newlines has k + 1 lines,
//! the last of which may be empty. Every node caches its subtree's newline
//! count, so locating a line is a single descent.

use std::ops::Range;

use super::tree;
use super::PieceTable;
use crate::error::RangeError;

impl PieceTable {
    #[must_use]
    pub fn line_count(&self) -> usize {
        tree::newlines(&self.root) + 1
    }

    /// Position of the first character of `line`
    pub fn line_start(&self, line: usize) -> Result<usize, RangeError> {
        self.check_line(line)?;
        if line == 0 {
            return Ok(0);
        }
        Ok(self.nth_newline(line) + 1)
    }

    /// Position of the `'\n'` ending `line`, or `len()` for the last line
    pub fn line_end(&self, line: usize) -> Result<usize, RangeError> {
        self.check_line(line)?;
        if line + 1 == self.line_count() {
            return Ok(self.len());
        }
        Ok(self.nth_newline(line + 1))
    }

    /// Line holding `position`; `len()` belongs to the last line
    pub fn line_at(&self, position: usize) -> Result<usize, RangeError> {
        let len = self.len();
        if position > len {
            return Err(RangeError::Position { position, len });
        }

        let sources = self.sources();
        let mut pos = position;
        let mut line = 0;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            let left_len = tree::len(&node.left);
            if pos < left_len {
                current = node.left.as_deref();
            } else if pos < left_len + node.piece.len {
                let offset = pos - left_len;
                return Ok(line
                    + tree::newlines(&node.left)
                    + sources.prefix_stats(&node.piece, offset).newlines);
            } else {
                pos -= left_len + node.piece.len;
                line += tree::newlines(&node.left) + node.piece_newlines;
                current = node.right.as_deref();
            }
        }
        Ok(line)
    }

    /// Text of `line` without its trailing newline
    pub fn line(&self, line: usize) -> Result<String, RangeError> {
        let start = self.line_start(line)?;
        let end = self.line_end(line)?;
        self.slice(start..end)
    }

    /// Length of `line` in characters, excluding the newline
    pub fn line_len(&self, line: usize) -> Result<usize, RangeError> {
        Ok(self.line_end(line)? - self.line_start(line)?)
    }

    /// Text of each line in `lines`, clamped to the lines that exist
    #[must_use]
    pub fn lines(&self, lines: Range<usize>) -> Vec<String> {
        let end = lines.end.min(self.line_count());
        let mut out = Vec::with_capacity(end.saturating_sub(lines.start));
        if lines.start >= end {
            return out;
        }

        let (Ok(start), Ok(stop)) = (self.line_start(lines.start), self.line_end(end - 1)) else {
            return out;
        };
        let Ok(chars) = self.chars_at(start) else {
            return out;
        };

        let mut current = String::new();
        for c in chars.take(stop - start) {
            if c == '\n' {
                out.push(std::mem::take(&mut current));
            } else {
                current.push(c);
            }
        }
        out.push(current);
        out
    }

    fn check_line(&self, line: usize) -> Result<(), RangeError> {
        let line_count = self.line_count();
        if line >= line_count {
            return Err(RangeError::Line { line, line_count });
        }
        Ok(())
    }

    /// Position of the `n`th newline in the document (1-based).
    /// Callers guarantee `1 <= n <= newline count`.
    fn nth_newline(&self, n: usize) -> usize {
        let sources = self.sources();
        let mut target = n;
        let mut base = 0;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            let left_newlines = tree::newlines(&node.left);
            if target <= left_newlines {
                current = node.left.as_deref();
                continue;
            }

            let left_len = tree::len(&node.left);
            target -= left_newlines;
            if target <= node.piece_newlines {
                let buffer = sources.buffer(node.piece.source);
                if let Some(at) = buffer.nth_newline(node.piece.start, target) {
                    return base + left_len + (at - node.piece.start);
                }
                break;
            }

            target -= node.piece_newlines;
            base += left_len + node.piece.len;
            current = node.right.as_deref();
        }
        self.len()
    }
}
