//! In-order iterators over the piece tree

use super::buffer::Sources;
use super::piece::Piece;
use super::tree::{self, Link, Node};

/// Stack-based in-order walk over tree nodes
struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Walk<'a> {
    /// Walk starting at the node holding `pos`, returning the offset of `pos`
    /// inside that node's piece. A `pos` at or past the end yields nothing.
    fn seek(root: &'a Link, mut pos: usize) -> (Self, usize) {
        let mut walk = Self { stack: Vec::new() };
        let mut current = root.as_deref();
        while let Some(node) = current {
            let left_len = tree::len(&node.left);
            if pos < left_len {
                walk.stack.push(node);
                current = node.left.as_deref();
            } else if pos < left_len + node.piece.len {
                walk.stack.push(node);
                return (walk, pos - left_len);
            } else {
                pos -= left_len + node.piece.len;
                current = node.right.as_deref();
            }
        }
        (walk, 0)
    }

    fn push_left(&mut self, mut link: Option<&'a Node>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some(node)
    }
}

/// Piece descriptors in document order
pub struct Pieces<'a> {
    walk: Walk<'a>,
}

impl<'a> Pieces<'a> {
    pub(crate) fn new(root: &'a Link) -> Self {
        let mut walk = Walk { stack: Vec::new() };
        walk.push_left(root.as_deref());
        Self { walk }
    }
}

impl Iterator for Pieces<'_> {
    type Item = Piece;

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.next().map(|node| node.piece)
    }
}

/// Contiguous character spans in document order
pub struct Chunks<'a> {
    walk: Walk<'a>,
    sources: Sources<'a>,
    skip: usize,
}

impl<'a> Chunks<'a> {
    pub(crate) fn new(root: &'a Link, sources: Sources<'a>, start: usize) -> Self {
        let (walk, skip) = Walk::seek(root, start);
        Self {
            walk,
            sources,
            skip,
        }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a [char];

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.walk.next()?;
        let chars = self.sources.chars(&node.piece);
        let skip = std::mem::take(&mut self.skip);
        Some(&chars[skip..])
    }
}

/// Characters in document order
pub struct Chars<'a> {
    chunks: Chunks<'a>,
    current: std::slice::Iter<'a, char>,
}

impl<'a> Chars<'a> {
    pub(crate) fn new(chunks: Chunks<'a>) -> Self {
        Self {
            chunks,
            current: [].iter(),
        }
    }
}

impl Iterator for Chars<'_> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(&c) = self.current.next() {
                return Some(c);
            }
            self.current = self.chunks.next()?.iter();
        }
    }
}
