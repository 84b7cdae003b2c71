//! AVL index over the piece sequence
//!
//! Nodes are ordered by logical position. No node stores its absolute position;
//! each carries aggregates for its subtree (characters, UTF-8 bytes, newlines)
//! so a position is located by prefix-summing on the way down. Every edit is a
//! composition of `split` and `join`, both O(log pieces).

use super::buffer::Sources;
use super::piece::Piece;
use std::cmp::max;

pub(crate) type Link = Option<Box<Node>>;

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub left: Link,
    pub right: Link,
    pub piece: Piece,
    pub piece_bytes: usize,
    pub piece_newlines: usize,

    // Subtree aggregates
    pub len: usize,
    pub byte_len: usize,
    pub newlines: usize,
    height: usize,
}

impl Node {
    pub fn leaf(piece: Piece, sources: &Sources<'_>) -> Box<Node> {
        let stats = sources.stats(&piece);
        Box::new(Node {
            left: None,
            right: None,
            piece,
            piece_bytes: stats.bytes,
            piece_newlines: stats.newlines,
            len: piece.len,
            byte_len: stats.bytes,
            newlines: stats.newlines,
            height: 1,
        })
    }
}

pub(crate) fn len(link: &Link) -> usize {
    link.as_ref().map_or(0, |n| n.len)
}

pub(crate) fn byte_len(link: &Link) -> usize {
    link.as_ref().map_or(0, |n| n.byte_len)
}

pub(crate) fn newlines(link: &Link) -> usize {
    link.as_ref().map_or(0, |n| n.newlines)
}

fn height(link: &Link) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

fn update(node: &mut Node) {
    node.len = len(&node.left) + node.piece.len + len(&node.right);
    node.byte_len = byte_len(&node.left) + node.piece_bytes + byte_len(&node.right);
    node.newlines = newlines(&node.left) + node.piece_newlines + newlines(&node.right);
    node.height = 1 + max(height(&node.left), height(&node.right));
}

// --- Rotations ---

fn rotate_right(mut node: Box<Node>) -> Box<Node> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    update(&mut node);
    pivot.right = Some(node);
    update(&mut pivot);
    pivot
}

fn rotate_left(mut node: Box<Node>) -> Box<Node> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    update(&mut node);
    pivot.left = Some(node);
    update(&mut pivot);
    pivot
}

fn balance(mut node: Box<Node>) -> Box<Node> {
    update(&mut node);
    let factor = height(&node.left) as isize - height(&node.right) as isize;

    if factor > 1 {
        if let Some(left) = node.left.take() {
            let left = if height(&left.left) < height(&left.right) {
                rotate_left(left)
            } else {
                left
            };
            node.left = Some(left);
        }
        rotate_right(node)
    } else if factor < -1 {
        if let Some(right) = node.right.take() {
            let right = if height(&right.right) < height(&right.left) {
                rotate_right(right)
            } else {
                right
            };
            node.right = Some(right);
        }
        rotate_left(node)
    } else {
        node
    }
}

// --- Join and split ---

/// Concatenate `left`, `center` and `right` in that order.
/// `center`'s own children are discarded.
pub(crate) fn join(left: Link, mut center: Box<Node>, right: Link) -> Box<Node> {
    let lh = height(&left);
    let rh = height(&right);

    match (left, right) {
        (Some(mut node), right) if lh > rh + 1 => {
            node.right = Some(join(node.right.take(), center, right));
            balance(node)
        }
        (left, Some(mut node)) if rh > lh + 1 => {
            node.left = Some(join(left, center, node.left.take()));
            balance(node)
        }
        (left, right) => {
            center.left = left;
            center.right = right;
            update(&mut center);
            center
        }
    }
}

/// Concatenate two trees
pub(crate) fn concat(left: Link, right: Link) -> Link {
    match (left, right) {
        (None, r) => r,
        (l, None) => l,
        (Some(l), Some(r)) => {
            let (rest, last) = pop_last(l);
            Some(join(rest, last, Some(r)))
        }
    }
}

/// Split into the pieces before `pos` and the pieces from `pos` on.
/// A piece straddling `pos` is cut in two.
pub(crate) fn split(link: Link, pos: usize, sources: &Sources<'_>) -> (Link, Link) {
    let Some(mut node) = link else {
        return (None, None);
    };

    let left_len = len(&node.left);
    let piece_end = left_len + node.piece.len;
    let left = node.left.take();
    let right = node.right.take();

    if pos < left_len {
        let (ll, lr) = split(left, pos, sources);
        (ll, Some(join(lr, node, right)))
    } else if pos == left_len {
        (left, Some(join(None, node, right)))
    } else if pos < piece_end {
        let (head, tail) = node.piece.split_at(pos - left_len);
        (
            Some(join(left, Node::leaf(head, sources), None)),
            Some(join(None, Node::leaf(tail, sources), right)),
        )
    } else if pos == piece_end {
        (Some(join(left, node, None)), right)
    } else {
        let (rl, rr) = split(right, pos - piece_end, sources);
        (Some(join(left, node, rl)), rr)
    }
}

/// Detach the last node
pub(crate) fn pop_last(mut node: Box<Node>) -> (Link, Box<Node>) {
    match node.right.take() {
        Some(right) => {
            let (rest, last) = pop_last(right);
            node.right = rest;
            (Some(balance(node)), last)
        }
        None => {
            let rest = node.left.take();
            (rest, node)
        }
    }
}

/// Detach the first node
pub(crate) fn pop_first(mut node: Box<Node>) -> (Box<Node>, Link) {
    match node.left.take() {
        Some(left) => {
            let (first, rest) = pop_first(left);
            node.left = rest;
            (first, Some(balance(node)))
        }
        None => {
            let rest = node.right.take();
            (node, rest)
        }
    }
}

pub(crate) fn first_piece(link: &Link) -> Option<&Piece> {
    let mut node = link.as_deref()?;
    while let Some(left) = node.left.as_deref() {
        node = left;
    }
    Some(&node.piece)
}

pub(crate) fn last_piece(link: &Link) -> Option<&Piece> {
    let mut node = link.as_deref()?;
    while let Some(right) = node.right.as_deref() {
        node = right;
    }
    Some(&node.piece)
}

/// Locate the node holding `pos` and the offset inside its piece.
/// `pos` must be below the tree's length.
pub(crate) fn find(link: &Link, mut pos: usize) -> Option<(&Node, usize)> {
    let mut current = link.as_deref();
    while let Some(node) = current {
        let left_len = len(&node.left);
        if pos < left_len {
            current = node.left.as_deref();
        } else if pos < left_len + node.piece.len {
            return Some((node, pos - left_len));
        } else {
            pos -= left_len + node.piece.len;
            current = node.right.as_deref();
        }
    }
    None
}

/// Check structure and aggregates, returning the first violation found
#[cfg(test)]
pub(crate) fn validate(link: &Link, sources: &Sources<'_>) -> Result<(), String> {
    fn walk(node: &Node, sources: &Sources<'_>) -> Result<(), String> {
        let piece = &node.piece;
        if piece.is_empty() {
            return Err(format!("zero-length piece {}", piece));
        }
        if piece.end() > sources.buffer(piece.source).len() {
            return Err(format!("piece {} out of buffer bounds", piece));
        }
        let stats = sources.stats(piece);
        if stats.bytes != node.piece_bytes || stats.newlines != node.piece_newlines {
            return Err(format!("stale piece stats on {}", piece));
        }
        for child in [&node.left, &node.right].into_iter().flatten() {
            walk(child, sources)?;
        }
        let lh = height(&node.left) as isize;
        let rh = height(&node.right) as isize;
        if (lh - rh).abs() > 1 {
            return Err(format!("unbalanced at {} ({} vs {})", piece, lh, rh));
        }
        if node.height != 1 + max(lh, rh) as usize {
            return Err(format!("wrong height at {}", piece));
        }
        if node.len != len(&node.left) + piece.len + len(&node.right) {
            return Err(format!("wrong length aggregate at {}", piece));
        }
        if node.byte_len != byte_len(&node.left) + node.piece_bytes + byte_len(&node.right) {
            return Err(format!("wrong byte aggregate at {}", piece));
        }
        if node.newlines != newlines(&node.left) + node.piece_newlines + newlines(&node.right) {
            return Err(format!("wrong newline aggregate at {}", piece));
        }
        Ok(())
    }

    match link {
        Some(node) => walk(node, sources),
        None => Ok(()),
    }
}
