//! Translation between document offsets and (row, column) cursors
//!
//! Columns come in two flavours: character columns, counted in `char`s from
//! the start of the line, and visual columns, counted in terminal cells with
//! tabs expanded to the next tab stop.

use unicode_width::UnicodeWidthChar;

use crate::error::RangeError;
use crate::table::PieceTable;

/// A zero-based (row, column) location; `col` counts characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.row + 1, self.col + 1)
    }
}

/// Document offset of `cursor`.
///
/// `col` may equal the line length (the position of the line's newline, or
/// the document end on the last line) but not exceed it.
pub fn offset_of(table: &PieceTable, cursor: Cursor) -> Result<usize, RangeError> {
    let start = table.line_start(cursor.row)?;
    let line_len = table.line_end(cursor.row)? - start;
    if cursor.col > line_len {
        return Err(RangeError::Column {
            row: cursor.row,
            col: cursor.col,
            line_len,
        });
    }
    Ok(start + cursor.col)
}

/// Cursor for document offset `position`
pub fn cursor_at(table: &PieceTable, position: usize) -> Result<Cursor, RangeError> {
    let row = table.line_at(position)?;
    let col = position - table.line_start(row)?;
    Ok(Cursor { row, col })
}

/// Terminal cells occupied by `c` when it starts at visual column `col`
fn cell_width(c: char, col: usize, tab_width: usize) -> usize {
    if c == '\t' {
        tab_width - (col % tab_width)
    } else {
        UnicodeWidthChar::width(c).unwrap_or(0)
    }
}

/// Visual column at which the character at `position` starts, with tabs
/// expanded to the table's `tab_width`
pub fn visual_column(table: &PieceTable, position: usize) -> Result<usize, RangeError> {
    visual_column_with_tab(table, position, table.options().tab_width)
}

/// `visual_column` with an explicit tab width
pub fn visual_column_with_tab(
    table: &PieceTable,
    position: usize,
    tab_width: usize,
) -> Result<usize, RangeError> {
    let tab_width = tab_width.max(1);
    let row = table.line_at(position)?;
    let start = table.line_start(row)?;

    let mut col = 0;
    for c in table.chars_at(start)?.take(position - start) {
        col += cell_width(c, col, tab_width);
    }
    Ok(col)
}

/// Offset of the character covering visual column `visual_col` on `row`,
/// with tabs expanded to the table's `tab_width`.
///
/// A column inside a tab or a wide character maps to that character. A
/// column past the end of the line maps to the line end.
pub fn offset_at_visual(
    table: &PieceTable,
    row: usize,
    visual_col: usize,
) -> Result<usize, RangeError> {
    offset_at_visual_with_tab(table, row, visual_col, table.options().tab_width)
}

/// `offset_at_visual` with an explicit tab width
pub fn offset_at_visual_with_tab(
    table: &PieceTable,
    row: usize,
    visual_col: usize,
    tab_width: usize,
) -> Result<usize, RangeError> {
    let tab_width = tab_width.max(1);
    let start = table.line_start(row)?;
    let end = table.line_end(row)?;

    let mut col = 0;
    for (i, c) in table.chars_at(start)?.take(end - start).enumerate() {
        let width = cell_width(c, col, tab_width);
        if visual_col < col + width {
            return Ok(start + i);
        }
        col += width;
    }
    Ok(end)
}
