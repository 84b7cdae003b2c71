//! Piecemeal - a piece table for text editing
//!
//! The document is kept as an immutable original buffer, an append-only
//! addition buffer and an ordered sequence of pieces referencing spans of
//! both. See [`PieceTable`].

pub mod cursor;
pub mod error;
pub mod loader;
pub mod settings;
pub mod table;

pub use cursor::Cursor;
pub use error::{LoadError, RangeError};
pub use settings::TableOptions;
pub use table::{Piece, PieceTable, Source};
