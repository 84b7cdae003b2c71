//! Building tables from files and readers
//!
//! The loaded text becomes the table's original buffer byte for byte. Line
//! endings are left alone; a `"\r\n"` pair is two characters.

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::LoadError;
use crate::settings::TableOptions;
use crate::table::PieceTable;

/// Read the whole file at `path` into a new table
pub fn load_path(path: impl AsRef<Path>, options: TableOptions) -> Result<PieceTable, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|_| LoadError::InvalidUtf8 {
        path: path.to_path_buf(),
    })?;

    let table = PieceTable::with_options(&text, options);
    debug!(path = %path.display(), len = table.len(), "loaded file");
    Ok(table)
}

/// Read `reader` to the end into a new table.
///
/// Invalid UTF-8 surfaces as `LoadError::Io` with kind `InvalidData`, since
/// a reader has no path to report.
pub fn load_reader<R: Read>(mut reader: R, options: TableOptions) -> Result<PieceTable, LoadError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let table = PieceTable::with_options(&text, options);
    debug!(len = table.len(), "loaded reader");
    Ok(table)
}
