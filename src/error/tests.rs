//! Tests for error reporting

use super::*;
use std::io;

#[test]
fn test_range_error_display() {
    let err = RangeError::Insert {
        position: 7,
        len: 6,
    };
    assert_eq!(
        err.to_string(),
        "insert position 7 is past the end of the document (length 6)"
    );

    let err = RangeError::Erase {
        position: 2,
        length: 5,
        len: 6,
    };
    assert_eq!(
        err.to_string(),
        "erase of 5 at 2 runs past the end of the document (length 6)"
    );

    let err = RangeError::Line {
        line: 3,
        line_count: 2,
    };
    assert_eq!(err.to_string(), "line 3 does not exist (line count 2)");
}

#[test]
fn test_range_error_codes_are_distinct() {
    let errors = [
        RangeError::Insert { position: 0, len: 0 },
        RangeError::Erase {
            position: 0,
            length: 0,
            len: 0,
        },
        RangeError::Slice {
            start: 0,
            end: 0,
            len: 0,
        },
        RangeError::Line {
            line: 0,
            line_count: 0,
        },
        RangeError::Column {
            row: 0,
            col: 0,
            line_len: 0,
        },
        RangeError::Position { position: 0, len: 0 },
    ];
    let mut codes: Vec<_> = errors.iter().map(RangeError::code).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
}

#[test]
fn test_load_error_from_io() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file missing");
    let err: LoadError = io_err.into();
    assert!(matches!(err, LoadError::Io(_)));
    assert!(err.to_string().contains("file missing"));
}

#[test]
fn test_load_error_invalid_utf8_names_path() {
    let err = LoadError::InvalidUtf8 {
        path: PathBuf::from("notes.bin"),
    };
    assert_eq!(err.to_string(), "notes.bin is not valid UTF-8");
}
