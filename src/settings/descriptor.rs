//! Setting descriptor types
//! Type definitions for declarative option configuration

use thiserror::Error;

/// Typed value after parsing and validation
/// Setters receive this, never raw strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Bool(bool),
    Integer(usize),
}

/// Setting type definition for parsing and validation
#[derive(Debug, Clone)]
pub enum SettingType {
    /// Boolean setting (true/false, on/off, yes/no, 1/0)
    Boolean,
    /// Integer setting with optional min/max bounds
    Integer {
        /// Minimum value (inclusive)
        min: Option<usize>,
        /// Maximum value (inclusive)
        max: Option<usize>,
    },
}

/// Structured error for setting operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("unknown option: {0}")]
    UnknownOption(String),
    #[error("ambiguous option '{prefix}': matches {}", .matches.join(", "))]
    Ambiguous {
        prefix: String,
        matches: Vec<&'static str>,
    },
}

/// Setter function signature
///
/// Function pointers (not trait objects) for static dispatch.
pub type SettingSetter<T> = fn(&mut T, SettingValue) -> Result<(), SettingError>;

/// Setting descriptor: name, aliases, type, and setter function.
#[derive(Debug, Clone)]
pub struct SettingDescriptor<T> {
    /// Canonical setting name (e.g., "coalesce")
    pub name: &'static str,
    /// Short aliases (e.g., &["merge"])
    pub aliases: &'static [&'static str],
    pub ty: SettingType,
    pub set: SettingSetter<T>,
}
