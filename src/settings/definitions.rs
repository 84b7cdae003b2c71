//! Table options
//! Declarative registry of every option a `PieceTable` understands

use super::descriptor::{SettingDescriptor, SettingError, SettingType, SettingValue};
use super::registry::SettingsRegistry;

/// Default initial reservation for the addition buffer, in characters
pub const DEFAULT_ADDITION_CAPACITY: usize = 1024;

/// Upper bound on the initial reservation (16 Mi characters, 64 MiB)
pub const MAX_ADDITION_CAPACITY: usize = 1 << 24;

pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Per-table configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    /// Fuse adjacent pieces whose spans are contiguous in the same buffer
    pub coalesce: bool,
    /// Characters reserved up front for inserted text
    pub addition_capacity: usize,
    /// Tab stop distance used for visual columns
    pub tab_width: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            coalesce: true,
            addition_capacity: DEFAULT_ADDITION_CAPACITY,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

fn set_coalesce(options: &mut TableOptions, value: SettingValue) -> Result<(), SettingError> {
    match value {
        SettingValue::Bool(b) => {
            options.coalesce = b;
            Ok(())
        }
        _ => Err(SettingError::Validation("Expected boolean".to_string())),
    }
}

fn set_addition_capacity(
    options: &mut TableOptions,
    value: SettingValue,
) -> Result<(), SettingError> {
    match value {
        SettingValue::Integer(n) => {
            options.addition_capacity = n;
            Ok(())
        }
        _ => Err(SettingError::Validation("Expected integer".to_string())),
    }
}

fn set_tab_width(options: &mut TableOptions, value: SettingValue) -> Result<(), SettingError> {
    match value {
        SettingValue::Integer(n) => {
            options.tab_width = n;
            Ok(())
        }
        _ => Err(SettingError::Validation("Expected integer".to_string())),
    }
}

const TABLE_SETTINGS: &[SettingDescriptor<TableOptions>] = &[
    SettingDescriptor {
        name: "coalesce",
        aliases: &["merge"],
        ty: SettingType::Boolean,
        set: set_coalesce,
    },
    SettingDescriptor {
        name: "addition_capacity",
        aliases: &["cap"],
        ty: SettingType::Integer {
            min: None,
            max: Some(MAX_ADDITION_CAPACITY),
        },
        set: set_addition_capacity,
    },
    SettingDescriptor {
        name: "tab_width",
        aliases: &["ts", "tabstop"],
        ty: SettingType::Integer {
            min: Some(1),
            max: Some(16),
        },
        set: set_tab_width,
    },
];

#[must_use]
pub fn create_table_settings_registry() -> SettingsRegistry<TableOptions> {
    SettingsRegistry::new(TABLE_SETTINGS)
}

impl TableOptions {
    /// Apply `name=value` assignments in order, stopping at the first error
    pub fn with_assignments<'a>(
        mut self,
        assignments: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, SettingError> {
        let registry = create_table_settings_registry();
        for assignment in assignments {
            registry.apply_assignment(&mut self, assignment)?;
        }
        Ok(self)
    }
}
