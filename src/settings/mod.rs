//! Settings registry
//! Configuration-driven options for piece tables

pub mod definitions;
pub mod descriptor;
pub mod registry;

#[cfg(test)]
mod tests;

pub use definitions::{create_table_settings_registry, TableOptions};
pub use descriptor::{SettingDescriptor, SettingError, SettingSetter, SettingType, SettingValue};
pub use registry::SettingsRegistry;
