//! Settings registry
//! Resolves option names and applies parsed values through descriptors

use super::descriptor::{SettingDescriptor, SettingError, SettingType, SettingValue};

/// Registry over a static table of descriptors for target type `T`
pub struct SettingsRegistry<T: 'static> {
    settings: &'static [SettingDescriptor<T>],
}

// Manual impls: the registry is a slice reference whatever `T` is.
impl<T: 'static> Clone for SettingsRegistry<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for SettingsRegistry<T> {}

impl<T: 'static> SettingsRegistry<T> {
    #[must_use]
    pub const fn new(descriptors: &'static [SettingDescriptor<T>]) -> Self {
        SettingsRegistry {
            settings: descriptors,
        }
    }

    /// Canonical names of all registered settings
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.settings.iter().map(|d| d.name)
    }

    /// Resolve an option name.
    ///
    /// Exact names and aliases win; otherwise a prefix must match exactly one
    /// canonical name.
    pub fn resolve(&self, name: &str) -> Result<&'static SettingDescriptor<T>, SettingError> {
        let settings: &'static [SettingDescriptor<T>] = self.settings;

        if let Some(desc) = settings
            .iter()
            .find(|d| d.name == name || d.aliases.contains(&name))
        {
            return Ok(desc);
        }

        let matches: Vec<&'static SettingDescriptor<T>> = if name.is_empty() {
            Vec::new()
        } else {
            settings.iter().filter(|d| d.name.starts_with(name)).collect()
        };

        match matches.as_slice() {
            [desc] => Ok(*desc),
            [] => Err(SettingError::UnknownOption(name.to_string())),
            many => Err(SettingError::Ambiguous {
                prefix: name.to_string(),
                matches: many.iter().map(|d| d.name).collect(),
            }),
        }
    }

    /// Parse string value to `SettingValue` using `SettingType`
    pub(crate) fn parse_value(ty: &SettingType, value: &str) -> Result<SettingValue, SettingError> {
        match ty {
            SettingType::Boolean => match value.to_lowercase().as_str() {
                "true" | "1" | "on" | "yes" => Ok(SettingValue::Bool(true)),
                "false" | "0" | "off" | "no" => Ok(SettingValue::Bool(false)),
                _ => Err(SettingError::Parse(format!("Invalid boolean value: {value}"))),
            },
            SettingType::Integer { min, max } => {
                let val = value
                    .parse::<usize>()
                    .map_err(|_| SettingError::Parse(format!("Invalid integer value: {value}")))?;

                if let Some(min_val) = min {
                    if val < *min_val {
                        return Err(SettingError::Validation(format!(
                            "Value {val} is below minimum {min_val}"
                        )));
                    }
                }
                if let Some(max_val) = max {
                    if val > *max_val {
                        return Err(SettingError::Validation(format!(
                            "Value {val} is above maximum {max_val}"
                        )));
                    }
                }
                Ok(SettingValue::Integer(val))
            }
        }
    }

    /// Set option `name` on `target` from its string form
    pub fn apply(&self, target: &mut T, name: &str, value: &str) -> Result<(), SettingError> {
        let desc = self.resolve(name)?;
        let typed = Self::parse_value(&desc.ty, value)?;
        (desc.set)(target, typed)
    }

    /// Apply an assignment in `name=value` form.
    ///
    /// Boolean options also accept a bare `name` (on) and `noname` (off).
    pub fn apply_assignment(&self, target: &mut T, assignment: &str) -> Result<(), SettingError> {
        if let Some((name, value)) = assignment.split_once('=') {
            return self.apply(target, name.trim(), value.trim());
        }

        let name = assignment.trim();
        match self.resolve(name) {
            Ok(desc) if matches!(desc.ty, SettingType::Boolean) => {
                (desc.set)(target, SettingValue::Bool(true))
            }
            Ok(desc) => Err(SettingError::Parse(format!(
                "Option {} needs a value",
                desc.name
            ))),
            Err(err) => match name.strip_prefix("no") {
                Some(negated) => {
                    let desc = self.resolve(negated).map_err(|_| err)?;
                    if !matches!(desc.ty, SettingType::Boolean) {
                        return Err(SettingError::Parse(format!(
                            "Option {} is not a boolean",
                            desc.name
                        )));
                    }
                    (desc.set)(target, SettingValue::Bool(false))
                }
                None => Err(err),
            },
        }
    }
}
