//! Setting definitions and the catalog the editor validates against.

use crate::error::SettingsError;
use fxhash::FxHashMap;
use panelkit_domain::value::SettingValue;
use std::borrow::Cow;

/// Shape and constraints of a setting value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingKind {
    Boolean,
    Integer { min: i64, max: i64 },
    Choice { options: Vec<Cow<'static, str>> },
    Text { max_len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingDefinition {
    pub key: Cow<'static, str>,
    pub label: Cow<'static, str>,
    pub kind: SettingKind,
    pub default: SettingValue,
    pub required: bool,
}

impl SettingDefinition {
    pub fn new(
        key: impl Into<Cow<'static, str>>,
        label: impl Into<Cow<'static, str>>,
        kind: SettingKind,
        default: impl Into<SettingValue>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            default: default.into(),
            required: false,
        }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Options offered to a form, empty for non-choice settings.
    #[must_use]
    pub fn options(&self) -> Vec<String> {
        match &self.kind {
            SettingKind::Choice { options } => options.iter().map(ToString::to_string).collect(),
            _ => Vec::new(),
        }
    }

    /// Checks `value` against this definition. `Null` resets to the default and is always valid
    /// for optional settings.
    ///
    /// # Errors
    /// Returns [`SettingsError::Validation`] describing the first violated constraint.
    pub fn validate(&self, value: &SettingValue) -> Result<(), SettingsError> {
        match (&self.kind, value) {
            (_, SettingValue::Null) if !self.required => Ok(()),
            (SettingKind::Boolean, SettingValue::Bool(_)) => Ok(()),
            (SettingKind::Integer { min, max }, SettingValue::Integer(i)) => {
                if (*min..=*max).contains(i) {
                    Ok(())
                } else {
                    Err(SettingsError::validation(format!(
                        "'{}' must be between {min} and {max}, got {i}",
                        self.key
                    )))
                }
            },
            (SettingKind::Choice { options }, SettingValue::Text(s)) => {
                if options.iter().any(|o| o == s) {
                    Ok(())
                } else {
                    Err(SettingsError::validation(format!(
                        "'{s}' is not a valid choice for '{}'",
                        self.key
                    )))
                }
            },
            (SettingKind::Text { max_len }, SettingValue::Text(s)) => {
                if s.chars().count() <= *max_len {
                    Ok(())
                } else {
                    Err(SettingsError::validation(format!(
                        "'{}' is limited to {max_len} characters",
                        self.key
                    )))
                }
            },
            (kind, value) => Err(SettingsError::validation(format!(
                "'{}' does not accept a {} value ({kind:?})",
                self.key,
                value.kind()
            ))),
        }
    }

    /// Converts a raw form value into a typed value for this setting.
    ///
    /// Empty input maps to `Null` (reset to default).
    ///
    /// # Errors
    /// Returns [`SettingsError::Validation`] when the text cannot be read as the setting's type.
    pub fn parse_form_value(&self, raw: &str) -> Result<SettingValue, SettingsError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(SettingValue::Null);
        }

        match &self.kind {
            SettingKind::Boolean => match raw {
                "1" | "true" | "on" | "yes" => Ok(SettingValue::Bool(true)),
                "0" | "false" | "off" | "no" => Ok(SettingValue::Bool(false)),
                _ => Err(SettingsError::validation(format!(
                    "'{raw}' is not a boolean for '{}'",
                    self.key
                ))),
            },
            SettingKind::Integer { .. } => raw.parse::<i64>().map(SettingValue::Integer).map_err(
                |e| SettingsError::validation(format!("'{raw}' for '{}': {e}", self.key)),
            ),
            SettingKind::Choice { .. } | SettingKind::Text { .. } => {
                Ok(SettingValue::Text(raw.to_owned()))
            },
        }
    }
}

/// All known settings, keyed by setting key.
#[derive(Debug, Clone, Default)]
pub struct SettingCatalog {
    definitions: FxHashMap<String, SettingDefinition>,
}

impl SettingCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition.
    ///
    /// # Errors
    /// Returns [`SettingsError::Config`] if the key is already defined or the default is invalid.
    pub fn define(mut self, definition: SettingDefinition) -> Result<Self, SettingsError> {
        if self.definitions.contains_key(&*definition.key) {
            return Err(SettingsError::config(format!(
                "setting '{}' is defined twice",
                definition.key
            )));
        }
        definition.validate(&definition.default).map_err(|e| {
            SettingsError::config(format!("default of '{}' is invalid: {e}", definition.key))
        })?;

        self.definitions.insert(definition.key.to_string(), definition);
        Ok(self)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SettingDefinition> {
        self.definitions.get(key)
    }

    /// Looks up a definition, failing for unknown keys.
    ///
    /// # Errors
    /// Returns [`SettingsError::Validation`] when `key` is not in the catalog.
    pub fn require(&self, key: &str) -> Result<&SettingDefinition, SettingsError> {
        self.get(key).ok_or_else(|| SettingsError::validation(format!("unknown setting '{key}'")))
    }

    pub fn required_keys(&self) -> impl Iterator<Item = &str> {
        self.definitions.values().filter(|d| d.required).map(|d| &*d.key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }
}
