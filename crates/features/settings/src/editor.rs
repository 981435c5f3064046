//! Transactional preference edits.

use crate::error::SettingsError;
use crate::preferences::{Preferences, PreferencesStore};
use crate::setting::SettingCatalog;
use panelkit_domain::identity::Identity;
use panelkit_domain::value::SettingValue;
use serde::Serialize;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// A proposed change of one setting. `Null` resets the setting to its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceTransaction {
    pub setting_key: String,
    pub value: SettingValue,
}

impl PreferenceTransaction {
    pub fn set(setting_key: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        Self { setting_key: setting_key.into(), value: value.into() }
    }
}

/// How strictly the editor treats transactions that change nothing or leave gaps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorOptions {
    /// Skip transactions whose value equals the current one instead of failing.
    pub continue_on_no_effect: bool,
    /// Do not fail when required settings are neither stored nor supplied.
    pub continue_on_missing_fields: bool,
}

impl EditorOptions {
    /// Options used for single-setting writes from panels.
    #[must_use]
    pub const fn lenient() -> Self {
        Self { continue_on_no_effect: true, continue_on_missing_fields: true }
    }
}

/// One change the editor actually applied. Values are effective values (defaults resolved).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedChange {
    pub setting_key: String,
    pub old: SettingValue,
    pub new: SettingValue,
}

pub trait PreferenceEditor: Debug + Send + Sync {
    /// Applies `transactions` to `preferences` on behalf of `actor`, all or nothing.
    ///
    /// On success `preferences` reflects the persisted state.
    ///
    /// # Errors
    /// Validation, no-effect and missing-field errors as configured by `options`, or
    /// storage errors from persisting the result.
    fn apply(
        &self,
        actor: &Identity,
        preferences: &mut Preferences,
        transactions: Vec<PreferenceTransaction>,
        options: EditorOptions,
    ) -> Result<Vec<AppliedChange>, SettingsError>;
}

/// Validates against a [`SettingCatalog`] and persists through a [`PreferencesStore`].
#[derive(Debug, Clone)]
pub struct CatalogEditor {
    catalog: Arc<SettingCatalog>,
    store: Arc<dyn PreferencesStore>,
}

impl CatalogEditor {
    pub fn new(catalog: Arc<SettingCatalog>, store: Arc<dyn PreferencesStore>) -> Self {
        Self { catalog, store }
    }

    fn effective(&self, preferences: &Preferences, key: &str) -> SettingValue {
        preferences
            .get(key)
            .cloned()
            .or_else(|| self.catalog.get(key).map(|d| d.default.clone()))
            .unwrap_or_default()
    }
}

impl PreferenceEditor for CatalogEditor {
    #[instrument(
        skip(self, actor, preferences, transactions),
        fields(actor = %actor.id, user_id = %preferences.user_id(), count = transactions.len())
    )]
    fn apply(
        &self,
        actor: &Identity,
        preferences: &mut Preferences,
        transactions: Vec<PreferenceTransaction>,
        options: EditorOptions,
    ) -> Result<Vec<AppliedChange>, SettingsError> {
        let mut working = preferences.clone();
        let mut applied = Vec::with_capacity(transactions.len());

        for txn in transactions {
            let definition = self.catalog.require(&txn.setting_key)?;
            definition.validate(&txn.value)?;

            let old = self.effective(&working, &txn.setting_key);
            let new =
                if txn.value.is_null() { definition.default.clone() } else { txn.value.clone() };

            if old == new {
                if !options.continue_on_no_effect {
                    return Err(SettingsError::NoEffect {
                        message: format!("'{}' is already '{old}'", txn.setting_key).into(),
                        context: None,
                    });
                }
                debug!(setting = %txn.setting_key, "Skipping transaction without effect");
                continue;
            }

            working.put(&txn.setting_key, txn.value);
            applied.push(AppliedChange { setting_key: txn.setting_key, old, new });
        }

        let mut missing: Vec<&str> =
            self.catalog.required_keys().filter(|key| working.get(key).is_none()).collect();
        if !missing.is_empty() && !options.continue_on_missing_fields {
            missing.sort_unstable();
            return Err(SettingsError::MissingFields {
                message: missing.join(", ").into(),
                context: None,
            });
        }

        if applied.is_empty() {
            return Ok(applied);
        }

        working.bump_version();
        self.store.save(&working)?;
        *preferences = working;

        info!(
            version = preferences.version(),
            settings = ?applied.iter().map(|c| c.setting_key.as_str()).collect::<Vec<_>>(),
            "Preferences updated"
        );

        Ok(applied)
    }
}
