//! Per-user preference objects and the store seam.

use crate::error::SettingsError;
use fxhash::FxHashMap;
use panelkit_domain::identity::{Identity, UserId};
use panelkit_domain::value::SettingValue;
use panelkit_kernel::security::policy::PolicyObject;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Debug;
use tracing::{instrument, trace};

/// One account's stored preferences. Owned by that account for policy purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    user_id: UserId,
    values: BTreeMap<String, SettingValue>,
    /// Incremented by every applied edit.
    version: u64,
}

impl Preferences {
    #[must_use]
    pub const fn empty(user_id: UserId) -> Self {
        Self { user_id, values: BTreeMap::new(), version: 0 }
    }

    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Stored value, if any. `Null` is never stored.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Stores `value`, or clears the key when `value` is `Null`.
    pub(crate) fn put(&mut self, key: &str, value: SettingValue) {
        if value.is_null() {
            self.values.remove(key);
        } else {
            self.values.insert(key.to_owned(), value);
        }
    }

    pub(crate) const fn bump_version(&mut self) {
        self.version += 1;
    }
}

impl PolicyObject for Preferences {
    fn policy_owner(&self) -> UserId {
        self.user_id
    }

    fn policy_label(&self) -> Cow<'static, str> {
        Cow::Borrowed("preferences")
    }
}

/// Loads and persists preferences, keyed by user.
pub trait PreferencesStore: Debug + Send + Sync {
    /// Loads `user`'s preferences. Accounts without stored preferences get an empty object.
    ///
    /// # Errors
    /// Returns an error if the backing storage fails.
    fn load(&self, user: &Identity) -> Result<Preferences, SettingsError>;

    /// Persists `preferences`, replacing the stored copy.
    ///
    /// # Errors
    /// Returns [`SettingsError::Internal`] unless `preferences` is newer than the stored copy.
    fn save(&self, preferences: &Preferences) -> Result<(), SettingsError>;
}

/// Process-local store for development, tests and the CLI.
#[derive(Debug, Default)]
pub struct MemoryPreferencesStore {
    entries: RwLock<FxHashMap<UserId, Preferences>>,
}

impl MemoryPreferencesStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a store from previously exported preferences. Later duplicates win.
    #[must_use]
    pub fn from_snapshot(snapshot: impl IntoIterator<Item = Preferences>) -> Self {
        let entries = snapshot.into_iter().map(|p| (p.user_id, p)).collect();
        Self { entries: RwLock::new(entries) }
    }

    /// Every stored object, ordered by user id.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Preferences> {
        let mut all: Vec<Preferences> = self.entries.read().values().cloned().collect();
        all.sort_by_key(Preferences::user_id);
        all
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }
}

impl PreferencesStore for MemoryPreferencesStore {
    #[instrument(level = "trace", skip(self, user), fields(user_id = %user.id))]
    fn load(&self, user: &Identity) -> Result<Preferences, SettingsError> {
        let found = self.entries.read().get(&user.id).cloned();
        trace!(found = found.is_some(), "Preferences lookup");
        Ok(found.unwrap_or_else(|| Preferences::empty(user.id)))
    }

    #[instrument(
        level = "trace",
        skip(self, preferences),
        fields(user_id = %preferences.user_id)
    )]
    fn save(&self, preferences: &Preferences) -> Result<(), SettingsError> {
        let mut entries = self.entries.write();
        if let Some(stored) = entries.get(&preferences.user_id)
            && stored.version >= preferences.version
        {
            return Err(SettingsError::Internal {
                message: format!(
                    "stale write: stored version {} is not older than {}",
                    stored.version, preferences.version
                )
                .into(),
                context: Some("Saving preferences".into()),
            });
        }
        entries.insert(preferences.user_id, preferences.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_users_get_empty_preferences() {
        let store = MemoryPreferencesStore::new();
        let prefs = store.load(&Identity::new(7, "nobody")).expect("load");
        assert_eq!(prefs, Preferences::empty(UserId(7)));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn null_clears_a_stored_value() {
        let mut prefs = Preferences::empty(UserId(1));
        prefs.put("timezone", "UTC".into());
        assert_eq!(prefs.get("timezone"), Some(&SettingValue::from("UTC")));
        prefs.put("timezone", SettingValue::Null);
        assert!(prefs.get("timezone").is_none());
    }

    #[test]
    fn snapshots_round_trip_through_a_new_store() {
        let store = MemoryPreferencesStore::new();
        let mut prefs = Preferences::empty(UserId(2));
        prefs.put("translation", "uk".into());
        store.save(&prefs).expect("save");
        store.save(&Preferences::empty(UserId(1))).expect("save");

        let snapshot = store.snapshot();
        let ids: Vec<UserId> = snapshot.iter().map(Preferences::user_id).collect();
        assert_eq!(ids, [UserId(1), UserId(2)]);

        let restored = MemoryPreferencesStore::from_snapshot(snapshot);
        assert_eq!(restored.load(&Identity::new(2, "b")).expect("load"), prefs);
    }

    #[test]
    fn stale_saves_are_rejected() {
        let store = MemoryPreferencesStore::new();
        let mut newer = Preferences::empty(UserId(1));
        newer.bump_version();
        newer.bump_version();
        store.save(&newer).expect("first save");

        let older = Preferences::empty(UserId(1));
        assert!(store.save(&older).is_err());
        assert!(store.save(&newer).is_err(), "same version twice");
    }

    #[test]
    fn concurrent_edits_from_the_same_version_do_not_overwrite() {
        use crate::editor::{CatalogEditor, EditorOptions, PreferenceEditor};
        use crate::editor::PreferenceTransaction as Txn;
        use crate::panels::builtin;
        use std::sync::Arc;

        let store = Arc::new(MemoryPreferencesStore::new());
        let catalog = Arc::new(builtin::catalog().expect("catalog"));
        let editor = CatalogEditor::new(catalog, store.clone());
        let alice = Identity::new(5, "alice");
        let options = EditorOptions::lenient();

        let mut first = store.load(&alice).expect("load");
        let mut second = store.load(&alice).expect("load");

        editor
            .apply(&alice, &mut first, vec![Txn::set("timezone", "Asia/Tokyo")], options)
            .expect("first edit");
        let err = editor
            .apply(&alice, &mut second, vec![Txn::set("translation", "uk")], options)
            .expect_err("second edit started from a stale copy");
        assert!(err.to_string().contains("stale write"), "{err}");
        assert_eq!(second.version(), 0, "rejected edit leaves the caller's copy untouched");

        let stored = store.load(&alice).expect("load");
        assert_eq!(stored.version(), 1);
        assert_eq!(stored.get("timezone"), Some(&SettingValue::from("Asia/Tokyo")));
        assert!(stored.get("translation").is_none());
    }
}
