use panelkit_domain::identity::{Identity, UserId};
use panelkit_domain::value::SettingValue;
use panelkit_settings::SettingsError;
use panelkit_settings::editor::{
    CatalogEditor, EditorOptions, PreferenceEditor, PreferenceTransaction,
};
use panelkit_settings::preferences::{MemoryPreferencesStore, Preferences, PreferencesStore};
use panelkit_settings::setting::{SettingCatalog, SettingDefinition, SettingKind};
use std::sync::Arc;

fn catalog() -> SettingCatalog {
    SettingCatalog::new()
        .define(
            SettingDefinition::new("email", "Email", SettingKind::Text { max_len: 32 }, "")
                .required(),
        )
        .and_then(|c| {
            c.define(SettingDefinition::new(
                "week-start",
                "Week Starts On",
                SettingKind::Integer { min: 0, max: 6 },
                0_i64,
            ))
        })
        .and_then(|c| {
            c.define(SettingDefinition::new("beta", "Beta", SettingKind::Boolean, false))
        })
        .expect("catalog")
}

fn fixture() -> (CatalogEditor, Arc<MemoryPreferencesStore>, Identity) {
    let store = Arc::new(MemoryPreferencesStore::new());
    (CatalogEditor::new(Arc::new(catalog()), store.clone()), store, Identity::new(3, "carol"))
}

#[test]
fn strict_options_report_no_effect() {
    let (editor, _, carol) = fixture();
    let mut prefs = Preferences::empty(UserId(3));

    let err = editor
        .apply(
            &carol,
            &mut prefs,
            vec![PreferenceTransaction::set("week-start", 0_i64)],
            EditorOptions { continue_on_no_effect: false, continue_on_missing_fields: true },
        )
        .expect_err("default value is already in effect");
    assert!(matches!(err, SettingsError::NoEffect { .. }), "{err}");
}

#[test]
fn missing_required_settings_fail_unless_allowed() {
    let (editor, store, carol) = fixture();
    let mut prefs = Preferences::empty(UserId(3));
    let txns = || vec![PreferenceTransaction::set("beta", true)];

    let err = editor
        .apply(&carol, &mut prefs, txns(), EditorOptions::default())
        .expect_err("email is required");
    assert!(matches!(err, SettingsError::MissingFields { .. }), "{err}");
    assert!(err.to_string().contains("email"));
    assert_eq!(store.len(), 0);

    let applied = editor.apply(&carol, &mut prefs, txns(), EditorOptions::lenient()).expect("ok");
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].old, SettingValue::Bool(false));
    assert_eq!(applied[0].new, SettingValue::Bool(true));

    let strict = editor
        .apply(
            &carol,
            &mut prefs,
            vec![PreferenceTransaction::set("email", "carol@example.com")],
            EditorOptions::default(),
        )
        .expect("supplying the required value satisfies the check");
    assert_eq!(strict.len(), 1);
    assert_eq!(prefs.version(), 2);
}

#[test]
fn a_rejected_transaction_discards_the_whole_batch() {
    let (editor, store, carol) = fixture();
    let mut prefs = Preferences::empty(UserId(3));

    let err = editor
        .apply(
            &carol,
            &mut prefs,
            vec![
                PreferenceTransaction::set("beta", true),
                PreferenceTransaction::set("week-start", 12_i64),
            ],
            EditorOptions::lenient(),
        )
        .expect_err("week-start out of range");
    assert!(matches!(err, SettingsError::Validation { .. }));
    assert_eq!(prefs, Preferences::empty(UserId(3)));
    assert!(store.load(&carol).expect("load").get("beta").is_none());
}

#[test]
fn unknown_and_mistyped_settings_are_rejected() {
    let (editor, _, carol) = fixture();
    let mut prefs = Preferences::empty(UserId(3));

    for txn in [
        PreferenceTransaction::set("nope", true),
        PreferenceTransaction::set("beta", "yes"),
        PreferenceTransaction::set("email", "a-very-long-address-that-exceeds@example.com"),
    ] {
        let err = editor
            .apply(&carol, &mut prefs, vec![txn], EditorOptions::lenient())
            .expect_err("invalid");
        assert!(matches!(err, SettingsError::Validation { .. }), "{err}");
    }
}

#[test]
fn null_resets_to_the_default() {
    let (editor, store, carol) = fixture();
    let mut prefs = Preferences::empty(UserId(3));

    editor
        .apply(
            &carol,
            &mut prefs,
            vec![PreferenceTransaction::set("week-start", 3_i64)],
            EditorOptions::lenient(),
        )
        .expect("set");
    let applied = editor
        .apply(
            &carol,
            &mut prefs,
            vec![PreferenceTransaction::set("week-start", SettingValue::Null)],
            EditorOptions::lenient(),
        )
        .expect("reset");

    assert_eq!(applied[0].new, SettingValue::Integer(0));
    assert!(prefs.get("week-start").is_none());
    assert_eq!(store.load(&carol).expect("load"), prefs);
}
