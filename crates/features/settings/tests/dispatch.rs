use panelkit_domain::config::PanelkitConfig;
use panelkit_domain::identity::{Identity, UserId};
use panelkit_domain::value::SettingValue;
use panelkit_settings::SettingsError;
use panelkit_settings::dispatch::{Dispatcher, MemoryUserDirectory, PanelRoute};
use panelkit_settings::navigation::NavigationItem;
use panelkit_settings::panels::builtin;
use panelkit_settings::preferences::{MemoryPreferencesStore, PreferencesStore};
use panelkit_settings::registry::PanelRegistry;
use panelkit_settings::request::{Method, PanelFragment, PanelResponse};
use std::collections::BTreeMap;
use std::sync::Arc;

struct Harness {
    registry: PanelRegistry,
    store: Arc<MemoryPreferencesStore>,
    directory: Arc<MemoryUserDirectory>,
    config: PanelkitConfig,
}

impl Harness {
    fn new() -> Self {
        let config = PanelkitConfig::default();
        Self {
            registry: builtin::registry(&config).expect("builtin registry"),
            store: Arc::new(MemoryPreferencesStore::new()),
            directory: Arc::new(MemoryUserDirectory::new().with_user(alice()).with_user(root())),
            config,
        }
    }

    fn dispatcher(&self) -> Dispatcher<'_> {
        let services = builtin::services(&self.config, self.store.clone()).expect("services");
        Dispatcher::new(&self.registry, self.directory.clone(), services)
    }

    fn get(&self, viewer: &Identity, uri: &str) -> Result<PanelResponse, SettingsError> {
        self.dispatcher().dispatch(viewer, Method::Get, uri, BTreeMap::new())
    }

    fn post(
        &self,
        viewer: &Identity,
        uri: &str,
        params: &[(&str, &str)],
    ) -> Result<PanelResponse, SettingsError> {
        let params = params.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        self.dispatcher().dispatch(viewer, Method::Post, uri, params)
    }
}

fn alice() -> Identity {
    Identity::new(5, "alice")
}

fn bob() -> Identity {
    Identity::new(9, "bob")
}

fn root() -> Identity {
    Identity::new(1, "root").administrator()
}

fn fragment(response: PanelResponse) -> PanelFragment {
    match response {
        PanelResponse::Content(fragment) => fragment,
        PanelResponse::Redirect { uri } => panic!("expected content, got redirect to {uri}"),
    }
}

#[test]
fn routes_parse_both_shapes() {
    let own = PanelRoute::parse("/settings/panel/display/").expect("own shape");
    assert_eq!(own, PanelRoute { user_id: None, key: "display".into(), path: String::new() });

    let other = PanelRoute::parse("/settings/42/panel/date-time/saved?x=1").expect("user shape");
    assert_eq!(other.user_id, Some(UserId(42)));
    assert_eq!(other.key, "date-time");
    assert_eq!(other.path, "saved");

    let escaped = PanelRoute::parse("/settings/panel/odd%20key").expect("escaped key");
    assert_eq!(escaped.key, "odd key");
}

#[test]
fn routes_reject_other_paths() {
    for uri in [
        "/settings/",
        "/settings/panel/",
        "/settings/panel//",
        "/settings/abc/panel/display/",
        "/settings/5/display/",
        "/prefs/panel/display/",
        "/settingsx/panel/display/",
        "/settings/panel/bad%zz/",
    ] {
        assert!(PanelRoute::parse(uri).is_none(), "{uri} should not parse");
    }
}

#[test]
fn get_renders_defaults_with_navigation() {
    let harness = Harness::new();
    let page = fragment(harness.get(&alice(), "/settings/panel/date-time/").expect("render"));

    assert_eq!(page.title, "Date and Time");
    assert_eq!(page.action, "/settings/panel/date-time/");
    assert!(page.notice.is_none());

    let timezone = page.field("timezone").expect("timezone field");
    assert_eq!(timezone.value, SettingValue::from("UTC"));
    assert!(timezone.is_default);
    assert!(timezone.options.contains(&"Europe/Kyiv".to_owned()));

    let navigation = page.navigation.expect("navigation attached");
    let linked: Vec<&str> = navigation.panel_keys().collect();
    assert_eq!(linked, ["account", "language", "date-time", "display"]);
    assert_eq!(navigation.selected(), Some("date-time"));
}

#[test]
fn post_saves_and_redirects() {
    let harness = Harness::new();
    let response = harness
        .post(&alice(), "/settings/panel/date-time/", &[
            ("timezone", "Europe/Kyiv"),
            ("week-start", "1"),
            ("unrelated", "ignored"),
        ])
        .expect("submit");
    assert_eq!(response.redirect_uri(), Some("/settings/panel/date-time/saved"));

    let stored = harness.store.load(&alice()).expect("load");
    assert_eq!(stored.get("timezone"), Some(&SettingValue::from("Europe/Kyiv")));
    assert_eq!(stored.get("week-start"), Some(&SettingValue::Integer(1)));
    assert!(stored.get("unrelated").is_none());

    let page = fragment(harness.get(&alice(), "/settings/panel/date-time/saved").expect("render"));
    assert!(page.notice.is_some());
    let timezone = page.field("timezone").expect("timezone field");
    assert_eq!(timezone.value, SettingValue::from("Europe/Kyiv"));
    assert!(!timezone.is_default);
}

#[test]
fn administrators_edit_shared_panels_of_other_users() {
    let harness = Harness::new();
    let response = harness
        .post(&root(), "/settings/5/panel/date-time/", &[("time-format", "24h")])
        .expect("admin submit");
    assert_eq!(response.redirect_uri(), Some("/settings/5/panel/date-time/saved"));

    let stored = harness.store.load(&alice()).expect("load");
    assert_eq!(stored.get("time-format"), Some(&SettingValue::from("24h")));
    assert!(harness.store.load(&root()).expect("load").get("time-format").is_none());

    let page = fragment(harness.get(&root(), "/settings/5/panel/display/").expect("admin view"));
    let links: Vec<&str> = page
        .navigation
        .as_ref()
        .expect("navigation")
        .items()
        .iter()
        .filter_map(|item| match item {
            NavigationItem::Link { uri, .. } => Some(uri.as_str()),
            NavigationItem::Label { .. } => None,
        })
        .collect();
    assert!(links.contains(&"/settings/5/panel/account/"), "{links:?}");
}

#[test]
fn personal_panels_are_denied_across_accounts() {
    let harness = Harness::new();
    let err = harness.get(&root(), "/settings/5/panel/language/").expect_err("personal panel");
    assert!(err.is_access_denied(), "{err}");
}

#[test]
fn non_administrators_cannot_open_other_accounts() {
    let harness = Harness::new();
    let err = harness.get(&bob(), "/settings/5/panel/date-time/").expect_err("bob is no admin");
    assert!(err.is_access_denied(), "{err}");

    let err = harness
        .post(&bob(), "/settings/5/panel/date-time/", &[("timezone", "UTC")])
        .expect_err("bob is no admin");
    assert!(err.is_access_denied(), "{err}");
}

#[test]
fn unknown_targets_are_not_found() {
    let harness = Harness::new();
    for uri in [
        "/settings/panel/missing/",
        "/settings/77/panel/display/",
        "/settings/panel/developer/",
        "/elsewhere/",
    ] {
        let err = harness.get(&alice(), uri).expect_err(uri);
        assert!(matches!(err, SettingsError::NotFound { .. }), "{uri}: {err}");
    }
}

#[test]
fn explicit_own_id_uses_the_viewer() {
    let harness = Harness::new();
    let stranger = Identity::new(300, "stranger");
    let page = fragment(harness.get(&stranger, "/settings/300/panel/display/").expect("own"));
    assert_eq!(page.action, "/settings/panel/display/");
}

#[test]
fn rejected_values_are_not_stored() {
    let harness = Harness::new();
    let err = harness
        .post(&alice(), "/settings/panel/date-time/", &[
            ("timezone", "Europe/London"),
            ("week-start", "9"),
        ])
        .expect_err("week-start out of range");
    assert!(matches!(err, SettingsError::Validation { .. }), "{err}");

    let stored = harness.store.load(&alice()).expect("load");
    assert!(stored.get("week-start").is_none());
}
