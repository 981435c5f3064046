//! The grouped settings menu shown next to a panel.

use crate::context::PanelContext;
use crate::registry::PanelRegistry;
use crate::uri::canonical_panel_uri;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavigationItem {
    Label { name: String },
    Link { key: String, name: String, uri: String, selected: bool },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Navigation {
    items: Vec<NavigationItem>,
}

impl Navigation {
    /// One label per non-empty group followed by a link per displayed panel. Links point at
    /// the same account as `context`; an override URI in `context` is not applied to them.
    /// When acting on another account only administrator-editable panels are linked.
    #[must_use]
    pub fn build(registry: &PanelRegistry, context: &PanelContext, selected: Option<&str>) -> Self {
        let mut items = Vec::new();

        let other_account = context.is_acting_on_other_user();

        for entry in registry.all_panel_groups_with_panels() {
            let panels: Vec<_> = entry
                .panels
                .into_iter()
                .filter(|panel| !other_account || panel.is_editable_by_administrators())
                .collect();
            if panels.is_empty() {
                continue;
            }

            items.push(NavigationItem::Label { name: entry.group.name().to_owned() });
            items.extend(panels.into_iter().map(|panel| NavigationItem::Link {
                key: panel.key().to_owned(),
                name: panel.name().to_owned(),
                uri: canonical_panel_uri(context, panel.key(), ""),
                selected: selected == Some(panel.key()),
            }));
        }

        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[NavigationItem] {
        &self.items
    }

    /// Keys of the linked panels, in menu order.
    pub fn panel_keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            NavigationItem::Link { key, .. } => Some(key.as_str()),
            NavigationItem::Label { .. } => None,
        })
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.items.iter().find_map(|item| match item {
            NavigationItem::Link { key, selected: true, .. } => Some(key.as_str()),
            _ => None,
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::builtin;
    use panelkit_domain::config::PanelkitConfig;
    use panelkit_domain::identity::Identity;

    #[test]
    fn labels_precede_their_panels() {
        let registry = builtin::registry(&PanelkitConfig::default()).expect("registry");
        let context = PanelContext::builder()
            .user(Identity::new(5, "alice"))
            .viewer(Identity::new(1, "root").administrator())
            .override_uri("/elsewhere/")
            .build();

        let navigation = Navigation::build(&registry, &context, Some("display"));
        let first = &navigation.items()[0];
        assert!(matches!(first, NavigationItem::Label { name } if name == "Account"), "{first:?}");
        assert_eq!(navigation.selected(), Some("display"));

        let display = navigation
            .items()
            .iter()
            .find_map(|item| match item {
                NavigationItem::Link { key, uri, .. } if key == "display" => Some(uri.as_str()),
                _ => None,
            })
            .expect("display link");
        assert_eq!(display, "/settings/5/panel/display/");

        let linked: Vec<&str> = navigation.panel_keys().collect();
        assert_eq!(linked, ["account", "date-time", "display"]);
    }

    #[test]
    fn own_account_links_every_displayed_panel() {
        let registry = builtin::registry(&PanelkitConfig::default()).expect("registry");
        let alice = Identity::new(5, "alice");
        let context = PanelContext::builder().user(alice.clone()).viewer(alice).build();

        let navigation = Navigation::build(&registry, &context, None);
        let linked: Vec<&str> = navigation.panel_keys().collect();
        assert_eq!(linked, ["account", "language", "date-time", "display"]);
    }

    #[test]
    fn empty_registry_builds_an_empty_menu() {
        let registry = PanelRegistry::builder().build().expect("empty registry");
        let alice = Identity::new(5, "alice");
        let context = PanelContext::builder().user(alice.clone()).viewer(alice).build();
        let navigation = Navigation::build(&registry, &context, None);
        assert!(navigation.is_empty());
        assert_eq!(navigation.selected(), None);
    }
}
