//! The stock groups, settings and panels shipped with the slice.

use crate::error::SettingsError;
use crate::group::StaticGroup;
use crate::panel::SettingsPanel;
use crate::panels::form::FormPanel;
use crate::preferences::PreferencesStore;
use crate::registry::PanelRegistry;
use crate::services::PanelServices;
use crate::setting::{SettingCatalog, SettingDefinition, SettingKind};
use panelkit_domain::config::PanelkitConfig;
use panelkit_domain::constants::{GROUP_ACCOUNT, GROUP_DEVELOPER, GROUP_PREFERENCES};
use panelkit_kernel::security::policy::OwnerPolicy;
use std::sync::Arc;

pub const PANEL_ACCOUNT: &str = "account";
pub const PANEL_DATE_TIME: &str = "date-time";
pub const PANEL_DISPLAY: &str = "display";
pub const PANEL_LANGUAGE: &str = "language";
pub const PANEL_DEVELOPER: &str = "developer";

const TIMEZONES: [&str; 6] = [
    "UTC",
    "America/New_York",
    "America/Los_Angeles",
    "Europe/London",
    "Europe/Kyiv",
    "Asia/Tokyo",
];
const TRANSLATIONS: [&str; 5] = ["en", "de", "fr", "ja", "uk"];

fn choice(options: &[&'static str]) -> SettingKind {
    SettingKind::Choice { options: options.iter().map(|&o| o.into()).collect() }
}

/// Every setting the built-in panels edit.
///
/// # Errors
/// Returns [`SettingsError::Config`] if a definition is duplicated or has an invalid default.
pub fn catalog() -> Result<SettingCatalog, SettingsError> {
    SettingCatalog::new()
        .define(SettingDefinition::new(
            "real-name",
            "Real Name",
            SettingKind::Text { max_len: 128 },
            "",
        ))?
        .define(SettingDefinition::new(
            "pronoun",
            "Pronoun",
            choice(&["they", "she", "he"]),
            "they",
        ))?
        .define(SettingDefinition::new("timezone", "Timezone", choice(&TIMEZONES), "UTC"))?
        .define(SettingDefinition::new(
            "time-format",
            "Time Format",
            choice(&["12h", "24h"]),
            "12h",
        ))?
        .define(SettingDefinition::new(
            "week-start",
            "Week Starts On",
            SettingKind::Integer { min: 0, max: 6 },
            0_i64,
        ))?
        .define(SettingDefinition::new(
            "monospaced-font",
            "Monospaced Font",
            SettingKind::Text { max_len: 64 },
            "monospace",
        ))?
        .define(SettingDefinition::new(
            "title-style",
            "Page Titles",
            choice(&["glyph", "text"]),
            "glyph",
        ))?
        .define(SettingDefinition::new("translation", "Translation", choice(&TRANSLATIONS), "en"))?
        .define(SettingDefinition::new(
            "developer-console",
            "Developer Console",
            SettingKind::Boolean,
            false,
        ))?
        .define(SettingDefinition::new(
            "stack-traces",
            "Show Stack Traces",
            SettingKind::Boolean,
            false,
        ))
}

/// Built-in panels with their enabled flags resolved against `config`.
#[must_use]
pub fn panels(config: &PanelkitConfig) -> Vec<Arc<dyn SettingsPanel>> {
    let enabled = |key: &str| !config.panels.is_disabled(key);

    let panels = [
        FormPanel::new(PANEL_ACCOUNT, "Account", GROUP_ACCOUNT)
            .settings(["real-name", "pronoun"])
            .editable_by_administrators(true),
        FormPanel::new(PANEL_DATE_TIME, "Date and Time", GROUP_PREFERENCES)
            .settings(["timezone", "time-format", "week-start"])
            .editable_by_administrators(true),
        FormPanel::new(PANEL_DISPLAY, "Display Preferences", GROUP_PREFERENCES)
            .settings(["monospaced-font", "title-style"])
            .editable_by_administrators(true),
        FormPanel::new(PANEL_LANGUAGE, "Language", GROUP_ACCOUNT).settings(["translation"]),
        FormPanel::new(PANEL_DEVELOPER, "Developer Settings", GROUP_DEVELOPER)
            .settings(["developer-console", "stack-traces"]),
    ];

    panels
        .into_iter()
        .map(|panel| {
            let on = enabled(panel.key());
            Arc::new(panel.enabled(on)) as Arc<dyn SettingsPanel>
        })
        .collect()
}

#[must_use]
pub fn groups() -> [StaticGroup; 3] {
    [
        StaticGroup::new(GROUP_ACCOUNT, "Account", 0),
        StaticGroup::new(GROUP_PREFERENCES, "Preferences", 1),
        StaticGroup::new(GROUP_DEVELOPER, "Developer", 2),
    ]
}

/// Registry holding the built-in groups and panels.
///
/// # Errors
/// Propagates [`PanelRegistryBuilder::build`](crate::registry::PanelRegistryBuilder::build)
/// failures.
pub fn registry(config: &PanelkitConfig) -> Result<PanelRegistry, SettingsError> {
    groups()
        .into_iter()
        .fold(PanelRegistry::builder(), |builder, group| builder.group(group))
        .panels(panels(config))
        .build()
}

/// Services over `store` with the built-in catalog and the configured owner policy.
///
/// # Errors
/// Propagates [`catalog`] failures.
pub fn services(
    config: &PanelkitConfig,
    store: Arc<dyn PreferencesStore>,
) -> Result<PanelServices, SettingsError> {
    let policy = Arc::new(OwnerPolicy::new(config.policy.administrators_can_edit));
    Ok(PanelServices::new(store, policy, Arc::new(catalog()?)))
}
