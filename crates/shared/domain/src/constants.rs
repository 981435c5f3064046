//! Stable strings shared by the URI surface, configuration and built-in panels.

/// Root of every settings URI.
pub const SETTINGS_ROOT: &str = "/settings";
/// Path segment introducing the panel key.
pub const PANEL_SEGMENT: &str = "panel";

/// Environment prefix for configuration overrides (`PANELKIT__POLICY__...`).
pub const ENV_PREFIX: &str = "PANELKIT";

pub const GROUP_ACCOUNT: &str = "account";
pub const GROUP_PREFERENCES: &str = "preferences";
pub const GROUP_DEVELOPER: &str = "developer";
