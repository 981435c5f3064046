//! Canonical panel URIs.
//!
//! Exactly two shapes exist (plus an override):
//!
//! * `/settings/panel/<key>/<path>` when the viewer edits their own settings;
//! * `/settings/<user id>/panel/<key>/<path>` when acting on another account.

use crate::context::PanelContext;
use panelkit_domain::constants::{PANEL_SEGMENT, SETTINGS_ROOT};
use panelkit_kernel::uri::escape_path_component;

/// Builds the URI of panel `key` in `context`. Pure function of its inputs.
///
/// Leading slashes are stripped from `path`; an empty `path` leaves a trailing slash.
///
/// ```rust
/// use panelkit_domain::identity::Identity;
/// use panelkit_settings::context::PanelContext;
/// use panelkit_settings::uri::panel_uri;
///
/// let own = PanelContext::builder()
///     .user(Identity::new(5, "alice"))
///     .viewer(Identity::new(5, "alice"))
///     .build();
/// assert_eq!(panel_uri(&own, "example", ""), "/settings/panel/example/");
///
/// let other = PanelContext::builder()
///     .user(Identity::new(5, "alice"))
///     .viewer(Identity::new(9, "root"))
///     .build();
/// assert_eq!(panel_uri(&other, "example", "foo"), "/settings/5/panel/example/foo");
/// ```
#[must_use]
pub fn panel_uri(context: &PanelContext, key: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');

    if let Some(base) = context.override_uri() {
        return format!("{}/{path}", base.trim_end_matches('/'));
    }

    canonical_panel_uri(context, key, path)
}

/// Like [`panel_uri`] but ignores any override, always yielding one of the two settings shapes.
#[must_use]
pub fn canonical_panel_uri(context: &PanelContext, key: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');
    let key = escape_path_component(key);
    if context.is_acting_on_other_user() {
        format!("{SETTINGS_ROOT}/{}/{PANEL_SEGMENT}/{key}/{path}", context.user().id)
    } else {
        format!("{SETTINGS_ROOT}/{PANEL_SEGMENT}/{key}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelkit_domain::identity::Identity;

    fn own() -> PanelContext {
        PanelContext::builder().user(Identity::new(5, "a")).viewer(Identity::new(5, "a")).build()
    }

    #[test]
    fn leading_slashes_are_stripped() {
        assert_eq!(panel_uri(&own(), "display", "//saved"), "/settings/panel/display/saved");
    }

    #[test]
    fn keys_are_escaped() {
        assert_eq!(panel_uri(&own(), "odd key", ""), "/settings/panel/odd%20key/");
    }

    #[test]
    fn override_wins_regardless_of_identities() {
        let ctx = PanelContext::builder()
            .user(Identity::new(5, "a"))
            .viewer(Identity::new(9, "b"))
            .override_uri("/custom/")
            .build();
        assert_eq!(panel_uri(&ctx, "example", "x"), "/custom/x");
        assert_eq!(panel_uri(&ctx, "example", ""), "/custom/");
        assert_eq!(canonical_panel_uri(&ctx, "example", "x"), "/settings/5/panel/example/x");
    }
}
