//! A panel bound to one request.

use crate::context::PanelContext;
use crate::editor::{AppliedChange, EditorOptions, PreferenceEditor, PreferenceTransaction};
use crate::error::{SettingsError, SettingsErrorExt};
use crate::panel::SettingsPanel;
use crate::preferences::{Preferences, PreferencesStore};
use crate::request::{PanelRequest, PanelResponse};
use crate::services::PanelServices;
use crate::uri::panel_uri;
use panelkit_domain::capability::Capability;
use panelkit_domain::value::SettingValue;
use panelkit_kernel::security::policy::{PolicyChecker, PolicyError, require_capability};
use std::sync::Arc;
use tracing::debug;

/// A registered panel paired with the immutable per-request [`PanelContext`].
#[derive(Debug, Clone)]
pub struct PanelInstance {
    panel: Arc<dyn SettingsPanel>,
    context: PanelContext,
}

impl PanelInstance {
    pub fn new(panel: Arc<dyn SettingsPanel>, context: PanelContext) -> Self {
        Self { panel, context }
    }

    #[must_use]
    pub fn panel(&self) -> &dyn SettingsPanel {
        self.panel.as_ref()
    }

    #[must_use]
    pub const fn context(&self) -> &PanelContext {
        &self.context
    }

    #[must_use]
    pub fn key(&self) -> &str {
        self.panel.key()
    }

    /// Canonical URI of this panel in its context, see [`panel_uri`].
    #[must_use]
    pub fn uri(&self, path: &str) -> String {
        panel_uri(&self.context, self.panel.key(), path)
    }

    /// Checks the two independent availability gates: the panel must be enabled and, when the
    /// viewer acts on another account, editable by administrators.
    ///
    /// # Errors
    /// Returns [`SettingsError::NotFound`] for disabled panels and
    /// [`SettingsError::AccessDenied`] for cross-account access to a personal-only panel.
    pub fn ensure_available(&self) -> Result<(), SettingsError> {
        if !self.panel.is_enabled() {
            return Err(SettingsError::not_found(format!(
                "panel '{}' is disabled",
                self.panel.key()
            )));
        }

        if self.context.is_acting_on_other_user() && !self.panel.is_editable_by_administrators() {
            return Err(PolicyError::Denied {
                message: format!(
                    "panel '{}' cannot be edited on behalf of another user",
                    self.panel.key()
                )
                .into(),
                context: None,
            })
            .context("Panel availability");
        }

        Ok(())
    }

    /// Runs the panel's request hook.
    ///
    /// # Errors
    /// Whatever the panel returns.
    pub fn process(
        &self,
        services: &PanelServices,
        request: &PanelRequest,
    ) -> Result<PanelResponse, SettingsError> {
        debug!(
            panel = self.key(),
            method = %request.method,
            path = %request.path,
            "Processing panel request"
        );
        self.panel.process_request(self, services, request)
    }

    /// Loads the target user's preferences and requires the viewer to hold `EDIT` on them.
    ///
    /// # Errors
    /// Returns [`SettingsError::AccessDenied`] when the capability check fails, even though the
    /// preferences themselves exist, and propagates store errors.
    pub fn load_target_preferences(
        &self,
        store: &dyn PreferencesStore,
        policy: &dyn PolicyChecker,
    ) -> Result<Preferences, SettingsError> {
        let preferences = store.load(self.context.user())?;
        require_capability(policy, self.context.viewer(), &preferences, Capability::EDIT)
            .context(format!("Loading preferences for panel '{}'", self.panel.key()))?;
        Ok(preferences)
    }

    /// Writes one setting through `editor` as a single transaction by the viewer.
    ///
    /// Writes that change nothing, or that leave unrelated required settings unset, succeed.
    ///
    /// # Errors
    /// Propagates editor errors (validation, storage) unchanged.
    pub fn write_setting(
        &self,
        editor: &dyn PreferenceEditor,
        preferences: &mut Preferences,
        key: &str,
        value: impl Into<SettingValue>,
    ) -> Result<Vec<AppliedChange>, SettingsError> {
        editor.apply(
            self.context.viewer(),
            preferences,
            vec![PreferenceTransaction::set(key, value)],
            EditorOptions::lenient(),
        )
    }
}
