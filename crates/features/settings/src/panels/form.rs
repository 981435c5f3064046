use crate::error::{SettingsError, SettingsErrorExt};
use crate::instance::PanelInstance;
use crate::order::OrderVector;
use crate::panel::{
    DEFAULT_EDITABLE_BY_ADMINISTRATORS, DEFAULT_ENABLED, SettingsPanel, default_order_vector,
};
use crate::request::{FieldView, PanelFragment, PanelRequest, PanelResponse};
use crate::services::PanelServices;
use panelkit_domain::capability::Capability;
use panelkit_kernel::security::policy::require_capability;
use std::borrow::Cow;
use tracing::{debug, info};

/// Path a form redirects to after a successful submit.
pub const SAVED_PATH: &str = "saved";

/// A panel that renders and saves a fixed list of catalog settings.
///
/// ```rust
/// use panelkit_settings::panel::SettingsPanel;
/// use panelkit_settings::panels::FormPanel;
///
/// let panel = FormPanel::new("date-time", "Date and Time", "preferences")
///     .settings(["timezone", "time-format"])
///     .editable_by_administrators(true);
/// assert!(panel.is_enabled());
/// assert_eq!(panel.setting_keys().count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct FormPanel {
    key: Cow<'static, str>,
    name: Cow<'static, str>,
    group: Cow<'static, str>,
    settings: Vec<Cow<'static, str>>,
    enabled: bool,
    editable_by_administrators: bool,
    order: Option<OrderVector>,
}

impl FormPanel {
    pub fn new(
        key: impl Into<Cow<'static, str>>,
        name: impl Into<Cow<'static, str>>,
        group: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            group: group.into(),
            settings: Vec::new(),
            enabled: DEFAULT_ENABLED,
            editable_by_administrators: DEFAULT_EDITABLE_BY_ADMINISTRATORS,
            order: None,
        }
    }

    /// Setting keys shown on the form, in display order.
    #[must_use]
    pub fn settings<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        self.settings.extend(keys.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub const fn editable_by_administrators(mut self, editable: bool) -> Self {
        self.editable_by_administrators = editable;
        self
    }

    /// Pins the panel to an explicit position instead of sorting by name.
    #[must_use]
    pub fn order(mut self, order: OrderVector) -> Self {
        self.order = Some(order);
        self
    }

    pub fn setting_keys(&self) -> impl Iterator<Item = &str> {
        self.settings.iter().map(|k| &**k)
    }

    fn render(
        &self,
        instance: &PanelInstance,
        services: &PanelServices,
        request: &PanelRequest,
    ) -> Result<PanelResponse, SettingsError> {
        let context = instance.context();
        let preferences = services.store.load(context.user())?;
        require_capability(
            services.policy.as_ref(),
            context.viewer(),
            &preferences,
            Capability::VIEW,
        )
        .context(format!("Rendering panel '{}'", self.key))?;

        let mut fields = Vec::with_capacity(self.settings.len());
        for key in self.setting_keys() {
            let definition = services.catalog.get(key).ok_or_else(|| {
                SettingsError::config(format!(
                    "panel '{}' lists setting '{key}', which is not in the catalog",
                    self.key
                ))
            })?;
            let stored = preferences.get(key);
            fields.push(FieldView {
                key: key.to_owned(),
                label: definition.label.to_string(),
                value: stored.cloned().unwrap_or_else(|| definition.default.clone()),
                options: definition.options(),
                is_default: stored.is_none(),
            });
        }

        Ok(PanelResponse::Content(PanelFragment {
            title: self.name.to_string(),
            action: instance.uri(""),
            fields,
            notice: (request.path == SAVED_PATH).then(|| "Changes saved.".to_owned()),
            navigation: context.navigation().cloned(),
        }))
    }

    fn submit(
        &self,
        instance: &PanelInstance,
        services: &PanelServices,
        request: &PanelRequest,
    ) -> Result<PanelResponse, SettingsError> {
        let mut preferences =
            instance.load_target_preferences(services.store.as_ref(), services.policy.as_ref())?;

        let mut changed = 0;
        for key in self.setting_keys() {
            let Some(raw) = request.value(key) else {
                continue;
            };
            let value = services.catalog.require(key)?.parse_form_value(raw)?;
            let applied =
                instance.write_setting(services.editor.as_ref(), &mut preferences, key, value)?;
            changed += applied.len();
        }

        let ignored = request.params.keys().filter(|k| !self.settings.iter().any(|s| s == *k));
        for key in ignored {
            debug!(panel = %self.key, param = %key, "Ignoring parameter the form does not own");
        }

        info!(
            panel = %self.key,
            user = %instance.context().user().id,
            changed,
            "Panel form submitted"
        );

        Ok(PanelResponse::redirect(instance.uri(SAVED_PATH)))
    }
}

impl SettingsPanel for FormPanel {
    fn key(&self) -> &str {
        &self.key
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn group_key(&self) -> &str {
        &self.group
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn is_editable_by_administrators(&self) -> bool {
        self.editable_by_administrators
    }

    fn order_vector(&self) -> OrderVector {
        self.order.clone().unwrap_or_else(|| default_order_vector(&self.name))
    }

    fn process_request(
        &self,
        instance: &PanelInstance,
        services: &PanelServices,
        request: &PanelRequest,
    ) -> Result<PanelResponse, SettingsError> {
        if request.is_submit() {
            self.submit(instance, services, request)
        } else {
            self.render(instance, services, request)
        }
    }
}
