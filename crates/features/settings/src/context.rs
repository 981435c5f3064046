use crate::navigation::Navigation;
use panelkit_domain::identity::Identity;
use std::borrow::Cow;
use typed_builder::TypedBuilder;

/// The enclosing page a panel renders into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    pub application: Cow<'static, str>,
    pub request_path: String,
}

impl PageContext {
    pub fn new(application: impl Into<Cow<'static, str>>, request_path: impl Into<String>) -> Self {
        Self { application: application.into(), request_path: request_path.into() }
    }
}

/// Request-scoped binding of a panel to its identities and page.
///
/// Built once per request and never mutated; nothing is validated at build time.
/// A mismatch between `user` and `viewer` surfaces later, through the capability check in
/// [`load_target_preferences`](crate::instance::PanelInstance::load_target_preferences).
///
/// ```rust
/// use panelkit_domain::identity::Identity;
/// use panelkit_settings::context::PanelContext;
///
/// let ctx = PanelContext::builder()
///     .user(Identity::new(5, "alice"))
///     .viewer(Identity::new(9, "root").administrator())
///     .build();
/// assert!(ctx.is_acting_on_other_user());
/// ```
#[derive(Debug, Clone, TypedBuilder)]
pub struct PanelContext {
    /// The account whose settings are viewed or edited.
    user: Identity,
    /// The identity performing the action.
    viewer: Identity,
    #[builder(default)]
    page: PageContext,
    #[builder(default, setter(strip_option))]
    navigation: Option<Navigation>,
    #[builder(default, setter(strip_option, into))]
    override_uri: Option<String>,
}

impl PanelContext {
    #[must_use]
    pub const fn user(&self) -> &Identity {
        &self.user
    }

    #[must_use]
    pub const fn viewer(&self) -> &Identity {
        &self.viewer
    }

    #[must_use]
    pub const fn page(&self) -> &PageContext {
        &self.page
    }

    #[must_use]
    pub const fn navigation(&self) -> Option<&Navigation> {
        self.navigation.as_ref()
    }

    #[must_use]
    pub fn override_uri(&self) -> Option<&str> {
        self.override_uri.as_deref()
    }

    #[must_use]
    pub fn is_acting_on_other_user(&self) -> bool {
        !self.user.is_same_account(&self.viewer)
    }

    /// Same binding with a navigation menu attached.
    #[must_use]
    pub fn with_navigation(mut self, navigation: Navigation) -> Self {
        self.navigation = Some(navigation);
        self
    }
}
