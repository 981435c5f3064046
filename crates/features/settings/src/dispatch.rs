//! Resolves settings URIs to panels and runs them.

use crate::context::{PageContext, PanelContext};
use crate::error::SettingsError;
use crate::instance::PanelInstance;
use crate::navigation::Navigation;
use crate::registry::PanelRegistry;
use crate::request::{Method, PanelRequest, PanelResponse};
use crate::services::PanelServices;
use fxhash::FxHashMap;
use panelkit_domain::constants::{PANEL_SEGMENT, SETTINGS_ROOT};
use panelkit_domain::identity::{Identity, UserId};
use panelkit_kernel::uri::unescape_path_component;
use parking_lot::RwLock;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A parsed settings URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRoute {
    /// Target account when the URI names one explicitly.
    pub user_id: Option<UserId>,
    /// Unescaped panel key.
    pub key: String,
    /// Remainder after the key, without leading or doubled slashes.
    pub path: String,
}

impl PanelRoute {
    /// Parses `/settings/panel/<key>/...` or `/settings/<user id>/panel/<key>/...`.
    ///
    /// A query string is ignored. Returns `None` for anything else, including an empty key or
    /// a key with a malformed escape.
    ///
    /// ```rust
    /// use panelkit_domain::identity::UserId;
    /// use panelkit_settings::dispatch::PanelRoute;
    ///
    /// let route = PanelRoute::parse("/settings/5/panel/date%2Dtime//saved/").unwrap();
    /// assert_eq!(route.user_id, Some(UserId(5)));
    /// assert_eq!(route.key, "date-time");
    /// assert_eq!(route.path, "saved");
    ///
    /// assert!(PanelRoute::parse("/settings/panels/display/").is_none());
    /// ```
    #[must_use]
    pub fn parse(uri: &str) -> Option<Self> {
        let path = uri.split(['?', '#']).next().unwrap_or_default();
        let rest = path.strip_prefix(SETTINGS_ROOT)?.strip_prefix('/')?;
        let mut segments = rest.split('/');

        let user_id = match segments.next()? {
            PANEL_SEGMENT => None,
            id => {
                let id = id.parse::<u64>().ok()?;
                if segments.next()? != PANEL_SEGMENT {
                    return None;
                }
                Some(UserId(id))
            },
        };

        let key = unescape_path_component(segments.next()?)?;
        if key.is_empty() {
            return None;
        }

        let path = segments.filter(|s| !s.is_empty()).collect::<Vec<_>>().join("/");

        Some(Self { user_id, key: key.into_owned(), path })
    }
}

/// Looks up accounts a viewer may target in a settings URI.
pub trait UserDirectory: Debug + Send + Sync {
    fn find(&self, id: UserId) -> Option<Identity>;
}

#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    users: RwLock<FxHashMap<UserId, Identity>>,
}

impl MemoryUserDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`insert`](Self::insert).
    #[must_use]
    pub fn with_user(self, user: Identity) -> Self {
        self.insert(user);
        self
    }

    pub fn insert(&self, user: Identity) {
        self.users.write().insert(user.id, user);
    }
}

impl UserDirectory for MemoryUserDirectory {
    fn find(&self, id: UserId) -> Option<Identity> {
        self.users.read().get(&id).cloned()
    }
}

/// Turns a settings URI and a viewer into a bound, checked [`PanelInstance`] and runs it.
#[derive(Debug, Clone)]
pub struct Dispatcher<'r> {
    registry: &'r PanelRegistry,
    directory: Arc<dyn UserDirectory>,
    services: PanelServices,
    application: Cow<'static, str>,
}

impl<'r> Dispatcher<'r> {
    pub fn new(
        registry: &'r PanelRegistry,
        directory: Arc<dyn UserDirectory>,
        services: PanelServices,
    ) -> Self {
        Self { registry, directory, services, application: Cow::Borrowed("panelkit") }
    }

    /// Name reported in every [`PageContext`] this dispatcher builds.
    #[must_use]
    pub fn application(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.application = name.into();
        self
    }

    #[must_use]
    pub const fn services(&self) -> &PanelServices {
        &self.services
    }

    /// Resolves `uri` for `viewer` into an available panel instance with navigation attached.
    ///
    /// # Errors
    /// [`SettingsError::NotFound`] for URIs outside the two settings shapes, unknown panel keys,
    /// unknown target accounts and disabled panels; [`SettingsError::AccessDenied`] when the
    /// viewer targets another account on a panel that does not allow it.
    pub fn bind(
        &self,
        viewer: &Identity,
        uri: &str,
    ) -> Result<(PanelInstance, PanelRoute), SettingsError> {
        let route = PanelRoute::parse(uri).ok_or_else(|| {
            SettingsError::not_found(format!("'{uri}' is not a settings panel URI"))
        })?;

        let panel = self
            .registry
            .panel(&route.key)
            .ok_or_else(|| SettingsError::not_found(format!("no panel with key '{}'", route.key)))?;

        let user = match route.user_id {
            None => viewer.clone(),
            Some(id) if id == viewer.id => viewer.clone(),
            Some(id) => self
                .directory
                .find(id)
                .ok_or_else(|| SettingsError::not_found(format!("no user with id {id}")))?,
        };

        let context = PanelContext::builder()
            .user(user)
            .viewer(viewer.clone())
            .page(PageContext::new(self.application.clone(), uri))
            .build();
        let navigation = Navigation::build(self.registry, &context, Some(panel.key()));
        let instance = PanelInstance::new(Arc::clone(panel), context.with_navigation(navigation));

        instance.ensure_available()?;
        Ok((instance, route))
    }

    /// Binds `uri` and hands the request to the panel.
    ///
    /// # Errors
    /// Everything [`bind`](Self::bind) returns, plus whatever the panel returns.
    #[instrument(
        skip(self, viewer, method, params),
        fields(viewer = %viewer.id, method = %method)
    )]
    pub fn dispatch(
        &self,
        viewer: &Identity,
        method: Method,
        uri: &str,
        params: BTreeMap<String, String>,
    ) -> Result<PanelResponse, SettingsError> {
        let (instance, route) = self.bind(viewer, uri)?;
        debug!(
            panel = instance.key(),
            user = %instance.context().user().id,
            path = %route.path,
            "Dispatching to panel"
        );

        let request = PanelRequest { method, path: route.path, params };
        instance.process(&self.services, &request)
    }
}
