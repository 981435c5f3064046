//! The panel capability set.
//!
//! Concrete panels implement [`SettingsPanel`] and are registered explicitly with a
//! [`PanelRegistry`](crate::registry::PanelRegistry) at startup. Optional behaviour comes
//! from default methods that delegate to the free helpers below, so an implementation that
//! overrides a method can still fall back to the stock rule.

use crate::error::SettingsError;
use crate::instance::PanelInstance;
use crate::order::OrderVector;
use crate::request::{PanelRequest, PanelResponse};
use crate::services::PanelServices;
use std::fmt::Debug;

pub const DEFAULT_ENABLED: bool = true;
pub const DEFAULT_EDITABLE_BY_ADMINISTRATORS: bool = false;

/// Stock ordering: by display name.
#[must_use]
pub fn default_order_vector(name: &str) -> OrderVector {
    OrderVector::from_name(name)
}

pub trait SettingsPanel: Debug + Send + Sync {
    /// Unique, stable key. Appears escaped in panel URIs.
    fn key(&self) -> &str;

    fn name(&self) -> &str;

    /// Key of the [`PanelGroup`](crate::group::PanelGroup) this panel is listed under.
    fn group_key(&self) -> &str;

    fn is_enabled(&self) -> bool {
        DEFAULT_ENABLED
    }

    /// Whether an administrator may open this panel on another user's account.
    fn is_editable_by_administrators(&self) -> bool {
        DEFAULT_EDITABLE_BY_ADMINISTRATORS
    }

    fn order_vector(&self) -> OrderVector {
        default_order_vector(self.name())
    }

    /// Handles one request for this panel.
    ///
    /// # Errors
    /// Implementations return [`SettingsError::AccessDenied`] for policy failures and pass
    /// editor errors through unchanged.
    fn process_request(
        &self,
        instance: &PanelInstance,
        services: &PanelServices,
        request: &PanelRequest,
    ) -> Result<PanelResponse, SettingsError>;
}
