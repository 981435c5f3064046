//! Framework-neutral request and response shapes exchanged with panels.

use crate::navigation::Navigation;
use panelkit_domain::value::SettingValue;
use serde::Serialize;
use std::collections::BTreeMap;
use strum_macros::{AsRefStr, Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, Serialize)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Method {
    Get,
    Post,
}

/// A request already routed to a panel.
///
/// `path` is whatever followed the panel key in the URI, without a leading slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRequest {
    pub method: Method,
    pub path: String,
    pub params: BTreeMap<String, String>,
}

impl PanelRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::Get, path: path.into(), params: BTreeMap::new() }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self { method: Method::Post, path: path.into(), params: BTreeMap::new() }
    }

    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    #[must_use]
    pub const fn is_submit(&self) -> bool {
        matches!(self.method, Method::Post)
    }
}

/// What a panel hands back to the framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PanelResponse {
    Redirect { uri: String },
    Content(PanelFragment),
}

impl PanelResponse {
    pub fn redirect(uri: impl Into<String>) -> Self {
        Self::Redirect { uri: uri.into() }
    }

    #[must_use]
    pub fn redirect_uri(&self) -> Option<&str> {
        match self {
            Self::Redirect { uri } => Some(uri),
            Self::Content(_) => None,
        }
    }

    #[must_use]
    pub const fn fragment(&self) -> Option<&PanelFragment> {
        match self {
            Self::Content(fragment) => Some(fragment),
            Self::Redirect { .. } => None,
        }
    }
}

/// A renderable piece of page content, composed into the page by the framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelFragment {
    pub title: String,
    /// URI the form posts back to.
    pub action: String,
    pub fields: Vec<FieldView>,
    pub notice: Option<String>,
    pub navigation: Option<Navigation>,
}

impl PanelFragment {
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub key: String,
    pub label: String,
    pub value: SettingValue,
    /// Allowed values for choice settings, empty otherwise.
    pub options: Vec<String>,
    /// True when `value` comes from the catalog default rather than storage.
    pub is_default: bool,
}
