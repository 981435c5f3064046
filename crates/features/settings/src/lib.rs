//! # Settings
//!
//! Per-user settings panels: a registry of panels and groups, the request-scoped binding of a
//! panel to its target user and viewer, canonical panel URIs, and single-setting writes through
//! a transactional preference editor.
//!
//! ```rust
//! use panelkit_domain::config::PanelkitConfig;
//! use panelkit_domain::identity::Identity;
//! use panelkit_settings::dispatch::{Dispatcher, MemoryUserDirectory};
//! use panelkit_settings::panels::builtin;
//! use panelkit_settings::preferences::MemoryPreferencesStore;
//! use panelkit_settings::request::Method;
//! use std::collections::BTreeMap;
//! use std::sync::Arc;
//!
//! let config = PanelkitConfig::default();
//! let registry = builtin::registry(&config)?;
//! let services = builtin::services(&config, Arc::new(MemoryPreferencesStore::new()))?;
//! let dispatcher = Dispatcher::new(&registry, Arc::new(MemoryUserDirectory::new()), services);
//!
//! let alice = Identity::new(5, "alice");
//! let params = BTreeMap::from([("timezone".to_owned(), "Europe/Kyiv".to_owned())]);
//! let response =
//!     dispatcher.dispatch(&alice, Method::Post, "/settings/panel/date-time/", params)?;
//! assert_eq!(response.redirect_uri(), Some("/settings/panel/date-time/saved"));
//! # Ok::<(), panelkit_settings::SettingsError>(())
//! ```

pub mod context;
pub mod dispatch;
pub mod editor;
mod error;
pub mod group;
pub mod instance;
pub mod navigation;
pub mod order;
pub mod panel;
pub mod panels;
pub mod preferences;
pub mod registry;
pub mod request;
pub mod services;
pub mod setting;
pub mod uri;

pub use crate::error::{SettingsError, SettingsErrorExt};
