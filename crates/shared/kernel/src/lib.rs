//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it re-exports ergonomic helpers for config loading,
//! capability checks and URI path escaping.
//!
//! ## Capability checks
//! ```rust
//! use panelkit_kernel::prelude::*;
//!
//! #[derive(Debug)]
//! struct Note(UserId);
//!
//! impl PolicyObject for Note {
//!     fn policy_owner(&self) -> UserId {
//!         self.0
//!     }
//! }
//!
//! let policy = OwnerPolicy::new(false);
//! let owner = Identity::new(1, "alice");
//! let other = Identity::new(2, "bob");
//!
//! assert!(require_capability(&policy, &owner, &Note(UserId(1)), Capability::EDIT).is_ok());
//! assert!(require_capability(&policy, &other, &Note(UserId(1)), Capability::EDIT).is_err());
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use panelkit_kernel::config::load_config;
//! let cfg: panelkit_domain::config::PanelkitConfig = load_config(Some("panelkit.toml")).unwrap();
//! ```
pub mod config;
pub mod prelude;
pub mod security;
pub mod uri;

pub use panelkit_domain as domain;
