//! Common imports for crates building on the kernel.

pub use crate::config::{ConfigError, load_config};
pub use crate::security::policy::{
    OwnerPolicy, PolicyChecker, PolicyError, PolicyErrorExt, PolicyObject, require_capability,
};
pub use crate::uri::{escape_path_component, unescape_path_component};
pub use panelkit_domain::capability::Capability;
pub use panelkit_domain::identity::{Identity, UserId};
