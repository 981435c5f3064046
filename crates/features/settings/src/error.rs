use panelkit_kernel::security::policy::PolicyError;
use std::borrow::Cow;

/// A specialized [`SettingsError`] enum of this crate.
#[panelkit_derive::panelkit_error]
pub enum SettingsError {
    /// Registry misconfiguration: duplicate keys, unknown groups. Not recoverable at runtime.
    #[error("Settings configuration error{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The viewer may not act on the target preferences or panel.
    #[error("Settings access denied{}: {source}", format_context(.context))]
    AccessDenied { source: PolicyError, context: Option<Cow<'static, str>> },

    /// Unknown route, panel or account.
    #[error("Settings not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The editor rejected a proposed value.
    #[error("Invalid setting value{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A transaction would not change anything and the editor was told not to continue.
    #[error("Setting change has no effect{}: {message}", format_context(.context))]
    NoEffect { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Required settings are neither stored nor supplied.
    #[error("Required settings missing{}: {message}", format_context(.context))]
    MissingFields { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal settings error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl SettingsError {
    /// Denials are user-facing and map to the framework's access-denied response.
    #[must_use]
    pub const fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }

    /// Configuration errors signal a programming or deployment bug.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    pub(crate) fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Config { message: message.into(), context: None }
    }

    pub(crate) fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound { message: message.into(), context: None }
    }

    pub(crate) fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into(), context: None }
    }
}
