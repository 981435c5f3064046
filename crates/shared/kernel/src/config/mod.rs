use config::{Config, Environment, File};
use panelkit_domain::constants::ENV_PREFIX;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Custom error type for config loading.
#[panelkit_derive::panelkit_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from an optional file layered under environment overrides.
///
/// 1. **Base File**: when `path` is given, the file is required and its format is inferred
///    from the extension (`panelkit.toml`, `panelkit.json`, ...).
/// 2. **Environment Overrides**: variables prefixed with `PANELKIT__` override file values.
///    Nested keys use double underscores (`PANELKIT__POLICY__ADMINISTRATORS_CAN_EDIT=false`
///    maps to `policy.administrators_can_edit`).
///
/// Missing keys fall back to the target type's `#[serde(default)]` values.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing or unreadable, or if the merged
/// values do not deserialize into `T`.
///
/// # Example
/// ```rust
/// use panelkit_kernel::config::load_config;
/// use panelkit_domain::config::PanelkitConfig;
///
/// let cfg: PanelkitConfig = load_config(None::<&str>).unwrap();
/// assert!(cfg.policy.administrators_can_edit);
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let mut builder = Config::builder();

    if let Some(path) = path.as_ref().map(AsRef::as_ref) {
        info!("Loading config from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    } else {
        info!("No config file given, using defaults and environment");
    }

    let config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("panels.disabled")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
