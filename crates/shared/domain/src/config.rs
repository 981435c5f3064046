use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared by the settings slice and its binaries.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PanelkitConfigInner {
    pub panels: PanelsConfig,
    pub policy: PolicyConfig,
    pub logger: LoggerConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct PanelkitConfig {
    #[serde(flatten, default)]
    inner: Arc<PanelkitConfigInner>,
}

impl Deref for PanelkitConfig {
    type Target = PanelkitConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for PanelkitConfig {
    fn deref_mut(&mut self) -> &mut PanelkitConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Environment-driven panel toggles.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PanelsConfig {
    /// Panel keys reported as disabled regardless of their own default.
    pub disabled: Vec<String>,
}

/// Capability policy applied to preference objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Administrators hold `EDIT` on every account's preferences.
    pub administrators_can_edit: bool,
}

/// Logging knobs consumed by the binaries.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: String,
    pub json: bool,
    pub path: Option<PathBuf>,
}

impl PanelsConfig {
    #[must_use]
    pub fn is_disabled(&self, key: &str) -> bool {
        self.disabled.iter().any(|k| k == key)
    }
}

// --- Default ---

impl Default for PanelsConfig {
    fn default() -> Self {
        Self { disabled: vec!["developer".to_owned()] }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self { administrators_can_edit: true }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), json: false, path: None }
    }
}
