//! Per-invocation wiring: registry, store, services and the acting viewer.

use crate::args::Cli;
use anyhow::{Context, Result};
use panelkit_domain::config::PanelkitConfig;
use panelkit_domain::identity::{Identity, UserId};
use panelkit_settings::dispatch::{Dispatcher, UserDirectory};
use panelkit_settings::panels::builtin;
use panelkit_settings::preferences::{MemoryPreferencesStore, Preferences};
use panelkit_settings::registry::PanelRegistry;
use panelkit_settings::services::PanelServices;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Any numeric id names an account; usernames are synthesized.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenDirectory;

impl UserDirectory for OpenDirectory {
    fn find(&self, id: UserId) -> Option<Identity> {
        Some(Identity::new(id, format!("user-{id}")))
    }
}

#[derive(Debug)]
pub struct Session {
    pub registry: PanelRegistry,
    pub store: Arc<MemoryPreferencesStore>,
    pub services: PanelServices,
    pub viewer: Identity,
    state: Option<PathBuf>,
}

impl Session {
    /// Builds the registry and services and loads the state file when one is given.
    ///
    /// # Errors
    /// Returns an error if the registry is misconfigured or the state file is unreadable.
    pub fn open(config: &PanelkitConfig, cli: &Cli) -> Result<Self> {
        let registry = builtin::registry(config).context("Building the panel registry")?;

        let store = Arc::new(match &cli.state {
            Some(path) if path.exists() => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("Reading state file {}", path.display()))?;
                let snapshot: Vec<Preferences> = serde_json::from_str(&raw)
                    .with_context(|| format!("Parsing state file {}", path.display()))?;
                debug!(accounts = snapshot.len(), "Loaded preferences state");
                MemoryPreferencesStore::from_snapshot(snapshot)
            },
            _ => MemoryPreferencesStore::new(),
        });

        let services = builtin::services(config, store.clone())?;

        let mut viewer = Identity::new(cli.viewer, format!("user-{}", cli.viewer));
        if cli.admin {
            viewer = viewer.administrator();
        }

        Ok(Self { registry, store, services, viewer, state: cli.state.clone() })
    }

    #[must_use]
    pub fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(&self.registry, Arc::new(OpenDirectory), self.services.clone())
    }

    /// Writes the store back to the state file, if one was given.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn persist(&self) -> Result<()> {
        let Some(path) = &self.state else {
            return Ok(());
        };

        let snapshot = self.store.snapshot();
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(path, json).with_context(|| format!("Writing state file {}", path.display()))?;
        info!(path = %path.display(), accounts = snapshot.len(), "Preferences state saved");
        Ok(())
    }
}
