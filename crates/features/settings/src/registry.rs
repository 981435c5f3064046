//! Panel discovery, ordering and grouping.
//!
//! Panels are registered explicitly at startup through [`PanelRegistryBuilder`]; there is no
//! reflective scanning. The built registry is immutable and may be published process-wide
//! with [`PanelRegistry::install`] or [`PanelRegistry::global_or_init`].

use crate::error::SettingsError;
use crate::group::PanelGroup;
use crate::panel::SettingsPanel;
use fxhash::FxHashMap;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

static GLOBAL: OnceLock<PanelRegistry> = OnceLock::new();

/// Immutable, sorted set of panels and groups.
#[derive(Debug)]
pub struct PanelRegistry {
    panels: Vec<Arc<dyn SettingsPanel>>,
    panel_index: FxHashMap<String, usize>,
    groups: Vec<Arc<dyn PanelGroup>>,
    group_index: FxHashMap<String, usize>,
}

/// A group together with its enabled panels, in registry order.
#[derive(Debug, Clone)]
pub struct GroupWithPanels<'a> {
    pub group: &'a Arc<dyn PanelGroup>,
    pub panels: Vec<&'a Arc<dyn SettingsPanel>>,
}

impl PanelRegistry {
    #[must_use]
    pub fn builder() -> PanelRegistryBuilder {
        PanelRegistryBuilder::default()
    }

    /// Every registered panel, ordered by `(order_vector, key)`.
    #[must_use]
    pub fn all_panels(&self) -> &[Arc<dyn SettingsPanel>] {
        &self.panels
    }

    /// Direct lookup by key, regardless of enabled state or grouping.
    #[must_use]
    pub fn panel(&self, key: &str) -> Option<&Arc<dyn SettingsPanel>> {
        self.panel_index.get(key).map(|&i| &self.panels[i])
    }

    /// Every registered group, ordered by `(order_vector, key)`.
    #[must_use]
    pub fn groups(&self) -> &[Arc<dyn PanelGroup>] {
        &self.groups
    }

    /// Resolves the group `panel` declares.
    ///
    /// # Errors
    /// Returns [`SettingsError::Config`] naming the panel and the unknown group key.
    pub fn panel_group(
        &self,
        panel: &dyn SettingsPanel,
    ) -> Result<&Arc<dyn PanelGroup>, SettingsError> {
        self.group_index.get(panel.group_key()).map(|&i| &self.groups[i]).ok_or_else(|| {
            SettingsError::config(format!(
                "panel '{}' references group '{}', which does not exist",
                panel.key(),
                panel.group_key()
            ))
        })
    }

    /// Groups in display order with their enabled panels. Empty groups are dropped and panels
    /// pointing at unknown groups are left out.
    #[must_use]
    pub fn all_panel_groups_with_panels(&self) -> Vec<GroupWithPanels<'_>> {
        let mut buckets: Vec<Vec<&Arc<dyn SettingsPanel>>> = vec![Vec::new(); self.groups.len()];

        for panel in self.panels.iter().filter(|p| p.is_enabled()) {
            if let Some(&i) = self.group_index.get(panel.group_key()) {
                buckets[i].push(panel);
            }
        }

        self.groups
            .iter()
            .zip(buckets)
            .filter(|(_, panels)| !panels.is_empty())
            .map(|(group, panels)| GroupWithPanels { group, panels })
            .collect()
    }

    /// Flattened display list: group by group, each group's order preserved.
    #[must_use]
    pub fn all_display_panels(&self) -> Vec<&Arc<dyn SettingsPanel>> {
        self.all_panel_groups_with_panels().into_iter().flat_map(|g| g.panels).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Publishes `registry` process-wide. The first installation wins; later calls get the
    /// already-installed registry back.
    pub fn install(registry: Self) -> &'static Self {
        let mut published = false;
        let installed = GLOBAL.get_or_init(|| {
            published = true;
            registry
        });
        if !published {
            debug!("Panel registry already installed, keeping the first one");
        }
        installed
    }

    /// The process-wide registry, if one was installed.
    #[must_use]
    pub fn global() -> Option<&'static Self> {
        GLOBAL.get()
    }

    /// Returns the process-wide registry, building it with `init` on first access.
    ///
    /// Concurrent first callers may each run `init`; only one result is published and the
    /// others are dropped, which is harmless because `init` is expected to be deterministic.
    ///
    /// # Errors
    /// Propagates errors from `init`.
    pub fn global_or_init<F>(init: F) -> Result<&'static Self, SettingsError>
    where
        F: FnOnce() -> Result<Self, SettingsError>,
    {
        if let Some(registry) = GLOBAL.get() {
            return Ok(registry);
        }
        Ok(Self::install(init()?))
    }
}

/// Collects panels and groups and validates them into a [`PanelRegistry`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct PanelRegistryBuilder {
    panels: Vec<Arc<dyn SettingsPanel>>,
    groups: Vec<Arc<dyn PanelGroup>>,
}

impl PanelRegistryBuilder {
    pub fn panel<P: SettingsPanel + 'static>(self, panel: P) -> Self {
        self.shared_panel(Arc::new(panel))
    }

    pub fn shared_panel(mut self, panel: Arc<dyn SettingsPanel>) -> Self {
        self.panels.push(panel);
        self
    }

    /// Registers multiple panels at once.
    pub fn panels<I>(mut self, panels: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn SettingsPanel>>,
    {
        self.panels.extend(panels);
        self
    }

    pub fn group<G: PanelGroup + 'static>(mut self, group: G) -> Self {
        self.groups.push(Arc::new(group));
        self
    }

    /// Validates and sorts everything registered so far.
    ///
    /// # Errors
    /// Returns [`SettingsError::Config`] when two panels, or two groups, share a key.
    pub fn build(self) -> Result<PanelRegistry, SettingsError> {
        let mut panels = self.panels;
        panels.sort_by_cached_key(|p| (p.order_vector(), p.key().to_owned()));
        let panel_index = index_unique(&panels, |p| p.key(), "panel")?;

        let mut groups = self.groups;
        groups.sort_by_cached_key(|g| (g.order_vector(), g.key().to_owned()));
        let group_index = index_unique(&groups, |g| g.key(), "group")?;

        for panel in &panels {
            if !group_index.contains_key(panel.group_key()) {
                warn!(
                    panel = panel.key(),
                    group = panel.group_key(),
                    "Panel references an unknown group and will not be displayed"
                );
            }
        }

        info!(panels = panels.len(), groups = groups.len(), "Panel registry built");

        Ok(PanelRegistry { panels, panel_index, groups, group_index })
    }
}

fn index_unique<T: ?Sized>(
    items: &[Arc<T>],
    key: impl Fn(&T) -> &str,
    kind: &str,
) -> Result<FxHashMap<String, usize>, SettingsError> {
    let mut index = FxHashMap::default();
    for (i, item) in items.iter().enumerate() {
        let k = key(item.as_ref());
        if let Some(&existing) = index.get(k) {
            return Err(SettingsError::Config {
                message: format!("two {kind}s share the key '{k}'").into(),
                context: Some(
                    format!("{kind} #{existing} and #{i} in sorted registration order").into(),
                ),
            });
        }
        index.insert(k.to_owned(), i);
    }
    Ok(index)
}
