use crate::editor::{CatalogEditor, PreferenceEditor};
use crate::preferences::PreferencesStore;
use crate::setting::SettingCatalog;
use panelkit_kernel::security::policy::PolicyChecker;
use std::sync::Arc;

/// External collaborators a panel may call while handling a request.
#[derive(Debug, Clone)]
pub struct PanelServices {
    pub store: Arc<dyn PreferencesStore>,
    pub editor: Arc<dyn PreferenceEditor>,
    pub policy: Arc<dyn PolicyChecker>,
    pub catalog: Arc<SettingCatalog>,
}

impl PanelServices {
    /// Wires the stock [`CatalogEditor`] on top of `store`.
    pub fn new(
        store: Arc<dyn PreferencesStore>,
        policy: Arc<dyn PolicyChecker>,
        catalog: Arc<SettingCatalog>,
    ) -> Self {
        let editor = Arc::new(CatalogEditor::new(Arc::clone(&catalog), Arc::clone(&store)));
        Self { store, editor, policy, catalog }
    }

    /// Replaces the editor, keeping the other collaborators.
    #[must_use]
    pub fn with_editor(mut self, editor: Arc<dyn PreferenceEditor>) -> Self {
        self.editor = editor;
        self
    }
}
