//! The declaration session: one user filling one declaration.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::warn;

use cerfa_core::calculations::surface_totals;
use cerfa_core::models::{DocumentId, FieldValue, FormData, fields};
use cerfa_core::session::{AiService, SessionApi, SessionError, SnapshotStore};
use cerfa_core::steps::StepId;
use cerfa_core::store::FormStore;
use cerfa_core::validation::validate_step;

use crate::bridge::AutosaveBridge;

/// Composition root tying the form store to its persistence backends and to
/// the optional AI suggestion service.
///
/// Every mutation flows through here so the autosave bridge sees it; reads
/// delegate straight to the store. AI failures degrade to "no suggestion";
/// only the explicit finalize action surfaces a remote error.
pub struct DeclarationSession {
    store: FormStore,
    bridge: AutosaveBridge,
    local: Arc<dyn SnapshotStore>,
    remote: Option<Arc<dyn SessionApi>>,
    ai: Option<Arc<dyn AiService>>,
}

impl DeclarationSession {
    pub fn new(
        local: Arc<dyn SnapshotStore>,
        remote: Option<Arc<dyn SessionApi>>,
        ai: Option<Arc<dyn AiService>>,
    ) -> Self {
        Self {
            store: FormStore::new(),
            bridge: AutosaveBridge::new(Arc::clone(&local), remote.clone()),
            local,
            remote,
            ai,
        }
    }

    /// Pick up where the user left off: the local snapshot is the baseline,
    /// a non-empty remote session supersedes it. Load failures are logged
    /// and fall back to a fresh form.
    pub async fn resume(&mut self) {
        let local = match self.local.load() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("local snapshot load failed: {e}");
                None
            }
        };

        let remote = match &self.remote {
            Some(api) => match api.fetch().await {
                Ok(session) => session,
                Err(e) => {
                    warn!("remote session load failed: {e}");
                    None
                }
            },
            None => None,
        };

        let snapshot = match remote {
            Some(session) if !session.is_empty() => Some(session.into_snapshot()),
            _ => local,
        };
        if let Some(snapshot) = snapshot {
            self.store.restore(snapshot);
        }
    }

    pub fn store(&self) -> &FormStore {
        &self.store
    }

    pub fn data(&self) -> &FormData {
        self.store.data()
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        self.store.errors()
    }

    pub fn active_step(&self) -> StepId {
        self.store.active_step()
    }

    pub fn progress_percent(&self) -> u8 {
        self.store.progress_percent()
    }

    /// Overwrite one field and schedule a save.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.store.set_field(name, value);
        self.notify();
    }

    /// Recompute the derived surface totals from the per-category inputs and
    /// fold them back into the payload.
    pub fn refresh_surface_totals(&mut self) {
        let totals = surface_totals(self.store.data());
        self.store.set_fields(totals);
        self.notify();
    }

    /// Validate the active step and advance on success. On failure the step's
    /// errors replace the error map and the position does not move.
    pub fn try_advance(&mut self) -> bool {
        let errors = validate_step(self.store.active_step(), self.store.data());
        if !errors.is_empty() {
            self.store.set_errors(errors);
            return false;
        }
        self.store.clear_errors();
        self.store.next_step();
        self.notify();
        true
    }

    /// Go back one step; never validates.
    pub fn back(&mut self) {
        self.store.clear_errors();
        self.store.prev_step();
        self.notify();
    }

    /// Jump to an arbitrary visible step, e.g. from the summary's edit links.
    pub fn jump_to(&mut self, index: usize) {
        self.store.clear_errors();
        self.store.go_to_step(index);
        self.notify();
    }

    /// Submit the declaration as a completed dossier. A remote failure leaves
    /// the form intact and resumable.
    pub async fn finalize(&mut self) -> Result<(), SessionError> {
        self.bridge.flush(&self.store.snapshot()).await?;
        if let Some(remote) = &self.remote {
            remote.finalize(self.store.data()).await?;
        }
        self.store.complete();
        self.notify();
        Ok(())
    }

    /// Discard the declaration and its persisted snapshot.
    pub fn reset(&mut self) {
        self.store.reset();
        if let Err(e) = self.local.clear() {
            warn!("local snapshot clear failed: {e}");
        }
    }

    /// Fold AI field suggestions for the current project description into the
    /// payload. Returns whether anything was applied.
    pub async fn apply_ai_analysis(&mut self) -> bool {
        let Some(ai) = self.ai.clone() else {
            return false;
        };
        let description = self.store.data().text(fields::DESCRIPTION_PROJET).to_string();
        if description.trim().is_empty() {
            return false;
        }

        match ai.analyze_project(&description).await {
            Ok(Some(suggestions)) if !suggestions.is_empty() => {
                self.store.set_fields(suggestions);
                self.notify();
                true
            }
            Ok(_) => false,
            Err(e) => {
                warn!("project analysis failed: {e}");
                false
            }
        }
    }

    /// For non-catalog projects, ask the AI for a configuration override and
    /// store it so the derived config picks it up.
    pub async fn apply_ai_configuration(&mut self) -> bool {
        let Some(ai) = self.ai.clone() else {
            return false;
        };
        if !self.store.project_config().use_ai {
            return false;
        }
        let description = self.store.data().text(fields::DESCRIPTION_PROJET).to_string();

        match ai.configure_project(&description).await {
            Ok(Some(overlay)) => match serde_json::to_value(&overlay) {
                Ok(value) => {
                    self.store.set_fields([(
                        fields::AI_PROJECT_CONFIG.to_string(),
                        FieldValue::Other(value),
                    )]);
                    self.notify();
                    true
                }
                Err(e) => {
                    warn!("configuration override not serializable: {e}");
                    false
                }
            },
            Ok(None) => false,
            Err(e) => {
                warn!("project configuration failed: {e}");
                false
            }
        }
    }

    /// Draft a project description from the selected works tags and fill the
    /// description field with it.
    pub async fn draft_description(&mut self) -> Option<String> {
        let ai = self.ai.clone()?;
        let data = self.store.data();
        let works_type = data.text(fields::TYPE_TRAVAUX).to_string();
        let natures = data.tags(fields::NATURE_TRAVAUX).to_vec();
        let other = data.text(fields::AUTRE_NATURE_TRAVAUX).to_string();

        match ai.generate_description(&works_type, &natures, &other).await {
            Ok(Some(text)) => {
                self.set_field(fields::DESCRIPTION_PROJET, text.clone());
                Some(text)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("description generation failed: {e}");
                None
            }
        }
    }

    /// Which DP documents the AI thinks the described project needs; empty on
    /// any failure.
    pub async fn suggested_documents(&self) -> Vec<DocumentId> {
        let Some(ai) = &self.ai else {
            return Vec::new();
        };
        let description = self.store.data().text(fields::DESCRIPTION_PROJET);

        match ai.suggest_documents(description).await {
            Ok(Some(documents)) => documents,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("document suggestion failed: {e}");
                Vec::new()
            }
        }
    }

    fn notify(&self) {
        self.bridge.notify(&self.store.snapshot());
    }
}
