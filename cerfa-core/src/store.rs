//! The wizard's state container.
//!
//! `FormStore` owns the whole multi-step payload, the active step position,
//! the current validation errors and the touched flags. It is deliberately
//! synchronous and infallible: persistence and network mirroring live behind
//! it (see the session crate), and validation is pulled by callers before
//! navigating, never pushed from here.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{ConfigOverride, FieldValue, FormData, FormSnapshot, ProjectConfig, fields};
use crate::registry::{apply_override, project_config_for_tags};
use crate::steps::{StepId, TOTAL_STEPS, visible_steps};

#[derive(Debug, Clone)]
pub struct FormStore {
    data: FormData,
    /// Position in the *filtered* step list.
    current_step: usize,
    errors: BTreeMap<String, String>,
    touched: BTreeSet<String>,
    is_complete: bool,
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FormStore {
    /// A fresh store at step zero with the default payload.
    pub fn new() -> Self {
        Self {
            data: FormData::defaults(),
            current_step: 0,
            errors: BTreeMap::new(),
            touched: BTreeSet::new(),
            is_complete: false,
        }
    }

    /// Rebuild a store from a persisted snapshot. The resumed step index is
    /// clamped into the step list the restored payload produces.
    pub fn from_snapshot(snapshot: FormSnapshot) -> Self {
        let mut store = Self::new();
        store.restore(snapshot);
        store
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// The configuration derived from the selected nature-of-works tags,
    /// with the AI override (when present and well-formed) merged in
    /// non-destructively.
    pub fn project_config(&self) -> ProjectConfig {
        let tags = self.data.tags(fields::NATURE_TRAVAUX);
        let base = project_config_for_tags(tags.iter().map(String::as_str));
        match self.ai_override() {
            Some(overlay) => apply_override(base, &overlay),
            None => base,
        }
    }

    /// The effective step sequence for the current payload.
    pub fn visible_steps(&self) -> Vec<StepId> {
        let has_selected_type = !self.data.tags(fields::NATURE_TRAVAUX).is_empty();
        visible_steps(&self.project_config(), has_selected_type)
    }

    /// Identity of the step the user is on.
    pub fn active_step(&self) -> StepId {
        let steps = self.visible_steps();
        steps
            .get(self.current_step)
            .or_else(|| steps.last())
            .copied()
            .unwrap_or(StepId::Summary)
    }

    /// Overwrite one field and mark it touched. If the change shrinks the
    /// filtered step list under the active index, the index is clamped.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        self.touched.insert(name.clone());
        self.data.set(name, value);
        self.clamp_to_visible();
    }

    /// Atomic multi-field overwrite used by derived calculations and applied
    /// AI suggestions; does not mark anything touched.
    pub fn set_fields(&mut self, values: impl IntoIterator<Item = (String, FieldValue)>) {
        self.data.merge(values);
        self.clamp_to_visible();
    }

    pub fn set_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    pub fn clear_error(&mut self, field: &str) {
        self.errors.remove(field);
    }

    /// Replace the whole error map; each validation pass owns it entirely.
    pub fn set_errors(&mut self, errors: BTreeMap<String, String>) {
        self.errors = errors;
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Advance one step, clamped to the last visible step. Does not
    /// validate; callers run the validator first and abort on errors.
    pub fn next_step(&mut self) {
        let last = self.visible_steps().len().saturating_sub(1);
        self.current_step = (self.current_step + 1).min(last);
    }

    pub fn prev_step(&mut self) {
        self.current_step = self.current_step.saturating_sub(1);
    }

    /// Unconditional jump, clamped into the visible range. Any
    /// cannot-skip-ahead policy belongs to the caller.
    pub fn go_to_step(&mut self, index: usize) {
        let last = self.visible_steps().len().saturating_sub(1);
        self.current_step = index.min(last);
    }

    /// Terminal flag; set once by the explicit finalize action.
    pub fn complete(&mut self) {
        self.is_complete = true;
    }

    /// Back to the initial default state. Clearing the persisted snapshot is
    /// the session layer's job.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Progress against the *full* step list, not the filtered one, so the
    /// percentage stays stable while steps appear and disappear.
    pub fn progress_percent(&self) -> u8 {
        let denominator = (TOTAL_STEPS - 1) as f64;
        ((self.current_step as f64 / denominator) * 100.0).round() as u8
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            data: self.data.clone(),
            current_step: self.current_step,
        }
    }

    /// Replace payload and position from a snapshot; errors and touched
    /// flags are transient and start clean.
    pub fn restore(&mut self, snapshot: FormSnapshot) {
        self.data = snapshot.data;
        self.current_step = snapshot.current_step;
        self.errors.clear();
        self.touched.clear();
        self.clamp_to_visible();
    }

    fn ai_override(&self) -> Option<ConfigOverride> {
        match self.data.get(fields::AI_PROJECT_CONFIG) {
            Some(FieldValue::Other(value)) if !value.is_null() => {
                serde_json::from_value(value.clone()).ok()
            }
            _ => None,
        }
    }

    fn clamp_to_visible(&mut self) {
        let last = self.visible_steps().len().saturating_sub(1);
        if self.current_step > last {
            self.current_step = last;
        }
    }
}
