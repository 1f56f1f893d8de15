//! Derived project configuration.
//!
//! A [`ProjectConfig`] is a plain immutable value recomputed from the selected
//! nature-of-works tags (and an optional AI override); it carries no lifecycle
//! of its own.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::project::{DocumentId, PdfSection};

/// Input widget kind of a type-specific follow-up question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Boolean,
    Select,
    Text,
    Number,
}

/// A follow-up question a project type adds to the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecificQuestion {
    pub field: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// The merged configuration driving required fields, the document checklist
/// and which optional wizard steps are visible.
///
/// Invariant: the optional sets are disjoint from their required counterparts;
/// the merge removes overlaps after the union ("required wins").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub required_fields: BTreeSet<String>,
    pub optional_fields: BTreeSet<String>,
    pub required_documents: BTreeSet<DocumentId>,
    pub optional_documents: BTreeSet<DocumentId>,
    pub pdf_sections: BTreeSet<PdfSection>,
    pub specific_questions: Vec<SpecificQuestion>,
    pub use_ai: bool,
}

impl ProjectConfig {
    pub fn is_field_required(&self, field: &str) -> bool {
        self.required_fields.contains(field)
    }

    pub fn is_document_required(&self, doc: DocumentId) -> bool {
        self.required_documents.contains(&doc)
    }

    pub fn has_section(&self, section: PdfSection) -> bool {
        self.pdf_sections.contains(&section)
    }

    /// Drops from each optional set whatever its required counterpart
    /// already contains.
    pub(crate) fn enforce_disjointness(&mut self) {
        let required_fields = self.required_fields.clone();
        self.optional_fields.retain(|f| !required_fields.contains(f));
        let required_documents = self.required_documents.clone();
        self.optional_documents
            .retain(|d| !required_documents.contains(d));
    }
}

/// Partial configuration produced by the AI service for non-catalog projects.
///
/// Documents and sections arrive as raw tags so that suggestions the catalog
/// does not know yet can be carried without failing deserialization; unknown
/// tags are dropped when the override is merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigOverride {
    pub required_fields: Vec<String>,
    pub optional_fields: Vec<String>,
    pub required_documents: Vec<String>,
    pub optional_documents: Vec<String>,
    pub pdf_sections: Vec<String>,
    pub specific_questions: Vec<SpecificQuestion>,
    pub use_ai: bool,
}
