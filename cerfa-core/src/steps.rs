//! The ordered wizard step list and its project-type-driven filtering.
//!
//! The full list is fixed; what the user actually walks through is the
//! filtered list: always-visible steps plus any conditional step whose PDF
//! section the current configuration enables. Progress reporting, however,
//! is computed against the full list (see [`crate::store::FormStore`]).

use serde::{Deserialize, Serialize};

use crate::models::{PdfSection, ProjectConfig};

/// Identity of a wizard step, independent of its position in the filtered
/// list. Discriminants match the validator's step indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    Declarant,
    Identity,
    Contact,
    Terrain,
    Works,
    Description,
    Surfaces,
    Attachments,
    Commitments,
    CadastralPlan,
    Summary,
}

/// Static description of one step of the full list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    pub id: StepId,
    pub title: &'static str,
    pub always_visible: bool,
    /// When set, the step only shows if the configuration enables the section.
    pub requires_section: Option<PdfSection>,
}

/// Full ordered step list. Indices into this list are what the validator
/// understands; the store translates filtered positions back to these ids.
pub const ALL_STEPS: [StepInfo; 11] = [
    StepInfo {
        id: StepId::Declarant,
        title: "Profil",
        always_visible: true,
        requires_section: None,
    },
    StepInfo {
        id: StepId::Identity,
        title: "Identité",
        always_visible: true,
        requires_section: None,
    },
    StepInfo {
        id: StepId::Contact,
        title: "Coordonnées",
        always_visible: true,
        requires_section: None,
    },
    StepInfo {
        id: StepId::Terrain,
        title: "Terrain",
        always_visible: true,
        requires_section: None,
    },
    StepInfo {
        id: StepId::Works,
        title: "Projet",
        always_visible: true,
        requires_section: None,
    },
    StepInfo {
        id: StepId::Description,
        title: "Description",
        always_visible: true,
        requires_section: None,
    },
    StepInfo {
        id: StepId::Surfaces,
        title: "Surfaces",
        always_visible: false,
        requires_section: Some(PdfSection::Surfaces),
    },
    StepInfo {
        id: StepId::Attachments,
        title: "Documents",
        always_visible: true,
        requires_section: None,
    },
    StepInfo {
        id: StepId::Commitments,
        title: "Engagement",
        always_visible: true,
        requires_section: None,
    },
    StepInfo {
        id: StepId::CadastralPlan,
        title: "Plan cadastral",
        always_visible: false,
        requires_section: Some(PdfSection::Terrain),
    },
    StepInfo {
        id: StepId::Summary,
        title: "Récapitulatif",
        always_visible: true,
        requires_section: None,
    },
];

/// Number of steps in the full, unfiltered list.
pub const TOTAL_STEPS: usize = ALL_STEPS.len();

impl StepId {
    /// Position of this step in the full list.
    pub fn full_index(&self) -> usize {
        ALL_STEPS
            .iter()
            .position(|s| s.id == *self)
            .unwrap_or_default()
    }

    /// Step at a full-list index, if in range.
    pub fn from_full_index(index: usize) -> Option<StepId> {
        ALL_STEPS.get(index).map(|s| s.id)
    }
}

/// The effective step sequence for a configuration.
///
/// Before any project type is selected every step shows; afterwards a
/// conditional step shows only when its section is enabled.
pub fn visible_steps(config: &ProjectConfig, has_selected_type: bool) -> Vec<StepId> {
    ALL_STEPS
        .iter()
        .filter(|step| {
            if step.always_visible || !has_selected_type {
                return true;
            }
            match step.requires_section {
                Some(section) => config.has_section(section),
                None => true,
            }
        })
        .map(|step| step.id)
        .collect()
}
