//! Per-project-type configuration tables and the merge that combines them.
//!
//! Each catalogued [`ProjectType`] declares which fields it requires, which
//! DP documents it needs, which optional PDF sections it enables and which
//! follow-up questions it asks. Selecting several types unions everything,
//! then removes from each optional set whatever became required.

use std::collections::BTreeSet;

use crate::models::{
    ConfigOverride, DocumentId, PdfSection, ProjectConfig, ProjectType, QuestionKind,
    SpecificQuestion,
};

struct QuestionDef {
    field: &'static str,
    label: &'static str,
    kind: QuestionKind,
    options: &'static [&'static str],
}

impl QuestionDef {
    fn to_question(&self) -> SpecificQuestion {
        SpecificQuestion {
            field: self.field.to_string(),
            label: self.label.to_string(),
            kind: self.kind,
            options: self.options.iter().map(|o| o.to_string()).collect(),
        }
    }
}

struct TypeDefinition {
    required_fields: &'static [&'static str],
    optional_fields: &'static [&'static str],
    required_documents: &'static [DocumentId],
    optional_documents: &'static [DocumentId],
    pdf_sections: &'static [PdfSection],
    specific_questions: &'static [QuestionDef],
    use_ai: bool,
}

use DocumentId::{Dp1, Dp2, Dp3, Dp4, Dp5, Dp6, Dp7, Dp8};
use PdfSection::{Description, Materiaux, Surfaces, Terrain, Toiture};

/// Total mapping from project type to its table entry; adding a variant
/// without a row here is a compile error.
fn definition(ty: ProjectType) -> &'static TypeDefinition {
    match ty {
        ProjectType::Piscine => &TypeDefinition {
            required_fields: &["surfaceTerrain", "surfacePlancherCreee"],
            optional_fields: &["hauteurConstruction"],
            required_documents: &[Dp1, Dp2, Dp3, Dp6, Dp7, Dp8],
            optional_documents: &[Dp4, Dp5],
            pdf_sections: &[Terrain, Surfaces, Description],
            specific_questions: &[
                QuestionDef {
                    field: "piscineCouverture",
                    label: "Piscine couverte ?",
                    kind: QuestionKind::Boolean,
                    options: &[],
                },
                QuestionDef {
                    field: "piscineSecurite",
                    label: "Système de sécurité",
                    kind: QuestionKind::Select,
                    options: &["Alarme", "Barrière", "Couverture", "Abri"],
                },
                QuestionDef {
                    field: "piscineDimensions",
                    label: "Dimensions du bassin (L x l)",
                    kind: QuestionKind::Text,
                    options: &[],
                },
            ],
            use_ai: false,
        },
        ProjectType::Extension => &TypeDefinition {
            required_fields: &[
                "surfaceTerrain",
                "surfacePlancherCreee",
                "hauteurConstruction",
                "couleurFacade",
                "materiauFacade",
                "couleurToiture",
                "materiauToiture",
            ],
            optional_fields: &[],
            required_documents: &[Dp1, Dp2, Dp3, Dp4, Dp5, Dp6, Dp7, Dp8],
            optional_documents: &[],
            pdf_sections: &[Terrain, Surfaces, Description, Materiaux, Toiture],
            specific_questions: &[
                QuestionDef {
                    field: "extensionUsage",
                    label: "Destination de l'extension",
                    kind: QuestionKind::Select,
                    options: &["Habitation", "Garage", "Bureau", "Autre"],
                },
                QuestionDef {
                    field: "extensionEtages",
                    label: "Nombre de niveaux",
                    kind: QuestionKind::Number,
                    options: &[],
                },
            ],
            use_ai: false,
        },
        ProjectType::Cloture => &TypeDefinition {
            required_fields: &["hauteurConstruction"],
            optional_fields: &["materiauFacade", "couleurFacade"],
            required_documents: &[Dp1, Dp2, Dp4, Dp5, Dp7],
            optional_documents: &[Dp3, Dp6, Dp8],
            pdf_sections: &[Terrain, Description],
            specific_questions: &[
                QuestionDef {
                    field: "clotureType",
                    label: "Type de clôture",
                    kind: QuestionKind::Select,
                    options: &["Mur", "Grillage", "Bois", "PVC", "Mixte"],
                },
                QuestionDef {
                    field: "cloturePortail",
                    label: "Inclut un portail ?",
                    kind: QuestionKind::Boolean,
                    options: &[],
                },
                QuestionDef {
                    field: "clotureLineaire",
                    label: "Linéaire total (m)",
                    kind: QuestionKind::Number,
                    options: &[],
                },
            ],
            use_ai: false,
        },
        ProjectType::Garage => &TypeDefinition {
            required_fields: &[
                "surfaceTerrain",
                "surfacePlancherCreee",
                "hauteurConstruction",
                "materiauFacade",
                "materiauToiture",
            ],
            optional_fields: &["couleurFacade", "couleurToiture"],
            required_documents: &[Dp1, Dp2, Dp3, Dp4, Dp6, Dp7, Dp8],
            optional_documents: &[Dp5],
            pdf_sections: &[Terrain, Surfaces, Description, Materiaux],
            specific_questions: &[
                QuestionDef {
                    field: "garageType",
                    label: "Type",
                    kind: QuestionKind::Select,
                    options: &["Garage fermé", "Carport ouvert", "Abri voiture"],
                },
                QuestionDef {
                    field: "garageVehicules",
                    label: "Nombre de véhicules",
                    kind: QuestionKind::Number,
                    options: &[],
                },
            ],
            use_ai: false,
        },
        ProjectType::AbriJardin => &TypeDefinition {
            required_fields: &["surfacePlancherCreee", "hauteurConstruction"],
            optional_fields: &["materiauFacade", "materiauToiture", "couleurFacade"],
            required_documents: &[Dp1, Dp2, Dp3, Dp4, Dp6, Dp7],
            optional_documents: &[Dp5, Dp8],
            pdf_sections: &[Terrain, Surfaces, Description],
            specific_questions: &[QuestionDef {
                field: "abriUsage",
                label: "Usage prévu",
                kind: QuestionKind::Select,
                options: &["Rangement", "Atelier", "Local technique", "Autre"],
            }],
            use_ai: false,
        },
        ProjectType::Veranda => &TypeDefinition {
            required_fields: &[
                "surfacePlancherCreee",
                "hauteurConstruction",
                "materiauFacade",
                "materiauToiture",
                "couleurFacade",
            ],
            optional_fields: &["couleurToiture"],
            required_documents: &[Dp1, Dp2, Dp3, Dp4, Dp5, Dp6, Dp7, Dp8],
            optional_documents: &[],
            pdf_sections: &[Terrain, Surfaces, Description, Materiaux, Toiture],
            specific_questions: &[
                QuestionDef {
                    field: "verandaVitrages",
                    label: "Type de vitrage",
                    kind: QuestionKind::Select,
                    options: &["Simple", "Double", "Triple"],
                },
                QuestionDef {
                    field: "verandaChauffee",
                    label: "Véranda chauffée ?",
                    kind: QuestionKind::Boolean,
                    options: &[],
                },
            ],
            use_ai: false,
        },
        ProjectType::Terrasse => &TypeDefinition {
            required_fields: &["surfacePlancherCreee"],
            optional_fields: &["hauteurConstruction"],
            required_documents: &[Dp1, Dp2, Dp3, Dp6, Dp7],
            optional_documents: &[Dp4, Dp5, Dp8],
            pdf_sections: &[Terrain, Surfaces, Description],
            specific_questions: &[
                QuestionDef {
                    field: "terrasseMateriau",
                    label: "Matériau du revêtement",
                    kind: QuestionKind::Select,
                    options: &["Bois", "Composite", "Carrelage", "Pierre", "Béton"],
                },
                QuestionDef {
                    field: "terrasseSurelevee",
                    label: "Terrasse surélevée ?",
                    kind: QuestionKind::Boolean,
                    options: &[],
                },
            ],
            use_ai: false,
        },
        ProjectType::Toiture => &TypeDefinition {
            required_fields: &["materiauToiture", "couleurToiture"],
            optional_fields: &["couleurFacade", "materiauFacade"],
            required_documents: &[Dp1, Dp4, Dp5, Dp6, Dp7, Dp8],
            optional_documents: &[Dp2, Dp3],
            pdf_sections: &[Terrain, Description, Toiture],
            specific_questions: &[
                QuestionDef {
                    field: "toitureType",
                    label: "Type de travaux",
                    kind: QuestionKind::Select,
                    options: &[
                        "Réfection complète",
                        "Changement matériau",
                        "Modification pente",
                        "Ravalement façade",
                    ],
                },
                QuestionDef {
                    field: "toitureIsolation",
                    label: "Isolation thermique ?",
                    kind: QuestionKind::Boolean,
                    options: &[],
                },
            ],
            use_ai: false,
        },
        ProjectType::Autre => &TypeDefinition {
            required_fields: &[],
            optional_fields: &[
                "surfaceTerrain",
                "surfacePlancherCreee",
                "hauteurConstruction",
                "couleurFacade",
                "materiauFacade",
                "couleurToiture",
                "materiauToiture",
            ],
            required_documents: &[Dp1, Dp7],
            optional_documents: &[Dp2, Dp3, Dp4, Dp5, Dp6, Dp8],
            pdf_sections: &[Terrain, Surfaces, Description],
            specific_questions: &[],
            use_ai: true,
        },
    }
}

/// Minimum CERFA attachments, required regardless of project type.
const BASE_DOCUMENTS: [DocumentId; 2] = [Dp1, Dp7];

/// Configuration shown before any type is selected: minimal required
/// documents but every optional section enabled, so no step is hidden yet.
fn default_config() -> ProjectConfig {
    let required_documents: BTreeSet<DocumentId> = BASE_DOCUMENTS.into();
    let mut config = ProjectConfig {
        required_fields: BTreeSet::new(),
        optional_fields: BTreeSet::new(),
        optional_documents: DocumentId::ALL.into(),
        required_documents,
        pdf_sections: PdfSection::ALL.into(),
        specific_questions: Vec::new(),
        use_ai: false,
    };
    config.enforce_disjointness();
    config
}

/// Merged configuration for the selected project types.
///
/// Pure and deterministic for a given input. Set-valued parts are
/// order-independent; `specific_questions` keeps selection order and
/// deduplicates by field name, first occurrence winning.
pub fn project_config(selected: &[ProjectType]) -> ProjectConfig {
    if selected.is_empty() {
        return default_config();
    }

    let mut config = ProjectConfig::default();
    let mut seen_questions: BTreeSet<&'static str> = BTreeSet::new();

    for &ty in selected {
        let def = definition(ty);
        config
            .required_fields
            .extend(def.required_fields.iter().map(|f| f.to_string()));
        config
            .optional_fields
            .extend(def.optional_fields.iter().map(|f| f.to_string()));
        config.required_documents.extend(def.required_documents);
        config.optional_documents.extend(def.optional_documents);
        config.pdf_sections.extend(def.pdf_sections);
        for question in def.specific_questions {
            if seen_questions.insert(question.field) {
                config.specific_questions.push(question.to_question());
            }
        }
        config.use_ai |= def.use_ai;
    }

    config.enforce_disjointness();
    config
}

/// Same as [`project_config`], from raw wire tags. Unknown tags are ignored
/// so that AI-suggested types outside the catalog do not break anything.
pub fn project_config_for_tags<'a, I>(tags: I) -> ProjectConfig
where
    I: IntoIterator<Item = &'a str>,
{
    let selected: Vec<ProjectType> = tags
        .into_iter()
        .filter_map(ProjectType::from_tag)
        .collect();
    project_config(&selected)
}

/// Merges an AI-produced override into a base configuration.
///
/// Union semantics throughout; questions already present (by field name)
/// keep their catalog version; disjointness is re-enforced afterwards so
/// required still beats optional. Unknown document or section tags in the
/// override are dropped.
pub fn apply_override(base: ProjectConfig, overlay: &ConfigOverride) -> ProjectConfig {
    let mut config = base;

    config
        .required_fields
        .extend(overlay.required_fields.iter().cloned());
    config
        .optional_fields
        .extend(overlay.optional_fields.iter().cloned());
    config.required_documents.extend(
        overlay
            .required_documents
            .iter()
            .filter_map(|t| DocumentId::from_tag(t)),
    );
    config.optional_documents.extend(
        overlay
            .optional_documents
            .iter()
            .filter_map(|t| DocumentId::from_tag(t)),
    );
    config.pdf_sections.extend(
        overlay
            .pdf_sections
            .iter()
            .filter_map(|t| PdfSection::from_tag(t)),
    );

    let existing: BTreeSet<String> = config
        .specific_questions
        .iter()
        .map(|q| q.field.clone())
        .collect();
    for question in &overlay.specific_questions {
        if !existing.contains(&question.field) {
            config.specific_questions.push(question.clone());
        }
    }

    config.use_ai |= overlay.use_ai;
    config.enforce_disjointness();
    config
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_selection_yields_maximal_default() {
        let config = project_config(&[]);

        assert!(config.required_fields.is_empty());
        assert_eq!(config.required_documents, BASE_DOCUMENTS.into());
        // All five sections enabled so every conditional step stays visible.
        assert_eq!(config.pdf_sections.len(), PdfSection::ALL.len());
        assert!(config.specific_questions.is_empty());
        assert!(!config.use_ai);
    }

    #[test]
    fn default_config_keeps_documents_disjoint() {
        let config = project_config(&[]);

        for doc in &config.required_documents {
            assert!(!config.optional_documents.contains(doc));
        }
        assert_eq!(config.optional_documents.len(), 6);
    }

    #[test]
    fn single_type_merge_is_idempotent() {
        let first = project_config(&[ProjectType::Piscine]);
        let second = project_config(&[ProjectType::Piscine]);

        assert_eq!(first, second);
    }

    #[test]
    fn set_parts_are_order_independent() {
        let ab = project_config(&[ProjectType::Piscine, ProjectType::Cloture]);
        let ba = project_config(&[ProjectType::Cloture, ProjectType::Piscine]);

        assert_eq!(ab.required_fields, ba.required_fields);
        assert_eq!(ab.optional_fields, ba.optional_fields);
        assert_eq!(ab.required_documents, ba.required_documents);
        assert_eq!(ab.optional_documents, ba.optional_documents);
        assert_eq!(ab.pdf_sections, ba.pdf_sections);
    }

    #[test]
    fn question_order_follows_selection_order() {
        let config = project_config(&[ProjectType::Cloture, ProjectType::Piscine]);

        assert_eq!(config.specific_questions[0].field, "clotureType");
        let fields: Vec<&str> = config
            .specific_questions
            .iter()
            .map(|q| q.field.as_str())
            .collect();
        assert!(fields.contains(&"piscineCouverture"));
    }

    #[test]
    fn required_wins_over_optional_for_all_pairs() {
        for &a in &ProjectType::ALL {
            for &b in &ProjectType::ALL {
                let config = project_config(&[a, b]);
                for field in &config.required_fields {
                    assert!(
                        !config.optional_fields.contains(field),
                        "{field} both required and optional for {a:?}+{b:?}"
                    );
                }
                for doc in &config.required_documents {
                    assert!(
                        !config.optional_documents.contains(doc),
                        "{doc:?} both required and optional for {a:?}+{b:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn cloture_height_requirement_beats_piscine_optional_height() {
        // Piscine lists hauteurConstruction as optional, clôture requires it.
        let config = project_config(&[ProjectType::Piscine, ProjectType::Cloture]);

        assert!(config.is_field_required("hauteurConstruction"));
        assert!(!config.optional_fields.contains("hauteurConstruction"));
    }

    #[test]
    fn unknown_tags_are_silently_ignored() {
        let config = project_config_for_tags(["piscine", "pergola", ""]);

        assert_eq!(config, project_config(&[ProjectType::Piscine]));
    }

    #[test]
    fn only_autre_flags_ai() {
        assert!(project_config(&[ProjectType::Autre]).use_ai);
        assert!(project_config(&[ProjectType::Piscine, ProjectType::Autre]).use_ai);
        assert!(!project_config(&[ProjectType::Piscine]).use_ai);
    }

    #[test]
    fn duplicate_selection_does_not_duplicate_questions() {
        let config = project_config(&[ProjectType::Piscine, ProjectType::Piscine]);

        let piscine_questions = config
            .specific_questions
            .iter()
            .filter(|q| q.field == "piscineCouverture")
            .count();
        assert_eq!(piscine_questions, 1);
    }

    #[test]
    fn override_unions_and_keeps_required_dominant() {
        let base = project_config(&[ProjectType::Autre]);
        let overlay = ConfigOverride {
            required_fields: vec![
                "surfaceTerrain".to_string(),
                "hauteurConstruction".to_string(),
            ],
            required_documents: vec!["dp2".to_string(), "dp99".to_string()],
            pdf_sections: vec!["materiaux".to_string(), "inconnu".to_string()],
            specific_questions: vec![SpecificQuestion {
                field: "pergolaType".to_string(),
                label: "Type de pergola".to_string(),
                kind: QuestionKind::Select,
                options: vec!["Adossée".to_string(), "Autoportée".to_string()],
            }],
            ..ConfigOverride::default()
        };

        let merged = apply_override(base, &overlay);

        assert!(merged.is_field_required("surfaceTerrain"));
        // Was optional for "autre"; promotion to required removes it there.
        assert!(!merged.optional_fields.contains("surfaceTerrain"));
        assert!(merged.is_document_required(DocumentId::Dp2));
        assert!(!merged.optional_documents.contains(&DocumentId::Dp2));
        assert!(merged.has_section(PdfSection::Materiaux));
        assert_eq!(merged.specific_questions.last().unwrap().field, "pergolaType");
    }

    #[test]
    fn override_does_not_replace_existing_questions() {
        let base = project_config(&[ProjectType::Piscine]);
        let overlay = ConfigOverride {
            specific_questions: vec![SpecificQuestion {
                field: "piscineCouverture".to_string(),
                label: "Remplacement".to_string(),
                kind: QuestionKind::Text,
                options: vec![],
            }],
            ..ConfigOverride::default()
        };

        let merged = apply_override(base, &overlay);

        let question = merged
            .specific_questions
            .iter()
            .find(|q| q.field == "piscineCouverture")
            .unwrap();
        assert_eq!(question.label, "Piscine couverte ?");
    }
}
