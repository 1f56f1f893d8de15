//! Step-level validation.
//!
//! `validate_step` inspects one step's slice of the form payload and returns
//! a field-to-message map. A non-empty map blocks navigation; the mapping
//! keys are the field names the UI anchors inline errors to. The function is
//! total: any step, any payload, never a panic.

use std::collections::BTreeMap;

use crate::models::{FormData, fields};
use crate::steps::StepId;
use crate::validation::rules;

type StepErrors = BTreeMap<String, String>;

/// Validate the step at a full-list index. Out-of-range indices are treated
/// as always-valid review steps.
pub fn validate_step_index(index: usize, data: &FormData) -> StepErrors {
    match StepId::from_full_index(index) {
        Some(step) => validate_step(step, data),
        None => StepErrors::new(),
    }
}

/// Validate one wizard step against the current payload.
pub fn validate_step(step: StepId, data: &FormData) -> StepErrors {
    let mut errors = StepErrors::new();

    match step {
        StepId::Declarant => {
            if data.is_blank(fields::TYPE_DECLARANT) {
                errors.insert(
                    fields::TYPE_DECLARANT.to_string(),
                    "Veuillez sélectionner votre qualité (particulier ou personne morale)"
                        .to_string(),
                );
            }
        }

        StepId::Identity => match data.text(fields::TYPE_DECLARANT) {
            "particulier" => {
                if data.is_blank(fields::CIVILITE) {
                    errors.insert(
                        fields::CIVILITE.to_string(),
                        "La civilité est requise".to_string(),
                    );
                }
                check(&mut errors, fields::NOM, || {
                    rules::validate_name(data.text(fields::NOM), "Le nom")
                });
                check(&mut errors, fields::PRENOM, || {
                    rules::validate_name(data.text(fields::PRENOM), "Le prénom")
                });
                check(&mut errors, fields::DATE_NAISSANCE, || {
                    rules::validate_date(data.text(fields::DATE_NAISSANCE))
                });
            }
            "personne_morale" => {
                check(&mut errors, fields::DENOMINATION, || {
                    rules::validate_required(data.text(fields::DENOMINATION), "La dénomination")
                });
                check(&mut errors, fields::SIRET, || {
                    rules::validate_siret(data.text(fields::SIRET))
                });
                check(&mut errors, fields::REPRESENTANT_NOM, || {
                    rules::validate_name(
                        data.text(fields::REPRESENTANT_NOM),
                        "Le nom du représentant",
                    )
                });
                check(&mut errors, fields::REPRESENTANT_PRENOM, || {
                    rules::validate_name(
                        data.text(fields::REPRESENTANT_PRENOM),
                        "Le prénom du représentant",
                    )
                });
            }
            _ => {}
        },

        StepId::Contact => {
            let adresse = data.text(fields::ADRESSE);
            if adresse.trim().is_empty() {
                errors.insert(
                    fields::ADRESSE.to_string(),
                    "L'adresse est requise".to_string(),
                );
            } else if adresse.trim().chars().count() < 5 {
                errors.insert(
                    fields::ADRESSE.to_string(),
                    "L'adresse semble trop courte".to_string(),
                );
            }
            check(&mut errors, fields::CODE_POSTAL, || {
                rules::validate_postal_code(data.text(fields::CODE_POSTAL))
            });
            check(&mut errors, fields::VILLE, || {
                rules::validate_required(data.text(fields::VILLE), "La ville")
            });
            check(&mut errors, fields::EMAIL, || {
                rules::validate_email(data.text(fields::EMAIL))
            });
            check(&mut errors, fields::TELEPHONE, || {
                rules::validate_phone(data.text(fields::TELEPHONE))
            });
        }

        StepId::Terrain => {
            check(&mut errors, fields::TERRAIN_ADRESSE, || {
                rules::validate_required(
                    data.text(fields::TERRAIN_ADRESSE),
                    "L'adresse du terrain",
                )
            });
            check(&mut errors, fields::TERRAIN_CODE_POSTAL, || {
                rules::validate_postal_code(data.text(fields::TERRAIN_CODE_POSTAL))
            });
            check(&mut errors, fields::TERRAIN_VILLE, || {
                rules::validate_required(data.text(fields::TERRAIN_VILLE), "La ville du terrain")
            });
            // The three cadastral parts report under one synthetic key.
            check(&mut errors, fields::REFERENCE_CADASTRALE, || {
                rules::validate_cadastral_reference(
                    data.text(fields::PREFIXE),
                    data.text(fields::SECTION),
                    data.text(fields::NUMERO_PARCELLE),
                )
            });
            check(&mut errors, fields::SURFACE_TERRAIN, || {
                rules::validate_surface(data.text(fields::SURFACE_TERRAIN), "La superficie")
            });
        }

        StepId::Works => {
            if data.is_blank(fields::TYPE_TRAVAUX) {
                errors.insert(
                    fields::TYPE_TRAVAUX.to_string(),
                    "Le type de travaux est requis".to_string(),
                );
            }
            if data.tags(fields::NATURE_TRAVAUX).is_empty() {
                errors.insert(
                    fields::NATURE_TRAVAUX.to_string(),
                    "Veuillez sélectionner au moins une nature de travaux".to_string(),
                );
            }
        }

        StepId::Description => {
            let description = data.text(fields::DESCRIPTION_PROJET);
            if description.trim().is_empty() {
                errors.insert(
                    fields::DESCRIPTION_PROJET.to_string(),
                    "La description du projet est requise".to_string(),
                );
            } else if description.trim().chars().count() < 20 {
                errors.insert(
                    fields::DESCRIPTION_PROJET.to_string(),
                    "La description est trop courte (minimum 20 caractères)".to_string(),
                );
            }
        }

        StepId::Surfaces => {
            check(&mut errors, fields::SURFACE_PLANCHER_CREEE, || {
                rules::validate_surface(data.text(fields::SURFACE_PLANCHER_CREEE), "La surface")
            });
            check(&mut errors, fields::EMPRISE_SOL_CREEE, || {
                rules::validate_surface(data.text(fields::EMPRISE_SOL_CREEE), "La surface")
            });
        }

        StepId::Commitments => {
            if !data.flag(fields::ENGAGEMENT_EXACTITUDE) {
                errors.insert(
                    fields::ENGAGEMENT_EXACTITUDE.to_string(),
                    "Vous devez attester de l'exactitude des informations fournies".to_string(),
                );
            }
            if !data.flag(fields::ENGAGEMENT_REGLEMENTATION) {
                errors.insert(
                    fields::ENGAGEMENT_REGLEMENTATION.to_string(),
                    "Vous devez vous engager à respecter la réglementation".to_string(),
                );
            }
            check(&mut errors, fields::LIEU_DECLARATION, || {
                rules::validate_required(data.text(fields::LIEU_DECLARATION), "Le lieu de signature")
            });
        }

        // Attachments, the cadastral sketch and the summary never block.
        StepId::Attachments | StepId::CadastralPlan | StepId::Summary => {}
    }

    errors
}

fn check(errors: &mut StepErrors, field: &str, rule: impl FnOnce() -> Result<(), String>) {
    if let Err(message) = rule() {
        errors.insert(field.to_string(), message);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::steps::TOTAL_STEPS;

    fn filled_identity() -> FormData {
        let mut data = FormData::defaults();
        data.set(fields::CIVILITE, "M.");
        data.set(fields::NOM, "Durand");
        data.set(fields::PRENOM, "Jean");
        data
    }

    #[test]
    fn every_step_validates_an_empty_payload_without_panicking() {
        let data = FormData::new();

        for index in 0..TOTAL_STEPS {
            let _ = validate_step_index(index, &data);
        }
    }

    #[test]
    fn out_of_range_index_is_always_valid() {
        let errors = validate_step_index(99, &FormData::new());

        assert!(errors.is_empty());
    }

    #[test]
    fn declarant_step_requires_a_choice() {
        let errors = validate_step(StepId::Declarant, &FormData::new());

        assert!(errors.contains_key(fields::TYPE_DECLARANT));

        let errors = validate_step(StepId::Declarant, &FormData::defaults());
        assert!(errors.is_empty());
    }

    #[test]
    fn identity_step_branches_on_declarant_kind() {
        let mut data = FormData::defaults();
        let errors = validate_step(StepId::Identity, &data);
        assert!(errors.contains_key(fields::NOM));
        assert!(errors.contains_key(fields::PRENOM));
        assert!(!errors.contains_key(fields::SIRET));

        data.set(fields::TYPE_DECLARANT, "personne_morale");
        let errors = validate_step(StepId::Identity, &data);
        assert!(errors.contains_key(fields::DENOMINATION));
        assert!(errors.contains_key(fields::SIRET));
        assert!(!errors.contains_key(fields::NOM));
    }

    #[test]
    fn identity_step_passes_for_a_complete_individual() {
        let mut data = filled_identity();
        data.set(fields::DATE_NAISSANCE, "29/02/2020");

        let errors = validate_step(StepId::Identity, &data);

        assert_eq!(errors, StepErrors::new());
    }

    #[test]
    fn identity_step_flags_birth_date_only_when_present_and_invalid() {
        let data = filled_identity();
        assert!(!validate_step(StepId::Identity, &data).contains_key(fields::DATE_NAISSANCE));

        let mut data = filled_identity();
        data.set(fields::DATE_NAISSANCE, "31/04/2020");
        assert!(validate_step(StepId::Identity, &data).contains_key(fields::DATE_NAISSANCE));
    }

    #[test]
    fn contact_step_checks_address_length_and_formats() {
        let mut data = FormData::new();
        data.set(fields::ADRESSE, "5 rue");
        data.set(fields::CODE_POSTAL, "75001");
        data.set(fields::VILLE, "Paris");
        data.set(fields::EMAIL, "jean@exemple.fr");

        let errors = validate_step(StepId::Contact, &data);
        assert_eq!(errors, StepErrors::new());

        data.set(fields::ADRESSE, "5 r");
        data.set(fields::TELEPHONE, "12345");
        let errors = validate_step(StepId::Contact, &data);
        assert!(errors.contains_key(fields::ADRESSE));
        assert!(errors.contains_key(fields::TELEPHONE));
    }

    #[test]
    fn terrain_step_reports_cadastral_parts_under_one_key() {
        let mut data = FormData::new();
        data.set(fields::TERRAIN_ADRESSE, "Chemin des Vignes");
        data.set(fields::TERRAIN_CODE_POSTAL, "33000");
        data.set(fields::TERRAIN_VILLE, "Bordeaux");

        let errors = validate_step(StepId::Terrain, &data);
        assert!(errors.contains_key(fields::REFERENCE_CADASTRALE));

        data.set(fields::SECTION, "AB");
        data.set(fields::NUMERO_PARCELLE, "123");
        let errors = validate_step(StepId::Terrain, &data);
        assert_eq!(errors, StepErrors::new());
    }

    #[test]
    fn works_step_requires_at_least_one_nature_tag() {
        let mut data = FormData::defaults();
        let errors = validate_step(StepId::Works, &data);
        assert!(errors.contains_key(fields::NATURE_TRAVAUX));

        data.set(fields::NATURE_TRAVAUX, vec!["piscine".to_string()]);
        let errors = validate_step(StepId::Works, &data);
        assert_eq!(errors, StepErrors::new());
    }

    #[test]
    fn description_step_enforces_twenty_trimmed_characters() {
        let mut data = FormData::new();
        data.set(fields::DESCRIPTION_PROJET, "   trop court   ");
        assert!(validate_step(StepId::Description, &data).contains_key(fields::DESCRIPTION_PROJET));

        data.set(
            fields::DESCRIPTION_PROJET,
            "Construction d'une piscine enterrée de 8x4m",
        );
        assert!(validate_step(StepId::Description, &data).is_empty());
    }

    #[test]
    fn commitments_step_requires_both_attestations_and_a_place() {
        let mut data = FormData::new();
        let errors = validate_step(StepId::Commitments, &data);
        assert_eq!(errors.len(), 3);

        data.set(fields::ENGAGEMENT_EXACTITUDE, true);
        data.set(fields::ENGAGEMENT_REGLEMENTATION, true);
        data.set(fields::LIEU_DECLARATION, "Lyon");
        let errors = validate_step(StepId::Commitments, &data);
        assert_eq!(errors, StepErrors::new());
    }

    #[test]
    fn passive_steps_never_block() {
        let data = FormData::new();

        assert!(validate_step(StepId::Attachments, &data).is_empty());
        assert!(validate_step(StepId::CadastralPlan, &data).is_empty());
        assert!(validate_step(StepId::Summary, &data).is_empty());
    }
}
