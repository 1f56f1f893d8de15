//! Flat form payload shared with the backend.
//!
//! The declaration form is a single flat namespace of named fields whose
//! values mirror what the session endpoint exchanges as JSON: strings,
//! booleans, string arrays for multi-select inputs, and free-form JSON for
//! the few structured fields (attachments, cadastral plan sketch, AI
//! configuration override). Absent fields always read as empty.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Well-known field names referenced by the registry, the validators and the
/// derived-surface calculations. The full namespace is open; these are only
/// the names the engine itself needs to address.
pub mod fields {
    pub const TYPE_DECLARANT: &str = "typeDeclarant";
    pub const CIVILITE: &str = "civilite";
    pub const NOM: &str = "nom";
    pub const PRENOM: &str = "prenom";
    pub const DATE_NAISSANCE: &str = "dateNaissance";
    pub const DENOMINATION: &str = "denomination";
    pub const SIRET: &str = "siret";
    pub const REPRESENTANT_NOM: &str = "representantNom";
    pub const REPRESENTANT_PRENOM: &str = "representantPrenom";

    pub const ADRESSE: &str = "adresse";
    pub const CODE_POSTAL: &str = "codePostal";
    pub const VILLE: &str = "ville";
    pub const PAYS: &str = "pays";
    pub const EMAIL: &str = "email";
    pub const TELEPHONE: &str = "telephone";

    pub const TERRAIN_ADRESSE: &str = "terrainAdresse";
    pub const TERRAIN_CODE_POSTAL: &str = "terrainCodePostal";
    pub const TERRAIN_VILLE: &str = "terrainVille";
    pub const PREFIXE: &str = "prefixe";
    pub const SECTION: &str = "section";
    pub const NUMERO_PARCELLE: &str = "numeroParcelle";
    pub const REFERENCE_CADASTRALE: &str = "referenceCadastrale";
    pub const SURFACE_TERRAIN: &str = "surfaceTerrain";
    pub const CERTIFICAT_URBANISME: &str = "certificatUrbanisme";
    pub const LOTISSEMENT: &str = "lotissement";

    pub const TYPE_TRAVAUX: &str = "typeTravaux";
    pub const NATURE_TRAVAUX: &str = "natureTravaux";
    pub const AUTRE_NATURE_TRAVAUX: &str = "autreNatureTravaux";
    pub const DESCRIPTION_PROJET: &str = "descriptionProjet";

    pub const COULEUR_FACADE: &str = "couleurFacade";
    pub const MATERIAU_FACADE: &str = "materiauFacade";
    pub const COULEUR_TOITURE: &str = "couleurToiture";
    pub const MATERIAU_TOITURE: &str = "materiauToiture";
    pub const HAUTEUR_CONSTRUCTION: &str = "hauteurConstruction";
    pub const MODE_UTILISATION: &str = "modeUtilisation";
    pub const TYPE_RESIDENCE: &str = "typeResidence";

    pub const SURFACE_LOGEMENT_EXISTANTE: &str = "surfaceLogementExistante";
    pub const SURFACE_LOGEMENT_CREEE: &str = "surfaceLogementCreee";
    pub const SURFACE_LOGEMENT_SUPPRIMEE: &str = "surfaceLogementSupprimee";
    pub const SURFACE_LOGEMENT_TOTAL: &str = "surfaceLogementTotal";
    pub const SURFACE_ANNEXE_EXISTANTE: &str = "surfaceAnnexeExistante";
    pub const SURFACE_ANNEXE_CREEE: &str = "surfaceAnnexeCreee";
    pub const SURFACE_ANNEXE_SUPPRIMEE: &str = "surfaceAnnexeSupprimee";
    pub const SURFACE_ANNEXE_TOTAL: &str = "surfaceAnnexeTotal";
    pub const SURFACE_PLANCHER_EXISTANTE: &str = "surfacePlancherExistante";
    pub const SURFACE_PLANCHER_CREEE: &str = "surfacePlancherCreee";
    pub const SURFACE_PLANCHER_SUPPRIMEE: &str = "surfacePlancherSupprimee";
    pub const SURFACE_PLANCHER_TOTALE: &str = "surfacePlancherTotale";
    pub const EMPRISE_SOL_EXISTANTE: &str = "empriseSolExistante";
    pub const EMPRISE_SOL_CREEE: &str = "empriseSolCreee";
    pub const EMPRISE_SOL_SUPPRIMEE: &str = "empriseSolSupprimee";
    pub const EMPRISE_SOL_TOTALE: &str = "empriseSolTotale";

    pub const ENGAGEMENT_EXACTITUDE: &str = "engagementExactitude";
    pub const ENGAGEMENT_REGLEMENTATION: &str = "engagementReglementation";
    pub const DATE_DECLARATION: &str = "dateDeclaration";
    pub const LIEU_DECLARATION: &str = "lieuDeclaration";

    pub const AI_PROJECT_CONFIG: &str = "aiProjectConfig";
}

/// One form field value, in the shapes the wire format actually carries.
///
/// Deserialization is untagged: booleans, strings and string arrays map to
/// their dedicated variants, everything else (numbers, null, nested objects)
/// lands in [`FieldValue::Other`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Text(String),
    List(Vec<String>),
    Other(serde_json::Value),
}

impl FieldValue {
    /// The text content, or `None` for non-text variants.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the value counts as "not filled in".
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Bool(b) => !b,
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Other(v) => v.is_null(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        FieldValue::Other(value)
    }
}

const NO_TAGS: &[String] = &[];

/// The whole form payload: field name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, FieldValue>);

impl FormData {
    /// An empty payload with no pre-filled fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// The payload a fresh wizard session starts from. Only fields with a
    /// meaningful non-empty default are pre-filled.
    pub fn defaults() -> Self {
        let mut data = Self::new();
        data.set(fields::TYPE_DECLARANT, "particulier");
        data.set(fields::PAYS, "France");
        data.set(fields::CERTIFICAT_URBANISME, "non");
        data.set(fields::LOTISSEMENT, "non");
        data.set(fields::TYPE_TRAVAUX, "construction");
        data.set(fields::MODE_UTILISATION, "personnel");
        data.set(fields::TYPE_RESIDENCE, "principale");
        data
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Text content of a field; absent or non-text fields read as `""`.
    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(FieldValue::as_text).unwrap_or("")
    }

    /// Boolean content of a field; anything but an explicit `true` is `false`.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.get(name), Some(FieldValue::Bool(true)))
    }

    /// Multi-select content of a field; absent or non-list fields read empty.
    pub fn tags(&self, name: &str) -> &[String] {
        match self.get(name) {
            Some(FieldValue::List(items)) => items,
            _ => NO_TAGS,
        }
    }

    /// Whether the field is absent or holds an empty value.
    pub fn is_blank(&self, name: &str) -> bool {
        self.get(name).is_none_or(FieldValue::is_empty)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.0.remove(name)
    }

    /// Overwrite several fields at once.
    pub fn merge(&mut self, values: impl IntoIterator<Item = (String, FieldValue)>) {
        self.0.extend(values);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }
}
