//! Closed vocabularies of the declaration: project types, DP documents and
//! the optional PDF sections that gate wizard steps.

use serde::{Deserialize, Serialize};

/// Catalogued nature-of-works tags a declarant can select.
///
/// The set is closed on purpose: adding a type means adding a variant and the
/// compiler then forces a table entry in the registry. Tags coming from
/// outside (stored payloads, AI suggestions) go through [`ProjectType::from_tag`],
/// which ignores anything unknown instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Piscine,
    Extension,
    Cloture,
    Garage,
    AbriJardin,
    Veranda,
    Terrasse,
    Toiture,
    Autre,
}

impl ProjectType {
    pub const ALL: [ProjectType; 9] = [
        ProjectType::Piscine,
        ProjectType::Extension,
        ProjectType::Cloture,
        ProjectType::Garage,
        ProjectType::AbriJardin,
        ProjectType::Veranda,
        ProjectType::Terrasse,
        ProjectType::Toiture,
        ProjectType::Autre,
    ];

    /// Parse a wire tag. Unknown tags yield `None`; callers skip them.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "piscine" => Some(ProjectType::Piscine),
            "extension" => Some(ProjectType::Extension),
            "cloture" => Some(ProjectType::Cloture),
            "garage" => Some(ProjectType::Garage),
            "abri_jardin" => Some(ProjectType::AbriJardin),
            "veranda" => Some(ProjectType::Veranda),
            "terrasse" => Some(ProjectType::Terrasse),
            "toiture" => Some(ProjectType::Toiture),
            "autre" => Some(ProjectType::Autre),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ProjectType::Piscine => "piscine",
            ProjectType::Extension => "extension",
            ProjectType::Cloture => "cloture",
            ProjectType::Garage => "garage",
            ProjectType::AbriJardin => "abri_jardin",
            ProjectType::Veranda => "veranda",
            ProjectType::Terrasse => "terrasse",
            ProjectType::Toiture => "toiture",
            ProjectType::Autre => "autre",
        }
    }

    /// Display label shown in the type picker.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectType::Piscine => "Piscine",
            ProjectType::Extension => "Extension",
            ProjectType::Cloture => "Clôture / Portail",
            ProjectType::Garage => "Garage / Carport",
            ProjectType::AbriJardin => "Abri de jardin",
            ProjectType::Veranda => "Véranda",
            ProjectType::Terrasse => "Terrasse",
            ProjectType::Toiture => "Toiture / Ravalement",
            ProjectType::Autre => "Autre",
        }
    }
}

/// The DP attachment slots of the CERFA 13703 declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentId {
    Dp1,
    Dp2,
    Dp3,
    Dp4,
    Dp5,
    Dp6,
    Dp7,
    Dp8,
}

impl DocumentId {
    pub const ALL: [DocumentId; 8] = [
        DocumentId::Dp1,
        DocumentId::Dp2,
        DocumentId::Dp3,
        DocumentId::Dp4,
        DocumentId::Dp5,
        DocumentId::Dp6,
        DocumentId::Dp7,
        DocumentId::Dp8,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "dp1" => Some(DocumentId::Dp1),
            "dp2" => Some(DocumentId::Dp2),
            "dp3" => Some(DocumentId::Dp3),
            "dp4" => Some(DocumentId::Dp4),
            "dp5" => Some(DocumentId::Dp5),
            "dp6" => Some(DocumentId::Dp6),
            "dp7" => Some(DocumentId::Dp7),
            "dp8" => Some(DocumentId::Dp8),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            DocumentId::Dp1 => "dp1",
            DocumentId::Dp2 => "dp2",
            DocumentId::Dp3 => "dp3",
            DocumentId::Dp4 => "dp4",
            DocumentId::Dp5 => "dp5",
            DocumentId::Dp6 => "dp6",
            DocumentId::Dp7 => "dp7",
            DocumentId::Dp8 => "dp8",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentId::Dp1 => "DP1 - Plan de situation",
            DocumentId::Dp2 => "DP2 - Plan de masse",
            DocumentId::Dp3 => "DP3 - Plan de coupe",
            DocumentId::Dp4 => "DP4 - Façades et toitures",
            DocumentId::Dp5 => "DP5 - Représentation extérieure",
            DocumentId::Dp6 => "DP6 - Insertion paysagère",
            DocumentId::Dp7 => "DP7 - Photographie proche",
            DocumentId::Dp8 => "DP8 - Photographie lointaine",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DocumentId::Dp1 => "Plan permettant de situer le terrain dans la commune",
            DocumentId::Dp2 => "Plan montrant le projet par rapport aux limites du terrain",
            DocumentId::Dp3 => "Coupe du terrain et de la construction projetée",
            DocumentId::Dp4 => "Plans des façades et toitures, état initial et futur",
            DocumentId::Dp5 => "Document graphique montrant l'aspect extérieur",
            DocumentId::Dp6 => "Document graphique montrant le projet dans son environnement",
            DocumentId::Dp7 => "Photo du terrain dans son environnement proche",
            DocumentId::Dp8 => "Photo du terrain dans le paysage lointain",
        }
    }
}

/// Optional sections of the generated document. Conditional wizard steps are
/// shown only when the current configuration enables their section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfSection {
    Terrain,
    Surfaces,
    Description,
    Materiaux,
    Toiture,
}

impl PdfSection {
    pub const ALL: [PdfSection; 5] = [
        PdfSection::Terrain,
        PdfSection::Surfaces,
        PdfSection::Description,
        PdfSection::Materiaux,
        PdfSection::Toiture,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "terrain" => Some(PdfSection::Terrain),
            "surfaces" => Some(PdfSection::Surfaces),
            "description" => Some(PdfSection::Description),
            "materiaux" => Some(PdfSection::Materiaux),
            "toiture" => Some(PdfSection::Toiture),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            PdfSection::Terrain => "terrain",
            PdfSection::Surfaces => "surfaces",
            PdfSection::Description => "description",
            PdfSection::Materiaux => "materiaux",
            PdfSection::Toiture => "toiture",
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn project_type_tags_round_trip() {
        for ty in ProjectType::ALL {
            assert_eq!(ProjectType::from_tag(ty.tag()), Some(ty));
        }
    }

    #[test]
    fn unknown_project_tag_is_none() {
        assert_eq!(ProjectType::from_tag("pergola"), None);
        assert_eq!(ProjectType::from_tag(""), None);
    }

    #[test]
    fn document_tags_round_trip() {
        for doc in DocumentId::ALL {
            assert_eq!(DocumentId::from_tag(doc.tag()), Some(doc));
        }
        assert_eq!(DocumentId::from_tag("dp9"), None);
    }

    #[test]
    fn serde_uses_wire_tags() {
        let json = serde_json::to_string(&ProjectType::AbriJardin).unwrap();
        assert_eq!(json, "\"abri_jardin\"");

        let json = serde_json::to_string(&DocumentId::Dp3).unwrap();
        assert_eq!(json, "\"dp3\"");

        let section: PdfSection = serde_json::from_str("\"materiaux\"").unwrap();
        assert_eq!(section, PdfSection::Materiaux);
    }
}
