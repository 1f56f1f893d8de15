//! Auto-calculated surface totals for the surfaces step.
//!
//! The declarant enters existing/created/removed areas for the dwelling and
//! its annexes; the subtotals, the grand floor-area lines and the ground
//! footprint total are derived, not typed. The result feeds
//! [`crate::store::FormStore::set_fields`] so the derived fields are written
//! atomically and without marking anything touched.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{FieldValue, FormData, fields};

/// Parses a surface field leniently: blank or unparseable reads as zero,
/// mirroring how the form treats half-filled numeric inputs.
fn surface(data: &FormData, name: &str) -> Decimal {
    data.text(name).trim().parse().unwrap_or(Decimal::ZERO)
}

/// A strictly positive total renders as text, anything else as the empty
/// string so untouched groups keep their fields blank.
fn render(total: Decimal) -> FieldValue {
    if total > Decimal::ZERO {
        FieldValue::Text(total.normalize().to_string())
    } else {
        FieldValue::Text(String::new())
    }
}

/// Recomputes every derived surface field from the editable ones.
pub fn surface_totals(data: &FormData) -> BTreeMap<String, FieldValue> {
    let dwelling_existing = surface(data, fields::SURFACE_LOGEMENT_EXISTANTE);
    let dwelling_created = surface(data, fields::SURFACE_LOGEMENT_CREEE);
    let dwelling_removed = surface(data, fields::SURFACE_LOGEMENT_SUPPRIMEE);
    let dwelling_total = dwelling_existing + dwelling_created - dwelling_removed;

    let annex_existing = surface(data, fields::SURFACE_ANNEXE_EXISTANTE);
    let annex_created = surface(data, fields::SURFACE_ANNEXE_CREEE);
    let annex_removed = surface(data, fields::SURFACE_ANNEXE_SUPPRIMEE);
    let annex_total = annex_existing + annex_created - annex_removed;

    let floor_existing = dwelling_existing + annex_existing;
    let floor_created = dwelling_created + annex_created;
    let floor_removed = dwelling_removed + annex_removed;
    let floor_total = dwelling_total + annex_total;

    let footprint_existing = surface(data, fields::EMPRISE_SOL_EXISTANTE);
    let footprint_created = surface(data, fields::EMPRISE_SOL_CREEE);
    let footprint_removed = surface(data, fields::EMPRISE_SOL_SUPPRIMEE);
    let footprint_total = footprint_existing + footprint_created - footprint_removed;

    BTreeMap::from([
        (
            fields::SURFACE_LOGEMENT_TOTAL.to_string(),
            render(dwelling_total),
        ),
        (
            fields::SURFACE_ANNEXE_TOTAL.to_string(),
            render(annex_total),
        ),
        (
            fields::SURFACE_PLANCHER_EXISTANTE.to_string(),
            render(floor_existing),
        ),
        (
            fields::SURFACE_PLANCHER_CREEE.to_string(),
            render(floor_created),
        ),
        (
            fields::SURFACE_PLANCHER_SUPPRIMEE.to_string(),
            render(floor_removed),
        ),
        (
            fields::SURFACE_PLANCHER_TOTALE.to_string(),
            render(floor_total),
        ),
        (
            fields::EMPRISE_SOL_TOTALE.to_string(),
            render(footprint_total),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn text(totals: &BTreeMap<String, FieldValue>, name: &str) -> String {
        match totals.get(name) {
            Some(FieldValue::Text(s)) => s.clone(),
            other => panic!("expected text for {name}, got {other:?}"),
        }
    }

    #[test]
    fn totals_combine_existing_created_and_removed() {
        let mut data = FormData::new();
        data.set(fields::SURFACE_LOGEMENT_EXISTANTE, "100");
        data.set(fields::SURFACE_LOGEMENT_CREEE, "25.5");
        data.set(fields::SURFACE_LOGEMENT_SUPPRIMEE, "10");
        data.set(fields::SURFACE_ANNEXE_CREEE, "12");

        let totals = surface_totals(&data);

        assert_eq!(text(&totals, fields::SURFACE_LOGEMENT_TOTAL), "115.5");
        assert_eq!(text(&totals, fields::SURFACE_ANNEXE_TOTAL), "12");
        assert_eq!(text(&totals, fields::SURFACE_PLANCHER_CREEE), "37.5");
        assert_eq!(text(&totals, fields::SURFACE_PLANCHER_TOTALE), "127.5");
    }

    #[test]
    fn non_positive_totals_render_blank() {
        let mut data = FormData::new();
        data.set(fields::EMPRISE_SOL_EXISTANTE, "10");
        data.set(fields::EMPRISE_SOL_SUPPRIMEE, "15");

        let totals = surface_totals(&data);

        assert_eq!(text(&totals, fields::EMPRISE_SOL_TOTALE), "");
        assert_eq!(text(&totals, fields::SURFACE_PLANCHER_TOTALE), "");
    }

    #[test]
    fn unparseable_inputs_count_as_zero() {
        let mut data = FormData::new();
        data.set(fields::SURFACE_LOGEMENT_EXISTANTE, "beaucoup");
        data.set(fields::SURFACE_LOGEMENT_CREEE, "20");

        let totals = surface_totals(&data);

        assert_eq!(text(&totals, fields::SURFACE_LOGEMENT_TOTAL), "20");
    }
}
