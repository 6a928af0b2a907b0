//! Percentage of each department's territory covered by protected areas.

use super::{department_totals, f64_column, str_column, territory_areas, ReportError, TableView};
use crate::charts::{BarColor, BarSpec, ChartSpec, Orientation};
use crate::data::{
    AnpTable, ReferenceMismatch, TerritoryReference, DEPARTMENT, LEGACY_BY_PROTECTED_SURFACE,
    SURFACE,
};
use crate::reports::format;
use polars::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct TerritoryShareRow {
    pub department: String,
    pub protected_ha: f64,
    pub territory_ha: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone)]
pub struct TerritoryShareReport {
    /// Ascending by protected surface.
    pub rows: Vec<TerritoryShareRow>,
    /// Positions where the historical positional list disagrees with the
    /// keyed reference for this ordering.
    pub reference_mismatches: Vec<ReferenceMismatch>,
}

impl TerritoryShareReport {
    pub fn build(table: &AnpTable, reference: &TerritoryReference) -> Result<Self, ReportError> {
        let totals = department_totals(table)
            .sort([SURFACE, DEPARTMENT], SortMultipleOptions::default())
            .collect()?;

        let departments = str_column(&totals, DEPARTMENT)?;
        let protected = f64_column(&totals, SURFACE)?;
        let territory = territory_areas(&departments, reference)?;
        let reference_mismatches =
            reference.audit_positional(&departments, &LEGACY_BY_PROTECTED_SURFACE);

        let rows = departments
            .into_iter()
            .zip(protected)
            .zip(territory)
            .map(|((department, protected_ha), territory_ha)| TerritoryShareRow {
                department,
                protected_ha,
                territory_ha,
                percentage: protected_ha / territory_ha * 100.0,
            })
            .collect();

        Ok(Self {
            rows,
            reference_mismatches,
        })
    }

    pub fn table(&self) -> TableView {
        TableView::new(["Department", "Protected surface", "Department area", "Protected %"]).rows(
            self.rows.iter().map(|r| {
                vec![
                    r.department.clone(),
                    format::hectares(r.protected_ha),
                    format::hectares(r.territory_ha),
                    format::percent(r.percentage),
                ]
            }),
        )
    }

    pub fn chart(&self) -> ChartSpec {
        ChartSpec::new(
            "territory_share",
            "Share of Department Territory Under Protection",
            Orientation::Vertical,
        )
        .axes("Department", "Protected area (%)")
        .bars(
            self.rows
                .iter()
                .map(|r| BarSpec::new(&r.department, r.percentage, BarColor::SkyBlue))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::tests::{area, three_parks};

    #[test]
    fn test_sorted_ascending_with_keyed_territory() {
        let reference = TerritoryReference::from_pairs([("Lima", 4000.0), ("Ica", 1000.0)]);
        let report = TerritoryShareReport::build(&three_parks(), &reference).unwrap();

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].department, "Ica");
        assert_eq!(report.rows[0].protected_ha, 50.0);
        assert_eq!(report.rows[0].territory_ha, 1000.0);
        assert!((report.rows[0].percentage - 5.0).abs() < 1e-9);

        assert_eq!(report.rows[1].department, "Lima");
        assert!((report.rows[1].percentage - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentages_stay_within_bounds() {
        let reference = TerritoryReference::from_pairs([("LIMA", 400.0), ("ICA", 50.0)]);
        let report = TerritoryShareReport::build(&three_parks(), &reference).unwrap();
        for row in &report.rows {
            assert!((0.0..=100.0).contains(&row.percentage), "{:?}", row);
        }
    }

    #[test]
    fn test_decomposed_department_name_resolves() {
        let table =
            AnpTable::from_records(&[area("PN", "Huascarán", "JUNI\u{301}N", 1000.0)]).unwrap();
        let report = TerritoryShareReport::build(&table, &TerritoryReference::peru()).unwrap();
        assert_eq!(report.rows.len(), 1);
        assert!((report.rows[0].territory_ha - 4_419_723.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_department_fails() {
        let reference = TerritoryReference::from_pairs([("Lima", 4000.0)]);
        let err = TerritoryShareReport::build(&three_parks(), &reference).unwrap_err();
        assert!(matches!(err, ReportError::MissingTerritory { department } if department == "Ica"));
    }

    #[test]
    fn test_legacy_list_is_audited() {
        let reference = TerritoryReference::from_pairs([("Lima", 4000.0), ("Ica", 1000.0)]);
        let report = TerritoryShareReport::build(&three_parks(), &reference).unwrap();
        // Two departments against a 22-entry list: at least the 20 surplus
        // positions disagree.
        assert!(report.reference_mismatches.len() >= 20);
    }
}
