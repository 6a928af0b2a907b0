//! Contribution of each protected area to its department and to the
//! national protected surface.

use super::{f64_column, str_column, ReportError, TableView};
use crate::charts::{BarColor, BarSpec, ChartSpec, Orientation};
use crate::data::{AnpTable, DEPARTMENT, NAME, SURFACE};
use crate::reports::format;
use polars::prelude::*;
use std::collections::HashSet;

const DEPARTMENT_TOTAL: &str = "department_total_ha";
const DEPARTMENTAL_SHARE: &str = "departmental_share";
const NATIONAL_SHARE: &str = "national_share";

#[derive(Debug, Clone, PartialEq)]
pub struct ContributionRow {
    pub department: String,
    pub name: String,
    pub surface_ha: f64,
    pub departmental_share: f64,
    pub national_share: f64,
}

#[derive(Debug, Clone)]
pub struct ContributionReport {
    /// Department ascending, then departmental share descending.
    pub rows: Vec<ContributionRow>,
    pub national_total_ha: f64,
}

impl ContributionReport {
    pub fn build(table: &AnpTable) -> Result<Self, ReportError> {
        let rows = table.lazy().select([col(DEPARTMENT), col(NAME), col(SURFACE)]);

        let totals = rows
            .clone()
            .group_by([col(DEPARTMENT)])
            .agg([col(SURFACE).sum().alias(DEPARTMENT_TOTAL)]);

        let joined = rows
            .left_join(totals, col(DEPARTMENT), col(DEPARTMENT))
            .with_columns([
                (col(SURFACE) / col(DEPARTMENT_TOTAL) * lit(100.0)).alias(DEPARTMENTAL_SHARE),
                (col(SURFACE) / col(SURFACE).sum() * lit(100.0)).alias(NATIONAL_SHARE),
            ])
            .sort(
                [DEPARTMENT, DEPARTMENTAL_SHARE],
                SortMultipleOptions::default()
                    .with_order_descending_multi([false, true])
                    .with_maintain_order(true),
            )
            .collect()?;

        let departments = str_column(&joined, DEPARTMENT)?;
        let names = str_column(&joined, NAME)?;
        let surfaces = f64_column(&joined, SURFACE)?;
        let departmental = f64_column(&joined, DEPARTMENTAL_SHARE)?;
        let national = f64_column(&joined, NATIONAL_SHARE)?;

        let rows = (0..joined.height())
            .map(|i| ContributionRow {
                department: departments[i].clone(),
                name: names[i].clone(),
                surface_ha: surfaces[i],
                departmental_share: departmental[i],
                national_share: national[i],
            })
            .collect();

        Ok(Self {
            rows,
            national_total_ha: table.total_surface()?,
        })
    }

    /// Largest contributor of each department, ascending by departmental
    /// share.
    pub fn leaders(&self) -> Vec<&ContributionRow> {
        let mut seen = HashSet::new();
        let mut leaders: Vec<&ContributionRow> = self
            .rows
            .iter()
            .filter(|r| seen.insert(r.department.as_str()))
            .collect();

        leaders.sort_by(|a, b| a.departmental_share.total_cmp(&b.departmental_share));
        leaders
    }

    pub fn table(&self) -> TableView {
        TableView::new([
            "Department",
            "Protected area",
            "Surface",
            "Departmental contribution",
            "National contribution",
        ])
        .rows(self.rows.iter().map(|r| {
            vec![
                r.department.clone(),
                r.name.clone(),
                format::hectares(r.surface_ha),
                format::percent(r.departmental_share),
                format::percent(r.national_share),
            ]
        }))
    }

    pub fn chart(&self) -> ChartSpec {
        ChartSpec::new(
            "contribution",
            "Contribution of the Largest Protected Area to Each Department",
            Orientation::Horizontal,
        )
        .axes("Department", "Departmental contribution of the largest area (%)")
        .headroom(1.15)
        .bars(
            self.leaders()
                .into_iter()
                .map(|r| {
                    BarSpec::new(&r.department, r.departmental_share, BarColor::MediumSeaGreen)
                        .with_value_label(format!("{:.1}%", r.departmental_share))
                        .with_inner_label(&r.name)
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::tests::{area, three_parks};

    fn find<'a>(report: &'a ContributionReport, name: &str) -> &'a ContributionRow {
        report.rows.iter().find(|r| r.name == name).unwrap()
    }

    #[test]
    fn test_departmental_and_national_shares() {
        let report = ContributionReport::build(&three_parks()).unwrap();
        let park1 = find(&report, "Park1");

        assert!((park1.departmental_share - 25.0).abs() < 1e-9);
        assert!((park1.national_share - 100.0 / 450.0 * 100.0).abs() < 1e-9);
        assert!((report.national_total_ha - 450.0).abs() < 1e-9);
    }

    #[test]
    fn test_sorted_by_department_then_share_descending() {
        let report = ContributionReport::build(&three_parks()).unwrap();
        let order: Vec<&str> = report.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(order, ["Park3", "Park2", "Park1"]);
    }

    #[test]
    fn test_shares_add_up_per_department() {
        let table = AnpTable::from_records(&[
            area("PN", "A", "Loreto", 700.0),
            area("RN", "B", "Loreto", 300.0),
            area("PN", "C", "Puno", 250.0),
            area("SN", "D", "Puno", 250.0),
            area("BP", "E", "Tumbes", 0.5),
        ])
        .unwrap();
        let report = ContributionReport::build(&table).unwrap();

        for department in table.departments() {
            let rows: Vec<_> = report.rows.iter().filter(|r| r.department == department).collect();
            let departmental: f64 = rows.iter().map(|r| r.departmental_share).sum();
            let national: f64 = rows.iter().map(|r| r.national_share).sum();
            let department_total: f64 = rows.iter().map(|r| r.surface_ha).sum();

            assert!((departmental - 100.0).abs() < 1e-9);
            assert!((national - department_total / report.national_total_ha * 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_leaders_one_per_department_ascending() {
        let report = ContributionReport::build(&three_parks()).unwrap();
        let leaders = report.leaders();

        assert_eq!(leaders.len(), 2);
        assert_eq!(leaders[0].name, "Park2");
        assert!((leaders[0].departmental_share - 75.0).abs() < 1e-9);
        assert_eq!(leaders[1].name, "Park3");
        assert!((leaders[1].departmental_share - 100.0).abs() < 1e-9);

        let chart = report.chart();
        assert_eq!(chart.bars[0].inner_label.as_deref(), Some("Park2"));
        assert_eq!(chart.bars[1].value_label.as_deref(), Some("100.0%"));
    }
}
