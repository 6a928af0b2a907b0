//! Departmental performance: each department's protected share of its
//! territory compared with the unweighted mean across departments.

use super::{department_totals, f64_column, str_column, territory_areas, ReportError, TableView};
use crate::charts::{BarColor, BarSpec, ChartSpec, Orientation};
use crate::data::{
    AnpTable, ReferenceMismatch, TerritoryReference, DEPARTMENT, LEGACY_ALPHABETICAL, SURFACE,
};
use crate::reports::format;
use log::debug;
use polars::prelude::*;
use statrs::statistics::{Data, Median, Statistics};

const TERRITORY: &str = "territory_ha";
const PERCENTAGE: &str = "percentage";
const DEVIATION: &str = "deviation";

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRow {
    pub department: String,
    pub percentage: f64,
    /// Signed difference from the mean percentage.
    pub deviation: f64,
}

#[derive(Debug, Clone)]
pub struct PerformanceReport {
    /// Descending by deviation.
    pub rows: Vec<PerformanceRow>,
    /// Unweighted mean of the department percentages.
    pub mean_percentage: f64,
    pub median_percentage: f64,
    pub reference_mismatches: Vec<ReferenceMismatch>,
}

impl PerformanceReport {
    pub fn build(table: &AnpTable, reference: &TerritoryReference) -> Result<Self, ReportError> {
        let mut totals = department_totals(table)
            .sort([DEPARTMENT], SortMultipleOptions::default())
            .collect()?;

        let departments = str_column(&totals, DEPARTMENT)?;
        let territory = territory_areas(&departments, reference)?;
        let reference_mismatches = reference.audit_positional(&departments, &LEGACY_ALPHABETICAL);

        totals.with_column(Column::new(TERRITORY.into(), territory))?;

        let with_percentage = totals
            .lazy()
            .with_column((col(SURFACE) / col(TERRITORY) * lit(100.0)).alias(PERCENTAGE))
            .collect()?;

        let percentages = f64_column(&with_percentage, PERCENTAGE)?;
        let mean_percentage = percentages.iter().mean();
        let median_percentage = Data::new(percentages).median();
        debug!(
            "Department percentages: mean {:.3}, median {:.3}",
            mean_percentage, median_percentage
        );

        let ranked = with_percentage
            .lazy()
            .with_column((col(PERCENTAGE) - lit(mean_percentage)).alias(DEVIATION))
            .sort(
                [DEVIATION, DEPARTMENT],
                SortMultipleOptions::default().with_order_descending_multi([true, false]),
            )
            .collect()?;

        let rows = str_column(&ranked, DEPARTMENT)?
            .into_iter()
            .zip(f64_column(&ranked, PERCENTAGE)?)
            .zip(f64_column(&ranked, DEVIATION)?)
            .map(|((department, percentage), deviation)| PerformanceRow {
                department,
                percentage,
                deviation,
            })
            .collect();

        Ok(Self {
            rows,
            mean_percentage,
            median_percentage,
            reference_mismatches,
        })
    }

    pub fn table(&self) -> TableView {
        TableView::new([
            "Department",
            "Protected % of department",
            "Mean across departments",
            "Difference from mean",
        ])
        .rows(self.rows.iter().map(|r| {
            vec![
                r.department.clone(),
                format::percent(r.percentage),
                format::percent(self.mean_percentage),
                format::signed_percent(r.deviation),
            ]
        }))
    }

    /// One-line summary of the spread of department percentages.
    pub fn overview(&self) -> String {
        format!(
            "Mean across departments: {}, median: {}",
            format::percent(self.mean_percentage),
            format::percent(self.median_percentage)
        )
    }

    pub fn chart(&self) -> ChartSpec {
        ChartSpec::new(
            "performance",
            "Deviation of Department Protected Share from the Mean",
            Orientation::Vertical,
        )
        .axes("Department", "Difference from mean (%)")
        .zero_line()
        .headroom(1.1)
        .bars(
            self.rows
                .iter()
                .map(|r| {
                    BarSpec::new(&r.department, r.deviation, BarColor::for_sign(r.deviation))
                        .with_value_label(format::signed_percent(r.deviation))
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::tests::{area, three_parks};

    #[test]
    fn test_unweighted_mean_and_deviation() {
        // Lima 400 / 4000 = 10%, Ica 50 / 100 = 50%; mean 30%.
        let reference = TerritoryReference::from_pairs([("Lima", 4000.0), ("Ica", 100.0)]);
        let report = PerformanceReport::build(&three_parks(), &reference).unwrap();

        assert!((report.mean_percentage - 30.0).abs() < 1e-9);
        assert!((report.median_percentage - 30.0).abs() < 1e-9);
        assert_eq!(report.overview(), "Mean across departments: 30.00%, median: 30.00%");
        assert_eq!(report.rows[0].department, "Ica");
        assert!((report.rows[0].deviation - 20.0).abs() < 1e-9);
        assert_eq!(report.rows[1].department, "Lima");
        assert!((report.rows[1].deviation + 20.0).abs() < 1e-9);

        let chart = report.chart();
        assert_eq!(chart.bars[0].color, BarColor::Positive);
        assert_eq!(chart.bars[1].color, BarColor::Negative);
        assert_eq!(chart.bars[1].value_label.as_deref(), Some("-20.00%"));
    }

    #[test]
    fn test_deviations_sum_to_zero() {
        let table = AnpTable::from_records(&[
            area("PN", "A", "Loreto", 3_000_000.0),
            area("RN", "B", "Puno", 500_000.0),
            area("SN", "C", "Tumbes", 50_000.0),
            area("PN", "D", "Cusco", 1_000_000.0),
        ])
        .unwrap();
        let report = PerformanceReport::build(&table, &TerritoryReference::peru()).unwrap();

        let total: f64 = report.rows.iter().map(|r| r.deviation).sum();
        assert!(total.abs() < 1e-9);
        for row in &report.rows {
            assert!((0.0..=100.0).contains(&row.percentage));
        }
        let deviations: Vec<f64> = report.rows.iter().map(|r| r.deviation).collect();
        assert!(deviations.windows(2).all(|w| w[0] >= w[1]));
    }
}
