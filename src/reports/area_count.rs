//! Number of distinct protected areas per department.

use super::{count_column, str_column, ReportError, TableView};
use crate::charts::{BarColor, BarSpec, ChartSpec, Orientation};
use crate::data::{AnpTable, DEPARTMENT, NAME};
use polars::prelude::*;

const AREA_COUNT: &str = "area_count";

#[derive(Debug, Clone, PartialEq)]
pub struct AreaCountRow {
    pub department: String,
    pub areas: u32,
}

#[derive(Debug, Clone)]
pub struct AreaCountReport {
    /// Descending by count.
    pub rows: Vec<AreaCountRow>,
}

impl AreaCountReport {
    /// Counts distinct names within each department. An area spanning two
    /// departments is counted once in each of them.
    pub fn build(table: &AnpTable) -> Result<Self, ReportError> {
        let counts = table
            .lazy()
            .group_by([col(DEPARTMENT)])
            .agg([col(NAME).n_unique().alias(AREA_COUNT)])
            .sort(
                [AREA_COUNT, DEPARTMENT],
                SortMultipleOptions::default().with_order_descending_multi([true, false]),
            )
            .collect()?;

        let rows = str_column(&counts, DEPARTMENT)?
            .into_iter()
            .zip(count_column(&counts, AREA_COUNT)?)
            .map(|(department, areas)| AreaCountRow { department, areas })
            .collect();

        Ok(Self { rows })
    }

    pub fn total(&self) -> u32 {
        self.rows.iter().map(|r| r.areas).sum()
    }

    pub fn table(&self) -> TableView {
        TableView::new(["Department", "Protected areas"]).rows(
            self.rows
                .iter()
                .map(|r| vec![r.department.clone(), r.areas.to_string()]),
        )
    }

    pub fn chart(&self) -> ChartSpec {
        ChartSpec::new(
            "area_count",
            "Number of Protected Areas per Department",
            Orientation::Vertical,
        )
        .axes("Department", "Protected areas")
        .bars(
            self.rows
                .iter()
                .map(|r| BarSpec::new(&r.department, r.areas as f64, BarColor::LightGreen))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ProtectedArea;
    use crate::reports::tests::{area, three_parks};

    #[test]
    fn test_counts_sorted_descending() {
        let report = AreaCountReport::build(&three_parks()).unwrap();
        assert_eq!(
            report.rows,
            vec![
                AreaCountRow { department: "Lima".into(), areas: 2 },
                AreaCountRow { department: "Ica".into(), areas: 1 },
            ]
        );
    }

    #[test]
    fn test_duplicate_names_count_once_per_department() {
        let records: Vec<ProtectedArea> = vec![
            area("PN", "Manu", "Cusco", 10.0),
            area("PN", "Manu", "Cusco", 5.0),
            area("PN", "Manu", "Madre de Dios", 20.0),
            area("RN", "Tambopata", "Madre de Dios", 30.0),
        ];
        let table = AnpTable::from_records(&records).unwrap();
        let report = AreaCountReport::build(&table).unwrap();

        assert_eq!(report.rows[0].department, "Madre de Dios");
        assert_eq!(report.rows[0].areas, 2);
        assert_eq!(report.rows[1].areas, 1);

        // Manu spans two departments, so the per-department sum exceeds the
        // national distinct count.
        let national = table.summary().unwrap().areas as u32;
        assert_eq!(national, 2);
        assert_eq!(report.total(), 3);
        assert!(report.total() >= national);
    }
}
