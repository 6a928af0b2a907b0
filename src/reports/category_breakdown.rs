//! Protected areas per department, optionally restricted to one category.

use super::{count_column, str_column, ReportError, TableView};
use crate::charts::{BarColor, BarSpec, ChartSpec, Orientation};
use crate::data::{AnpTable, CATEGORY, DEPARTMENT};
use polars::prelude::*;
use std::fmt;

const ROW_COUNT: &str = "row_count";

/// Category selector for the breakdown view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Selector options: `All` first, then every category in the table
    /// sorted ascending.
    pub fn options(table: &AnpTable) -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(table.categories().into_iter().map(CategoryFilter::Only))
            .collect()
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All categories",
            CategoryFilter::Only(category) => category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    pub department: String,
    pub rows: u32,
}

/// Outcome of the breakdown: either counts or an empty selection.
#[derive(Debug, Clone)]
pub enum Breakdown {
    Counts {
        filter: CategoryFilter,
        /// Descending by count.
        rows: Vec<BreakdownRow>,
    },
    /// The filter matched no rows. Not an error; the view shows a warning.
    Empty { filter: CategoryFilter },
}

impl Breakdown {
    /// Counts raw rows (not distinct names) per department.
    pub fn build(table: &AnpTable, filter: &CategoryFilter) -> Result<Self, ReportError> {
        let selected = match filter {
            CategoryFilter::All => table.lazy(),
            CategoryFilter::Only(category) => table
                .lazy()
                .filter(col(CATEGORY).eq(lit(category.as_str()))),
        };

        let counts = selected
            .group_by([col(DEPARTMENT)])
            .agg([len().alias(ROW_COUNT)])
            .sort(
                [ROW_COUNT, DEPARTMENT],
                SortMultipleOptions::default().with_order_descending_multi([true, false]),
            )
            .collect()?;

        if counts.height() == 0 {
            return Ok(Breakdown::Empty {
                filter: filter.clone(),
            });
        }

        let rows = str_column(&counts, DEPARTMENT)?
            .into_iter()
            .zip(count_column(&counts, ROW_COUNT)?)
            .map(|(department, rows)| BreakdownRow { department, rows })
            .collect();

        Ok(Breakdown::Counts {
            filter: filter.clone(),
            rows,
        })
    }

    pub fn filter(&self) -> &CategoryFilter {
        match self {
            Breakdown::Counts { filter, .. } | Breakdown::Empty { filter } => filter,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Breakdown::Empty { .. })
    }

    pub fn table_title(&self) -> String {
        match self.filter() {
            CategoryFilter::All => "All protected area categories".to_string(),
            CategoryFilter::Only(category) => format!("Protected areas of category '{}'", category),
        }
    }

    pub fn table(&self) -> Option<TableView> {
        let Breakdown::Counts { rows, .. } = self else {
            return None;
        };

        Some(
            TableView::new(["Department", "Protected areas"])
                .rows(rows.iter().map(|r| vec![r.department.clone(), r.rows.to_string()])),
        )
    }

    pub fn chart(&self) -> Option<ChartSpec> {
        let Breakdown::Counts { filter, rows } = self else {
            return None;
        };

        let title = match filter {
            CategoryFilter::All => "Protected Areas per Department (all categories)".to_string(),
            CategoryFilter::Only(category) => {
                format!("Protected Areas per Department for '{}'", category)
            }
        };

        // Largest at the top of a horizontal chart means drawing it last.
        Some(
            ChartSpec::new("category_breakdown", title, Orientation::Horizontal)
                .axes("Department", "Protected areas")
                .tooltips()
                .bars(
                    rows.iter()
                        .rev()
                        .map(|r| BarSpec::new(&r.department, r.rows as f64, BarColor::SteelBlue))
                        .collect(),
                ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::tests::{area, three_parks};

    #[test]
    fn test_options_start_with_all_then_sorted() {
        let table = AnpTable::from_records(&[
            area("Santuario Nacional", "A", "Lima", 1.0),
            area("Parque Nacional", "B", "Lima", 1.0),
            area("Parque Nacional", "C", "Ica", 1.0),
        ])
        .unwrap();

        let options = CategoryFilter::options(&table);
        assert_eq!(
            options,
            vec![
                CategoryFilter::All,
                CategoryFilter::Only("Parque Nacional".into()),
                CategoryFilter::Only("Santuario Nacional".into()),
            ]
        );
    }

    #[test]
    fn test_all_counts_raw_rows() {
        let table = AnpTable::from_records(&[
            area("PN", "Manu", "Cusco", 1.0),
            area("PN", "Manu", "Cusco", 2.0),
            area("RN", "Other", "Ica", 3.0),
        ])
        .unwrap();

        let breakdown = Breakdown::build(&table, &CategoryFilter::All).unwrap();
        let Breakdown::Counts { rows, .. } = &breakdown else {
            panic!("expected counts");
        };
        assert_eq!(rows[0], BreakdownRow { department: "Cusco".into(), rows: 2 });
        assert_eq!(rows[1], BreakdownRow { department: "Ica".into(), rows: 1 });
    }

    #[test]
    fn test_single_category_filter() {
        let breakdown =
            Breakdown::build(&three_parks(), &CategoryFilter::Only("CategoryB".into())).unwrap();
        let Breakdown::Counts { rows, .. } = &breakdown else {
            panic!("expected counts");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].department, "Ica");
        assert!(breakdown.chart().unwrap().tooltips);
    }

    #[test]
    fn test_unknown_category_is_empty_not_error() {
        let breakdown =
            Breakdown::build(&three_parks(), &CategoryFilter::Only("Nothing".into())).unwrap();
        assert!(breakdown.is_empty());
        assert!(breakdown.table().is_none());
        assert!(breakdown.chart().is_none());
        assert_eq!(breakdown.filter(), &CategoryFilter::Only("Nothing".into()));
    }
}
