//! Count and total surface of protected areas per category.

use super::{count_column, f64_column, str_column, ReportError, TableView};
use crate::charts::{BarColor, BarSpec, ChartSpec, Orientation};
use crate::data::{AnpTable, CATEGORY, NAME, SURFACE};
use crate::reports::format;
use polars::prelude::*;

const AREA_COUNT: &str = "area_count";
const TOTAL_SURFACE: &str = "total_surface_ha";

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySurfaceRow {
    pub category: String,
    pub areas: u32,
    pub total_surface_ha: f64,
}

#[derive(Debug, Clone)]
pub struct CategorySurfaceReport {
    /// Descending by total surface.
    pub rows: Vec<CategorySurfaceRow>,
}

impl CategorySurfaceReport {
    pub fn build(table: &AnpTable) -> Result<Self, ReportError> {
        let summary = table
            .lazy()
            .group_by([col(CATEGORY)])
            .agg([
                col(NAME).n_unique().alias(AREA_COUNT),
                col(SURFACE).sum().alias(TOTAL_SURFACE),
            ])
            .sort(
                [TOTAL_SURFACE, CATEGORY],
                SortMultipleOptions::default().with_order_descending_multi([true, false]),
            )
            .collect()?;

        let categories = str_column(&summary, CATEGORY)?;
        let counts = count_column(&summary, AREA_COUNT)?;
        let surfaces = f64_column(&summary, TOTAL_SURFACE)?;

        let rows = categories
            .into_iter()
            .zip(counts)
            .zip(surfaces)
            .map(|((category, areas), total_surface_ha)| CategorySurfaceRow {
                category,
                areas,
                total_surface_ha,
            })
            .collect();

        Ok(Self { rows })
    }

    pub fn table(&self) -> TableView {
        TableView::new(["Category", "Count", "Total surface"]).rows(self.rows.iter().map(|r| {
            vec![
                r.category.clone(),
                r.areas.to_string(),
                format::hectares(r.total_surface_ha),
            ]
        }))
    }

    pub fn chart(&self) -> ChartSpec {
        ChartSpec::new(
            "category_surface",
            "Total Protected Surface by Category",
            Orientation::Vertical,
        )
        .axes("Protected area category", "Total surface (ha)")
        .headroom(1.1)
        .bars(
            self.rows
                .iter()
                .map(|r| {
                    BarSpec::new(&r.category, r.total_surface_ha, BarColor::DarkGreen)
                        .with_value_label(format::thousands(r.total_surface_ha, 0))
                })
                .collect(),
        )
    }
}
