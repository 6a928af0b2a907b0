//! Reports module - aggregations behind each dashboard view

mod area_count;
mod category_breakdown;
mod category_surface;
mod contribution;
pub mod format;
mod performance;
mod territory_share;

pub use area_count::{AreaCountReport, AreaCountRow};
pub use category_breakdown::{Breakdown, BreakdownRow, CategoryFilter};
pub use category_surface::{CategorySurfaceReport, CategorySurfaceRow};
pub use contribution::{ContributionReport, ContributionRow};
pub use performance::{PerformanceReport, PerformanceRow};
pub use territory_share::{TerritoryShareReport, TerritoryShareRow};

use crate::charts::ChartSpec;
use crate::data::{
    AnpTable, DatasetSummary, ReferenceMismatch, TerritoryReference, DEPARTMENT, SURFACE,
};
use log::debug;
use polars::prelude::*;
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("No territory area is known for department '{department}'")]
    MissingTerritory { department: String },
}

/// Formatted table ready for display.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn new<const N: usize>(headers: [&str; N]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Vec<String>>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Plain-text rendering with aligned columns. Columns after the first
    /// are right-aligned.
    pub fn to_text(&self) -> String {
        let width = |s: &str| UnicodeWidthStr::width(s);
        let mut widths: Vec<usize> = self.headers.iter().map(|h| width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(width(cell));
                }
            }
        }

        let render = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, &w))| {
                    let pad = " ".repeat(w.saturating_sub(width(cell)));
                    if i == 0 {
                        format!("{}{}", cell, pad)
                    } else {
                        format!("{}{}", pad, cell)
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = render(&self.headers);
        out.push('\n');
        let rule = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(rule));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&render(row));
        }
        out
    }
}

/// Headline figures of the home view as a two-column table.
pub fn summary_table(summary: &DatasetSummary) -> TableView {
    TableView::new(["Figure", "Value"]).rows([
        vec!["Data rows".to_string(), summary.rows.to_string()],
        vec!["Protected areas".to_string(), summary.areas.to_string()],
        vec!["Departments".to_string(), summary.departments.to_string()],
        vec!["Categories".to_string(), summary.categories.to_string()],
        vec![
            "Protected surface".to_string(),
            format::hectares(summary.total_surface_ha),
        ],
    ])
}

/// The seven sidebar views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Home,
    TerritoryShare,
    AreaCount,
    Contribution,
    SurfaceByCategory,
    DepartmentalPerformance,
    CategoryBreakdown,
}

impl View {
    pub const ALL: [View; 7] = [
        View::Home,
        View::TerritoryShare,
        View::AreaCount,
        View::Contribution,
        View::SurfaceByCategory,
        View::DepartmentalPerformance,
        View::CategoryBreakdown,
    ];

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::TerritoryShare => "% Protected by Department",
            View::AreaCount => "Protected Areas per Department",
            View::Contribution => "Area Contribution",
            View::SurfaceByCategory => "Surface by Category",
            View::DepartmentalPerformance => "Departmental Performance",
            View::CategoryBreakdown => "Areas by Category",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            View::Home => "Protected Natural Areas of Peru",
            View::TerritoryShare => "Percentage of Protected Area by Department",
            View::AreaCount => "Number of Protected Areas by Department",
            View::Contribution => "Departmental and National Contribution of Each Protected Area",
            View::SurfaceByCategory => "Total Protected Surface by Category",
            View::DepartmentalPerformance => "Departmental Performance in Environmental Protection",
            View::CategoryBreakdown => "Protected Areas by Category",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            View::Home => {
                "A quantitative look at Peru's nationally administered protected natural areas \
                 (ANP), broken down by department: how much territory each department protects, \
                 how many areas it holds and how much each area weighs regionally and nationally.\n\n\
                 Objective: offer a visual, informative tool that makes the current ANP coverage \
                 easy to understand, reveals geographic patterns and highlights the remaining \
                 gaps in the country's environmental protection."
            }
            View::TerritoryShare => {
                "Share of each department's territory covered by protected natural areas."
            }
            View::AreaCount => {
                "Number of distinct protected areas registered in each department, largest first."
            }
            View::Contribution => {
                "How much each protected area contributes to the protected surface of its own \
                 department and of the whole country."
            }
            View::SurfaceByCategory => {
                "Protected areas grouped by category (national parks, sanctuaries, reserves, ...) \
                 with their count and total surface."
            }
            View::DepartmentalPerformance => {
                "Each department's protected percentage compared with the mean across departments; \
                 positive values are above the mean."
            }
            View::CategoryBreakdown => {
                "Pick a category to filter the count of protected areas per department."
            }
        }
    }

    /// Whether the view takes a category filter.
    pub fn uses_category_filter(self) -> bool {
        matches!(self, View::CategoryBreakdown)
    }

    /// Run the report behind this view.
    pub fn build(
        self,
        table: &AnpTable,
        reference: &TerritoryReference,
        filter: &CategoryFilter,
    ) -> Result<ViewContent, ReportError> {
        debug!("Building view {:?}", self);

        Ok(match self {
            View::Home => ViewContent::Home(table.summary()?),
            View::TerritoryShare => {
                ViewContent::TerritoryShare(TerritoryShareReport::build(table, reference)?)
            }
            View::AreaCount => ViewContent::AreaCount(AreaCountReport::build(table)?),
            View::Contribution => ViewContent::Contribution(ContributionReport::build(table)?),
            View::SurfaceByCategory => {
                ViewContent::SurfaceByCategory(CategorySurfaceReport::build(table)?)
            }
            View::DepartmentalPerformance => {
                ViewContent::Performance(PerformanceReport::build(table, reference)?)
            }
            View::CategoryBreakdown => ViewContent::Breakdown(Breakdown::build(table, filter)?),
        })
    }
}

/// Result of building a view.
#[derive(Debug, Clone)]
pub enum ViewContent {
    Home(DatasetSummary),
    TerritoryShare(TerritoryShareReport),
    AreaCount(AreaCountReport),
    Contribution(ContributionReport),
    SurfaceByCategory(CategorySurfaceReport),
    Performance(PerformanceReport),
    Breakdown(Breakdown),
}

impl ViewContent {
    pub fn table(&self) -> Option<TableView> {
        match self {
            ViewContent::Home(_) => None,
            ViewContent::TerritoryShare(r) => Some(r.table()),
            ViewContent::AreaCount(r) => Some(r.table()),
            ViewContent::Contribution(r) => Some(r.table()),
            ViewContent::SurfaceByCategory(r) => Some(r.table()),
            ViewContent::Performance(r) => Some(r.table()),
            ViewContent::Breakdown(b) => b.table(),
        }
    }

    pub fn chart(&self) -> Option<ChartSpec> {
        match self {
            ViewContent::Home(_) => None,
            ViewContent::TerritoryShare(r) => Some(r.chart()),
            ViewContent::AreaCount(r) => Some(r.chart()),
            ViewContent::Contribution(r) => Some(r.chart()),
            ViewContent::SurfaceByCategory(r) => Some(r.chart()),
            ViewContent::Performance(r) => Some(r.chart()),
            ViewContent::Breakdown(b) => b.chart(),
        }
    }

    /// Extra summary line shown under the table.
    pub fn note(&self) -> Option<String> {
        match self {
            ViewContent::Performance(r) => Some(r.overview()),
            _ => None,
        }
    }

    /// Positional reference disagreements carried by the report, if any.
    pub fn reference_mismatches(&self) -> &[ReferenceMismatch] {
        match self {
            ViewContent::TerritoryShare(r) => &r.reference_mismatches,
            ViewContent::Performance(r) => &r.reference_mismatches,
            _ => &[],
        }
    }
}

/// Protected surface summed per department (unsorted).
pub(crate) fn department_totals(table: &AnpTable) -> LazyFrame {
    table
        .lazy()
        .group_by([col(DEPARTMENT)])
        .agg([col(SURFACE).sum()])
}

/// Territory area for each department, in the same order.
pub(crate) fn territory_areas(
    departments: &[String],
    reference: &TerritoryReference,
) -> Result<Vec<f64>, ReportError> {
    departments
        .iter()
        .map(|department| {
            reference
                .area_of(department)
                .ok_or_else(|| ReportError::MissingTerritory {
                    department: department.clone(),
                })
        })
        .collect()
}

pub(crate) fn str_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<String>> {
    Ok(df
        .column(name)?
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect())
}

pub(crate) fn f64_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<f64>> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    Ok(column
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

pub(crate) fn count_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<u32>> {
    let column = df.column(name)?.cast(&DataType::UInt32)?;
    Ok(column.u32()?.into_iter().map(|v| v.unwrap_or(0)).collect())
}
