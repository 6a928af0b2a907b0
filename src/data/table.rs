//! Protected Area Table
//! In-memory projection of the ANP dataset shared by every report.

use polars::prelude::*;

/// Category code of the protected area.
pub const CATEGORY: &str = "ANP_CATE";
/// Protected area name.
pub const NAME: &str = "ANP_NOMB";
/// Department the row belongs to.
pub const DEPARTMENT: &str = "DEPARTAMENTO1";
/// Legal surface in hectares.
pub const SURFACE: &str = "ANP_SULEG";

/// One row of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtectedArea {
    pub category: String,
    pub name: String,
    pub department: String,
    pub surface_ha: f64,
}

/// Headline figures shown on the home view.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub rows: usize,
    pub areas: usize,
    pub departments: usize,
    pub categories: usize,
    pub total_surface_ha: f64,
}

/// Read-only table of protected areas.
///
/// Holds only the four columns the reports use, with the surface column
/// already cast to `Float64`. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct AnpTable {
    df: DataFrame,
}

impl AnpTable {
    /// Project a raw frame onto the dataset columns.
    ///
    /// Fails if any of the columns is missing.
    pub fn from_frame(df: DataFrame) -> PolarsResult<Self> {
        let df = df
            .lazy()
            .select([
                col(CATEGORY).cast(DataType::String),
                col(NAME).cast(DataType::String),
                col(DEPARTMENT).cast(DataType::String),
                col(SURFACE).cast(DataType::Float64),
            ])
            .collect()?;

        Ok(Self { df })
    }

    /// Build a table from typed rows.
    pub fn from_records(records: &[ProtectedArea]) -> PolarsResult<Self> {
        let df = DataFrame::new(vec![
            Column::new(
                CATEGORY.into(),
                records.iter().map(|r| r.category.as_str()).collect::<Vec<_>>(),
            ),
            Column::new(
                NAME.into(),
                records.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
            ),
            Column::new(
                DEPARTMENT.into(),
                records.iter().map(|r| r.department.as_str()).collect::<Vec<_>>(),
            ),
            Column::new(
                SURFACE.into(),
                records.iter().map(|r| r.surface_ha).collect::<Vec<_>>(),
            ),
        ])?;

        Self::from_frame(df)
    }

    /// Get a reference to the underlying DataFrame.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    /// Lazy view over the table for report pipelines.
    pub fn lazy(&self) -> LazyFrame {
        self.df.clone().lazy()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Distinct categories, sorted ascending.
    pub fn categories(&self) -> Vec<String> {
        Self::distinct_sorted(&self.df, CATEGORY)
    }

    /// Distinct departments, sorted ascending.
    pub fn departments(&self) -> Vec<String> {
        Self::distinct_sorted(&self.df, DEPARTMENT)
    }

    fn distinct_sorted(df: &DataFrame, column: &str) -> Vec<String> {
        let Ok(column) = df.column(column) else {
            return Vec::new();
        };
        let Ok(ca) = column.str() else {
            return Vec::new();
        };

        let mut values: Vec<String> = ca.into_iter().flatten().map(str::to_string).collect();
        values.sort();
        values.dedup();
        values
    }

    /// Total protected surface across all rows.
    pub fn total_surface(&self) -> PolarsResult<f64> {
        let surfaces = self.df.column(SURFACE)?.f64()?;
        Ok(surfaces.into_iter().flatten().sum())
    }

    /// Compute the headline figures for the home view.
    pub fn summary(&self) -> PolarsResult<DatasetSummary> {
        let names = Self::distinct_sorted(&self.df, NAME);

        Ok(DatasetSummary {
            rows: self.height(),
            areas: names.len(),
            departments: self.departments().len(),
            categories: self.categories().len(),
            total_surface_ha: self.total_surface()?,
        })
    }
}
