//! Data module - dataset loading and reference tables

mod loader;
mod table;
mod territory;

/// Citation of the open-data register the dataset comes from.
pub const DATA_SOURCE: &str = "Áreas Naturales Protegidas (ANP) de Administración Nacional definitiva | \
     Plataforma Nacional de Datos Abiertos. (s. f.). \
     https://www.datosabiertos.gob.pe/dataset/%C3%A1reas-naturales-protegidas-anp-de-administraci%C3%B3n-nacional-definitiva";

pub use loader::{DataLoader, LoaderError, DEFAULT_ROW_LIMIT};
pub use table::{AnpTable, DatasetSummary, ProtectedArea, CATEGORY, DEPARTMENT, NAME, SURFACE};
pub use territory::{
    normalize_department, ReferenceMismatch, TerritoryReference, LEGACY_ALPHABETICAL,
    LEGACY_BY_PROTECTED_SURFACE,
};
