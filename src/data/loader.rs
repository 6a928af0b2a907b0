//! CSV Data Loader Module
//! Reads the ANP dataset with Polars and memoizes the result per path.

use crate::data::AnpTable;
use log::{debug, info};
use polars::prelude::*;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Rows of the dataset that are actually consumed.
pub const DEFAULT_ROW_LIMIT: usize = 94;

/// Field separator of the dataset file.
pub const SEPARATOR: u8 = b';';

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("The file '{}' was not found. Make sure it sits next to the dashboard or pass --data.", path.display())]
    DataUnavailable { path: PathBuf },
    #[error("Failed to load or process '{}': {source}", path.display())]
    DataMalformed {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}

/// Loads the dataset and caches one table per path.
///
/// The memo lives as long as the `DataLoader`; a fresh loader reads the file
/// again. Callers that need a single load keep the returned `Arc` instead.
pub struct DataLoader {
    row_limit: usize,
    cache: HashMap<PathBuf, Arc<AnpTable>>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self::with_row_limit(DEFAULT_ROW_LIMIT)
    }

    pub fn with_row_limit(row_limit: usize) -> Self {
        Self {
            row_limit,
            cache: HashMap::new(),
        }
    }

    /// Load the dataset at `path`, or return the cached table.
    ///
    /// Only the first `row_limit` data rows are kept, whatever the size of
    /// the file.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Arc<AnpTable>, LoaderError> {
        let path = path.as_ref().to_path_buf();

        if let Some(table) = self.cache.get(&path) {
            debug!("Using cached dataset for {:?}", path);
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(Self::read_table(&path, self.row_limit)?);
        info!("Loaded {} rows from {:?}", table.height(), path);

        self.cache.insert(path, Arc::clone(&table));
        Ok(table)
    }

    /// Whether `path` has already been loaded.
    pub fn is_cached(&self, path: impl AsRef<Path>) -> bool {
        self.cache.contains_key(path.as_ref())
    }

    fn read_table(path: &Path, row_limit: usize) -> Result<AnpTable, LoaderError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                return Err(LoaderError::DataMalformed {
                    path: path.to_path_buf(),
                    source: PolarsError::ComputeError("path is not a regular file".into()),
                });
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LoaderError::DataUnavailable {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => {
                return Err(LoaderError::DataMalformed {
                    path: path.to_path_buf(),
                    source: e.into(),
                });
            }
        }

        debug!("Reading {:?} (first {} rows)", path, row_limit);

        let malformed = |source: PolarsError| LoaderError::DataMalformed {
            path: path.to_path_buf(),
            source,
        };

        let df = LazyCsvReader::new(path)
            .with_separator(SEPARATOR)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_encoding(CsvEncoding::LossyUtf8)
            .with_n_rows(Some(row_limit))
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(malformed)?;

        AnpTable::from_frame(df).map_err(malformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, rows: usize) -> PathBuf {
        let path = dir.path().join("anp_datos.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "ANP_CATE;ANP_NOMB;DEPARTAMENTO1;ANP_SULEG").unwrap();
        for i in 0..rows {
            writeln!(file, "Parque Nacional;Area {};Lima;{}.5", i, i * 10).unwrap();
        }
        path
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let mut loader = DataLoader::new();
        let err = loader.load(dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::DataUnavailable { .. }));
    }

    #[test]
    fn test_only_first_rows_are_kept() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, 120);
        let mut loader = DataLoader::new();
        let table = loader.load(&path).unwrap();
        assert_eq!(table.height(), DEFAULT_ROW_LIMIT);
    }

    #[test]
    fn test_repeated_load_returns_cached_instance() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, 5);
        let mut loader = DataLoader::new();

        let first = loader.load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let second = loader.load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(loader.is_cached(&path));
    }

    #[test]
    fn test_missing_columns_are_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "A;B\n1;2\n").unwrap();

        let mut loader = DataLoader::new();
        let err = loader.load(&path).unwrap_err();
        assert!(matches!(err, LoaderError::DataMalformed { .. }));
        assert!(!loader.is_cached(&path));
    }
}
