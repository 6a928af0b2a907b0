//! Dashboard configuration: command line arguments and an optional JSON file.

use crate::data::DEFAULT_ROW_LIMIT;
use clap::Parser;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_DATA_PATH: &str = "anp_datos.csv";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("row_limit must be at least 1")]
    ZeroRowLimit,
}

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "anp-dashboard")]
#[command(about = "Interactive dashboard of Peru's protected natural areas")]
#[command(version)]
pub struct CliArgs {
    /// Path to the semicolon-separated ANP dataset
    #[arg(long, short = 'd', value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write every chart as PNG into this directory and exit
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// Print every report table to stdout and exit
    #[arg(long)]
    pub print: bool,
}

impl CliArgs {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether to run without opening a window.
    pub fn is_headless(&self) -> bool {
        self.print || self.export.is_some()
    }
}

/// Size of exported PNG charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 900,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    /// Data rows consumed from the top of the file.
    pub row_limit: usize,
    pub export: ExportSettings,
    /// Initial window size.
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            row_limit: DEFAULT_ROW_LIMIT,
            export: ExportSettings::default(),
            window_size: [1400.0, 850.0],
        }
    }
}

impl DashboardConfig {
    /// Read a config file. Missing fields fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, then the config file, then command line overrides.
    pub fn resolve(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(data) = &args.data {
            config.data_path = data.clone();
        }

        if config.row_limit == 0 {
            return Err(ConfigError::ZeroRowLimit);
        }

        debug!("Resolved config: {:?}", config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::resolve(&CliArgs::default()).unwrap();
        assert_eq!(config.data_path, PathBuf::from("anp_datos.csv"));
        assert_eq!(config.row_limit, 94);
    }

    #[test]
    fn test_partial_file_and_cli_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dashboard.json");
        std::fs::write(
            &path,
            r#"{ "data_path": "from_file.csv", "export": { "width": 800 } }"#,
        )
        .unwrap();

        let args = CliArgs {
            config: Some(path.clone()),
            ..CliArgs::default()
        };
        let config = DashboardConfig::resolve(&args).unwrap();
        assert_eq!(config.data_path, PathBuf::from("from_file.csv"));
        assert_eq!(config.export.width, 800);
        assert_eq!(config.export.height, 900);
        assert_eq!(config.row_limit, 94);

        let args = CliArgs {
            config: Some(path),
            data: Some(PathBuf::from("cli.csv")),
            ..CliArgs::default()
        };
        assert_eq!(
            DashboardConfig::resolve(&args).unwrap().data_path,
            PathBuf::from("cli.csv")
        );
    }

    #[test]
    fn test_bad_files() {
        let dir = TempDir::new().unwrap();
        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();

        let args = CliArgs {
            config: Some(broken),
            ..CliArgs::default()
        };
        assert!(matches!(DashboardConfig::resolve(&args), Err(ConfigError::Parse { .. })));

        let zero = dir.path().join("zero.json");
        std::fs::write(&zero, r#"{ "row_limit": 0 }"#).unwrap();
        let args = CliArgs {
            config: Some(zero),
            ..CliArgs::default()
        };
        assert!(matches!(DashboardConfig::resolve(&args), Err(ConfigError::ZeroRowLimit)));

        let args = CliArgs {
            config: Some(dir.path().join("missing.json")),
            ..CliArgs::default()
        };
        assert!(matches!(DashboardConfig::resolve(&args), Err(ConfigError::Read { .. })));
    }
}
