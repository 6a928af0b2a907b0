//! Headless runs: dump report tables as text and write charts as PNG.

use crate::charts::{ChartSpec, RenderError, StaticChartRenderer};
use crate::config::ExportSettings;
use crate::data::{AnpTable, TerritoryReference};
use crate::reports::{summary_table, CategoryFilter, ReportError, View, ViewContent};
use log::info;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Build every view over the whole dataset.
pub fn build_all(
    table: &AnpTable,
    reference: &TerritoryReference,
) -> Result<Vec<(View, ViewContent)>, ReportError> {
    View::ALL
        .into_iter()
        .map(|view| Ok((view, view.build(table, reference, &CategoryFilter::All)?)))
        .collect()
}

/// Charts of the given views, in menu order.
pub fn collect_charts(contents: &[(View, ViewContent)]) -> Vec<ChartSpec> {
    contents.iter().filter_map(|(_, content)| content.chart()).collect()
}

/// Write each view's heading and table to `out`.
pub fn print_tables(contents: &[(View, ViewContent)], out: &mut impl Write) -> std::io::Result<()> {
    for (view, content) in contents {
        writeln!(out, "== {} ==", view.heading())?;

        match content {
            ViewContent::Home(summary) => {
                writeln!(out, "{}", summary_table(summary).to_text())?;
            }
            ViewContent::Breakdown(breakdown) if breakdown.is_empty() => {
                writeln!(out, "No records for {}", breakdown.filter())?;
            }
            _ => {
                if let Some(table) = content.table() {
                    writeln!(out, "{}", table.to_text())?;
                }
            }
        }

        if let Some(note) = content.note() {
            writeln!(out, "{}", note)?;
        }
        for mismatch in content.reference_mismatches() {
            writeln!(out, "note: {}", mismatch)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Render every chart into `dir`.
pub fn export_charts(
    contents: &[(View, ViewContent)],
    dir: &Path,
    settings: ExportSettings,
) -> Result<Vec<PathBuf>, RenderError> {
    let charts = collect_charts(contents);
    info!("Exporting {} charts", charts.len());
    StaticChartRenderer::export_all(&charts, dir, settings.width, settings.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::tests::three_parks;

    #[test]
    fn test_build_all_covers_menu() {
        let contents = build_all(&three_parks(), &TerritoryReference::peru()).unwrap();
        assert_eq!(contents.len(), View::ALL.len());
        assert_eq!(collect_charts(&contents).len(), View::ALL.len() - 1);
    }

    #[test]
    fn test_print_tables() {
        let contents = build_all(&three_parks(), &TerritoryReference::peru()).unwrap();
        let mut out = Vec::new();
        print_tables(&contents, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        for view in View::ALL {
            assert!(text.contains(view.heading()), "{:?}", view);
        }
        assert!(text.contains("CategoryA"));
        assert!(text.contains("400.00 ha"));
        assert!(text.contains("Mean across departments:"));
    }

    #[test]
    fn test_export_charts_writes_every_view() {
        let contents = build_all(&three_parks(), &TerritoryReference::peru()).unwrap();
        let dir = tempfile::TempDir::new().unwrap();
        let settings = ExportSettings {
            width: 800,
            height: 600,
        };

        let written = export_charts(&contents, dir.path(), settings).unwrap();
        assert_eq!(written.len(), 6);

        for id in [
            "territory_share",
            "area_count",
            "contribution",
            "category_surface",
            "performance",
            "category_breakdown",
        ] {
            let path = dir.path().join(format!("{}.png", id));
            assert!(written.contains(&path), "{} not reported", id);
            assert!(std::fs::metadata(&path).unwrap().len() > 0, "{} is empty", id);
        }
    }
}

