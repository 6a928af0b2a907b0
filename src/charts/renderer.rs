//! Static Chart Renderer
//! Writes report charts to PNG files with plotters.
//!
//! Layout mirrors the interactive charts:
//! - vertical bars with rotated category labels
//! - horizontal bars with the category on the y axis, optional labels
//!   inside and past the end of each bar
//! - dashed zero line for signed values

use crate::charts::{ChartSpec, Orientation};
use crate::reports::format;
use log::{debug, info};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

const FONT: &str = "sans-serif";
const HALF_BAR: f64 = 0.35;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart '{0}' has no bars to draw")]
    Empty(String),
    #[error("Failed to draw chart: {0}")]
    Draw(String),
    #[error("Failed to prepare output directory: {0}")]
    Io(#[from] std::io::Error),
}

fn draw_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Draw(e.to_string())
}

fn rgb(chart_color: crate::charts::BarColor) -> RGBColor {
    let (r, g, b) = chart_color.rgb();
    RGBColor(r, g, b)
}

/// Number of decimals for value-axis labels over `range`.
fn axis_decimals(min: f64, max: f64) -> usize {
    if max - min < 10.0 {
        1
    } else {
        0
    }
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render one chart to a PNG file.
    pub fn render_png(
        chart: &ChartSpec,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        if chart.bars.is_empty() {
            return Err(RenderError::Empty(chart.id.clone()));
        }

        debug!("Rendering chart '{}' to {:?}", chart.id, path);

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        match chart.orientation {
            Orientation::Vertical => Self::draw_vertical(&root, chart)?,
            Orientation::Horizontal => Self::draw_horizontal(&root, chart)?,
        }

        root.present().map_err(draw_err)?;
        Ok(())
    }

    /// Render every chart into `dir` as `<id>.png`, in parallel.
    pub fn export_all(
        charts: &[ChartSpec],
        dir: &Path,
        width: u32,
        height: u32,
    ) -> Result<Vec<PathBuf>, RenderError> {
        std::fs::create_dir_all(dir)?;

        let written = charts
            .par_iter()
            .map(|chart| {
                let path = dir.join(format!("{}.png", chart.id));
                Self::render_png(chart, &path, width, height)?;
                Ok(path)
            })
            .collect::<Result<Vec<_>, RenderError>>()?;

        info!("Exported {} charts to {:?}", written.len(), dir);
        Ok(written)
    }

    fn draw_vertical(root: &Area<'_>, chart: &ChartSpec) -> Result<(), RenderError> {
        let count = chart.bars.len();
        let (min, max) = chart.value_range();
        let decimals = axis_decimals(min, max);
        let category = |x: &f64| chart.category_at(*x).unwrap_or_default().to_string();
        let value = |y: &f64| format::thousands(*y, decimals);

        let mut ctx = ChartBuilder::on(root)
            .caption(&chart.title, (FONT, 24))
            .margin(20)
            .x_label_area_size(150)
            .y_label_area_size(90)
            .build_cartesian_2d(-0.5..count as f64 - 0.5, min..max)
            .map_err(draw_err)?;

        ctx.configure_mesh()
            .disable_x_mesh()
            .x_labels(count)
            .x_label_formatter(&category)
            .x_label_style((FONT, 13).into_font().transform(FontTransform::Rotate90))
            .y_label_formatter(&value)
            .x_desc(chart.category_axis.as_str())
            .y_desc(chart.value_axis.as_str())
            .draw()
            .map_err(draw_err)?;

        ctx.draw_series(chart.bars.iter().enumerate().map(|(i, bar)| {
            let x = i as f64;
            let corners = [(x - HALF_BAR, 0.0), (x + HALF_BAR, bar.value)];
            Rectangle::new(corners, rgb(bar.color).filled())
        }))
        .map_err(draw_err)?;

        if chart.zero_line {
            ctx.draw_series(LineSeries::new(
                vec![(-0.5, 0.0), (count as f64 - 0.5, 0.0)],
                BLACK.mix(0.5).stroke_width(1),
            ))
            .map_err(draw_err)?;
        }

        let pad = (max - min) * 0.01;
        ctx.draw_series(chart.bars.iter().enumerate().filter_map(|(i, bar)| {
            let text = bar.value_label.as_ref()?;
            let (y, vpos) = if bar.value >= 0.0 {
                (bar.value + pad, VPos::Bottom)
            } else {
                (bar.value - pad, VPos::Top)
            };
            let style = (FONT, 13)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, vpos));
            Some(Text::new(text.clone(), (i as f64, y), style))
        }))
        .map_err(draw_err)?;

        Ok(())
    }

    fn draw_horizontal(root: &Area<'_>, chart: &ChartSpec) -> Result<(), RenderError> {
        let count = chart.bars.len();
        let (min, max) = chart.value_range();
        let decimals = axis_decimals(min, max);
        let category = |y: &f64| chart.category_at(*y).unwrap_or_default().to_string();
        let value = |x: &f64| format::thousands(*x, decimals);

        let mut ctx = ChartBuilder::on(root)
            .caption(&chart.title, (FONT, 24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(170)
            .build_cartesian_2d(min..max, -0.5..count as f64 - 0.5)
            .map_err(draw_err)?;

        ctx.configure_mesh()
            .disable_y_mesh()
            .y_labels(count)
            .y_label_formatter(&category)
            .x_label_formatter(&value)
            .x_desc(chart.value_axis.as_str())
            .y_desc(chart.category_axis.as_str())
            .draw()
            .map_err(draw_err)?;

        ctx.draw_series(chart.bars.iter().enumerate().map(|(i, bar)| {
            let y = i as f64;
            let corners = [(0.0, y - HALF_BAR), (bar.value, y + HALF_BAR)];
            Rectangle::new(corners, rgb(bar.color).filled())
        }))
        .map_err(draw_err)?;

        if chart.zero_line {
            ctx.draw_series(LineSeries::new(
                vec![(0.0, -0.5), (0.0, count as f64 - 0.5)],
                BLACK.mix(0.5).stroke_width(1),
            ))
            .map_err(draw_err)?;
        }

        let pad = (max - min) * 0.01;
        let left_center = Pos::new(HPos::Left, VPos::Center);

        ctx.draw_series(chart.bars.iter().enumerate().filter_map(|(i, bar)| {
            let text = bar.value_label.as_ref()?;
            let style = (FONT, 13).into_font().color(&BLACK).pos(left_center);
            Some(Text::new(text.clone(), (bar.value + pad, i as f64), style))
        }))
        .map_err(draw_err)?;

        ctx.draw_series(chart.bars.iter().enumerate().filter_map(|(i, bar)| {
            let text = bar.inner_label.as_ref()?;
            // Narrow bars get the label at their midpoint.
            let x = if bar.value < 5.0 { bar.value / 2.0 } else { 0.5 };
            let style = (FONT, 13).into_font().color(&WHITE).pos(left_center);
            Some(Text::new(text.clone(), (x, i as f64), style))
        }))
        .map_err(draw_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_decimals() {
        assert_eq!(axis_decimals(0.0, 4.5), 1);
        assert_eq!(axis_decimals(-20.0, 35.0), 0);
    }

    #[test]
    fn test_empty_chart_is_rejected() {
        let chart = ChartSpec::new("empty", "Empty", Orientation::Vertical);
        let dir = tempfile::TempDir::new().unwrap();
        let err = StaticChartRenderer::render_png(&chart, &dir.path().join("e.png"), 400, 300)
            .unwrap_err();
        assert!(matches!(err, RenderError::Empty(id) if id == "empty"));
    }

    #[test]
    fn test_export_all_writes_one_png_per_chart() {
        use crate::charts::{BarColor, BarSpec};

        let vertical = ChartSpec::new("signed", "Signed", Orientation::Vertical)
            .zero_line()
            .bars(vec![
                BarSpec::new("Ica", -2.5, BarColor::for_sign(-2.5)).with_value_label("-2.50%"),
                BarSpec::new("Lima", 2.5, BarColor::for_sign(2.5)).with_value_label("+2.50%"),
            ]);
        let horizontal = ChartSpec::new("share", "Share", Orientation::Horizontal).bars(vec![
            BarSpec::new("Lima", 75.0, BarColor::MediumSeaGreen)
                .with_value_label("75.0%")
                .with_inner_label("Park2"),
        ]);

        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("charts");
        let written =
            StaticChartRenderer::export_all(&[vertical, horizontal], &out, 640, 480).unwrap();

        assert_eq!(written, vec![out.join("signed.png"), out.join("share.png")]);
        for path in &written {
            let size = std::fs::metadata(path).unwrap().len();
            assert!(size > 0, "{:?} is empty", path);
        }
    }
}
