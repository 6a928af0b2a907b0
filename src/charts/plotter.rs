//! Chart Plotter Module
//! Draws report charts and tables interactively using egui_plot.

use crate::charts::{BarColor, ChartSpec, Orientation};
use crate::reports::TableView;
use egui::{Align2, Color32, RichText};
use egui_plot::{Bar, BarChart, GridMark, HLine, LineStyle, Plot, PlotPoint, Text, VLine};

const BAR_WIDTH: f64 = 0.7;

/// Draws `ChartSpec`s inside an egui `Ui`.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color(color: BarColor) -> Color32 {
        let (r, g, b) = color.rgb();
        Color32::from_rgb(r, g, b)
    }

    /// One grid mark per bar so every category gets its label.
    fn category_marks(count: usize) -> Vec<GridMark> {
        (0..count)
            .map(|i| GridMark {
                value: i as f64,
                step_size: 1.0,
            })
            .collect()
    }

    fn bars(chart: &ChartSpec) -> Vec<Bar> {
        chart
            .bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                Bar::new(i as f64, bar.value)
                    .width(BAR_WIDTH)
                    .name(&bar.label)
                    .fill(Self::color(bar.color))
            })
            .collect()
    }

    fn bar_chart(chart: &ChartSpec) -> BarChart {
        let mut bar_chart = BarChart::new(Self::bars(chart)).name(&chart.title);

        if chart.orientation == Orientation::Horizontal {
            bar_chart = bar_chart.horizontal();
        }
        if chart.tooltips {
            bar_chart = bar_chart
                .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
                    format!("{}\n{}", bar.name, bar.value)
                }));
        }

        bar_chart
    }

    /// Draw a chart, filling the available width.
    pub fn draw_chart(ui: &mut egui::Ui, chart: &ChartSpec, height: f32) {
        ui.label(RichText::new(&chart.title).size(15.0).strong());

        match chart.orientation {
            Orientation::Vertical => Self::draw_vertical(ui, chart, height),
            Orientation::Horizontal => Self::draw_horizontal(ui, chart, height),
        }
    }

    fn draw_vertical(ui: &mut egui::Ui, chart: &ChartSpec, height: f32) {
        let (min, max) = chart.value_range();
        let count = chart.bars.len();
        let labels = chart.clone();

        Plot::new(format!("chart_{}", chart.id))
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(chart.category_axis.clone())
            .y_axis_label(chart.value_axis.clone())
            .x_grid_spacer(move |_input| Self::category_marks(count))
            .x_axis_formatter(move |mark, _range| {
                labels.category_at(mark.value).unwrap_or_default().to_string()
            })
            .include_x(-0.5)
            .include_x(count as f64 - 0.5)
            .include_y(min)
            .include_y(max)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(Self::bar_chart(chart));

                if chart.zero_line {
                    plot_ui.hline(
                        HLine::new(0.0)
                            .color(Color32::GRAY)
                            .style(LineStyle::dashed_loose()),
                    );
                }

                for (i, bar) in chart.bars.iter().enumerate() {
                    let Some(text) = &bar.value_label else {
                        continue;
                    };
                    let anchor = if bar.value >= 0.0 {
                        Align2::CENTER_BOTTOM
                    } else {
                        Align2::CENTER_TOP
                    };
                    let point = PlotPoint::new(i as f64, bar.value);
                    plot_ui.text(Text::new(point, RichText::new(text).size(10.0)).anchor(anchor));
                }
            });
    }

    fn draw_horizontal(ui: &mut egui::Ui, chart: &ChartSpec, height: f32) {
        let (min, max) = chart.value_range();
        let count = chart.bars.len();
        let labels = chart.clone();

        Plot::new(format!("chart_{}", chart.id))
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(chart.value_axis.clone())
            .y_axis_label(chart.category_axis.clone())
            .y_grid_spacer(move |_input| Self::category_marks(count))
            .y_axis_formatter(move |mark, _range| {
                labels.category_at(mark.value).unwrap_or_default().to_string()
            })
            .include_y(-0.5)
            .include_y(count as f64 - 0.5)
            .include_x(min)
            .include_x(max)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(Self::bar_chart(chart));

                if chart.zero_line {
                    plot_ui.vline(
                        VLine::new(0.0)
                            .color(Color32::GRAY)
                            .style(LineStyle::dashed_loose()),
                    );
                }

                let pad = (max - min) * 0.01;
                for (i, bar) in chart.bars.iter().enumerate() {
                    let y = i as f64;

                    if let Some(text) = &bar.value_label {
                        plot_ui.text(
                            Text::new(
                                PlotPoint::new(bar.value + pad, y),
                                RichText::new(text).size(10.0),
                            )
                            .anchor(Align2::LEFT_CENTER),
                        );
                    }

                    if let Some(text) = &bar.inner_label {
                        // Narrow bars get the label at their midpoint.
                        let x = if bar.value < 5.0 { bar.value / 2.0 } else { 0.5 };
                        plot_ui.text(
                            Text::new(
                                PlotPoint::new(x, y),
                                RichText::new(text).size(10.0).color(Color32::WHITE),
                            )
                            .anchor(Align2::LEFT_CENTER),
                        );
                    }
                }
            });
    }

    /// Draw a formatted report table.
    pub fn draw_table(ui: &mut egui::Ui, id: &str, table: &TableView) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(format!("table_{}", id)))
                    .striped(true)
                    .min_col_width(60.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for header in &table.headers {
                            ui.label(RichText::new(header).strong().size(12.0));
                        }
                        ui.end_row();

                        for row in &table.rows {
                            for (i, cell) in row.iter().enumerate() {
                                if i == 0 {
                                    ui.label(RichText::new(cell).size(12.0));
                                } else {
                                    ui.with_layout(
                                        egui::Layout::right_to_left(egui::Align::Center),
                                        |ui| ui.label(RichText::new(cell).size(12.0).monospace()),
                                    );
                                }
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
