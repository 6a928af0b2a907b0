//! Report Viewer Widget
//! Central scrollable panel showing the selected view: heading, table and chart.

use crate::charts::ChartPlotter;
use crate::data::DATA_SOURCE;
use crate::reports::{summary_table, CategoryFilter, View, ViewContent};
use egui::{Color32, ComboBox, RichText, ScrollArea};

const CHART_HEIGHT: f32 = 480.0;
const WARNING: Color32 = Color32::from_rgb(255, 193, 7);
const ERROR: Color32 = Color32::from_rgb(220, 53, 69);

/// Renders one view at a time.
pub struct ReportViewer {
    /// Selector options for the breakdown view.
    pub filter_options: Vec<CategoryFilter>,
}

impl Default for ReportViewer {
    fn default() -> Self {
        Self {
            filter_options: vec![CategoryFilter::All],
        }
    }
}

impl ReportViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `content` for `view`. Returns true when the user picked a new
    /// category filter.
    pub fn show(
        &self,
        ui: &mut egui::Ui,
        view: View,
        content: &Result<ViewContent, String>,
        filter: &mut CategoryFilter,
    ) -> bool {
        let mut filter_changed = false;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(RichText::new(view.heading()).size(24.0).strong());
                ui.add_space(4.0);
                ui.label(RichText::new(view.description()).color(Color32::GRAY));
                ui.add_space(10.0);

                if view.uses_category_filter() {
                    filter_changed = self.show_filter(ui, filter);
                    ui.add_space(10.0);
                }

                match content {
                    Ok(content) => Self::show_content(ui, content),
                    Err(error) => Self::show_error(ui, "Could not build this view", error),
                }

                Self::show_footer(ui);
            });

        filter_changed
    }

    /// Shown in place of every view when the dataset failed to load.
    pub fn show_load_error(ui: &mut egui::Ui, error: &str) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            Self::show_error(ui, "The dataset could not be loaded", error);
        });
        Self::show_footer(ui);
    }

    fn show_filter(&self, ui: &mut egui::Ui, filter: &mut CategoryFilter) -> bool {
        let mut changed = false;

        ui.horizontal(|ui| {
            ui.label(RichText::new("Category:").strong());
            ComboBox::from_id_salt("category_filter")
                .width(260.0)
                .selected_text(filter.label())
                .show_ui(ui, |ui| {
                    for option in &self.filter_options {
                        if ui
                            .selectable_label(*filter == *option, option.label())
                            .clicked()
                            && *filter != *option
                        {
                            *filter = option.clone();
                            changed = true;
                        }
                    }
                });
        });

        changed
    }

    fn show_content(ui: &mut egui::Ui, content: &ViewContent) {
        match content {
            ViewContent::Home(summary) => {
                ui.label(RichText::new("Dataset").size(16.0).strong());
                ui.add_space(5.0);
                ChartPlotter::draw_table(ui, "home", &summary_table(summary));
                return;
            }
            ViewContent::Breakdown(breakdown) => {
                if breakdown.is_empty() {
                    let warning = format!("⚠ No protected areas found for {}", breakdown.filter());
                    ui.label(RichText::new(warning).color(WARNING));
                    return;
                }
                ui.label(RichText::new(breakdown.table_title()).size(16.0).strong());
                ui.add_space(5.0);
            }
            _ => {}
        }

        if let Some(table) = content.table() {
            ChartPlotter::draw_table(ui, "report", &table);
            ui.add_space(5.0);
        }

        if let Some(note) = content.note() {
            ui.label(RichText::new(note).italics());
        }
        ui.add_space(10.0);

        if let Some(chart) = content.chart() {
            ChartPlotter::draw_chart(ui, &chart, CHART_HEIGHT);
        }

        let mismatches = content.reference_mismatches();
        if !mismatches.is_empty() {
            ui.add_space(10.0);
            ui.collapsing(
                RichText::new(format!("⚠ {} territory reference notes", mismatches.len()))
                    .color(WARNING),
                |ui| {
                    for mismatch in mismatches {
                        ui.label(RichText::new(mismatch.to_string()).size(11.0));
                    }
                },
            );
        }
    }

    fn show_error(ui: &mut egui::Ui, title: &str, detail: &str) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(2.0, ERROR))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new(format!("✖ {}", title)).size(16.0).strong().color(ERROR));
                ui.label(RichText::new(detail).size(12.0));
            });
    }

    fn show_footer(ui: &mut egui::Ui) {
        ui.add_space(20.0);
        ui.separator();
        ui.label(RichText::new("Data source").size(11.0).strong());
        ui.label(RichText::new(DATA_SOURCE).size(10.0).color(Color32::GRAY));
    }
}
