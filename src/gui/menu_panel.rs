//! Menu Panel Widget
//! Left side panel with the view selector and export controls.

use crate::reports::View;
use egui::{Color32, RichText};

/// Left side menu listing the dashboard views.
pub struct MenuPanel {
    pub selected: View,
    pub status: String,
    /// Whether a dataset is loaded and views can be browsed.
    pub enabled: bool,
}

impl Default for MenuPanel {
    fn default() -> Self {
        Self {
            selected: View::default(),
            status: "Ready".to_string(),
            enabled: false,
        }
    }
}

impl MenuPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Draw the menu
    pub fn show(&mut self, ui: &mut egui::Ui) -> MenuAction {
        let mut action = MenuAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌿 ANP Dashboard")
                    .size(22.0)
                    .color(Color32::from_rgb(60, 179, 113)),
            );
            ui.label(
                RichText::new("Protected Natural Areas of Peru")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Views =====
        ui.label(RichText::new("📋 Menu").size(14.0).strong());
        ui.add_space(5.0);

        ui.add_enabled_ui(self.enabled, |ui| {
            for view in View::ALL {
                if ui
                    .radio_value(&mut self.selected, view, view.label())
                    .changed()
                {
                    action = MenuAction::ViewChanged(view);
                }
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export Charts").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = MenuAction::ExportCharts;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by the menu
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuAction {
    None,
    ViewChanged(View),
    ExportCharts,
}
