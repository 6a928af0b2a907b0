//! GUI module - User interface components

mod app;
mod menu_panel;
mod report_viewer;

pub use app::DashboardApp;
pub use menu_panel::{MenuAction, MenuPanel};
pub use report_viewer::ReportViewer;
