//! Charts module - chart description and rendering

mod model;
mod plotter;
mod renderer;

pub use model::{BarColor, BarSpec, ChartSpec, Orientation};
pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer};
