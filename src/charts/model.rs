//! Chart description shared by the interactive plotter and the PNG renderer.

/// Bar direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Categories along x, values up the y axis.
    Vertical,
    /// Categories along y, values along the x axis.
    Horizontal,
}

/// Fill colors used by the dashboard charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarColor {
    SkyBlue,
    LightGreen,
    MediumSeaGreen,
    DarkGreen,
    SteelBlue,
    Positive,
    Negative,
}

impl BarColor {
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            BarColor::SkyBlue => (135, 206, 235),
            BarColor::LightGreen => (144, 238, 144),
            BarColor::MediumSeaGreen => (60, 179, 113),
            BarColor::DarkGreen => (0, 100, 0),
            BarColor::SteelBlue => (70, 130, 180),
            BarColor::Positive => (0, 128, 0),
            BarColor::Negative => (220, 20, 60),
        }
    }

    /// Green for values at or above zero, red below.
    pub fn for_sign(value: f64) -> Self {
        if value >= 0.0 {
            BarColor::Positive
        } else {
            BarColor::Negative
        }
    }
}

/// A single bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSpec {
    pub label: String,
    pub value: f64,
    pub color: BarColor,
    /// Text drawn just past the end of the bar.
    pub value_label: Option<String>,
    /// Text drawn inside the bar, near its base.
    pub inner_label: Option<String>,
}

impl BarSpec {
    pub fn new(label: impl Into<String>, value: f64, color: BarColor) -> Self {
        Self {
            label: label.into(),
            value,
            color,
            value_label: None,
            inner_label: None,
        }
    }

    pub fn with_value_label(mut self, text: impl Into<String>) -> Self {
        self.value_label = Some(text.into());
        self
    }

    pub fn with_inner_label(mut self, text: impl Into<String>) -> Self {
        self.inner_label = Some(text.into());
        self
    }
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// Stable identifier, also used as the PNG file stem.
    pub id: String,
    pub title: String,
    pub category_axis: String,
    pub value_axis: String,
    pub orientation: Orientation,
    pub bars: Vec<BarSpec>,
    /// Draw a reference line at zero (for signed values).
    pub zero_line: bool,
    /// Headroom multiplier applied to the largest value.
    pub value_headroom: f64,
    /// Show a hover tooltip per bar in the interactive view.
    pub tooltips: bool,
}

impl ChartSpec {
    pub fn new(id: &str, title: impl Into<String>, orientation: Orientation) -> Self {
        Self {
            id: id.to_string(),
            title: title.into(),
            category_axis: String::new(),
            value_axis: String::new(),
            orientation,
            bars: Vec::new(),
            zero_line: false,
            value_headroom: 1.05,
            tooltips: false,
        }
    }

    pub fn axes(mut self, category_axis: impl Into<String>, value_axis: impl Into<String>) -> Self {
        self.category_axis = category_axis.into();
        self.value_axis = value_axis.into();
        self
    }

    pub fn bars(mut self, bars: Vec<BarSpec>) -> Self {
        self.bars = bars;
        self
    }

    pub fn zero_line(mut self) -> Self {
        self.zero_line = true;
        self
    }

    pub fn headroom(mut self, factor: f64) -> Self {
        self.value_headroom = factor;
        self
    }

    pub fn tooltips(mut self) -> Self {
        self.tooltips = true;
        self
    }

    /// Label of the bar centred on `position`, if any.
    ///
    /// Bars sit at integer positions `0..n` on the category axis.
    pub fn category_at(&self, position: f64) -> Option<&str> {
        let index = position.round();
        if (position - index).abs() > 1e-6 || index < 0.0 {
            return None;
        }
        self.bars.get(index as usize).map(|b| b.label.as_str())
    }

    /// Value range to plot, always including zero.
    pub fn value_range(&self) -> (f64, f64) {
        let finite = self.bars.iter().map(|b| b.value).filter(|v| v.is_finite());
        let (min, max) = finite.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));

        let max = if max > 0.0 { max * self.value_headroom } else { max };
        let min = if min < 0.0 { min * self.value_headroom } else { min };

        if (max - min).abs() < f64::EPSILON {
            (min, min + 1.0)
        } else {
            (min, max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range_includes_zero_and_headroom() {
        let chart = ChartSpec::new("c", "C", Orientation::Horizontal)
            .headroom(1.15)
            .bars(vec![
                BarSpec::new("a", 20.0, BarColor::SkyBlue),
                BarSpec::new("b", 40.0, BarColor::SkyBlue),
            ]);
        let (min, max) = chart.value_range();
        assert_eq!(min, 0.0);
        assert!((max - 46.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_at_integer_positions_only() {
        let chart = ChartSpec::new("c", "C", Orientation::Vertical).bars(vec![
            BarSpec::new("Ica", 1.0, BarColor::SkyBlue),
            BarSpec::new("Lima", 2.0, BarColor::SkyBlue),
        ]);
        assert_eq!(chart.category_at(0.0), Some("Ica"));
        assert_eq!(chart.category_at(1.0), Some("Lima"));
        assert_eq!(chart.category_at(0.5), None);
        assert_eq!(chart.category_at(2.0), None);
        assert_eq!(chart.category_at(-1.0), None);
    }

    #[test]
    fn test_value_range_handles_negative_and_empty() {
        let signed = ChartSpec::new("s", "S", Orientation::Vertical).bars(vec![
            BarSpec::new("a", -2.0, BarColor::for_sign(-2.0)),
            BarSpec::new("b", 3.0, BarColor::for_sign(3.0)),
        ]);
        let (min, max) = signed.value_range();
        assert!(min < -2.0 && max > 3.0);

        let empty = ChartSpec::new("e", "E", Orientation::Vertical);
        assert_eq!(empty.value_range(), (0.0, 1.0));
    }
}
