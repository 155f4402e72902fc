use plotters::style::{RGBColor, WHITE};

/// Appearance of a rendered chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Image width in pixels.
    pub width: u32,

    /// Image height in pixels.
    pub height: u32,

    pub title: String,
    pub x_label: String,
    pub y_label: String,

    /// Line thickness in pixels.
    pub line_width: u32,

    pub background: RGBColor,
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: String::new(),
            x_label: "Time (s)".to_string(),
            y_label: "Temperature (°C)".to_string(),
            line_width: 2,
            background: WHITE,
            show_grid: true,
        }
    }
}
