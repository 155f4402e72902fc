//! Headless line charts.
//!
//! [`render`] draws one or more [`Series`] against a shared time axis and
//! writes the chart to an image file, choosing the backend from the file
//! extension: `.svg` paths produce SVG, anything else a PNG bitmap.
//!
//! ```no_run
//! use plotters::style::{BLUE, RED};
//! use twine_zone::support::plot::{PlotConfig, Series, render};
//!
//! let series = [
//!     Series::new("Internal Temp (Tint)", vec![(0.0, 20.0), (10.0, 20.1)], RED),
//!     Series::new("Structural Temp (Ts)", vec![(0.0, 18.0), (10.0, 18.04)], BLUE),
//! ];
//! render("zone.svg", &series, &PlotConfig::default()).unwrap();
//! ```

mod config;

pub use config::PlotConfig;

use std::path::Path;

use plotters::{coord::Shift, prelude::*};
use thiserror::Error;

/// A labeled sequence of `(x, y)` points drawn as one line.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
}

impl Series {
    /// Creates a series.
    #[must_use]
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>, color: RGBColor) -> Self {
        Self {
            label: label.into(),
            points,
            color,
        }
    }
}

/// Errors that can occur while rendering a chart.
#[derive(Debug, Error)]
pub enum PlotError {
    /// There were no points to draw.
    #[error("nothing to plot")]
    Empty,

    /// A series contains NaN or an infinite coordinate.
    #[error("series `{label}` has a non-finite point at index {index}")]
    NonFinite { label: String, index: usize },

    /// The drawing backend failed.
    #[error("drawing failed: {0}")]
    Draw(String),
}

/// Renders `series` as a line chart at `path`.
///
/// # Errors
///
/// Returns [`PlotError::Empty`] or [`PlotError::NonFinite`] before touching
/// the file system if the data cannot be drawn, and [`PlotError::Draw`] if
/// the backend fails (e.g., unwritable path, missing fonts).
pub fn render(
    path: impl AsRef<Path>,
    series: &[Series],
    config: &PlotConfig,
) -> Result<(), PlotError> {
    let bounds = Bounds::of(series)?;
    let path = path.as_ref();
    let size = (config.width, config.height);

    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    if is_svg {
        draw(&SVGBackend::new(path, size).into_drawing_area(), series, &bounds, config)
    } else {
        draw(&BitMapBackend::new(path, size).into_drawing_area(), series, &bounds, config)
    }
}

/// Axis ranges covering every point, with a margin on the value axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    x: (f64, f64),
    y: (f64, f64),
}

impl Bounds {
    fn of(series: &[Series]) -> Result<Self, PlotError> {
        let mut x = (f64::INFINITY, f64::NEG_INFINITY);
        let mut y = (f64::INFINITY, f64::NEG_INFINITY);

        for s in series {
            for (index, &(px, py)) in s.points.iter().enumerate() {
                if !px.is_finite() || !py.is_finite() {
                    return Err(PlotError::NonFinite {
                        label: s.label.clone(),
                        index,
                    });
                }
                x = (x.0.min(px), x.1.max(px));
                y = (y.0.min(py), y.1.max(py));
            }
        }

        if x.0 > x.1 {
            return Err(PlotError::Empty);
        }

        if x.0 == x.1 {
            x = (x.0 - 1.0, x.1 + 1.0);
        }

        let margin = if y.0 == y.1 { 1.0 } else { 0.05 * (y.1 - y.0) };
        y = (y.0 - margin, y.1 + margin);

        Ok(Self { x, y })
    }
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &[Series],
    bounds: &Bounds,
    config: &PlotConfig,
) -> Result<(), PlotError> {
    root.fill(&config.background).map_err(draw_error)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 32.0).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(bounds.x.0..bounds.x.1, bounds.y.0..bounds.y.1)
        .map_err(draw_error)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str());
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw().map_err(draw_error)?;

    for s in series {
        let style = s.color.stroke_width(config.line_width);
        chart
            .draw_series(LineSeries::new(s.points.iter().copied(), style))
            .map_err(draw_error)?
            .label(s.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(draw_error)?;

    root.present().map_err(draw_error)
}

fn draw_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> PlotError {
    PlotError::Draw(err.to_string())
}
