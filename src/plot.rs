//! Chart dispatch and the SVG charting backend.
//!
//! [`dispatch`] only decides *what* gets plotted: one call per case, in case
//! order. Everything visual (fonts, colors, sizes) belongs to the backend.

use crate::error::{Error, Result};
use crate::series::SeriesByCase;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::Range;

const TITLE_FONT_SIZE: u32 = 22;
const LABEL_FONT_SIZE: u32 = 16;
const MARGIN: u32 = 16;
const X_LABEL_AREA_SIZE: u32 = 48;
const Y_LABEL_AREA_SIZE: u32 = 96;

/// Something that turns an (x, y) series into a figure.
pub trait PlotBackend {
    type Figure;

    fn plot_series(&mut self, x: &[f64], y: &[f64], title: &str) -> Result<Self::Figure>;
}

/// Plot every case's series, one figure per case, in case order.
pub fn dispatch<B>(backend: &mut B, series_by_case: &SeriesByCase) -> Result<Vec<B::Figure>>
where
    B: PlotBackend + ?Sized,
{
    series_by_case
        .iter()
        .map(|(case, series)| {
            tracing::trace!(case = %case, title = %series.title, "Plotting series");
            backend.plot_series(&series.parameters(), &series.cycles(), &series.title)
        })
        .collect()
}

/// Visual settings handed to [`SvgPlotter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    pub font_family: String,
    pub width: u32,
    pub height: u32,
    pub line_color: String,
    pub background_color: String,
    pub grid_color: String,
    pub x_label: String,
    pub y_label: String,
    pub line_width: u32,
    pub marker_size: u32,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            width: 1024,
            height: 768,
            line_color: "#FF4504".to_string(),
            background_color: "#E2E2E2".to_string(),
            grid_color: "#FFFFFF".to_string(),
            x_label: "n".to_string(),
            y_label: "Runtime [cycles]".to_string(),
            line_width: 2,
            marker_size: 6,
        }
    }
}

struct Palette {
    line: RGBColor,
    background: RGBColor,
    grid: RGBColor,
}

impl PlotStyle {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::config(format!(
                "Plot size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.font_family.trim().is_empty() {
            return Err(Error::config("Plot font family is empty"));
        }
        self.palette().map(|_| ())
    }

    fn palette(&self) -> Result<Palette> {
        Ok(Palette {
            line: parse_color("style.line_color", &self.line_color)?,
            background: parse_color("style.background_color", &self.background_color)?,
            grid: parse_color("style.grid_color", &self.grid_color)?,
        })
    }
}

fn parse_color(field: &str, value: &str) -> Result<RGBColor> {
    parse_hex_color(value)
        .map(|(r, g, b)| RGBColor(r, g, b))
        .ok_or_else(|| Error::config(format!("Invalid color for {field}: {value}")))
}

fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// A rendered chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgFigure {
    pub title: String,
    pub svg: String,
}

/// Renders each series as a standalone SVG document in memory.
#[derive(Debug, Clone, Default)]
pub struct SvgPlotter {
    style: PlotStyle,
}

impl SvgPlotter {
    pub fn new(style: PlotStyle) -> Result<Self> {
        style.validate()?;
        Ok(Self { style })
    }

    #[must_use]
    pub const fn style(&self) -> &PlotStyle {
        &self.style
    }
}

impl PlotBackend for SvgPlotter {
    type Figure = SvgFigure;

    fn plot_series(&mut self, x: &[f64], y: &[f64], title: &str) -> Result<SvgFigure> {
        if x.len() != y.len() {
            return Err(Error::plot(format!(
                "Series {title:?} has {} x values but {} y values",
                x.len(),
                y.len()
            )));
        }
        let svg = render_svg(&self.style, x, y, title)?;
        Ok(SvgFigure {
            title: title.to_string(),
            svg,
        })
    }
}

fn plot_error(err: impl std::fmt::Display) -> Error {
    Error::plot(err.to_string())
}

fn render_svg(style: &PlotStyle, x: &[f64], y: &[f64], title: &str) -> Result<String> {
    let palette = style.palette()?;
    let font = style.font_family.as_str();
    let (x_range, y_range) = axis_ranges(x, y);
    let points = x.iter().copied().zip(y.iter().copied());

    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (style.width, style.height)).into_drawing_area();
        root.fill(&WHITE).map_err(plot_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, (font, TITLE_FONT_SIZE))
            .margin(MARGIN)
            .x_label_area_size(X_LABEL_AREA_SIZE)
            .y_label_area_size(Y_LABEL_AREA_SIZE)
            .build_cartesian_2d(x_range, y_range)
            .map_err(plot_error)?;

        chart
            .plotting_area()
            .fill(&palette.background)
            .map_err(plot_error)?;

        // Horizontal grid only, drawn in the grid color over the background.
        chart
            .configure_mesh()
            .disable_x_mesh()
            .bold_line_style(palette.grid)
            .light_line_style(palette.background)
            .x_desc(style.x_label.as_str())
            .y_desc(style.y_label.as_str())
            .label_style((font, LABEL_FONT_SIZE))
            .axis_desc_style((font, LABEL_FONT_SIZE))
            .draw()
            .map_err(plot_error)?;

        chart
            .draw_series(LineSeries::new(
                points.clone(),
                palette.line.stroke_width(style.line_width),
            ))
            .map_err(plot_error)?;
        chart
            .draw_series(
                points.map(|point| Circle::new(point, style.marker_size, palette.line.filled())),
            )
            .map_err(plot_error)?;

        root.present().map_err(plot_error)?;
    }
    Ok(svg)
}

fn axis_ranges(x: &[f64], y: &[f64]) -> (Range<f64>, Range<f64>) {
    let (x_min, x_max) = bounds(x).unwrap_or((0.0, 1.0));
    let x_pad = if x_max > x_min {
        (x_max - x_min) * 0.05
    } else {
        1.0
    };

    let (y_min, y_max) = bounds(y).unwrap_or((0.0, 1.0));
    let y_low = y_min.min(0.0);
    let y_high = if y_max > y_low {
        y_low + (y_max - y_low) * 1.1
    } else {
        y_low + 1.0
    };

    (x_min - x_pad..x_max + x_pad, y_low..y_high)
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|value| value.is_finite())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}
