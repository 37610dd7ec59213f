//! Line charts of trajectories.
//!
//! Output format follows the file extension: `.png` goes through the bitmap
//! backend, `.svg` through the SVG backend.

use std::path::Path;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::error::{AppError, AppResult};

/// One named `(x, y)` series.
#[derive(Debug, Clone, Copy)]
pub struct PlotSeries<'a> {
    pub label: &'a str,
    pub x: &'a [f64],
    pub y: &'a [f64],
}

#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub size: (u32, u32),
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            title: "Closed-loop response".to_string(),
            x_desc: "t (s)".to_string(),
            y_desc: "y".to_string(),
            size: (800, 400),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotFormat {
    Png,
    Svg,
}

impl PlotFormat {
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("png") => Ok(Self::Png),
            Some("svg") => Ok(Self::Svg),
            _ => Err(AppError::InvalidInput(format!(
                "Unsupported plot format: {} (expected .png or .svg)",
                path.display()
            ))),
        }
    }
}

/// Plot a single `y(x)` line.
pub fn line(x: &[f64], y: &[f64], path: &Path, options: &PlotOptions) -> AppResult<()> {
    multiple_lines(
        &[PlotSeries {
            label: options.y_desc.as_str(),
            x,
            y,
        }],
        path,
        options,
    )
}

/// Plot several series on shared axes, with a legend.
///
/// Non-finite points are skipped.
pub fn multiple_lines(series: &[PlotSeries<'_>], path: &Path, options: &PlotOptions) -> AppResult<()> {
    let format = PlotFormat::from_path(path)?;

    for s in series {
        if s.x.len() != s.y.len() {
            return Err(AppError::InvalidInput(format!(
                "Series '{}' has {} x values but {} y values",
                s.label,
                s.x.len(),
                s.y.len()
            )));
        }
    }

    let points: Vec<Vec<(f64, f64)>> = series
        .iter()
        .map(|s| {
            s.x.iter()
                .copied()
                .zip(s.y.iter().copied())
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .collect()
        })
        .collect();

    let (x_range, y_range) = bounds(&points)
        .ok_or_else(|| AppError::InvalidInput("Nothing to plot: no finite points".to_string()))?;

    tracing::debug!(path = %path.display(), series = series.len(), "rendering plot");

    let labels: Vec<&str> = series.iter().map(|s| s.label).collect();
    let result = match format {
        PlotFormat::Png => {
            let root = BitMapBackend::new(path, options.size).into_drawing_area();
            draw(&root, &labels, &points, x_range, y_range, options)
                .and_then(|_| root.present())
                .map_err(|e| e.to_string())
        }
        PlotFormat::Svg => {
            let root = SVGBackend::new(path, options.size).into_drawing_area();
            draw(&root, &labels, &points, x_range, y_range, options)
                .and_then(|_| root.present())
                .map_err(|e| e.to_string())
        }
    };
    result.map_err(AppError::Plot)
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    labels: &[&str],
    points: &[Vec<(f64, f64)>],
    x_range: (f64, f64),
    y_range: (f64, f64),
    options: &PlotOptions,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&options.title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

    chart
        .configure_mesh()
        .x_desc(options.x_desc.as_str())
        .y_desc(options.y_desc.as_str())
        .draw()?;

    for (idx, (label, pts)) in labels.iter().zip(points).enumerate() {
        let style = Palette99::pick(idx).stroke_width(2);
        chart
            .draw_series(LineSeries::new(pts.iter().copied(), style))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    if labels.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    Ok(())
}

/// Axis ranges covering every point, padded so flat series stay visible.
fn bounds(points: &[Vec<(f64, f64)>]) -> Option<((f64, f64), (f64, f64))> {
    let mut all = points.iter().flatten();
    let &(x0, y0) = all.next()?;
    let (mut x_min, mut x_max, mut y_min, mut y_max) = (x0, x0, y0, y0);
    for &(x, y) in all {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    Some((pad(x_min, x_max), pad(y_min, y_max)))
}

fn pad(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    if span > 0.0 {
        (min, max + 0.05 * span)
    } else {
        let half = if min == 0.0 { 1.0 } else { 0.5 * min.abs() };
        (min - half, max + half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(PlotFormat::from_path(Path::new("a.png")).unwrap(), PlotFormat::Png);
        assert_eq!(PlotFormat::from_path(Path::new("a.SVG")).unwrap(), PlotFormat::Svg);
        assert!(PlotFormat::from_path(Path::new("a.pdf")).is_err());
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let err = line(
            &[0.0, 1.0],
            &[0.0],
            Path::new("never_written.png"),
            &PlotOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(!Path::new("never_written.png").exists());
    }

    #[test]
    fn all_nan_series_rejected() {
        let err = line(
            &[0.0, 1.0],
            &[f64::NAN, f64::NAN],
            Path::new("never_written.svg"),
            &PlotOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn flat_series_gets_padded_range() {
        let ((x0, x1), (y0, y1)) = bounds(&[vec![(0.0, 2.0), (1.0, 2.0)]]).unwrap();
        assert_eq!((x0, x1), (0.0, 1.05));
        assert_eq!((y0, y1), (1.0, 3.0));
    }
}
