use std::path::Path;

use chrono::{Duration, NaiveDateTime};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use tracing::info;

use crate::consts::{CHART_HEIGHT, CHART_WIDTH};
use crate::error::{FlareError, Result};
use crate::series::SeriesEntry;

/// Matplotlib default blue, for the series line and markers.
const SERIES_COLOR: RGBColor = RGBColor(31, 119, 180);
const GRAY: RGBColor = RGBColor(128, 128, 128);
const LINE_WIDTH: u32 = 3;
const MARKER_RADIUS: i32 = 4;
/// Odd segment count so the dashed marker starts and ends with ink.
const DASH_SEGMENTS: i32 = 41;

/// Render the series as a marked line chart with a dashed vertical line
/// and a rotated label at the flare peak. The chart is written as SVG
/// whatever the output filename says; text is laid out by the viewer.
pub fn render_series(
    series: &[SeriesEntry],
    flare_time: NaiveDateTime,
    title: &str,
    output: &Path,
) -> Result<()> {
    if series.is_empty() {
        return Err(FlareError::DegenerateSeries);
    }

    let root = SVGBackend::new(output, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    draw_chart(&root, series, flare_time, title)?;

    info!(output = %output.display(), "chart written");
    Ok(())
}

fn draw_chart(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    series: &[SeriesEntry],
    flare_time: NaiveDateTime,
    title: &str,
) -> Result<()> {
    root.fill(&WHITE).map_err(render_err)?;

    // The x range covers the data and the flare marker, with padding so
    // neither sits on the frame edge.
    let t_min = series.iter().map(|e| e.time).min().unwrap_or(flare_time);
    let t_max = series.iter().map(|e| e.time).max().unwrap_or(flare_time);
    let x_min = t_min.min(flare_time);
    let x_max = t_max.max(flare_time);
    let x_pad = std::cmp::max((x_max - x_min) / 20, Duration::minutes(1));

    let y_min = series.iter().fold(f64::INFINITY, |m, e| m.min(e.value));
    let y_max = series.iter().fold(f64::NEG_INFINITY, |m, e| m.max(e.value));
    let y_pad = ((y_max - y_min) * 0.05).max(0.05);
    let y_lo = y_min - y_pad;
    let y_hi = y_max + y_pad;

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .caption(title, ("sans-serif", 40))
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d(
            RangedDateTime::from((x_min - x_pad)..(x_max + x_pad)),
            y_lo..y_hi,
        )
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Time [hour:min]")
        .y_desc("Normalized B-Inclination diff")
        .x_label_formatter(&|t: &NaiveDateTime| t.format("%H:%M").to_string())
        .label_style(("sans-serif", 24))
        .axis_desc_style(("sans-serif", 28))
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(
            series.iter().map(|e| (e.time, e.value)),
            SERIES_COLOR.stroke_width(LINE_WIDTH),
        ))
        .map_err(render_err)?;

    chart
        .draw_series(series.iter().map(|e| {
            Circle::new((e.time, e.value), MARKER_RADIUS, SERIES_COLOR.filled())
        }))
        .map_err(render_err)?;

    // Dashed vertical marker at the flare peak, as alternating segments.
    let step = (y_hi - y_lo) / DASH_SEGMENTS as f64;
    chart
        .draw_series((0..DASH_SEGMENTS).step_by(2).map(|i| {
            PathElement::new(
                vec![
                    (flare_time, y_lo + step * i as f64),
                    (flare_time, y_lo + step * (i + 1) as f64),
                ],
                GRAY.stroke_width(1),
            )
        }))
        .map_err(render_err)?;

    // Rotated label anchored at the series minimum, as matplotlib's
    // rotation=90 would place it.
    let label_style = TextStyle::from(("sans-serif", 24).into_font())
        .color(&GRAY)
        .transform(FontTransform::Rotate270);
    chart
        .plotting_area()
        .draw(&Text::new("flare peak", (flare_time, y_min), label_style))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

fn render_err(err: impl std::fmt::Display) -> FlareError {
    FlareError::Render(err.to_string())
}
