//! Draws a [`Figure`] with plotters.

use std::path::Path;

use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::{debug, info};

use crate::config::{HexColor, ImageFormat};
use crate::render::Figure;
use crate::render::layout::dash_segments;

const FONT: &str = "sans-serif";
const MARKER_RADIUS: i32 = 12;

fn rgb(color: HexColor) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

/// Writes `figure` to `path`; `.svg` paths get the SVG backend, everything
/// else a PNG bitmap. Parent directories are created as needed.
pub fn render_to_file(figure: &Figure, path: &Path, size: (u32, u32)) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }

    debug!(
        bars = figure.bars.len(),
        annotations = figure.annotations.len(),
        ticks = figure.ticks.len(),
        "Rendering chart"
    );

    match ImageFormat::from_path(path) {
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_chart(root, figure)?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_chart(root, figure)?;
        }
    }

    info!(path = %path.display(), "Chart written");
    Ok(())
}

/// Count axes only label whole numbers; ratio axes keep one decimal.
fn y_tick_label(value: f64, integer: bool) -> String {
    if !integer {
        format!("{:.1}", value)
    } else if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        String::new()
    }
}

/// Vertical pixel offset of annotation text from its anchor. Text above a
/// line series clears the point markers.
fn annotation_offset(figure: &Figure) -> i32 {
    if figure.line.is_some() {
        -(MARKER_RADIUS + 18)
    } else {
        -10
    }
}

fn draw_chart<DB>(root: DrawingArea<DB, Shift>, figure: &Figure) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (x_lo, x_hi) = figure.x_range;
    let mut chart = ChartBuilder::on(&root)
        .caption(&figure.title, (FONT, 36))
        .margin(30)
        .x_label_area_size(90)
        .y_label_area_size(100)
        .build_cartesian_2d(x_lo..x_hi, 0.0..figure.y_max)?;

    // x ticks and labels are drawn by hand below, one per slot.
    let integer_y = figure.integer_y;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .set_tick_mark_size(LabelAreaPosition::Bottom, 0)
        .x_label_formatter(&|_: &f64| String::new())
        .y_label_formatter(&|v: &f64| y_tick_label(*v, integer_y))
        .y_desc(figure.y_desc.as_str())
        .label_style((FONT, 20))
        .axis_desc_style((FONT, 24))
        .draw()?;

    for bar in &figure.bars {
        let color = rgb(bar.color);
        let anno = chart.draw_series(std::iter::once(Rectangle::new(
            [(bar.left(), bar.bottom), (bar.right(), bar.top)],
            color.filled(),
        )))?;
        if let Some(label) = &bar.legend {
            anno.label(label.as_str()).legend(move |(x, y)| {
                Rectangle::new([(x, y - 8), (x + 16, y + 8)], color.filled())
            });
        }
    }

    if let Some(line) = &figure.line {
        let color = rgb(line.color);
        let anno = chart.draw_series(LineSeries::new(
            line.points.iter().copied(),
            color.stroke_width(5),
        ))?;
        if let Some(label) = &line.legend {
            anno.label(label.as_str()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 24, y)], color.stroke_width(5))
            });
        }
        chart.draw_series(
            line.points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), MARKER_RADIUS, color.filled())),
        )?;
    }

    if let Some(reference) = &figure.transition {
        let color = rgb(reference.color);
        let x = reference.x;
        let dashes = dash_segments(0.0, figure.y_max, figure.y_max / 50.0, figure.y_max / 100.0);
        let anno = chart.draw_series(dashes.into_iter().map(move |(y0, y1)| {
            PathElement::new(vec![(x, y0), (x, y1)], color.stroke_width(3))
        }))?;
        if let Some(label) = &reference.legend {
            anno.label(label.as_str()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 24, y)], color.stroke_width(3))
            });
        }
    }

    let value_style =
        TextStyle::from((FONT, 22).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom));
    let offset = annotation_offset(figure);
    chart.draw_series(figure.annotations.iter().map(|a| {
        EmptyElement::at((a.x, a.y)) + Text::new(a.text.clone(), (0, offset), value_style.clone())
    }))?;

    let tick_style =
        TextStyle::from((FONT, 22).into_font()).pos(Pos::new(HPos::Center, VPos::Top));
    for tick in &figure.ticks {
        let (px, py) = chart.backend_coord(&(tick.x, 0.0));
        root.draw(&PathElement::new(vec![(px, py), (px, py + 8)], BLACK))?;
        root.draw(&Text::new(
            tick.label.clone(),
            (px, py + 14),
            tick_style.clone(),
        ))?;
    }

    if figure.has_legend() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font((FONT, 20))
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}
