//! The three period-comparison reports.
//!
//! Each report filters the dataset, aggregates it, splits the counts into
//! the pre- and post-transition windows, lays out a chart and writes both
//! the image and a JSON summary of the tables behind it.

pub mod aggregate;
pub mod medals;
pub mod participation;
pub mod period;
pub mod ppm;
pub mod types;

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::config::ChartConfig;
use crate::output::write_json;
use crate::render::Figure;
use crate::render::chart::render_to_file;

/// Renders `chart` to `chart_path` and writes `summary` beside it with a
/// `.json` extension. Returns the summary path.
pub(crate) fn publish<T: Serialize>(
    chart: &Figure,
    summary: &T,
    chart_path: &Path,
    settings: &ChartConfig,
) -> Result<PathBuf> {
    render_to_file(chart, chart_path, (settings.width, settings.height))?;
    let summary_path = chart_path.with_extension("json");
    write_json(&summary_path, summary)?;
    Ok(summary_path)
}
