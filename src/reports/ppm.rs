//! Participations per medal: how many entries it took, on average, to win
//! one medal in each Games.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, warn};

use crate::config::ReportConfig;
use crate::filter::{MedalRequirement, filter_records};
use crate::loader::Dataset;
use crate::model::EventRecord;
use crate::render::layout::{LayoutParams, SlotLayout, y_upper};
use crate::render::{Annotation, Figure, PointSeries, ReferenceLine};
use crate::reports::aggregate::{count_medals, count_participations};
use crate::reports::period::{PeriodSummary, split_periods, summarize};
use crate::reports::publish;
use crate::reports::types::ReportSummary;

pub const NAME: &str = "ppm";

/// One summary per configured Games, pre-period first.
pub fn build(records: &[EventRecord], config: &ReportConfig) -> Vec<PeriodSummary> {
    let periods = &config.periods;
    let entries = filter_records(records, &config.allow_list, MedalRequirement::Any);
    let winners = filter_records(records, &config.allow_list, MedalRequirement::Required);
    if entries.is_empty() {
        warn!("No participations matched the allow-lists, chart will be empty");
    }

    let participations = split_periods(&count_participations(&entries), periods);
    let medals = split_periods(&count_medals(&winners), periods);

    let mut summaries = summarize(&participations.pre, &medals.pre, &periods.pre_games);
    summaries.extend(summarize(
        &participations.post,
        &medals.post,
        &periods.post_games,
    ));

    let defined = summaries
        .iter()
        .filter(|s| s.participations_per_medal.is_some())
        .count();
    info!(games = summaries.len(), defined, "Participations per medal computed");
    summaries
}

pub fn chart(summaries: &[PeriodSummary], config: &ReportConfig) -> Figure {
    let periods = &config.periods;
    let layout = SlotLayout::compute(&periods.slots(), LayoutParams::single(1.0));

    let mut points = Vec::new();
    let mut annotations = Vec::new();
    for (games, placed) in layout.games() {
        let Some(summary) = summaries.iter().find(|s| s.games == games) else {
            continue;
        };
        let (Some(ratio), Some(text)) = (summary.participations_per_medal, summary.ratio_label())
        else {
            continue;
        };
        points.push((placed.tick, ratio));
        annotations.push(Annotation {
            x: placed.tick,
            y: ratio,
            text,
        });
    }

    Figure {
        title: "Average Number of Participations Required to Win a Medal".to_string(),
        y_desc: "Average Participations per Medal".to_string(),
        x_range: layout.x_bounds(1.0),
        y_max: y_upper(points.iter().map(|(_, y)| *y), 1.2),
        integer_y: false,
        bars: Vec::new(),
        line: Some(PointSeries {
            points,
            color: config.palette.ratio_line,
            legend: Some("Average Participations per Medal".to_string()),
        }),
        annotations,
        ticks: layout.ticks(),
        transition: layout.transition_x().map(|x| ReferenceLine {
            x,
            color: config.palette.transition_line,
            legend: Some(periods.transition_label.clone()),
        }),
    }
}

#[tracing::instrument(skip_all, fields(chart = %chart_path.display()))]
pub fn run(dataset: &Dataset, config: &ReportConfig, chart_path: &Path) -> Result<PathBuf> {
    let summaries = build(&dataset.records, config);
    let figure = chart(&summaries, config);
    let summary = ReportSummary::new(NAME, &config.periods, summaries);
    publish(&figure, &summary, chart_path, &config.chart)
}
