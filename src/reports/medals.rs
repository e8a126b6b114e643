//! Medal counts before and after the transition, grouped Gold/Silver/Bronze
//! bars per Games. Post-period bars sum every successor delegation.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, warn};

use crate::config::ReportConfig;
use crate::filter::{MedalRequirement, filter_records};
use crate::loader::Dataset;
use crate::model::{EventRecord, GamesId, Medal};
use crate::render::layout::{LayoutParams, LegendTracker, SlotLayout, bar_x, y_upper};
use crate::render::{Annotation, Bar, Figure, ReferenceLine};
use crate::reports::aggregate::{WideTable, count_medals};
use crate::reports::period::split_periods;
use crate::reports::publish;
use crate::reports::types::{MedalRow, Period, ReportSummary};

pub const NAME: &str = "medals";

const BAR_WIDTH: f64 = 0.5;
const GROUP_GAP: f64 = 1.0;
/// Pulls the transition tick back by a quarter gap so it sits visually
/// centred between its neighbours.
const TRANSITION_OFFSET: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedalTables {
    pub pre: WideTable<Medal>,
    pub post: WideTable<Medal>,
}

impl MedalTables {
    fn for_games(&self, games: &GamesId, config: &ReportConfig) -> &WideTable<Medal> {
        if config.periods.pre_games.contains(games) {
            &self.pre
        } else {
            &self.post
        }
    }
}

pub fn build(records: &[EventRecord], config: &ReportConfig) -> MedalTables {
    let filtered = filter_records(records, &config.allow_list, MedalRequirement::Required);
    if filtered.is_empty() {
        warn!("No medals matched the allow-lists, chart will be empty");
    }

    let counts = count_medals(&filtered);
    let split = split_periods(&counts, &config.periods);
    info!(
        pre = split.pre.total(),
        post = split.post.total(),
        "Medals counted"
    );

    MedalTables {
        pre: WideTable::pivot(&split.pre, &config.periods.pre_games, |k| k.medal)
            .with_columns(Medal::ALL),
        post: WideTable::pivot(&split.post, &config.periods.post_games, |k| k.medal)
            .with_columns(Medal::ALL),
    }
}

pub fn chart(tables: &MedalTables, config: &ReportConfig) -> Figure {
    let periods = &config.periods;
    let palette = &config.palette;
    let params = LayoutParams::grouped(Medal::ALL.len(), BAR_WIDTH, GROUP_GAP, TRANSITION_OFFSET);
    let layout = SlotLayout::compute(&periods.slots(), params);

    let mut legend = LegendTracker::default();
    let mut bars = Vec::new();
    let mut annotations = Vec::new();

    for (games, placed) in layout.games() {
        let table = tables.for_games(&games, config);
        for (i, medal) in Medal::ALL.iter().enumerate() {
            let x = bar_x(placed.start, i, BAR_WIDTH);
            let count = table.get(&games, medal);
            bars.push(Bar {
                x,
                width: BAR_WIDTH,
                bottom: 0.0,
                top: count as f64,
                color: palette.medals.get(*medal),
                legend: legend.first(medal.as_str()),
            });
            annotations.push(Annotation {
                x,
                y: count as f64,
                text: count.to_string(),
            });
        }
    }

    Figure {
        title: "Olympic Medal Counts: Pre- and Post-Fall of the Soviet Union".to_string(),
        y_desc: "Number of Medals".to_string(),
        x_range: layout.x_bounds(1.0),
        y_max: y_upper(bars.iter().map(|b| b.top), 1.1),
        integer_y: true,
        bars,
        line: None,
        annotations,
        ticks: layout.ticks(),
        transition: layout.transition_x().map(|x| ReferenceLine {
            x,
            color: palette.transition_line,
            legend: Some(periods.transition_label.clone()),
        }),
    }
}

pub fn summary_rows(tables: &MedalTables, config: &ReportConfig) -> Vec<MedalRow> {
    let periods = &config.periods;
    periods
        .pre_games
        .iter()
        .chain(periods.post_games.iter())
        .map(|games| {
            let table = tables.for_games(games, config);
            MedalRow {
                games: *games,
                period: Period::of(games, periods),
                gold: table.get(games, &Medal::Gold),
                silver: table.get(games, &Medal::Silver),
                bronze: table.get(games, &Medal::Bronze),
            }
        })
        .collect()
}

#[tracing::instrument(skip_all, fields(chart = %chart_path.display()))]
pub fn run(dataset: &Dataset, config: &ReportConfig, chart_path: &Path) -> Result<PathBuf> {
    let tables = build(&dataset.records, config);
    let figure = chart(&tables, config);
    let summary = ReportSummary::new(NAME, &config.periods, summary_rows(&tables, config));
    publish(&figure, &summary, chart_path, &config.chart)
}
