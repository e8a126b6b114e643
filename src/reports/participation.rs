//! Participations before and after the transition: one bar per pre-period
//! Games for the predecessor, one stacked bar per post-period Games with a
//! segment per successor delegation.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, warn};

use crate::config::ReportConfig;
use crate::filter::{MedalRequirement, filter_records};
use crate::loader::{Dataset, RegionLookup};
use crate::model::EventRecord;
use crate::render::layout::{LayoutParams, LegendTracker, SlotLayout, stack_segments, y_upper};
use crate::render::{Annotation, Bar, Figure, ReferenceLine};
use crate::reports::aggregate::{CountKey, WideTable, count_participations};
use crate::reports::period::split_periods;
use crate::reports::publish;
use crate::reports::types::{ParticipationRow, Period, ReportSummary};

pub const NAME: &str = "participation";

/// Matches the default bar width of the stock participation chart.
const BAR_WIDTH: f64 = 0.8;

/// Participation counts per Games, one column per delegation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipationTables {
    pub pre: WideTable<String>,
    pub post: WideTable<String>,
}

pub fn build(records: &[EventRecord], config: &ReportConfig) -> ParticipationTables {
    let filtered = filter_records(records, &config.allow_list, MedalRequirement::Any);
    if filtered.is_empty() {
        warn!("No participations matched the allow-lists, chart will be empty");
    }

    let counts = count_participations(&filtered);
    let split = split_periods(&counts, &config.periods);
    info!(
        pre = split.pre.total(),
        post = split.post.total(),
        "Participations counted"
    );

    let by_noc = |k: &CountKey| Some(k.noc.clone());
    ParticipationTables {
        pre: WideTable::pivot(&split.pre, &config.periods.pre_games, by_noc),
        post: WideTable::pivot(&split.post, &config.periods.post_games, by_noc),
    }
}

pub fn chart(
    tables: &ParticipationTables,
    regions: &RegionLookup,
    config: &ReportConfig,
) -> Figure {
    let periods = &config.periods;
    let palette = &config.palette;
    let layout = SlotLayout::compute(&periods.slots(), LayoutParams::single(1.0));

    let mut legend = LegendTracker::default();
    let mut bars = Vec::new();
    let mut annotations = Vec::new();

    for (games, placed) in layout.games() {
        let x = placed.tick;
        let total = if periods.pre_games.contains(&games) {
            let total = tables.pre.row_total(&games);
            bars.push(Bar {
                x,
                width: BAR_WIDTH,
                bottom: 0.0,
                top: total as f64,
                color: palette.predecessor,
                legend: legend.first(&periods.predecessor_label),
            });
            total
        } else {
            let row = tables.post.row(&games);
            let values: Vec<usize> = row.iter().map(|(_, n)| *n).collect();
            for ((noc, _), (bottom, top)) in row.iter().zip(stack_segments(&values)) {
                bars.push(Bar {
                    x,
                    width: BAR_WIDTH,
                    bottom,
                    top,
                    color: palette.successor(noc),
                    legend: legend.first(regions.display_name(noc)),
                });
            }
            values.iter().sum()
        };

        annotations.push(Annotation {
            x,
            y: total as f64,
            text: total.to_string(),
        });
    }

    Figure {
        title: "Olympic Participation: Pre- and Post-Fall of the Soviet Union".to_string(),
        y_desc: "Number of Participations".to_string(),
        x_range: layout.x_bounds(1.0),
        y_max: y_upper(annotations.iter().map(|a| a.y), 1.1),
        integer_y: true,
        bars,
        line: None,
        annotations,
        ticks: layout.ticks(),
        transition: layout.transition_x().map(|x| ReferenceLine {
            x,
            color: palette.transition_line,
            legend: None,
        }),
    }
}

pub fn summary_rows(tables: &ParticipationTables, config: &ReportConfig) -> Vec<ParticipationRow> {
    let periods = &config.periods;
    let pre = tables.pre.games().iter().map(|g| (g, &tables.pre));
    let post = tables.post.games().iter().map(|g| (g, &tables.post));
    pre.chain(post)
        .map(|(games, table)| ParticipationRow {
            games: *games,
            period: Period::of(games, periods),
            total: table.row_total(games),
            by_delegation: table.row(games).into_iter().collect(),
        })
        .collect()
}

#[tracing::instrument(skip_all, fields(chart = %chart_path.display()))]
pub fn run(dataset: &Dataset, config: &ReportConfig, chart_path: &Path) -> Result<PathBuf> {
    let tables = build(&dataset.records, config);
    let figure = chart(&tables, &dataset.regions, config);
    let summary = ReportSummary::new(NAME, &config.periods, summary_rows(&tables, config));
    publish(&figure, &summary, chart_path, &config.chart)
}
