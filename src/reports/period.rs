//! Splits counts into the pre- and post-transition windows.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::PeriodConfig;
use crate::model::GamesId;
use crate::reports::aggregate::Counts;

/// Disjoint halves of a [`Counts`] table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodSplit {
    /// Pre-window Games, predecessor delegation only.
    pub pre: Counts,
    /// Post-window Games, successor delegations only.
    pub post: Counts,
}

pub fn split_periods(counts: &Counts, periods: &PeriodConfig) -> PeriodSplit {
    let split = PeriodSplit {
        pre: counts.select(|k| {
            periods.pre_games.contains(&k.games) && k.noc == periods.predecessor
        }),
        post: counts.select(|k| {
            periods.post_games.contains(&k.games) && periods.is_successor(&k.noc)
        }),
    };
    debug!(pre = split.pre.len(), post = split.post.len(), "Counts split by period");
    if split.pre.is_empty() || split.post.is_empty() {
        warn!(
            pre_empty = split.pre.is_empty(),
            post_empty = split.post.is_empty(),
            "A period has no matching counts"
        );
    }
    split
}

/// Per-Games totals for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub games: GamesId,
    pub participations: usize,
    pub medals: usize,
    /// `None` when no medal was won; such Games are not plotted.
    pub participations_per_medal: Option<f64>,
}

impl PeriodSummary {
    pub fn ratio_label(&self) -> Option<String> {
        self.participations_per_medal.map(|r| format!("{:.2}", r))
    }
}

pub fn participations_per_medal(participations: usize, medals: usize) -> Option<f64> {
    if medals == 0 {
        None
    } else {
        Some(participations as f64 / medals as f64)
    }
}

/// Sums both tables per Games (over every delegation present) and derives
/// participations per medal.
pub fn summarize(
    participations: &Counts,
    medals: &Counts,
    games: &[GamesId],
) -> Vec<PeriodSummary> {
    games
        .iter()
        .map(|g| {
            let p = participations.games_total(g);
            let m = medals.games_total(g);
            let ratio = participations_per_medal(p, m);
            if ratio.is_none() {
                warn!(games = %g, participations = p, "No medals won, ratio undefined");
            }
            PeriodSummary {
                games: *g,
                participations: p,
                medals: m,
                participations_per_medal: ratio,
            }
        })
        .collect()
}
