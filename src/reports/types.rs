//! Serializable report summaries, written next to each chart.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::PeriodConfig;
use crate::model::GamesId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Pre,
    Post,
}

impl Period {
    pub fn of(games: &GamesId, periods: &PeriodConfig) -> Period {
        if periods.pre_games.contains(games) {
            Period::Pre
        } else {
            Period::Post
        }
    }
}

/// Top-level JSON document for one report run.
#[derive(Debug, Serialize)]
pub struct ReportSummary<T> {
    pub report: String,
    pub generated_at: DateTime<Utc>,
    pub predecessor: String,
    pub transition_label: String,
    pub rows: Vec<T>,
}

impl<T> ReportSummary<T> {
    pub fn new(report: &str, periods: &PeriodConfig, rows: Vec<T>) -> Self {
        Self {
            report: report.to_string(),
            generated_at: Utc::now(),
            predecessor: periods.predecessor.clone(),
            transition_label: periods.transition_label.clone(),
            rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipationRow {
    pub games: GamesId,
    pub period: Period,
    pub total: usize,
    pub by_delegation: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedalRow {
    pub games: GamesId,
    pub period: Period,
    pub gold: usize,
    pub silver: usize,
    pub bronze: usize,
}
