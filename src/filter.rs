//! Allow-list filtering of athlete-event rows.

use crate::config::AllowList;
use crate::model::EventRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedalRequirement {
    /// Every row counts (participation).
    Any,
    /// Only rows with a medal count.
    Required,
}

/// Returns the rows whose Games and delegation are both allowed, keeping
/// input order.
pub fn filter_records(
    records: &[EventRecord],
    allow: &AllowList,
    requirement: MedalRequirement,
) -> Vec<EventRecord> {
    records
        .iter()
        .filter(|r| allow.permits(&r.games, &r.noc))
        .filter(|r| match requirement {
            MedalRequirement::Any => true,
            MedalRequirement::Required => r.medal.is_some(),
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GamesId, Medal};

    fn fixture() -> Vec<EventRecord> {
        vec![
            EventRecord::new(GamesId::winter(1988), "URS", Some(Medal::Gold)),
            EventRecord::new(GamesId::winter(1988), "USA", Some(Medal::Gold)),
            EventRecord::new(GamesId::summer(1992), "EUN", None),
            EventRecord::new(GamesId::summer(1992), "RUS", Some(Medal::Silver)),
            EventRecord::new(GamesId::winter(1994), "RUS", None),
            EventRecord::new(GamesId::summer(1996), "UKR", Some(Medal::Bronze)),
        ]
    }

    #[test]
    fn test_filter_applies_both_allow_lists() {
        let filtered = filter_records(&fixture(), &AllowList::default(), MedalRequirement::Any);
        let nocs: Vec<&str> = filtered.iter().map(|r| r.noc.as_str()).collect();
        assert_eq!(nocs, vec!["URS", "RUS", "UKR"]);
    }

    #[test]
    fn test_filter_requires_medal() {
        let filtered = filter_records(
            &fixture(),
            &AllowList::default(),
            MedalRequirement::Required,
        );
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.medal.is_some()));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let allow = AllowList::default();
        for requirement in [MedalRequirement::Any, MedalRequirement::Required] {
            let once = filter_records(&fixture(), &allow, requirement);
            let twice = filter_records(&once, &allow, requirement);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_filter_empty_input() {
        let filtered = filter_records(&[], &AllowList::default(), MedalRequirement::Any);
        assert!(filtered.is_empty());
    }
}
