use std::collections::{BTreeMap, BTreeSet};

use crate::model::{EventRecord, GamesId, Medal};

/// Grouping key of a count row. `medal` is `None` for participation counts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CountKey {
    pub games: GamesId,
    pub noc: String,
    pub medal: Option<Medal>,
}

impl CountKey {
    pub fn new(games: GamesId, noc: &str, medal: Option<Medal>) -> Self {
        Self {
            games,
            noc: noc.to_string(),
            medal,
        }
    }
}

/// Long-form counts. Only observed keys are stored; lookups of anything
/// else read as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counts {
    rows: BTreeMap<CountKey, usize>,
}

impl Counts {
    pub fn get(&self, key: &CountKey) -> usize {
        self.rows.get(key).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.rows.values().sum()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CountKey, usize)> {
        self.rows.iter().map(|(k, v)| (k, *v))
    }

    /// Copy of the rows whose key satisfies `keep`.
    pub fn select<F>(&self, keep: F) -> Counts
    where
        F: Fn(&CountKey) -> bool,
    {
        Counts {
            rows: self
                .rows
                .iter()
                .filter(|(k, _)| keep(k))
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
        }
    }

    /// Total for a single Games across every delegation and medal.
    pub fn games_total(&self, games: &GamesId) -> usize {
        self.rows
            .iter()
            .filter(|(k, _)| &k.games == games)
            .map(|(_, v)| *v)
            .sum()
    }

    fn add(&mut self, key: CountKey) {
        *self.rows.entry(key).or_default() += 1;
    }
}

impl FromIterator<(CountKey, usize)> for Counts {
    fn from_iter<I: IntoIterator<Item = (CountKey, usize)>>(iter: I) -> Self {
        let mut counts = Counts::default();
        for (key, n) in iter {
            *counts.rows.entry(key).or_default() += n;
        }
        counts
    }
}

/// Counts rows per (Games, delegation).
pub fn count_participations(records: &[EventRecord]) -> Counts {
    let mut counts = Counts::default();
    for r in records {
        counts.add(CountKey::new(r.games, &r.noc, None));
    }
    counts
}

/// Counts rows per (Games, delegation, medal). Rows without a medal are skipped.
pub fn count_medals(records: &[EventRecord]) -> Counts {
    let mut counts = Counts::default();
    for r in records {
        if let Some(medal) = r.medal {
            counts.add(CountKey::new(r.games, &r.noc, Some(medal)));
        }
    }
    counts
}

/// Wide form of [`Counts`]: one row per Games, one column per category.
///
/// Every (Games, column) cell exists; unseen combinations hold 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideTable<C: Ord> {
    games: Vec<GamesId>,
    columns: Vec<C>,
    cells: BTreeMap<GamesId, BTreeMap<C, usize>>,
}

impl<C: Ord + Clone> WideTable<C> {
    /// Pivots `counts` onto the given Games rows. Columns are the distinct
    /// values of `column_of` seen on those rows, in ascending order; keys for
    /// which it returns `None` are dropped. Counts outside `games` are ignored.
    pub fn pivot<F>(counts: &Counts, games: &[GamesId], column_of: F) -> Self
    where
        F: Fn(&CountKey) -> Option<C>,
    {
        let mut seen = BTreeSet::new();
        let mut sums: BTreeMap<(GamesId, C), usize> = BTreeMap::new();
        for (key, n) in counts.iter() {
            if !games.contains(&key.games) {
                continue;
            }
            if let Some(column) = column_of(key) {
                seen.insert(column.clone());
                *sums.entry((key.games, column)).or_default() += n;
            }
        }

        let mut table = WideTable {
            games: games.to_vec(),
            columns: Vec::new(),
            cells: games.iter().map(|g| (*g, BTreeMap::new())).collect(),
        };
        table.ensure_columns(seen);
        for ((games, column), n) in sums {
            if let Some(row) = table.cells.get_mut(&games) {
                row.insert(column, n);
            }
        }
        table
    }

    /// Adds the given columns (0-filled) if they are not already present.
    pub fn ensure_columns<I>(&mut self, columns: I)
    where
        I: IntoIterator<Item = C>,
    {
        for column in columns {
            if !self.columns.contains(&column) {
                self.columns.push(column);
            }
        }
        self.columns.sort();
        for row in self.cells.values_mut() {
            for column in &self.columns {
                row.entry(column.clone()).or_insert(0);
            }
        }
    }

    pub fn with_columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
    {
        self.ensure_columns(columns);
        self
    }

    pub fn games(&self) -> &[GamesId] {
        &self.games
    }

    pub fn columns(&self) -> &[C] {
        &self.columns
    }

    pub fn get(&self, games: &GamesId, column: &C) -> usize {
        self.cells
            .get(games)
            .and_then(|row| row.get(column))
            .copied()
            .unwrap_or(0)
    }

    /// `(column, count)` pairs in column order; empty for unknown Games.
    pub fn row(&self, games: &GamesId) -> Vec<(C, usize)> {
        self.columns
            .iter()
            .map(|c| (c.clone(), self.get(games, c)))
            .collect()
    }

    pub fn row_total(&self, games: &GamesId) -> usize {
        self.cells
            .get(games)
            .map(|row| row.values().sum())
            .unwrap_or(0)
    }

    /// Whether the cell exists, i.e. it was materialised (possibly as 0).
    #[cfg(test)]
    pub fn has_cell(&self, games: &GamesId, column: &C) -> bool {
        self.cells
            .get(games)
            .is_some_and(|row| row.contains_key(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<EventRecord> {
        let w88 = GamesId::winter(1988);
        let s96 = GamesId::summer(1996);
        vec![
            EventRecord::new(w88, "URS", Some(Medal::Gold)),
            EventRecord::new(w88, "URS", Some(Medal::Gold)),
            EventRecord::new(w88, "URS", Some(Medal::Silver)),
            EventRecord::new(w88, "URS", None),
            EventRecord::new(s96, "RUS", Some(Medal::Bronze)),
            EventRecord::new(s96, "UKR", None),
            EventRecord::new(s96, "UKR", None),
        ]
    }

    #[test]
    fn test_count_participations() {
        let counts = count_participations(&records());
        assert_eq!(counts.get(&CountKey::new(GamesId::winter(1988), "URS", None)), 4);
        assert_eq!(counts.get(&CountKey::new(GamesId::summer(1996), "UKR", None)), 2);
        assert_eq!(counts.total(), 7);
    }

    #[test]
    fn test_medal_counts_sum_to_medal_rows() {
        let rows = records();
        let counts = count_medals(&rows);
        let with_medal = rows.iter().filter(|r| r.medal.is_some()).count();
        assert_eq!(counts.total(), with_medal);
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_absent_key_reads_zero() {
        let counts = count_medals(&records());
        let key = CountKey::new(GamesId::winter(1994), "RUS", Some(Medal::Gold));
        assert_eq!(counts.get(&key), 0);
    }

    #[test]
    fn test_games_total() {
        let counts = count_participations(&records());
        assert_eq!(counts.games_total(&GamesId::summer(1996)), 3);
        assert_eq!(counts.games_total(&GamesId::winter(1994)), 0);
    }

    #[test]
    fn test_pivot_fills_zero() {
        let counts = count_medals(&records());
        let games = [GamesId::winter(1988), GamesId::summer(1996)];
        let table = WideTable::pivot(&counts, &games, |k| k.medal);

        assert_eq!(table.columns(), &[Medal::Gold, Medal::Silver, Medal::Bronze]);
        assert_eq!(table.get(&GamesId::winter(1988), &Medal::Gold), 2);
        assert_eq!(table.get(&GamesId::summer(1996), &Medal::Gold), 0);
        for g in &games {
            for c in table.columns() {
                assert!(table.has_cell(g, c));
            }
        }
    }

    #[test]
    fn test_pivot_with_fixed_columns() {
        let counts = count_medals(&records());
        let games = [GamesId::winter(1988)];
        let table = WideTable::pivot(&counts, &games, |k| k.medal).with_columns(Medal::ALL);

        assert_eq!(
            table.row(&GamesId::winter(1988)),
            vec![(Medal::Gold, 2), (Medal::Silver, 1), (Medal::Bronze, 0)]
        );
        assert!(table.has_cell(&GamesId::winter(1988), &Medal::Bronze));
    }

    #[test]
    fn test_pivot_row_for_games_without_data() {
        let counts = count_participations(&records());
        let games = [GamesId::winter(1994), GamesId::summer(1996)];
        let table = WideTable::pivot(&counts, &games, |k| Some(k.noc.clone()));

        assert_eq!(table.columns(), &["RUS".to_string(), "UKR".to_string()]);
        assert_eq!(table.row_total(&GamesId::winter(1994)), 0);
        assert_eq!(table.row_total(&GamesId::summer(1996)), 3);
        assert!(table.has_cell(&GamesId::winter(1994), &"RUS".to_string()));
    }
}
