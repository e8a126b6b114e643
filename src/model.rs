//! Record types read from the athlete-event table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ReportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    Summer,
    Winter,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Summer => "Summer",
            Season::Winter => "Winter",
        }
    }
}

/// A Games edition such as `1988 Summer`.
///
/// Orders by year, then Summer before Winter, which is also the order of
/// the textual form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GamesId {
    pub year: u16,
    pub season: Season,
}

impl GamesId {
    pub const fn new(year: u16, season: Season) -> Self {
        Self { year, season }
    }

    pub const fn summer(year: u16) -> Self {
        Self::new(year, Season::Summer)
    }

    pub const fn winter(year: u16) -> Self {
        Self::new(year, Season::Winter)
    }
}

impl fmt::Display for GamesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.year, self.season.as_str())
    }
}

impl FromStr for GamesId {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ReportError::InvalidGames(s.to_string());
        let (year, season) = s.trim().split_once(' ').ok_or_else(invalid)?;
        let year = year.parse::<u16>().map_err(|_| invalid())?;
        let season = match season.trim() {
            "Summer" => Season::Summer,
            "Winter" => Season::Winter,
            _ => return Err(invalid()),
        };
        Ok(Self { year, season })
    }
}

impl TryFrom<String> for GamesId {
    type Error = ReportError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GamesId> for String {
    fn from(value: GamesId) -> Self {
        value.to_string()
    }
}

/// Medal outcome. Declaration order is the fixed drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub const ALL: [Medal; 3] = [Medal::Gold, Medal::Silver, Medal::Bronze];

    pub fn as_str(&self) -> &'static str {
        match self {
            Medal::Gold => "Gold",
            Medal::Silver => "Silver",
            Medal::Bronze => "Bronze",
        }
    }
}

impl fmt::Display for Medal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Medal {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Gold" => Ok(Medal::Gold),
            "Silver" => Ok(Medal::Silver),
            "Bronze" => Ok(Medal::Bronze),
            other => Err(ReportError::InvalidMedal(other.to_string())),
        }
    }
}

/// One athlete-event row. Only the columns the reports use are kept;
/// the rest of the source row is ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "Games")]
    pub games: GamesId,
    #[serde(rename = "NOC")]
    pub noc: String,
    #[serde(rename = "Medal", default, deserialize_with = "deserialize_medal")]
    pub medal: Option<Medal>,
}

impl EventRecord {
    pub fn new(games: GamesId, noc: &str, medal: Option<Medal>) -> Self {
        Self {
            games,
            noc: noc.to_string(),
            medal,
        }
    }
}

/// Empty cells and the literal `NA` both mean "no medal".
fn deserialize_medal<'de, D>(deserializer: D) -> Result<Option<Medal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("NA") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// A position on the report's x axis: either a real Games edition or the
/// label-only transition marker between the two periods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Games(GamesId),
    Transition { label: String },
}

impl Slot {
    pub fn games(&self) -> Option<GamesId> {
        match self {
            Slot::Games(games) => Some(*games),
            Slot::Transition { .. } => None,
        }
    }

    pub fn is_transition(&self) -> bool {
        matches!(self, Slot::Transition { .. })
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Games(games) => games.fmt(f),
            Slot::Transition { label } => f.write_str(label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_games_round_trips_through_text() {
        let games: GamesId = "1988 Summer".parse().unwrap();
        assert_eq!(games, GamesId::summer(1988));
        assert_eq!(games.to_string(), "1988 Summer");
    }

    #[test]
    fn test_games_rejects_garbage() {
        assert!("Summer 1988".parse::<GamesId>().is_err());
        assert!("1988".parse::<GamesId>().is_err());
        assert!("1988 Spring".parse::<GamesId>().is_err());
    }

    #[test]
    fn test_games_order_matches_text_order() {
        let mut games = vec![
            GamesId::summer(1996),
            GamesId::winter(1988),
            GamesId::winter(1994),
            GamesId::summer(1988),
        ];
        games.sort();
        let text: Vec<String> = games.iter().map(ToString::to_string).collect();
        let mut sorted_text = text.clone();
        sorted_text.sort();
        assert_eq!(text, sorted_text);
    }

    #[test]
    fn test_medal_parse() {
        assert_eq!("Gold".parse::<Medal>().unwrap(), Medal::Gold);
        assert!("Platinum".parse::<Medal>().is_err());
    }

    #[test]
    fn test_record_deserializes_na_medal_as_none() {
        let data = "ID,Name,NOC,Games,Medal\n1,A,URS,1988 Summer,NA\n2,B,URS,1988 Summer,\n3,C,RUS,1994 Winter,Gold\n";
        let mut rdr = csv::Reader::from_reader(data.as_bytes());
        let rows: Vec<EventRecord> = rdr.deserialize().collect::<Result<_, _>>().unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].medal, None);
        assert_eq!(rows[1].medal, None);
        assert_eq!(rows[2].medal, Some(Medal::Gold));
        assert_eq!(rows[2].games, GamesId::winter(1994));
    }

    #[test]
    fn test_transition_slot_has_no_games() {
        let slot = Slot::Transition {
            label: "1992 Transition".into(),
        };
        assert!(slot.games().is_none());
        assert!(slot.is_transition());
        assert_eq!(slot.to_string(), "1992 Transition");
    }
}
