//! Report configuration.
//!
//! Every constant the reports depend on (input paths, allow-lists, period
//! windows, colours) lives here and is passed into the components
//! explicitly. `ReportConfig::default()` reproduces the stock reports; a
//! JSON file can override any subset of fields:
//!
//! ```json
//! {
//!   "data": { "output_dir": "charts" },
//!   "chart": { "format": "svg" }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::model::{GamesId, Medal, Slot};

const PREDECESSOR: &str = "URS";

const SUCCESSORS: [&str; 15] = [
    "RUS", "UKR", "LTU", "LAT", "EST", "GEO", "BLR", "MDA", "KGZ", "UZB", "TJK", "ARM", "AZE",
    "TKM", "KAZ",
];

const SUCCESSOR_COLORS: [(&str, &str); 15] = [
    ("RUS", "#DC143C"),
    ("UKR", "#FFD700"),
    ("LTU", "#7CFC00"),
    ("LAT", "#800000"),
    ("EST", "#4169E1"),
    ("GEO", "#C0C0C0"),
    ("BLR", "#008000"),
    ("MDA", "#008B8B"),
    ("KGZ", "#FFC0CB"),
    ("UZB", "#800080"),
    ("TJK", "#FFA500"),
    ("ARM", "#FF7F50"),
    ("AZE", "#000080"),
    ("TKM", "#6B8E23"),
    ("KAZ", "#00FFFF"),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub data: DataPaths,
    pub allow_list: AllowList,
    pub periods: PeriodConfig,
    pub palette: Palette,
    pub chart: ChartConfig,
}

impl ReportConfig {
    /// Loads a JSON config from `path`. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReportError::MissingFile {
                path: path.to_path_buf(),
            }
            .into());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Default chart location for a report: `<output_dir>/<name>.<ext>`.
    pub fn chart_path(&self, name: &str) -> PathBuf {
        self.data
            .output_dir
            .join(format!("{}.{}", name, self.chart.format.extension()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    /// Filtered athlete-event table the reports read.
    pub athletes: PathBuf,
    /// `NOC` → `region` lookup.
    pub regions: PathBuf,
    /// Full source table consumed by `filter-dataset`.
    pub raw_athletes: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            athletes: PathBuf::from("data/data_filtered.csv"),
            regions: PathBuf::from("data/noc_regions.csv"),
            raw_athletes: PathBuf::from("data/athlete_events.csv"),
            output_dir: PathBuf::from("charts"),
        }
    }
}

/// Games and delegations the reports are defined over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowList {
    pub games: Vec<GamesId>,
    pub delegations: Vec<String>,
}

impl AllowList {
    pub fn permits(&self, games: &GamesId, noc: &str) -> bool {
        self.games.contains(games) && self.delegations.iter().any(|d| d == noc)
    }
}

impl Default for AllowList {
    fn default() -> Self {
        let mut delegations = vec![PREDECESSOR.to_string()];
        delegations.extend(SUCCESSORS.iter().map(|s| s.to_string()));
        Self {
            games: vec![
                GamesId::winter(1988),
                GamesId::summer(1988),
                GamesId::winter(1994),
                GamesId::summer(1996),
            ],
            delegations,
        }
    }
}

/// The two windows either side of the dissolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodConfig {
    pub predecessor: String,
    pub predecessor_label: String,
    pub successors: Vec<String>,
    pub pre_games: Vec<GamesId>,
    pub post_games: Vec<GamesId>,
    pub transition_label: String,
}

impl PeriodConfig {
    /// Axis order: pre-period Games, the transition marker, post-period Games.
    pub fn slots(&self) -> Vec<Slot> {
        let mut slots: Vec<Slot> = self.pre_games.iter().copied().map(Slot::Games).collect();
        slots.push(Slot::Transition {
            label: self.transition_label.clone(),
        });
        slots.extend(self.post_games.iter().copied().map(Slot::Games));
        slots
    }

    pub fn is_successor(&self, noc: &str) -> bool {
        self.successors.iter().any(|s| s == noc)
    }
}

impl Default for PeriodConfig {
    fn default() -> Self {
        Self {
            predecessor: PREDECESSOR.to_string(),
            predecessor_label: "USSR".to_string(),
            successors: SUCCESSORS.iter().map(|s| s.to_string()).collect(),
            pre_games: vec![GamesId::winter(1988), GamesId::summer(1988)],
            post_games: vec![GamesId::winter(1994), GamesId::summer(1996)],
            transition_label: "1992 Transition".to_string(),
        }
    }
}

/// `#rrggbb` colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for HexColor {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ReportError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ReportError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedalColors {
    pub gold: HexColor,
    pub silver: HexColor,
    pub bronze: HexColor,
}

impl MedalColors {
    pub fn get(&self, medal: Medal) -> HexColor {
        match medal {
            Medal::Gold => self.gold,
            Medal::Silver => self.silver,
            Medal::Bronze => self.bronze,
        }
    }
}

impl Default for MedalColors {
    fn default() -> Self {
        Self {
            gold: HexColor::rgb(0xFF, 0xD7, 0x00),
            silver: HexColor::rgb(0xC0, 0xC0, 0xC0),
            bronze: HexColor::rgb(0xCD, 0x7F, 0x32),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub medals: MedalColors,
    pub successors: BTreeMap<String, HexColor>,
    pub predecessor: HexColor,
    pub ratio_line: HexColor,
    pub transition_line: HexColor,
    /// Used for any delegation without an assigned colour.
    pub fallback: HexColor,
}

impl Palette {
    pub fn successor(&self, noc: &str) -> HexColor {
        self.successors.get(noc).copied().unwrap_or(self.fallback)
    }
}

impl Default for Palette {
    fn default() -> Self {
        let successors: BTreeMap<String, HexColor> = SUCCESSOR_COLORS
            .iter()
            .filter_map(|(noc, hex)| Some((noc.to_string(), hex.parse().ok()?)))
            .collect();
        Self {
            medals: MedalColors::default(),
            successors,
            predecessor: HexColor::rgb(0xFF, 0x00, 0x00),
            ratio_line: HexColor::rgb(0xDC, 0x14, 0x3C),
            transition_line: HexColor::rgb(0x80, 0x80, 0x80),
            fallback: HexColor::rgb(0x40, 0x40, 0x40),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }

    /// `.svg` selects SVG; anything else is rendered as a bitmap.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => ImageFormat::Svg,
            _ => ImageFormat::Png,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 1200,
            format: ImageFormat::Png,
        }
    }
}
