//! CSV loaders for the athlete-event table and the region lookup.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::DataPaths;
use crate::error::ReportError;
use crate::model::EventRecord;

/// Delegation code → region display name.
#[derive(Debug, Clone, Default)]
pub struct RegionLookup {
    names: HashMap<String, String>,
}

impl RegionLookup {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            names: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Falls back to the code itself for unknown delegations.
    pub fn display_name<'a>(&'a self, noc: &'a str) -> &'a str {
        self.names.get(noc).map(String::as_str).unwrap_or(noc)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct RegionRow {
    #[serde(rename = "NOC")]
    noc: String,
    #[serde(default)]
    region: Option<String>,
}

/// Both input tables, loaded once per run.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<EventRecord>,
    pub regions: RegionLookup,
}

impl Dataset {
    #[tracing::instrument(skip_all, fields(athletes = %paths.athletes.display()))]
    pub fn load(paths: &DataPaths) -> Result<Self, ReportError> {
        let records = load_records(&paths.athletes)?;
        let regions = load_regions(&paths.regions)?;
        if regions.is_empty() {
            warn!(
                path = %paths.regions.display(),
                "Region lookup is empty, delegations labelled by code"
            );
        }
        info!(
            records = records.len(),
            regions = regions.len(),
            "Dataset loaded"
        );
        Ok(Self { records, regions })
    }
}

/// Opens `path`, reporting a missing file as [`ReportError::MissingFile`].
pub(crate) fn open_input(path: &Path) -> Result<File, ReportError> {
    if !path.exists() {
        return Err(ReportError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    Ok(File::open(path)?)
}

pub fn load_records(path: &Path) -> Result<Vec<EventRecord>, ReportError> {
    debug!(path = %path.display(), "Loading athlete events");
    read_records(open_input(path)?)
}

pub fn load_regions(path: &Path) -> Result<RegionLookup, ReportError> {
    debug!(path = %path.display(), "Loading region lookup");
    read_regions(open_input(path)?)
}

pub fn read_records<R: Read>(reader: R) -> Result<Vec<EventRecord>, ReportError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: EventRecord = result?;
        rows.push(record);
    }
    Ok(rows)
}

/// Rows with an empty region are skipped so the code is shown instead.
pub fn read_regions<R: Read>(reader: R) -> Result<RegionLookup, ReportError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut names = HashMap::new();
    for result in rdr.deserialize() {
        let row: RegionRow = result?;
        if let Some(region) = row.region.filter(|r| !r.trim().is_empty()) {
            names.insert(row.noc, region);
        }
    }
    Ok(RegionLookup { names })
}
