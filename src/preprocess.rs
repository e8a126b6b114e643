//! One-off reduction of the full athlete-event table to the rows the
//! reports use.

use std::path::Path;

use anyhow::Result;
use csv::StringRecord;
use tracing::{info, warn};

use crate::config::AllowList;
use crate::error::ReportError;
use crate::loader::open_input;
use crate::model::GamesId;
use crate::output::write_records;

fn column_index(headers: &StringRecord, name: &str) -> Result<usize, ReportError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| ReportError::MissingColumn(name.to_string()))
}

/// Keeps the allowed rows of `input`, sorts them by (`NOC`, `Games`) and
/// writes them with the original header to `output`. Returns the number of
/// rows written.
///
/// Every column is copied through untouched; rows whose `Games` value is not
/// a recognisable edition are dropped.
#[tracing::instrument(skip(allow), fields(input = %input.display(), output = %output.display()))]
pub fn filter_dataset(input: &Path, output: &Path, allow: &AllowList) -> Result<usize> {
    let mut rdr = csv::Reader::from_reader(open_input(input)?);
    let headers = rdr.headers()?.clone();
    let noc_idx = column_index(&headers, "NOC")?;
    let games_idx = column_index(&headers, "Games")?;

    let mut kept = Vec::new();
    let mut scanned = 0usize;
    for result in rdr.records() {
        let record = result?;
        scanned += 1;
        let noc = record.get(noc_idx).unwrap_or_default();
        let allowed = record
            .get(games_idx)
            .and_then(|g| g.parse::<GamesId>().ok())
            .is_some_and(|games| allow.permits(&games, noc));
        if allowed {
            kept.push(record);
        }
    }

    kept.sort_by(|a, b| {
        (a.get(noc_idx), a.get(games_idx)).cmp(&(b.get(noc_idx), b.get(games_idx)))
    });

    if kept.is_empty() {
        warn!(scanned, "No rows matched the allow-lists");
    }
    write_records(output, &headers, &kept)?;
    info!(scanned, written = kept.len(), "Filtered and sorted dataset written");
    Ok(kept.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    const RAW: &str = "\
ID,Name,Sex,Age,Team,NOC,Games,Year,Season,City,Sport,Event,Medal
1,A,M,24,Ukraine,UKR,1996 Summer,1996,Summer,Atlanta,Rowing,Coxless Fours,NA
2,B,F,21,Soviet Union,URS,1988 Summer,1988,Summer,Seoul,Gymnastics,All-Around,Gold
3,C,M,30,United States,USA,1988 Summer,1988,Summer,Seoul,Athletics,Marathon,NA
4,D,M,19,Soviet Union,URS,1988 Winter,1988,Winter,Calgary,Biathlon,\"Biathlon, 20 km\",Silver
5,E,F,27,Unified Team,EUN,1992 Summer,1992,Summer,Barcelona,Fencing,Foil,Bronze
6,F,M,25,Armenia,ARM,1996 Summer,1996,Summer,Atlanta,Wrestling,Greco-Roman,Gold
";

    #[test]
    fn test_filter_dataset_filters_and_sorts() {
        let dir = env::temp_dir().join("olympic_transition_test_preprocess");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("athlete_events.csv");
        let output = dir.join("out").join("data_filtered.csv");
        fs::write(&input, RAW).unwrap();

        let written = filter_dataset(&input, &output, &AllowList::default()).unwrap();
        assert_eq!(written, 4);

        let mut rdr = csv::Reader::from_path(&output).unwrap();
        assert_eq!(rdr.headers().unwrap().len(), 13);
        let keys: Vec<(String, String)> = rdr
            .records()
            .map(|r| {
                let r = r.unwrap();
                (r[5].to_string(), r[6].to_string())
            })
            .collect();
        assert_eq!(
            keys,
            vec![
                ("ARM".to_string(), "1996 Summer".to_string()),
                ("UKR".to_string(), "1996 Summer".to_string()),
                ("URS".to_string(), "1988 Summer".to_string()),
                ("URS".to_string(), "1988 Winter".to_string()),
            ]
        );

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains("\"Biathlon, 20 km\""));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_filter_dataset_missing_column() {
        let dir = env::temp_dir().join("olympic_transition_test_preprocess_cols");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("raw.csv");
        fs::write(&input, "ID,Team,Games\n1,Ukraine,1996 Summer\n").unwrap();

        let err = filter_dataset(&input, &dir.join("out.csv"), &AllowList::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::MissingColumn(c)) if c == "NOC"
        ));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_filter_dataset_missing_input() {
        let input = env::temp_dir().join("olympic_transition_no_such_raw.csv");
        let output = env::temp_dir().join("olympic_transition_no_such_out.csv");
        let err = filter_dataset(&input, &output, &AllowList::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::MissingFile { .. })
        ));
    }
}
