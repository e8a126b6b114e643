//! File output for report summaries and the filtered dataset.
//!
//! Summaries are written as pretty-printed JSON; the filtered dataset is
//! written as CSV with the source header.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use csv::{StringRecord, WriterBuilder};
use serde::Serialize;
use tracing::{debug, info};

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    Ok(())
}

/// Logs any serializable value as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes `value` to `path` as pretty-printed JSON, replacing any existing file.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, value)?;
    debug!(path = %path.display(), "Summary written");
    Ok(())
}

/// Writes `headers` followed by `rows` to a fresh CSV file at `path`.
pub fn write_records(path: &Path, headers: &StringRecord, rows: &[StringRecord]) -> Result<()> {
    ensure_parent(path)?;
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = rows.len(), "CSV written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::env;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    #[derive(Serialize)]
    struct Sample {
        games: String,
        ratio: Option<f64>,
    }

    #[test]
    fn test_print_json_does_not_panic() {
        let sample = Sample {
            games: "1988 Summer".into(),
            ratio: Some(5.0),
        };
        print_json(&sample).unwrap();
    }

    #[test]
    fn test_write_json_creates_file() {
        let path = temp_path("olympic_transition_test_summary.json");
        let _ = fs::remove_file(&path);

        let sample = Sample {
            games: "1996 Summer".into(),
            ratio: None,
        };
        write_json(&path, &sample).unwrap();

        let parsed: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["games"], "1996 Summer");
        assert!(parsed["ratio"].is_null());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_json_creates_parent_dirs() {
        let dir = temp_path("olympic_transition_test_nested");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("inner").join("summary.json");

        write_json(&path, &vec![1, 2, 3]).unwrap();
        assert!(path.exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_records_header_once() {
        let path = temp_path("olympic_transition_test_records.csv");
        let _ = fs::remove_file(&path);

        let headers = StringRecord::from(vec!["NOC", "Games", "Medal"]);
        let rows = vec![
            StringRecord::from(vec!["URS", "1988 Summer", "Gold"]),
            StringRecord::from(vec!["UKR", "1996 Summer", "NA"]),
        ];
        write_records(&path, &headers, &rows).unwrap();
        // Overwrites rather than appends.
        write_records(&path, &headers, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "NOC,Games,Medal");

        fs::remove_file(&path).unwrap();
    }
}
