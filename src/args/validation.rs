use chrono::{DateTime, Utc};
use std::{fs, path::PathBuf};

use crate::error::ScoringError;
use crate::model::CompetitionSnapshot;

/// # Errors
///
/// Will return `Err` if any of the semicolon separated files is not readable
pub fn check_readable_file(file: &str) -> Result<String, String> {
    for file in file.split(';') {
        let path = PathBuf::from(file);
        if !path.is_file() || fs::metadata(&path).is_err() {
            return Err(format!("The snapshot file '{file}' is not readable."));
        }
    }
    Ok(file.to_string())
}

/// # Errors
///
/// Will return `Err` if the value is not an RFC 3339 timestamp
pub fn parse_as_of(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("'{value}' is not an RFC 3339 timestamp: {e}"))
}

/// Read every semicolon separated snapshot file. A file may hold one
/// snapshot object or an array of them.
///
/// # Errors
///
/// Will return `Err` if a file cannot be read or is not a competition snapshot
pub fn load_snapshots(files: &str) -> Result<Vec<CompetitionSnapshot>, ScoringError> {
    let mut snapshots = vec![];
    for file in files.split(';').filter(|f| !f.is_empty()) {
        let contents = fs::read_to_string(file)?;
        snapshots.extend(parse_snapshots(&contents).map_err(|e| {
            ScoringError::Parse(format!("snapshot file '{file}': {e}"))
        })?);
    }
    Ok(snapshots)
}

/// # Errors
///
/// Will return `Err` if the json is neither a snapshot nor an array of snapshots
pub fn parse_snapshots(json: &str) -> Result<Vec<CompetitionSnapshot>, ScoringError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if value.is_array() {
        Ok(serde_json::from_value(value)?)
    } else {
        Ok(vec![serde_json::from_value(value)?])
    }
}
