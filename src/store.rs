use crate::error::ScoutResult;
use crate::model::{RawMatchNumber, RawMatchRecord};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Read side of the record store. Any I/O happens here, before the engine runs.
pub trait RecordSource {
    fn fetch(&self) -> ScoutResult<Vec<RawMatchRecord>>;
}

/// A fixed snapshot held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub records: Vec<RawMatchRecord>,
}

impl MemorySource {
    pub fn new(records: Vec<RawMatchRecord>) -> Self {
        Self { records }
    }
}

impl RecordSource for MemorySource {
    fn fetch(&self) -> ScoutResult<Vec<RawMatchRecord>> {
        Ok(self.records.clone())
    }
}

/// A JSON array of submissions on disk, re-read on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for JsonFileSource {
    fn fetch(&self) -> ScoutResult<Vec<RawMatchRecord>> {
        let file = File::open(&self.path)?;
        let records = read_records(BufReader::new(file))?;
        info!("📂 Loaded {} submissions from {:?}", records.len(), self.path);
        Ok(records)
    }
}

/// Reads a JSON array of submissions.
///
/// Only a malformed document is an error. An element that cannot be decoded
/// comes back with `decode_error` set, so it is rejected on its own during
/// aggregation.
pub fn read_records<R: Read>(reader: R) -> ScoutResult<Vec<RawMatchRecord>> {
    let values: Vec<Value> = serde_json::from_reader(reader)?;
    Ok(values
        .into_iter()
        .enumerate()
        .map(|(index, value)| decode_record(index, value))
        .collect())
}

fn decode_record(index: usize, value: Value) -> RawMatchRecord {
    match RawMatchRecord::deserialize(&value) {
        Ok(record) => record,
        Err(e) => {
            let reason = match offending_field(&value) {
                Some(field) => format!("{}: {}", field, e),
                None => e.to_string(),
            };
            debug!("Submission #{} could not be decoded: {}", index, reason);
            RawMatchRecord {
                team_number: value.get("team_number").and_then(Value::as_i64),
                match_number: value
                    .get("match_number")
                    .and_then(|m| RawMatchNumber::deserialize(m).ok()),
                decode_error: Some(reason),
                ..Default::default()
            }
        }
    }
}

/// First key whose value fails to decode on its own.
fn offending_field(value: &Value) -> Option<&str> {
    value.as_object()?.iter().find_map(|(key, v)| {
        let mut single = Map::new();
        single.insert(key.clone(), v.clone());
        RawMatchRecord::deserialize(&Value::Object(single))
            .is_err()
            .then_some(key.as_str())
    })
}
