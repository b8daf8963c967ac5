use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// One article from the dump. Both fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawDocument {
    pub title: String,
    pub text: String,
}

/// A titled run of cleaned sentences, one per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitledSegment {
    pub title: String,
    pub body: String,
}

impl fmt::Display for TitledSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.title, self.body)
    }
}

/// Load the dump: a single JSON array of article records.
pub fn read_dump(path: &Path) -> Result<Vec<Value>> {
    let file = File::open(path)?;
    let records = serde_json::from_reader(BufReader::new(file))?;
    Ok(records)
}

/// Turn one dump record into a document, rejecting records with missing or mistyped fields.
pub fn parse_record(index: usize, record: Value) -> Result<RawDocument> {
    serde_json::from_value(record).map_err(|e| Error::InvalidRecord {
        index,
        reason: e.to_string(),
    })
}
