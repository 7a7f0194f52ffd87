//! JSON-lines listing source: one [`RawRecord`] object per line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use jobnorm_core::{MalformedRecord, RawRecord};

use crate::{FeedError, RecordSource, Result, SourceItem};

#[derive(Debug, Clone)]
pub struct JsonLinesSource {
    path: PathBuf,
}

impl JsonLinesSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for JsonLinesSource {
    fn name(&self) -> String {
        format!("jsonl:{}", self.path.display())
    }

    fn read_items(&mut self) -> Result<Vec<SourceItem>> {
        let file = File::open(&self.path).map_err(|source| FeedError::Io {
            path: self.path.clone(),
            source,
        })?;
        read_json_lines(BufReader::new(file)).map_err(|e| match e {
            FeedError::Io { source, .. } => FeedError::Io {
                path: self.path.clone(),
                source,
            },
            other => other,
        })
    }
}

/// Parse every non-blank line. `position` counts records, not lines.
pub fn read_json_lines<R: BufRead>(reader: R) -> Result<Vec<SourceItem>> {
    let mut items = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|source| FeedError::Io {
            path: PathBuf::new(),
            source,
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let position = items.len();
        let item = serde_json::from_str::<RawRecord>(line).map_err(|e| {
            debug!(position, error = %e, "malformed JSON line");
            MalformedRecord {
                position,
                reason: e.to_string(),
            }
        });
        items.push(item);
    }
    Ok(items)
}
