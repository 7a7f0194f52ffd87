//! CSV listing source.
//!
//! Reads the scraper's export (`title,salary,city,raw_text`, optionally with
//! a UTF-8 BOM). Rows that fail to deserialize are reported as
//! [`MalformedRecord`]s and reading continues.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::debug;

use jobnorm_core::{MalformedRecord, RawRecord};

use crate::{FeedError, RecordSource, Result, SourceItem};

/// Columns every listing CSV must carry.
const REQUIRED_COLUMNS: [&str; 2] = ["title", "raw_text"];

#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for CsvSource {
    fn name(&self) -> String {
        format!("csv:{}", self.path.display())
    }

    fn read_items(&mut self) -> Result<Vec<SourceItem>> {
        let file = File::open(&self.path).map_err(|source| FeedError::Io {
            path: self.path.clone(),
            source,
        })?;
        read_csv(file)
    }
}

/// Read listing rows from any CSV reader.
pub fn read_csv<R: std::io::Read>(reader: R) -> Result<Vec<SourceItem>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(FeedError::MissingColumn(column));
        }
    }

    let items = reader
        .deserialize::<RawRecord>()
        .enumerate()
        .map(|(position, row)| {
            row.map_err(|e| {
                debug!(position, error = %e, "malformed CSV row");
                MalformedRecord {
                    position,
                    reason: e.to_string(),
                }
            })
        })
        .collect();
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_scraper_columns() {
        let data = "title,salary,city,raw_text\n数据分析师,15-25K,南京,\"数据分析师\n南京·江宁区\"\n";
        let items = read_csv(data.as_bytes()).unwrap();
        assert_eq!(items.len(), 1);
        let record = items[0].as_ref().unwrap();
        assert_eq!(record.salary_raw.as_deref(), Some("15-25K"));
        assert_eq!(record.raw_text, "数据分析师\n南京·江宁区");
    }

    #[test]
    fn empty_salary_cell_is_none() {
        let data = "title,salary,city,raw_text\na,,,text\n";
        let items = read_csv(data.as_bytes()).unwrap();
        assert_eq!(items[0].as_ref().unwrap().salary_raw, None);
    }

    #[test]
    fn short_row_is_malformed_not_fatal() {
        let data = "title,salary,city,raw_text\na,1-2K\nb,3-4K,南京,text\n";
        let items = read_csv(data.as_bytes()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().unwrap_err().position, 0);
        assert!(items[1].is_ok());
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let data = "title,salary\na,1-2K\n";
        assert!(matches!(
            read_csv(data.as_bytes()),
            Err(FeedError::MissingColumn("raw_text"))
        ));
    }
}
