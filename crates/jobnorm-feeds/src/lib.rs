//! jobnorm-feeds — listing sources for jobnorm.
//!
//! Each source reads a scraper export and yields one [`SourceItem`] per row:
//! either a [`RawRecord`] or a [`MalformedRecord`] explaining why the row
//! could not be read. [`SourceBatch::collect`] then applies the acquisition
//! side's own filters (duplicate cards, strict OCR salary cleaning) before
//! anything reaches the normalization pipeline.

pub mod csv_source;
pub mod jsonl_source;
pub mod ocr;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use jobnorm_core::salary::SalaryThresholds;
use jobnorm_core::{MalformedRecord, RawRecord};

pub use csv_source::CsvSource;
pub use jsonl_source::JsonLinesSource;
pub use ocr::clean_ocr_salary;

/// One row of a source.
pub type SourceItem = std::result::Result<RawRecord, MalformedRecord>;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("required column `{0}` is missing")]
    MissingColumn(&'static str),

    #[error("unsupported source format for {} (expected .csv, .jsonl or .ndjson)", .0.display())]
    UnsupportedFormat(PathBuf),
}

pub type Result<T> = std::result::Result<T, FeedError>;

/// Trait implemented by each listing source.
pub trait RecordSource: Send {
    /// Human-readable identifier used in logs.
    fn name(&self) -> String;

    /// Read every row. Row-level problems are items, not errors.
    fn read_items(&mut self) -> Result<Vec<SourceItem>>;
}

/// Pick a source by file extension.
pub fn source_for_path(path: &Path) -> Result<Box<dyn RecordSource>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("csv") => Ok(Box::new(CsvSource::new(path))),
        Some("jsonl") | Some("ndjson") => Ok(Box::new(JsonLinesSource::new(path))),
        _ => Err(FeedError::UnsupportedFormat(path.to_path_buf())),
    }
}

// ---------------------------------------------------------------------------
// Acquisition-side filtering
// ---------------------------------------------------------------------------

/// Filters applied while collecting a batch.
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    /// Drop cards whose `raw_text` was already seen.
    pub dedupe: bool,
    /// Replace each salary with its strict OCR cleaning, dropping records
    /// whose salary cannot be cleaned.
    pub ocr: Option<SalaryThresholds>,
}

/// Items ready for the pipeline, plus what the acquisition side dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceBatch {
    pub items: Vec<SourceItem>,
    pub duplicates: usize,
    pub ocr_discarded: usize,
}

impl SourceBatch {
    /// Read `source` and apply `options`. Order of surviving items is kept.
    pub fn collect(source: &mut dyn RecordSource, options: &SourceOptions) -> Result<Self> {
        let items = source.read_items()?;
        let batch = Self::filter(items, options);
        info!(
            source = %source.name(),
            items = batch.items.len(),
            duplicates = batch.duplicates,
            ocr_discarded = batch.ocr_discarded,
            "source read"
        );
        Ok(batch)
    }

    /// Apply `options` to already-read items: de-duplication first, then OCR
    /// cleaning. Malformed items pass through untouched.
    pub fn filter(items: Vec<SourceItem>, options: &SourceOptions) -> Self {
        let mut seen: HashSet<String> = HashSet::new();
        let mut batch = SourceBatch::default();

        for item in items {
            let mut record = match item {
                Ok(record) => record,
                Err(malformed) => {
                    batch.items.push(Err(malformed));
                    continue;
                }
            };

            if options.dedupe && !seen.insert(record.raw_text.clone()) {
                batch.duplicates += 1;
                continue;
            }

            if let Some(thresholds) = &options.ocr {
                let cleaned = record
                    .salary_raw
                    .as_deref()
                    .and_then(|raw| clean_ocr_salary(raw, thresholds));
                match cleaned {
                    Some(salary) => record.salary_raw = Some(salary),
                    None => {
                        debug!(title = %record.title, salary = ?record.salary_raw, "OCR salary discarded");
                        batch.ocr_discarded += 1;
                        continue;
                    }
                }
            }

            batch.items.push(Ok(record));
        }
        batch
    }
}
