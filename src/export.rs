//! Export layer — writes structured records and the run report.
//!
//! Two record formats:
//!
//! - `jsonl`: one [`StructuredRecord`] per line, degree as its integer code
//!   and skills as an array.
//! - `csv`: flat rows for spreadsheet use, with the display degree label,
//!   the skills joined by commas (`none` when a listing names no skill) and
//!   the original card text in the last column.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;

use jobnorm_core::report::{modeling_sample, SalarySummary};
use jobnorm_core::{DropStats, SalaryBand, StructuredRecord};

/// Placeholder written in the CSV `skills` column when no skill matched.
pub const NO_SKILLS: &str = "none";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Jsonl,
    Csv,
}

impl ExportFormat {
    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Jsonl => "jsonl",
            ExportFormat::Csv => "csv",
        }
    }

    /// Guess the format from an output path; anything but `.csv` is JSON lines.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ExportFormat::Csv,
            _ => ExportFormat::Jsonl,
        }
    }
}

/// One flat CSV row.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    title: &'a str,
    city: &'a str,
    min_salary: f64,
    max_salary: f64,
    avg_salary: f64,
    exp_years: f64,
    degree_value: u8,
    degree: &'static str,
    skills: String,
    raw_text: &'a str,
}

impl<'a> From<&'a StructuredRecord> for CsvRow<'a> {
    fn from(r: &'a StructuredRecord) -> Self {
        let skills = if r.skills.is_empty() {
            NO_SKILLS.to_string()
        } else {
            r.skills.iter().map(String::as_str).collect::<Vec<_>>().join(",")
        };
        CsvRow {
            title: &r.title,
            city: &r.city,
            min_salary: r.salary.min_salary,
            max_salary: r.salary.max_salary,
            avg_salary: r.salary.avg_salary,
            exp_years: r.exp_years,
            degree_value: r.degree_value.value(),
            degree: r.degree_value.display_label(),
            skills,
            raw_text: &r.raw_text,
        }
    }
}

/// Write `records` to `sink` in `format`. Returns the number of rows written.
pub fn write_records<W: Write>(
    records: &[StructuredRecord],
    format: ExportFormat,
    sink: W,
) -> anyhow::Result<usize> {
    match format {
        ExportFormat::Jsonl => write_jsonl(records, sink),
        ExportFormat::Csv => write_csv(records, sink),
    }
}

pub fn write_jsonl<W: Write>(records: &[StructuredRecord], sink: W) -> anyhow::Result<usize> {
    let mut out = BufWriter::new(sink);
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(records.len())
}

pub fn write_csv<W: Write>(records: &[StructuredRecord], sink: W) -> anyhow::Result<usize> {
    let mut out = csv::Writer::from_writer(sink);
    for record in records {
        out.serialize(CsvRow::from(record))?;
    }
    out.flush()?;
    Ok(records.len())
}

/// Create `path` and write `records` into it.
pub fn export_to_path(
    records: &[StructuredRecord],
    format: ExportFormat,
    path: &Path,
) -> anyhow::Result<usize> {
    let file =
        File::create(path).with_context(|| format!("creating output {}", path.display()))?;
    let written = write_records(records, format, file)
        .with_context(|| format!("writing {} to {}", format.name(), path.display()))?;
    tracing::info!(path = %path.display(), format = format.name(), written, "export finished");
    Ok(written)
}

// ---------------------------------------------------------------------------
// Run report
// ---------------------------------------------------------------------------

/// Machine-readable account of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    /// Cards dropped as repeats of an earlier `raw_text`.
    pub duplicates: usize,
    /// Records whose OCR salary could not be cleaned.
    pub ocr_discarded: usize,
    pub stats: DropStats,
    /// Every kept record, including those with no stated degree.
    pub summary: SalarySummary,
    /// Explicit-degree records inside the band; `None` when none qualify.
    pub modeling: Option<SalarySummary>,
}

impl RunReport {
    pub fn new(
        source: impl Into<String>,
        duplicates: usize,
        ocr_discarded: usize,
        stats: DropStats,
        records: &[StructuredRecord],
        band: &SalaryBand,
    ) -> Self {
        let modeling = modeling_sample(records, band, 1)
            .ok()
            .map(|sample| SalarySummary::from_records(&sample));
        Self {
            generated_at: Utc::now(),
            source: source.into(),
            duplicates,
            ocr_discarded,
            stats,
            summary: SalarySummary::from_records(records),
            modeling,
        }
    }

    pub fn write_to_path(&self, path: &Path) -> anyhow::Result<()> {
        let file =
            File::create(path).with_context(|| format!("creating report {}", path.display()))?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, self)?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(())
    }
}
