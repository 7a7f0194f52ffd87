//! Normalization pipeline — runs the extractors over a batch of raw records.
//!
//! Per record, strictly in this order:
//!
//! ```text
//! location ──► salary ──► plausibility band ──► experience/degree ──► skills ──► emit
//!                 │               │
//!                 └── drop ◄──────┘
//! ```
//!
//! Records are independent, so [`NormalizationPipeline::run_parallel`] fans
//! them out over the rayon pool; results are collected in input order either
//! way. Dropped records never produce a row. They are counted in
//! [`DropStats`], which is returned to the caller instead of being logged and
//! forgotten.

use std::collections::BTreeMap;
use std::fmt;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{NormalizeError, Result};
use crate::experience::ExperienceDegreeExtractor;
use crate::location::LocationExtractor;
use crate::salary::{SalaryBand, SalaryRangeParser, SalaryRejection};
use crate::skills::SkillTagger;
use crate::types::{MalformedRecord, RawRecord, StructuredRecord};

// ---------------------------------------------------------------------------
// Outcomes and counters
// ---------------------------------------------------------------------------

/// What happened to one input record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Kept(StructuredRecord),
    Dropped(DropReason),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropReason {
    Malformed(MalformedRecord),
    Salary(SalaryRejection),
    OutOfBand { avg_salary: f64 },
}

/// Per-stage drop counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DropStats {
    pub total: usize,
    pub malformed: usize,
    pub salary_rejected: usize,
    /// `salary_rejected` broken down by [`SalaryRejection::kind`].
    pub salary_rejections: BTreeMap<String, usize>,
    pub out_of_band: usize,
    /// Removed by a downstream [`PipelineOutput::revalidate`] pass.
    pub revalidation_dropped: usize,
    pub kept: usize,
}

impl DropStats {
    fn record(&mut self, outcome: &RecordOutcome) {
        self.total += 1;
        match outcome {
            RecordOutcome::Kept(_) => self.kept += 1,
            RecordOutcome::Dropped(DropReason::Malformed(_)) => self.malformed += 1,
            RecordOutcome::Dropped(DropReason::Salary(rejection)) => {
                self.salary_rejected += 1;
                *self
                    .salary_rejections
                    .entry(rejection.kind().to_string())
                    .or_default() += 1;
            }
            RecordOutcome::Dropped(DropReason::OutOfBand { .. }) => self.out_of_band += 1,
        }
    }
}

impl fmt::Display for DropStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total={} kept={} malformed={} salary_rejected={} out_of_band={} revalidation_dropped={}",
            self.total,
            self.kept,
            self.malformed,
            self.salary_rejected,
            self.out_of_band,
            self.revalidation_dropped,
        )
    }
}

/// Structured records in input order plus the counters that explain the gap.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub records: Vec<StructuredRecord>,
    pub stats: DropStats,
}

impl PipelineOutput {
    /// Second plausibility checkpoint for downstream stages that want a
    /// tighter band than the pipeline used.
    pub fn revalidate(mut self, band: &SalaryBand) -> Self {
        let before = self.records.len();
        self.records.retain(|r| band.contains(r.salary.avg_salary));
        let dropped = before - self.records.len();
        self.stats.revalidation_dropped += dropped;
        self.stats.kept -= dropped;
        if dropped > 0 {
            debug!(dropped, "revalidation removed records outside the band");
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct NormalizationPipeline {
    location: LocationExtractor,
    salary: SalaryRangeParser,
    experience: ExperienceDegreeExtractor,
    skills: SkillTagger,
    band: SalaryBand,
    min_samples: usize,
}

impl NormalizationPipeline {
    /// Assemble from explicit components. `min_samples` starts at 1; see
    /// [`with_min_samples`](Self::with_min_samples).
    pub fn new(
        location: LocationExtractor,
        salary: SalaryRangeParser,
        experience: ExperienceDegreeExtractor,
        skills: SkillTagger,
        band: SalaryBand,
    ) -> Self {
        Self {
            location,
            salary,
            experience,
            skills,
            band,
            min_samples: 1,
        }
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        cfg.validate()?;
        let pipeline = Self::new(
            LocationExtractor::from_config(&cfg.vocabulary),
            SalaryRangeParser::new(cfg.salary.clone()),
            ExperienceDegreeExtractor::new(&cfg.experience, cfg.degree.clone())?,
            SkillTagger::new(cfg.vocabulary.skills.iter().cloned()),
            cfg.filter,
        );
        Ok(pipeline.with_min_samples(cfg.pipeline.min_samples))
    }

    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    pub fn band(&self) -> &SalaryBand {
        &self.band
    }

    pub fn skills(&self) -> &SkillTagger {
        &self.skills
    }

    /// Run every stage for a single record.
    pub fn process(&self, raw: &RawRecord) -> RecordOutcome {
        let city = self.location.extract(&raw.raw_text);

        let salary = match self.salary.parse_optional(raw.salary_raw.as_deref()) {
            Ok(salary) => salary,
            Err(rejection) => {
                debug!(title = %raw.title, salary = ?raw.salary_raw, %rejection, "salary rejected");
                return RecordOutcome::Dropped(DropReason::Salary(rejection));
            }
        };

        if !self.band.contains(salary.avg_salary) {
            debug!(title = %raw.title, avg_salary = salary.avg_salary, "average salary outside band");
            return RecordOutcome::Dropped(DropReason::OutOfBand {
                avg_salary: salary.avg_salary,
            });
        }

        let (exp_years, degree_value) = self.experience.extract(&raw.raw_text);
        let skills = self.skills.present(&raw.title, &raw.raw_text);

        RecordOutcome::Kept(StructuredRecord {
            title: raw.title.clone(),
            city,
            salary,
            exp_years,
            degree_value,
            skills,
            raw_text: raw.raw_text.clone(),
        })
    }

    /// Normalize `records` on the calling thread.
    pub fn run(&self, records: &[RawRecord]) -> Result<PipelineOutput> {
        ensure_non_empty(records.len())?;
        let outcomes = records.iter().map(|r| self.process(r)).collect();
        self.finish(outcomes)
    }

    /// Normalize `records` on the rayon pool. Output order matches input order.
    pub fn run_parallel(&self, records: &[RawRecord]) -> Result<PipelineOutput> {
        ensure_non_empty(records.len())?;
        let outcomes = records.par_iter().map(|r| self.process(r)).collect();
        self.finish(outcomes)
    }

    /// Like [`run`](Self::run), for sources that also report rows they could
    /// not read. Malformed rows are skipped and counted.
    pub fn run_items(
        &self,
        items: Vec<std::result::Result<RawRecord, MalformedRecord>>,
    ) -> Result<PipelineOutput> {
        ensure_non_empty(items.len())?;
        let outcomes = items.into_iter().map(|item| self.process_item(item)).collect();
        self.finish(outcomes)
    }

    pub fn run_items_parallel(
        &self,
        items: Vec<std::result::Result<RawRecord, MalformedRecord>>,
    ) -> Result<PipelineOutput> {
        ensure_non_empty(items.len())?;
        let outcomes = items
            .into_par_iter()
            .map(|item| self.process_item(item))
            .collect();
        self.finish(outcomes)
    }

    fn process_item(&self, item: std::result::Result<RawRecord, MalformedRecord>) -> RecordOutcome {
        match item {
            Ok(raw) => self.process(&raw),
            Err(malformed) => {
                debug!(position = malformed.position, reason = %malformed.reason, "skipping malformed record");
                RecordOutcome::Dropped(DropReason::Malformed(malformed))
            }
        }
    }

    fn finish(&self, outcomes: Vec<RecordOutcome>) -> Result<PipelineOutput> {
        let mut stats = DropStats::default();
        let mut records = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            stats.record(&outcome);
            if let RecordOutcome::Kept(record) = outcome {
                records.push(record);
            }
        }

        info!(%stats, "normalization finished");

        if stats.kept < self.min_samples {
            return Err(NormalizeError::InsufficientSamples {
                kept: stats.kept,
                required: self.min_samples,
            });
        }
        Ok(PipelineOutput { records, stats })
    }
}

fn ensure_non_empty(len: usize) -> Result<()> {
    if len == 0 {
        Err(NormalizeError::EmptyDataset)
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
