//! jobnorm-core — normalization core for scraped job listings.
//!
//! Turns untrusted [`RawRecord`]s into typed [`StructuredRecord`]s suitable
//! for salary modeling, and reports exactly how many records each stage
//! dropped.
//!
//! # Architecture
//!
//! ```text
//! RawRecord ──► NormalizationPipeline ──► StructuredRecord ──► report
//!                 │
//!                 ├─ LocationExtractor
//!                 ├─ SalaryRangeParser ──► SalaryBand
//!                 ├─ ExperienceDegreeExtractor
//!                 └─ SkillTagger
//! ```
//!
//! Every extractor is a pure function of its input text and the loaded
//! [`Config`]; nothing here does I/O beyond reading the config file.

pub mod config;
pub mod degree;
pub mod error;
pub mod experience;
pub mod location;
pub mod pipeline;
pub mod report;
pub mod salary;
pub mod skills;
pub mod types;

pub use config::Config;
pub use error::{NormalizeError, Result};
pub use pipeline::{DropStats, NormalizationPipeline, PipelineOutput};
pub use salary::{SalaryBand, SalaryRange, SalaryRangeParser, SalaryRejection};
pub use types::{DegreeCode, MalformedRecord, RawRecord, StructuredRecord, UNKNOWN_CITY};
