//! jobnorm — normalizes scraped job listings into structured records.
//!
//! The binary wires the layers together; they are exposed here so that the
//! integration harnesses and benchmarks can import them directly.
//!
//! # Architecture
//!
//! ```text
//! RecordSource ──► SourceBatch ──► NormalizationPipeline ──► Export
//!  (feeds)         dedupe / OCR       (core)                  │
//!                                                             └──► RunReport
//! ```

pub mod export;
pub mod inspect;

pub use export::{ExportFormat, RunReport};
