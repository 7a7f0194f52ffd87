//! Error types for jobnorm-core.
//!
//! Only structural and precondition failures live here. Per-record data
//! quality problems (an unparseable salary, a listing with no city) are not
//! errors: they are absorbed by the extractors and surface as drop counters
//! on [`DropStats`](crate::pipeline::DropStats).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("required vocabulary list `{0}` is missing or empty")]
    EmptyVocabulary(&'static str),

    #[error("vocabulary list `{list}` contains a blank entry at index {index}")]
    BlankVocabularyEntry { list: &'static str, index: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to compile pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("input batch is empty; nothing to normalize")]
    EmptyDataset,

    #[error("only {kept} records survived normalization; at least {required} are required")]
    InsufficientSamples { kept: usize, required: usize },
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
