//! Core types for jobnorm-core.
//!
//! This module defines the records that cross the crate boundary: the
//! untrusted [`RawRecord`] handed over by the acquisition side, the
//! [`StructuredRecord`] emitted by the pipeline, and the closed
//! [`DegreeCode`] ordinal shared with downstream reporting.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::salary::SalaryRange;

/// City sentinel used whenever no location evidence is found.
pub const UNKNOWN_CITY: &str = "unknown";

/// One scraped listing card, exactly as the acquisition side produced it.
///
/// The core never mutates a `RawRecord`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub title: String,
    /// Best-effort salary token, e.g. `"15-25K"` or an OCR read like `"2140K"`.
    #[serde(default, alias = "salary")]
    pub salary_raw: Option<String>,
    /// Full multi-line card text.
    pub raw_text: String,
    /// City column from the scraper. Untrusted; the pipeline re-derives the
    /// city from `raw_text`.
    #[serde(default, alias = "city")]
    pub city_raw: String,
}

/// An input row the acquisition side could not shape into a [`RawRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    /// Zero-based position of the row in its source.
    pub position: usize,
    pub reason: String,
}

/// A normalized listing. Only records with a parsed, plausible salary are
/// ever constructed, so the salary triple is not optional here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredRecord {
    pub title: String,
    /// Never empty; [`UNKNOWN_CITY`] when no evidence was found.
    pub city: String,
    #[serde(flatten)]
    pub salary: SalaryRange,
    pub exp_years: f64,
    pub degree_value: DegreeCode,
    pub skills: BTreeSet<String>,
    /// The card text every field above was derived from.
    pub raw_text: String,
}

/// Ordinal encoding of the degree requirement.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum DegreeCode {
    /// No requirement stated, or explicitly unrestricted.
    #[default]
    Unrestricted = 0,
    Associate = 1,
    Bachelor = 2,
    Master = 3,
    Doctorate = 4,
}

impl DegreeCode {
    /// All codes in ascending order.
    pub const ALL: [DegreeCode; 5] = [
        DegreeCode::Unrestricted,
        DegreeCode::Associate,
        DegreeCode::Bachelor,
        DegreeCode::Master,
        DegreeCode::Doctorate,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    /// English label from the shared lookup table.
    pub fn label(self) -> &'static str {
        crate::degree::label(self)
    }

    /// Label used in exported, human-facing datasets.
    pub fn display_label(self) -> &'static str {
        crate::degree::display_label(self)
    }

    /// `true` for any code that states an explicit requirement.
    pub fn is_explicit(self) -> bool {
        self != DegreeCode::Unrestricted
    }
}

impl From<DegreeCode> for u8 {
    fn from(code: DegreeCode) -> u8 {
        code.value()
    }
}

impl TryFrom<u8> for DegreeCode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        DegreeCode::from_value(value).ok_or_else(|| format!("invalid degree code: {value}"))
    }
}

impl std::fmt::Display for DegreeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
