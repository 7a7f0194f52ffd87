//! Salary range parsing.
//!
//! Turns a raw salary token (`"15-25K"`, `"15000-25000"`, the OCR-fused
//! `"2140K"`, or junk such as `"双休"`) into a `(min, max, avg)` triple in base
//! currency units per month. Parsing is attempted in order:
//! hyphenated range → fused digits → single value. Any failure is a
//! [`SalaryRejection`], never a panic or a hard error: an unparseable salary
//! just keeps the record out of the structured table.
//!
//! Internally the parser works in "working units" (thousands per month).
//!
//! The magnitude thresholds are empirical. There is no principled inverse for
//! every real input: a genuine single value of exactly 200K is indistinguishable
//! from a misread, and a 3-digit value above the sanity limit is always read as
//! a fused `1+2` range. They are therefore configuration, see
//! [`SalaryThresholds`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{NormalizeError, Result};

static HYPHEN_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)-(\d+)").expect("hyphen range pattern is valid"));
static DIGIT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("digit run pattern is valid"));

/// Dash-like characters folded into `-` before matching.
const DASHES: &[char] = &['-', '~', '－', '—', '–', '～'];

/// Longest digit run we attempt to read as an integer.
const MAX_DIGIT_RUN: usize = 18;

// ---------------------------------------------------------------------------
// Thresholds and band
// ---------------------------------------------------------------------------

/// `[salary]` section: magnitude heuristics, all in working units except
/// `base_unit_floor`, which is compared against the raw bound.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalaryThresholds {
    /// A bound above this might be written in base units rather than K.
    pub large_magnitude: f64,
    /// ...and is only treated as base units when the low bound exceeds this.
    pub base_unit_floor: f64,
    /// Any bound above this (after conversion) is a misread.
    pub sanity_limit: f64,
    /// Base units per working unit.
    pub unit_multiplier: f64,
    /// Fused OCR values above this are candidates for splitting.
    pub ocr_split_threshold: f64,
}

impl Default for SalaryThresholds {
    fn default() -> Self {
        Self {
            large_magnitude: 50.0,
            base_unit_floor: 1000.0,
            sanity_limit: 200.0,
            unit_multiplier: 1000.0,
            ocr_split_threshold: 100.0,
        }
    }
}

impl SalaryThresholds {
    pub fn validate(&self) -> Result<()> {
        let all = [
            ("large_magnitude", self.large_magnitude),
            ("base_unit_floor", self.base_unit_floor),
            ("sanity_limit", self.sanity_limit),
            ("unit_multiplier", self.unit_multiplier),
            ("ocr_split_threshold", self.ocr_split_threshold),
        ];
        for (name, value) in all {
            if !value.is_finite() || value <= 0.0 {
                return Err(NormalizeError::InvalidConfig(format!(
                    "salary.{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Plausibility band on the average monthly salary (base units), exclusive
/// on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SalaryBand {
    pub min_avg_salary: f64,
    pub max_avg_salary: f64,
}

impl Default for SalaryBand {
    fn default() -> Self {
        Self {
            min_avg_salary: 2000.0,
            max_avg_salary: 50000.0,
        }
    }
}

impl SalaryBand {
    pub fn new(min_avg_salary: f64, max_avg_salary: f64) -> Self {
        Self {
            min_avg_salary,
            max_avg_salary,
        }
    }

    pub fn contains(&self, avg: f64) -> bool {
        avg > self.min_avg_salary && avg < self.max_avg_salary
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.min_avg_salary >= 0.0 && self.min_avg_salary < self.max_avg_salary) {
            return Err(NormalizeError::InvalidConfig(format!(
                "filter band is empty: min_avg_salary {} must be below max_avg_salary {}",
                self.min_avg_salary, self.max_avg_salary
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Parse results
// ---------------------------------------------------------------------------

/// A parsed salary in base currency units per month. `min_salary <= max_salary`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min_salary: f64,
    pub max_salary: f64,
    pub avg_salary: f64,
}

impl SalaryRange {
    /// Build from working-unit bounds, swapping them if needed.
    pub fn from_working_units(low: f64, high: f64, multiplier: f64) -> Self {
        let (low, high) = if low > high { (high, low) } else { (low, high) };
        let (min_salary, max_salary) = (low * multiplier, high * multiplier);
        Self {
            min_salary,
            max_salary,
            avg_salary: (min_salary + max_salary) / 2.0,
        }
    }

    /// The token this range parses back from.
    ///
    /// Integral working units print as `"15-25K"`; anything fractional (which
    /// can only come from a base-unit token) prints in base units. A low bound
    /// at or below `base_unit_floor` is printed second, so the token still
    /// reads as base units.
    pub fn canonical_token(&self, thresholds: &SalaryThresholds) -> String {
        let low = self.min_salary / thresholds.unit_multiplier;
        let high = self.max_salary / thresholds.unit_multiplier;
        if low.fract() == 0.0 && high.fract() == 0.0 {
            format!("{low:.0}-{high:.0}K")
        } else if self.min_salary <= thresholds.base_unit_floor {
            format!("{:.0}-{:.0}", self.max_salary, self.min_salary)
        } else {
            format!("{:.0}-{:.0}", self.min_salary, self.max_salary)
        }
    }
}

/// Why a token produced no salary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SalaryRejection {
    #[error("no salary token")]
    Missing,
    #[error("token contains no digits")]
    NoDigits,
    #[error("bound {value} exceeds the sanity limit")]
    OverLimit { value: f64 },
    #[error("digit run `{digits}` cannot be split into a range")]
    Unsplittable { digits: String },
}

impl SalaryRejection {
    /// Stable key used for drop-count breakdowns.
    pub fn kind(&self) -> &'static str {
        match self {
            SalaryRejection::Missing => "missing",
            SalaryRejection::NoDigits => "no_digits",
            SalaryRejection::OverLimit { .. } => "over_limit",
            SalaryRejection::Unsplittable { .. } => "unsplittable",
        }
    }
}

/// Outcome of one heuristic in the chain.
enum Attempt {
    Range(f64, f64),
    NoMatch,
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct SalaryRangeParser {
    thresholds: SalaryThresholds,
}

impl SalaryRangeParser {
    pub fn new(thresholds: SalaryThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &SalaryThresholds {
        &self.thresholds
    }

    /// Parse an optional token; `None` or a blank token is [`SalaryRejection::Missing`].
    pub fn parse_optional(
        &self,
        raw: Option<&str>,
    ) -> std::result::Result<SalaryRange, SalaryRejection> {
        match raw {
            Some(token) if !token.trim().is_empty() => self.parse(token),
            _ => Err(SalaryRejection::Missing),
        }
    }

    pub fn parse(&self, raw: &str) -> std::result::Result<SalaryRange, SalaryRejection> {
        let token = normalize_token(raw);

        let (low, high) = match self.hyphenated(&token)? {
            Attempt::Range(low, high) => (low, high),
            Attempt::NoMatch => match self.fused_or_single(&token)? {
                Attempt::Range(low, high) => (low, high),
                Attempt::NoMatch => return Err(SalaryRejection::NoDigits),
            },
        };

        self.guard(low)?;
        self.guard(high)?;
        Ok(SalaryRange::from_working_units(
            low,
            high,
            self.thresholds.unit_multiplier,
        ))
    }

    /// `<int>-<int>` anywhere in the token.
    fn hyphenated(&self, token: &str) -> std::result::Result<Attempt, SalaryRejection> {
        let Some(caps) = HYPHEN_RANGE.captures(token) else {
            return Ok(Attempt::NoMatch);
        };
        let mut low = parse_digits(&caps[1]);
        let mut high = parse_digits(&caps[2]);

        let t = &self.thresholds;
        if (low > t.large_magnitude || high > t.large_magnitude) && low > t.base_unit_floor {
            low /= t.unit_multiplier;
            high /= t.unit_multiplier;
        }
        self.guard(low)?;
        self.guard(high)?;
        Ok(Attempt::Range(low, high))
    }

    /// First digit run: split it when it is too large to be a single value,
    /// otherwise read it as a point estimate.
    fn fused_or_single(&self, token: &str) -> std::result::Result<Attempt, SalaryRejection> {
        let Some(run) = DIGIT_RUN.find(token) else {
            return Ok(Attempt::NoMatch);
        };
        let digits = run.as_str();
        let unsplittable = || SalaryRejection::Unsplittable {
            digits: digits.to_string(),
        };

        if digits.len() > MAX_DIGIT_RUN {
            return Err(unsplittable());
        }
        let value = parse_digits(digits);
        if value <= self.thresholds.sanity_limit {
            return Ok(Attempt::Range(value, value));
        }

        match split_fused(digits) {
            Some((low, high)) => Ok(Attempt::Range(low, high)),
            None => Err(unsplittable()),
        }
    }

    fn guard(&self, value: f64) -> std::result::Result<(), SalaryRejection> {
        if value > self.thresholds.sanity_limit {
            Err(SalaryRejection::OverLimit { value })
        } else {
            Ok(())
        }
    }
}

/// Uppercase, fold dashes, and keep only digits, ASCII letters and `-`.
pub fn normalize_token(raw: &str) -> String {
    raw.chars()
        .map(|c| if DASHES.contains(&c) { '-' } else { c })
        .filter(|c| c.is_ascii_digit() || c.is_ascii_alphabetic() || *c == '-')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Split a fused 4-digit (`2+2`) or 3-digit (`1+2`) run, in reading order.
pub fn split_fused(digits: &str) -> Option<(f64, f64)> {
    let at = match digits.len() {
        4 => 2,
        3 => 1,
        _ => return None,
    };
    let (first, second) = digits.split_at(at);
    Some((parse_digits(first), parse_digits(second)))
}

/// `digits` is always a non-empty ASCII digit run here.
fn parse_digits(digits: &str) -> f64 {
    digits.parse::<f64>().unwrap_or(f64::INFINITY)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(raw: &str) -> std::result::Result<SalaryRange, SalaryRejection> {
        SalaryRangeParser::default().parse(raw)
    }

    fn triple(raw: &str) -> (f64, f64, f64) {
        let r = parse(raw).unwrap_or_else(|e| panic!("{raw:?} rejected: {e}"));
        (r.min_salary, r.max_salary, r.avg_salary)
    }

    #[test]
    fn hyphenated_range_in_thousands() {
        assert_eq!(triple("15-25K"), (15000.0, 25000.0, 20000.0));
        assert_eq!(triple(" 15 - 25 k ·13薪"), (15000.0, 25000.0, 20000.0));
    }

    #[test]
    fn hyphenated_range_in_base_units() {
        assert_eq!(triple("15000-25000元/月"), (15000.0, 25000.0, 20000.0));
        assert_eq!(triple("15500-20000"), (15500.0, 20000.0, 17750.0));
    }

    #[test]
    fn large_but_not_base_unit_range_stays_in_thousands() {
        assert_eq!(triple("60-80K"), (60000.0, 80000.0, 70000.0));
    }

    #[test]
    fn reversed_range_is_swapped() {
        assert_eq!(triple("25-15K"), (15000.0, 25000.0, 20000.0));
    }

    #[test]
    fn fused_digits_are_split() {
        assert_eq!(triple("2140K"), (21000.0, 40000.0, 30500.0));
        assert_eq!(triple("812K"), (8000.0, 12000.0, 10000.0));
    }

    #[test]
    fn single_value_is_point_estimate() {
        assert_eq!(triple("30K"), (30000.0, 30000.0, 30000.0));
    }

    #[test]
    fn rejections() {
        assert_eq!(parse("双休"), Err(SalaryRejection::NoDigits));
        assert_eq!(parse("150-300K"), Err(SalaryRejection::OverLimit { value: 300.0 }));
        assert!(matches!(parse("12345K"), Err(SalaryRejection::Unsplittable { .. })));
        assert_eq!(
            SalaryRangeParser::default().parse_optional(None),
            Err(SalaryRejection::Missing)
        );
        assert_eq!(
            SalaryRangeParser::default().parse_optional(Some("  ")),
            Err(SalaryRejection::Missing)
        );
    }

    #[test]
    fn dash_variants_are_folded() {
        assert_eq!(normalize_token("15～25k"), "15-25K");
        assert_eq!(normalize_token("15—25 K/月"), "15-25K");
    }

    #[test]
    fn canonical_token_prefers_thousands() {
        let parser = SalaryRangeParser::default();
        let t = parser.thresholds();
        let r = parser.parse("2140K").unwrap();
        assert_eq!(r.canonical_token(t), "21-40K");
        let r = parser.parse("15500-20000").unwrap();
        assert_eq!(r.canonical_token(t), "15500-20000");
    }

    #[test]
    fn canonical_token_keeps_small_low_bound_second() {
        let parser = SalaryRangeParser::default();
        let t = parser.thresholds();
        for raw in ["25000-500", "1500-900"] {
            let first = parser.parse(raw).unwrap();
            let canonical = first.canonical_token(t);
            assert_eq!(canonical, raw);
            assert_eq!(parser.parse(&canonical), Ok(first));
        }
        assert_eq!(triple("25000-500"), (500.0, 25000.0, 12750.0));
    }

    #[test]
    fn band_is_exclusive() {
        let band = SalaryBand::default();
        assert!(band.contains(20000.0));
        assert!(!band.contains(50000.0));
        assert!(!band.contains(2000.0));
        assert!(!band.contains(60000.0));
    }
}
