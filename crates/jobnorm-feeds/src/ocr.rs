//! Strict salary cleaning for OCR reads.
//!
//! OCR output of the salary badge is noisy: `"2040K"` for `"20-40K"`,
//! trailers such as `"·13薪"`, or unrelated badge text (`"双休"`). Unlike the
//! lenient [`SalaryRangeParser`](jobnorm_core::SalaryRangeParser), this
//! cleaner refuses anything it cannot fix with confidence, so the record is
//! dropped at the acquisition boundary instead of being guessed at later.

use once_cell::sync::Lazy;
use regex::Regex;

use jobnorm_core::salary::{split_fused, SalaryThresholds};

static K_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+-\d+K").expect("K range pattern is valid"));
static LEADING_K_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)K").expect("leading K value pattern is valid"));

/// Clean one OCR salary read, or `None` when it should be discarded.
///
/// ```
/// use jobnorm_core::salary::SalaryThresholds;
/// use jobnorm_feeds::ocr::clean_ocr_salary;
///
/// let t = SalaryThresholds::default();
/// assert_eq!(clean_ocr_salary("2040K", &t).as_deref(), Some("20-40K"));
/// assert_eq!(clean_ocr_salary("双休", &t), None);
/// ```
pub fn clean_ocr_salary(raw: &str, thresholds: &SalaryThresholds) -> Option<String> {
    let s: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '.')
        .flat_map(char::to_uppercase)
        .collect();
    if s.is_empty() {
        return None;
    }

    if let Some(m) = K_RANGE.find(&s) {
        return Some(m.as_str().to_string());
    }

    let caps = LEADING_K_VALUE.captures(&s)?;
    let digits = &caps[1];
    let value: f64 = digits.parse().ok()?;

    if value > thresholds.ocr_split_threshold {
        if let Some((first, second)) = split_fused(digits) {
            if first < second {
                return Some(format!("{first}-{second}K"));
            }
        }
    }
    if value <= thresholds.sanity_limit {
        return Some(format!("{digits}K"));
    }
    None
}
