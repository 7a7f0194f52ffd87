//! One-line descriptions of individual salary tokens, for `jobnorm salary`.

use jobnorm_core::{SalaryRange, SalaryRangeParser};
use jobnorm_feeds::clean_ocr_salary;

/// Parse `token` (after strict OCR cleaning when `ocr` is set) and describe
/// the outcome.
pub fn describe_token(parser: &SalaryRangeParser, token: &str, ocr: bool) -> String {
    let cleaned = if ocr {
        match clean_ocr_salary(token, parser.thresholds()) {
            Some(cleaned) => cleaned,
            None => return format!("{token:?}: discarded by OCR cleaning"),
        }
    } else {
        token.to_string()
    };

    match parser.parse(&cleaned) {
        Ok(range) => format!("{token:?}: {}", describe_range(&range, parser)),
        Err(rejection) => format!("{token:?}: rejected ({})", rejection.kind()),
    }
}

fn describe_range(range: &SalaryRange, parser: &SalaryRangeParser) -> String {
    format!(
        "min={:.0} max={:.0} avg={:.0} canonical={}",
        range.min_salary,
        range.max_salary,
        range.avg_salary,
        range.canonical_token(parser.thresholds())
    )
}
