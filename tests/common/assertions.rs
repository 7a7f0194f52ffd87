//! Domain-specific assertion macros for jobnorm harnesses.
//!
//! These add context-rich failure messages that make it clear which record
//! property was violated.

// ---------------------------------------------------------------------------
// Salary assertions
// ---------------------------------------------------------------------------

/// Assert that a `SalaryRange` equals the expected `(min, max, avg)` triple.
///
/// ```rust
/// assert_salary!(range, (15000.0, 25000.0, 20000.0));
/// ```
#[macro_export]
macro_rules! assert_salary {
    ($range:expr, ($min:expr, $max:expr, $avg:expr)) => {{
        let range: &jobnorm_core::SalaryRange = &$range;
        let actual = (range.min_salary, range.max_salary, range.avg_salary);
        let expected: (f64, f64, f64) = ($min, $max, $avg);
        if actual != expected {
            panic!(
                "assert_salary! failed:\n  expected (min, max, avg): {:?}\n  actual:                   {:?}",
                expected, actual
            );
        }
    }};
    ($range:expr, $expected:expr) => {{
        let (min, max, avg): (f64, f64, f64) = $expected;
        $crate::assert_salary!($range, (min, max, avg));
    }};
}

/// Assert the structural salary invariants every kept record must satisfy.
#[macro_export]
macro_rules! assert_salary_invariants {
    ($record:expr) => {{
        let record: &jobnorm_core::StructuredRecord = &$record;
        let s = &record.salary;
        if !(s.min_salary <= s.max_salary) {
            panic!(
                "assert_salary_invariants! failed for {:?}: min {} > max {}",
                record.title, s.min_salary, s.max_salary
            );
        }
        let mid = (s.min_salary + s.max_salary) / 2.0;
        if (s.avg_salary - mid).abs() > 1e-9 {
            panic!(
                "assert_salary_invariants! failed for {:?}: avg {} is not the midpoint {}",
                record.title, s.avg_salary, mid
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Record assertions
// ---------------------------------------------------------------------------

/// Assert that a record's skill set is exactly the given terms.
///
/// ```rust
/// assert_skills!(record, ["Python", "SQL"]);
/// ```
#[macro_export]
macro_rules! assert_skills {
    ($record:expr, [$($skill:expr),* $(,)?]) => {{
        let record: &jobnorm_core::StructuredRecord = &$record;
        let expected: std::collections::BTreeSet<String> =
            [$($skill.to_string()),*].into_iter().collect();
        if record.skills != expected {
            panic!(
                "assert_skills! failed for {:?}:\n  expected: {:?}\n  actual:   {:?}",
                record.title, expected, record.skills
            );
        }
    }};
}

/// Assert that the titles of `records` appear in exactly the given order.
#[macro_export]
macro_rules! assert_titles_in_order {
    ($records:expr, [$($title:expr),* $(,)?]) => {{
        let actual: Vec<&str> = $records.iter().map(|r| r.title.as_str()).collect();
        let expected: Vec<&str> = vec![$($title),*];
        if actual != expected {
            panic!(
                "assert_titles_in_order! failed:\n  expected: {:?}\n  actual:   {:?}",
                expected, actual
            );
        }
    }};
}
