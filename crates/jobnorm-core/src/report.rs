//! Salary summaries and modeling-sample preparation over structured records.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::{NormalizeError, Result};
use crate::salary::SalaryBand;
use crate::types::{DegreeCode, StructuredRecord};

/// Count, mean and median of `avg_salary` for one degree code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegreeStats {
    pub degree: DegreeCode,
    pub label: &'static str,
    pub count: usize,
    pub mean_salary: f64,
    pub median_salary: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalarySummary {
    pub total: usize,
    pub mean_salary: f64,
    /// Only degrees with at least one record, ordered by code.
    pub by_degree: Vec<DegreeStats>,
    /// Mean salary strictly rises associate → bachelor → master. `false` when
    /// any of the three is missing.
    pub degree_premium_monotonic: bool,
}

impl SalarySummary {
    pub fn from_records(records: &[StructuredRecord]) -> Self {
        let mut groups: BTreeMap<DegreeCode, Vec<f64>> = BTreeMap::new();
        for r in records {
            groups.entry(r.degree_value).or_default().push(r.salary.avg_salary);
        }

        let by_degree: Vec<DegreeStats> = groups
            .into_iter()
            .map(|(degree, mut salaries)| DegreeStats {
                degree,
                label: degree.label(),
                count: salaries.len(),
                mean_salary: mean(&salaries),
                median_salary: median(&mut salaries),
            })
            .collect();

        let mean_of = |code: DegreeCode| {
            by_degree
                .iter()
                .find(|s| s.degree == code)
                .map(|s| s.mean_salary)
        };
        let degree_premium_monotonic = match (
            mean_of(DegreeCode::Associate),
            mean_of(DegreeCode::Bachelor),
            mean_of(DegreeCode::Master),
        ) {
            (Some(a), Some(b), Some(m)) => a < b && b < m,
            _ => false,
        };

        let all: Vec<f64> = records.iter().map(|r| r.salary.avg_salary).collect();
        Self {
            total: records.len(),
            mean_salary: mean(&all),
            by_degree,
            degree_premium_monotonic,
        }
    }
}

impl fmt::Display for SalarySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "records: {}  mean salary: {:.0}", self.total, self.mean_salary)?;
        for s in &self.by_degree {
            writeln!(
                f,
                "  {:<12} n={:<5} mean={:<8.0} median={:.0}",
                s.label, s.count, s.mean_salary, s.median_salary
            )?;
        }
        write!(f, "degree premium monotonic: {}", self.degree_premium_monotonic)
    }
}

/// Records fit for salary modeling: an explicit degree requirement and an
/// average inside `band`. Fails when fewer than `min_samples` remain.
pub fn modeling_sample(
    records: &[StructuredRecord],
    band: &SalaryBand,
    min_samples: usize,
) -> Result<Vec<StructuredRecord>> {
    let sample: Vec<StructuredRecord> = records
        .iter()
        .filter(|r| r.degree_value.is_explicit() && band.contains(r.salary.avg_salary))
        .cloned()
        .collect();

    if sample.len() < min_samples {
        return Err(NormalizeError::InsufficientSamples {
            kept: sample.len(),
            required: min_samples,
        });
    }
    Ok(sample)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::salary::SalaryRange;
    use pretty_assertions::assert_eq;

    fn record(avg_k: f64, degree: DegreeCode) -> StructuredRecord {
        StructuredRecord {
            title: "analyst".into(),
            city: "南京".into(),
            salary: SalaryRange::from_working_units(avg_k, avg_k, 1000.0),
            exp_years: 0.0,
            degree_value: degree,
            skills: Default::default(),
            raw_text: String::new(),
        }
    }

    #[test]
    fn groups_by_degree_in_code_order() {
        let records = vec![
            record(20.0, DegreeCode::Master),
            record(8.0, DegreeCode::Associate),
            record(12.0, DegreeCode::Bachelor),
            record(16.0, DegreeCode::Bachelor),
            record(10.0, DegreeCode::Bachelor),
        ];
        let summary = SalarySummary::from_records(&records);
        assert_eq!(summary.total, 5);
        let codes: Vec<_> = summary.by_degree.iter().map(|s| s.degree).collect();
        assert_eq!(
            codes,
            vec![DegreeCode::Associate, DegreeCode::Bachelor, DegreeCode::Master]
        );
        let bachelor = &summary.by_degree[1];
        assert_eq!(bachelor.count, 3);
        assert_eq!(bachelor.median_salary, 12000.0);
        assert!(summary.degree_premium_monotonic);
    }

    #[test]
    fn missing_degree_group_is_not_monotonic() {
        let summary = SalarySummary::from_records(&[
            record(8.0, DegreeCode::Associate),
            record(12.0, DegreeCode::Bachelor),
        ]);
        assert!(!summary.degree_premium_monotonic);
    }

    #[test]
    fn even_count_median_averages_middle_pair() {
        let mut v = vec![4.0, 1.0, 3.0, 2.0];
        assert_eq!(median(&mut v), 2.5);
    }

    #[test]
    fn modeling_sample_drops_unrestricted_and_out_of_band() {
        let records = vec![
            record(12.0, DegreeCode::Bachelor),
            record(12.0, DegreeCode::Unrestricted),
            record(1.0, DegreeCode::Master),
            record(18.0, DegreeCode::Master),
        ];
        let sample = modeling_sample(&records, &SalaryBand::default(), 2).unwrap();
        assert_eq!(sample.len(), 2);

        let err = modeling_sample(&records, &SalaryBand::default(), 3).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::InsufficientSamples { kept: 2, required: 3 }
        ));
    }
}
