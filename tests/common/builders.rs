//! Test builders — ergonomic constructors for `RawRecord`, pipelines and
//! configs.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use jobnorm_core::{Config, NormalizationPipeline, RawRecord};

// ---------------------------------------------------------------------------
// RawRecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`RawRecord`] test fixtures.
///
/// # Example
///
/// ```rust
/// let record = RawRecordBuilder::new("数据分析师")
///     .salary("15-25K")
///     .line("ABC科技公司")
///     .line("南京·江宁区")
///     .build();
/// ```
pub struct RawRecordBuilder {
    title: String,
    salary: Option<String>,
    lines: Vec<String>,
    city: String,
}

impl RawRecordBuilder {
    /// The title doubles as the first line of the card text.
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            lines: vec![title.clone()],
            title,
            salary: None,
            city: String::new(),
        }
    }

    pub fn salary(mut self, salary: impl Into<String>) -> Self {
        self.salary = Some(salary.into());
        self
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Replace the whole card text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.lines = vec![text.into()];
        self
    }

    pub fn scraped_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn build(self) -> RawRecord {
        RawRecord {
            title: self.title,
            salary_raw: self.salary,
            raw_text: self.lines.join("\n"),
            city_raw: self.city,
        }
    }
}

/// A complete, keepable listing: Nanjing, 15-25K, bachelor, Python + SQL.
pub fn analyst_listing(title: &str) -> RawRecord {
    RawRecordBuilder::new(title)
        .salary("15-25K")
        .line("ABC科技公司")
        .line("3-5年经验，本科以上，熟悉Python和SQL")
        .line("南京·江宁区")
        .build()
}

// ---------------------------------------------------------------------------
// Pipelines
// ---------------------------------------------------------------------------

/// Default-config pipeline that accepts any non-empty survivor count.
pub fn default_pipeline() -> NormalizationPipeline {
    NormalizationPipeline::from_config(&Config::defaults())
        .expect("default config builds a pipeline")
        .with_min_samples(0)
}

/// Pipeline built from the defaults with a TOML override layered on top.
pub fn pipeline_with(overrides: &str) -> NormalizationPipeline {
    let cfg = Config::from_toml_str(overrides).expect("override config is valid");
    NormalizationPipeline::from_config(&cfg).expect("override config builds a pipeline")
}
