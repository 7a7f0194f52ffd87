//! Configuration types for jobnorm.
//!
//! [`Config::load`] layers an optional user file on top of the embedded
//! defaults; by default it looks for `~/.config/jobnorm/config.toml`.
//! [`Config::defaults`] returns the same defaults without touching the
//! filesystem (useful in tests).
//!
//! The city list, company-keyword denylist, skill vocabulary and degree
//! keyword tables are data, not code: swapping them never requires touching
//! the extractors.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{NormalizeError, Result};
use crate::experience::{DegreeKeywords, ExperienceRules};
use crate::salary::{SalaryBand, SalaryThresholds};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[vocabulary]
cities = ["南京", "北京", "上海", "广州", "深圳", "杭州", "成都", "武汉", "西安", "苏州", "长沙", "重庆", "合肥"]
company_keywords = ["公司", "科技", "集团", "银行", "软件", "服务", "中心", "大学", "厂", "局"]
skills = ["Python", "SQL", "Excel", "Tableau", "PowerBI", "Spark", "Hadoop", "Machine Learning", "Java"]
location_separators = ["·"]

[salary]
large_magnitude     = 50.0
base_unit_floor     = 1000.0
sanity_limit        = 200.0
unit_multiplier     = 1000.0
ocr_split_threshold = 100.0

[filter]
min_avg_salary = 2000.0
max_avg_salary = 50000.0

[experience]
year_units           = ["年"]
entry_level_keywords = ["应届", "在校"]
entry_level_years    = 0.5

[degree]
unrestricted = [["学历不限"], ["学历要求", "不限"]]
doctorate    = ["博士"]
master       = ["硕士"]
bachelor     = ["本科"]
associate    = ["大专"]

[pipeline]
min_samples = 10
parallel    = false
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub vocabulary: VocabularyConfig,
    pub salary: SalaryThresholds,
    pub filter: SalaryBand,
    pub experience: ExperienceRules,
    pub degree: DegreeKeywords,
    pub pipeline: PipelineConfig,
}

/// `[vocabulary]` section: the fixed lookup lists shared by all workers.
#[derive(Debug, Clone, Deserialize)]
pub struct VocabularyConfig {
    pub cities: Vec<String>,
    pub company_keywords: Vec<String>,
    pub skills: Vec<String>,
    /// Must be non-empty: the separator head is the strongest city signal.
    pub location_separators: Vec<String>,
}

/// `[pipeline]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Fewer surviving records than this fails the run.
    pub min_samples: usize,
    /// Run the per-record stages on the rayon pool.
    #[serde(default)]
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `path` (or the default location when `None`), layered on top
    /// of the built-in defaults, and validate the result.
    ///
    /// An explicit path must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let user_file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::from(config_path().as_path()).required(false),
        };

        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(user_file)
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Layer a TOML snippet over the defaults. Handy for swapping vocabularies
    /// per test case.
    pub fn from_toml_str(overrides: &str) -> Result<Self> {
        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(overrides, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Reject configurations that would make the run degenerate.
    pub fn validate(&self) -> Result<()> {
        let vocab = &self.vocabulary;
        require_list("cities", &vocab.cities)?;
        require_list("company_keywords", &vocab.company_keywords)?;
        require_list("skills", &vocab.skills)?;
        require_list("location_separators", &vocab.location_separators)?;

        require_list("experience.year_units", &self.experience.year_units)?;
        reject_blank(
            "experience.entry_level_keywords",
            &self.experience.entry_level_keywords,
        )?;
        let years = self.experience.entry_level_years;
        if !years.is_finite() || years < 0.0 {
            return Err(NormalizeError::InvalidConfig(format!(
                "experience.entry_level_years must be a non-negative number, got {years}"
            )));
        }

        require_list("degree.doctorate", &self.degree.doctorate)?;
        require_list("degree.master", &self.degree.master)?;
        require_list("degree.bachelor", &self.degree.bachelor)?;
        require_list("degree.associate", &self.degree.associate)?;
        for group in &self.degree.unrestricted {
            if group.is_empty() {
                return Err(NormalizeError::InvalidConfig(
                    "degree.unrestricted contains an empty phrase group".to_string(),
                ));
            }
            reject_blank("degree.unrestricted", group)?;
        }

        self.salary.validate()?;
        self.filter.validate()?;
        Ok(())
    }
}

fn require_list(list: &'static str, entries: &[String]) -> Result<()> {
    if entries.is_empty() {
        return Err(NormalizeError::EmptyVocabulary(list));
    }
    reject_blank(list, entries)
}

fn reject_blank(list: &'static str, entries: &[String]) -> Result<()> {
    match entries.iter().position(|e| e.trim().is_empty()) {
        Some(index) => Err(NormalizeError::BlankVocabularyEntry { list, index }),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("jobnorm")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
