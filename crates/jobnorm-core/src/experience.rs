//! Experience-years and degree-requirement extraction.

use regex::Regex;
use serde::Deserialize;

use crate::error::Result;
use crate::types::DegreeCode;

/// `[experience]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExperienceRules {
    /// Unit tokens that follow a year count (`3-5年`).
    pub year_units: Vec<String>,
    /// Phrases marking new-graduate / entry-level posts.
    pub entry_level_keywords: Vec<String>,
    pub entry_level_years: f64,
}

impl Default for ExperienceRules {
    fn default() -> Self {
        Self {
            year_units: vec!["年".to_string()],
            entry_level_keywords: vec!["应届".to_string(), "在校".to_string()],
            entry_level_years: 0.5,
        }
    }
}

/// `[degree]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DegreeKeywords {
    /// Groups of phrases; a text is unrestricted when it contains every phrase
    /// of at least one group.
    pub unrestricted: Vec<Vec<String>>,
    pub doctorate: Vec<String>,
    pub master: Vec<String>,
    pub bachelor: Vec<String>,
    pub associate: Vec<String>,
}

impl Default for DegreeKeywords {
    fn default() -> Self {
        let v = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            unrestricted: vec![v(&["学历不限"]), v(&["学历要求", "不限"])],
            doctorate: v(&["博士"]),
            master: v(&["硕士"]),
            bachelor: v(&["本科"]),
            associate: v(&["大专"]),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExperienceDegreeExtractor {
    year_range: Regex,
    year_single: Regex,
    entry_level_keywords: Vec<String>,
    entry_level_years: f64,
    degrees: DegreeKeywords,
}

impl ExperienceDegreeExtractor {
    pub fn new(rules: &ExperienceRules, degrees: DegreeKeywords) -> Result<Self> {
        let units = rules
            .year_units
            .iter()
            .map(|u| regex::escape(u))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            year_range: Regex::new(&format!(r"(\d+)\s*-\s*(\d+)\s*(?:{units})"))?,
            year_single: Regex::new(&format!(r"(\d+)\s*(?:{units})"))?,
            entry_level_keywords: rules.entry_level_keywords.clone(),
            entry_level_years: rules.entry_level_years,
            degrees,
        })
    }

    /// `(exp_years, degree)` for one listing text.
    pub fn extract(&self, text: &str) -> (f64, DegreeCode) {
        (self.experience_years(text), self.degree(text))
    }

    /// Range → entry level → single value → 0.
    pub fn experience_years(&self, text: &str) -> f64 {
        if let Some(caps) = self.year_range.captures(text) {
            let low: f64 = caps[1].parse().unwrap_or(0.0);
            let high: f64 = caps[2].parse().unwrap_or(0.0);
            return (low + high) / 2.0;
        }
        if self
            .entry_level_keywords
            .iter()
            .any(|kw| text.contains(kw.as_str()))
        {
            return self.entry_level_years;
        }
        if let Some(caps) = self.year_single.captures(text) {
            return caps[1].parse().unwrap_or(0.0);
        }
        0.0
    }

    /// An explicit "no requirement" wins over any degree word, then the most
    /// senior degree mentioned.
    pub fn degree(&self, text: &str) -> DegreeCode {
        let contains_any = |words: &[String]| words.iter().any(|w| text.contains(w.as_str()));

        let unrestricted = self
            .degrees
            .unrestricted
            .iter()
            .any(|group| group.iter().all(|phrase| text.contains(phrase.as_str())));
        if unrestricted {
            return DegreeCode::Unrestricted;
        }

        let d = &self.degrees;
        [
            (&d.doctorate, DegreeCode::Doctorate),
            (&d.master, DegreeCode::Master),
            (&d.bachelor, DegreeCode::Bachelor),
            (&d.associate, DegreeCode::Associate),
        ]
        .into_iter()
        .find(|(words, _)| contains_any(words.as_slice()))
        .map(|(_, code)| code)
        .unwrap_or(DegreeCode::Unrestricted)
    }
}

impl Default for ExperienceDegreeExtractor {
    fn default() -> Self {
        Self::new(&ExperienceRules::default(), DegreeKeywords::default())
            .expect("default experience patterns are valid")
    }
}
