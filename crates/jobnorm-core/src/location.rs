//! City extraction from a listing card's free text.
//!
//! Cards put the company name first and the location last, and company names
//! routinely contain a city (`南京某某科技有限公司`). The extractor therefore
//! scans lines bottom-up and refuses city hits on lines that look like an
//! organization name.

use crate::config::VocabularyConfig;
use crate::types::UNKNOWN_CITY;

/// Lines at most this many characters long that equal a city are always cities.
const BARE_CITY_MAX_CHARS: usize = 3;

#[derive(Debug, Clone)]
pub struct LocationExtractor {
    cities: Vec<String>,
    company_keywords: Vec<String>,
    separators: Vec<String>,
}

impl LocationExtractor {
    pub fn new(
        cities: Vec<String>,
        company_keywords: Vec<String>,
        separators: Vec<String>,
    ) -> Self {
        Self {
            cities,
            company_keywords,
            separators,
        }
    }

    pub fn from_config(vocab: &VocabularyConfig) -> Self {
        Self::new(
            vocab.cities.clone(),
            vocab.company_keywords.clone(),
            vocab.location_separators.clone(),
        )
    }

    /// Return the most likely city in `raw_text`, or [`UNKNOWN_CITY`].
    pub fn extract(&self, raw_text: &str) -> String {
        for line in raw_text.lines().rev() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            // `南京·江宁区`: the part before the separator is the strongest signal.
            if let Some(head) = self.separated_head(line) {
                if self.first_city_in(head).is_some() {
                    return head.to_string();
                }
            }

            let Some(city) = self.first_city_in(line) else {
                continue;
            };
            if line.chars().count() <= BARE_CITY_MAX_CHARS && line == city {
                return city.to_string();
            }
            if !self.looks_like_company(line) {
                return city.to_string();
            }
        }
        UNKNOWN_CITY.to_string()
    }

    /// Text before the first configured separator, if the line has one.
    fn separated_head<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.separators
            .iter()
            .filter_map(|sep| line.find(sep.as_str()))
            .min()
            .map(|idx| line[..idx].trim())
            .filter(|head| !head.is_empty())
    }

    fn first_city_in(&self, text: &str) -> Option<&str> {
        self.cities
            .iter()
            .map(String::as_str)
            .find(|city| text.contains(city))
    }

    fn looks_like_company(&self, line: &str) -> bool {
        self.company_keywords
            .iter()
            .any(|kw| line.contains(kw.as_str()))
    }
}
