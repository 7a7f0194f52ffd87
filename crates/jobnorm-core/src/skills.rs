//! Fixed-vocabulary skill tagging.
//!
//! Plain case-insensitive substring containment: no stemming and no word
//! boundaries. `"Java"` matches inside `"JavaScript"`; downstream features
//! depend on exactly this behavior.

use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
pub struct SkillTagger {
    /// `(term as configured, lowercased term)`
    vocabulary: Vec<(String, String)>,
}

impl SkillTagger {
    pub fn new<I, S>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let vocabulary = vocabulary
            .into_iter()
            .map(Into::into)
            .map(|term: String| {
                let lower = term.to_lowercase();
                (term, lower)
            })
            .collect();
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.iter().map(|(term, _)| term.as_str())
    }

    /// Presence flag for every vocabulary term against `title + " " + text`.
    pub fn tag(&self, title: &str, text: &str) -> BTreeMap<String, bool> {
        let haystack = haystack(title, text);
        self.vocabulary
            .iter()
            .map(|(term, lower)| (term.clone(), haystack.contains(lower.as_str())))
            .collect()
    }

    /// Only the terms that are present.
    pub fn present(&self, title: &str, text: &str) -> BTreeSet<String> {
        let haystack = haystack(title, text);
        self.vocabulary
            .iter()
            .filter(|(_, lower)| haystack.contains(lower.as_str()))
            .map(|(term, _)| term.clone())
            .collect()
    }
}

fn haystack(title: &str, text: &str) -> String {
    format!("{title} {text}").to_lowercase()
}
