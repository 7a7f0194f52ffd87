//! Degree-code label tables.
//!
//! Both the normalizer and downstream reporting read these maps, so the code
//! to label mapping is defined exactly once.

use phf::phf_map;

use crate::types::DegreeCode;

/// English labels keyed by degree code.
pub static DEGREE_LABELS: phf::Map<u8, &'static str> = phf_map! {
    0u8 => "unrestricted",
    1u8 => "associate",
    2u8 => "bachelor",
    3u8 => "master",
    4u8 => "doctorate",
};

/// Labels written into exported datasets.
pub static DEGREE_DISPLAY_LABELS: phf::Map<u8, &'static str> = phf_map! {
    0u8 => "学历不限",
    1u8 => "大专",
    2u8 => "本科",
    3u8 => "硕士",
    4u8 => "博士",
};

pub fn label(code: DegreeCode) -> &'static str {
    DEGREE_LABELS.get(&code.value()).copied().unwrap_or("unrestricted")
}

pub fn display_label(code: DegreeCode) -> &'static str {
    DEGREE_DISPLAY_LABELS
        .get(&code.value())
        .copied()
        .unwrap_or("学历不限")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_has_both_labels() {
        for code in DegreeCode::ALL {
            assert!(DEGREE_LABELS.contains_key(&code.value()));
            assert!(DEGREE_DISPLAY_LABELS.contains_key(&code.value()));
        }
        assert_eq!(DEGREE_LABELS.len(), DegreeCode::ALL.len());
    }

    #[test]
    fn labels_match_codes() {
        assert_eq!(label(DegreeCode::Unrestricted), "unrestricted");
        assert_eq!(label(DegreeCode::Doctorate), "doctorate");
        assert_eq!(display_label(DegreeCode::Bachelor), "本科");
    }
}
