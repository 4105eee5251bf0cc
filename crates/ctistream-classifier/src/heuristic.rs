//! Keyword-membership heuristic for bootstrap labelling
//!
//! Used to generate noisy training labels on a cold start, before any
//! persisted model exists. Any case-insensitive keyword hit makes a
//! message CTI.

use aho_corasick::AhoCorasick;
use ctistream_core::{Error, Label, Result};

/// Fixed keyword set for heuristic labelling
pub const CTI_KEYWORDS: &[&str] = &[
    "CVE",
    "vulnerability",
    "exploit",
    "attack",
    "malware",
    "ransomware",
    "phishing",
    "zero-day",
    "APT",
    "hackers",
    "breach",
    "data leak",
    "botnet",
    "trojan",
    "spyware",
    "patch",
    "vulnerabilities",
];

/// Case-insensitive substring matcher over [`CTI_KEYWORDS`]
pub struct HeuristicLabeler {
    matcher: AhoCorasick,
}

impl HeuristicLabeler {
    pub fn new() -> Result<Self> {
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(CTI_KEYWORDS)
            .map_err(|e| Error::classifier(format!("failed to build keyword matcher: {e}")))?;
        Ok(Self { matcher })
    }

    /// Label a single message: any keyword hit is CTI.
    pub fn label(&self, text: &str) -> Label {
        if self.matcher.is_match(text) {
            Label::Cti
        } else {
            Label::NonCti
        }
    }

    /// Label a batch, preserving order.
    pub fn label_all(&self, texts: &[String]) -> Vec<Label> {
        texts.iter().map(|t| self.label(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_hit_is_cti() {
        let labeler = HeuristicLabeler::new().unwrap();
        assert_eq!(labeler.label("New ransomware campaign observed"), Label::Cti);
        assert_eq!(labeler.label("CVE-2025-0001 under active exploitation"), Label::Cti);
        assert_eq!(labeler.label("a zero-day in the wild"), Label::Cti);
    }

    #[test]
    fn match_is_case_insensitive() {
        let labeler = HeuristicLabeler::new().unwrap();
        assert_eq!(labeler.label("RANSOMWARE everywhere"), Label::Cti);
        assert_eq!(labeler.label("cve-2024-1234"), Label::Cti);
        assert_eq!(labeler.label("Apt group activity"), Label::Cti);
    }

    #[test]
    fn no_keyword_is_non_cti() {
        let labeler = HeuristicLabeler::new().unwrap();
        assert_eq!(labeler.label("happy birthday to our team"), Label::NonCti);
        assert_eq!(labeler.label(""), Label::NonCti);
    }

    #[test]
    fn every_fixed_keyword_triggers() {
        let labeler = HeuristicLabeler::new().unwrap();
        for keyword in CTI_KEYWORDS {
            let text = format!("report about {keyword} today");
            assert_eq!(labeler.label(&text), Label::Cti, "keyword {keyword}");
        }
    }

    #[test]
    fn label_all_preserves_order() {
        let labeler = HeuristicLabeler::new().unwrap();
        let texts = vec![
            "malware dropper".to_string(),
            "lunch menu".to_string(),
            "phishing kit for sale".to_string(),
        ];
        assert_eq!(
            labeler.label_all(&texts),
            vec![Label::Cti, Label::NonCti, Label::Cti]
        );
    }
}
