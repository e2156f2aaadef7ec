use serde::Serialize;
use std::fmt;

use crate::trust::{has_secure_scheme, is_trusted_domain};
use crate::types::SearchRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FalseReason {
    NoSources,
    UntrustedSources,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "label", content = "reason", rename_all = "snake_case")]
pub enum VerdictLabel {
    Confirmed,
    False(FalseReason),
    Unproven,
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VerdictLabel::Confirmed => "✅ CONFIRMÉ par des sources fiables",
            VerdictLabel::False(FalseReason::NoSources) => "❌ FAUX (aucune source disponible)",
            VerdictLabel::False(FalseReason::UntrustedSources) => "❌ FAUX (sources non fiables)",
            VerdictLabel::Unproven => "⚠️ NON PROUVÉ (informations insuffisantes)",
        })
    }
}

/// Decision table over source reliability; first matching rule wins.
pub fn verdict(score: f64, trusted_count: usize, total: usize) -> VerdictLabel {
    if total == 0 {
        return VerdictLabel::False(FalseReason::NoSources);
    }
    if trusted_count >= 2 && score >= 60.0 {
        return VerdictLabel::Confirmed;
    }
    if trusted_count == 0 {
        return VerdictLabel::False(FalseReason::UntrustedSources);
    }
    VerdictLabel::Unproven
}

/// Reliability of the sources a search returned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reliability {
    pub score: f64, // share of trusted sources, 0..=100
    pub trusted: usize,
    pub total: usize,
    pub verdict: VerdictLabel,
}

impl Reliability {
    /// Error records count as no source at all.
    pub fn from_records(records: &[SearchRecord]) -> Self {
        let hits: Vec<_> = records.iter().filter_map(SearchRecord::as_hit).collect();
        let total = hits.len();
        let trusted = hits
            .iter()
            .filter(|h| has_secure_scheme(&h.url) && is_trusted_domain(&h.url))
            .count();
        let score = if total == 0 { 0.0 } else { trusted as f64 * 100.0 / total as f64 };
        Self { score, trusted, total, verdict: verdict(score, trusted, total) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchResult;
    use proptest::prelude::*;

    #[test]
    fn decision_table() {
        assert_eq!(verdict(70.0, 3, 5), VerdictLabel::Confirmed);
        assert_eq!(verdict(70.0, 0, 5), VerdictLabel::False(FalseReason::UntrustedSources));
        assert_eq!(verdict(10.0, 1, 3), VerdictLabel::Unproven);
        assert_eq!(verdict(59.9, 4, 5), VerdictLabel::Unproven);
        assert_eq!(verdict(60.0, 2, 5), VerdictLabel::Confirmed);
    }

    #[test]
    fn labels_read_like_the_report() {
        assert_eq!(verdict(0.0, 0, 0).to_string(), "❌ FAUX (aucune source disponible)");
        assert!(verdict(10.0, 1, 3).to_string().contains("NON PROUVÉ"));
    }

    proptest! {
        #[test]
        fn no_sources_is_always_false(score in -1000.0f64..1000.0, trusted in 0usize..100) {
            let expected = VerdictLabel::False(FalseReason::NoSources);
            prop_assert_eq!(verdict(score, trusted, 0), expected);
        }

        #[test]
        fn verdict_is_deterministic(
            score in 0.0f64..100.0,
            trusted in 0usize..10,
            total in 0usize..10,
        ) {
            prop_assert_eq!(verdict(score, trusted, total), verdict(score, trusted, total));
        }
    }

    fn hit(url: &str) -> SearchRecord {
        SearchRecord::Hit(SearchResult {
            title: "t".into(),
            url: url.into(),
            snippet: "s".into(),
            score: Some(0.5),
        })
    }

    #[test]
    fn reliability_counts_trusted_hits() {
        let records = vec![
            hit("https://fr.wikipedia.org/wiki/Lune"),
            hit("https://www.nasa.gov/moon"),
            hit("http://www.cnrs.fr/insecure"),
            hit("https://blog.example.com/lune"),
        ];
        let r = Reliability::from_records(&records);
        assert_eq!((r.trusted, r.total), (2, 4));
        assert_eq!(r.score, 50.0);
        assert_eq!(r.verdict, VerdictLabel::Unproven);
    }

    #[test]
    fn error_record_means_no_sources() {
        let r = Reliability::from_records(&[SearchRecord::Error { error: "boom".into() }]);
        assert_eq!(r.total, 0);
        assert_eq!(r.verdict, VerdictLabel::False(FalseReason::NoSources));
    }
}
