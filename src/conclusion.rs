use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::types::Conclusion;

pub const CONCLUSION_MARKER: &str = "Conclusion";

/// Which labels the extractor may settle on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConclusionPolicy {
    /// VRAI or FAUX, nothing else
    #[default]
    Binary,
    /// NON PROUVÉ is accepted and checked before VRAI
    Ternary,
}

impl FromStr for ConclusionPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "binary" => Ok(ConclusionPolicy::Binary),
            "ternary" => Ok(ConclusionPolicy::Ternary),
            other => anyhow::bail!("unknown conclusion policy: {other}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub text: String,
    pub conclusion: Option<Conclusion>, // None when the answer had no marker
    pub defaulted: bool,                // label segment named no known value
}

/// Normalizes the answer so it ends with exactly one `Conclusion : <label>` line.
///
/// The text after the last marker is the label segment. It is searched
/// case-insensitively for VRAI, then FAUX; when neither appears the conclusion
/// falls back to FAUX. Text without any marker is returned unchanged.
pub fn extract_conclusion(raw: &str, policy: ConclusionPolicy) -> Extracted {
    let Some(idx) = raw.rfind(CONCLUSION_MARKER) else {
        return Extracted { text: raw.to_string(), conclusion: None, defaulted: false };
    };
    let body = &raw[..idx];
    let segment = raw[idx + CONCLUSION_MARKER.len()..].to_uppercase();

    let unproven = segment.contains("NON PROUVÉ") || segment.contains("NON PROUVE");
    let found = if policy == ConclusionPolicy::Ternary && unproven {
        Some(Conclusion::Unproven)
    } else if segment.contains("VRAI") {
        Some(Conclusion::True)
    } else if segment.contains("FAUX") {
        Some(Conclusion::False)
    } else {
        None
    };

    if found.is_none() {
        tracing::warn!(segment = %segment.trim(), "ambiguous conclusion, defaulting to FAUX");
    }
    let conclusion = found.unwrap_or(Conclusion::False);

    Extracted {
        text: format!("{}\n{} : {}", body.trim(), CONCLUSION_MARKER, conclusion.label()),
        conclusion: Some(conclusion),
        defaulted: found.is_none(),
    }
}
