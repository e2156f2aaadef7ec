use serde::{Deserialize, Serialize};
use std::fmt;

/// One ranked hit returned by the search provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>, // provider relevance, when the provider reports one
}

/// What the LLM sees for each search slot: a hit, or the single error record
/// substituted when the provider call failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchRecord {
    Hit(SearchResult),
    Error { error: String },
}

impl SearchRecord {
    pub fn as_hit(&self) -> Option<&SearchResult> {
        match self {
            SearchRecord::Hit(hit) => Some(hit),
            SearchRecord::Error { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conclusion {
    True,
    False,
    Unproven, // only produced under the ternary policy
}

impl Conclusion {
    pub fn label(&self) -> &'static str {
        match self {
            Conclusion::True => "VRAI",
            Conclusion::False => "FAUX",
            Conclusion::Unproven => "NON PROUVÉ",
        }
    }
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Facts about a single URL, computed each time it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UrlTrustFact {
    pub valid_scheme: bool,
    pub trusted_domain: bool,
    pub reachable: bool,
}

/// How a sink should present a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlStatus {
    Verified,
    Unreachable,
    Untrusted,
}

impl UrlTrustFact {
    pub fn status(&self) -> UrlStatus {
        if !(self.valid_scheme && self.trusted_domain) {
            UrlStatus::Untrusted
        } else if self.reachable {
            UrlStatus::Verified
        } else {
            UrlStatus::Unreachable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    Plain,
    Bold,
}

/// Visual weight of a section header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decoration {
    HeavyRule, // `#`
    LightRule, // `##`
    Arrow,     // `###`
}

impl Decoration {
    pub fn for_level(level: u8) -> Self {
        match level {
            1 => Decoration::HeavyRule,
            2 => Decoration::LightRule,
            _ => Decoration::Arrow,
        }
    }

    /// Rule line drawn above and below the title, if any.
    pub fn rule(&self) -> Option<String> {
        match self {
            Decoration::HeavyRule => Some("=".repeat(60)),
            Decoration::LightRule => Some("─".repeat(50)),
            Decoration::Arrow => None,
        }
    }

    pub fn marker(&self) -> Option<&'static str> {
        match self {
            Decoration::Arrow => Some("▸ "),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderEvent {
    SectionHeader { level: u8, title: String, decoration: Decoration },
    TextSpan { content: String, emphasis: Emphasis },
    UrlSpan { url: String, trust: UrlTrustFact },
    LineBreak,
    BlankLine,
}

impl RenderEvent {
    pub fn header(level: u8, title: impl Into<String>) -> Self {
        let decoration = Decoration::for_level(level);
        RenderEvent::SectionHeader { level, title: title.into(), decoration }
    }

    pub fn plain(content: impl Into<String>) -> Self {
        RenderEvent::TextSpan { content: content.into(), emphasis: Emphasis::Plain }
    }

    pub fn bold(content: impl Into<String>) -> Self {
        RenderEvent::TextSpan { content: content.into(), emphasis: Emphasis::Bold }
    }
}

/// The finished, immutable output of the markup renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct RenderPlan(Vec<RenderEvent>);

impl RenderPlan {
    pub(crate) fn new(events: Vec<RenderEvent>) -> Self {
        Self(events)
    }

    pub fn events(&self) -> &[RenderEvent] {
        &self.0
    }

    pub fn urls(&self) -> impl Iterator<Item = (&str, &UrlTrustFact)> {
        self.0.iter().filter_map(|ev| match ev {
            RenderEvent::UrlSpan { url, trust } => Some((url.as_str(), trust)),
            _ => None,
        })
    }
}
