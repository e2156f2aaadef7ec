//! One fact-check cycle: validate → search → synthesize → extract → render.
//!
//! Nothing here fails past the pipeline boundary. Search errors become a
//! single error record for the LLM to comment on, an LLM error becomes the
//! response text, and only a cancelled request surfaces as an `Err`.

use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::conclusion::{extract_conclusion, ConclusionPolicy};
use crate::error::{CheckError, Result};
use crate::llm::Llm;
use crate::markup::render;
use crate::prompts::{system_prompt, user_prompt};
use crate::question::validate_claim;
use crate::search::{Searcher, MAX_RESULTS};
use crate::trust::Reachability;
use crate::types::{Conclusion, RenderPlan, SearchRecord};
use crate::verdict::Reliability;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    Validating,
    Searching,
    Synthesizing,
    Extracting,
    Rendered,
    Rejected,
    Failed,
}

#[derive(Debug, Clone, Copy)]
pub struct PipelineSettings {
    pub max_results: usize,
    pub probe_concurrency: usize,
    pub policy: ConclusionPolicy,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self { max_results: MAX_RESULTS, probe_concurrency: 8, policy: ConclusionPolicy::Binary }
    }
}

/// Everything a sink or exporter needs about a finished cycle.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub claim: String,
    pub response: String, // text fed to the renderer; exports consume this
    pub conclusion: Option<Conclusion>,
    pub reliability: Reliability,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_error: Option<String>,
    #[serde(rename = "events")]
    pub plan: RenderPlan,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Outcome {
    Rendered(Report),
    /// LLM call failed; the report renders the error message.
    Failed(Report),
    Rejected { message: String },
}

impl Outcome {
    pub fn state(&self) -> PipelineState {
        match self {
            Outcome::Rendered(_) => PipelineState::Rendered,
            Outcome::Failed(_) => PipelineState::Failed,
            Outcome::Rejected { .. } => PipelineState::Rejected,
        }
    }

    pub fn report(&self) -> Option<&Report> {
        match self {
            Outcome::Rendered(r) | Outcome::Failed(r) => Some(r),
            Outcome::Rejected { .. } => None,
        }
    }
}

struct Cycle {
    state: PipelineState,
}

impl Cycle {
    fn enter(&mut self, next: PipelineState) {
        tracing::info!(from = ?self.state, to = ?next, "pipeline transition");
        self.state = next;
    }
}

#[derive(Clone)]
pub struct Pipeline {
    searcher: Arc<dyn Searcher>,
    llm: Arc<dyn Llm>,
    probe: Arc<dyn Reachability>,
    settings: PipelineSettings,
}

impl Pipeline {
    pub fn new(
        searcher: Arc<dyn Searcher>,
        llm: Arc<dyn Llm>,
        probe: Arc<dyn Reachability>,
    ) -> Self {
        Self { searcher, llm, probe, settings: PipelineSettings::default() }
    }

    pub fn with_settings(mut self, settings: PipelineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Runs one claim to a terminal state. Dropping the future cancels any
    /// request still in flight.
    pub async fn run(&self, input: &str) -> Outcome {
        let mut cycle = Cycle { state: PipelineState::Idle };

        cycle.enter(PipelineState::Validating);
        let claim = match validate_claim(input) {
            Ok(claim) => claim,
            Err(e) => {
                cycle.enter(PipelineState::Rejected);
                return Outcome::Rejected { message: e.to_string() };
            }
        };

        cycle.enter(PipelineState::Searching);
        let max_results = self.settings.max_results.min(MAX_RESULTS);
        let (records, search_error) = match self.searcher.search(claim, max_results).await {
            Ok(hits) => {
                let records: Vec<_> =
                    hits.into_iter().take(max_results).map(SearchRecord::Hit).collect();
                (records, None)
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(error = %message, "search failed, continuing with an error record");
                (vec![SearchRecord::Error { error: message.clone() }], Some(message))
            }
        };
        let reliability = Reliability::from_records(&records);

        cycle.enter(PipelineState::Synthesizing);
        let system = system_prompt(self.settings.policy);
        let raw = match self.llm.complete(system, &user_prompt(claim, &records)).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "LLM call failed");
                let response = format!("❌ Erreur API : {e}");
                let plan = self.render_text(&response).await;
                cycle.enter(PipelineState::Failed);
                return Outcome::Failed(Report {
                    claim: claim.to_string(),
                    response,
                    conclusion: None,
                    reliability,
                    search_error,
                    plan,
                });
            }
        };

        cycle.enter(PipelineState::Extracting);
        let extracted = extract_conclusion(&raw, self.settings.policy);
        if extracted.conclusion.is_none() {
            tracing::warn!("answer carried no conclusion marker");
        }

        let plan = self.render_text(&extracted.text).await;
        cycle.enter(PipelineState::Rendered);
        Outcome::Rendered(Report {
            claim: claim.to_string(),
            response: extracted.text,
            conclusion: extracted.conclusion,
            reliability,
            search_error,
            plan,
        })
    }

    async fn render_text(&self, text: &str) -> RenderPlan {
        render(text, self.probe.as_ref(), self.settings.probe_concurrency).await
    }

    /// Like [`run`](Self::run), but gives up as soon as `cancel` fires. Nothing
    /// from an abandoned run is returned.
    pub async fn run_with_cancel(&self, input: &str, cancel: CancellationToken) -> Result<Outcome> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("pipeline cancelled");
                Err(CheckError::Cancelled)
            }
            outcome = self.run(input) => Ok(outcome),
        }
    }
}
