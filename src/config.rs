use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::conclusion::ConclusionPolicy;
use crate::llm::openai::{LlmClient, DEFAULT_MODEL, MISTRAL_API_BASE};
use crate::pipeline::{Pipeline, PipelineSettings};
use crate::search::{Searcher, SerperClient, TavilyClient, MAX_RESULTS};
use crate::trust::HttpProbe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SearchProvider {
    Tavily,
    Serper,
}

impl FromStr for SearchProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tavily" => Ok(SearchProvider::Tavily),
            "serper" => Ok(SearchProvider::Serper),
            other => anyhow::bail!("unknown search provider: {other}"),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub search_provider: SearchProvider,
    pub tavily_api_key: Option<String>,
    pub serper_api_key: Option<String>,
    pub llm_api_key: Option<String>,
    pub llm_base_url: String,
    pub llm_model: String,
    pub search_qps: u32,
    pub http_timeout: Duration,
    pub probe_timeout: Duration,
    pub probe_concurrency: usize,
    pub conclusion_policy: ConclusionPolicy,
    pub port: u16,
}

fn parsed<T: FromStr>(name: &str, default: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    raw.parse::<T>().map_err(|e| anyhow::anyhow!("{name} is invalid ({raw}): {e}"))
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // .env is optional
        let _ = dotenv();

        Ok(Self {
            search_provider: parsed("SEARCH_PROVIDER", "tavily")?,
            tavily_api_key: env::var("TAVILY_API_KEY").ok(),
            serper_api_key: env::var("SERPER_API_KEY").ok(),
            llm_api_key: env::var("MISTRAL_API_KEY").ok(),
            llm_base_url: env::var("LLM_BASE_URL").unwrap_or_else(|_| MISTRAL_API_BASE.to_string()),
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            search_qps: parsed("SEARCH_QPS", "2")?,
            http_timeout: Duration::from_secs(parsed("HTTP_TIMEOUT_SECS", "30")?),
            probe_timeout: Duration::from_secs(parsed("PROBE_TIMEOUT_SECS", "5")?),
            probe_concurrency: parsed("PROBE_CONCURRENCY", "8")?,
            conclusion_policy: parsed("CONCLUSION_POLICY", "binary")?,
            port: parsed("PORT", "8080")?,
        })
    }

    pub fn search_key(&self) -> Result<String> {
        match self.search_provider {
            SearchProvider::Tavily => {
                self.tavily_api_key.clone().context("TAVILY_API_KEY must be set")
            }
            SearchProvider::Serper => {
                self.serper_api_key.clone().context("SERPER_API_KEY must be set")
            }
        }
    }

    /// Wires the real collaborators into a pipeline.
    pub fn pipeline(&self) -> Result<Pipeline> {
        let key = self.search_key()?;
        let (qps, timeout) = (self.search_qps, self.http_timeout);
        let searcher: Arc<dyn Searcher> = match self.search_provider {
            SearchProvider::Tavily => Arc::new(TavilyClient::new(key, qps, timeout)?),
            SearchProvider::Serper => Arc::new(SerperClient::new(key, qps, timeout)?),
        };
        let llm_key = self.llm_api_key.clone().context("MISTRAL_API_KEY must be set")?;
        let llm = LlmClient::new(
            self.llm_model.clone(),
            Some(self.llm_base_url.clone()),
            Some(llm_key),
            self.http_timeout,
        )?;
        let probe = HttpProbe::new(self.probe_timeout)?;

        Ok(Pipeline::new(searcher, Arc::new(llm), Arc::new(probe)).with_settings(PipelineSettings {
            max_results: MAX_RESULTS,
            probe_concurrency: self.probe_concurrency,
            policy: self.conclusion_policy,
        }))
    }
}
