use anyhow::{Context, Result};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::time::Duration;

use super::Searcher;
use crate::error::TransportError;
use crate::types::SearchResult;

pub const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";

/// Tavily API request. No domain filter: the whole web is searched.
#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    search_depth: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    url: String,
    #[serde(default)]
    content: String,
    score: Option<f64>,
}

/// Tavily API client for web search
pub struct TavilyClient {
    http: Client,
    api_key: String,
    endpoint: String,
    limiter: DefaultDirectRateLimiter,
}

impl TavilyClient {
    pub fn new(api_key: String, qps: u32, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        let qps = NonZeroU32::new(qps).unwrap_or(nonzero!(1u32));
        let limiter = RateLimiter::direct(Quota::per_second(qps));
        Ok(Self { http, api_key, endpoint: TAVILY_ENDPOINT.to_string(), limiter })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait::async_trait]
impl Searcher for TavilyClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        self.limiter.until_ready().await;
        let request = TavilyRequest { query, search_depth: "basic", max_results };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send Tavily search request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = format!("Tavily API error {status}: {body}");
            return Err(TransportError::Search(message).into());
        }

        let tavily: TavilyResponse =
            response.json().await.context("Failed to parse Tavily response")?;
        tracing::debug!(query, hits = tavily.results.len(), "tavily search done");

        Ok(tavily
            .results
            .into_iter()
            .take(max_results)
            .map(|r| SearchResult {
                title: r.title,
                url: r.url,
                snippet: r.content,
                score: r.score,
            })
            .collect())
    }
}
