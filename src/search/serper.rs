use anyhow::{Context, Result};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::Client;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::time::Duration;

use super::Searcher;
use crate::types::SearchResult;

pub const SERPER_ENDPOINT: &str = "https://google.serper.dev/search";

#[derive(Debug, Deserialize)]
struct SerperItem {
    title: String,
    link: String,
    #[serde(default)]
    snippet: String,
}

#[derive(Debug, Deserialize)]
struct SerperResp {
    #[serde(default)]
    organic: Vec<SerperItem>,
}

pub struct SerperClient {
    http: Client,
    key: String,
    endpoint: String,
    limiter: DefaultDirectRateLimiter,
}

impl SerperClient {
    pub fn new(key: String, qps: u32, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        let qps = NonZeroU32::new(qps).unwrap_or(nonzero!(1u32));
        let limiter = RateLimiter::direct(Quota::per_second(qps));
        Ok(Self { http, key, endpoint: SERPER_ENDPOINT.to_string(), limiter })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait::async_trait]
impl Searcher for SerperClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        self.limiter.until_ready().await;
        let resp = self
            .http
            .post(&self.endpoint)
            .header("X-API-KEY", &self.key)
            .json(&serde_json::json!({ "q": query, "num": max_results }))
            .send()
            .await
            .context("Failed to send Serper search request")?
            .error_for_status()?
            .json::<SerperResp>()
            .await
            .context("Failed to parse Serper response")?;

        // Serper ranks by position and reports no relevance score
        Ok(resp
            .organic
            .into_iter()
            .take(max_results)
            .map(|item| SearchResult {
                title: item.title,
                url: item.link,
                snippet: item.snippet,
                score: None,
            })
            .collect())
    }
}
