#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use factcheck_rs::llm::Llm;
use factcheck_rs::search::Searcher;
use factcheck_rs::trust::Reachability;
use factcheck_rs::{Pipeline, SearchResult};

pub struct FakeLlm {
    // maps (system, user) to the completion text
    pub handler: Box<dyn Fn(&str, &str) -> Result<String> + Send + Sync>,
    pub delay_ms: u64,
    pub calls: AtomicUsize,
}

impl FakeLlm {
    pub fn answering(text: &'static str) -> Self {
        Self {
            handler: Box::new(move |_, _| Ok(text.to_string())),
            delay_ms: 0,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Llm for FakeLlm {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        use tokio::time::{sleep, Duration};
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        (self.handler)(system_prompt, user_prompt)
    }
}

pub struct FakeSearcher {
    pub results: Vec<SearchResult>,
    pub calls: AtomicUsize,
}

impl FakeSearcher {
    pub fn with_urls(urls: &[&str]) -> Self {
        let results = urls
            .iter()
            .enumerate()
            .map(|(i, u)| SearchResult {
                title: format!("r{i}"),
                url: u.to_string(),
                snippet: format!("snippet {i}"),
                score: Some(0.8),
            })
            .collect();
        Self { results, calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Searcher for FakeSearcher {
    async fn search(&self, _query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.results.iter().take(max_results).cloned().collect())
    }
}

/// Reachable iff the URL contains one of `up`.
pub struct FakeProbe {
    pub up: Vec<&'static str>,
    pub calls: AtomicUsize,
}

impl FakeProbe {
    pub fn up(up: Vec<&'static str>) -> Self {
        Self { up, calls: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl Reachability for FakeProbe {
    async fn is_reachable(&self, url: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.up.iter().any(|u| url.contains(u))
    }
}

pub fn pipeline(search: Arc<FakeSearcher>, llm: Arc<FakeLlm>, probe: Arc<FakeProbe>) -> Pipeline {
    Pipeline::new(search, llm, probe)
}
