use anyhow::{Context, Result};
use futures::{stream, StreamExt};
use reqwest::{redirect, Client};
use std::time::Duration;

use crate::types::UrlTrustFact;

pub const SECURE_SCHEME: &str = "https://";

/// Domain fragments considered trustworthy. Matched as plain substrings of the
/// whole URL, so `fake-wikipedia.org.evil.com` passes too; a host-suffix match
/// on the parsed URL would close that gap.
pub const TRUSTED_DOMAINS: &[&str] =
    &["linkedin.com", "wikipedia.org", "gouv.fr", "gov", "edu", "univ", "cnrs.fr"];

pub fn has_secure_scheme(url: &str) -> bool {
    url.starts_with(SECURE_SCHEME)
}

pub fn is_trusted_domain(url: &str) -> bool {
    TRUSTED_DOMAINS.iter().any(|d| url.contains(d))
}

/// Live existence check for a URL. Implementations never fail: anything other
/// than a successful answer is `false`.
#[async_trait::async_trait]
pub trait Reachability: Send + Sync {
    async fn is_reachable(&self, url: &str) -> bool;
}

/// `HEAD` probe with a bounded timeout, redirects followed and certificates verified.
#[derive(Clone)]
pub struct HttpProbe {
    http: Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::limited(10))
            .build()
            .context("Failed to create probe HTTP client")?;
        Ok(Self { http })
    }
}

#[async_trait::async_trait]
impl Reachability for HttpProbe {
    async fn is_reachable(&self, url: &str) -> bool {
        match self.http.head(url).send().await {
            Ok(resp) => {
                let ok = resp.status().is_success();
                tracing::debug!(url, status = %resp.status(), ok, "probe answered");
                ok
            }
            Err(e) => {
                tracing::debug!(url, error = %e, "probe failed");
                false
            }
        }
    }
}

/// Probe that never touches the network; every URL is unreachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

#[async_trait::async_trait]
impl Reachability for Offline {
    async fn is_reachable(&self, _url: &str) -> bool {
        false
    }
}

/// Scheme and domain facts only, `reachable` left false.
pub fn classify_static(url: &str) -> UrlTrustFact {
    UrlTrustFact {
        valid_scheme: has_secure_scheme(url),
        trusted_domain: is_trusted_domain(url),
        reachable: false,
    }
}

pub async fn classify(url: &str, probe: &dyn Reachability) -> UrlTrustFact {
    UrlTrustFact { reachable: probe.is_reachable(url).await, ..classify_static(url) }
}

/// Classifies many URLs with up to `concurrency` probes in flight. Output order
/// matches `urls` whatever order the probes finish in.
pub async fn classify_all(
    urls: &[String],
    probe: &dyn Reachability,
    concurrency: usize,
) -> Vec<UrlTrustFact> {
    let tasks: Vec<_> = urls
        .iter()
        .enumerate()
        .map(|(idx, url)| async move { (idx, classify(url, probe).await) })
        .collect();

    let mut out = stream::iter(tasks)
        .buffer_unordered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    out.sort_by_key(|(idx, _)| *idx);
    out.into_iter().map(|(_, fact)| fact).collect()
}
