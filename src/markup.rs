//! Turns the LLM's markdown-like answer into an ordered list of render events.
//!
//! Parsing is a pure function of the text. URL reachability is the only
//! network work and happens in [`render`], which probes every URL
//! concurrently and then fills the facts back in by position.

use regex::Regex;
use std::sync::LazyLock;

use crate::trust::{classify_all, classify_static, Reachability};
use crate::types::{RenderEvent, RenderPlan};

static SECTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,3})\s+(.+)$").unwrap());
static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

/// Lines carrying this token get the long-bold rule below.
pub const SUMMARY_MARKER: &str = "Résumé général";

/// On summary lines, bold spans this long or longer are shown plain.
pub const SUMMARY_BOLD_LIMIT: usize = 40;

/// Parses `text` without any network access. URL spans carry scheme and domain
/// facts; `reachable` is always false.
pub fn parse(text: &str) -> Vec<RenderEvent> {
    let mut events = Vec::new();
    for line in text.split('\n') {
        if line.trim().is_empty() {
            events.push(RenderEvent::BlankLine);
            continue;
        }
        if let Some(caps) = SECTION.captures(line) {
            let level = caps[1].len() as u8;
            events.push(RenderEvent::BlankLine);
            events.push(RenderEvent::header(level, caps[2].trim()));
            events.push(RenderEvent::BlankLine);
            continue;
        }
        push_line(&mut events, line);
        events.push(RenderEvent::LineBreak);
    }
    events
}

fn push_line(events: &mut Vec<RenderEvent>, line: &str) {
    let summary = line.contains(SUMMARY_MARKER);
    let mut last = 0;
    for m in URL.find_iter(line) {
        push_spans(events, &line[last..m.start()], summary);
        let url = m.as_str();
        events.push(RenderEvent::UrlSpan { url: url.to_string(), trust: classify_static(url) });
        last = m.end();
    }
    push_spans(events, &line[last..], summary);
}

/// Splits a URL-free segment into alternating plain and bold spans.
fn push_spans(events: &mut Vec<RenderEvent>, segment: &str, summary: bool) {
    let mut last = 0;
    for caps in BOLD.captures_iter(segment) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else { continue };
        push_plain(events, &segment[last..whole.start()]);
        if summary && inner.as_str().chars().count() >= SUMMARY_BOLD_LIMIT {
            push_plain(events, inner.as_str());
        } else {
            events.push(RenderEvent::bold(inner.as_str()));
        }
        last = whole.end();
    }
    push_plain(events, &segment[last..]);
}

fn push_plain(events: &mut Vec<RenderEvent>, content: &str) {
    if !content.is_empty() {
        events.push(RenderEvent::plain(content));
    }
}

/// Full render: parse, probe every URL (up to `concurrency` at once), and
/// return the finished plan.
pub async fn render(text: &str, probe: &dyn Reachability, concurrency: usize) -> RenderPlan {
    let mut events = parse(text);
    let urls: Vec<String> = events
        .iter()
        .filter_map(|ev| match ev {
            RenderEvent::UrlSpan { url, .. } => Some(url.clone()),
            _ => None,
        })
        .collect();

    if !urls.is_empty() {
        let mut facts = classify_all(&urls, probe, concurrency).await.into_iter();
        for ev in events.iter_mut() {
            if let RenderEvent::UrlSpan { trust, .. } = ev {
                if let Some(fact) = facts.next() {
                    *trust = fact;
                }
            }
        }
        tracing::debug!(urls = urls.len(), "url probes joined");
    }
    RenderPlan::new(events)
}

/// Render without probing; for previews and tests.
pub fn render_offline(text: &str) -> RenderPlan {
    RenderPlan::new(parse(text))
}
