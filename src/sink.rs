//! Consumers of a finished [`RenderPlan`].

use console::style;

use crate::types::{Emphasis, RenderEvent, RenderPlan, UrlStatus, UrlTrustFact};

pub trait RenderSink {
    fn event(&mut self, event: &RenderEvent);
}

/// Feeds every event of `plan`, in order, to `sink`.
pub fn deliver<S: RenderSink + ?Sized>(plan: &RenderPlan, sink: &mut S) {
    for ev in plan.events() {
        sink.event(ev);
    }
}

fn url_prefix(trust: &UrlTrustFact) -> &'static str {
    match trust.status() {
        UrlStatus::Verified => "🔗 ",
        UrlStatus::Unreachable => "⚠️ Lien inaccessible : ",
        UrlStatus::Untrusted => "⚠️ Source non fiable : ",
    }
}

/// Unstyled text, the same layout the interactive display uses.
#[derive(Debug, Default)]
pub struct PlainTextSink {
    out: String,
}

impl PlainTextSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

impl RenderSink for PlainTextSink {
    fn event(&mut self, event: &RenderEvent) {
        match event {
            RenderEvent::SectionHeader { title, decoration, .. } => match decoration.rule() {
                Some(rule) => {
                    self.out.push_str(&format!("{rule}\n{title}\n{rule}\n"));
                }
                None => {
                    self.out.push_str(decoration.marker().unwrap_or_default());
                    self.out.push_str(title);
                    self.out.push('\n');
                }
            },
            RenderEvent::TextSpan { content, .. } => self.out.push_str(content),
            RenderEvent::UrlSpan { url, trust } => {
                self.out.push_str(url_prefix(trust));
                self.out.push_str(url);
            }
            RenderEvent::LineBreak | RenderEvent::BlankLine => self.out.push('\n'),
        }
    }
}

/// Terminal display with colors and weights.
#[derive(Debug, Default)]
pub struct AnsiSink {
    out: String,
}

impl AnsiSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

impl RenderSink for AnsiSink {
    fn event(&mut self, event: &RenderEvent) {
        let piece = match event {
            RenderEvent::SectionHeader { level: 1, title, decoration } => {
                let rule = style(decoration.rule().unwrap_or_default()).yellow();
                format!("{rule}\n{}\n{rule}\n", style(title).yellow().bold())
            }
            RenderEvent::SectionHeader { title, decoration, .. } => match decoration.rule() {
                Some(rule) => {
                    let rule = style(rule).cyan();
                    format!("{rule}\n{}\n{rule}\n", style(title).cyan().bold())
                }
                None => {
                    let marker = decoration.marker().unwrap_or_default();
                    format!("{}\n", style(format!("{marker}{title}")).cyan().bold())
                }
            },
            RenderEvent::TextSpan { content, emphasis: Emphasis::Bold } => {
                style(content).bold().to_string()
            }
            RenderEvent::TextSpan { content, emphasis: Emphasis::Plain } => content.clone(),
            RenderEvent::UrlSpan { url, trust } => {
                let prefix = url_prefix(trust);
                match trust.status() {
                    UrlStatus::Verified => format!("{prefix}{}", style(url).cyan().underlined()),
                    _ => format!(
                        "{}{}",
                        style(prefix).color256(214).bold(),
                        style(url).color256(214)
                    ),
                }
            }
            RenderEvent::LineBreak | RenderEvent::BlankLine => "\n".to_string(),
        };
        self.out.push_str(&piece);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::render_offline;
    use crate::types::RenderPlan;

    fn plain(plan: &RenderPlan) -> String {
        let mut sink = PlainTextSink::new();
        deliver(plan, &mut sink);
        sink.into_string()
    }

    #[test]
    fn plain_text_layout() {
        let plan = render_offline("# Titre\n### Détail\na **b** http://x.com\n\nfin");
        let rule = "=".repeat(60);
        assert_eq!(
            plain(&plan),
            format!(
                "\n{rule}\nTitre\n{rule}\n\n\n▸ Détail\n\n\
                 a b ⚠️ Source non fiable : http://x.com\n\nfin\n"
            )
        );
    }

    #[test]
    fn url_prefix_follows_status() {
        let mut sink = PlainTextSink::new();
        sink.event(&RenderEvent::UrlSpan {
            url: "https://fr.wikipedia.org".into(),
            trust: UrlTrustFact { valid_scheme: true, trusted_domain: true, reachable: true },
        });
        sink.event(&RenderEvent::UrlSpan {
            url: "https://fr.wikipedia.org/404".into(),
            trust: UrlTrustFact { valid_scheme: true, trusted_domain: true, reachable: false },
        });
        assert_eq!(
            sink.into_string(),
            "🔗 https://fr.wikipedia.org⚠️ Lien inaccessible : https://fr.wikipedia.org/404"
        );
    }

    #[test]
    fn ansi_sink_keeps_the_text() {
        let plan = render_offline("## Section\n**gras** normal");
        let mut sink = AnsiSink::new();
        deliver(&plan, &mut sink);
        let out = console::strip_ansi_codes(&sink.into_string()).to_string();
        assert!(out.contains("Section"));
        assert!(out.contains("gras normal"));
    }
}
