//! File exports of a finished report. Both work from the response text the
//! pipeline produced, never from the rendered events.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

pub const BANNER: &str = "ASSISTANT WEB IA – RECHERCHE FIABLE";

pub fn text_export(claim: &str, response: &str) -> String {
    let rule = "=".repeat(60);
    format!("{rule}\n{BANNER}\n{rule}\n\nQuestion :\n{claim}\n\n{response}")
}

/// Emoji replaced by glyphs that document fonts can draw.
pub const GLYPHS: &[(&str, &str)] = &[
    ("🔍", "➤"),
    ("📋", "▣"),
    ("✅", "✓"),
    ("❌", "✗"),
    ("⚠️", "⚠"),
    ("🔗", "⟶"),
    ("💬", "▸"),
    ("📊", "▤"),
    ("🤖", "◆"),
    ("📄", "▢"),
    ("📑", "▣"),
];

const SECTION_WORDS: &[&str] =
    &["Analyse", "confirmé", "infirmé", "VRAI", "FAUX", "NON PROUVÉ", "Conclusion"];

const FOOTER: &str = "Généré par Assistant Web IA • Mistral AI & Tavily Search";

static SOURCE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://[^\s)]*").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocStyle {
    Title,
    Section,
    Body,
    Link,
    Rule,
    Spacer,
    Footer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocBlock {
    pub style: DocStyle,
    pub text: String,
}

impl DocBlock {
    fn new(style: DocStyle, text: impl Into<String>) -> Self {
        Self { style, text: text.into() }
    }

    fn spacer() -> Self {
        Self::new(DocStyle::Spacer, "")
    }
}

pub fn substitute_glyphs(line: &str) -> String {
    GLYPHS.iter().fold(line.to_string(), |acc, (emoji, glyph)| acc.replace(emoji, glyph))
}

/// Paginated-document layout: title, claim, then the response line by line.
pub fn document_blocks(claim: &str, response: &str) -> Vec<DocBlock> {
    let mut blocks = vec![
        DocBlock::new(DocStyle::Title, format!("✦ {BANNER} ✦")),
        DocBlock::spacer(),
        DocBlock::new(DocStyle::Section, "❯ QUESTION POSÉE :"),
        DocBlock::new(DocStyle::Body, claim),
        DocBlock::spacer(),
        DocBlock::new(DocStyle::Rule, "_".repeat(100)),
        DocBlock::spacer(),
    ];

    let mut in_sources = false;
    let mut after_summary = false;
    let mut source_no = 1;

    for line in response.split('\n') {
        let line = substitute_glyphs(line.trim());
        if line.is_empty() {
            blocks.push(DocBlock::spacer());
            continue;
        }

        if line.contains("Résumé général") {
            blocks.push(DocBlock::new(DocStyle::Section, line));
            after_summary = true;
            continue;
        }
        if after_summary {
            blocks.push(DocBlock::new(DocStyle::Body, line.replace("**", "")));
            after_summary = false;
            continue;
        }

        if line.contains("Sources vérifiées") {
            in_sources = true;
            blocks.push(DocBlock::new(DocStyle::Section, line));
            continue;
        }
        if in_sources && (line.contains("http://") || line.contains("https://")) {
            let url = SOURCE_URL.find(&line).map(|m| m.as_str()).unwrap_or(&line);
            blocks.push(DocBlock::new(DocStyle::Link, format!("Source {source_no} : {url}")));
            source_no += 1;
            continue;
        }

        if SECTION_WORDS.iter().any(|w| line.contains(w)) {
            blocks.push(DocBlock::new(DocStyle::Section, line));
        } else {
            blocks.push(DocBlock::new(DocStyle::Body, line.replace("**", "")));
        }
    }

    blocks.push(DocBlock::spacer());
    blocks.push(DocBlock::new(DocStyle::Footer, FOOTER));
    blocks
}
