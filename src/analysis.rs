//! Content intelligence: every derived artifact for a document in one pass.
//!
//! [`analyze`] is the quick entry point with default options. [`Analyzer`]
//! holds an [`AnalysisOptions`] and exposes each derived function under
//! that configuration.
//!
//! ## Example
//!
//! ```rust
//! use blogdoc::{AnalysisOptions, Analyzer};
//! use serde_json::json;
//!
//! let doc = blogdoc::normalize(&json!({"blocks": [
//!     {"id": "1", "type": "heading2", "content": "Automation"},
//!     {"id": "2", "type": "paragraph", "content": "Testing automation pipelines. Automation helps."}
//! ]}));
//!
//! let analyzer = Analyzer::new(AnalysisOptions::builder().words_per_minute(250).build());
//! let report = analyzer.report(&doc);
//! assert_eq!(report.word_count, 6);
//! assert_eq!(report.reading_time_minutes, 1);
//! assert_eq!(report.keywords[0], "automation");
//! assert_eq!(report.headings[0].anchor_id, "heading-0");
//! ```

use crate::{
    keywords::{keyword_counts, KeywordCount},
    node::Document,
    options::AnalysisOptions,
    readability::{reading_time, score_with, ReadabilityScore},
    render::render,
    seo::{audit_with, SeoAudit, SeoMeta},
    text::{count_words, extract_text_with, truncate_text},
    toc::{extract_headings, Heading},
};
use serde::{Deserialize, Serialize};

/// Everything derived from a document's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentReport {
    /// Whitespace-separated words in the extracted text.
    pub word_count: usize,

    /// Minutes to read `word_count` words, rounded up.
    #[serde(rename = "readingTime")]
    pub reading_time_minutes: usize,

    /// Most frequent long tokens, most frequent first.
    pub keywords: Vec<String>,

    pub headings: Vec<Heading>,

    pub readability: ReadabilityScore,

    /// Plain-text summary cut at a word boundary.
    pub excerpt: String,
}

/// Analyze a document with default options.
pub fn analyze(doc: &Document) -> ContentReport {
    Analyzer::default().report(doc)
}

/// A configured analysis pipeline.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    options: AnalysisOptions,
}

impl Analyzer {
    pub fn new(options: AnalysisOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Capped plain text, using the configured [`TextPolicy`](crate::TextPolicy).
    pub fn text(&self, doc: &Document) -> String {
        extract_text_with(doc, &self.options)
    }

    pub fn render(&self, doc: &Document) -> String {
        render(doc)
    }

    pub fn headings(&self, doc: &Document) -> Vec<Heading> {
        extract_headings(doc)
    }

    /// Left indentation of a TOC entry using the configured unit.
    pub fn toc_indent(&self, heading: &Heading) -> u32 {
        heading.indent(self.options.toc_indent_unit)
    }

    pub fn keywords(&self, doc: &Document) -> Vec<KeywordCount> {
        keyword_counts(&self.text(doc), &self.options)
    }

    pub fn readability(&self, doc: &Document) -> ReadabilityScore {
        score_with(&self.text(doc), &self.options)
    }

    pub fn excerpt(&self, doc: &Document) -> String {
        truncate_text(&self.text(doc), self.options.excerpt_length)
    }

    pub fn audit(&self, meta: &SeoMeta, content: Option<&Document>) -> SeoAudit {
        audit_with(meta, content, &self.options)
    }

    /// Build the full [`ContentReport`], extracting text only once.
    pub fn report(&self, doc: &Document) -> ContentReport {
        let text = self.text(doc);
        let word_count = count_words(&text);
        tracing::debug!("Analyzing document: {} words", word_count);

        ContentReport {
            word_count,
            reading_time_minutes: reading_time(word_count, self.options.words_per_minute),
            keywords: keyword_counts(&text, &self.options)
                .into_iter()
                .map(|k| k.keyword)
                .collect(),
            headings: extract_headings(doc),
            readability: score_with(&text, &self.options),
            excerpt: truncate_text(&text, self.options.excerpt_length),
        }
    }
}
