//! # blogdoc
//!
//! Canonical document model, HTML renderer and content analysis for blog posts.
//!
//! ## Overview
//!
//! Post bodies arrive in several historical shapes: a flat list of legacy
//! editor blocks, a rich editor node tree, a JSON string wrapping either of
//! those, or a bare string of text or HTML. blogdoc folds every shape into one
//! [`Document`] and derives everything else from that single model.
//!
//! ## Key Features
//!
//! - **Normalization**: Lenient, total conversion of any stored shape into a [`Document`]
//! - **Rendering**: Escaped, deterministic HTML with stable heading anchors
//! - **Text Extraction**: Prose-only plain text with a configurable [`TextPolicy`]
//! - **Readability**: Grade-level score, difficulty band and reading time
//! - **Table of Contents**: Flat heading list whose anchors match the renderer
//! - **Keywords**: Frequency-ranked long tokens
//! - **SEO Audit**: Rule table over post metadata and content
//!
//! ## Basic Usage
//!
//! ```rust
//! use blogdoc::{analyze, normalize, render};
//! use serde_json::json;
//!
//! let raw = json!({"blocks": [
//!     {"id": "1", "type": "heading2", "content": "Getting started"},
//!     {"id": "2", "type": "paragraph", "content": "Install the toolchain first."}
//! ]});
//!
//! let doc = normalize(&raw);
//! let html = render(&doc);
//! assert!(html.contains(r#"id="heading-0""#));
//!
//! let report = analyze(&doc);
//! assert_eq!(report.headings[0].title, "Getting started");
//! assert_eq!(report.word_count, 6);
//! ```
//!
//! ## Custom Options
//!
//! ```rust
//! use blogdoc::{AnalysisOptions, Analyzer, TextPolicy};
//!
//! let options = AnalysisOptions::builder()
//!     .text_policy(TextPolicy::INCLUDE_TABLES | TextPolicy::INCLUDE_CODE_BLOCKS)
//!     .words_per_minute(250)
//!     .build();
//!
//! let analyzer = Analyzer::new(options);
//! ```
//!
//! ## Error Handling
//!
//! [`normalize`] never fails. Callers that need to know whether input was
//! understood use the strict entry points:
//!
//! ```rust
//! use blogdoc::{parse_content, ContentError};
//!
//! match parse_content("[1, 2, 3]") {
//!     Ok(doc) => println!("{} nodes", doc.nodes.len()),
//!     Err(ContentError::UnrecognizedShape(shape)) => eprintln!("unrecognized: {}", shape),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! ## Logging
//!
//! Degraded input (unparseable JSON, dropped blocks, rejected URLs) is reported
//! through `tracing` at `debug` and `trace` level. No subscriber is installed.

mod analysis;
mod constants;
mod error;
mod keywords;
mod node;
mod normalize;
mod options;
mod readability;
mod render;
mod seo;
mod text;
mod toc;

// Public exports
pub use analysis::{analyze, Analyzer, ContentReport};
pub use error::{ContentError, Result};
pub use keywords::{extract_keywords, keyword_counts, KeywordCount};
pub use node::{Document, HeadingLevel, Image, Node, TableCell, TextStyle, Walk, DEFAULT_VERSION};
pub use normalize::{normalize, normalize_str, parse_content, try_normalize, MAX_DEPTH};
pub use options::{AnalysisOptions, AnalysisOptionsBuilder, TextPolicy};
pub use readability::{reading_time, score, score_with, ReadabilityGrade, ReadabilityScore};
pub use render::{escape_html, heading_anchor, render, render_str, render_value};
pub use seo::{
    audit, audit_with, generate_slug, image_checklist, validate_slug, ImageCheck, ImageReport,
    SeoAudit, SeoMeta,
};
pub use text::{count_words, excerpt, extract_text, extract_text_with, nodes_text};
pub use toc::{extract_headings, has_headings, toc_indent, Heading};
