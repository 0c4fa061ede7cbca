//! Plain-text projection of a document.
//!
//! Text extraction feeds every statistic in this crate, so it only collects
//! prose: text, inline code and the text of legacy markup. Tables, code
//! blocks and media contribute nothing unless the [`TextPolicy`] says so.
//! Block boundaries become single spaces so words from adjacent paragraphs
//! never run together.
//!
//! ```rust
//! use blogdoc::{count_words, extract_text, normalize};
//! use serde_json::json;
//!
//! let doc = normalize(&json!({"content": [
//!     {"type": "paragraph", "content": [{"type": "text", "text": "First."}]},
//!     {"type": "paragraph", "content": [{"type": "text", "text": "Second."}]}
//! ]}));
//! let text = extract_text(&doc);
//! assert_eq!(text, "First. Second.");
//! assert_eq!(count_words(&text), 2);
//! ```

use crate::{
    node::{Document, Node},
    normalize::strip_tags,
    options::{AnalysisOptions, TextPolicy},
};

enum Step<'a> {
    Visit(&'a Node),
    Break,
}

/// Extract prose from a document, capped at 5000 characters.
pub fn extract_text(doc: &Document) -> String {
    extract_text_with(doc, &AnalysisOptions::default())
}

/// Extract text using the policy and cap from `options`.
pub fn extract_text_with(doc: &Document, options: &AnalysisOptions) -> String {
    collect_text(&doc.nodes, options.text_policy, Some(options.max_text_length))
}

/// Uncapped text of a sequence of nodes, e.g. a heading's children.
pub fn nodes_text(nodes: &[Node], policy: TextPolicy) -> String {
    collect_text(nodes, policy, None)
}

/// Count whitespace-separated words. Blank text has zero words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// A short plain-text summary of the document, cut at a word boundary.
pub fn excerpt(doc: &Document, max_len: usize) -> String {
    truncate_text(&extract_text(doc), max_len)
}

fn collect_text(nodes: &[Node], policy: TextPolicy, limit: Option<usize>) -> String {
    let mut out = String::new();
    let mut stack: Vec<Step<'_>> = nodes.iter().rev().map(Step::Visit).collect();

    while let Some(step) = stack.pop() {
        let node = match step {
            Step::Visit(node) => node,
            Step::Break => {
                push_break(&mut out);
                continue;
            }
        };

        if node.is_block() {
            push_break(&mut out);
            stack.push(Step::Break);
        }

        match node {
            Node::Text(text) | Node::Code(text) => out.push_str(text),
            Node::RawHtml(html) => out.push_str(&strip_tags(html)),
            Node::CodeBlock { code, .. } => {
                if policy.contains(TextPolicy::INCLUDE_CODE_BLOCKS) {
                    out.push_str(code);
                }
            }
            Node::Image(image) => {
                if policy.contains(TextPolicy::INCLUDE_MEDIA_TEXT) {
                    out.push_str(&image.alt);
                    if let Some(caption) = &image.caption {
                        push_break(&mut out);
                        out.push_str(caption);
                    }
                }
            }
            Node::Table(rows) => {
                if policy.contains(TextPolicy::INCLUDE_TABLES) {
                    for cell in rows.iter().flatten().rev() {
                        stack.push(Step::Break);
                        stack.extend(cell.content.iter().rev().map(Step::Visit));
                    }
                }
            }
            Node::HardBreak => push_break(&mut out),
            Node::Video { .. } | Node::HorizontalRule => {}
            Node::Paragraph(_)
            | Node::Heading { .. }
            | Node::BulletList(_)
            | Node::OrderedList { .. }
            | Node::ListItem(_)
            | Node::Blockquote(_)
            | Node::Styled { .. }
            | Node::Link { .. }
            | Node::Unknown { .. } => {
                stack.extend(node.children().iter().rev().map(Step::Visit));
            }
        }

        // Enough collected: every char is at most four bytes.
        if let Some(limit) = limit {
            let leading = out.len() - out.trim_start().len();
            if out.len() > limit.saturating_mul(4).saturating_add(leading) {
                break;
            }
        }
    }

    let text = out.trim_start();
    match limit {
        Some(limit) if text.chars().count() > limit => {
            tracing::trace!("Truncating extracted text to {} characters", limit);
            text.chars().take(limit).collect()
        }
        _ => text.trim_end().to_string(),
    }
}

fn push_break(out: &mut String) {
    if !out.is_empty() && !out.ends_with(char::is_whitespace) {
        out.push(' ');
    }
}

/// Truncate text to a maximum length, trying to break at word boundary
pub(crate) fn truncate_text(text: &str, max_len: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_len {
        return text.to_string();
    }

    let truncated: String = text.chars().take(max_len).collect();
    if let Some(last_space_pos) = truncated.rfind(char::is_whitespace) {
        truncated[..last_space_pos].trim().to_string()
    } else {
        truncated.trim().to_string()
    }
}
