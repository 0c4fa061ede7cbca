//! Table-of-contents extraction.
//!
//! Headings are collected in the same pre-order the renderer uses, so the
//! `anchor_id` of the n-th entry always matches the `id` of the n-th
//! rendered heading. The list is flat; nesting in a rendered TOC is purely
//! visual indentation derived from the level.

use crate::{
    node::{Document, Node},
    options::TextPolicy,
    render::heading_anchor,
    text::nodes_text,
};
use serde::{Deserialize, Serialize};

/// One table-of-contents entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Heading {
    /// Heading level, always within `1..=6`.
    pub level: u8,
    pub title: String,
    pub anchor_id: String,
}

impl Heading {
    /// Left indentation for this entry, in units of `unit`.
    pub fn indent(&self, unit: u32) -> u32 {
        toc_indent(self.level, unit)
    }
}

/// `(level - 2) * unit`, floored at zero: `h1` and `h2` sit flush left.
pub fn toc_indent(level: u8, unit: u32) -> u32 {
    u32::from(level.saturating_sub(2)) * unit
}

/// Every heading in the document, in document order.
pub fn extract_headings(doc: &Document) -> Vec<Heading> {
    doc.walk()
        .filter_map(|node| match node {
            Node::Heading { level, children } => Some((level.get(), children)),
            _ => None,
        })
        .enumerate()
        .map(|(index, (level, children))| Heading {
            level,
            title: nodes_text(children, TextPolicy::empty()),
            anchor_id: heading_anchor(index),
        })
        .collect()
}

/// Whether the document contains at least one heading.
pub fn has_headings(doc: &Document) -> bool {
    doc.walk().any(|node| matches!(node, Node::Heading { .. }))
}
