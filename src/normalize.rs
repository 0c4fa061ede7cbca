//! Conversion of stored post content into a canonical [`Document`].
//!
//! Post bodies have been persisted in two incompatible shapes over time:
//!
//! - the **legacy block list**: `{"blocks": [{"id", "type", "content", "metadata"}], "version"}`
//!   where `type` is a string tag such as `"heading2"` or `"bulleted-list"`;
//! - the **rich tree**: `{"type": "doc", "content": [node, ...]}` where each
//!   node is `{"type", "attrs"?, "content"?, "text"?, "marks"?}`.
//!
//! Some rows also hold a bare string. [`normalize`] accepts all of these and
//! never fails: anything it cannot make sense of becomes an empty document.
//! [`try_normalize`] and [`parse_content`] are the strict variants for callers
//! that want to know why.
//!
//! ## Example
//!
//! ```rust
//! use blogdoc::{normalize, Node};
//! use serde_json::json;
//!
//! let legacy = json!({
//!     "version": "1.0",
//!     "blocks": [{"id": "1", "type": "heading2", "content": "Setup"}]
//! });
//! let doc = normalize(&legacy);
//! assert_eq!(doc.nodes, vec![Node::heading(2, "Setup")]);
//!
//! // The canonical shape normalizes to itself.
//! assert_eq!(normalize(&doc.to_value()), doc);
//! ```

use crate::{
    constants::REGEXPS,
    error::{ContentError, Result},
    node::{Document, HeadingLevel, Image, Node, TableCell, TextStyle, DEFAULT_VERSION},
};
use scraper::Html;
use serde_json::{Map, Value};
use std::str::FromStr;

/// Nesting depth beyond which rich-tree subtrees are dropped.
pub const MAX_DEPTH: usize = 256;

/// Normalize any stored content value into a [`Document`].
///
/// Detection order: an object with a `blocks` array is legacy content, an
/// object with a `content` array is a rich tree, a string goes through
/// [`normalize_str`], and everything else (including `null`) yields an empty
/// document.
pub fn normalize(raw: &Value) -> Document {
    try_normalize(raw).unwrap_or_else(|err| {
        tracing::debug!("Degrading content to an empty document: {}", err);
        Document::empty()
    })
}

/// Normalize content stored as text.
///
/// Text that looks like JSON (starts with `{` or `[`) is parsed; if parsing
/// fails the result is empty. Any other text becomes a single paragraph.
pub fn normalize_str(raw: &str) -> Document {
    parse_content(raw).unwrap_or_else(|err| {
        tracing::debug!("Degrading content to an empty document: {}", err);
        Document::empty()
    })
}

/// Strict variant of [`normalize`].
///
/// `null` is accepted as "no content". Objects without a `blocks` or
/// `content` array, arrays, numbers and booleans are rejected.
pub fn try_normalize(raw: &Value) -> Result<Document> {
    match raw {
        Value::Object(map) => {
            let version = map
                .get("version")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_VERSION);

            if let Some(Value::Array(blocks)) = map.get("blocks") {
                return Ok(Document::new(version, legacy_blocks(blocks)));
            }
            if let Some(Value::Array(content)) = map.get("content") {
                return Ok(Document::new(version, rich_nodes(content, 0)));
            }
            Err(ContentError::UnrecognizedShape(
                "object has neither a `blocks` nor a `content` array".to_string(),
            ))
        }
        Value::String(text) => parse_content(text),
        Value::Null => Ok(Document::empty()),
        Value::Array(_) => Err(ContentError::UnrecognizedShape(
            "bare array at document root".to_string(),
        )),
        Value::Bool(_) | Value::Number(_) => Err(ContentError::UnrecognizedShape(format!(
            "scalar value `{}`",
            raw
        ))),
    }
}

/// Strict variant of [`normalize_str`].
pub fn parse_content(raw: &str) -> Result<Document> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Document::empty());
    }

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        let value: Value = serde_json::from_str(trimmed)?;
        return try_normalize(&value);
    }

    Ok(Document::new(DEFAULT_VERSION, vec![legacy_paragraph(raw)]))
}

impl FromStr for Document {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self> {
        parse_content(s)
    }
}

fn legacy_blocks(blocks: &[Value]) -> Vec<Node> {
    blocks
        .iter()
        .filter_map(|block| {
            let node = legacy_block(block);
            if node.is_none() {
                tracing::debug!("Dropping non-object legacy block: {}", block);
            }
            node
        })
        .collect()
}

fn legacy_block(block: &Value) -> Option<Node> {
    let obj = block.as_object()?;
    let kind = obj.get("type").and_then(Value::as_str).unwrap_or("");
    let content = obj.get("content").and_then(Value::as_str).unwrap_or("");
    let metadata = obj.get("metadata").and_then(Value::as_object);
    let meta_str = |key: &str| {
        metadata
            .and_then(|m| m.get(key))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    };
    let own_str = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    };

    if let Some(level) = kind
        .strip_prefix("heading")
        .and_then(|suffix| suffix.parse::<i64>().ok())
    {
        return Some(Node::Heading {
            level: HeadingLevel::new(level),
            children: text_children(content),
        });
    }

    let node = match kind {
        "paragraph" | "text" | "rawHtml" => legacy_paragraph(content),
        "heading" => {
            let level = metadata
                .and_then(|m| m.get("level"))
                .and_then(parse_level)
                .or_else(|| {
                    REGEXPS
                        .heading_tag
                        .captures(content)
                        .and_then(|caps| caps[1].parse::<i64>().ok())
                })
                .unwrap_or(1);
            let title = if content.contains('<') {
                strip_tags(content)
            } else {
                content.to_string()
            };
            Node::Heading {
                level: HeadingLevel::new(level),
                children: text_children(&title),
            }
        }
        "bulleted-list" | "bulletList" | "bullet_list" => Node::BulletList(list_items(content)),
        "numbered-list" | "numberedList" | "orderedList" | "ordered_list" => Node::OrderedList {
            start: metadata
                .and_then(|m| m.get("start"))
                .and_then(parse_start)
                .unwrap_or(1),
            items: list_items(content),
        },
        "listItem" | "list_item" => Node::ListItem(text_children(content)),
        "quote" | "blockquote" => Node::Blockquote(text_children(content)),
        "code" | "codeBlock" | "code_block" => Node::CodeBlock {
            language: meta_str("language").map(str::to_string),
            code: content.to_string(),
        },
        "image" => Node::Image(Image {
            src: meta_str("imageUrl")
                .or_else(|| own_str("src"))
                .unwrap_or_default()
                .to_string(),
            alt: meta_str("altText")
                .or_else(|| own_str("alt"))
                .unwrap_or_default()
                .to_string(),
            title: meta_str("title").or_else(|| own_str("title")).map(str::to_string),
            caption: meta_str("caption")
                .or_else(|| own_str("caption"))
                .map(str::to_string),
        }),
        "video" | "youtube" => Node::Video {
            src: meta_str("videoUrl")
                .or_else(|| own_str("src"))
                .unwrap_or_default()
                .to_string(),
        },
        "table" => Node::Table(
            metadata
                .and_then(|m| m.get("rows"))
                .and_then(Value::as_array)
                .map(|rows| table_rows(rows, 0))
                .unwrap_or_default(),
        ),
        "divider" | "horizontalRule" | "horizontal_rule" => Node::HorizontalRule,
        "hardBreak" | "hard_break" => Node::HardBreak,
        "link" => Node::Link {
            href: meta_str("href")
                .or_else(|| own_str("href"))
                .unwrap_or_default()
                .to_string(),
            target: meta_str("target").map(str::to_string),
            children: text_children(content),
        },
        other => match TextStyle::from_kind(other) {
            Some(style) => Node::Styled {
                style,
                children: text_children(content),
            },
            None => Node::Unknown {
                kind: other.to_string(),
                children: text_children(content),
            },
        },
    };

    Some(node)
}

/// A legacy paragraph. Content containing `<` was stored as markup by the
/// old editor and is kept verbatim.
fn legacy_paragraph(content: &str) -> Node {
    if content.contains('<') {
        Node::Paragraph(vec![Node::RawHtml(content.to_string())])
    } else {
        Node::Paragraph(text_children(content))
    }
}

fn text_children(content: &str) -> Vec<Node> {
    if content.is_empty() {
        Vec::new()
    } else {
        vec![Node::Text(content.to_string())]
    }
}

fn list_items(content: &str) -> Vec<Node> {
    content
        .split('\n')
        .map(|line| Node::ListItem(text_children(line)))
        .collect()
}

/// Text content of an HTML fragment.
pub(crate) fn strip_tags(html: &str) -> String {
    Html::parse_fragment(html)
        .root_element()
        .text()
        .collect::<String>()
}

fn parse_level(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<i64>().ok()))
}

fn parse_start(value: &Value) -> Option<u32> {
    parse_level(value).map(|start| start.clamp(0, u32::MAX as i64) as u32)
}

fn rich_nodes(values: &[Value], depth: usize) -> Vec<Node> {
    if depth >= MAX_DEPTH {
        tracing::debug!(
            "Dropping {} nodes nested deeper than {}",
            values.len(),
            MAX_DEPTH
        );
        return Vec::new();
    }
    values
        .iter()
        .filter_map(|value| rich_node(value, depth))
        .collect()
}

fn rich_children(obj: &Map<String, Value>, depth: usize) -> Vec<Node> {
    obj.get("content")
        .and_then(Value::as_array)
        .map(|content| rich_nodes(content, depth + 1))
        .unwrap_or_default()
}

fn rich_node(value: &Value, depth: usize) -> Option<Node> {
    let obj = match value {
        Value::Object(obj) => obj,
        Value::String(text) => return Some(Node::Text(text.clone())),
        other => {
            tracing::debug!("Dropping non-object rich-tree node: {}", other);
            return None;
        }
    };

    let kind = obj.get("type").and_then(Value::as_str).unwrap_or("");
    let attrs = obj.get("attrs").and_then(Value::as_object);
    let attr_str = |key: &str| {
        attrs
            .and_then(|a| a.get(key))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    };
    let own_text = || {
        obj.get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let node = match kind {
        "text" => text_with_marks(own_text(), obj.get("marks")),
        "rawHtml" => Node::RawHtml(own_text()),
        "paragraph" => Node::Paragraph(rich_children(obj, depth)),
        "heading" => Node::Heading {
            level: HeadingLevel::new(
                attrs
                    .and_then(|a| a.get("level"))
                    .and_then(parse_level)
                    .unwrap_or(1),
            ),
            children: rich_children(obj, depth),
        },
        "bulletList" | "bullet_list" => Node::BulletList(rich_children(obj, depth)),
        "orderedList" | "ordered_list" => Node::OrderedList {
            start: attrs
                .and_then(|a| a.get("start"))
                .and_then(parse_start)
                .unwrap_or(1),
            items: rich_children(obj, depth),
        },
        "listItem" | "list_item" => Node::ListItem(rich_children(obj, depth)),
        "blockquote" => Node::Blockquote(rich_children(obj, depth)),
        "codeBlock" | "code_block" => Node::CodeBlock {
            language: attr_str("language").map(str::to_string),
            code: code_block_text(obj),
        },
        "code" => Node::Code(own_text()),
        "image" => Node::Image(Image {
            src: attr_str("src").unwrap_or_default().to_string(),
            alt: attr_str("alt").unwrap_or_default().to_string(),
            title: attr_str("title").map(str::to_string),
            caption: attr_str("caption").map(str::to_string),
        }),
        "video" | "youtube" => Node::Video {
            src: attr_str("src").unwrap_or_default().to_string(),
        },
        "link" => Node::Link {
            href: attr_str("href").unwrap_or_default().to_string(),
            target: attr_str("target").map(str::to_string),
            children: rich_children(obj, depth),
        },
        "table" => Node::Table(
            obj.get("content")
                .and_then(Value::as_array)
                .map(|rows| table_rows(rows, depth + 1))
                .unwrap_or_default(),
        ),
        "horizontalRule" | "horizontal_rule" => Node::HorizontalRule,
        "hardBreak" | "hard_break" => Node::HardBreak,
        other => match TextStyle::from_kind(other) {
            Some(style) => Node::Styled {
                style,
                children: rich_children(obj, depth),
            },
            None => Node::Unknown {
                kind: other.to_string(),
                children: rich_children(obj, depth),
            },
        },
    };

    Some(node)
}

/// Expand rich-tree text marks into wrapper nodes, first mark outermost.
fn text_with_marks(text: String, marks: Option<&Value>) -> Node {
    let marks: &[Value] = marks
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut node = if marks.iter().any(|mark| mark_kind(mark) == "code") {
        Node::Code(text)
    } else {
        Node::Text(text)
    };

    for mark in marks.iter().rev() {
        let kind = mark_kind(mark);
        if let Some(style) = TextStyle::from_kind(kind) {
            node = Node::Styled {
                style,
                children: vec![node],
            };
        } else if kind == "link" {
            let attr = |key: &str| {
                mark.get("attrs")
                    .and_then(|a| a.get(key))
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
            };
            node = Node::Link {
                href: attr("href").unwrap_or_default().to_string(),
                target: attr("target").map(str::to_string),
                children: vec![node],
            };
        }
    }

    node
}

fn mark_kind(mark: &Value) -> &str {
    mark.get("type").and_then(Value::as_str).unwrap_or("")
}

/// Code block text is either a plain string or an array of text nodes.
fn code_block_text(obj: &Map<String, Value>) -> String {
    match obj.get("content") {
        Some(Value::String(code)) => code.clone(),
        Some(Value::Array(parts)) => parts
            .iter()
            .filter_map(|part| match part {
                Value::String(text) => Some(text.as_str()),
                other => other.get("text").and_then(Value::as_str),
            })
            .collect(),
        _ => String::new(),
    }
}

/// Table rows from either `string[][]` (legacy metadata) or rich-tree
/// `tableRow`/`tableCell` objects.
fn table_rows(rows: &[Value], depth: usize) -> Vec<Vec<TableCell>> {
    rows.iter()
        .filter_map(|row| {
            let cells = match row {
                Value::Array(cells) => cells,
                Value::Object(obj) => obj.get("content").and_then(Value::as_array)?,
                other => {
                    tracing::debug!("Dropping malformed table row: {}", other);
                    return None;
                }
            };
            Some(cells.iter().map(|cell| table_cell(cell, depth)).collect())
        })
        .collect()
}

fn table_cell(cell: &Value, depth: usize) -> TableCell {
    match cell {
        Value::String(text) => TableCell::text(text.as_str()),
        Value::Array(nodes) => TableCell::new(rich_nodes(nodes, depth + 1)),
        Value::Object(obj) => TableCell::new(rich_children(obj, depth)),
        other => {
            tracing::debug!("Degrading malformed table cell to empty: {}", other);
            TableCell::default()
        }
    }
}
