//! The canonical in-memory content model.
//!
//! A post body is a [`Document`]: a version tag plus an ordered list of root
//! [`Node`]s. Every node kind is a variant of one enum, so each consumer
//! (renderer, text extractor, TOC walker) matches exhaustively and a new kind
//! cannot be added without deciding its behavior everywhere.
//!
//! ## Serialization
//!
//! The canonical serialized shape is the rich tree:
//!
//! ```json
//! {"type": "doc", "version": "1.0", "content": [
//!   {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Intro"}]}
//! ]}
//! ```
//!
//! Feeding that value back through [`normalize`](crate::normalize) yields the
//! same document.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Map, Value};

/// Version tag assigned to documents that carry none.
pub const DEFAULT_VERSION: &str = "1.0";

/// A heading level, always within `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", from = "i64")]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    /// Clamp an arbitrary level into `1..=6`.
    pub fn new(level: i64) -> Self {
        Self(level.clamp(1, 6) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for HeadingLevel {
    fn default() -> Self {
        Self(1)
    }
}

impl From<i64> for HeadingLevel {
    fn from(level: i64) -> Self {
        Self::new(level)
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> u8 {
        level.0
    }
}

/// Inline emphasis applied to a run of nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextStyle {
    Bold,
    Italic,
    Underline,
    Strike,
}

impl TextStyle {
    /// Rich-tree `type` tag.
    pub fn kind(self) -> &'static str {
        match self {
            TextStyle::Bold => "bold",
            TextStyle::Italic => "italic",
            TextStyle::Underline => "underline",
            TextStyle::Strike => "strike",
        }
    }

    /// Parse a rich-tree node type or mark name.
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "bold" | "strong" => Some(TextStyle::Bold),
            "italic" | "em" => Some(TextStyle::Italic),
            "underline" => Some(TextStyle::Underline),
            "strike" | "strikethrough" => Some(TextStyle::Strike),
            _ => None,
        }
    }
}

/// Image attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    pub src: String,
    /// Empty when the source had no alt text.
    pub alt: String,
    pub title: Option<String>,
    pub caption: Option<String>,
}

/// One table cell: a sequence of nodes. String cells hold a single text node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCell {
    pub content: Vec<Node>,
}

impl TableCell {
    pub fn new(content: Vec<Node>) -> Self {
        Self { content }
    }

    /// A cell holding plain text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Node::Text(text.into())],
        }
    }
}

/// A single element of a document tree.
///
/// Children are owned exclusively by their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text.
    Text(String),

    /// Markup stored by the legacy editor and embedded without escaping.
    RawHtml(String),

    Paragraph(Vec<Node>),

    Heading {
        level: HeadingLevel,
        children: Vec<Node>,
    },

    BulletList(Vec<Node>),

    OrderedList {
        start: u32,
        items: Vec<Node>,
    },

    ListItem(Vec<Node>),

    Blockquote(Vec<Node>),

    /// Inline code span.
    Code(String),

    CodeBlock {
        language: Option<String>,
        code: String,
    },

    Styled {
        style: TextStyle,
        children: Vec<Node>,
    },

    Image(Image),

    /// Opaque embed URL.
    Video {
        src: String,
    },

    Link {
        href: String,
        target: Option<String>,
        children: Vec<Node>,
    },

    /// Rows of cells; the first row is the header row by position.
    Table(Vec<Vec<TableCell>>),

    HorizontalRule,

    HardBreak,

    /// A kind this crate does not know. Its children are still visited;
    /// it contributes no markup or text of its own.
    Unknown {
        kind: String,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Node::Paragraph(vec![Node::Text(text.into())])
    }

    pub fn heading(level: i64, text: impl Into<String>) -> Self {
        Node::Heading {
            level: HeadingLevel::new(level),
            children: vec![Node::Text(text.into())],
        }
    }

    /// The rich-tree `type` tag of this node.
    pub fn kind(&self) -> &str {
        match self {
            Node::Text(_) => "text",
            Node::RawHtml(_) => "rawHtml",
            Node::Paragraph(_) => "paragraph",
            Node::Heading { .. } => "heading",
            Node::BulletList(_) => "bulletList",
            Node::OrderedList { .. } => "orderedList",
            Node::ListItem(_) => "listItem",
            Node::Blockquote(_) => "blockquote",
            Node::Code(_) => "code",
            Node::CodeBlock { .. } => "codeBlock",
            Node::Styled { style, .. } => style.kind(),
            Node::Image(_) => "image",
            Node::Video { .. } => "video",
            Node::Link { .. } => "link",
            Node::Table(_) => "table",
            Node::HorizontalRule => "horizontalRule",
            Node::HardBreak => "hardBreak",
            Node::Unknown { kind, .. } => kind,
        }
    }

    /// Child nodes. Empty for terminal kinds and for tables, whose content
    /// lives in cells.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Paragraph(children)
            | Node::BulletList(children)
            | Node::ListItem(children)
            | Node::Blockquote(children)
            | Node::Heading { children, .. }
            | Node::OrderedList {
                items: children, ..
            }
            | Node::Styled { children, .. }
            | Node::Link { children, .. }
            | Node::Unknown { children, .. } => children,
            Node::Text(_)
            | Node::RawHtml(_)
            | Node::Code(_)
            | Node::CodeBlock { .. }
            | Node::Image(_)
            | Node::Video { .. }
            | Node::Table(_)
            | Node::HorizontalRule
            | Node::HardBreak => &[],
        }
    }

    /// Whether this node starts a new block of prose.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Node::Paragraph(_)
                | Node::Heading { .. }
                | Node::BulletList(_)
                | Node::OrderedList { .. }
                | Node::ListItem(_)
                | Node::Blockquote(_)
                | Node::CodeBlock { .. }
                | Node::Image(_)
                | Node::Video { .. }
                | Node::Table(_)
                | Node::HorizontalRule
                | Node::RawHtml(_)
        )
    }

    /// Depth-first pre-order traversal of this node and its descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Convert to the canonical rich-tree JSON shape.
    pub fn to_value(&self) -> Value {
        match self {
            Node::Text(text) => json!({ "type": "text", "text": text }),
            Node::RawHtml(html) => json!({ "type": "rawHtml", "text": html }),
            Node::Code(code) => json!({ "type": "code", "text": code }),
            Node::CodeBlock { language, code } => {
                let content = if code.is_empty() {
                    vec![]
                } else {
                    vec![json!({ "type": "text", "text": code })]
                };
                json!({
                    "type": "codeBlock",
                    "attrs": { "language": language },
                    "content": content,
                })
            }
            Node::Heading { level, children } => json!({
                "type": "heading",
                "attrs": { "level": level.get() },
                "content": nodes_to_values(children),
            }),
            Node::OrderedList { start, items } => json!({
                "type": "orderedList",
                "attrs": { "start": start },
                "content": nodes_to_values(items),
            }),
            Node::Image(image) => {
                let mut attrs = Map::new();
                attrs.insert("src".into(), json!(image.src));
                attrs.insert("alt".into(), json!(image.alt));
                if let Some(title) = &image.title {
                    attrs.insert("title".into(), json!(title));
                }
                if let Some(caption) = &image.caption {
                    attrs.insert("caption".into(), json!(caption));
                }
                json!({ "type": "image", "attrs": attrs })
            }
            Node::Video { src } => json!({ "type": "video", "attrs": { "src": src } }),
            Node::Link {
                href,
                target,
                children,
            } => json!({
                "type": "link",
                "attrs": { "href": href, "target": target },
                "content": nodes_to_values(children),
            }),
            Node::Table(rows) => {
                let rows: Vec<Value> = rows
                    .iter()
                    .map(|row| {
                        let cells: Vec<Value> = row
                            .iter()
                            .map(|cell| {
                                json!({
                                    "type": "tableCell",
                                    "content": nodes_to_values(&cell.content),
                                })
                            })
                            .collect();
                        json!({ "type": "tableRow", "content": cells })
                    })
                    .collect();
                json!({ "type": "table", "content": rows })
            }
            Node::HorizontalRule | Node::HardBreak => json!({ "type": self.kind() }),
            Node::Paragraph(children)
            | Node::BulletList(children)
            | Node::ListItem(children)
            | Node::Blockquote(children)
            | Node::Styled { children, .. }
            | Node::Unknown { children, .. } => json!({
                "type": self.kind(),
                "content": nodes_to_values(children),
            }),
        }
    }
}

fn nodes_to_values(nodes: &[Node]) -> Vec<Value> {
    nodes.iter().map(Node::to_value).collect()
}

/// Pre-order iterator over a subtree, driven by an explicit stack.
///
/// Table cells are visited row by row, left to right.
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self.stack.pop()?;
        match node {
            Node::Table(rows) => {
                for cell in rows.iter().flatten().rev() {
                    self.stack.extend(cell.content.iter().rev());
                }
            }
            _ => self.stack.extend(node.children().iter().rev()),
        }
        Some(node)
    }
}

/// A normalized post body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Format tag carried over from the source (`"1.0"` for legacy content).
    pub version: String,
    /// Root-level nodes, in order.
    pub nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

impl Document {
    pub fn new(version: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            version: version.into(),
            nodes,
        }
    }

    /// A document with no nodes.
    pub fn empty() -> Self {
        Self::new(DEFAULT_VERSION, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first pre-order traversal of every node in the document.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.nodes.iter().rev().collect(),
        }
    }

    /// Convert to the canonical rich-tree JSON shape.
    pub fn to_value(&self) -> Value {
        json!({
            "type": "doc",
            "version": self.version,
            "content": nodes_to_values(&self.nodes),
        })
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_level_is_clamped() {
        assert_eq!(HeadingLevel::new(9).get(), 6);
        assert_eq!(HeadingLevel::new(0).get(), 1);
        assert_eq!(HeadingLevel::new(-4).get(), 1);
        assert_eq!(HeadingLevel::new(3).get(), 3);
    }

    #[test]
    fn heading_level_deserializes_clamped() {
        let level: HeadingLevel = serde_json::from_str("12").unwrap();
        assert_eq!(level.get(), 6);
        assert_eq!(serde_json::to_string(&level).unwrap(), "6");
    }

    #[test]
    fn walk_is_pre_order_and_enters_table_cells() {
        let doc = Document::new(
            DEFAULT_VERSION,
            vec![
                Node::heading(2, "A"),
                Node::Table(vec![vec![TableCell::new(vec![Node::heading(3, "B")])]]),
                Node::Blockquote(vec![Node::heading(2, "C")]),
            ],
        );

        let kinds: Vec<&str> = doc.walk().map(Node::kind).collect();
        assert_eq!(
            kinds,
            vec![
                "heading",
                "text",
                "table",
                "heading",
                "text",
                "blockquote",
                "heading",
                "text"
            ]
        );
    }

    #[test]
    fn deep_nesting_walks_without_recursion() {
        let mut node = Node::text("leaf");
        for _ in 0..100_000 {
            node = Node::Blockquote(vec![node]);
        }
        assert_eq!(node.walk().count(), 100_001);

        // Unwind iteratively so dropping the tree does not recurse either.
        let mut current = Some(node);
        while let Some(Node::Blockquote(mut children)) = current.take() {
            current = children.pop();
        }
    }

    #[test]
    fn document_serializes_as_rich_tree() {
        let doc = Document::new(DEFAULT_VERSION, vec![Node::paragraph("hi")]);
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["type"], "doc");
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["content"][0]["type"], "paragraph");
        assert_eq!(value["content"][0]["content"][0]["text"], "hi");
    }
}
