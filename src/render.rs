//! HTML rendering of a document.
//!
//! Each node kind maps to one self-contained, styled fragment. Text and
//! attribute values are escaped; URLs are checked before they reach an
//! `href` or `src`.
//!
//! ## Legacy markup
//!
//! Paragraphs saved by the old block editor may already contain markup
//! (any content with a `<`). The normalizer stores that content as
//! [`Node::RawHtml`], and this renderer embeds it **unescaped**. Existing
//! posts rely on it to display pre-formatted HTML. Content that reaches the
//! legacy block shape or the `rawHtml` node kind must therefore come from a
//! trusted author; everything else is escaped.
//!
//! ## Example
//!
//! ```rust
//! use blogdoc::{render_value};
//! use serde_json::json;
//!
//! let html = render_value(&json!({"content": [
//!     {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "A < B"}]}
//! ]}));
//! assert_eq!(html, r#"<h2 id="heading-0" class="text-3xl font-bold mb-4 mt-6">A &lt; B</h2>"#);
//! ```

use crate::{
    node::{Document, Image, Node, TextStyle},
    normalize::{normalize, normalize_str},
};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt::Write;
use url::Url;

const HEADING_STYLES: [&str; 6] = [
    "text-4xl font-bold mb-6 mt-8",
    "text-3xl font-bold mb-4 mt-6",
    "text-2xl font-bold mb-3 mt-5",
    "text-xl font-bold mb-2 mt-4",
    "text-lg font-bold mb-2 mt-3",
    "text-base font-bold mb-2 mt-2",
];

const IMAGE_PLACEHOLDER: &str = "/placeholder.svg";

enum Op<'a> {
    Visit(&'a Node),
    Emit(Cow<'static, str>),
}

/// Render a document to HTML.
pub fn render(doc: &Document) -> String {
    Renderer::new(&doc.nodes).run()
}

/// Normalize a stored content value and render it. Never fails; content
/// that cannot be understood renders as an empty string.
pub fn render_value(raw: &Value) -> String {
    render(&normalize(raw))
}

/// Normalize content stored as text and render it.
pub fn render_str(raw: &str) -> String {
    render(&normalize_str(raw))
}

/// The anchor id assigned to the `index`-th heading in document order.
pub fn heading_anchor(index: usize) -> String {
    format!("heading-{}", index)
}

/// Escape the five HTML-special characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text);
    out
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
}

/// Accept relative URLs and absolute `http(s)` URLs (plus `mailto` for
/// links). Anything else, `javascript:` included, is rejected.
fn safe_url(raw: &str, allow_mailto: bool) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    match Url::parse(trimmed) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Some(trimmed),
            "mailto" if allow_mailto => Some(trimmed),
            scheme => {
                tracing::debug!("Rejecting URL with scheme `{}`: {}", scheme, trimmed);
                None
            }
        },
        Err(url::ParseError::RelativeUrlWithoutBase) => Some(trimmed),
        Err(e) => {
            tracing::debug!("Rejecting unparseable URL {}: {}", trimmed, e);
            None
        }
    }
}

struct Renderer<'a> {
    out: String,
    stack: Vec<Op<'a>>,
    headings: usize,
}

impl<'a> Renderer<'a> {
    fn new(nodes: &'a [Node]) -> Self {
        Self {
            out: String::with_capacity(4096),
            stack: nodes.iter().rev().map(Op::Visit).collect(),
            headings: 0,
        }
    }

    fn run(mut self) -> String {
        while let Some(op) = self.stack.pop() {
            match op {
                Op::Emit(markup) => self.out.push_str(&markup),
                Op::Visit(node) => self.visit(node),
            }
        }
        self.out
    }

    /// Write an opening tag, then schedule the children and the closing tag.
    fn open(&mut self, open: &str, children: &'a [Node], close: impl Into<Cow<'static, str>>) {
        self.out.push_str(open);
        self.stack.push(Op::Emit(close.into()));
        self.stack.extend(children.iter().rev().map(Op::Visit));
    }

    fn visit(&mut self, node: &'a Node) {
        match node {
            Node::Text(text) => escape_into(&mut self.out, text),
            Node::RawHtml(html) => self.out.push_str(html),
            Node::Paragraph(children) => {
                self.open(r#"<p class="mb-4 leading-7">"#, children, "</p>")
            }
            Node::Heading { level, children } => {
                let n = level.get();
                let anchor = heading_anchor(self.headings);
                self.headings += 1;
                let _ = write!(
                    self.out,
                    r#"<h{} id="{}" class="{}">"#,
                    n,
                    anchor,
                    HEADING_STYLES[usize::from(n) - 1]
                );
                self.open("", children, format!("</h{}>", n));
            }
            Node::BulletList(items) => self.open(
                r#"<ul class="list-disc list-inside mb-4 space-y-1">"#,
                items,
                "</ul>",
            ),
            Node::OrderedList { start, items } => {
                if *start == 1 {
                    self.out
                        .push_str(r#"<ol class="list-decimal list-inside mb-4 space-y-1">"#);
                } else {
                    let _ = write!(
                        self.out,
                        r#"<ol start="{}" class="list-decimal list-inside mb-4 space-y-1">"#,
                        start
                    );
                }
                self.open("", items, "</ol>");
            }
            Node::ListItem(children) => self.open(r#"<li class="mb-1">"#, children, "</li>"),
            Node::Blockquote(children) => self.open(
                r#"<blockquote class="border-l-4 border-primary pl-4 italic my-4 text-muted-foreground bg-muted/50 p-4 rounded-r-lg">"#,
                children,
                "</blockquote>",
            ),
            Node::Code(code) => {
                self.out
                    .push_str(r#"<code class="bg-muted px-1 py-0.5 rounded text-sm font-mono">"#);
                escape_into(&mut self.out, code);
                self.out.push_str("</code>");
            }
            Node::CodeBlock { language, code } => {
                self.out.push_str(
                    r#"<pre class="bg-muted p-4 rounded-lg overflow-x-auto mb-4 border border-border"><code class="font-mono text-sm"#,
                );
                if let Some(language) = language {
                    self.out.push_str(" language-");
                    escape_into(&mut self.out, language);
                }
                self.out.push_str(r#"">"#);
                escape_into(&mut self.out, code);
                self.out.push_str("</code></pre>");
            }
            Node::Styled { style, children } => {
                let (open, close) = match style {
                    TextStyle::Bold => (r#"<strong class="font-semibold">"#, "</strong>"),
                    TextStyle::Italic => (r#"<em class="italic">"#, "</em>"),
                    TextStyle::Underline => (r#"<u class="underline">"#, "</u>"),
                    TextStyle::Strike => (r#"<s class="line-through">"#, "</s>"),
                };
                self.open(open, children, close);
            }
            Node::Image(image) => self.image(image),
            Node::Video { src } => match safe_url(src, false) {
                Some(src) => {
                    self.out.push_str(
                        r#"<div class="my-6 aspect-video rounded-lg overflow-hidden bg-muted"><iframe src=""#,
                    );
                    escape_into(&mut self.out, src);
                    self.out.push_str(
                        r#"" title="Embedded video" class="w-full h-full" allowfullscreen loading="lazy"></iframe></div>"#,
                    );
                }
                None => tracing::debug!("Skipping video without a usable source"),
            },
            Node::Link {
                href,
                target,
                children,
            } => {
                let href = safe_url(href, true).unwrap_or("#");
                let target = target.as_deref().unwrap_or("_self");
                self.out.push_str(r#"<a href=""#);
                escape_into(&mut self.out, href);
                self.out.push_str(r#"" target=""#);
                escape_into(&mut self.out, target);
                self.out.push('"');
                if target == "_blank" {
                    self.out.push_str(r#" rel="noopener noreferrer""#);
                }
                self.open(
                    r#" class="text-primary hover:underline font-medium">"#,
                    children,
                    "</a>",
                );
            }
            Node::Table(rows) => {
                self.out.push_str(
                    r#"<div class="overflow-x-auto my-6 border border-border rounded-lg"><table class="w-full border-collapse border border-border"><tbody>"#,
                );
                let mut ops = Vec::new();
                for (i, row) in rows.iter().enumerate() {
                    ops.push(Op::Emit(Cow::Borrowed(if i == 0 {
                        r#"<tr class="bg-muted">"#
                    } else {
                        "<tr>"
                    })));
                    for cell in row {
                        ops.push(Op::Emit(Cow::Borrowed(
                            r#"<td class="border border-border px-4 py-2">"#,
                        )));
                        ops.extend(cell.content.iter().map(Op::Visit));
                        ops.push(Op::Emit(Cow::Borrowed("</td>")));
                    }
                    ops.push(Op::Emit(Cow::Borrowed("</tr>")));
                }
                ops.push(Op::Emit(Cow::Borrowed("</tbody></table></div>")));
                self.stack.extend(ops.into_iter().rev());
            }
            Node::HorizontalRule => self.out.push_str(r#"<hr class="my-6 border-border">"#),
            Node::HardBreak => self.out.push_str("<br>"),
            Node::Unknown { children, .. } => {
                self.stack.extend(children.iter().rev().map(Op::Visit));
            }
        }
    }

    fn image(&mut self, image: &Image) {
        let src = safe_url(&image.src, false).unwrap_or(IMAGE_PLACEHOLDER);
        let alt = if image.alt.is_empty() {
            "Image"
        } else {
            image.alt.as_str()
        };

        self.out.push_str(r#"<figure class="my-6"><img src=""#);
        escape_into(&mut self.out, src);
        self.out.push_str(r#"" alt=""#);
        escape_into(&mut self.out, alt);
        self.out.push('"');
        if let Some(title) = &image.title {
            self.out.push_str(r#" title=""#);
            escape_into(&mut self.out, title);
            self.out.push('"');
        }
        self.out
            .push_str(r#" class="w-full rounded-lg shadow-md" loading="lazy">"#);
        if let Some(caption) = image.caption.as_ref().or(image.title.as_ref()) {
            self.out
                .push_str(r#"<figcaption class="text-sm text-muted-foreground text-center mt-2">"#);
            escape_into(&mut self.out, caption);
            self.out.push_str("</figcaption>");
        }
        self.out.push_str("</figure>");
    }
}
