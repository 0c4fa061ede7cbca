//! Whole-pipeline properties that hold for any stored content.

use blogdoc::{
    audit, extract_headings, extract_keywords, extract_text, normalize, normalize_str, render,
    render_value, score, Document, SeoMeta,
};
use scraper::{Html, Selector};
use serde_json::{json, Value};

fn shapes() -> Vec<Value> {
    vec![
        json!({"version": "1.0", "blocks": [
            {"id": "1", "type": "heading2", "content": "Intro"},
            {"id": "2", "type": "paragraph", "content": "Some <em>legacy</em> markup."},
            {"id": "3", "type": "numbered-list", "content": "one\ntwo", "metadata": {"start": 4}},
            {"id": "4", "type": "table", "content": "", "metadata": {"rows": [["a", "b"], ["c", "d"]]}},
            {"id": "5", "type": "bold", "content": "loud"},
            {"id": "6", "type": "mystery", "content": "kept as text"}
        ]}),
        json!({"type": "doc", "content": [
            {"type": "heading", "attrs": {"level": 9}, "content": [{"type": "text", "text": "Deep"}]},
            {"type": "blockquote", "content": [{"type": "paragraph", "content": [
                {"type": "text", "text": "quoted", "marks": [{"type": "italic"}, {"type": "bold"}]}
            ]}]},
            {"type": "table", "content": [{"type": "tableRow", "content": [
                {"type": "tableCell", "content": [{"type": "paragraph", "content": [{"type": "text", "text": "cell"}]}]}
            ]}]},
            {"type": "image", "attrs": {"src": "/a.png", "alt": "A chart", "caption": "Fig. 1"}},
            {"type": "widget", "content": [{"type": "text", "text": "inner"}]}
        ]}),
        Value::String(r#"{"content": [{"type": "paragraph", "content": [{"type": "text", "text": "wrapped"}]}]}"#.into()),
        Value::String("just a sentence <with> brackets".into()),
        Value::Null,
        Value::String("{ not json".into()),
        json!([1, 2, 3]),
        json!(42),
        json!({"title": "no body"}),
    ]
}

#[test]
fn normalize_is_idempotent_for_every_shape() {
    for raw in shapes() {
        let once = normalize(&raw);
        let twice = normalize(&once.to_value());
        assert_eq!(once, twice, "not idempotent for {}", raw);
    }
}

#[test]
fn render_never_fails_and_degrades_to_empty() {
    for raw in shapes() {
        let _ = render_value(&raw);
    }
    assert_eq!(render_value(&Value::Null), "");
    assert_eq!(render_value(&json!([1, 2])), "");
    assert_eq!(render_value(&json!("{ not json")), "");
    assert!(normalize_str("").is_empty());
}

#[test]
fn extracted_text_is_capped() {
    let paragraphs: Vec<Value> = (0..500)
        .map(|i| json!({"id": i.to_string(), "type": "paragraph", "content": "lorem ipsum dolor sit amet"}))
        .collect();
    let doc = normalize(&json!({ "blocks": paragraphs }));
    let text = extract_text(&doc);
    assert_eq!(text.chars().count(), 5000);

    for raw in shapes() {
        assert!(extract_text(&normalize(&raw)).chars().count() <= 5000);
    }
}

#[test]
fn heading_levels_are_always_in_range() {
    let doc = normalize(&json!({"content": [
        {"type": "heading", "attrs": {"level": 9}},
        {"type": "heading", "attrs": {"level": 0}},
        {"type": "heading", "attrs": {"level": -1}},
        {"type": "heading", "attrs": {"level": "3"}},
        {"type": "heading"}
    ]}));
    let levels: Vec<u8> = extract_headings(&doc).iter().map(|h| h.level).collect();
    assert!(levels.iter().all(|level| (1..=6).contains(level)));
    assert_eq!(levels[..3], [6, 1, 1]);
}

#[test]
fn rendered_anchors_match_toc_entries() {
    for raw in shapes() {
        let doc = normalize(&raw);
        let html = Html::parse_fragment(&render(&doc));
        let selector = Selector::parse("h1, h2, h3, h4, h5, h6").unwrap();
        let rendered: Vec<String> = html
            .select(&selector)
            .filter_map(|h| h.value().attr("id").map(str::to_string))
            .collect();
        let toc: Vec<String> = extract_headings(&doc)
            .into_iter()
            .map(|h| h.anchor_id)
            .collect();
        assert_eq!(rendered, toc, "anchor mismatch for {}", raw);
    }
}

#[test]
fn legacy_markup_is_trusted_but_rich_text_is_escaped() {
    let legacy = render_value(&json!({"blocks": [
        {"id": "1", "type": "paragraph", "content": "<b>bold</b>"}
    ]}));
    let fragment = Html::parse_fragment(&legacy);
    assert_eq!(
        fragment.select(&Selector::parse("p > b").unwrap()).count(),
        1
    );

    let rich = render_value(&json!({"content": [
        {"type": "paragraph", "content": [{"type": "text", "text": "<b>bold</b>"}]}
    ]}));
    let fragment = Html::parse_fragment(&rich);
    assert_eq!(fragment.select(&Selector::parse("b").unwrap()).count(), 0);
    assert!(rich.contains("&lt;b&gt;bold&lt;/b&gt;"));
}

#[test]
fn unsafe_urls_never_reach_attributes() {
    let html = render_value(&json!({"content": [
        {"type": "image", "attrs": {"src": "javascript:alert(1)"}},
        {"type": "video", "attrs": {"src": "data:text/html,boom"}},
        {"type": "paragraph", "content": [
            {"type": "text", "text": "x", "marks": [{"type": "link", "attrs": {"href": "vbscript:msgbox"}}]}
        ]}
    ]}));
    let fragment = Html::parse_fragment(&html);
    let img = Selector::parse("img").unwrap();
    let link = Selector::parse("a").unwrap();
    assert_eq!(
        fragment.select(&img).next().and_then(|e| e.value().attr("src")),
        Some("/placeholder.svg")
    );
    assert_eq!(
        fragment.select(&link).next().and_then(|e| e.value().attr("href")),
        Some("#")
    );
    assert_eq!(fragment.select(&Selector::parse("iframe").unwrap()).count(), 0);
}

#[test]
fn zero_sentence_text_scores_without_artifacts() {
    let result = score("");
    assert_eq!(result.average_sentence_length, 0.0);
    assert!(result.average_word_length.is_finite());
    let json = serde_json::to_string(&result).unwrap();
    assert!(!json.contains("NaN"));
    assert!(!json.contains("null"));
}

#[test]
fn seo_audit_scenario() {
    let meta = SeoMeta {
        title: String::new(),
        description: "d".repeat(140),
        slug: "My Slug!".into(),
        image: Some("/cover.png".into()),
    };
    let result = audit(&meta, None);
    assert!(result.issues.iter().any(|i| i == "Title is required"));
    assert!(result.issues.iter().any(|i| i == "Invalid slug format"));
    assert!(result.warnings.iter().all(|w| !w.starts_with("Description")));
    assert_eq!(result.score, 100 - 10 * 2);
}

#[test]
fn keyword_scenario() {
    assert_eq!(
        extract_keywords("testing testing automation automation automation pipeline"),
        vec!["automation", "testing", "pipeline"]
    );
}

#[test]
fn toc_scenario() {
    let doc = normalize(&json!({"type": "doc", "content": [
        {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "A"}]},
        {"type": "heading", "attrs": {"level": 3}, "content": [{"type": "text", "text": "B"}]},
        {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "C"}]}
    ]}));
    let headings = extract_headings(&doc);
    let indents: Vec<(String, u32)> = headings
        .iter()
        .map(|h| (h.title.clone(), h.indent(12)))
        .collect();
    assert_eq!(
        indents,
        vec![("A".into(), 0), ("B".into(), 12), ("C".into(), 0)]
    );
}

#[test]
fn deeply_nested_input_is_handled() {
    let mut value = json!({"type": "text", "text": "bottom"});
    for _ in 0..1_000 {
        value = json!({"type": "blockquote", "content": [value]});
    }
    let raw = json!({"type": "doc", "content": [value]});
    let doc: Document = normalize(&raw);
    let _ = render(&doc);
    assert_eq!(extract_text(&doc), "");
}
