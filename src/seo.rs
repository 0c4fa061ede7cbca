//! SEO audit scoring, slug helpers and the image checklist.
//!
//! The audit is a fixed rule table. Each rule either raises an **issue**
//! (a required field is missing or invalid, −10 points) or a **warning**
//! (present but outside the recommended range, −5 points). Nothing here
//! rejects input: a missing title is just another issue in the result.
//!
//! ```rust
//! use blogdoc::{audit, SeoMeta};
//!
//! let meta = SeoMeta {
//!     title: String::new(),
//!     description: "d".repeat(140),
//!     slug: "My Slug!".into(),
//!     image: Some("/cover.png".into()),
//! };
//! let result = audit(&meta, None);
//! assert_eq!(result.issues, vec!["Title is required", "Invalid slug format"]);
//! assert!(result.warnings.is_empty());
//! assert_eq!(result.score, 80);
//! ```

use crate::{
    constants::REGEXPS,
    node::{Document, Node},
    options::AnalysisOptions,
    readability::{score_with, ReadabilityScore},
    text::extract_text_with,
    toc::has_headings,
};
use serde::{Deserialize, Serialize};

/// Post metadata under audit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMeta {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub slug: String,
    /// Featured image URL.
    #[serde(default)]
    pub image: Option<String>,
}

/// Outcome of an SEO audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoAudit {
    /// `100 - 10 * issues - 5 * warnings`. Not clamped; may be negative.
    pub score: i32,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    /// Readability of the content, when content was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readability: Option<ReadabilityScore>,
}

/// Audit metadata, and optionally content, with default thresholds.
pub fn audit(meta: &SeoMeta, content: Option<&Document>) -> SeoAudit {
    audit_with(meta, content, &AnalysisOptions::default())
}

/// Audit metadata, and optionally content, with thresholds from `options`.
pub fn audit_with(
    meta: &SeoMeta,
    content: Option<&Document>,
    options: &AnalysisOptions,
) -> SeoAudit {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    let title_len = meta.title.chars().count();
    if meta.title.is_empty() {
        issues.push("Title is required".to_string());
    } else if title_len < *options.title_length.start() {
        warnings.push(format!(
            "Title is too short (min {} chars)",
            options.title_length.start()
        ));
    } else if title_len > *options.title_length.end() {
        warnings.push(format!(
            "Title is too long (recommended max {} chars)",
            options.title_length.end()
        ));
    }

    let description_len = meta.description.chars().count();
    if meta.description.is_empty() {
        issues.push("Meta description is required".to_string());
    } else if description_len < *options.description_length.start() {
        warnings.push(format!(
            "Description is too short (min {} chars)",
            options.description_length.start()
        ));
    } else if description_len > *options.description_length.end() {
        warnings.push(format!(
            "Description is too long (recommended max {} chars)",
            options.description_length.end()
        ));
    }

    if meta.slug.is_empty() {
        issues.push("Slug is required".to_string());
    } else if !validate_slug(&meta.slug) {
        issues.push("Invalid slug format".to_string());
    }

    if meta.image.as_deref().map_or(true, str::is_empty) {
        warnings.push("No featured image set".to_string());
    }

    let readability = content.map(|doc| {
        let readability = score_with(&extract_text_with(doc, options), options);
        if readability.word_count < options.min_word_count {
            warnings.push(format!(
                "Content is too short (min {} words)",
                options.min_word_count
            ));
        }
        if !has_headings(doc) {
            warnings.push("No headings found in content".to_string());
        }
        readability
    });

    SeoAudit {
        score: 100 - 10 * issues.len() as i32 - 5 * warnings.len() as i32,
        issues,
        warnings,
        readability,
    }
}

/// Whether `slug` is lowercase alphanumeric words joined by single dashes.
pub fn validate_slug(slug: &str) -> bool {
    REGEXPS.slug.is_match(slug)
}

/// Derive a URL slug from a title.
///
/// ```rust
/// use blogdoc::generate_slug;
///
/// assert_eq!(generate_slug("  Hello, World!  Rust -- 2024 "), "hello-world-rust-2024");
/// ```
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = REGEXPS.slug_strip.replace_all(lowered.trim(), "");
    let dashed = REGEXPS.slug_space.replace_all(&stripped, "-");
    let collapsed = REGEXPS.slug_dashes.replace_all(&dashed, "-");
    collapsed.chars().take(100).collect()
}

/// One pass/fail line of the image checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCheck {
    pub title: String,
    pub passed: bool,
    pub description: String,
}

/// Checklist results for one image in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReport {
    pub src: String,
    pub checks: Vec<ImageCheck>,
}

impl ImageReport {
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }
}

/// Alt text, title, caption and format checks for every image in the document.
pub fn image_checklist(doc: &Document) -> Vec<ImageReport> {
    doc.walk()
        .filter_map(|node| match node {
            Node::Image(image) => Some(image),
            _ => None,
        })
        .map(|image| {
            let alt_len = image.alt.chars().count();
            ImageReport {
                src: image.src.clone(),
                checks: vec![
                    ImageCheck {
                        title: "Alt Text".into(),
                        passed: alt_len >= 5,
                        description: if alt_len > 0 {
                            format!("{} characters", alt_len)
                        } else {
                            "Add descriptive alt text".into()
                        },
                    },
                    ImageCheck {
                        title: "Image Title".into(),
                        passed: image.title.is_some(),
                        description: image
                            .title
                            .clone()
                            .unwrap_or_else(|| "Optional but recommended".into()),
                    },
                    ImageCheck {
                        title: "Caption".into(),
                        passed: image.caption.is_some(),
                        description: image
                            .caption
                            .clone()
                            .unwrap_or_else(|| "Optional context for users".into()),
                    },
                    {
                        let format = image_format(&image.src);
                        ImageCheck {
                            title: "Format".into(),
                            passed: matches!(format.as_deref(), Some("webp" | "avif")),
                            description: format
                                .unwrap_or_else(|| "Use WebP/AVIF for best performance".into()),
                        }
                    },
                ],
            }
        })
        .collect()
}

/// Lowercased file extension of an image URL, ignoring query and fragment.
fn image_format(src: &str) -> Option<String> {
    let path = src.split(['?', '#']).next().unwrap_or_default();
    let file = path.rsplit('/').next().unwrap_or_default();
    file.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}
