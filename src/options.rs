//! Configuration options for text extraction, statistics and audits.
//!
//! This module provides [`AnalysisOptions`] and [`AnalysisOptionsBuilder`]
//! for tuning the derived-artifact functions. Pass them to the `*_with`
//! functions or to [`Analyzer::new`](crate::Analyzer::new); the plain free
//! functions use [`AnalysisOptions::default()`].
//!
//! ## Example
//!
//! ```rust
//! use blogdoc::{AnalysisOptions, TextPolicy};
//!
//! // Using default options
//! let options = AnalysisOptions::default();
//! assert_eq!(options.max_text_length, 5000);
//!
//! // Using builder for custom options
//! let options = AnalysisOptions::builder()
//!     .max_text_length(2000)
//!     .words_per_minute(250)
//!     .text_policy(TextPolicy::INCLUDE_TABLES)
//!     .build();
//! assert_eq!(options.words_per_minute, 250);
//! ```

use bitflags::bitflags;
use std::ops::RangeInclusive;

bitflags! {
    /// Which non-prose node kinds contribute to extracted text.
    ///
    /// The empty policy (the default) extracts prose only: tables, code
    /// blocks, images and videos contribute nothing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextPolicy: u8 {
        /// Include the text of table cells.
        const INCLUDE_TABLES = 1 << 0;
        /// Include the raw text of code blocks.
        const INCLUDE_CODE_BLOCKS = 1 << 1;
        /// Include image alt text and captions.
        const INCLUDE_MEDIA_TEXT = 1 << 2;
    }
}

/// Configuration options for the derived-artifact functions.
///
/// ## Creating Options
///
/// ```rust
/// use blogdoc::AnalysisOptions;
///
/// let options = AnalysisOptions::builder()
///     .keyword_limit(5)
///     .min_word_count(600)
///     .build();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    /// Maximum number of characters returned by text extraction.
    ///
    /// The cap is applied once to the finished text, not per node.
    ///
    /// Default: `5000`
    pub max_text_length: usize,

    /// Node kinds that contribute text in addition to prose.
    ///
    /// Default: empty
    pub text_policy: TextPolicy,

    /// Reading speed used for reading-time estimates.
    ///
    /// Default: `200`
    pub words_per_minute: usize,

    /// Minimum token length, in characters, for keyword candidates.
    ///
    /// Default: `5`
    pub keyword_min_length: usize,

    /// Number of keywords returned.
    ///
    /// Default: `10`
    pub keyword_limit: usize,

    /// Indentation, in pixels, per heading level below `h2` in a rendered TOC.
    ///
    /// Default: `12`
    pub toc_indent_unit: u32,

    /// Maximum excerpt length in characters.
    ///
    /// Default: `160`
    pub excerpt_length: usize,

    /// Title length range outside which the SEO audit warns.
    ///
    /// Default: `30..=60`
    pub title_length: RangeInclusive<usize>,

    /// Meta description length range outside which the SEO audit warns.
    ///
    /// Default: `120..=160`
    pub description_length: RangeInclusive<usize>,

    /// Word count below which the SEO audit warns about thin content.
    ///
    /// Default: `300`
    pub min_word_count: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            max_text_length: 5000,
            text_policy: TextPolicy::empty(),
            words_per_minute: 200,
            keyword_min_length: 5,
            keyword_limit: 10,
            toc_indent_unit: 12,
            excerpt_length: 160,
            title_length: 30..=60,
            description_length: 120..=160,
            min_word_count: 300,
        }
    }
}

impl AnalysisOptions {
    /// Creates a new builder for AnalysisOptions
    pub fn builder() -> AnalysisOptionsBuilder {
        AnalysisOptionsBuilder::default()
    }
}

/// Builder for [`AnalysisOptions`].
#[derive(Default)]
pub struct AnalysisOptionsBuilder {
    max_text_length: Option<usize>,
    text_policy: Option<TextPolicy>,
    words_per_minute: Option<usize>,
    keyword_min_length: Option<usize>,
    keyword_limit: Option<usize>,
    toc_indent_unit: Option<u32>,
    excerpt_length: Option<usize>,
    title_length: Option<RangeInclusive<usize>>,
    description_length: Option<RangeInclusive<usize>>,
    min_word_count: Option<usize>,
}

impl AnalysisOptionsBuilder {
    /// Set the extracted text cap
    pub fn max_text_length(mut self, max: usize) -> Self {
        self.max_text_length = Some(max);
        self
    }

    /// Set the text extraction policy
    pub fn text_policy(mut self, policy: TextPolicy) -> Self {
        self.text_policy = Some(policy);
        self
    }

    /// Set reading speed; zero is treated as one word per minute
    pub fn words_per_minute(mut self, wpm: usize) -> Self {
        self.words_per_minute = Some(wpm.max(1));
        self
    }

    /// Set minimum keyword length
    pub fn keyword_min_length(mut self, len: usize) -> Self {
        self.keyword_min_length = Some(len);
        self
    }

    /// Set number of keywords returned
    pub fn keyword_limit(mut self, limit: usize) -> Self {
        self.keyword_limit = Some(limit);
        self
    }

    /// Set TOC indentation unit
    pub fn toc_indent_unit(mut self, unit: u32) -> Self {
        self.toc_indent_unit = Some(unit);
        self
    }

    /// Set excerpt length
    pub fn excerpt_length(mut self, len: usize) -> Self {
        self.excerpt_length = Some(len);
        self
    }

    /// Set recommended title length
    pub fn title_length(mut self, range: RangeInclusive<usize>) -> Self {
        self.title_length = Some(range);
        self
    }

    /// Set recommended description length
    pub fn description_length(mut self, range: RangeInclusive<usize>) -> Self {
        self.description_length = Some(range);
        self
    }

    /// Set minimum word count
    pub fn min_word_count(mut self, count: usize) -> Self {
        self.min_word_count = Some(count);
        self
    }

    /// Build the AnalysisOptions
    pub fn build(self) -> AnalysisOptions {
        let defaults = AnalysisOptions::default();
        AnalysisOptions {
            max_text_length: self.max_text_length.unwrap_or(defaults.max_text_length),
            text_policy: self.text_policy.unwrap_or(defaults.text_policy),
            words_per_minute: self.words_per_minute.unwrap_or(defaults.words_per_minute),
            keyword_min_length: self
                .keyword_min_length
                .unwrap_or(defaults.keyword_min_length),
            keyword_limit: self.keyword_limit.unwrap_or(defaults.keyword_limit),
            toc_indent_unit: self.toc_indent_unit.unwrap_or(defaults.toc_indent_unit),
            excerpt_length: self.excerpt_length.unwrap_or(defaults.excerpt_length),
            title_length: self.title_length.unwrap_or(defaults.title_length),
            description_length: self
                .description_length
                .unwrap_or(defaults.description_length),
            min_word_count: self.min_word_count.unwrap_or(defaults.min_word_count),
        }
    }
}
