//! Regular expressions shared across modules, compiled once.

use once_cell::sync::Lazy;
use regex::Regex;

pub struct Regexps {
    /// A word for readability statistics. ASCII word characters only.
    pub word: Regex,
    /// Sentence terminators.
    pub sentence_end: Regex,
    /// Separators between keyword tokens: anything but ASCII word characters.
    pub non_word: Regex,
    /// A valid URL slug.
    pub slug: Regex,
    /// Characters dropped when generating a slug.
    pub slug_strip: Regex,
    /// Whitespace runs replaced by a dash when generating a slug.
    pub slug_space: Regex,
    /// Repeated dashes collapsed when generating a slug.
    pub slug_dashes: Regex,
    /// Leading heading tag in legacy `heading` block content, e.g. `<h2`.
    pub heading_tag: Regex,
}

pub static REGEXPS: Lazy<Regexps> = Lazy::new(|| Regexps {
    word: Regex::new(r"[0-9A-Za-z_]+").unwrap(),
    sentence_end: Regex::new(r"[.!?]+").unwrap(),
    non_word: Regex::new(r"[^0-9A-Za-z_]+").unwrap(),
    slug: Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap(),
    slug_strip: Regex::new(r"[^a-z0-9_\s-]").unwrap(),
    slug_space: Regex::new(r"\s+").unwrap(),
    slug_dashes: Regex::new(r"-+").unwrap(),
    heading_tag: Regex::new(r"(?i)<h(\d)").unwrap(),
});
