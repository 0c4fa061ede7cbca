//! Naive keyword extraction.
//!
//! Pure bag-of-words frequency: lowercase, split on non-word characters,
//! drop short tokens, count. There is no stopword list and no stemming, so
//! frequent long function words ("there", "which") can rank.

use crate::{constants::REGEXPS, options::AnalysisOptions};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A keyword and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// The ten most frequent tokens of at least five characters.
pub fn extract_keywords(text: &str) -> Vec<String> {
    keyword_counts(text, &AnalysisOptions::default())
        .into_iter()
        .map(|k| k.keyword)
        .collect()
}

/// Keyword frequencies, most frequent first. Ties keep first-occurrence
/// order.
pub fn keyword_counts(text: &str, options: &AnalysisOptions) -> Vec<KeywordCount> {
    let lowered = text.to_lowercase();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<KeywordCount> = Vec::new();

    for token in REGEXPS.non_word.split(&lowered) {
        if token.chars().count() < options.keyword_min_length {
            continue;
        }
        match index.get(token) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(token, counts.len());
                counts.push(KeywordCount {
                    keyword: token.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort: equal counts stay in first-occurrence order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(options.keyword_limit);
    counts
}
