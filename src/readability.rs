//! Grade-level readability scoring.
//!
//! The score is a Flesch–Kincaid style approximation driven only by average
//! sentence length and average word length:
//!
//! ```text
//! grade = 0.39 * words_per_sentence + 11.8 * (chars_per_word / 100) - 15.59
//! score = clamp(100 - grade * 10, 0, 100)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use blogdoc::{score, ReadabilityGrade};
//!
//! let result = score("The cat sat. The dog ran.");
//! assert_eq!(result.word_count, 6);
//! assert_eq!(result.sentence_count, 2);
//! assert_eq!(result.grade, ReadabilityGrade::Easy);
//! assert_eq!(result.estimated_read_time_minutes, 1);
//! ```

use crate::{constants::REGEXPS, options::AnalysisOptions};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Difficulty band for a readability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadabilityGrade {
    Easy,
    Medium,
    Difficult,
    #[serde(rename = "Very Difficult")]
    VeryDifficult,
}

impl ReadabilityGrade {
    /// Band a 0–100 score: above 80 is easy, above 60 medium, above 40
    /// difficult.
    pub fn from_score(score: f64) -> Self {
        if score > 80.0 {
            ReadabilityGrade::Easy
        } else if score > 60.0 {
            ReadabilityGrade::Medium
        } else if score > 40.0 {
            ReadabilityGrade::Difficult
        } else {
            ReadabilityGrade::VeryDifficult
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReadabilityGrade::Easy => "Easy",
            ReadabilityGrade::Medium => "Medium",
            ReadabilityGrade::Difficult => "Difficult",
            ReadabilityGrade::VeryDifficult => "Very Difficult",
        }
    }
}

impl fmt::Display for ReadabilityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Readability statistics for a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityScore {
    /// Reading ease from 0 (hardest) to 100 (easiest), rounded.
    pub score: u32,

    /// Difficulty band, computed from the unrounded score.
    pub grade: ReadabilityGrade,

    /// Minutes needed at the configured reading speed, rounded up.
    #[serde(rename = "estimatedReadTime")]
    pub estimated_read_time_minutes: usize,

    pub sentence_count: usize,

    pub word_count: usize,

    /// Non-whitespace characters per word, to one decimal. Zero when there
    /// are no words.
    pub average_word_length: f64,

    /// Words per sentence, rounded. Zero when there are no sentences.
    pub average_sentence_length: f64,
}

/// Score text at the default reading speed of 200 words per minute.
pub fn score(text: &str) -> ReadabilityScore {
    score_with(text, &AnalysisOptions::default())
}

/// Score text using the reading speed from `options`.
pub fn score_with(text: &str, options: &AnalysisOptions) -> ReadabilityScore {
    let word_count = REGEXPS.word.find_iter(text).count();
    let sentence_count = REGEXPS
        .sentence_end
        .split(text)
        .filter(|sentence| !sentence.trim().is_empty())
        .count();
    let characters = text.chars().filter(|c| !c.is_whitespace()).count();

    let average_word_length = ratio(characters, word_count);
    let average_sentence_length = ratio(word_count, sentence_count);

    let grade_level = 0.39 * average_sentence_length + 11.8 * (average_word_length / 100.0) - 15.59;
    let raw_score = (100.0 - grade_level * 10.0).clamp(0.0, 100.0);

    ReadabilityScore {
        score: raw_score.round() as u32,
        grade: ReadabilityGrade::from_score(raw_score),
        estimated_read_time_minutes: reading_time(word_count, options.words_per_minute),
        sentence_count,
        word_count,
        average_word_length: (average_word_length * 10.0).round() / 10.0,
        average_sentence_length: average_sentence_length.round(),
    }
}

/// Minutes to read `word_count` words, rounded up.
pub fn reading_time(word_count: usize, words_per_minute: usize) -> usize {
    word_count.div_ceil(words_per_minute.max(1))
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_division_artifacts() {
        let result = score("");
        assert_eq!(result.word_count, 0);
        assert_eq!(result.sentence_count, 0);
        assert_eq!(result.average_word_length, 0.0);
        assert_eq!(result.average_sentence_length, 0.0);
        assert!(result.average_sentence_length.is_finite());
        assert_eq!(result.score, 100);
        assert_eq!(result.estimated_read_time_minutes, 0);
    }

    #[test]
    fn punctuation_only_has_zero_sentences() {
        let result = score("... !!! ???");
        assert_eq!(result.sentence_count, 0);
        assert_eq!(result.word_count, 0);
        assert_eq!(result.average_sentence_length, 0.0);
    }

    #[test]
    fn long_sentences_score_lower() {
        let long_sentence = vec!["extraordinarily"; 60].join(" ") + ".";
        let result = score(&long_sentence);
        assert_eq!(result.sentence_count, 1);
        assert_eq!(result.word_count, 60);
        // grade = 0.39 * 60 + 11.8 * 0.15 - 15.59 = 9.58
        assert_eq!(result.score, 4);
        assert_eq!(result.grade, ReadabilityGrade::VeryDifficult);
    }

    #[test]
    fn words_are_runs_of_ascii_word_characters() {
        let result = score("naïve café");
        assert_eq!(result.word_count, 3);
        assert_eq!(result.sentence_count, 1);
    }

    #[test]
    fn averages_are_rounded_for_display() {
        let result = score("One two three. Four five.");
        assert_eq!(result.word_count, 5);
        assert_eq!(result.sentence_count, 2);
        // 21 non-whitespace chars / 5 words
        assert_eq!(result.average_word_length, 4.2);
        assert_eq!(result.average_sentence_length, 3.0);
    }

    #[test]
    fn grade_bands() {
        assert_eq!(ReadabilityGrade::from_score(81.0), ReadabilityGrade::Easy);
        assert_eq!(ReadabilityGrade::from_score(80.0), ReadabilityGrade::Medium);
        assert_eq!(ReadabilityGrade::from_score(60.5), ReadabilityGrade::Medium);
        assert_eq!(ReadabilityGrade::from_score(41.0), ReadabilityGrade::Difficult);
        assert_eq!(ReadabilityGrade::from_score(40.0), ReadabilityGrade::VeryDifficult);
        assert_eq!(ReadabilityGrade::VeryDifficult.to_string(), "Very Difficult");
    }

    #[test]
    fn reading_time_rounds_up() {
        assert_eq!(reading_time(0, 200), 0);
        assert_eq!(reading_time(1, 200), 1);
        assert_eq!(reading_time(200, 200), 1);
        assert_eq!(reading_time(201, 200), 2);
    }

    #[test]
    fn serializes_with_platform_field_names() {
        let value = serde_json::to_value(score("Hi there.")).unwrap();
        assert_eq!(value["grade"], "Easy");
        assert!(value.get("estimatedReadTime").is_some());
        assert!(value.get("averageSentenceLength").is_some());
    }
}
