//! Lexical URL Features
//!
//! Character counts, digit ratios and path word statistics.
//! Every division is guarded; an empty denominator yields 0.

use once_cell::sync::Lazy;
use regex::Regex;

/// Unicode decimal digits (`Nd`), not just ASCII
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("valid digit regex"));

/// Character count (Unicode scalar values)
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

pub fn count_char(s: &str, c: char) -> usize {
    s.chars().filter(|&ch| ch == c).count()
}

pub fn count_digits(s: &str) -> usize {
    DIGIT.find_iter(s).count()
}

/// Count of characters from the given set
pub fn count_any(s: &str, set: &[char]) -> usize {
    s.chars().filter(|c| set.contains(c)).count()
}

/// Digits / length, 0 for an empty string
pub fn digit_ratio(s: &str) -> f64 {
    let len = char_len(s);
    if len > 0 {
        count_digits(s) as f64 / len as f64
    } else {
        0.0
    }
}

/// `max(0, labels - 2)`; 0 when the hostname has at most one dot
pub fn subdomain_count(hostname: &str) -> usize {
    if count_char(hostname, '.') > 1 {
        hostname.split('.').count().saturating_sub(2)
    } else {
        0
    }
}

/// `max(0, occurrences of "//" - 1)`, discounting the scheme separator
pub fn redirection_count(url: &str) -> usize {
    url.matches("//").count().saturating_sub(1)
}

/// Shortest / longest / mean length of path words
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WordStats {
    pub shortest: f64,
    pub longest: f64,
    pub average: f64,
}

impl WordStats {
    /// No words behaves like a single word of length 0
    pub fn from_words<'a>(words: impl Iterator<Item = &'a str>) -> Self {
        let lengths: Vec<usize> = words.map(char_len).collect();
        if lengths.is_empty() {
            return Self::default();
        }

        let shortest = lengths.iter().copied().min().unwrap_or(0);
        let longest = lengths.iter().copied().max().unwrap_or(0);
        let total: usize = lengths.iter().sum();

        Self {
            shortest: shortest as f64,
            longest: longest as f64,
            average: total as f64 / lengths.len() as f64,
        }
    }
}
