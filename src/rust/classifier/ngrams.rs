use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Words of two or more word characters; single letters and digits are dropped.
    static ref TOKEN: Regex = Regex::new(r"\b\w\w+\b").expect("valid token pattern");
}

/// Splits already-preprocessed text into word tokens.
pub(crate) fn tokenize(text: &str) -> Vec<&str> {
    TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Counts every contiguous n-gram with `min_n <= n <= max_n`.
///
/// An n-gram is its tokens joined by a single space.
pub(crate) fn count_ngrams(tokens: &[&str], min_n: usize, max_n: usize) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for n in min_n.max(1)..=max_n {
        for window in tokens.windows(n) {
            *counts.entry(window.join(" ")).or_insert(0) += 1;
        }
    }
    counts
}
