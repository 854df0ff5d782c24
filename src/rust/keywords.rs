//! Fixed keyword scan and the rule-based score used when the classifier
//! cannot answer.

use lazy_static::lazy_static;
use regex::Regex;

/// Markers commonly seen in drug-sale posts, matched case-insensitively.
pub const DRUG_KEYWORDS: &[&str] = &[
    "🍁", "🔥", "🔌", "Wickr", "Signal", "BTC", "#420", "menu", "DM", "🍄", "❄️", "💊", "plug",
    "score", "ounce", "gram", "kush",
];

const KEYWORD_WEIGHT: f64 = 0.15;
const CONTACT_BOOST: f64 = 0.2;
const PHONE_BOOST: f64 = 0.3;
const LINK_BOOST: f64 = 0.15;
const MAX_CONFIDENCE: f64 = 0.99;

lazy_static! {
    static ref PHONE_NUMBER: Regex =
        Regex::new(r"\d{3}-\d{3}-\d{4}").expect("phone pattern is valid");
}

/// Keywords found in `text`, in list order.
///
/// Matching is by substring, so `"program"` contains `"gram"`.
pub fn detect_keywords(text: &str) -> Vec<&'static str> {
    let lowered = text.to_lowercase();
    DRUG_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| lowered.contains(&keyword.to_lowercase()))
        .collect()
}

/// Rule-based confidence in `[0, 0.99]`.
pub fn heuristic_confidence(text: &str) -> f64 {
    let mut score = detect_keywords(text).len() as f64 * KEYWORD_WEIGHT;

    if text.contains('@') || text.contains(':') {
        score += CONTACT_BOOST;
    }
    if PHONE_NUMBER.is_match(text) {
        score += PHONE_BOOST;
    }
    if text.contains("http") || text.contains(".com") {
        score += LINK_BOOST;
    }

    score.min(MAX_CONFIDENCE)
}
