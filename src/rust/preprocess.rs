//! Text normalization applied before feature extraction.
//!
//! Chat messages lean on emoji and street slang. Mapping them onto a small set
//! of canonical keywords lets the vectorizer treat `🔌` and `plug` as the same
//! feature.

use lazy_static::lazy_static;
use regex::Regex;

/// Surface token or emoji mapped to its canonical keyword.
///
/// Substitution is literal and runs in declaration order, so later entries see
/// the output of earlier ones (`dm` also matches inside `admin`).
pub const SLANG_MAP: &[(&str, &str)] = &[
    ("🍁", "weed"),
    ("🔥", "fire"),
    ("🔌", "plug"),
    ("❄️", "snow"),
    ("💊", "pills"),
    ("🍄", "shrooms"),
    ("⛽", "gas"),
    ("📦", "package"),
    ("dm", "directmessage"),
    ("hmu", "hitmeup"),
    ("hookup", "connect"),
    ("white girl", "cocaine"),
    ("drop point", "meetup"),
    ("half-zip", "halfzip"),
];

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").expect("valid non-word pattern");
}

/// Normalizes a message: lowercase, slang substitution, punctuation to spaces.
///
/// Whitespace is left as produced; no trimming or collapsing happens here.
pub fn preprocess(text: &str) -> String {
    let mut normalized = text.to_lowercase();
    for (pattern, replacement) in SLANG_MAP {
        if normalized.contains(pattern) {
            normalized = normalized.replace(pattern, replacement);
        }
    }
    NON_WORD.replace_all(&normalized, " ").into_owned()
}
