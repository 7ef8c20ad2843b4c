use unicode_normalization::UnicodeNormalization;

use crate::devanagari::{is_combining_mark, vowel_bucket};
use crate::groups::loose_fold;

/// Punctuation class replaced by a space in the strict form. Electoral-roll
/// name fields carry OCR debris from this set between and around words.
fn is_punctuation(c: char) -> bool {
    matches!(
        c,
        '.' | ','
            | '!'
            | '?'
            | ';'
            | ':'
            | '-'
            | '('
            | ')'
            | '['
            | ']'
            | '{'
            | '}'
            | '"'
            | '\''
            | '/'
            | '|'
            | '।'
            | '॥'
            | '…'
            | '॰'
    )
}

fn collapse_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for token in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}

/// Strict normal form: NFC, NBSP→space, punctuation→space, whitespace
/// collapsed and trimmed.
///
/// Invariant: `norm_strict(norm_strict(s)) == norm_strict(s)`.
pub fn norm_strict(s: &str) -> String {
    let replaced: String = s
        .nfc()
        .map(|c| {
            if c == '\u{00A0}' || is_punctuation(c) {
                ' '
            } else {
                c
            }
        })
        .collect();
    collapse_ws(&replaced)
}

/// Remove the five combining marks, then collapse spaces. Works on any
/// string; does not apply the strict form first.
pub fn strip_marks(s: &str) -> String {
    let filtered: String = s.chars().filter(|c| !is_combining_mark(*c)).collect();
    collapse_ws(&filtered)
}

/// Count combining marks in the strict form of `s`.
pub fn count_marks(s: &str) -> u32 {
    norm_strict(s)
        .chars()
        .filter(|c| is_combining_mark(*c))
        .count() as u32
}

/// Exact normal form: strict, minus combining marks, with every vowel folded
/// to its bucket letter. Mixed Devanagari/ASCII; index-key material only.
pub fn norm_exact(s: &str) -> String {
    let strict = norm_strict(s);
    let folded: String = strict
        .chars()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| vowel_bucket(c).unwrap_or(c))
        .collect();
    collapse_ws(&folded)
}

/// Loose normal form: exact, with the `रव→ख` digraph rewrite and the
/// visual-confusable consonant fold applied, in that order.
pub fn norm_loose(s: &str) -> String {
    let exact = norm_exact(s);
    let rewritten = exact.replace("रव", "ख");
    rewritten.chars().map(loose_fold).collect()
}

/// Apply a normalizer and split on whitespace.
pub fn tokenize(norm: fn(&str) -> String, s: &str) -> Vec<String> {
    norm(s).split_whitespace().map(str::to_owned).collect()
}

/// Strict-form tokens, the representation the ranker consumes.
pub fn tokenize_strict(s: &str) -> Vec<String> {
    tokenize(norm_strict, s)
}
