//! Key construction for the six posting-list indexes.
//!
//! A query (or, on the loader side, a name field) is normalized to one of the
//! three forms, tokenized, and reduced to short codepoint prefixes: one key
//! per token, plus join variants that absorb whitespace errors — every
//! adjacent-pair merge and the full concatenation. The posting lists are
//! built against exactly this key family, so query and loader must agree.

use rustc_hash::FxHashSet;

use naamkhoj_types::{Form, SearchConfig};
use naamkhoj_varna::{norm_exact, norm_loose, norm_strict};

/// The normalizer backing an index form.
pub fn normalizer(form: Form) -> fn(&str) -> String {
    match form {
        Form::Strict => norm_strict,
        Form::Exact => norm_exact,
        Form::Loose => norm_loose,
    }
}

/// First `p` codepoints of a token; the whole token when shorter.
fn prefix(token: &str, p: usize) -> &str {
    match token.char_indices().nth(p) {
        Some((idx, _)) => &token[..idx],
        None => token,
    }
}

/// Build the deduplicated key list for one form, at that form's prefix
/// resolution. Order is first-emission order, so output is deterministic.
pub fn build_keys(form: Form, query: &str, cfg: &SearchConfig) -> Vec<String> {
    let p = cfg.prefix_len(form);
    let tokens: Vec<String> = normalizer(form)(query)
        .split_whitespace()
        .map(str::to_owned)
        .collect();

    let mut keys: Vec<String> = Vec::new();
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut emit = |key: &str| {
        if !key.is_empty() && seen.insert(key.to_owned()) {
            keys.push(key.to_owned());
        }
    };

    for token in &tokens {
        emit(prefix(token, p));
    }

    let n = tokens.len();
    if n >= 2 {
        // adjacent-pair merges: tokens i and i+1 concatenated
        for pair in tokens.windows(2) {
            let merged = format!("{}{}", pair[0], pair[1]);
            emit(prefix(&merged, p));
        }
        // The fully-joined form. For n ≥ 4 this also stands in for the
        // spaceless collapse of every adjacent-merge variant: each collapse
        // equals the full concatenation, so dedup leaves exactly this key.
        let full: String = tokens.concat();
        emit(prefix(&full, p));
    }

    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use naamkhoj_types::Form;

    fn cfg() -> SearchConfig {
        SearchConfig::default()
    }

    #[test]
    fn single_token_strict() {
        let keys = build_keys(Form::Strict, "रामलाल", &cfg());
        assert_eq!(keys, vec!["राम"]);
    }

    #[test]
    fn short_token_is_emitted_whole() {
        let keys = build_keys(Form::Strict, "मा", &cfg());
        assert_eq!(keys, vec!["मा"]);
    }

    #[test]
    fn two_tokens_add_join_variants() {
        let keys = build_keys(Form::Strict, "राम कुमार", &cfg());
        // the pair-merge and full-join prefixes collapse onto the first
        // token's prefix here and deduplicate away
        assert_eq!(keys, vec!["राम", "कुम"]);
    }

    #[test]
    fn join_variant_matters_for_short_first_token() {
        // a token shorter than the prefix length makes the merge key new:
        // it reaches across the (possibly spurious) word break
        let keys = build_keys(Form::Strict, "मा कुमार", &cfg());
        assert_eq!(keys, vec!["मा", "कुम", "माक"]);
    }

    #[test]
    fn exact_form_uses_its_own_resolution() {
        let keys = build_keys(Form::Exact, "राम कुमार", &cfg());
        // exact prefix length is 2: रA, कU, and the joins
        assert!(keys.contains(&"रA".to_string()));
        assert!(keys.contains(&"कU".to_string()));
    }

    #[test]
    fn loose_form_folds_before_prefixing() {
        let keys = build_keys(Form::Loose, "वाला", &cfg());
        assert_eq!(keys, vec!["बA"]);
    }

    #[test]
    fn empty_query_yields_no_keys() {
        assert!(build_keys(Form::Strict, "", &cfg()).is_empty());
        assert!(build_keys(Form::Strict, "   ", &cfg()).is_empty());
    }

    #[test]
    fn keys_are_deduplicated() {
        let keys = build_keys(Form::Strict, "राम राम", &cfg());
        assert_eq!(keys, vec!["राम"]);
    }

    #[test]
    fn four_tokens_collapse_to_same_key_set() {
        let keys = build_keys(Form::Strict, "क ख ग घ", &cfg());
        // singles, three pair merges, full join; the n≥4 collapses dedupe away
        assert_eq!(keys, vec!["क", "ख", "ग", "घ", "कख", "खग", "गघ", "कखग"]);
    }
}
