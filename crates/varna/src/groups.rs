use std::sync::LazyLock;

use rustc_hash::FxHashMap;

// =============================================================================
// Curated confusion relations over Devanagari entities
// =============================================================================
//
// Each relation is a list of groups; two entities are related iff both appear
// in the same group. The lists are pair-membership data, not partitions — an
// entity may sit in several groups of one tier.

/// Phonetically interchangeable entities, including the independent-vowel
/// length pairs. Hand-typed and OCR'd rolls routinely swap within a group.
pub const PHONETIC_GROUPS: &[&[&str]] = &[
    &["क", "ख"],
    &["ग", "घ"],
    &["च", "छ"],
    &["ज", "झ"],
    &["ट", "ठ"],
    &["ड", "ढ", "द", "ध", "त", "थ"],
    &["प", "फ"],
    &["ब", "भ", "व"],
    &["न", "ण"],
    &["स", "श", "ष"],
    &["य", "ज"],
    &["र", "ल"],
    &["अ", "आ"],
    &["इ", "ई"],
    &["उ", "ऊ"],
    &["ए", "ऐ"],
    &["ओ", "औ"],
];

/// Strongest visual-confusability tier. `रव` is the mark-stripped shape of a
/// misread ख, hence the one multi-codepoint member.
pub const VISUAL_P0_GROUPS: &[&[&str]] = &[
    &["ख", "रव"],
    &["घ", "ध"],
    &["ब", "व"],
    &["म", "भ"],
    &["म", "ल"],
    &["ग", "ण"],
];

/// Middle visual tier.
pub const VISUAL_P1_GROUPS: &[&[&str]] = &[
    &["क", "फ"],
    &["ट", "ठ"],
    &["ड", "ङ"],
    &["प", "ष"],
    &["थ", "य"],
    &["भ", "स"],
];

/// Weakest visual tier. `ईं` keeps its anusvara: the pair models a misread
/// of the bare vowel in raw field text.
pub const VISUAL_P2_GROUPS: &[&[&str]] = &[
    &["ई", "ईं"],
    &["त", "ल"],
    &["ह", "र"],
    &["द", "ट"],
    &["च", "ब"],
];

/// Groups collapsed by the loose normal form. The first member is the
/// representative every member folds to. Recall-only data: ranking never
/// consults this fold.
pub const LOOSE_FOLD_GROUPS: &[&[&str]] = &[
    &["ब", "व"],
    &["क", "र", "ख"],
    &["द", "ढ", "ह"],
    &["घ", "ध"],
    &["म", "भ"],
];

static LOOSE_FOLD_MAP: LazyLock<FxHashMap<char, char>> = LazyLock::new(|| {
    let mut map = FxHashMap::default();
    for group in LOOSE_FOLD_GROUPS {
        let mut chars = group.iter().map(|s| {
            let mut it = s.chars();
            let c = it.next().expect("fold group member is non-empty");
            debug_assert!(it.next().is_none(), "fold groups hold single codepoints");
            c
        });
        let repr = chars.next().expect("fold group is non-empty");
        map.insert(repr, repr);
        for c in chars {
            map.insert(c, repr);
        }
    }
    map
});

/// Collapse a codepoint to its loose-fold representative, identity outside
/// the fold groups.
pub fn loose_fold(c: char) -> char {
    LOOSE_FOLD_MAP.get(&c).copied().unwrap_or(c)
}
