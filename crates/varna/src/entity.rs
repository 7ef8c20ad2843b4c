use std::sync::LazyLock;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::devanagari::is_matra;
use crate::groups::{PHONETIC_GROUPS, VISUAL_P0_GROUPS, VISUAL_P1_GROUPS, VISUAL_P2_GROUPS};

/// Independent vowels admitted into the entity vocabulary.
const INDEPENDENT_VOWELS: &[&str] = &[
    "अ", "आ", "इ", "ई", "उ", "ऊ", "ऋ", "ॠ", "ऌ", "ॡ", "ए", "ऐ", "ओ", "औ",
];

/// Devanagari numerals; serial fragments bleed into OCR'd name fields.
const NUMERALS: &[&str] = &["०", "१", "२", "३", "४", "५", "६", "७", "८", "९"];

/// Classification of an aligned entity pair, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubstType {
    Exact,
    Phonetic,
    VisualP0,
    VisualP1,
    VisualP2,
    Other,
}

/// Process-wide immutable entity vocabulary and pair relations, built once.
pub struct EntityTable {
    /// Entity → dense id, for pair-set lookups.
    ids: FxHashMap<&'static str, u32>,
    /// First codepoint → vocabulary entities starting with it, longest first.
    by_first: FxHashMap<char, Vec<&'static str>>,
    phonetic: FxHashSet<(u32, u32)>,
    visual_p0: FxHashSet<(u32, u32)>,
    visual_p1: FxHashSet<(u32, u32)>,
    visual_p2: FxHashSet<(u32, u32)>,
}

static TABLE: LazyLock<EntityTable> = LazyLock::new(EntityTable::build);

/// The global entity table.
pub fn entities() -> &'static EntityTable {
    &TABLE
}

impl EntityTable {
    fn build() -> Self {
        fn intern(s: &'static str, ids: &mut FxHashMap<&'static str, u32>) {
            let next = ids.len() as u32;
            ids.entry(s).or_insert(next);
        }

        let mut ids: FxHashMap<&'static str, u32> = FxHashMap::default();
        for groups in [
            PHONETIC_GROUPS,
            VISUAL_P0_GROUPS,
            VISUAL_P1_GROUPS,
            VISUAL_P2_GROUPS,
        ] {
            for group in groups {
                for &member in *group {
                    intern(member, &mut ids);
                }
            }
        }
        for &v in INDEPENDENT_VOWELS {
            intern(v, &mut ids);
        }
        for &n in NUMERALS {
            intern(n, &mut ids);
        }

        let pair_set = |groups: &[&[&'static str]], ids: &FxHashMap<&'static str, u32>| {
            let mut set = FxHashSet::default();
            for group in groups {
                for (i, a) in group.iter().enumerate() {
                    for b in &group[i + 1..] {
                        let (x, y) = (ids[a], ids[b]);
                        set.insert((x.min(y), x.max(y)));
                    }
                }
            }
            set
        };

        let phonetic = pair_set(PHONETIC_GROUPS, &ids);
        let visual_p0 = pair_set(VISUAL_P0_GROUPS, &ids);
        let visual_p1 = pair_set(VISUAL_P1_GROUPS, &ids);
        let visual_p2 = pair_set(VISUAL_P2_GROUPS, &ids);

        let mut by_first: FxHashMap<char, Vec<&'static str>> = FxHashMap::default();
        for &ent in ids.keys() {
            let first = ent.chars().next().expect("vocabulary entity is non-empty");
            by_first.entry(first).or_default().push(ent);
        }
        for list in by_first.values_mut() {
            // longest first so greedy matching sees multi-codepoint entities;
            // ties broken bytewise for a deterministic table
            list.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        }

        Self {
            ids,
            by_first,
            phonetic,
            visual_p0,
            visual_p1,
            visual_p2,
        }
    }

    fn pair(&self, a: &str, b: &str) -> Option<(u32, u32)> {
        let x = *self.ids.get(a)?;
        let y = *self.ids.get(b)?;
        Some((x.min(y), x.max(y)))
    }
}

/// Classify an aligned entity pair. Preference order: EXACT, PHONETIC,
/// VISUAL_P0, VISUAL_P1, VISUAL_P2, OTHER.
pub fn subst_type(a: &str, b: &str) -> SubstType {
    if a == b {
        return SubstType::Exact;
    }
    let table = entities();
    let Some(key) = table.pair(a, b) else {
        return SubstType::Other;
    };
    if table.phonetic.contains(&key) {
        SubstType::Phonetic
    } else if table.visual_p0.contains(&key) {
        SubstType::VisualP0
    } else if table.visual_p1.contains(&key) {
        SubstType::VisualP1
    } else if table.visual_p2.contains(&key) {
        SubstType::VisualP2
    } else {
        SubstType::Other
    }
}

/// Greedy longest-match segmentation of a (mark-stripped) word into entities.
/// Codepoints outside the vocabulary become singleton entities, so the
/// concatenation of the result always reproduces the input.
pub fn segment(word: &str) -> Vec<&str> {
    let table = entities();
    let mut out = Vec::new();
    let mut rest = word;
    while let Some(first) = rest.chars().next() {
        let matched = table
            .by_first
            .get(&first)
            .and_then(|cands| cands.iter().find(|ent| rest.starts_with(**ent)))
            .map(|ent| ent.len())
            .unwrap_or_else(|| first.len_utf8());
        let (head, tail) = rest.split_at(matched);
        out.push(head);
        rest = tail;
    }
    out
}

/// A matra-like entity: a single codepoint that is a dependent vowel sign.
/// Mismatches on these are tallied separately and weigh less than consonant
/// mismatches.
pub fn is_matra_like(entity: &str) -> bool {
    let mut chars = entity.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => is_matra(c),
        _ => false,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn segmentation_is_total(s in "[\\u{0900}-\\u{097F}a-z ]{0,40}") {
            let stripped = crate::strip_marks(&s);
            let joined: String = segment(&stripped).concat();
            prop_assert_eq!(joined, stripped);
        }
    }
}
