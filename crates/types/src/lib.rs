use serde::{Deserialize, Serialize};

/// Assembly Constituency identifier — the partition unit of the roll.
pub type AcId = u32;

/// Row identifier, unique within one AC.
pub type RowId = u64;

/// Which name field(s) a search scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Voter name only.
    Voter,
    /// Relative (father/husband/mother) name only.
    Relative,
    /// Both fields; the better key wins, voter breaking ties.
    Anywhere,
}

/// Normalization resolution of an index family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Form {
    /// Whitespace-collapsed, punctuation-stripped.
    Strict,
    /// Strict with vowels folded to buckets and combining marks removed.
    Exact,
    /// Exact with the visual-confusable consonant fold applied.
    Loose,
}

/// Which name field an index covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Voter,
    Relative,
}

/// One of the six posting-list index families: form × field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexFamily {
    pub form: Form,
    pub field: Field,
}

impl IndexFamily {
    pub const fn new(form: Form, field: Field) -> Self {
        Self { form, field }
    }

    /// All six families in a fixed order: the ordinal below indexes per-row
    /// hit-metadata arrays, so this order is part of the candidate-set shape.
    pub const ALL: [IndexFamily; 6] = [
        IndexFamily::new(Form::Strict, Field::Voter),
        IndexFamily::new(Form::Strict, Field::Relative),
        IndexFamily::new(Form::Exact, Field::Voter),
        IndexFamily::new(Form::Exact, Field::Relative),
        IndexFamily::new(Form::Loose, Field::Voter),
        IndexFamily::new(Form::Loose, Field::Relative),
    ];

    /// Position of this family in [`IndexFamily::ALL`].
    pub const fn ordinal(self) -> usize {
        let base = match self.form {
            Form::Strict => 0,
            Form::Exact => 2,
            Form::Loose => 4,
        };
        base + match self.field {
            Field::Voter => 0,
            Field::Relative => 1,
        }
    }
}

impl std::fmt::Display for IndexFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let form = match self.form {
            Form::Strict => "strict",
            Form::Exact => "exact",
            Form::Loose => "loose",
        };
        let field = match self.field {
            Field::Voter => "voter",
            Field::Relative => "relative",
        };
        write!(f, "{form}_{field}")
    }
}

/// A candidate row in scoring shape. Display rows are a wider type owned by
/// the UI layer and never enter the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub row_id: RowId,
    pub voter_name_raw: String,
    pub relative_name_raw: String,
    /// Strict-normalized voter name, as written by the offline loader.
    pub voter_name_norm: String,
    /// Strict-normalized relative name.
    pub relative_name_norm: String,
    /// Stable serial number within the AC part; last element of every
    /// ranking key.
    pub serial_no: u64,
}

/// Caps on add/outside substitutions, keyed by query-word entity length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutsideCaps {
    /// Query word of ≤ 2 entities.
    pub upto_2: u32,
    /// Exactly 3 entities.
    pub exactly_3: u32,
    /// 4–8 entities.
    pub from_4_to_8: u32,
    /// 9 entities or more.
    pub from_9: u32,
}

impl OutsideCaps {
    pub fn cap_for_len(&self, query_word_len: usize) -> u32 {
        match query_word_len {
            0..=2 => self.upto_2,
            3 => self.exactly_3,
            4..=8 => self.from_4_to_8,
            _ => self.from_9,
        }
    }
}

impl Default for OutsideCaps {
    fn default() -> Self {
        Self {
            upto_2: 0,
            exactly_3: 1,
            from_4_to_8: 2,
            from_9: 3,
        }
    }
}

/// Engine configuration. A plain value passed by reference through the
/// pipeline; no global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Key-builder prefix resolution of the strict indexes.
    pub prefix_len_strict: usize,
    /// Key-builder prefix resolution of the exact indexes.
    pub prefix_len_exact: usize,
    /// Key-builder prefix resolution of the loose indexes.
    pub prefix_len_loose: usize,

    /// Per-word consonant-mismatch cap in the FULL comparison.
    pub max_con_per_word: u32,
    /// Total consonant-mismatch cap for 2-word queries.
    pub max_con_total_2w: u32,
    /// Total consonant-mismatch cap for 3+-word queries.
    pub max_con_total_3plus_w: u32,

    /// Prefix-fallback substitution cap for 2-entity query words.
    pub pf_max_subs_for_2: u32,
    /// Prefix-fallback substitution cap for 3-entity query words.
    pub pf_max_subs_for_3: u32,
    /// Prefix-fallback trailing-entity slop per word.
    pub pf_max_extra_suffix_per_word: u32,
    /// First-word amplifier on the PF extra-suffix sum.
    pub pf_global_extra_multiplier: u32,

    /// First-word addition cap in multi-word add/outside ranking.
    pub add_first_word_max_add_in_multi: u32,
    /// Outside-substitution cap table for the add/outside family.
    pub outside_caps: OutsideCaps,

    /// Keys beyond this count are dropped from a single index lookup.
    pub max_keys_per_lookup: usize,
    /// Chunk size for multi-key store calls (bound-parameter budget).
    pub store_param_limit: usize,

    /// Bound on concurrently searched ACs.
    pub ac_concurrency: usize,
}

impl SearchConfig {
    /// Prefix resolution for one normalization form.
    pub fn prefix_len(&self, form: Form) -> usize {
        match form {
            Form::Strict => self.prefix_len_strict,
            Form::Exact => self.prefix_len_exact,
            Form::Loose => self.prefix_len_loose,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            prefix_len_strict: 3,
            prefix_len_exact: 2,
            prefix_len_loose: 2,
            max_con_per_word: 4,
            max_con_total_2w: 5,
            max_con_total_3plus_w: 7,
            pf_max_subs_for_2: 1,
            pf_max_subs_for_3: 2,
            pf_max_extra_suffix_per_word: 2,
            pf_global_extra_multiplier: 2,
            add_first_word_max_add_in_multi: 2,
            outside_caps: OutsideCaps::default(),
            max_keys_per_lookup: 200,
            store_param_limit: 900,
            ac_concurrency: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_ordinals_match_all_order() {
        for (i, fam) in IndexFamily::ALL.iter().enumerate() {
            assert_eq!(fam.ordinal(), i, "ordinal mismatch for {fam}");
        }
    }

    #[test]
    fn family_display_names() {
        assert_eq!(
            IndexFamily::new(Form::Strict, Field::Voter).to_string(),
            "strict_voter"
        );
        assert_eq!(
            IndexFamily::new(Form::Loose, Field::Relative).to_string(),
            "loose_relative"
        );
    }

    #[test]
    fn outside_caps_bands() {
        let caps = OutsideCaps::default();
        assert_eq!(caps.cap_for_len(1), 0);
        assert_eq!(caps.cap_for_len(2), 0);
        assert_eq!(caps.cap_for_len(3), 1);
        assert_eq!(caps.cap_for_len(4), 2);
        assert_eq!(caps.cap_for_len(8), 2);
        assert_eq!(caps.cap_for_len(9), 3);
        assert_eq!(caps.cap_for_len(15), 3);
    }

    #[test]
    fn config_defaults_roundtrip_json() {
        let cfg = SearchConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn config_partial_json_fills_defaults() {
        let cfg: SearchConfig = serde_json::from_str(r#"{"prefix_len_strict": 4}"#).unwrap();
        assert_eq!(cfg.prefix_len_strict, 4);
        assert_eq!(cfg.prefix_len_exact, 2);
        assert_eq!(cfg.max_con_per_word, 4);
    }
}
