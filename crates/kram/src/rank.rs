use naamkhoj_types::{Field, Scope, ScoreRow, SearchConfig};
use naamkhoj_varna::{count_marks, strip_marks, tokenize_strict};

use crate::exact::{Target, exact_multi, exact_single, targets};
use crate::key::{RankKey, RankOutcome, fold_min};
use crate::word::{
    PrefixCmp, WordEnts, compare_add_outside, compare_full, compare_prefix,
};

/// Query-side state for ranking: strict tokens plus their mark-stripped
/// forms, prepared once per request and shared read-only by every AC task.
#[derive(Debug, Clone)]
pub struct RankContext {
    q_tokens: Vec<String>,
    q_stripped: Vec<(String, u32)>,
    scope: Scope,
    exact_only: bool,
    cfg: SearchConfig,
}

/// Borrowed view over the context: token slices and segmented query words.
/// Built once per AC task so per-row scoring does no query-side work.
#[derive(Debug)]
pub struct QueryView<'a> {
    pub tokens: Vec<&'a str>,
    pub words: Vec<WordEnts<'a>>,
}

/// A scored row field: the winning key, its breadcrumb, and which field won.
#[derive(Debug, Clone)]
pub struct RankedRow {
    pub key: RankKey,
    pub why: String,
    pub field: Field,
}

impl RankContext {
    pub fn new(query: &str, scope: Scope, exact_only: bool, cfg: SearchConfig) -> Self {
        let q_tokens = tokenize_strict(query);
        let q_stripped = q_tokens
            .iter()
            .map(|t| (strip_marks(t), count_marks(t)))
            .collect();
        Self {
            q_tokens,
            q_stripped,
            scope,
            exact_only,
            cfg,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.q_tokens.is_empty()
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn config(&self) -> &SearchConfig {
        &self.cfg
    }

    pub fn view(&self) -> QueryView<'_> {
        QueryView {
            tokens: self.q_tokens.iter().map(String::as_str).collect(),
            words: self
                .q_stripped
                .iter()
                .map(|(s, m)| WordEnts::of(s, *m))
                .collect(),
        }
    }

    /// Score one row. Under `anywhere` both name fields are scored and the
    /// smaller key kept, the voter field winning ties. `None` disqualifies
    /// the row.
    pub fn rank_row(&self, view: &QueryView<'_>, row: &ScoreRow) -> Option<RankedRow> {
        let mut best: Option<RankedRow> = None;

        if self.scope != Scope::Relative {
            if let Some(out) = self.rank_field(view, &row.voter_name_norm, row.serial_no) {
                best = Some(RankedRow {
                    key: out.key,
                    why: out.why,
                    field: Field::Voter,
                });
            }
        }
        if self.scope != Scope::Voter {
            if let Some(out) = self.rank_field(view, &row.relative_name_norm, row.serial_no) {
                let better = best
                    .as_ref()
                    .is_none_or(|b| out.key < b.key);
                if better {
                    best = Some(RankedRow {
                        key: out.key,
                        why: out.why,
                        field: Field::Relative,
                    });
                }
            }
        }
        best
    }

    /// Score the query against one name field.
    pub fn rank_field(
        &self,
        view: &QueryView<'_>,
        cand_norm: &str,
        serial: u64,
    ) -> Option<RankOutcome> {
        let c_tokens: Vec<&str> = cand_norm.split_whitespace().collect();
        if c_tokens.is_empty() || view.tokens.is_empty() {
            return None;
        }

        if view.tokens.len() == 1 {
            let tgts = targets(&c_tokens);
            if let Some(out) = exact_single(view.tokens[0], &tgts, c_tokens.len(), serial) {
                return Some(out);
            }
            if self.exact_only {
                return None;
            }
            self.one_word_typo(&view.words[0], &tgts, c_tokens.len(), serial)
        } else {
            if let Some(out) = exact_multi(&view.tokens, &c_tokens, serial) {
                return Some(out);
            }
            if self.exact_only {
                return None;
            }
            self.multi_word_typo(view, &c_tokens, serial)
        }
    }

    /// One-word fuzzy ranking: FULL against every target, minimum key; if no
    /// target passes FULL, add/outside against every target.
    fn one_word_typo(
        &self,
        q: &WordEnts<'_>,
        tgts: &[Target<'_>],
        total_words: usize,
        serial: u64,
    ) -> Option<RankOutcome> {
        let total = total_words as i64;
        let prepared: Vec<(String, u32)> = tgts
            .iter()
            .map(|t| (strip_marks(&t.text), count_marks(&t.text)))
            .collect();
        let cand_words: Vec<WordEnts<'_>> = prepared
            .iter()
            .map(|(s, m)| WordEnts::of(s, *m))
            .collect();

        let mut best: Option<RankOutcome> = None;
        for (t, cw) in tgts.iter().zip(&cand_words) {
            if let Some(cmp) = compare_full(q, cw, true, &self.cfg) {
                fold_min(
                    &mut best,
                    RankOutcome::new(
                        vec![
                            1,
                            0,
                            0,
                            severity(cmp.con, cmp.bucket, cmp.matra),
                            t.suffix_count(total_words),
                            total,
                            serial as i64,
                        ],
                        format!(
                            "full {} con={} type={} matra={}",
                            t.kind.label(),
                            cmp.con,
                            cmp.bucket,
                            cmp.matra
                        ),
                    ),
                );
            }
        }
        if best.is_some() {
            return best;
        }

        for (t, cw) in tgts.iter().zip(&cand_words) {
            if let Some(cmp) = compare_add_outside(q, cw, None, &self.cfg) {
                fold_min(
                    &mut best,
                    RankOutcome::new(
                        vec![
                            1,
                            2,
                            cmp.outside as i64,
                            cmp.adds as i64,
                            cmp.bucket as i64,
                            cmp.matra as i64,
                            t.suffix_count(total_words),
                            total,
                            serial as i64,
                        ],
                        format!(
                            "ao {} add={} out={}",
                            t.kind.label(),
                            cmp.adds,
                            cmp.outside
                        ),
                    ),
                );
            }
        }
        best
    }

    /// Multi-word fuzzy ranking: FULL word-by-word, then prefix fallback,
    /// then add/outside — the first family in which every word passes wins.
    fn multi_word_typo(
        &self,
        view: &QueryView<'_>,
        c_tokens: &[&str],
        serial: u64,
    ) -> Option<RankOutcome> {
        let k = view.words.len();
        if c_tokens.len() < k {
            return None;
        }
        let suffix = (c_tokens.len() - k) as i64;
        let total = c_tokens.len() as i64;

        let prepared: Vec<(String, u32)> = c_tokens[..k]
            .iter()
            .map(|t| (strip_marks(t), count_marks(t)))
            .collect();
        let cand_words: Vec<WordEnts<'_>> = prepared
            .iter()
            .map(|(s, m)| WordEnts::of(s, *m))
            .collect();

        if let Some(out) = self.try_full(view, &cand_words, suffix, total, serial) {
            return Some(out);
        }
        if let Some(out) = self.try_prefix(view, &cand_words, suffix, total, serial) {
            return Some(out);
        }
        self.try_add_outside(view, &cand_words, suffix, total, serial)
    }

    fn try_full(
        &self,
        view: &QueryView<'_>,
        cand_words: &[WordEnts<'_>],
        suffix: i64,
        total: i64,
        serial: u64,
    ) -> Option<RankOutcome> {
        let k = view.words.len();
        let mut cons = Vec::with_capacity(k);
        let mut severity_sum = 0i64;

        for (qw, cw) in view.words.iter().zip(cand_words) {
            let cmp = compare_full(qw, cw, true, &self.cfg)?;
            severity_sum += severity(cmp.con, cmp.bucket, cmp.matra);
            cons.push(cmp.con);
        }

        let con_total: u32 = cons.iter().sum();
        let cap = if k == 2 {
            self.cfg.max_con_total_2w
        } else {
            self.cfg.max_con_total_3plus_w
        };
        if con_total > cap {
            return None;
        }

        let bucket = typing_bucket(&cons);
        Some(RankOutcome::new(
            vec![1, 0, bucket, severity_sum, suffix, total, serial as i64],
            format!("full bucket={bucket} sev={severity_sum}"),
        ))
    }

    fn try_prefix(
        &self,
        view: &QueryView<'_>,
        cand_words: &[WordEnts<'_>],
        suffix: i64,
        total: i64,
        serial: u64,
    ) -> Option<RankOutcome> {
        let k = view.words.len();
        let mut subs_sum = 0i64;
        let mut type_sum = 0i64;
        let mut matra_sum = 0i64;
        let mut extra_sum = 0i64;

        for (i, (qw, cw)) in view.words.iter().zip(cand_words).enumerate() {
            let qlen = qw.ents.len();
            let cmp: PrefixCmp = if (2..=3).contains(&qlen) {
                compare_prefix(qw, cw, &self.cfg)?
            } else {
                // words outside the PF range must still match exactly in
                // shape; reuse the FULL comparison with zero slop
                let fc = compare_full(qw, cw, true, &self.cfg)?;
                PrefixCmp {
                    subs: fc.con,
                    matra: fc.matra,
                    bucket: fc.bucket,
                    extra: 0,
                }
            };

            let w = (k - i) as i64;
            subs_sum += w * i64::from(cmp.subs);
            type_sum += w * i64::from(cmp.bucket);
            matra_sum += w * i64::from(cmp.matra);
            let amp = if i == 0 {
                i64::from(self.cfg.pf_global_extra_multiplier)
            } else {
                1
            };
            extra_sum += w * amp * i64::from(cmp.extra);
        }

        Some(RankOutcome::new(
            vec![
                1,
                1,
                subs_sum,
                type_sum,
                matra_sum,
                extra_sum,
                suffix,
                total,
                serial as i64,
            ],
            format!("pf subs={subs_sum} extra={extra_sum}"),
        ))
    }

    fn try_add_outside(
        &self,
        view: &QueryView<'_>,
        cand_words: &[WordEnts<'_>],
        suffix: i64,
        total: i64,
        serial: u64,
    ) -> Option<RankOutcome> {
        let k = view.words.len();
        let mut outside_sum = 0i64;
        let mut add_sum = 0i64;
        let mut type_sum = 0i64;
        let mut matra_sum = 0i64;

        for (i, (qw, cw)) in view.words.iter().zip(cand_words).enumerate() {
            let cap = if i == 0 && k > 1 {
                Some(self.cfg.add_first_word_max_add_in_multi)
            } else {
                None
            };
            let cmp = compare_add_outside(qw, cw, cap, &self.cfg)?;

            let w = (k - i) as i64;
            outside_sum += w * i64::from(cmp.outside);
            // first-word additions weigh double
            let amp = if i == 0 { 2 } else { 1 };
            add_sum += w * amp * i64::from(cmp.adds);
            type_sum += w * i64::from(cmp.bucket);
            matra_sum += w * i64::from(cmp.matra);
        }

        Some(RankOutcome::new(
            vec![
                1,
                2,
                outside_sum,
                add_sum,
                type_sum,
                matra_sum,
                suffix,
                total,
                serial as i64,
            ],
            format!("ao out={outside_sum} add={add_sum}"),
        ))
    }
}

/// Fold one word's FULL tallies into a single severity number. The weights
/// keep the three counters in disjoint decimal ranges.
fn severity(con: u32, bucket: u32, matra: u32) -> i64 {
    i64::from(con) * 1_000_000 + i64::from(bucket) * 10_000 + i64::from(matra)
}

/// Map the per-word consonant-mismatch profile to the 0–9 typing bucket.
/// One word has a single profile; two words split on which positions are
/// clean; three-plus words split on the first two positions and the rest,
/// with both-leading-words-dirty pinned to the worst bucket.
fn typing_bucket(cons: &[u32]) -> i64 {
    match cons {
        [] | [_] => 0,
        [c1, c2] => match (*c1 > 0, *c2 > 0) {
            (false, false) => 0,
            (false, true) => 1,
            (true, false) => 2,
            (true, true) => 3,
        },
        [c1, c2, rest @ ..] => {
            let r = rest.iter().any(|&c| c > 0);
            match (*c1 > 0, *c2 > 0, r) {
                (false, false, false) => 0,
                (false, false, true) => 1,
                (false, true, false) => 2,
                (false, true, true) => 3,
                (true, false, false) => 4,
                (true, false, true) => 5,
                (true, true, _) => 9,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_bucket_profiles() {
        assert_eq!(typing_bucket(&[3]), 0);
        assert_eq!(typing_bucket(&[0, 0]), 0);
        assert_eq!(typing_bucket(&[0, 2]), 1);
        assert_eq!(typing_bucket(&[1, 0]), 2);
        assert_eq!(typing_bucket(&[1, 1]), 3);
        assert_eq!(typing_bucket(&[0, 0, 0]), 0);
        assert_eq!(typing_bucket(&[0, 0, 1]), 1);
        assert_eq!(typing_bucket(&[0, 1, 0]), 2);
        assert_eq!(typing_bucket(&[0, 1, 2]), 3);
        assert_eq!(typing_bucket(&[1, 0, 0]), 4);
        assert_eq!(typing_bucket(&[2, 0, 1]), 5);
        assert_eq!(typing_bucket(&[1, 1, 0]), 9);
        assert_eq!(typing_bucket(&[1, 2, 3, 4]), 9);
    }

    #[test]
    fn severity_weights_are_disjoint() {
        assert!(severity(1, 0, 0) > severity(0, 4, 9999));
        assert!(severity(0, 1, 0) > severity(0, 0, 9999));
        assert_eq!(severity(2, 3, 7), 2_030_007);
    }
}
