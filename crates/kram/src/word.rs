use naamkhoj_types::SearchConfig;
use naamkhoj_varna::{SubstType, is_matra_like, segment, subst_type};

/// A word prepared for comparison: its entity segmentation (over the
/// mark-stripped text) and the count of combining marks the stripping
/// removed.
#[derive(Debug, Clone)]
pub struct WordEnts<'a> {
    pub ents: Vec<&'a str>,
    pub marks: u32,
}

impl<'a> WordEnts<'a> {
    /// `stripped` must already be mark-free; `marks` is how many marks the
    /// original word carried.
    pub fn of(stripped: &'a str, marks: u32) -> Self {
        Self {
            ents: segment(stripped),
            marks,
        }
    }
}

/// Which substitution classes a word's consonant mismatches drew on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubTally {
    pub phonetic: u32,
    pub visual_p0: u32,
    pub visual_p1: u32,
    pub visual_p2: u32,
}

impl SubTally {
    fn record(&mut self, t: SubstType) {
        match t {
            SubstType::Phonetic => self.phonetic += 1,
            SubstType::VisualP0 => self.visual_p0 += 1,
            SubstType::VisualP1 => self.visual_p1 += 1,
            SubstType::VisualP2 => self.visual_p2 += 1,
            SubstType::Exact | SubstType::Other => {}
        }
    }

    fn total(&self) -> u32 {
        self.phonetic + self.visual_p0 + self.visual_p1 + self.visual_p2
    }

    /// Fold the tally into the 0–4 type bucket: 0 none-or-phonetic-only,
    /// 1/2/3 a single visual tier, 4 any mixing.
    pub fn type_bucket(&self) -> u32 {
        let visual = self.visual_p0 + self.visual_p1 + self.visual_p2;
        if self.total() == 0 || visual == 0 {
            return 0;
        }
        if self.phonetic > 0 {
            return 4;
        }
        match (
            self.visual_p0 > 0,
            self.visual_p1 > 0,
            self.visual_p2 > 0,
        ) {
            (true, false, false) => 1,
            (false, true, false) => 2,
            (false, false, true) => 3,
            _ => 4,
        }
    }
}

/// Result of the FULL comparison: equal entity counts, every mismatch
/// explained by a substitution set (or a matra slot).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullCmp {
    pub con: u32,
    pub matra: u32,
    pub bucket: u32,
}

/// Word-by-word FULL comparison; no inserts or deletes.
pub fn compare_full(
    q: &WordEnts<'_>,
    c: &WordEnts<'_>,
    allow_subs: bool,
    cfg: &SearchConfig,
) -> Option<FullCmp> {
    if q.ents.len() != c.ents.len() {
        return None;
    }
    let marks_diff = q.marks.abs_diff(c.marks);

    let mut con = 0u32;
    let mut matra = 0u32;
    let mut tally = SubTally::default();

    for (&a, &b) in q.ents.iter().zip(&c.ents) {
        if a == b {
            continue;
        }
        if is_matra_like(a) || is_matra_like(b) {
            matra += 1;
            continue;
        }
        if !allow_subs {
            return None;
        }
        let t = subst_type(a, b);
        if t == SubstType::Other {
            return None;
        }
        tally.record(t);
        con += 1;
    }

    matra += marks_diff;
    if con > cfg.max_con_per_word {
        return None;
    }

    Some(FullCmp {
        con,
        matra,
        bucket: tally.type_bucket(),
    })
}

/// Result of the prefix-fallback comparison for short query words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixCmp {
    pub subs: u32,
    pub matra: u32,
    pub bucket: u32,
    /// Trailing candidate entities beyond the aligned prefix.
    pub extra: u32,
}

/// Prefix-fallback comparison: only for 2- and 3-entity query words, with a
/// bounded trailing slop on the candidate and a tight substitution cap.
pub fn compare_prefix(
    q: &WordEnts<'_>,
    c: &WordEnts<'_>,
    cfg: &SearchConfig,
) -> Option<PrefixCmp> {
    let qlen = q.ents.len();
    if !(2..=3).contains(&qlen) || c.ents.len() < qlen {
        return None;
    }
    let extra = (c.ents.len() - qlen) as u32;
    if extra > cfg.pf_max_extra_suffix_per_word {
        return None;
    }
    let max_subs = if qlen == 2 {
        cfg.pf_max_subs_for_2
    } else {
        cfg.pf_max_subs_for_3
    };

    let mut subs = 0u32;
    let mut matra = 0u32;
    let mut tally = SubTally::default();

    for (&a, &b) in q.ents.iter().zip(&c.ents) {
        if a == b {
            continue;
        }
        if is_matra_like(a) || is_matra_like(b) {
            matra += 1;
            continue;
        }
        let t = subst_type(a, b);
        if t == SubstType::Other {
            return None;
        }
        tally.record(t);
        subs += 1;
        if subs > max_subs {
            return None;
        }
    }

    matra += q.marks.abs_diff(c.marks);
    Some(PrefixCmp {
        subs,
        matra,
        bucket: tally.type_bucket(),
        extra,
    })
}

/// Result of the add/outside comparison, the most permissive family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutsideCmp {
    /// Candidate entities beyond the query length.
    pub adds: u32,
    /// Aligned mismatches explained by no substitution set.
    pub outside: u32,
    /// Aligned mismatches explained by a substitution set.
    pub inside: u32,
    pub matra: u32,
    pub bucket: u32,
}

/// Additions-plus-outside-substitutions comparison. `capped_adds` bounds the
/// addition count (first word of a multi-word query); `None` leaves
/// additions unlimited.
pub fn compare_add_outside(
    q: &WordEnts<'_>,
    c: &WordEnts<'_>,
    capped_adds: Option<u32>,
    cfg: &SearchConfig,
) -> Option<AddOutsideCmp> {
    let qlen = q.ents.len();
    if c.ents.len() < qlen {
        return None;
    }
    let adds = (c.ents.len() - qlen) as u32;
    if let Some(cap) = capped_adds {
        if adds > cap {
            return None;
        }
    }
    let outside_cap = cfg.outside_caps.cap_for_len(qlen);

    let mut outside = 0u32;
    let mut inside = 0u32;
    let mut matra = 0u32;
    let mut tally = SubTally::default();

    for (&a, &b) in q.ents.iter().zip(&c.ents) {
        if a == b {
            continue;
        }
        if is_matra_like(a) || is_matra_like(b) {
            matra += 1;
            continue;
        }
        match subst_type(a, b) {
            SubstType::Other => {
                outside += 1;
                if outside > outside_cap {
                    return None;
                }
            }
            t => {
                tally.record(t);
                inside += 1;
            }
        }
    }

    matra += q.marks.abs_diff(c.marks);
    Some(AddOutsideCmp {
        adds,
        outside,
        inside,
        matra,
        bucket: tally.type_bucket(),
    })
}
