use std::borrow::Cow;

use crate::key::{RankOutcome, fold_min};

/// Target kinds, in preference order. A TOKEN match beats a JOIN2 match
/// beats a FULLJOIN match at the same position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Token,
    Join2,
    FullJoin,
}

impl TargetKind {
    pub fn rank(self) -> i64 {
        match self {
            TargetKind::Token => 0,
            TargetKind::Join2 => 1,
            TargetKind::FullJoin => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TargetKind::Token => "token",
            TargetKind::Join2 => "join2",
            TargetKind::FullJoin => "fulljoin",
        }
    }
}

/// One comparison target drawn from a candidate's token sequence.
#[derive(Debug, Clone)]
pub struct Target<'a> {
    pub text: Cow<'a, str>,
    pub kind: TargetKind,
    /// Index of the first candidate word this target covers.
    pub pos: usize,
    /// How many candidate words it covers.
    pub span: usize,
}

impl Target<'_> {
    /// Candidate words after the covered span.
    pub fn suffix_count(&self, total_words: usize) -> i64 {
        (total_words - (self.pos + self.span)) as i64
    }
}

/// Enumerate the targets of a candidate token sequence: every token, every
/// adjacent 2-token concatenation, and the full concatenation when there is
/// more than one token.
pub fn targets<'a>(tokens: &[&'a str]) -> Vec<Target<'a>> {
    let mut out: Vec<Target<'a>> = Vec::with_capacity(tokens.len() * 2 + 1);
    for (i, &t) in tokens.iter().enumerate() {
        out.push(Target {
            text: Cow::Borrowed(t),
            kind: TargetKind::Token,
            pos: i,
            span: 1,
        });
    }
    if tokens.len() >= 2 {
        for (i, pair) in tokens.windows(2).enumerate() {
            out.push(Target {
                text: Cow::Owned(format!("{}{}", pair[0], pair[1])),
                kind: TargetKind::Join2,
                pos: i,
                span: 2,
            });
        }
        out.push(Target {
            text: Cow::Owned(tokens.concat()),
            kind: TargetKind::FullJoin,
            pos: 0,
            span: tokens.len(),
        });
    }
    out
}

/// Exact scenarios for a single-token query. Scenario 0 is the best
/// string-equal target by (kind, position, span); scenario 1 — first token
/// equal, suffix words counted — is still emitted alongside, as the source
/// did, and the min-key fold coalesces the redundancy without ever promoting
/// a worse match.
pub(crate) fn exact_single(
    q: &str,
    tgts: &[Target<'_>],
    total_words: usize,
    serial: u64,
) -> Option<RankOutcome> {
    let mut out: Option<RankOutcome> = None;

    let best = tgts
        .iter()
        .filter(|t| t.text == q)
        .min_by_key(|t| (t.kind.rank(), t.pos, t.span));
    if let Some(t) = best {
        fold_min(
            &mut out,
            RankOutcome::new(
                vec![
                    0,
                    0,
                    t.kind.rank(),
                    t.pos as i64,
                    t.suffix_count(total_words),
                    total_words as i64,
                    serial as i64,
                ],
                format!("exact {}@{}", t.kind.label(), t.pos),
            ),
        );
    }

    let first_token_eq = tgts
        .iter()
        .any(|t| t.kind == TargetKind::Token && t.pos == 0 && t.text == q);
    if first_token_eq {
        fold_min(
            &mut out,
            RankOutcome::new(
                vec![
                    0,
                    1,
                    0,
                    0,
                    (total_words - 1) as i64,
                    total_words as i64,
                    serial as i64,
                ],
                "exact first-word".to_string(),
            ),
        );
    }

    out
}

/// Exact scenario for a multi-token query: the candidate's first |q| words
/// equal the query elementwise.
pub(crate) fn exact_multi(
    q_tokens: &[&str],
    c_tokens: &[&str],
    serial: u64,
) -> Option<RankOutcome> {
    let k = q_tokens.len();
    if c_tokens.len() < k {
        return None;
    }
    if !q_tokens.iter().zip(c_tokens).all(|(a, b)| a == b) {
        return None;
    }
    let suffix = (c_tokens.len() - k) as i64;
    Some(RankOutcome::new(
        vec![
            0,
            10,
            0,
            0,
            suffix,
            c_tokens.len() as i64,
            serial as i64,
        ],
        format!("exact words={k}"),
    ))
}
