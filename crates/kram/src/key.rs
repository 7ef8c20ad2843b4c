/// A lexicographic ranking key; lower sorts first. The first element is the
/// mode (0 exact, 1 typo), the last is always the row's serial number, and
/// the elements between depend on the mode — keys of different shapes only
/// meet in a comparison after diverging on the mode/family elements.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RankKey(Vec<i64>);

impl RankKey {
    pub fn new(vals: Vec<i64>) -> Self {
        Self(vals)
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }
}

impl std::fmt::Display for RankKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A ranking key plus the breadcrumb explaining how it was produced.
#[derive(Debug, Clone)]
pub struct RankOutcome {
    pub key: RankKey,
    pub why: String,
}

impl RankOutcome {
    pub fn new(vals: Vec<i64>, why: impl Into<String>) -> Self {
        Self {
            key: RankKey::new(vals),
            why: why.into(),
        }
    }
}

/// Keep the smaller-keyed outcome; `current` wins ties.
pub(crate) fn fold_min(current: &mut Option<RankOutcome>, candidate: RankOutcome) {
    match current {
        Some(best) if best.key <= candidate.key => {}
        _ => *current = Some(candidate),
    }
}
