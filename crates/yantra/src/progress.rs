use std::sync::Arc;

/// Pipeline phase a progress report refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Candidates,
    Rows,
    Rank,
    Merge,
}

/// A progress snapshot handed to the caller's sink. Callers use these for
/// external throttling; the engine applies no timeouts of its own.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    pub phase: Phase,
    pub done: usize,
    pub total: usize,
    pub candidates: usize,
}

/// Progress sink, shared across the per-AC tasks.
pub type ProgressFn = Arc<dyn Fn(Progress) + Send + Sync>;

pub(crate) fn report(
    sink: Option<&ProgressFn>,
    phase: Phase,
    done: usize,
    total: usize,
    candidates: usize,
) {
    if let Some(f) = sink {
        f(Progress {
            phase,
            done,
            total,
            candidates,
        });
    }
}
