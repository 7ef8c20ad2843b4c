mod exact;
mod key;
mod rank;
mod word;

pub use exact::{Target, TargetKind, targets};
pub use key::{RankKey, RankOutcome};
pub use rank::{QueryView, RankContext, RankedRow};
pub use word::{
    AddOutsideCmp, FullCmp, PrefixCmp, SubTally, WordEnts, compare_add_outside, compare_full,
    compare_prefix,
};
