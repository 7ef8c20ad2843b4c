mod devanagari;
mod entity;
mod groups;
mod normalize;

pub use devanagari::{is_combining_mark, is_matra, vowel_bucket};
pub use entity::{EntityTable, SubstType, entities, is_matra_like, segment, subst_type};
pub use groups::{
    LOOSE_FOLD_GROUPS, PHONETIC_GROUPS, VISUAL_P0_GROUPS, VISUAL_P1_GROUPS, VISUAL_P2_GROUPS,
    loose_fold,
};
pub use normalize::{
    count_marks, norm_exact, norm_loose, norm_strict, strip_marks, tokenize, tokenize_strict,
};
