mod candidates;
mod decode;
mod memory;
mod plan;
mod store;

pub use candidates::{CandidateMeta, CandidateSet, IndexHit, gather_candidates};
pub use decode::{DecodeError, decode_row_ids};
pub use memory::{MemoryStore, RawRow};
pub use plan::{Lookup, LookupPlan, build_plan};
pub use store::{IndexStore, PostingRow, RowStore, StoreError};
