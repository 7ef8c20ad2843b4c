use rustc_hash::FxHashMap;

use naamkhoj_types::{AcId, RowId, SearchConfig};

use crate::decode::decode_row_ids;
use crate::plan::LookupPlan;
use crate::store::{IndexStore, StoreError};

/// Decode failures are logged with context but sampled, so one corrupt
/// posting family cannot flood the log.
const MAX_DECODE_WARNS: usize = 8;

/// Per-index hit metadata for one candidate row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexHit {
    /// How many of the queried keys listed this row.
    pub hits: u32,
    /// True iff every key queried against this index listed the row.
    pub and_hit: bool,
}

/// The twelve counters carried per candidate: hits and and_hit for each of
/// the six families, zero where a family was not queried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CandidateMeta {
    /// Indexed by [`naamkhoj_types::IndexFamily::ordinal`].
    pub per_index: [IndexHit; 6],
}

/// Union of row ids across all queried indexes, with merge metadata.
#[derive(Debug, Default)]
pub struct CandidateSet {
    pub rows: FxHashMap<RowId, CandidateMeta>,
}

impl CandidateSet {
    /// Row ids in ascending order, for deterministic downstream fetches.
    pub fn sorted_ids(&self) -> Vec<RowId> {
        let mut ids: Vec<RowId> = self.rows.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// Run a lookup plan against one AC's posting lists and merge the results.
///
/// Each index lookup is chunked to the store's bound-parameter budget. A
/// blob that fails to decode drops that key's contribution and the
/// generation continues; store errors propagate.
pub async fn gather_candidates<S: IndexStore>(
    store: &S,
    ac: AcId,
    plan: &LookupPlan,
    cfg: &SearchConfig,
) -> Result<CandidateSet, StoreError> {
    let mut set = CandidateSet::default();
    let mut decode_warns = 0usize;

    for lookup in &plan.lookups {
        let ordinal = lookup.family.ordinal();
        let keys_queried = lookup.keys.len() as u32;
        let mut per_row_hits: FxHashMap<RowId, u32> = FxHashMap::default();

        for chunk in lookup.keys.chunks(cfg.store_param_limit.max(1)) {
            let postings = store.postings(lookup.family, ac, chunk.to_vec()).await?;
            for posting in postings {
                match decode_row_ids(&posting.row_ids, posting.n) {
                    Ok(ids) => {
                        for id in ids {
                            *per_row_hits.entry(id).or_default() += 1;
                        }
                    }
                    Err(err) => {
                        if decode_warns < MAX_DECODE_WARNS {
                            tracing::warn!(
                                family = %lookup.family,
                                ac,
                                key = %posting.key,
                                error = %err,
                                "undecodable posting blob, dropping key"
                            );
                        }
                        decode_warns += 1;
                    }
                }
            }
        }

        for (row_id, hits) in per_row_hits {
            let meta = set.rows.entry(row_id).or_default();
            meta.per_index[ordinal] = IndexHit {
                hits,
                and_hit: hits == keys_queried,
            };
        }
    }

    if decode_warns > MAX_DECODE_WARNS {
        tracing::warn!(
            total = decode_warns,
            shown = MAX_DECODE_WARNS,
            "further decode failures suppressed"
        );
    }

    Ok(set)
}
