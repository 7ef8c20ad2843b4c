use std::future::Future;

use naamkhoj_types::{AcId, IndexFamily, RowId, ScoreRow};

/// One posting-list row as returned by the index store.
#[derive(Debug, Clone)]
pub struct PostingRow {
    pub key: String,
    /// Opaque row-id blob; see [`crate::decode_row_ids`] for the accepted
    /// encodings.
    pub row_ids: Vec<u8>,
    /// Companion count column, when the loader wrote one.
    pub n: Option<u64>,
}

/// Store failures, split by how the engine reacts.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Transient I/O failure. Propagated to the caller as retriable; the
    /// engine does not retry internally.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The AC does not exist in this backend. Permanent; recorded per AC
    /// while other ACs complete.
    #[error("unknown AC {0}")]
    UnknownAc(AcId),
}

/// Read access to the six posting-list indexes. Callers chunk key lists to
/// the store's parameter budget; implementations impose no per-call limit.
pub trait IndexStore: Send + Sync {
    fn postings(
        &self,
        family: IndexFamily,
        ac: AcId,
        keys: Vec<String>,
    ) -> impl Future<Output = Result<Vec<PostingRow>, StoreError>> + Send;
}

/// Read access to candidate rows in scoring shape.
pub trait RowStore: Send + Sync {
    fn fetch_rows(
        &self,
        ac: AcId,
        ids: Vec<RowId>,
    ) -> impl Future<Output = Result<Vec<ScoreRow>, StoreError>> + Send;
}
