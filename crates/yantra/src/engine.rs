use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use naamkhoj_kram::{RankContext, RankKey};
use naamkhoj_suchi::{IndexStore, LookupPlan, RowStore, StoreError, build_plan, gather_candidates};
use naamkhoj_types::{AcId, Field, Scope, ScoreRow, SearchConfig};

use crate::progress::{Phase, ProgressFn, report};

/// One search request. The AC list is the query's scope within the roll;
/// each AC is generated, fetched, and ranked independently.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub acs: Vec<AcId>,
    pub scope: Scope,
    pub exact_only: bool,
    /// Truncate the merged result to this many hits.
    pub limit: Option<usize>,
}

/// A ranked hit.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub ac: AcId,
    pub row: ScoreRow,
    pub key: RankKey,
    pub why: String,
    pub field: Field,
}

/// A permanently failed AC; the rest of the request still completes.
#[derive(Debug, Clone)]
pub struct AcFailure {
    pub ac: AcId,
    pub message: String,
}

/// The merged, totally ordered result of one request.
#[derive(Debug, Default)]
pub struct SearchResponse {
    pub hits: Vec<SearchHit>,
    pub failures: Vec<AcFailure>,
    /// True when the request was cancelled; hits are then empty.
    pub cancelled: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum YantraError {
    /// Transient store failure; the caller may retry the whole request.
    #[error("store unavailable: {0}")]
    Store(String),
}

/// The search engine over one storage backend. Shared immutably; every
/// request owns its own context and scratch state.
pub struct SearchEngine<S> {
    store: Arc<S>,
    cfg: SearchConfig,
}

impl<S> SearchEngine<S>
where
    S: IndexStore + RowStore + 'static,
{
    pub fn new(store: Arc<S>, cfg: SearchConfig) -> Self {
        Self { store, cfg }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.cfg
    }

    /// Run one request: fan out over its ACs with bounded concurrency, rank
    /// every candidate row, and merge into one totally ordered hit list.
    ///
    /// Cancellation is not an error: the engine returns promptly with an
    /// empty, `cancelled` response and discards partial merges. For a fixed
    /// snapshot the output order is bit-identical across runs.
    pub async fn search(
        &self,
        req: SearchRequest,
        cancel: CancellationToken,
        progress: Option<ProgressFn>,
    ) -> Result<SearchResponse, YantraError> {
        let ctx = Arc::new(RankContext::new(
            &req.query,
            req.scope,
            req.exact_only,
            self.cfg.clone(),
        ));
        if ctx.is_empty() || req.acs.is_empty() {
            return Ok(SearchResponse::default());
        }

        let plan = Arc::new(build_plan(
            &req.query,
            req.scope,
            req.exact_only,
            &self.cfg,
        ));
        tracing::debug!(
            query = %req.query,
            acs = req.acs.len(),
            lookups = plan.lookups.len(),
            "search start"
        );

        let semaphore = Arc::new(Semaphore::new(self.cfg.ac_concurrency.max(1)));
        let mut tasks: JoinSet<(AcId, Result<Vec<SearchHit>, StoreError>)> = JoinSet::new();

        for &ac in &req.acs {
            let store = Arc::clone(&self.store);
            let ctx = Arc::clone(&ctx);
            let plan = Arc::clone(&plan);
            let cfg = self.cfg.clone();
            let cancel = cancel.clone();
            let semaphore = Arc::clone(&semaphore);
            let progress = progress.clone();

            tasks.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (ac, Ok(Vec::new()));
                };
                if cancel.is_cancelled() {
                    return (ac, Ok(Vec::new()));
                }
                let result =
                    search_ac(&*store, ac, &ctx, &plan, &cfg, &cancel, progress.as_ref()).await;
                (ac, result)
            });
        }

        let mut hits: Vec<SearchHit> = Vec::new();
        let mut failures: Vec<AcFailure> = Vec::new();
        let total_acs = req.acs.len();
        let mut done = 0usize;

        while let Some(joined) = tasks.join_next().await {
            let (ac, result) = match joined {
                Ok(pair) => pair,
                Err(err) => {
                    tracing::error!(error = %err, "ac task did not complete");
                    continue;
                }
            };
            match result {
                Ok(mut ac_hits) => hits.append(&mut ac_hits),
                Err(StoreError::Unavailable(msg)) => {
                    tasks.abort_all();
                    return Err(YantraError::Store(msg));
                }
                Err(err @ StoreError::UnknownAc(_)) => {
                    tracing::warn!(ac, error = %err, "ac failed permanently");
                    failures.push(AcFailure {
                        ac,
                        message: err.to_string(),
                    });
                }
            }
            done += 1;
            report(progress.as_ref(), Phase::Merge, done, total_acs, hits.len());
        }

        if cancel.is_cancelled() {
            return Ok(SearchResponse {
                cancelled: true,
                ..SearchResponse::default()
            });
        }

        // the final total order; serial already sits at the end of every key
        hits.sort_by(|a, b| {
            a.key
                .cmp(&b.key)
                .then_with(|| a.row.row_id.cmp(&b.row.row_id))
                .then_with(|| a.ac.cmp(&b.ac))
        });
        if let Some(limit) = req.limit {
            hits.truncate(limit);
        }

        // failures in AC order, independent of task completion order
        failures.sort_by_key(|f| f.ac);

        tracing::debug!(hits = hits.len(), failures = failures.len(), "search done");
        Ok(SearchResponse {
            hits,
            failures,
            cancelled: false,
        })
    }
}

/// Generate, fetch, and rank one AC. Cancellation is observed between every
/// suspension point and between rows; an in-flight store call is abandoned
/// by the select.
async fn search_ac<S>(
    store: &S,
    ac: AcId,
    ctx: &RankContext,
    plan: &LookupPlan,
    cfg: &SearchConfig,
    cancel: &CancellationToken,
    progress: Option<&ProgressFn>,
) -> Result<Vec<SearchHit>, StoreError>
where
    S: IndexStore + RowStore,
{
    let candidates = tokio::select! {
        _ = cancel.cancelled() => return Ok(Vec::new()),
        res = gather_candidates(store, ac, plan, cfg) => res?,
    };
    let ids = candidates.sorted_ids();
    report(progress, Phase::Candidates, 1, 1, ids.len());

    let mut rows: Vec<ScoreRow> = Vec::with_capacity(ids.len());
    for chunk in ids.chunks(cfg.store_param_limit.max(1)) {
        let fetched = tokio::select! {
            _ = cancel.cancelled() => return Ok(Vec::new()),
            res = store.fetch_rows(ac, chunk.to_vec()) => res?,
        };
        rows.extend(fetched);
        report(progress, Phase::Rows, rows.len(), ids.len(), ids.len());
    }

    let view = ctx.view();
    let mut hits = Vec::new();
    for row in &rows {
        if cancel.is_cancelled() {
            return Ok(Vec::new());
        }
        if let Some(ranked) = ctx.rank_row(&view, row) {
            hits.push(SearchHit {
                ac,
                row: row.clone(),
                key: ranked.key,
                why: ranked.why,
                field: ranked.field,
            });
        }
    }
    report(progress, Phase::Rank, rows.len(), rows.len(), hits.len());
    Ok(hits)
}
