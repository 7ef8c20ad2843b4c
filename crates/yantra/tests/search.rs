use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use naamkhoj_suchi::{IndexStore, MemoryStore, PostingRow, RawRow, RowStore, StoreError};
use naamkhoj_types::{AcId, IndexFamily, RowId, Scope, ScoreRow, SearchConfig};
use naamkhoj_yantra::{CancellationToken, Phase, SearchEngine, SearchRequest, YantraError};

fn dataset() -> MemoryStore {
    MemoryStore::from_rows(
        SearchConfig::default(),
        [
            RawRow {
                ac: 1,
                row_id: 1,
                voter_name: "राम कुमार".into(),
                relative_name: "श्याम लाल".into(),
                serial_no: 11,
            },
            RawRow {
                ac: 1,
                row_id: 2,
                voter_name: "राम".into(),
                relative_name: "मोहन".into(),
                serial_no: 12,
            },
            RawRow {
                ac: 1,
                row_id: 3,
                voter_name: "रामलाल शर्मा".into(),
                relative_name: "गीता".into(),
                serial_no: 13,
            },
            RawRow {
                ac: 1,
                row_id: 4,
                voter_name: "वाला देवी".into(),
                relative_name: "राम कुमार".into(),
                serial_no: 14,
            },
            RawRow {
                ac: 2,
                row_id: 1,
                voter_name: "सीता देवी".into(),
                relative_name: "राम".into(),
                serial_no: 21,
            },
        ],
    )
}

fn engine() -> SearchEngine<MemoryStore> {
    SearchEngine::new(Arc::new(dataset()), SearchConfig::default())
}

fn request(query: &str, acs: Vec<AcId>, scope: Scope) -> SearchRequest {
    SearchRequest {
        query: query.to_string(),
        acs,
        scope,
        exact_only: false,
        limit: None,
    }
}

#[tokio::test]
async fn merged_order_puts_exact_before_typo() {
    let engine = engine();
    let resp = engine
        .search(
            request("राम", vec![1, 2], Scope::Anywhere),
            CancellationToken::new(),
            None,
        )
        .await
        .unwrap();

    let order: Vec<(AcId, RowId)> = resp.hits.iter().map(|h| (h.ac, h.row.row_id)).collect();
    // bare राम (serial 12), then the relative-field राम in AC 2 (serial 21),
    // then the two-word exact rows by serial, then the typo row
    assert_eq!(order, vec![(1, 2), (2, 1), (1, 1), (1, 4), (1, 3)]);

    let exact_count = resp
        .hits
        .iter()
        .take_while(|h| h.key.as_slice()[0] == 0)
        .count();
    assert_eq!(exact_count, 4, "all exact rows precede every typo row");
}

#[tokio::test]
async fn output_is_bit_identical_across_runs() {
    let engine = engine();
    let run = || async {
        let resp = engine
            .search(
                request("राम कुमार", vec![1, 2], Scope::Anywhere),
                CancellationToken::new(),
                None,
            )
            .await
            .unwrap();
        resp.hits
            .iter()
            .map(|h| (h.ac, h.row.row_id, h.key.to_string(), h.why.clone()))
            .collect::<Vec<_>>()
    };
    let first = run().await;
    for _ in 0..4 {
        assert_eq!(first, run().await);
    }
}

#[tokio::test]
async fn unknown_ac_fails_alone() {
    let engine = engine();
    let resp = engine
        .search(
            request("राम", vec![1, 99], Scope::Voter),
            CancellationToken::new(),
            None,
        )
        .await
        .unwrap();

    assert!(!resp.hits.is_empty(), "AC 1 results still arrive");
    assert_eq!(resp.failures.len(), 1);
    assert_eq!(resp.failures[0].ac, 99);
}

struct FailingStore;

impl IndexStore for FailingStore {
    async fn postings(
        &self,
        _family: IndexFamily,
        _ac: AcId,
        _keys: Vec<String>,
    ) -> Result<Vec<PostingRow>, StoreError> {
        Err(StoreError::Unavailable("connection reset".into()))
    }
}

impl RowStore for FailingStore {
    async fn fetch_rows(&self, _ac: AcId, _ids: Vec<RowId>) -> Result<Vec<ScoreRow>, StoreError> {
        Err(StoreError::Unavailable("connection reset".into()))
    }
}

#[tokio::test]
async fn transient_store_error_propagates() {
    let engine = SearchEngine::new(Arc::new(FailingStore), SearchConfig::default());
    let err = engine
        .search(
            request("राम", vec![1], Scope::Voter),
            CancellationToken::new(),
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, YantraError::Store(_)));
}

#[tokio::test]
async fn cancelled_request_returns_empty_promptly() {
    let engine = engine();
    let cancel = CancellationToken::new();
    cancel.cancel();
    let resp = engine
        .search(request("राम", vec![1, 2], Scope::Anywhere), cancel, None)
        .await
        .unwrap();
    assert!(resp.cancelled);
    assert!(resp.hits.is_empty());
}

#[tokio::test]
async fn progress_callback_reports_phases() {
    let engine = engine();
    let merges = Arc::new(AtomicUsize::new(0));
    let calls = Arc::new(AtomicUsize::new(0));
    let sink: naamkhoj_yantra::ProgressFn = {
        let merges = Arc::clone(&merges);
        let calls = Arc::clone(&calls);
        Arc::new(move |p| {
            calls.fetch_add(1, Ordering::SeqCst);
            if p.phase == Phase::Merge {
                merges.fetch_add(1, Ordering::SeqCst);
            }
        })
    };
    engine
        .search(
            request("राम", vec![1, 2], Scope::Anywhere),
            CancellationToken::new(),
            Some(sink),
        )
        .await
        .unwrap();

    assert!(calls.load(Ordering::SeqCst) > 0);
    assert_eq!(merges.load(Ordering::SeqCst), 2, "one merge tick per AC");
}

#[tokio::test]
async fn limit_truncates_the_merged_list() {
    let engine = engine();
    let mut req = request("राम", vec![1, 2], Scope::Anywhere);
    req.limit = Some(2);
    let resp = engine
        .search(req, CancellationToken::new(), None)
        .await
        .unwrap();
    assert_eq!(resp.hits.len(), 2);
    // truncation keeps the best keys
    assert_eq!(resp.hits[0].row.serial_no, 12);
}

#[tokio::test]
async fn exact_only_hits_are_a_subset_of_fuzzy_hits() {
    let engine = engine();
    let fuzzy = engine
        .search(
            request("बाला", vec![1], Scope::Voter),
            CancellationToken::new(),
            None,
        )
        .await
        .unwrap();

    let mut req = request("बाला", vec![1], Scope::Voter);
    req.exact_only = true;
    let exact = engine
        .search(req, CancellationToken::new(), None)
        .await
        .unwrap();

    // बाला vs वाला is a loose/phonetic match: present fuzzily, absent exactly
    assert!(fuzzy.hits.iter().any(|h| h.row.row_id == 4));
    for h in &exact.hits {
        assert!(fuzzy.hits.iter().any(|f| f.row.row_id == h.row.row_id));
    }
    assert!(exact.hits.is_empty());
}

#[tokio::test]
async fn empty_query_returns_no_hits() {
    let engine = engine();
    let resp = engine
        .search(
            request("  ", vec![1], Scope::Anywhere),
            CancellationToken::new(),
            None,
        )
        .await
        .unwrap();
    assert!(resp.hits.is_empty());
    assert!(resp.failures.is_empty());
}
