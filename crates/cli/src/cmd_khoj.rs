use std::process::ExitCode;
use std::sync::Arc;

use serde::Serialize;

use naamkhoj_suchi::{MemoryStore, RawRow};
use naamkhoj_types::{AcId, Scope, SearchConfig};
use naamkhoj_yantra::{CancellationToken, SearchEngine, SearchRequest, SearchResponse};

use crate::OutputFormat;

/// JSON-serializable hit.
#[derive(Serialize)]
struct JsonHit {
    ac: AcId,
    row_id: u64,
    serial_no: u64,
    voter_name: String,
    relative_name: String,
    field: String,
    key: String,
    why: String,
}

pub fn run(
    query: &str,
    data: &str,
    acs: Vec<AcId>,
    scope: Scope,
    exact_only: bool,
    limit: Option<usize>,
    format: OutputFormat,
) -> ExitCode {
    let rows: Vec<RawRow> = match load_snapshot(data) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let cfg = SearchConfig::default();
    let store = MemoryStore::from_rows(cfg.clone(), rows);
    let acs = if acs.is_empty() { store.acs() } else { acs };
    let engine = SearchEngine::new(Arc::new(store), cfg);

    let request = SearchRequest {
        query: query.to_string(),
        acs,
        scope,
        exact_only,
        limit,
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to start runtime: {e}");
            return ExitCode::from(2);
        }
    };
    let response = match runtime.block_on(engine.search(request, CancellationToken::new(), None)) {
        Ok(resp) => resp,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(1);
        }
    };

    match format {
        OutputFormat::Text => print_text(&response),
        OutputFormat::Json => print_json(&response),
    }
    ExitCode::SUCCESS
}

fn load_snapshot(path: &str) -> Result<Vec<RawRow>, String> {
    let text = std::fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
    serde_json::from_str(&text).map_err(|e| format!("{path}: {e}"))
}

fn print_text(response: &SearchResponse) {
    for failure in &response.failures {
        eprintln!("warning: AC {}: {}", failure.ac, failure.message);
    }
    if response.hits.is_empty() {
        println!("no matches");
        return;
    }
    for (i, hit) in response.hits.iter().enumerate() {
        println!(
            "{:>3}. [AC {} #{}] {} / {} ({})",
            i + 1,
            hit.ac,
            hit.row.serial_no,
            hit.row.voter_name_raw,
            hit.row.relative_name_raw,
            hit.why
        );
    }
}

fn print_json(response: &SearchResponse) {
    let entries: Vec<JsonHit> = response
        .hits
        .iter()
        .map(|hit| JsonHit {
            ac: hit.ac,
            row_id: hit.row.row_id,
            serial_no: hit.row.serial_no,
            voter_name: hit.row.voter_name_raw.clone(),
            relative_name: hit.row.relative_name_raw.clone(),
            field: format!("{:?}", hit.field).to_lowercase(),
            key: hit.key.to_string(),
            why: hit.why.clone(),
        })
        .collect();

    match serde_json::to_string_pretty(&entries) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("error: failed to serialize hits: {e}");
            println!("[]");
        }
    }
}
