mod engine;
mod progress;

pub use engine::{AcFailure, SearchEngine, SearchHit, SearchRequest, SearchResponse, YantraError};
pub use progress::{Phase, Progress, ProgressFn};

pub use tokio_util::sync::CancellationToken;
