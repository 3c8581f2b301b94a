use thiserror::Error;

/// Ways a search fetch can fail.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Connection, TLS or timeout failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server responded with {0}")]
    Status(reqwest::StatusCode),

    /// Body was not the JSON shape the search endpoint documents.
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("search worker stopped before responding")]
    WorkerGone,
}
