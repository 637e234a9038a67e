use leadfinder_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The backend answered 2xx but reported an error in the body
    /// (region-search responses carry an `error` key in that case).
    #[error("backend error: {message}")]
    Backend { message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("stream ended without a result")]
    IncompleteStream,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
