/// Error taxonomy for backend calls: server errors carry a fixed message,
/// client errors carry whatever detail the backend supplied, transport and
/// decode failures propagate as-is.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Internal server error")]
    Server,

    #[error("{0}")]
    Client(String),

    #[error("reqwest error: {0:?}")]
    Reqwest(#[from] reqwest::Error),

    #[error("invalid response body: {0:?}")]
    Decode(#[from] serde_json::Error),
}
