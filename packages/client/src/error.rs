//! Error types for the client crate.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    #[error("invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("argument '{name}' must not be blank")]
    BlankArgument { name: &'static str },

    #[error("credential '{name}' must not be empty")]
    EmptyCredential { name: &'static str },

    #[error("redirect limit of {limit} exceeded at {url}")]
    RedirectLimitExceeded { limit: usize, url: String },

    #[error("client is closed")]
    Closed,
}
