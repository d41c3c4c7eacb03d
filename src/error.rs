use reqwest::StatusCode;

/// Errors surfaced by the catalog gateway and the section controllers.
///
/// Display strings are the user-facing failure messages: a section that fails
/// stores `error.to_string()` in its `Failed` state, so the wording here is
/// what the presentation layer renders next to the reload affordance.
#[derive(thiserror::Error, Debug)]
pub enum FeedError {
    /// HTTP 404 from the catalog service
    #[error("resource not found")]
    NotFound,

    /// HTTP 5xx from the catalog service
    #[error("server error")]
    Server(u16),

    /// Any other HTTP 4xx from the catalog service
    #[error("client error: {0}")]
    Client(u16),

    /// No usable response received (DNS, connect, timeout, body read)
    #[error("network error")]
    Transport(#[from] reqwest::Error),

    /// A response arrived but could not be interpreted
    #[error("failed to load content")]
    Malformed { detail: String },
}

impl FeedError {
    /// Maps a non-success HTTP status onto the error taxonomy.
    ///
    /// Only called for statuses outside 2xx; anything that is neither 4xx nor
    /// 5xx is treated as an uninterpretable response.
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            404 => FeedError::NotFound,
            code if code >= 500 => FeedError::Server(code),
            code if code >= 400 => FeedError::Client(code),
            code => FeedError::Malformed {
                detail: format!("unexpected status {}", code),
            },
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        FeedError::Malformed {
            detail: detail.into(),
        }
    }
}

pub type FeedResult<T> = Result<T, FeedError>;
