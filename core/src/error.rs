//! Error types for sending requests and decoding responses.
//!
//! # Design
//! One variant per stage of `Request::send` that can fail, plus `Decode` for
//! `Response::decode`. Engine failures of every kind (refused connections,
//! DNS, TLS, timeouts) collapse into `Transport`, with the engine's own error
//! kept as the source so callers can still dig into it.

use thiserror::Error;

/// Boxed error returned by an [`HttpEngine`](crate::http::HttpEngine).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The method or URI could not form a valid request.
    #[error("invalid request: {0}")]
    RequestConstruction(String),

    /// The engine failed to complete the exchange.
    #[error("transport failed: {0}")]
    Transport(#[source] BoxError),

    /// The response body could not be read in full.
    #[error("failed to read response body: {0}")]
    BodyRead(#[from] std::io::Error),

    /// The response body is not well-formed for the requested type.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Whether the failure was caused by the engine's timeout.
    pub fn is_timeout(&self) -> bool {
        let Error::Transport(source) = self else {
            return false;
        };
        let first: &(dyn std::error::Error + 'static) = &**source;
        let mut current = Some(first);
        while let Some(err) = current {
            if let Some(ureq::Error::Timeout(_)) = err.downcast_ref::<ureq::Error>() {
                return true;
            }
            if let Some(io) = err.downcast_ref::<std::io::Error>() {
                if io.kind() == std::io::ErrorKind::TimedOut {
                    return true;
                }
            }
            current = err.source();
        }
        false
    }
}
