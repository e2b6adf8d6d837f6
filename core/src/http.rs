//! Transport-level request and response types and the engine seam.
//!
//! # Design
//! `Request::send` lowers its builder state into an `HttpRequest`, plain data
//! with the method, the final URI (query string already appended), headers in
//! the order they go on the wire, and an optional body. An `HttpEngine`
//! performs the actual exchange and hands back an `HttpResponse` whose body is
//! still an unread stream. Reading that stream is left to `send` so truncated
//! bodies surface as their own error.
//!
//! Any type implementing `HttpEngine` can be injected, which is how tests run
//! without a network and how callers plug in their own transport.

use std::fmt;
use std::io::Read;

use crate::error::BoxError;

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub uri: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// Status line and headers of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

/// A response whose body has not been read yet.
pub struct HttpResponse {
    pub head: ResponseHead,
    pub body: Box<dyn Read>,
}

impl HttpResponse {
    pub fn new(status: u16, headers: Vec<(String, String)>, body: impl Read + 'static) -> Self {
        Self {
            head: ResponseHead { status, headers },
            body: Box::new(body),
        }
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("head", &self.head)
            .finish_non_exhaustive()
    }
}

/// Executes one HTTP exchange, blocking until the response head arrives.
///
/// Engines are shared between requests and threads, so they must be
/// `Send + Sync`. Non-2xx statuses are responses, not errors.
pub trait HttpEngine: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError>;
}
