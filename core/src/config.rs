//! Construction-time options for a `Request`.

use std::fmt;
use std::sync::Arc;

use crate::http::HttpEngine;

/// Options applied by [`Request::with_options`](crate::Request::with_options).
///
/// `engine` takes precedence over `transport` when both are given.
#[derive(Clone, Default)]
pub struct Options {
    /// Replaces the HTTP engine entirely.
    pub engine: Option<Arc<dyn HttpEngine>>,
    /// Replaces only the agent underneath the default ureq engine.
    pub transport: Option<ureq::Agent>,
    /// Content type preset, mnemonic or full MIME string.
    pub content_type: Option<String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine(mut self, engine: Arc<dyn HttpEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn transport(mut self, agent: ureq::Agent) -> Self {
        self.transport = Some(agent);
        self
    }

    pub fn content_type(mut self, mime: impl Into<String>) -> Self {
        self.content_type = Some(mime.into());
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("engine", &self.engine.is_some())
            .field("transport", &self.transport.is_some())
            .field("content_type", &self.content_type)
            .finish()
    }
}
