//! The default `HttpEngine`, backed by a `ureq::Agent`.
//!
//! # Design
//! Requests without an explicit engine share one process-wide `UreqEngine`,
//! created on first use and never replaced. The agent pools connections
//! internally and is safe to call from many threads at once.
//!
//! Status codes are always returned as responses; the engine turns off
//! ureq's status-as-error behavior for every call so a caller-supplied agent
//! behaves the same as the default one.

use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use ureq::http;

use crate::error::BoxError;
use crate::http::{HttpEngine, HttpRequest, HttpResponse};

/// Global timeout of the shared default engine.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

static DEFAULT_ENGINE: OnceLock<Arc<UreqEngine>> = OnceLock::new();

/// The engine used by requests that were not given one.
pub fn default_engine() -> Arc<UreqEngine> {
    DEFAULT_ENGINE
        .get_or_init(|| Arc::new(UreqEngine::with_timeout(DEFAULT_TIMEOUT)))
        .clone()
}

#[derive(Clone)]
pub struct UreqEngine {
    agent: ureq::Agent,
}

impl UreqEngine {
    /// Engine over a fresh agent whose whole exchange is bounded by `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Engine over a caller-configured agent (TLS policy, proxy, timeouts).
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }

    fn run<B: ureq::AsSendBody>(
        &self,
        request: http::Request<B>,
    ) -> Result<http::Response<ureq::Body>, ureq::Error> {
        let request = self
            .agent
            .configure_request(request)
            .http_status_as_error(false)
            .build();
        self.agent.run(request)
    }
}

impl fmt::Debug for UreqEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqEngine").finish_non_exhaustive()
    }
}

impl HttpEngine for UreqEngine {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        let mut builder = http::Request::builder()
            .method(request.method.as_str())
            .uri(request.uri.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        // Empty bodies keep a sized body (Content-Length: 0) only for methods
        // that carry one, so bodiless methods stay valid.
        let sized = matches!(request.method.as_str(), "POST" | "PUT" | "PATCH");
        let response = match request.body.filter(|body| sized || !body.is_empty()) {
            Some(body) => self.run(builder.body(body)?)?,
            None => self.run(builder.body(())?)?,
        };

        let (parts, body) = response.into_parts();
        let headers = parts
            .headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        Ok(HttpResponse::new(parts.status.as_u16(), headers, body.into_reader()))
    }
}
