//! Fluent request builder.
//!
//! # Design
//! `Request` is an owned builder: every setter takes `self` and hands it back,
//! so calls chain and the last write to a field wins. Setters only record
//! values (content types are resolved through the mime table on the way in);
//! nothing is validated until `send`.
//!
//! `send` borrows the builder, so the same `Request` can be sent again. Each
//! send carries the same correlation id unless the caller replaces it.

use std::fmt;
use std::io::Read;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;
use ureq::http;
use uuid::Uuid;

use crate::config::Options;
use crate::engine::{default_engine, UreqEngine};
use crate::error::Error;
use crate::http::{HttpEngine, HttpRequest};
use crate::mime;
use crate::payload::Payload;
use crate::response::Response;

#[derive(Clone)]
pub struct Request {
    method: String,
    content_type: String,
    expected_type: String,
    uri: String,
    payload: Payload,
    headers: Vec<(String, String)>,
    correlation_id: Uuid,
    engine: Option<Arc<dyn HttpEngine>>,
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// A `GET` request with a form content type and a fresh correlation id.
    pub fn new() -> Self {
        Self {
            method: "GET".to_string(),
            content_type: mime::FORM.to_string(),
            expected_type: String::new(),
            uri: String::new(),
            payload: Payload::Empty,
            headers: Vec::new(),
            correlation_id: Uuid::new_v4(),
            engine: None,
        }
    }

    pub fn init(method: impl Into<String>) -> Self {
        Self::new().method(method)
    }

    pub fn with_options(options: Options) -> Self {
        let mut request = Self::new();
        if let Some(mime) = options.content_type {
            request = request.content_type(&mime);
        }
        if let Some(agent) = options.transport {
            request = request.transport(agent);
        }
        if let Some(engine) = options.engine {
            request = request.engine(engine);
        }
        request
    }

    /// Set the method. Matched case-sensitively: only `"GET"` moves the
    /// payload into the query string.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Set the content type from a mnemonic or a full MIME string. An empty
    /// string sends no `Content-Type` header.
    pub fn content_type(mut self, mime: &str) -> Self {
        self.content_type = mime::resolve(mime).to_string();
        self
    }

    pub fn expected_type(mut self, mime: &str) -> Self {
        self.expected_type = mime::resolve(mime).to_string();
        self
    }

    /// Set both the content type and the expected type.
    pub fn mime(self, mime: &str) -> Self {
        self.content_type(mime).expected_type(mime)
    }

    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    pub fn body(mut self, payload: impl Into<Payload>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Append a header value, keeping any earlier values of the same name.
    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Replace every value of the header `name` (case-insensitive).
    pub fn set_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(key, _)| !key.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Send through a dedicated ureq engine bounded by `timeout`.
    pub fn timeout(self, timeout: Duration) -> Self {
        self.engine(Arc::new(UreqEngine::with_timeout(timeout)))
    }

    /// Send through a ureq engine over the caller's agent.
    pub fn transport(self, agent: ureq::Agent) -> Self {
        self.engine(Arc::new(UreqEngine::with_agent(agent)))
    }

    pub fn engine(mut self, engine: Arc<dyn HttpEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn with_correlation_id(mut self, id: Uuid) -> Self {
        self.correlation_id = id;
        self
    }

    pub fn method_str(&self) -> &str {
        &self.method
    }

    pub fn uri_str(&self) -> &str {
        &self.uri
    }

    pub fn content_type_str(&self) -> &str {
        &self.content_type
    }

    pub fn expected_type_str(&self) -> &str {
        &self.expected_type
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    /// Lower the builder into the transport request `send` would dispatch.
    pub fn build(&self) -> Result<HttpRequest, Error> {
        let encoded = self.payload.encode();

        let (uri, body) = if self.method == "GET" {
            let uri = if encoded.is_empty() {
                self.uri.clone()
            } else {
                format!("{}?{}", self.uri, encoded)
            };
            (uri, None)
        } else {
            (self.uri.clone(), Some(encoded))
        };

        if http::Method::from_bytes(self.method.as_bytes()).is_err() {
            return Err(Error::RequestConstruction(format!(
                "invalid method {:?}",
                self.method
            )));
        }
        validate_uri(&uri)?;

        // A caller-set Content-Type replaces the preset one.
        let caller_content_type = self
            .headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("content-type"));

        let mut headers = Vec::with_capacity(self.headers.len() + 1);
        if !self.content_type.is_empty() && !caller_content_type {
            headers.push(("Content-Type".to_string(), self.content_type.clone()));
        }
        headers.extend(self.headers.iter().cloned());

        Ok(HttpRequest {
            method: self.method.clone(),
            uri,
            headers,
            body,
        })
    }

    /// Perform the request and buffer the whole response.
    ///
    /// Blocks until the body is read, the engine fails, or its timeout
    /// expires. On error no response is produced.
    pub fn send(&self) -> Result<Response, Error> {
        let request = self.build()?;
        let engine = match &self.engine {
            Some(engine) => Arc::clone(engine),
            None => default_engine() as Arc<dyn HttpEngine>,
        };

        debug!(
            method = %request.method,
            uri = %request.uri,
            correlation_id = %self.correlation_id,
            "sending request"
        );

        let start = Instant::now();
        let mut response = engine.execute(request).map_err(Error::Transport)?;

        let mut raw_body = Vec::new();
        response.body.read_to_end(&mut raw_body)?;
        let duration = start.elapsed();

        debug!(
            status = response.head.status,
            elapsed_ms = duration.as_millis() as u64,
            body_len = raw_body.len(),
            correlation_id = %self.correlation_id,
            "received response"
        );

        Ok(Response::new(
            response.head,
            raw_body,
            duration,
            self.correlation_id,
        ))
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("uri", &self.uri)
            .field("content_type", &self.content_type)
            .field("expected_type", &self.expected_type)
            .field("payload", &self.payload)
            .field("headers", &self.headers)
            .field("correlation_id", &self.correlation_id)
            .field("engine", &self.engine.is_some())
            .finish()
    }
}

fn validate_uri(uri: &str) -> Result<(), Error> {
    let parsed: http::Uri = uri
        .parse()
        .map_err(|e| Error::RequestConstruction(format!("invalid uri {uri:?}: {e}")))?;
    if parsed.scheme().is_none() || parsed.authority().is_none() {
        return Err(Error::RequestConstruction(format!(
            "uri {uri:?} must be absolute"
        )));
    }
    Ok(())
}

/// Shorthand for a `GET` request to `uri` carrying `payload` as its query.
pub fn get(uri: impl Into<String>, payload: impl Into<Payload>) -> Request {
    Request::new().method("GET").uri(uri).body(payload)
}

/// Shorthand for a `POST` request to `uri` carrying `payload` as its body.
pub fn post(uri: impl Into<String>, payload: impl Into<Payload>) -> Request {
    Request::new().method("POST").uri(uri).body(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Params;

    fn query() -> Params {
        let mut params = Params::new();
        params.set("q", "1");
        params
    }

    #[test]
    fn get_moves_payload_into_query() {
        let req = get("http://x/y", query()).build().unwrap();
        assert_eq!(req.method, "GET");
        assert_eq!(req.uri, "http://x/y?q=1");
        assert!(req.body.is_none());
    }

    #[test]
    fn get_with_empty_payload_keeps_uri() {
        let req = get("http://x/y", Params::new()).build().unwrap();
        assert_eq!(req.uri, "http://x/y");
        assert!(req.body.is_none());
    }

    #[test]
    fn post_sends_payload_as_body() {
        let req = post("http://x/y", query()).build().unwrap();
        assert_eq!(req.uri, "http://x/y");
        assert_eq!(req.body.as_deref(), Some("q=1"));
        assert_eq!(
            req.headers,
            vec![(
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded".to_string()
            )]
        );
    }

    #[test]
    fn lowercase_get_is_not_treated_as_get() {
        let req = Request::init("get")
            .uri("http://x/y")
            .body(query())
            .build()
            .unwrap();
        assert_eq!(req.uri, "http://x/y");
        assert_eq!(req.body.as_deref(), Some("q=1"));
    }

    #[test]
    fn empty_content_type_sends_no_header() {
        let req = post("http://x/y", "raw").content_type("").build().unwrap();
        assert!(req.headers.is_empty());
    }

    #[test]
    fn content_type_is_resolved_on_set() {
        let req = Request::new().content_type("json");
        assert_eq!(req.content_type_str(), "application/json");

        let req = req.content_type("application/ld+json");
        assert_eq!(req.content_type_str(), "application/ld+json");
    }

    #[test]
    fn mime_sets_both_types() {
        let req = Request::new().mime("xml");
        assert_eq!(req.content_type_str(), "application/xml");
        assert_eq!(req.expected_type_str(), "application/xml");
    }

    #[test]
    fn last_write_wins() {
        let req = Request::new()
            .uri("http://a/")
            .method("PUT")
            .uri("http://b/")
            .method("PATCH")
            .body("first")
            .body("second");
        let built = req.build().unwrap();
        assert_eq!(built.method, "PATCH");
        assert_eq!(built.uri, "http://b/");
        assert_eq!(built.body.as_deref(), Some("second"));
    }

    #[test]
    fn caller_headers_follow_content_type_in_order() {
        let req = post("http://x/y", "")
            .mime("json")
            .add_header("X-Trace", "a")
            .add_header("Accept", "text/plain")
            .add_header("X-Trace", "b")
            .build()
            .unwrap();
        let names: Vec<_> = req.headers.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            names,
            vec![
                ("Content-Type", "application/json"),
                ("X-Trace", "a"),
                ("Accept", "text/plain"),
                ("X-Trace", "b"),
            ]
        );
    }

    #[test]
    fn set_header_replaces_all_values() {
        let req = Request::new()
            .add_header("X-Trace", "a")
            .add_header("x-trace", "b")
            .set_header("X-TRACE", "c");
        assert_eq!(
            req.headers(),
            [("X-TRACE".to_string(), "c".to_string())]
        );
    }

    #[test]
    fn caller_content_type_replaces_preset() {
        let req = post("http://x/y", "a,b")
            .set_header("Content-Type", "text/csv")
            .build()
            .unwrap();
        assert_eq!(
            req.headers,
            vec![("Content-Type".to_string(), "text/csv".to_string())]
        );

        let req = post("http://x/y", "{}")
            .add_header("content-type", "application/json")
            .add_header("X-Trace", "a")
            .build()
            .unwrap();
        let content_types: Vec<_> = req
            .headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.as_str())
            .collect();
        assert_eq!(content_types, vec!["application/json"]);
        assert_eq!(req.headers.len(), 2);
    }

    #[test]
    fn relative_uri_is_rejected() {
        let err = get("/only/a/path", ()).build().unwrap_err();
        assert!(matches!(err, Error::RequestConstruction(_)));
    }

    #[test]
    fn malformed_uri_is_rejected() {
        let err = post("http://bad host/", ()).build().unwrap_err();
        assert!(matches!(err, Error::RequestConstruction(_)));
    }

    #[test]
    fn malformed_method_is_rejected() {
        let err = Request::init("BAD METHOD")
            .uri("http://x/y")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::RequestConstruction(_)));
    }

    #[test]
    fn options_preset_content_type() {
        let req = Request::with_options(Options::new().content_type("json"));
        assert_eq!(req.content_type_str(), "application/json");
        assert_eq!(req.method_str(), "GET");
    }

    #[test]
    fn new_presets_form_content_type() {
        let req = Request::new();
        assert_eq!(req.content_type_str(), mime::FORM);
        assert_eq!(req.expected_type_str(), "");
    }

    #[test]
    fn correlation_id_is_unique_per_request_and_stable_across_builds() {
        let a = Request::new();
        let b = Request::new();
        assert_ne!(a.correlation_id(), b.correlation_id());

        let fixed = Uuid::nil();
        let req = a.with_correlation_id(fixed).uri("http://x/");
        assert_eq!(req.correlation_id(), fixed);
    }
}
