//! Buffered responses produced by `Request::send`.

use std::time::Duration;

use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::Error;
use crate::http::ResponseHead;

/// A completed exchange with its body fully read into memory.
///
/// Only `Request::send` creates these, and only after the whole body has
/// been buffered, so every field is always populated.
#[derive(Debug, Clone)]
pub struct Response {
    head: ResponseHead,
    raw_body: Vec<u8>,
    body: String,
    duration: Duration,
    correlation_id: Uuid,
}

impl Response {
    pub(crate) fn new(
        head: ResponseHead,
        raw_body: Vec<u8>,
        duration: Duration,
        correlation_id: Uuid,
    ) -> Self {
        let body = String::from_utf8_lossy(&raw_body).into_owned();
        Self {
            head,
            raw_body,
            body,
            duration,
            correlation_id,
        }
    }

    pub fn status(&self) -> u16 {
        self.head.status
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.head.status)
    }

    pub fn head(&self) -> &ResponseHead {
        &self.head
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.head.headers
    }

    /// First value of the header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head
            .headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn raw_body(&self) -> &[u8] {
        &self.raw_body
    }

    /// The body as text, decoded once when the response was built.
    pub fn as_str(&self) -> &str {
        &self.body
    }

    /// Time from dispatch until the body was fully read.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    /// Decode the JSON body into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_slice(&self.raw_body)?)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.raw_body
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u32,
        name: String,
    }

    fn response(status: u16, body: &str) -> Response {
        let head = ResponseHead {
            status,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
        };
        Response::new(head, body.as_bytes().to_vec(), Duration::from_millis(5), Uuid::nil())
    }

    #[test]
    fn decode_well_formed_json() {
        let item: Item = response(200, r#"{"id":7,"name":"widget"}"#).decode().unwrap();
        assert_eq!(
            item,
            Item {
                id: 7,
                name: "widget".to_string()
            }
        );
    }

    #[test]
    fn decode_malformed_json() {
        let err = response(200, "not json").decode::<Item>().unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn decode_wrong_shape() {
        let err = response(200, r#"{"id":"seven"}"#).decode::<Item>().unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn body_text_matches_raw_bytes() {
        let resp = response(404, "missing");
        assert_eq!(resp.as_str(), "missing");
        assert_eq!(resp.raw_body(), b"missing");
        assert_eq!(resp.status(), 404);
        assert!(!resp.is_success());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let resp = response(200, "{}");
        assert_eq!(resp.header("Content-Type"), Some("application/json"));
        assert_eq!(resp.header("x-missing"), None);
        assert!(resp.is_success());
        assert_eq!(resp.correlation_id(), Uuid::nil());
        assert_eq!(resp.duration(), Duration::from_millis(5));
    }
}
