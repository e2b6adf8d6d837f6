//! Fluent, builder-style HTTP requests over a pluggable blocking engine.
//!
//! # Overview
//! A [`Request`] collects method, URI, payload, content type, headers and
//! engine selection through chained setters, then [`Request::send`] encodes
//! the payload, performs one blocking exchange and returns a fully buffered
//! [`Response`].
//!
//! ```no_run
//! use fluent_http::{post, Params};
//!
//! let mut form = Params::new();
//! form.set("name", "Ada").add("tag", "math").add("tag", "engines");
//!
//! let response = post("https://example.com/people", form).mime("form").send()?;
//! println!("{} in {:?}", response.status(), response.duration());
//! # Ok::<(), fluent_http::Error>(())
//! ```
//!
//! # Design
//! - Payloads are a closed [`Payload`] enum, each variant with its own
//!   encoding. `GET` puts the encoded payload in the query string, every
//!   other method sends it as the body.
//! - [`Params`] is an insertion-ordered multi-map; its encoding follows the
//!   order keys were first inserted.
//! - Content types go through the [`mime`] table, so `"json"` and
//!   `"application/json"` are interchangeable.
//! - The network is behind the [`HttpEngine`] trait. Requests without an
//!   engine share a lazily created ureq-backed default.

pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod mime;
pub mod params;
pub mod payload;
pub mod request;
pub mod response;

pub use config::Options;
pub use engine::{default_engine, UreqEngine, DEFAULT_TIMEOUT};
pub use error::{BoxError, Error, Result};
pub use http::{HttpEngine, HttpRequest, HttpResponse, ResponseHead};
pub use params::{Param, Params};
pub use payload::Payload;
pub use request::{get, post, Request};
pub use response::Response;
