//! Synchronous client core for the CloudApp REST API.
//!
//! # Overview
//! `CloudAppClient` turns a path, an optional JSON body and an expected
//! status into an HTTP exchange, and the answer into a `JsonValue` (object or
//! array) or a `CloudAppError`. The HTTP library sits behind the
//! `HttpTransport` trait; `UreqTransport` is the default.
//!
//! # Design
//! - Requests and responses are plain data (`HttpRequest` / `HttpResponse`),
//!   so building and parsing can be tested without a network.
//! - Success means the exact expected status. Anything else is an error.
//! - Transport, encoding and parse failures are reported as status 500 with a
//!   fixed message and the original fault as the cause.
//! - Failures are reported once to a `FailureObserver` (a `tracing` logger by
//!   default) before being returned.

pub mod client;
pub mod error;
pub mod host;
pub mod http;
pub mod observer;
pub mod transport;
pub mod value;

pub use client::{parse_response, CloudAppClient, UriMode, DEFAULT_EXPECTED_STATUS};
pub use error::{CloudAppError, ErrorKind, TransportError};
pub use host::Host;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use observer::{FailureObserver, FailureReport, NoopObserver, TracingObserver};
pub use transport::{HttpTransport, TransportConfig, UreqTransport};
pub use value::JsonValue;
