//! Request executor for the CloudApp API.
//!
//! # Design
//! Each verb is split into a `build_*` method producing an `HttpRequest` and
//! the shared `parse_response` consuming an `HttpResponse`. `execute_request`
//! joins the two through the injected `HttpTransport`, so tests can exercise
//! either half without a network.
//!
//! A call succeeds only when the response status equals the expected status
//! exactly; any other status, including other 2xx codes, is a failure.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::CloudAppError;
use crate::host::Host;
use crate::http::{
    HttpMethod, HttpRequest, HttpResponse, ACCEPT, APPLICATION_JSON, CONTENT_TYPE,
};
use crate::observer::{FailureObserver, FailureReport, TracingObserver};
use crate::transport::{HttpTransport, TransportConfig, UreqTransport};
use crate::value::JsonValue;

/// Status GET and DELETE treat as success.
pub const DEFAULT_EXPECTED_STATUS: u16 = 200;

/// How request paths become request URIs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UriMode {
    /// Every verb prefixes the path with the host's `scheme://host:port`.
    #[default]
    Host,
    /// GET and POST prefix the path with the host; PUT and DELETE send the
    /// path unchanged, so callers must pass absolute URLs to them.
    Legacy,
}

/// Synchronous client for the CloudApp API.
pub struct CloudAppClient<T = UreqTransport> {
    transport: T,
    host: Host,
    uri_mode: UriMode,
    observer: Arc<dyn FailureObserver>,
}

impl CloudAppClient<UreqTransport> {
    /// Client using a fresh ureq agent configured from `config`.
    pub fn with_ureq(host: Host, config: &TransportConfig) -> Self {
        Self::new(UreqTransport::new(config), host)
    }
}

impl<T: HttpTransport> CloudAppClient<T> {
    pub fn new(transport: T, host: Host) -> Self {
        Self {
            transport,
            host,
            uri_mode: UriMode::default(),
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_uri_mode(mut self, uri_mode: UriMode) -> Self {
        self.uri_mode = uri_mode;
        self
    }

    /// Replace the default `TracingObserver`.
    pub fn with_observer(mut self, observer: impl FailureObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn uri_mode(&self) -> UriMode {
        self.uri_mode
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn get(&self, path: &str) -> Result<JsonValue, CloudAppError> {
        self.execute_request(self.build_get(path), DEFAULT_EXPECTED_STATUS)
    }

    pub fn delete(&self, path: &str) -> Result<JsonValue, CloudAppError> {
        self.execute_request(self.build_delete(path), DEFAULT_EXPECTED_STATUS)
    }

    /// POST `body`, if any, as an `application/json` payload.
    pub fn post(
        &self,
        path: &str,
        body: Option<&str>,
        expected_status: u16,
    ) -> Result<JsonValue, CloudAppError> {
        self.execute_request(self.build_post(path, body), expected_status)
    }

    /// PUT `body`, if any, as an `application/json` payload.
    pub fn put(
        &self,
        path: &str,
        body: Option<&str>,
        expected_status: u16,
    ) -> Result<JsonValue, CloudAppError> {
        self.execute_request(self.build_put(path, body), expected_status)
    }

    /// Serialize `body` with serde_json and POST it.
    pub fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        expected_status: u16,
    ) -> Result<JsonValue, CloudAppError> {
        let uri = self.compose_uri(HttpMethod::Post, path);
        let body = self.encode_body(HttpMethod::Post, &uri, body, expected_status)?;
        self.execute_request(self.build_post(path, Some(&body)), expected_status)
    }

    /// Serialize `body` with serde_json and PUT it.
    pub fn put_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        expected_status: u16,
    ) -> Result<JsonValue, CloudAppError> {
        let uri = self.compose_uri(HttpMethod::Put, path);
        let body = self.encode_body(HttpMethod::Put, &uri, body, expected_status)?;
        self.execute_request(self.build_put(path, Some(&body)), expected_status)
    }

    pub fn build_get(&self, path: &str) -> HttpRequest {
        self.build(HttpMethod::Get, path, None)
    }

    pub fn build_delete(&self, path: &str) -> HttpRequest {
        self.build(HttpMethod::Delete, path, None)
    }

    pub fn build_post(&self, path: &str, body: Option<&str>) -> HttpRequest {
        self.build(HttpMethod::Post, path, body)
    }

    pub fn build_put(&self, path: &str, body: Option<&str>) -> HttpRequest {
        self.build(HttpMethod::Put, path, body)
    }

    /// Send `request` and interpret the answer. `Accept: application/json`
    /// is always set before sending.
    pub fn execute_request(
        &self,
        mut request: HttpRequest,
        expected_status: u16,
    ) -> Result<JsonValue, CloudAppError> {
        request.set_header(ACCEPT, APPLICATION_JSON);
        tracing::debug!(
            method = %request.method,
            uri = %request.uri,
            expected_status,
            "dispatching CloudApp request"
        );

        let (result, content_type) = match self.transport.execute(&request) {
            Ok(response) => {
                let content_type = response.header(CONTENT_TYPE).map(str::to_string);
                (parse_response(response, expected_status), content_type)
            }
            Err(e) => (Err(CloudAppError::transport(e)), None),
        };

        if let Err(error) = &result {
            self.report(&FailureReport {
                method: request.method,
                uri: &request.uri,
                expected_status,
                content_type: content_type.as_deref(),
                error,
            });
        }
        result
    }

    fn build(&self, method: HttpMethod, path: &str, body: Option<&str>) -> HttpRequest {
        let request = HttpRequest::new(method, self.compose_uri(method, path));
        match body {
            Some(body) => request.with_json_body(body.to_string()),
            None => request,
        }
    }

    fn compose_uri(&self, method: HttpMethod, path: &str) -> String {
        match (self.uri_mode, method) {
            (UriMode::Legacy, HttpMethod::Put | HttpMethod::Delete) => path.to_string(),
            _ => self.host.uri(path),
        }
    }

    fn encode_body<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        uri: &str,
        body: &B,
        expected_status: u16,
    ) -> Result<String, CloudAppError> {
        serde_json::to_string(body).map_err(|e| {
            let error = CloudAppError::encoding(e);
            self.report(&FailureReport {
                method,
                uri,
                expected_status,
                content_type: None,
                error: &error,
            });
            error
        })
    }

    fn report(&self, report: &FailureReport<'_>) {
        self.observer.on_failure(report);
    }
}

/// Interpret `response` against `expected_status`.
///
/// A matching status yields the body as a JSON object or array; a body that
/// is neither fails with a parse error. Any other status fails with the
/// remote status and the raw body.
pub fn parse_response(
    response: HttpResponse,
    expected_status: u16,
) -> Result<JsonValue, CloudAppError> {
    if response.status != expected_status {
        return Err(CloudAppError::unexpected_status(response.status, response.body));
    }
    JsonValue::parse(&response.body).map_err(CloudAppError::parse)
}
