//! Hook for reporting failed calls.
//!
//! Every failed call is reported exactly once, before the error is returned
//! to the caller. The default observer writes a `tracing` event; tests and
//! embedders can install their own.

use crate::error::{CloudAppError, ErrorKind};
use crate::http::HttpMethod;

/// Structured details of one failed call.
#[derive(Debug, Clone, Copy)]
pub struct FailureReport<'a> {
    pub method: HttpMethod,
    pub uri: &'a str,
    pub expected_status: u16,
    /// `Content-Type` of the response, when one was received.
    pub content_type: Option<&'a str>,
    pub error: &'a CloudAppError,
}

impl FailureReport<'_> {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

/// Receives a report for every failed call.
pub trait FailureObserver: Send + Sync {
    fn on_failure(&self, report: &FailureReport<'_>);
}

impl<F> FailureObserver for F
where
    F: Fn(&FailureReport<'_>) + Send + Sync,
{
    fn on_failure(&self, report: &FailureReport<'_>) {
        self(report)
    }
}

/// Logs each failure as a `tracing` error event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl FailureObserver for TracingObserver {
    fn on_failure(&self, report: &FailureReport<'_>) {
        let error = report.error;
        match error.cause() {
            Some(cause) => tracing::error!(
                method = %report.method,
                uri = report.uri,
                expected_status = report.expected_status,
                status = error.status(),
                kind = %error.kind(),
                content_type = report.content_type,
                cause = %cause,
                "{}",
                error.message()
            ),
            None => tracing::error!(
                method = %report.method,
                uri = report.uri,
                expected_status = report.expected_status,
                status = error.status(),
                kind = %error.kind(),
                content_type = report.content_type,
                body = error.message(),
                "CloudApp API returned an unexpected status"
            ),
        }
    }
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl FailureObserver for NoopObserver {
    fn on_failure(&self, _report: &FailureReport<'_>) {}
}
