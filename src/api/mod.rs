//! Backend contract for the dashboard panels.
//!
//! Panels never talk to the network directly. They go through
//! [`DashboardBackend`], which [`HttpBackend`] implements over plain HTTP GET
//! with JSON bodies.

mod http;
mod types;

pub use http::HttpBackend;
pub use types::{
    Cohort, CtrQuery, DateRow, MetricBucket, RankedItem, RankedList, ReportSet, SampleSet, Score,
    Trace, format_date, parse_date,
};

/// Aggregated CTR report endpoint.
pub const CTR_PATH: &str = "/ctr/";
/// Sample identifier list endpoint.
pub const SAMPLE_PATH: &str = "/ud_sample/";
/// Per-identifier trace endpoint.
pub const TRACE_PATH: &str = "/ud_action/";

/// Failures surfaced to a panel's status slot.
///
/// The `Display` text is what operators see, so each variant renders the
/// transport's own wording rather than a structured schema.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("{status_text}")]
    Status { code: u16, status_text: String },
    /// The request never produced a response (DNS, refused, timeout...).
    #[error("{0}")]
    Transport(String),
    /// The body was unreadable or exceeded the configured size cap.
    #[error("Unreadable response: {0}")]
    Body(String),
    /// The body was not JSON or lacked an expected field.
    #[error("Unexpected payload: {0}")]
    Decode(String),
    /// The configured base URL could not be used to build a request.
    #[error("Invalid server URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ApiError {
    /// Build a status error from the reason phrase the server sent.
    pub fn status(code: u16, status_text: &str) -> Self {
        let text = status_text.trim();
        let status_text = if text.is_empty() {
            format!("HTTP {code}")
        } else {
            text.to_string()
        };
        Self::Status { code, status_text }
    }
}

/// Data source for both panels.
///
/// Calls block; the dashboard runs each one on a worker thread.
pub trait DashboardBackend: Send + Sync {
    /// Fetch aggregated metrics for an optional date range.
    fn fetch_report(&self, query: &CtrQuery) -> Result<ReportSet, ApiError>;
    /// Fetch the shortcut list of known identifiers.
    fn fetch_samples(&self) -> Result<SampleSet, ApiError>;
    /// Fetch one identifier's trace.
    fn fetch_trace(&self, ud: &str) -> Result<Trace, ApiError>;
}
