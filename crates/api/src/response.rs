//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })` to get
//! compile-time type safety and consistent serialization.

use serde::Serialize;

/// Shown by clients in place of a table when a report has no rows.
pub const NO_DATA_MESSAGE: &str = "No hay datos disponibles.";

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// A rendered report: table rows plus the metrics and chart series shown
/// next to them.
///
/// An empty report is a normal response: `empty` is set, `summary` is
/// omitted and `message` carries the "no data" text.
#[derive(Debug, Serialize)]
pub struct ReportResponse<R: Serialize, S: Serialize> {
    pub title: &'static str,
    pub rows: Vec<R>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<S>,
    pub empty: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl<R: Serialize, S: Serialize> ReportResponse<R, S> {
    /// Build a report response, computing the summary only when there are
    /// rows to summarize.
    pub fn new(title: &'static str, rows: Vec<R>, summarize: impl FnOnce(&[R]) -> S) -> Self {
        if rows.is_empty() {
            return Self {
                title,
                rows,
                summary: None,
                empty: true,
                message: Some(NO_DATA_MESSAGE),
            };
        }
        let summary = summarize(&rows);
        Self {
            title,
            rows,
            summary: Some(summary),
            empty: false,
            message: None,
        }
    }
}
