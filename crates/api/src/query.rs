//! Shared query parameter types for API handlers.

use chrono::Utc;
use reporteria_core::types::Date;
use serde::Deserialize;

/// `?fecha_referencia=YYYY-MM-DD` for reports that compute ages.
///
/// Extracted alongside the report's own filter struct from the same query
/// string.
#[derive(Debug, Default, Deserialize)]
pub struct ReferenceDateQuery {
    pub fecha_referencia: Option<Date>,
}

impl ReferenceDateQuery {
    /// The requested reference date, or today's UTC date.
    pub fn resolve(&self) -> Date {
        self.fecha_referencia
            .unwrap_or_else(|| Utc::now().date_naive())
    }
}
