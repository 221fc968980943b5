//! Route definitions for the reporting dashboard.

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Report routes mounted at `/reports`.
///
/// ```text
/// GET  /donations-by-campaign        -> donations_by_campaign
/// GET  /volunteers-by-activity       -> volunteers_by_activity
/// GET  /donations-by-donor           -> donations_by_donor
/// GET  /volunteer-age-distribution   -> volunteer_age_distribution
/// GET  /campaign-effectiveness       -> campaign_effectiveness
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/donations-by-campaign", get(reports::donations_by_campaign))
        .route("/volunteers-by-activity", get(reports::volunteers_by_activity))
        .route("/donations-by-donor", get(reports::donations_by_donor))
        .route(
            "/volunteer-age-distribution",
            get(reports::volunteer_age_distribution),
        )
        .route("/campaign-effectiveness", get(reports::campaign_effectiveness))
}
