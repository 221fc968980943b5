pub mod health;
pub mod reports;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /reports/donations-by-campaign        donations per campaign
/// /reports/volunteers-by-activity       volunteers per activity
/// /reports/donations-by-donor           top donors
/// /reports/volunteer-age-distribution   volunteers per age bucket
/// /reports/campaign-effectiveness       amount raised against goal
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/reports", reports::router())
}
