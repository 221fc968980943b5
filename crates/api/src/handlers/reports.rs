//! Handlers for the five dashboard reports.
//!
//! Each handler validates its filters, runs one report query and wraps the
//! rows with their summary in a [`ReportResponse`]. Malformed or
//! inconsistent filters are rejected with 400 before any query runs.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use reporteria_core::filters::{
    AgeDistributionFilters, CampaignEffectivenessFilters, DonationsByCampaignFilters,
    DonationsByDonorFilters, VolunteersByActivityFilters,
};
use reporteria_db::repositories::ReportRepo;

use crate::error::AppResult;
use crate::query::ReferenceDateQuery;
use crate::response::{DataResponse, ReportResponse};
use crate::state::AppState;
use crate::summary::{self, EffectivenessRow};

pub const DONATIONS_BY_CAMPAIGN_TITLE: &str = "Donaciones por Campaña";
pub const VOLUNTEERS_BY_ACTIVITY_TITLE: &str = "Voluntarios por Actividad";
pub const DONATIONS_BY_DONOR_TITLE: &str = "Donaciones por Donante";
pub const AGE_DISTRIBUTION_TITLE: &str = "Distribución por Edad";
pub const CAMPAIGN_EFFECTIVENESS_TITLE: &str = "Efectividad de Campañas";

/// GET /api/v1/reports/donations-by-campaign
pub async fn donations_by_campaign(
    State(state): State<AppState>,
    filters: Result<Query<DonationsByCampaignFilters>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(filters) = filters?;
    filters.validate()?;

    let rows = ReportRepo::donations_by_campaign(&state.pool, &filters).await?;
    let report = ReportResponse::new(
        DONATIONS_BY_CAMPAIGN_TITLE,
        rows,
        summary::campaign_donations,
    );
    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/reports/volunteers-by-activity
///
/// Ages are computed at `fecha_referencia` (today when omitted).
pub async fn volunteers_by_activity(
    State(state): State<AppState>,
    filters: Result<Query<VolunteersByActivityFilters>, QueryRejection>,
    reference: Result<Query<ReferenceDateQuery>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(filters) = filters?;
    let Query(reference) = reference?;
    filters.validate()?;

    let rows =
        ReportRepo::volunteers_by_activity(&state.pool, &filters, reference.resolve()).await?;
    let report = ReportResponse::new(
        VOLUNTEERS_BY_ACTIVITY_TITLE,
        rows,
        summary::activity_volunteers,
    );
    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/reports/donations-by-donor
pub async fn donations_by_donor(
    State(state): State<AppState>,
    filters: Result<Query<DonationsByDonorFilters>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(filters) = filters?;
    filters.validate()?;

    let rows = ReportRepo::donations_by_donor(&state.pool, &filters).await?;
    let report = ReportResponse::new(DONATIONS_BY_DONOR_TITLE, rows, summary::donor_donations);
    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/reports/volunteer-age-distribution
pub async fn volunteer_age_distribution(
    State(state): State<AppState>,
    filters: Result<Query<AgeDistributionFilters>, QueryRejection>,
    reference: Result<Query<ReferenceDateQuery>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(filters) = filters?;
    let Query(reference) = reference?;
    filters.validate()?;

    let rows = ReportRepo::age_distribution(&state.pool, &filters, reference.resolve()).await?;
    let report = ReportResponse::new(AGE_DISTRIBUTION_TITLE, rows, summary::age_distribution);
    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/reports/campaign-effectiveness
pub async fn campaign_effectiveness(
    State(state): State<AppState>,
    filters: Result<Query<CampaignEffectivenessFilters>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(filters) = filters?;
    filters.validate()?;

    let rows: Vec<EffectivenessRow> = ReportRepo::campaign_effectiveness(&state.pool, &filters)
        .await?
        .into_iter()
        .map(EffectivenessRow::from)
        .collect();
    let report = ReportResponse::new(CAMPAIGN_EFFECTIVENESS_TITLE, rows, summary::effectiveness);
    Ok(Json(DataResponse { data: report }))
}
