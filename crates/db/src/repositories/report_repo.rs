//! Read-only report queries over campaigns, donations, donors, activities
//! and volunteers.
//!
//! Each method runs exactly one statement on one pooled connection and
//! returns every matching group in ranking order. Filters are expected to
//! have been validated by the caller.

use reporteria_core::filters::{
    AgeDistributionFilters, CampaignEffectivenessFilters, DonationsByCampaignFilters,
    DonationsByDonorFilters, VolunteersByActivityFilters,
};
use reporteria_core::types::Date;
use sqlx::PgPool;

use crate::models::report::{
    ActivityVolunteers, AgeDistributionRow, AgeGroup, CampaignDonations, CampaignEffectiveness,
    DonorDonations, DonorDonationsRow,
};
use crate::query;

/// Provides the five dashboard reports.
pub struct ReportRepo;

impl ReportRepo {
    /// Every campaign with its donation count, amount raised and goal
    /// completion ratio, largest amount first.
    pub async fn donations_by_campaign(
        pool: &PgPool,
        filters: &DonationsByCampaignFilters,
    ) -> Result<Vec<CampaignDonations>, sqlx::Error> {
        let mut qb = query::donations_by_campaign(filters);
        let rows = qb
            .build_query_as::<CampaignDonations>()
            .fetch_all(pool)
            .await?;
        tracing::debug!(report = "donations_by_campaign", rows = rows.len(), "Report fetched");
        Ok(rows)
    }

    /// Activities with their distinct volunteer count and average volunteer
    /// age at `reference`, most volunteers first.
    pub async fn volunteers_by_activity(
        pool: &PgPool,
        filters: &VolunteersByActivityFilters,
        reference: Date,
    ) -> Result<Vec<ActivityVolunteers>, sqlx::Error> {
        let mut qb = query::volunteers_by_activity(filters, reference);
        let rows = qb
            .build_query_as::<ActivityVolunteers>()
            .fetch_all(pool)
            .await?;
        tracing::debug!(
            report = "volunteers_by_activity",
            %reference,
            rows = rows.len(),
            "Report fetched",
        );
        Ok(rows)
    }

    /// Top donors by amount given, at most
    /// [`DONOR_REPORT_LIMIT`](query::DONOR_REPORT_LIMIT) rows.
    pub async fn donations_by_donor(
        pool: &PgPool,
        filters: &DonationsByDonorFilters,
    ) -> Result<Vec<DonorDonations>, sqlx::Error> {
        let mut qb = query::donations_by_donor(filters);
        let rows = qb
            .build_query_as::<DonorDonationsRow>()
            .fetch_all(pool)
            .await?;
        tracing::debug!(report = "donations_by_donor", rows = rows.len(), "Report fetched");
        Ok(rows.into_iter().map(DonorDonations::from).collect())
    }

    /// Distinct volunteers per age bucket at `reference`, in bucket order.
    /// Buckets with no volunteers are omitted.
    pub async fn age_distribution(
        pool: &PgPool,
        filters: &AgeDistributionFilters,
        reference: Date,
    ) -> Result<Vec<AgeGroup>, sqlx::Error> {
        let mut qb = query::age_distribution(filters, reference);
        let rows = qb
            .build_query_as::<AgeDistributionRow>()
            .fetch_all(pool)
            .await?;
        tracing::debug!(
            report = "age_distribution",
            %reference,
            rows = rows.len(),
            "Report fetched",
        );
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let rango = row.rango;
                let group = AgeGroup::from_row(row);
                if group.is_none() {
                    tracing::warn!(rango, "Age distribution row with unknown bucket rank");
                }
                group
            })
            .collect())
    }

    /// Campaigns ranked by completion ratio, best first.
    pub async fn campaign_effectiveness(
        pool: &PgPool,
        filters: &CampaignEffectivenessFilters,
    ) -> Result<Vec<CampaignEffectiveness>, sqlx::Error> {
        let mut qb = query::campaign_effectiveness(filters);
        let rows = qb
            .build_query_as::<CampaignEffectiveness>()
            .fetch_all(pool)
            .await?;
        tracing::debug!(report = "campaign_effectiveness", rows = rows.len(), "Report fetched");
        Ok(rows)
    }
}
