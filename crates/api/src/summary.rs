//! Summary metrics and chart series computed from report rows.
//!
//! These are what the dashboard shows beside each table: totals, formatted
//! amounts and the `(label, value)` series its bar charts bind to.

use reporteria_core::formatting::{format_currency, format_percentage};
use reporteria_core::math::safe_divide;
use reporteria_db::models::report::{
    ActivityVolunteers, AgeGroup, CampaignDonations, CampaignEffectiveness, DonorDonations,
};
use serde::Serialize;

/// Number of campaigns in the "most effective" chart.
pub const TOP_CAMPAIGNS: usize = 5;

/// One bar of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Donations by campaign
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Serialize)]
pub struct CampaignDonationsSummary {
    pub total_donaciones: i64,
    pub monto_total: f64,
    pub monto_total_texto: String,
}

pub fn campaign_donations(rows: &[CampaignDonations]) -> CampaignDonationsSummary {
    let total_donaciones = rows.iter().map(|r| r.total_donaciones).sum();
    let monto_total = rows.iter().map(|r| r.monto_total).sum();
    CampaignDonationsSummary {
        total_donaciones,
        monto_total,
        monto_total_texto: format_currency(monto_total),
    }
}

// ---------------------------------------------------------------------------
// Volunteers by activity
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Serialize)]
pub struct ActivityVolunteersSummary {
    /// Sum of per-activity counts; a volunteer in two activities counts twice.
    pub total_voluntarios: i64,
}

pub fn activity_volunteers(rows: &[ActivityVolunteers]) -> ActivityVolunteersSummary {
    ActivityVolunteersSummary {
        total_voluntarios: rows.iter().map(|r| r.total_voluntarios).sum(),
    }
}

// ---------------------------------------------------------------------------
// Donations by donor
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Serialize)]
pub struct DonorDonationsSummary {
    pub total_donaciones: i64,
    pub monto_total: f64,
    pub monto_total_texto: String,
}

pub fn donor_donations(rows: &[DonorDonations]) -> DonorDonationsSummary {
    let total_donaciones = rows.iter().map(|r| r.total_donaciones).sum();
    let monto_total = rows.iter().filter_map(|r| r.monto_total).sum();
    DonorDonationsSummary {
        total_donaciones,
        monto_total,
        monto_total_texto: format_currency(monto_total),
    }
}

// ---------------------------------------------------------------------------
// Age distribution
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Serialize)]
pub struct AgeDistributionSummary {
    pub total_voluntarios: i64,
    /// `grupo_edad` against `total_voluntarios`, in bucket order.
    pub chart: Vec<ChartPoint>,
}

pub fn age_distribution(rows: &[AgeGroup]) -> AgeDistributionSummary {
    AgeDistributionSummary {
        total_voluntarios: rows.iter().map(|r| r.total_voluntarios).sum(),
        chart: rows
            .iter()
            .map(|r| ChartPoint {
                label: r.grupo_edad.label().to_string(),
                value: r.total_voluntarios as f64,
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Campaign effectiveness
// ---------------------------------------------------------------------------

/// Effectiveness row with its completion ratio pre-formatted for display.
#[derive(Debug, Serialize)]
pub struct EffectivenessRow {
    #[serde(flatten)]
    pub campaign: CampaignEffectiveness,
    pub porcentaje_cumplimiento_texto: String,
}

impl From<CampaignEffectiveness> for EffectivenessRow {
    fn from(campaign: CampaignEffectiveness) -> Self {
        let porcentaje_cumplimiento_texto = format_percentage(campaign.porcentaje_cumplimiento);
        Self {
            campaign,
            porcentaje_cumplimiento_texto,
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
pub struct EffectivenessSummary {
    pub monto_recaudado_total: f64,
    pub monto_recaudado_total_texto: String,
    pub meta_total: f64,
    /// Total raised over total goal, zero when no goal is set.
    pub cumplimiento_global: f64,
    pub cumplimiento_global_texto: String,
    /// The best [`TOP_CAMPAIGNS`] campaigns by completion ratio.
    pub top_campaigns: Vec<ChartPoint>,
    /// Amount raised per campaign.
    pub recaudacion: Vec<ChartPoint>,
}

/// Rows must already be in ranking order (best ratio first).
pub fn effectiveness(rows: &[EffectivenessRow]) -> EffectivenessSummary {
    let monto_recaudado_total: f64 = rows.iter().map(|r| r.campaign.monto_recaudado).sum();
    let meta_total: f64 = rows
        .iter()
        .filter_map(|r| r.campaign.meta_monetaria)
        .sum();
    let cumplimiento_global = safe_divide(Some(monto_recaudado_total), Some(meta_total));

    EffectivenessSummary {
        monto_recaudado_total,
        monto_recaudado_total_texto: format_currency(monto_recaudado_total),
        meta_total,
        cumplimiento_global,
        cumplimiento_global_texto: format_percentage(cumplimiento_global),
        top_campaigns: rows
            .iter()
            .take(TOP_CAMPAIGNS)
            .map(|r| ChartPoint {
                label: r.campaign.campana.clone(),
                value: r.campaign.porcentaje_cumplimiento,
            })
            .collect(),
        recaudacion: rows
            .iter()
            .map(|r| ChartPoint {
                label: r.campaign.campana.clone(),
                value: r.campaign.monto_recaudado,
            })
            .collect(),
    }
}
