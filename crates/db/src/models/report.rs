//! Report row models.
//!
//! Field names are the stable column keys consumed by the presentation
//! layer; renaming any of them is a breaking change for API clients.

use reporteria_core::age::AgeBucket;
use reporteria_core::donor::donor_display_name;
use reporteria_core::types::{Date, DbId};
use serde::Serialize;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Donations by campaign
// ---------------------------------------------------------------------------

/// One campaign with the donations counted under the report filters.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct CampaignDonations {
    pub campana_id: DbId,
    pub campana: String,
    pub total_donaciones: i64,
    pub monto_total: f64,
    pub fecha_inicio: Option<Date>,
    pub fecha_fin: Option<Date>,
    pub meta_monetaria: Option<f64>,
    pub porcentaje_cumplimiento: f64,
}

// ---------------------------------------------------------------------------
// Volunteers by activity
// ---------------------------------------------------------------------------

/// One activity with its distinct volunteer count and average age.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ActivityVolunteers {
    pub actividad_id: DbId,
    pub actividad: String,
    pub total_voluntarios: i64,
    pub fecha_inicio: Option<Date>,
    pub fecha_fin: Option<Date>,
    /// `None` when no counted volunteer has a birth date.
    pub edad_promedio: Option<f64>,
}

// ---------------------------------------------------------------------------
// Donations by donor
// ---------------------------------------------------------------------------

/// Raw aggregation row; the display name is derived in Rust.
#[derive(Debug, Clone, FromRow)]
pub struct DonorDonationsRow {
    pub donante_id: DbId,
    pub tipo_donante: String,
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub empresa: Option<String>,
    pub total_donaciones: i64,
    pub monto_total: Option<f64>,
    pub ultima_donacion: Option<Date>,
}

/// One donor with the donations matching the report filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonorDonations {
    pub donante_id: DbId,
    pub donante: String,
    pub tipo_donante: String,
    pub total_donaciones: i64,
    pub monto_total: Option<f64>,
    pub ultima_donacion: Option<Date>,
}

impl From<DonorDonationsRow> for DonorDonations {
    fn from(row: DonorDonationsRow) -> Self {
        let donante = donor_display_name(
            &row.tipo_donante,
            row.nombre.as_deref(),
            row.apellido.as_deref(),
            row.empresa.as_deref(),
        );
        Self {
            donante_id: row.donante_id,
            donante,
            tipo_donante: row.tipo_donante,
            total_donaciones: row.total_donaciones,
            monto_total: row.monto_total,
            ultima_donacion: row.ultima_donacion,
        }
    }
}

// ---------------------------------------------------------------------------
// Volunteer age distribution
// ---------------------------------------------------------------------------

/// Raw aggregation row keyed by bucket rank.
#[derive(Debug, Clone, FromRow)]
pub struct AgeDistributionRow {
    pub rango: i32,
    pub total_voluntarios: i64,
    pub edad_promedio: Option<f64>,
}

/// Volunteer count and rounded average age for one age bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeGroup {
    pub grupo_edad: AgeBucket,
    pub total_voluntarios: i64,
    pub edad_promedio: Option<f64>,
}

impl AgeGroup {
    /// Convert a raw row, or `None` if the rank matches no bucket.
    pub fn from_row(row: AgeDistributionRow) -> Option<Self> {
        AgeBucket::from_rank(row.rango).map(|grupo_edad| Self {
            grupo_edad,
            total_voluntarios: row.total_voluntarios,
            edad_promedio: row.edad_promedio,
        })
    }
}

// ---------------------------------------------------------------------------
// Campaign effectiveness
// ---------------------------------------------------------------------------

/// Amount raised against the goal for one campaign.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct CampaignEffectiveness {
    pub campana_id: DbId,
    pub campana: String,
    pub fecha_inicio: Option<Date>,
    pub fecha_fin: Option<Date>,
    pub meta_monetaria: Option<f64>,
    pub monto_recaudado: f64,
    pub porcentaje_cumplimiento: f64,
    pub total_donaciones: i64,
}
