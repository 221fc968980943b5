//! Filter parameters for the five reports, with fail-fast validation.
//!
//! Every filter is optional. `None` means the predicate is not applied at
//! all; `Some(v)` is always applied, including zero values. Call
//! `validate()` before building a query so malformed input is rejected
//! without a database round trip.

use serde::Deserialize;

use crate::campaign::CampaignStatus;
use crate::donor::DonorType;
use crate::error::CoreError;
use crate::types::{Date, DbId};

/// Largest age accepted by the age filters.
pub const MAX_AGE: i32 = 150;

/// Filters for the donations-by-campaign report. All predicates restrict
/// which donations are counted; campaigns themselves are never dropped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DonationsByCampaignFilters {
    /// Donations on or after this date.
    pub fecha_inicio: Option<Date>,
    /// Donations on or before this date.
    pub fecha_fin: Option<Date>,
    pub monto_minimo: Option<f64>,
    pub monto_maximo: Option<f64>,
}

impl DonationsByCampaignFilters {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_date_range(self.fecha_inicio, self.fecha_fin)?;
        validate_amount_range(
            self.monto_minimo,
            self.monto_maximo,
            "monto_minimo",
            "monto_maximo",
        )
    }
}

/// Filters for the volunteers-by-activity report.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VolunteersByActivityFilters {
    /// Activities starting on or after this date.
    pub fecha_inicio: Option<Date>,
    /// Activities ending on or before this date.
    pub fecha_fin: Option<Date>,
    /// Only count volunteers at least this old.
    pub edad_minima: Option<i32>,
    /// Only count volunteers at most this old.
    pub edad_maxima: Option<i32>,
}

impl VolunteersByActivityFilters {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_date_range(self.fecha_inicio, self.fecha_fin)?;
        validate_age_range(self.edad_minima, self.edad_maxima)
    }
}

/// Filters for the donations-by-donor report.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DonationsByDonorFilters {
    pub fecha_inicio: Option<Date>,
    pub fecha_fin: Option<Date>,
    pub tipo_donante: Option<DonorType>,
    /// Minimum amount of each individual donation counted.
    pub monto_minimo: Option<f64>,
}

impl DonationsByDonorFilters {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_date_range(self.fecha_inicio, self.fecha_fin)?;
        validate_amount_range(self.monto_minimo, None, "monto_minimo", "")
    }
}

/// Filters for the volunteer age distribution report.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AgeDistributionFilters {
    /// Activities starting on or after this date.
    pub fecha_inicio: Option<Date>,
    /// Activities ending on or before this date.
    pub fecha_fin: Option<Date>,
    pub genero: Option<String>,
    pub actividad_id: Option<DbId>,
}

impl AgeDistributionFilters {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_date_range(self.fecha_inicio, self.fecha_fin)?;
        if let Some(genero) = &self.genero {
            if genero.trim().is_empty() {
                return Err(CoreError::Validation(
                    "genero must not be empty when provided".into(),
                ));
            }
        }
        if let Some(id) = self.actividad_id {
            if id <= 0 {
                return Err(CoreError::Validation(format!(
                    "actividad_id must be positive, got {id}"
                )));
            }
        }
        Ok(())
    }
}

/// Filters for the campaign effectiveness report. All predicates apply to
/// the campaign itself.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CampaignEffectivenessFilters {
    /// Campaigns starting on or after this date.
    pub fecha_inicio: Option<Date>,
    /// Campaigns ending on or before this date.
    pub fecha_fin: Option<Date>,
    pub monto_objetivo_min: Option<f64>,
    pub monto_objetivo_max: Option<f64>,
    pub estado: Option<CampaignStatus>,
}

impl CampaignEffectivenessFilters {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_date_range(self.fecha_inicio, self.fecha_fin)?;
        validate_amount_range(
            self.monto_objetivo_min,
            self.monto_objetivo_max,
            "monto_objetivo_min",
            "monto_objetivo_max",
        )
    }
}

// ---------------------------------------------------------------------------
// Shared validators
// ---------------------------------------------------------------------------

/// Validate that a monetary amount is finite and non-negative.
pub fn validate_amount(value: f64, name: &str) -> Result<(), CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{name} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

fn validate_amount_range(
    min: Option<f64>,
    max: Option<f64>,
    min_name: &str,
    max_name: &str,
) -> Result<(), CoreError> {
    if let Some(v) = min {
        validate_amount(v, min_name)?;
    }
    if let Some(v) = max {
        validate_amount(v, max_name)?;
    }
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            return Err(CoreError::Validation(format!(
                "{min_name} ({lo}) must not exceed {max_name} ({hi})"
            )));
        }
    }
    Ok(())
}

/// Validate that `fecha_inicio` is not after `fecha_fin` when both are set.
pub fn validate_date_range(start: Option<Date>, end: Option<Date>) -> Result<(), CoreError> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(CoreError::Validation(format!(
                "fecha_inicio ({start}) must not be after fecha_fin ({end})"
            )));
        }
    }
    Ok(())
}

fn validate_age_range(min: Option<i32>, max: Option<i32>) -> Result<(), CoreError> {
    for (value, name) in [(min, "edad_minima"), (max, "edad_maxima")] {
        if let Some(age) = value {
            if !(0..=MAX_AGE).contains(&age) {
                return Err(CoreError::Validation(format!(
                    "{name} must be between 0 and {MAX_AGE}, got {age}"
                )));
            }
        }
    }
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            return Err(CoreError::Validation(format!(
                "edad_minima ({lo}) must not exceed edad_maxima ({hi})"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_filters_are_valid() {
        assert!(DonationsByCampaignFilters::default().validate().is_ok());
        assert!(VolunteersByActivityFilters::default().validate().is_ok());
        assert!(DonationsByDonorFilters::default().validate().is_ok());
        assert!(AgeDistributionFilters::default().validate().is_ok());
        assert!(CampaignEffectivenessFilters::default().validate().is_ok());
    }

    #[test]
    fn zero_amounts_are_valid_constraints() {
        let filters = DonationsByCampaignFilters {
            monto_minimo: Some(0.0),
            monto_maximo: Some(0.0),
            ..Default::default()
        };
        assert!(filters.validate().is_ok());
    }

    #[test]
    fn rejects_negative_or_non_finite_amounts() {
        let negative = DonationsByDonorFilters {
            monto_minimo: Some(-1.0),
            ..Default::default()
        };
        assert_matches!(negative.validate(), Err(CoreError::Validation(_)));

        let nan = CampaignEffectivenessFilters {
            monto_objetivo_max: Some(f64::NAN),
            ..Default::default()
        };
        assert_matches!(nan.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_inverted_amount_range() {
        let filters = DonationsByCampaignFilters {
            monto_minimo: Some(500.0),
            monto_maximo: Some(100.0),
            ..Default::default()
        };
        let err = filters.validate().unwrap_err();
        assert!(err.to_string().contains("monto_minimo"));
    }

    #[test]
    fn rejects_inverted_date_range() {
        let filters = CampaignEffectivenessFilters {
            fecha_inicio: Some(date(2024, 12, 31)),
            fecha_fin: Some(date(2024, 1, 1)),
            ..Default::default()
        };
        assert_matches!(filters.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn same_day_range_is_valid() {
        assert!(validate_date_range(Some(date(2024, 5, 1)), Some(date(2024, 5, 1))).is_ok());
    }

    #[test]
    fn age_bounds() {
        let ok = VolunteersByActivityFilters {
            edad_minima: Some(0),
            edad_maxima: Some(MAX_AGE),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let too_old = VolunteersByActivityFilters {
            edad_maxima: Some(MAX_AGE + 1),
            ..Default::default()
        };
        assert!(too_old.validate().is_err());

        let inverted = VolunteersByActivityFilters {
            edad_minima: Some(40),
            edad_maxima: Some(30),
            ..Default::default()
        };
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn age_distribution_checks_ids_and_gender() {
        let bad_id = AgeDistributionFilters {
            actividad_id: Some(0),
            ..Default::default()
        };
        assert!(bad_id.validate().is_err());

        let blank_gender = AgeDistributionFilters {
            genero: Some("  ".into()),
            ..Default::default()
        };
        assert!(blank_gender.validate().is_err());

        let ok = AgeDistributionFilters {
            genero: Some("Femenino".into()),
            actividad_id: Some(3),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn deserializes_from_json_with_missing_fields() {
        let filters: DonationsByDonorFilters =
            serde_json::from_str(r#"{"tipo_donante":"company","fecha_inicio":"2024-01-01"}"#)
                .unwrap();
        assert_eq!(filters.tipo_donante, Some(DonorType::Company));
        assert_eq!(filters.fecha_inicio, Some(date(2024, 1, 1)));
        assert_eq!(filters.monto_minimo, None);
    }
}
