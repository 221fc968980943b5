//! Donor types and display naming.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Value stored in `donante.tipo` for private persons.
pub const DONOR_TYPE_INDIVIDUAL: &str = "individual";
/// Value stored in `donante.tipo` for businesses.
pub const DONOR_TYPE_COMPANY: &str = "empresa";

/// Kind of donor, as stored in `donante.tipo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonorType {
    Individual,
    #[serde(rename = "empresa", alias = "company")]
    Company,
}

impl DonorType {
    /// Database representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            DonorType::Individual => DONOR_TYPE_INDIVIDUAL,
            DonorType::Company => DONOR_TYPE_COMPANY,
        }
    }
}

impl FromStr for DonorType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            DONOR_TYPE_INDIVIDUAL => Ok(DonorType::Individual),
            DONOR_TYPE_COMPANY | "company" => Ok(DonorType::Company),
            other => Err(CoreError::Validation(format!(
                "Unknown donor type '{other}', expected 'individual' or 'empresa'"
            ))),
        }
    }
}

/// Name shown for a donor in the donations-by-donor report.
///
/// Individuals are shown as `"{nombre} {apellido}"`; missing name parts are
/// skipped. Any other donor type is shown by its business name verbatim,
/// or an empty string when none is recorded.
pub fn donor_display_name(
    tipo: &str,
    nombre: Option<&str>,
    apellido: Option<&str>,
    empresa: Option<&str>,
) -> String {
    if tipo == DONOR_TYPE_INDIVIDUAL {
        [nombre, apellido]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        empresa.unwrap_or_default().to_string()
    }
}
