//! Campaign lifecycle status.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Value of `campana.estado`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Activa,
    Finalizada,
    Planificada,
    Pausada,
}

impl CampaignStatus {
    pub const ALL: [CampaignStatus; 4] = [
        CampaignStatus::Activa,
        CampaignStatus::Finalizada,
        CampaignStatus::Planificada,
        CampaignStatus::Pausada,
    ];

    /// Database representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            CampaignStatus::Activa => "activa",
            CampaignStatus::Finalizada => "finalizada",
            CampaignStatus::Planificada => "planificada",
            CampaignStatus::Pausada => "pausada",
        }
    }
}

impl FromStr for CampaignStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| CoreError::Validation(format!("Unknown campaign status '{s}'")))
    }
}
