use thiserror::Error;

use crate::money::MoneyError;

/// Errors surfaced by the rate administration operations.
///
/// Validation errors are raised before any registry mutation.
/// `RecomputationFailed` is raised after the write has been applied.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RateAdminError {
    #[error("Unknown label and invalid asset hex: {0}")]
    InvalidAssetReference(String),

    #[error("Invalid rate value for {reference}: {reason}")]
    InvalidRateValue { reference: String, reason: String },

    #[error("Fee recomputation failed: {0}")]
    RecomputationFailed(String),
}

impl RateAdminError {
    pub(crate) fn invalid_rate(reference: &str, err: MoneyError) -> Self {
        Self::InvalidRateValue {
            reference: reference.to_string(),
            reason: err.to_string(),
        }
    }

    /// Stable name used in API error payloads
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidAssetReference(_) => "INVALID_ASSET_REFERENCE",
            Self::InvalidRateValue { .. } => "INVALID_RATE_VALUE",
            Self::RecomputationFailed(_) => "RECOMPUTATION_FAILED",
        }
    }

    /// True when the request was rejected before touching the registry
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::RecomputationFailed(_))
    }
}
