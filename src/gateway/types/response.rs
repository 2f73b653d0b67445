//! API Response types and error codes
//!
//! - `ApiResponse<T>`: Unified response wrapper
//! - `error_codes`: Standard error code constants
//! - Response DTOs

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::admin::RateAdminError;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Rate update result
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SetRatesData {
    /// Number of entries written to the registry
    #[schema(example = 2)]
    pub applied: usize,
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_ASSET_REFERENCE: i32 = 1004;
    pub const INVALID_RATE_VALUE: i32 = 1005;

    // Auth errors (2xxx)
    pub const MISSING_AUTH: i32 = 2001;
    pub const AUTH_FAILED: i32 = 2002;

    // Server errors (5xxx)
    pub const RECOMPUTATION_FAILED: i32 = 5002;
}

/// HTTP status and API code for an admin error
pub fn admin_error_status(err: &RateAdminError) -> (StatusCode, i32) {
    let status = if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let code = match err {
        RateAdminError::InvalidAssetReference(_) => error_codes::INVALID_ASSET_REFERENCE,
        RateAdminError::InvalidRateValue { .. } => error_codes::INVALID_RATE_VALUE,
        RateAdminError::RecomputationFailed(_) => error_codes::RECOMPUTATION_FAILED,
    };
    (status, code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_serialization() {
        let json = serde_json::to_value(ApiResponse::success(SetRatesData { applied: 3 })).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["msg"], "ok");
        assert_eq!(json["data"]["applied"], 3);
    }

    #[test]
    fn test_error_omits_data() {
        let json =
            serde_json::to_value(ApiResponse::<()>::error(error_codes::AUTH_FAILED, "nope")).unwrap();
        assert_eq!(json["code"], 2002);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_admin_error_status() {
        assert_eq!(
            admin_error_status(&RateAdminError::InvalidAssetReference("x".into())),
            (StatusCode::BAD_REQUEST, error_codes::INVALID_ASSET_REFERENCE)
        );
        assert_eq!(
            admin_error_status(&RateAdminError::InvalidRateValue {
                reference: "x".into(),
                reason: "y".into()
            }),
            (StatusCode::BAD_REQUEST, error_codes::INVALID_RATE_VALUE)
        );
        assert_eq!(
            admin_error_status(&RateAdminError::RecomputationFailed("z".into())),
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::RECOMPUTATION_FAILED
            )
        );
    }
}
