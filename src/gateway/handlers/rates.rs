//! Fee exchange rate handlers (privileged)

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::admin::{ExchangeRatesData, SetExchangeRatesRequest};

use super::super::state::AppState;
use super::super::types::response::admin_error_status;
use super::super::types::{ApiResponse, SetRatesData};

/// Current fee exchange rates
///
/// Returns every registered rate keyed by asset hex. Rates are scaled by
/// 10^8: `100000000` values one unit of the asset at one unit of the
/// reference fee asset.
#[utoipa::path(
    get,
    path = "/api/v1/admin/fee_exchange_rates",
    responses(
        (status = 200, description = "Rate table", body = ExchangeRatesData, content_type = "application/json"),
        (status = 401, description = "Missing or invalid admin token")
    ),
    security(("admin_token" = [])),
    tag = "Exchange Rates"
)]
pub async fn get_fee_exchange_rates(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<ExchangeRatesData>> {
    Json(ApiResponse::success(state.admin.get_exchange_rates()))
}

/// Set fee exchange rates
///
/// Keys are asset hex ids or configured labels; values are integer rates
/// (JSON number or numeric string). Assets not listed keep their rate.
/// Nothing is applied if any key or value is invalid.
#[utoipa::path(
    post,
    path = "/api/v1/admin/fee_exchange_rates",
    request_body = SetExchangeRatesRequest,
    responses(
        (status = 200, description = "Rates applied and fees recomputed", body = SetRatesData, content_type = "application/json"),
        (status = 400, description = "Invalid asset reference or rate value; nothing applied"),
        (status = 401, description = "Missing or invalid admin token"),
        (status = 500, description = "Rates applied but fee recomputation failed")
    ),
    security(("admin_token" = [])),
    tag = "Exchange Rates"
)]
pub async fn set_fee_exchange_rates(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetExchangeRatesRequest>,
) -> Result<Json<ApiResponse<SetRatesData>>, (StatusCode, Json<ApiResponse<()>>)> {
    let applied = state.admin.set_exchange_rates(&req.rates).map_err(|e| {
        let (status, code) = admin_error_status(&e);
        (status, Json(ApiResponse::<()>::error(code, e.to_string())))
    })?;

    Ok(Json(ApiResponse::success(SetRatesData { applied })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::RateAdmin;
    use crate::asset_directory::AssetDirectory;
    use crate::exchange_rates::ExchangeRateRegistry;
    use crate::gateway::rpc::RpcTable;
    use crate::gateway::types::error_codes;
    use crate::mempool::{FeeRecomputation, RecomputeError};
    use serde_json::json;

    struct NoopRecompute;

    impl FeeRecomputation for NoopRecompute {
        fn recompute_fees(&self) -> Result<usize, RecomputeError> {
            Ok(0)
        }
    }

    fn state(recompute: Option<Arc<dyn FeeRecomputation>>) -> Arc<AppState> {
        let admin = RateAdmin::new(
            Arc::new(ExchangeRateRegistry::new()),
            Arc::new(AssetDirectory::new()),
            recompute,
        );
        Arc::new(AppState::new(
            Arc::new(admin),
            Arc::new(RpcTable::new()),
            None,
        ))
    }

    fn request(rates: serde_json::Value) -> SetExchangeRatesRequest {
        serde_json::from_value(json!({ "rates": rates })).unwrap()
    }

    #[tokio::test]
    async fn test_get_empty() {
        let Json(res) = get_fee_exchange_rates(State(state(None))).await;
        assert_eq!(res.code, error_codes::SUCCESS);
        assert!(res.data.unwrap().rates.is_empty());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let state = state(Some(Arc::new(NoopRecompute)));
        let hex = "aa".repeat(32);

        let Json(res) = set_fee_exchange_rates(State(state.clone()), Json(request(json!({ hex.clone(): 100 }))))
            .await
            .unwrap();
        assert_eq!(res.data.unwrap().applied, 1);

        let Json(res) = get_fee_exchange_rates(State(state)).await;
        assert_eq!(res.data.unwrap().rates.get(&hex), Some(&100));
    }

    #[tokio::test]
    async fn test_set_invalid_reference() {
        let state = state(Some(Arc::new(NoopRecompute)));

        let (status, Json(body)) = set_fee_exchange_rates(
            State(state.clone()),
            Json(request(json!({ "not-a-real-asset": 5 }))),
        )
        .await
        .unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, error_codes::INVALID_ASSET_REFERENCE);
        assert!(body.msg.contains("not-a-real-asset"));
        assert!(state.admin.registry().is_empty());
    }

    #[tokio::test]
    async fn test_set_invalid_value() {
        let state = state(Some(Arc::new(NoopRecompute)));

        let (status, Json(body)) = set_fee_exchange_rates(
            State(state),
            Json(request(json!({ "aa".repeat(32): -1 }))),
        )
        .await
        .unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, error_codes::INVALID_RATE_VALUE);
    }

    #[tokio::test]
    async fn test_set_without_mempool_is_server_error() {
        let state = state(None);

        let (status, Json(body)) = set_fee_exchange_rates(
            State(state.clone()),
            Json(request(json!({ "aa".repeat(32): 1 }))),
        )
        .await
        .unwrap_err();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, error_codes::RECOMPUTATION_FAILED);
        // Write stands
        assert_eq!(state.admin.registry().len(), 1);
    }
}
