pub mod auth;
pub mod handlers;
pub mod openapi;
pub mod rpc;
pub mod state;
pub mod types;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::admin::RateAdmin;
use rpc::{RpcTable, register_exchange_rate_commands};
use state::AppState;

/// Shared state with every RPC command module registered
pub fn build_state(admin: Arc<RateAdmin>, admin_token: Option<String>) -> Arc<AppState> {
    let mut rpc_table = RpcTable::new();
    register_exchange_rate_commands(&mut rpc_table);
    Arc::new(AppState::new(admin, Arc::new(rpc_table), admin_token))
}

/// Full router: public health, privileged admin + RPC routes, API docs
pub fn build_router(state: Arc<AppState>) -> Router {
    // ==========================================================================
    // Privileged Routes (admin token when configured)
    // ==========================================================================
    let admin_routes = Router::new()
        .route(
            "/fee_exchange_rates",
            get(handlers::get_fee_exchange_rates).post(handlers::set_fee_exchange_rates),
        )
        .layer(from_fn_with_state(state.clone(), auth::admin_auth_middleware));

    let rpc_routes = Router::new()
        .route("/rpc", post(rpc::rpc_handler))
        .layer(from_fn_with_state(state.clone(), auth::admin_auth_middleware));

    Router::new()
        .route("/api/v1/health", get(handlers::health_check))
        .nest("/api/v1/admin", admin_routes)
        .merge(rpc_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Start HTTP Gateway server
pub async fn run_server(
    host: &str,
    port: u16,
    admin: Arc<RateAdmin>,
    admin_token: Option<String>,
) -> anyhow::Result<()> {
    if admin_token.is_none() {
        warn!("No admin token configured: privileged routes are open");
    }

    let state = build_state(admin, admin_token);
    info!(commands = ?state.rpc_table.list_commands(), "RPC commands registered");
    let app = build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to bind to {}: {} (port {} may already be in use)",
            addr,
            e,
            port
        )
    })?;

    info!("Gateway listening on http://{}", addr);
    info!("Admin API: /api/v1/admin/fee_exchange_rates, JSON-RPC: /rpc");
    info!("API Docs: http://{}/docs", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
