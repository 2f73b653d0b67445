//! Fee exchange rate admin gateway
//!
//! ```text
//! ┌──────────┐    ┌───────────┐    ┌──────────────┐    ┌──────────┐
//! │  Admin   │───▶│  Gateway  │───▶│  Rate Admin  │───▶│ Registry │
//! │ (HTTP)   │    │(REST/RPC) │    │ (validation) │    └────┬─────┘
//! └──────────┘    └───────────┘    └──────┬───────┘         │
//!                                         │ recompute       │ rates
//!                                         ▼                 │
//!                                   ┌──────────┐            │
//!                                   │ Fee Pool │◀───────────┘
//!                                   └──────────┘
//! ```

use std::sync::Arc;

use anyhow::Context;
use fee_rates::config::AppConfig;
use fee_rates::context::NodeContext;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env).with_context(|| format!("loading {} config", env))?;
    let _log_guard = fee_rates::logging::init_logging(&app_config);

    tracing::info!("Starting fee rate gateway in {} mode", env);

    let ctx = NodeContext::from_config(&app_config).context("initializing node context")?;
    let admin = Arc::new(ctx.rate_admin());

    let port = get_port_override().unwrap_or(app_config.gateway.port);
    let result = fee_rates::gateway::run_server(
        &app_config.gateway.host,
        port,
        admin,
        app_config.admin.token.clone(),
    )
    .await;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Gateway failed");
    }
    result
}
