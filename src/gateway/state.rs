use std::sync::Arc;

use crate::admin::RateAdmin;

use super::rpc::RpcTable;

/// Gateway shared state
#[derive(Clone)]
pub struct AppState {
    /// Exchange rate administration (registry + fee consumer)
    pub admin: Arc<RateAdmin>,
    /// JSON-RPC command table
    pub rpc_table: Arc<RpcTable>,
    /// Bearer token for privileged routes; `None` leaves them open
    admin_token: Option<String>,
}

impl AppState {
    pub fn new(admin: Arc<RateAdmin>, rpc_table: Arc<RpcTable>, admin_token: Option<String>) -> Self {
        Self {
            admin,
            rpc_table,
            admin_token,
        }
    }

    pub fn admin_token(&self) -> Option<&str> {
        self.admin_token.as_deref()
    }
}
