//! JSON-RPC endpoint
//!
//! Node-style RPC surface for the admin operations. Commands live in a
//! table keyed by method name; each module registers its own commands
//! (see [`register_exchange_rate_commands`]).
//!
//! Request: `{"id": .., "method": "getfeeexchangerates", "params": [..]}`
//! Response: `{"result": .., "error": null | {"code", "message"}, "id": ..}`

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::admin::{RateAdmin, RateAdminError};

use super::state::AppState;

/// RPC error codes
pub mod rpc_codes {
    /// Standard JSON-RPC 2.0 errors
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;

    /// Application errors
    pub const MISC_ERROR: i32 = -1;
    pub const TYPE_ERROR: i32 = -3;
    pub const WALLET_ERROR: i32 = -4;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

impl RpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<RateAdminError> for RpcError {
    fn from(err: RateAdminError) -> Self {
        let code = match err {
            RateAdminError::InvalidAssetReference(_) => rpc_codes::WALLET_ERROR,
            RateAdminError::InvalidRateValue { .. } => rpc_codes::TYPE_ERROR,
            RateAdminError::RecomputationFailed(_) => rpc_codes::MISC_ERROR,
        };
        Self::new(code, err.to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcResponse {
    pub result: Value,
    pub error: Option<RpcError>,
    pub id: Value,
}

impl RpcResponse {
    fn ok(id: Value, result: Value) -> Self {
        Self {
            result,
            error: None,
            id,
        }
    }

    fn err(id: Value, error: RpcError) -> Self {
        Self {
            result: Value::Null,
            error: Some(error),
            id,
        }
    }
}

pub type RpcActor = fn(&RateAdmin, &Value) -> Result<Value, RpcError>;

pub struct RpcCommand {
    pub category: &'static str,
    pub name: &'static str,
    pub actor: RpcActor,
}

/// Method name → command
#[derive(Default)]
pub struct RpcTable {
    commands: FxHashMap<&'static str, &'static RpcCommand>,
}

impl RpcTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command. Returns `false` if the name is already taken.
    pub fn append_command(&mut self, command: &'static RpcCommand) -> bool {
        if self.commands.contains_key(command.name) {
            return false;
        }
        self.commands.insert(command.name, command);
        true
    }

    /// Registered method names, sorted
    pub fn list_commands(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn execute(&self, admin: &RateAdmin, request: RpcRequest) -> RpcResponse {
        let Some(command) = self.commands.get(request.method.as_str()) else {
            return RpcResponse::err(
                request.id,
                RpcError::new(rpc_codes::METHOD_NOT_FOUND, "Method not found"),
            );
        };

        tracing::debug!(method = command.name, category = command.category, "RPC call");
        match (command.actor)(admin, &request.params) {
            Ok(result) => RpcResponse::ok(request.id, result),
            Err(error) => RpcResponse::err(request.id, error),
        }
    }
}

// ============================================================================
// Exchange rate commands
// ============================================================================

static EXCHANGE_RATE_COMMANDS: [RpcCommand; 2] = [
    RpcCommand {
        category: "exchangerates",
        name: "getfeeexchangerates",
        actor: getfeeexchangerates,
    },
    RpcCommand {
        category: "exchangerates",
        name: "setfeeexchangerates",
        actor: setfeeexchangerates,
    },
];

pub fn register_exchange_rate_commands(table: &mut RpcTable) {
    for command in &EXCHANGE_RATE_COMMANDS {
        table.append_command(command);
    }
}

/// Returns `{"rates": {<asset hex>: <scaled rate>, ...}}`
fn getfeeexchangerates(admin: &RateAdmin, params: &Value) -> Result<Value, RpcError> {
    let no_args = match params {
        Value::Null => true,
        Value::Array(args) => args.is_empty(),
        Value::Object(args) => args.is_empty(),
        _ => false,
    };
    if !no_args {
        return Err(RpcError::new(
            rpc_codes::INVALID_PARAMS,
            "getfeeexchangerates takes no arguments",
        ));
    }

    serde_json::to_value(admin.get_exchange_rates())
        .map_err(|e| RpcError::new(rpc_codes::MISC_ERROR, e.to_string()))
}

/// Privileged: replace the listed rates. Returns `null`.
///
/// Params: `[{<asset or label>: <amount>, ...}]` or `{"rates": {...}}`.
fn setfeeexchangerates(admin: &RateAdmin, params: &Value) -> Result<Value, RpcError> {
    let rates = match params {
        Value::Array(args) if args.len() == 1 => args.first(),
        Value::Object(args) => args.get("rates"),
        _ => None,
    }
    .and_then(Value::as_object)
    .ok_or_else(|| {
        RpcError::new(
            rpc_codes::INVALID_PARAMS,
            "Expected a \"rates\" object mapping asset to rate",
        )
    })?;

    let rates: BTreeMap<String, Value> = rates
        .iter()
        .map(|(reference, value)| (reference.clone(), value.clone()))
        .collect();

    admin.set_exchange_rates(&rates)?;
    Ok(Value::Null)
}

// ============================================================================
// Handler
// ============================================================================

/// POST /rpc
pub async fn rpc_handler(State(state): State<Arc<AppState>>, body: Bytes) -> Json<RpcResponse> {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            return Json(RpcResponse::err(
                Value::Null,
                RpcError::new(rpc_codes::PARSE_ERROR, format!("Parse error: {}", e)),
            ));
        }
    };

    let id = value.get("id").cloned().unwrap_or(Value::Null);
    let request: RpcRequest = match serde_json::from_value(value) {
        Ok(request) => request,
        Err(e) => {
            return Json(RpcResponse::err(
                id,
                RpcError::new(rpc_codes::INVALID_REQUEST, format!("Invalid request: {}", e)),
            ));
        }
    };

    Json(state.rpc_table.execute(&state.admin, request))
}
