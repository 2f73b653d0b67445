//! HTTP handlers
//!
//! - [`health`]: liveness
//! - [`rates`]: fee exchange rate administration

pub mod health;
pub mod rates;

pub use health::{HealthResponse, health_check};
pub use rates::{get_fee_exchange_rates, set_fee_exchange_rates};
