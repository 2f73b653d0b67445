//! Fee exchange rate registry
//!
//! Fees may be paid in any accepted asset. This crate keeps the table of
//! exchange rates used to value those fees in reference fee asset units and
//! exposes it through a privileged admin gateway.
//!
//! # Modules
//!
//! - [`core_types`] - `AssetId`, `ExchangeRate`, scale constants
//! - [`exchange_rates`] - Concurrent asset → rate registry
//! - [`asset_directory`] - Label / hex asset reference resolution
//! - [`money`] - Rate value parsing
//! - [`fee`] - Fee valuation against the registry
//! - [`mempool`] - Pending fee pool, recomputed when rates change
//! - [`admin`] - Get / set exchange rate operations
//! - [`context`] - Process-wide node state
//! - [`gateway`] - HTTP admin API and JSON-RPC endpoint

// Core types - must be first!
pub mod core_types;

pub mod asset_directory;
pub mod exchange_rates;
pub mod fee;
pub mod mempool;
pub mod money;

pub mod admin;
pub mod context;

pub mod config;
pub mod gateway;
pub mod logging;

// Convenient re-exports at crate root
pub use admin::{ExchangeRatesData, RateAdmin, RateAdminError, SetExchangeRatesRequest};
pub use asset_directory::{AssetDirectory, AssetResolver};
pub use context::NodeContext;
pub use core_types::{AssetId, EXCHANGE_RATE_SCALE, ExchangeRate};
pub use exchange_rates::ExchangeRateRegistry;
pub use fee::FeeValuator;
pub use mempool::{FeePool, FeeRecomputation, PendingFee, RecomputeError};
