//! Gateway types module
//!
//! ## Output Types
//! - [`ApiResponse<T>`]: Unified API response wrapper
//! - [`SetRatesData`]: Result of a rate update
//!
//! ## Submodules
//! - [`response`]: Response types and error codes

pub mod response;

pub use response::{ApiResponse, SetRatesData, error_codes};
