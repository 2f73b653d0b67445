//! Fee valuation utilities
//!
//! Fees may be paid in any accepted asset. To compare them they are valued
//! in reference fee asset units using the registry's rates:
//!
//! `value = amount * rate / EXCHANGE_RATE_SCALE` (rate precision 10^8)

use std::sync::Arc;

use crate::core_types::{AssetId, EXCHANGE_RATE_SCALE, ExchangeRate, MAX_MONEY};
use crate::exchange_rates::ExchangeRateRegistry;

/// Value a fee amount in reference fee asset units.
///
/// Uses u128 intermediate to prevent overflow. Saturates at [`MAX_MONEY`].
///
/// # Example
/// ```
/// use fee_rates::core_types::ExchangeRate;
/// use fee_rates::fee::value_in_reference_asset;
/// // 1000 units of an asset worth 2.5 reference units each
/// let value = value_in_reference_asset(1000, ExchangeRate::from_scaled(250_000_000));
/// assert_eq!(value, 2500);
/// ```
#[inline]
pub fn value_in_reference_asset(amount: u64, rate: ExchangeRate) -> u64 {
    let value = (amount as u128 * rate.scaled_value() as u128) / EXCHANGE_RATE_SCALE as u128;
    if value > MAX_MONEY as u128 {
        MAX_MONEY
    } else {
        value as u64
    }
}

/// Values fees against the live registry.
///
/// The reference fee asset is worth par by definition and is never looked
/// up. Assets with no registered rate are not accepted for fees and value
/// at zero.
#[derive(Clone)]
pub struct FeeValuator {
    registry: Arc<ExchangeRateRegistry>,
    reference_asset: AssetId,
}

impl FeeValuator {
    pub fn new(registry: Arc<ExchangeRateRegistry>, reference_asset: AssetId) -> Self {
        Self {
            registry,
            reference_asset,
        }
    }

    pub fn reference_asset(&self) -> AssetId {
        self.reference_asset
    }

    /// Whether fees in `asset` carry any value
    pub fn is_accepted(&self, asset: &AssetId) -> bool {
        *asset == self.reference_asset || self.registry.contains(asset)
    }

    pub fn value_of(&self, amount: u64, asset: &AssetId) -> u64 {
        if *asset == self.reference_asset {
            return amount.min(MAX_MONEY);
        }
        match self.registry.get(asset) {
            Some(rate) => value_in_reference_asset(amount, rate),
            None => 0,
        }
    }
}
