//! Fee exchange rate administration
//!
//! The two privileged operations over the registry:
//! - [`RateAdmin::get_exchange_rates`]: full table keyed by asset hex
//! - [`RateAdmin::set_exchange_rates`]: validate, apply, then tell the fee
//!   consumer to recompute
//!
//! Every reference and value in a set request is validated before the
//! registry is touched, so a rejected request changes nothing. A failed
//! recomputation is reported but the applied rates stay in place.

pub mod error;

pub use error::RateAdminError;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use crate::asset_directory::AssetResolver;
use crate::core_types::{AssetId, ExchangeRate};
use crate::exchange_rates::ExchangeRateRegistry;
use crate::mempool::{FeeRecomputation, RecomputeError};
use crate::money::parse_rate_value;

/// Rate table as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExchangeRatesData {
    /// Asset hex → scaled rate (10^8 = par with the reference fee asset)
    #[schema(example = json!({"6f0279e9ed041c3d710a9f57d0c02928416460c4b722ae3457a11eec381c526d": 100000000}))]
    pub rates: BTreeMap<String, u64>,
}

/// Body of a set request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetExchangeRatesRequest {
    /// Asset hex or label → rate (integer or numeric string)
    #[schema(value_type = Object, example = json!({"bitcoin": 100000000, "aa11aa11aa11aa11aa11aa11aa11aa11aa11aa11aa11aa11aa11aa11aa11aa11": "2500"}))]
    pub rates: BTreeMap<String, Value>,
}

pub struct RateAdmin {
    registry: Arc<ExchangeRateRegistry>,
    resolver: Arc<dyn AssetResolver>,
    recompute: Option<Arc<dyn FeeRecomputation>>,
}

impl RateAdmin {
    pub fn new(
        registry: Arc<ExchangeRateRegistry>,
        resolver: Arc<dyn AssetResolver>,
        recompute: Option<Arc<dyn FeeRecomputation>>,
    ) -> Self {
        Self {
            registry,
            resolver,
            recompute,
        }
    }

    pub fn registry(&self) -> &Arc<ExchangeRateRegistry> {
        &self.registry
    }

    /// Snapshot of every registered rate
    pub fn get_exchange_rates(&self) -> ExchangeRatesData {
        let rates = self
            .registry
            .get_all()
            .into_iter()
            .map(|(asset, rate)| (asset.to_hex(), rate.scaled_value()))
            .collect();
        ExchangeRatesData { rates }
    }

    /// Replace the rates named in `rates`; other entries are kept.
    ///
    /// Entries are validated in key order and the first failure aborts the
    /// request. Two references naming the same asset: the later key wins.
    /// Returns the number of entries applied.
    pub fn set_exchange_rates(
        &self,
        rates: &BTreeMap<String, Value>,
    ) -> Result<usize, RateAdminError> {
        let validated = self.validate(rates).inspect_err(|e| {
            warn!(kind = e.name(), error = %e, "fee exchange rate update rejected");
        })?;

        let applied = self.registry.apply_batch(validated);
        info!(applied, total = self.registry.len(), "fee exchange rates updated");

        self.notify_recompute()?;
        Ok(applied)
    }

    fn validate(
        &self,
        rates: &BTreeMap<String, Value>,
    ) -> Result<Vec<(AssetId, ExchangeRate)>, RateAdminError> {
        let mut validated = Vec::with_capacity(rates.len());
        for (reference, value) in rates {
            let asset = self
                .resolver
                .resolve(reference)
                .ok_or_else(|| RateAdminError::InvalidAssetReference(reference.clone()))?;
            let rate = parse_rate_value(value)
                .map_err(|e| RateAdminError::invalid_rate(reference, e))?;
            debug!(
                reference = %reference,
                asset = %asset,
                label = self.resolver.label_of(&asset).unwrap_or("-"),
                rate = rate.scaled_value(),
                "rate entry validated"
            );
            validated.push((asset, rate));
        }
        Ok(validated)
    }

    fn notify_recompute(&self) -> Result<(), RateAdminError> {
        let recompute = self
            .recompute
            .as_ref()
            .ok_or_else(|| RateAdminError::RecomputationFailed(RecomputeError::Unavailable.to_string()))?;

        match recompute.recompute_fees() {
            Ok(revalued) => {
                debug!(revalued, "fee recomputation triggered");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "fee recomputation failed after rate update");
                Err(RateAdminError::RecomputationFailed(e.to_string()))
            }
        }
    }
}
