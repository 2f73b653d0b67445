//! Exchange rate registry for fee valuation.
//!
//! Maps asset ids to the rate at which fees paid in that asset are valued
//! in reference fee asset units. One instance lives for the whole process
//! and is shared through [`crate::context::NodeContext`].
//!
//! Backed by a sharded `DashMap`: readers run concurrently, writers to the
//! same key are serialized by the shard lock, and each entry is replaced
//! whole, so a reader never sees a half-written rate.
//!
//! Batches are applied entry by entry. A concurrent reader may observe part
//! of a batch, never part of an entry.

use dashmap::DashMap;
use tracing::debug;

use crate::core_types::{AssetId, ExchangeRate};

/// Thread-safe asset → exchange rate table.
pub struct ExchangeRateRegistry {
    rates: DashMap<AssetId, ExchangeRate>,
}

impl ExchangeRateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            rates: DashMap::new(),
        }
    }

    /// Snapshot of every entry, ordered by asset id.
    ///
    /// Each returned pair is a value that was explicitly set for that key.
    pub fn get_all(&self) -> Vec<(AssetId, ExchangeRate)> {
        let mut entries: Vec<(AssetId, ExchangeRate)> = self
            .rates
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Rate for a single asset.
    pub fn get(&self, asset: &AssetId) -> Option<ExchangeRate> {
        self.rates.get(asset).map(|entry| *entry.value())
    }

    /// Insert or overwrite the rate for one asset.
    ///
    /// No validation: callers hand in resolved ids and parsed rates.
    pub fn set(&self, asset: AssetId, rate: ExchangeRate) {
        debug!(asset = %asset, rate = rate.scaled_value(), "exchange rate set");
        self.rates.insert(asset, rate);
    }

    /// Apply many `set` operations. Returns the number of entries written.
    pub fn apply_batch<I>(&self, batch: I) -> usize
    where
        I: IntoIterator<Item = (AssetId, ExchangeRate)>,
    {
        let mut applied = 0;
        for (asset, rate) in batch {
            self.set(asset, rate);
            applied += 1;
        }
        applied
    }

    pub fn contains(&self, asset: &AssetId) -> bool {
        self.rates.contains_key(asset)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for ExchangeRateRegistry {
    fn default() -> Self {
        Self::new()
    }
}
