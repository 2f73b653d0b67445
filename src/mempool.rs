//! Pending fee pool
//!
//! The consumer side of the exchange rate registry. Each pending entry
//! caches its fee valued in reference asset units; after the rates change
//! the pool is told to recompute through [`FeeRecomputation`].

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use thiserror::Error;
use tracing::debug;

use crate::core_types::AssetId;
use crate::fee::FeeValuator;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecomputeError {
    #[error("mempool disabled or instance not found")]
    Unavailable,

    #[error("fee recomputation failed: {0}")]
    Failed(String),
}

/// Notification target invoked after the exchange rates change.
///
/// Returns the number of entries revalued.
pub trait FeeRecomputation: Send + Sync {
    fn recompute_fees(&self) -> Result<usize, RecomputeError>;
}

/// Fee paid by one pending entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingFee {
    pub asset: AssetId,
    pub amount: u64,
}

#[derive(Debug, Clone, Copy)]
struct PooledFee {
    fee: PendingFee,
    /// Cached value in reference asset units
    value: u64,
}

/// Concurrent pool of pending entries keyed by entry id (e.g. txid hex)
pub struct FeePool {
    valuator: FeeValuator,
    entries: DashMap<String, PooledFee>,
    recomputations: AtomicU64,
}

impl FeePool {
    pub fn new(valuator: FeeValuator) -> Self {
        Self {
            valuator,
            entries: DashMap::new(),
            recomputations: AtomicU64::new(0),
        }
    }

    /// Add or replace an entry. Returns its fee value.
    ///
    /// The value is derived while the entry's shard is locked, so a
    /// concurrent [`FeePool::recompute_fees`] either waits for it or runs
    /// after it and revalues it.
    pub fn insert(&self, id: impl Into<String>, fee: PendingFee) -> u64 {
        if !self.valuator.is_accepted(&fee.asset) {
            debug!(asset = %fee.asset, "pending fee paid in an asset with no exchange rate");
        }
        match self.entries.entry(id.into()) {
            Entry::Occupied(mut entry) => {
                let value = self.valuator.value_of(fee.amount, &fee.asset);
                entry.insert(PooledFee { fee, value });
                value
            }
            Entry::Vacant(entry) => {
                let value = self.valuator.value_of(fee.amount, &fee.asset);
                entry.insert(PooledFee { fee, value });
                value
            }
        }
    }

    pub fn remove(&self, id: &str) -> Option<PendingFee> {
        self.entries.remove(id).map(|(_, pooled)| pooled.fee)
    }

    /// Cached fee value of an entry
    pub fn fee_value(&self, id: &str) -> Option<u64> {
        self.entries.get(id).map(|entry| entry.value)
    }

    /// How many times the pool has been revalued
    pub fn recomputations(&self) -> u64 {
        self.recomputations.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FeeRecomputation for FeePool {
    fn recompute_fees(&self) -> Result<usize, RecomputeError> {
        let mut revalued = 0;
        for mut entry in self.entries.iter_mut() {
            let fee = entry.fee;
            entry.value = self.valuator.value_of(fee.amount, &fee.asset);
            revalued += 1;
        }
        self.recomputations.fetch_add(1, Ordering::Relaxed);
        debug!(revalued, "pending fees recomputed");
        Ok(revalued)
    }
}
