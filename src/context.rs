//! Process-wide node state.
//!
//! Built exactly once at startup and handed to everything that needs the
//! registry, instead of a global. Lives until process exit.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::admin::RateAdmin;
use crate::asset_directory::{AssetDirectory, AssetResolver, DirectoryError};
use crate::config::AppConfig;
use crate::core_types::{AssetId, AssetIdParseError};
use crate::exchange_rates::ExchangeRateRegistry;
use crate::fee::FeeValuator;
use crate::mempool::{FeePool, FeeRecomputation};

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("invalid reference fee asset: {0}")]
    ReferenceAsset(#[from] AssetIdParseError),

    #[error("reference fee asset must not be the null asset")]
    NullReferenceAsset,

    #[error("invalid asset directory: {0}")]
    Directory(#[from] DirectoryError),
}

pub struct NodeContext {
    pub registry: Arc<ExchangeRateRegistry>,
    pub assets: Arc<AssetDirectory>,
    pub valuator: FeeValuator,
    /// `None` when running without a mempool
    pub fee_pool: Option<Arc<FeePool>>,
}

impl NodeContext {
    pub fn new(
        reference_asset: AssetId,
        assets: AssetDirectory,
        mempool_enabled: bool,
    ) -> Result<Self, ContextError> {
        if reference_asset.is_null() {
            return Err(ContextError::NullReferenceAsset);
        }

        let registry = Arc::new(ExchangeRateRegistry::new());
        let valuator = FeeValuator::new(Arc::clone(&registry), reference_asset);
        let fee_pool = if mempool_enabled {
            Some(Arc::new(FeePool::new(valuator.clone())))
        } else {
            warn!("Mempool disabled: rate updates will report recomputation failures");
            None
        };

        info!(
            reference_asset = %valuator.reference_asset(),
            labels = assets.len(),
            mempool = mempool_enabled,
            "Node context initialized"
        );

        Ok(Self {
            registry,
            assets: Arc::new(assets),
            valuator,
            fee_pool,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ContextError> {
        let reference_asset = AssetId::from_hex(&config.fee.reference_asset)?;
        let assets = AssetDirectory::from_config(&config.assets)?;
        Self::new(reference_asset, assets, config.mempool.enabled)
    }

    /// Admin service wired to this context's registry and fee pool
    pub fn rate_admin(&self) -> RateAdmin {
        let recompute = self
            .fee_pool
            .as_ref()
            .map(|pool| Arc::clone(pool) as Arc<dyn FeeRecomputation>);
        RateAdmin::new(
            Arc::clone(&self.registry),
            Arc::clone(&self.assets) as Arc<dyn AssetResolver>,
            recompute,
        )
    }
}
