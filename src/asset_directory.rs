//! Asset reference resolution
//!
//! Turns the textual asset references accepted by the admin API into
//! [`AssetId`]s. A reference is either a configured label (e.g. `"bitcoin"`)
//! or a 64-char display-order hex id.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::config::AssetLabelConfig;
use crate::core_types::AssetId;

/// Resolves a label or hex string to an asset id.
///
/// Returns `None` when the reference is neither a known label nor a
/// well-formed, non-null hex id.
pub trait AssetResolver: Send + Sync {
    fn resolve(&self, reference: &str) -> Option<AssetId>;

    /// Display label of an asset, if it has one
    fn label_of(&self, _asset: &AssetId) -> Option<&str> {
        None
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DirectoryError {
    #[error("duplicate asset label: {0}")]
    DuplicateLabel(String),

    #[error("asset {0} already has label '{1}'")]
    DuplicateAsset(String, String),

    #[error("asset label must not be empty")]
    EmptyLabel,

    #[error("asset label '{0}' is indistinguishable from a hex asset id")]
    HexLikeLabel(String),

    #[error("invalid asset id for label '{label}': {reason}")]
    InvalidAsset { label: String, reason: String },
}

/// Bidirectional label ↔ asset id map
#[derive(Debug, Clone, Default)]
pub struct AssetDirectory {
    label_to_asset: FxHashMap<String, AssetId>,
    asset_to_label: FxHashMap<AssetId, String>,
}

impl AssetDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from configured `label: asset` pairs
    pub fn from_config(entries: &[AssetLabelConfig]) -> Result<Self, DirectoryError> {
        let mut directory = Self::new();
        for entry in entries {
            let asset = AssetId::from_hex(&entry.asset).map_err(|e| {
                DirectoryError::InvalidAsset {
                    label: entry.label.clone(),
                    reason: e.to_string(),
                }
            })?;
            directory.add_label(&entry.label, asset)?;
        }
        Ok(directory)
    }

    /// Register a label for an asset.
    pub fn add_label(&mut self, label: &str, asset: AssetId) -> Result<(), DirectoryError> {
        if label.is_empty() {
            return Err(DirectoryError::EmptyLabel);
        }
        if is_hex_id(label) {
            return Err(DirectoryError::HexLikeLabel(label.to_string()));
        }
        if asset.is_null() {
            return Err(DirectoryError::InvalidAsset {
                label: label.to_string(),
                reason: "null asset".to_string(),
            });
        }
        if self.label_to_asset.contains_key(label) {
            return Err(DirectoryError::DuplicateLabel(label.to_string()));
        }
        if let Some(existing) = self.asset_to_label.get(&asset) {
            return Err(DirectoryError::DuplicateAsset(
                asset.to_hex(),
                existing.clone(),
            ));
        }

        self.label_to_asset.insert(label.to_string(), asset);
        self.asset_to_label.insert(asset, label.to_string());
        Ok(())
    }

    pub fn asset_of(&self, label: &str) -> Option<AssetId> {
        self.label_to_asset.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.label_to_asset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.label_to_asset.is_empty()
    }
}

impl AssetResolver for AssetDirectory {
    fn resolve(&self, reference: &str) -> Option<AssetId> {
        if let Some(asset) = self.asset_of(reference) {
            return Some(asset);
        }
        if !is_hex_id(reference) {
            return None;
        }
        AssetId::from_hex(reference)
            .ok()
            .filter(|asset| !asset.is_null())
    }

    fn label_of(&self, asset: &AssetId) -> Option<&str> {
        self.asset_to_label.get(asset).map(String::as_str)
    }
}

fn is_hex_id(s: &str) -> bool {
    s.len() == AssetId::HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    const L_BTC: &str = "6f0279e9ed041c3d710a9f57d0c02928416460c4b722ae3457a11eec381c526d";
    const USDT: &str = "ce091c998b83c78bb71a632313ba3760f1763d9cfcffae02258ffa9865a37bd2";

    fn directory() -> AssetDirectory {
        AssetDirectory::from_config(&[
            AssetLabelConfig {
                label: "bitcoin".to_string(),
                asset: L_BTC.to_string(),
            },
            AssetLabelConfig {
                label: "USDt".to_string(),
                asset: USDT.to_string(),
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_resolve_label() {
        let dir = directory();
        assert_eq!(dir.resolve("bitcoin"), Some(AssetId::from_hex(L_BTC).unwrap()));
        assert_eq!(dir.resolve("USDt"), Some(AssetId::from_hex(USDT).unwrap()));
        // Labels are case sensitive
        assert_eq!(dir.resolve("BITCOIN"), None);
    }

    #[test]
    fn test_resolve_hex_without_label() {
        let dir = AssetDirectory::new();
        let unlabeled = "aa".repeat(32);
        assert_eq!(
            dir.resolve(&unlabeled).map(|a| a.to_hex()),
            Some(unlabeled.clone())
        );
    }

    #[test]
    fn test_resolve_rejects_unknown_and_malformed() {
        let dir = directory();
        assert_eq!(dir.resolve("not-a-real-asset"), None);
        assert_eq!(dir.resolve(""), None);
        assert_eq!(dir.resolve(&"a".repeat(63)), None);
        assert_eq!(dir.resolve(&"g".repeat(64)), None);
    }

    #[test]
    fn test_resolve_rejects_null_asset() {
        let dir = directory();
        assert_eq!(dir.resolve(&"0".repeat(64)), None);
    }

    #[test]
    fn test_label_of_through_resolver() {
        let mut dir = AssetDirectory::new();
        let btc = AssetId::from_hex(L_BTC).unwrap();
        dir.add_label("bitcoin", btc).unwrap();

        let resolver: &dyn AssetResolver = &dir;
        assert_eq!(resolver.label_of(&btc), Some("bitcoin"));
        let unlabeled = AssetId::from_hex(USDT).unwrap();
        assert_eq!(resolver.label_of(&unlabeled), None);
    }

    #[test]
    fn test_label_of() {
        let dir = directory();
        let btc = AssetId::from_hex(L_BTC).unwrap();
        assert_eq!(dir.label_of(&btc), Some("bitcoin"));
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let mut dir = directory();
        let other = AssetId::from_hex(&"ab".repeat(32)).unwrap();
        assert_eq!(
            dir.add_label("bitcoin", other),
            Err(DirectoryError::DuplicateLabel("bitcoin".to_string()))
        );
    }

    #[test]
    fn test_duplicate_asset_rejected() {
        let mut dir = directory();
        let btc = AssetId::from_hex(L_BTC).unwrap();
        assert!(matches!(
            dir.add_label("lbtc", btc),
            Err(DirectoryError::DuplicateAsset(_, _))
        ));
    }

    #[test]
    fn test_hex_like_label_rejected() {
        let mut dir = AssetDirectory::new();
        let asset = AssetId::from_hex(L_BTC).unwrap();
        assert!(matches!(
            dir.add_label(USDT, asset),
            Err(DirectoryError::HexLikeLabel(_))
        ));
    }

    #[test]
    fn test_invalid_config_asset() {
        let result = AssetDirectory::from_config(&[AssetLabelConfig {
            label: "broken".to_string(),
            asset: "xyz".to_string(),
        }]);
        assert!(matches!(result, Err(DirectoryError::InvalidAsset { .. })));
    }
}
