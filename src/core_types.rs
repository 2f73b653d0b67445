//! Core types used throughout the system
//!
//! Asset identifiers and fixed-point exchange rates. Every fee computation
//! runs on these integer types; nothing here touches floating point.

use std::fmt;
use std::str::FromStr;

/// Fixed-point scale for exchange rates (10^8).
///
/// A rate of `EXCHANGE_RATE_SCALE` means one unit of the asset is worth
/// exactly one unit of the reference fee asset.
pub const EXCHANGE_RATE_SCALE: u64 = 100_000_000;

/// Base units per coin (satoshi-style, 10^8)
pub const COIN: u64 = 100_000_000;

/// Upper bound for any valued amount. Valuations saturate here.
pub const MAX_MONEY: u64 = 21_000_000 * COIN;

/// Asset ID - fixed-width opaque identifier for an asset.
///
/// # Text form:
/// 64 hex characters in *display order*, which is the internal byte array
/// reversed (the same convention used for transaction ids).
///
/// The all-zero value is the null asset and never names a real asset.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AssetId([u8; 32]);

impl AssetId {
    /// Length of the canonical hex form
    pub const HEX_LEN: usize = 64;

    /// The null asset (all zero bytes)
    pub const NULL: AssetId = AssetId([0u8; 32]);

    /// Wrap raw bytes (internal order)
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw bytes (internal order)
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_null(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Parse from display-order hex. Accepts upper or lower case.
    pub fn from_hex(s: &str) -> Result<Self, AssetIdParseError> {
        if s.len() != Self::HEX_LEN {
            return Err(AssetIdParseError::InvalidLength(s.len()));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| AssetIdParseError::InvalidHex)?;
        bytes.reverse();
        Ok(Self(bytes))
    }

    /// Canonical lowercase display-order hex
    pub fn to_hex(&self) -> String {
        let mut bytes = self.0;
        bytes.reverse();
        hex::encode(bytes)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId({})", self.to_hex())
    }
}

impl FromStr for AssetId {
    type Err = AssetIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetIdParseError {
    #[error("asset id must be 64 hex characters, got {0}")]
    InvalidLength(usize),

    #[error("asset id contains non-hex characters")]
    InvalidHex,
}

/// Exchange rate - price of one asset unit in reference fee asset units,
/// scaled by [`EXCHANGE_RATE_SCALE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ExchangeRate(u64);

impl ExchangeRate {
    /// Rate of the reference fee asset against itself
    pub const PAR: ExchangeRate = ExchangeRate(EXCHANGE_RATE_SCALE);

    pub const fn from_scaled(scaled_value: u64) -> Self {
        Self(scaled_value)
    }

    /// Scaled integer value
    pub const fn scaled_value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const L_BTC: &str = "6f0279e9ed041c3d710a9f57d0c02928416460c4b722ae3457a11eec381c526d";

    #[test]
    fn test_hex_is_display_order() {
        let asset = AssetId::from_hex(L_BTC).unwrap();
        // Last display byte is the first internal byte
        assert_eq!(asset.as_bytes()[0], 0x6d);
        assert_eq!(asset.as_bytes()[31], 0x6f);
        assert_eq!(asset.to_hex(), L_BTC);
        assert_eq!(asset.to_string(), L_BTC);
    }

    #[test]
    fn test_hex_accepts_uppercase() {
        let upper = L_BTC.to_uppercase();
        let asset: AssetId = upper.parse().unwrap();
        assert_eq!(asset.to_hex(), L_BTC);
    }

    #[test]
    fn test_hex_rejects_bad_input() {
        assert_eq!(
            AssetId::from_hex("abcd"),
            Err(AssetIdParseError::InvalidLength(4))
        );
        let not_hex = "zz".repeat(32);
        assert_eq!(
            AssetId::from_hex(&not_hex),
            Err(AssetIdParseError::InvalidHex)
        );
    }

    #[test]
    fn test_null_asset() {
        let zero = "0".repeat(64);
        let asset = AssetId::from_hex(&zero).unwrap();
        assert!(asset.is_null());
        assert_eq!(asset, AssetId::NULL);
        assert!(!AssetId::from_hex(L_BTC).unwrap().is_null());
    }

    #[test]
    fn test_par_rate() {
        assert_eq!(ExchangeRate::PAR.scaled_value(), EXCHANGE_RATE_SCALE);
        assert_eq!(ExchangeRate::from_scaled(42).to_string(), "42");
    }
}
