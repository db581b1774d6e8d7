use crate::errors::{AmmError, AmmResult};
use alloy::primitives::utils::{format_units, parse_units};
use alloy::primitives::{Address, U256};
use std::fmt;

/// Decimals assumed when a token does not answer `decimals()` during a quote.
pub const FALLBACK_DECIMALS: u8 = 18;
pub const FALLBACK_SYMBOL: &str = "TOKEN";

/// Point-in-time ERC-20 snapshot. Re-fetched on every use, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Balance of the loaded wallet, if any.
    pub balance: Option<U256>,
}

impl TokenInfo {
    pub fn new(address: Address, name: String, symbol: String, decimals: u8) -> Self {
        Self {
            address,
            name,
            symbol,
            decimals,
            balance: None,
        }
    }

    /// Placeholder used by quotes when the token metadata cannot be read.
    pub fn unknown(address: Address) -> Self {
        Self::new(
            address,
            String::new(),
            FALLBACK_SYMBOL.to_string(),
            FALLBACK_DECIMALS,
        )
    }

    pub fn to_raw_amount(&self, amount: &str) -> AmmResult<U256> {
        to_raw_amount(amount, self.decimals)
    }

    pub fn to_human_amount(&self, amount: U256) -> AmmResult<String> {
        to_human_amount(amount, self.decimals)
    }

    pub fn to_raw_amount_f64(&self, amount: f64) -> AmmResult<U256> {
        to_raw_amount_f64(amount, self.decimals)
    }

    pub fn to_human_amount_f64(&self, amount: U256) -> AmmResult<f64> {
        to_human_amount_f64(amount, self.decimals)
    }
}

impl fmt::Display for TokenInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) at {} with {} decimals",
            self.name, self.symbol, self.address, self.decimals
        )
    }
}

/// Human decimal string -> smallest-unit integer (`amount * 10^decimals`).
/// More fractional digits than `decimals` is an error, never a truncation.
pub fn to_raw_amount(amount: &str, decimals: u8) -> AmmResult<U256> {
    let trimmed = amount.trim();
    if trimmed.starts_with('-') {
        return Err(AmmError::InvalidAmount(format!(
            "amount must not be negative: {}",
            trimmed
        )));
    }
    if let Some((_, fraction)) = trimmed.split_once('.') {
        if fraction.len() > decimals as usize {
            return Err(AmmError::InvalidAmount(format!(
                "'{}' has more than {} decimal places",
                trimmed, decimals
            )));
        }
    }
    parse_units(trimmed, decimals)
        .map(|parsed| parsed.get_absolute())
        .map_err(|e| AmmError::InvalidAmount(format!("'{}': {}", trimmed, e)))
}

/// Smallest-unit integer -> human decimal string with `decimals` fractional digits.
pub fn to_human_amount(amount: U256, decimals: u8) -> AmmResult<String> {
    format_units(amount, decimals).map_err(|e| AmmError::InvalidAmount(e.to_string()))
}

pub fn to_raw_amount_f64(amount: f64, decimals: u8) -> AmmResult<U256> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(AmmError::InvalidAmount(format!("{}", amount)));
    }
    to_raw_amount(&format!("{:.*}", decimals as usize, amount), decimals)
}

pub fn to_human_amount_f64(amount: U256, decimals: u8) -> AmmResult<f64> {
    let human = to_human_amount(amount, decimals)?;
    human
        .parse::<f64>()
        .map_err(|e| AmmError::InvalidAmount(format!("'{}': {}", human, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_to_raw_amount() {
        assert_eq!(
            to_raw_amount("1.5", 18).unwrap(),
            U256::from(1_500_000_000_000_000_000u128)
        );
        assert_eq!(to_raw_amount("100", 6).unwrap(), U256::from(100_000_000u64));
        assert_eq!(to_raw_amount("0.000001", 6).unwrap(), U256::from(1u64));
        assert!(to_raw_amount("abc", 18).is_err());
        assert!(to_raw_amount("-1", 18).is_err());
    }

    #[test]
    fn test_to_raw_amount_rejects_excess_precision() {
        let err = to_raw_amount("1.0000009", 6).unwrap_err();
        assert!(matches!(err, AmmError::InvalidAmount(_)));
        assert!(to_raw_amount("1.5", 0).is_err());
        assert_eq!(to_raw_amount("1.000001", 6).unwrap(), U256::from(1_000_001u64));
    }

    #[test]
    fn test_human_round_trip() {
        for (amount, decimals) in [("1.5", 18u8), ("123.456789", 6), ("42", 0), ("0.1", 8)] {
            let raw = to_raw_amount(amount, decimals).unwrap();
            let back = to_human_amount_f64(raw, decimals).unwrap();
            let expected: f64 = amount.parse().unwrap();
            assert!((back - expected).abs() < 10f64.powi(-(decimals as i32)).max(1e-12));
        }
    }

    #[test]
    fn test_f64_round_trip_within_precision() {
        let raw = to_raw_amount_f64(100.25, 6).unwrap();
        assert_eq!(raw, U256::from(100_250_000u64));
        assert_eq!(to_human_amount_f64(raw, 6).unwrap(), 100.25);
        assert!(to_raw_amount_f64(f64::NAN, 18).is_err());
        assert!(to_raw_amount_f64(-1.0, 18).is_err());
    }

    #[test]
    fn test_unknown_token_defaults() {
        let token = TokenInfo::unknown(address!("848Cff46eb323f323b6Bbe1Df274E40793d7f2c2"));
        assert_eq!(token.symbol, "TOKEN");
        assert_eq!(token.decimals, 18);
        assert_eq!(token.to_raw_amount("2").unwrap(), U256::from(2u128 * 10u128.pow(18)));
    }
}
