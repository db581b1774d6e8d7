use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// V3 fee tiers probed in ascending order, in hundredths of a basis point.
pub const V3_FEE_TIERS: [u32; 4] = [100, 500, 3000, 10000];

const FEE_TIER_PER_PERCENT: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Venue {
    V2,
    V3,
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Venue::V2 => write!(f, "V2"),
            Venue::V3 => write!(f, "V3"),
        }
    }
}

/// Which venues the router may consider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoutePreference {
    /// V2 direct path first, V3 fee-tier search as fallback.
    #[default]
    Auto,
    ForceV3,
}

/// Best route found for one exact-input swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapQuote {
    pub venue: Venue,
    /// Only set for V3.
    pub fee_tier: Option<u32>,
    pub amount_in: U256,
    pub amount_out: U256,
}

impl SwapQuote {
    pub fn v2(amount_in: U256, amount_out: U256) -> Self {
        Self {
            venue: Venue::V2,
            fee_tier: None,
            amount_in,
            amount_out,
        }
    }

    pub fn v3(fee_tier: u32, amount_in: U256, amount_out: U256) -> Self {
        Self {
            venue: Venue::V3,
            fee_tier: Some(fee_tier),
            amount_in,
            amount_out,
        }
    }

    /// e.g. "V2" or "V3 (0.30% fee)".
    pub fn venue_label(&self) -> String {
        match self.fee_tier {
            Some(fee) => format!("{} ({:.2}% fee)", self.venue, fee_tier_percent(fee)),
            None => self.venue.to_string(),
        }
    }
}

pub fn fee_tier_percent(fee_tier: u32) -> f64 {
    fee_tier as f64 / FEE_TIER_PER_PERCENT
}

/// Output per unit of input in human terms. Display only.
pub fn display_price(amount_in_human: f64, amount_out_human: f64) -> Option<f64> {
    if amount_in_human > 0.0 {
        Some(amount_out_human / amount_in_human)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_venue_label() {
        let v2 = SwapQuote::v2(U256::from(1u64), U256::from(2u64));
        assert_eq!(v2.venue_label(), "V2");
        let v3 = SwapQuote::v3(3000, U256::from(1u64), U256::from(2u64));
        assert_eq!(v3.venue_label(), "V3 (0.30% fee)");
    }

    #[test]
    fn test_display_price() {
        assert_eq!(display_price(2.0, 5.0), Some(2.5));
        assert_eq!(display_price(0.0, 5.0), None);
    }
}
