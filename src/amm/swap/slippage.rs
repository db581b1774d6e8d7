use crate::errors::{AmmError, AmmResult};
use alloy::primitives::U256;
use std::fmt;

/// Parts-per-million scale used for slippage arithmetic.
const PPM_SCALE: u64 = 1_000_000;
const PPM_PER_PERCENT: f64 = 10_000.0;
/// Scaled values this close to an integer are float noise, e.g. 0.29 * 10^4.
const PPM_EPSILON: f64 = 1e-6;

/// Maximum tolerated output shortfall, stored in parts per million so the
/// bound is computed on integers only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slippage {
    ppm: u64,
}

impl Slippage {
    /// Accepts percentages in `[0, 100)`; `0.5` means half a percent.
    pub fn from_percent(percent: f64) -> AmmResult<Self> {
        if !percent.is_finite() || !(0.0..100.0).contains(&percent) {
            return Err(AmmError::InvalidSlippage(format!(
                "{} is outside [0, 100)",
                percent
            )));
        }
        let ppm = to_ppm_floor(percent);
        if ppm >= PPM_SCALE {
            return Err(AmmError::InvalidSlippage(format!(
                "{} rounds to 100%",
                percent
            )));
        }
        Ok(Self { ppm })
    }

    pub fn ppm(&self) -> u64 {
        self.ppm
    }

    pub fn percent(&self) -> f64 {
        self.ppm as f64 / PPM_PER_PERCENT
    }

    /// `floor(amount_out * (1 - slippage))`, split into quotient and
    /// remainder so the product never overflows 256 bits.
    pub fn amount_out_min(&self, amount_out: U256) -> U256 {
        let scale = U256::from(PPM_SCALE);
        let keep = U256::from(PPM_SCALE - self.ppm);
        let whole = amount_out / scale;
        let rest = amount_out % scale;
        whole * keep + rest * keep / scale
    }
}

/// Floors to whole ppm so the stored tolerance never exceeds the requested one.
fn to_ppm_floor(percent: f64) -> u64 {
    let scaled = percent * PPM_PER_PERCENT;
    let nearest = scaled.round();
    if (scaled - nearest).abs() < PPM_EPSILON {
        nearest as u64
    } else {
        scaled.floor() as u64
    }
}

impl fmt::Display for Slippage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}
