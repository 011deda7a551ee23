//! Decimal precision policy applied when a day ratio becomes a fraction.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::{ProrationError, Result};

/// Largest scale the decimal representation can carry.
pub const MAX_SCALE: u32 = 28;

/// Scale used when no policy is configured, matching the invoice money precision.
pub const DEFAULT_SCALE: u32 = 9;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Round half away from zero.
    #[default]
    HalfUp,
    /// Banker's rounding.
    HalfEven,
    HalfDown,
    /// Toward negative infinity.
    Floor,
    /// Toward positive infinity.
    Ceiling,
    /// Away from zero.
    Up,
    /// Toward zero.
    Down,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingMode::HalfDown => RoundingStrategy::MidpointTowardZero,
            RoundingMode::Floor => RoundingStrategy::ToNegativeInfinity,
            RoundingMode::Ceiling => RoundingStrategy::ToPositiveInfinity,
            RoundingMode::Up => RoundingStrategy::AwayFromZero,
            RoundingMode::Down => RoundingStrategy::ToZero,
        }
    }
}

/// Scale and rounding mode for every fraction the kernel produces.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrecisionPolicy {
    scale: u32,
    #[serde(default)]
    rounding_mode: RoundingMode,
}

impl PrecisionPolicy {
    pub fn new(scale: u32, rounding_mode: RoundingMode) -> Result<Self> {
        let policy = Self {
            scale,
            rounding_mode,
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn rounding_mode(&self) -> RoundingMode {
        self.rounding_mode
    }

    /// Checks the scale fits the decimal representation. Policies built through
    /// serde bypass [`PrecisionPolicy::new`], so loaders call this explicitly.
    pub fn validate(&self) -> Result<()> {
        if self.scale > MAX_SCALE {
            return Err(ProrationError::InvalidPrecision {
                scale: self.scale,
                max: MAX_SCALE,
            });
        }
        Ok(())
    }

    /// Divides `numerator` by `denominator` and rounds the quotient to the policy.
    ///
    /// Callers guarantee a positive denominator.
    pub fn divide(&self, numerator: i64, denominator: i64) -> Decimal {
        let quotient = Decimal::from(numerator) / Decimal::from(denominator);
        self.round(quotient)
    }

    pub fn round(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.scale.min(MAX_SCALE), self.rounding_mode.strategy())
    }
}

impl Default for PrecisionPolicy {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            rounding_mode: RoundingMode::HalfUp,
        }
    }
}

/// Fraction of a full billing period covered by an interval.
///
/// Not clamped: inverted intervals give negative values and intervals longer
/// than the reference window give values above one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(transparent)]
pub struct ProrationFraction(Decimal);

impl ProrationFraction {
    pub const ZERO: ProrationFraction = ProrationFraction(Decimal::ZERO);
    pub const ONE: ProrationFraction = ProrationFraction(Decimal::ONE);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl From<Decimal> for ProrationFraction {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<ProrationFraction> for Decimal {
    fn from(value: ProrationFraction) -> Self {
        value.0
    }
}

impl fmt::Display for ProrationFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_policy_is_nine_digits_half_up() {
        let policy = PrecisionPolicy::default();
        assert_eq!(policy.scale(), 9);
        assert_eq!(policy.rounding_mode(), RoundingMode::HalfUp);
        assert_eq!(policy.divide(17, 31), dec!(0.548387097));
        assert_eq!(policy.divide(2, 3), dec!(0.666666667));
    }

    #[test]
    fn rounding_modes_follow_their_strategy() {
        let at = |mode| PrecisionPolicy::new(1, mode).unwrap().round(dec!(0.25));
        assert_eq!(at(RoundingMode::HalfUp), dec!(0.3));
        assert_eq!(at(RoundingMode::HalfEven), dec!(0.2));
        assert_eq!(at(RoundingMode::HalfDown), dec!(0.2));
        assert_eq!(at(RoundingMode::Floor), dec!(0.2));
        assert_eq!(at(RoundingMode::Ceiling), dec!(0.3));
        assert_eq!(at(RoundingMode::Up), dec!(0.3));
        assert_eq!(at(RoundingMode::Down), dec!(0.2));

        let floor = PrecisionPolicy::new(2, RoundingMode::Floor).unwrap();
        assert_eq!(floor.divide(-1, 3), dec!(-0.34));
    }

    #[test]
    fn oversized_scale_is_rejected() {
        let err = PrecisionPolicy::new(29, RoundingMode::HalfEven).unwrap_err();
        assert!(matches!(
            err,
            ProrationError::InvalidPrecision { scale: 29, max: 28 }
        ));
        assert!(PrecisionPolicy::new(28, RoundingMode::HalfEven).is_ok());
    }

    #[test]
    fn fraction_sign_helpers() {
        assert!(ProrationFraction::ZERO.is_zero());
        assert!(!ProrationFraction::ZERO.is_negative());
        assert!(ProrationFraction::new(dec!(-0.1)).is_negative());
        assert!(ProrationFraction::ONE > ProrationFraction::new(dec!(0.5)));
        assert_eq!(ProrationFraction::new(dec!(0.25)).to_string(), "0.25");
    }
}
