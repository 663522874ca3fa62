use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

/// Fractional digits reported for currency amounts.
pub const CURRENCY_DP: u32 = 2;

/// Fractional digits kept when an annual rate is stored.
pub const STORED_RATE_DP: u32 = 4;

/// The single rounding mode applied to every presented figure of a
/// schedule or summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingPolicy {
    /// Ties go away from zero (858.365 -> 858.37).
    #[default]
    HalfUp,
    /// Banker's rounding: ties go to the even digit.
    HalfEven,
    /// Ties go toward zero.
    HalfDown,
    /// Drop the extra digits.
    Truncate,
}

impl RoundingPolicy {
    pub fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingPolicy::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingPolicy::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingPolicy::HalfDown => RoundingStrategy::MidpointTowardZero,
            RoundingPolicy::Truncate => RoundingStrategy::ToZero,
        }
    }

    /// Quantize a currency amount to cents.
    pub fn money(self, value: Decimal) -> Money {
        self.round(value, CURRENCY_DP)
    }

    pub fn round(self, value: Decimal, dp: u32) -> Decimal {
        let mut rounded = value.round_dp_with_strategy(dp, self.strategy());
        // 100 and 100.00 compare equal, but serialized output should
        // always carry the full number of places.
        rounded.rescale(dp);
        rounded
    }

    pub fn label(self) -> &'static str {
        match self {
            RoundingPolicy::HalfUp => "half-up",
            RoundingPolicy::HalfEven => "half-even",
            RoundingPolicy::HalfDown => "half-down",
            RoundingPolicy::Truncate => "truncate",
        }
    }
}

/// Normalize an annual percentage rate for storage (4 fractional digits).
pub fn normalize_stored_rate(rate: Percent, policy: RoundingPolicy) -> Percent {
    policy.round(rate, STORED_RATE_DP)
}
