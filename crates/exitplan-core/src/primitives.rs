//! # Primitives
//!
//! Fixed constants and the small value types every other module builds on.
//!
//! All amounts are whole won held in `u64`. Rates are integer percentages,
//! so no floating-point value ever touches a quote.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InputError;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Exemption credit for each existing outdoor camera.
pub const OUTDOOR_CAMERA_CREDIT: u64 = 50_000;

/// Exemption credit for each existing indoor camera.
pub const INDOOR_CAMERA_CREDIT: u64 = 30_000;

/// Upper bound of a single camera counter.
pub const MAX_CAMERA_COUNT: u32 = 99;

/// Months in a contract year.
pub const MONTHS_PER_YEAR: u64 = 12;

/// Longest keypad entry accepted, in digits.
pub const MAX_KEYPAD_DIGITS: usize = 9;

/// Largest monthly fee accepted: the largest number the keypad can hold.
pub const MAX_MONTHLY_FEE: u64 = 999_999_999;

/// Longest remaining contract period accepted, in months.
pub const MAX_PERIOD_MONTHS: u64 = 999;

// =============================================================================
// PENALTY RATE
// =============================================================================

/// A penalty rate expressed as a whole percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PenaltyRate(u64);

impl PenaltyRate {
    /// Create a rate from a whole percentage.
    #[must_use]
    pub const fn percent(value: u64) -> Self {
        Self(value)
    }

    /// The rate as a whole percentage.
    #[must_use]
    pub const fn as_percent(self) -> u64 {
        self.0
    }

    /// Apply the rate to a base amount, flooring the result.
    ///
    /// Returns `None` on overflow.
    #[must_use]
    pub fn apply(self, base: u64) -> Option<u64> {
        base.checked_mul(self.0).map(|scaled| scaled / 100)
    }
}

impl fmt::Display for PenaltyRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// PROVIDER
// =============================================================================

/// The security vendor the current contract is with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// 에스원
    S1,
    /// 캡스
    Caps,
}

impl Provider {
    /// Every supported provider, in selection-menu order.
    pub const ALL: [Provider; 2] = [Provider::S1, Provider::Caps];

    /// Share of the remaining payments owed on early termination.
    #[must_use]
    pub const fn penalty_rate(self) -> PenaltyRate {
        match self {
            Provider::S1 => PenaltyRate::percent(80),
            Provider::Caps => PenaltyRate::percent(10),
        }
    }

    /// Display name as shown on the selection menu.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Provider::S1 => "에스원",
            Provider::Caps => "캡스",
        }
    }

    /// Stable machine identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Provider::S1 => "s1",
            Provider::Caps => "caps",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Provider {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s1" | "s-1" | "에스원" => Ok(Provider::S1),
            "caps" | "adt" | "캡스" => Ok(Provider::Caps),
            other => Err(InputError::UnknownProvider(other.to_string())),
        }
    }
}

// =============================================================================
// PERIOD UNIT
// =============================================================================

/// Unit of the remaining contract period as typed by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodUnit {
    Year,
    #[default]
    Month,
}

impl PeriodUnit {
    /// Normalize an amount in this unit to months.
    ///
    /// Returns `None` on overflow.
    #[must_use]
    pub fn to_months(self, amount: u64) -> Option<u64> {
        match self {
            PeriodUnit::Year => amount.checked_mul(MONTHS_PER_YEAR),
            PeriodUnit::Month => Some(amount),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            PeriodUnit::Year => "년",
            PeriodUnit::Month => "개월",
        }
    }
}

impl FromStr for PeriodUnit {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "y" | "year" | "years" | "년" => Ok(PeriodUnit::Year),
            "m" | "month" | "months" | "개월" => Ok(PeriodUnit::Month),
            other => Err(InputError::UnknownPeriodUnit(other.to_string())),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_floors_toward_zero() {
        let rate = PenaltyRate::percent(10);
        assert_eq!(rate.apply(99), Some(9));
        assert_eq!(rate.apply(0), Some(0));
    }

    #[test]
    fn rate_reports_overflow() {
        assert_eq!(PenaltyRate::percent(80).apply(u64::MAX), None);
    }

    #[test]
    fn provider_rates() {
        assert_eq!(Provider::S1.penalty_rate().as_percent(), 80);
        assert_eq!(Provider::Caps.penalty_rate().as_percent(), 10);
    }

    #[test]
    fn provider_parses_ids_and_labels() {
        assert_eq!("S1".parse::<Provider>(), Ok(Provider::S1));
        assert_eq!("에스원".parse::<Provider>(), Ok(Provider::S1));
        assert_eq!(" caps ".parse::<Provider>(), Ok(Provider::Caps));
        assert!(matches!(
            "kt".parse::<Provider>(),
            Err(InputError::UnknownProvider(_))
        ));
    }

    #[test]
    fn period_unit_normalizes_years() {
        assert_eq!(PeriodUnit::Year.to_months(3), Some(36));
        assert_eq!(PeriodUnit::Month.to_months(7), Some(7));
        assert_eq!(PeriodUnit::Year.to_months(u64::MAX), None);
    }

    #[test]
    fn period_unit_parses() {
        assert_eq!("년".parse::<PeriodUnit>(), Ok(PeriodUnit::Year));
        assert_eq!("Months".parse::<PeriodUnit>(), Ok(PeriodUnit::Month));
        assert!("week".parse::<PeriodUnit>().is_err());
    }
}
