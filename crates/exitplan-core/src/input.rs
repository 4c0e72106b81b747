//! # Input Helpers
//!
//! Validation shared by the controller and any View, plus the small entry
//! models a View needs to collect numbers:
//! - [`DigitBuffer`]: keypad entry for fees and periods
//! - [`CameraCounter`]: the outdoor/indoor steppers
//! - [`FeeRange`]: the "don't know my fee" shortcut
//!
//! Views may use these to disable a confirm button early. The controller
//! runs the same checks again, so a View that skips them is still safe.

use crate::error::InputError;
use crate::primitives::{
    MAX_CAMERA_COUNT, MAX_KEYPAD_DIGITS, MAX_MONTHLY_FEE, MAX_PERIOD_MONTHS, PeriodUnit,
};
use crate::report::group_thousands;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// VALIDATION
// =============================================================================

/// A monthly fee must be positive and at most [`MAX_MONTHLY_FEE`].
pub fn validate_fee(amount: u64) -> Result<u64, InputError> {
    if amount == 0 {
        return Err(InputError::NonPositiveFee);
    }
    if amount > MAX_MONTHLY_FEE {
        return Err(InputError::FeeOutOfRange);
    }
    Ok(amount)
}

/// A period must be positive; returns it normalized to months.
///
/// Periods longer than [`MAX_PERIOD_MONTHS`] are out of range, which keeps
/// every accepted fee and period inside the quote arithmetic.
pub fn validate_period(amount: u64, unit: PeriodUnit) -> Result<u64, InputError> {
    if amount == 0 {
        return Err(InputError::NonPositivePeriod);
    }
    unit.to_months(amount)
        .filter(|&months| months <= MAX_PERIOD_MONTHS)
        .ok_or(InputError::PeriodOutOfRange)
}

/// Counts are accepted when at least one camera exists.
pub fn validate_camera_counts(outdoor: u32, indoor: u32) -> Result<(u32, u32), InputError> {
    if outdoor == 0 && indoor == 0 {
        return Err(InputError::NoCameras);
    }
    Ok((outdoor, indoor))
}

// =============================================================================
// DIGIT BUFFER
// =============================================================================

/// Number being typed on a numeric keypad.
///
/// Keys are `0`-`9` and `00`. Zeros typed into an empty buffer are dropped,
/// so a non-empty buffer always holds a positive number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigitBuffer {
    digits: String,
}

impl DigitBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one keypad key.
    ///
    /// Keys that would push the entry past the digit limit are ignored.
    pub fn push_key(&mut self, key: &str) -> Result<(), InputError> {
        let valid = !key.is_empty()
            && key.len() <= 2
            && key.bytes().all(|b| b.is_ascii_digit())
            && (key.len() == 1 || key == "00");
        if !valid {
            return Err(InputError::InvalidDigitKey(key.to_string()));
        }

        let key = if self.digits.is_empty() {
            key.trim_start_matches('0')
        } else {
            key
        };
        if self.digits.len() + key.len() <= MAX_KEYPAD_DIGITS {
            self.digits.push_str(key);
        }
        Ok(())
    }

    /// Build a buffer from a whole typed line. Commas are ignored.
    ///
    /// Unlike [`push_key`](Self::push_key), a line that does not fit in
    /// [`MAX_KEYPAD_DIGITS`] is rejected instead of truncated.
    pub fn from_typed(text: &str) -> Result<Self, InputError> {
        let mut buffer = Self::new();
        for ch in text.chars().filter(|c| *c != ',') {
            let full = buffer.digits.len() == MAX_KEYPAD_DIGITS;
            buffer.push_key(ch.encode_utf8(&mut [0; 4]))?;
            if full {
                return Err(InputError::TooManyDigits {
                    max: MAX_KEYPAD_DIGITS,
                });
            }
        }
        Ok(buffer)
    }

    /// Remove the last digit.
    pub fn delete(&mut self) {
        self.digits.pop();
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// The typed number, or `None` when nothing has been entered.
    #[must_use]
    pub fn value(&self) -> Option<u64> {
        self.digits.parse().ok()
    }

    /// Whether a confirm action should be offered.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        self.value().is_some_and(|v| v > 0)
    }
}

impl fmt::Display for DigitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(v) => f.write_str(&group_thousands(v)),
            None => Ok(()),
        }
    }
}

// =============================================================================
// CAMERA COUNTER
// =============================================================================

/// Where a camera is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraLocation {
    Outdoor,
    Indoor,
}

/// Stepper pair for the camera-count screen, each clamped to `0..=99`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraCounter {
    outdoor: u32,
    indoor: u32,
}

impl Default for CameraCounter {
    /// The screen opens with one outdoor camera already counted.
    fn default() -> Self {
        Self {
            outdoor: 1,
            indoor: 0,
        }
    }
}

impl CameraCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from previously submitted counts, clamped into range.
    #[must_use]
    pub fn from_counts(outdoor: u32, indoor: u32) -> Self {
        Self {
            outdoor: outdoor.min(MAX_CAMERA_COUNT),
            indoor: indoor.min(MAX_CAMERA_COUNT),
        }
    }

    pub fn increment(&mut self, location: CameraLocation) {
        let slot = self.slot_mut(location);
        *slot = slot.saturating_add(1).min(MAX_CAMERA_COUNT);
    }

    pub fn decrement(&mut self, location: CameraLocation) {
        let slot = self.slot_mut(location);
        *slot = slot.saturating_sub(1);
    }

    #[must_use]
    pub fn get(&self, location: CameraLocation) -> u32 {
        match location {
            CameraLocation::Outdoor => self.outdoor,
            CameraLocation::Indoor => self.indoor,
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.outdoor + self.indoor
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.total() >= 1
    }

    /// `(outdoor, indoor)`, ready for `submit_camera_counts`.
    #[must_use]
    pub fn counts(&self) -> (u32, u32) {
        (self.outdoor, self.indoor)
    }

    fn slot_mut(&mut self, location: CameraLocation) -> &mut u32 {
        match location {
            CameraLocation::Outdoor => &mut self.outdoor,
            CameraLocation::Indoor => &mut self.indoor,
        }
    }
}

// =============================================================================
// FEE RANGE
// =============================================================================

/// Fee buckets offered when the user does not know their exact fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeRange {
    #[serde(rename = "under-30k")]
    Under30k,
    #[serde(rename = "30k-50k")]
    From30kTo50k,
    #[serde(rename = "50k-100k")]
    From50kTo100k,
    #[serde(rename = "over-100k")]
    Over100k,
}

impl FeeRange {
    pub const ALL: [FeeRange; 4] = [
        FeeRange::Under30k,
        FeeRange::From30kTo50k,
        FeeRange::From50kTo100k,
        FeeRange::Over100k,
    ];

    /// Fee used in place of an exact amount.
    #[must_use]
    pub const fn representative_fee(self) -> u64 {
        match self {
            FeeRange::Under30k => 25_000,
            FeeRange::From30kTo50k => 40_000,
            FeeRange::From50kTo100k => 75_000,
            FeeRange::Over100k => 120_000,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FeeRange::Under30k => "under-30k",
            FeeRange::From30kTo50k => "30k-50k",
            FeeRange::From50kTo100k => "50k-100k",
            FeeRange::Over100k => "over-100k",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            FeeRange::Under30k => "3만원 미만",
            FeeRange::From30kTo50k => "3만원 ~ 5만원",
            FeeRange::From50kTo100k => "5만원 ~ 10만원",
            FeeRange::Over100k => "10만원 이상",
        }
    }
}

impl FromStr for FeeRange {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        FeeRange::ALL
            .into_iter()
            .find(|range| range.as_str() == wanted)
            .ok_or(InputError::UnknownFeeRange(wanted))
    }
}

// =============================================================================
// TESTS
// =============================================================================
