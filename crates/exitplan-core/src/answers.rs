//! # Answers
//!
//! The accumulator filled in as the user moves through the wizard.

use crate::primitives::Provider;
use serde::{Deserialize, Serialize};

/// Everything the user has told the wizard so far.
///
/// `monthly_fee` and `remaining_months` are zero until their steps complete.
/// Camera counts only matter while `has_existing_cameras` is true.
///
/// Only [`crate::WizardController`] mutates this record; everyone else
/// sees it through a shared borrow or a snapshot copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answers {
    pub provider: Option<Provider>,
    pub monthly_fee: u64,
    pub remaining_months: u64,
    pub has_existing_cameras: bool,
    pub outdoor_camera_count: u32,
    pub indoor_camera_count: u32,
}

impl Answers {
    /// Empty answers, as at session start.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of both camera counters.
    #[must_use]
    pub fn total_cameras(&self) -> u32 {
        self.outdoor_camera_count
            .saturating_add(self.indoor_camera_count)
    }

    /// Total of the remaining monthly payments before any rate is applied.
    ///
    /// Returns `None` on overflow.
    #[must_use]
    pub fn remaining_payments(&self) -> Option<u64> {
        self.monthly_fee.checked_mul(self.remaining_months)
    }
}
