//! # Quote Engine
//!
//! Pure derivation of the two money figures from collected answers.
//!
//! - Penalty: `floor(monthly_fee * remaining_months * rate(provider))`
//! - Exemption: per-camera credit, capped at the penalty
//!
//! Nothing here is cached. Call it again after any answer changes.

use crate::answers::Answers;
use crate::error::QuoteError;
use crate::primitives::{INDOOR_CAMERA_CREDIT, OUTDOOR_CAMERA_CREDIT};
use serde::{Deserialize, Serialize};

/// Penalty and exemption derived from one set of answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub penalty: u64,
    pub exemption: u64,
}

impl QuoteResult {
    /// What is still owed after the exemption is applied.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.penalty.saturating_sub(self.exemption)
    }

    /// True when the exemption wipes out the whole penalty.
    #[must_use]
    pub fn is_fully_exempt(&self) -> bool {
        self.remaining() == 0
    }
}

/// Stateless penalty and exemption calculator.
pub struct QuoteEngine;

impl QuoteEngine {
    /// Early-termination penalty for the answers' provider.
    ///
    /// Fails with [`QuoteError::ProviderUnset`] before step 1 completes.
    pub fn compute_penalty(answers: &Answers) -> Result<u64, QuoteError> {
        let provider = answers.provider.ok_or(QuoteError::ProviderUnset)?;
        let base = answers
            .remaining_payments()
            .ok_or(QuoteError::Overflow)?;
        provider
            .penalty_rate()
            .apply(base)
            .ok_or(QuoteError::Overflow)
    }

    /// Uncapped credit for the camera inventory.
    ///
    /// Zero when the user has no cameras, whatever the counters hold.
    #[must_use]
    pub fn raw_credit(answers: &Answers) -> u64 {
        if !answers.has_existing_cameras {
            return 0;
        }
        let outdoor = u64::from(answers.outdoor_camera_count) * OUTDOOR_CAMERA_CREDIT;
        let indoor = u64::from(answers.indoor_camera_count) * INDOOR_CAMERA_CREDIT;
        outdoor + indoor
    }

    /// Exemption credit, never larger than the penalty it offsets.
    pub fn compute_exemption(answers: &Answers) -> Result<u64, QuoteError> {
        let credit = Self::raw_credit(answers);
        if credit == 0 {
            return Ok(0);
        }
        let penalty = Self::compute_penalty(answers)?;
        Ok(credit.min(penalty))
    }

    /// Both figures at once.
    pub fn quote(answers: &Answers) -> Result<QuoteResult, QuoteError> {
        Ok(QuoteResult {
            penalty: Self::compute_penalty(answers)?,
            exemption: Self::compute_exemption(answers)?,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Provider;
    use proptest::prelude::*;

    fn answers(provider: Provider, fee: u64, months: u64) -> Answers {
        Answers {
            provider: Some(provider),
            monthly_fee: fee,
            remaining_months: months,
            ..Answers::default()
        }
    }

    fn with_cameras(mut base: Answers, outdoor: u32, indoor: u32) -> Answers {
        base.has_existing_cameras = true;
        base.outdoor_camera_count = outdoor;
        base.indoor_camera_count = indoor;
        base
    }

    #[test]
    fn s1_penalty_is_eighty_percent() {
        let a = answers(Provider::S1, 50_000, 12);
        assert_eq!(QuoteEngine::compute_penalty(&a), Ok(480_000));
    }

    #[test]
    fn caps_penalty_with_capped_exemption() {
        let a = with_cameras(answers(Provider::Caps, 30_000, 10), 2, 1);

        assert_eq!(QuoteEngine::compute_penalty(&a), Ok(30_000));
        assert_eq!(QuoteEngine::raw_credit(&a), 130_000);
        assert_eq!(QuoteEngine::compute_exemption(&a), Ok(30_000));
    }

    #[test]
    fn exemption_below_penalty_is_not_capped() {
        let a = with_cameras(answers(Provider::S1, 50_000, 12), 1, 2);
        assert_eq!(QuoteEngine::compute_exemption(&a), Ok(110_000));

        let quote = QuoteEngine::quote(&a);
        assert_eq!(quote.map(|q| q.remaining()), Ok(370_000));
    }

    #[test]
    fn no_cameras_means_no_exemption() {
        let mut a = answers(Provider::S1, 50_000, 12);
        a.outdoor_camera_count = 5;
        a.indoor_camera_count = 5;
        assert_eq!(QuoteEngine::compute_exemption(&a), Ok(0));
    }

    #[test]
    fn penalty_requires_provider() {
        let a = Answers {
            monthly_fee: 10_000,
            remaining_months: 3,
            ..Answers::default()
        };
        assert_eq!(
            QuoteEngine::compute_penalty(&a),
            Err(QuoteError::ProviderUnset)
        );
    }

    #[test]
    fn penalty_overflow_is_reported() {
        let a = answers(Provider::S1, u64::MAX, 2);
        assert_eq!(QuoteEngine::compute_penalty(&a), Err(QuoteError::Overflow));
    }

    #[test]
    fn fully_exempt_when_credit_covers_penalty() {
        let a = with_cameras(answers(Provider::Caps, 30_000, 10), 1, 0);
        let quote = QuoteEngine::quote(&a);
        assert_eq!(quote.map(|q| q.is_fully_exempt()), Ok(true));
    }

    fn provider_strategy() -> impl Strategy<Value = Provider> {
        prop_oneof![Just(Provider::S1), Just(Provider::Caps)]
    }

    proptest! {
        #[test]
        fn penalty_matches_formula(
            provider in provider_strategy(),
            fee in 0u64..10_000_000,
            months in 0u64..1_000,
        ) {
            let expected = u128::from(fee) * u128::from(months)
                * u128::from(provider.penalty_rate().as_percent()) / 100;
            let penalty = QuoteEngine::compute_penalty(&answers(provider, fee, months));
            prop_assert_eq!(penalty.map(u128::from), Ok(expected));
        }

        #[test]
        fn exemption_never_exceeds_penalty(
            provider in provider_strategy(),
            fee in 0u64..10_000_000,
            months in 0u64..1_000,
            outdoor in 0u32..=99,
            indoor in 0u32..=99,
        ) {
            let a = with_cameras(answers(provider, fee, months), outdoor, indoor);
            let quote = QuoteEngine::quote(&a);
            prop_assert!(quote.is_ok());
            if let Ok(q) = quote {
                prop_assert!(q.exemption <= q.penalty);
                prop_assert_eq!(q.exemption, QuoteEngine::raw_credit(&a).min(q.penalty));
            }
        }

        #[test]
        fn exemption_is_zero_without_cameras(
            provider in provider_strategy(),
            fee in 0u64..10_000_000,
            months in 0u64..1_000,
            outdoor in 0u32..=99,
            indoor in 0u32..=99,
        ) {
            let mut a = answers(provider, fee, months);
            a.outdoor_camera_count = outdoor;
            a.indoor_camera_count = indoor;
            prop_assert_eq!(QuoteEngine::compute_exemption(&a), Ok(0));
        }
    }
}
