//! # Wizard Controller
//!
//! The step-flow state machine.
//!
//! ```text
//! 1 ProviderSelect ─► 2 MonthlyFeeEntry ─► 3 PeriodEntry ─► 4 PenaltyReveal
//!                                                                  │
//!                               ┌──────────────────────────────────┘
//!                               ▼
//!                     5 HasCamerasQuery ──(no)──────────────┐
//!                               │                           ▼
//!                             (yes)                  7 ExemptionReveal
//!                               ▼                           ▲
//!                     6 CameraCountEntry ───────────────────┘
//! ```
//!
//! Every intent either applies completely or is rejected with the state
//! untouched. Back navigation is a function of the current step and the
//! stored answers only; there is no history stack.

use crate::answers::Answers;
use crate::error::{InputError, QuoteError, WizardError};
use crate::input::{self, CameraCounter, FeeRange};
use crate::primitives::{PeriodUnit, Provider};
use crate::quote::{QuoteEngine, QuoteResult};
use crate::report::QuoteReport;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// STEP
// =============================================================================

/// One screen of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    ProviderSelect,
    MonthlyFeeEntry,
    PeriodEntry,
    PenaltyReveal,
    HasCamerasQuery,
    CameraCountEntry,
    ExemptionReveal,
}

impl Step {
    /// Position in the flow, 1 through 7.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Step::ProviderSelect => 1,
            Step::MonthlyFeeEntry => 2,
            Step::PeriodEntry => 3,
            Step::PenaltyReveal => 4,
            Step::HasCamerasQuery => 5,
            Step::CameraCountEntry => 6,
            Step::ExemptionReveal => 7,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Step::ProviderSelect => "provider_select",
            Step::MonthlyFeeEntry => "monthly_fee_entry",
            Step::PeriodEntry => "period_entry",
            Step::PenaltyReveal => "penalty_reveal",
            Step::HasCamerasQuery => "has_cameras_query",
            Step::CameraCountEntry => "camera_count_entry",
            Step::ExemptionReveal => "exemption_reveal",
        }
    }

    /// Question shown at the top of the screen.
    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            Step::ProviderSelect => "어떤 CCTV 쓰시나요?",
            Step::MonthlyFeeEntry => "한달에 얼마씩 내고 있나요?",
            Step::PeriodEntry => "남은 약정 기간",
            Step::PenaltyReveal => "고객님의 남은 위약금은",
            Step::HasCamerasQuery => "설치 되어있는 CCTV가 있나요?",
            Step::CameraCountEntry => "어디에 몇 대 있나요?",
            Step::ExemptionReveal => "고객님은 면제 대상이에요",
        }
    }

    /// Whether the flow ends here under the given variant.
    #[must_use]
    pub const fn is_terminal(self, variant: FlowVariant) -> bool {
        match variant {
            FlowVariant::Full => matches!(self, Step::ExemptionReveal),
            FlowVariant::PenaltyOnly => matches!(self, Step::PenaltyReveal),
        }
    }

    /// Whether a back action leads anywhere.
    #[must_use]
    pub const fn can_go_back(self) -> bool {
        !matches!(self, Step::ProviderSelect)
    }

    /// Whether this step displays computed figures.
    #[must_use]
    pub const fn is_reveal(self) -> bool {
        matches!(self, Step::PenaltyReveal | Step::ExemptionReveal)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number(), self.as_str())
    }
}

// =============================================================================
// FLOW VARIANT
// =============================================================================

/// Which configuration of the state machine a session runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowVariant {
    /// All seven steps, ending at the exemption reveal.
    #[default]
    Full,
    /// Ends at the penalty reveal; the exemption steps are unreachable.
    PenaltyOnly,
}

impl FlowVariant {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FlowVariant::Full => "full",
            FlowVariant::PenaltyOnly => "penalty-only",
        }
    }
}

impl fmt::Display for FlowVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlowVariant {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(FlowVariant::Full),
            "penalty-only" | "penalty_only" => Ok(FlowVariant::PenaltyOnly),
            other => Err(InputError::UnknownFlowVariant(other.to_string())),
        }
    }
}

// =============================================================================
// INTENT
// =============================================================================

/// A user request sent by the View.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    SelectProvider {
        provider: Provider,
    },
    SubmitMonthlyFee {
        amount: u64,
    },
    SubmitFeeRange {
        range: FeeRange,
    },
    SubmitPeriod {
        amount: u64,
        #[serde(default)]
        unit: PeriodUnit,
    },
    ProceedToExemptionCheck,
    SelectHasCameras {
        has: bool,
    },
    SubmitCameraCounts {
        outdoor: u32,
        indoor: u32,
    },
    GoBack,
}

impl Intent {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Intent::SelectProvider { .. } => "select_provider",
            Intent::SubmitMonthlyFee { .. } => "submit_monthly_fee",
            Intent::SubmitFeeRange { .. } => "submit_fee_range",
            Intent::SubmitPeriod { .. } => "submit_period",
            Intent::ProceedToExemptionCheck => "proceed_to_exemption_check",
            Intent::SelectHasCameras { .. } => "select_has_cameras",
            Intent::SubmitCameraCounts { .. } => "submit_camera_counts",
            Intent::GoBack => "go_back",
        }
    }
}

// =============================================================================
// STATE AND SNAPSHOT
// =============================================================================

/// Current step plus collected answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub step: Step,
    pub answers: Answers,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    /// Session start: step 1, nothing answered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: Step::ProviderSelect,
            answers: Answers::default(),
        }
    }
}

/// Read-only copy of the wizard handed to the View.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardSnapshot {
    pub step: Step,
    pub step_number: u8,
    pub variant: FlowVariant,
    pub answers: Answers,
    pub can_go_back: bool,
    pub is_complete: bool,
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Where `go_back` leads from `step`, given the stored answers.
///
/// Step 7 returns to the camera count only when the user said they have
/// cameras. Step 1 has no predecessor and maps to itself.
#[must_use]
pub fn previous_step(step: Step, answers: &Answers) -> Step {
    match step {
        Step::ProviderSelect | Step::MonthlyFeeEntry => Step::ProviderSelect,
        Step::PeriodEntry => Step::MonthlyFeeEntry,
        Step::PenaltyReveal => Step::PeriodEntry,
        Step::HasCamerasQuery => Step::PenaltyReveal,
        Step::CameraCountEntry => Step::HasCamerasQuery,
        Step::ExemptionReveal => {
            if answers.has_existing_cameras {
                Step::CameraCountEntry
            } else {
                Step::HasCamerasQuery
            }
        }
    }
}

/// Owns one session's wizard state. Create one per session.
#[derive(Debug, Clone, Default)]
pub struct WizardController {
    state: WizardState,
    variant: FlowVariant,
}

impl WizardController {
    /// A fresh full-flow session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh session running the given variant.
    #[must_use]
    pub fn with_variant(variant: FlowVariant) -> Self {
        Self {
            state: WizardState::new(),
            variant,
        }
    }

    #[must_use]
    pub fn variant(&self) -> FlowVariant {
        self.variant
    }

    #[must_use]
    pub fn step(&self) -> Step {
        self.state.step
    }

    #[must_use]
    pub fn answers(&self) -> &Answers {
        &self.state.answers
    }

    #[must_use]
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state.step.is_terminal(self.variant)
    }

    #[must_use]
    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            step: self.state.step,
            step_number: self.state.step.number(),
            variant: self.variant,
            answers: self.state.answers.clone(),
            can_go_back: self.state.step.can_go_back(),
            is_complete: self.is_complete(),
        }
    }

    /// Counter to open the camera screen with: the last submitted counts,
    /// or the default of one outdoor camera.
    #[must_use]
    pub fn camera_counter(&self) -> CameraCounter {
        let answers = &self.state.answers;
        if answers.has_existing_cameras && answers.total_cameras() > 0 {
            CameraCounter::from_counts(answers.outdoor_camera_count, answers.indoor_camera_count)
        } else {
            CameraCounter::new()
        }
    }

    // -------------------------------------------------------------------------
    // Intents
    // -------------------------------------------------------------------------

    /// Apply any intent. Returns the step the wizard is on afterwards.
    pub fn apply(&mut self, intent: Intent) -> Result<Step, WizardError> {
        match intent {
            Intent::SelectProvider { provider } => self.select_provider(provider),
            Intent::SubmitMonthlyFee { amount } => self.submit_monthly_fee(amount),
            Intent::SubmitFeeRange { range } => self.submit_fee_range(range),
            Intent::SubmitPeriod { amount, unit } => self.submit_period(amount, unit),
            Intent::ProceedToExemptionCheck => self.proceed_to_exemption_check(),
            Intent::SelectHasCameras { has } => self.select_has_cameras(has),
            Intent::SubmitCameraCounts { outdoor, indoor } => {
                self.submit_camera_counts(outdoor, indoor)
            }
            Intent::GoBack => Ok(self.go_back()),
        }
    }

    pub fn select_provider(&mut self, provider: Provider) -> Result<Step, WizardError> {
        self.expect_step(Step::ProviderSelect, "select_provider")?;
        self.state.answers.provider = Some(provider);
        Ok(self.advance(Step::MonthlyFeeEntry))
    }

    pub fn submit_monthly_fee(&mut self, amount: u64) -> Result<Step, WizardError> {
        self.expect_step(Step::MonthlyFeeEntry, "submit_monthly_fee")?;
        let fee = input::validate_fee(amount)?;
        self.state.answers.monthly_fee = fee;
        Ok(self.advance(Step::PeriodEntry))
    }

    /// Fee shortcut: same transition as an exact fee, using the bucket's
    /// representative amount.
    pub fn submit_fee_range(&mut self, range: FeeRange) -> Result<Step, WizardError> {
        self.expect_step(Step::MonthlyFeeEntry, "submit_fee_range")?;
        self.submit_monthly_fee(range.representative_fee())
    }

    pub fn submit_period(&mut self, amount: u64, unit: PeriodUnit) -> Result<Step, WizardError> {
        self.expect_step(Step::PeriodEntry, "submit_period")?;
        let months = input::validate_period(amount, unit)?;
        self.state.answers.remaining_months = months;
        Ok(self.advance(Step::PenaltyReveal))
    }

    pub fn proceed_to_exemption_check(&mut self) -> Result<Step, WizardError> {
        self.expect_step(Step::PenaltyReveal, "proceed_to_exemption_check")?;
        Ok(self.advance(Step::HasCamerasQuery))
    }

    pub fn select_has_cameras(&mut self, has: bool) -> Result<Step, WizardError> {
        self.expect_step(Step::HasCamerasQuery, "select_has_cameras")?;
        let answers = &mut self.state.answers;
        answers.has_existing_cameras = has;
        if has {
            Ok(self.advance(Step::CameraCountEntry))
        } else {
            answers.outdoor_camera_count = 0;
            answers.indoor_camera_count = 0;
            Ok(self.advance(Step::ExemptionReveal))
        }
    }

    pub fn submit_camera_counts(&mut self, outdoor: u32, indoor: u32) -> Result<Step, WizardError> {
        self.expect_step(Step::CameraCountEntry, "submit_camera_counts")?;
        let (outdoor, indoor) = input::validate_camera_counts(outdoor, indoor)?;
        self.state.answers.outdoor_camera_count = outdoor;
        self.state.answers.indoor_camera_count = indoor;
        Ok(self.advance(Step::ExemptionReveal))
    }

    /// Step back. A no-op at step 1. Answers are never discarded.
    pub fn go_back(&mut self) -> Step {
        self.state.step = previous_step(self.state.step, &self.state.answers);
        self.state.step
    }

    // -------------------------------------------------------------------------
    // Derived values
    // -------------------------------------------------------------------------

    pub fn compute_penalty(&self) -> Result<u64, QuoteError> {
        QuoteEngine::compute_penalty(&self.state.answers)
    }

    pub fn compute_exemption(&self) -> Result<u64, QuoteError> {
        QuoteEngine::compute_exemption(&self.state.answers)
    }

    pub fn quote(&self) -> Result<QuoteResult, QuoteError> {
        QuoteEngine::quote(&self.state.answers)
    }

    /// Report for the current reveal step, `None` on input steps.
    pub fn report(&self) -> Result<Option<QuoteReport>, QuoteError> {
        match self.state.step {
            Step::PenaltyReveal => QuoteReport::penalty(&self.state.answers).map(Some),
            Step::ExemptionReveal => QuoteReport::exemption(&self.state.answers).map(Some),
            _ => Ok(None),
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn expect_step(&self, expected: Step, intent: &'static str) -> Result<(), WizardError> {
        let step = self.state.step;
        if step == expected {
            Ok(())
        } else if self.is_complete() {
            Err(WizardError::FlowComplete { step })
        } else {
            Err(WizardError::UnexpectedIntent { intent, step })
        }
    }

    fn advance(&mut self, next: Step) -> Step {
        self.state.step = next;
        next
    }
}

// =============================================================================
// TESTS
// =============================================================================
