//! # Error Types
//!
//! Every error here is a rejection: the operation that produced it left the
//! wizard state exactly as it was.

use crate::wizard::Step;
use thiserror::Error;

/// A submitted value broke the constraint of its step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("monthly fee must be greater than zero")]
    NonPositiveFee,

    #[error("monthly fee is out of range")]
    FeeOutOfRange,

    #[error("contract period must be greater than zero")]
    NonPositivePeriod,

    #[error("contract period is out of range")]
    PeriodOutOfRange,

    #[error("at least one camera is required (outdoor + indoor >= 1)")]
    NoCameras,

    #[error("entry is longer than {max} digits")]
    TooManyDigits { max: usize },

    #[error("invalid keypad key: {0:?}")]
    InvalidDigitKey(String),

    #[error("unknown period unit: {0:?} (expected month or year)")]
    UnknownPeriodUnit(String),

    #[error("unknown provider: {0:?} (expected s1 or caps)")]
    UnknownProvider(String),

    #[error("unknown fee range: {0:?}")]
    UnknownFeeRange(String),

    #[error("unknown flow variant: {0:?} (expected full or penalty-only)")]
    UnknownFlowVariant(String),
}

/// The quote engine was asked for a figure it cannot produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuoteError {
    #[error("no provider selected")]
    ProviderUnset,

    #[error("amount exceeds the supported range")]
    Overflow,
}

/// A wizard intent was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("{intent} is not accepted at step {step}")]
    UnexpectedIntent { intent: &'static str, step: Step },

    #[error("the wizard is complete at step {step}")]
    FlowComplete { step: Step },
}

/// Top-level error for callers that mix wizard and quote operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExitplanError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error(transparent)]
    Wizard(#[from] WizardError),
}

pub type Result<T> = std::result::Result<T, ExitplanError>;
