//! # Exitplan Core
//!
//! The deterministic quote wizard behind Exitplan.
//!
//! Two parts live here:
//! - [`WizardController`]: owns the current step and the collected
//!   [`Answers`], and applies user intents one at a time.
//! - [`QuoteEngine`]: stateless functions turning answers into the
//!   early-termination penalty and the camera exemption credit.
//!
//! The View (terminal, web, anything) sends intents and renders
//! [`WizardSnapshot`]s. It never mutates answers and never computes money.
//!
//! ```
//! use exitplan_core::{PeriodUnit, Provider, Step, WizardController};
//!
//! let mut wizard = WizardController::new();
//! wizard.select_provider(Provider::S1)?;
//! wizard.submit_monthly_fee(50_000)?;
//! wizard.submit_period(1, PeriodUnit::Year)?;
//!
//! assert_eq!(wizard.step(), Step::PenaltyReveal);
//! assert_eq!(wizard.compute_penalty()?, 480_000);
//! # Ok::<(), exitplan_core::ExitplanError>(())
//! ```

pub mod answers;
pub mod error;
pub mod input;
pub mod primitives;
pub mod quote;
pub mod report;
pub mod wizard;

pub use answers::Answers;
pub use error::{ExitplanError, InputError, QuoteError, Result, WizardError};
pub use input::{CameraCounter, DigitBuffer, FeeRange};
pub use primitives::{PenaltyRate, PeriodUnit, Provider};
pub use quote::{QuoteEngine, QuoteResult};
pub use report::QuoteReport;
pub use wizard::{FlowVariant, Intent, Step, WizardController, WizardSnapshot, WizardState};
