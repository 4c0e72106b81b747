//! # CLI Module
//!
//! Command definitions and the `cmd_*` handlers behind them.
//!
//! Handlers write to a caller-supplied writer so tests can capture output.

use crate::config::AppConfig;
use crate::session;
use clap::{Args, Parser, Subcommand};
use exitplan_core::{
    FeeRange, FlowVariant, Intent, PeriodUnit, Provider, QuoteError, QuoteReport, Step,
    WizardController, WizardError, WizardSnapshot,
};
use exitplan_core::report::format_won;
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("intent #{index} ({intent}) rejected: {source}")]
    Rejected {
        index: usize,
        intent: &'static str,
        #[source]
        source: WizardError,
    },

    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error("{0}")]
    Usage(String),
}

pub type CliResult<T> = Result<T, CliError>;

// =============================================================================
// ARGUMENTS
// =============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "exitplan",
    version,
    about = "Estimate a security contract's early-termination penalty and camera exemption"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,

    /// Wizard configuration: full, or penalty-only.
    #[arg(
        long,
        global = true,
        env = "EXITPLAN_FLOW",
        default_value = "full",
        value_parser = parse_flow
    )]
    pub flow: FlowVariant,

    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, global = true, env = "EXITPLAN_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk through the wizard interactively (default).
    Run,
    /// Compute a quote in one shot.
    Quote(QuoteArgs),
    /// Apply a JSON array of intents and print the final state.
    Replay {
        /// Path to the intent script.
        file: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct QuoteArgs {
    /// Security vendor: s1 or caps.
    #[arg(long, value_parser = parse_provider)]
    pub provider: Provider,

    /// Exact monthly fee in won.
    #[arg(long, conflicts_with = "fee_range")]
    pub fee: Option<u64>,

    /// Fee bucket when the exact fee is unknown (under-30k, 30k-50k, 50k-100k, over-100k).
    #[arg(long, value_parser = parse_fee_range)]
    pub fee_range: Option<FeeRange>,

    /// Remaining contract period.
    #[arg(long)]
    pub period: u64,

    /// Unit of --period: month or year.
    #[arg(long, default_value = "month", value_parser = parse_period_unit)]
    pub unit: PeriodUnit,

    /// Existing outdoor cameras.
    #[arg(long)]
    pub outdoor: Option<u32>,

    /// Existing indoor cameras.
    #[arg(long)]
    pub indoor: Option<u32>,
}

fn parse_flow(s: &str) -> Result<FlowVariant, exitplan_core::InputError> {
    s.parse()
}

fn parse_provider(s: &str) -> Result<Provider, exitplan_core::InputError> {
    s.parse()
}

fn parse_fee_range(s: &str) -> Result<FeeRange, exitplan_core::InputError> {
    s.parse()
}

fn parse_period_unit(s: &str) -> Result<PeriodUnit, exitplan_core::InputError> {
    s.parse()
}

impl Cli {
    /// Settings shared by every command.
    #[must_use]
    pub fn config(&self) -> AppConfig {
        AppConfig {
            flow: self.flow,
            json: self.json,
            log_level: self.log_level.clone(),
            json_logs: self.json_logs,
        }
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Run the selected command against stdin/stdout.
pub fn execute(cli: &Cli, config: &AppConfig) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        None | Some(Commands::Run) => cmd_run(config, &mut out),
        Some(Commands::Quote(args)) => cmd_quote(config, args, &mut out),
        Some(Commands::Replay { file }) => cmd_replay(config, file, &mut out),
    }
}

/// Interactive wizard on the terminal.
pub fn cmd_run(config: &AppConfig, out: &mut impl Write) -> CliResult<()> {
    let stdin = io::stdin();
    let snapshot = session::run_session(config, stdin.lock(), out)?;
    info!(step = %snapshot.step, complete = snapshot.is_complete, "session ended");
    Ok(())
}

// =============================================================================
// QUOTE
// =============================================================================

/// Drive a fresh wizard through the intents implied by `args` and print the
/// resulting report.
pub fn cmd_quote(config: &AppConfig, args: &QuoteArgs, out: &mut impl Write) -> CliResult<()> {
    let intents = quote_intents(config.flow, args)?;
    let mut wizard = WizardController::with_variant(config.flow);

    for (index, intent) in intents.into_iter().enumerate() {
        apply_logged(&mut wizard, index, intent)?;
    }

    let report = wizard
        .report()?
        .ok_or_else(|| CliError::Usage(format!("no result at step {}", wizard.step())))?;

    if config.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(out, "{}", report.to_text())?;
    }
    Ok(())
}

fn quote_intents(flow: FlowVariant, args: &QuoteArgs) -> CliResult<Vec<Intent>> {
    let fee = match (args.fee, args.fee_range) {
        (_, Some(range)) => Intent::SubmitFeeRange { range },
        (Some(amount), None) => Intent::SubmitMonthlyFee { amount },
        (None, None) => {
            return Err(CliError::Usage(
                "either --fee or --fee-range is required".to_string(),
            ));
        }
    };

    let mut intents = vec![
        Intent::SelectProvider {
            provider: args.provider,
        },
        fee,
        Intent::SubmitPeriod {
            amount: args.period,
            unit: args.unit,
        },
    ];

    let has_cameras = args.outdoor.is_some() || args.indoor.is_some();
    match flow {
        FlowVariant::PenaltyOnly => {
            if has_cameras {
                warn!("camera counts are ignored in the penalty-only flow");
            }
        }
        FlowVariant::Full => {
            intents.push(Intent::ProceedToExemptionCheck);
            intents.push(Intent::SelectHasCameras { has: has_cameras });
            if has_cameras {
                intents.push(Intent::SubmitCameraCounts {
                    outdoor: args.outdoor.unwrap_or(0),
                    indoor: args.indoor.unwrap_or(0),
                });
            }
        }
    }

    Ok(intents)
}

// =============================================================================
// REPLAY
// =============================================================================

#[derive(Debug, Serialize)]
struct ReplayOutput {
    snapshot: WizardSnapshot,
    report: Option<QuoteReport>,
}

/// Apply a JSON intent script to a fresh wizard.
///
/// Stops at the first rejected intent.
pub fn cmd_replay(config: &AppConfig, path: &Path, out: &mut impl Write) -> CliResult<()> {
    let content = std::fs::read_to_string(path)?;
    let intents: Vec<Intent> = serde_json::from_str(&content)?;
    info!(path = %path.display(), count = intents.len(), "replaying intents");

    let mut wizard = WizardController::with_variant(config.flow);
    for (index, intent) in intents.into_iter().enumerate() {
        apply_logged(&mut wizard, index, intent)?;
    }

    let output = ReplayOutput {
        snapshot: wizard.snapshot(),
        report: wizard.report()?,
    };

    if config.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        write!(out, "{}", render_snapshot(&output.snapshot))?;
        if let Some(report) = &output.report {
            write!(out, "{}", report.to_text())?;
        }
    }
    Ok(())
}

fn apply_logged(wizard: &mut WizardController, index: usize, intent: Intent) -> CliResult<Step> {
    let from = wizard.step();
    match wizard.apply(intent) {
        Ok(to) => {
            debug!(index, intent = intent.name(), %from, %to, "intent applied");
            Ok(to)
        }
        Err(source) => {
            warn!(index, intent = intent.name(), step = %from, error = %source, "intent rejected");
            Err(CliError::Rejected {
                index,
                intent: intent.name(),
                source,
            })
        }
    }
}

/// Plain-text summary of a snapshot.
#[must_use]
pub fn render_snapshot(snapshot: &WizardSnapshot) -> String {
    let answers = &snapshot.answers;
    let mut output = String::new();
    output.push_str(&format!("step: {} [{}]\n", snapshot.step, snapshot.variant));
    output.push_str(&format!(
        "provider: {}\n",
        answers
            .provider
            .map(|p| p.label())
            .unwrap_or("(not selected)")
    ));
    output.push_str(&format!("monthly fee: {}\n", format_won(answers.monthly_fee)));
    output.push_str(&format!("remaining months: {}\n", answers.remaining_months));
    if answers.has_existing_cameras {
        output.push_str(&format!(
            "cameras: {} outdoor, {} indoor\n",
            answers.outdoor_camera_count, answers.indoor_camera_count
        ));
    }
    output
}
