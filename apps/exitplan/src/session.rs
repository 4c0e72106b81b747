//! Terminal View for the wizard.
//!
//! Reads one line per prompt, turns it into an [`Intent`], and renders the
//! controller's snapshot. All money comes from the core's reports.

use crate::cli::{CliError, CliResult};
use crate::config::AppConfig;
use exitplan_core::input::CameraLocation;
use exitplan_core::report::format_won;
use exitplan_core::{
    CameraCounter, DigitBuffer, FeeRange, FlowVariant, InputError, Intent, PeriodUnit, Provider,
    Step, WizardController, WizardSnapshot,
};
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

/// What one line of user input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Intent(Intent),
    Counter(CameraLocation, bool),
    Quit,
    /// Input the View handles itself; the message is shown and the prompt repeats.
    Hint(String),
}

/// Run the wizard until it completes, the user quits, or input ends.
pub fn run_session<R: BufRead, W: Write>(
    config: &AppConfig,
    mut input: R,
    out: &mut W,
) -> CliResult<WizardSnapshot> {
    let mut wizard = WizardController::with_variant(config.flow);
    let mut counter = wizard.camera_counter();
    let mut rendered: Option<Step> = None;
    info!(flow = %config.flow, "session started");

    loop {
        let step = wizard.step();
        if rendered != Some(step) {
            if step == Step::CameraCountEntry {
                counter = wizard.camera_counter();
            }
            render_step(&wizard, &counter, out)?;
            rendered = Some(step);
        }

        if wizard.is_complete() {
            writeln!(out, "(back: 이전 단계, quit: 종료)")?;
        }
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            debug!("input closed");
            break;
        }

        match parse_command(&wizard, &counter, line.trim()) {
            Command::Quit => break,
            Command::Hint(message) => writeln!(out, "{message}")?,
            Command::Counter(location, up) => {
                if up {
                    counter.increment(location);
                } else {
                    counter.decrement(location);
                }
                render_counter(&counter, out)?;
            }
            Command::Intent(intent) => match wizard.apply(intent) {
                Ok(to) => debug!(intent = intent.name(), from = %step, %to, "intent applied"),
                Err(err) => {
                    warn!(intent = intent.name(), %step, error = %err, "intent rejected");
                    writeln!(out, "! {err}")?;
                }
            },
        }
    }

    let snapshot = wizard.snapshot();
    if config.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&snapshot)?)?;
    }
    Ok(snapshot)
}

fn parse_command(wizard: &WizardController, counter: &CameraCounter, line: &str) -> Command {
    match line.to_ascii_lowercase().as_str() {
        "quit" | "q" | "exit" => return Command::Quit,
        "back" | "b" | "<" => return Command::Intent(Intent::GoBack),
        _ => {}
    }

    if wizard.is_complete() {
        return Command::Hint("완료된 결과입니다.".to_string());
    }

    match wizard.step() {
        Step::ProviderSelect => parse_provider(line),
        Step::MonthlyFeeEntry => parse_fee(line),
        Step::PeriodEntry => parse_period(line),
        Step::PenaltyReveal => Command::Intent(Intent::ProceedToExemptionCheck),
        Step::HasCamerasQuery => parse_yes_no(line),
        Step::CameraCountEntry => parse_cameras(counter, line),
        Step::ExemptionReveal => Command::Hint("완료된 결과입니다.".to_string()),
    }
}

fn parse_provider(line: &str) -> Command {
    let choice = match line {
        "1" => Ok(Provider::S1),
        "2" => Ok(Provider::Caps),
        other => other.parse::<Provider>(),
    };
    match choice {
        Ok(provider) => Command::Intent(Intent::SelectProvider { provider }),
        Err(err) => Command::Hint(format!("! {err}")),
    }
}

fn parse_fee(line: &str) -> Command {
    if let Ok(range) = line.parse::<FeeRange>() {
        return Command::Intent(Intent::SubmitFeeRange { range });
    }
    match read_amount(line) {
        Ok(Some(amount)) => Command::Intent(Intent::SubmitMonthlyFee { amount }),
        Ok(None) => Command::Hint("금액을 입력해주세요".to_string()),
        Err(err) => Command::Hint(format!("! {err}")),
    }
}

fn parse_period(line: &str) -> Command {
    let mut parts = line.split_whitespace();
    let amount = parts.next().unwrap_or("");
    let unit = match parts.next().map(str::parse::<PeriodUnit>) {
        None => PeriodUnit::Month,
        Some(Ok(unit)) => unit,
        Some(Err(err)) => return Command::Hint(format!("! {err}")),
    };
    match read_amount(amount) {
        Ok(Some(amount)) => Command::Intent(Intent::SubmitPeriod { amount, unit }),
        Ok(None) => Command::Hint("개월수를 입력해주세요".to_string()),
        Err(err) => Command::Hint(format!("! {err}")),
    }
}

fn parse_yes_no(line: &str) -> Command {
    match line.to_ascii_lowercase().as_str() {
        "y" | "yes" | "네" | "1" => Command::Intent(Intent::SelectHasCameras { has: true }),
        "n" | "no" | "아니요" | "2" => Command::Intent(Intent::SelectHasCameras { has: false }),
        _ => Command::Hint("y 또는 n 으로 답해주세요".to_string()),
    }
}

fn parse_cameras(counter: &CameraCounter, line: &str) -> Command {
    match line {
        "" | "ok" | "다음" => {
            let (outdoor, indoor) = counter.counts();
            return Command::Intent(Intent::SubmitCameraCounts { outdoor, indoor });
        }
        "+o" => return Command::Counter(CameraLocation::Outdoor, true),
        "-o" => return Command::Counter(CameraLocation::Outdoor, false),
        "+i" => return Command::Counter(CameraLocation::Indoor, true),
        "-i" => return Command::Counter(CameraLocation::Indoor, false),
        _ => {}
    }

    let counts: Vec<Result<u32, _>> = line.split_whitespace().map(str::parse::<u32>).collect();
    match counts.as_slice() {
        [Ok(outdoor), Ok(indoor)] => Command::Intent(Intent::SubmitCameraCounts {
            outdoor: *outdoor,
            indoor: *indoor,
        }),
        _ => Command::Hint("실외 실내 대수를 입력해주세요 (예: 2 1)".to_string()),
    }
}

/// Feed typed text through the keypad model.
fn read_amount(text: &str) -> Result<Option<u64>, InputError> {
    Ok(DigitBuffer::from_typed(text)?.value())
}

// =============================================================================
// RENDERING
// =============================================================================

fn render_step<W: Write>(
    wizard: &WizardController,
    counter: &CameraCounter,
    out: &mut W,
) -> CliResult<()> {
    let step = wizard.step();
    let total = match wizard.variant() {
        FlowVariant::Full => Step::ExemptionReveal.number(),
        FlowVariant::PenaltyOnly => Step::PenaltyReveal.number(),
    };
    writeln!(out)?;
    writeln!(out, "[{}/{}] {}", step.number(), total, step.prompt())?;

    let answers = wizard.answers();
    match step {
        Step::ProviderSelect => {
            for (i, provider) in Provider::ALL.iter().enumerate() {
                writeln!(out, "  {}) {} ({})", i + 1, provider.label(), provider.as_str())?;
            }
        }
        Step::MonthlyFeeEntry => {
            writeln!(out, "  월 납입금을 입력해주세요 (모르면 구간 선택):")?;
            for range in FeeRange::ALL {
                writeln!(out, "    {} = {}", range.as_str(), range.label())?;
            }
        }
        Step::PeriodEntry => {
            writeln!(out, "  월 납입금 {}", format_won(answers.monthly_fee))?;
            writeln!(out, "  개월수를 입력해주세요 (예: 24, 2 year)")?;
        }
        Step::HasCamerasQuery => {
            writeln!(out, "  기존 CCTV가 있다면 추가 혜택이 있어요 (y/n)")?;
        }
        Step::CameraCountEntry => {
            writeln!(out, "  +o/-o, +i/-i 로 조정, Enter 로 다음 (또는 \"2 1\")")?;
            render_counter(counter, out)?;
        }
        Step::PenaltyReveal | Step::ExemptionReveal => {
            let report = wizard.report()?.ok_or_else(|| {
                CliError::Usage(format!("no result at step {step}"))
            })?;
            write!(out, "{}", report.to_text())?;
            if !wizard.is_complete() {
                writeln!(out, "Enter: 면제 대상 확인")?;
            }
        }
    }
    Ok(())
}

fn render_counter<W: Write>(counter: &CameraCounter, out: &mut W) -> CliResult<()> {
    writeln!(
        out,
        "  실외 {}대 / 실내 {}대 (총 {}대)",
        counter.get(CameraLocation::Outdoor),
        counter.get(CameraLocation::Indoor),
        counter.total()
    )?;
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_go_through_keypad() {
        assert_eq!(read_amount("50,000"), Ok(Some(50_000)));
        assert_eq!(read_amount("0"), Ok(None));
        assert_eq!(read_amount(""), Ok(None));
        assert!(read_amount("12a").is_err());
        assert_eq!(
            read_amount("1234567890"),
            Err(InputError::TooManyDigits { max: 9 })
        );
    }

    #[test]
    fn period_accepts_unit_suffix() {
        assert_eq!(
            parse_period("2 year"),
            Command::Intent(Intent::SubmitPeriod {
                amount: 2,
                unit: PeriodUnit::Year
            })
        );
        assert_eq!(
            parse_period("18"),
            Command::Intent(Intent::SubmitPeriod {
                amount: 18,
                unit: PeriodUnit::Month
            })
        );
        assert!(matches!(parse_period("2 weeks"), Command::Hint(_)));
    }

    #[test]
    fn fee_accepts_ranges() {
        assert_eq!(
            parse_fee("under-30k"),
            Command::Intent(Intent::SubmitFeeRange {
                range: FeeRange::Under30k
            })
        );
    }

    #[test]
    fn cameras_submit_counter_on_enter() {
        let counter = CameraCounter::from_counts(3, 2);
        assert_eq!(
            parse_cameras(&counter, ""),
            Command::Intent(Intent::SubmitCameraCounts {
                outdoor: 3,
                indoor: 2
            })
        );
        assert_eq!(
            parse_cameras(&counter, "+i"),
            Command::Counter(CameraLocation::Indoor, true)
        );
    }
}
