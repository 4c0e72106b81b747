//! # Report Module
//!
//! Structured result block for the reveal steps.
//!
//! The report carries raw figures only. `to_text` renders the fixed template
//! used by text Views; JSON Views serialize the struct directly.

use crate::answers::Answers;
use crate::error::QuoteError;
use crate::primitives::{PenaltyRate, Provider};
use crate::quote::QuoteEngine;
use serde::{Deserialize, Serialize};

/// Disclaimer shown under the penalty figure.
pub const PENALTY_DISCLAIMER: &str =
    "* 공식적으로 소개된 위약금율에 기반한 결과입니다. 이는 법적 효과가 없습니다.";

/// Disclaimer shown under the exemption figure.
pub const EXEMPTION_DISCLAIMER: &str = "* 실제 면제 금액은 상담 후 확정됩니다.";

/// Format an amount with comma thousands separators (`1234567` -> `1,234,567`).
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut output = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            output.push(',');
        }
        output.push(ch);
    }
    output
}

/// Format an amount in won (`480000` -> `480,000원`).
#[must_use]
pub fn format_won(value: u64) -> String {
    format!("{}원", group_thousands(value))
}

/// Everything a View shows on a reveal step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteReport {
    pub provider: Provider,
    pub penalty_rate: PenaltyRate,
    pub monthly_fee: u64,
    pub remaining_months: u64,
    pub penalty: u64,
    /// Present once the exemption check has been answered.
    pub exemption: Option<u64>,
    /// Penalty left after the exemption, present with `exemption`.
    pub remaining: Option<u64>,
}

impl QuoteReport {
    /// Report for the penalty reveal.
    pub fn penalty(answers: &Answers) -> Result<Self, QuoteError> {
        let provider = answers.provider.ok_or(QuoteError::ProviderUnset)?;
        Ok(Self {
            provider,
            penalty_rate: provider.penalty_rate(),
            monthly_fee: answers.monthly_fee,
            remaining_months: answers.remaining_months,
            penalty: QuoteEngine::compute_penalty(answers)?,
            exemption: None,
            remaining: None,
        })
    }

    /// Report for the exemption reveal.
    pub fn exemption(answers: &Answers) -> Result<Self, QuoteError> {
        let mut report = Self::penalty(answers)?;
        let quote = QuoteEngine::quote(answers)?;
        report.exemption = Some(quote.exemption);
        report.remaining = Some(quote.remaining());
        Ok(report)
    }

    /// Format as plain text with the standard template.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str("┌─────────────────────────────────────┐\n");
        output.push_str("│ CONTRACT                            │\n");
        output.push_str(&format!(
            "│ - provider: {} ({} of remaining)\n",
            self.provider, self.penalty_rate
        ));
        output.push_str(&format!(
            "│ - monthly fee: {}\n",
            format_won(self.monthly_fee)
        ));
        output.push_str(&format!(
            "│ - remaining: {}개월\n",
            self.remaining_months
        ));

        output.push_str("├─────────────────────────────────────┤\n");
        output.push_str("│ PENALTY                             │\n");
        output.push_str(&format!("│ - {}\n", format_won(self.penalty)));

        if let Some(exemption) = self.exemption {
            output.push_str("├─────────────────────────────────────┤\n");
            output.push_str("│ EXEMPTION                           │\n");
            output.push_str(&format!("│ - {}\n", format_won(exemption)));
            if let Some(remaining) = self.remaining {
                output.push_str(&format!("│ - still owed: {}\n", format_won(remaining)));
            }
        }

        output.push_str("└─────────────────────────────────────┘\n");
        output.push_str(PENALTY_DISCLAIMER);
        output.push('\n');
        if self.exemption.is_some() {
            output.push_str(EXEMPTION_DISCLAIMER);
            output.push('\n');
        }

        output
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn caps_answers() -> Answers {
        Answers {
            provider: Some(Provider::Caps),
            monthly_fee: 30_000,
            remaining_months: 10,
            has_existing_cameras: true,
            outdoor_camera_count: 2,
            indoor_camera_count: 1,
        }
    }

    #[test]
    fn grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(480_000), "480,000");
        assert_eq!(group_thousands(12_345_678), "12,345,678");
        assert_eq!(format_won(30_000), "30,000원");
    }

    #[test]
    fn penalty_report_has_no_exemption() {
        let report = QuoteReport::penalty(&caps_answers());
        assert_eq!(report.as_ref().map(|r| r.penalty), Ok(30_000));
        assert_eq!(report.as_ref().map(|r| r.exemption), Ok(None));
    }

    #[test]
    fn exemption_report_fills_remaining() {
        let report = QuoteReport::exemption(&caps_answers());
        assert_eq!(report.as_ref().map(|r| r.exemption), Ok(Some(30_000)));
        assert_eq!(report.as_ref().map(|r| r.remaining), Ok(Some(0)));
    }

    #[test]
    fn report_requires_provider() {
        assert_eq!(
            QuoteReport::penalty(&Answers::default()),
            Err(QuoteError::ProviderUnset)
        );
    }

    #[test]
    fn to_text_format() {
        let text = QuoteReport::exemption(&caps_answers())
            .map(|r| r.to_text())
            .unwrap_or_default();

        assert!(text.contains("PENALTY"));
        assert!(text.contains("EXEMPTION"));
        assert!(text.contains("캡스 (10% of remaining)"));
        assert!(text.contains("30,000원"));
        assert!(text.contains(EXEMPTION_DISCLAIMER));
    }

    #[test]
    fn penalty_text_omits_exemption_block() {
        let text = QuoteReport::penalty(&caps_answers())
            .map(|r| r.to_text())
            .unwrap_or_default();

        assert!(text.contains("PENALTY"));
        assert!(!text.contains("EXEMPTION"));
        assert!(!text.contains(EXEMPTION_DISCLAIMER));
    }
}
