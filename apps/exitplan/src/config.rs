//! Runtime configuration and logging setup.

use exitplan_core::FlowVariant;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Settings shared by every command, built once from the parsed CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Which configuration of the wizard to run.
    pub flow: FlowVariant,
    /// Print machine-readable JSON instead of text.
    pub json: bool,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Emit logs as JSON lines.
    pub json_logs: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            flow: FlowVariant::Full,
            json: false,
            log_level: "warn".to_string(),
            json_logs: false,
        }
    }
}

impl AppConfig {
    #[must_use]
    pub fn with_flow(mut self, flow: FlowVariant) -> Self {
        self.flow = flow;
        self
    }

    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

/// Install the global tracing subscriber. Logs go to stderr so they never
/// mix with wizard output.
pub fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
