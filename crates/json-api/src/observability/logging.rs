//! Logging subscriber initialisation.

use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

use crate::config::observability::{LogFormat, ObservabilityConfig};

use super::{ObservabilityError, settings};

/// Noisy dependencies are capped at `warn` unless `RUST_LOG` says otherwise.
const QUIET_DEPENDENCIES: &str = "hyper=warn,sqlx=warn,salvo_core=info";

/// Install the global subscriber in the configured format.
pub(crate) fn init(config: &ObservabilityConfig) -> Result<(), ObservabilityError> {
    settings::apply_runtime_config(config);

    let output = match config.log_format {
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(output)
        .with(env_filter(&config.log_level))
        .try_init()?;

    Ok(())
}

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{log_level},{QUIET_DEPENDENCIES}")))
}
