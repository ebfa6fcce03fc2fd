use lambda_runtime::Error;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Installs the JSON subscriber used by the Lambda binary. CloudWatch stamps
/// every line itself, so the timestamp field is omitted.
pub fn init_logging() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter())
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .try_init()
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
