use crate::error::TallyError;
use tracing_subscriber::EnvFilter;

/// Level implied by `-q` / `-v` / `-vv`, if any were given.
pub fn flag_level(verbose: u8, quiet: bool) -> Option<&'static str> {
    match (quiet, verbose) {
        (true, _) => Some("error"),
        (false, 0) => None,
        (false, 1) => Some("info"),
        (false, _) => Some("debug"),
    }
}

/// Picks the filter directive: a non-empty `RUST_LOG` wins, then the flags,
/// then the configured level. A directive that fails to parse is an error
/// whichever layer it came from.
fn resolve_filter(
    env_value: Option<&str>,
    flag_level: Option<&str>,
    config_level: &str,
) -> Result<EnvFilter, TallyError> {
    let value = env_value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .or(flag_level)
        .unwrap_or(config_level);
    EnvFilter::try_new(value).map_err(|source| TallyError::LogFilter {
        value: value.to_string(),
        source,
    })
}

/// Installs the stderr subscriber.
pub fn init(flag_level: Option<&str>, config_level: &str) -> Result<(), TallyError> {
    let env_value = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = resolve_filter(env_value.as_deref(), flag_level, config_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(|err| TallyError::Telemetry(err.to_string()))
}
