use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{CliConfig, LogFormat};
use crate::error::CliError;

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
/// Events go to stderr so command output on stdout stays machine readable.
pub fn init_logging(config: &CliConfig) -> Result<(), CliError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_filter(&config.log_level)?,
    };
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().flatten_event(true).with_writer(std::io::stderr))
            .try_init()?,
    }
    Ok(())
}

fn level_filter(level: &str) -> Result<EnvFilter, CliError> {
    Ok(EnvFilter::try_new(level)?)
}

#[cfg(test)]
mod tests {
    use super::level_filter;
    use crate::error::CliError;

    #[test]
    fn accepts_levels_and_directives() {
        assert!(level_filter("warn").is_ok());
        assert!(level_filter("icu_mf_parser=trace,info").is_ok());
    }

    #[test]
    fn rejects_bad_level() {
        assert!(matches!(level_filter("icu_mf_parser=loud"), Err(CliError::LogFilter(_))));
    }
}
