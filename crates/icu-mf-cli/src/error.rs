use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid locale: {0}")]
    Locale(#[from] icu_mf_intl::LanguageTagError),
    #[error("invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),
    #[error("logging already initialized: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}
