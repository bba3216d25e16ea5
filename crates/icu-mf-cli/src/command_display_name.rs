use icu_mf_intl::{DisplayNames, DisplayNamesFallback, DisplayNamesKind, DisplayNamesOptions, IntlError};
use thiserror::Error;
use tracing::debug;

use crate::config::CliConfig;
use crate::error::CliError;

const DEFAULT_LOCALE: &str = "en";

#[derive(Debug, Error)]
pub enum DisplayNameCommandError {
    #[error("config error: {0}")]
    Config(#[from] CliError),
    #[error(transparent)]
    Intl(#[from] IntlError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayNameOptions {
    pub code: String,
    pub kind: DisplayNamesKind,
    /// Overrides the configured locale.
    pub locale: Option<String>,
    pub no_fallback: bool,
}

pub fn run_display_name(
    options: &DisplayNameOptions,
    config: &CliConfig,
) -> Result<Option<String>, DisplayNameCommandError> {
    let fallback = if options.no_fallback {
        DisplayNamesFallback::None
    } else {
        DisplayNamesFallback::Code
    };
    let display_options = DisplayNamesOptions::new(options.kind).with_fallback(fallback);
    let names = match &options.locale {
        Some(locale) => DisplayNames::try_new(locale, display_options)?,
        None => match config.locale_tag()? {
            Some(tag) => DisplayNames::new(tag, display_options),
            None => DisplayNames::try_new(DEFAULT_LOCALE, display_options)?,
        },
    };
    debug!(locale = %names.locale(), kind = %names.options().kind, code = %options.code, "looking up display name");
    Ok(names.of(&options.code).map_err(IntlError::from)?)
}

#[cfg(test)]
mod tests {
    use super::{DisplayNameCommandError, DisplayNameOptions, run_display_name};
    use crate::config::CliConfig;
    use icu_mf_intl::DisplayNamesKind;

    fn options(code: &str, kind: DisplayNamesKind) -> DisplayNameOptions {
        DisplayNameOptions {
            code: code.to_string(),
            kind,
            locale: None,
            no_fallback: false,
        }
    }

    #[test]
    fn looks_up_names() {
        let name = run_display_name(&options("gb", DisplayNamesKind::Region), &CliConfig::default()).expect("name");
        assert_eq!(name.as_deref(), Some("United Kingdom"));
    }

    #[test]
    fn uses_configured_locale() {
        let config = CliConfig {
            locale: Some("de".to_string()),
            ..CliConfig::default()
        };
        let mut display = options("GB", DisplayNamesKind::Region);
        assert_eq!(run_display_name(&display, &config).expect("name").as_deref(), Some("GB"));
        display.no_fallback = true;
        assert_eq!(run_display_name(&display, &config).expect("name"), None);
    }

    #[test]
    fn locale_flag_overrides_config() {
        let config = CliConfig {
            locale: Some("de".to_string()),
            ..CliConfig::default()
        };
        let mut display = options("GB", DisplayNamesKind::Region);
        display.locale = Some("en-GB".to_string());
        assert_eq!(run_display_name(&display, &config).expect("name").as_deref(), Some("United Kingdom"));

        display.locale = Some("e1".to_string());
        let err = run_display_name(&display, &config).expect_err("bad locale");
        assert!(matches!(err, DisplayNameCommandError::Intl(_)));
    }

    #[test]
    fn reports_invalid_codes() {
        let err = run_display_name(&options("Abc1", DisplayNamesKind::Script), &CliConfig::default())
            .expect_err("invalid");
        assert!(matches!(err, DisplayNameCommandError::Intl(_)));
        assert_eq!(err.to_string(), "Invalid value \"Abc1\" for option script");
    }
}
