use std::fs;
use std::path::Path;

use icu_mf_intl::LanguageTag;
use icu_mf_parser::{DEFAULT_MAX_NESTING_DEPTH, ParserOptions};
use serde::Deserialize;
use tracing::debug;

use crate::error::CliError;

pub const DEFAULT_CONFIG_PATH: &str = "icu-mf.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Contents of `icu-mf.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub ignore_tag: bool,
    pub should_parse_skeletons: bool,
    pub requires_other_clause: bool,
    pub capture_location: bool,
    pub max_nesting_depth: usize,
    pub locale: Option<String>,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            ignore_tag: false,
            should_parse_skeletons: true,
            requires_other_clause: true,
            capture_location: true,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            locale: None,
            log_level: "warn".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl CliConfig {
    /// The configured locale in canonical form.
    pub fn locale_tag(&self) -> Result<Option<LanguageTag>, CliError> {
        match &self.locale {
            Some(locale) => Ok(Some(LanguageTag::parse(locale)?)),
            None => Ok(None),
        }
    }

    pub fn parser_options(&self) -> Result<ParserOptions, CliError> {
        let mut options = ParserOptions::default()
            .with_ignore_tag(self.ignore_tag)
            .with_should_parse_skeletons(self.should_parse_skeletons)
            .with_requires_other_clause(self.requires_other_clause)
            .with_capture_location(self.capture_location)
            .with_max_nesting_depth(self.max_nesting_depth);
        if let Some(tag) = self.locale_tag()? {
            options = options.with_locale(tag.to_string());
        }
        Ok(options)
    }
}

pub fn load_config(path: &Path) -> Result<CliConfig, CliError> {
    let contents = fs::read_to_string(path)?;
    let config = toml::from_str(&contents)?;
    Ok(config)
}

pub fn load_config_or_default(path: &Path) -> Result<CliConfig, CliError> {
    if path.exists() {
        load_config(path)
    } else {
        debug!(path = %path.display(), "config file not found, using defaults");
        Ok(CliConfig::default())
    }
}
