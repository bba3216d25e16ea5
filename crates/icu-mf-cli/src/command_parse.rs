use icu_mf_parser::{ParseError, parse};
use thiserror::Error;
use tracing::info;

use crate::config::CliConfig;
use crate::error::CliError;

#[derive(Debug, Error)]
pub enum ParseCommandError {
    #[error("config error: {0}")]
    Config(#[from] CliError),
    #[error("{}", describe(.0))]
    Parse(#[from] ParseError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub message: String,
    pub ignore_tag: bool,
    pub no_location: bool,
}

/// Parses one message and renders its AST as pretty JSON.
pub fn run_parse(options: &ParseOptions, config: &CliConfig) -> Result<String, ParseCommandError> {
    let mut parser_options = config.parser_options()?;
    if options.ignore_tag {
        parser_options.ignore_tag = true;
    }
    if options.no_location {
        parser_options.capture_location = false;
    }

    let message = parse(&options.message, &parser_options)?;
    info!(elements = message.elements.len(), "message parsed");
    let json = serde_json::to_string_pretty(&message.elements).map_err(CliError::from)?;
    Ok(json)
}

fn describe(err: &ParseError) -> String {
    let start = err.location().start();
    let mut out = format!("{} at {}:{}: {}", err.kind_name(), start.line, start.column, err.message());
    if let Some(cause) = err.cause() {
        out.push_str(&format!(" ({cause})"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{ParseCommandError, ParseOptions, run_parse};
    use crate::config::CliConfig;

    fn options(message: &str) -> ParseOptions {
        ParseOptions {
            message: message.to_string(),
            ..ParseOptions::default()
        }
    }

    #[test]
    fn prints_ast_json() {
        let output = run_parse(&options("Hi {name}"), &CliConfig::default()).expect("parse");
        let json: serde_json::Value = serde_json::from_str(&output).expect("json");
        assert_eq!(json[1]["type"], "argument");
        assert_eq!(json[1]["value"], "name");
        assert_eq!(json[1]["location"]["start"]["offset"], 3);
    }

    #[test]
    fn flags_override_config() {
        let mut parse_options = options("<b>{name}</b>");
        parse_options.ignore_tag = true;
        parse_options.no_location = true;
        let output = run_parse(&parse_options, &CliConfig::default()).expect("parse");
        let json: serde_json::Value = serde_json::from_str(&output).expect("json");
        assert_eq!(json[0]["value"], "<b>");
        assert!(json[1].get("location").is_none());
    }

    #[test]
    fn describes_parse_errors() {
        let err = run_parse(&options("a\n{n, number, ::bogus}"), &CliConfig::default()).expect_err("invalid");
        assert!(matches!(err, ParseCommandError::Parse(_)));
        let text = err.to_string();
        assert!(text.starts_with("INVALID_NUMBER_SKELETON at 2:13: "), "{text}");
        assert!(text.contains("bogus"));
    }
}
