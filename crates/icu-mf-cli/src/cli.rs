use std::path::PathBuf;

use icu_mf_intl::DisplayNamesKind;
use thiserror::Error;

use crate::command_display_name::{DisplayNameCommandError, DisplayNameOptions, run_display_name};
use crate::command_kind::{KindCommandError, KindOptions, run_kind};
use crate::command_parse::{ParseCommandError, ParseOptions, run_parse};
use crate::command_validate::{ValidateCommandError, ValidateOptions, run_validate};
use crate::config::{DEFAULT_CONFIG_PATH, load_config_or_default};
use crate::error::CliError;
use crate::logging::init_logging;

#[derive(Debug, Error)]
pub enum CliAppError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Config(#[from] CliError),
    #[error(transparent)]
    Parse(#[from] ParseCommandError),
    #[error(transparent)]
    Validate(#[from] ValidateCommandError),
    #[error(transparent)]
    Kind(#[from] KindCommandError),
    #[error(transparent)]
    DisplayName(#[from] DisplayNameCommandError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Parse(ParseOptions),
    Validate(ValidateOptions),
    Kind(KindOptions),
    DisplayName(DisplayNameOptions),
}

pub fn run() -> Result<(), CliAppError> {
    let (command, config_path) = parse_command(std::env::args().skip(1).collect())?;
    let config = load_config_or_default(&config_path)?;
    init_logging(&config)?;

    match command {
        Command::Parse(options) => {
            println!("{}", run_parse(&options, &config)?);
        }
        Command::Validate(options) => {
            let diagnostics = run_validate(&options, &config)?;
            for diagnostic in &diagnostics {
                eprintln!("{diagnostic}");
            }
            if !diagnostics.is_empty() {
                return Err(ValidateCommandError::Failed(diagnostics.len()).into());
            }
        }
        Command::Kind(options) => {
            println!("{}", run_kind(&options)?);
        }
        Command::DisplayName(options) => {
            if let Some(name) = run_display_name(&options, &config)? {
                println!("{name}");
            }
        }
    }
    Ok(())
}

fn parse_command(args: Vec<String>) -> Result<(Command, PathBuf), CliAppError> {
    let mut args = args.into_iter();
    let command = args.next().ok_or_else(|| CliAppError::Usage(usage()))?;
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    let rest = take_config_flag(args.collect(), &mut config_path)?;
    let command = match command.as_str() {
        "parse" => Command::Parse(parse_parse_options(rest)?),
        "validate" => Command::Validate(parse_validate_options(rest)?),
        "kind" => Command::Kind(parse_kind_options(rest)?),
        "display-name" => Command::DisplayName(parse_display_name_options(rest)?),
        _ => return Err(CliAppError::Usage(usage())),
    };
    Ok((command, config_path))
}

/// Strips `--config <path>`, which every command accepts.
fn take_config_flag(args: Vec<String>, config_path: &mut PathBuf) -> Result<Vec<String>, CliAppError> {
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            *config_path = PathBuf::from(next_value("--config", &mut iter)?);
        } else {
            rest.push(arg);
        }
    }
    Ok(rest)
}

fn parse_parse_options(args: Vec<String>) -> Result<ParseOptions, CliAppError> {
    let mut message = None;
    let mut options = ParseOptions::default();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--message" => message = Some(next_value("--message", &mut iter)?),
            "--ignore-tag" => options.ignore_tag = true,
            "--no-location" => options.no_location = true,
            _ => return Err(CliAppError::Usage(usage())),
        }
    }
    options.message = message.ok_or_else(|| CliAppError::Usage(usage()))?;
    Ok(options)
}

fn parse_validate_options(args: Vec<String>) -> Result<ValidateOptions, CliAppError> {
    let mut source_path = None;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--source" => source_path = Some(PathBuf::from(next_value("--source", &mut iter)?)),
            _ => return Err(CliAppError::Usage(usage())),
        }
    }
    let source_path = source_path.ok_or_else(|| CliAppError::Usage(usage()))?;
    Ok(ValidateOptions { source_path })
}

fn parse_kind_options(args: Vec<String>) -> Result<KindOptions, CliAppError> {
    let mut value = None;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--value" => value = Some(next_value("--value", &mut iter)?),
            _ => return Err(CliAppError::Usage(usage())),
        }
    }
    let value = value.ok_or_else(|| CliAppError::Usage(usage()))?;
    Ok(KindOptions { value })
}

fn parse_display_name_options(args: Vec<String>) -> Result<DisplayNameOptions, CliAppError> {
    let mut code = None;
    let mut kind = None;
    let mut locale = None;
    let mut no_fallback = false;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--code" => code = Some(next_value("--code", &mut iter)?),
            "--type" => kind = Some(parse_display_names_kind(&next_value("--type", &mut iter)?)?),
            "--locale" => locale = Some(next_value("--locale", &mut iter)?),
            "--no-fallback" => no_fallback = true,
            _ => return Err(CliAppError::Usage(usage())),
        }
    }
    let code = code.ok_or_else(|| CliAppError::Usage(usage()))?;
    let kind = kind.ok_or_else(|| CliAppError::Usage(usage()))?;
    Ok(DisplayNameOptions {
        code,
        kind,
        locale,
        no_fallback,
    })
}

fn parse_display_names_kind(value: &str) -> Result<DisplayNamesKind, CliAppError> {
    match value {
        "region" => Ok(DisplayNamesKind::Region),
        "script" => Ok(DisplayNamesKind::Script),
        "currency" => Ok(DisplayNamesKind::Currency),
        "language" => Ok(DisplayNamesKind::Language),
        _ => Err(CliAppError::Usage(format!("unknown display name type `{value}`\n\n{}", usage()))),
    }
}

fn next_value(flag: &str, iter: &mut impl Iterator<Item = String>) -> Result<String, CliAppError> {
    iter.next()
        .ok_or_else(|| CliAppError::Usage(format!("{flag} requires a value\n\n{}", usage())))
}

fn usage() -> String {
    [
        "usage: icu-mf-cli parse --message <text> [--ignore-tag] [--no-location] [--config <path>]",
        "       icu-mf-cli validate --source <file-or-dir> [--config <path>]",
        "       icu-mf-cli kind --value <int>",
        "       icu-mf-cli display-name --type <region|script|currency|language> --code <code> [--locale <tag>]",
        "           [--no-fallback] [--config <path>]",
    ]
    .join("\n")
}
