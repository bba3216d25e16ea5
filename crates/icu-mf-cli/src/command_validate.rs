use std::path::PathBuf;

use icu_mf_parser::parse;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::CliConfig;
use crate::diagnostic::Diagnostic;
use crate::error::CliError;
use crate::message_source::{SourceEntry, SourceLoadError, load_message_sources};

#[derive(Debug, Error)]
pub enum ValidateCommandError {
    #[error("config error: {0}")]
    Config(#[from] CliError),
    #[error(transparent)]
    Source(#[from] SourceLoadError),
    #[error("validation failed with {0} diagnostics")]
    Failed(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateOptions {
    pub source_path: PathBuf,
}

/// Parses every message under the source path. An empty result means every
/// message is valid.
pub fn run_validate(options: &ValidateOptions, config: &CliConfig) -> Result<Vec<Diagnostic>, ValidateCommandError> {
    let parser_options = config.parser_options()?;
    let files = load_message_sources(&options.source_path)?;

    let mut diagnostics = Vec::new();
    let mut checked = 0usize;
    for file in &files {
        debug!(file = %file.path, entries = file.entries.len(), "validating source");
        for entry in &file.entries {
            checked += 1;
            if let Err(err) = parse(&entry.value, &parser_options) {
                let (line, column) = source_position(entry, err.location().start().line, err.location().start().column);
                diagnostics.push(Diagnostic::from_parse_error(&err).with_span(file.path.clone(), line, column));
            }
        }
    }

    info!(files = files.len(), messages = checked, diagnostics = diagnostics.len(), "validation finished");
    Ok(diagnostics)
}

/// Maps a position inside a message value to its position in the file.
fn source_position(entry: &SourceEntry, line: u32, column: u32) -> (u32, u32) {
    if line <= 1 {
        (entry.line, entry.column + column - 1)
    } else {
        (entry.line + line - 1, column)
    }
}

#[cfg(test)]
mod tests {
    use super::{ValidateOptions, run_validate};
    use crate::config::CliConfig;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir() -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        path.push(format!("icu_mf_validate_{nanos}"));
        fs::create_dir_all(&path).expect("dir");
        path
    }

    #[test]
    fn reports_positions_in_source_files() {
        let dir = temp_dir();
        let contents = "ok = Hello {name}\n\
                        \n\
                        empty = Hi {}\n\
                        \n\
                        inbox = {count, plural,\n  one {# message}}\n";
        fs::write(dir.join("app.messages"), contents).expect("write");

        let options = ValidateOptions { source_path: dir.clone() };
        let diagnostics = run_validate(&options, &CliConfig::default()).expect("validate");
        fs::remove_dir_all(&dir).ok();

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].code, "EMPTY_ARGUMENT");
        assert_eq!(diagnostics[0].line, Some(3));
        assert_eq!(diagnostics[0].column, Some(12));
        assert!(diagnostics[0].file.as_deref().is_some_and(|file| file.ends_with("app.messages")));
        assert_eq!(diagnostics[1].code, "MISSING_OTHER_CLAUSE");
        assert_eq!(diagnostics[1].line, Some(6));
        assert_eq!(diagnostics[1].column, Some(3));
    }

    #[test]
    fn config_options_apply() {
        let dir = temp_dir();
        let file = dir.join("one.messages");
        fs::write(&file, "pick = {g, select, a {A}}").expect("write");

        let options = ValidateOptions { source_path: file };
        let strict = run_validate(&options, &CliConfig::default()).expect("validate");
        let lenient = CliConfig {
            requires_other_clause: false,
            ..CliConfig::default()
        };
        let relaxed = run_validate(&options, &lenient).expect("validate");
        fs::remove_dir_all(&dir).ok();

        assert_eq!(strict.len(), 1);
        assert!(relaxed.is_empty());
    }
}
