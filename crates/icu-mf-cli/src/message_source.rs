//! `key = message` source files.
//!
//! An entry starts at a line containing `=` and continues over following
//! non-blank lines, which keeps multi-line plural and select messages
//! readable. Lines starting with `#` or `//` outside an entry are comments.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

pub const SOURCE_EXTENSION: &str = "messages";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub key: String,
    pub value: String,
    pub line: u32,
    /// Column of the first character of the value on `line`.
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column} {message}")]
pub struct SourceError {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: String,
    pub entries: Vec<SourceEntry>,
}

#[derive(Debug, Error)]
pub enum SourceLoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{file}:{source}")]
    Parse { file: String, source: SourceError },
    #[error("duplicate key {key} in {file}:{line}")]
    DuplicateKey { key: String, file: String, line: u32 },
    #[error("no .messages files found in {0}")]
    NoSources(String),
}

pub fn parse_message_source(input: &str) -> Result<Vec<SourceEntry>, SourceError> {
    let mut entries = Vec::new();
    let mut current: Option<SourceEntry> = None;

    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = u32::try_from(idx + 1).unwrap_or(u32::MAX);
        let line = raw_line.trim_end();
        let trimmed = line.trim();

        if let Some(entry) = current.as_mut() {
            if trimmed.is_empty() {
                entries.extend(current.take());
            } else {
                entry.value.push('\n');
                entry.value.push_str(line);
            }
            continue;
        }

        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        let Some((key_part, value_part)) = line.split_once('=') else {
            return Err(SourceError {
                message: "expected '=' in entry".to_string(),
                line: line_no,
                column: 1,
            });
        };
        let key = key_part.trim();
        if key.is_empty() {
            return Err(SourceError {
                message: "missing key".to_string(),
                line: line_no,
                column: 1,
            });
        }
        if !is_valid_key(key) {
            return Err(SourceError {
                message: format!("invalid key `{key}`"),
                line: line_no,
                column: column_of(line, line.len() - line.trim_start().len()),
            });
        }

        let value = value_part.trim_start();
        let value_offset = line.len() - value.len();
        current = Some(SourceEntry {
            key: key.to_string(),
            value: value.to_string(),
            line: line_no,
            column: column_of(line, value_offset),
        });
    }

    entries.extend(current);
    Ok(entries)
}

/// Reads `path` if it is a file, or every `*.messages` file directly inside
/// it if it is a directory, in file name order.
pub fn load_message_sources(path: &Path) -> Result<Vec<SourceFile>, SourceLoadError> {
    let files = if path.is_dir() {
        let mut files = Vec::new();
        for entry in fs::read_dir(path)? {
            let file_path = entry?.path();
            if file_path.is_file() && file_path.extension().and_then(|ext| ext.to_str()) == Some(SOURCE_EXTENSION) {
                files.push(file_path);
            }
        }
        files.sort();
        if files.is_empty() {
            return Err(SourceLoadError::NoSources(path.display().to_string()));
        }
        files
    } else {
        vec![path.to_path_buf()]
    };

    files.iter().map(|file| load_source_file(file)).collect()
}

fn load_source_file(path: &Path) -> Result<SourceFile, SourceLoadError> {
    let file = path.display().to_string();
    let contents = fs::read_to_string(path)?;
    let entries = parse_message_source(&contents).map_err(|source| SourceLoadError::Parse {
        file: file.clone(),
        source,
    })?;

    let mut seen = BTreeMap::new();
    for entry in &entries {
        if seen.insert(entry.key.as_str(), entry.line).is_some() {
            return Err(SourceLoadError::DuplicateKey {
                key: entry.key.clone(),
                file,
                line: entry.line,
            });
        }
    }
    Ok(SourceFile { path: file, entries })
}

fn column_of(line: &str, byte_offset: usize) -> u32 {
    let chars = line[..byte_offset].chars().count();
    u32::try_from(chars + 1).unwrap_or(u32::MAX)
}

fn is_valid_key(key: &str) -> bool {
    key.chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '.' || ch == '_' || ch == '-')
}

#[cfg(test)]
mod tests {
    use super::{SourceLoadError, load_message_sources, parse_message_source};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir() -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        path.push(format!("icu_mf_sources_{nanos}"));
        fs::create_dir_all(&path).expect("dir");
        path
    }

    #[test]
    fn parses_single_line_entry() {
        let entries = parse_message_source("home.title = Hello {name}").expect("parse");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "home.title");
        assert_eq!(entries[0].value, "Hello {name}");
        assert_eq!(entries[0].line, 1);
        assert_eq!(entries[0].column, 14);
    }

    #[test]
    fn parses_multiline_entries_and_comments() {
        let input = "# greeting\n\
                     // another comment\n\
                     inbox = {count, plural,\n  one {# message}\n  other {# messages}}\n\
                     \n\
                     bye = Bye";
        let entries = parse_message_source(input).expect("parse");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key, "inbox");
        assert_eq!(entries[0].line, 3);
        assert_eq!(entries[0].value, "{count, plural,\n  one {# message}\n  other {# messages}}");
        assert_eq!(entries[1].key, "bye");
        assert_eq!(entries[1].line, 7);
    }

    #[test]
    fn reports_malformed_lines() {
        let err = parse_message_source("just text").expect_err("missing =");
        assert_eq!(err.line, 1);
        assert_eq!(err.message, "expected '=' in entry");

        let err = parse_message_source("\n = value").expect_err("missing key");
        assert_eq!(err.line, 2);

        let err = parse_message_source("bad key = value").expect_err("invalid key");
        assert_eq!(err.to_string(), "1:1 invalid key `bad key`");
    }

    #[test]
    fn loads_directory_in_name_order() {
        let dir = temp_dir();
        fs::write(dir.join("b.messages"), "b = B").expect("write");
        fs::write(dir.join("a.messages"), "a = A").expect("write");
        fs::write(dir.join("notes.txt"), "ignored").expect("write");

        let files = load_message_sources(&dir).expect("load");
        fs::remove_dir_all(&dir).ok();

        assert_eq!(files.len(), 2);
        assert!(files[0].path.ends_with("a.messages"));
        assert_eq!(files[1].entries[0].value, "B");
    }

    #[test]
    fn rejects_duplicate_keys_and_empty_directories() {
        let dir = temp_dir();
        let err = load_message_sources(&dir).expect_err("empty dir");
        assert!(matches!(err, SourceLoadError::NoSources(_)));

        let file = dir.join("dup.messages");
        fs::write(&file, "a = 1\n\na = 2").expect("write");
        let err = load_message_sources(&file).expect_err("duplicate");
        fs::remove_dir_all(&dir).ok();
        assert!(matches!(err, SourceLoadError::DuplicateKey { line: 3, .. }));
    }
}
