use std::fmt;

use icu_mf_parser::ParseError;

/// A problem found in a message source, positioned in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: String,
    pub message: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl Diagnostic {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
            line: None,
            column: None,
        }
    }

    /// Uses the error kind name as the code.
    pub fn from_parse_error(err: &ParseError) -> Self {
        let mut message = err.message().to_string();
        if let Some(cause) = err.cause() {
            message.push_str(&format!(" ({cause})"));
        }
        let start = err.location().start();
        let mut diagnostic = Self::new(err.kind_name(), message);
        diagnostic.line = Some(start.line);
        diagnostic.column = Some(start.column);
        diagnostic
    }

    pub fn with_span(mut self, file: impl Into<String>, line: u32, column: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{file}:{}:{} ", self.line.unwrap_or(1), self.column.unwrap_or(1))?;
        }
        write!(f, "{} {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::Diagnostic;
    use icu_mf_parser::parse_message;

    #[test]
    fn displays_position_and_code() {
        let diagnostic = Diagnostic::new("EMPTY_ARGUMENT", "argument name is empty").with_span("app.messages", 3, 9);
        assert_eq!(diagnostic.to_string(), "app.messages:3:9 EMPTY_ARGUMENT argument name is empty");
    }

    #[test]
    fn carries_parse_error_details() {
        let err = parse_message("ok {n, number, ::bogus}").expect_err("invalid");
        let diagnostic = Diagnostic::from_parse_error(&err);
        assert_eq!(diagnostic.code, "INVALID_NUMBER_SKELETON");
        assert_eq!(diagnostic.line, Some(1));
        assert!(diagnostic.message.contains("bogus"));
        assert_eq!(diagnostic.file, None);
    }
}
