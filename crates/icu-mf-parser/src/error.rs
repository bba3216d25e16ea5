use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::date_time_skeleton::DateTimeSkeletonError;
use crate::location::Location;
use crate::number_skeleton::NumberSkeletonError;

/// Classification of every way a message can fail to parse.
///
/// The discriminants are stable and shared with other ICU MessageFormat
/// tooling; 24 is reserved and has no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum ErrorKind {
    Other = 0,
    ExpectArgumentClosingBrace = 1,
    EmptyArgument = 2,
    MalformedArgument = 3,
    ExpectArgumentType = 4,
    InvalidArgumentType = 5,
    ExpectArgumentStyle = 6,
    InvalidNumberSkeleton = 7,
    InvalidDateTimeSkeleton = 8,
    ExpectNumberSkeleton = 9,
    ExpectDateTimeSkeleton = 10,
    UnclosedQuoteInArgumentStyle = 11,
    ExpectSelectArgumentOptions = 12,
    ExpectPluralArgumentOffsetValue = 13,
    InvalidPluralArgumentOffsetValue = 14,
    ExpectSelectArgumentSelector = 15,
    ExpectPluralArgumentSelector = 16,
    ExpectSelectArgumentSelectorFragment = 17,
    ExpectPluralArgumentSelectorFragment = 18,
    InvalidPluralArgumentSelector = 19,
    DuplicatePluralArgumentSelector = 20,
    DuplicateSelectArgumentSelector = 21,
    MissingOtherClause = 22,
    InvalidTag = 23,
    InvalidTagName = 25,
    UnmatchedClosingTag = 26,
    UnclosedTag = 27,
    NestingLimitExceeded = 28,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 28] = [
        ErrorKind::Other,
        ErrorKind::ExpectArgumentClosingBrace,
        ErrorKind::EmptyArgument,
        ErrorKind::MalformedArgument,
        ErrorKind::ExpectArgumentType,
        ErrorKind::InvalidArgumentType,
        ErrorKind::ExpectArgumentStyle,
        ErrorKind::InvalidNumberSkeleton,
        ErrorKind::InvalidDateTimeSkeleton,
        ErrorKind::ExpectNumberSkeleton,
        ErrorKind::ExpectDateTimeSkeleton,
        ErrorKind::UnclosedQuoteInArgumentStyle,
        ErrorKind::ExpectSelectArgumentOptions,
        ErrorKind::ExpectPluralArgumentOffsetValue,
        ErrorKind::InvalidPluralArgumentOffsetValue,
        ErrorKind::ExpectSelectArgumentSelector,
        ErrorKind::ExpectPluralArgumentSelector,
        ErrorKind::ExpectSelectArgumentSelectorFragment,
        ErrorKind::ExpectPluralArgumentSelectorFragment,
        ErrorKind::InvalidPluralArgumentSelector,
        ErrorKind::DuplicatePluralArgumentSelector,
        ErrorKind::DuplicateSelectArgumentSelector,
        ErrorKind::MissingOtherClause,
        ErrorKind::InvalidTag,
        ErrorKind::InvalidTagName,
        ErrorKind::UnmatchedClosingTag,
        ErrorKind::UnclosedTag,
        ErrorKind::NestingLimitExceeded,
    ];

    pub const fn value(self) -> i32 {
        self as i32
    }

    pub const fn name(self) -> &'static str {
        match self {
            ErrorKind::Other => "OTHER",
            ErrorKind::ExpectArgumentClosingBrace => "EXPECT_ARGUMENT_CLOSING_BRACE",
            ErrorKind::EmptyArgument => "EMPTY_ARGUMENT",
            ErrorKind::MalformedArgument => "MALFORMED_ARGUMENT",
            ErrorKind::ExpectArgumentType => "EXPECT_ARGUMENT_TYPE",
            ErrorKind::InvalidArgumentType => "INVALID_ARGUMENT_TYPE",
            ErrorKind::ExpectArgumentStyle => "EXPECT_ARGUMENT_STYLE",
            ErrorKind::InvalidNumberSkeleton => "INVALID_NUMBER_SKELETON",
            ErrorKind::InvalidDateTimeSkeleton => "INVALID_DATE_TIME_SKELETON",
            ErrorKind::ExpectNumberSkeleton => "EXPECT_NUMBER_SKELETON",
            ErrorKind::ExpectDateTimeSkeleton => "EXPECT_DATE_TIME_SKELETON",
            ErrorKind::UnclosedQuoteInArgumentStyle => "UNCLOSED_QUOTE_IN_ARGUMENT_STYLE",
            ErrorKind::ExpectSelectArgumentOptions => "EXPECT_SELECT_ARGUMENT_OPTIONS",
            ErrorKind::ExpectPluralArgumentOffsetValue => "EXPECT_PLURAL_ARGUMENT_OFFSET_VALUE",
            ErrorKind::InvalidPluralArgumentOffsetValue => "INVALID_PLURAL_ARGUMENT_OFFSET_VALUE",
            ErrorKind::ExpectSelectArgumentSelector => "EXPECT_SELECT_ARGUMENT_SELECTOR",
            ErrorKind::ExpectPluralArgumentSelector => "EXPECT_PLURAL_ARGUMENT_SELECTOR",
            ErrorKind::ExpectSelectArgumentSelectorFragment => "EXPECT_SELECT_ARGUMENT_SELECTOR_FRAGMENT",
            ErrorKind::ExpectPluralArgumentSelectorFragment => "EXPECT_PLURAL_ARGUMENT_SELECTOR_FRAGMENT",
            ErrorKind::InvalidPluralArgumentSelector => "INVALID_PLURAL_ARGUMENT_SELECTOR",
            ErrorKind::DuplicatePluralArgumentSelector => "DUPLICATE_PLURAL_ARGUMENT_SELECTOR",
            ErrorKind::DuplicateSelectArgumentSelector => "DUPLICATE_SELECT_ARGUMENT_SELECTOR",
            ErrorKind::MissingOtherClause => "MISSING_OTHER_CLAUSE",
            ErrorKind::InvalidTag => "INVALID_TAG",
            ErrorKind::InvalidTagName => "INVALID_TAG_NAME",
            ErrorKind::UnmatchedClosingTag => "UNMATCHED_CLOSING_TAG",
            ErrorKind::UnclosedTag => "UNCLOSED_TAG",
            ErrorKind::NestingLimitExceeded => "NESTING_LIMIT_EXCEEDED",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown error kind {0}")]
pub struct UnknownErrorKind(pub i32);

impl TryFrom<i32> for ErrorKind {
    type Error = UnknownErrorKind;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        ErrorKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.value() == value)
            .ok_or(UnknownErrorKind(value))
    }
}

/// Resolves a raw error kind value to its canonical name.
pub fn error_kind_name(value: i32) -> Result<&'static str, UnknownErrorKind> {
    ErrorKind::try_from(value).map(ErrorKind::name)
}

/// Failure reported by one of the skeleton sub-parsers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkeletonError {
    #[error(transparent)]
    Number(#[from] NumberSkeletonError),
    #[error(transparent)]
    DateTime(#[from] DateTimeSkeletonError),
}

/// The single diagnostic produced when a message fails to parse.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct ParseError {
    kind: ErrorKind,
    message: String,
    location: Location,
    #[source]
    cause: Option<SkeletonError>,
}

pub type ParseResult<T> = Result<T, ParseError>;

impl ParseError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, location: Location) -> Self {
        Self {
            kind,
            message: message.into(),
            location,
            cause: None,
        }
    }

    pub fn with_cause(
        kind: ErrorKind,
        message: impl Into<String>,
        location: Location,
        cause: impl Into<SkeletonError>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            location,
            cause: Some(cause.into()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn cause(&self) -> Option<&SkeletonError> {
        self.cause.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::{ErrorKind, ParseError, SkeletonError, UnknownErrorKind, error_kind_name};
    use crate::location::{Location, LocationDetails};
    use crate::number_skeleton::NumberSkeletonError;

    fn location() -> Location {
        Location::new(LocationDetails::new(0, 1, 1), LocationDetails::new(2, 4, 6))
    }

    #[test]
    fn constructor_keeps_fields() {
        let error = ParseError::new(ErrorKind::EmptyArgument, "a test message", location());
        assert_eq!(error.kind(), ErrorKind::EmptyArgument);
        assert_eq!(error.message(), "a test message");
        assert_eq!(error.location(), location());
        assert!(error.cause().is_none());
        assert!(error.source().is_none());
    }

    #[test]
    fn constructor_accepts_cause() {
        let cause = NumberSkeletonError::UnknownStem("bogus".to_string());
        let error = ParseError::with_cause(
            ErrorKind::InvalidNumberSkeleton,
            "a test message",
            location(),
            cause.clone(),
        );
        assert_eq!(error.cause(), Some(&SkeletonError::Number(cause)));
        assert!(error.source().is_some());
    }

    #[test]
    fn resolves_every_kind_name() {
        let expected = [
            (0, "OTHER"),
            (1, "EXPECT_ARGUMENT_CLOSING_BRACE"),
            (2, "EMPTY_ARGUMENT"),
            (3, "MALFORMED_ARGUMENT"),
            (4, "EXPECT_ARGUMENT_TYPE"),
            (5, "INVALID_ARGUMENT_TYPE"),
            (6, "EXPECT_ARGUMENT_STYLE"),
            (7, "INVALID_NUMBER_SKELETON"),
            (8, "INVALID_DATE_TIME_SKELETON"),
            (9, "EXPECT_NUMBER_SKELETON"),
            (10, "EXPECT_DATE_TIME_SKELETON"),
            (11, "UNCLOSED_QUOTE_IN_ARGUMENT_STYLE"),
            (12, "EXPECT_SELECT_ARGUMENT_OPTIONS"),
            (13, "EXPECT_PLURAL_ARGUMENT_OFFSET_VALUE"),
            (14, "INVALID_PLURAL_ARGUMENT_OFFSET_VALUE"),
            (15, "EXPECT_SELECT_ARGUMENT_SELECTOR"),
            (16, "EXPECT_PLURAL_ARGUMENT_SELECTOR"),
            (17, "EXPECT_SELECT_ARGUMENT_SELECTOR_FRAGMENT"),
            (18, "EXPECT_PLURAL_ARGUMENT_SELECTOR_FRAGMENT"),
            (19, "INVALID_PLURAL_ARGUMENT_SELECTOR"),
            (20, "DUPLICATE_PLURAL_ARGUMENT_SELECTOR"),
            (21, "DUPLICATE_SELECT_ARGUMENT_SELECTOR"),
            (22, "MISSING_OTHER_CLAUSE"),
            (23, "INVALID_TAG"),
            (25, "INVALID_TAG_NAME"),
            (26, "UNMATCHED_CLOSING_TAG"),
            (27, "UNCLOSED_TAG"),
        ];
        for (value, name) in expected {
            assert_eq!(error_kind_name(value), Ok(name), "kind {value}");
        }
    }

    #[test]
    fn reserved_and_unknown_kinds_fail() {
        assert_eq!(error_kind_name(24), Err(UnknownErrorKind(24)));
        assert_eq!(error_kind_name(-1), Err(UnknownErrorKind(-1)));
        assert_eq!(error_kind_name(99), Err(UnknownErrorKind(99)));
    }

    #[test]
    fn kind_values_round_trip() {
        for kind in ErrorKind::ALL {
            assert_eq!(ErrorKind::try_from(kind.value()), Ok(kind));
        }
    }

    #[test]
    fn display_includes_kind_name() {
        let error = ParseError::new(ErrorKind::UnclosedTag, "tag is never closed", location());
        assert_eq!(error.to_string(), "UNCLOSED_TAG: tag is never closed");
    }
}
