//! Parser for ICU MessageFormat messages.
//!
//! [`parse`] turns a message such as
//! `{count, plural, one {# file} other {# files}}` into a tree of
//! [`Element`]s, or fails with the first [`ParseError`] found. Number and
//! date/time skeletons are interpreted into structured options unless
//! [`ParserOptions::should_parse_skeletons`] is turned off.

#![forbid(unsafe_code)]

mod ast;
mod date_time_skeleton;
mod error;
mod formatter;
mod location;
mod number_skeleton;
mod options;
mod parser;
mod scanner;

pub use ast::{
    ArgumentElement, DateTimeElement, DateTimeSkeleton, DateTimeStyle, Element, LiteralElement, Message,
    NumberElement, NumberSkeleton, NumberStyle, PluralElement, PluralOrSelectOption, PluralType, PoundElement,
    SelectElement, TagElement,
};
pub use date_time_skeleton::{
    DateTimeFormatOptions, DateTimeSkeletonError, DateTimeSkeletonResult, HourCycle, MonthWidth, NumericWidth,
    TextWidth, TimeZoneNameWidth, parse_date_time_skeleton,
};
pub use error::{ErrorKind, ParseError, ParseResult, SkeletonError, UnknownErrorKind, error_kind_name};
pub use formatter::{ArgumentValue, ArgumentValues, Formatter};
pub use location::{Location, LocationDetails};
pub use number_skeleton::{
    CompactDisplay, CurrencyDisplay, CurrencySign, Notation, NumberFormatOptions, NumberFormatStyle,
    NumberSkeletonError, NumberSkeletonResult, NumberSkeletonToken, RoundingMode, RoundingPriority, SignDisplay,
    TrailingZeroDisplay, UnitDisplay, parse_number_skeleton, parse_number_skeleton_tokens,
};
pub use options::{DEFAULT_MAX_NESTING_DEPTH, ParserOptions};
pub use parser::{parse, parse_message};
