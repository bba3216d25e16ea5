use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::ast::{
    ArgumentElement, DateTimeElement, DateTimeSkeleton, DateTimeStyle, Element, LiteralElement, Message,
    NumberElement, NumberSkeleton, NumberStyle, PluralElement, PluralOrSelectOption, PluralType, PoundElement,
    SelectElement, TagElement,
};
use crate::date_time_skeleton::{DateTimeFormatOptions, parse_date_time_skeleton};
use crate::error::{ErrorKind, ParseError, ParseResult};
use crate::location::{Location, LocationDetails};
use crate::number_skeleton::{
    NumberFormatOptions, NumberSkeletonError, parse_number_skeleton, parse_number_skeleton_tokens,
};
use crate::options::ParserOptions;
use crate::scanner::{Scanner, TextContext, TokenKind, is_white_space};

/// Parses `input` with the default [`ParserOptions`].
pub fn parse_message(input: &str) -> ParseResult<Message> {
    parse(input, &ParserOptions::default())
}

pub fn parse(input: &str, options: &ParserOptions) -> ParseResult<Message> {
    debug!(length = input.len(), ignore_tag = options.ignore_tag, "parsing message");
    let mut parser = Parser::new(input, options);
    let result = parser.parse_message(Frame::root()).map(|elements| Message {
        elements,
        location: parser.scanner.location_from(LocationDetails::default()),
    });
    match &result {
        Ok(message) => debug!(elements = message.elements.len(), "parsed message"),
        Err(err) => debug!(
            kind = err.kind_name(),
            line = err.location().start().line,
            column = err.location().start().column,
            "message failed to parse"
        ),
    }
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormattedKind {
    Number,
    Date,
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionsKind {
    Plural(PluralType),
    Select,
}

impl OptionsKind {
    fn is_select(self) -> bool {
        matches!(self, OptionsKind::Select)
    }
}

/// What the message being parsed is nested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    depth: usize,
    /// Inside a `plural`/`selectordinal` branch, where `#` is the number.
    in_plural: bool,
    /// Inside a plural/select branch, where `}` ends the message.
    in_fragment: bool,
}

impl Frame {
    fn root() -> Self {
        Self {
            depth: 0,
            in_plural: false,
            in_fragment: false,
        }
    }
}

struct Parser<'a> {
    scanner: Scanner<'a>,
    options: &'a ParserOptions,
    open_tags: Vec<String>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, options: &'a ParserOptions) -> Self {
        Self {
            scanner: Scanner::new(input),
            options,
            open_tags: Vec::new(),
        }
    }

    fn parse_message(&mut self, frame: Frame) -> ParseResult<Vec<Element>> {
        let context = TextContext {
            in_plural: frame.in_plural,
            ignore_tag: self.options.ignore_tag,
        };
        let mut elements = Vec::new();
        loop {
            match self.scanner.peek_token(context) {
                TokenKind::Eof => break,
                TokenKind::ArgumentStart => elements.push(self.parse_argument(frame)?),
                TokenKind::CloseBrace if frame.in_fragment => break,
                TokenKind::CloseBrace => {
                    let start = self.scanner.position();
                    self.scanner.bump();
                    return Err(self.error(ErrorKind::Other, "unmatched closing brace", start));
                }
                TokenKind::Pound => {
                    let start = self.scanner.position();
                    self.scanner.bump();
                    elements.push(Element::Pound(PoundElement {
                        location: self.capture(start),
                    }));
                }
                TokenKind::ClosingTagStart if !self.open_tags.is_empty() => break,
                TokenKind::ClosingTagStart => {
                    let start = self.scanner.position();
                    self.scanner.bump_if("</");
                    let name = self.scanner.scan_tag_name();
                    self.scanner.bump_if_char('>');
                    return Err(self.error(
                        ErrorKind::UnmatchedClosingTag,
                        format!("closing tag `</{name}>` has no matching opening tag"),
                        start,
                    ));
                }
                TokenKind::TagStart => elements.push(self.parse_tag(frame)?),
                TokenKind::Text => {
                    let (value, location) = self.scanner.scan_literal(context);
                    elements.push(Element::Literal(LiteralElement {
                        value,
                        location: self.options.capture_location.then_some(location),
                    }));
                }
            }
        }
        Ok(elements)
    }

    fn parse_argument(&mut self, frame: Frame) -> ParseResult<Element> {
        let opening = self.scanner.position();
        self.scanner.bump();
        self.scanner.bump_space();

        match self.scanner.current() {
            None => {
                return Err(self.error(
                    ErrorKind::ExpectArgumentClosingBrace,
                    "expected `}` to close the argument",
                    opening,
                ));
            }
            Some('}') => {
                self.scanner.bump();
                return Err(self.error(ErrorKind::EmptyArgument, "argument name is empty", opening));
            }
            Some(_) => {}
        }

        let (name, _) = self.scanner.scan_identifier();
        if name.is_empty() {
            self.scanner.bump();
            return Err(self.error(
                ErrorKind::MalformedArgument,
                "argument name contains an invalid character",
                opening,
            ));
        }
        let name = name.to_string();
        self.scanner.bump_space();

        match self.scanner.current() {
            None => Err(self.error(
                ErrorKind::ExpectArgumentClosingBrace,
                "expected `}` to close the argument",
                opening,
            )),
            Some('}') => {
                self.scanner.bump();
                Ok(Element::Argument(ArgumentElement {
                    value: name,
                    location: self.capture(opening),
                }))
            }
            Some(',') => {
                self.scanner.bump();
                self.scanner.bump_space();
                if self.scanner.is_eof() {
                    return Err(self.error(
                        ErrorKind::ExpectArgumentClosingBrace,
                        "expected `}` to close the argument",
                        opening,
                    ));
                }
                self.parse_argument_options(frame, name, opening)
            }
            Some(_) => {
                self.scanner.bump();
                Err(self.error(
                    ErrorKind::MalformedArgument,
                    format!("argument `{name}` is malformed"),
                    opening,
                ))
            }
        }
    }

    fn parse_argument_options(
        &mut self,
        frame: Frame,
        name: String,
        opening: LocationDetails,
    ) -> ParseResult<Element> {
        let (argument_type, type_location) = self.scanner.scan_identifier();
        match argument_type {
            "" => Err(ParseError::new(
                ErrorKind::ExpectArgumentType,
                format!("expected a type for argument `{name}`"),
                type_location,
            )),
            "number" => self.parse_formatted_argument(FormattedKind::Number, name, opening),
            "date" => self.parse_formatted_argument(FormattedKind::Date, name, opening),
            "time" => self.parse_formatted_argument(FormattedKind::Time, name, opening),
            "plural" => self.parse_plural_or_select(frame, OptionsKind::Plural(PluralType::Cardinal), name, opening),
            "selectordinal" => {
                self.parse_plural_or_select(frame, OptionsKind::Plural(PluralType::Ordinal), name, opening)
            }
            "select" => self.parse_plural_or_select(frame, OptionsKind::Select, name, opening),
            other => Err(ParseError::new(
                ErrorKind::InvalidArgumentType,
                format!("`{other}` is not a valid argument type"),
                type_location,
            )),
        }
    }

    /// `number`, `date` and `time` arguments with an optional style.
    fn parse_formatted_argument(
        &mut self,
        kind: FormattedKind,
        name: String,
        opening: LocationDetails,
    ) -> ParseResult<Element> {
        self.scanner.bump_space();
        let mut style = None;
        if self.scanner.bump_if_char(',') {
            self.scanner.bump_space();
            let style_start = self.scanner.position();
            let text = self.parse_simple_style()?.trim_end();
            if text.is_empty() {
                let here = self.scanner.position();
                return Err(self.error(ErrorKind::ExpectArgumentStyle, "expected an argument style", here));
            }
            style = Some((text, self.scanner.location_from(style_start)));
        }
        self.expect_argument_close(opening)?;
        let location = self.capture(opening);

        let element = match kind {
            FormattedKind::Number => {
                let style = match style {
                    None => None,
                    Some((text, style_location)) => Some(match text.strip_prefix("::") {
                        Some(skeleton) => NumberStyle::Skeleton(self.parse_number_skeleton(skeleton, style_location)?),
                        None => NumberStyle::Simple {
                            value: text.to_string(),
                        },
                    }),
                };
                Element::Number(NumberElement {
                    value: name,
                    style,
                    location,
                })
            }
            FormattedKind::Date | FormattedKind::Time => {
                let style = match style {
                    None => None,
                    Some((text, style_location)) => Some(match text.strip_prefix("::") {
                        Some(skeleton) => {
                            DateTimeStyle::Skeleton(self.parse_date_time_skeleton(skeleton, style_location)?)
                        }
                        None => DateTimeStyle::Simple {
                            value: text.to_string(),
                        },
                    }),
                };
                let element = DateTimeElement {
                    value: name,
                    style,
                    location,
                };
                if kind == FormattedKind::Date {
                    Element::Date(element)
                } else {
                    Element::Time(element)
                }
            }
        };
        Ok(element)
    }

    /// Reads style text up to the `}` closing the argument, skipping over
    /// nested braces and quoted runs.
    fn parse_simple_style(&mut self) -> ParseResult<&'a str> {
        let start = self.scanner.offset();
        let mut nested_braces = 0usize;
        while let Some(ch) = self.scanner.current() {
            match ch {
                '\'' => {
                    self.scanner.bump();
                    let apostrophe = self.scanner.position();
                    if !self.scanner.bump_until('\'') {
                        return Err(self.error(
                            ErrorKind::UnclosedQuoteInArgumentStyle,
                            "unclosed quote in argument style",
                            apostrophe,
                        ));
                    }
                    self.scanner.bump();
                }
                '{' => {
                    nested_braces += 1;
                    self.scanner.bump();
                }
                '}' if nested_braces > 0 => {
                    nested_braces -= 1;
                    self.scanner.bump();
                }
                '}' => break,
                _ => {
                    self.scanner.bump();
                }
            }
        }
        Ok(self.scanner.slice_from(start))
    }

    fn parse_number_skeleton(&self, skeleton: &str, location: Location) -> ParseResult<NumberSkeleton> {
        let skeleton = skeleton.trim_start();
        if skeleton.is_empty() {
            return Err(ParseError::new(
                ErrorKind::ExpectNumberSkeleton,
                "expected a number skeleton after `::`",
                location,
            ));
        }
        trace!(skeleton, "parsing number skeleton");
        let invalid = |err: NumberSkeletonError| {
            ParseError::with_cause(
                ErrorKind::InvalidNumberSkeleton,
                format!("invalid number skeleton `{skeleton}`"),
                location,
                err,
            )
        };
        let tokens = parse_number_skeleton_tokens(skeleton).map_err(invalid)?;
        let parsed_options = if self.options.should_parse_skeletons {
            parse_number_skeleton(&tokens).map_err(invalid)?
        } else {
            NumberFormatOptions::default()
        };
        Ok(NumberSkeleton {
            tokens,
            parsed_options,
            location: self.options.capture_location.then_some(location),
        })
    }

    fn parse_date_time_skeleton(&self, skeleton: &str, location: Location) -> ParseResult<DateTimeSkeleton> {
        let skeleton = skeleton.trim_start();
        if skeleton.is_empty() {
            return Err(ParseError::new(
                ErrorKind::ExpectDateTimeSkeleton,
                "expected a date/time skeleton after `::`",
                location,
            ));
        }
        trace!(skeleton, "parsing date/time skeleton");
        let parsed_options = if self.options.should_parse_skeletons {
            parse_date_time_skeleton(skeleton).map_err(|err| {
                ParseError::with_cause(
                    ErrorKind::InvalidDateTimeSkeleton,
                    format!("invalid date/time skeleton `{skeleton}`"),
                    location,
                    err,
                )
            })?
        } else {
            DateTimeFormatOptions::default()
        };
        Ok(DateTimeSkeleton {
            pattern: skeleton.to_string(),
            parsed_options,
            location: self.options.capture_location.then_some(location),
        })
    }

    fn parse_plural_or_select(
        &mut self,
        frame: Frame,
        kind: OptionsKind,
        name: String,
        opening: LocationDetails,
    ) -> ParseResult<Element> {
        let type_end = self.scanner.position();
        self.scanner.bump_space();
        if !self.scanner.bump_if_char(',') {
            return Err(ParseError::new(
                ErrorKind::ExpectSelectArgumentOptions,
                format!("expected `,` followed by options for argument `{name}`"),
                Location::new(type_end, type_end),
            ));
        }
        self.scanner.bump_space();

        let mut selector = self.scanner.scan_identifier();
        let mut offset = 0;
        if !kind.is_select() && selector.0 == "offset" {
            if !self.scanner.bump_if_char(':') {
                let here = self.scanner.position();
                return Err(self.error(
                    ErrorKind::ExpectPluralArgumentOffsetValue,
                    "expected `:` and a number after `offset`",
                    here,
                ));
            }
            self.scanner.bump_space();
            let (value, location) = self.parse_decimal_integer(
                ErrorKind::ExpectPluralArgumentOffsetValue,
                ErrorKind::InvalidPluralArgumentOffsetValue,
            )?;
            offset = u32::try_from(value).map_err(|_| {
                ParseError::new(
                    ErrorKind::InvalidPluralArgumentOffsetValue,
                    format!("plural offset `{value}` must be a non-negative 32-bit integer"),
                    location,
                )
            })?;
            self.scanner.bump_space();
            selector = self.scanner.scan_identifier();
        }

        let options = self.parse_plural_or_select_options(frame, kind, selector)?;
        self.expect_argument_close(opening)?;
        let location = self.capture(opening);

        Ok(match kind {
            OptionsKind::Select => Element::Select(SelectElement {
                value: name,
                options,
                location,
            }),
            OptionsKind::Plural(plural_type) => Element::Plural(PluralElement {
                value: name,
                plural_type,
                offset,
                options,
                location,
            }),
        })
    }

    fn parse_plural_or_select_options(
        &mut self,
        frame: Frame,
        kind: OptionsKind,
        first: (&'a str, Location),
    ) -> ParseResult<Vec<PluralOrSelectOption>> {
        let options_start = first.1.start();
        let (mut selector, mut selector_location) = (first.0.to_string(), first.1);
        let mut seen = BTreeSet::new();
        let mut has_other = false;
        let mut options = Vec::new();

        loop {
            if selector.is_empty() {
                let start = self.scanner.position();
                if kind.is_select() || !self.scanner.bump_if_char('=') {
                    break;
                }
                self.parse_decimal_integer(
                    ErrorKind::ExpectPluralArgumentSelector,
                    ErrorKind::InvalidPluralArgumentSelector,
                )?;
                selector_location = self.scanner.location_from(start);
                selector = self.scanner.slice_from(start.offset).to_string();
            }

            if seen.contains(&selector) {
                let kind = if kind.is_select() {
                    ErrorKind::DuplicateSelectArgumentSelector
                } else {
                    ErrorKind::DuplicatePluralArgumentSelector
                };
                return Err(ParseError::new(
                    kind,
                    format!("duplicate selector `{selector}`"),
                    selector_location,
                ));
            }
            if selector == "other" {
                has_other = true;
            }

            self.scanner.bump_space();
            let fragment_start = self.scanner.position();
            if !self.scanner.bump_if_char('{') {
                let error_kind = if kind.is_select() {
                    ErrorKind::ExpectSelectArgumentSelectorFragment
                } else {
                    ErrorKind::ExpectPluralArgumentSelectorFragment
                };
                return Err(ParseError::new(
                    error_kind,
                    format!("expected `{{` after selector `{selector}`"),
                    Location::new(fragment_start, fragment_start),
                ));
            }

            let depth = self.enter(frame.depth, fragment_start)?;
            let value = self.parse_message(Frame {
                depth,
                in_plural: !kind.is_select(),
                in_fragment: true,
            })?;
            self.expect_argument_close(fragment_start)?;

            options.push(PluralOrSelectOption {
                selector: selector.clone(),
                value,
                location: self.capture(fragment_start),
            });
            seen.insert(selector);

            self.scanner.bump_space();
            let (next, next_location) = self.scanner.scan_identifier();
            selector = next.to_string();
            selector_location = next_location;
        }

        let here = self.scanner.position();
        if options.is_empty() {
            let error_kind = if kind.is_select() {
                ErrorKind::ExpectSelectArgumentSelector
            } else {
                ErrorKind::ExpectPluralArgumentSelector
            };
            return Err(ParseError::new(
                error_kind,
                "expected at least one selector",
                Location::new(here, here),
            ));
        }
        if self.options.requires_other_clause && !has_other {
            return Err(ParseError::new(
                ErrorKind::MissingOtherClause,
                "an `other` option is required",
                Location::new(options_start, here),
            ));
        }
        Ok(options)
    }

    /// Reads an optionally signed decimal integer.
    fn parse_decimal_integer(&mut self, expect: ErrorKind, invalid: ErrorKind) -> ParseResult<(i64, Location)> {
        let start = self.scanner.position();
        let negative = if self.scanner.bump_if_char('+') {
            false
        } else {
            self.scanner.bump_if_char('-')
        };

        let mut value = Some(0i64);
        let mut has_digits = false;
        while let Some(digit) = self.scanner.current().and_then(|ch| ch.to_digit(10)) {
            has_digits = true;
            value = value
                .and_then(|value| value.checked_mul(10))
                .and_then(|value| value.checked_add(i64::from(digit)));
            self.scanner.bump();
        }

        let location = self.scanner.location_from(start);
        if !has_digits {
            return Err(ParseError::new(expect, "expected an integer", location));
        }
        let value = value.ok_or_else(|| ParseError::new(invalid, "integer is out of range", location))?;
        Ok((if negative { -value } else { value }, location))
    }

    fn parse_tag(&mut self, frame: Frame) -> ParseResult<Element> {
        let start = self.scanner.position();
        self.scanner.bump();
        let name = self.scanner.scan_tag_name().to_string();

        if let Some(ch) = self.scanner.current()
            && !is_white_space(ch)
            && ch != '/'
            && ch != '>'
        {
            self.scanner.bump();
            return Err(self.error(
                ErrorKind::InvalidTagName,
                format!("invalid character `{ch}` in tag name `{name}`"),
                start,
            ));
        }
        self.scanner.bump_space();

        if self.scanner.bump_if("/>") {
            return Ok(Element::Literal(LiteralElement {
                value: format!("<{name}/>"),
                location: self.capture(start),
            }));
        }
        if !self.scanner.bump_if_char('>') {
            return Err(self.error(
                ErrorKind::InvalidTag,
                format!("expected `>` to close the opening tag `<{name}`"),
                start,
            ));
        }

        let depth = self.enter(frame.depth, start)?;
        self.open_tags.push(name.clone());
        let children = self.parse_message(Frame { depth, ..frame })?;
        self.open_tags.pop();

        let end_tag_start = self.scanner.position();
        if !self.scanner.bump_if("</") {
            return Err(self.error(
                ErrorKind::UnclosedTag,
                format!("tag `<{name}>` is never closed"),
                start,
            ));
        }
        if !self.scanner.current().is_some_and(|ch| ch.is_ascii_alphabetic()) {
            return Err(self.error(
                ErrorKind::InvalidTag,
                "expected a tag name after `</`",
                end_tag_start,
            ));
        }
        let closing_start = self.scanner.position();
        let closing = self.scanner.scan_tag_name();
        if closing != name {
            return Err(self.error(
                ErrorKind::UnmatchedClosingTag,
                format!("closing tag `</{closing}>` does not match `<{name}>`"),
                closing_start,
            ));
        }
        self.scanner.bump_space();
        if !self.scanner.bump_if_char('>') {
            return Err(self.error(
                ErrorKind::InvalidTag,
                format!("expected `>` to close the closing tag `</{name}`"),
                end_tag_start,
            ));
        }

        Ok(Element::Tag(TagElement {
            value: name,
            children,
            location: self.capture(start),
        }))
    }

    fn expect_argument_close(&mut self, opening: LocationDetails) -> ParseResult<()> {
        if self.scanner.bump_if_char('}') {
            Ok(())
        } else {
            Err(self.error(
                ErrorKind::ExpectArgumentClosingBrace,
                "expected `}` to close the argument",
                opening,
            ))
        }
    }

    /// Depth for a nested message starting at `start`.
    fn enter(&self, depth: usize, start: LocationDetails) -> ParseResult<usize> {
        let depth = depth + 1;
        if depth > self.options.max_nesting_depth {
            return Err(self.error(
                ErrorKind::NestingLimitExceeded,
                format!("message nesting exceeds {} levels", self.options.max_nesting_depth),
                start,
            ));
        }
        Ok(depth)
    }

    fn capture(&self, start: LocationDetails) -> Option<Location> {
        self.options
            .capture_location
            .then(|| self.scanner.location_from(start))
    }

    /// An error spanning from `start` to the current position.
    fn error(&self, kind: ErrorKind, message: impl Into<String>, start: LocationDetails) -> ParseError {
        ParseError::new(kind, message, self.scanner.location_from(start))
    }
}
