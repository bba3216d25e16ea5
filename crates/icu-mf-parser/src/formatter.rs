use std::collections::BTreeMap;

use crate::ast::Element;

/// A value supplied for a message argument at format time.
#[derive(Clone, Debug, PartialEq)]
pub enum ArgumentValue {
    Str(String),
    Num(f64),
    Bool(bool),
    /// Milliseconds since the Unix epoch.
    DateTime(i64),
}

impl ArgumentValue {
    /// Key used to pick a `select` branch.
    pub fn selector(&self) -> String {
        match self {
            ArgumentValue::Str(text) => text.clone(),
            ArgumentValue::Num(number) => number.to_string(),
            ArgumentValue::Bool(value) => value.to_string(),
            ArgumentValue::DateTime(timestamp) => timestamp.to_string(),
        }
    }
}

impl From<&str> for ArgumentValue {
    fn from(value: &str) -> Self {
        ArgumentValue::Str(value.to_string())
    }
}

impl From<String> for ArgumentValue {
    fn from(value: String) -> Self {
        ArgumentValue::Str(value)
    }
}

impl From<f64> for ArgumentValue {
    fn from(value: f64) -> Self {
        ArgumentValue::Num(value)
    }
}

impl From<bool> for ArgumentValue {
    fn from(value: bool) -> Self {
        ArgumentValue::Bool(value)
    }
}

pub type ArgumentValues = BTreeMap<String, ArgumentValue>;

/// Turns a parsed message into text. The parser only produces the AST;
/// implementations own plural rules and number/date rendering.
pub trait Formatter {
    type Error: std::error::Error;

    fn format(&self, message: &[Element], values: &ArgumentValues, locale: Option<&str>) -> Result<String, Self::Error>;
}

#[cfg(test)]
mod tests {
    use thiserror::Error;

    use super::{ArgumentValue, ArgumentValues, Formatter};
    use crate::ast::Element;
    use crate::parser::parse_message;

    #[derive(Debug, Error, PartialEq)]
    enum TestFormatError {
        #[error("missing argument {0}")]
        Missing(String),
        #[error("no branch for {0}")]
        NoBranch(String),
    }

    /// Picks `=N`, then `one` for 1, then `other`.
    struct EnglishFormatter;

    impl EnglishFormatter {
        fn value<'a>(values: &'a ArgumentValues, name: &str) -> Result<&'a ArgumentValue, TestFormatError> {
            values.get(name).ok_or_else(|| TestFormatError::Missing(name.to_string()))
        }

        fn write(
            &self,
            out: &mut String,
            elements: &[Element],
            values: &ArgumentValues,
            pound: Option<f64>,
        ) -> Result<(), TestFormatError> {
            for element in elements {
                match element {
                    Element::Literal(literal) => out.push_str(&literal.value),
                    Element::Argument(argument) => out.push_str(&Self::value(values, &argument.value)?.selector()),
                    Element::Number(number) => out.push_str(&Self::value(values, &number.value)?.selector()),
                    Element::Date(date) | Element::Time(date) => {
                        out.push_str(&Self::value(values, &date.value)?.selector())
                    }
                    Element::Pound(_) => {
                        if let Some(number) = pound {
                            out.push_str(&number.to_string());
                        }
                    }
                    Element::Tag(tag) => {
                        out.push_str(&format!("[{}]", tag.value));
                        self.write(out, &tag.children, values, pound)?;
                        out.push_str(&format!("[/{}]", tag.value));
                    }
                    Element::Select(select) => {
                        let key = Self::value(values, &select.value)?.selector();
                        let option = select
                            .option(&key)
                            .or_else(|| select.option("other"))
                            .ok_or(TestFormatError::NoBranch(key))?;
                        self.write(out, &option.value, values, pound)?;
                    }
                    Element::Plural(plural) => {
                        let number = match Self::value(values, &plural.value)? {
                            ArgumentValue::Num(number) => *number,
                            other => return Err(TestFormatError::NoBranch(other.selector())),
                        };
                        let exact = format!("={number}");
                        let category = if number - f64::from(plural.offset) == 1.0 { "one" } else { "other" };
                        let option = plural
                            .option(&exact)
                            .or_else(|| plural.option(category))
                            .or_else(|| plural.option("other"))
                            .ok_or(TestFormatError::NoBranch(exact))?;
                        let shown = number - f64::from(plural.offset);
                        self.write(out, &option.value, values, Some(shown))?;
                    }
                }
            }
            Ok(())
        }
    }

    impl Formatter for EnglishFormatter {
        type Error = TestFormatError;

        fn format(
            &self,
            message: &[Element],
            values: &ArgumentValues,
            _locale: Option<&str>,
        ) -> Result<String, Self::Error> {
            let mut out = String::new();
            self.write(&mut out, message, values, None)?;
            Ok(out)
        }
    }

    #[test]
    fn formats_plural_and_select_branches() {
        let source = concat!(
            "{who, select, me {I have} other {{who} has}} ",
            "{n, plural, =0 {no files} one {# file} other {# files}}",
        );
        let message = parse_message(source).expect("parse");
        let mut values = ArgumentValues::new();
        values.insert("who".to_string(), "Ana".into());
        values.insert("n".to_string(), ArgumentValue::Num(1.0));
        let out = EnglishFormatter.format(&message.elements, &values, Some("en")).expect("format");
        assert_eq!(out, "Ana has 1 file");

        values.insert("who".to_string(), "me".into());
        values.insert("n".to_string(), ArgumentValue::Num(0.0));
        let out = EnglishFormatter.format(&message.elements, &values, Some("en")).expect("format");
        assert_eq!(out, "I have no files");
    }

    #[test]
    fn missing_values_surface_as_formatter_errors() {
        let message = parse_message("Hi <b>{name}</b>").expect("parse");
        let err = EnglishFormatter
            .format(&message.elements, &ArgumentValues::new(), None)
            .expect_err("missing");
        assert_eq!(err, TestFormatError::Missing("name".to_string()));
    }

    #[test]
    fn selector_uses_display_form() {
        assert_eq!(ArgumentValue::from(true).selector(), "true");
        assert_eq!(ArgumentValue::DateTime(5).selector(), "5");
        assert_eq!(ArgumentValue::from(2.5).selector(), "2.5");
    }
}
