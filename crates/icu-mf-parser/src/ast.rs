use serde::Serialize;

use crate::date_time_skeleton::DateTimeFormatOptions;
use crate::location::Location;
use crate::number_skeleton::{NumberFormatOptions, NumberSkeletonToken};

/// A successfully parsed message: its top-level nodes and the span of the
/// whole source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub elements: Vec<Element>,
    pub location: Location,
}

/// One node of a parsed message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Element {
    Literal(LiteralElement),
    Argument(ArgumentElement),
    Number(NumberElement),
    Date(DateTimeElement),
    Time(DateTimeElement),
    Select(SelectElement),
    Plural(PluralElement),
    Pound(PoundElement),
    Tag(TagElement),
}

impl Element {
    pub fn location(&self) -> Option<Location> {
        match self {
            Element::Literal(element) => element.location,
            Element::Argument(element) => element.location,
            Element::Number(element) => element.location,
            Element::Date(element) | Element::Time(element) => element.location,
            Element::Select(element) => element.location,
            Element::Plural(element) => element.location,
            Element::Pound(element) => element.location,
            Element::Tag(element) => element.location,
        }
    }

    /// The argument or tag name, if this node refers to one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Element::Argument(element) => Some(&element.value),
            Element::Number(element) => Some(&element.value),
            Element::Date(element) | Element::Time(element) => Some(&element.value),
            Element::Select(element) => Some(&element.value),
            Element::Plural(element) => Some(&element.value),
            Element::Tag(element) => Some(&element.value),
            Element::Literal(_) | Element::Pound(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiteralElement {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgumentElement {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberElement {
    pub value: String,
    pub style: Option<NumberStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NumberStyle {
    /// Free-form style such as `percent` or `integer`.
    Simple { value: String },
    Skeleton(NumberSkeleton),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberSkeleton {
    pub tokens: Vec<NumberSkeletonToken>,
    /// Empty when skeleton parsing is turned off.
    pub parsed_options: NumberFormatOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateTimeElement {
    pub value: String,
    pub style: Option<DateTimeStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DateTimeStyle {
    Simple { value: String },
    Skeleton(DateTimeSkeleton),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeSkeleton {
    pub pattern: String,
    /// Empty when skeleton parsing is turned off.
    pub parsed_options: DateTimeFormatOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PluralType {
    Cardinal,
    Ordinal,
}

/// One `selector {message}` branch of a plural or select argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluralOrSelectOption {
    pub selector: String,
    pub value: Vec<Element>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectElement {
    pub value: String,
    pub options: Vec<PluralOrSelectOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl SelectElement {
    pub fn option(&self, selector: &str) -> Option<&PluralOrSelectOption> {
        find_option(&self.options, selector)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluralElement {
    pub value: String,
    pub plural_type: PluralType,
    pub offset: u32,
    pub options: Vec<PluralOrSelectOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl PluralElement {
    pub fn option(&self, selector: &str) -> Option<&PluralOrSelectOption> {
        find_option(&self.options, selector)
    }
}

/// `#` inside plural content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoundElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagElement {
    pub value: String,
    pub children: Vec<Element>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

fn find_option<'a>(options: &'a [PluralOrSelectOption], selector: &str) -> Option<&'a PluralOrSelectOption> {
    options.iter().find(|option| option.selector == selector)
}
