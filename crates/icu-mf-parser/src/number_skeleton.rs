//! Number skeletons: the `::`-prefixed style of `{n, number, ::...}` arguments.
//!
//! A skeleton is a whitespace separated list of stems, each optionally followed
//! by `/`-separated options (`currency/EUR`, `.00/w`). Stems are interpreted into
//! [`NumberFormatOptions`], which mirror the option bag of `Intl.NumberFormat`.
//! Every stem must be understood; unknown stems are rejected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NumberSkeletonToken {
    pub stem: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberSkeletonError {
    #[error("number skeleton is empty")]
    Empty,
    #[error("number skeleton token `{0}` has an empty option")]
    EmptyOption(String),
    #[error("unknown number skeleton stem `{0}`")]
    UnknownStem(String),
    #[error("stem `{0}` requires an option")]
    MissingOption(String),
    #[error("stem `{0}` does not accept options")]
    UnexpectedOption(String),
    #[error("stem `{stem}` accepts at most one option")]
    TooManyOptions { stem: String },
    #[error("invalid option `{option}` for stem `{stem}`")]
    InvalidOption { stem: String, option: String },
    #[error("malformed concise notation `{0}`")]
    MalformedConciseNotation(String),
    #[error("unsupported integer width `{0}`")]
    UnsupportedIntegerWidth(String),
}

pub type NumberSkeletonResult<T> = Result<T, NumberSkeletonError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberFormatStyle {
    Percent,
    Currency,
    Unit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Notation {
    Standard,
    Scientific,
    Engineering,
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompactDisplay {
    Short,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CurrencyDisplay {
    Symbol,
    NarrowSymbol,
    Code,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnitDisplay {
    Short,
    Narrow,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignDisplay {
    Auto,
    Always,
    ExceptZero,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CurrencySign {
    Standard,
    Accounting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundingMode {
    Ceil,
    Floor,
    Expand,
    Trunc,
    HalfCeil,
    HalfFloor,
    HalfExpand,
    HalfTrunc,
    HalfEven,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundingPriority {
    Auto,
    MorePrecision,
    LessPrecision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrailingZeroDisplay {
    Auto,
    StripIfInteger,
}

/// Structured result of interpreting a number skeleton.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberFormatOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<NumberFormatStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_grouping: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notation: Option<Notation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compact_display: Option<CompactDisplay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_display: Option<CurrencyDisplay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_display: Option<UnitDisplay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign_display: Option<SignDisplay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_sign: Option<CurrencySign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounding_mode: Option<RoundingMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounding_priority: Option<RoundingPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_zero_display: Option<TrailingZeroDisplay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_integer_digits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_fraction_digits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_fraction_digits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_significant_digits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_significant_digits: Option<u32>,
}

/// Splits a skeleton into stems and their options.
pub fn parse_number_skeleton_tokens(skeleton: &str) -> NumberSkeletonResult<Vec<NumberSkeletonToken>> {
    let mut tokens = Vec::new();
    for raw in skeleton.split(char::is_whitespace).filter(|part| !part.is_empty()) {
        let mut parts = raw.split('/');
        let stem = parts.next().unwrap_or_default().to_string();
        let mut options = Vec::new();
        for option in parts {
            if option.is_empty() {
                return Err(NumberSkeletonError::EmptyOption(raw.to_string()));
            }
            options.push(option.to_string());
        }
        tokens.push(NumberSkeletonToken { stem, options });
    }
    if tokens.is_empty() {
        return Err(NumberSkeletonError::Empty);
    }
    Ok(tokens)
}

/// Interprets tokens produced by [`parse_number_skeleton_tokens`].
pub fn parse_number_skeleton(tokens: &[NumberSkeletonToken]) -> NumberSkeletonResult<NumberFormatOptions> {
    let mut result = NumberFormatOptions::default();
    for token in tokens {
        apply_token(&mut result, token)?;
    }
    Ok(result)
}

fn apply_token(result: &mut NumberFormatOptions, token: &NumberSkeletonToken) -> NumberSkeletonResult<()> {
    let stem = token.stem.as_str();
    match stem {
        "percent" | "%" => {
            no_options(token)?;
            result.style = Some(NumberFormatStyle::Percent);
        }
        "%x100" => {
            no_options(token)?;
            result.style = Some(NumberFormatStyle::Percent);
            result.scale = Some(100.0);
        }
        "currency" => {
            let code = single_option(token)?;
            result.style = Some(NumberFormatStyle::Currency);
            result.currency = Some(code.to_string());
        }
        "group-off" | ",_" => {
            no_options(token)?;
            result.use_grouping = Some(false);
        }
        "precision-integer" | "." => {
            no_options(token)?;
            result.maximum_fraction_digits = Some(0);
        }
        "measure-unit" | "unit" => {
            let unit = single_option(token)?;
            // Drop the unit type prefix: `length-meter` is `meter`.
            let unit = unit.split_once('-').map_or(unit, |(_, rest)| rest);
            result.style = Some(NumberFormatStyle::Unit);
            result.unit = Some(unit.to_string());
        }
        "compact-short" | "K" => {
            no_options(token)?;
            result.notation = Some(Notation::Compact);
            result.compact_display = Some(CompactDisplay::Short);
        }
        "compact-long" | "KK" => {
            no_options(token)?;
            result.notation = Some(Notation::Compact);
            result.compact_display = Some(CompactDisplay::Long);
        }
        "scientific" | "engineering" => {
            result.notation = Some(if stem == "scientific" {
                Notation::Scientific
            } else {
                Notation::Engineering
            });
            for option in &token.options {
                let sign = parse_sign(option).ok_or_else(|| invalid_option(token, option))?;
                sign.apply(result);
            }
        }
        "notation-simple" => {
            no_options(token)?;
            result.notation = Some(Notation::Standard);
        }
        "unit-width-narrow" => {
            no_options(token)?;
            result.currency_display = Some(CurrencyDisplay::NarrowSymbol);
            result.unit_display = Some(UnitDisplay::Narrow);
        }
        "unit-width-short" => {
            no_options(token)?;
            result.currency_display = Some(CurrencyDisplay::Code);
            result.unit_display = Some(UnitDisplay::Short);
        }
        "unit-width-full-name" => {
            no_options(token)?;
            result.currency_display = Some(CurrencyDisplay::Name);
            result.unit_display = Some(UnitDisplay::Long);
        }
        "unit-width-iso-code" => {
            no_options(token)?;
            result.currency_display = Some(CurrencyDisplay::Symbol);
        }
        "scale" => {
            let option = single_option(token)?;
            let scale = option
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| invalid_option(token, option))?;
            result.scale = Some(scale);
        }
        "rounding-mode-floor" => set_rounding_mode(result, token, RoundingMode::Floor)?,
        "rounding-mode-ceiling" => set_rounding_mode(result, token, RoundingMode::Ceil)?,
        "rounding-mode-down" => set_rounding_mode(result, token, RoundingMode::Trunc)?,
        "rounding-mode-up" => set_rounding_mode(result, token, RoundingMode::Expand)?,
        "rounding-mode-half-even" => set_rounding_mode(result, token, RoundingMode::HalfEven)?,
        "rounding-mode-half-down" => set_rounding_mode(result, token, RoundingMode::HalfTrunc)?,
        "rounding-mode-half-up" => set_rounding_mode(result, token, RoundingMode::HalfExpand)?,
        "integer-width" => {
            let option = single_option(token)?;
            result.minimum_integer_digits = Some(parse_integer_width(token, option)?);
        }
        _ => apply_pattern_stem(result, token)?,
    }
    Ok(())
}

/// Stems that are patterns rather than keywords: `000`, `.00`, `@@#`, `+!`, `E0`.
fn apply_pattern_stem(result: &mut NumberFormatOptions, token: &NumberSkeletonToken) -> NumberSkeletonResult<()> {
    let stem = token.stem.as_str();

    if is_all(stem, '0') {
        no_options(token)?;
        result.minimum_integer_digits = Some(count(stem));
        return Ok(());
    }

    if let Some(fraction) = stem.strip_prefix('.') {
        let precision = parse_fraction_precision(fraction)
            .ok_or_else(|| NumberSkeletonError::UnknownStem(stem.to_string()))?;
        if token.options.len() > 1 {
            return Err(NumberSkeletonError::TooManyOptions {
                stem: stem.to_string(),
            });
        }
        result.minimum_fraction_digits = precision.min;
        result.maximum_fraction_digits = precision.max;
        if let Some(option) = token.options.first() {
            if option == "w" {
                result.trailing_zero_display = Some(TrailingZeroDisplay::StripIfInteger);
            } else {
                let significant =
                    parse_significant_precision(option).ok_or_else(|| invalid_option(token, option))?;
                significant.apply(result);
            }
        }
        return Ok(());
    }

    if let Some(significant) = parse_significant_precision(stem) {
        no_options(token)?;
        significant.apply(result);
        return Ok(());
    }

    if let Some(sign) = parse_sign(stem) {
        no_options(token)?;
        sign.apply(result);
        return Ok(());
    }

    if stem.starts_with('E') {
        no_options(token)?;
        return parse_concise_notation(result, stem);
    }

    Err(NumberSkeletonError::UnknownStem(stem.to_string()))
}

fn set_rounding_mode(
    result: &mut NumberFormatOptions,
    token: &NumberSkeletonToken,
    mode: RoundingMode,
) -> NumberSkeletonResult<()> {
    no_options(token)?;
    result.rounding_mode = Some(mode);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SignOptions {
    display: Option<SignDisplay>,
    currency_sign: Option<CurrencySign>,
}

impl SignOptions {
    fn apply(self, result: &mut NumberFormatOptions) {
        if let Some(display) = self.display {
            result.sign_display = Some(display);
        }
        if let Some(sign) = self.currency_sign {
            result.currency_sign = Some(sign);
        }
    }
}

fn parse_sign(stem: &str) -> Option<SignOptions> {
    let (display, currency_sign) = match stem {
        "sign-auto" => (Some(SignDisplay::Auto), None),
        "sign-accounting" | "()" => (None, Some(CurrencySign::Accounting)),
        "sign-always" | "+!" => (Some(SignDisplay::Always), None),
        "sign-accounting-always" | "()!" => (Some(SignDisplay::Always), Some(CurrencySign::Accounting)),
        "sign-except-zero" | "+?" => (Some(SignDisplay::ExceptZero), None),
        "sign-accounting-except-zero" | "()?" => (Some(SignDisplay::ExceptZero), Some(CurrencySign::Accounting)),
        "sign-never" | "+_" => (Some(SignDisplay::Never), None),
        _ => return None,
    };
    Some(SignOptions {
        display,
        currency_sign,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FractionPrecision {
    min: Option<u32>,
    max: Option<u32>,
}

/// `00` exact, `0*` minimum, `##` maximum, `00##` range.
fn parse_fraction_precision(pattern: &str) -> Option<FractionPrecision> {
    if let Some(zeros) = pattern.strip_suffix('*') {
        return is_all(zeros, '0').then(|| FractionPrecision {
            min: Some(count(zeros)),
            max: None,
        });
    }
    if is_all(pattern, '#') {
        return Some(FractionPrecision {
            min: None,
            max: Some(count(pattern)),
        });
    }
    let zeros = pattern.len() - pattern.trim_start_matches('0').len();
    let (leading, rest) = pattern.split_at(zeros);
    if leading.is_empty() {
        return None;
    }
    if rest.is_empty() {
        let digits = count(leading);
        return Some(FractionPrecision {
            min: Some(digits),
            max: Some(digits),
        });
    }
    is_all(rest, '#').then(|| FractionPrecision {
        min: Some(count(leading)),
        max: Some(count(leading) + count(rest)),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SignificantPrecision {
    min: u32,
    max: Option<u32>,
    priority: Option<RoundingPriority>,
}

impl SignificantPrecision {
    fn apply(self, result: &mut NumberFormatOptions) {
        result.minimum_significant_digits = Some(self.min);
        if let Some(max) = self.max {
            result.maximum_significant_digits = Some(max);
        }
        if let Some(priority) = self.priority {
            result.rounding_priority = Some(priority);
        }
    }
}

/// `@@` exact, `@+` minimum, `@@##` range; a trailing `r` or `s` picks the
/// rounding priority when combined with fraction precision.
fn parse_significant_precision(pattern: &str) -> Option<SignificantPrecision> {
    let (pattern, priority) = if let Some(rest) = pattern.strip_suffix('r') {
        (rest, Some(RoundingPriority::MorePrecision))
    } else if let Some(rest) = pattern.strip_suffix('s') {
        (rest, Some(RoundingPriority::LessPrecision))
    } else {
        (pattern, None)
    };
    let at = pattern.len() - pattern.trim_start_matches('@').len();
    if at == 0 {
        return None;
    }
    let (leading, rest) = pattern.split_at(at);
    let min = count(leading);
    let max = match rest {
        "" => Some(min),
        "+" => None,
        hashes if is_all(hashes, '#') => Some(min + count(hashes)),
        _ => return None,
    };
    Some(SignificantPrecision { min, max, priority })
}

/// `E0`, `EE00`, `E+!00`, `EE+?0`.
fn parse_concise_notation(result: &mut NumberFormatOptions, stem: &str) -> NumberSkeletonResult<()> {
    let (notation, rest) = if let Some(rest) = stem.strip_prefix("EE") {
        (Notation::Engineering, rest)
    } else if let Some(rest) = stem.strip_prefix('E') {
        (Notation::Scientific, rest)
    } else {
        return Err(NumberSkeletonError::MalformedConciseNotation(stem.to_string()));
    };
    let (display, rest) = if let Some(rest) = rest.strip_prefix("+!") {
        (Some(SignDisplay::Always), rest)
    } else if let Some(rest) = rest.strip_prefix("+?") {
        (Some(SignDisplay::ExceptZero), rest)
    } else {
        (None, rest)
    };
    if !is_all(rest, '0') {
        return Err(NumberSkeletonError::MalformedConciseNotation(stem.to_string()));
    }
    result.notation = Some(notation);
    if display.is_some() {
        result.sign_display = display;
    }
    result.minimum_integer_digits = Some(count(rest));
    Ok(())
}

/// Only the open ended `*000` (or `+000`) form maps onto a minimum digit count.
fn parse_integer_width(token: &NumberSkeletonToken, option: &str) -> NumberSkeletonResult<u32> {
    if let Some(zeros) = option.strip_prefix('*').or_else(|| option.strip_prefix('+')) {
        if is_all(zeros, '0') {
            return Ok(count(zeros));
        }
        return Err(invalid_option(token, option));
    }
    let hashes = option.len() - option.trim_start_matches('#').len();
    let rest = &option[hashes..];
    if is_all(rest, '0') {
        // Maximum and exact integer widths have no counterpart in the options.
        return Err(NumberSkeletonError::UnsupportedIntegerWidth(option.to_string()));
    }
    Err(invalid_option(token, option))
}

fn no_options(token: &NumberSkeletonToken) -> NumberSkeletonResult<()> {
    if token.options.is_empty() {
        Ok(())
    } else {
        Err(NumberSkeletonError::UnexpectedOption(token.stem.clone()))
    }
}

fn single_option(token: &NumberSkeletonToken) -> NumberSkeletonResult<&str> {
    match token.options.as_slice() {
        [] => Err(NumberSkeletonError::MissingOption(token.stem.clone())),
        [option] => Ok(option.as_str()),
        _ => Err(NumberSkeletonError::TooManyOptions {
            stem: token.stem.clone(),
        }),
    }
}

fn invalid_option(token: &NumberSkeletonToken, option: &str) -> NumberSkeletonError {
    NumberSkeletonError::InvalidOption {
        stem: token.stem.clone(),
        option: option.to_string(),
    }
}

fn is_all(value: &str, ch: char) -> bool {
    !value.is_empty() && value.chars().all(|c| c == ch)
}

fn count(value: &str) -> u32 {
    u32::try_from(value.chars().count()).unwrap_or(u32::MAX)
}
