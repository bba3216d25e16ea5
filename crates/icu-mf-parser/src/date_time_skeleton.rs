//! Date/time skeletons: runs of CLDR field letters such as `yMMMd` or `jms`.
//!
//! Each run of one letter is a field; its length selects the field width.
//! Quoted literal text (`'at'`) and white space are skipped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateTimeSkeletonError {
    #[error("date/time skeleton is empty")]
    Empty,
    #[error("unknown date/time field `{0}`")]
    UnknownField(char),
    #[error("`{field}` ({kind}) patterns are not supported{hint}")]
    UnsupportedField {
        field: char,
        kind: &'static str,
        hint: &'static str,
    },
    #[error("field `{field}` repeated {width} times, expected {min} to {max}")]
    InvalidWidth {
        field: char,
        width: usize,
        min: usize,
        max: usize,
    },
    #[error("{0} field appears more than once")]
    DuplicateField(&'static str),
    #[error("unclosed quote in date/time skeleton")]
    UnclosedQuote,
}

pub type DateTimeSkeletonResult<T> = Result<T, DateTimeSkeletonError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumericWidth {
    #[serde(rename = "numeric")]
    Numeric,
    #[serde(rename = "2-digit")]
    TwoDigit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonthWidth {
    #[serde(rename = "numeric")]
    Numeric,
    #[serde(rename = "2-digit")]
    TwoDigit,
    #[serde(rename = "short")]
    Short,
    #[serde(rename = "long")]
    Long,
    #[serde(rename = "narrow")]
    Narrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextWidth {
    Short,
    Long,
    Narrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeZoneNameWidth {
    Short,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HourCycle {
    H11,
    H12,
    H23,
    H24,
}

/// Field widths selected by a date/time skeleton, shaped like the option bag
/// of `Intl.DateTimeFormat`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeFormatOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub era: Option<TextWidth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<NumericWidth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<MonthWidth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<NumericWidth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday: Option<TextWidth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour12: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour_cycle: Option<HourCycle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<NumericWidth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute: Option<NumericWidth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second: Option<NumericWidth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone_name: Option<TimeZoneNameWidth>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Era,
    Year,
    Month,
    Day,
    Weekday,
    DayPeriod,
    Hour,
    Minute,
    Second,
    TimeZone,
}

impl Field {
    fn name(self) -> &'static str {
        match self {
            Field::Era => "era",
            Field::Year => "year",
            Field::Month => "month",
            Field::Day => "day",
            Field::Weekday => "weekday",
            Field::DayPeriod => "day period",
            Field::Hour => "hour",
            Field::Minute => "minute",
            Field::Second => "second",
            Field::TimeZone => "time zone",
        }
    }
}

pub fn parse_date_time_skeleton(skeleton: &str) -> DateTimeSkeletonResult<DateTimeFormatOptions> {
    let mut result = DateTimeFormatOptions::default();
    let mut seen: Vec<Field> = Vec::new();
    let mut chars = skeleton.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch.is_whitespace() {
            continue;
        }
        if ch == '\'' {
            skip_quoted(&mut chars)?;
            continue;
        }
        let mut width = 1;
        while chars.next_if_eq(&ch).is_some() {
            width += 1;
        }
        let field = apply_field(&mut result, ch, width)?;
        if seen.contains(&field) {
            return Err(DateTimeSkeletonError::DuplicateField(field.name()));
        }
        seen.push(field);
    }

    if seen.is_empty() {
        return Err(DateTimeSkeletonError::Empty);
    }
    Ok(result)
}

fn skip_quoted(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> DateTimeSkeletonResult<()> {
    while let Some(ch) = chars.next() {
        if ch == '\'' && chars.next_if_eq(&'\'').is_none() {
            return Ok(());
        }
    }
    Err(DateTimeSkeletonError::UnclosedQuote)
}

fn apply_field(result: &mut DateTimeFormatOptions, ch: char, width: usize) -> DateTimeSkeletonResult<Field> {
    match ch {
        'G' => {
            check_width(ch, width, 1, 5)?;
            result.era = Some(match width {
                4 => TextWidth::Long,
                5 => TextWidth::Narrow,
                _ => TextWidth::Short,
            });
            Ok(Field::Era)
        }
        'y' => {
            check_width(ch, width, 1, 4)?;
            result.year = Some(if width == 2 {
                NumericWidth::TwoDigit
            } else {
                NumericWidth::Numeric
            });
            Ok(Field::Year)
        }
        'M' | 'L' => {
            check_width(ch, width, 1, 5)?;
            result.month = Some(match width {
                1 => MonthWidth::Numeric,
                2 => MonthWidth::TwoDigit,
                3 => MonthWidth::Short,
                4 => MonthWidth::Long,
                _ => MonthWidth::Narrow,
            });
            Ok(Field::Month)
        }
        'd' => {
            check_width(ch, width, 1, 2)?;
            result.day = Some(numeric(width));
            Ok(Field::Day)
        }
        'E' => {
            check_width(ch, width, 1, 6)?;
            result.weekday = Some(match width {
                4 => TextWidth::Long,
                5 => TextWidth::Narrow,
                _ => TextWidth::Short,
            });
            Ok(Field::Weekday)
        }
        'e' | 'c' => {
            if width < 4 {
                return Err(DateTimeSkeletonError::UnsupportedField {
                    field: ch,
                    kind: "numeric weekday",
                    hint: ", use `E` instead",
                });
            }
            check_width(ch, width, 4, 6)?;
            result.weekday = Some(match width {
                4 => TextWidth::Long,
                5 => TextWidth::Narrow,
                _ => TextWidth::Short,
            });
            Ok(Field::Weekday)
        }
        'a' => {
            check_width(ch, width, 1, 5)?;
            result.hour12 = Some(true);
            Ok(Field::DayPeriod)
        }
        'h' | 'H' | 'K' | 'k' => {
            check_width(ch, width, 1, 2)?;
            result.hour_cycle = Some(match ch {
                'h' => HourCycle::H12,
                'H' => HourCycle::H23,
                'K' => HourCycle::H11,
                _ => HourCycle::H24,
            });
            result.hour = Some(numeric(width));
            Ok(Field::Hour)
        }
        // Locale preferred hour cycle; resolved by the formatter.
        'j' | 'J' | 'C' => {
            check_width(ch, width, 1, 2)?;
            result.hour = Some(numeric(width));
            Ok(Field::Hour)
        }
        'm' => {
            check_width(ch, width, 1, 2)?;
            result.minute = Some(numeric(width));
            Ok(Field::Minute)
        }
        's' => {
            check_width(ch, width, 1, 2)?;
            result.second = Some(numeric(width));
            Ok(Field::Second)
        }
        'z' => {
            check_width(ch, width, 1, 4)?;
            result.time_zone_name = Some(if width < 4 {
                TimeZoneNameWidth::Short
            } else {
                TimeZoneNameWidth::Long
            });
            Ok(Field::TimeZone)
        }
        _ => Err(unsupported(ch)),
    }
}

fn unsupported(ch: char) -> DateTimeSkeletonError {
    let (kind, hint) = match ch {
        'Y' | 'u' | 'U' | 'r' => ("year", ", use `y` instead"),
        'q' | 'Q' => ("quarter", ""),
        'w' | 'W' => ("week", ""),
        'D' | 'F' | 'g' => ("day", ", use `d` instead"),
        'b' | 'B' => ("period", ", use `a` instead"),
        'S' | 'A' => ("second", ", use `s` instead"),
        'Z' | 'O' | 'v' | 'V' | 'X' | 'x' => ("time zone", ", use `z` instead"),
        _ => return DateTimeSkeletonError::UnknownField(ch),
    };
    DateTimeSkeletonError::UnsupportedField {
        field: ch,
        kind,
        hint,
    }
}

fn check_width(field: char, width: usize, min: usize, max: usize) -> DateTimeSkeletonResult<()> {
    if (min..=max).contains(&width) {
        Ok(())
    } else {
        Err(DateTimeSkeletonError::InvalidWidth {
            field,
            width,
            min,
            max,
        })
    }
}

fn numeric(width: usize) -> NumericWidth {
    if width == 2 {
        NumericWidth::TwoDigit
    } else {
        NumericWidth::Numeric
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DateTimeFormatOptions, DateTimeSkeletonError, HourCycle, MonthWidth, NumericWidth, TextWidth,
        TimeZoneNameWidth, parse_date_time_skeleton,
    };

    #[test]
    fn parses_year_month_day() {
        let options = parse_date_time_skeleton("yMMMd").expect("options");
        assert_eq!(
            options,
            DateTimeFormatOptions {
                year: Some(NumericWidth::Numeric),
                month: Some(MonthWidth::Short),
                day: Some(NumericWidth::Numeric),
                ..DateTimeFormatOptions::default()
            }
        );
    }

    #[test]
    fn parses_locale_hour_fields() {
        let options = parse_date_time_skeleton("jms").expect("options");
        assert_eq!(options.hour, Some(NumericWidth::Numeric));
        assert_eq!(options.hour_cycle, None);
        assert_eq!(options.minute, Some(NumericWidth::Numeric));
        assert_eq!(options.second, Some(NumericWidth::Numeric));
    }

    #[test]
    fn parses_explicit_hour_cycles() {
        let options = parse_date_time_skeleton("HHmm").expect("options");
        assert_eq!(options.hour_cycle, Some(HourCycle::H23));
        assert_eq!(options.hour, Some(NumericWidth::TwoDigit));
        let options = parse_date_time_skeleton("hma").expect("options");
        assert_eq!(options.hour_cycle, Some(HourCycle::H12));
        assert_eq!(options.hour12, Some(true));
    }

    #[test]
    fn parses_text_widths() {
        let options = parse_date_time_skeleton("GGGGEEEEEzzzz").expect("options");
        assert_eq!(options.era, Some(TextWidth::Long));
        assert_eq!(options.weekday, Some(TextWidth::Narrow));
        assert_eq!(options.time_zone_name, Some(TimeZoneNameWidth::Long));
    }

    #[test]
    fn skips_quoted_literals_and_spaces() {
        let options = parse_date_time_skeleton("d 'of' MMMM").expect("options");
        assert_eq!(options.day, Some(NumericWidth::Numeric));
        assert_eq!(options.month, Some(MonthWidth::Long));
        assert_eq!(
            parse_date_time_skeleton("d 'of"),
            Err(DateTimeSkeletonError::UnclosedQuote)
        );
    }

    #[test]
    fn rejects_widths_out_of_range() {
        assert_eq!(
            parse_date_time_skeleton("ddd"),
            Err(DateTimeSkeletonError::InvalidWidth {
                field: 'd',
                width: 3,
                min: 1,
                max: 2
            })
        );
        assert!(matches!(
            parse_date_time_skeleton("MMMMMM"),
            Err(DateTimeSkeletonError::InvalidWidth { field: 'M', .. })
        ));
    }

    #[test]
    fn rejects_unsupported_and_unknown_letters() {
        let err = parse_date_time_skeleton("YYYY").expect_err("unsupported");
        assert_eq!(err.to_string(), "`Y` (year) patterns are not supported, use `y` instead");
        assert_eq!(parse_date_time_skeleton("yMt"), Err(DateTimeSkeletonError::UnknownField('t')));
        assert_eq!(parse_date_time_skeleton("y-M"), Err(DateTimeSkeletonError::UnknownField('-')));
        assert!(matches!(
            parse_date_time_skeleton("eee"),
            Err(DateTimeSkeletonError::UnsupportedField { field: 'e', .. })
        ));
    }

    #[test]
    fn rejects_repeated_fields() {
        assert_eq!(
            parse_date_time_skeleton("yMy"),
            Err(DateTimeSkeletonError::DuplicateField("year"))
        );
        assert_eq!(
            parse_date_time_skeleton("hH"),
            Err(DateTimeSkeletonError::DuplicateField("hour"))
        );
    }

    #[test]
    fn rejects_empty_skeleton() {
        assert_eq!(parse_date_time_skeleton(" 'x' "), Err(DateTimeSkeletonError::Empty));
    }

    #[test]
    fn serializes_intl_option_names() {
        let options = parse_date_time_skeleton("yyMMhh").expect("options");
        let json = serde_json::to_value(&options).expect("json");
        assert_eq!(
            json,
            serde_json::json!({
                "year": "2-digit",
                "month": "2-digit",
                "hourCycle": "h12",
                "hour": "2-digit"
            })
        );
    }
}
