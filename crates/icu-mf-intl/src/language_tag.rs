use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LanguageTagError;

/// A BCP 47 language tag with canonical casing.
///
/// The language subtag is lowercased, a four letter script is title cased
/// and a region is uppercased. Matching subtags stop at the first singleton,
/// so extensions (`-u-…`) and private use (`-x-…`) never affect lookups.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LanguageTag {
    normalized: String,
    language: String,
    script: Option<String>,
    region: Option<String>,
    match_subtags: Vec<String>,
}

impl LanguageTag {
    pub fn parse(input: &str) -> Result<Self, LanguageTagError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(LanguageTagError::Empty);
        }

        // `_` shows up in POSIX style locales such as `en_US`.
        let subtags: Vec<&str> = trimmed.split(['-', '_']).collect();
        if subtags.iter().any(|part| part.is_empty()) {
            return Err(LanguageTagError::EmptySubtag(trimmed.to_string()));
        }

        let language = subtags[0];
        if !is_alpha(language) || !(2..=8).contains(&language.len()) {
            return Err(LanguageTagError::InvalidLanguage {
                tag: trimmed.to_string(),
                subtag: language.to_string(),
            });
        }
        let language = language.to_ascii_lowercase();

        let mut normalized = vec![language.clone()];
        let mut match_subtags = vec![language.clone()];
        let mut script = None;
        let mut region = None;
        let mut in_extension = false;

        for part in &subtags[1..] {
            if !part.chars().all(|ch| ch.is_ascii_alphanumeric()) || part.len() > 8 {
                return Err(LanguageTagError::InvalidSubtag {
                    tag: trimmed.to_string(),
                    subtag: part.to_string(),
                });
            }
            if part.len() == 1 {
                in_extension = true;
                normalized.push(part.to_ascii_lowercase());
                continue;
            }

            let subtag = if in_extension {
                part.to_ascii_lowercase()
            } else if script.is_none() && region.is_none() && is_script(part) {
                let value = titlecase(part);
                script = Some(value.clone());
                value
            } else if region.is_none() && is_region(part) {
                let value = part.to_ascii_uppercase();
                region = Some(value.clone());
                value
            } else {
                part.to_ascii_lowercase()
            };

            if !in_extension {
                match_subtags.push(subtag.clone());
            }
            normalized.push(subtag);
        }

        Ok(Self {
            normalized: normalized.join("-"),
            language,
            script,
            region,
            match_subtags,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn match_subtags(&self) -> &[String] {
        &self.match_subtags
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

impl FromStr for LanguageTag {
    type Err = LanguageTagError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Serialize for LanguageTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.normalized)
    }
}

impl<'de> Deserialize<'de> for LanguageTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

pub(crate) fn is_alpha(value: &str) -> bool {
    value.chars().all(|ch| ch.is_ascii_alphabetic())
}

pub(crate) fn is_script(value: &str) -> bool {
    value.len() == 4 && is_alpha(value)
}

/// Two letters or three digits (UN M.49).
pub(crate) fn is_region(value: &str) -> bool {
    (value.len() == 2 && is_alpha(value)) || (value.len() == 3 && value.chars().all(|ch| ch.is_ascii_digit()))
}

pub(crate) fn titlecase(value: &str) -> String {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut output = String::with_capacity(value.len());
    output.push(first.to_ascii_uppercase());
    output.extend(chars.map(|ch| ch.to_ascii_lowercase()));
    output
}
