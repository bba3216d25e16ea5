use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DisplayNamesError, IntlResult};
use crate::language_tag::{LanguageTag, is_alpha, is_region, titlecase};

/// Which kind of code [`DisplayNames::of`] is asked about.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayNamesKind {
    #[default]
    Region,
    Script,
    Currency,
    Language,
}

impl DisplayNamesKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayNamesKind::Region => "region",
            DisplayNamesKind::Script => "script",
            DisplayNamesKind::Currency => "currency",
            DisplayNamesKind::Language => "language",
        }
    }
}

impl fmt::Display for DisplayNamesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to return for a valid code without a known name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayNamesFallback {
    #[default]
    Code,
    None,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayNamesOptions {
    #[serde(rename = "type")]
    pub kind: DisplayNamesKind,
    pub fallback: DisplayNamesFallback,
}

impl DisplayNamesOptions {
    pub fn new(kind: DisplayNamesKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_fallback(mut self, fallback: DisplayNamesFallback) -> Self {
        self.fallback = fallback;
        self
    }
}

/// Validates region, script, currency and language codes and looks up their
/// names for a locale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayNames {
    locale: LanguageTag,
    options: DisplayNamesOptions,
}

impl DisplayNames {
    pub fn new(locale: LanguageTag, options: DisplayNamesOptions) -> Self {
        Self { locale, options }
    }

    /// Parses `locale` as a language tag first.
    pub fn try_new(locale: &str, options: DisplayNamesOptions) -> IntlResult<Self> {
        Ok(Self::new(LanguageTag::parse(locale)?, options))
    }

    pub fn locale(&self) -> &LanguageTag {
        &self.locale
    }

    pub fn options(&self) -> DisplayNamesOptions {
        self.options
    }

    /// Returns the name of `code`, the canonical code itself when no name is
    /// known and the fallback is [`DisplayNamesFallback::Code`], or `None`.
    pub fn of(&self, code: &str) -> Result<Option<String>, DisplayNamesError> {
        let kind = self.options.kind;
        let canonical = canonicalize(kind, code).ok_or_else(|| DisplayNamesError::InvalidValue {
            value: code.to_string(),
            kind,
        })?;

        if let Some(name) = self.lookup(kind, &canonical) {
            return Ok(Some(name.to_string()));
        }
        Ok(match self.options.fallback {
            DisplayNamesFallback::Code => Some(canonical),
            DisplayNamesFallback::None => None,
        })
    }

    fn lookup(&self, kind: DisplayNamesKind, canonical: &str) -> Option<&'static str> {
        if self.locale.language() != "en" {
            return None;
        }
        let table = match kind {
            DisplayNamesKind::Region => ENGLISH_REGIONS,
            DisplayNamesKind::Script => ENGLISH_SCRIPTS,
            DisplayNamesKind::Currency => ENGLISH_CURRENCIES,
            DisplayNamesKind::Language => ENGLISH_LANGUAGES,
        };
        find(table, canonical).or_else(|| {
            // `fr-CA` falls back to the bare language when no full entry exists.
            let language = canonical.split('-').next()?;
            (kind == DisplayNamesKind::Language && language != canonical)
                .then(|| find(table, language))
                .flatten()
        })
    }
}

fn find(table: &[(&str, &'static str)], code: &str) -> Option<&'static str> {
    table.iter().find(|(key, _)| *key == code).map(|(_, name)| *name)
}

fn canonicalize(kind: DisplayNamesKind, code: &str) -> Option<String> {
    match kind {
        DisplayNamesKind::Region => is_region(code).then(|| code.to_ascii_uppercase()),
        DisplayNamesKind::Script => is_titlecase_script(code).then(|| titlecase(code)),
        DisplayNamesKind::Currency => (code.len() == 3 && is_alpha(code)).then(|| code.to_ascii_uppercase()),
        DisplayNamesKind::Language => LanguageTag::parse(code).ok().map(|tag| tag.to_string()),
    }
}

fn is_titlecase_script(code: &str) -> bool {
    let mut chars = code.chars();
    code.len() == 4
        && chars.next().is_some_and(|ch| ch.is_ascii_uppercase())
        && chars.all(|ch| ch.is_ascii_lowercase())
}

const ENGLISH_REGIONS: &[(&str, &str)] = &[
    ("001", "world"),
    ("150", "Europe"),
    ("419", "Latin America"),
    ("BR", "Brazil"),
    ("CA", "Canada"),
    ("CN", "China"),
    ("DE", "Germany"),
    ("ES", "Spain"),
    ("FR", "France"),
    ("GB", "United Kingdom"),
    ("IN", "India"),
    ("IT", "Italy"),
    ("JP", "Japan"),
    ("MX", "Mexico"),
    ("TW", "Taiwan"),
    ("US", "United States"),
];

const ENGLISH_SCRIPTS: &[(&str, &str)] = &[
    ("Arab", "Arabic"),
    ("Cyrl", "Cyrillic"),
    ("Deva", "Devanagari"),
    ("Grek", "Greek"),
    ("Hans", "Simplified Han"),
    ("Hant", "Traditional Han"),
    ("Hebr", "Hebrew"),
    ("Jpan", "Japanese"),
    ("Kore", "Korean"),
    ("Latn", "Latin"),
];

const ENGLISH_CURRENCIES: &[(&str, &str)] = &[
    ("BRL", "Brazilian Real"),
    ("CAD", "Canadian Dollar"),
    ("CNY", "Chinese Yuan"),
    ("EUR", "Euro"),
    ("GBP", "British Pound"),
    ("INR", "Indian Rupee"),
    ("JPY", "Japanese Yen"),
    ("MXN", "Mexican Peso"),
    ("USD", "US Dollar"),
];

const ENGLISH_LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("de", "German"),
    ("en", "English"),
    ("en-GB", "British English"),
    ("en-US", "American English"),
    ("es", "Spanish"),
    ("es-419", "Latin American Spanish"),
    ("fr", "French"),
    ("fr-CA", "Canadian French"),
    ("hi", "Hindi"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("pt", "Portuguese"),
    ("pt-BR", "Brazilian Portuguese"),
    ("ru", "Russian"),
    ("zh", "Chinese"),
    ("zh-Hans", "Simplified Chinese"),
    ("zh-Hant", "Traditional Chinese"),
];
