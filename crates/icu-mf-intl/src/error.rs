use thiserror::Error;

use crate::display_names::DisplayNamesKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageTagError {
    #[error("language tag is empty")]
    Empty,
    #[error("language tag `{0}` has an empty subtag")]
    EmptySubtag(String),
    #[error("language tag `{tag}` has an invalid language subtag `{subtag}`")]
    InvalidLanguage { tag: String, subtag: String },
    #[error("language tag `{tag}` has an invalid subtag `{subtag}`")]
    InvalidSubtag { tag: String, subtag: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayNamesError {
    #[error("Invalid value \"{value}\" for option {kind}")]
    InvalidValue { value: String, kind: DisplayNamesKind },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntlError {
    #[error(transparent)]
    LanguageTag(#[from] LanguageTagError),
    #[error(transparent)]
    DisplayNames(#[from] DisplayNamesError),
}

pub type IntlResult<T> = Result<T, IntlError>;

#[cfg(test)]
mod tests {
    use super::{DisplayNamesError, IntlError, LanguageTagError};
    use crate::display_names::DisplayNamesKind;

    #[test]
    fn invalid_value_message_names_option() {
        let err = DisplayNamesError::InvalidValue {
            value: "AAA".to_string(),
            kind: DisplayNamesKind::Region,
        };
        assert_eq!(err.to_string(), "Invalid value \"AAA\" for option region");
    }

    #[test]
    fn intl_error_is_transparent() {
        let err = IntlError::from(LanguageTagError::Empty);
        assert_eq!(err.to_string(), "language tag is empty");
    }
}
