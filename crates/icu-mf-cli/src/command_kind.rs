use icu_mf_parser::{UnknownErrorKind, error_kind_name};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KindCommandError {
    #[error("`{0}` is not an integer")]
    NotAnInteger(String),
    #[error(transparent)]
    Unknown(#[from] UnknownErrorKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindOptions {
    pub value: String,
}

pub fn run_kind(options: &KindOptions) -> Result<&'static str, KindCommandError> {
    let value = options
        .value
        .trim()
        .parse::<i32>()
        .map_err(|_| KindCommandError::NotAnInteger(options.value.clone()))?;
    Ok(error_kind_name(value)?)
}

#[cfg(test)]
mod tests {
    use super::{KindCommandError, KindOptions, run_kind};
    use icu_mf_parser::UnknownErrorKind;

    fn kind(value: &str) -> Result<&'static str, KindCommandError> {
        run_kind(&KindOptions {
            value: value.to_string(),
        })
    }

    #[test]
    fn resolves_names() {
        assert_eq!(kind("2"), Ok("EMPTY_ARGUMENT"));
        assert_eq!(kind("5"), Ok("INVALID_ARGUMENT_TYPE"));
        assert_eq!(kind(" 28 "), Ok("NESTING_LIMIT_EXCEEDED"));
    }

    #[test]
    fn rejects_reserved_and_garbage() {
        assert_eq!(kind("24"), Err(KindCommandError::Unknown(UnknownErrorKind(24))));
        assert_eq!(kind("five"), Err(KindCommandError::NotAnInteger("five".to_string())));
    }
}
