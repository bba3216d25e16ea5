#![forbid(unsafe_code)]

mod display_names;
mod error;
mod language_tag;

pub use display_names::{DisplayNames, DisplayNamesFallback, DisplayNamesKind, DisplayNamesOptions};
pub use error::{DisplayNamesError, IntlError, IntlResult, LanguageTagError};
pub use language_tag::LanguageTag;
