mod from;
mod to;

use nom::error::ErrorKind;
use os_str_bytes::EncodingError;
use thiserror::Error;

pub use crate::pattern::from::{CaseSensitivity, Captures, FromPattern};
pub use crate::pattern::to::ToPattern;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PatternError {
    #[error("failed to compile from-pattern: {0}")]
    Regex(#[from] regex::Error),
    #[error("failed to parse to-pattern: {0}")]
    Template(nom::Err<(String, ErrorKind)>),
    #[error("capture `{0}` not found in from-pattern")]
    CaptureNotFound(String),
    #[error("failed to encode destination file name: {0}")]
    Encoding(EncodingError),
}

impl<'i> From<nom::Err<(&'i str, ErrorKind)>> for PatternError {
    fn from(error: nom::Err<(&'i str, ErrorKind)>) -> Self {
        PatternError::Template(error.to_owned())
    }
}
