mod token;

use os_str_bytes::OsStrBytes as _;
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};

use crate::pattern::to::token::{Identifier, Token};
use crate::pattern::{Captures, PatternError};

/// Template used to resolve destination file names.
///
/// A to-pattern is literal text with back-references to the captures of a
/// from-pattern. The text is not parsed until it is needed, so a malformed
/// to-pattern is only detected once a file name matches.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ToPattern<'t> {
    text: &'t str,
}

impl<'t> ToPattern<'t> {
    pub fn new(text: &'t str) -> Self {
        ToPattern { text }
    }

    pub fn parse(&self) -> Result<Substitution<'t>, PatternError> {
        token::parse(self.text).map(|tokens| Substitution { tokens })
    }

    pub fn as_str(&self) -> &'t str {
        self.text
    }
}

/// Parsed to-pattern.
#[derive(Clone, Debug)]
pub struct Substitution<'t> {
    tokens: Vec<Token<'t>>,
}

impl<'t> Substitution<'t> {
    /// Resolves the destination file name for a matched file name.
    ///
    /// The matched prefix of the file name is replaced by the expanded
    /// to-pattern and the remainder of the file name is kept as is.
    pub fn resolve(&self, captures: &Captures<'_>) -> Result<OsString, PatternError> {
        let mut output = self.expand(captures)?;
        output.extend_from_slice(captures.tail());
        OsStr::from_raw_bytes(output)
            .map(Cow::into_owned)
            .map_err(PatternError::Encoding)
    }

    fn expand(&self, captures: &Captures<'_>) -> Result<Vec<u8>, PatternError> {
        let mut output = Vec::new();
        for token in &self.tokens {
            match *token {
                Token::Capture(ref identifier) => {
                    let capture = match *identifier {
                        Identifier::Index(index) => captures.get(index),
                        Identifier::Name(ref name) => captures.name(name),
                    }
                    .ok_or_else(|| PatternError::CaptureNotFound(identifier.to_string()))?;
                    output.extend_from_slice(capture);
                }
                Token::Literal(ref text) => {
                    output.extend_from_slice(text.as_bytes());
                }
            }
        }
        Ok(output)
    }
}
