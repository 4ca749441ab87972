use regex::bytes::{Captures as RegexCaptures, Regex, RegexBuilder};

use crate::pattern::PatternError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CaseSensitivity {
    Sensitive,
    Insensitive,
}

impl CaseSensitivity {
    pub fn insensitive_if(insensitive: bool) -> Self {
        if insensitive {
            CaseSensitivity::Insensitive
        }
        else {
            CaseSensitivity::Sensitive
        }
    }
}

impl Default for CaseSensitivity {
    fn default() -> Self {
        CaseSensitivity::Sensitive
    }
}

/// Groups captured by a from-pattern in a file name.
///
/// Captures always begin at the start of the file name.
#[derive(Debug)]
pub struct Captures<'a> {
    inner: RegexCaptures<'a>,
    regex: &'a Regex,
    text: &'a [u8],
}

impl<'a> Captures<'a> {
    /// Gets the text of the entire match.
    pub fn matched(&self) -> &'a [u8] {
        self.inner
            .get(0)
            .map(|capture| capture.as_bytes())
            .unwrap_or_default()
    }

    /// Gets the text that follows the match.
    pub fn tail(&self) -> &'a [u8] {
        &self.text[self.matched().len()..]
    }

    /// Gets the text of the capture with the given index.
    ///
    /// Returns `None` if the from-pattern has no such group. Groups that do not
    /// participate in the match yield empty text.
    pub fn get(&self, index: usize) -> Option<&'a [u8]> {
        if index < self.inner.len() {
            Some(
                self.inner
                    .get(index)
                    .map(|capture| capture.as_bytes())
                    .unwrap_or_default(),
            )
        }
        else {
            None
        }
    }

    /// Gets the text of the capture with the given name.
    pub fn name(&self, name: &str) -> Option<&'a [u8]> {
        if self.regex.capture_names().flatten().any(|other| other == name) {
            Some(
                self.inner
                    .name(name)
                    .map(|capture| capture.as_bytes())
                    .unwrap_or_default(),
            )
        }
        else {
            None
        }
    }
}

/// Regular expression matched against file names.
#[derive(Clone, Debug)]
pub struct FromPattern {
    regex: Regex,
}

impl FromPattern {
    pub fn new(text: &str, case: CaseSensitivity) -> Result<Self, PatternError> {
        let regex = RegexBuilder::new(text)
            .case_insensitive(matches!(case, CaseSensitivity::Insensitive))
            .build()?;
        Ok(FromPattern { regex })
    }

    /// Matches the from-pattern against the start of `name`.
    ///
    /// The match need not consume all of `name`. Returns `None` if there is no
    /// match that begins at the first byte.
    pub fn captures<'a>(&'a self, name: &'a [u8]) -> Option<Captures<'a>> {
        // The leftmost match begins at zero whenever any match can begin there,
        // so this is equivalent to an anchored search.
        self.regex
            .captures(name)
            .filter(|captures| captures.get(0).map_or(false, |matched| matched.start() == 0))
            .map(|inner| Captures {
                inner,
                regex: &self.regex,
                text: name,
            })
    }

    pub fn is_match(&self, name: &[u8]) -> bool {
        self.captures(name).is_some()
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
