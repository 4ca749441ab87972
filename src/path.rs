use std::path::{Path, PathBuf};

const SEPARATOR: char = '/';
const CURRENT_DIRECTORY: &str = ".";

/// A path partitioned into a literal directory and a trailing pattern.
///
/// Only `/` separates the directory from the pattern, regardless of platform.
/// Back slashes are escapes in both regular expressions and templates, so they
/// are never interpreted as separators.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathSpec<'t> {
    directory: PathBuf,
    pattern: &'t str,
}

impl<'t> PathSpec<'t> {
    pub fn partition(text: &'t str) -> Self {
        match text.rfind(SEPARATOR) {
            Some(index) => {
                let (head, pattern) = (&text[..index + 1], &text[index + 1..]);
                let trimmed = head.trim_end_matches(SEPARATOR);
                // A head that consists only of separators is the root.
                let directory = if trimmed.is_empty() { head } else { trimmed };
                PathSpec {
                    directory: directory.into(),
                    pattern,
                }
            }
            None => PathSpec {
                directory: CURRENT_DIRECTORY.into(),
                pattern: text,
            },
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn pattern(&self) -> &'t str {
        self.pattern
    }

    pub fn into_directory(self) -> PathBuf {
        self.directory
    }
}
