use bstr::ByteVec as _;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::manifest::{Manifest, Route};
use crate::path::PathSpec;
use crate::pattern::{CaseSensitivity, FromPattern, PatternError, ToPattern};
use crate::report::Report;
use crate::scan::{self, DirectoryError};

#[derive(Debug, Error)]
#[error("failed to read transform")]
pub struct TransformError {
    #[source]
    kind: ErrorKind,
}

impl TransformError {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl From<DirectoryError> for TransformError {
    fn from(error: DirectoryError) -> Self {
        TransformError { kind: error.into() }
    }
}

impl From<PatternError> for TransformError {
    fn from(error: PatternError) -> Self {
        TransformError { kind: error.into() }
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Rewrite rule from source file names to destination paths.
///
/// A transform pairs a from-pattern, which matches file names in a source
/// directory, with a to-pattern, which resolves file names in a destination
/// directory.
#[derive(Clone, Debug)]
pub struct Transform<'t> {
    source: PathBuf,
    destination: PathBuf,
    from: FromPattern,
    to: ToPattern<'t>,
}

impl<'t> Transform<'t> {
    /// Resolves a transform from source and destination paths.
    ///
    /// The final component of `source` is compiled as a from-pattern and the
    /// final component of `destination` is kept as a to-pattern. Preceding
    /// components are literal directories. The to-pattern is not validated.
    pub fn resolve(
        source: &'t str,
        destination: &'t str,
        case: CaseSensitivity,
    ) -> Result<Self, PatternError> {
        let source = PathSpec::partition(source);
        let destination = PathSpec::partition(destination);
        let from = FromPattern::new(source.pattern(), case)?;
        let to = ToPattern::new(destination.pattern());
        Ok(Transform {
            source: source.into_directory(),
            destination: destination.into_directory(),
            from,
            to,
        })
    }

    /// Reads the source directory and plans routes for matching files.
    ///
    /// The destination directory is created before the source directory is
    /// read if it does not already exist, but only once the source directory
    /// is known to exist.
    pub fn read(&self, mut report: impl Report) -> Result<Manifest, TransformError> {
        report.resolved(self);
        scan::check(&self.source)?;
        if scan::ensure_destination_directory(&self.destination)? {
            report.created(&self.destination);
        }
        let names = scan::read(&self.source)?;
        self.plan(names, report).map_err(From::from)
    }

    /// Plans routes for the file names that match the from-pattern.
    ///
    /// Routes are in the same order as `names`. Names that do not match are
    /// skipped. The to-pattern is parsed when the first name matches.
    pub fn plan<I>(&self, names: I, mut report: impl Report) -> Result<Manifest, PatternError>
    where
        I: IntoIterator,
        I::Item: AsRef<OsStr>,
    {
        let mut substitution = None;
        let mut manifest = Manifest::default();
        for name in names {
            let name = name.as_ref();
            let text = Vec::from_os_str_lossy(name);
            let captures = match self.from.captures(text.as_ref()) {
                Some(captures) => captures,
                None => {
                    report.rejected(name);
                    continue;
                }
            };
            let parsed = match substitution {
                Some(ref parsed) => parsed,
                None => &*substitution.insert(self.to.parse()?),
            };
            let route = Route::new(
                self.source.join(name),
                self.destination.join(parsed.resolve(&captures)?),
            );
            report.planned(&route);
            manifest.push(route);
        }
        Ok(manifest)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn from(&self) -> &FromPattern {
        &self.from
    }

    pub fn to(&self) -> &ToPattern<'t> {
        &self.to
    }
}
