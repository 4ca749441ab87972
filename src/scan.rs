use itertools::Itertools as _;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DirectoryError {
    #[error("source directory not found: `{0}`")]
    NotFound(PathBuf),
    #[error("failed to create destination directory `{path}`: {source}")]
    Creation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read source directory `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Fails with [`DirectoryError::NotFound`] if `directory` is not an existing
/// directory.
pub fn check(directory: impl AsRef<Path>) -> Result<(), DirectoryError> {
    let directory = directory.as_ref();
    if directory.is_dir() {
        Ok(())
    }
    else {
        Err(DirectoryError::NotFound(directory.into()))
    }
}

/// Reads the names of the entries in `directory`.
///
/// This does not traverse into subdirectories nor follow links. Every entry is
/// yielded regardless of its type, including hidden entries. Names are in the
/// order given by the platform.
pub fn read(directory: impl AsRef<Path>) -> Result<Vec<OsString>, DirectoryError> {
    let directory = directory.as_ref();
    check(directory)?;
    WalkDir::new(directory)
        .follow_links(false)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .map_ok(|entry| entry.file_name().to_os_string())
        .collect::<Result<_, _>>()
        .map_err(|source| DirectoryError::Read {
            path: directory.into(),
            source,
        })
}

/// Creates `directory` if it does not exist.
///
/// Only the last component of `directory` is created. Returns `true` if the
/// directory has been created.
pub fn ensure_destination_directory(directory: impl AsRef<Path>) -> Result<bool, DirectoryError> {
    let directory = directory.as_ref();
    if directory.exists() {
        Ok(false)
    }
    else {
        fs::create_dir(directory)
            .map(|_| true)
            .map_err(|source| DirectoryError::Creation {
                path: directory.into(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::ffi::OsString;
    use std::fs::{self, File};
    use tempfile::tempdir;

    use crate::scan::{self, DirectoryError};

    #[test]
    fn read_all_entries_in_directory() {
        let directory = tempdir().unwrap();
        File::create(directory.path().join("a.txt")).unwrap();
        File::create(directory.path().join(".hidden")).unwrap();
        fs::create_dir(directory.path().join("sub")).unwrap();
        File::create(directory.path().join("sub").join("nested.txt")).unwrap();

        let names: BTreeSet<OsString> = scan::read(directory.path()).unwrap().into_iter().collect();
        let expected: BTreeSet<OsString> = ["a.txt", ".hidden", "sub"]
            .iter()
            .map(OsString::from)
            .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn read_empty_directory() {
        let directory = tempdir().unwrap();
        assert!(scan::read(directory.path()).unwrap().is_empty());
    }

    #[test]
    fn reject_missing_directory() {
        let directory = tempdir().unwrap();
        let missing = directory.path().join("missing");
        assert!(matches!(
            scan::read(&missing),
            Err(DirectoryError::NotFound(path)) if path == missing,
        ));
    }

    #[test]
    fn create_absent_destination_directory() {
        let directory = tempdir().unwrap();
        let destination = directory.path().join("img");
        assert!(scan::ensure_destination_directory(&destination).unwrap());
        assert!(destination.is_dir());
        assert!(!scan::ensure_destination_directory(&destination).unwrap());
    }

    #[test]
    fn create_only_one_level() {
        let directory = tempdir().unwrap();
        let destination = directory.path().join("a").join("b");
        assert!(matches!(
            scan::ensure_destination_directory(&destination),
            Err(DirectoryError::Creation { .. }),
        ));
        assert!(!directory.path().join("a").exists());
    }
}
