use std::fs;
use std::io::{self, Error, ErrorKind};
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

use crate::manifest::{Manifest, Route};
use crate::prompt::Confirm;
use crate::report::Report;

#[derive(Debug, Error)]
#[error(
    "failed to move `{}` to `{}`: {source}",
    .route.source().display(),
    .route.destination().display()
)]
pub struct MoveError {
    route: Route,
    #[source]
    source: io::Error,
}

impl MoveError {
    pub fn route(&self) -> &Route {
        &self.route
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ActuatorError {
    #[error("failed to read confirmation: {source}")]
    Prompt {
        #[source]
        source: io::Error,
        actuation: Actuation,
    },
}

impl ActuatorError {
    /// Gets the outcome of the routes written before the error.
    pub fn actuation(&self) -> &Actuation {
        match *self {
            ActuatorError::Prompt { ref actuation, .. } => actuation,
        }
    }
}

/// Outcome of writing a manifest.
#[derive(Debug, Default)]
pub struct Actuation {
    moved: Vec<Route>,
    declined: Vec<Route>,
    failed: Vec<MoveError>,
}

impl Actuation {
    pub fn moved(&self) -> &[Route] {
        &self.moved
    }

    pub fn declined(&self) -> &[Route] {
        &self.declined
    }

    pub fn failed(&self) -> &[MoveError] {
        &self.failed
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Writes the routes of a manifest.
#[derive(Debug)]
pub struct Actuator<C> {
    confirm: C,
}

impl<C> Actuator<C>
where
    C: Confirm,
{
    pub fn new(confirm: C) -> Self {
        Actuator { confirm }
    }

    /// Confirms and writes each route in order.
    ///
    /// A route that fails to write does not stop the remaining routes; its
    /// error is collected into the returned [`Actuation`]. Only a failure to
    /// read a confirmation stops the actuation, and the error keeps the
    /// outcome of the routes before it.
    pub fn write<W, R>(
        &mut self,
        manifest: Manifest,
        mut report: R,
    ) -> Result<Actuation, ActuatorError>
    where
        W: Operation,
        R: Report,
    {
        let mut actuation = Actuation::default();
        for route in manifest {
            let confirmed = match self.confirm.confirm(&route) {
                Ok(confirmed) => confirmed,
                Err(source) => return Err(ActuatorError::Prompt { source, actuation }),
            };
            if !confirmed {
                report.declined(&route);
                actuation.declined.push(route);
                continue;
            }
            match W::write(&route) {
                Ok(()) => {
                    report.moved(&route);
                    actuation.moved.push(route);
                }
                Err(source) => {
                    let error = MoveError { route, source };
                    report.failed(&error);
                    actuation.failed.push(error);
                }
            }
        }
        Ok(actuation)
    }
}

pub trait Operation {
    fn write(route: &Route) -> io::Result<()>;
}

/// Renames files, falling back to copying and removing across devices.
pub enum Move {}

impl Operation for Move {
    fn write(route: &Route) -> io::Result<()> {
        match fs::rename(route.source(), route.destination()) {
            Err(error) if is_cross_device(&error) => {
                copy(route.source(), route.destination())?;
                remove(route.source())
            }
            result => result,
        }
    }
}

fn is_cross_device(error: &Error) -> bool {
    // `EXDEV` and `ERROR_NOT_SAME_DEVICE`.
    #[cfg(unix)]
    const CROSS_DEVICE: Option<i32> = Some(18);
    #[cfg(windows)]
    const CROSS_DEVICE: Option<i32> = Some(17);
    #[cfg(not(any(unix, windows)))]
    const CROSS_DEVICE: Option<i32> = None;

    CROSS_DEVICE.is_some() && error.raw_os_error() == CROSS_DEVICE
}

fn copy(source: &Path, destination: &Path) -> io::Result<()> {
    let file_type = fs::symlink_metadata(source)?.file_type();
    if file_type.is_symlink() {
        copy_link(source, destination)
    }
    else if file_type.is_dir() {
        for entry in WalkDir::new(source).follow_links(false) {
            let entry = entry?;
            let path = destination.join(
                entry
                    .path()
                    .strip_prefix(source)
                    .map_err(|_| Error::new(ErrorKind::Other, "entry is not in source tree"))?,
            );
            let file_type = entry.file_type();
            if file_type.is_dir() {
                fs::create_dir(&path)?;
            }
            else if file_type.is_symlink() {
                copy_link(entry.path(), &path)?;
            }
            else {
                fs::copy(entry.path(), &path)?;
            }
        }
        Ok(())
    }
    else {
        fs::copy(source, destination).map(|_| ())
    }
}

#[cfg(unix)]
fn copy_link(source: &Path, destination: &Path) -> io::Result<()> {
    use std::os::unix;

    unix::fs::symlink(fs::read_link(source)?, destination)
}

#[cfg(windows)]
fn copy_link(source: &Path, destination: &Path) -> io::Result<()> {
    use std::os::windows;

    let target = fs::read_link(source)?;
    if fs::metadata(source).map_or(false, |metadata| metadata.is_dir()) {
        windows::fs::symlink_dir(target, destination)
    }
    else {
        windows::fs::symlink_file(target, destination)
    }
}

#[cfg(not(any(unix, windows)))]
fn copy_link(_: &Path, _: &Path) -> io::Result<()> {
    Err(Error::new(ErrorKind::Other, "links are not supported"))
}

fn remove(path: &Path) -> io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    }
    else {
        fs::remove_file(path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};
    use std::io::{self, Cursor, Error, ErrorKind};
    use tempfile::tempdir;

    use crate::actuator::{self, Actuator, ActuatorError, Move, Operation};
    use crate::manifest::{Manifest, Route};
    use crate::prompt::{Always, Confirm, LinePrompt};

    fn manifest(routes: impl IntoIterator<Item = Route>) -> Manifest {
        let mut manifest = Manifest::default();
        for route in routes {
            manifest.push(route);
        }
        manifest
    }

    enum FailOnOdd {}

    impl Operation for FailOnOdd {
        fn write(route: &Route) -> io::Result<()> {
            if route.source().to_string_lossy().ends_with(|x: char| {
                x.to_digit(10).map_or(false, |digit| digit % 2 == 1)
            }) {
                Err(Error::new(ErrorKind::Other, "odd"))
            }
            else {
                Move::write(route)
            }
        }
    }

    #[test]
    fn move_files() {
        let directory = tempdir().unwrap();
        let source = directory.path().join("a");
        let destination = directory.path().join("b");
        fs::write(&source, "content").unwrap();

        let actuation = Actuator::new(Always)
            .write::<Move, _>(manifest([Route::new(&source, &destination)]), ())
            .unwrap();
        assert!(actuation.is_complete());
        assert_eq!(actuation.moved().len(), 1);
        assert!(!source.exists());
        assert_eq!(fs::read_to_string(&destination).unwrap(), "content");
    }

    #[test]
    fn move_directories() {
        let directory = tempdir().unwrap();
        let source = directory.path().join("a");
        let destination = directory.path().join("b");
        fs::create_dir(&source).unwrap();
        File::create(source.join("file")).unwrap();

        let actuation = Actuator::new(Always)
            .write::<Move, _>(manifest([Route::new(&source, &destination)]), ())
            .unwrap();
        assert!(actuation.is_complete());
        assert!(destination.join("file").is_file());
    }

    #[test]
    fn continue_after_failure() {
        let directory = tempdir().unwrap();
        let routes: Vec<_> = (1..=4)
            .map(|n| {
                let source = directory.path().join(format!("file{}", n));
                File::create(&source).unwrap();
                Route::new(source, directory.path().join(format!("moved{}", n)))
            })
            .collect();

        let actuation = Actuator::new(Always)
            .write::<FailOnOdd, _>(manifest(routes), ())
            .unwrap();
        assert!(!actuation.is_complete());
        assert_eq!(actuation.failed().len(), 2);
        assert_eq!(actuation.moved().len(), 2);
        assert!(directory.path().join("file1").exists());
        assert!(directory.path().join("moved2").exists());
        assert!(directory.path().join("file3").exists());
        assert!(directory.path().join("moved4").exists());
        assert_eq!(
            actuation.failed()[0].route().source(),
            directory.path().join("file1"),
        );
    }

    #[test]
    fn fail_to_move_missing_source() {
        let directory = tempdir().unwrap();
        let route = Route::new(directory.path().join("missing"), directory.path().join("b"));

        let actuation = Actuator::new(Always)
            .write::<Move, _>(manifest([route]), ())
            .unwrap();
        assert_eq!(actuation.failed().len(), 1);
        assert!(actuation.moved().is_empty());
    }

    #[test]
    fn skip_declined_routes() {
        let directory = tempdir().unwrap();
        let routes: Vec<_> = ["a", "b"]
            .iter()
            .map(|name| {
                let source = directory.path().join(name);
                File::create(&source).unwrap();
                Route::new(source, directory.path().join(format!("{}.moved", name)))
            })
            .collect();

        let mut prompt = LinePrompt::new(Cursor::new("n\ny\n"), io::sink());
        let actuation = Actuator::new(&mut prompt)
            .write::<Move, _>(manifest(routes), ())
            .unwrap();
        assert_eq!(actuation.declined().len(), 1);
        assert_eq!(actuation.moved().len(), 1);
        assert!(directory.path().join("a").exists());
        assert!(!directory.path().join("a.moved").exists());
        assert!(!directory.path().join("b").exists());
        assert!(directory.path().join("b.moved").exists());
    }

    struct FailOnSecond {
        count: usize,
    }

    impl Confirm for FailOnSecond {
        fn confirm(&mut self, _: &Route) -> io::Result<bool> {
            self.count += 1;
            if self.count == 2 {
                Err(Error::new(ErrorKind::UnexpectedEof, "closed"))
            }
            else {
                Ok(true)
            }
        }
    }

    #[test]
    fn keep_actuation_on_prompt_error() {
        let directory = tempdir().unwrap();
        let routes: Vec<_> = (1..=3)
            .map(|n| {
                let source = directory.path().join(format!("file{}", n));
                File::create(&source).unwrap();
                Route::new(source, directory.path().join(format!("moved{}", n)))
            })
            .collect();

        let error = Actuator::new(FailOnSecond { count: 0 })
            .write::<FailOnOdd, _>(manifest(routes), ())
            .unwrap_err();
        assert!(matches!(error, ActuatorError::Prompt { .. }));
        assert_eq!(error.actuation().failed().len(), 1);
        assert!(error.actuation().moved().is_empty());
        assert!(directory.path().join("file2").exists());
        assert!(directory.path().join("file3").exists());
    }

    #[test]
    fn copy_and_remove_tree() {
        let directory = tempdir().unwrap();
        let source = directory.path().join("tree");
        fs::create_dir_all(source.join("inner")).unwrap();
        fs::write(source.join("inner").join("file"), "content").unwrap();
        let destination = directory.path().join("copy");

        actuator::copy(&source, &destination).unwrap();
        actuator::remove(&source).unwrap();
        assert!(!source.exists());
        assert_eq!(
            fs::read_to_string(destination.join("inner").join("file")).unwrap(),
            "content",
        );
    }

    #[cfg(unix)]
    #[test]
    fn copy_link_without_following() {
        let directory = tempdir().unwrap();
        let target = directory.path().join("target");
        let link = directory.path().join("link");
        fs::write(&target, "content").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();
        let destination = directory.path().join("copy");

        actuator::copy(&link, &destination).unwrap();
        assert!(fs::symlink_metadata(&destination)
            .unwrap()
            .file_type()
            .is_symlink());
        assert_eq!(fs::read_link(&destination).unwrap(), target);
        assert!(target.exists());
    }
}
