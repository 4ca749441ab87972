use std::ffi::OsStr;
use std::path::Path;

use crate::actuator::MoveError;
use crate::manifest::Route;
use crate::transform::Transform;

/// Receives events as a transform is read and actuated.
///
/// All functions do nothing by default. `()` discards all events.
pub trait Report {
    fn resolved(&mut self, _transform: &Transform<'_>) {}

    fn created(&mut self, _directory: &Path) {}

    fn rejected(&mut self, _name: &OsStr) {}

    fn planned(&mut self, _route: &Route) {}

    fn declined(&mut self, _route: &Route) {}

    fn moved(&mut self, _route: &Route) {}

    fn failed(&mut self, _error: &MoveError) {}
}

impl Report for () {}

impl<R> Report for &'_ mut R
where
    R: Report + ?Sized,
{
    fn resolved(&mut self, transform: &Transform<'_>) {
        (**self).resolved(transform)
    }

    fn created(&mut self, directory: &Path) {
        (**self).created(directory)
    }

    fn rejected(&mut self, name: &OsStr) {
        (**self).rejected(name)
    }

    fn planned(&mut self, route: &Route) {
        (**self).planned(route)
    }

    fn declined(&mut self, route: &Route) {
        (**self).declined(route)
    }

    fn moved(&mut self, route: &Route) {
        (**self).moved(route)
    }

    fn failed(&mut self, error: &MoveError) {
        (**self).failed(error)
    }
}

/// Forwards events to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl Report for Trace {
    fn resolved(&mut self, transform: &Transform<'_>) {
        tracing::debug!(
            source = %transform.source().display(),
            destination = %transform.destination().display(),
            from = transform.from().as_str(),
            to = transform.to().as_str(),
            "resolved transform"
        );
    }

    fn created(&mut self, directory: &Path) {
        tracing::debug!(directory = %directory.display(), "created directory");
    }

    fn rejected(&mut self, name: &OsStr) {
        tracing::debug!(name = %Path::new(name).display(), "file name does not match from-pattern");
    }

    fn planned(&mut self, route: &Route) {
        tracing::debug!("{}", route);
    }

    fn declined(&mut self, route: &Route) {
        tracing::debug!(source = %route.source().display(), "declined");
    }

    fn moved(&mut self, route: &Route) {
        tracing::debug!(destination = %route.destination().display(), "moved");
    }

    fn failed(&mut self, error: &MoveError) {
        tracing::debug!("{}", error);
    }
}
