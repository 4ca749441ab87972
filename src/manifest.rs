use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

/// Source and destination paths of a single file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Route {
    source: PathBuf,
    destination: PathBuf,
}

impl Route {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Route {
            source: source.into(),
            destination: destination.into(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

impl Display for Route {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{} --> {}",
            self.source.display(),
            self.destination.display(),
        )
    }
}

/// Routes in the order in which their source files were read.
#[derive(Clone, Debug, Default)]
pub struct Manifest {
    routes: Vec<Route>,
}

impl Manifest {
    pub fn push(&mut self, route: Route) {
        self.routes.push(route);
    }

    pub fn routes(&self) -> impl ExactSizeIterator<Item = &'_ Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl IntoIterator for Manifest {
    type Item = Route;
    type IntoIter = std::vec::IntoIter<Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.into_iter()
    }
}
