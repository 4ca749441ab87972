//! Move files en masse using regular expressions.
//!
//! A [`Transform`] pairs a from-pattern (a regular expression matched against
//! the start of file names in a source directory) with a to-pattern (a
//! template with back-references that resolves file names in a destination
//! directory). Reading a transform plans a [`Manifest`] of routes and an
//! [`Actuator`] writes those routes.
//!
//! [`Actuator`]: crate::actuator::Actuator
//! [`Manifest`]: crate::manifest::Manifest
//! [`Transform`]: crate::transform::Transform

pub mod actuator;
pub mod manifest;
pub mod path;
pub mod pattern;
pub mod prompt;
pub mod report;
pub mod scan;
pub mod transform;
