//! Amalgam - flatten a tree of C/C++ headers into a single header
//!
//! This crate provides the core library functionality for amalgam:
//! loading a header tree, inlining internal includes, hoisting external
//! includes, injecting a license banner, and writing the result.

pub mod core;
pub mod ops;
pub mod util;

/// Test fixtures for amalgam unit tests.
///
/// Only available when compiling tests.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{AmalgamError, HeaderFile, HeaderRepository, IncludeDirective, StructuralMarker};
pub use ops::{amalgamate, AmalgamateOptions, AmalgamateResult};
pub use util::context::GlobalContext;
