//! Test utilities for amalgam unit tests.
//!
//! This module is only compiled for tests. It provides a fixture builder
//! that writes a project layout (header tree + license) to a directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use amalgam::test_support::HeaderTreeFixture;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! HeaderTreeFixture::new()
//!     .header("lib.hpp", "#include \"detail.hpp\"\n")
//!     .header("detail.hpp", "int detail;\n")
//!     .write(tmp.path());
//! ```

pub mod fixtures;

pub use fixtures::*;
