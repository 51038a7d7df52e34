//! Core data structures for amalgamation.
//!
//! This module contains the types every pipeline stage shares:
//! - The structural marker splitting prelude from content
//! - Include directives and their scanning
//! - Header files and the header repository
//! - The error taxonomy

pub mod directive;
pub mod errors;
pub mod header;
pub mod marker;

pub use directive::{normalize_target, scan_all, scan_quoted, DirectiveKind, IncludeDirective};
pub use errors::AmalgamError;
pub use header::{HeaderFile, HeaderRepository};
pub use marker::{StructuralMarker, DEFAULT_MARKER};
