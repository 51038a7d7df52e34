//! Amalgamation error types and diagnostics.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error raised while loading, resolving or writing a header tree.
///
/// Every variant is fatal: amalgamation is all-or-nothing and no output
/// file is written once any of these is raised.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum AmalgamError {
    #[error("`{}` is missing the structural marker `{marker}`", path.display())]
    #[diagnostic(code(amalgam::load::missing_marker))]
    MissingMarker { path: PathBuf, marker: String },

    #[error("failed to read `{}`", path.display())]
    #[diagnostic(code(amalgam::load::read))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unresolved include `{target}` in `{included_from}`")]
    #[diagnostic(code(amalgam::resolve::unresolved))]
    UnresolvedReference {
        directive: String,
        target: String,
        included_from: String,
    },

    #[error("cyclic include detected: {}", chain.join(" -> "))]
    #[diagnostic(code(amalgam::resolve::cycle))]
    CyclicInclude { chain: Vec<String> },

    #[error("failed to write `{}`", path.display())]
    #[diagnostic(code(amalgam::write))]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(amalgam::entry))]
    EntryPoint {
        message: String,
        candidates: Vec<String>,
    },
}

impl AmalgamError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            AmalgamError::MissingMarker { path, marker } => {
                Diagnostic::error(format!("header is missing the structural marker `{}`", marker))
                    .with_location(path)
                    .with_context("every header must contain the marker line exactly once")
                    .with_suggestion(suggestions::MISSING_MARKER)
            }

            AmalgamError::Read { path, source } => {
                Diagnostic::error(format!("failed to read file: {}", source)).with_location(path)
            }

            AmalgamError::UnresolvedReference {
                directive,
                target,
                included_from,
            } => Diagnostic::error(format!(
                "`{}` does not name a header in the source tree",
                target
            ))
            .with_location(included_from)
            .with_context(format!("included by `{}`", directive))
            .with_suggestion(suggestions::UNRESOLVED_REFERENCE),

            AmalgamError::CyclicInclude { chain } => {
                let mut diag = Diagnostic::error("cyclic include detected")
                    .with_context(format!("cycle: {}", chain.join(" -> ")));
                if let Some(first) = chain.first() {
                    diag = diag.with_location(first);
                }
                diag.with_suggestion(suggestions::CYCLIC_INCLUDE)
            }

            AmalgamError::Write { path, source } => {
                Diagnostic::error(format!("failed to write output: {}", source))
                    .with_location(path)
                    .with_suggestion(suggestions::WRITE_FAILED)
            }

            AmalgamError::EntryPoint {
                message,
                candidates,
            } => {
                let mut diag = Diagnostic::error(message.clone());
                if !candidates.is_empty() {
                    diag = diag.with_context(format!("candidates: {}", candidates.join(", ")));
                }
                diag.with_suggestion(suggestions::ENTRY_POINT)
            }
        }
    }
}
