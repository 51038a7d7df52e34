//! Include resolution.
//!
//! Inlines every quoted include that names a header in the repository,
//! depth-first and in order of appearance. A header is inlined once, at
//! its first reference; later references to the same header are replaced
//! with nothing, which gives the amalgamated output the same effect an
//! include guard has. Headers are identified by their normalized
//! repository key, never by the literal directive text, so
//! `"a/../b.hpp"` and `"b.hpp"` dedupe against each other.
//!
//! Expansion stops when no quoted include naming a repository header is
//! left. A header that (transitively) includes itself while it is still
//! being expanded is a cycle and aborts resolution.

use std::collections::HashSet;

use crate::core::directive::scan_quoted;
use crate::core::errors::AmalgamError;
use crate::core::header::HeaderRepository;

/// Name used for the entry document in error messages when it is not a
/// repository member.
const ENTRY_DOCUMENT: &str = "<entry>";

/// The outcome of resolving an entry document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// The document with every internal include inlined.
    pub text: String,
    /// Headers inlined, in first-encountered order.
    pub inlined: Vec<String>,
    /// Quoted includes left in place because they name no header.
    pub passthrough: Vec<String>,
}

/// Resolves internal includes against a [`HeaderRepository`].
#[derive(Debug)]
pub struct Resolver<'a> {
    repo: &'a HeaderRepository,
    allow_unresolved: bool,
    entry: Option<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(repo: &'a HeaderRepository) -> Self {
        Resolver {
            repo,
            allow_unresolved: false,
            entry: None,
        }
    }

    /// Leave quoted includes that name no header untouched instead of
    /// failing; they are then treated as external includes.
    pub fn allow_unresolved(mut self, allow: bool) -> Self {
        self.allow_unresolved = allow;
        self
    }

    /// Repository key of the entry document, if it is a member.
    ///
    /// The entry counts as already inlined, so a header including the
    /// entry back is reported as a cycle.
    pub fn with_entry(mut self, key: impl Into<String>) -> Self {
        self.entry = Some(key.into());
        self
    }

    /// Resolve the entry document's text.
    pub fn resolve(&self, entry_text: &str) -> Result<Resolution, AmalgamError> {
        let mut state = ResolveState::default();
        let from = self.entry.clone().unwrap_or_else(|| ENTRY_DOCUMENT.to_string());

        if let Some(entry) = &self.entry {
            state.seen.insert(entry.clone());
        }
        state.stack.push(from.clone());

        let text = self.expand(&from, entry_text, &mut state)?;

        Ok(Resolution {
            text,
            inlined: state.inlined,
            passthrough: state.passthrough,
        })
    }

    fn expand(
        &self,
        from: &str,
        text: &str,
        state: &mut ResolveState,
    ) -> Result<String, AmalgamError> {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for directive in scan_quoted(text) {
            out.push_str(&text[last..directive.span.start]);
            last = directive.span.end;

            let Some(header) = self.repo.get(&directive.target) else {
                if !self.allow_unresolved {
                    return Err(AmalgamError::UnresolvedReference {
                        directive: directive.text,
                        target: directive.target,
                        included_from: from.to_string(),
                    });
                }
                tracing::debug!(
                    "`{}` in `{}` names no header, keeping it as an external include",
                    directive.target,
                    from
                );
                if !state.passthrough.contains(&directive.target) {
                    state.passthrough.push(directive.target.clone());
                }
                out.push_str(&directive.text);
                continue;
            };

            let target = header.path();

            if let Some(pos) = state.stack.iter().position(|open| open == target) {
                let mut chain = state.stack[pos..].to_vec();
                chain.push(target.to_string());
                return Err(AmalgamError::CyclicInclude { chain });
            }

            if !state.seen.insert(target.to_string()) {
                tracing::debug!("`{}` already inlined, dropping include in `{}`", target, from);
                continue;
            }

            tracing::debug!("inlining `{}` into `{}`", target, from);
            state.inlined.push(target.to_string());
            state.stack.push(target.to_string());
            let body = self.expand(target, header.body(), state)?;
            state.stack.pop();

            out.push_str(&body);
        }

        out.push_str(&text[last..]);
        Ok(out)
    }
}

#[derive(Debug, Default)]
struct ResolveState {
    /// Headers inlined so far (plus the entry).
    seen: HashSet<String>,
    /// Headers currently being expanded, outermost first.
    stack: Vec<String>,
    inlined: Vec<String>,
    passthrough: Vec<String>,
}

/// Resolve `entry_text` against `repo` with default settings.
pub fn resolve(entry_text: &str, repo: &HeaderRepository) -> Result<String, AmalgamError> {
    Resolver::new(repo).resolve(entry_text).map(|r| r.text)
}
