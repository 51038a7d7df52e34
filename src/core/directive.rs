//! Include directive scanning.
//!
//! Header contents are treated as opaque text; the only syntax recognised
//! is the `#include` directive. Quoted includes (`#include "a/b.hpp"`) may
//! refer to headers in the source tree, angled includes (`#include <vector>`)
//! never do.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Quoted includes anywhere in the text.
static QUOTED_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"#include[ \t]*"([^"\n]*)""#).unwrap());

/// Any include directive, up to the end of its line.
static ANY_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[ \t]*#include[ \t]*([<"])[^\n]*"#).unwrap());

/// The delimiter style of an include directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `#include "path"`
    Quoted,
    /// `#include <path>`
    Angled,
}

/// One include directive found in a text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    /// The full matched directive, as written.
    pub text: String,
    /// The include target. For quoted directives this is the normalized
    /// repository key; for angled directives it is the raw text between
    /// the brackets.
    pub target: String,
    /// Byte range of `text` in the scanned buffer.
    pub span: Range<usize>,
    /// Delimiter style.
    pub kind: DirectiveKind,
}

impl IncludeDirective {
    /// The directive text with surrounding whitespace removed.
    ///
    /// This is the identity used when deduplicating hoisted includes.
    pub fn canonical(&self) -> &str {
        self.text.trim()
    }
}

/// Find every quoted include in `text`, in order of appearance.
pub fn scan_quoted(text: &str) -> Vec<IncludeDirective> {
    QUOTED_INCLUDE
        .captures_iter(text)
        .map(|caps| {
            let whole = caps.get(0).unwrap();
            IncludeDirective {
                text: whole.as_str().to_string(),
                target: normalize_target(&caps[1]),
                span: whole.range(),
                kind: DirectiveKind::Quoted,
            }
        })
        .collect()
}

/// Find every include directive in `text` regardless of delimiter.
///
/// The match runs to the end of the line so that trailing comments travel
/// with the directive when it is relocated.
pub fn scan_all(text: &str) -> Vec<IncludeDirective> {
    ANY_INCLUDE
        .captures_iter(text)
        .map(|caps| {
            let whole = caps.get(0).unwrap();
            let kind = if &caps[1] == "<" {
                DirectiveKind::Angled
            } else {
                DirectiveKind::Quoted
            };
            let directive = whole.as_str().trim();
            let target = directive
                .trim_start_matches("#include")
                .trim_start()
                .trim_start_matches(['<', '"'])
                .split(['>', '"'])
                .next()
                .unwrap_or_default()
                .to_string();
            IncludeDirective {
                text: whole.as_str().to_string(),
                target,
                span: whole.range(),
                kind,
            }
        })
        .collect()
}

/// Normalize an include target into a repository key.
///
/// Backslashes become forward slashes, `.` segments are dropped and `..`
/// segments pop the previous segment. A `..` that would escape the source
/// tree is kept so the lookup fails instead of aliasing another file.
pub fn normalize_target(target: &str) -> String {
    let unified = target.trim().replace('\\', "/");
    let mut parts: Vec<&str> = Vec::new();

    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    parts.join("/")
}
