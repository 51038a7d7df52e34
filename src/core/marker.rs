//! The structural marker line.
//!
//! Every header in the source tree carries one marker line (by default
//! `#pragma once`) separating its boilerplate prelude from its content.
//! The marker is also the splice point for hoisted includes and the
//! license banner in the amalgamated output.

use std::fmt;
use std::ops::Range;

/// Default marker used by header-only C++ libraries.
pub const DEFAULT_MARKER: &str = "#pragma once";

/// A fixed delimiter line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralMarker {
    line: String,
}

impl StructuralMarker {
    /// Create a marker from its line text (without the trailing newline).
    pub fn new(line: impl Into<String>) -> Self {
        let line = line.into();
        StructuralMarker {
            line: line.trim_end_matches(['\r', '\n']).to_string(),
        }
    }

    /// The marker text without a newline.
    pub fn as_str(&self) -> &str {
        &self.line
    }

    /// The marker as a complete line, including the newline.
    pub fn to_line(&self) -> String {
        format!("{}\n", self.line)
    }

    /// Locate the first marker line in `text`.
    ///
    /// The marker only counts when it starts a line and is followed by a
    /// newline or the end of the text. The returned range covers the
    /// marker and its newline.
    pub fn find(&self, text: &str) -> Option<Range<usize>> {
        self.find_all(text).next()
    }

    /// Number of marker lines in `text`.
    pub fn count(&self, text: &str) -> usize {
        self.find_all(text).count()
    }

    /// Everything after the first marker line, or `None` if there is none.
    pub fn body<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.find(text).map(|range| &text[range.end..])
    }

    fn find_all<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Range<usize>> + 'a {
        text.match_indices(self.line.as_str())
            .filter_map(move |(start, matched)| {
                let at_line_start = start == 0 || text.as_bytes()[start - 1] == b'\n';
                let end = start + matched.len();
                let rest = &text[end..];
                if !at_line_start {
                    return None;
                }
                if rest.is_empty() {
                    Some(start..end)
                } else if rest.starts_with('\n') {
                    Some(start..end + 1)
                } else if rest.starts_with("\r\n") {
                    Some(start..end + 2)
                } else {
                    None
                }
            })
    }
}

impl Default for StructuralMarker {
    fn default() -> Self {
        StructuralMarker::new(DEFAULT_MARKER)
    }
}

impl fmt::Display for StructuralMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_after_first_marker() {
        let marker = StructuralMarker::default();
        let text = "// Copyright\n#pragma once\nint x;\n";
        assert_eq!(marker.body(text), Some("int x;\n"));
    }

    #[test]
    fn test_marker_must_start_a_line() {
        let marker = StructuralMarker::default();
        assert_eq!(marker.find("// #pragma once\nint x;\n"), None);
        assert_eq!(marker.find("#pragma once_not\n"), None);
    }

    #[test]
    fn test_marker_at_end_of_text() {
        let marker = StructuralMarker::default();
        assert_eq!(marker.body("#pragma once"), Some(""));
    }

    #[test]
    fn test_count() {
        let marker = StructuralMarker::default();
        assert_eq!(marker.count("#pragma once\na\n#pragma once\nb\n"), 2);
        assert_eq!(marker.count("nothing here\n"), 0);
    }

    #[test]
    fn test_custom_marker_trims_newline() {
        let marker = StructuralMarker::new("#pragma once\n");
        assert_eq!(marker.as_str(), "#pragma once");
        assert_eq!(marker.to_line(), "#pragma once\n");
    }
}
