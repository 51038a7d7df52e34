//! License banner injection.

use crate::core::marker::StructuralMarker;

/// Turn license text into a line-comment block, one comment per line.
///
/// Trailing blank lines of the license are dropped; blank lines inside it
/// become a bare comment token.
pub fn comment_block(license: &str, token: &str) -> String {
    let mut block = String::with_capacity(license.len() + 16);

    for line in license.trim_end().lines() {
        let line = line.trim_end();
        if line.is_empty() {
            block.push_str(token);
        } else {
            block.push_str(token);
            block.push(' ');
            block.push_str(line);
        }
        block.push('\n');
    }

    block
}

/// Place the license banner right after the first marker line.
///
/// The result is the marker line, the banner, a blank line, and then the
/// rest of the document after the marker. Anything before the marker
/// (the entry header's own prelude) is dropped. Later marker lines are
/// ordinary text and are left alone.
pub fn inject_license(
    text: &str,
    license: &str,
    marker: &StructuralMarker,
    token: &str,
) -> String {
    let banner = comment_block(license, token);
    let rest = match marker.find(text) {
        Some(range) => &text[range.end..],
        None => text,
    };

    let mut out = String::with_capacity(rest.len() + banner.len() + 32);
    out.push_str(&marker.to_line());
    out.push_str(&banner);
    out.push('\n');
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_block() {
        let block = comment_block("MIT License\n\nCopyright (c) 2025\n", "//");
        assert_eq!(block, "// MIT License\n//\n// Copyright (c) 2025\n");
    }

    #[test]
    fn test_comment_block_other_token() {
        assert_eq!(comment_block("line one\r\nline two", "#"), "# line one\n# line two\n");
    }

    #[test]
    fn test_inject_after_marker() {
        let text = "// local prelude\n#pragma once\n\n#include <vector>\n\nint a;\n";

        let out = inject_license(text, "MIT License\n", &StructuralMarker::default(), "//");

        assert_eq!(out, "#pragma once\n// MIT License\n\n\n#include <vector>\n\nint a;\n");
    }

    #[test]
    fn test_only_first_marker_is_split() {
        let text = "#pragma once\na\n#pragma once\nb\n";

        let out = inject_license(text, "L", &StructuralMarker::default(), "//");

        assert_eq!(out, "#pragma once\n// L\n\na\n#pragma once\nb\n");
    }

    #[test]
    fn test_missing_marker_adds_one() {
        let out = inject_license("int a;\n", "L", &StructuralMarker::default(), "//");
        assert_eq!(out, "#pragma once\n// L\n\nint a;\n");
    }
}
