//! Include hoisting.
//!
//! Once internal includes are resolved, every include left in the document
//! is external. Those are pulled out of the body, deduplicated, and put
//! back as one block right after the structural marker.

use std::collections::HashSet;

use crate::core::directive::scan_all;
use crate::core::marker::StructuralMarker;

/// A document with its external includes relocated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hoisted {
    pub text: String,
    /// Distinct includes in the inserted block, in first-seen order.
    pub includes: Vec<String>,
}

/// Hoist every include directive in `text` to just after the first marker.
///
/// Duplicate directives are dropped, keeping first-seen order. If the
/// document has no marker the block is placed at the very top.
pub fn hoist_includes(text: &str, marker: &StructuralMarker) -> Hoisted {
    let mut stripped = String::with_capacity(text.len());
    let mut includes: Vec<String> = Vec::new();
    let mut seen = HashSet::new();
    let mut last = 0;

    for directive in scan_all(text) {
        stripped.push_str(&text[last..directive.span.start]);
        last = directive.span.end;

        let canonical = directive.canonical().to_string();
        if seen.insert(canonical.clone()) {
            includes.push(canonical);
        }
    }
    stripped.push_str(&text[last..]);

    tracing::debug!("hoisting {} distinct external includes", includes.len());

    let block = format!("\n{}\n\n", includes.join("\n"));
    let text = match marker.find(&stripped) {
        Some(range) => {
            let mut out = String::with_capacity(stripped.len() + block.len() + 1);
            out.push_str(&stripped[..range.start]);
            out.push_str(&marker.to_line());
            out.push_str(&block);
            out.push_str(&stripped[range.end..]);
            out
        }
        None => format!("{}{}", block.trim_start_matches('\n'), stripped),
    };

    Hoisted { text, includes }
}

/// Hoist external includes, returning only the rewritten text.
pub fn hoist(text: &str, marker: &StructuralMarker) -> String {
    hoist_includes(text, marker).text
}
