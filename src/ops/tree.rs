//! Include tree inspection.
//!
//! Shows which header pulls in which, in the same depth-first order the
//! resolver inlines them.

use std::collections::HashSet;

use crate::core::directive::{normalize_target, scan_all, scan_quoted, DirectiveKind};
use crate::core::header::HeaderRepository;

/// One header in the include tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeNode {
    /// Repository key
    pub path: String,
    /// Already inlined earlier; its children are not listed again
    pub duplicate: bool,
    /// Includes a header that is still being expanded above it
    pub cyclic: bool,
    /// Includes that are not internal, as written
    pub external: Vec<String>,
    pub children: Vec<IncludeNode>,
}

/// Build the include tree rooted at `entry`.
///
/// Returns `None` if `entry` is not in the repository.
pub fn include_tree(repo: &HeaderRepository, entry: &str) -> Option<IncludeNode> {
    repo.get(entry)?;
    let mut seen = HashSet::new();
    let mut stack = Vec::new();
    Some(build_node(repo, entry, &mut seen, &mut stack))
}

fn build_node(
    repo: &HeaderRepository,
    path: &str,
    seen: &mut HashSet<String>,
    stack: &mut Vec<String>,
) -> IncludeNode {
    let mut node = IncludeNode {
        path: path.to_string(),
        duplicate: false,
        cyclic: false,
        external: Vec::new(),
        children: Vec::new(),
    };

    if stack.iter().any(|open| open == path) {
        node.cyclic = true;
        return node;
    }
    if !seen.insert(path.to_string()) {
        node.duplicate = true;
        return node;
    }

    let Some(header) = repo.get(path) else {
        return node;
    };

    // Children follow the resolver's matching; externals follow the hoister's.
    stack.push(path.to_string());
    for directive in scan_quoted(header.body()) {
        if repo.contains(&directive.target) {
            node.children.push(build_node(repo, &directive.target, seen, stack));
        }
    }
    stack.pop();

    node.external = scan_all(header.body())
        .into_iter()
        .filter(|d| {
            d.kind != DirectiveKind::Quoted || !repo.contains(&normalize_target(&d.target))
        })
        .map(|d| d.canonical().to_string())
        .collect();

    node
}

/// Render a tree with box-drawing prefixes.
///
/// Duplicates are marked `(*)`, cycles `(cycle)`. `max_depth` limits how
/// many levels below the root are shown.
pub fn render_tree(root: &IncludeNode, max_depth: usize, show_external: bool) -> String {
    let mut out = String::new();
    render_node(root, 0, max_depth, show_external, &mut out);
    out
}

fn render_node(
    node: &IncludeNode,
    depth: usize,
    max_depth: usize,
    show_external: bool,
    out: &mut String,
) {
    if depth > max_depth {
        return;
    }

    let prefix = if depth == 0 {
        String::new()
    } else {
        format!("{}├── ", "│   ".repeat(depth - 1))
    };

    let marker = if node.cyclic {
        " (cycle)"
    } else if node.duplicate {
        " (*)"
    } else {
        ""
    };

    out.push_str(&format!("{}{}{}\n", prefix, node.path, marker));

    if show_external && depth < max_depth {
        for external in &node.external {
            out.push_str(&format!("{}├── {}\n", "│   ".repeat(depth), external));
        }
    }

    for child in &node.children {
        render_node(child, depth + 1, max_depth, show_external, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::header::HeaderFile;
    use crate::core::marker::StructuralMarker;

    fn repo(files: &[(&str, &str)]) -> HeaderRepository {
        let marker = StructuralMarker::default();
        HeaderRepository::from_headers(
            "includes",
            files.iter().map(|(path, body)| {
                HeaderFile::parse(*path, format!("#pragma once\n{}", body), &marker).unwrap()
            }),
        )
    }

    #[test]
    fn test_tree_marks_duplicates() {
        let repo = repo(&[
            ("lib.hpp", "#include \"a.hpp\"\n#include \"b.hpp\"\n"),
            ("a.hpp", "#include \"b.hpp\"\n#include <vector>\n"),
            ("b.hpp", "int b;\n"),
        ]);

        let tree = include_tree(&repo, "lib.hpp").unwrap();

        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[0].path, "a.hpp");
        assert_eq!(tree.children[0].external, vec!["#include <vector>"]);
        assert!(!tree.children[0].children[0].duplicate);
        assert!(tree.children[1].duplicate);

        assert_eq!(
            render_tree(&tree, usize::MAX, false),
            "lib.hpp\n├── a.hpp\n│   ├── b.hpp\n├── b.hpp (*)\n"
        );
    }

    #[test]
    fn test_tree_marks_cycles() {
        let repo = repo(&[("a.hpp", "#include \"b.hpp\"\n"), ("b.hpp", "#include \"a.hpp\"\n")]);

        let tree = include_tree(&repo, "a.hpp").unwrap();

        assert!(tree.children[0].children[0].cyclic);
        assert!(render_tree(&tree, usize::MAX, false).contains("a.hpp (cycle)"));
    }

    #[test]
    fn test_tree_depth_and_externals() {
        let repo = repo(&[
            ("lib.hpp", "#include \"a.hpp\"\n#include <utility>\n"),
            ("a.hpp", "#include \"b.hpp\"\n"),
            ("b.hpp", "int b;\n"),
        ]);

        let tree = include_tree(&repo, "lib.hpp").unwrap();

        assert_eq!(
            render_tree(&tree, 1, true),
            "lib.hpp\n├── #include <utility>\n├── a.hpp\n"
        );
        assert!(include_tree(&repo, "missing.hpp").is_none());
    }

    #[test]
    fn test_tree_matches_resolver_on_shared_lines() {
        let repo = repo(&[
            ("lib.hpp", "#include \"a.hpp\" #include \"b.hpp\"\n"),
            ("a.hpp", "int a;\n"),
            ("b.hpp", "int b;\n"),
        ]);

        let tree = include_tree(&repo, "lib.hpp").unwrap();

        let children: Vec<&str> = tree.children.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(children, vec!["a.hpp", "b.hpp"]);
        assert!(tree.external.is_empty());
    }
}
