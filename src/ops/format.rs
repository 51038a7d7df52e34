//! Blank-line normalization and output writing.

use std::borrow::Cow;
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tempfile::NamedTempFile;

use crate::core::errors::AmalgamError;

static BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").unwrap());

/// Collapse every run of two or more newlines into exactly two.
///
/// Idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> Cow<'_, str> {
    BLANK_RUNS.replace_all(text, "\n\n")
}

/// Write `contents` to `path`, creating parent directories as needed.
///
/// The text goes to a temporary file next to the destination which is
/// then renamed over it, so the destination is either untouched or
/// complete.
pub fn write_output(path: &Path, contents: &str) -> Result<(), AmalgamError> {
    let write_err = |source| AmalgamError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    tracing::debug!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_three_blank_lines_collapse() {
        assert_eq!(normalize("a\n\n\n\nb\n"), "a\n\nb\n");
    }

    #[test]
    fn test_single_blank_line_unchanged() {
        let text = "a\n\nb\n";
        assert!(matches!(normalize(text), Cow::Borrowed(_)));
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn test_idempotent() {
        for text in ["", "\n", "\n\n\n", "a\n\n\n\n\nb\n\n\nc", "#pragma once\n\n\n\nint a;\n"] {
            let once = normalize(text).into_owned();
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_write_output_creates_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("public/nested/lib.hpp");

        write_output(&path, "#pragma once\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "#pragma once\n");
        assert_eq!(fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_output_replaces_existing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("lib.hpp");
        fs::write(&path, "old").unwrap();

        write_output(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_write_output_fails_when_parent_is_a_file() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("public");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_output(&blocker.join("lib.hpp"), "x").unwrap_err();

        assert!(matches!(err, AmalgamError::Write { .. }));
    }
}
