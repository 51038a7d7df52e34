//! Test fixtures for header trees.

use std::fs;
use std::path::Path;

/// Fixture for a project holding a header tree and a license file.
///
/// Headers are written below `includes/`, the license to `LICENSE`.
#[derive(Debug, Clone)]
pub struct HeaderTreeFixture {
    /// License file content.
    pub license: String,
    /// Files relative to `includes/` and their full content.
    pub files: Vec<(String, String)>,
}

impl HeaderTreeFixture {
    /// Create an empty fixture with an MIT license line.
    pub fn new() -> Self {
        HeaderTreeFixture {
            license: "MIT License\n".to_string(),
            files: Vec::new(),
        }
    }

    /// Set the license text.
    pub fn license(mut self, text: impl Into<String>) -> Self {
        self.license = text.into();
        self
    }

    /// Add a header whose content is a `#pragma once` line followed by `body`.
    pub fn header(self, path: impl Into<String>, body: &str) -> Self {
        self.raw(path, format!("#pragma once\n{}", body))
    }

    /// Add a file with exactly `content`.
    pub fn raw(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push((path.into(), content.into()));
        self
    }

    /// Write the fixture below `root`.
    pub fn write(&self, root: &Path) {
        let includes = root.join("includes");
        fs::create_dir_all(&includes).unwrap();

        for (path, content) in &self.files {
            let full = includes.join(path);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(full, content).unwrap();
        }

        fs::write(root.join("LICENSE"), &self.license).unwrap();
    }
}

impl Default for HeaderTreeFixture {
    fn default() -> Self {
        Self::new()
    }
}
