//! Header files and the in-memory header repository.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::core::directive::scan_quoted;
use crate::core::errors::AmalgamError;
use crate::core::marker::StructuralMarker;
use crate::util::fs::{relative_slash_path, unix_newlines};

/// A header loaded from the source tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFile {
    path: String,
    content: String,
    body_start: usize,
}

impl HeaderFile {
    /// Split `content` at the first marker line.
    ///
    /// Returns `None` when the marker is absent.
    pub fn parse(
        path: impl Into<String>,
        content: impl Into<String>,
        marker: &StructuralMarker,
    ) -> Option<Self> {
        let content = content.into();
        let body_start = marker.find(&content)?.end;
        Some(HeaderFile {
            path: path.into(),
            content,
            body_start,
        })
    }

    /// Repository key: the path relative to the source tree, `/`-separated.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The whole file as read from disk.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Everything after the first marker line.
    pub fn body(&self) -> &str {
        &self.content[self.body_start..]
    }
}

/// Every header under a source tree, keyed by relative path.
///
/// Built once per run and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct HeaderRepository {
    root: PathBuf,
    headers: BTreeMap<String, HeaderFile>,
}

impl HeaderRepository {
    /// Load every `*.{extension}` file below `root`.
    ///
    /// Fails on the first file that lacks the marker.
    pub fn load(
        root: &Path,
        extension: &str,
        marker: &StructuralMarker,
    ) -> Result<Self, AmalgamError> {
        let extension = extension.trim_start_matches('.');
        let mut headers = BTreeMap::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                AmalgamError::Read {
                    path,
                    source: e.into(),
                }
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(extension) {
                continue;
            }

            let Some(key) = relative_slash_path(root, path) else {
                tracing::warn!("skipping header outside the source tree: {}", path.display());
                continue;
            };

            let content = std::fs::read_to_string(path)
                .map(unix_newlines)
                .map_err(|source| AmalgamError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

            let header = HeaderFile::parse(key.clone(), content, marker).ok_or_else(|| {
                AmalgamError::MissingMarker {
                    path: path.to_path_buf(),
                    marker: marker.as_str().to_string(),
                }
            })?;

            tracing::debug!("loaded header `{}`", key);
            headers.insert(key, header);
        }

        tracing::info!("loaded {} headers from {}", headers.len(), root.display());

        Ok(HeaderRepository {
            root: root.to_path_buf(),
            headers,
        })
    }

    /// Build a repository from already-parsed headers.
    pub fn from_headers(root: impl Into<PathBuf>, headers: impl IntoIterator<Item = HeaderFile>) -> Self {
        HeaderRepository {
            root: root.into(),
            headers: headers
                .into_iter()
                .map(|h| (h.path.clone(), h))
                .collect(),
        }
    }

    /// The source tree this repository was loaded from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Look up a header by repository key.
    pub fn get(&self, key: &str) -> Option<&HeaderFile> {
        self.headers.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.headers.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Headers in key order.
    pub fn iter(&self) -> impl Iterator<Item = &HeaderFile> {
        self.headers.values()
    }

    /// Find the single header that no other header includes.
    pub fn detect_entry(&self) -> Result<&HeaderFile, AmalgamError> {
        let included: HashSet<String> = self
            .iter()
            .flat_map(|h| scan_quoted(h.body()))
            .map(|d| d.target)
            .collect();

        let roots: Vec<&HeaderFile> = self
            .iter()
            .filter(|h| !included.contains(h.path()))
            .collect();

        match roots.as_slice() {
            [only] => Ok(only),
            [] => Err(AmalgamError::EntryPoint {
                message: format!(
                    "could not find an entry header in {}: every header is included by another",
                    self.root.display()
                ),
                candidates: Vec::new(),
            }),
            many => Err(AmalgamError::EntryPoint {
                message: format!(
                    "found {} candidate entry headers in {}",
                    many.len(),
                    self.root.display()
                ),
                candidates: many.iter().map(|h| h.path().to_string()).collect(),
            }),
        }
    }
}
