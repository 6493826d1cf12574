//! A tracked file inside a workspace.

use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One tracked resource (usually an open file).
///
/// Identity is the key; two entries with the same key are equal even if the
/// other fields differ. All fields are fixed at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceEntry {
    key: String,
    name: String,
    path: PathBuf,
}

impl ResourceEntry {
    pub fn new(key: impl Into<String>, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            path: path.into(),
        }
    }

    /// Build an entry whose key is derived from the path and whose name is
    /// the final path component.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            key: path.to_string_lossy().into_owned(),
            name,
            path: path.to_path_buf(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lowercased file extension, if any.
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
    }
}

impl PartialEq for ResourceEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ResourceEntry {}

impl Hash for ResourceEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}
