use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::errors::{AtelierError, Result};

/// Asset reader trait.
/// Reads static swatch images by a root-relative URI.
pub trait AssetReader: Send + Sync {
    fn read_bytes(&self, uri: &str) -> Result<Vec<u8>>;
}

/// Strips the leading `/` of a site-absolute path and rejects anything that
/// could escape the asset root.
pub(crate) fn relative_uri(uri: &str) -> Result<&str> {
    let relative = uri.trim_start_matches('/');
    let escapes = Path::new(relative)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if relative.is_empty() || escapes {
        return Err(AtelierError::UnresolvedSwatch(uri.to_string()));
    }
    Ok(relative)
}

/// Local file reader
pub struct FileAssetReader {
    root_path: PathBuf,
}

impl FileAssetReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { root_path: path.as_ref().to_path_buf() }
    }

    #[inline]
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }
}

impl AssetReader for FileAssetReader {
    fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        let path = self.root_path.join(relative_uri(uri)?);
        Ok(std::fs::read(path)?)
    }
}

/// In-memory reader, for hosts that bundle their swatches into the binary.
#[derive(Clone, Default)]
pub struct MemoryAssetReader {
    files: Arc<RwLock<FxHashMap<String, Arc<[u8]>>>>,
}

impl MemoryAssetReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `bytes` under `uri` (leading `/` ignored).
    pub fn insert(&self, uri: &str, bytes: impl Into<Arc<[u8]>>) {
        let key = uri.trim_start_matches('/').to_string();
        self.files.write().insert(key, bytes.into());
    }
}

impl AssetReader for MemoryAssetReader {
    fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        let key = relative_uri(uri)?;
        self.files
            .read()
            .get(key)
            .map(|bytes| bytes.to_vec())
            .ok_or_else(|| AtelierError::UnresolvedSwatch(uri.to_string()))
    }
}
