use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use uuid::Uuid;

/// Scheme prefix of every object URL handed out by [`BlobStore`].
pub const BLOB_URL_PREFIX: &str = "blob:atelier/";

// Shared map, protected by a lock.
type BlobMap = FxHashMap<String, Arc<[u8]>>;

/// Session-wide registry of in-memory object URLs.
///
/// Each embedded texture buffer extracted from a model is exposed as a
/// `blob:atelier/<uuid>` URL that stays loadable until [`BlobStore::revoke`]
/// is called. The store is a cheap handle: clones share the same registry.
#[derive(Clone, Default)]
pub struct BlobStore {
    inner: Arc<RwLock<BlobMap>>,
}

impl BlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// [Write] Registers `bytes` and returns a fresh object URL for them.
    pub fn create_object_url(&self, bytes: impl Into<Arc<[u8]>>) -> String {
        let url = format!("{BLOB_URL_PREFIX}{}", Uuid::new_v4());
        self.inner.write().insert(url.clone(), bytes.into());
        url
    }

    /// [Read] Shared buffer behind an object URL.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<Arc<[u8]>> {
        self.inner.read().get(url).cloned()
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.inner.read().contains_key(url)
    }

    /// [Write] Releases an object URL. Returns `false` for unknown URLs.
    pub fn revoke(&self, url: &str) -> bool {
        self.inner.write().remove(url).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl std::fmt::Debug for BlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobStore").field("len", &self.len()).finish()
    }
}
