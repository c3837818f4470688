use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::GenericImageView;
use rustc_hash::FxHashMap;
use url::Url;

use crate::assets::blob::{BLOB_URL_PREFIX, BlobStore};
use crate::assets::io::AssetReader;
use crate::errors::{AtelierError, Result};
use crate::resources::Texture;
use crate::scene::{Scene, TextureKey};

/// Resolves swatch URLs into scene textures.
///
/// Supported sources:
/// - `blob:` object URLs created by the session's [`BlobStore`]
/// - `data:` URIs with a base64 payload
/// - `file:` URLs
/// - site-absolute static paths (`/models/bt/seat__1.jpg`), read through the
///   configured [`AssetReader`]
///
/// Every resolved image is decoded once to validate its format. Resolved
/// textures are registered without the selectable flag and cached per URL.
/// They belong to the resolver, not to any loaded model, and are disposed by
/// [`TextureResolver::release_unbound`] once no material uses them.
pub struct TextureResolver {
    blobs: BlobStore,
    reader: Box<dyn AssetReader>,
    cache: FxHashMap<String, TextureKey>,
}

impl TextureResolver {
    pub fn new(blobs: BlobStore, reader: impl AssetReader + 'static) -> Self {
        Self {
            blobs,
            reader: Box::new(reader),
            cache: FxHashMap::default(),
        }
    }

    /// Returns the scene texture for `url`, loading it on first use.
    pub fn resolve(&mut self, scene: &mut Scene, url: &str) -> Result<TextureKey> {
        if let Some(&key) = self.cache.get(url) {
            if scene.texture(key).is_some() {
                return Ok(key);
            }
            self.cache.remove(url);
        }

        let bytes = self.fetch(url)?;
        let (width, height) = image::load_from_memory(&bytes)?.dimensions();

        let mut texture = Texture::embedded(url, bytes);
        texture.size = Some((width, height));
        let key = scene.add_texture(texture);

        log::debug!("Resolved swatch texture {url} ({width}x{height})");
        self.cache.insert(url.to_string(), key);
        Ok(key)
    }

    /// Removes resolved textures that no material is bound to any more, and
    /// forgets cache entries whose texture is gone. Returns the number of
    /// textures removed from the scene.
    pub fn release_unbound(&mut self, scene: &mut Scene) -> usize {
        let bound = scene.bound_textures();
        let unbound: Vec<TextureKey> = self
            .cache
            .values()
            .copied()
            .filter(|key| !bound.contains(key))
            .collect();

        let removed = scene.remove_textures(&unbound);
        self.cache.retain(|_, key| scene.texture(*key).is_some());
        removed
    }

    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    fn fetch(&self, url: &str) -> Result<Arc<[u8]>> {
        if url.starts_with(BLOB_URL_PREFIX) {
            return self
                .blobs
                .get(url)
                .ok_or_else(|| AtelierError::UnresolvedSwatch(url.to_string()));
        }
        if let Some(rest) = url.strip_prefix("data:") {
            return decode_data_uri(rest).map(Into::into);
        }
        if url.starts_with('/') || !url.contains(':') {
            return self.reader.read_bytes(url).map(Into::into);
        }

        let parsed = Url::parse(url)?;
        match parsed.scheme() {
            "file" => {
                let path = parsed
                    .to_file_path()
                    .map_err(|()| AtelierError::UnresolvedSwatch(url.to_string()))?;
                Ok(std::fs::read(path)?.into())
            }
            // No network transport in the core.
            _ => Err(AtelierError::UnresolvedSwatch(url.to_string())),
        }
    }
}

/// Decodes the part of a data URI after `data:`.
fn decode_data_uri(rest: &str) -> Result<Vec<u8>> {
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| AtelierError::DataUri("missing ',' separator".to_string()))?;
    if !header.ends_with(";base64") {
        return Err(AtelierError::DataUri(format!("unsupported encoding '{header}'")));
    }
    Ok(STANDARD.decode(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_requires_base64_payload() {
        assert!(matches!(decode_data_uri("image/png,abc"), Err(AtelierError::DataUri(_))));
        assert!(matches!(decode_data_uri("image/png;base64"), Err(AtelierError::DataUri(_))));
        assert_eq!(decode_data_uri("image/png;base64,AQID").ok(), Some(vec![1, 2, 3]));
    }
}
