//! Texture swatch extraction
//!
//! Turns the user-facing textures embedded in a loaded model into loadable
//! URLs for the thumbnail picker. Only textures whose metadata carries the
//! selectable flag take part; internal engine textures (normal maps, light
//! maps, resolved swatches) are skipped.

use crate::assets::blob::BlobStore;
use crate::resources::TextureSource;
use crate::scene::{Scene, TextureKey};

/// A swatch extracted from the loaded model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureSwatch {
    pub source_url: String,
    /// The model texture the swatch was taken from.
    pub texture: TextureKey,
}

/// Extracts one swatch per flagged texture, in texture registration order.
///
/// Embedded buffers are registered in `blobs` as object URLs which stay valid
/// for the whole session; flagged textures that already reference a URL
/// yield that URL unchanged.
pub fn extract_swatches(scene: &Scene, blobs: &BlobStore) -> Vec<TextureSwatch> {
    scene
        .textures()
        .filter(|(_, texture)| texture.is_selectable())
        .map(|(key, texture)| {
            let source_url = match &texture.source {
                TextureSource::Embedded(bytes) => blobs.create_object_url(bytes.clone()),
                TextureSource::Url(url) => url.clone(),
            };
            TextureSwatch { source_url, texture: key }
        })
        .collect()
}
