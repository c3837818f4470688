use std::sync::Arc;

use glam::Vec2;
use serde_json::Value;
use uuid::Uuid;

use crate::resources::mesh::is_flagged;

// ============================================================================
// 1. Texture transform (UV tiling)
// ============================================================================

/// Tiling of a texture slot: horizontal and vertical repeat factors
/// (`uScale` / `vScale`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureTransform {
    pub repeat: Vec2,
}

impl Default for TextureTransform {
    fn default() -> Self {
        Self { repeat: Vec2::ONE }
    }
}

impl TextureTransform {
    /// Uniform tiling on both axes.
    #[must_use]
    pub fn tiled(scale: f32) -> Self {
        Self { repeat: Vec2::splat(scale) }
    }

    #[inline]
    #[must_use]
    pub fn u_scale(&self) -> f32 { self.repeat.x }

    #[inline]
    #[must_use]
    pub fn v_scale(&self) -> f32 { self.repeat.y }
}

// ============================================================================
// 2. Texture asset
// ============================================================================

/// Where the encoded image of a texture lives.
#[derive(Debug, Clone)]
pub enum TextureSource {
    /// Encoded bytes embedded in the loaded asset (e.g. a glb buffer view).
    Embedded(Arc<[u8]>),
    /// A URL resolved by the asset layer.
    Url(String),
}

#[derive(Debug, Clone)]
pub struct Texture {
    pub uuid: Uuid,
    pub name: String,
    pub source: TextureSource,

    /// Free-form engine metadata. Flagged textures are offered as swatches.
    pub metadata: Option<Value>,

    /// Decoded dimensions, when known.
    pub size: Option<(u32, u32)>,
}

impl Texture {
    pub fn embedded(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::new(name, TextureSource::Embedded(bytes.into()))
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self::new(url.clone(), TextureSource::Url(url))
    }

    fn new(name: impl Into<String>, source: TextureSource) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            source,
            metadata: None,
            size: None,
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    #[inline]
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        is_flagged(self.metadata.as_ref())
    }
}
