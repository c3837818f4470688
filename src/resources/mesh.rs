use glam::Affine3A;
use serde_json::Value;

use crate::resources::geometry::BoundingBox;
use crate::scene::MaterialKey;

/// Returns `true` when an engine metadata payload marks its owner as
/// user-facing.
///
/// Any present value counts except `null` and `false`, matching how asset
/// exporters attach `extras` to customizable nodes and textures.
#[inline]
#[must_use]
pub fn is_flagged(metadata: Option<&Value>) -> bool {
    !matches!(metadata, None | Some(Value::Null | Value::Bool(false)))
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,

    // === Resource references ===
    pub material: MaterialKey,

    /// Free-form engine metadata. A flagged mesh is selectable and customizable.
    pub metadata: Option<Value>,

    // === Spatial data ===
    /// Bounds in mesh-local space.
    pub local_bounds: BoundingBox,
    pub world_matrix: Affine3A,

    /// Pointer picks on a mesh that is not pickable are ignored.
    pub pickable: bool,
}

impl Mesh {
    pub fn new(name: impl Into<String>, material: MaterialKey, local_bounds: BoundingBox) -> Self {
        Self {
            name: name.into(),
            material,
            metadata: None,
            local_bounds,
            world_matrix: Affine3A::IDENTITY,
            pickable: true,
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    #[must_use]
    pub fn with_pickable(mut self, pickable: bool) -> Self {
        self.pickable = pickable;
        self
    }

    #[must_use]
    pub fn with_world_matrix(mut self, world_matrix: Affine3A) -> Self {
        self.world_matrix = world_matrix;
        self
    }

    #[inline]
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        is_flagged(self.metadata.as_ref())
    }

    #[must_use]
    pub fn world_bounds(&self) -> BoundingBox {
        self.local_bounds.transform(&self.world_matrix)
    }
}
