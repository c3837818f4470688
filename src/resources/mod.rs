//! Engine-side resource definitions
//!
//! Plain data types the interaction layer reads and mutates, independent of
//! any GPU implementation:
//! - Mesh: named, pickable geometry instance with metadata
//! - Material: base color and albedo texture slot
//! - Texture: embedded or URL-backed image, tiling factors
//! - Geometry: bounding volumes

pub mod geometry;
pub mod material;
pub mod mesh;
pub mod texture;

pub use geometry::BoundingBox;
pub use material::{Material, TextureSlot, parse_hex_color};
pub use mesh::{Mesh, is_flagged};
pub use texture::{Texture, TextureSource, TextureTransform};
