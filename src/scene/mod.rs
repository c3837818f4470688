//! Scene module
//!
//! The explicit engine context the interaction layer operates on:
//! - Scene: mesh / material / texture pools with stable ordering
//! - ArcRotateCamera: orbit camera with radius limits and pinch/wheel precision
//! - FramingBehavior: zoom-to-fit and elevation return
//! - HighlightLayer: outline marker set kept in sync with the selection
//!
//! A renderer adapter mirrors this data into its own scene graph; tests use
//! it directly.

pub mod camera;
pub mod framing;
pub mod highlight;
#[allow(clippy::module_inception)]
pub mod scene;

pub use camera::ArcRotateCamera;
pub use framing::{FramingBehavior, FramingMode};
pub use highlight::HighlightLayer;
pub use scene::Scene;

use slotmap::new_key_type;

new_key_type! {
    pub struct MeshKey;
    pub struct MaterialKey;
    pub struct TextureKey;
}
