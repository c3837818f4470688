use rustc_hash::FxHashSet;

use crate::config::TilingProfile;
use crate::errors::{AtelierError, Result};
use crate::resources::parse_hex_color;
use crate::scene::{MaterialKey, MeshKey, Scene, TextureKey};

/// Materials behind `selection`, each listed once, in selection order.
fn selected_materials(scene: &Scene, selection: &[MeshKey]) -> Vec<MaterialKey> {
    let mut seen = FxHashSet::default();
    selection
        .iter()
        .filter_map(|&key| scene.mesh(key).map(|mesh| mesh.material))
        .filter(|material| seen.insert(*material))
        .collect()
}

/// Sets the base color of every material in the selection.
///
/// An empty selection is a no-op and never fails, even for malformed input.
/// The albedo texture is left as is. Returns the number of materials written.
pub fn apply_color(scene: &mut Scene, selection: &[MeshKey], hex: &str) -> Result<usize> {
    if selection.is_empty() {
        return Ok(0);
    }
    let color = parse_hex_color(hex)?;

    let mut written = 0;
    for key in selected_materials(scene, selection) {
        if let Some(material) = scene.material_mut(key) {
            material.set_base_color(color);
            written += 1;
        }
    }
    Ok(written)
}

/// Binds `texture` as albedo of every material in the selection, tiled by
/// `tiling` on both axes. The base color is left as is.
///
/// The texture must already be registered in the scene; nothing is written
/// otherwise. Returns the number of materials written.
pub fn apply_texture(
    scene: &mut Scene,
    selection: &[MeshKey],
    texture: TextureKey,
    tiling: TilingProfile,
) -> Result<usize> {
    if selection.is_empty() {
        return Ok(0);
    }
    if scene.texture(texture).is_none() {
        return Err(AtelierError::UnknownTexture);
    }

    let scale = tiling.scale();
    let mut written = 0;
    for key in selected_materials(scene, selection) {
        if let Some(material) = scene.material_mut(key) {
            material.set_albedo_texture(texture, scale);
            written += 1;
        }
    }
    Ok(written)
}
