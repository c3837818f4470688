use glam::Vec3;

use crate::errors::{AtelierError, Result};
use crate::resources::texture::TextureTransform;
use crate::scene::TextureKey;

/// Parses `#rrggbb`, `rrggbb` or `#rgb` into a color with components in `[0, 1]`.
pub fn parse_hex_color(hex: &str) -> Result<Vec3> {
    let invalid = || AtelierError::InvalidColor(hex.to_string());

    let digits = hex.trim().strip_prefix('#').unwrap_or(hex.trim());
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    let (r, g, b) = match digits.len() {
        6 => (channel(&digits[0..2])?, channel(&digits[2..4])?, channel(&digits[4..6])?),
        3 => {
            // #rgb expands each nibble: #fa0 == #ffaa00
            let r = channel(&digits[0..1])?;
            let g = channel(&digits[1..2])?;
            let b = channel(&digits[2..3])?;
            (r * 17, g * 17, b * 17)
        }
        _ => return Err(invalid()),
    };

    Ok(Vec3::new(f32::from(r), f32::from(g), f32::from(b)) / 255.0)
}

/// A texture bound to a material slot together with its UV transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureSlot {
    pub texture: TextureKey,
    pub transform: TextureTransform,
}

/// PBR material as seen by the customization layer.
///
/// Base color and albedo texture are independent: assigning one never
/// clears the other, the renderer tints the texture by the color.
#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    pub base_color: Vec3,
    pub albedo_texture: Option<TextureSlot>,
}

impl Material {
    pub fn new(name: impl Into<String>, base_color: Vec3) -> Self {
        Self {
            name: name.into(),
            base_color,
            albedo_texture: None,
        }
    }

    #[inline]
    pub fn set_base_color(&mut self, color: Vec3) {
        self.base_color = color;
    }

    /// Binds `texture` with uniform `tiling` on both axes in one step.
    pub fn set_albedo_texture(&mut self, texture: TextureKey, tiling: f32) {
        self.albedo_texture = Some(TextureSlot {
            texture,
            transform: TextureTransform::tiled(tiling),
        });
    }

    pub fn clear_albedo_texture(&mut self) {
        self.albedo_texture = None;
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new("Material", Vec3::ONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_hex_expands_nibbles() {
        let short = parse_hex_color("#fa0").unwrap();
        let long = parse_hex_color("#ffaa00").unwrap();
        assert_eq!(short, long);
    }

    #[test]
    fn rejects_non_ascii_without_panicking() {
        assert!(parse_hex_color("#ééé").is_err());
    }
}
