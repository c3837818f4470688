//! Configurator Settings
//!
//! [`ConfiguratorConfig`] bundles every product-wide constant of the
//! interaction layer: the group naming delimiter, the texture tiling profile,
//! the fixed swatch list offered next to the embedded ones, and the initial
//! camera rig.
//!
//! Settings are plain serde data and can be loaded from JSON:
//!
//! ```rust,ignore
//! use atelier::config::{ConfiguratorConfig, TilingProfile};
//!
//! let config = ConfiguratorConfig::from_json_str(r#"{ "tiling": "double" }"#)?;
//! assert_eq!(config.tiling, TilingProfile::Double);
//! ```
//!
//! Every field is optional in the JSON document; missing fields fall back to
//! [`Default`].

use std::f32::consts::{FRAC_PI_4, PI};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Default delimiter separating the group key from the part suffix
/// (`seat__1` belongs to group `seat`).
pub const DEFAULT_GROUP_DELIMITER: &str = "__";

// ---------------------------------------------------------------------------
// TilingProfile
// ---------------------------------------------------------------------------

/// Texture repeat applied on both UV axes whenever a swatch texture is
/// assigned to a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TilingProfile {
    /// 2x2 tiling, for large fabric patterns.
    Double,
    /// 3x3 tiling.
    #[default]
    Triple,
}

impl TilingProfile {
    #[inline]
    #[must_use]
    pub fn scale(self) -> f32 {
        match self {
            Self::Double => 2.0,
            Self::Triple => 3.0,
        }
    }
}

// ---------------------------------------------------------------------------
// CameraConfig
// ---------------------------------------------------------------------------

/// Initial arc-rotate camera rig and the framing rules applied after a load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    pub lower_radius_limit: Option<f32>,
    pub upper_radius_limit: Option<f32>,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub min_z: f32,
    pub wheel_precision: f32,
    pub wheel_delta_percentage: f32,
    pub pinch_precision: f32,
    pub pinch_delta_percentage: f32,

    /// Duration of the zoom-to-fit transition. Zero frames instantly.
    pub framing_time_ms: u64,
    /// Spring-back to the default elevation. `None` disables it.
    pub elevation_return_time_ms: Option<u64>,

    /// After framing, the upper radius limit becomes `factor * radius`.
    pub upper_radius_factor: f32,
    /// After framing, pinch precision becomes `scale / radius`.
    pub pinch_precision_scale: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            alpha: PI,
            beta: 0.5 + FRAC_PI_4,
            radius: 2.0,
            lower_radius_limit: Some(25.0),
            upper_radius_limit: Some(75.0),
            fov: 0.8,
            aspect: 16.0 / 9.0,
            min_z: 0.001,
            wheel_precision: 50.0,
            wheel_delta_percentage: 0.01,
            pinch_precision: 12.0,
            pinch_delta_percentage: 0.01,
            framing_time_ms: 0,
            elevation_return_time_ms: None,
            upper_radius_factor: 5.0,
            pinch_precision_scale: 200.0,
        }
    }
}

// ---------------------------------------------------------------------------
// ConfiguratorConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfiguratorConfig {
    pub group_delimiter: String,
    pub tiling: TilingProfile,

    /// Base URL prefixed to every entry of `static_swatches`.
    pub swatch_base_url: String,
    /// Fixed swatch file names offered regardless of the loaded model.
    pub static_swatches: Vec<String>,
    /// Filesystem directory that backs `swatch_base_url`.
    pub asset_root: PathBuf,

    /// Color applied by the "reset color" action.
    pub reset_color: String,
    /// Outline color of the highlight layer (linear RGB).
    pub highlight_color: [f32; 3],

    pub camera: CameraConfig,
}

impl Default for ConfiguratorConfig {
    fn default() -> Self {
        Self {
            group_delimiter: DEFAULT_GROUP_DELIMITER.to_string(),
            tiling: TilingProfile::default(),
            swatch_base_url: "/models/bt/".to_string(),
            static_swatches: [
                "seat__1.jpg",
                "seat__2.jpg",
                "seat__3.jpg",
                "seat__4.jpg",
                "wood__1.jpg",
                "wood__2.jpg",
                "wood__3.jpg",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            asset_root: PathBuf::from("public"),
            reset_color: "#ffffff".to_string(),
            highlight_color: [1.0, 1.0, 1.0],
            camera: CameraConfig::default(),
        }
    }
}

impl ConfiguratorConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Static swatch URLs, in declaration order.
    #[must_use]
    pub fn static_swatch_urls(&self) -> Vec<String> {
        self.static_swatches
            .iter()
            .map(|file| format!("{}{}", self.swatch_base_url, file))
            .collect()
    }
}
