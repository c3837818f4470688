//! Camera auto-framing
//!
//! Runs once per completed model load. The box to frame is computed over
//! exactly the meshes reported by the load-completion event, compared by key
//! (identity), never by name: a previous model with identically named parts
//! cannot leak into the extents.
//!
//! After the zoom-to-fit, the camera limits are rescaled to the model:
//! - the lower radius limit is removed;
//! - the upper radius limit becomes `upper_radius_factor * radius`;
//! - pinch precision becomes `pinch_precision_scale / radius`, so touch zoom
//!   feels the same for small and large models.
//!
//! A load without root mesh is unframeable: it is logged and the camera keeps
//! its previous framing and limits.

use std::time::Duration;

use rustc_hash::FxHashSet;

use crate::config::CameraConfig;
use crate::scene::{ArcRotateCamera, MeshKey, Scene, TextureKey};

/// Payload of a load-completion event.
#[derive(Debug, Clone, Default)]
pub struct LoadedModel {
    pub root_mesh: Option<MeshKey>,
    pub meshes: Vec<MeshKey>,
    /// Textures registered by this load.
    pub textures: Vec<TextureKey>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FramingOutcome {
    Framed {
        radius: f32,
        /// `None` when the model has no extent and the limit was left as is.
        upper_radius_limit: Option<f32>,
        pinch_precision: f32,
    },
    /// Nothing to frame; the camera was left untouched.
    Unframeable,
}

impl FramingOutcome {
    #[must_use]
    pub fn is_framed(&self) -> bool {
        matches!(self, Self::Framed { .. })
    }
}

/// Frames `model` with `camera` and rescales the camera limits to it.
pub fn frame_loaded_model(
    scene: &Scene,
    camera: &mut ArcRotateCamera,
    model: &LoadedModel,
    config: &CameraConfig,
) -> FramingOutcome {
    if model.root_mesh.is_none() {
        log::warn!("Loaded model has no root mesh; keeping the current camera framing");
        return FramingOutcome::Unframeable;
    }

    let members: FxHashSet<MeshKey> = model.meshes.iter().copied().collect();
    let Some(bounds) = scene.world_extends(|key, _| members.contains(&key)) else {
        log::warn!("Loaded model has no meshes in the scene; keeping the current camera framing");
        return FramingOutcome::Unframeable;
    };

    camera.use_framing_behavior(true);
    if let Some(framing) = camera.framing_mut() {
        framing.framing_time = Duration::from_millis(config.framing_time_ms);
        framing.elevation_return_time = config.elevation_return_time_ms.map(Duration::from_millis);
    }
    camera.zoom_on_bounding_info(bounds.min, bounds.max);

    let radius = camera.settled_radius();
    camera.lower_radius_limit = None;

    // A zero radius would pin the camera at min_z.
    let upper_radius_limit = (radius > 0.0).then_some(config.upper_radius_factor * radius);
    if let Some(upper) = upper_radius_limit {
        camera.upper_radius_limit = Some(upper);
        camera.pinch_precision = config.pinch_precision_scale / radius;
    } else {
        log::warn!("Loaded model has no extent; keeping the radius limit and pinch precision");
    }

    log::debug!(
        "Framed {} meshes: radius {radius:.3}, upper limit {upper_radius_limit:?}",
        members.len()
    );
    FramingOutcome::Framed {
        radius,
        upper_radius_limit,
        pinch_precision: camera.pinch_precision,
    }
}

// ============================================================================
// Load generations
// ============================================================================

/// Identifies one model load. Only the most recent ticket may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    #[must_use]
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct LoadTracker {
    latest: u64,
}

impl LoadTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new load, superseding every ticket handed out before.
    pub fn begin(&mut self) -> LoadTicket {
        self.latest += 1;
        LoadTicket(self.latest)
    }

    #[must_use]
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.latest
    }

    #[must_use]
    pub fn latest(&self) -> Option<LoadTicket> {
        (self.latest > 0).then_some(LoadTicket(self.latest))
    }
}
