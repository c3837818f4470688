use std::borrow::Cow;
use std::f32::consts::{FRAC_PI_2, PI};
use std::time::Duration;

use glam::{Mat4, Vec3};

use crate::config::CameraConfig;
use crate::resources::BoundingBox;
use crate::scene::framing::{FramingBehavior, FramingMode, Transition};

/// Keeps beta strictly inside `(0, PI)` so the camera never flips over the poles.
const BETA_EPSILON: f32 = 0.01;

/// Orbit camera described by two angles and a distance around a target.
///
/// `alpha` is the longitudinal rotation, `beta` the latitudinal one measured
/// from the +Y axis (`PI / 2` looks at the target from the horizon).
#[derive(Debug, Clone)]
pub struct ArcRotateCamera {
    pub name: Cow<'static, str>,

    pub target: Vec3,
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,

    // === Limits ===
    /// Minimum zoom distance. `None` leaves only the near plane as floor.
    pub lower_radius_limit: Option<f32>,
    /// Maximum zoom distance. `None` means unbounded.
    pub upper_radius_limit: Option<f32>,
    pub lower_beta_limit: f32,
    pub upper_beta_limit: f32,

    // === Projection ===
    pub fov: f32,
    pub aspect: f32,
    pub min_z: f32,

    // === Input sensitivity ===
    pub wheel_precision: f32,
    pub wheel_delta_percentage: f32,
    pub pinch_precision: f32,
    pub pinch_delta_percentage: f32,

    framing: Option<FramingBehavior>,
    radius_transition: Option<Transition<f32>>,
    target_transition: Option<Transition<Vec3>>,
    beta_transition: Option<Transition<f32>>,
    idle_time: Duration,
}

impl ArcRotateCamera {
    pub fn new(name: impl Into<Cow<'static, str>>, alpha: f32, beta: f32, radius: f32, target: Vec3) -> Self {
        Self {
            name: name.into(),
            target,
            alpha,
            beta,
            radius,
            lower_radius_limit: None,
            upper_radius_limit: None,
            lower_beta_limit: BETA_EPSILON,
            upper_beta_limit: PI - BETA_EPSILON,
            fov: 0.8,
            aspect: 1.0,
            min_z: 1.0,
            wheel_precision: 3.0,
            wheel_delta_percentage: 0.0,
            pinch_precision: 12.0,
            pinch_delta_percentage: 0.0,
            framing: None,
            radius_transition: None,
            target_transition: None,
            beta_transition: None,
            idle_time: Duration::ZERO,
        }
    }

    /// Builds the configurator rig: framing behavior enabled, configured
    /// framing and elevation-return times.
    #[must_use]
    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::new("arc", config.alpha, config.beta, config.radius, Vec3::ZERO);
        camera.lower_radius_limit = config.lower_radius_limit;
        camera.upper_radius_limit = config.upper_radius_limit;
        camera.fov = config.fov;
        camera.aspect = config.aspect;
        camera.min_z = config.min_z;
        camera.wheel_precision = config.wheel_precision;
        camera.wheel_delta_percentage = config.wheel_delta_percentage;
        camera.pinch_precision = config.pinch_precision;
        camera.pinch_delta_percentage = config.pinch_delta_percentage;
        camera.framing = Some(FramingBehavior {
            framing_time: Duration::from_millis(config.framing_time_ms),
            elevation_return_time: config.elevation_return_time_ms.map(Duration::from_millis),
            ..FramingBehavior::default()
        });
        camera
    }

    // ========================================================================
    // Framing behavior
    // ========================================================================

    pub fn use_framing_behavior(&mut self, enabled: bool) {
        match (enabled, self.framing.is_some()) {
            (true, false) => self.framing = Some(FramingBehavior::default()),
            (false, true) => {
                self.framing = None;
                self.stop_animations();
            }
            _ => {}
        }
    }

    #[must_use]
    pub fn framing(&self) -> Option<&FramingBehavior> {
        self.framing.as_ref()
    }

    pub fn framing_mut(&mut self) -> Option<&mut FramingBehavior> {
        self.framing.as_mut()
    }

    /// Frames the box `[min, max]` with the attached framing behavior.
    ///
    /// Returns `false` (and leaves the camera untouched) when the behavior
    /// is not enabled.
    pub fn zoom_on_bounding_info(&mut self, min: Vec3, max: Vec3) -> bool {
        let Some(framing) = self.framing else {
            return false;
        };
        let bounds = BoundingBox::new(min, max);

        let target = framing.zoom_target(&bounds);
        let mut radius = framing.fit_distance(&bounds, self.fov, self.aspect);

        match framing.mode {
            FramingMode::FitFrustumSides => {
                if framing.auto_correct_limits {
                    self.lower_radius_limit = Some(bounds.diagonal() * 0.5 + self.min_z);
                }
            }
            FramingMode::IgnoreBoundsSize => {
                if let Some(lower) = self.lower_radius_limit {
                    radius = radius.max(lower);
                } else if framing.auto_correct_limits {
                    self.lower_radius_limit = Some(self.min_z);
                }
            }
        }
        if let Some(upper) = self.upper_radius_limit {
            radius = radius.min(upper);
        }
        if framing.auto_correct_limits && radius > 0.0 {
            self.wheel_precision = 100.0 / radius;
        }

        if framing.framing_time.is_zero() {
            self.radius_transition = None;
            self.target_transition = None;
            self.target = target;
            self.radius = radius;
        } else {
            self.radius_transition = Some(Transition::new(self.radius, radius, framing.framing_time));
            self.target_transition = Some(Transition::new(self.target, target, framing.framing_time));
        }
        true
    }

    /// Radius the camera ends up at once running transitions finish.
    #[must_use]
    pub fn settled_radius(&self) -> f32 {
        self.radius_transition.map_or(self.radius, |t| t.target())
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.radius_transition.is_some()
            || self.target_transition.is_some()
            || self.beta_transition.is_some()
    }

    pub fn stop_animations(&mut self) {
        self.radius_transition = None;
        self.target_transition = None;
        self.beta_transition = None;
    }

    /// Called by input handling. Cancels running transitions and restarts
    /// the idle timer of the elevation return.
    pub fn notify_user_interaction(&mut self) {
        self.stop_animations();
        self.idle_time = Duration::ZERO;
    }

    // ========================================================================
    // Per-frame update
    // ========================================================================

    /// Advances transitions and the elevation return, then clamps to limits.
    pub fn update(&mut self, dt: Duration) {
        self.idle_time += dt;

        if let Some(transition) = self.radius_transition.as_mut() {
            let (radius, done) = transition.advance(dt);
            self.radius = radius;
            if done {
                self.radius_transition = None;
            }
        }
        if let Some(transition) = self.target_transition.as_mut() {
            let (target, done) = transition.advance(dt);
            self.target = target;
            if done {
                self.target_transition = None;
            }
        }

        self.maintain_above_ground();

        if let Some(transition) = self.beta_transition.as_mut() {
            let (beta, done) = transition.advance(dt);
            self.beta = beta;
            if done {
                self.beta_transition = None;
            }
        }

        self.check_limits();
    }

    fn maintain_above_ground(&mut self) {
        let Some(framing) = self.framing else {
            return;
        };
        let Some(return_time) = framing.elevation_return_time else {
            return;
        };
        if self.beta_transition.is_some()
            || self.beta <= FRAC_PI_2
            || self.idle_time < framing.elevation_return_wait_time
        {
            return;
        }
        let default_beta = FRAC_PI_2 - framing.default_elevation;
        self.beta_transition = Some(Transition::new(self.beta, default_beta, return_time));
    }

    /// Clamps radius and beta into their limits.
    pub fn check_limits(&mut self) {
        let lower = self.lower_radius_limit.unwrap_or(self.min_z).max(self.min_z);
        self.radius = self.radius.max(lower);
        if let Some(upper) = self.upper_radius_limit {
            self.radius = self.radius.min(upper.max(lower));
        }
        self.beta = self.beta.clamp(self.lower_beta_limit, self.upper_beta_limit);
    }

    // ========================================================================
    // Pose
    // ========================================================================

    #[must_use]
    pub fn position(&self) -> Vec3 {
        let (sin_a, cos_a) = self.alpha.sin_cos();
        let (sin_b, cos_b) = self.beta.sin_cos();
        self.target + self.radius * Vec3::new(cos_a * sin_b, cos_b, sin_a * sin_b)
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }
}
