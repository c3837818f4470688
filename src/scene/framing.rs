//! Framing behavior
//!
//! Zoom-to-fit for the arc-rotate camera plus the optional "elevation
//! return" that eases the camera back above the horizon after the user
//! leaves it looking from below.
//!
//! # Fit distance
//!
//! The bounding box is approximated by its bounding sphere (radius = half
//! the diagonal). The camera distance that fits a sphere of radius `r` in a
//! frustum side of slope `s` (tangent of the half angle) is
//! `r * sqrt(1 + 1 / s^2)`. Both the vertical (`tan(fov / 2)`) and horizontal
//! (`tan(fov / 2) * aspect`) sides are evaluated and the larger distance
//! wins, so the model fits whichever side is tighter.

use std::time::Duration;

use glam::Vec3;

use crate::resources::BoundingBox;

/// How the lower radius limit reacts to a zoom-to-fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FramingMode {
    /// Fit the frustum sides; with limit auto-correction the lower radius
    /// limit becomes the bounding-sphere radius plus the near plane.
    #[default]
    FitFrustumSides,
    /// Fit the frustum sides but never zoom closer than the lower limit.
    IgnoreBoundsSize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramingBehavior {
    pub mode: FramingMode,
    /// Duration of the zoom-to-fit transition. Zero applies it immediately.
    pub framing_time: Duration,
    /// Duration of the spring back above the horizon. `None` disables it.
    pub elevation_return_time: Option<Duration>,
    /// Idle time before the elevation return kicks in.
    pub elevation_return_wait_time: Duration,
    /// Elevation above the horizon restored by the elevation return (radians).
    pub default_elevation: f32,
    /// Multiplier on the fitted distance.
    pub radius_scale: f32,
    /// Vertical placement of the target inside the box (0 bottom, 1 top).
    pub position_scale: f32,
    /// Adjust lower radius limit and wheel precision to the framed model.
    pub auto_correct_limits: bool,
}

impl Default for FramingBehavior {
    fn default() -> Self {
        Self {
            mode: FramingMode::default(),
            framing_time: Duration::from_millis(1500),
            elevation_return_time: Some(Duration::from_millis(1500)),
            elevation_return_wait_time: Duration::from_millis(3000),
            default_elevation: 0.3,
            radius_scale: 1.0,
            position_scale: 0.5,
            auto_correct_limits: true,
        }
    }
}

impl FramingBehavior {
    /// Camera target for a framed box: horizontally centered, vertically at
    /// `position_scale` of the box height.
    #[must_use]
    pub fn zoom_target(&self, bounds: &BoundingBox) -> Vec3 {
        let center = bounds.center();
        let y = bounds.min.y + (bounds.max.y - bounds.min.y) * self.position_scale;
        Vec3::new(center.x, y, center.z)
    }

    /// Distance that fits `bounds` in a perspective frustum.
    #[must_use]
    pub fn fit_distance(&self, bounds: &BoundingBox, fov: f32, aspect: f32) -> f32 {
        let radius = bounds.diagonal() * 0.5 * self.radius_scale;

        let slope_y = (fov * 0.5).tan();
        let slope_x = slope_y * aspect;

        let horizontal = radius * (1.0 + 1.0 / (slope_x * slope_x)).sqrt();
        let vertical = radius * (1.0 + 1.0 / (slope_y * slope_y)).sqrt();
        horizontal.max(vertical)
    }
}

// ============================================================================
// Transitions
// ============================================================================

pub(crate) trait Lerp: Copy {
    fn lerp_to(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Vec3 {
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self.lerp(other, t)
    }
}

/// Exponential ease-in-out with exponent 2.
fn ease_in_out(t: f32) -> f32 {
    const EXPONENT: f32 = 2.0;
    let ease_in = |x: f32| (x * EXPONENT).exp_m1() / EXPONENT.exp_m1();
    if t < 0.5 {
        ease_in(t * 2.0) * 0.5
    } else {
        1.0 - ease_in((1.0 - t) * 2.0) * 0.5
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Transition<T: Lerp> {
    from: T,
    to: T,
    elapsed: Duration,
    duration: Duration,
}

impl<T: Lerp> Transition<T> {
    pub(crate) fn new(from: T, to: T, duration: Duration) -> Self {
        Self { from, to, elapsed: Duration::ZERO, duration }
    }

    /// Advances by `dt`, returning the current value and whether the
    /// transition has finished.
    pub(crate) fn advance(&mut self, dt: Duration) -> (T, bool) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        if self.duration.is_zero() || self.elapsed >= self.duration {
            return (self.to, true);
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        (self.from.lerp_to(self.to, ease_in_out(t)), false)
    }

    pub(crate) fn target(&self) -> T {
        self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_is_monotonic_and_anchored() {
        assert!(ease_in_out(0.0).abs() < 1e-6);
        assert!((ease_in_out(1.0) - 1.0).abs() < 1e-6);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
        let mut last = 0.0;
        for i in 1..=20 {
            let v = ease_in_out(i as f32 / 20.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn transition_reaches_target_exactly() {
        let mut transition = Transition::new(1.0_f32, 5.0, Duration::from_millis(100));
        let (mid, done) = transition.advance(Duration::from_millis(50));
        assert!(!done);
        assert!(mid > 1.0 && mid < 5.0);
        let (end, done) = transition.advance(Duration::from_millis(80));
        assert!(done);
        assert!((end - 5.0).abs() < f32::EPSILON);
    }
}
