use std::f32::consts::PI;

use glam::Vec2;

use crate::scene::ArcRotateCamera;

/// Converts a pinch distance change in pixels into wheel-notch units.
const PINCH_PIXEL_SCALE: f32 = 0.05;

/// Per-frame pointer input, filled by the host's windowing layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerInput {
    /// Cursor movement in pixels since the last frame.
    pub cursor_delta: Vec2,
    /// Primary button (or single touch) held down.
    pub rotating: bool,
    /// Wheel notches; positive zooms in.
    pub wheel_delta: f32,
    /// Change of the distance between two touch points in pixels; positive
    /// (fingers apart) zooms in.
    pub pinch_delta: f32,
    pub screen_size: Vec2,
}

impl PointerInput {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !self.rotating && self.wheel_delta == 0.0 && self.pinch_delta == 0.0
    }
}

/// Drag-to-rotate, wheel and pinch zoom for an [`ArcRotateCamera`].
///
/// Sensitivities come from the camera itself (`wheel_precision`,
/// `pinch_precision` and the delta percentages), so they follow whatever
/// the auto-framing step set for the current model.
pub struct ArcRotateControls {
    pub rotate_speed: f32,
    pub damping_factor: f32,
    pub enable_damping: bool,

    rotate_delta: Vec2,
}

impl Default for ArcRotateControls {
    fn default() -> Self {
        Self::new()
    }
}

impl ArcRotateControls {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rotate_speed: 1.0,
            damping_factor: 0.1,
            enable_damping: true,
            rotate_delta: Vec2::ZERO,
        }
    }

    /// Without damping the whole rotation of a frame is applied at once.
    #[must_use]
    pub fn with_damping(mut self, enabled: bool) -> Self {
        self.enable_damping = enabled;
        self
    }

    pub fn update(&mut self, camera: &mut ArcRotateCamera, input: &PointerInput, dt: f32) {
        if !input.is_idle() {
            camera.notify_user_interaction();
        }

        if input.rotating {
            let rotate_per_pixel = 2.0 * PI / input.screen_size.y.max(1.0);
            self.rotate_delta -= input.cursor_delta * rotate_per_pixel * self.rotate_speed;
        }

        if self.enable_damping {
            let target_fps = 60.0;
            let retention = (1.0 - self.damping_factor).powf(dt * target_fps);
            let delta_apply = self.rotate_delta * (1.0 - retention);
            camera.alpha += delta_apply.x;
            camera.beta += delta_apply.y;
            self.rotate_delta *= retention;
        } else {
            camera.alpha += self.rotate_delta.x;
            camera.beta += self.rotate_delta.y;
            self.rotate_delta = Vec2::ZERO;
        }

        if input.wheel_delta != 0.0 {
            camera.radius -= wheel_offset(camera, input.wheel_delta);
        }
        if input.pinch_delta != 0.0 {
            camera.radius -= pinch_offset(camera, input.pinch_delta);
        }

        camera.check_limits();
    }
}

/// Radius decrease for `notches` wheel notches.
fn wheel_offset(camera: &ArcRotateCamera, notches: f32) -> f32 {
    if camera.wheel_delta_percentage > 0.0 {
        notches * camera.wheel_delta_percentage * camera.radius
    } else {
        notches / camera.wheel_precision.max(f32::EPSILON)
    }
}

/// Radius decrease for a pinch distance change of `pixels`.
fn pinch_offset(camera: &ArcRotateCamera, pixels: f32) -> f32 {
    if camera.pinch_delta_percentage > 0.0 {
        pixels * PINCH_PIXEL_SCALE * camera.radius * camera.pinch_delta_percentage
    } else {
        pixels / camera.pinch_precision.max(f32::EPSILON)
    }
}
