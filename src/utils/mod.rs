//! Utility Module
//!
//! - [`ArcRotateControls`]: pointer, wheel and pinch input for the
//!   configurator camera

pub mod orbit_control;

pub use orbit_control::{ArcRotateControls, PointerInput};
