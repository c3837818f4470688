//! Error Types
//!
//! This module defines the error types used throughout the configurator core.
//!
//! # Overview
//!
//! The main error type [`AtelierError`] covers the failure modes of the
//! interaction layer:
//! - Malformed customization input (colors, swatch URLs)
//! - Stale or unknown scene references
//! - Texture resolution and image decoding failures
//! - Configuration loading errors
//!
//! None of these are fatal for the interaction loop. The session object
//! ([`crate::session::Configurator`]) catches them at the event-handler
//! boundary, logs them and leaves the scene unchanged.
//!
//! # Usage
//!
//! ```rust,ignore
//! use atelier::errors::{AtelierError, Result};
//!
//! fn choose(hex: &str) -> Result<glam::Vec3> {
//!     atelier::resources::parse_hex_color(hex)
//! }
//! ```

use thiserror::Error;

/// The main error type for the configurator core.
#[derive(Error, Debug)]
pub enum AtelierError {
    // ========================================================================
    // Customization Input Errors
    // ========================================================================
    /// A color string could not be parsed as `#rrggbb` / `#rgb`.
    #[error("Invalid color '{0}': expected #rrggbb or #rgb")]
    InvalidColor(String),

    /// The swatch URL does not resolve to any known image resource.
    #[error("Swatch could not be resolved: {0}")]
    UnresolvedSwatch(String),

    // ========================================================================
    // Scene Reference Errors
    // ========================================================================
    /// A mesh key that no longer exists in the scene.
    #[error("Unknown mesh (stale or removed key)")]
    UnknownMesh,

    /// A texture key that no longer exists in the scene.
    #[error("Unknown texture (stale or removed key)")]
    UnknownTexture,

    // ========================================================================
    // Image & Resource Errors
    // ========================================================================
    /// Image decoding error.
    #[error("Image decode error: {0}")]
    ImageDecode(String),

    /// Data URI parsing error.
    #[error("Data URI error: {0}")]
    DataUri(String),

    /// Base64 decoding error.
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// URL parsing error.
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// JSON configuration parsing error.
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<image::ImageError> for AtelierError {
    fn from(err: image::ImageError) -> Self {
        AtelierError::ImageDecode(err.to_string())
    }
}

/// Alias for `Result<T, AtelierError>`.
pub type Result<T> = std::result::Result<T, AtelierError>;
