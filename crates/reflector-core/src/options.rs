//! Configuration options for mirror surfaces.

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::error::{ReflectorError, Result};

/// Default tint, sRGB `0xa0a0a0` fully opaque, in linear channels.
pub const DEFAULT_TINT: Vec4 = Vec4::new(0.351_532_6, 0.351_532_6, 0.351_532_6, 1.0);

/// Default outward bias of the oblique clip plane, in world units.
pub const DEFAULT_CLIP_BIAS: f32 = 0.003;

/// Stereo rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StereoOptions {
    /// Whether one reflection is rendered per eye.
    pub enabled: bool,
    /// Distance between the eyes, used when eye poses are derived from a
    /// single head pose.
    pub eye_separation: f32,
}

impl Default for StereoOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            eye_separation: 0.064,
        }
    }
}

/// Options recognized by a mirror surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorOptions {
    /// Offscreen resolution relative to the viewport.
    pub resolution_multiplier: f32,

    /// Display pixel density (physical pixels per logical pixel).
    pub pixel_ratio: f32,

    /// Color blended with the sampled reflection, also shown while no
    /// reflection is available.
    pub tint: Vec4,

    /// Outward bias of the oblique clip plane.
    pub clip_bias: f32,

    /// Stereo configuration.
    pub stereo: StereoOptions,

    /// Largest offscreen side length that will be allocated.
    pub max_target_dimension: u32,
}

impl Default for MirrorOptions {
    fn default() -> Self {
        Self {
            resolution_multiplier: 1.0,
            pixel_ratio: 1.0,
            tint: DEFAULT_TINT,
            clip_bias: DEFAULT_CLIP_BIAS,
            stereo: StereoOptions::default(),
            max_target_dimension: 8192,
        }
    }
}

impl MirrorOptions {
    /// Parses options from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Serializes options to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.resolution_multiplier.is_finite() || self.resolution_multiplier <= 0.0 {
            return Err(invalid(
                "resolution_multiplier",
                format!("must be positive, got {}", self.resolution_multiplier),
            ));
        }
        if !self.pixel_ratio.is_finite() || self.pixel_ratio <= 0.0 {
            return Err(invalid(
                "pixel_ratio",
                format!("must be positive, got {}", self.pixel_ratio),
            ));
        }
        if !self.clip_bias.is_finite() || self.clip_bias < 0.0 {
            return Err(invalid(
                "clip_bias",
                format!("must be non-negative, got {}", self.clip_bias),
            ));
        }
        if !self.tint.is_finite() {
            return Err(invalid("tint", "components must be finite".to_string()));
        }
        if !self.stereo.eye_separation.is_finite() || self.stereo.eye_separation < 0.0 {
            return Err(invalid(
                "stereo.eye_separation",
                format!("must be non-negative, got {}", self.stereo.eye_separation),
            ));
        }
        if self.max_target_dimension == 0 {
            return Err(invalid("max_target_dimension", "must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Sets the tint from a packed `0xRRGGBB` color.
    #[must_use]
    pub fn with_tint_hex(mut self, rgb: u32) -> Self {
        self.tint = tint_from_hex(rgb);
        self
    }

    /// Number of eyes rendered per frame.
    pub fn eye_count(&self) -> usize {
        if self.stereo.enabled {
            2
        } else {
            1
        }
    }
}

/// Converts a packed sRGB `0xRRGGBB` color to an opaque linear tint.
///
/// Render targets are sRGB, so a tint drawn unlit displays as the given hex
/// color.
pub fn tint_from_hex(rgb: u32) -> Vec4 {
    let channel = |shift: u32| srgb_to_linear(((rgb >> shift) & 0xff) as f32 / 255.0);
    Vec4::new(channel(16), channel(8), channel(0), 1.0)
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn invalid(name: &'static str, reason: String) -> ReflectorError {
    ReflectorError::InvalidOption { name, reason }
}
