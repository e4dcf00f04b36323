//! Texture references and sampling settings.

use std::path::PathBuf;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Texture coordinate wrapping mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Wrap {
    #[default]
    ClampToEdge,
    Repeat,
    MirroredRepeat,
}

/// Texture filtering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapNearest,
    LinearMipmapLinear,
}

impl Filter {
    /// Whether the filter samples from a mip chain.
    pub fn uses_mipmaps(self) -> bool {
        !matches!(self, Self::Nearest | Self::Linear)
    }
}

/// How a texture is sampled and placed on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextureSettings {
    pub wrap_s: Wrap,
    pub wrap_t: Wrap,
    pub repeat: Vec2,
    pub offset: Vec2,
    /// Rotation of the UVs around `center`, in radians.
    pub rotation: f32,
    pub center: Vec2,
    pub mag_filter: Filter,
    pub min_filter: Filter,
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self {
            wrap_s: Wrap::ClampToEdge,
            wrap_t: Wrap::ClampToEdge,
            repeat: Vec2::ONE,
            offset: Vec2::ZERO,
            rotation: 0.0,
            center: Vec2::ZERO,
            mag_filter: Filter::Linear,
            min_filter: Filter::LinearMipmapLinear,
        }
    }
}

impl TextureSettings {
    /// Map a UV coordinate through repeat, rotation about the centre, and offset.
    pub fn transform_uv(&self, uv: Vec2) -> Vec2 {
        let (sin, cos) = self.rotation.sin_cos();
        let centered = uv * self.repeat - self.center;
        let rotated = Vec2::new(
            cos * centered.x - sin * centered.y,
            sin * centered.x + cos * centered.y,
        );
        rotated + self.center + self.offset
    }
}

/// A texture to be loaded by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Texture {
    pub path: PathBuf,
    pub settings: TextureSettings,
}

impl Texture {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            settings: TextureSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: TextureSettings) -> Self {
        self.settings = settings;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_default_settings_are_identity() {
        let settings = TextureSettings::default();
        let uv = Vec2::new(0.25, 0.75);
        assert!((settings.transform_uv(uv) - uv).length() < EPSILON);
    }

    #[test]
    fn test_rotation_about_center() {
        let settings = TextureSettings {
            rotation: std::f32::consts::FRAC_PI_2,
            center: Vec2::splat(0.5),
            ..Default::default()
        };

        // The centre is a fixed point of the rotation.
        let center = settings.transform_uv(Vec2::splat(0.5));
        assert!((center - Vec2::splat(0.5)).length() < EPSILON);

        let corner = settings.transform_uv(Vec2::new(1.0, 0.5));
        assert!((corner - Vec2::new(0.5, 1.0)).length() < EPSILON);
    }

    #[test]
    fn test_mipmap_filters() {
        assert!(!Filter::Nearest.uses_mipmaps());
        assert!(Filter::NearestMipmapLinear.uses_mipmaps());
    }
}
