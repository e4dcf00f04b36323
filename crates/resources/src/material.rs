//! Material descriptors.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::TextureHandle;

/// Convert a packed `0xRRGGBB` colour into linear-ish float components.
pub fn rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// Which faces of a surface are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

/// Texture map stack for a PBR material.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialMaps {
    pub color: Option<TextureHandle>,
    pub normal: Option<TextureHandle>,
    pub displacement: Option<TextureHandle>,
    pub displacement_scale: f32,
    pub displacement_bias: f32,
    pub ambient_occlusion: Option<TextureHandle>,
    pub ao_intensity: f32,
    pub roughness: Option<TextureHandle>,
    pub metalness: Option<TextureHandle>,
    pub alpha: Option<TextureHandle>,
    pub light: Option<TextureHandle>,
    pub light_intensity: f32,
}

impl MaterialMaps {
    /// Every texture referenced by the stack.
    pub fn textures(&self) -> impl Iterator<Item = TextureHandle> + '_ {
        [
            self.color,
            self.normal,
            self.displacement,
            self.ambient_occlusion,
            self.roughness,
            self.metalness,
            self.alpha,
            self.light,
        ]
        .into_iter()
        .flatten()
    }

    /// Maps sampled with the second UV set.
    pub fn needs_second_uv_set(&self) -> bool {
        self.ambient_occlusion.is_some() || self.light.is_some()
    }
}

/// Metallic-roughness PBR material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardMaterial {
    /// Base color (albedo)
    pub color: Vec3,
    /// Roughness factor (0.0 = smooth, 1.0 = rough)
    pub roughness: f32,
    /// Metalness factor (0.0 = dielectric, 1.0 = metal)
    pub metalness: f32,
    pub emissive: Vec3,
    pub maps: MaterialMaps,
    pub side: Side,
    pub transparent: bool,
    pub flat_shading: bool,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            roughness: 1.0,
            metalness: 0.0,
            emissive: Vec3::ZERO,
            maps: MaterialMaps {
                ao_intensity: 1.0,
                light_intensity: 1.0,
                displacement_scale: 1.0,
                ..Default::default()
            },
            side: Side::Front,
            transparent: false,
            flat_shading: false,
        }
    }
}

/// Blinn-Phong material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhongMaterial {
    pub color: Vec3,
    pub emissive: Vec3,
    pub flat_shading: bool,
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            emissive: Vec3::ZERO,
            flat_shading: false,
        }
    }
}

/// A surface description referenced by renderables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Material {
    Standard(StandardMaterial),
    Phong(PhongMaterial),
}

impl Material {
    pub fn standard(color: u32, roughness: f32, metalness: f32) -> Self {
        Self::Standard(StandardMaterial {
            color: rgb(color),
            roughness,
            metalness,
            ..Default::default()
        })
    }

    pub fn phong(color: u32, emissive: u32, flat_shading: bool) -> Self {
        Self::Phong(PhongMaterial {
            color: rgb(color),
            emissive: rgb(emissive),
            flat_shading,
        })
    }

    pub fn color(&self) -> Vec3 {
        match self {
            Self::Standard(m) => m.color,
            Self::Phong(m) => m.color,
        }
    }

    /// Textures this material depends on.
    pub fn textures(&self) -> Vec<TextureHandle> {
        match self {
            Self::Standard(m) => m.maps.textures().collect(),
            Self::Phong(_) => Vec::new(),
        }
    }

    pub fn is_double_sided(&self) -> bool {
        matches!(self, Self::Standard(m) if m.side == Side::Double)
    }
}
