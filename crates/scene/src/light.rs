//! Light definitions for the scene.
//!
//! A light lives on a scene node: its position is the node's world position.
//! Directional and spot lights additionally aim at a world-space target.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::{SceneError, SceneResult};

/// The kind-specific part of a light.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum LightKind {
    /// Uniform light from every direction.
    Ambient,
    /// Sky/ground gradient. The light's `color` is the sky colour.
    Hemisphere { ground: Vec3 },
    /// Parallel rays from the light position towards `target` (sun-like).
    Directional { target: Vec3 },
    /// Omnidirectional. A `distance` of zero means unlimited range.
    Point { distance: f32, decay: f32 },
    /// Cone towards `target`; `angle` is the half-angle in radians and
    /// `penumbra` the fraction of the cone that is attenuated.
    Spot {
        target: Vec3,
        angle: f32,
        penumbra: f32,
        distance: f32,
        decay: f32,
    },
    /// Rectangular emitter facing the node's -Z axis.
    RectArea { width: f32, height: f32 },
}

impl LightKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ambient => "ambient",
            Self::Hemisphere { .. } => "hemisphere",
            Self::Directional { .. } => "directional",
            Self::Point { .. } => "point",
            Self::Spot { .. } => "spot",
            Self::RectArea { .. } => "rect area",
        }
    }
}

/// Shadow map configuration for a shadow-casting light.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShadowSettings {
    /// Shadow map resolution in texels
    pub map_size: u32,
    /// Blur radius; lower is sharper
    pub radius: f32,
    pub bias: f32,
    /// Shadow camera frustum (left, right, top, bottom) for directional lights
    pub frustum: [f32; 4],
    /// Shadow camera near/far planes
    pub depth_range: Vec2,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            map_size: 512,
            radius: 1.0,
            bias: 0.0,
            frustum: [-5.0, 5.0, 5.0, -5.0],
            depth_range: Vec2::new(0.5, 500.0),
        }
    }
}

impl ShadowSettings {
    /// Symmetric shadow frustum of the given half extent.
    pub fn with_extent(mut self, half_extent: f32) -> Self {
        self.frustum = [-half_extent, half_extent, half_extent, -half_extent];
        self
    }

    pub fn with_map_size(mut self, map_size: u32) -> Self {
        self.map_size = map_size;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }
}

/// A light attached to a scene node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneLight {
    pub kind: LightKind,
    pub color: Vec3,
    pub intensity: f32,
    shadow: Option<ShadowSettings>,
}

impl SceneLight {
    pub fn new(kind: LightKind, color: Vec3, intensity: f32) -> Self {
        Self {
            kind,
            color,
            intensity,
            shadow: None,
        }
    }

    pub fn ambient(color: Vec3, intensity: f32) -> Self {
        Self::new(LightKind::Ambient, color, intensity)
    }

    pub fn hemisphere(sky: Vec3, ground: Vec3, intensity: f32) -> Self {
        Self::new(LightKind::Hemisphere { ground }, sky, intensity)
    }

    pub fn directional(color: Vec3, intensity: f32) -> Self {
        Self::new(
            LightKind::Directional {
                target: Vec3::ZERO,
            },
            color,
            intensity,
        )
    }

    pub fn point(color: Vec3, intensity: f32) -> Self {
        Self::new(
            LightKind::Point {
                distance: 0.0,
                decay: 2.0,
            },
            color,
            intensity,
        )
    }

    pub fn spot(color: Vec3, intensity: f32, angle: f32, penumbra: f32) -> Self {
        Self::new(
            LightKind::Spot {
                target: Vec3::ZERO,
                angle,
                penumbra: penumbra.clamp(0.0, 1.0),
                distance: 0.0,
                decay: 2.0,
            },
            color,
            intensity,
        )
    }

    pub fn rect_area(color: Vec3, intensity: f32, width: f32, height: f32) -> Self {
        Self::new(LightKind::RectArea { width, height }, color, intensity)
    }

    /// World-space aim point, for lights that have one.
    pub fn target(&self) -> Option<Vec3> {
        match self.kind {
            LightKind::Directional { target } | LightKind::Spot { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Set the aim point. Returns `false` if this kind has no target.
    pub fn set_target(&mut self, point: Vec3) -> bool {
        match &mut self.kind {
            LightKind::Directional { target } | LightKind::Spot { target, .. } => {
                *target = point;
                true
            }
            _ => false,
        }
    }

    pub fn supports_shadows(&self) -> bool {
        matches!(
            self.kind,
            LightKind::Directional { .. } | LightKind::Point { .. } | LightKind::Spot { .. }
        )
    }

    /// Turn on shadow casting with the given settings.
    pub fn enable_shadows(&mut self, settings: ShadowSettings) -> SceneResult<()> {
        if !self.supports_shadows() {
            return Err(SceneError::ShadowUnsupported(self.kind.name()));
        }
        self.shadow = Some(settings);
        Ok(())
    }

    pub fn disable_shadows(&mut self) {
        self.shadow = None;
    }

    pub fn casts_shadow(&self) -> bool {
        self.shadow.is_some()
    }

    pub fn shadow(&self) -> Option<&ShadowSettings> {
        self.shadow.as_ref()
    }

    /// Direction the light shines in when placed at `position`.
    pub fn direction_from(&self, position: Vec3) -> Option<Vec3> {
        self.target()
            .map(|target| (target - position).normalize_or_zero())
            .filter(|dir| *dir != Vec3::ZERO)
    }
}
