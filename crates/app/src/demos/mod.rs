//! Demo catalogue.
//!
//! Every demo builds a scene graph, a camera and an animation driver. Light
//! and camera alternatives are chosen at setup time through [`LightSetup`]
//! and [`CameraSetup`].

mod materials;
mod solar;
mod stage;

use std::fmt;

use anyhow::Result;
use clap::ValueEnum;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use orrery_resources::AssetRegistry;
use orrery_scene::{AnimationDriver, Camera, Projection, SceneGraph};

/// Which demo to build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum DemoKind {
    /// Sun, earth and moon on nested orbit pivots
    #[default]
    SolarSystem,
    /// Textured box and sphere with explicit sampling settings
    Materials,
    /// Full PBR texture stack lit by a light riding on the camera
    MaterialStack,
    /// Ground, dome, torus ring and an orbiting sphere under one light
    Lights,
    /// The camera rides the orbiting sphere and looks ahead
    CameraTracking,
    /// Shadow-casting light over the torus ring stage
    Shadows,
}

impl DemoKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SolarSystem => "solar-system",
            Self::Materials => "materials",
            Self::MaterialStack => "material-stack",
            Self::Lights => "lights",
            Self::CameraTracking => "camera-tracking",
            Self::Shadows => "shadows",
        }
    }

    /// Multiplier from wall-clock seconds to animation time.
    pub fn default_time_scale(self) -> f32 {
        match self {
            Self::CameraTracking => 0.2,
            _ => 1.0,
        }
    }

    /// Light used when none is requested; `None` for demos with a fixed rig.
    pub fn default_light(self) -> Option<LightSetup> {
        match self {
            Self::Lights | Self::CameraTracking => Some(LightSetup::RectArea),
            Self::Shadows => Some(LightSetup::Spot),
            _ => None,
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main light of the stage demos.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum LightSetup {
    Ambient,
    Hemisphere,
    Directional,
    Point,
    Spot,
    RectArea,
}

/// Camera projection choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum CameraSetup {
    #[default]
    Perspective,
    Orthographic,
}

impl CameraSetup {
    /// Camera with this projection; orthographic views start zoomed out.
    pub fn camera(self, aspect: f32) -> Camera {
        match self {
            Self::Perspective => {
                Camera::with_projection(Projection::perspective_degrees(75.0, aspect, 0.1, 100.0))
            }
            Self::Orthographic => {
                let mut camera =
                    Camera::with_projection(Projection::orthographic_unit(aspect, 0.1, 100.0));
                camera.zoom = 0.15;
                camera
            }
        }
    }
}

/// Options that select between demo variants.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DemoOptions {
    pub light: Option<LightSetup>,
    pub camera: CameraSetup,
    pub aspect: Option<f32>,
}

/// A fully built demo, ready to be handed to a render loop.
pub struct DemoScene {
    pub kind: DemoKind,
    pub graph: SceneGraph,
    pub camera: Camera,
    pub driver: AnimationDriver,
    pub assets: AssetRegistry,
    /// Point the orbit controls circle around
    pub focus: Vec3,
}

/// Build the requested demo.
pub fn build(kind: DemoKind, options: DemoOptions) -> Result<DemoScene> {
    let camera = options.camera.camera(options.aspect.unwrap_or(16.0 / 9.0));
    let light = options.light.or(kind.default_light());

    if options.light.is_some() && kind.default_light().is_none() {
        tracing::warn!("The {} demo has a fixed light rig; ignoring light option", kind);
    }

    let scene = match kind {
        DemoKind::SolarSystem => solar::build(camera)?,
        DemoKind::Materials => materials::build_textured(camera)?,
        DemoKind::MaterialStack => materials::build_stack(camera)?,
        DemoKind::Lights | DemoKind::CameraTracking | DemoKind::Shadows => {
            stage::build(kind, light.unwrap_or(LightSetup::RectArea), camera)?
        }
    };

    tracing::info!(
        demo = %kind,
        nodes = scene.graph.len(),
        rules = scene.driver.len(),
        geometries = scene.assets.geometry_count(),
        materials = scene.assets.material_count(),
        "Demo scene built"
    );
    Ok(scene)
}
