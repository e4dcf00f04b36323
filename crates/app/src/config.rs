//! Start-up configuration.
//!
//! Settings come from an optional RON file; command line flags override
//! whatever the file says.

use std::path::{Path, PathBuf};

use clap::Parser;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

use orrery_core::{Error, Result};

use crate::demos::{CameraSetup, DemoKind, DemoOptions, LightSetup};

#[derive(Parser, Debug, Default)]
#[command(version, about = "Scene-graph demos driven by an animation render loop", long_about = None)]
pub struct Arguments {
    /// Demo to run.
    #[arg(value_enum)]
    pub demo: Option<DemoKind>,

    /// Main light for the stage demos.
    #[arg(short, long, value_enum)]
    pub light: Option<LightSetup>,

    /// Camera projection.
    #[arg(short, long, value_enum)]
    pub camera: Option<CameraSetup>,

    /// Multiplier from wall-clock seconds to animation time.
    #[arg(long)]
    pub time_scale: Option<f32>,

    /// Step the loop without opening a window.
    #[arg(long)]
    pub headless: bool,

    /// Number of frames to step in headless mode.
    #[arg(long)]
    pub frames: Option<u32>,

    /// RON file with settings.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Orrery".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub demo: DemoKind,
    pub light: Option<LightSetup>,
    pub camera: CameraSetup,
    /// `None` uses the demo's own default.
    pub time_scale: Option<f32>,
    pub window: WindowSettings,
    pub headless: bool,
    pub frames: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            demo: DemoKind::default(),
            light: None,
            camera: CameraSetup::default(),
            time_scale: None,
            window: WindowSettings::default(),
            headless: false,
            frames: 240,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!("Loading configuration from {}", path.display());
        let data = std::fs::read_to_string(path)?;
        Self::from_ron_str(&data)
    }

    pub fn from_ron_str(data: &str) -> Result<Self> {
        let config: Self = ron::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(self, PrettyConfig::new())?)
    }

    /// File settings (if a file was given) with command line flags applied on top.
    pub fn resolve(arguments: &Arguments) -> Result<Self> {
        let mut config = match &arguments.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.merge(arguments);
        config.validate()?;
        Ok(config)
    }

    pub fn merge(&mut self, arguments: &Arguments) {
        if let Some(demo) = arguments.demo {
            self.demo = demo;
        }
        if let Some(light) = arguments.light {
            self.light = Some(light);
        }
        if let Some(camera) = arguments.camera {
            self.camera = camera;
        }
        if let Some(time_scale) = arguments.time_scale {
            self.time_scale = Some(time_scale);
        }
        if let Some(frames) = arguments.frames {
            self.frames = frames;
        }
        self.headless |= arguments.headless;
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(time_scale) = self.time_scale
            && !(time_scale.is_finite() && time_scale >= 0.0)
        {
            return Err(Error::Config(format!(
                "time_scale must be a non-negative number, got {time_scale}"
            )));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(Error::Config(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        Ok(())
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale.unwrap_or_else(|| self.demo.default_time_scale())
    }

    pub fn demo_options(&self) -> DemoOptions {
        DemoOptions {
            light: self.light,
            camera: self.camera,
            aspect: Some(self.window.width as f32 / self.window.height as f32),
        }
    }
}
