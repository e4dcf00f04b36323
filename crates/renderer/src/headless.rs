//! A renderer that builds draw lists without touching a GPU.

use glam::Mat4;

use crate::{Frame, RenderError, Renderer};

/// Summary of one consumed frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStats {
    pub index: u64,
    pub time: f32,
    pub meshes: usize,
    pub lights: usize,
    pub shadow_casters: usize,
    pub shadow_lights: usize,
    pub view_projection: Mat4,
}

/// Consumes frames by building their draw lists and logging a summary.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    viewport: (u32, u32),
    frames_rendered: u64,
    last: Option<FrameStats>,
}

impl HeadlessRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: (width, height),
            ..Default::default()
        }
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn last_frame(&self) -> Option<&FrameStats> {
        self.last.as_ref()
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
        let list = frame.draw_list();
        let stats = FrameStats {
            index: frame.index,
            time: frame.time,
            meshes: list.meshes.len(),
            lights: list.lights.len(),
            shadow_casters: list.shadow_casters().count(),
            shadow_lights: list.shadow_lights().count(),
            view_projection: frame.camera.view_projection_matrix(),
        };

        tracing::trace!(
            frame = stats.index,
            meshes = stats.meshes,
            lights = stats.lights,
            shadow_casters = stats.shadow_casters,
            "Frame consumed"
        );

        self.frames_rendered += 1;
        self.last = Some(stats);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        tracing::debug!("Headless viewport resized: {}x{}", width, height);
    }
}
