//! Render loop and renderer interface.
//!
//! This crate orchestrates each frame:
//! - Frame snapshots and draw lists
//! - The render loop state machine (animate, update transforms, draw)
//! - A headless renderer that consumes draw lists without a GPU

pub mod error;
pub mod frame;
pub mod headless;
pub mod render_loop;

pub use error::{LoopError, RenderError};
pub use frame::{DrawItem, DrawList, Frame, LightItem};
pub use headless::{FrameStats, HeadlessRenderer};
pub use render_loop::{LoopState, RenderLoop, TickReport};

/// Something that turns frame snapshots into pixels.
///
/// GPU resource lifetime belongs to the implementation. An error returned from
/// [`Renderer::render`] is treated as fatal by the render loop.
pub trait Renderer {
    /// Draw one frame.
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), RenderError>;

    /// The output surface changed size.
    fn resize(&mut self, _width: u32, _height: u32) {}
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
        (**self).render(frame)
    }

    fn resize(&mut self, width: u32, height: u32) {
        (**self).resize(width, height)
    }
}
