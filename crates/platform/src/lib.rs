//! Platform layer.
//!
//! This crate provides host integration:
//! - Window management via winit
//! - Per-frame input accumulation (keyboard, pointer, scroll)

mod input;
mod window;

pub use input::{InputState, KeyCode, MouseButton};
pub use window::Window;

// Re-export winit types that users might need
pub use winit::event::{Event, WindowEvent};
pub use winit::event_loop::EventLoop;
