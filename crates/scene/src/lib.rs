//! Scene graph and components.
//!
//! This crate provides scene management:
//! - Transform hierarchy (arena-backed scene graph)
//! - Time-driven animation rules
//! - Camera and orbit controls
//! - Light definitions and shadow settings

pub mod animation;
pub mod camera;
pub mod controls;
pub mod error;
pub mod graph;
pub mod light;
pub mod transform;

pub use animation::{
    AnimationDriver, AnimationReport, AnimationRule, Axis, Channel, Curve, NodeRef, Sink,
};
pub use camera::{Camera, Projection};
pub use controls::OrbitControls;
pub use error::{SceneError, SceneResult};
pub use graph::{Node, NodeId, Payload, Renderable, SceneGraph, Traverse, WorldTransforms};
pub use light::{LightKind, SceneLight, ShadowSettings};
pub use transform::{Transform, normal_matrix};
