//! Resource descriptors.
//!
//! This crate describes what a scene is made of without loading anything:
//! - Geometry descriptors (box, sphere, plane, torus, torus knot)
//! - Material descriptors and their texture map stacks
//! - Texture references with sampling settings
//! - An asset registry handing out typed handles

pub mod error;
pub mod geometry;
pub mod material;
pub mod registry;
pub mod texture;

pub use error::{ResourceError, ResourceResult};
pub use geometry::Geometry;
pub use material::{Material, MaterialMaps, PhongMaterial, Side, StandardMaterial};
pub use registry::{AssetRegistry, GeometryHandle, Handle, MaterialHandle, TextureHandle};
pub use texture::{Filter, Texture, TextureSettings, Wrap};
