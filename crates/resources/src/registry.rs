//! Asset registry and typed handles.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::{Geometry, Material, ResourceError, ResourceResult, Texture};

/// Typed index into an [`AssetRegistry`] table.
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Handle<T> {
    index: u32,
    #[serde(skip)]
    marker: PhantomData<fn() -> T>,
}

pub type GeometryHandle = Handle<Geometry>;
pub type MaterialHandle = Handle<Material>;
pub type TextureHandle = Handle<Texture>;

impl<T> Handle<T> {
    fn new(index: u32) -> Self {
        Self {
            index,
            marker: PhantomData,
        }
    }

    /// Raw table index.
    pub fn index(self) -> u32 {
        self.index
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle#{}", self.index)
    }
}

/// Owns every geometry, material and texture descriptor of a scene.
#[derive(Debug, Default)]
pub struct AssetRegistry {
    geometries: Vec<Geometry>,
    materials: Vec<Material>,
    textures: Vec<Texture>,
}

fn push<T>(table: &mut Vec<T>, value: T) -> Handle<T> {
    let index = u32::try_from(table.len()).unwrap_or(u32::MAX);
    table.push(value);
    Handle::new(index)
}

fn lookup<'a, T>(table: &'a [T], handle: Handle<T>, kind: &'static str) -> ResourceResult<&'a T> {
    table
        .get(handle.index as usize)
        .ok_or(ResourceError::UnknownHandle {
            kind,
            index: handle.index,
        })
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a geometry after validating its parameters.
    pub fn add_geometry(&mut self, geometry: Geometry) -> ResourceResult<GeometryHandle> {
        geometry.validate()?;
        tracing::trace!(kind = geometry.kind(), "Registering geometry");
        Ok(push(&mut self.geometries, geometry))
    }

    /// Register a material. Every texture it references must already be known.
    pub fn add_material(&mut self, material: Material) -> ResourceResult<MaterialHandle> {
        for texture in material.textures() {
            lookup(&self.textures, texture, "texture")?;
        }
        Ok(push(&mut self.materials, material))
    }

    pub fn add_texture(&mut self, texture: Texture) -> TextureHandle {
        tracing::trace!(path = %texture.path.display(), "Registering texture");
        push(&mut self.textures, texture)
    }

    pub fn geometry(&self, handle: GeometryHandle) -> ResourceResult<&Geometry> {
        lookup(&self.geometries, handle, "geometry")
    }

    pub fn material(&self, handle: MaterialHandle) -> ResourceResult<&Material> {
        lookup(&self.materials, handle, "material")
    }

    pub fn texture(&self, handle: TextureHandle) -> ResourceResult<&Texture> {
        lookup(&self.textures, handle, "texture")
    }

    pub fn geometry_count(&self) -> usize {
        self.geometries.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}
