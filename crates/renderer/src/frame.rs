//! Per-frame snapshot handed to renderers.

use glam::{Mat4, Vec3};
use orrery_scene::{
    Camera, NodeId, Payload, Renderable, SceneGraph, SceneLight, WorldTransforms, normal_matrix,
};

/// Everything a renderer may read while drawing one frame.
pub struct Frame<'a> {
    pub graph: &'a SceneGraph,
    pub world: &'a WorldTransforms,
    pub camera: &'a Camera,
    /// Monotonic frame counter, starting at 0
    pub index: u64,
    /// Animation time of this frame in seconds
    pub time: f32,
}

/// A mesh to draw.
#[derive(Clone, Copy, Debug)]
pub struct DrawItem {
    pub node: NodeId,
    pub model: Mat4,
    pub normal: Mat4,
    pub renderable: Renderable,
}

/// A light resolved to world space.
#[derive(Clone, Copy, Debug)]
pub struct LightItem {
    pub node: NodeId,
    pub position: Vec3,
    /// Shining direction for aimed lights, or the node's -Z for area lights
    pub direction: Option<Vec3>,
    pub light: SceneLight,
}

/// Meshes and lights of a frame in traversal order.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    pub meshes: Vec<DrawItem>,
    pub lights: Vec<LightItem>,
}

impl DrawList {
    pub fn shadow_casters(&self) -> impl Iterator<Item = &DrawItem> {
        self.meshes.iter().filter(|m| m.renderable.cast_shadow)
    }

    pub fn shadow_receivers(&self) -> impl Iterator<Item = &DrawItem> {
        self.meshes.iter().filter(|m| m.renderable.receive_shadow)
    }

    pub fn shadow_lights(&self) -> impl Iterator<Item = &LightItem> {
        self.lights.iter().filter(|l| l.light.casts_shadow())
    }
}

impl Frame<'_> {
    /// Collect the frame's meshes and lights, parents before children.
    pub fn draw_list(&self) -> DrawList {
        let mut list = DrawList::default();

        for (id, model) in self.world.iter() {
            let Ok(node) = self.graph.node(id) else {
                continue;
            };
            match node.payload() {
                Some(Payload::Mesh(renderable)) => list.meshes.push(DrawItem {
                    node: id,
                    model,
                    normal: normal_matrix(model),
                    renderable: *renderable,
                }),
                Some(Payload::Light(light)) => {
                    let position = model.transform_point3(Vec3::ZERO);
                    let direction = light.direction_from(position).or_else(|| {
                        matches!(light.kind, orrery_scene::LightKind::RectArea { .. })
                            .then(|| model.transform_vector3(Vec3::NEG_Z).normalize_or_zero())
                    });
                    list.lights.push(LightItem {
                        node: id,
                        position,
                        direction,
                        light: *light,
                    });
                }
                None => {}
            }
        }

        list
    }
}
