//! Scene graph: an arena of nodes arranged in a tree.
//!
//! Nodes are owned by the [`SceneGraph`] and addressed by [`NodeId`] handles
//! returned at creation time. Parent/child links only record the tree shape.
//! Slots of destroyed nodes are never reused, so a handle either names the
//! node it was created for or reports [`SceneError::StaleReference`].

use std::fmt;

use glam::{Mat4, Vec3};
use orrery_resources::{GeometryHandle, MaterialHandle};

use crate::{SceneError, SceneLight, SceneResult, Transform};

/// Handle to a node in a [`SceneGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    fn slot(self) -> usize {
        self.0 as usize
    }

    /// Raw arena index.
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Id for the arena slot at `len`.
fn slot_id(len: usize) -> SceneResult<NodeId> {
    u32::try_from(len)
        .map(NodeId)
        .map_err(|_| SceneError::CapacityExceeded)
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Geometry and material drawn at a node's world transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Renderable {
    pub geometry: GeometryHandle,
    pub material: MaterialHandle,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Renderable {
    pub fn new(geometry: GeometryHandle, material: MaterialHandle) -> Self {
        Self {
            geometry,
            material,
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    /// Enable both casting and receiving shadows.
    pub fn with_shadows(mut self) -> Self {
        self.cast_shadow = true;
        self.receive_shadow = true;
        self
    }

    pub fn receiving_shadows(mut self) -> Self {
        self.receive_shadow = true;
        self
    }
}

/// What a node carries besides its transform.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Mesh(Renderable),
    Light(SceneLight),
}

/// A node of the scene tree.
#[derive(Clone, Debug, Default)]
pub struct Node {
    name: Option<String>,
    /// Transform relative to the parent node
    pub transform: Transform,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    payload: Option<Payload>,
}

impl Node {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    pub fn renderable(&self) -> Option<&Renderable> {
        match &self.payload {
            Some(Payload::Mesh(renderable)) => Some(renderable),
            _ => None,
        }
    }

    pub fn light(&self) -> Option<&SceneLight> {
        match &self.payload {
            Some(Payload::Light(light)) => Some(light),
            _ => None,
        }
    }

    pub fn light_mut(&mut self) -> Option<&mut SceneLight> {
        match &mut self.payload {
            Some(Payload::Light(light)) => Some(light),
            _ => None,
        }
    }

    /// A pivot only establishes a reference frame for its children.
    pub fn is_pivot(&self) -> bool {
        self.payload.is_none()
    }
}

/// Owning tree of nodes rooted at a single scene root.
#[derive(Debug)]
pub struct SceneGraph {
    nodes: Vec<Option<Node>>,
    root: NodeId,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create a graph containing only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Node::default())],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Allocate an unattached node with the identity transform.
    ///
    /// Slots are never reused, so a graph hands out at most 2^32 ids over its
    /// lifetime; past that this fails with [`SceneError::CapacityExceeded`].
    pub fn create_node(&mut self, name: Option<&str>) -> SceneResult<NodeId> {
        let id = slot_id(self.nodes.len())?;
        self.nodes.push(Some(Node {
            name: name.map(str::to_owned),
            ..Default::default()
        }));
        Ok(id)
    }

    /// Create a node and attach it under `parent`.
    pub fn spawn(&mut self, parent: NodeId, name: Option<&str>) -> SceneResult<NodeId> {
        self.node(parent)?;
        let id = self.create_node(name)?;
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Whether the handle names a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id.slot()), Some(Some(_)))
    }

    /// Number of live nodes, including the root and orphaned subtrees.
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn node(&self, id: NodeId) -> SceneResult<&Node> {
        self.nodes
            .get(id.slot())
            .and_then(Option::as_ref)
            .ok_or(SceneError::StaleReference(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> SceneResult<&mut Node> {
        self.nodes
            .get_mut(id.slot())
            .and_then(Option::as_mut)
            .ok_or(SceneError::StaleReference(id))
    }

    pub fn transform(&self, id: NodeId) -> SceneResult<&Transform> {
        Ok(&self.node(id)?.transform)
    }

    pub fn transform_mut(&mut self, id: NodeId) -> SceneResult<&mut Transform> {
        Ok(&mut self.node_mut(id)?.transform)
    }

    pub fn set_name(&mut self, id: NodeId, name: Option<&str>) -> SceneResult<()> {
        self.node_mut(id)?.name = name.map(str::to_owned);
        Ok(())
    }

    pub fn set_renderable(&mut self, id: NodeId, renderable: Renderable) -> SceneResult<()> {
        self.node_mut(id)?.payload = Some(Payload::Mesh(renderable));
        Ok(())
    }

    pub fn set_light(&mut self, id: NodeId, light: SceneLight) -> SceneResult<()> {
        self.node_mut(id)?.payload = Some(Payload::Light(light));
        Ok(())
    }

    pub fn parent(&self, id: NodeId) -> SceneResult<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    pub fn children(&self, id: NodeId) -> SceneResult<&[NodeId]> {
        Ok(&self.node(id)?.children)
    }

    /// The `index`-th child of `id`, if any.
    pub fn child(&self, id: NodeId, index: usize) -> SceneResult<Option<NodeId>> {
        Ok(self.node(id)?.children.get(index).copied())
    }

    /// Whether `ancestor` lies on the parent chain of `node` (or is `node`).
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).ok().and_then(|n| n.parent);
        }
        false
    }

    /// Whether `id` is reachable from the root.
    pub fn is_in_scene(&self, id: NodeId) -> bool {
        self.contains(id) && self.is_ancestor(self.root, id)
    }

    /// Append `child` to `parent`'s children.
    ///
    /// Fails without mutating anything when `child` is `parent` or one of its
    /// ancestors, when `child` already has a parent, or when `child` is the
    /// root.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        self.node(parent)?;
        let existing_parent = self.node(child)?.parent;

        if child == self.root {
            return Err(SceneError::RootAttach);
        }
        if self.is_ancestor(child, parent) {
            return Err(SceneError::Cycle { parent, child });
        }
        if let Some(existing) = existing_parent {
            return Err(SceneError::AlreadyAttached {
                child,
                parent: existing,
            });
        }

        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        tracing::trace!(%parent, %child, "Attached node");
        Ok(())
    }

    /// Remove `id` from its parent's children, leaving it an orphaned root.
    ///
    /// Detaching a node without a parent does nothing.
    pub fn detach(&mut self, id: NodeId) -> SceneResult<()> {
        let Some(parent) = self.node_mut(id)?.parent.take() else {
            return Ok(());
        };
        self.node_mut(parent)?.children.retain(|&c| c != id);
        tracing::trace!(%parent, child = %id, "Detached node");
        Ok(())
    }

    /// Detach `id` and drop it together with its whole subtree.
    ///
    /// Returns the number of nodes removed.
    pub fn destroy(&mut self, id: NodeId) -> SceneResult<usize> {
        if id == self.root {
            return Err(SceneError::RootDestroy);
        }
        self.detach(id)?;

        let doomed: Vec<NodeId> = self.traverse_from(id)?.collect();
        for &node in &doomed {
            self.nodes[node.slot()] = None;
        }
        tracing::debug!(node = %id, removed = doomed.len(), "Destroyed subtree");
        Ok(doomed.len())
    }

    /// First node named `name` in pre-order from the root.
    ///
    /// Names are not unique: when several nodes share a name, the one visited
    /// first wins. Detached subtrees are not searched.
    pub fn find_by_name(&self, name: &str) -> SceneResult<NodeId> {
        self.traverse()
            .find(|&id| self.nodes[id.slot()].as_ref().and_then(Node::name) == Some(name))
            .ok_or_else(|| SceneError::NotFound(name.to_owned()))
    }

    /// Every node named `name`, in pre-order from the root.
    pub fn find_all_by_name(&self, name: &str) -> Vec<NodeId> {
        self.traverse()
            .filter(|&id| self.nodes[id.slot()].as_ref().and_then(Node::name) == Some(name))
            .collect()
    }

    /// Pre-order traversal of the scene tree.
    pub fn traverse(&self) -> Traverse<'_> {
        Traverse {
            graph: self,
            stack: vec![self.root],
        }
    }

    /// Pre-order traversal of the subtree rooted at `id`.
    pub fn traverse_from(&self, id: NodeId) -> SceneResult<Traverse<'_>> {
        self.node(id)?;
        Ok(Traverse {
            graph: self,
            stack: vec![id],
        })
    }

    /// Compose local matrices from the topmost ancestor down to `id`.
    pub fn world_transform(&self, id: NodeId) -> SceneResult<Mat4> {
        let node = self.node(id)?;
        let mut world = node.transform.local_matrix();
        let mut current = node.parent;
        while let Some(parent) = current {
            let parent = self.node(parent)?;
            world = parent.transform.local_matrix() * world;
            current = parent.parent;
        }
        Ok(world)
    }

    pub fn world_position(&self, id: NodeId) -> SceneResult<Vec3> {
        Ok(self.world_transform(id)?.transform_point3(Vec3::ZERO))
    }

    /// World matrices of every node in the scene tree, computed in one
    /// pre-order pass that reuses each parent's result.
    pub fn compute_world_transforms(&self) -> WorldTransforms {
        let mut result = WorldTransforms {
            order: Vec::new(),
            slots: vec![None; self.nodes.len()],
        };
        let mut stack = vec![(self.root, Mat4::IDENTITY)];

        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = self.nodes[id.slot()].as_ref() else {
                continue;
            };
            let world = parent_world * node.transform.local_matrix();
            result.slots[id.slot()] = Some(world);
            result.order.push((id, world));
            stack.extend(node.children.iter().rev().map(|&child| (child, world)));
        }

        result
    }
}

/// Pre-order iterator over a subtree.
pub struct Traverse<'a> {
    graph: &'a SceneGraph,
    stack: Vec<NodeId>,
}

impl Iterator for Traverse<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        if let Some(Some(node)) = self.graph.nodes.get(id.slot()) {
            self.stack.extend(node.children.iter().rev());
        }
        Some(id)
    }
}

/// Snapshot of world matrices produced by
/// [`SceneGraph::compute_world_transforms`].
#[derive(Debug, Clone, Default)]
pub struct WorldTransforms {
    order: Vec<(NodeId, Mat4)>,
    slots: Vec<Option<Mat4>>,
}

impl WorldTransforms {
    pub fn get(&self, id: NodeId) -> Option<Mat4> {
        self.slots.get(id.slot()).copied().flatten()
    }

    /// Entries in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Mat4)> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
