//! Per-frame animation driver.
//!
//! Every rule is a pure function of elapsed time: the driver sets values, it
//! never accumulates them, so replaying the same time yields the same scene.
//! Rules run in insertion order and read world positions when they execute,
//! which lets a tracking rule observe a node moved by an earlier rule in the
//! same pass.

use std::fmt;
use std::sync::Arc;

use glam::Vec3;

use crate::{Camera, NodeId, SceneError, SceneGraph, SceneResult, Transform};

/// How a rule names the node it works on.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeRef {
    Id(NodeId),
    /// First node with this name in traversal order.
    Name(String),
    /// The `index`-th child of another reference.
    Child { parent: Box<NodeRef>, index: usize },
}

impl NodeRef {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn child(self, index: usize) -> Self {
        Self::Child {
            parent: Box::new(self),
            index,
        }
    }

    /// Resolve to a node that is currently part of the scene tree.
    pub fn resolve(&self, graph: &SceneGraph) -> SceneResult<NodeId> {
        match self {
            Self::Id(id) if graph.is_in_scene(*id) => Ok(*id),
            Self::Id(id) => Err(SceneError::StaleReference(*id)),
            Self::Name(name) => graph.find_by_name(name),
            Self::Child { parent, index } => {
                let parent = parent.resolve(graph)?;
                graph
                    .child(parent, *index)?
                    .ok_or_else(|| SceneError::NotFound(format!("{parent}[{index}]")))
            }
        }
    }
}

impl From<NodeId> for NodeRef {
    fn from(id: NodeId) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for NodeRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => write!(f, "{name:?}"),
            Self::Child { parent, index } => write!(f, "{parent}[{index}]"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn component(self, v: &mut Vec3) -> &mut f32 {
        match self {
            Self::X => &mut v.x,
            Self::Y => &mut v.y,
            Self::Z => &mut v.z,
        }
    }
}

/// One scalar of a local transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Position(Axis),
    Rotation(Axis),
    Scale(Axis),
}

impl Channel {
    pub fn write(self, transform: &mut Transform, value: f32) {
        let (vector, axis) = match self {
            Self::Position(axis) => (&mut transform.position, axis),
            Self::Rotation(axis) => (&mut transform.rotation, axis),
            Self::Scale(axis) => (&mut transform.scale, axis),
        };
        *axis.component(vector) = value;
    }
}

/// A function of elapsed seconds.
#[derive(Clone)]
pub enum Curve {
    /// `offset + t * rate`
    Linear { rate: f32, offset: f32 },
    /// `offset + amplitude * sin(t * frequency + phase)`
    Sine {
        amplitude: f32,
        frequency: f32,
        phase: f32,
        offset: f32,
    },
    Custom(Arc<dyn Fn(f32) -> f32 + Send + Sync>),
}

impl Curve {
    pub fn linear(rate: f32) -> Self {
        Self::Linear { rate, offset: 0.0 }
    }

    /// Linear angle given in degrees per second plus a degree offset,
    /// producing radians.
    pub fn degrees(rate: f32, offset: f32) -> Self {
        Self::Linear {
            rate: rate.to_radians(),
            offset: offset.to_radians(),
        }
    }

    pub fn custom(f: impl Fn(f32) -> f32 + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    pub fn eval(&self, t: f32) -> f32 {
        match self {
            Self::Linear { rate, offset } => offset + t * rate,
            Self::Sine {
                amplitude,
                frequency,
                phase,
                offset,
            } => offset + amplitude * (t * frequency + phase).sin(),
            Self::Custom(f) => f(t),
        }
    }
}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear { rate, offset } => f
                .debug_struct("Linear")
                .field("rate", rate)
                .field("offset", offset)
                .finish(),
            Self::Sine {
                amplitude,
                frequency,
                phase,
                offset,
            } => f
                .debug_struct("Sine")
                .field("amplitude", amplitude)
                .field("frequency", frequency)
                .field("phase", phase)
                .field("offset", offset)
                .finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Where a tracked world position is written.
#[derive(Clone, Debug, PartialEq)]
pub enum Sink {
    CameraPosition,
    CameraLookAt,
    /// The aim point of a directional or spot light.
    LightTarget(NodeRef),
    /// A node's local position, converted into its parent's space.
    NodePosition(NodeRef),
}

#[derive(Clone, Debug)]
pub enum AnimationRule {
    /// Set a transform channel to `curve(t)`.
    Absolute {
        node: NodeRef,
        channel: Channel,
        curve: Curve,
    },
    /// Copy the world position of `source` into `sink`.
    Track { source: NodeRef, sink: Sink },
    /// Copy the camera pose into a rig node's local transform.
    FollowCamera { node: NodeRef },
}

impl AnimationRule {
    /// Continuous spin about one axis at `rate` radians per second.
    pub fn spin(node: impl Into<NodeRef>, axis: Axis, rate: f32) -> Self {
        Self::Absolute {
            node: node.into(),
            channel: Channel::Rotation(axis),
            curve: Curve::linear(rate),
        }
    }

    pub fn track(source: impl Into<NodeRef>, sink: Sink) -> Self {
        Self::Track {
            source: source.into(),
            sink,
        }
    }
}

/// Why a rule did not run this frame.
#[derive(Debug)]
enum Skip {
    Scene(SceneError),
    NoTarget(NodeId),
}

impl From<SceneError> for Skip {
    fn from(error: SceneError) -> Self {
        Self::Scene(error)
    }
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scene(error) => write!(f, "{error}"),
            Self::NoTarget(id) => write!(f, "{id} carries no aimable light"),
        }
    }
}

/// Outcome of one animation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationReport {
    pub applied: usize,
    pub skipped: usize,
}

#[derive(Clone, Debug)]
struct NamedRule {
    name: String,
    rule: AnimationRule,
}

/// Ordered set of named animation rules.
#[derive(Clone, Debug, Default)]
pub struct AnimationDriver {
    rules: Vec<NamedRule>,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule; it runs after every rule added before it.
    pub fn add(&mut self, name: impl Into<String>, rule: AnimationRule) -> &mut Self {
        self.rules.push(NamedRule {
            name: name.into(),
            rule,
        });
        self
    }

    /// Remove every rule with this name. Returns whether any existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r.name != name);
        self.rules.len() != before
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }

    /// Run every rule for time `elapsed` (seconds).
    ///
    /// A rule whose node cannot be resolved is skipped for this frame; the
    /// remaining rules still run.
    pub fn apply(&self, elapsed: f32, graph: &mut SceneGraph, camera: &mut Camera) -> AnimationReport {
        let mut report = AnimationReport::default();

        for NamedRule { name, rule } in &self.rules {
            match apply_rule(rule, elapsed, graph, camera) {
                Ok(()) => report.applied += 1,
                Err(reason) => {
                    tracing::debug!(rule = %name, %reason, "Skipping animation rule");
                    report.skipped += 1;
                }
            }
        }

        tracing::trace!(elapsed, applied = report.applied, skipped = report.skipped, "Animation pass");
        report
    }
}

fn apply_rule(
    rule: &AnimationRule,
    elapsed: f32,
    graph: &mut SceneGraph,
    camera: &mut Camera,
) -> Result<(), Skip> {
    match rule {
        AnimationRule::Absolute {
            node,
            channel,
            curve,
        } => {
            let id = node.resolve(graph)?;
            channel.write(graph.transform_mut(id)?, curve.eval(elapsed));
        }
        AnimationRule::Track { source, sink } => {
            let source = source.resolve(graph)?;
            let point = graph.world_position(source)?;
            write_sink(sink, point, graph, camera)?;
        }
        AnimationRule::FollowCamera { node } => {
            let id = node.resolve(graph)?;
            let transform = graph.transform_mut(id)?;
            transform.position = camera.position;
            transform.set_quat(camera.rotation);
        }
    }
    Ok(())
}

fn write_sink(sink: &Sink, point: Vec3, graph: &mut SceneGraph, camera: &mut Camera) -> Result<(), Skip> {
    match sink {
        Sink::CameraPosition => camera.position = point,
        Sink::CameraLookAt => camera.look_at(point),
        Sink::LightTarget(node) => {
            let id = node.resolve(graph)?;
            let aimed = graph
                .node_mut(id)?
                .light_mut()
                .is_some_and(|light| light.set_target(point));
            if !aimed {
                return Err(Skip::NoTarget(id));
            }
        }
        Sink::NodePosition(node) => {
            let id = node.resolve(graph)?;
            let local = match graph.parent(id)? {
                Some(parent) => graph
                    .world_transform(parent)?
                    .inverse()
                    .transform_point3(point),
                None => point,
            };
            graph.transform_mut(id)?.position = local;
        }
    }
    Ok(())
}
