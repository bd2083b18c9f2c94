//! Scene tree composition.
//!
//! A [`Node`] exclusively owns its children, so the scene is always a tree:
//! attaching a node moves it, and dropping a node drops its whole subtree
//! along with the shapes it owns.
//!
//! Drawing walks the tree depth-first, composing local transforms into the
//! accumulated model matrix. Transform nodes right-multiply their own matrix
//! onto the parent's; geometry and light leaves hand the accumulated matrix
//! to their shape.
//!
//! # Example
//!
//! ```
//! use viz_scene::{Node, PointLight, Transform};
//! use glam::Vec3;
//!
//! let mut root = Node::group("root")
//!     .with_child(
//!         Node::transform("lift", Transform::translate(0.0, 3.0, 5.0))
//!             .with_child(Node::light("light", PointLight::new(Vec3::ONE))),
//!     );
//!
//! let items = root.collect();
//! assert_eq!(items.lights.len(), 1);
//! assert!(items.meshes.is_empty());
//! ```

use std::fmt;

use glam::{Mat4, Vec3};
use viz_core::Result;

use crate::animation::Animation;
use crate::shape::{Drawable, Light};
use crate::transform::Transform;

/// Shared per-frame inputs for a draw traversal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    pub view: Mat4,
    pub projection: Mat4,
    /// Seconds since the previous frame
    pub dt: f32,
}

impl Default for FrameContext {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            dt: 0.0,
        }
    }
}

/// What a node contributes to the traversal.
pub enum NodeKind {
    /// Passes the accumulated matrix to its children unchanged
    Group,
    /// Applies one local transform to its subtree
    Transform {
        transform: Transform,
        animation: Option<Animation>,
    },
    /// Leaf owning a drawable mesh
    Geometry(Box<dyn Drawable>),
    /// Leaf owning a light source
    Light(Box<dyn Light>),
}

impl NodeKind {
    fn label(&self) -> &'static str {
        match self {
            NodeKind::Group => "Group",
            NodeKind::Transform { .. } => "Transform",
            NodeKind::Geometry(_) => "Geometry",
            NodeKind::Light(_) => "Light",
        }
    }
}

/// References gathered by the light-collection pass, in depth-first order.
#[derive(Default)]
pub struct SceneItems<'a> {
    pub lights: Vec<&'a mut dyn Light>,
    pub meshes: Vec<&'a mut dyn Drawable>,
}

/// A node of the scene tree.
pub struct Node {
    name: String,
    kind: NodeKind,
    children: Vec<Node>,
}

impl Node {
    fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            children: Vec::new(),
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    pub fn transform(name: impl Into<String>, transform: Transform) -> Self {
        Self::new(
            name,
            NodeKind::Transform {
                transform,
                animation: None,
            },
        )
    }

    pub fn geometry(name: impl Into<String>, shape: impl Drawable + 'static) -> Self {
        Self::new(name, NodeKind::Geometry(Box::new(shape)))
    }

    pub fn light(name: impl Into<String>, light: impl Light + 'static) -> Self {
        Self::new(name, NodeKind::Light(Box::new(light)))
    }

    /// Attach an animation to a transform node.
    ///
    /// Other node kinds have no transform to animate; the animation is dropped
    /// with a warning.
    pub fn with_animation(mut self, animation: Animation) -> Self {
        match &mut self.kind {
            NodeKind::Transform { animation: slot, .. } => *slot = Some(animation),
            kind => tracing::warn!(
                "Ignoring animation on {} node '{}'",
                kind.label(),
                self.name
            ),
        }
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// The local transform, if this is a transform node.
    pub fn local_transform(&self) -> Option<&Transform> {
        match &self.kind {
            NodeKind::Transform { transform, .. } => Some(transform),
            _ => None,
        }
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Depth-first search for the first node with the given name.
    pub fn find(&self, name: &str) -> Option<&Node> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Gather every light and mesh in this subtree, depth-first.
    ///
    /// Geometry and light nodes are leaves: anything attached below them is
    /// skipped here just as it is by [`draw`](Self::draw).
    pub fn collect(&mut self) -> SceneItems<'_> {
        let mut items = SceneItems::default();
        self.collect_into(&mut items);
        items
    }

    fn collect_into<'a>(&'a mut self, items: &mut SceneItems<'a>) {
        let Self { kind, children, .. } = self;
        match kind {
            NodeKind::Light(light) => items.lights.push(&mut **light),
            NodeKind::Geometry(shape) => items.meshes.push(&mut **shape),
            NodeKind::Group | NodeKind::Transform { .. } => {
                for child in children.iter_mut() {
                    child.collect_into(items);
                }
            }
        }
    }

    /// Draw this subtree with `parent` as the accumulated model matrix.
    ///
    /// Animations on transform nodes advance by `frame.dt` before their
    /// matrix is read. The first shape error aborts the traversal.
    pub fn draw(&mut self, parent: Mat4, frame: &FrameContext) -> Result<()> {
        let Self { kind, children, .. } = self;
        match kind {
            NodeKind::Group => {
                for child in children.iter_mut() {
                    child.draw(parent, frame)?;
                }
            }
            NodeKind::Transform {
                transform,
                animation,
            } => {
                if let Some(animation) = animation {
                    animation.apply(transform, frame.dt);
                }
                let current = parent * transform.matrix();
                for child in children.iter_mut() {
                    child.draw(current, frame)?;
                }
            }
            NodeKind::Geometry(shape) => {
                shape.transform(frame.projection, frame.view, parent)?;
                shape.draw()?;
            }
            NodeKind::Light(light) => {
                light.set_position(parent.transform_point3(Vec3::ZERO));
                light.transform(frame.projection, frame.view, parent)?;
                light.draw()?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("kind", &self.kind.label())
            .field("children", &self.children)
            .finish()
    }
}
