//! Scene node data and per-node update behavior

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use crate::scene::NodeId;

/// Surface description pushed to the shader sink when a node is rendered
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Base color; ambient and specular terms are derived from it
    pub color: Vec3,
    /// Specular exponent, non-negative
    pub shininess: f32,
    /// Whether the backend should sample a texture for this node
    pub use_texture: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vec3::new(1.0, 1.0, 1.0),
            shininess: 32.0,
            use_texture: false,
        }
    }
}

/// Per-node update logic, dispatched by the graph traversal
///
/// Injected strategy instead of node subclassing: a node without a behavior
/// is static, and new node kinds are new implementations of this trait.
pub trait NodeBehavior {
    /// Advance the node by one frame
    ///
    /// Runs after the node's children have been updated.
    fn update(&mut self, node: &mut SceneNode, delta_time: f32);
}

/// Behavior that spins a node at a constant rate per axis
#[derive(Debug, Clone, Copy)]
pub struct Spin {
    /// Rotation rate in degrees per second per axis
    pub degrees_per_second: Vec3,
}

impl NodeBehavior for Spin {
    fn update(&mut self, node: &mut SceneNode, delta_time: f32) {
        node.rotate(self.degrees_per_second * delta_time);
    }
}

/// One entity in the transform hierarchy
///
/// A node is created detached; attach it with [`SceneGraph::add_child`] and
/// it will be owned by its parent (its lifetime bounded by the parent's, or
/// by the registry while it is a root).
///
/// [`SceneGraph::add_child`]: crate::scene::SceneGraph::add_child
pub struct SceneNode {
    /// Node name; unique only within its parent's child set, by convention
    pub name: String,
    /// Local translation
    pub position: Vec3,
    /// Local rotation, Euler degrees applied X then Y then Z
    pub rotation: Vec3,
    /// Local scale; negative (mirroring) and zero components are permitted
    pub scale: Vec3,
    /// Surface description
    pub material: Material,
    /// When false, this node and its entire subtree are skipped for
    /// rendering but still updated
    pub visible: bool,

    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) behavior: Option<Box<dyn NodeBehavior>>,
}

impl std::fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneNode")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("rotation", &self.rotation)
            .field("scale", &self.scale)
            .field("visible", &self.visible)
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}

impl SceneNode {
    /// Create a detached node with identity transform and default material
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            material: Material::default(),
            visible: true,
            parent: None,
            children: Vec::new(),
            behavior: None,
        }
    }

    /// Builder: set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder: set rotation (Euler degrees, X then Y then Z)
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder: set scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder: set base color
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.material.color = color;
        self
    }

    /// Builder: attach an update behavior
    pub fn with_behavior(mut self, behavior: Box<dyn NodeBehavior>) -> Self {
        self.behavior = Some(behavior);
        self
    }

    /// Replace the local position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Replace the local rotation (Euler degrees)
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    /// Replace the local scale
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    /// Move by a delta
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Rotate by a delta in Euler degrees
    pub fn rotate(&mut self, delta: Vec3) {
        self.rotation += delta;
    }

    /// Scale component-wise by the given factors
    pub fn scale_by(&mut self, factors: Vec3) {
        self.scale.component_mul_assign(&factors);
    }

    /// Local transform matrix
    ///
    /// Fixed composition order: translate, then rotate X, Y, Z about the
    /// node's own pre-scale axes, then scale closest to the raw vertices.
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * Mat4::rotation_x(utils::deg_to_rad(self.rotation.x))
            * Mat4::rotation_y(utils::deg_to_rad(self.rotation.y))
            * Mat4::rotation_z(utils::deg_to_rad(self.rotation.z))
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_new_node_defaults() {
        let node = SceneNode::new("thing");
        assert_eq!(node.name, "thing");
        assert_relative_eq!(node.position, Vec3::zeros());
        assert_relative_eq!(node.scale, Vec3::new(1.0, 1.0, 1.0));
        assert!(node.visible);
        assert!(node.parent.is_none());
        assert!(node.children.is_empty());
        assert_relative_eq!(node.material.color, Vec3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(node.material.shininess, 32.0);
        assert!(!node.material.use_texture);
    }

    #[test]
    fn test_relative_transform_ops() {
        let mut node = SceneNode::new("n");
        node.translate(Vec3::new(1.0, 0.0, 0.0));
        node.translate(Vec3::new(1.0, 2.0, 0.0));
        assert_relative_eq!(node.position, Vec3::new(2.0, 2.0, 0.0));

        node.rotate(Vec3::new(0.0, 45.0, 0.0));
        node.rotate(Vec3::new(0.0, 45.0, 0.0));
        assert_relative_eq!(node.rotation, Vec3::new(0.0, 90.0, 0.0));

        node.scale_by(Vec3::new(2.0, 2.0, 2.0));
        node.scale_by(Vec3::new(0.5, 1.0, -1.0));
        assert_relative_eq!(node.scale, Vec3::new(1.0, 2.0, -2.0));
    }

    #[test]
    fn test_local_matrix_composition_order() {
        let node = SceneNode::new("n")
            .with_position(Vec3::new(1.0, 2.0, 3.0))
            .with_rotation(Vec3::new(10.0, 20.0, 30.0))
            .with_scale(Vec3::new(2.0, 0.5, 1.5));

        let expected = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0))
            * crate::foundation::math::euler_xyz_degrees(Vec3::new(10.0, 20.0, 30.0))
            * Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 0.5, 1.5));
        assert_relative_eq!(node.local_matrix(), expected, epsilon = EPSILON);
    }

    #[test]
    fn test_scale_applies_before_translation() {
        // A point at local +X under scale 2 lands at translation + 2x, not 2 * (translation + x)
        let node = SceneNode::new("n")
            .with_position(Vec3::new(5.0, 0.0, 0.0))
            .with_scale(Vec3::new(2.0, 2.0, 2.0));
        let p = node
            .local_matrix()
            .transform_point(&crate::foundation::math::Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 7.0, epsilon = EPSILON);
    }

    #[test]
    fn test_spin_behavior() {
        let mut node = SceneNode::new("n");
        let mut spin = Spin {
            degrees_per_second: Vec3::new(0.0, 90.0, 0.0),
        };
        spin.update(&mut node, 0.5);
        assert_relative_eq!(node.rotation, Vec3::new(0.0, 45.0, 0.0));
    }
}
