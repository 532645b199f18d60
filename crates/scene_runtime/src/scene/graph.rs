//! Arena-backed transform hierarchy
//!
//! Nodes live in a generational arena; child edges own their subtrees and
//! parent edges are plain keys. Destroying a node destroys its whole
//! subtree, and any key kept around afterwards simply stops resolving.

use slotmap::SlotMap;

use crate::foundation::math::Mat4;
use crate::render::ShaderSink;
use crate::scene::{SceneError, SceneNode};

slotmap::new_key_type! {
    /// Stable handle to a node in a [`SceneGraph`]
    pub struct NodeId;
}

/// The transform hierarchy: a forest of scene nodes
///
/// Every node inserted detached is a root until attached under a parent.
/// World matrices are recomputed on demand from the parent chain; nothing is
/// cached across frames, so ancestor mutations are always observed.
#[derive(Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, SceneNode>,
    roots: Vec<NodeId>,
}

impl SceneGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a detached node; it becomes a root until attached
    pub fn insert(&mut self, node: SceneNode) -> NodeId {
        let id = self.nodes.insert(node);
        self.roots.push(id);
        id
    }

    /// Whether the key still resolves to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Borrow a node
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Mutably borrow a node
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    /// The node's parent, or `None` for roots and stale keys
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes
            .get(id)
            .and_then(|node| node.parent)
            .filter(|&p| self.nodes.contains_key(p))
    }

    /// Direct children of a node, in attachment order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Current roots, in insertion order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Total number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attach `child` under `parent`
    ///
    /// A child already attached elsewhere is detached from its old parent
    /// first, so a node never has two owners. Attaching a node under itself
    /// or one of its own descendants is rejected.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return Err(SceneError::NodeNotFound);
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(SceneError::AttachWouldCycle { parent, child });
        }

        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        Ok(())
    }

    /// Remove every direct child of `parent` named `name`, destroying each
    /// removed child's subtree; returns how many were removed
    pub fn remove_child(&mut self, parent: NodeId, name: &str) -> usize {
        let Some(node) = self.nodes.get(parent) else {
            return 0;
        };
        let matches: Vec<NodeId> = node
            .children
            .iter()
            .copied()
            .filter(|&c| self.nodes[c].name == name)
            .collect();

        for child in &matches {
            self.despawn(*child);
        }
        matches.len()
    }

    /// First direct child of `parent` with the given name
    pub fn get_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.nodes.get(parent).and_then(|node| {
            node.children
                .iter()
                .copied()
                .find(|&c| self.nodes[c].name == name)
        })
    }

    /// Destroy a node and its entire subtree
    pub fn despawn(&mut self, id: NodeId) {
        if !self.nodes.contains_key(id) {
            return;
        }
        self.detach(id);

        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(current) {
                pending.extend(node.children);
            }
        }
    }

    /// Local transform matrix of a node
    pub fn local_matrix(&self, id: NodeId) -> Option<Mat4> {
        self.nodes.get(id).map(SceneNode::local_matrix)
    }

    /// World transform matrix: the node's local matrix composed under every
    /// ancestor's local matrix, recomputed from scratch
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let node = self.nodes.get(id)?;
        let mut world = node.local_matrix();
        let mut ancestor = node.parent;
        while let Some(current) = ancestor {
            let parent = self.nodes.get(current)?;
            world = parent.local_matrix() * world;
            ancestor = parent.parent;
        }
        Some(world)
    }

    /// Advance every subtree by one frame
    ///
    /// Children are updated before their parent's own behavior runs.
    /// Invisible nodes are updated like any other.
    pub fn update(&mut self, delta_time: f32) {
        let roots = self.roots.clone();
        for root in roots {
            self.update_node(root, delta_time);
        }
    }

    fn update_node(&mut self, id: NodeId, delta_time: f32) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let children = node.children.clone();
        for child in children {
            self.update_node(child, delta_time);
        }

        // Behavior is lifted out for the call so it can mutate its own node
        if let Some(mut behavior) = self.nodes[id].behavior.take() {
            behavior.update(&mut self.nodes[id], delta_time);
            self.nodes[id].behavior = Some(behavior);
        }
    }

    /// Render every subtree, pushing transform and material uniforms per
    /// visible node
    pub fn render(&self, sink: &mut dyn ShaderSink) {
        for &root in &self.roots {
            self.render_node(root, &Mat4::identity(), sink);
        }
    }

    fn render_node(&self, id: NodeId, parent_world: &Mat4, sink: &mut dyn ShaderSink) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !node.visible {
            return;
        }

        let world = parent_world * node.local_matrix();
        sink.set_mat4("model", &world);
        sink.set_vec3("material.ambient", &(node.material.color * 0.1));
        sink.set_vec3("material.diffuse", &node.material.color);
        sink.set_vec3("material.specular", &(node.material.color * 0.5));
        sink.set_float("material.shininess", node.material.shininess);
        sink.set_bool("useTexture", node.material.use_texture);

        for &child in &node.children {
            self.render_node(child, &world, sink);
        }
    }

    /// Whether `candidate` is an ancestor of `of`
    fn is_ancestor(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut current = self.nodes.get(of).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Unlink a node from its parent (or the root list) without destroying it
    fn detach(&mut self, id: NodeId) {
        match self.nodes[id].parent.take() {
            Some(parent) => {
                if let Some(parent_node) = self.nodes.get_mut(parent) {
                    parent_node.children.retain(|&c| c != id);
                }
            }
            None => self.roots.retain(|&r| r != id),
        }
    }
}
