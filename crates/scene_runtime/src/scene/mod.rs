//! Scene graph and registry
//!
//! The transform hierarchy lives in an arena ([`SceneGraph`]): child edges
//! own their subtrees, parent edges are plain keys that can never dangle
//! into freed memory. [`SceneRegistry`] aggregates the graph with the light
//! list and is the surface the application loop drives once per frame.

mod graph;
mod light;
mod node;
mod registry;

pub use graph::{NodeId, SceneGraph};
pub use light::{Light, LightKind};
pub use node::{Material, NodeBehavior, SceneNode, Spin};
pub use registry::SceneRegistry;

/// Errors from fallible hierarchy operations
///
/// Name lookups return `Option` instead; only structural mistakes are
/// reported as errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// A node key did not resolve to a live node
    #[error("node is not present in the scene graph")]
    NodeNotFound,

    /// Attaching the child would make it its own ancestor
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    AttachWouldCycle {
        /// Prospective parent
        parent: NodeId,
        /// Node that was being attached
        child: NodeId,
    },
}
