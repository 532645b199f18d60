//! Real-time 3D scene runtime
//!
//! A hierarchical transform graph with recursive matrix composition, a
//! particle lifecycle engine, and the per-frame update/render loop that
//! drives them. Rendering is expressed against the [`render::ShaderSink`]
//! trait, so the runtime simulates and emits uniforms without owning a
//! graphics backend.
//!
//! # Example
//!
//! ```
//! use scene_runtime::prelude::*;
//!
//! let mut registry = SceneRegistry::new();
//! let parent = registry.add_object(
//!     SceneNode::new("rig").with_position(Vec3::new(0.0, 1.0, 0.0)),
//! );
//! let child = registry
//!     .graph_mut()
//!     .insert(SceneNode::new("arm").with_position(Vec3::new(2.0, 0.0, 0.0)));
//! registry.graph_mut().add_child(parent, child).unwrap();
//!
//! registry.update(0.016);
//!
//! let world = registry.graph().world_matrix(child).unwrap();
//! assert_eq!(world.translation_part(), Vec3::new(2.0, 1.0, 0.0));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod foundation;
pub mod particles;
pub mod perf;
pub mod render;
pub mod scene;

/// Commonly used types, re-exported for application code
pub mod prelude {
    pub use crate::config::{Config, RuntimeConfig};
    pub use crate::foundation::logging;
    pub use crate::foundation::math::{Mat4, Mat4Ext, Vec2, Vec3, Vec4};
    pub use crate::foundation::time::{Stopwatch, Timer};
    pub use crate::particles::{EmitterConfig, Particle, ParticleEngine};
    pub use crate::perf::PerformanceMonitor;
    pub use crate::render::{Camera, CameraMovement, NullSink, RecordingSink, ShaderSink};
    pub use crate::scene::{
        Light, LightKind, Material, NodeBehavior, NodeId, SceneError, SceneGraph, SceneNode,
        SceneRegistry, Spin,
    };
}
