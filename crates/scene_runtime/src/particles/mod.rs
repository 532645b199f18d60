//! Particle simulation engine
//!
//! CPU-side point-sprite simulation: emission scheduling, semi-implicit
//! Euler integration, death pruning, and per-frame quad geometry
//! regeneration. The backend consumes the flat position/color arrays and
//! issues one triangle-list draw per engine.

mod engine;
mod particle;

pub use engine::{EmitterConfig, ParticleEngine};
pub use particle::Particle;
