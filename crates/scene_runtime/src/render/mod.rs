//! Rendering-facing interfaces
//!
//! The runtime itself issues no draw calls. Everything the GPU backend needs
//! crosses one of two narrow surfaces: the [`ShaderSink`] uniform capability,
//! and the flat vertex/color arrays exposed by the particle engine.

mod camera;
mod shader;

pub use camera::{Camera, CameraMovement};
pub use shader::{NullSink, RecordingSink, ShaderSink, UniformCall, UniformValue};
