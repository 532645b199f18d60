//! Shader uniform sink
//!
//! The hierarchy and the particle engine push transform/material state
//! through this capability once per rendered node or engine; the backend
//! turns the pushes into real uniform uploads before issuing its draw call.

use crate::foundation::math::{Mat4, Vec3};

/// Capability for receiving shader uniform state
pub trait ShaderSink {
    /// Push a 4x4 matrix uniform
    fn set_mat4(&mut self, name: &str, value: &Mat4);

    /// Push a 3-component vector uniform
    fn set_vec3(&mut self, name: &str, value: &Vec3);

    /// Push a scalar uniform
    fn set_float(&mut self, name: &str, value: f32);

    /// Push a boolean uniform
    fn set_bool(&mut self, name: &str, value: bool);
}

/// A single recorded uniform value
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    /// 4x4 matrix
    Mat4(Mat4),
    /// 3-component vector
    Vec3(Vec3),
    /// Scalar
    Float(f32),
    /// Boolean
    Bool(bool),
}

/// A recorded `(name, value)` uniform push
#[derive(Debug, Clone, PartialEq)]
pub struct UniformCall {
    /// Uniform name as the shader sees it
    pub name: String,
    /// Pushed value
    pub value: UniformValue,
}

/// Sink that records every uniform push in order
///
/// Used by tests to assert on render traversal behavior and by headless
/// hosts that want to inspect a frame without a GPU.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// All pushes received so far, oldest first
    pub calls: Vec<UniformCall>,
}

impl RecordingSink {
    /// Create an empty recording sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all recorded pushes
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Number of pushes recorded with the given uniform name
    pub fn count_named(&self, name: &str) -> usize {
        self.calls.iter().filter(|call| call.name == name).count()
    }

    /// Most recent value pushed under the given name, if any
    pub fn last_named(&self, name: &str) -> Option<&UniformValue> {
        self.calls
            .iter()
            .rev()
            .find(|call| call.name == name)
            .map(|call| &call.value)
    }

    fn record(&mut self, name: &str, value: UniformValue) {
        self.calls.push(UniformCall {
            name: name.to_owned(),
            value,
        });
    }
}

impl ShaderSink for RecordingSink {
    fn set_mat4(&mut self, name: &str, value: &Mat4) {
        self.record(name, UniformValue::Mat4(*value));
    }

    fn set_vec3(&mut self, name: &str, value: &Vec3) {
        self.record(name, UniformValue::Vec3(*value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.record(name, UniformValue::Float(value));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.record(name, UniformValue::Bool(value));
    }
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ShaderSink for NullSink {
    fn set_mat4(&mut self, _name: &str, _value: &Mat4) {}
    fn set_vec3(&mut self, _name: &str, _value: &Vec3) {}
    fn set_float(&mut self, _name: &str, _value: f32) {}
    fn set_bool(&mut self, _name: &str, _value: bool) {}
}
