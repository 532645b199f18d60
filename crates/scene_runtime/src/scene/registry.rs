//! Scene registry: the composition root the application loop drives

use crate::foundation::math::Vec3;
use crate::render::ShaderSink;
use crate::scene::{Light, LightKind, NodeId, SceneGraph, SceneNode};

/// Owns the transform hierarchy plus the flat light list, and drives both
/// through the per-frame update/render sequence
///
/// Root-level nodes and lights are looked up by name; duplicates are
/// permitted and removal takes every match.
pub struct SceneRegistry {
    graph: SceneGraph,
    lights: Vec<Light>,
    ambient_light: Vec3,
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRegistry {
    /// Create an empty registry with a dim ambient term
    pub fn new() -> Self {
        Self {
            graph: SceneGraph::new(),
            lights: Vec::new(),
            ambient_light: Vec3::new(0.1, 0.1, 0.1),
        }
    }

    /// Create a registry pre-populated with the default scene and lighting
    pub fn with_default_scene() -> Self {
        let mut registry = Self::new();
        registry.create_default_scene();
        registry.setup_default_lighting();
        registry
    }

    /// Borrow the transform hierarchy
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Mutably borrow the transform hierarchy
    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    /// Add a root-level object
    pub fn add_object(&mut self, node: SceneNode) -> NodeId {
        log::info!("added object: {}", node.name);
        self.graph.insert(node)
    }

    /// Remove every root-level object with the given name, destroying each
    /// subtree; returns how many were removed
    pub fn remove_object(&mut self, name: &str) -> usize {
        let matches: Vec<NodeId> = self
            .graph
            .roots()
            .iter()
            .copied()
            .filter(|&id| self.graph.get(id).is_some_and(|n| n.name == name))
            .collect();
        for id in &matches {
            self.graph.despawn(*id);
        }
        if !matches.is_empty() {
            log::info!("removed object: {} ({} match(es))", name, matches.len());
        }
        matches.len()
    }

    /// First root-level object with the given name
    pub fn get_object(&self, name: &str) -> Option<NodeId> {
        self.graph
            .roots()
            .iter()
            .copied()
            .find(|&id| self.graph.get(id).is_some_and(|n| n.name == name))
    }

    /// Register a light
    pub fn add_light(&mut self, light: Light) {
        log::info!("added light: {}", light.name);
        self.lights.push(light);
    }

    /// Remove every light with the given name; returns how many were removed
    pub fn remove_light(&mut self, name: &str) -> usize {
        let before = self.lights.len();
        self.lights.retain(|light| light.name != name);
        before - self.lights.len()
    }

    /// Registered lights, in registration order
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Mutably borrow the registered lights
    pub fn lights_mut(&mut self) -> &mut [Light] {
        &mut self.lights
    }

    /// Current ambient light color
    pub fn ambient_light(&self) -> Vec3 {
        self.ambient_light
    }

    /// Set the ambient light color
    pub fn set_ambient_light(&mut self, color: Vec3) {
        self.ambient_light = color;
    }

    /// Advance every object subtree by one frame
    pub fn update(&mut self, delta_time: f32) {
        self.graph.update(delta_time);
    }

    /// Push lighting state, then render every object subtree
    pub fn render(&self, sink: &mut dyn ShaderSink) {
        self.update_lighting(sink);
        self.graph.render(sink);
    }

    /// Push ambient and main-light uniforms
    ///
    /// The first registered light acts as the sun: its position doubles as
    /// the (negated) light direction.
    pub fn update_lighting(&self, sink: &mut dyn ShaderSink) {
        sink.set_vec3("ambientLight", &self.ambient_light);

        if let Some(main_light) = self.lights.first() {
            sink.set_vec3("lightDirection", &(-main_light.position));
            sink.set_vec3("lightColor", &main_light.diffuse);
        }
    }

    fn create_default_scene(&mut self) {
        log::debug!("creating default scene");

        self.add_object(
            SceneNode::new("floor")
                .with_position(Vec3::new(0.0, -1.0, 0.0))
                .with_scale(Vec3::new(10.0, 0.1, 10.0))
                .with_color(Vec3::new(0.5, 0.5, 0.5)),
        );
        self.add_object(SceneNode::new("cube").with_color(Vec3::new(1.0, 0.0, 0.0)));
        self.add_object(
            SceneNode::new("laptop")
                .with_position(Vec3::new(2.0, 0.0, 0.0))
                .with_scale(Vec3::new(1.5, 0.1, 1.0))
                .with_color(Vec3::new(0.2, 0.2, 0.2)),
        );
        self.add_object(
            SceneNode::new("cylinder")
                .with_position(Vec3::new(-2.0, 0.0, 0.0))
                .with_scale(Vec3::new(0.5, 1.0, 0.5))
                .with_color(Vec3::new(0.0, 1.0, 0.0)),
        );
    }

    fn setup_default_lighting(&mut self) {
        log::debug!("setting up default lighting");

        let mut sun = Light::new("sun", LightKind::Directional);
        sun.set_position(Vec3::new(1.0, 1.0, 1.0));
        sun.set_color(Vec3::new(1.0, 1.0, 0.9));
        sun.set_intensity(1.0);
        self.add_light(sun);

        let mut point = Light::new("pointLight", LightKind::Point);
        point.set_position(Vec3::new(0.0, 2.0, 0.0));
        point.set_color(Vec3::new(1.0, 0.5, 0.5));
        point.set_intensity(0.8);
        self.add_light(point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RecordingSink, UniformValue};
    use approx::assert_relative_eq;

    #[test]
    fn test_default_scene_contents() {
        let registry = SceneRegistry::with_default_scene();
        assert_eq!(registry.graph().roots().len(), 4);
        assert!(registry.get_object("floor").is_some());
        assert!(registry.get_object("cube").is_some());
        assert!(registry.get_object("laptop").is_some());
        assert!(registry.get_object("cylinder").is_some());
        assert_eq!(registry.lights().len(), 2);
    }

    #[test]
    fn test_lighting_uniforms() {
        let registry = SceneRegistry::with_default_scene();
        let mut sink = RecordingSink::new();
        registry.update_lighting(&mut sink);

        assert_eq!(
            sink.last_named("ambientLight"),
            Some(&UniformValue::Vec3(Vec3::new(0.1, 0.1, 0.1)))
        );
        // Sun sits at (1,1,1); direction is its negated position
        assert_eq!(
            sink.last_named("lightDirection"),
            Some(&UniformValue::Vec3(Vec3::new(-1.0, -1.0, -1.0)))
        );
        assert_eq!(
            sink.last_named("lightColor"),
            Some(&UniformValue::Vec3(Vec3::new(1.0, 1.0, 0.9)))
        );
    }

    #[test]
    fn test_no_lights_pushes_only_ambient() {
        let registry = SceneRegistry::new();
        let mut sink = RecordingSink::new();
        registry.update_lighting(&mut sink);
        assert_eq!(sink.calls.len(), 1);
        assert_eq!(sink.count_named("ambientLight"), 1);
    }

    #[test]
    fn test_remove_light() {
        let mut registry = SceneRegistry::with_default_scene();
        assert_eq!(registry.remove_light("pointLight"), 1);
        assert_eq!(registry.lights().len(), 1);
        assert_eq!(registry.remove_light("pointLight"), 0);
    }

    #[test]
    fn test_ambient_light_roundtrip() {
        let mut registry = SceneRegistry::new();
        registry.set_ambient_light(Vec3::new(0.2, 0.3, 0.4));
        assert_relative_eq!(registry.ambient_light(), Vec3::new(0.2, 0.3, 0.4));
    }
}
