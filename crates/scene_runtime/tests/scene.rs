//! Scene registry and hierarchy integration tests

use approx::assert_relative_eq;
use scene_runtime::prelude::*;
use scene_runtime::render::UniformValue;

const EPSILON: f32 = 1e-5;

#[test]
fn add_and_look_up_objects() {
    let mut registry = SceneRegistry::new();
    registry.add_object(SceneNode::new("crate").with_position(Vec3::new(1.0, 0.0, 0.0)));
    registry.add_object(SceneNode::new("barrel"));

    assert!(registry.get_object("crate").is_some());
    assert!(registry.get_object("barrel").is_some());
    assert!(registry.get_object("missing").is_none());
    assert_eq!(registry.graph().roots().len(), 2);
}

#[test]
fn remove_object_takes_every_match() {
    let mut registry = SceneRegistry::new();
    registry.add_object(SceneNode::new("debris"));
    registry.add_object(SceneNode::new("debris"));
    registry.add_object(SceneNode::new("keep"));

    assert_eq!(registry.remove_object("debris"), 2);
    assert!(registry.get_object("debris").is_none());
    assert!(registry.get_object("keep").is_some());
    assert_eq!(registry.remove_object("debris"), 0);
}

#[test]
fn update_leaves_static_nodes_alone() {
    let mut registry = SceneRegistry::new();
    let id = registry.add_object(SceneNode::new("rock").with_position(Vec3::new(3.0, 1.0, -2.0)));

    for _ in 0..100 {
        registry.update(0.016);
    }

    let node = registry.graph().get(id).expect("node still lives");
    assert_relative_eq!(node.position, Vec3::new(3.0, 1.0, -2.0));
    assert_relative_eq!(node.rotation, Vec3::zeros());
}

#[test]
fn behavior_driven_node_accumulates_rotation() {
    let mut registry = SceneRegistry::new();
    let id = registry.add_object(SceneNode::new("turbine").with_behavior(Box::new(Spin {
        degrees_per_second: Vec3::new(0.0, 90.0, 0.0),
    })));

    for _ in 0..10 {
        registry.update(0.1);
    }

    let node = registry.graph().get(id).expect("node still lives");
    assert_relative_eq!(node.rotation.y, 90.0, epsilon = 1e-3);
}

#[test]
fn parented_marker_inherits_floor_scale() {
    // A marker one unit above a squashed floor ends up at -0.9 world Y:
    // the floor's 0.1 vertical scale multiplies the child's offset.
    let mut registry = SceneRegistry::new();
    let floor = registry.add_object(
        SceneNode::new("floor")
            .with_position(Vec3::new(0.0, -1.0, 0.0))
            .with_scale(Vec3::new(10.0, 0.1, 10.0)),
    );
    let marker = registry
        .graph_mut()
        .insert(SceneNode::new("marker").with_position(Vec3::new(0.0, 1.0, 0.0)));
    registry
        .graph_mut()
        .add_child(floor, marker)
        .expect("attach succeeds");

    registry.update(0.016);

    let world = registry
        .graph()
        .world_matrix(marker)
        .expect("marker still lives");
    assert_relative_eq!(
        world.translation_part(),
        Vec3::new(0.0, -0.9, 0.0),
        epsilon = EPSILON
    );
}

#[test]
fn despawning_parent_invalidates_child_keys() {
    let mut registry = SceneRegistry::new();
    let rig = registry.add_object(SceneNode::new("rig"));
    let arm = registry.graph_mut().insert(SceneNode::new("arm"));
    registry.graph_mut().add_child(rig, arm).expect("attach succeeds");

    assert_eq!(registry.remove_object("rig"), 1);
    assert!(!registry.graph().contains(arm));
    assert!(registry.graph().world_matrix(arm).is_none());
    assert_eq!(registry.graph().parent(arm), None);
}

#[test]
fn hidden_subtree_renders_nothing() {
    let mut registry = SceneRegistry::new();
    let root = registry.add_object(SceneNode::new("group"));
    let leaf = registry.graph_mut().insert(SceneNode::new("leaf"));
    registry.graph_mut().add_child(root, leaf).expect("attach succeeds");
    registry
        .graph_mut()
        .get_mut(root)
        .expect("root lives")
        .visible = false;

    let mut sink = RecordingSink::new();
    registry.render(&mut sink);

    // Only lighting state crosses the sink; no node pushed a model matrix
    assert_eq!(sink.count_named("model"), 0);
    assert_eq!(sink.count_named("ambientLight"), 1);
}

#[test]
fn default_scene_renders_material_state_per_object() {
    let registry = SceneRegistry::with_default_scene();
    let mut sink = RecordingSink::new();
    registry.render(&mut sink);

    assert_eq!(sink.count_named("model"), 4);
    assert_eq!(sink.count_named("material.diffuse"), 4);
    assert_eq!(sink.count_named("useTexture"), 4);
    assert_eq!(sink.count_named("lightDirection"), 1);
}

#[test]
fn light_edits_show_up_in_uniforms() {
    let mut registry = SceneRegistry::new();
    let mut lamp = Light::new("lamp", LightKind::Directional);
    lamp.set_position(Vec3::new(0.0, 3.0, 0.0));
    lamp.set_color(Vec3::new(0.0, 1.0, 0.0));
    registry.add_light(lamp);

    let mut sink = RecordingSink::new();
    registry.render(&mut sink);

    assert_eq!(
        sink.last_named("lightDirection"),
        Some(&UniformValue::Vec3(Vec3::new(0.0, -3.0, 0.0)))
    );
    assert_eq!(
        sink.last_named("lightColor"),
        Some(&UniformValue::Vec3(Vec3::new(0.0, 1.0, 0.0)))
    );
}
