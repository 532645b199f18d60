//! Headless sandbox for the scene runtime
//!
//! Runs the default scene plus a fountain emitter for a fixed number of
//! frames, recording every uniform push instead of talking to a GPU. Useful
//! for profiling the simulation and for eyeballing the frame's uniform
//! stream in the log.

use scene_runtime::prelude::*;

const FRAMES: u32 = 600;
const FIXED_DELTA: f32 = 1.0 / 60.0;

fn main() {
    logging::init();

    let config = match RuntimeConfig::load_from_file("sandbox.toml") {
        Ok(config) => config,
        Err(err) => {
            log::debug!("no sandbox.toml, using defaults ({err})");
            RuntimeConfig::default()
        }
    };

    let mut camera = Camera::new(Vec3::new(0.0, 2.0, 8.0));
    camera.set_viewport(config.width, config.height);
    camera.set_field_of_view(config.fov_y_degrees);
    camera.set_near_plane(config.near_plane);
    camera.set_far_plane(config.far_plane);

    let mut registry = SceneRegistry::with_default_scene();
    if let Some(cube) = registry.get_object("cube") {
        let spinner = registry.graph_mut().insert(
            SceneNode::new("marker")
                .with_position(Vec3::new(0.0, 1.0, 0.0))
                .with_scale(Vec3::new(0.25, 0.25, 0.25))
                .with_color(Vec3::new(0.2, 0.6, 1.0))
                .with_behavior(Box::new(Spin {
                    degrees_per_second: Vec3::new(0.0, 90.0, 0.0),
                })),
        );
        if let Err(err) = registry.graph_mut().add_child(cube, spinner) {
            log::warn!("could not attach marker: {err}");
        }
    }

    let mut fountain = ParticleEngine::from_config(EmitterConfig {
        emission_rate: 120.0,
        velocity_min: Vec3::new(-0.5, 2.0, -0.5),
        velocity_max: Vec3::new(0.5, 5.0, 0.5),
        color: Vec4::new(0.4, 0.7, 1.0, 1.0),
        ..EmitterConfig::default()
    });
    fountain.set_position(Vec3::new(0.0, 0.0, -2.0));
    fountain.start();

    let mut monitor = PerformanceMonitor::new();
    let mut sink = RecordingSink::new();

    log::info!(
        "running {FRAMES} frames at {:.1} fps (viewport {}x{})",
        1.0 / FIXED_DELTA,
        config.width,
        config.height
    );

    for frame in 0..FRAMES {
        monitor.begin_frame();
        sink.clear();

        registry.update(FIXED_DELTA);
        fountain.update(FIXED_DELTA);

        registry.render(&mut sink);
        fountain.render(&mut sink, &camera.view_matrix(), &camera.projection_matrix());

        monitor.end_frame();

        if frame % 60 == 0 {
            log::info!(
                "frame {frame}: {} uniform pushes, {} particles | {}",
                sink.calls.len(),
                fountain.particle_count(),
                monitor.report()
            );
        }
    }

    if !monitor.is_performance_good(config.target_fps) {
        log::warn!("simulation below {} fps target", config.target_fps);
    }
    log::info!("done: {}", monitor.report());
}
