//! Particle engine: emission, simulation, and geometry regeneration

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Mat4, Vec3, Vec4};
use crate::particles::Particle;
use crate::render::ShaderSink;

/// Vertices generated per particle (two triangles)
const VERTICES_PER_PARTICLE: usize = 6;

/// Initial reservation, sized for a steady few hundred live particles
const PARTICLE_CAPACITY: usize = 1000;

/// Emission and spawn-range parameters
///
/// Ranges are inclusive min/max pairs sampled uniformly per spawned
/// particle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Particles spawned per second
    pub emission_rate: f32,
    /// Lifetime range in seconds
    pub life_range: (f32, f32),
    /// Quad edge length range in world units
    pub size_range: (f32, f32),
    /// Initial velocity range, sampled per axis
    pub velocity_min: Vec3,
    /// Initial velocity range, sampled per axis
    pub velocity_max: Vec3,
    /// Constant acceleration applied to every particle
    pub acceleration: Vec3,
    /// Spawn color; alpha is overwritten by the fade each frame
    pub color: Vec4,
    /// Initial roll range in degrees
    pub rotation_range: (f32, f32),
    /// Roll rate range in degrees per second
    pub rotation_speed_range: (f32, f32),
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            emission_rate: 10.0,
            life_range: (1.0, 3.0),
            size_range: (0.1, 0.5),
            velocity_min: Vec3::new(-1.0, -1.0, -1.0),
            velocity_max: Vec3::new(1.0, 1.0, 1.0),
            acceleration: Vec3::new(0.0, -9.81, 0.0),
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            rotation_range: (0.0, 360.0),
            rotation_speed_range: (-180.0, 180.0),
        }
    }
}

/// CPU particle simulation with per-frame quad geometry output
///
/// Each `update` emits new particles at the configured rate, integrates
/// every live particle, prunes the dead, and rebuilds the flat vertex and
/// color arrays from scratch. Pruning uses swap-removal, so particle order
/// is not stable across frames.
pub struct ParticleEngine {
    particles: Vec<Particle>,
    positions: Vec<Vec3>,
    colors: Vec<Vec4>,
    config: EmitterConfig,
    origin: Vec3,
    active: bool,
    rng: StdRng,
}

impl Default for ParticleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleEngine {
    /// Create an inactive engine with the default emitter configuration
    pub fn new() -> Self {
        Self::from_config(EmitterConfig::default())
    }

    /// Create an inactive engine with the given emitter configuration
    pub fn from_config(config: EmitterConfig) -> Self {
        Self {
            particles: Vec::with_capacity(PARTICLE_CAPACITY),
            positions: Vec::with_capacity(PARTICLE_CAPACITY * VERTICES_PER_PARTICLE),
            colors: Vec::with_capacity(PARTICLE_CAPACITY * VERTICES_PER_PARTICLE),
            config,
            origin: Vec3::zeros(),
            active: false,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an inactive engine with a fixed random seed
    ///
    /// Same seed and same update sequence means identical emission counts
    /// and spawn parameters.
    pub fn with_seed(config: EmitterConfig, seed: u64) -> Self {
        let mut engine = Self::from_config(config);
        engine.rng = StdRng::seed_from_u64(seed);
        engine
    }

    /// Start emitting
    pub fn start(&mut self) {
        self.active = true;
    }

    /// Stop emitting and updating; live particles freeze in place
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Drop all live particles and their geometry
    pub fn reset(&mut self) {
        self.particles.clear();
        self.positions.clear();
        self.colors.clear();
    }

    /// Whether the engine is currently running
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Move the emission origin
    pub fn set_position(&mut self, position: Vec3) {
        self.origin = position;
    }

    /// Current emission origin
    pub fn position(&self) -> Vec3 {
        self.origin
    }

    /// Current emitter configuration
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Replace the emitter configuration
    pub fn set_config(&mut self, config: EmitterConfig) {
        self.config = config;
    }

    /// Set the particles-per-second emission rate
    pub fn set_emission_rate(&mut self, rate: f32) {
        self.config.emission_rate = rate.max(0.0);
    }

    /// Set the constant acceleration applied to every particle
    pub fn set_acceleration(&mut self, acceleration: Vec3) {
        self.config.acceleration = acceleration;
    }

    /// Set the spawn color
    pub fn set_color(&mut self, color: Vec4) {
        self.config.color = color;
    }

    /// Set the lifetime range in seconds
    pub fn set_life_range(&mut self, min: f32, max: f32) {
        self.config.life_range = (min, max);
    }

    /// Set the quad size range in world units
    pub fn set_size_range(&mut self, min: f32, max: f32) {
        self.config.size_range = (min, max);
    }

    /// Set the per-axis initial velocity range
    pub fn set_velocity_range(&mut self, min: Vec3, max: Vec3) {
        self.config.velocity_min = min;
        self.config.velocity_max = max;
    }

    /// Number of live particles
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Flat vertex positions, six per live particle
    pub fn vertex_positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Flat vertex colors, six per live particle
    pub fn vertex_colors(&self) -> &[Vec4] {
        &self.colors
    }

    /// Spawn `count` particles at the origin immediately
    pub fn emit(&mut self, count: usize) {
        for _ in 0..count {
            let particle = self.spawn_one();
            self.particles.push(particle);
        }
    }

    /// Advance the simulation by one frame
    ///
    /// Does nothing while the engine is inactive. Emission count per frame
    /// is `rate * dt` with stochastic rounding of the fractional part, so
    /// low rates still average out correctly over many frames.
    pub fn update(&mut self, delta_time: f32) {
        if !self.active {
            return;
        }

        let budget = self.config.emission_rate * delta_time;
        let mut count = budget.floor() as usize;
        if budget.fract() > self.rng.gen::<f32>() {
            count += 1;
        }
        self.emit(count);

        for particle in &mut self.particles {
            particle.integrate(delta_time);
        }

        let mut i = 0;
        while i < self.particles.len() {
            if self.particles[i].is_dead() {
                self.particles.swap_remove(i);
            } else {
                i += 1;
            }
        }

        self.rebuild_geometry();
    }

    /// Push camera uniforms and an identity model matrix
    ///
    /// No-op when there are no live particles, so an idle engine costs the
    /// backend nothing.
    pub fn render(&self, sink: &mut dyn ShaderSink, view: &Mat4, projection: &Mat4) {
        if self.particles.is_empty() {
            return;
        }
        sink.set_mat4("view", view);
        sink.set_mat4("projection", projection);
        sink.set_mat4("model", &Mat4::identity());
    }

    fn spawn_one(&mut self) -> Particle {
        let life = self.sample(self.config.life_range);
        Particle {
            position: self.origin,
            velocity: Vec3::new(
                self.sample((self.config.velocity_min.x, self.config.velocity_max.x)),
                self.sample((self.config.velocity_min.y, self.config.velocity_max.y)),
                self.sample((self.config.velocity_min.z, self.config.velocity_max.z)),
            ),
            acceleration: self.config.acceleration,
            color: self.config.color,
            life,
            max_life: life,
            size: self.sample(self.config.size_range),
            rotation: self.sample(self.config.rotation_range),
            rotation_speed: self.sample(self.config.rotation_speed_range),
        }
    }

    fn sample(&mut self, (min, max): (f32, f32)) -> f32 {
        if max > min {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Rebuild the flat vertex arrays from the live particle list
    ///
    /// Each particle becomes a camera-plane quad of two triangles. Corner
    /// offsets are rotated about Z by the particle roll before being added
    /// to the particle position, so the quad spins in place.
    fn rebuild_geometry(&mut self) {
        self.positions.clear();
        self.colors.clear();

        for particle in &self.particles {
            let half = particle.size * 0.5;
            let (sin, cos) = utils::deg_to_rad(particle.rotation).sin_cos();
            let corner = |x: f32, y: f32| {
                particle.position + Vec3::new(x * cos - y * sin, x * sin + y * cos, 0.0)
            };

            let bottom_left = corner(-half, -half);
            let bottom_right = corner(half, -half);
            let top_right = corner(half, half);
            let top_left = corner(-half, half);

            self.positions.extend_from_slice(&[
                bottom_left,
                bottom_right,
                top_right,
                bottom_left,
                top_right,
                top_left,
            ]);
            for _ in 0..VERTICES_PER_PARTICLE {
                self.colors.push(particle.color);
            }
        }
    }
}
