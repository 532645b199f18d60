//! Single-particle state and integration

use crate::foundation::math::{Vec3, Vec4};

/// Fraction of lifetime over which the extra fade-out kicks in
const FADE_ZONE: f32 = 0.3;

/// One simulated point sprite
///
/// Plain value record; particles hold no references to each other or to
/// their engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// World-space position
    pub position: Vec3,
    /// Velocity in units per second
    pub velocity: Vec3,
    /// Constant acceleration in units per second squared
    pub acceleration: Vec3,
    /// RGBA color; alpha is derived from the life ratio each frame
    pub color: Vec4,
    /// Remaining life in seconds; at or below zero the particle is dead
    pub life: f32,
    /// Life at spawn, fixed for the particle's whole existence
    pub max_life: f32,
    /// Quad edge length in world units
    pub size: f32,
    /// Billboard roll in degrees
    pub rotation: f32,
    /// Roll rate in degrees per second
    pub rotation_speed: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            velocity: Vec3::zeros(),
            acceleration: Vec3::zeros(),
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            life: 0.0,
            max_life: 1.0,
            size: 1.0,
            rotation: 0.0,
            rotation_speed: 0.0,
        }
    }
}

impl Particle {
    /// Advance the particle by one frame of semi-implicit Euler
    ///
    /// Alpha follows the life ratio linearly, with an extra quadratic
    /// fade inside the final 30% of lifetime. The two-stage fade is exact
    /// visual policy, not an approximation.
    pub fn integrate(&mut self, delta_time: f32) {
        self.velocity += self.acceleration * delta_time;
        self.position += self.velocity * delta_time;
        self.rotation += self.rotation_speed * delta_time;
        self.life -= delta_time;

        let mut alpha = self.life / self.max_life;
        if alpha < FADE_ZONE {
            alpha *= alpha / FADE_ZONE;
        }
        self.color.w = alpha;
    }

    /// Whether the particle is due for removal
    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }

    /// Current alpha value
    pub fn alpha(&self) -> f32 {
        self.color.w
    }
}
