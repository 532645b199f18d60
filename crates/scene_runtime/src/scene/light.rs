//! Light sources registered alongside the hierarchy

use crate::foundation::math::{utils, Vec3};

/// Kind of light source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    /// Parallel rays, position ignored for falloff
    Directional,
    /// Radiates from a position with distance attenuation
    Point,
    /// Cone of light from a position along a direction
    Spot,
}

/// A named light source
#[derive(Debug, Clone)]
pub struct Light {
    /// Light name, used for registry lookups
    pub name: String,
    /// Kind of light
    pub kind: LightKind,
    /// World-space position (point/spot)
    pub position: Vec3,
    /// Normalized direction (directional/spot)
    pub direction: Vec3,
    /// Ambient term
    pub ambient: Vec3,
    /// Diffuse term
    pub diffuse: Vec3,
    /// Specular term
    pub specular: Vec3,
    /// Intensity multiplier, non-negative
    pub intensity: f32,
    /// Disabled lights contribute nothing
    pub enabled: bool,

    /// Constant attenuation factor (point)
    pub constant: f32,
    /// Linear attenuation factor (point)
    pub linear: f32,
    /// Quadratic attenuation factor (point)
    pub quadratic: f32,

    /// Inner cone edge (spot)
    pub cut_off: f32,
    /// Outer cone edge (spot)
    pub outer_cut_off: f32,
}

impl Light {
    /// Create a light with the standard defaults for its kind
    pub fn new(name: impl Into<String>, kind: LightKind) -> Self {
        Self {
            name: name.into(),
            kind,
            position: Vec3::zeros(),
            direction: Vec3::new(0.0, -1.0, 0.0),
            ambient: Vec3::new(0.1, 0.1, 0.1),
            diffuse: Vec3::new(1.0, 1.0, 1.0),
            specular: Vec3::new(1.0, 1.0, 1.0),
            intensity: 1.0,
            enabled: true,
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
            cut_off: 12.5,
            outer_cut_off: 17.5,
        }
    }

    /// Set the world-space position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Set the direction; normalized on the way in
    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction.normalize();
    }

    /// Derive ambient/diffuse/specular terms from one base color
    pub fn set_color(&mut self, color: Vec3) {
        self.ambient = color * 0.1;
        self.diffuse = color;
        self.specular = color;
    }

    /// Set the intensity, clamped to be non-negative
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity.max(0.0);
    }

    /// Set point-light attenuation factors
    pub fn set_attenuation(&mut self, constant: f32, linear: f32, quadratic: f32) {
        self.constant = constant;
        self.linear = linear;
        self.quadratic = quadratic;
    }

    /// Set spot-light cone edges
    pub fn set_spot_angles(&mut self, cut_off: f32, outer_cut_off: f32) {
        self.cut_off = cut_off;
        self.outer_cut_off = outer_cut_off;
    }

    /// Diffuse contribution of this light at a world position
    pub fn contribution_at(&self, world_pos: Vec3) -> Vec3 {
        if !self.enabled {
            return Vec3::zeros();
        }

        match self.kind {
            LightKind::Directional => self.diffuse * self.intensity,
            LightKind::Point => {
                let distance = (self.position - world_pos).norm();
                let attenuation = 1.0
                    / (self.constant + self.linear * distance + self.quadratic * distance * distance);
                self.diffuse * self.intensity * attenuation
            }
            LightKind::Spot => {
                let to_light = (self.position - world_pos).normalize();
                let theta = to_light.dot(&(-self.direction).normalize());
                let epsilon = self.cut_off - self.outer_cut_off;
                let factor = utils::clamp((theta - self.outer_cut_off) / epsilon, 0.0, 1.0);
                self.diffuse * self.intensity * factor
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_directional_contribution_ignores_distance() {
        let mut light = Light::new("sun", LightKind::Directional);
        light.set_color(Vec3::new(1.0, 0.5, 0.0));
        light.set_intensity(2.0);

        let near = light.contribution_at(Vec3::zeros());
        let far = light.contribution_at(Vec3::new(100.0, 0.0, 0.0));
        assert_relative_eq!(near, Vec3::new(2.0, 1.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(near, far, epsilon = EPSILON);
    }

    #[test]
    fn test_point_contribution_attenuates() {
        let mut light = Light::new("bulb", LightKind::Point);
        light.set_position(Vec3::zeros());

        let near = light.contribution_at(Vec3::new(1.0, 0.0, 0.0));
        let far = light.contribution_at(Vec3::new(10.0, 0.0, 0.0));
        assert!(near.norm() > far.norm());

        // Attenuation at distance 1 is 1 / (1 + 0.09 + 0.032)
        let expected = 1.0 / (1.0 + 0.09 + 0.032);
        assert_relative_eq!(near.x, expected, epsilon = EPSILON);
    }

    #[test]
    fn test_disabled_light_contributes_nothing() {
        let mut light = Light::new("off", LightKind::Point);
        light.enabled = false;
        assert_relative_eq!(light.contribution_at(Vec3::zeros()), Vec3::zeros());
    }

    #[test]
    fn test_intensity_clamped_non_negative() {
        let mut light = Light::new("l", LightKind::Directional);
        light.set_intensity(-5.0);
        assert_relative_eq!(light.intensity, 0.0);
    }

    #[test]
    fn test_set_direction_normalizes() {
        let mut light = Light::new("l", LightKind::Spot);
        light.set_direction(Vec3::new(0.0, -2.0, 0.0));
        assert_relative_eq!(light.direction, Vec3::new(0.0, -1.0, 0.0), epsilon = EPSILON);
    }
}
