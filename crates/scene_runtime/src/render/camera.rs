//! Free-flying camera with viewport/projection state
//!
//! Pure math; the backend owns the actual viewport and uniform upload. Yaw
//! and pitch are in degrees, with pitch clamped to avoid flipping over the
//! poles.

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

const DEFAULT_YAW: f32 = -90.0;
const DEFAULT_SPEED: f32 = 2.5;
const DEFAULT_SENSITIVITY: f32 = 0.1;
const PITCH_LIMIT: f32 = 89.0;
const MIN_SPEED: f32 = 0.1;
const MAX_SPEED: f32 = 45.0;

/// Discrete movement directions for keyboard-driven motion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    /// Along the view direction
    Forward,
    /// Against the view direction
    Backward,
    /// Along the negative right axis
    Left,
    /// Along the right axis
    Right,
}

/// Free-flying perspective camera
#[derive(Debug, Clone)]
pub struct Camera {
    /// World-space camera position
    pub position: Vec3,
    /// Heading in degrees; -90 faces down the negative Z axis
    pub yaw: f32,
    /// Elevation in degrees, clamped to (-89, 89)
    pub pitch: f32,
    /// Movement speed in world units per second
    pub movement_speed: f32,
    /// Mouse look sensitivity in degrees per pixel
    pub mouse_sensitivity: f32,

    front: Vec3,
    right: Vec3,
    up: Vec3,
    world_up: Vec3,

    width: u32,
    height: u32,
    aspect_ratio: f32,
    fov_y_degrees: f32,
    near_plane: f32,
    far_plane: f32,
    projection: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::zeros())
    }
}

impl Camera {
    /// Create a camera at the given position facing down negative Z
    pub fn new(position: Vec3) -> Self {
        let mut camera = Self {
            position,
            yaw: DEFAULT_YAW,
            pitch: 0.0,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            front: Vec3::new(0.0, 0.0, -1.0),
            right: Vec3::new(1.0, 0.0, 0.0),
            up: Vec3::new(0.0, 1.0, 0.0),
            world_up: Vec3::new(0.0, 1.0, 0.0),
            width: 1200,
            height: 800,
            aspect_ratio: 1.5,
            fov_y_degrees: 45.0,
            near_plane: 0.1,
            far_plane: 100.0,
            projection: Mat4::identity(),
        };
        camera.update_axes();
        camera.update_projection();
        camera
    }

    /// Move the camera for one frame of keyboard input
    pub fn process_keyboard(&mut self, movement: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        match movement {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Apply a mouse-look delta in pixels
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch =
            utils::clamp(self.pitch + y_offset * self.mouse_sensitivity, -PITCH_LIMIT, PITCH_LIMIT);
        self.update_axes();
    }

    /// Adjust movement speed from a scroll delta (scrolling down speeds up)
    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.movement_speed = utils::clamp(self.movement_speed - y_offset, MIN_SPEED, MAX_SPEED);
    }

    /// View matrix for the current position and orientation
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position + self.front, self.up)
    }

    /// Current projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Normalized view direction
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Resize the viewport, updating aspect ratio and projection
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.aspect_ratio = width as f32 / height as f32;
        self.update_projection();
        log::debug!("viewport updated: {width}x{height}");
    }

    /// Set the vertical field of view in degrees
    pub fn set_field_of_view(&mut self, fov_y_degrees: f32) {
        self.fov_y_degrees = fov_y_degrees;
        self.update_projection();
    }

    /// Set the near clip plane distance
    pub fn set_near_plane(&mut self, near: f32) {
        self.near_plane = near;
        self.update_projection();
    }

    /// Set the far clip plane distance
    pub fn set_far_plane(&mut self, far: f32) {
        self.far_plane = far;
        self.update_projection();
    }

    /// Override the aspect ratio independently of the viewport size
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        self.aspect_ratio = aspect;
        self.update_projection();
    }

    /// Viewport width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Viewport height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    fn update_axes(&mut self) {
        let yaw = utils::deg_to_rad(self.yaw);
        let pitch = utils::deg_to_rad(self.pitch);
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(&self.world_up).normalize();
        self.up = self.right.cross(&self.front).normalize();
    }

    fn update_projection(&mut self) {
        self.projection = Mat4::perspective(
            utils::deg_to_rad(self.fov_y_degrees),
            self.aspect_ratio,
            self.near_plane,
            self.far_plane,
        );
    }
}
