//! Orbit camera controls.
//!
//! Keeps the camera on a sphere around a target point. The host feeds pointer
//! drag and scroll deltas between frames and then calls
//! [`OrbitControls::apply`], so the controls never write the camera while an
//! animation pass is running.

use std::f32::consts::PI;

use glam::Vec3;

use crate::Camera;

/// Spherical orbit around a target.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    /// Radians per pixel of pointer drag
    pub rotate_speed: f32,
    /// Fractional distance change per scroll step
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    radius: f32,
    /// Angle from +Y
    polar: f32,
    /// Angle around +Y, measured from +Z
    azimuth: f32,
}

const POLAR_EPSILON: f32 = 1e-3;

impl OrbitControls {
    /// Start orbiting from the camera's current position around `target`.
    pub fn new(camera: &Camera, target: Vec3) -> Self {
        let mut controls = Self {
            target,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            radius: 1.0,
            polar: PI / 2.0,
            azimuth: 0.0,
        };
        controls.sync_from(camera);
        controls
    }

    /// Re-read the orbit from the camera's current position.
    pub fn sync_from(&mut self, camera: &Camera) {
        let offset = camera.position - self.target;
        self.radius = offset.length().max(f32::EPSILON);
        self.polar = (offset.y / self.radius).clamp(-1.0, 1.0).acos();
        self.azimuth = offset.x.atan2(offset.z);
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    /// Rotate by a pointer drag of `(dx, dy)` pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.azimuth -= dx * self.rotate_speed;
        self.polar = (self.polar - dy * self.rotate_speed).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
    }

    /// Move towards (positive steps) or away from (negative steps) the target.
    pub fn dolly(&mut self, steps: f32) {
        let scale = (1.0 - self.zoom_speed).powf(steps);
        self.radius = (self.radius * scale).clamp(self.min_distance.max(f32::EPSILON), self.max_distance);
    }

    /// Orbit position implied by the current angles.
    pub fn position(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        self.target
            + self.radius * Vec3::new(sin_polar * sin_azimuth, cos_polar, sin_polar * cos_azimuth)
    }

    /// Write the orbit pose into the camera.
    pub fn apply(&self, camera: &mut Camera) {
        camera.position = self.position();
        camera.look_at(self.target);
    }
}
