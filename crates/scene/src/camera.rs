//! Cameras.
//!
//! The camera is not a scene node: animation rules and controls write its
//! position and orientation directly, and viewport resizes update its
//! projection through [`Camera::resize`].

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Projection type for the camera.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Projection {
    /// Perspective projection
    Perspective {
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    /// Orthographic projection
    Orthographic {
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
        near: f32,
        far: f32,
    },
}

impl Projection {
    /// Perspective projection with a vertical field of view in degrees.
    pub fn perspective_degrees(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::Perspective {
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near,
            far,
        }
    }

    /// Orthographic volume spanning `[-aspect, aspect] x [-1, 1]`.
    pub fn orthographic_unit(aspect: f32, near: f32, far: f32) -> Self {
        Self::Orthographic {
            left: -aspect,
            right: aspect,
            top: 1.0,
            bottom: -1.0,
            near,
            far,
        }
    }
}

/// A camera for viewing the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Camera rotation
    pub rotation: Quat,
    /// Projection settings
    pub projection: Projection,
    /// Magnification; 1.0 leaves the projection untouched
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            rotation: Quat::IDENTITY,
            projection: Projection::perspective_degrees(75.0, 1.0, 0.1, 100.0),
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projection(projection: Projection) -> Self {
        Self {
            projection,
            ..Self::default()
        }
    }

    /// Place the camera and aim it at `target`.
    pub fn positioned(mut self, position: Vec3, target: Vec3) -> Self {
        self.position = position;
        self.look_at(target);
        self
    }

    /// Aspect ratio currently baked into the projection.
    pub fn aspect(&self) -> f32 {
        match self.projection {
            Projection::Perspective { aspect, .. } => aspect,
            Projection::Orthographic {
                left,
                right,
                top,
                bottom,
                ..
            } => (right - left) / (top - bottom),
        }
    }

    /// Adapt the projection to a new viewport size.
    ///
    /// Perspective cameras take the new aspect ratio; orthographic cameras
    /// keep their vertical extent and widen or narrow horizontally. A zero
    /// dimension leaves the projection untouched.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let new_aspect = width as f32 / height as f32;

        match &mut self.projection {
            Projection::Perspective { aspect, .. } => *aspect = new_aspect,
            Projection::Orthographic {
                left, right, top, ..
            } => {
                *left = -new_aspect * *top;
                *right = new_aspect * *top;
            }
        }
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        let target = self.position + self.forward();
        Mat4::look_at_rh(self.position, target, self.up())
    }

    /// Get the projection matrix, with zoom applied.
    pub fn projection_matrix(&self) -> Mat4 {
        let zoom = if self.zoom > 0.0 { self.zoom } else { 1.0 };

        match self.projection {
            Projection::Perspective {
                fov_y,
                aspect,
                near,
                far,
            } => {
                let fov = 2.0 * ((fov_y * 0.5).tan() / zoom).atan();
                Mat4::perspective_rh(fov, aspect, near, far)
            }
            Projection::Orthographic {
                left,
                right,
                top,
                bottom,
                near,
                far,
            } => Mat4::orthographic_rh(
                left / zoom,
                right / zoom,
                bottom / zoom,
                top / zoom,
                near,
                far,
            ),
        }
    }

    /// Get the view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get the forward direction vector.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Get the right direction vector.
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get the up direction vector.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Turn to face `target`, keeping +Y as up.
    ///
    /// Looking at the camera's own position leaves the rotation unchanged.
    pub fn look_at(&mut self, target: Vec3) {
        let forward = (target - self.position).normalize_or_zero();
        if forward == Vec3::ZERO {
            return;
        }
        // Straight up or down: fall back to the shortest arc from -Z.
        if forward.cross(Vec3::Y).length_squared() < 1e-8 {
            self.rotation = Quat::from_rotation_arc(Vec3::NEG_Z, forward);
            return;
        }
        let view = Mat4::look_at_rh(self.position, target, Vec3::Y);
        self.rotation = Quat::from_mat4(&view.inverse());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq_vec3(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < EPSILON
    }

    #[test]
    fn test_resize_perspective_updates_aspect() {
        let mut camera = Camera::new();
        camera.resize(1920, 1080);
        assert!((camera.aspect() - 1920.0 / 1080.0).abs() < EPSILON);
    }

    #[test]
    fn test_resize_orthographic_updates_horizontal_extent() {
        let mut camera = Camera::with_projection(Projection::orthographic_unit(1.0, 0.1, 100.0));
        camera.resize(800, 400);

        match camera.projection {
            Projection::Orthographic {
                left,
                right,
                top,
                bottom,
                ..
            } => {
                assert_eq!((left, right), (-2.0, 2.0));
                assert_eq!((top, bottom), (1.0, -1.0));
            }
            Projection::Perspective { .. } => panic!("projection kind changed"),
        }
        assert!((camera.aspect() - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_resize_ignores_zero_height() {
        let mut camera = Camera::new();
        let before = camera.projection;
        camera.resize(640, 0);
        assert_eq!(camera.projection, before);
    }

    #[test]
    fn test_look_at_faces_target() {
        let camera = Camera::new().positioned(Vec3::new(7.0, 7.0, 0.0), Vec3::ZERO);
        let expected = (Vec3::ZERO - camera.position).normalize();

        assert!(approx_eq_vec3(camera.forward(), expected));
        // Level horizon: right vector stays in the XZ plane
        assert!(camera.right().y.abs() < EPSILON);
    }

    #[test]
    fn test_look_at_straight_down() {
        let camera = Camera::new().positioned(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO);
        assert!(approx_eq_vec3(camera.forward(), Vec3::NEG_Y));
    }

    #[test]
    fn test_look_at_own_position_is_noop() {
        let mut camera = Camera::new();
        let before = camera.rotation;
        camera.look_at(camera.position);
        assert_eq!(camera.rotation, before);
    }

    #[test]
    fn test_view_matrix_moves_target_onto_axis() {
        let camera = Camera::new().positioned(Vec3::new(3.0, 2.0, 4.0), Vec3::new(-1.0, 0.0, 1.0));
        let in_view = camera
            .view_matrix()
            .transform_point3(Vec3::new(-1.0, 0.0, 1.0));

        assert!(in_view.x.abs() < 1e-4 && in_view.y.abs() < 1e-4);
        assert!(in_view.z < 0.0);
    }

    #[test]
    fn test_zoom_narrows_field_of_view() {
        let mut camera = Camera::new();
        let wide = camera.projection_matrix();
        camera.zoom = 2.0;
        let narrow = camera.projection_matrix();

        // Larger focal scale means a narrower field of view
        assert!(narrow.y_axis.y > wide.y_axis.y);
        assert!((narrow.y_axis.y - 2.0 * wide.y_axis.y).abs() < 1e-4);
    }
}
