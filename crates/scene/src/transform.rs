//! Local transform of a scene node.
//!
//! This module provides the [`Transform`] struct holding position, Euler
//! rotation and scale relative to a node's parent. World transforms are
//! derived by the scene graph by composing the local matrices of a node's
//! ancestors.
//!
//! # Example
//!
//! ```
//! use orrery_scene::Transform;
//! use glam::Vec3;
//!
//! let orbit = Transform::new()
//!     .with_position(Vec3::new(10.0, 0.0, 0.0))
//!     .with_rotation(Vec3::new(0.0, 1.5, 0.0));
//!
//! let local = orbit.local_matrix();
//! assert_eq!(local.transform_point3(Vec3::ZERO), Vec3::new(10.0, 0.0, 0.0));
//! ```

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position, rotation and scale relative to the parent node.
///
/// Rotation is stored as Euler angles in radians, applied in XYZ order
/// (the rotation matrix is `Rx * Ry * Rz`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in local space (relative to the parent)
    pub position: Vec3,
    /// Euler angles in radians
    pub rotation: Vec3,
    /// Scale factor
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform: no translation, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Create a new transform at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transform with the given position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Create a transform with the given Euler rotation.
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Create a transform with the given scale.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Whether this is exactly the identity transform.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Rotation as a quaternion.
    pub fn quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Set the rotation from a quaternion.
    pub fn set_quat(&mut self, rotation: Quat) {
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        self.rotation = Vec3::new(x, y, z);
    }

    /// Get the local transformation matrix.
    ///
    /// This does not account for any ancestors.
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }

    /// Get the forward direction vector.
    pub fn forward(&self) -> Vec3 {
        self.quat() * Vec3::NEG_Z
    }

    /// Get the right direction vector.
    pub fn right(&self) -> Vec3 {
        self.quat() * Vec3::X
    }

    /// Get the up direction vector.
    pub fn up(&self) -> Vec3 {
        self.quat() * Vec3::Y
    }
}

/// Get the normal matrix (inverse transpose) of a world matrix.
///
/// If the matrix is not invertible (e.g. zero scale), the identity matrix is
/// returned instead of NaN/Inf values.
pub fn normal_matrix(world: Mat4) -> Mat4 {
    const EPSILON: f32 = 1e-6;

    if world.determinant().abs() < EPSILON {
        Mat4::IDENTITY
    } else {
        world.inverse().transpose()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn approx_eq_vec3(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    #[test]
    fn test_transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
        assert!(t.is_identity());
        assert_eq!(t.local_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_transform_builder() {
        let t = Transform::new()
            .with_position(Vec3::new(1.0, 2.0, 3.0))
            .with_scale(Vec3::splat(2.0));

        assert_eq!(t.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.scale, Vec3::splat(2.0));
        assert!(!t.is_identity());
    }

    #[test]
    fn test_rotation_about_y() {
        let t = Transform::new().with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0));
        let p = t.local_matrix().transform_point3(Vec3::X);

        // +X rotated a quarter turn about +Y lands on -Z
        assert!(approx_eq_vec3(p, Vec3::NEG_Z), "got {:?}", p);
    }

    #[test]
    fn test_euler_order_is_xyz() {
        let t = Transform::new().with_rotation(Vec3::new(0.3, -0.7, 1.1));
        let expected =
            Quat::from_rotation_x(0.3) * Quat::from_rotation_y(-0.7) * Quat::from_rotation_z(1.1);
        assert!(t.quat().abs_diff_eq(expected, EPSILON));
    }

    #[test]
    fn test_set_quat_round_trips_rotation() {
        let mut t = Transform::new();
        let q = Quat::from_rotation_y(0.5) * Quat::from_rotation_x(-0.25);
        t.set_quat(q);
        assert!(t.quat().abs_diff_eq(q, EPSILON) || t.quat().abs_diff_eq(-q, EPSILON));
    }

    #[test]
    fn test_normal_matrix_with_scale() {
        let world = Transform::new()
            .with_scale(Vec3::new(1.0, 2.0, 1.0))
            .local_matrix();
        assert_eq!(normal_matrix(world), world.inverse().transpose());
    }

    #[test]
    fn test_normal_matrix_non_invertible() {
        let world = Transform::new().with_scale(Vec3::ZERO).local_matrix();
        let normal = normal_matrix(world);

        assert_eq!(normal, Mat4::IDENTITY);
        assert!(!normal.is_nan());
    }

    #[test]
    fn test_direction_vectors() {
        let t = Transform::default();

        // Default orientation: -Z forward, +X right, +Y up
        assert_eq!(t.forward(), Vec3::NEG_Z);
        assert_eq!(t.right(), Vec3::X);
        assert_eq!(t.up(), Vec3::Y);
    }
}
