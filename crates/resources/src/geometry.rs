//! Geometry descriptors.
//!
//! Descriptors mirror the parameter lists of common procedural primitives.
//! Tessellation is the renderer's business.

use std::f32::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::{ResourceError, ResourceResult};

/// A procedural geometry description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Axis-aligned box centred on the origin.
    Box {
        width: f32,
        height: f32,
        depth: f32,
        /// Segments along width, height and depth.
        segments: [u32; 3],
    },
    /// UV sphere, optionally a partial sweep.
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
        phi_start: f32,
        phi_length: f32,
    },
    /// Plane in the XY plane.
    Plane { width: f32, height: f32 },
    /// Ring torus.
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    /// (p, q) torus knot.
    TorusKnot {
        radius: f32,
        tube: f32,
        tubular_segments: u32,
        radial_segments: u32,
        p: u32,
        q: u32,
    },
}

impl Geometry {
    /// A unit-segment box.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Self::Box {
            width,
            height,
            depth,
            segments: [1, 1, 1],
        }
    }

    /// A full sphere.
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self::Sphere {
            radius,
            width_segments,
            height_segments,
            phi_start: 0.0,
            phi_length: TAU,
        }
    }

    /// A sphere swept from `phi_start` over `phi_length` radians.
    pub fn partial_sphere(
        radius: f32,
        width_segments: u32,
        height_segments: u32,
        phi_start: f32,
        phi_length: f32,
    ) -> Self {
        Self::Sphere {
            radius,
            width_segments,
            height_segments,
            phi_start,
            phi_length,
        }
    }

    pub fn plane(width: f32, height: f32) -> Self {
        Self::Plane { width, height }
    }

    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        Self::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        }
    }

    pub fn torus_knot(
        radius: f32,
        tube: f32,
        tubular_segments: u32,
        radial_segments: u32,
        p: u32,
        q: u32,
    ) -> Self {
        Self::TorusKnot {
            radius,
            tube,
            tubular_segments,
            radial_segments,
            p,
            q,
        }
    }

    /// Short kind name used in logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Box { .. } => "box",
            Self::Sphere { .. } => "sphere",
            Self::Plane { .. } => "plane",
            Self::Torus { .. } => "torus",
            Self::TorusKnot { .. } => "torus knot",
        }
    }

    /// Check that every dimension is positive and every segment count non-zero.
    pub fn validate(&self) -> ResourceResult<()> {
        let invalid = |message: &str| ResourceError::InvalidGeometry {
            kind: self.kind(),
            message: message.to_string(),
        };

        match *self {
            Self::Box {
                width,
                height,
                depth,
                segments,
            } => {
                if width <= 0.0 || height <= 0.0 || depth <= 0.0 {
                    return Err(invalid("dimensions must be positive"));
                }
                if segments.contains(&0) {
                    return Err(invalid("segment counts must be non-zero"));
                }
            }
            Self::Sphere {
                radius,
                width_segments,
                height_segments,
                phi_length,
                ..
            } => {
                if radius <= 0.0 {
                    return Err(invalid("radius must be positive"));
                }
                if width_segments < 3 || height_segments < 2 {
                    return Err(invalid("needs at least 3x2 segments"));
                }
                if phi_length <= 0.0 || phi_length > TAU {
                    return Err(invalid("phi length must be in (0, 2π]"));
                }
            }
            Self::Plane { width, height } => {
                if width <= 0.0 || height <= 0.0 {
                    return Err(invalid("dimensions must be positive"));
                }
            }
            Self::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => {
                if radius <= 0.0 || tube <= 0.0 {
                    return Err(invalid("radius and tube must be positive"));
                }
                if radial_segments < 2 || tubular_segments < 3 {
                    return Err(invalid("too few segments"));
                }
            }
            Self::TorusKnot {
                radius,
                tube,
                tubular_segments,
                radial_segments,
                p,
                q,
            } => {
                if radius <= 0.0 || tube <= 0.0 {
                    return Err(invalid("radius and tube must be positive"));
                }
                if radial_segments < 2 || tubular_segments < 3 {
                    return Err(invalid("too few segments"));
                }
                if p == 0 || q == 0 {
                    return Err(invalid("winding numbers must be non-zero"));
                }
            }
        }

        Ok(())
    }

    /// Whether a sphere sweep covers less than the full circle.
    pub fn is_partial(&self) -> bool {
        match *self {
            Self::Sphere { phi_length, .. } => phi_length < TAU - f32::EPSILON,
            _ => false,
        }
    }
}

/// Half-turn sweep, handy for dome-like hemispheres.
pub const HALF_TURN: f32 = PI;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_primitives() {
        assert!(Geometry::cuboid(1.0, 1.0, 1.0).validate().is_ok());
        assert!(Geometry::sphere(0.7, 32, 32).validate().is_ok());
        assert!(Geometry::plane(10.0, 10.0).validate().is_ok());
        assert!(Geometry::torus(0.4, 0.1, 32, 32).validate().is_ok());
        assert!(
            Geometry::torus_knot(1.0, 0.3, 128, 64, 2, 3)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_rejects_degenerate_sizes() {
        let err = Geometry::cuboid(0.0, 1.0, 1.0).validate().unwrap_err();
        assert!(matches!(err, ResourceError::InvalidGeometry { kind: "box", .. }));

        assert!(Geometry::sphere(1.0, 2, 2).validate().is_err());
        assert!(Geometry::torus_knot(1.0, 0.3, 128, 64, 0, 3).validate().is_err());
    }

    #[test]
    fn test_partial_sphere() {
        let dome = Geometry::partial_sphere(1.5, 64, 64, 0.0, HALF_TURN);
        assert!(dome.validate().is_ok());
        assert!(dome.is_partial());
        assert!(!Geometry::sphere(1.0, 12, 12).is_partial());
    }
}
