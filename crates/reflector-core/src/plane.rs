//! Mirror plane geometry.
//!
//! A plane is stored as a unit normal `n` and a signed offset `d`; a point `p`
//! lies on the plane iff `n.dot(p) + d == 0`. The positive half-space
//! (`signed_distance > 0`) is the reflective side of a mirror.

use glam::{Mat4, Vec3, Vec4};

use crate::error::{ReflectorError, Result};

/// An infinite plane with a unit normal and signed distance from the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vec3,
    d: f32,
}

impl Plane {
    /// Creates a plane from a (not necessarily unit) normal and offset.
    ///
    /// Both values are rescaled so that the stored normal has unit length.
    pub fn new(normal: Vec3, d: f32) -> Result<Self> {
        let length = normal.length();
        if !length.is_finite() || length <= f32::EPSILON || !d.is_finite() {
            return Err(ReflectorError::DegeneratePlane(normal));
        }
        Ok(Self {
            normal: normal / length,
            d: d / length,
        })
    }

    /// Creates the plane through `point` with the given normal.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Result<Self> {
        let n = normal
            .try_normalize()
            .ok_or(ReflectorError::DegeneratePlane(normal))?;
        if !point.is_finite() {
            return Err(ReflectorError::DegeneratePlane(normal));
        }
        Ok(Self {
            normal: n,
            d: -n.dot(point),
        })
    }

    /// Derives the world plane of a mirror from its world transform.
    ///
    /// The mirror's local surface is the XY plane facing local +Z. The normal
    /// is carried through the inverse transpose so non-uniform scale keeps it
    /// perpendicular to the surface.
    pub fn from_transform(transform: Mat4) -> Result<Self> {
        let origin = transform.transform_point3(Vec3::ZERO);
        let normal = transform.inverse().transpose().transform_vector3(Vec3::Z);
        Self::from_point_normal(origin, normal)
    }

    /// Returns the unit normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Returns the signed offset `d`.
    pub fn d(&self) -> f32 {
        self.d
    }

    /// Returns the plane as `(n.x, n.y, n.z, d)`.
    pub fn to_vec4(&self) -> Vec4 {
        self.normal.extend(self.d)
    }

    /// Signed distance from `point` to the plane, positive on the normal side.
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }

    /// Returns the closest point on the plane.
    pub fn project_point(&self, point: Vec3) -> Vec3 {
        point - self.signed_distance(point) * self.normal
    }

    /// Reflects a point across the plane.
    pub fn reflect_point(&self, point: Vec3) -> Vec3 {
        point - 2.0 * self.signed_distance(point) * self.normal
    }

    /// Reflects a direction across the plane (no translation component).
    pub fn reflect_direction(&self, direction: Vec3) -> Vec3 {
        direction - 2.0 * self.normal.dot(direction) * self.normal
    }

    /// Returns the plane moved `margin` units against its normal.
    ///
    /// The positive half-space grows by `margin`, so geometry lying exactly on
    /// the original plane ends up strictly on the positive side.
    pub fn with_margin(&self, margin: f32) -> Self {
        Self {
            normal: self.normal,
            d: self.d + margin,
        }
    }

    /// Affine matrix reflecting points across this plane.
    //
    // | 1-2nx²   -2nxny   -2nxnz   -2nxd |
    // | -2nxny   1-2ny²   -2nynz   -2nyd |
    // | -2nxnz   -2nynz   1-2nz²   -2nzd |
    // |    0        0        0       1   |
    pub fn reflection_matrix(&self) -> Mat4 {
        let n = self.normal;
        let d = self.d;
        Mat4::from_cols(
            Vec4::new(1.0 - 2.0 * n.x * n.x, -2.0 * n.x * n.y, -2.0 * n.x * n.z, 0.0),
            Vec4::new(-2.0 * n.x * n.y, 1.0 - 2.0 * n.y * n.y, -2.0 * n.y * n.z, 0.0),
            Vec4::new(-2.0 * n.x * n.z, -2.0 * n.y * n.z, 1.0 - 2.0 * n.z * n.z, 0.0),
            Vec4::new(-2.0 * n.x * d, -2.0 * n.y * d, -2.0 * n.z * d, 1.0),
        )
    }
}
