//! Rigid viewer poses and eye identifiers.

use glam::{Affine3A, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A position and orientation in world space.
///
/// Local axes follow the usual camera convention: +X right, +Y up, and the
/// view direction is local -Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// World-space position.
    pub position: Vec3,
    /// World-space orientation.
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// The pose at the origin looking down -Z.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Creates a pose from a position and orientation.
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Creates a pose at `position` looking towards `target`.
    ///
    /// Falls back to the identity orientation when `target` coincides with
    /// `position` or the view direction is parallel to `up`.
    pub fn looking_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let view = Mat4::look_at_rh(position, target, up);
        let rotation = Quat::from_mat4(&view.inverse());
        if rotation.is_finite() {
            Self::new(position, rotation.normalize())
        } else {
            Self::new(position, Quat::IDENTITY)
        }
    }

    /// Unit view direction (local -Z).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Unit up direction (local +Y).
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Unit right direction (local +X).
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Returns the pose translated along its own right axis.
    pub fn offset_right(&self, distance: f32) -> Self {
        Self::new(self.position + self.right() * distance, self.rotation)
    }

    /// Local-to-world matrix.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    /// World-to-view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from(Affine3A::from_rotation_translation(self.rotation, self.position).inverse())
    }
}

/// Which eye a render is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Eye {
    /// Single non-stereo view.
    #[default]
    Mono,
    /// Left eye of a stereo pair.
    Left,
    /// Right eye of a stereo pair.
    Right,
}

impl Eye {
    /// Slot used for per-eye storage. Mono shares the left slot.
    pub fn index(self) -> usize {
        match self {
            Eye::Mono | Eye::Left => 0,
            Eye::Right => 1,
        }
    }

    /// Returns display name.
    pub fn name(self) -> &'static str {
        match self {
            Eye::Mono => "mono",
            Eye::Left => "left",
            Eye::Right => "right",
        }
    }
}

impl std::fmt::Display for Eye {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_axes() {
        let pose = Pose::IDENTITY;
        assert_eq!(pose.forward(), Vec3::NEG_Z);
        assert_eq!(pose.up(), Vec3::Y);
        assert_eq!(pose.right(), Vec3::X);
    }

    #[test]
    fn test_looking_at_forward() {
        let pose = Pose::looking_at(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, Vec3::NEG_Z);
        assert!((pose.forward() - Vec3::NEG_Y).length() < 1e-5);
        assert!((pose.up() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_view_matrix_moves_position_to_origin() {
        let pose = Pose::looking_at(Vec3::new(-7.0, 10.0, 15.0), Vec3::ZERO, Vec3::Y);
        let at_origin = pose.view_matrix().transform_point3(pose.position);
        assert!(at_origin.length() < 1e-4);
        let ahead = pose.view_matrix().transform_point3(pose.position + pose.forward());
        assert!((ahead - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn test_offset_right() {
        let pose = Pose::IDENTITY.offset_right(-0.032);
        assert!((pose.position.x - -0.032).abs() < 1e-6);
    }

    #[test]
    fn test_eye_index() {
        assert_eq!(Eye::Mono.index(), 0);
        assert_eq!(Eye::Left.index(), 0);
        assert_eq!(Eye::Right.index(), 1);
        assert_eq!(Eye::Right.to_string(), "right");
    }
}
