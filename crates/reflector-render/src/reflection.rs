//! Reflection camera derivation.
//!
//! The virtual camera is the mirror image of a real eye across the mirror
//! plane. It is a plain value recomputed for every eye of every frame.

use glam::{Mat3, Mat4, Quat, Vec3};
use reflector_core::{Plane, Pose};

use crate::backend::ViewCamera;
use crate::camera::Camera;
use crate::oblique::{oblique_projection, ClipState};

/// Reflects a pose across `plane`.
///
/// The position is reflected directly. The forward and up axes are reflected
/// and a right-handed, orthonormal frame is rebuilt from them, which absorbs
/// rounding and undoes the handedness flip a reflection introduces. The image
/// this camera renders is therefore horizontally mirrored, which is exactly
/// what projective sampling on the mirror surface expects.
pub fn reflect_pose(pose: &Pose, plane: &Plane) -> Pose {
    let position = plane.reflect_point(pose.position);

    let forward = plane.reflect_direction(pose.forward()).normalize();
    let up = plane.reflect_direction(pose.up());
    let right = forward.cross(up).normalize();
    let up = right.cross(forward);

    let rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize();
    Pose::new(position, rotation)
}

/// Whether a real eye at `position` is on the reflective side of `plane`.
pub fn is_facing(position: Vec3, plane: &Plane) -> bool {
    plane.signed_distance(position) > 0.0
}

/// The camera that renders the reflection for one eye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualCamera {
    pose: Pose,
    view: Mat4,
    projection: Mat4,
    clip_state: ClipState,
}

impl VirtualCamera {
    /// Derives the reflection camera of `camera` across `plane`.
    #[must_use]
    pub fn new(camera: &Camera, plane: &Plane, clip_bias: f32) -> Self {
        let pose = reflect_pose(&camera.pose, plane);
        let view = pose.view_matrix();
        let clip = oblique_projection(camera.projection_matrix(), view, plane, clip_bias);
        Self {
            pose,
            view,
            projection: clip.projection,
            clip_state: clip.state,
        }
    }

    /// Reflected pose.
    #[must_use]
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Reflected position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    /// World-to-view matrix of the reflected pose.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Projection with the near plane on the mirror (unless degenerate).
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Combined view-projection used for the reflection render.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Whether the oblique near plane was applied.
    #[must_use]
    pub fn clip_state(&self) -> ClipState {
        self.clip_state
    }

    /// Camera description handed to the scene renderer.
    #[must_use]
    pub fn view_camera(&self) -> ViewCamera {
        ViewCamera {
            view: self.view,
            projection: self.projection,
            position: self.pose.position,
        }
    }
}
