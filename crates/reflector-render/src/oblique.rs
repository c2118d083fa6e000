//! Oblique near-plane clipping.
//!
//! Rewrites the depth row of a perspective projection so that the near clip
//! plane coincides with an arbitrary view-space plane (Lengyel's method). The
//! x, y and w rows are untouched, so the matrix projects exactly like the
//! original apart from depth. Depth follows the wgpu convention: the clip
//! plane maps to `z_ndc = 0` and the far corner of the frustum to `z_ndc = 1`.

use glam::{Mat4, Vec4};
use reflector_core::Plane;

/// Denominators and view-space normal components below this are treated as
/// degenerate.
pub const OBLIQUE_EPSILON: f32 = 1e-6;

/// Whether the oblique rewrite was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipState {
    /// The near plane is the clip plane.
    Oblique,
    /// The configuration was degenerate and the projection is unmodified.
    Fallback,
}

/// Result of [`oblique_projection`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObliqueClip {
    /// The projection to render with.
    pub projection: Mat4,
    /// How `projection` was obtained.
    pub state: ClipState,
}

impl ObliqueClip {
    fn fallback(projection: Mat4) -> Self {
        Self {
            projection,
            state: ClipState::Fallback,
        }
    }
}

/// Transforms a world-space plane into the view space of `view`.
///
/// Planes are covectors, so they transform with the inverse transpose.
pub fn view_space_plane(view: Mat4, plane: &Plane) -> Vec4 {
    view.inverse().transpose() * plane.to_vec4()
}

/// Returns `projection` with its near plane replaced by `plane`.
///
/// Geometry on the positive side of `plane` (moved `clip_bias` units against
/// its normal) is kept. The camera itself must lie on the negative side;
/// otherwise, or when the plane is seen exactly edge-on, the unmodified
/// projection is returned with [`ClipState::Fallback`].
pub fn oblique_projection(
    projection: Mat4,
    view: Mat4,
    plane: &Plane,
    clip_bias: f32,
) -> ObliqueClip {
    let clip_plane = view_space_plane(view, &plane.with_margin(clip_bias));

    // The eye sits at the view-space origin; its signed distance is `w`.
    if !clip_plane.is_finite() || clip_plane.w >= 0.0 {
        return ObliqueClip::fallback(projection);
    }
    if clip_plane.z.abs() < OBLIQUE_EPSILON {
        return ObliqueClip::fallback(projection);
    }

    // Frustum corner opposite the clip plane, pulled back into view space.
    let corner = projection.inverse()
        * Vec4::new(clip_plane.x.signum(), clip_plane.y.signum(), 1.0, 1.0);
    let denom = clip_plane.dot(corner);
    if !denom.is_finite() || denom.abs() < OBLIQUE_EPSILON {
        return ObliqueClip::fallback(projection);
    }

    let row = clip_plane / denom;
    let mut oblique = projection;
    oblique.x_axis.z = row.x;
    oblique.y_axis.z = row.y;
    oblique.z_axis.z = row.z;
    oblique.w_axis.z = row.w;

    ObliqueClip {
        projection: oblique,
        state: ClipState::Oblique,
    }
}

/// Normalized device depth of a view-space point, or `None` behind the eye.
pub fn ndc_depth(projection: Mat4, view_point: glam::Vec3) -> Option<f32> {
    let clip = projection * view_point.extend(1.0);
    (clip.w > 0.0).then(|| clip.z / clip.w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn projection() -> Mat4 {
        Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 1.0, 0.1, 100.0)
    }

    /// Plane `z = -5` keeping everything further away than it.
    fn far_side_plane() -> Plane {
        Plane::from_point_normal(Vec3::new(0.0, 0.0, -5.0), Vec3::NEG_Z).unwrap()
    }

    #[test]
    fn test_plane_maps_to_zero_depth() {
        let clip = oblique_projection(projection(), Mat4::IDENTITY, &far_side_plane(), 0.0);
        assert_eq!(clip.state, ClipState::Oblique);

        for p in [
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::new(1.0, -0.5, -5.0),
            Vec3::new(-1.5, 1.5, -5.0),
        ] {
            let depth = ndc_depth(clip.projection, p).unwrap();
            assert!(depth.abs() < 1e-4, "depth {depth} at {p:?}");
        }
    }

    #[test]
    fn test_clip_sides() {
        let clip = oblique_projection(projection(), Mat4::IDENTITY, &far_side_plane(), 0.0);
        let between = ndc_depth(clip.projection, Vec3::new(0.0, 0.0, -4.0)).unwrap();
        let beyond = ndc_depth(clip.projection, Vec3::new(0.0, 0.0, -20.0)).unwrap();
        let far = ndc_depth(clip.projection, Vec3::new(0.0, 0.0, -100.0)).unwrap();

        assert!(between < 0.0, "point before the plane must be clipped");
        assert!((0.0..=1.0).contains(&beyond));
        assert!((far - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_only_depth_row_changes() {
        let original = projection();
        let plane = Plane::from_point_normal(Vec3::new(0.3, -0.2, -3.0), Vec3::new(0.2, 0.1, -1.0))
            .unwrap();
        let clip = oblique_projection(original, Mat4::IDENTITY, &plane, 0.0);
        assert_eq!(clip.state, ClipState::Oblique);
        let (a, b) = (original.transpose(), clip.projection.transpose());
        assert_eq!(a.x_axis, b.x_axis);
        assert_eq!(a.y_axis, b.y_axis);
        assert_eq!(a.w_axis, b.w_axis);
        assert_ne!(a.z_axis, b.z_axis);
    }

    #[test]
    fn test_tilted_plane_points_have_zero_depth() {
        let plane = Plane::from_point_normal(Vec3::new(0.3, -0.2, -3.0), Vec3::new(0.2, 0.1, -1.0))
            .unwrap();
        let clip = oblique_projection(projection(), Mat4::IDENTITY, &plane, 0.0);
        let on_plane = plane.project_point(Vec3::new(0.5, 0.5, -3.0));
        let depth = ndc_depth(clip.projection, on_plane).unwrap();
        assert!(depth.abs() < 1e-4);
    }

    #[test]
    fn test_bias_keeps_geometry_on_plane() {
        let clip = oblique_projection(projection(), Mat4::IDENTITY, &far_side_plane(), 1e-3);
        let depth = ndc_depth(clip.projection, Vec3::new(0.0, 0.0, -5.0)).unwrap();
        assert!(depth > 0.0);
    }

    #[test]
    fn test_camera_in_front_of_plane_falls_back() {
        // Normal towards the camera puts the eye on the kept side.
        let plane = Plane::from_point_normal(Vec3::new(0.0, 0.0, -5.0), Vec3::Z).unwrap();
        let clip = oblique_projection(projection(), Mat4::IDENTITY, &plane, 0.0);
        assert_eq!(clip.state, ClipState::Fallback);
        assert_eq!(clip.projection, projection());
    }

    #[test]
    fn test_edge_on_plane_falls_back() {
        // Plane x = 1 contains the view direction.
        let plane = Plane::from_point_normal(Vec3::X, Vec3::X).unwrap();
        let clip = oblique_projection(projection(), Mat4::IDENTITY, &plane, 0.0);
        assert_eq!(clip.state, ClipState::Fallback);
        assert_eq!(clip.projection, projection());
    }

    #[test]
    fn test_camera_on_plane_falls_back() {
        let plane = Plane::from_point_normal(Vec3::ZERO, Vec3::NEG_Z).unwrap();
        let clip = oblique_projection(projection(), Mat4::IDENTITY, &plane, 1e-3);
        assert_eq!(clip.state, ClipState::Fallback);
    }

    #[test]
    fn test_view_space_plane_follows_view() {
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -2.0));
        let plane = Plane::new(Vec3::Z, 0.0).unwrap();
        let v = view_space_plane(view, &plane);
        // World z = 0 sits at view z = -2.
        assert!((v.truncate().dot(Vec3::new(0.0, 0.0, -2.0)) + v.w).abs() < 1e-5);
    }
}
