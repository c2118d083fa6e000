//! Projective texture lookup into a reflection target.

use glam::{Mat4, Vec2, Vec3, Vec4};

/// Maps clip-space `[-1, 1]` to texture space `[0, 1]`, with `v` growing
/// downward as wgpu textures are addressed.
pub const SAMPLE_BIAS: Mat4 = Mat4::from_cols(
    Vec4::new(0.5, 0.0, 0.0, 0.0),
    Vec4::new(0.0, -0.5, 0.0, 0.0),
    Vec4::new(0.0, 0.0, 1.0, 0.0),
    Vec4::new(0.5, 0.5, 0.0, 1.0),
);

/// Matrix taking a world-space point to homogeneous texture coordinates of the
/// target rendered with `view_projection`.
pub fn sampling_matrix(view_projection: Mat4) -> Mat4 {
    SAMPLE_BIAS * view_projection
}

/// Texture coordinates of `world`, or `None` when it lies behind the eye.
pub fn project_to_texture(sampling: Mat4, world: Vec3) -> Option<Vec2> {
    let h = sampling * world.extend(1.0);
    if h.w <= 0.0 {
        return None;
    }
    Some(Vec2::new(h.x, h.y) / h.w)
}

/// Whether `uv` addresses a texel of the target.
pub fn is_inside_unit_square(uv: Vec2) -> bool {
    (0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y)
}
