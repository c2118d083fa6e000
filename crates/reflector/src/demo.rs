//! The demo scene: a standing mirror on a green field, with trees and rocks
//! scattered around it and a head that follows the viewer.
//!
//! Props are cuboid stand-ins. Their placement is seeded so a scene can be
//! rebuilt exactly.

use glam::{Mat4, Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reflector_core::{tint_from_hex, MeshGeometry, MirrorOptions, NodeId, Scene};
use reflector_render::{Camera, RenderResult};

use crate::Viewer;

pub const CAMERA_POSITION: Vec3 = Vec3::new(-7.0, 10.0, 15.0);
pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 10000.0;

pub const GROUND_SIZE: f32 = 100.0;
/// Keeps the ground from z-fighting with anything standing at y = 0.
pub const GROUND_HEIGHT: f32 = -0.001;

pub const MIRROR_POSITION: Vec3 = Vec3::new(0.0, 2.0, -2.0);
pub const MIRROR_TINT: u32 = 0x00a0_a0a0;

pub const TREE_COUNT: usize = 30;
pub const ROCK_COUNT: usize = 40;
/// Props are scattered in `(-PROP_RANGE, PROP_RANGE)` on x and z.
pub const PROP_RANGE: f32 = 25.0;
/// Half side of the square around the origin that stays clear of props.
pub const CLEARING: f32 = 5.0;

const GROUND_COLOR: u32 = 0x0033_8833;
const TREE_COLOR: u32 = 0x002e_6b2e;
const ROCK_COLOR: u32 = 0x007a_7a7a;
const HEAD_COLOR: u32 = 0x00e0_ac69;

/// Mirror options used by the demo: sharper reflection, gray tint.
pub fn demo_options() -> MirrorOptions {
    MirrorOptions {
        resolution_multiplier: 2.0,
        ..MirrorOptions::default()
    }
    .with_tint_hex(MIRROR_TINT)
}

/// World transform of the demo mirror.
pub fn mirror_transform() -> Mat4 {
    Mat4::from_translation(MIRROR_POSITION)
}

/// Points `camera` at the origin from the demo viewpoint.
pub fn place_camera(camera: &mut Camera) {
    camera.set_fov_degrees(CAMERA_FOV_DEGREES);
    camera.set_near(CAMERA_NEAR);
    camera.set_far(CAMERA_FAR);
    camera.look_at(CAMERA_POSITION, Vec3::ZERO, Vec3::Y);
}

/// Adds the ground plane.
pub fn add_ground(scene: &mut Scene) -> NodeId {
    let transform = Mat4::from_translation(Vec3::new(0.0, GROUND_HEIGHT, 0.0))
        * Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2);
    scene.add_mesh(
        "ground",
        MeshGeometry::quad(GROUND_SIZE, GROUND_SIZE, tint_from_hex(GROUND_COLOR)),
        transform,
    )
}

/// Adds the stand-in for the viewer's head.
pub fn add_head_proxy(scene: &mut Scene) -> NodeId {
    scene.add_mesh(
        "head",
        MeshGeometry::cuboid(Vec3::new(0.1, 0.12, 0.1), tint_from_hex(HEAD_COLOR)),
        Mat4::IDENTITY,
    )
}

/// Picks a spot on the ground outside the central clearing.
fn scatter_position(rng: &mut StdRng) -> (f32, f32) {
    loop {
        let x = rng.gen_range(-PROP_RANGE..PROP_RANGE);
        let z = rng.gen_range(-PROP_RANGE..PROP_RANGE);
        if x.abs() >= CLEARING || z.abs() >= CLEARING {
            return (x, z);
        }
    }
}

/// Scatters trees and rocks, returning their ids in insertion order.
pub fn scatter_props(scene: &mut Scene, seed: u64) -> Vec<NodeId> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut props = Vec::with_capacity(TREE_COUNT + ROCK_COUNT);

    let trunk = Vec3::new(0.4, 1.5, 0.4);
    for i in 0..TREE_COUNT {
        let (x, z) = scatter_position(&mut rng);
        props.push(scene.add_mesh(
            format!("tree {i}"),
            MeshGeometry::cuboid(trunk, tint_from_hex(TREE_COLOR)),
            Mat4::from_translation(Vec3::new(x, trunk.y, z)),
        ));
    }

    for i in 0..ROCK_COUNT {
        let (x, z) = scatter_position(&mut rng);
        let half = Vec3::new(
            rng.gen_range(0.3..0.8),
            rng.gen_range(0.2..0.5),
            rng.gen_range(0.3..0.8),
        );
        let yaw = rng.gen_range(0.0..std::f32::consts::TAU);
        props.push(scene.add_mesh(
            format!("rock {i}"),
            MeshGeometry::cuboid(half, tint_from_hex(ROCK_COLOR)),
            Mat4::from_rotation_translation(Quat::from_rotation_y(yaw), Vec3::new(x, half.y, z)),
        ));
    }

    log::debug!("scattered {} props with seed {seed}", props.len());
    props
}

/// Fills a fresh viewer with the demo scene.
pub(crate) fn populate(viewer: &mut Viewer, seed: u64) -> RenderResult<()> {
    viewer.set_mirror_transform(mirror_transform())?;
    place_camera(viewer.camera_mut());

    let scene = viewer.scene_mut();
    add_ground(scene);
    scatter_props(scene, seed);
    let head = add_head_proxy(scene);
    viewer.set_head_proxy(head);

    log::info!("demo scene ready with {} nodes", viewer.scene().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn prop_positions(scene: &Scene) -> Vec<Vec3> {
        scene
            .iter()
            .map(|(_, node)| node.transform.w_axis.truncate())
            .collect()
    }

    #[test]
    fn test_demo_options() {
        let options = demo_options();
        assert_eq!(options.resolution_multiplier, 2.0);
        assert_eq!(options.tint, tint_from_hex(0xa0a0a0));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_props_avoid_clearing() {
        let mut scene = Scene::new();
        let props = scatter_props(&mut scene, 3);
        assert_eq!(props.len(), TREE_COUNT + ROCK_COUNT);
        for p in prop_positions(&scene) {
            assert!(p.x.abs() < PROP_RANGE && p.z.abs() < PROP_RANGE);
            assert!(p.x.abs() >= CLEARING || p.z.abs() >= CLEARING, "{p} in clearing");
        }
    }

    proptest! {
        #[test]
        fn test_any_seed_keeps_clearing_free(seed in any::<u64>()) {
            let mut scene = Scene::new();
            scatter_props(&mut scene, seed);
            for p in prop_positions(&scene) {
                prop_assert!(p.x.abs() >= CLEARING || p.z.abs() >= CLEARING);
                prop_assert!(p.y > 0.0);
            }
        }
    }

    #[test]
    fn test_props_deterministic_by_seed() {
        let mut a = Scene::new();
        let mut b = Scene::new();
        let mut c = Scene::new();
        scatter_props(&mut a, 11);
        scatter_props(&mut b, 11);
        scatter_props(&mut c, 12);
        assert_eq!(prop_positions(&a), prop_positions(&b));
        assert_ne!(prop_positions(&a), prop_positions(&c));
    }

    #[test]
    fn test_ground_faces_up() {
        let mut scene = Scene::new();
        let id = add_ground(&mut scene);
        let node = scene.get(id).unwrap();
        let normal = node.transform.transform_vector3(Vec3::Z);
        assert!((normal - Vec3::Y).length() < 1e-5);
        assert!((node.transform.w_axis.y - GROUND_HEIGHT).abs() < 1e-6);
    }

    #[test]
    fn test_place_camera() {
        let mut camera = Camera::default();
        place_camera(&mut camera);
        assert_eq!(camera.position(), CAMERA_POSITION);
        assert_eq!(camera.near, 1.0);
        assert_eq!(camera.far, 10000.0);
        assert!((camera.fov - 45f32.to_radians()).abs() < 1e-6);
        assert!(camera.pose.forward().dot(-CAMERA_POSITION.normalize()) > 0.9999);
    }
}
