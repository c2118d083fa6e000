//! The viewer: one scene, one camera, one mirror and the engine that draws
//! them.

use glam::{Mat4, Vec2, Vec3};
use pollster::FutureExt;
use reflector_core::{Eye, MirrorOptions, NodeId, Scene};
use reflector_render::{
    Camera, FrameReport, GpuTarget, MirrorPass, MirrorSurface, RenderEngine, RenderResult,
};

use crate::demo;

/// Width and height of the mirror quad created by [`Viewer::new_headless`].
const DEFAULT_MIRROR_EXTENT: Vec2 = Vec2::new(3.0, 4.0);

/// Owns everything needed to render a scene with a planar mirror.
pub struct Viewer {
    engine: RenderEngine,
    scene: Scene,
    camera: Camera,
    mirror: MirrorSurface<GpuTarget>,
    pass: MirrorPass,
    head: Option<NodeId>,
}

impl Viewer {
    /// Creates a headless viewer whose scene holds a single 3x4 mirror at
    /// the origin, facing +Z.
    pub fn new_headless(width: u32, height: u32, options: MirrorOptions) -> RenderResult<Self> {
        options.validate()?;
        let engine = RenderEngine::new_headless(width, height).block_on()?;
        let (width, height) = (engine.width, engine.height);

        let mut scene = Scene::new();
        let mut mirror = MirrorSurface::spawn(
            &mut scene,
            "mirror",
            Mat4::IDENTITY,
            DEFAULT_MIRROR_EXTENT,
            options,
        )?;
        mirror.on_viewport_resized(width, height);

        let mut camera = Camera::new(width as f32 / height as f32);
        camera.look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);

        Ok(Self {
            engine,
            scene,
            camera,
            mirror,
            pass: MirrorPass::new(),
            head: None,
        })
    }

    /// Creates a headless viewer showing the demo scene.
    ///
    /// The same `seed` always scatters the props in the same places.
    pub fn demo(width: u32, height: u32, options: MirrorOptions, seed: u64) -> RenderResult<Self> {
        let mut viewer = Self::new_headless(width, height, options)?;
        demo::populate(&mut viewer, seed)?;
        Ok(viewer)
    }

    /// Records the trace of every following frame.
    #[must_use]
    pub fn with_trace(mut self) -> Self {
        self.pass = MirrorPass::new().with_trace();
        self
    }

    /// Resizes the main targets and announces the new size to the mirror.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.engine.resize(width, height);
        let (width, height) = (self.engine.width, self.engine.height);
        self.camera.set_aspect_ratio(width as f32 / height as f32);
        self.mirror.on_viewport_resized(width, height);
    }

    /// Renders one frame: the reflection of every eye, then the main view.
    pub fn render_frame(&mut self) -> RenderResult<FrameReport> {
        if let Some(head) = self.head {
            self.scene.set_transform(head, self.camera.pose.to_matrix())?;
        }
        self.engine.sync_scene(&self.scene);

        let eye_views = self.camera.eye_views(&self.mirror.options().stereo);
        self.pass
            .render_frame(&mut self.engine, &mut self.mirror, &self.scene, &eye_views)
    }

    /// Reads back the frame of the first rendered eye.
    pub fn capture(&self) -> RenderResult<Vec<u8>> {
        let eye = self.mirror.eyes().first().copied().unwrap_or(Eye::Mono);
        self.capture_eye(eye)
    }

    /// Reads back the frame of `eye`.
    pub fn capture_eye(&self, eye: Eye) -> RenderResult<Vec<u8>> {
        self.engine.read_main_target(eye)
    }

    /// Moves the mirror node and its reflective plane.
    ///
    /// The new plane is used from the next [`render_frame`](Self::render_frame).
    pub fn set_mirror_transform(&mut self, transform: Mat4) -> RenderResult<()> {
        self.mirror.set_transform(transform)?;
        self.scene.set_transform(self.mirror.node(), transform)?;
        Ok(())
    }

    /// Makes `node` follow the camera pose and appear only in the reflection.
    pub fn set_head_proxy(&mut self, node: NodeId) {
        self.mirror.add_reflection_only(node);
        self.head = Some(node);
    }

    /// Node following the camera, if any.
    pub fn head_proxy(&self) -> Option<NodeId> {
        self.head
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn mirror(&self) -> &MirrorSurface<GpuTarget> {
        &self.mirror
    }

    pub fn engine(&self) -> &RenderEngine {
        &self.engine
    }

    /// The mirror pass, for inspecting its trace.
    pub fn pass(&self) -> &MirrorPass {
        &self.pass
    }
}
