//! Per-frame mirror orchestration.
//!
//! For every eye the pass derives the reflection camera, renders the scene
//! (minus the mirror) into that eye's offscreen target and builds the sampling
//! matrix. Only after every eye has its reflection does it draw the main scene,
//! binding each eye's reflection to the mirror material. All of this happens
//! in program order on the calling thread.

use reflector_core::{Eye, NodeTag, RenderSet, Scene};

use crate::backend::{RenderDestination, ScenePass, SceneRenderer};
use crate::camera::EyeView;
use crate::error::RenderResult;
use crate::mirror_surface::{EyeShading, MirrorSurface, SurfaceStatus};
use crate::oblique::ClipState;
use crate::reflection::{is_facing, VirtualCamera};
use crate::reflection_target::ReflectionTarget;
use crate::texture_projector::sampling_matrix;

/// Where the pass currently is within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassStage {
    #[default]
    Idle,
    ComputeReflectionCamera,
    RenderToOffscreen,
    BuildProjectionMatrix,
    RestoreMainTarget,
    RenderMainScene,
}

/// Resource access recorded by a traced frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    /// The eye's offscreen target was (re)allocated.
    TargetResized(Eye),
    /// The scene was drawn into the eye's offscreen target.
    OffscreenWrite(Eye),
    SamplingMatrixBuilt(Eye),
    MainTargetRestored(Eye),
    /// The main pass sampled the eye's offscreen target.
    MainRead(Eye),
}

/// Ordered record of one frame's target accesses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameTrace {
    events: Vec<TraceEvent>,
}

impl FrameTrace {
    /// Events of the last frame, in issue order.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Whether every main-pass read of an eye's target comes after a write to
    /// it and no write to it follows.
    pub fn writes_precede_reads(&self) -> bool {
        self.events.iter().enumerate().all(|(i, event)| {
            let TraceEvent::MainRead(eye) = *event else {
                return true;
            };
            let write = TraceEvent::OffscreenWrite(eye);
            self.events[..i].contains(&write) && !self.events[i + 1..].contains(&write)
        })
    }

    fn clear(&mut self) {
        self.events.clear();
    }
}

/// Outcome of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Eyes that rendered a fresh reflection.
    pub reflected_eyes: Vec<Eye>,
    /// Eyes whose mirror shows only its tint this frame.
    pub skipped_eyes: Vec<Eye>,
    /// Eyes whose reflection used the unmodified projection.
    pub fallback_eyes: Vec<Eye>,
    pub mirror_status: SurfaceStatus,
}

/// Drives the reflection and main passes for one mirror.
#[derive(Debug, Default)]
pub struct MirrorPass {
    stage: PassStage,
    trace: Option<FrameTrace>,
    fallback_eyes: Vec<Eye>,
}

impl MirrorPass {
    /// Creates a new mirror pass.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records target accesses of each frame in a [`FrameTrace`].
    #[must_use]
    pub fn with_trace(mut self) -> Self {
        self.trace = Some(FrameTrace::default());
        self
    }

    /// Current stage; [`PassStage::Idle`] between frames.
    pub fn stage(&self) -> PassStage {
        self.stage
    }

    /// Trace of the last frame, if tracing is enabled.
    pub fn trace(&self) -> Option<&FrameTrace> {
        self.trace.as_ref()
    }

    /// Renders one frame for every view in `eye_views`.
    pub fn render_frame<R>(
        &mut self,
        renderer: &mut R,
        surface: &mut MirrorSurface<R::Target>,
        scene: &Scene,
        eye_views: &[EyeView],
    ) -> RenderResult<FrameReport>
    where
        R: SceneRenderer + ?Sized,
    {
        let result = self.run_frame(renderer, surface, scene, eye_views);
        self.stage = PassStage::Idle;
        result
    }

    fn run_frame<R>(
        &mut self,
        renderer: &mut R,
        surface: &mut MirrorSurface<R::Target>,
        scene: &Scene,
        eye_views: &[EyeView],
    ) -> RenderResult<FrameReport>
    where
        R: SceneRenderer + ?Sized,
    {
        surface.begin_frame();
        if let Some(trace) = &mut self.trace {
            trace.clear();
        }
        scene.expect_tag(surface.node(), NodeTag::Mirror)?;

        let all = scene.render_set();
        let mirror_visible = all.contains(surface.node());
        let reflection_set = all.clone().without(surface.node());
        let main_set = surface
            .reflection_only()
            .iter()
            .fold(all, |set, &id| set.without(id));

        let mut report = FrameReport {
            reflected_eyes: Vec::new(),
            skipped_eyes: Vec::new(),
            fallback_eyes: Vec::new(),
            mirror_status: SurfaceStatus::Ready,
        };

        for view in eye_views {
            let reflected = mirror_visible
                && self.render_reflection(renderer, surface, view, &reflection_set, &mut report)?;
            if reflected {
                report.reflected_eyes.push(view.eye);
            } else {
                report.skipped_eyes.push(view.eye);
            }
        }
        self.note_fallbacks(&report.fallback_eyes);

        self.stage = PassStage::RenderMainScene;
        log::trace!("mirror pass: {:?}", self.stage);
        for view in eye_views {
            let eye = view.eye;
            let mirrors = if mirror_visible {
                vec![surface.binding(eye)]
            } else {
                Vec::new()
            };
            let samples = mirrors.iter().any(|m| m.texture.is_some());
            renderer.render_scene(ScenePass {
                destination: RenderDestination::Main { eye },
                camera: view.camera.view_camera(),
                render_set: &main_set,
                mirrors,
            })?;
            if samples {
                self.record(TraceEvent::MainRead(eye));
            }
        }

        report.mirror_status = surface.status().clone();
        Ok(report)
    }

    /// Runs the offscreen stages for one eye. Returns whether a reflection
    /// was rendered.
    fn render_reflection<R>(
        &mut self,
        renderer: &mut R,
        surface: &mut MirrorSurface<R::Target>,
        view: &EyeView,
        reflection_set: &RenderSet,
        report: &mut FrameReport,
    ) -> RenderResult<bool>
    where
        R: SceneRenderer + ?Sized,
    {
        let eye = view.eye;
        if !surface.status().is_ready() {
            return Ok(false);
        }
        let Some(size) = surface.requested_size() else {
            log::debug!("mirror {}: no viewport size yet", surface.node());
            return Ok(false);
        };

        self.enter(PassStage::ComputeReflectionCamera, eye);
        let plane = *surface.plane();
        if !is_facing(view.camera.position(), &plane) {
            log::trace!("mirror {}: {eye} eye is behind the mirror", surface.node());
            return Ok(false);
        }
        let virtual_camera = VirtualCamera::new(&view.camera, &plane, surface.options().clip_bias);
        if virtual_camera.clip_state() == ClipState::Fallback {
            report.fallback_eyes.push(eye);
        }

        let max_dimension = surface.options().max_target_dimension;
        let resized = surface
            .target_mut(eye)
            .ensure_size(&mut *renderer, size, max_dimension);
        match resized {
            Ok(true) => self.record(TraceEvent::TargetResized(eye)),
            Ok(false) => {}
            Err(err) => {
                log::error!("mirror {} disabled: {err}", surface.node());
                surface.mark_failed(size, err.to_string());
                return Ok(false);
            }
        }

        self.enter(PassStage::RenderToOffscreen, eye);
        let Some(target) = surface.target(eye).and_then(ReflectionTarget::texture) else {
            return Ok(false);
        };
        renderer.render_scene(ScenePass {
            destination: RenderDestination::Offscreen { eye, target },
            camera: virtual_camera.view_camera(),
            render_set: reflection_set,
            mirrors: Vec::new(),
        })?;
        self.record(TraceEvent::OffscreenWrite(eye));

        self.enter(PassStage::BuildProjectionMatrix, eye);
        surface.set_shading(
            eye,
            EyeShading {
                sampling_matrix: sampling_matrix(virtual_camera.view_projection()),
                has_reflection: true,
            },
        );
        self.record(TraceEvent::SamplingMatrixBuilt(eye));

        self.enter(PassStage::RestoreMainTarget, eye);
        self.record(TraceEvent::MainTargetRestored(eye));
        Ok(true)
    }

    fn enter(&mut self, stage: PassStage, eye: Eye) {
        self.stage = stage;
        log::trace!("mirror pass: {stage:?} ({eye})");
    }

    fn record(&mut self, event: TraceEvent) {
        if let Some(trace) = &mut self.trace {
            trace.events.push(event);
        }
    }

    /// Logs oblique fallbacks only when an eye enters or leaves that state.
    fn note_fallbacks(&mut self, current: &[Eye]) {
        for eye in current {
            if !self.fallback_eyes.contains(eye) {
                log::warn!("{eye} eye sees the mirror edge-on; oblique clipping disabled");
            }
        }
        for eye in &self.fallback_eyes {
            if !current.contains(eye) {
                log::debug!("{eye} eye: oblique clipping restored");
            }
        }
        self.fallback_eyes = current.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ViewCamera;
    use crate::camera::Camera;
    use crate::error::RenderError;
    use crate::reflection_target::{TargetAllocator, TargetSize};
    use glam::{Mat4, Vec3, Vec4};
    use reflector_core::{MeshGeometry, MirrorOptions, NodeId, StereoOptions};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Allocate(TargetSize),
        Offscreen {
            eye: Eye,
            target: u32,
            set: RenderSet,
            camera: ViewCamera,
        },
        Main {
            eye: Eye,
            set: RenderSet,
            textures: Vec<Option<u32>>,
        },
    }

    #[derive(Debug, Default)]
    struct RecordingRenderer {
        calls: Vec<Call>,
        next_target: u32,
        fail_allocations: bool,
    }

    impl RecordingRenderer {
        fn allocations(&self) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::Allocate(_)))
                .count()
        }
    }

    impl TargetAllocator for RecordingRenderer {
        type Target = u32;

        fn allocate_target(&mut self, size: TargetSize, _label: &str) -> RenderResult<u32> {
            self.calls.push(Call::Allocate(size));
            if self.fail_allocations {
                return Err(RenderError::TargetAllocation {
                    width: size.width,
                    height: size.height,
                    reason: "format not supported".to_string(),
                });
            }
            self.next_target += 1;
            Ok(self.next_target)
        }
    }

    impl SceneRenderer for RecordingRenderer {
        fn render_scene(&mut self, pass: ScenePass<'_, u32>) -> RenderResult<()> {
            let call = match pass.destination {
                RenderDestination::Offscreen { eye, target } => Call::Offscreen {
                    eye,
                    target: *target,
                    set: pass.render_set.clone(),
                    camera: pass.camera,
                },
                RenderDestination::Main { eye } => Call::Main {
                    eye,
                    set: pass.render_set.clone(),
                    textures: pass.mirrors.iter().map(|m| m.texture.copied()).collect(),
                },
            };
            self.calls.push(call);
            Ok(())
        }
    }

    struct Fixture {
        scene: Scene,
        mirror: NodeId,
        prop: NodeId,
        head: NodeId,
        surface: MirrorSurface<u32>,
        camera: Camera,
    }

    fn fixture(options: MirrorOptions) -> Fixture {
        let mut scene = Scene::new();
        let transform = Mat4::from_translation(Vec3::new(0.0, 2.0, -2.0));
        let prop = scene.add_mesh(
            "prop",
            MeshGeometry::cuboid(Vec3::splat(0.5), Vec4::ONE),
            Mat4::from_translation(Vec3::new(1.0, 0.5, 2.0)),
        );
        let mirror = scene.add_mirror("mirror", MeshGeometry::quad(3.0, 4.0, Vec4::ONE), transform);
        let head = scene.add_mesh(
            "head",
            MeshGeometry::cuboid(Vec3::splat(0.1), Vec4::ONE),
            Mat4::IDENTITY,
        );
        scene.add_empty("group", Mat4::IDENTITY);

        let mut surface = MirrorSurface::new(mirror, transform, options).unwrap();
        surface.add_reflection_only(head);
        surface.on_viewport_resized(320, 240);

        let mut camera = Camera::new(320.0 / 240.0);
        camera.look_at(Vec3::new(-1.0, 2.0, 6.0), Vec3::new(0.0, 2.0, -2.0), Vec3::Y);
        Fixture {
            scene,
            mirror,
            prop,
            head,
            surface,
            camera,
        }
    }

    fn stereo_options() -> MirrorOptions {
        MirrorOptions {
            stereo: StereoOptions {
                enabled: true,
                eye_separation: 0.064,
            },
            ..MirrorOptions::default()
        }
    }

    #[test]
    fn test_mono_frame_call_order() {
        let mut f = fixture(MirrorOptions::default());
        let mut renderer = RecordingRenderer::default();
        let mut pass = MirrorPass::new();
        let views = f.camera.eye_views(&f.surface.options().stereo);

        let report = pass
            .render_frame(&mut renderer, &mut f.surface, &f.scene, &views)
            .unwrap();
        assert_eq!(report.reflected_eyes, vec![Eye::Mono]);
        assert!(report.skipped_eyes.is_empty());
        assert_eq!(pass.stage(), PassStage::Idle);

        assert_eq!(renderer.calls.len(), 3);
        assert_eq!(renderer.calls[0], Call::Allocate(TargetSize::new(320, 240)));
        assert!(matches!(renderer.calls[1], Call::Offscreen { eye: Eye::Mono, target: 1, .. }));
        assert!(matches!(
            &renderer.calls[2],
            Call::Main { eye: Eye::Mono, textures, .. } if textures == &vec![Some(1)]
        ));
    }

    #[test]
    fn test_render_sets_exclude_mirror_and_head() {
        let mut f = fixture(MirrorOptions::default());
        let mut renderer = RecordingRenderer::default();
        let views = f.camera.eye_views(&StereoOptions::default());
        MirrorPass::new()
            .render_frame(&mut renderer, &mut f.surface, &f.scene, &views)
            .unwrap();

        let Call::Offscreen { set, .. } = &renderer.calls[1] else {
            panic!("expected offscreen pass");
        };
        assert!(!set.contains(f.mirror));
        assert!(set.contains(f.prop));
        assert!(set.contains(f.head));

        let Call::Main { set, .. } = &renderer.calls[2] else {
            panic!("expected main pass");
        };
        assert!(set.contains(f.mirror));
        assert!(set.contains(f.prop));
        assert!(!set.contains(f.head));
    }

    #[test]
    fn test_offscreen_uses_reflected_camera() {
        let mut f = fixture(MirrorOptions::default());
        let mut renderer = RecordingRenderer::default();
        let views = f.camera.eye_views(&StereoOptions::default());
        MirrorPass::new()
            .render_frame(&mut renderer, &mut f.surface, &f.scene, &views)
            .unwrap();

        let Call::Offscreen { camera, .. } = &renderer.calls[1] else {
            panic!("expected offscreen pass");
        };
        let expected = f.surface.plane().reflect_point(f.camera.position());
        assert!((camera.position - expected).length() < 1e-5);
        assert!((camera.position - Vec3::new(-1.0, 2.0, -10.0)).length() < 1e-5);
    }

    #[test]
    fn test_stereo_writes_precede_reads() {
        let mut f = fixture(stereo_options());
        let mut renderer = RecordingRenderer::default();
        let mut pass = MirrorPass::new().with_trace();
        let views = f.camera.eye_views(&f.surface.options().stereo);

        let report = pass
            .render_frame(&mut renderer, &mut f.surface, &f.scene, &views)
            .unwrap();
        assert_eq!(report.reflected_eyes, vec![Eye::Left, Eye::Right]);

        let trace = pass.trace().unwrap();
        assert!(trace.writes_precede_reads());
        assert_eq!(
            trace.events(),
            &[
                TraceEvent::TargetResized(Eye::Left),
                TraceEvent::OffscreenWrite(Eye::Left),
                TraceEvent::SamplingMatrixBuilt(Eye::Left),
                TraceEvent::MainTargetRestored(Eye::Left),
                TraceEvent::TargetResized(Eye::Right),
                TraceEvent::OffscreenWrite(Eye::Right),
                TraceEvent::SamplingMatrixBuilt(Eye::Right),
                TraceEvent::MainTargetRestored(Eye::Right),
                TraceEvent::MainRead(Eye::Left),
                TraceEvent::MainRead(Eye::Right),
            ]
        );

        // Each eye samples its own target.
        let main_textures: Vec<_> = renderer
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Main { eye, textures, .. } => Some((*eye, textures.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(
            main_textures,
            vec![(Eye::Left, vec![Some(1)]), (Eye::Right, vec![Some(2)])]
        );
    }

    #[test]
    fn test_trace_detects_late_write() {
        let trace = FrameTrace {
            events: vec![
                TraceEvent::OffscreenWrite(Eye::Mono),
                TraceEvent::MainRead(Eye::Mono),
                TraceEvent::OffscreenWrite(Eye::Mono),
            ],
        };
        assert!(!trace.writes_precede_reads());

        let unwritten = FrameTrace {
            events: vec![TraceEvent::MainRead(Eye::Left)],
        };
        assert!(!unwritten.writes_precede_reads());
    }

    #[test]
    fn test_same_size_frames_do_not_reallocate() {
        let mut f = fixture(MirrorOptions::default());
        let mut renderer = RecordingRenderer::default();
        let mut pass = MirrorPass::new().with_trace();
        let views = f.camera.eye_views(&StereoOptions::default());

        for _ in 0..3 {
            pass.render_frame(&mut renderer, &mut f.surface, &f.scene, &views)
                .unwrap();
        }
        f.surface.on_viewport_resized(320, 240);
        pass.render_frame(&mut renderer, &mut f.surface, &f.scene, &views)
            .unwrap();

        assert_eq!(renderer.allocations(), 1);
        assert_eq!(f.surface.target(Eye::Mono).unwrap().allocation_count(), 1);
        assert!(!pass
            .trace()
            .unwrap()
            .events()
            .contains(&TraceEvent::TargetResized(Eye::Mono)));
    }

    #[test]
    fn test_resize_reallocates_before_offscreen_render() {
        let mut f = fixture(MirrorOptions::default());
        let mut renderer = RecordingRenderer::default();
        let mut pass = MirrorPass::new().with_trace();
        let views = f.camera.eye_views(&StereoOptions::default());
        pass.render_frame(&mut renderer, &mut f.surface, &f.scene, &views)
            .unwrap();

        f.surface.on_viewport_resized(640, 480);
        renderer.calls.clear();
        pass.render_frame(&mut renderer, &mut f.surface, &f.scene, &views)
            .unwrap();

        assert_eq!(renderer.calls[0], Call::Allocate(TargetSize::new(640, 480)));
        assert!(matches!(renderer.calls[1], Call::Offscreen { target: 2, .. }));
        let events = pass.trace().unwrap().events();
        assert_eq!(events[0], TraceEvent::TargetResized(Eye::Mono));
        assert_eq!(events[1], TraceEvent::OffscreenWrite(Eye::Mono));
    }

    #[test]
    fn test_eye_behind_mirror_shows_tint() {
        let mut f = fixture(MirrorOptions::default());
        f.camera
            .look_at(Vec3::new(0.0, 2.0, -6.0), Vec3::new(0.0, 2.0, -2.0), Vec3::Y);
        let mut renderer = RecordingRenderer::default();
        let views = f.camera.eye_views(&StereoOptions::default());

        let report = MirrorPass::new()
            .render_frame(&mut renderer, &mut f.surface, &f.scene, &views)
            .unwrap();
        assert_eq!(report.skipped_eyes, vec![Eye::Mono]);
        assert_eq!(renderer.calls.len(), 1);
        assert!(matches!(
            &renderer.calls[0],
            Call::Main { textures, .. } if textures == &vec![None]
        ));
    }

    #[test]
    fn test_edge_on_eye_falls_back() {
        let mut f = fixture(MirrorOptions::default());
        // One unit in front of the mirror, looking along it.
        f.camera
            .look_at(Vec3::new(0.0, 2.0, -1.0), Vec3::new(5.0, 2.0, -1.0), Vec3::Y);
        let mut renderer = RecordingRenderer::default();
        let views = f.camera.eye_views(&StereoOptions::default());

        let report = MirrorPass::new()
            .render_frame(&mut renderer, &mut f.surface, &f.scene, &views)
            .unwrap();
        assert_eq!(report.fallback_eyes, vec![Eye::Mono]);
        assert_eq!(report.reflected_eyes, vec![Eye::Mono]);
    }

    #[test]
    fn test_allocation_failure_keeps_main_scene() {
        let mut f = fixture(MirrorOptions::default());
        let mut renderer = RecordingRenderer {
            fail_allocations: true,
            ..RecordingRenderer::default()
        };
        let mut pass = MirrorPass::new();
        let views = f.camera.eye_views(&StereoOptions::default());

        let report = pass
            .render_frame(&mut renderer, &mut f.surface, &f.scene, &views)
            .unwrap();
        assert!(matches!(report.mirror_status, SurfaceStatus::Failed(_)));
        assert_eq!(report.skipped_eyes, vec![Eye::Mono]);
        assert!(matches!(
            renderer.calls.last(),
            Some(Call::Main { textures, .. }) if textures == &vec![None]
        ));

        // No retry until the viewport changes.
        pass.render_frame(&mut renderer, &mut f.surface, &f.scene, &views)
            .unwrap();
        assert_eq!(renderer.allocations(), 1);

        renderer.fail_allocations = false;
        f.surface.on_viewport_resized(300, 200);
        let report = pass
            .render_frame(&mut renderer, &mut f.surface, &f.scene, &views)
            .unwrap();
        assert_eq!(report.mirror_status, SurfaceStatus::Ready);
        assert_eq!(report.reflected_eyes, vec![Eye::Mono]);
        assert_eq!(renderer.allocations(), 2);
    }

    #[test]
    fn test_oversized_target_fails_surface() {
        let options = MirrorOptions {
            max_target_dimension: 256,
            ..MirrorOptions::default()
        };
        let mut f = fixture(options);
        let mut renderer = RecordingRenderer::default();
        let views = f.camera.eye_views(&StereoOptions::default());
        let report = MirrorPass::new()
            .render_frame(&mut renderer, &mut f.surface, &f.scene, &views)
            .unwrap();
        assert!(!report.mirror_status.is_ready());
        assert_eq!(renderer.allocations(), 0);
    }

    #[test]
    fn test_hidden_mirror_renders_no_reflection() {
        let mut f = fixture(MirrorOptions::default());
        f.scene.get_mut(f.mirror).unwrap().visible = false;
        let mut renderer = RecordingRenderer::default();
        let views = f.camera.eye_views(&StereoOptions::default());
        let report = MirrorPass::new()
            .render_frame(&mut renderer, &mut f.surface, &f.scene, &views)
            .unwrap();
        assert_eq!(report.skipped_eyes, vec![Eye::Mono]);
        assert!(matches!(
            &renderer.calls[..],
            [Call::Main { textures, .. }] if textures.is_empty()
        ));
    }

    #[test]
    fn test_wrong_node_tag_is_an_error() {
        let f = fixture(MirrorOptions::default());
        let mut surface: MirrorSurface<u32> = MirrorSurface::new(
            f.prop,
            Mat4::IDENTITY,
            MirrorOptions::default(),
        )
        .unwrap();
        let mut renderer = RecordingRenderer::default();
        let views = f.camera.eye_views(&StereoOptions::default());
        let result = MirrorPass::new().render_frame(&mut renderer, &mut surface, &f.scene, &views);
        assert!(matches!(result, Err(RenderError::Core(_))));
        assert!(renderer.calls.is_empty());
    }

    #[test]
    fn test_mirror_move_applies_at_frame_start() {
        let mut f = fixture(MirrorOptions::default());
        let moved = Mat4::from_translation(Vec3::new(0.0, 2.0, -4.0));
        f.surface.set_transform(moved).unwrap();
        let mut renderer = RecordingRenderer::default();
        let views = f.camera.eye_views(&StereoOptions::default());
        MirrorPass::new()
            .render_frame(&mut renderer, &mut f.surface, &f.scene, &views)
            .unwrap();

        let Call::Offscreen { camera, .. } = &renderer.calls[1] else {
            panic!("expected offscreen pass");
        };
        assert!((camera.position - Vec3::new(-1.0, 2.0, -14.0)).length() < 1e-5);
    }
}
