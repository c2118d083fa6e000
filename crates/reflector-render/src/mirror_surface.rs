//! A planar mirror placed in the scene.
//!
//! The surface owns its plane, its per-eye offscreen targets and the per-eye
//! shading state the main pass binds when drawing it. Everything per-frame is
//! reset by [`MirrorSurface::begin_frame`] and rebuilt by the mirror pass.

use glam::{Mat4, Vec2, Vec4};
use reflector_core::{Eye, MeshGeometry, MirrorOptions, NodeId, Plane, Result, Scene};

use crate::backend::MirrorBinding;
use crate::reflection_target::{ReflectionTarget, TargetSize};

/// Whether the surface can produce reflections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceStatus {
    Ready,
    /// Target allocation failed. The surface shows its tint until the
    /// viewport size changes.
    Failed(String),
}

impl SurfaceStatus {
    /// Returns true if the surface is ready.
    pub fn is_ready(&self) -> bool {
        matches!(self, SurfaceStatus::Ready)
    }
}

/// Shading inputs for one eye of the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeShading {
    /// World to reflection-texture coordinates.
    pub sampling_matrix: Mat4,
    /// Whether a reflection was rendered for this eye this frame.
    pub has_reflection: bool,
}

impl EyeShading {
    /// Shading for an eye with nothing to sample.
    pub const TINT_ONLY: Self = Self {
        sampling_matrix: Mat4::IDENTITY,
        has_reflection: false,
    };
}

/// A planar mirror and its reflection resources.
#[derive(Debug)]
pub struct MirrorSurface<T> {
    node: NodeId,
    transform: Mat4,
    plane: Plane,
    pending: Option<(Mat4, Plane)>,
    options: MirrorOptions,
    targets: Vec<ReflectionTarget<T>>,
    shading: Vec<EyeShading>,
    requested_size: Option<TargetSize>,
    failed_size: Option<TargetSize>,
    status: SurfaceStatus,
    reflection_only: Vec<NodeId>,
}

impl<T> MirrorSurface<T> {
    /// Adds a mirror node to `scene` and creates its surface.
    ///
    /// `extent` is the width and height of the reflective quad in the node's
    /// local XY plane; the quad faces local +Z and carries the tint.
    pub fn spawn(
        scene: &mut Scene,
        name: impl Into<String>,
        transform: Mat4,
        extent: Vec2,
        options: MirrorOptions,
    ) -> Result<Self> {
        options.validate()?;
        Plane::from_transform(transform)?;
        let geometry = MeshGeometry::quad(extent.x, extent.y, options.tint);
        let node = scene.add_mirror(name, geometry, transform);
        Self::new(node, transform, options)
    }

    /// Creates a surface for an existing mirror node.
    pub fn new(node: NodeId, transform: Mat4, options: MirrorOptions) -> Result<Self> {
        options.validate()?;
        let plane = Plane::from_transform(transform)?;
        let eye_count = options.eye_count();
        let targets = (0..eye_count)
            .map(|i| ReflectionTarget::new(format!("mirror {node} eye {i}")))
            .collect();
        log::debug!("created mirror surface {node} with {eye_count} eye target(s)");
        Ok(Self {
            node,
            transform,
            plane,
            pending: None,
            options,
            targets,
            shading: vec![EyeShading::TINT_ONLY; eye_count],
            requested_size: None,
            failed_size: None,
            status: SurfaceStatus::Ready,
            reflection_only: Vec::new(),
        })
    }

    /// Scene node carrying the mirror geometry.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The mirror plane used by the current frame.
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// World transform used by the current frame.
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    /// Moves the mirror. The new plane takes effect at the next frame.
    pub fn set_transform(&mut self, transform: Mat4) -> Result<()> {
        let plane = Plane::from_transform(transform)?;
        self.pending = Some((transform, plane));
        Ok(())
    }

    /// Starts a frame: applies a pending transform and clears last frame's
    /// shading.
    pub fn begin_frame(&mut self) {
        if let Some((transform, plane)) = self.pending.take() {
            self.transform = transform;
            self.plane = plane;
            log::debug!("mirror {} plane updated to {:?}", self.node, self.plane);
        }
        self.shading.fill(EyeShading::TINT_ONLY);
    }

    /// Records the viewport size the next offscreen render must match.
    ///
    /// A surface whose allocation failed becomes ready again once a size
    /// different from the failed one is announced.
    pub fn on_viewport_resized(&mut self, width: u32, height: u32) {
        let size = TargetSize::from_viewport(width, height, &self.options);
        if self.failed_size.is_some_and(|failed| failed != size) {
            log::info!("mirror {} retrying target allocation at {size}", self.node);
            self.failed_size = None;
            self.status = SurfaceStatus::Ready;
        }
        self.requested_size = Some(size);
    }

    /// Target size requested by the last viewport notification.
    pub fn requested_size(&self) -> Option<TargetSize> {
        self.requested_size
    }

    /// Eyes this surface is configured for.
    pub fn eyes(&self) -> Vec<Eye> {
        if self.options.stereo.enabled {
            vec![Eye::Left, Eye::Right]
        } else {
            vec![Eye::Mono]
        }
    }

    /// Offscreen target of `eye`.
    pub fn target(&self, eye: Eye) -> Option<&ReflectionTarget<T>> {
        self.targets.get(eye.index())
    }

    /// Offscreen target of `eye`, created if the host renders more eyes than
    /// configured.
    pub(crate) fn target_mut(&mut self, eye: Eye) -> &mut ReflectionTarget<T> {
        let index = eye.index();
        while self.targets.len() <= index {
            let label = format!("mirror {} eye {}", self.node, self.targets.len());
            self.targets.push(ReflectionTarget::new(label));
        }
        &mut self.targets[index]
    }

    /// Shading state of `eye` for the current frame.
    pub fn shading(&self, eye: Eye) -> EyeShading {
        self.shading
            .get(eye.index())
            .copied()
            .unwrap_or(EyeShading::TINT_ONLY)
    }

    pub(crate) fn set_shading(&mut self, eye: Eye, shading: EyeShading) {
        let index = eye.index();
        if self.shading.len() <= index {
            self.shading.resize(index + 1, EyeShading::TINT_ONLY);
        }
        self.shading[index] = shading;
    }

    /// What the main pass binds when drawing this mirror for `eye`.
    pub fn binding(&self, eye: Eye) -> MirrorBinding<'_, T> {
        let shading = self.shading(eye);
        let texture = if shading.has_reflection {
            self.target(eye).and_then(ReflectionTarget::texture)
        } else {
            None
        };
        MirrorBinding {
            node: self.node,
            eye,
            sampling_matrix: shading.sampling_matrix,
            texture,
            tint: self.options.tint,
        }
    }

    pub fn status(&self) -> &SurfaceStatus {
        &self.status
    }

    pub(crate) fn mark_failed(&mut self, size: TargetSize, reason: String) {
        self.failed_size = Some(size);
        self.status = SurfaceStatus::Failed(reason);
    }

    pub fn options(&self) -> &MirrorOptions {
        &self.options
    }

    pub fn tint(&self) -> Vec4 {
        self.options.tint
    }

    /// Marks `node` as visible only in this mirror's reflection, like a
    /// stand-in for the viewer's own head.
    pub fn add_reflection_only(&mut self, node: NodeId) {
        if !self.reflection_only.contains(&node) {
            self.reflection_only.push(node);
        }
    }

    /// Nodes drawn only in the reflection.
    pub fn reflection_only(&self) -> &[NodeId] {
        &self.reflection_only
    }
}
