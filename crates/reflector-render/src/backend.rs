//! The interface between the mirror pass and whatever draws the scene.
//!
//! The mirror pass never issues draw calls itself. It asks a [`SceneRenderer`]
//! to draw a [`RenderSet`] with a given camera into either an offscreen
//! reflection target or the main target, and tells it how to shade the mirror
//! nodes it encounters.

use glam::{Mat4, Vec3, Vec4};
use reflector_core::{Eye, NodeId, RenderSet};

use crate::error::RenderResult;
use crate::reflection_target::TargetAllocator;

/// Camera matrices for one scene pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewCamera {
    pub view: Mat4,
    pub projection: Mat4,
    pub position: Vec3,
}

impl ViewCamera {
    /// Combined view-projection matrix.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Where a scene pass draws.
#[derive(Debug)]
pub enum RenderDestination<'a, T> {
    /// An eye's offscreen reflection target.
    Offscreen { eye: Eye, target: &'a T },
    /// The visible frame for an eye.
    Main { eye: Eye },
}

impl<T> RenderDestination<'_, T> {
    /// The eye being rendered.
    pub fn eye(&self) -> Eye {
        match self {
            RenderDestination::Offscreen { eye, .. } | RenderDestination::Main { eye } => *eye,
        }
    }

    /// Whether this is the main target.
    pub fn is_main(&self) -> bool {
        matches!(self, RenderDestination::Main { .. })
    }
}

/// How to shade one mirror node during a main pass.
#[derive(Debug)]
pub struct MirrorBinding<'a, T> {
    pub node: NodeId,
    pub eye: Eye,
    /// World to reflection-texture coordinates.
    pub sampling_matrix: Mat4,
    /// Reflection rendered for this eye this frame. `None` draws the tint.
    pub texture: Option<&'a T>,
    pub tint: Vec4,
}

/// One request to draw part of the scene.
#[derive(Debug)]
pub struct ScenePass<'a, T> {
    pub destination: RenderDestination<'a, T>,
    pub camera: ViewCamera,
    pub render_set: &'a RenderSet,
    /// Mirror shading for the nodes in `render_set`. Empty for offscreen
    /// passes.
    pub mirrors: Vec<MirrorBinding<'a, T>>,
}

/// Host collaborator that renders arbitrary subsets of the scene.
///
/// Passes are issued in program order and an implementation must make each
/// pass's writes visible to every later pass.
pub trait SceneRenderer: TargetAllocator {
    /// Draws `pass.render_set` into `pass.destination`.
    fn render_scene(&mut self, pass: ScenePass<'_, Self::Target>) -> RenderResult<()>;
}
