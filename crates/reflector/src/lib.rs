//! reflector-rs: real-time planar mirrors for wgpu scenes.
//!
//! A mirror is rendered in two steps every frame. The scene is first drawn
//! from a camera reflected across the mirror plane, with an oblique near
//! plane that discards everything behind the glass. The mirror quad is then
//! drawn in the main pass, sampling that image through a projective texture
//! matrix so the reflection stays glued to the surface.
//!
//! # Quick Start
//!
//! ```no_run
//! use reflector_rs::*;
//!
//! fn main() -> RenderResult<()> {
//!     init();
//!     let mut viewer = Viewer::demo(1280, 720, demo::demo_options(), 7)?;
//!     viewer.render_frame()?;
//!     save_image("mirror.png", &viewer.capture()?, 1280, 720)?;
//!     Ok(())
//! }
//! ```
//!
//! # Stereo
//!
//! With [`StereoOptions::enabled`] set, each eye gets its own reflection
//! camera and offscreen target, so the reflection keeps correct parallax.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// Viewport sizes become aspect ratios and scene coordinates
#![allow(clippy::cast_precision_loss)]

pub mod demo;
mod headless;
mod viewer;

pub use reflector_core::{
    tint_from_hex, Eye, Mat4, MeshGeometry, MirrorOptions, NodeId, NodeTag, Plane, Pose, Quat,
    ReflectorError, RenderSet, Scene, SceneNode, StereoOptions, Vec2, Vec3, Vec4,
};
pub use reflector_render::{
    is_facing, oblique_projection, project_to_texture, reflect_pose, sampling_matrix, save_image,
    Camera, ClipState, EyeView, FrameReport, FrameTrace, GpuTarget, MirrorBinding, MirrorPass,
    MirrorSurface, PassStage, RenderDestination, RenderEngine, RenderError, RenderResult,
    ScenePass, SceneRenderer, SurfaceStatus, TargetAllocator, TargetSize, TraceEvent, ViewCamera,
    VirtualCamera,
};

pub use headless::{render_to_file, render_to_image};
pub use viewer::Viewer;

/// Installs the `env_logger` backend for the `log` facade.
///
/// Safe to call more than once; later calls keep the first logger.
pub fn init() {
    let _ = env_logger::try_init();
    log::info!("reflector-rs initialized");
}
