//! Rendering backend for reflector-rs.
//!
//! This crate turns the plane math of `reflector-core` into a working planar
//! mirror:
//! - Viewer [`Camera`] and per-eye views
//! - Reflection camera derivation and oblique near-plane clipping
//! - Projective texture lookup into the reflection
//! - Offscreen [`ReflectionTarget`]s and the [`MirrorSurface`] that owns them
//! - The [`MirrorPass`] orchestrator, written against the [`SceneRenderer`]
//!   trait
//! - A headless wgpu [`RenderEngine`] implementing that trait

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Pixel sizes are converted between integer and float freely
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod buffer;
pub mod camera;
pub mod engine;
pub mod error;
pub mod mirror_pass;
pub mod mirror_surface;
pub mod oblique;
pub mod reflection;
pub mod reflection_target;
pub mod screenshot;
pub mod texture_projector;

pub use backend::{MirrorBinding, RenderDestination, ScenePass, SceneRenderer, ViewCamera};
pub use camera::{Camera, EyeView};
pub use engine::{CameraUniforms, GpuTarget, MirrorUniforms, NodeUniforms, RenderEngine};
pub use error::{RenderError, RenderResult};
pub use mirror_pass::{FrameReport, FrameTrace, MirrorPass, PassStage, TraceEvent};
pub use mirror_surface::{EyeShading, MirrorSurface, SurfaceStatus};
pub use oblique::{oblique_projection, ClipState, ObliqueClip, OBLIQUE_EPSILON};
pub use reflection::{is_facing, reflect_pose, VirtualCamera};
pub use reflection_target::{ReflectionTarget, TargetAllocator, TargetSize};
pub use screenshot::{save_image, save_to_buffer, ScreenshotError};
pub use texture_projector::{is_inside_unit_square, project_to_texture, sampling_matrix, SAMPLE_BIAS};
