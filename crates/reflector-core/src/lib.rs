//! Core abstractions for reflector-rs.
//!
//! This crate holds the renderer-agnostic pieces of a planar mirror:
//! - [`Plane`] geometry and point/direction reflection
//! - [`Pose`] and [`Eye`] for mono and stereo viewers
//! - [`MirrorOptions`] configuration
//! - A small [`Scene`] graph with capability tags and explicit [`RenderSet`]s

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Color channels and pixel sizes are converted between integer and float freely
#![allow(clippy::cast_precision_loss)]

pub mod error;
pub mod options;
pub mod plane;
pub mod pose;
pub mod scene;

pub use error::{ReflectorError, Result};
pub use options::{tint_from_hex, MirrorOptions, StereoOptions, DEFAULT_CLIP_BIAS, DEFAULT_TINT};
pub use plane::Plane;
pub use pose::{Eye, Pose};
pub use scene::{MeshGeometry, NodeId, NodeTag, RenderSet, Scene, SceneNode};

// Re-export glam types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
