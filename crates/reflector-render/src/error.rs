//! Rendering error types.

use reflector_core::ReflectorError;
use thiserror::Error;

/// Errors that can occur during rendering operations.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to create wgpu adapter.
    #[error("failed to create graphics adapter")]
    AdapterCreationFailed,

    /// Failed to create wgpu device.
    #[error("failed to create graphics device: {0}")]
    DeviceCreationFailed(#[from] wgpu::RequestDeviceError),

    /// An offscreen reflection target could not be allocated.
    #[error("reflection target allocation failed for {width}x{height}: {reason}")]
    TargetAllocation {
        width: u32,
        height: u32,
        reason: String,
    },

    /// A scene pass referenced a node the renderer has no data for.
    #[error("scene node {0} has not been uploaded")]
    MissingNodeData(u32),

    /// Nothing has been rendered for this eye yet.
    #[error("no frame has been rendered for the {0} eye")]
    MissingTarget(reflector_core::Eye),

    /// Mapping a readback buffer failed.
    #[error("GPU buffer mapping failed")]
    BufferMapFailed,

    /// Saving a capture failed.
    #[error("failed to save capture: {0}")]
    Screenshot(#[from] crate::screenshot::ScreenshotError),

    /// Scene or option error from the core crate.
    #[error(transparent)]
    Core(#[from] ReflectorError),
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
