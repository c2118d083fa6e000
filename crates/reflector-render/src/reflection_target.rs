//! Offscreen render targets owned by a mirror surface.

use reflector_core::MirrorOptions;

use crate::error::{RenderError, RenderResult};

/// Pixel dimensions of an offscreen target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    /// Creates a size, clamping each side to at least one pixel.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Target size for a viewport of `width` x `height` logical pixels.
    ///
    /// The viewport is scaled by the resolution multiplier and the display
    /// pixel ratio, then rounded.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_viewport(width: u32, height: u32, options: &MirrorOptions) -> Self {
        let scale = options.resolution_multiplier * options.pixel_ratio;
        let side = |v: u32| (v as f32 * scale).round().max(1.0) as u32;
        Self::new(side(width), side(height))
    }

    /// The longer side.
    #[must_use]
    pub fn max_side(&self) -> u32 {
        self.width.max(self.height)
    }
}

impl std::fmt::Display for TargetSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Creates offscreen color + depth targets.
pub trait TargetAllocator {
    /// Handle to one allocated target.
    type Target;

    /// Allocates a target of exactly `size`.
    fn allocate_target(&mut self, size: TargetSize, label: &str) -> RenderResult<Self::Target>;
}

/// One eye's offscreen target, allocated lazily and on size changes.
#[derive(Debug)]
pub struct ReflectionTarget<T> {
    label: String,
    size: Option<TargetSize>,
    texture: Option<T>,
    allocation_count: u32,
}

impl<T> ReflectionTarget<T> {
    /// Creates an empty target; nothing is allocated until [`Self::ensure_size`].
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            size: None,
            texture: None,
            allocation_count: 0,
        }
    }

    /// Makes sure the target has exactly `size`.
    ///
    /// Returns `Ok(false)` without touching the allocator when the current
    /// texture already matches, `Ok(true)` after a (re)allocation. Sizes
    /// larger than `max_dimension` on either side fail without calling the
    /// allocator. On failure the previous texture is released.
    pub fn ensure_size<A>(
        &mut self,
        allocator: &mut A,
        size: TargetSize,
        max_dimension: u32,
    ) -> RenderResult<bool>
    where
        A: TargetAllocator<Target = T> + ?Sized,
    {
        if self.texture.is_some() && self.size == Some(size) {
            return Ok(false);
        }

        self.texture = None;
        self.size = None;

        if size.max_side() > max_dimension {
            return Err(RenderError::TargetAllocation {
                width: size.width,
                height: size.height,
                reason: format!("exceeds maximum dimension {max_dimension}"),
            });
        }

        let texture = allocator.allocate_target(size, &self.label)?;
        self.texture = Some(texture);
        self.size = Some(size);
        self.allocation_count += 1;
        log::debug!("allocated reflection target '{}' at {size}", self.label);
        Ok(true)
    }

    /// Current size, if allocated.
    pub fn size(&self) -> Option<TargetSize> {
        self.size
    }

    /// The allocated texture, if any.
    pub fn texture(&self) -> Option<&T> {
        self.texture.as_ref()
    }

    /// Number of successful allocations so far.
    pub fn allocation_count(&self) -> u32 {
        self.allocation_count
    }

    /// Debug label passed to the allocator.
    pub fn label(&self) -> &str {
        &self.label
    }
}
