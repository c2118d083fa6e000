//! One-shot headless rendering of the demo scene.
//!
//! Useful for integration tests, batch processing and automated
//! screenshots.

use std::path::Path;

use reflector_render::{save_image, RenderResult};

use crate::{demo, Viewer};

/// Seed used for the scene rendered by [`render_to_image`].
pub const DEFAULT_SEED: u64 = 1;

/// Renders one frame of the demo scene to a file.
///
/// The format is picked from the extension (PNG or JPEG).
pub fn render_to_file(path: impl AsRef<Path>, width: u32, height: u32) -> RenderResult<()> {
    let data = render_to_image(width, height)?;
    save_image(path, &data, width, height)?;
    Ok(())
}

/// Renders one frame of the demo scene to a raw RGBA pixel buffer.
///
/// The buffer holds `width * height * 4` bytes, row by row from the top-left
/// pixel.
pub fn render_to_image(width: u32, height: u32) -> RenderResult<Vec<u8>> {
    let mut viewer = Viewer::demo(width, height, demo::demo_options(), DEFAULT_SEED)?;
    let report = viewer.render_frame()?;
    log::debug!(
        "headless frame at {width}x{height}: reflected {:?}, skipped {:?}",
        report.reflected_eyes,
        report.skipped_eyes
    );
    viewer.capture()
}
