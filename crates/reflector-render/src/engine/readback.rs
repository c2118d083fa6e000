//! Pixel readback from render targets.

use reflector_core::Eye;

use super::{GpuTarget, RenderEngine};
use crate::error::{RenderError, RenderResult};

impl RenderEngine {
    /// Reads the visible frame of `eye` as tightly packed RGBA rows.
    pub fn read_main_target(&self, eye: Eye) -> RenderResult<Vec<u8>> {
        let target = self
            .main_target(eye)
            .ok_or(RenderError::MissingTarget(eye))?;
        self.read_target(target)
    }

    /// Reads any render target as tightly packed RGBA rows.
    pub fn read_target(&self, target: &GpuTarget) -> RenderResult<Vec<u8>> {
        let size = target.size();
        let bytes_per_row = Self::aligned_bytes_per_row(size.width);

        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("readback buffer"),
            size: u64::from(bytes_per_row) * u64::from(size.height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("readback copy encoder"),
            });

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: target.color_texture(),
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: Some(size.height),
                },
            },
            wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(std::iter::once(encoder.finish()));

        // Map buffer and read data
        let buffer_slice = buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = self.device.poll(wgpu::PollType::wait_indefinitely());
        rx.recv()
            .map_err(|_| RenderError::BufferMapFailed)?
            .map_err(|_| RenderError::BufferMapFailed)?;

        // Copy data, removing row padding
        let data = buffer_slice.get_mapped_range();
        let row_bytes = (size.width * 4) as usize;
        let mut result = Vec::with_capacity(row_bytes * size.height as usize);
        for row in 0..size.height {
            let start = (row * bytes_per_row) as usize;
            result.extend_from_slice(&data[start..start + row_bytes]);
        }

        drop(data);
        buffer.unmap();

        Ok(result)
    }

    /// Row pitch of a readback buffer for an RGBA8 image `width` pixels wide.
    pub(crate) fn aligned_bytes_per_row(width: u32) -> u32 {
        let unpadded = width * 4;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        unpadded.div_ceil(align) * align
    }
}
