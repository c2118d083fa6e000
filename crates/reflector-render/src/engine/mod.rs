//! The headless wgpu rendering engine.

mod pipelines;
mod readback;
mod rendering;
mod textures;

use std::collections::HashMap;

use glam::{Mat4, Vec4};
use reflector_core::{Eye, NodeId};

use crate::backend::ViewCamera;
use crate::error::{RenderError, RenderResult};
use crate::reflection_target::TargetSize;

pub use textures::GpuTarget;

/// Color format of every render target.
pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
/// Depth format of every render target.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Camera uniforms for GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
}

impl Default for CameraUniforms {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            camera_pos: [0.0, 0.0, 5.0, 1.0],
        }
    }
}

impl From<&ViewCamera> for CameraUniforms {
    fn from(camera: &ViewCamera) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            camera_pos: camera.position.extend(1.0).to_array(),
        }
    }
}

/// Per-node uniforms: model matrix and flat color.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct NodeUniforms {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl NodeUniforms {
    pub fn new(model: Mat4, color: Vec4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: color.to_array(),
        }
    }
}

/// Mirror material uniforms.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MirrorUniforms {
    pub sampling: [[f32; 4]; 4],
    pub tint: [f32; 4],
    /// `x` is 1.0 when a reflection texture is bound.
    pub flags: [f32; 4],
}

impl MirrorUniforms {
    pub fn new(sampling: Mat4, tint: Vec4, has_reflection: bool) -> Self {
        Self {
            sampling: sampling.to_cols_array_2d(),
            tint: tint.to_array(),
            flags: [if has_reflection { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

/// GPU copy of one drawable scene node.
pub(crate) struct GpuNode {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    /// Material uniforms, only for mirror nodes.
    pub(crate) mirror_buffer: Option<wgpu::Buffer>,
}

/// The main rendering engine backed by wgpu.
pub struct RenderEngine {
    /// The wgpu device.
    pub device: wgpu::Device,
    /// The wgpu queue.
    pub queue: wgpu::Queue,
    /// Main target width.
    pub width: u32,
    /// Main target height.
    pub height: u32,
    /// Clear color of every pass, in linear channels.
    pub background_color: Vec4,
    /// Visible frame per eye, indexed by [`Eye::index`].
    main_targets: Vec<GpuTarget>,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    node_bind_group_layout: wgpu::BindGroupLayout,
    mirror_bind_group_layout: wgpu::BindGroupLayout,
    mesh_pipeline: wgpu::RenderPipeline,
    mirror_pipeline: wgpu::RenderPipeline,
    reflection_sampler: wgpu::Sampler,
    /// Bound in place of a reflection that was not rendered.
    placeholder_view: wgpu::TextureView,
    nodes: HashMap<NodeId, GpuNode>,
}

impl RenderEngine {
    /// Creates a new headless render engine (no window/surface required).
    ///
    /// Useful for integration tests and batch rendering.
    pub async fn new_headless(width: u32, height: u32) -> RenderResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..wgpu::InstanceDescriptor::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| RenderError::AdapterCreationFailed)?;
        log::info!("using adapter {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("reflector device (headless)"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
            })
            .await?;

        let width = width.max(1);
        let height = height.max(1);

        let camera_bind_group_layout = Self::create_camera_bind_group_layout(&device);
        let node_bind_group_layout = Self::create_node_bind_group_layout(&device);
        let mirror_bind_group_layout = Self::create_mirror_bind_group_layout(&device);

        let camera_buffer = crate::buffer::create_uniform_buffer(
            &device,
            &CameraUniforms::default(),
            Some("camera uniforms"),
        );
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera bind group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let mesh_pipeline =
            Self::create_mesh_pipeline(&device, &camera_bind_group_layout, &node_bind_group_layout);
        let mirror_pipeline = Self::create_mirror_pipeline(
            &device,
            &camera_bind_group_layout,
            &node_bind_group_layout,
            &mirror_bind_group_layout,
        );

        let reflection_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("reflection sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let placeholder_view = textures::create_placeholder_texture(&device, &queue);

        let main_target = GpuTarget::new(&device, TargetSize::new(width, height), "main target");

        log::debug!("headless engine ready at {width}x{height}");
        Ok(Self {
            device,
            queue,
            width,
            height,
            background_color: reflector_core::tint_from_hex(0x0087_ceeb),
            main_targets: vec![main_target],
            camera_buffer,
            camera_bind_group,
            node_bind_group_layout,
            mirror_bind_group_layout,
            mesh_pipeline,
            mirror_pipeline,
            reflection_sampler,
            placeholder_view,
            nodes: HashMap::new(),
        })
    }

    /// Resizes the main targets.
    pub fn resize(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        let size = TargetSize::new(width, height);
        for (index, target) in self.main_targets.iter_mut().enumerate() {
            *target = GpuTarget::new(&self.device, size, &format!("main target {index}"));
        }
        log::debug!("main targets resized to {size}");
    }

    /// Size of the main targets.
    pub fn size(&self) -> TargetSize {
        TargetSize::new(self.width, self.height)
    }

    /// Main target of `eye`, if it has been rendered to.
    pub fn main_target(&self, eye: Eye) -> Option<&GpuTarget> {
        self.main_targets.get(eye.index())
    }

    /// Creates main targets up to `eye`.
    pub(crate) fn ensure_main_target(&mut self, eye: Eye) {
        let size = self.size();
        while self.main_targets.len() <= eye.index() {
            let label = format!("main target {}", self.main_targets.len());
            self.main_targets
                .push(GpuTarget::new(&self.device, size, &label));
        }
    }

    /// Largest texture side the device accepts.
    pub fn max_texture_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    /// Number of uploaded scene nodes.
    pub fn uploaded_node_count(&self) -> usize {
        self.nodes.len()
    }
}
