//! Scene upload and scene passes.

use reflector_core::{NodeId, NodeTag, Scene};

use super::{CameraUniforms, GpuNode, GpuTarget, MirrorUniforms, NodeUniforms, RenderEngine};
use crate::backend::{RenderDestination, ScenePass, SceneRenderer};
use crate::buffer::{
    create_index_buffer, create_position_buffer, create_uniform_buffer, update_uniform_buffer,
};
use crate::error::{RenderError, RenderResult};
use crate::reflection_target::{TargetAllocator, TargetSize};

impl RenderEngine {
    /// Uploads new nodes, refreshes transforms and colors of known ones and
    /// drops nodes that left the scene.
    pub fn sync_scene(&mut self, scene: &Scene) {
        self.nodes.retain(|id, _| scene.get(*id).is_some());

        for (id, node) in scene.iter() {
            let Some(geometry) = node.geometry() else {
                continue;
            };
            let uniforms = NodeUniforms::new(node.transform, geometry.color);

            if let Some(gpu) = self.nodes.get(&id) {
                update_uniform_buffer(&self.queue, &gpu.uniform_buffer, &uniforms);
                continue;
            }

            let label = format!("{} {id}", node.name);
            let vertex_buffer =
                create_position_buffer(&self.device, &geometry.positions, Some(&label));
            let index_buffer = create_index_buffer(&self.device, &geometry.indices, Some(&label));
            let uniform_buffer = create_uniform_buffer(&self.device, &uniforms, Some(&label));
            let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&label),
                layout: &self.node_bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });
            let mirror_buffer = (node.tag() == NodeTag::Mirror).then(|| {
                create_uniform_buffer(
                    &self.device,
                    &MirrorUniforms::new(glam::Mat4::IDENTITY, geometry.color, false),
                    Some(&format!("{label} mirror")),
                )
            });

            #[allow(clippy::cast_possible_truncation)]
            let index_count = geometry.indices.len() as u32;
            self.nodes.insert(
                id,
                GpuNode {
                    vertex_buffer,
                    index_buffer,
                    index_count,
                    uniform_buffer,
                    bind_group,
                    mirror_buffer,
                },
            );
            log::debug!("uploaded {} '{}' ({id})", node.tag().name(), node.name);
        }
    }

    /// Builds the material bind group of each mirror in `pass`.
    fn mirror_bind_groups(
        &self,
        pass: &ScenePass<'_, GpuTarget>,
    ) -> RenderResult<Vec<(NodeId, wgpu::BindGroup)>> {
        pass.mirrors
            .iter()
            .map(|binding| {
                let buffer = self
                    .nodes
                    .get(&binding.node)
                    .and_then(|node| node.mirror_buffer.as_ref())
                    .ok_or(RenderError::MissingNodeData(binding.node.0))?;
                update_uniform_buffer(
                    &self.queue,
                    buffer,
                    &MirrorUniforms::new(
                        binding.sampling_matrix,
                        binding.tint,
                        binding.texture.is_some(),
                    ),
                );
                let view = binding
                    .texture
                    .map_or(&self.placeholder_view, GpuTarget::color_view);
                let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("mirror bind group"),
                    layout: &self.mirror_bind_group_layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: buffer.as_entire_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::TextureView(view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 2,
                            resource: wgpu::BindingResource::Sampler(&self.reflection_sampler),
                        },
                    ],
                });
                Ok((binding.node, bind_group))
            })
            .collect()
    }
}

impl TargetAllocator for RenderEngine {
    type Target = GpuTarget;

    fn allocate_target(&mut self, size: TargetSize, label: &str) -> RenderResult<GpuTarget> {
        let limit = self.max_texture_dimension();
        if size.max_side() > limit {
            return Err(RenderError::TargetAllocation {
                width: size.width,
                height: size.height,
                reason: format!("device limit is {limit}"),
            });
        }
        Ok(GpuTarget::new(&self.device, size, label))
    }
}

impl SceneRenderer for RenderEngine {
    fn render_scene(&mut self, pass: ScenePass<'_, GpuTarget>) -> RenderResult<()> {
        if let RenderDestination::Main { eye } = pass.destination {
            self.ensure_main_target(eye);
        }
        let target = match &pass.destination {
            RenderDestination::Offscreen { target, .. } => *target,
            RenderDestination::Main { eye } => &self.main_targets[eye.index()],
        };

        // Uniform writes are applied before the submit below, so every pass
        // sees its own camera.
        update_uniform_buffer(
            &self.queue,
            &self.camera_buffer,
            &CameraUniforms::from(&pass.camera),
        );
        let mirror_groups = self.mirror_bind_groups(&pass)?;

        let label = if pass.destination.is_main() {
            "main scene pass"
        } else {
            "reflection pass"
        };
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) });

        {
            let bg = self.background_color;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(label),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.color_view(),
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(bg.x),
                            g: f64::from(bg.y),
                            b: f64::from(bg.z),
                            a: f64::from(bg.w),
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: target.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            for id in pass.render_set.iter() {
                let node = self
                    .nodes
                    .get(&id)
                    .ok_or(RenderError::MissingNodeData(id.0))?;

                // Mirrors without a binding (other mirrors inside a
                // reflection) draw with their flat color.
                match mirror_groups.iter().find(|(mirror, _)| *mirror == id) {
                    Some((_, group)) => {
                        render_pass.set_pipeline(&self.mirror_pipeline);
                        render_pass.set_bind_group(2, group, &[]);
                    }
                    None => render_pass.set_pipeline(&self.mesh_pipeline),
                }
                render_pass.set_bind_group(1, &node.bind_group, &[]);
                render_pass.set_vertex_buffer(0, node.vertex_buffer.slice(..));
                render_pass.set_index_buffer(node.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..node.index_count, 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        log::trace!(
            "{label}: {} node(s) for {} eye",
            pass.render_set.len(),
            pass.destination.eye()
        );
        Ok(())
    }
}
