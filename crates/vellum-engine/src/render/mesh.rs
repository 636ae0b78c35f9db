use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::DrawList;

use super::batch::{MeshBatch, MeshVertex};
use super::common::{clip_to_scissor, premul_alpha_blend, ViewUniform, VIEW_UNIFORM_SIZE};
use super::ramp::{MAX_RAMP_ROWS, RAMP_WIDTH};

/// Renders tessellated fills and strokes.
///
/// Each frame the draw list is flattened into one vertex/index stream
/// (vertices pre-transformed to surface pixels) and drawn in a single
/// pass that first clears to the frame's clear color. The vertex shader
/// applies the view projection; the fragment shader evaluates solid
/// paints directly and gradients by sampling their baked ramp row.
/// Colors are linear premultiplied RGBA.
#[derive(Default)]
pub struct MeshRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    bind_group_generation: u64,
    view_ubo: Option<wgpu::Buffer>,

    ramp_texture: Option<wgpu::Texture>,
    ramp_view: Option<wgpu::TextureView>,
    ramp_rows: u32,
    ramp_generation: u64,
    sampler: Option<wgpu::Sampler>,

    vertex_buffer: Option<wgpu::Buffer>,
    vertex_capacity: usize,
    index_buffer: Option<wgpu::Buffer>,
    index_capacity: usize,

    batch: MeshBatch,
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears `target` to `clear` and draws `draw_list` on top.
    ///
    /// Returns the number of triangles submitted.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        clear: Color,
        draw_list: &mut DrawList,
    ) -> usize {
        self.ensure_pipeline(ctx);
        self.ensure_sampler(ctx);

        self.batch.rebuild(draw_list);
        self.ensure_ramp_texture(ctx, self.batch.ramps.rows());
        self.ensure_bindings(ctx);

        if !self.batch.is_empty() {
            self.write_view_uniform(ctx);
            self.write_ramps(ctx);
            self.ensure_capacity(ctx, self.batch.vertices.len(), self.batch.indices.len());
            if let (Some(vbo), Some(ibo)) =
                (self.vertex_buffer.as_ref(), self.index_buffer.as_ref())
            {
                ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&self.batch.vertices));
                ctx.queue.write_buffer(ibo, 0, bytemuck::cast_slice(&self.batch.indices));
            }
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("vellum mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear.into()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if self.batch.is_empty() {
            return 0;
        }

        let Some(pipeline) = self.pipeline.as_ref() else {
            return 0;
        };
        let Some(bind_group) = self.bind_group.as_ref() else {
            return 0;
        };
        let Some(vbo) = self.vertex_buffer.as_ref() else {
            return 0;
        };
        let Some(ibo) = self.index_buffer.as_ref() else {
            return 0;
        };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);

        let mut triangles = 0;
        for range in &self.batch.ranges {
            let Some((sx, sy, sw, sh)) = clip_to_scissor(range.clip, ctx.view.viewport) else {
                continue;
            };
            rpass.set_scissor_rect(sx, sy, sw, sh);
            rpass.draw_indexed(range.indices.clone(), 0, 0..1);
            triangles += range.indices.len() / 3;
        }
        triangles
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("vellum mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let bgl_desc = wgpu::BindGroupLayoutDescriptor {
            label: Some("vellum mesh bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(VIEW_UNIFORM_SIZE),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        };
        let bind_group_layout = ctx.device.create_bind_group_layout(&bgl_desc);

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("vellum mesh pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("vellum mesh pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[MeshVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            // Tessellated meshes mix windings; no culling.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
    }

    fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_some() {
            return;
        }
        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("vellum ramp sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
    }

    /// Grows the ramp texture to hold `rows` rows; a new texture bumps the
    /// generation so the bind group is rebuilt.
    fn ensure_ramp_texture(&mut self, ctx: &RenderCtx<'_>, rows: u32) {
        let needed = rows.max(1);
        if self.ramp_texture.is_some() && needed <= self.ramp_rows {
            return;
        }
        let capacity = needed.next_power_of_two().clamp(8, MAX_RAMP_ROWS);

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("vellum gradient ramps"),
            size: wgpu::Extent3d {
                width: RAMP_WIDTH,
                height: capacity,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.ramp_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.ramp_texture = Some(texture);
        self.ramp_rows = capacity;
        self.ramp_generation += 1;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group_generation == self.ramp_generation && self.bind_group.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else {
            return;
        };
        let Some(ramp_view) = self.ramp_view.as_ref() else {
            return;
        };
        let Some(sampler) = self.sampler.as_ref() else {
            return;
        };

        let view_ubo = match self.view_ubo.take() {
            Some(ubo) => ubo,
            None => ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("vellum mesh view ubo"),
                size: VIEW_UNIFORM_SIZE,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }),
        };

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vellum mesh bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: view_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(ramp_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        self.view_ubo = Some(view_ubo);
        self.bind_group = Some(bind_group);
        self.bind_group_generation = self.ramp_generation;
    }

    fn write_view_uniform(&self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.view_ubo.as_ref() else {
            return;
        };
        let u = ViewUniform {
            projection: ctx.view.projection_cols(),
        };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }

    fn write_ramps(&self, ctx: &RenderCtx<'_>) {
        let rows = self.batch.ramps.rows();
        if rows == 0 {
            return;
        }
        let Some(texture) = self.ramp_texture.as_ref() else {
            return;
        };

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(self.batch.ramps.texels()),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(RAMP_WIDTH * 4),
                rows_per_image: Some(rows),
            },
            wgpu::Extent3d {
                width: RAMP_WIDTH,
                height: rows,
                depth_or_array_layers: 1,
            },
        );
    }

    fn ensure_capacity(&mut self, ctx: &RenderCtx<'_>, vertices: usize, indices: usize) {
        if vertices > self.vertex_capacity || self.vertex_buffer.is_none() {
            let cap = vertices.next_power_of_two().max(256);
            self.vertex_buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("vellum mesh vbo"),
                size: (cap * std::mem::size_of::<MeshVertex>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.vertex_capacity = cap;
        }

        if indices > self.index_capacity || self.index_buffer.is_none() {
            let cap = indices.next_power_of_two().max(1024);
            self.index_buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("vellum mesh ibo"),
                size: (cap * std::mem::size_of::<u32>()) as u64,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.index_capacity = cap;
        }
    }
}
