// Sprite rendering: CPU-side quad batching and the GPU pipeline that draws it

use super::{CameraUniform, TextureHandle, TextureManager, Vertex};
use crate::core::Rect;
use crate::game::DrawItem;
use anyhow::Result;
use glam::{Mat4, Vec2, Vec4};
use std::ops::Range;
use wgpu::util::DeviceExt;

/// Hitbox outline thickness in logical pixels
pub const OUTLINE_THICKNESS: f32 = 2.0;

/// Hitbox outline colour
pub const OUTLINE_COLOR: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);

/// A run of consecutive indices that share one texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub texture: TextureHandle,
    pub indices: Range<u32>,
}

/// Quads for one frame, drawn in the order they were pushed
#[derive(Debug, Default)]
pub struct SpriteBatch {
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
    calls: Vec<DrawCall>,
}

impl SpriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refill the batch from a session's draw list. Outlines use the white texture.
    pub fn rebuild(&mut self, items: &[DrawItem<'_, TextureHandle>], white: TextureHandle) {
        self.clear();
        for item in items {
            match *item {
                DrawItem::Sprite {
                    rect,
                    image,
                    flip_x,
                } => self.push_sprite(rect, *image, flip_x),
                DrawItem::Outline { rect } => {
                    self.push_outline(rect, white, OUTLINE_THICKNESS, OUTLINE_COLOR)
                }
            }
        }
    }

    /// Textured quad covering `rect`; `flip_x` mirrors it by swapping U
    pub fn push_sprite(&mut self, rect: Rect, texture: TextureHandle, flip_x: bool) {
        let (u0, u1) = if flip_x { (1.0, 0.0) } else { (0.0, 1.0) };
        self.push_quad(rect, texture, u0, u1, Vec4::ONE);
    }

    /// Rectangle outline made of four edge quads inside `rect`
    pub fn push_outline(&mut self, rect: Rect, texture: TextureHandle, thickness: f32, color: Vec4) {
        let t = thickness.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
        let edges = [
            Rect::new(rect.x, rect.y, rect.width, t),
            Rect::new(rect.x, rect.y + rect.height - t, rect.width, t),
            Rect::new(rect.x, rect.y + t, t, rect.height - 2.0 * t),
            Rect::new(rect.x + rect.width - t, rect.y + t, t, rect.height - 2.0 * t),
        ];
        for edge in edges {
            self.push_quad(edge, texture, 0.0, 1.0, color);
        }
    }

    fn push_quad(&mut self, rect: Rect, texture: TextureHandle, u0: f32, u1: f32, color: Vec4) {
        let base = self.vertices.len() as u16;
        let (left, top) = (rect.x, rect.y);
        let corner = rect.position() + rect.size();
        let (right, bottom) = (corner.x, corner.y);

        self.vertices.extend_from_slice(&[
            Vertex::new(Vec2::new(left, top), Vec2::new(u0, 0.0), color),
            Vertex::new(Vec2::new(right, top), Vec2::new(u1, 0.0), color),
            Vertex::new(Vec2::new(right, bottom), Vec2::new(u1, 1.0), color),
            Vertex::new(Vec2::new(left, bottom), Vec2::new(u0, 1.0), color),
        ]);

        let start = self.indices.len() as u32;
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        let end = self.indices.len() as u32;

        match self.calls.last_mut() {
            Some(call) if call.texture == texture => call.indices.end = end,
            _ => self.calls.push(DrawCall {
                texture,
                indices: start..end,
            }),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.calls.clear();
    }
}

/// Sprite pipeline with growable vertex and index buffers
pub struct SpriteRenderer {
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    index_buffer: wgpu::Buffer,
    index_capacity: usize,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
}

impl SpriteRenderer {
    /// Initial buffer size, in quads
    const INITIAL_QUADS: usize = 64;

    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        texture_layout: &wgpu::BindGroupLayout,
    ) -> Result<Self> {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, texture_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The y-down projection flips winding
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let vertex_buffer = Self::create_vertex_buffer(device, Self::INITIAL_QUADS * 4);
        let index_buffer = Self::create_index_buffer(device, Self::INITIAL_QUADS * 6);

        let camera_uniform = CameraUniform {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        };

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            render_pipeline,
            vertex_buffer,
            vertex_capacity: Self::INITIAL_QUADS * 4,
            index_buffer,
            index_capacity: Self::INITIAL_QUADS * 6,
            camera_buffer,
            camera_bind_group,
        })
    }

    fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sprite Vertex Buffer"),
            size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_index_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sprite Index Buffer"),
            size: (capacity * std::mem::size_of::<u16>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Upload the batch and camera, growing buffers as needed
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        camera: &CameraUniform,
        batch: &SpriteBatch,
    ) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[*camera]));

        if batch.is_empty() {
            return;
        }

        if batch.vertices().len() > self.vertex_capacity {
            self.vertex_capacity = batch.vertices().len().next_power_of_two();
            self.vertex_buffer = Self::create_vertex_buffer(device, self.vertex_capacity);
        }
        if batch.indices().len() > self.index_capacity {
            self.index_capacity = batch.indices().len().next_power_of_two();
            self.index_buffer = Self::create_index_buffer(device, self.index_capacity);
        }

        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(batch.vertices()));
        // Six u16 indices per quad keep the write 4-byte aligned
        queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(batch.indices()));
    }

    /// Draw a batch previously passed to [`prepare`](Self::prepare)
    pub fn render<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        batch: &SpriteBatch,
        textures: &'a TextureManager,
    ) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        for call in batch.calls() {
            let texture = textures
                .get(call.texture)
                .ok_or_else(|| anyhow::anyhow!("Unknown texture {:?}", call.texture))?;
            render_pass.set_bind_group(1, &texture.bind_group, &[]);
            render_pass.draw_indexed(call.indices.clone(), 0, 0..1);
        }

        Ok(())
    }
}
