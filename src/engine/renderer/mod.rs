// Rendering system using wgpu

mod camera;
mod sprite;
pub mod texture;
mod vertex;

pub use camera::{Camera, CameraUniform};
pub use sprite::{SpriteBatch, SpriteRenderer};
pub use texture::{TextureHandle, TextureManager};
pub use vertex::Vertex;

use anyhow::Result;
use glam::Vec2;
use image::RgbaImage;
use log::{info, warn};
use std::sync::Arc;
use winit::window::Window;

/// Owns the wgpu device and surface and draws sprite batches to the window
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sprite_renderer: SpriteRenderer,
    texture_manager: TextureManager,
    camera: Camera,
}

impl Renderer {
    /// Create a renderer for `window`, projecting `logical_size` onto the whole surface
    pub async fn new(window: Arc<Window>, logical_size: Vec2) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        info!("Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let texture_manager = TextureManager::new(&device, &queue)?;
        let sprite_renderer =
            SpriteRenderer::new(&device, surface_format, texture_manager.bind_group_layout())?;
        let camera = Camera::new(logical_size.x, logical_size.y);

        info!(
            "Renderer initialized with {}x{} surface, {}x{} logical",
            size.width, size.height, logical_size.x, logical_size.y
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            sprite_renderer,
            texture_manager,
            camera,
        })
    }

    /// Resize the surface. The logical screen stays the same and is stretched over it.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            info!("Renderer resized to {}x{}", new_size.width, new_size.height);
        }
    }

    /// Upload a decoded image as a sprite texture
    pub fn upload_image(&mut self, image: &RgbaImage) -> Result<TextureHandle> {
        self.texture_manager.upload(&self.device, &self.queue, image)
    }

    /// The texture outlines are drawn with
    pub fn white_texture(&self) -> TextureHandle {
        self.texture_manager.white()
    }

    /// Clear to white, draw the batch and present
    pub fn render(&mut self, batch: &SpriteBatch) -> Result<()> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Surface timed out, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let camera_uniform = CameraUniform::new(&self.camera);
        self.sprite_renderer
            .prepare(&self.device, &self.queue, &camera_uniform, batch);

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.sprite_renderer
                .render(&mut render_pass, batch, &self.texture_manager)?;
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
