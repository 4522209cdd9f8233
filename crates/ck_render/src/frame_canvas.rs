//! The `Canvas` the game draws into.
//!
//! Canvas calls only touch the CPU-side `QuadBatch`. `present` uploads the
//! batch, creates one texture per text surface, draws everything in a single
//! render pass, and releases the text textures once the frame is submitted.

use ck_core::canvas::{Canvas, Color, PixelRect, TextExtent};
use wgpu::util::DeviceExt;

use crate::batch::{linear_clear_color, QuadBatch, TextureSlot};
use crate::camera::ScreenCamera;
use crate::gpu_context::GpuContext;
use crate::quad_pipeline::QuadPipeline;
use crate::text::FontFace;
use crate::texture::Texture;
use crate::vertex::QuadVertex;

pub struct FrameCanvas {
    font: FontFace,
    batch: QuadBatch,
    pipeline: QuadPipeline,
    _white_texture: Texture,
    white_bind_group: wgpu::BindGroup,
    _camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,

    // Buffers grow (power-of-two) but never shrink.
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    index_capacity: usize,
}

impl FrameCanvas {
    pub fn new(gpu: &GpuContext, font: FontFace, camera: &ScreenCamera) -> Self {
        let pipeline = QuadPipeline::new(&gpu.device, gpu.surface_format);
        let white_texture = Texture::white_pixel(&gpu.device, &gpu.queue);
        let white_bind_group = pipeline.create_texture_bind_group(&gpu.device, &white_texture);

        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera.build_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group = pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);

        let vertex_capacity = 64;
        let index_capacity = 96;
        Self {
            font,
            batch: QuadBatch::new(),
            vertex_buffer: create_vertex_buffer(&gpu.device, vertex_capacity),
            index_buffer: create_index_buffer(&gpu.device, index_capacity),
            pipeline,
            _white_texture: white_texture,
            white_bind_group,
            _camera_buffer: camera_buffer,
            camera_bind_group,
            vertex_capacity,
            index_capacity,
        }
    }

    /// Draw and present everything queued since the last present. A frame the
    /// surface cannot provide is dropped.
    pub fn present(&mut self, gpu: &GpuContext) {
        let Some((output, view)) = gpu.begin_frame() else {
            self.batch.reset();
            return;
        };

        self.ensure_capacity(
            &gpu.device,
            self.batch.vertices().len(),
            self.batch.indices().len(),
        );
        if !self.batch.vertices().is_empty() {
            gpu.queue.write_buffer(
                &self.vertex_buffer,
                0,
                bytemuck::cast_slice(self.batch.vertices()),
            );
            gpu.queue
                .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(self.batch.indices()));
        }

        let text_textures: Vec<(Texture, wgpu::BindGroup)> = self
            .batch
            .text_surfaces()
            .iter()
            .map(|surface| {
                let texture = Texture::from_rgba(&gpu.device, &gpu.queue, surface, "Text Texture");
                let bind_group = self
                    .pipeline
                    .create_texture_bind_group(&gpu.device, &texture);
                (texture, bind_group)
            })
            .collect();

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(linear_clear_color(self.batch.clear_color())),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            if !self.batch.draw_calls().is_empty() {
                render_pass.set_pipeline(&self.pipeline.render_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass
                    .set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

                for draw in self.batch.draw_calls() {
                    let bind_group = match draw.slot {
                        TextureSlot::Solid => &self.white_bind_group,
                        TextureSlot::Text(index) => match text_textures.get(index) {
                            Some((_, bind_group)) => bind_group,
                            None => continue,
                        },
                    };
                    render_pass.set_bind_group(1, bind_group, &[]);
                    render_pass.draw_indexed(
                        draw.index_start..(draw.index_start + draw.index_count),
                        0,
                        0..1,
                    );
                }
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        drop(text_textures);
        self.batch.reset();
    }

    fn ensure_capacity(&mut self, device: &wgpu::Device, vertex_count: usize, index_count: usize) {
        if vertex_count > self.vertex_capacity {
            self.vertex_capacity = vertex_count.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(device, self.vertex_capacity);
        }
        if index_count > self.index_capacity {
            self.index_capacity = index_count.next_power_of_two();
            self.index_buffer = create_index_buffer(device, self.index_capacity);
        }
    }
}

impl Canvas for FrameCanvas {
    fn set_draw_color(&mut self, color: Color) {
        self.batch.set_draw_color(color);
    }

    fn clear(&mut self) {
        self.batch.clear();
    }

    fn fill_rect(&mut self, rect: PixelRect) {
        self.batch.push_rect(rect);
    }

    fn draw_text(&mut self, text: &str, color: Color, x: i32, y: i32) -> Option<TextExtent> {
        let surface = self.font.render_blended(text, color)?;
        Some(self.batch.push_text(
            surface.image,
            x + surface.offset_x,
            y + surface.offset_y,
        ))
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<QuadVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Quad Vertex Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Quad Index Buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
