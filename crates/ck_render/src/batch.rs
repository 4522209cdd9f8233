//! CPU-side quad batch for one frame.
//!
//! Every canvas call appends quads in submission order, so later draws
//! overdraw earlier ones. A `clear` replaces everything queued so far with a
//! single full-viewport clear color.

use ck_core::canvas::{Color, PixelRect, TextExtent};
use image::RgbaImage;

use crate::vertex::QuadVertex;

/// Which texture a draw call samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureSlot {
    /// Shared 1x1 white texel; color comes from the vertices.
    Solid,
    /// Index into this frame's text surfaces.
    Text(usize),
}

/// A contiguous run of indices that share the same texture binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub slot: TextureSlot,
    pub index_start: u32,
    pub index_count: u32,
}

pub struct QuadBatch {
    clear_color: Color,
    draw_color: Color,
    vertices: Vec<QuadVertex>,
    indices: Vec<u32>,
    draw_calls: Vec<DrawCall>,
    text_surfaces: Vec<RgbaImage>,
}

impl QuadBatch {
    pub fn new() -> Self {
        Self {
            clear_color: Color::BLACK,
            draw_color: Color::BLACK,
            vertices: Vec::new(),
            indices: Vec::new(),
            draw_calls: Vec::new(),
            text_surfaces: Vec::new(),
        }
    }

    pub fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    pub fn draw_color(&self) -> Color {
        self.draw_color
    }

    pub fn clear(&mut self) {
        self.clear_color = self.draw_color;
        self.vertices.clear();
        self.indices.clear();
        self.draw_calls.clear();
        self.text_surfaces.clear();
    }

    pub fn push_rect(&mut self, rect: PixelRect) {
        if rect.w == 0 || rect.h == 0 {
            return;
        }
        let color = linear_rgba(self.draw_color);
        self.add_quad(rect, color, TextureSlot::Solid);
    }

    /// Queue a text surface drawn 1:1 with its top-left at (`x`, `y`).
    pub fn push_text(&mut self, surface: RgbaImage, x: i32, y: i32) -> TextExtent {
        let (width, height) = surface.dimensions();
        let slot = TextureSlot::Text(self.text_surfaces.len());
        self.text_surfaces.push(surface);
        self.add_quad(
            PixelRect::new(x, y, width, height),
            [1.0, 1.0, 1.0, 1.0],
            slot,
        );
        TextExtent { width, height }
    }

    /// Forget everything queued for the frame just presented. The draw color
    /// carries over, like the state of a real rendering context.
    pub fn reset(&mut self) {
        self.clear_color = Color::BLACK;
        self.vertices.clear();
        self.indices.clear();
        self.draw_calls.clear();
        self.text_surfaces.clear();
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn vertices(&self) -> &[QuadVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.draw_calls
    }

    pub fn text_surfaces(&self) -> &[RgbaImage] {
        &self.text_surfaces
    }

    fn add_quad(&mut self, rect: PixelRect, color: [f32; 4], slot: TextureSlot) {
        let left = rect.x as f32;
        let top = rect.y as f32;
        let right = left + rect.w as f32;
        let bottom = top + rect.h as f32;
        let base_index = self.vertices.len() as u32;

        self.vertices.extend_from_slice(&[
            QuadVertex {
                position: [left, top],
                tex_coords: [0.0, 0.0],
                color,
            },
            QuadVertex {
                position: [right, top],
                tex_coords: [1.0, 0.0],
                color,
            },
            QuadVertex {
                position: [right, bottom],
                tex_coords: [1.0, 1.0],
                color,
            },
            QuadVertex {
                position: [left, bottom],
                tex_coords: [0.0, 1.0],
                color,
            },
        ]);

        let index_start = self.indices.len() as u32;
        self.indices.extend_from_slice(&[
            base_index,
            base_index + 1,
            base_index + 2,
            base_index,
            base_index + 2,
            base_index + 3,
        ]);
        self.push_draw_call(slot, index_start, 6);
    }

    /// Append a draw call, merging with the previous one when the slot
    /// matches and the indices are contiguous.
    fn push_draw_call(&mut self, slot: TextureSlot, index_start: u32, index_count: u32) {
        if let Some(last) = self.draw_calls.last_mut() {
            let contiguous = last.index_start + last.index_count == index_start;
            if last.slot == slot && contiguous {
                last.index_count += index_count;
                return;
            }
        }
        self.draw_calls.push(DrawCall {
            slot,
            index_start,
            index_count,
        });
    }
}

impl Default for QuadBatch {
    fn default() -> Self {
        Self::new()
    }
}

pub fn srgb_to_linear(channel: u8) -> f32 {
    let c = channel as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Vertex colors are blended in linear space on an sRGB surface.
pub fn linear_rgba(color: Color) -> [f32; 4] {
    [
        srgb_to_linear(color.r),
        srgb_to_linear(color.g),
        srgb_to_linear(color.b),
        color.a as f32 / 255.0,
    ]
}

pub fn linear_clear_color(color: Color) -> wgpu::Color {
    let [r, g, b, a] = linear_rgba(color);
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: a as f64,
    }
}
