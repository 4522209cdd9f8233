//! Font loading and single-line text rasterization.
//!
//! Text is rasterized on the CPU with `ab_glyph` into an RGBA surface tinted
//! with the requested foreground color; `FrameCanvas` uploads that surface as
//! a texture for exactly one frame.

use std::path::Path;

use ab_glyph::{point, Font, FontArc, Glyph, PxScale, ScaleFont};
use ck_core::canvas::Color;
use image::{Rgba, RgbaImage};

pub struct FontFace {
    font: FontArc,
    scale: PxScale,
}

impl FontFace {
    pub fn load(path: &Path, point_size: f32) -> Result<Self, String> {
        let bytes = std::fs::read(path)
            .map_err(|e| format!("Failed to read font file {}: {e}", path.display()))?;
        let face = Self::from_bytes(bytes, point_size)
            .map_err(|e| format!("{e} ({})", path.display()))?;
        log::info!("Font loaded: {} at {}px", path.display(), point_size);
        Ok(face)
    }

    pub fn from_bytes(bytes: Vec<u8>, point_size: f32) -> Result<Self, String> {
        if point_size <= 0.0 {
            return Err(format!("Font size must be > 0, got {point_size}"));
        }
        let font =
            FontArc::try_from_vec(bytes).map_err(|e| format!("Failed to parse font data: {e}"))?;
        Ok(Self {
            font,
            scale: PxScale::from(point_size),
        })
    }

    /// Height of one line of text in pixels (ascent to descent).
    pub fn line_height(&self) -> u32 {
        let scaled = self.font.as_scaled(self.scale);
        (scaled.ascent() - scaled.descent()).ceil().max(0.0) as u32
    }

    /// Rasterize `text` on one line. The surface covers the pen advance and
    /// one line height, grown to include any ink that overhangs that box;
    /// uncovered pixels are fully transparent. Returns `None` for text with
    /// no advance.
    pub fn render_blended(&self, text: &str, color: Color) -> Option<TextSurface> {
        let scaled = self.font.as_scaled(self.scale);
        let ascent = scaled.ascent();

        let mut outlines = Vec::new();
        let mut caret = 0.0f32;
        let mut prev = None;
        for ch in text.chars() {
            if ch.is_control() {
                continue;
            }
            let id = scaled.glyph_id(ch);
            if let Some(prev_id) = prev {
                caret += scaled.kern(prev_id, id);
            }
            let glyph = Glyph {
                id,
                scale: self.scale,
                position: point(caret, ascent),
            };
            if let Some(outline) = self.font.outline_glyph(glyph) {
                outlines.push(outline);
            }
            caret += scaled.h_advance(id);
            prev = Some(id);
        }

        let advance = caret.ceil().max(0.0) as i32;
        let line_height = self.line_height() as i32;
        if advance == 0 || line_height == 0 {
            return None;
        }

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (0, 0, advance, line_height);
        for outline in &outlines {
            let bounds = outline.px_bounds();
            min_x = min_x.min(bounds.min.x.floor() as i32);
            min_y = min_y.min(bounds.min.y.floor() as i32);
            max_x = max_x.max(bounds.max.x.ceil() as i32);
            max_y = max_y.max(bounds.max.y.ceil() as i32);
        }
        let width = (max_x - min_x) as u32;
        let height = (max_y - min_y) as u32;

        let mut image = RgbaImage::new(width, height);
        for outline in outlines {
            let bounds = outline.px_bounds();
            let left = bounds.min.x as i32 - min_x;
            let top = bounds.min.y as i32 - min_y;
            outline.draw(|x, y, coverage| {
                let px = left + x as i32;
                let py = top + y as i32;
                if px < 0 || py < 0 || px as u32 >= width || py as u32 >= height {
                    return;
                }
                let pixel = image.get_pixel_mut(px as u32, py as u32);
                *pixel = Rgba([
                    color.r,
                    color.g,
                    color.b,
                    blend_coverage(pixel[3], coverage, color.a),
                ]);
            });
        }

        Some(TextSurface {
            image,
            offset_x: min_x,
            offset_y: min_y,
        })
    }
}

/// Rasterized line of text. The image's top-left corner sits at
/// (`offset_x`, `offset_y`) relative to the pen origin, the top-left of the
/// line box; both offsets are zero unless ink overhangs to the left or top.
pub struct TextSurface {
    pub image: RgbaImage,
    pub offset_x: i32,
    pub offset_y: i32,
}

/// Overlapping glyph edges keep the stronger coverage.
fn blend_coverage(existing_alpha: u8, coverage: f32, color_alpha: u8) -> u8 {
    let alpha = (coverage.clamp(0.0, 1.0) * color_alpha as f32).round() as u8;
    existing_alpha.max(alpha)
}
