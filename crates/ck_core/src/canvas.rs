//! Drawing capability shared by every component.
//!
//! The composition root owns the concrete canvas (the wgpu `FrameCanvas` in
//! `ck_render`) and lends it out as `&mut dyn Canvas` for the duration of a
//! render call. Components never hold on to it.

/// 8-bit RGBA color, sRGB encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Axis-aligned rectangle in integer pixels, origin at the top-left of the
/// viewport. `x`/`y` may be negative for shapes partly off-screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// Pixel size of a rendered piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextExtent {
    pub width: u32,
    pub height: u32,
}

pub trait Canvas {
    fn set_draw_color(&mut self, color: Color);

    /// Fill the whole viewport with the current draw color.
    fn clear(&mut self);

    /// Fill `rect` with the current draw color.
    fn fill_rect(&mut self, rect: PixelRect);

    /// Draw `text` with its top-left corner at (`x`, `y`), sized to its own
    /// content. Returns `None` when no text surface could be produced.
    fn draw_text(&mut self, text: &str, color: Color, x: i32, y: i32) -> Option<TextExtent>;
}
