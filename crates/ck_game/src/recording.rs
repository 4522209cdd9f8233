use ck_core::canvas::{Canvas, Color, PixelRect, TextExtent};

/// Width of one character in the fake text metrics.
const GLYPH_WIDTH: u32 = 12;
const LINE_HEIGHT: u32 = 24;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Color),
    FillRect(Color, PixelRect),
    Text {
        text: String,
        color: Color,
        x: i32,
        y: i32,
    },
}

/// Canvas that records every call so tests can assert on what was drawn
/// and in which order.
#[derive(Debug)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
    pub text_available: bool,
    draw_color: Color,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            text_available: true,
            draw_color: Color::BLACK,
        }
    }

    pub fn rects(&self) -> Vec<(Color, PixelRect)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect(color, rect) => Some((*color, *rect)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear(self.draw_color));
    }

    fn fill_rect(&mut self, rect: PixelRect) {
        self.ops.push(DrawOp::FillRect(self.draw_color, rect));
    }

    fn draw_text(&mut self, text: &str, color: Color, x: i32, y: i32) -> Option<TextExtent> {
        if !self.text_available || text.is_empty() {
            return None;
        }
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            color,
            x,
            y,
        });
        Some(TextExtent {
            width: text.chars().count() as u32 * GLYPH_WIDTH,
            height: LINE_HEIGHT,
        })
    }
}
