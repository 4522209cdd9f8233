//! Linear dialog script advanced one line per click.
//!
//! Advancing past the last line switches to the terminal screen for good.

use ck_core::canvas::{Canvas, Color};
use ck_core::config::SceneConfig;

const TEXT_COLOR: Color = Color::WHITE;
const END_SCREEN_COLOR: Color = Color::BLACK;
const TEXT_LEFT: i32 = 20;
/// Distance from the bottom edge of the scene to the top of the text.
const TEXT_BOTTOM_OFFSET: i32 = 50;

pub fn default_script() -> Vec<String> {
    [
        "Aventurero, salvameee, estoy atrapada en el castillo",
        "Supera los desafios para poder salvarme",
        "Cuento contigo, suerte",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[derive(Debug)]
pub struct DialogSequencer {
    script: Vec<String>,
    cursor: usize,
    ended: bool,
    text_origin: (i32, i32),
    text_failure_reported: bool,
}

impl DialogSequencer {
    pub fn new(script: Vec<String>, scene: &SceneConfig) -> Result<Self, String> {
        if script.is_empty() {
            return Err("Dialog script validation failed: script has no lines".to_string());
        }
        Ok(Self {
            script,
            cursor: 0,
            ended: false,
            text_origin: (TEXT_LEFT, scene.height as i32 - TEXT_BOTTOM_OFFSET),
            text_failure_reported: false,
        })
    }

    pub fn advance(&mut self) {
        if self.cursor + 1 < self.script.len() {
            self.cursor += 1;
            log::debug!("Dialog: line {}/{}", self.cursor + 1, self.script.len());
        } else if !self.ended {
            self.ended = true;
            log::info!("Dialog finished; showing end screen");
        }
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_line(&self) -> &str {
        &self.script[self.cursor]
    }

    pub fn render(&mut self, canvas: &mut dyn Canvas) {
        if self.ended {
            render_end_screen(canvas);
            return;
        }

        let (x, y) = self.text_origin;
        let line = &self.script[self.cursor];
        if canvas.draw_text(line, TEXT_COLOR, x, y).is_none()
            && !line.is_empty()
            && !self.text_failure_reported
        {
            log::warn!("Dialog: could not render line {}: {:?}", self.cursor, line);
            self.text_failure_reported = true;
        }
    }
}

/// Flat full-viewport fill shown once the script is exhausted.
pub fn render_end_screen(canvas: &mut dyn Canvas) {
    canvas.set_draw_color(END_SCREEN_COLOR);
    canvas.clear();
}
