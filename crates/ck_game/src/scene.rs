use ck_core::canvas::{Canvas, Color, PixelRect};
use ck_core::config::SceneConfig;

const SKY_COLOR: Color = Color::rgb(135, 206, 235);
const GROUND_COLOR: Color = Color::rgb(34, 139, 34);
const CASTLE_COLOR: Color = Color::rgb(169, 169, 169);
const CLOUD_COLOR: Color = Color::WHITE;

const GROUND_HEIGHT: u32 = 100;
const CASTLE_RECT: PixelRect = PixelRect::new(100, 200, 600, 300);

pub const CLOUD_WIDTH: u32 = 100;
pub const CLOUD_HEIGHT: u32 = 50;

/// A background element drifting horizontally and wrapping around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
}

impl Decoration {
    pub const fn new(x: f32, y: f32, speed: f32) -> Self {
        Self { x, y, speed }
    }

    /// Once past the right edge, re-enter from one width off the left edge.
    pub fn drift(&mut self, dt: f32, scene_width: f32) {
        self.x += self.speed * dt;
        if self.x > scene_width {
            self.x = -(CLOUD_WIDTH as f32);
        }
    }

    pub fn rect(&self) -> PixelRect {
        PixelRect::new(self.x as i32, self.y as i32, CLOUD_WIDTH, CLOUD_HEIGHT)
    }
}

/// Sky, ground, castle, and the drifting clouds in front of them.
pub struct Background {
    width: f32,
    height: f32,
    decorations: Vec<Decoration>,
}

impl Background {
    pub fn new(config: &SceneConfig) -> Self {
        Self::with_decorations(
            config,
            vec![
                Decoration::new(50.0, 100.0, 30.0),
                Decoration::new(300.0, 150.0, 20.0),
                Decoration::new(600.0, 120.0, 25.0),
            ],
        )
    }

    pub fn with_decorations(config: &SceneConfig, decorations: Vec<Decoration>) -> Self {
        Self {
            width: config.width,
            height: config.height,
            decorations,
        }
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    pub fn render_background(&self, canvas: &mut dyn Canvas) {
        canvas.set_draw_color(SKY_COLOR);
        canvas.clear();

        canvas.set_draw_color(GROUND_COLOR);
        canvas.fill_rect(PixelRect::new(
            0,
            self.height as i32 - GROUND_HEIGHT as i32,
            self.width as u32,
            GROUND_HEIGHT,
        ));

        canvas.set_draw_color(CASTLE_COLOR);
        canvas.fill_rect(CASTLE_RECT);
    }

    /// Advances every decoration by `dt` and draws it.
    pub fn render_decorations(&mut self, dt: f32, canvas: &mut dyn Canvas) {
        canvas.set_draw_color(CLOUD_COLOR);
        for decoration in &mut self.decorations {
            decoration.drift(dt, self.width);
            canvas.fill_rect(decoration.rect());
        }
    }
}
