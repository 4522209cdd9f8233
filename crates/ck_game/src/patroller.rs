use ck_core::canvas::{Canvas, Color, PixelRect};
use ck_core::config::{PatrollerConfig, SceneConfig};

const COAT_DARK: Color = Color::rgb(139, 69, 19);
const COAT_LIGHT: Color = Color::rgb(160, 82, 45);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Right,
    Left,
}

/// Autonomous actor pacing the ground line, reversing at the scene edges.
#[derive(Debug, Clone)]
pub struct Patroller {
    pub x: f32,
    pub y: f32,
    heading: Heading,
    max_x: f32,
    config: PatrollerConfig,
}

impl Patroller {
    pub fn new(scene: &SceneConfig) -> Self {
        let max_x = scene.max_x(scene.patroller.width);
        Self {
            x: scene.patroller.start_x.clamp(0.0, max_x),
            y: scene.ground_y,
            heading: Heading::Right,
            max_x,
            config: scene.patroller,
        }
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn update(&mut self, dt: f32) {
        match self.heading {
            Heading::Right => {
                self.x += self.config.speed * dt;
                if self.x > self.max_x {
                    self.x = self.max_x;
                    self.heading = Heading::Left;
                    log::debug!("Patroller: reversed at right edge");
                }
            }
            Heading::Left => {
                self.x -= self.config.speed * dt;
                if self.x < 0.0 {
                    self.x = 0.0;
                    self.heading = Heading::Right;
                    log::debug!("Patroller: reversed at left edge");
                }
            }
        }
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        let x = self.x as i32;
        let y = self.y as i32;

        // head
        canvas.set_draw_color(COAT_DARK);
        canvas.fill_rect(PixelRect::new(x, y, 16, 16));

        // body
        canvas.set_draw_color(COAT_LIGHT);
        canvas.fill_rect(PixelRect::new(x - 8, y + 16, 32, 16));

        // legs
        canvas.set_draw_color(COAT_DARK);
        canvas.fill_rect(PixelRect::new(x - 6, y + 32, 8, 8));
        canvas.fill_rect(PixelRect::new(x + 14, y + 32, 8, 8));

        // tail
        canvas.set_draw_color(COAT_LIGHT);
        canvas.fill_rect(PixelRect::new(x - 10, y + 20, 8, 4));
    }
}
