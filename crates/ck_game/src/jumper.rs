//! Player-controlled actor: a two-state jump machine plus instant
//! horizontal steps.
//!
//! While airborne a bounded frame counter drives a procedural limb swing.
//! The counter advances once per tick, not per second, so the swing cadence
//! follows the frame rate.

use ck_core::canvas::{Canvas, Color, PixelRect};
use ck_core::config::{JumperConfig, SceneConfig};

/// Period of the airborne animation counter, in ticks.
pub const LIMB_CYCLE_FRAMES: u32 = 20;
/// Arms sweep through `-5..=4` once per this many ticks.
pub const ARM_SWING_PERIOD: u32 = 10;
/// Legs sweep through `-2..=2`, advancing every second tick.
pub const LEG_SWING_PERIOD: u32 = 5;

const CROWN_COLOR: Color = Color::rgb(255, 223, 0);
const SKIN_COLOR: Color = Color::rgb(255, 182, 193);
const TORSO_COLOR: Color = Color::rgb(0, 0, 255);
const ARM_COLOR: Color = Color::rgb(255, 0, 0);
const LEG_COLOR: Color = Color::rgb(0, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JumpState {
    Grounded,
    Airborne { velocity: f32, frame: u32 },
}

#[derive(Debug, Clone)]
pub struct Jumper {
    pub x: f32,
    pub y: f32,
    ground_y: f32,
    max_x: f32,
    state: JumpState,
    config: JumperConfig,
}

impl Jumper {
    pub fn new(scene: &SceneConfig) -> Self {
        let max_x = scene.max_x(scene.jumper.width);
        Self {
            x: scene.jumper.start_x.clamp(0.0, max_x),
            y: scene.ground_y,
            ground_y: scene.ground_y,
            max_x,
            state: JumpState::Grounded,
            config: scene.jumper,
        }
    }

    pub fn state(&self) -> JumpState {
        self.state
    }

    pub fn is_airborne(&self) -> bool {
        matches!(self.state, JumpState::Airborne { .. })
    }

    pub fn velocity(&self) -> f32 {
        match self.state {
            JumpState::Grounded => 0.0,
            JumpState::Airborne { velocity, .. } => velocity,
        }
    }

    pub fn animation_frame(&self) -> u32 {
        match self.state {
            JumpState::Grounded => 0,
            JumpState::Airborne { frame, .. } => frame,
        }
    }

    pub fn ground_y(&self) -> f32 {
        self.ground_y
    }

    /// Leave the ground. Ignored while already airborne.
    pub fn start_jump(&mut self) {
        if self.is_airborne() {
            return;
        }
        self.state = JumpState::Airborne {
            velocity: self.config.jump_velocity,
            frame: 0,
        };
        log::debug!("Jumper: jump from x={:.1}", self.x);
    }

    pub fn move_left(&mut self, dt: f32) {
        self.x = (self.x - self.config.horizontal_speed * dt).clamp(0.0, self.max_x);
    }

    pub fn move_right(&mut self, dt: f32) {
        self.x = (self.x + self.config.horizontal_speed * dt).clamp(0.0, self.max_x);
    }

    pub fn update(&mut self, dt: f32) {
        let JumpState::Airborne { velocity, frame } = self.state else {
            return;
        };

        let velocity = velocity + self.config.gravity * dt;
        self.y += velocity * dt;

        if self.y >= self.ground_y {
            self.y = self.ground_y;
            self.state = JumpState::Grounded;
            log::debug!("Jumper: landed at x={:.1}", self.x);
        } else {
            self.state = JumpState::Airborne {
                velocity,
                frame: (frame + 1) % LIMB_CYCLE_FRAMES,
            };
        }
    }

    /// Horizontal arm and leg offsets for the current animation frame.
    pub fn limb_offsets(&self) -> (i32, i32) {
        match self.state {
            JumpState::Grounded => (0, 0),
            JumpState::Airborne { frame, .. } => {
                let arm = (frame % ARM_SWING_PERIOD) as i32 - 5;
                let leg = ((frame / 2) % LEG_SWING_PERIOD) as i32 - 2;
                (arm, leg)
            }
        }
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        let x = self.x as i32;
        let y = self.y as i32;
        let (arm, leg) = self.limb_offsets();

        canvas.set_draw_color(CROWN_COLOR);
        canvas.fill_rect(PixelRect::new(x + 8, y - 8, 16, 8));

        canvas.set_draw_color(SKIN_COLOR);
        canvas.fill_rect(PixelRect::new(x + 8, y, 16, 16));

        canvas.set_draw_color(TORSO_COLOR);
        canvas.fill_rect(PixelRect::new(x + 8, y + 16, 16, 24));

        canvas.set_draw_color(ARM_COLOR);
        canvas.fill_rect(PixelRect::new(x + arm, y + 16, 8, 16));
        canvas.fill_rect(PixelRect::new(x + 24 - arm, y + 16, 8, 16));

        canvas.set_draw_color(LEG_COLOR);
        canvas.fill_rect(PixelRect::new(x + 8 + leg, y + 40, 8, 16));
        canvas.fill_rect(PixelRect::new(x + 16 - leg, y + 40, 8, 16));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingCanvas;

    const DT: f32 = 1.0 / 60.0;

    fn jumper() -> Jumper {
        Jumper::new(&SceneConfig::default())
    }

    #[test]
    fn starts_grounded_at_start_position() {
        let jumper = jumper();
        assert_eq!(jumper.x, 350.0);
        assert_eq!(jumper.y, 500.0);
        assert_eq!(jumper.state(), JumpState::Grounded);
        assert_eq!(jumper.velocity(), 0.0);
    }

    #[test]
    fn start_jump_sets_initial_velocity() {
        let mut jumper = jumper();
        jumper.start_jump();
        assert!(jumper.is_airborne());
        assert_eq!(jumper.velocity(), -900.0);
        assert_eq!(jumper.animation_frame(), 0);
    }

    #[test]
    fn repeated_jump_requests_while_airborne_are_ignored() {
        let mut jumper = jumper();
        jumper.start_jump();
        for _ in 0..10 {
            jumper.update(DT);
        }
        let before = jumper.state();
        let y_before = jumper.y;
        for _ in 0..5 {
            jumper.start_jump();
        }
        assert_eq!(jumper.state(), before);
        assert_eq!(jumper.y, y_before);
    }

    #[test]
    fn update_while_grounded_is_a_no_op() {
        let mut jumper = jumper();
        jumper.update(0.5);
        assert_eq!(jumper.y, 500.0);
        assert_eq!(jumper.state(), JumpState::Grounded);
    }

    #[test]
    fn lands_within_one_second_of_flight() {
        let mut jumper = jumper();
        jumper.start_jump();
        let mut landed_after = None;
        for step in 1..=60 {
            jumper.update(DT);
            if !jumper.is_airborne() {
                landed_after = Some(step);
                break;
            }
        }
        let steps = landed_after.expect("jumper should land within one second");
        // Closed-form flight time is 0.9s; stepping lands a few ticks earlier.
        assert!((50..=55).contains(&steps), "landed after {steps} steps");
        assert_eq!(jumper.y, 500.0);
        assert_eq!(jumper.velocity(), 0.0);
        assert_eq!(jumper.animation_frame(), 0);
    }

    #[test]
    fn single_large_step_lands_immediately() {
        let mut jumper = jumper();
        jumper.start_jump();
        jumper.update(1.0);
        assert_eq!(jumper.state(), JumpState::Grounded);
        assert_eq!(jumper.y, 500.0);
    }

    #[test]
    fn y_never_exceeds_ground_for_any_step_size() {
        for dt in [0.001, 0.01, 1.0 / 30.0, 0.1, 0.37, 2.0] {
            let mut jumper = jumper();
            jumper.start_jump();
            for _ in 0..5000 {
                jumper.update(dt);
                assert!(jumper.y <= jumper.ground_y(), "dt={dt} y={}", jumper.y);
            }
            assert!(!jumper.is_airborne(), "dt={dt} never landed");
        }
    }

    #[test]
    fn apex_is_above_ground() {
        let mut jumper = jumper();
        jumper.start_jump();
        let mut min_y = jumper.y;
        while jumper.is_airborne() {
            jumper.update(DT);
            min_y = min_y.min(jumper.y);
        }
        // v^2 / 2g = 202.5px for the default tuning.
        assert!(min_y < 320.0 && min_y > 280.0, "apex {min_y}");
    }

    #[test]
    fn animation_counter_wraps_at_cycle_length() {
        let mut jumper = jumper();
        jumper.start_jump();
        for _ in 0..LIMB_CYCLE_FRAMES {
            jumper.update(0.001);
        }
        assert!(jumper.is_airborne());
        assert_eq!(jumper.animation_frame(), 0);
        jumper.update(0.001);
        assert_eq!(jumper.animation_frame(), 1);
    }

    #[test]
    fn move_left_clamps_at_zero() {
        let mut jumper = jumper();
        for _ in 0..100 {
            jumper.move_left(DT);
            assert!(jumper.x >= 0.0);
        }
        assert_eq!(jumper.x, 0.0);
    }

    #[test]
    fn move_right_clamps_at_scene_edge() {
        let mut jumper = jumper();
        for _ in 0..100 {
            jumper.move_right(DT);
            assert!(jumper.x <= 768.0);
        }
        assert_eq!(jumper.x, 768.0);
    }

    #[test]
    fn sprite_wider_than_scene_is_pinned_to_left_edge() {
        let mut scene = SceneConfig::default();
        scene.jumper.width = 900.0;
        let mut jumper = Jumper::new(&scene);
        assert_eq!(jumper.x, 0.0);

        jumper.move_right(DT);
        assert_eq!(jumper.x, 0.0);
        jumper.move_left(DT);
        assert_eq!(jumper.x, 0.0);
    }

    #[test]
    fn horizontal_moves_work_while_airborne() {
        let mut jumper = jumper();
        jumper.start_jump();
        jumper.move_right(0.01);
        assert!((jumper.x - 358.0).abs() < 1e-4);
        assert!(jumper.is_airborne());
    }

    #[test]
    fn limbs_rest_while_grounded() {
        assert_eq!(jumper().limb_offsets(), (0, 0));
    }

    #[test]
    fn limbs_swing_while_airborne() {
        let mut jumper = jumper();
        jumper.start_jump();
        assert_eq!(jumper.limb_offsets(), (-5, -2));
        for _ in 0..7 {
            jumper.update(0.001);
        }
        assert_eq!(jumper.animation_frame(), 7);
        assert_eq!(jumper.limb_offsets(), (2, 1));
        for _ in 0..6 {
            jumper.update(0.001);
        }
        assert_eq!(jumper.animation_frame(), 13);
        assert_eq!(jumper.limb_offsets(), (-2, -1));
    }

    #[test]
    fn render_draws_seven_parts_in_layer_order() {
        let jumper = jumper();
        let mut canvas = RecordingCanvas::new();
        jumper.render(&mut canvas);

        let rects = canvas.rects();
        assert_eq!(rects.len(), 7);
        assert_eq!(rects[0], (CROWN_COLOR, PixelRect::new(358, 492, 16, 8)));
        assert_eq!(rects[1], (SKIN_COLOR, PixelRect::new(358, 500, 16, 16)));
        assert_eq!(rects[2], (TORSO_COLOR, PixelRect::new(358, 516, 16, 24)));
        assert_eq!(rects[3], (ARM_COLOR, PixelRect::new(350, 516, 8, 16)));
        assert_eq!(rects[4], (ARM_COLOR, PixelRect::new(374, 516, 8, 16)));
        assert_eq!(rects[5], (LEG_COLOR, PixelRect::new(358, 540, 8, 16)));
        assert_eq!(rects[6], (LEG_COLOR, PixelRect::new(366, 540, 8, 16)));
    }

    #[test]
    fn render_applies_limb_offsets_when_airborne() {
        let mut jumper = jumper();
        jumper.start_jump();
        let mut canvas = RecordingCanvas::new();
        jumper.render(&mut canvas);

        let rects = canvas.rects();
        assert_eq!(rects[3].1.x, 345);
        assert_eq!(rects[4].1.x, 379);
        assert_eq!(rects[5].1.x, 356);
        assert_eq!(rects[6].1.x, 368);
    }
}
