//! Per-tick sequencing: route input, advance actors, draw in fixed order.
//!
//! Draw order is background, clouds, jumper, patroller, dialog; later draws
//! overdraw earlier ones. Once the dialog has ended only the terminal screen
//! is drawn and no actor is updated. Presenting the frame is left to the
//! caller.

use ck_core::canvas::Canvas;
use ck_core::config::SceneConfig;
use ck_core::input::{InputEvent, Key, MouseBtn};

use crate::dialog::{self, DialogSequencer};
use crate::jumper::Jumper;
use crate::patroller::Patroller;
use crate::scene::Background;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

pub struct FrameLoop {
    background: Background,
    jumper: Jumper,
    patroller: Patroller,
    dialog: DialogSequencer,
}

impl FrameLoop {
    pub fn new(config: &SceneConfig, script: Vec<String>) -> Result<Self, String> {
        config.validate()?;
        Ok(Self {
            background: Background::new(config),
            jumper: Jumper::new(config),
            patroller: Patroller::new(config),
            dialog: DialogSequencer::new(script, config)?,
        })
    }

    pub fn jumper(&self) -> &Jumper {
        &self.jumper
    }

    pub fn patroller(&self) -> &Patroller {
        &self.patroller
    }

    pub fn dialog(&self) -> &DialogSequencer {
        &self.dialog
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Run one frame. Every event is handled before anything is simulated;
    /// a quit request still lets the current frame finish.
    pub fn tick<I>(&mut self, dt: f32, events: I, canvas: &mut dyn Canvas) -> LoopControl
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let mut control = LoopControl::Continue;
        for event in events {
            if self.dispatch(event, dt) == LoopControl::Quit {
                control = LoopControl::Quit;
            }
        }

        if self.dialog.is_ended() {
            dialog::render_end_screen(canvas);
            return control;
        }

        self.jumper.update(dt);
        self.patroller.update(dt);

        self.background.render_background(canvas);
        self.background.render_decorations(dt, canvas);
        self.jumper.render(canvas);
        self.patroller.render(canvas);
        self.dialog.render(canvas);

        control
    }

    fn dispatch(&mut self, event: InputEvent, dt: f32) -> LoopControl {
        match event {
            InputEvent::Quit => return LoopControl::Quit,
            InputEvent::KeyDown { key: Key::Up } => self.jumper.start_jump(),
            InputEvent::KeyDown { key: Key::Left } => self.jumper.move_left(dt),
            InputEvent::KeyDown { key: Key::Right } => self.jumper.move_right(dt),
            InputEvent::MouseDown {
                button: MouseBtn::Left,
            } => self.dialog.advance(),
            InputEvent::MouseDown { .. } => {}
        }
        LoopControl::Continue
    }
}
