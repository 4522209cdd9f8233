use crate::frame_loop::{FrameLoop, LoopControl};
use crate::recording::RecordingCanvas;
use ck_core::input::InputEvent;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Scripted sequence of frames, each with its own `dt` and input events.
#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default = "default_dt")]
    pub dt: f32,
    #[serde(default)]
    pub events: Vec<InputEvent>,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    /// Feed every frame through `frame_loop`, stopping after a frame that
    /// requested quit. Returns the number of ticks run and the final control.
    pub fn run(&self, frame_loop: &mut FrameLoop) -> (usize, LoopControl) {
        let mut canvas = RecordingCanvas::new();
        let mut ticks = 0;
        for frame in &self.frames {
            for _ in 0..frame.repeat.max(1) {
                canvas.ops.clear();
                let control = frame_loop.tick(frame.dt, frame.events.iter().copied(), &mut canvas);
                ticks += 1;
                if control == LoopControl::Quit {
                    return (ticks, control);
                }
            }
        }
        (ticks, LoopControl::Continue)
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    if replay.frames.iter().any(|f| f.dt < 0.0) {
        return Err("Replay validation failed: dt must be >= 0".to_string());
    }
    Ok(())
}

const fn default_dt() -> f32 {
    1.0 / 60.0
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::default_script;
    use ck_core::config::SceneConfig;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "ck_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn frame_loop() -> FrameLoop {
        FrameLoop::new(&SceneConfig::default(), default_script()).expect("valid setup")
    }

    #[test]
    fn replay_file_parses_with_defaults() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{
              "frames": [
                { "repeat": 3 },
                { "dt": 0.02, "events": [{ "type": "key_down", "key": "up" }] }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        assert_eq!(replay.frames.len(), 2);
        assert_eq!(replay.frames[0].repeat, 3);
        assert!(replay.frames[0].events.is_empty());
        assert!((replay.frames[0].dt - 1.0 / 60.0).abs() < 1e-7);
        assert_eq!(replay.frames[1].repeat, 1);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_rejects_empty_and_negative_dt() {
        let path = temp_file_path("invalid");
        fs::write(&path, r#"{ "frames": [] }"#).expect("write replay file");
        assert!(load_replay_from_path(&path).is_err());

        fs::write(&path, r#"{ "frames": [{ "dt": -0.1 }] }"#).expect("write replay file");
        assert!(load_replay_from_path(&path).is_err());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_run_is_deterministic() {
        let path = temp_file_path("deterministic");
        fs::write(
            &path,
            r#"{
              "frames": [
                { "repeat": 30 },
                { "events": [{ "type": "key_down", "key": "up" }] },
                { "events": [{ "type": "key_down", "key": "right" }], "repeat": 20 },
                { "dt": 0.05, "repeat": 10 },
                { "events": [{ "type": "mouse_down", "button": "left" }] },
                { "events": [{ "type": "key_down", "key": "left" }], "repeat": 45 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let mut run_a = frame_loop();
        let mut run_b = frame_loop();
        replay.run(&mut run_a);
        replay.run(&mut run_b);

        assert_eq!(run_a.jumper().x, run_b.jumper().x);
        assert_eq!(run_a.jumper().y, run_b.jumper().y);
        assert_eq!(run_a.jumper().state(), run_b.jumper().state());
        assert_eq!(run_a.patroller().x, run_b.patroller().x);
        assert_eq!(run_a.patroller().heading(), run_b.patroller().heading());
        assert_eq!(run_a.dialog().cursor(), run_b.dialog().cursor());
        assert_eq!(run_a.dialog().cursor(), 1);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_stops_after_quit_frame() {
        let replay: ReplaySequence = serde_json::from_str(
            r#"{
              "frames": [
                { "repeat": 5 },
                { "events": [{ "type": "quit" }] },
                { "repeat": 100 }
              ]
            }"#,
        )
        .expect("replay should parse");

        let mut frame_loop = frame_loop();
        let (ticks, control) = replay.run(&mut frame_loop);
        assert_eq!(ticks, 6);
        assert_eq!(control, LoopControl::Quit);
    }

    #[test]
    fn replay_through_whole_dialog_ends_on_terminal_screen() {
        let replay: ReplaySequence = serde_json::from_str(
            r#"{
              "frames": [
                { "events": [{ "type": "mouse_down", "button": "left" }], "repeat": 3 },
                { "dt": 1.0, "repeat": 2 }
              ]
            }"#,
        )
        .expect("replay should parse");

        let mut frame_loop = frame_loop();
        let patroller_before = {
            let mut probe = FrameLoop::new(&SceneConfig::default(), default_script())
                .expect("valid setup");
            let mut canvas = RecordingCanvas::new();
            for _ in 0..2 {
                probe.tick(1.0 / 60.0, std::iter::empty(), &mut canvas);
            }
            probe.patroller().x
        };
        replay.run(&mut frame_loop);

        assert!(frame_loop.dialog().is_ended());
        // Only the two ticks before the third click moved anything.
        assert_eq!(frame_loop.patroller().x, patroller_before);
    }
}
