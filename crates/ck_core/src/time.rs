use std::time::Instant;

const FPS_SAMPLE_COUNT: usize = 60;

/// Frames longer than this are reported. The step itself is never shortened.
const STALL_WARN_SECS: f64 = 0.25;

/// Variable-step frame clock: every frame simulates exactly the wall-clock
/// time that passed since the previous one.
pub struct FrameClock {
    pub real_dt: f64,
    pub total_time: f64,
    pub frame_count: u64,
    last_instant: Instant,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            real_dt: 0.0,
            total_time: 0.0,
            frame_count: 0,
            last_instant: start,
            fps_samples: [1.0 / 60.0; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 60.0,
            smoothed_frame_time_ms: 16.667,
        }
    }

    /// Seconds elapsed since the previous frame.
    pub fn begin_frame(&mut self) -> f32 {
        self.begin_frame_at(Instant::now())
    }

    pub fn begin_frame_at(&mut self, now: Instant) -> f32 {
        self.real_dt = now.saturating_duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;

        if self.real_dt > STALL_WARN_SECS {
            log::warn!(
                "Frame took {:.1}ms; simulating the full interval",
                self.real_dt * 1000.0
            );
        }

        self.total_time += self.real_dt;
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = self.real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };

        self.real_dt as f32
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
