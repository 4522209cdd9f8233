/// Tuning for the player-controlled jumper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumperConfig {
    pub start_x: f32,
    /// Downward acceleration in px/s^2 (screen y grows downward).
    pub gravity: f32,
    /// Initial vertical velocity of a jump in px/s (negative = up).
    pub jump_velocity: f32,
    pub horizontal_speed: f32,
    pub width: f32,
}

impl Default for JumperConfig {
    fn default() -> Self {
        Self {
            start_x: 350.0,
            gravity: 2000.0,
            jump_velocity: -900.0,
            horizontal_speed: 800.0,
            width: 32.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatrollerConfig {
    pub start_x: f32,
    pub speed: f32,
    pub width: f32,
}

impl Default for PatrollerConfig {
    fn default() -> Self {
        Self {
            start_x: 100.0,
            speed: 200.0,
            width: 32.0,
        }
    }
}

/// Immutable scene description handed to every component at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    pub width: f32,
    pub height: f32,
    /// Rest height shared by both actors.
    pub ground_y: f32,
    pub jumper: JumperConfig,
    pub patroller: PatrollerConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            ground_y: 500.0,
            jumper: JumperConfig::default(),
            patroller: PatrollerConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(format!(
                "Scene config validation failed: scene size {}x{} must be positive",
                self.width, self.height
            ));
        }
        if self.ground_y <= 0.0 || self.ground_y > self.height {
            return Err(format!(
                "Scene config validation failed: ground_y {} is outside (0, {}]",
                self.ground_y, self.height
            ));
        }
        for (name, width) in [
            ("jumper", self.jumper.width),
            ("patroller", self.patroller.width),
        ] {
            if width <= 0.0 || width > self.width {
                return Err(format!(
                    "Scene config validation failed: {name} width {width} does not fit a {}px scene",
                    self.width
                ));
            }
        }
        if self.jumper.gravity <= 0.0 {
            return Err("Scene config validation failed: gravity must be > 0".to_string());
        }
        if self.jumper.jump_velocity >= 0.0 {
            return Err(
                "Scene config validation failed: jump_velocity must point upward (< 0)"
                    .to_string(),
            );
        }
        if self.jumper.horizontal_speed < 0.0 || self.patroller.speed < 0.0 {
            return Err("Scene config validation failed: speeds must be >= 0".to_string());
        }
        Ok(())
    }

    /// Rightmost x an actor of `sprite_width` may occupy. Never below 0, so
    /// a sprite wider than the scene is pinned to the left edge.
    pub fn max_x(&self, sprite_width: f32) -> f32 {
        (self.width - sprite_width).max(0.0)
    }
}
