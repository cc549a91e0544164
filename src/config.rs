//! Tunable game constants.
//!
//! Defaults reproduce the classic 800×600 layout. Everything the simulation
//! reads lives here so tests can build odd configurations without touching
//! global state.

use std::time::Duration;

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    // ── World ────────────────────────────────────────────────────────────────
    pub screen_width: f32,
    pub screen_height: f32,
    pub ticks_per_second: u32,
    pub max_levels: u32,
    /// Score needed per level: level N completes at `points_per_level * N`.
    pub points_per_level: u32,

    // ── Bird ─────────────────────────────────────────────────────────────────
    pub bird_x: f32,
    pub bird_width: f32,
    pub bird_height: f32,
    pub bird_hitbox_inset: f32,
    pub gravity: f32,
    pub terminal_velocity: f32,
    /// Negative = upward.
    pub flap_impulse: f32,
    pub boosted_flap_impulse: f32,
    pub starting_lives: u32,
    /// Lifetime of speed boost and invincibility, in milliseconds.
    pub power_up_duration_ms: u64,

    // ── Pipes ────────────────────────────────────────────────────────────────
    pub pipe_width: f32,
    pub pipe_spacing: f32,
    pub initial_pipes: usize,
    pub base_gap: f32,
    pub gap_shrink_per_level: f32,
    /// Gap position is drawn from `[margin, screen_height - margin]`.
    pub gap_margin: f32,
    pub base_pipe_speed: f32,
    pub pipe_speed_per_level: f32,

    // ── Enemies ──────────────────────────────────────────────────────────────
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_hitbox_inset: f32,
    pub base_enemy_speed: f32,
    pub enemy_speed_per_level: f32,
    pub enemy_spawn_interval_ms: u64,

    // ── Power-ups ────────────────────────────────────────────────────────────
    pub power_up_size: f32,
    pub power_up_speed: f32,
    pub power_up_spawn_interval_ms: u64,

    /// Enemies and power-ups appear within `[margin, screen_height - margin]`.
    pub spawn_margin: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            ticks_per_second: 60,
            max_levels: 3,
            points_per_level: 10,

            bird_x: 100.0,
            bird_width: 40.0,
            bird_height: 30.0,
            bird_hitbox_inset: 5.0,
            gravity: 0.5,
            terminal_velocity: 10.0,
            flap_impulse: -8.0,
            boosted_flap_impulse: -12.0,
            starting_lives: 1,
            power_up_duration_ms: 5000,

            pipe_width: 80.0,
            pipe_spacing: 300.0,
            initial_pipes: 3,
            base_gap: 180.0,
            gap_shrink_per_level: 20.0,
            gap_margin: 150.0,
            base_pipe_speed: 3.0,
            pipe_speed_per_level: 0.5,

            enemy_width: 40.0,
            enemy_height: 30.0,
            enemy_hitbox_inset: 5.0,
            base_enemy_speed: 4.0,
            enemy_speed_per_level: 0.5,
            enemy_spawn_interval_ms: 5000,

            power_up_size: 30.0,
            power_up_speed: 3.0,
            power_up_spawn_interval_ms: 7000,

            spawn_margin: 100.0,
        }
    }
}

impl GameConfig {
    pub fn gap_size(&self, level: u32) -> f32 {
        self.base_gap - self.gap_shrink_per_level * level as f32
    }

    pub fn pipe_speed(&self, level: u32) -> f32 {
        self.base_pipe_speed + self.pipe_speed_per_level * level as f32
    }

    pub fn enemy_speed(&self, level: u32) -> f32 {
        self.base_enemy_speed + self.enemy_speed_per_level * level as f32
    }

    pub fn level_target(&self, level: u32) -> u32 {
        self.points_per_level * level
    }

    /// Wall-clock length of one tick.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.ticks_per_second.max(1) as f64)
    }

    /// Reject configurations that would produce degenerate geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floats = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("bird_x", self.bird_x),
            ("bird_width", self.bird_width),
            ("bird_height", self.bird_height),
            ("bird_hitbox_inset", self.bird_hitbox_inset),
            ("gravity", self.gravity),
            ("terminal_velocity", self.terminal_velocity),
            ("flap_impulse", self.flap_impulse),
            ("boosted_flap_impulse", self.boosted_flap_impulse),
            ("pipe_width", self.pipe_width),
            ("pipe_spacing", self.pipe_spacing),
            ("base_gap", self.base_gap),
            ("gap_shrink_per_level", self.gap_shrink_per_level),
            ("gap_margin", self.gap_margin),
            ("base_pipe_speed", self.base_pipe_speed),
            ("pipe_speed_per_level", self.pipe_speed_per_level),
            ("enemy_width", self.enemy_width),
            ("enemy_height", self.enemy_height),
            ("enemy_hitbox_inset", self.enemy_hitbox_inset),
            ("base_enemy_speed", self.base_enemy_speed),
            ("enemy_speed_per_level", self.enemy_speed_per_level),
            ("power_up_size", self.power_up_size),
            ("power_up_speed", self.power_up_speed),
            ("spawn_margin", self.spawn_margin),
        ];
        // NaN and infinities slip past ordered comparisons below.
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        let positives = [
            ("screen_width", self.screen_width),
            ("gravity", self.gravity),
            ("terminal_velocity", self.terminal_velocity),
            ("pipe_width", self.pipe_width),
            ("pipe_spacing", self.pipe_spacing),
            ("bird_width", self.bird_width - 2.0 * self.bird_hitbox_inset),
            ("bird_height", self.bird_height - 2.0 * self.bird_hitbox_inset),
            ("enemy_width", self.enemy_width - 2.0 * self.enemy_hitbox_inset),
            ("enemy_height", self.enemy_height - 2.0 * self.enemy_hitbox_inset),
            ("power_up_size", self.power_up_size),
        ];
        for (field, value) in positives {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.max_levels == 0 {
            return Err(ConfigError::ZeroMaxLevels);
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::ZeroLives);
        }

        let min_height = 2.0 * self.gap_margin.max(self.spawn_margin);
        if !(self.screen_height >= min_height) {
            return Err(ConfigError::ScreenTooSmall {
                width: self.screen_width,
                height: self.screen_height,
                min_height,
            });
        }

        // The gap only shrinks, so the last level is the tightest.
        let gap = self.gap_size(self.max_levels);
        if !(gap > 0.0) {
            return Err(ConfigError::NonPositiveGap {
                level: self.max_levels,
                gap,
            });
        }
        Ok(())
    }
}
