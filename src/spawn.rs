//! Spawn scheduling: interval gates, level-scaled probabilities and the
//! constructors for freshly spawned entities.
//!
//! Timers gate *attempts*. Once an interval has elapsed the attempt is made
//! and the timer re-armed, whether or not the dice produced an entity.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Enemy, MovementPattern, Pipe, PowerUp, PowerUpKind, SpawnTimer};

/// Enemy spawn chance grows per level.
const ENEMY_CHANCE_PER_LEVEL: f64 = 0.3;

/// Power-up chance shrinks per level from a fixed base.
const POWER_UP_BASE_CHANCE: f64 = 0.4;
const POWER_UP_CHANCE_PER_LEVEL: f64 = 0.05;

/// Draw weights, in `PowerUpKind::ALL` order.
pub const POWER_UP_WEIGHTS: [f64; 3] = [0.4, 0.4, 0.2];

/// Range the sinusoidal phase step is drawn from.
const SINE_FREQUENCY: std::ops::Range<f32> = 0.02..0.05;

// ── Timers ────────────────────────────────────────────────────────────────────

impl SpawnTimer {
    pub fn armed(interval_ms: u64, now_ms: u64) -> Self {
        Self {
            interval_ms,
            last_attempt_ms: now_ms,
        }
    }

    /// True (and re-armed) when the interval has strictly elapsed.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_attempt_ms) > self.interval_ms {
            self.last_attempt_ms = now_ms;
            true
        } else {
            false
        }
    }
}

// ── Probabilities ─────────────────────────────────────────────────────────────

/// `0.3 × level`, treated as certainty once it passes 1.
pub fn enemy_spawn_chance(level: u32) -> f64 {
    (ENEMY_CHANCE_PER_LEVEL * level as f64).clamp(0.0, 1.0)
}

/// `0.4 − 0.05 × level`, floored at 0.
pub fn power_up_spawn_chance(level: u32) -> f64 {
    (POWER_UP_BASE_CHANCE - POWER_UP_CHANCE_PER_LEVEL * level as f64).clamp(0.0, 1.0)
}

/// Cumulative-sum draw over `POWER_UP_WEIGHTS`.
pub fn choose_power_up_kind(rng: &mut impl Rng) -> PowerUpKind {
    let roll: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (kind, weight) in PowerUpKind::ALL.iter().zip(POWER_UP_WEIGHTS) {
        cumulative += weight;
        if roll <= cumulative {
            return *kind;
        }
    }
    PowerUpKind::ALL[0]
}

fn spawn_height(config: &GameConfig, rng: &mut impl Rng) -> f32 {
    let lo = config.spawn_margin;
    let hi = config.screen_height - config.spawn_margin;
    rng.gen_range(lo..=hi)
}

// ── Constructors ──────────────────────────────────────────────────────────────

pub fn new_pipe(x: f32, level: u32, config: &GameConfig, rng: &mut impl Rng) -> Pipe {
    let lo = config.gap_margin;
    let hi = config.screen_height - config.gap_margin;
    Pipe {
        x,
        width: config.pipe_width,
        gap_y: rng.gen_range(lo..=hi),
        gap_size: config.gap_size(level),
        speed: config.pipe_speed(level),
        screen_height: config.screen_height,
        scored: false,
    }
}

/// The fixed starting row of pipes, just off the right edge.
pub fn initial_pipes(level: u32, config: &GameConfig, rng: &mut impl Rng) -> Vec<Pipe> {
    (0..config.initial_pipes)
        .map(|i| {
            let x = config.screen_width + i as f32 * config.pipe_spacing;
            new_pipe(x, level, config, rng)
        })
        .collect()
}

/// A pipe placed one spacing right of the current rightmost pipe.
pub fn replacement_pipe(
    remaining: &[Pipe],
    level: u32,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Pipe {
    let x = remaining
        .iter()
        .map(|p| p.x)
        .reduce(f32::max)
        .map(|max_x| max_x + config.pipe_spacing)
        .unwrap_or(config.screen_width);
    new_pipe(x, level, config, rng)
}

pub fn new_enemy(y: f32, level: u32, config: &GameConfig, rng: &mut impl Rng) -> Enemy {
    let pattern = match rng.gen_range(0..3) {
        0 => MovementPattern::Straight,
        1 => MovementPattern::Sinusoidal {
            phase: 0.0,
            frequency: rng.gen_range(SINE_FREQUENCY),
        },
        _ => MovementPattern::Tracking,
    };
    Enemy {
        x: config.screen_width,
        y,
        width: config.enemy_width,
        height: config.enemy_height,
        hitbox_inset: config.enemy_hitbox_inset,
        speed: config.enemy_speed(level),
        pattern,
        anim: 0.0,
    }
}

pub fn new_power_up(y: f32, kind: PowerUpKind, config: &GameConfig) -> PowerUp {
    PowerUp {
        x: config.screen_width,
        y,
        size: config.power_up_size,
        speed: config.power_up_speed,
        kind,
        pulse: 0.0,
        pulse_dir: 1.0,
    }
}

// ── Attempts ──────────────────────────────────────────────────────────────────

/// One enemy spawn attempt; `None` when the roll fails.
pub fn try_spawn_enemy(level: u32, config: &GameConfig, rng: &mut impl Rng) -> Option<Enemy> {
    if !rng.gen_bool(enemy_spawn_chance(level)) {
        return None;
    }
    let y = spawn_height(config, rng);
    Some(new_enemy(y, level, config, rng))
}

/// One power-up spawn attempt; `None` when the roll fails.
pub fn try_spawn_power_up(
    level: u32,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Option<PowerUp> {
    if !rng.gen_bool(power_up_spawn_chance(level)) {
        return None;
    }
    let y = spawn_height(config, rng);
    let kind = choose_power_up_kind(rng);
    Some(new_power_up(y, kind, config))
}
