//! Per-entity movement rules.
//!
//! Every function takes the current entity by reference and returns the next
//! one. Randomness (tracking enemies only) comes through the injected `rng`.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Bird, CueRequest, Enemy, MovementPattern, Pipe, PowerUp, SoundCue};

/// Wing/flap animation advance per tick, over `ANIM_FRAMES` frames.
const ANIM_STEP: f32 = 0.2;
const ANIM_FRAMES: f32 = 3.0;

/// Vertical displacement multiplier for sinusoidal enemies.
const SINE_SCALE: f32 = 2.0;

/// Per-tick chance that a tracking enemy picks a new target height.
const RETARGET_CHANCE: f64 = 0.05;
const TRACK_STEP: f32 = 2.0;

const PULSE_STEP: f32 = 0.1;

fn advance_anim(anim: f32) -> f32 {
    let next = anim + ANIM_STEP;
    if next >= ANIM_FRAMES {
        0.0
    } else {
        next
    }
}

// ── Bird ──────────────────────────────────────────────────────────────────────

/// Gravity, terminal-velocity clamp, position, then timed power-up expiry.
pub fn update_bird(bird: &Bird, config: &GameConfig, now_ms: u64) -> Bird {
    let velocity = (bird.velocity + config.gravity).min(config.terminal_velocity);
    let expired = |since: Option<u64>| {
        since.filter(|&t| now_ms.saturating_sub(t) <= config.power_up_duration_ms)
    };

    let speed_boost_since = expired(bird.speed_boost_since);
    let flap_impulse = if bird.speed_boost_since.is_some() && speed_boost_since.is_none() {
        config.flap_impulse
    } else {
        bird.flap_impulse
    };

    Bird {
        y: bird.y + velocity,
        velocity,
        invincible_since: expired(bird.invincible_since),
        speed_boost_since,
        flap_impulse,
        anim: advance_anim(bird.anim),
        ..bird.clone()
    }
}

/// Launch upward. The returned cue is for the audio collaborator; whether it
/// actually plays is irrelevant to the simulation.
pub fn flap(bird: &Bird) -> (Bird, CueRequest) {
    let bird = Bird {
        velocity: bird.flap_impulse,
        ..bird.clone()
    };
    (bird, CueRequest::now(SoundCue::Flap))
}

// ── Pipe ──────────────────────────────────────────────────────────────────────

pub fn update_pipe(pipe: &Pipe) -> Pipe {
    Pipe {
        x: pipe.x - pipe.speed,
        ..pipe.clone()
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

pub fn update_enemy(enemy: &Enemy, config: &GameConfig, rng: &mut impl Rng) -> Enemy {
    let x = enemy.x - enemy.speed;
    let mut y = enemy.y;
    let mut pattern = enemy.pattern;

    match &mut pattern {
        MovementPattern::Straight => {}
        MovementPattern::Sinusoidal { phase, frequency } => {
            *phase += *frequency;
            y += phase.sin() * SINE_SCALE;
        }
        MovementPattern::Tracking => {
            if rng.gen_bool(RETARGET_CHANCE) {
                let lo = config.spawn_margin;
                let hi = config.screen_height - config.spawn_margin;
                let target = rng.gen_range(lo..=hi);
                y += if y < target { TRACK_STEP } else { -TRACK_STEP };
            }
        }
    }

    let y = y.clamp(0.0, (config.screen_height - enemy.height).max(0.0));

    Enemy {
        x,
        y,
        pattern,
        anim: advance_anim(enemy.anim),
        ..enemy.clone()
    }
}

// ── Power-up ──────────────────────────────────────────────────────────────────

/// Drift left; the pulse ping-pongs between 0 and 1.
pub fn update_power_up(power_up: &PowerUp) -> PowerUp {
    let pulse = power_up.pulse + PULSE_STEP * power_up.pulse_dir;
    let pulse_dir = if pulse >= 1.0 {
        -1.0
    } else if pulse <= 0.0 {
        1.0
    } else {
        power_up.pulse_dir
    };

    PowerUp {
        x: power_up.x - power_up.speed,
        pulse: pulse.clamp(0.0, 1.0),
        pulse_dir,
        ..power_up.clone()
    }
}
