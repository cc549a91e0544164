//! Playing-field logic.
//!
//! Every public function takes an immutable reference to the current
//! `Session` (and, where needed, an RNG handle and the tick's sim-time) and
//! returns a brand-new value. Side effects are limited to the injected RNG;
//! sounds are returned as `CueRequest`s for the caller to schedule.

use rand::Rng;
use tracing::debug;

use crate::collision::{bird_hits_enemy, bird_hits_pipe, bird_out_of_bounds, bird_touches_power_up};
use crate::config::GameConfig;
use crate::entities::{Bird, CueRequest, Pipe, PowerUpKind, Session, SoundCue, SpawnTimer};
use crate::kinematics::{flap, update_bird, update_enemy, update_pipe, update_power_up};
use crate::spawn::{initial_pipes, replacement_pipe, try_spawn_enemy, try_spawn_power_up};

/// Delay before the power-up jingle, and before the extra-life chime.
const POWER_UP_CUE_DELAY_MS: u64 = 50;
const EXTRA_LIFE_CUE_DELAY_MS: u64 = 100;
/// Gap between the crash and the game-over sting.
pub const GAME_OVER_CUE_DELAY_MS: u64 = 700;

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn new_bird(config: &GameConfig) -> Bird {
    Bird {
        x: config.bird_x,
        y: (config.screen_height / 2.0).floor(),
        velocity: 0.0,
        width: config.bird_width,
        height: config.bird_height,
        hitbox_inset: config.bird_hitbox_inset,
        lives: config.starting_lives,
        shield: false,
        invincible_since: None,
        speed_boost_since: None,
        flap_impulse: config.flap_impulse,
        anim: 0.0,
    }
}

/// A fresh playing field: new bird, no enemies or power-ups, the initial
/// pipe row, and both spawn timers armed at `now_ms`.
pub fn new_session(
    level: u32,
    score: u32,
    config: &GameConfig,
    now_ms: u64,
    rng: &mut impl Rng,
) -> Session {
    Session {
        bird: new_bird(config),
        pipes: initial_pipes(level, config, rng),
        enemies: Vec::new(),
        power_ups: Vec::new(),
        score,
        level,
        enemy_timer: SpawnTimer::armed(config.enemy_spawn_interval_ms, now_ms),
        power_up_timer: SpawnTimer::armed(config.power_up_spawn_interval_ms, now_ms),
        frame: 0,
    }
}

// ── Input-driven transitions ─────────────────────────────────────────────────

pub fn player_flap(state: &Session) -> (Session, CueRequest) {
    let (bird, cue) = flap(&state.bird);
    (Session { bird, ..state.clone() }, cue)
}

// ── Power-ups and damage ─────────────────────────────────────────────────────

/// Effect of collecting a power-up.
pub fn apply_power_up(
    bird: &Bird,
    kind: PowerUpKind,
    config: &GameConfig,
    now_ms: u64,
) -> (Bird, Vec<CueRequest>) {
    let mut cues = vec![CueRequest::after(SoundCue::PowerUp, POWER_UP_CUE_DELAY_MS)];
    let bird = match kind {
        PowerUpKind::Speed => Bird {
            speed_boost_since: Some(now_ms),
            flap_impulse: config.boosted_flap_impulse,
            invincible_since: Some(now_ms),
            ..bird.clone()
        },
        PowerUpKind::Shield => Bird {
            shield: true,
            ..bird.clone()
        },
        PowerUpKind::ExtraLife => {
            cues.push(CueRequest::after(SoundCue::Score, EXTRA_LIFE_CUE_DELAY_MS));
            Bird {
                lives: bird.lives + 1,
                ..bird.clone()
            }
        }
    };
    debug!(?kind, lives = bird.lives, shield = bird.shield, "power-up applied");
    (bird, cues)
}

/// What a fatal collision cost the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    ShieldAbsorbed,
    LifeLost,
    Dead,
}

/// Shield first, then a spare life, then death.
pub fn resolve_fatal_collision(bird: &Bird, config: &GameConfig) -> (Bird, Resolution) {
    if bird.shield {
        debug!("shield absorbed a hit");
        return (
            Bird {
                shield: false,
                ..bird.clone()
            },
            Resolution::ShieldAbsorbed,
        );
    }
    if bird.lives > 1 {
        debug!(lives_left = bird.lives - 1, "life lost");
        return (
            Bird {
                lives: bird.lives - 1,
                y: (config.screen_height / 2.0).floor(),
                velocity: 0.0,
                ..bird.clone()
            },
            Resolution::LifeLost,
        );
    }
    (bird.clone(), Resolution::Dead)
}

fn resolution_cues(resolution: Resolution) -> Vec<CueRequest> {
    match resolution {
        Resolution::ShieldAbsorbed => vec![CueRequest::now(SoundCue::PowerUp)],
        Resolution::LifeLost => vec![CueRequest::now(SoundCue::Hit)],
        Resolution::Dead => vec![
            CueRequest::now(SoundCue::Hit),
            CueRequest::after(SoundCue::GameOver, GAME_OVER_CUE_DELAY_MS),
        ],
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct TickOutcome {
    pub session: Session,
    pub cues: Vec<CueRequest>,
    /// Set when at least one fatal collision happened this tick.
    pub resolution: Option<Resolution>,
    /// Score reached the level target (never set alongside `Dead`).
    pub level_complete: bool,
}

/// Advance the playing field by one tick at sim-time `now_ms`.
pub fn tick(
    state: &Session,
    config: &GameConfig,
    now_ms: u64,
    rng: &mut impl Rng,
) -> TickOutcome {
    let mut cues = Vec::new();

    // ── 1. Bird ──────────────────────────────────────────────────────────────
    let mut bird = update_bird(&state.bird, config, now_ms);

    // ── 2. Pipes: move, score, retire and replace ────────────────────────────
    let mut score = state.score;
    let moved: Vec<Pipe> = state
        .pipes
        .iter()
        .map(|p| {
            let mut p = update_pipe(p);
            if !p.scored && p.right() < bird.x {
                p.scored = true;
                score += 1;
                cues.push(CueRequest::now(SoundCue::Score));
            }
            p
        })
        .collect();
    let retired = moved.iter().filter(|p| p.right() < 0.0).count();
    let mut pipes: Vec<Pipe> = moved.into_iter().filter(|p| p.right() >= 0.0).collect();
    for _ in 0..retired {
        let pipe = replacement_pipe(&pipes, state.level, config, rng);
        pipes.push(pipe);
    }

    // ── 3. Power-ups: move, collect, retire ──────────────────────────────────
    let mut power_ups = Vec::with_capacity(state.power_ups.len());
    for power_up in &state.power_ups {
        let power_up = update_power_up(power_up);
        if bird_touches_power_up(&bird, &power_up) {
            let (next, effect_cues) = apply_power_up(&bird, power_up.kind, config, now_ms);
            bird = next;
            cues.extend(effect_cues);
        } else if power_up.x + power_up.size >= 0.0 {
            power_ups.push(power_up);
        }
    }

    // ── 4. Enemies: move, collide, retire ────────────────────────────────────
    let mut fatal = false;
    let mut enemies = Vec::with_capacity(state.enemies.len());
    for enemy in &state.enemies {
        let enemy = update_enemy(enemy, config, rng);
        if bird_hits_enemy(&bird, &enemy) && !bird.is_invincible() {
            fatal = true;
        }
        if enemy.x + enemy.width >= 0.0 {
            enemies.push(enemy);
        }
    }

    // ── 5. Pipes and screen bounds ───────────────────────────────────────────
    if !bird.is_invincible() && pipes.iter().any(|p| bird_hits_pipe(&bird, p)) {
        fatal = true;
    }
    if bird_out_of_bounds(&bird, config.screen_height) {
        fatal = true;
    }

    // Any number of hits this tick collapse into one resolution.
    let resolution = if fatal {
        let (next, resolution) = resolve_fatal_collision(&bird, config);
        bird = next;
        cues.extend(resolution_cues(resolution));
        Some(resolution)
    } else {
        None
    };

    // ── 6. Spawns ────────────────────────────────────────────────────────────
    let mut enemy_timer = state.enemy_timer;
    if enemy_timer.poll(now_ms) {
        if let Some(enemy) = try_spawn_enemy(state.level, config, rng) {
            debug!(y = enemy.y, pattern = ?enemy.pattern, "enemy spawned");
            enemies.push(enemy);
        }
    }
    let mut power_up_timer = state.power_up_timer;
    if power_up_timer.poll(now_ms) {
        if let Some(power_up) = try_spawn_power_up(state.level, config, rng) {
            debug!(y = power_up.y, kind = ?power_up.kind, "power-up spawned");
            power_ups.push(power_up);
        }
    }

    // ── 7. Level progress ────────────────────────────────────────────────────
    let level_complete =
        resolution != Some(Resolution::Dead) && score >= config.level_target(state.level);

    TickOutcome {
        session: Session {
            bird,
            pipes,
            enemies,
            power_ups,
            score,
            enemy_timer,
            power_up_timer,
            frame: state.frame + 1,
            ..state.clone()
        },
        cues,
        resolution,
        level_complete,
    }
}
