//! All game entity types. Plain data plus the geometry derived from it;
//! movement rules live in `kinematics`, tick orchestration in `compute`.

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in world units (origin top-left, y grows down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Half-open containment, so adjacent buttons never both claim a click.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

// ── Modes, commands, cues ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    Menu,
    Playing,
    Paused,
    GameOver,
    LevelComplete,
}

/// Input already translated from raw terminal events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Flap,
    TogglePause,
    /// Enter: start from the menu, leave game-over, advance a level.
    Confirm,
    /// Pointer press at a world coordinate.
    Click { x: f32, y: f32 },
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Flap,
    Score,
    Hit,
    PowerUp,
    LevelComplete,
    GameOver,
}

impl SoundCue {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Flap => "flap",
            Self::Score => "score",
            Self::Hit => "hit",
            Self::PowerUp => "power_up",
            Self::LevelComplete => "level_complete",
            Self::GameOver => "game_over",
        }
    }
}

/// A cue the simulation wants played, optionally after a delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CueRequest {
    pub cue: SoundCue,
    pub delay_ms: u64,
}

impl CueRequest {
    pub fn now(cue: SoundCue) -> Self {
        Self { cue, delay_ms: 0 }
    }

    pub fn after(cue: SoundCue, delay_ms: u64) -> Self {
        Self { cue, delay_ms }
    }
}

// ── Bird ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bird {
    pub x: f32,
    pub y: f32,
    /// Vertical only; positive = falling.
    pub velocity: f32,
    pub width: f32,
    pub height: f32,
    /// Hitbox is the sprite rectangle shrunk by this much on every side.
    pub hitbox_inset: f32,
    pub lives: u32,
    /// Single charge; collecting another shield does not stack.
    pub shield: bool,
    /// Sim-time (ms) the invincibility started, if active.
    pub invincible_since: Option<u64>,
    /// Sim-time (ms) the speed boost started, if active.
    pub speed_boost_since: Option<u64>,
    /// Current flap impulse; stronger (more negative) while boosted.
    pub flap_impulse: f32,
    /// Cosmetic wing-frame counter in `[0, 3)`.
    pub anim: f32,
}

impl Bird {
    pub fn hitbox(&self) -> Rect {
        Rect::new(
            self.x + self.hitbox_inset,
            self.y + self.hitbox_inset,
            self.width - 2.0 * self.hitbox_inset,
            self.height - 2.0 * self.hitbox_inset,
        )
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_since.is_some()
    }

    pub fn has_speed_boost(&self) -> bool {
        self.speed_boost_since.is_some()
    }

    pub fn sprite_frame(&self) -> usize {
        self.anim as usize
    }
}

// ── Pipe ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Pipe {
    /// Left edge; decreases every tick.
    pub x: f32,
    pub width: f32,
    /// Top edge of the gap (the top obstacle spans `0..gap_y`).
    pub gap_y: f32,
    pub gap_size: f32,
    pub speed: f32,
    pub screen_height: f32,
    /// Set once when the bird passes; never cleared.
    pub scored: bool,
}

impl Pipe {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top_hitbox(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.gap_y)
    }

    /// Spans gap end to screen bottom. Collapses to zero height when the gap
    /// reaches past the bottom edge.
    pub fn bottom_hitbox(&self) -> Rect {
        let top = self.gap_y + self.gap_size;
        Rect::new(self.x, top, self.width, (self.screen_height - top).max(0.0))
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MovementPattern {
    /// Flies level.
    Straight,
    /// Bobs vertically; `phase` advances by `frequency` each tick.
    Sinusoidal { phase: f32, frequency: f32 },
    /// Occasionally re-acquires a random target height and steps toward it.
    Tracking,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub hitbox_inset: f32,
    pub speed: f32,
    pub pattern: MovementPattern,
    pub anim: f32,
}

impl Enemy {
    pub fn hitbox(&self) -> Rect {
        Rect::new(
            self.x + self.hitbox_inset,
            self.y + self.hitbox_inset,
            self.width - 2.0 * self.hitbox_inset,
            self.height - 2.0 * self.hitbox_inset,
        )
    }

    pub fn sprite_frame(&self) -> usize {
        self.anim as usize
    }
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Stronger flap plus temporary pass-through.
    Speed,
    /// Absorbs one fatal collision.
    Shield,
    /// +1 life.
    ExtraLife,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [Self::Speed, Self::Shield, Self::ExtraLife];
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    pub kind: PowerUpKind,
    /// Render-only pulse in `[0, 1]`.
    pub pulse: f32,
    /// +1 or -1.
    pub pulse_dir: f32,
}

impl PowerUp {
    pub fn hitbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Wall-clock gate on spawn *attempts*.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnTimer {
    pub interval_ms: u64,
    pub last_attempt_ms: u64,
}

/// Everything that belongs to one run of the playing field. Rebuilt on every
/// session reset; owned exclusively by the game state machine.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub bird: Bird,
    pub pipes: Vec<Pipe>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    pub score: u32,
    /// 1-based.
    pub level: u32,
    pub enemy_timer: SpawnTimer,
    pub power_up_timer: SpawnTimer,
    pub frame: u64,
}
