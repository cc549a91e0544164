//! Top-level state machine: MENU → PLAYING ⇄ PAUSED, PLAYING → GAME_OVER or
//! LEVEL_COMPLETE, and back.
//!
//! `Game` owns the session and is its only mutator. Callers pass a monotonic
//! wall-clock `now_ms` sampled once per frame; time spent paused is excluded
//! from everything the simulation sees.

use rand::Rng;
use tracing::{info, warn};

use crate::compute::{self, Resolution, GAME_OVER_CUE_DELAY_MS};
use crate::config::GameConfig;
use crate::entities::{Command, CueRequest, GameMode, Session, SoundCue};
use crate::error::ConfigError;
use crate::ui::{button_at, game_over_buttons, menu_buttons, ButtonAction};

/// Pause between the game-over sting and the new-high-score chime.
const HIGH_SCORE_CUE_DELAY_MS: u64 = 1000;

#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    mode: GameMode,
    session: Session,
    high_score: u32,
    /// Wall time the current pause began.
    paused_at: Option<u64>,
    /// Total wall time spent in finished pauses.
    paused_total: u64,
    quit: bool,
}

impl Game {
    /// Validates `config` and starts in the menu.
    pub fn new(
        config: GameConfig,
        high_score: u32,
        now_ms: u64,
        rng: &mut impl Rng,
    ) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            warn!("rejected configuration: {err}");
            return Err(err);
        }
        let session = compute::new_session(1, 0, &config, now_ms, rng);
        Ok(Self {
            config,
            mode: GameMode::Menu,
            session,
            high_score,
            paused_at: None,
            paused_total: 0,
            quit: false,
        })
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Wall time minus every paused interval, including one in progress.
    pub fn sim_time(&self, now_ms: u64) -> u64 {
        let current = self
            .paused_at
            .map(|at| now_ms.saturating_sub(at))
            .unwrap_or(0);
        now_ms.saturating_sub(self.paused_total + current)
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    pub fn on_input(&mut self, command: Command, now_ms: u64, rng: &mut impl Rng) -> Vec<CueRequest> {
        if command == Command::Quit {
            self.quit = true;
            return Vec::new();
        }

        match self.mode {
            GameMode::Menu => match command {
                Command::Confirm => self.start_session(1, 0, now_ms, rng),
                Command::Click { x, y } => match button_at(&menu_buttons(&self.config), x, y) {
                    Some(ButtonAction::StartGame) => self.start_session(1, 0, now_ms, rng),
                    Some(ButtonAction::Exit) => self.quit = true,
                    _ => {}
                },
                _ => {}
            },
            GameMode::Playing => match command {
                Command::Flap | Command::Click { .. } => {
                    let (session, cue) = compute::player_flap(&self.session);
                    self.session = session;
                    return vec![cue];
                }
                Command::TogglePause => {
                    self.paused_at = Some(now_ms);
                    self.set_mode(GameMode::Paused);
                }
                _ => {}
            },
            GameMode::Paused => {
                if command == Command::TogglePause {
                    if let Some(at) = self.paused_at.take() {
                        self.paused_total += now_ms.saturating_sub(at);
                    }
                    self.set_mode(GameMode::Playing);
                }
            }
            GameMode::GameOver => match command {
                Command::Confirm => self.set_mode(GameMode::Menu),
                Command::Click { x, y } => {
                    match button_at(&game_over_buttons(&self.config), x, y) {
                        Some(ButtonAction::Restart) => {
                            let level = self.session.level;
                            self.start_session(level, 0, now_ms, rng);
                        }
                        Some(ButtonAction::MainMenu) => self.set_mode(GameMode::Menu),
                        _ => {}
                    }
                }
                _ => {}
            },
            GameMode::LevelComplete => {
                if command == Command::Confirm {
                    self.advance_level(now_ms, rng);
                }
            }
        }
        Vec::new()
    }

    // ── Tick ──────────────────────────────────────────────────────────────────

    /// One simulation step. Does nothing outside PLAYING.
    pub fn on_tick(&mut self, now_ms: u64, rng: &mut impl Rng) -> Vec<CueRequest> {
        if self.mode != GameMode::Playing {
            return Vec::new();
        }
        let sim_now = self.sim_time(now_ms);
        let outcome = compute::tick(&self.session, &self.config, sim_now, rng);
        self.session = outcome.session;
        let mut cues = outcome.cues;

        if outcome.resolution == Some(Resolution::Dead) {
            cues.extend(self.game_over());
        } else if outcome.level_complete {
            info!(
                level = self.session.level,
                score = self.session.score,
                "level complete"
            );
            cues.push(CueRequest::now(SoundCue::LevelComplete));
            self.set_mode(GameMode::LevelComplete);
        }
        cues
    }

    // ── Transitions ───────────────────────────────────────────────────────────

    fn set_mode(&mut self, mode: GameMode) {
        if self.mode != mode {
            info!(from = ?self.mode, to = ?mode, "mode change");
            self.mode = mode;
        }
    }

    /// Full reset of the playing field, then PLAYING.
    fn start_session(&mut self, level: u32, score: u32, now_ms: u64, rng: &mut impl Rng) {
        let sim_now = self.sim_time(now_ms);
        self.session = compute::new_session(level, score, &self.config, sim_now, rng);
        info!(level, score, "session started");
        self.set_mode(GameMode::Playing);
    }

    /// Next level keeps the running score; wrapping past the last level
    /// starts a fresh run.
    fn advance_level(&mut self, now_ms: u64, rng: &mut impl Rng) {
        let next = self.session.level + 1;
        let (level, score) = if next > self.config.max_levels {
            info!("all levels complete, wrapping to level 1");
            (1, 0)
        } else {
            (next, self.session.score)
        };
        self.start_session(level, score, now_ms, rng);
    }

    fn game_over(&mut self) -> Vec<CueRequest> {
        let score = self.session.score;
        let mut cues = Vec::new();
        if score > self.high_score {
            self.high_score = score;
            cues.push(CueRequest::after(
                SoundCue::Score,
                GAME_OVER_CUE_DELAY_MS + HIGH_SCORE_CUE_DELAY_MS,
            ));
        }
        info!(score, high_score = self.high_score, "game over");
        self.set_mode(GameMode::GameOver);
        cues
    }
}
