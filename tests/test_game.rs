use flappy_adventure::config::GameConfig;
use flappy_adventure::entities::*;
use flappy_adventure::error::ConfigError;
use flappy_adventure::game::Game;
use flappy_adventure::ui::{game_over_buttons, menu_buttons};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn make_game(config: GameConfig, high_score: u32) -> (Game, StdRng) {
    let mut rng = seeded_rng();
    let game = Game::new(config, high_score, 0, &mut rng).unwrap();
    (game, rng)
}

/// Game already in PLAYING at wall time 0.
fn playing(config: GameConfig) -> (Game, StdRng) {
    let (mut game, mut rng) = make_game(config, 0);
    game.on_input(Command::Confirm, 0, &mut rng);
    (game, rng)
}

/// The bird falls off the screen on the first tick.
fn deadly_config() -> GameConfig {
    GameConfig {
        gravity: 400.0,
        terminal_velocity: 400.0,
        ..GameConfig::default()
    }
}

/// A narrow world where the first pipe is behind the bird after one tick.
fn scoring_config() -> GameConfig {
    GameConfig {
        screen_width: 10.0,
        pipe_width: 5.0,
        points_per_level: 1,
        ..GameConfig::default()
    }
}

fn centre(rect: &Rect) -> Command {
    Command::Click {
        x: rect.x + rect.w / 2.0,
        y: rect.y + rect.h / 2.0,
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn starts_in_menu() {
    let (game, _) = make_game(GameConfig::default(), 7);
    assert_eq!(game.mode(), GameMode::Menu);
    assert_eq!(game.high_score(), 7);
    assert_eq!(game.session().level, 1);
    assert!(!game.should_quit());
}

#[test]
fn rejects_invalid_config() {
    let mut rng = seeded_rng();
    let config = GameConfig {
        starting_lives: 0,
        ..GameConfig::default()
    };
    let err = Game::new(config, 0, 0, &mut rng).unwrap_err();
    assert_eq!(err, ConfigError::ZeroLives);
}

#[test]
fn non_finite_screen_is_a_config_error() {
    for (width, height) in [
        (800.0, f32::NAN),
        (800.0, f32::INFINITY),
        (f32::INFINITY, 600.0),
    ] {
        let mut rng = seeded_rng();
        let config = GameConfig {
            screen_width: width,
            screen_height: height,
            ..GameConfig::default()
        };
        let err = Game::new(config, 0, 0, &mut rng).unwrap_err();
        assert!(matches!(err, ConfigError::NonFinite { .. }), "{err:?}");
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

#[test]
fn confirm_starts_level_one() {
    let (game, _) = playing(GameConfig::default());
    assert_eq!(game.mode(), GameMode::Playing);
    assert_eq!(game.session().level, 1);
    assert_eq!(game.session().score, 0);
}

#[test]
fn start_button_starts_game() {
    let (mut game, mut rng) = make_game(GameConfig::default(), 0);
    let [start, _] = menu_buttons(game.config());
    game.on_input(centre(&start.rect), 0, &mut rng);
    assert_eq!(game.mode(), GameMode::Playing);
}

#[test]
fn exit_button_quits() {
    let (mut game, mut rng) = make_game(GameConfig::default(), 0);
    let [_, exit] = menu_buttons(game.config());
    game.on_input(centre(&exit.rect), 0, &mut rng);
    assert!(game.should_quit());
}

#[test]
fn click_outside_buttons_does_nothing() {
    let (mut game, mut rng) = make_game(GameConfig::default(), 0);
    game.on_input(Command::Click { x: 5.0, y: 5.0 }, 0, &mut rng);
    assert_eq!(game.mode(), GameMode::Menu);
    assert!(!game.should_quit());
}

#[test]
fn flap_in_menu_is_ignored() {
    let (mut game, mut rng) = make_game(GameConfig::default(), 0);
    let cues = game.on_input(Command::Flap, 0, &mut rng);
    assert!(cues.is_empty());
    assert_eq!(game.mode(), GameMode::Menu);
}

#[test]
fn tick_outside_playing_does_nothing() {
    let (mut game, mut rng) = make_game(GameConfig::default(), 0);
    let cues = game.on_tick(16, &mut rng);
    assert!(cues.is_empty());
    assert_eq!(game.session().frame, 0);
}

// ── Playing ───────────────────────────────────────────────────────────────────

#[test]
fn flap_returns_cue_and_launches_bird() {
    let (mut game, mut rng) = playing(GameConfig::default());
    let cues = game.on_input(Command::Flap, 0, &mut rng);
    assert_eq!(cues, vec![CueRequest::now(SoundCue::Flap)]);
    assert_eq!(game.session().bird.velocity, -8.0);
}

#[test]
fn click_while_playing_flaps() {
    let (mut game, mut rng) = playing(GameConfig::default());
    game.on_input(Command::Click { x: 1.0, y: 1.0 }, 0, &mut rng);
    assert_eq!(game.session().bird.velocity, -8.0);
}

#[test]
fn tick_advances_session() {
    let (mut game, mut rng) = playing(GameConfig::default());
    game.on_tick(16, &mut rng);
    game.on_tick(32, &mut rng);
    assert_eq!(game.session().frame, 2);
    assert_eq!(game.mode(), GameMode::Playing);
}

#[test]
fn quit_works_from_playing() {
    let (mut game, mut rng) = playing(GameConfig::default());
    game.on_input(Command::Quit, 0, &mut rng);
    assert!(game.should_quit());
}

// ── Pause ─────────────────────────────────────────────────────────────────────

#[test]
fn pause_freezes_simulation() {
    let (mut game, mut rng) = playing(GameConfig::default());
    game.on_input(Command::TogglePause, 1000, &mut rng);
    assert_eq!(game.mode(), GameMode::Paused);

    assert!(game.on_tick(2000, &mut rng).is_empty());
    assert_eq!(game.session().frame, 0);

    game.on_input(Command::TogglePause, 4000, &mut rng);
    assert_eq!(game.mode(), GameMode::Playing);
}

#[test]
fn paused_ignores_flap() {
    let (mut game, mut rng) = playing(GameConfig::default());
    game.on_input(Command::TogglePause, 1000, &mut rng);
    game.on_input(Command::Flap, 1500, &mut rng);
    assert_eq!(game.session().bird.velocity, 0.0);
}

#[test]
fn sim_time_excludes_pauses() {
    let (mut game, mut rng) = playing(GameConfig::default());
    game.on_input(Command::TogglePause, 1000, &mut rng);
    assert_eq!(game.sim_time(3000), 1000);
    game.on_input(Command::TogglePause, 4000, &mut rng);
    assert_eq!(game.sim_time(5000), 2000);

    game.on_input(Command::TogglePause, 6000, &mut rng);
    game.on_input(Command::TogglePause, 6500, &mut rng);
    assert_eq!(game.sim_time(7000), 3500);
}

#[test]
fn paused_time_does_not_count_toward_spawns() {
    let (mut game, mut rng) = playing(GameConfig::default());
    game.on_input(Command::TogglePause, 1000, &mut rng);
    game.on_input(Command::TogglePause, 9000, &mut rng);
    game.on_tick(10_000, &mut rng);
    assert_eq!(game.session().enemy_timer.last_attempt_ms, 0);
    assert_eq!(game.session().power_up_timer.last_attempt_ms, 0);
}

#[test]
fn unpaused_time_does_count_toward_spawns() {
    let (mut game, mut rng) = playing(GameConfig::default());
    game.on_tick(10_000, &mut rng);
    assert_eq!(game.session().enemy_timer.last_attempt_ms, 10_000);
    assert_eq!(game.session().power_up_timer.last_attempt_ms, 10_000);
}

// ── Game over ─────────────────────────────────────────────────────────────────

#[test]
fn death_ends_game() {
    let (mut game, mut rng) = playing(deadly_config());
    let cues = game.on_tick(16, &mut rng);
    assert_eq!(game.mode(), GameMode::GameOver);
    assert_eq!(
        cues,
        vec![
            CueRequest::now(SoundCue::Hit),
            CueRequest::after(SoundCue::GameOver, 700),
        ]
    );
}

#[test]
fn spare_life_keeps_playing_until_last() {
    let config = GameConfig {
        starting_lives: 2,
        ..deadly_config()
    };
    let (mut game, mut rng) = playing(config);

    let cues = game.on_tick(16, &mut rng);
    assert_eq!(cues, vec![CueRequest::now(SoundCue::Hit)]);
    assert_eq!(game.mode(), GameMode::Playing);
    assert_eq!(game.session().bird.lives, 1);
    assert_eq!(game.session().bird.y, 300.0);

    game.on_tick(32, &mut rng);
    assert_eq!(game.mode(), GameMode::GameOver);
}

#[test]
fn three_lives_survive_two_crashes() {
    let config = GameConfig {
        starting_lives: 3,
        ..deadly_config()
    };
    let (mut game, mut rng) = playing(config);
    game.on_tick(16, &mut rng);
    assert_eq!(game.session().bird.lives, 2);
    game.on_tick(32, &mut rng);
    assert_eq!(game.session().bird.lives, 1);
    assert_eq!(game.mode(), GameMode::Playing);
    game.on_tick(48, &mut rng);
    assert_eq!(game.mode(), GameMode::GameOver);
}

#[test]
fn new_high_score_is_recorded_with_chime() {
    let config = GameConfig {
        gravity: 400.0,
        terminal_velocity: 400.0,
        points_per_level: 10,
        ..scoring_config()
    };
    let (mut game, mut rng) = playing(config);
    let cues = game.on_tick(16, &mut rng);
    assert_eq!(game.mode(), GameMode::GameOver);
    assert_eq!(game.session().score, 1);
    assert_eq!(game.high_score(), 1);
    assert!(cues.contains(&CueRequest::after(SoundCue::Score, 1700)));
}

#[test]
fn lower_score_keeps_high_score() {
    let (mut game, mut rng) = make_game(deadly_config(), 50);
    game.on_input(Command::Confirm, 0, &mut rng);
    let cues = game.on_tick(16, &mut rng);
    assert_eq!(game.high_score(), 50);
    assert!(!cues.iter().any(|c| c.cue == SoundCue::Score));
}

#[test]
fn game_over_ignores_ticks() {
    let (mut game, mut rng) = playing(deadly_config());
    game.on_tick(16, &mut rng);
    let frame = game.session().frame;
    assert!(game.on_tick(32, &mut rng).is_empty());
    assert_eq!(game.session().frame, frame);
}

#[test]
fn confirm_after_game_over_returns_to_menu() {
    let (mut game, mut rng) = playing(deadly_config());
    game.on_tick(16, &mut rng);
    game.on_input(Command::Confirm, 100, &mut rng);
    assert_eq!(game.mode(), GameMode::Menu);
}

#[test]
fn restart_button_replays_level_from_zero() {
    let config = GameConfig {
        gravity: 400.0,
        terminal_velocity: 400.0,
        points_per_level: 10,
        ..scoring_config()
    };
    let (mut game, mut rng) = playing(config);
    game.on_tick(16, &mut rng);
    assert_eq!(game.session().score, 1);

    let [restart, _] = game_over_buttons(game.config());
    game.on_input(centre(&restart.rect), 100, &mut rng);
    assert_eq!(game.mode(), GameMode::Playing);
    assert_eq!(game.session().level, 1);
    assert_eq!(game.session().score, 0);
    assert_eq!(game.session().frame, 0);
    assert_eq!(game.session().bird.y, 300.0);
}

#[test]
fn main_menu_button_returns_to_menu() {
    let (mut game, mut rng) = playing(deadly_config());
    game.on_tick(16, &mut rng);
    let [_, menu] = game_over_buttons(game.config());
    game.on_input(centre(&menu.rect), 100, &mut rng);
    assert_eq!(game.mode(), GameMode::Menu);
}

// ── Level progression ─────────────────────────────────────────────────────────

#[test]
fn reaching_target_completes_level() {
    let (mut game, mut rng) = playing(scoring_config());
    let cues = game.on_tick(16, &mut rng);
    assert_eq!(game.mode(), GameMode::LevelComplete);
    assert!(cues.contains(&CueRequest::now(SoundCue::LevelComplete)));
}

#[test]
fn level_complete_waits_for_confirm() {
    let (mut game, mut rng) = playing(scoring_config());
    game.on_tick(16, &mut rng);
    game.on_input(Command::Flap, 20, &mut rng);
    game.on_input(Command::TogglePause, 20, &mut rng);
    assert!(game.on_tick(32, &mut rng).is_empty());
    assert_eq!(game.mode(), GameMode::LevelComplete);
}

#[test]
fn levels_advance_with_running_score_then_wrap() {
    let (mut game, mut rng) = playing(scoring_config());

    for level in 1..=3 {
        assert_eq!(game.session().level, level);
        game.on_tick(16, &mut rng);
        assert_eq!(game.mode(), GameMode::LevelComplete);
        assert_eq!(game.session().score, level);
        game.on_input(Command::Confirm, 20, &mut rng);
        assert_eq!(game.mode(), GameMode::Playing);
    }

    assert_eq!(game.session().level, 1);
    assert_eq!(game.session().score, 0);
}
