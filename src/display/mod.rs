//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a draw sink and an immutable view of the game.
//! No game logic is performed; this module only translates state into
//! draw requests.

mod frame;

pub use frame::{Cell, DrawSink, Frame, Viewport};

use std::io::Write;

use crossterm::style::Color;

use crate::entities::{Bird, Enemy, GameMode, Pipe, PowerUp, Rect};
use crate::game::Game;
use crate::sprites::{SpriteKey, SpriteProvider};
use crate::ui::{game_over_buttons, menu_buttons, Button};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TEXT: Color = Color::White;
const C_TITLE: Color = Color::Yellow;
const C_GAME_OVER: Color = Color::Red;
const C_LEVEL_COMPLETE: Color = Color::Green;
const C_SHIELD: Color = Color::Cyan;
const C_BUTTON_GO: Color = Color::DarkGreen;
const C_BUTTON_STOP: Color = Color::DarkRed;
const C_BUTTON_MENU: Color = Color::DarkBlue;

fn background(level: u32) -> Color {
    match level {
        1 => Color::Rgb { r: 135, g: 206, b: 235 },
        2 => Color::Rgb { r: 255, g: 165, b: 0 },
        _ => Color::Rgb { r: 25, g: 25, b: 112 },
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Compose and present one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    game: &Game,
    sprites: &dyn SpriteProvider,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let mut frame = Frame::new(cols, rows);
    on_draw(&mut frame, game, sprites);
    frame.present(out)
}

/// Per-mode draw dispatch.
pub fn on_draw(sink: &mut dyn DrawSink, game: &Game, sprites: &dyn SpriteProvider) {
    let (cols, rows) = sink.size();
    let config = game.config();
    let view = Viewport::new(config.screen_width, config.screen_height, cols, rows);
    let session = game.session();

    sink.clear(background(session.level));

    match game.mode() {
        GameMode::Menu => draw_menu(sink, game, &view),
        GameMode::Playing | GameMode::Paused => {
            draw_field(sink, game, &view, sprites);
            draw_hud(sink, game, &view);
            if game.mode() == GameMode::Paused {
                draw_pause_overlay(sink, &view);
            }
        }
        GameMode::GameOver => draw_game_over(sink, game, &view),
        GameMode::LevelComplete => draw_level_complete(sink, game, &view),
    }
}

// ── Playing field ─────────────────────────────────────────────────────────────

fn draw_field(sink: &mut dyn DrawSink, game: &Game, view: &Viewport, sprites: &dyn SpriteProvider) {
    let session = game.session();
    for pipe in &session.pipes {
        draw_pipe(sink, pipe, view, sprites);
    }
    for power_up in &session.power_ups {
        draw_power_up(sink, power_up, view, sprites);
    }
    for enemy in &session.enemies {
        draw_enemy(sink, enemy, view, sprites);
    }
    draw_bird(sink, &session.bird, view, sprites);
}

fn draw_pipe(sink: &mut dyn DrawSink, pipe: &Pipe, view: &Viewport, sprites: &dyn SpriteProvider) {
    for rect in [pipe.top_hitbox(), pipe.bottom_hitbox()] {
        if rect.h <= 0.0 {
            continue;
        }
        let (col, row, w, h) = view.cells(&rect);
        sink.blit(&sprites.sprite(SpriteKey::Pipe, w, h), col, row);
    }
}

fn draw_enemy(sink: &mut dyn DrawSink, enemy: &Enemy, view: &Viewport, sprites: &dyn SpriteProvider) {
    let rect = Rect::new(enemy.x, enemy.y, enemy.width, enemy.height);
    let (col, row, w, h) = view.cells(&rect);
    let sprite = sprites.sprite(SpriteKey::Enemy(enemy.sprite_frame()), w, h);
    sink.blit(&sprite, col, row);
}

/// Pulse is cosmetic: the sprite grows by up to one cell at the peak.
fn draw_power_up(
    sink: &mut dyn DrawSink,
    power_up: &PowerUp,
    view: &Viewport,
    sprites: &dyn SpriteProvider,
) {
    let (col, row, w, h) = view.cells(&power_up.hitbox());
    let grow = usize::from(power_up.pulse > 0.5);
    let sprite = sprites.sprite(SpriteKey::PowerUp(power_up.kind), w + grow, h);
    sink.blit(&sprite, col, row);
}

fn draw_bird(sink: &mut dyn DrawSink, bird: &Bird, view: &Viewport, sprites: &dyn SpriteProvider) {
    let rect = Rect::new(bird.x, bird.y, bird.width, bird.height);
    let (col, row, w, h) = view.cells(&rect);
    let sprite = sprites.sprite(SpriteKey::Bird(bird.sprite_frame()), w, h);

    if bird.has_speed_boost() {
        // Speed trail
        for i in 1..=2 {
            sink.text(col - i, row + h as i32 / 2, "~", Color::DarkYellow);
        }
    }
    sink.blit(&sprite, col, row);
    if bird.shield {
        sink.outline_rect(col - 1, row - 1, w + 2, h + 2, C_SHIELD);
    }
    if bird.is_invincible() {
        sink.text(col + w as i32, row, "*", Color::Blue);
    }
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud(sink: &mut dyn DrawSink, game: &Game, view: &Viewport) {
    let session = game.session();
    let (cols, _) = sink.size();

    sink.text(1, 0, &format!("Score: {}", session.score), C_TEXT);
    sink.text_centred(cols as i32 / 2, 0, &format!("Level: {}", session.level), C_TEXT);
    let high = format!("High Score: {}", game.high_score());
    sink.text(cols as i32 - high.chars().count() as i32 - 1, 0, &high, C_TEXT);

    sink.text(1, 1, &format!("Lives: {}", session.bird.lives), C_TEXT);
    let shield = if session.bird.shield { "Active" } else { "None" };
    sink.text(1, 2, &format!("Shield: {shield}"), C_TEXT);

    let hint_row = view.rows.saturating_sub(1) as i32;
    sink.text(1, hint_row, "SPACE/click: Flap   ESC/P: Pause   Q: Quit", Color::DarkGrey);
}

fn draw_pause_overlay(sink: &mut dyn DrawSink, view: &Viewport) {
    let cx = view.col(view.world_width / 2.0);
    let cy = view.row(view.world_height / 2.0);
    sink.text_centred(cx, cy, "PAUSED", C_TEXT);
    sink.text_centred(cx, view.row(view.world_height / 2.0 + 50.0), "Press ESC to resume", C_TEXT);
}

// ── Menus ─────────────────────────────────────────────────────────────────────

fn draw_button(sink: &mut dyn DrawSink, button: &Button, view: &Viewport, bg: Color) {
    let (col, row, w, h) = view.cells(&button.rect);
    sink.fill_rect(col, row, w, h, bg);
    sink.outline_rect(col, row, w, h, C_TEXT);
    sink.text_centred(col + w as i32 / 2, row + h as i32 / 2, button.label, C_TEXT);
}

fn draw_menu(sink: &mut dyn DrawSink, game: &Game, view: &Viewport) {
    let cx = view.col(view.world_width / 2.0);
    sink.text_centred(cx, view.row(100.0), "Flappy Adventure", C_TITLE);

    let [start, exit] = menu_buttons(game.config());
    draw_button(sink, &start, view, C_BUTTON_GO);
    draw_button(sink, &exit, view, C_BUTTON_STOP);

    let (cols, rows) = sink.size();
    let high = format!("High Score: {}", game.high_score());
    sink.text(cols as i32 - high.chars().count() as i32 - 1, 0, &high, C_TEXT);
    sink.text(
        1,
        rows.saturating_sub(1) as i32,
        "ENTER: Start   SPACE/click: Flap   ESC/P: Pause   Q: Quit",
        Color::DarkGrey,
    );
}

fn draw_game_over(sink: &mut dyn DrawSink, game: &Game, view: &Viewport) {
    let cx = view.col(view.world_width / 2.0);
    let h = view.world_height;
    sink.text_centred(cx, view.row(h / 3.0), "Game Over", C_GAME_OVER);
    sink.text_centred(
        cx,
        view.row(h / 2.0 - 50.0),
        &format!("Final Score: {}", game.session().score),
        C_TEXT,
    );

    let [restart, menu] = game_over_buttons(game.config());
    draw_button(sink, &restart, view, C_BUTTON_GO);
    draw_button(sink, &menu, view, C_BUTTON_MENU);
}

fn draw_level_complete(sink: &mut dyn DrawSink, game: &Game, view: &Viewport) {
    let cx = view.col(view.world_width / 2.0);
    let h = view.world_height;
    let session = game.session();

    sink.text_centred(cx, view.row(h / 3.0), "Level Complete!", C_LEVEL_COMPLETE);
    sink.text_centred(
        cx,
        view.row(h / 2.0 - 50.0),
        &format!("Level Score: {}", session.score),
        C_TEXT,
    );
    let next = if session.level < game.config().max_levels {
        format!("Press ENTER for Level {}", session.level + 1)
    } else {
        "You've completed all levels! Press ENTER to restart".to_string()
    };
    sink.text_centred(cx, view.row(h / 2.0), &next, C_TEXT);
}
