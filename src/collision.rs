//! Axis-aligned rectangle overlap between the bird and everything else.
//!
//! Purely geometric: no randomness and no mutation, so the order in which a
//! tick checks pipes, enemies and power-ups never changes the outcome.

use crate::entities::{Bird, Enemy, Pipe, PowerUp, Rect};

/// Two rectangles intersect when they overlap on both axes. Touching edges
/// do not count, and an empty rectangle never intersects anything.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    if a.w <= 0.0 || a.h <= 0.0 || b.w <= 0.0 || b.h <= 0.0 {
        return false;
    }
    let x_overlap = a.x < b.right() && a.right() > b.x;
    let y_overlap = a.y < b.bottom() && a.bottom() > b.y;
    x_overlap && y_overlap
}

/// Either half of the pipe.
pub fn bird_hits_pipe(bird: &Bird, pipe: &Pipe) -> bool {
    let hb = bird.hitbox();
    intersects(&hb, &pipe.top_hitbox()) || intersects(&hb, &pipe.bottom_hitbox())
}

pub fn bird_hits_enemy(bird: &Bird, enemy: &Enemy) -> bool {
    intersects(&bird.hitbox(), &enemy.hitbox())
}

pub fn bird_touches_power_up(bird: &Bird, power_up: &PowerUp) -> bool {
    intersects(&bird.hitbox(), &power_up.hitbox())
}

/// The bird's top-left leaving the screen vertically.
pub fn bird_out_of_bounds(bird: &Bird, screen_height: f32) -> bool {
    bird.y < 0.0 || bird.y > screen_height
}
