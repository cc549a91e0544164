use flappy_adventure::collision::*;
use flappy_adventure::compute::new_bird;
use flappy_adventure::config::GameConfig;
use flappy_adventure::entities::*;

fn make_bird() -> Bird {
    new_bird(&GameConfig::default()) // hitbox (105, 305, 30, 20)
}

fn make_pipe(x: f32, gap_y: f32) -> Pipe {
    Pipe {
        x,
        width: 80.0,
        gap_y,
        gap_size: 160.0,
        speed: 3.5,
        screen_height: 600.0,
        scored: false,
    }
}

fn make_enemy(x: f32, y: f32) -> Enemy {
    Enemy {
        x,
        y,
        width: 40.0,
        height: 30.0,
        hitbox_inset: 5.0,
        speed: 4.5,
        pattern: MovementPattern::Straight,
        anim: 0.0,
    }
}

// ── intersects ────────────────────────────────────────────────────────────────

#[test]
fn overlapping_rects_intersect() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(5.0, 5.0, 10.0, 10.0);
    assert!(intersects(&a, &b));
    assert!(intersects(&b, &a));
}

#[test]
fn touching_edges_do_not_intersect() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!intersects(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
    assert!(!intersects(&a, &Rect::new(0.0, 10.0, 10.0, 10.0)));
}

#[test]
fn separated_on_one_axis_do_not_intersect() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!intersects(&a, &Rect::new(20.0, 5.0, 10.0, 10.0)));
    assert!(!intersects(&a, &Rect::new(5.0, 20.0, 10.0, 10.0)));
}

#[test]
fn empty_rect_never_intersects() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!intersects(&a, &Rect::new(5.0, 5.0, 0.0, 10.0)));
    assert!(!intersects(&a, &Rect::new(5.0, 5.0, 10.0, 0.0)));
}

#[test]
fn contained_rect_intersects() {
    let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
    let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
    assert!(intersects(&outer, &inner));
}

// ── Bird vs pipe ──────────────────────────────────────────────────────────────

#[test]
fn bird_inside_gap_is_safe() {
    // Gap 250..410, bird hitbox 305..325.
    assert!(!bird_hits_pipe(&make_bird(), &make_pipe(90.0, 250.0)));
}

#[test]
fn bird_hits_top_pipe() {
    // Gap starts at 310, below the hitbox top.
    assert!(bird_hits_pipe(&make_bird(), &make_pipe(90.0, 310.0)));
}

#[test]
fn bird_hits_bottom_pipe() {
    // Gap 150..310, hitbox bottom at 325.
    assert!(bird_hits_pipe(&make_bird(), &make_pipe(90.0, 150.0)));
}

#[test]
fn sprite_overlap_outside_hitbox_is_safe() {
    // Pipe right edge at 103: inside the sprite (100..140), left of the hitbox.
    assert!(!bird_hits_pipe(&make_bird(), &make_pipe(23.0, 400.0)));
}

#[test]
fn pipe_far_away_is_safe() {
    assert!(!bird_hits_pipe(&make_bird(), &make_pipe(600.0, 0.0)));
}

// ── Bird vs enemy / power-up ──────────────────────────────────────────────────

#[test]
fn bird_hits_enemy_on_overlap() {
    assert!(bird_hits_enemy(&make_bird(), &make_enemy(110.0, 300.0)));
    assert!(!bird_hits_enemy(&make_bird(), &make_enemy(300.0, 300.0)));
}

#[test]
fn bird_touches_power_up_on_overlap() {
    let mut power_up = PowerUp {
        x: 110.0,
        y: 300.0,
        size: 30.0,
        speed: 3.0,
        kind: PowerUpKind::Speed,
        pulse: 0.0,
        pulse_dir: 1.0,
    };
    assert!(bird_touches_power_up(&make_bird(), &power_up));
    power_up.y = 100.0;
    assert!(!bird_touches_power_up(&make_bird(), &power_up));
}

// ── Bounds ────────────────────────────────────────────────────────────────────

#[test]
fn out_of_bounds_above_and_below() {
    let mut bird = make_bird();
    assert!(!bird_out_of_bounds(&bird, 600.0));
    bird.y = -0.5;
    assert!(bird_out_of_bounds(&bird, 600.0));
    bird.y = 600.5;
    assert!(bird_out_of_bounds(&bird, 600.0));
}

#[test]
fn screen_edges_are_in_bounds() {
    let mut bird = make_bird();
    bird.y = 0.0;
    assert!(!bird_out_of_bounds(&bird, 600.0));
    bird.y = 600.0;
    assert!(!bird_out_of_bounds(&bird, 600.0));
}
