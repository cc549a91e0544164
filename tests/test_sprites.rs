use flappy_adventure::entities::PowerUpKind;
use flappy_adventure::sprites::*;

// ── Keys ──────────────────────────────────────────────────────────────────────

#[test]
fn every_key_has_a_distinct_stem() {
    let keys = SpriteKey::all();
    assert_eq!(keys.len(), BIRD_FRAMES + ENEMY_FRAMES + 1 + PowerUpKind::ALL.len());
    let mut stems: Vec<String> = keys.iter().map(|k| k.stem()).collect();
    stems.sort();
    stems.dedup();
    assert_eq!(stems.len(), keys.len());
}

#[test]
fn stem_names() {
    assert_eq!(SpriteKey::Bird(1).stem(), "bird-1");
    assert_eq!(SpriteKey::Pipe.stem(), "pipe");
    assert_eq!(
        SpriteKey::PowerUp(PowerUpKind::ExtraLife).stem(),
        "power-up-extra-life"
    );
}

// ── Placeholders ──────────────────────────────────────────────────────────────

#[test]
fn placeholder_matches_requested_size() {
    for key in SpriteKey::all() {
        let sprite = placeholder(key, 5, 3);
        assert_eq!((sprite.width, sprite.height), (5, 3), "{key:?}");
        assert!(sprite.get(4, 2).is_some(), "{key:?}");
    }
}

#[test]
fn placeholder_is_deterministic() {
    for key in SpriteKey::all() {
        assert_eq!(placeholder(key, 4, 2), placeholder(key, 4, 2));
    }
}

#[test]
fn bird_frames_differ() {
    let a = placeholder(SpriteKey::Bird(0), 4, 3);
    let b = placeholder(SpriteKey::Bird(2), 4, 3);
    assert_ne!(a, b);
}

#[test]
fn power_up_kinds_look_different() {
    let glyph = |kind| {
        placeholder(SpriteKey::PowerUp(kind), 1, 1)
            .get(0, 0)
            .map(|g| g.ch)
    };
    assert_ne!(glyph(PowerUpKind::Speed), glyph(PowerUpKind::Shield));
    assert_ne!(glyph(PowerUpKind::Shield), glyph(PowerUpKind::ExtraLife));
}

#[test]
fn zero_size_placeholder_is_empty() {
    let sprite = placeholder(SpriteKey::Pipe, 0, 0);
    assert_eq!(sprite.width, 0);
    assert!(sprite.get(0, 0).is_none());
}

// ── Loaded art ────────────────────────────────────────────────────────────────

#[test]
fn procedural_has_no_art() {
    let sprites = GlyphSprites::procedural();
    assert!(SpriteKey::all().iter().all(|k| !sprites.has_art(*k)));
    assert_eq!(
        sprites.sprite(SpriteKey::Pipe, 3, 2),
        placeholder(SpriteKey::Pipe, 3, 2)
    );
}

#[test]
fn missing_directory_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let sprites = GlyphSprites::load(&dir.path().join("does-not-exist"));
    assert!(!sprites.has_art(SpriteKey::Bird(0)));
}

#[test]
fn art_file_is_padded_with_transparency() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bird-0.txt"), "ab\n c\n").unwrap();
    let sprites = GlyphSprites::load(dir.path());
    assert!(sprites.has_art(SpriteKey::Bird(0)));
    assert!(!sprites.has_art(SpriteKey::Pipe));

    let sprite = sprites.sprite(SpriteKey::Bird(0), 3, 3);
    assert_eq!((sprite.width, sprite.height), (3, 3));
    assert_eq!(sprite.get(0, 0).map(|g| g.ch), Some('a'));
    assert_eq!(sprite.get(1, 0).map(|g| g.ch), Some('b'));
    assert!(sprite.get(2, 0).is_none());
    assert!(sprite.get(0, 1).is_none());
    assert_eq!(sprite.get(1, 1).map(|g| g.ch), Some('c'));
    assert!(sprite.get(0, 2).is_none());
}

#[test]
fn art_file_is_cropped() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("pipe.txt"), "xxxx\nxxxx\nxxxx\n").unwrap();
    let sprites = GlyphSprites::load(dir.path());
    let sprite = sprites.sprite(SpriteKey::Pipe, 2, 1);
    assert_eq!((sprite.width, sprite.height), (2, 1));
    assert_eq!(sprite.get(1, 0).map(|g| g.ch), Some('x'));
}
