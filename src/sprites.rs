//! Sprite provider: turns an entity + frame key into a block of coloured
//! glyphs at a requested cell size.
//!
//! Art may come from `<dir>/<key>.txt` files (spaces are transparent). Any
//! key without art gets a deterministic procedural placeholder, so the
//! renderer never knows or cares which branch supplied the sprite.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use crossterm::style::Color;
use tracing::{debug, warn};

use crate::entities::PowerUpKind;

pub const BIRD_FRAMES: usize = 3;
pub const ENEMY_FRAMES: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    Bird(usize),
    Enemy(usize),
    Pipe,
    PowerUp(PowerUpKind),
}

impl SpriteKey {
    pub fn all() -> Vec<SpriteKey> {
        let mut keys: Vec<SpriteKey> = (0..BIRD_FRAMES).map(SpriteKey::Bird).collect();
        keys.extend((0..ENEMY_FRAMES).map(SpriteKey::Enemy));
        keys.push(SpriteKey::Pipe);
        keys.extend(PowerUpKind::ALL.iter().map(|k| SpriteKey::PowerUp(*k)));
        keys
    }

    /// File stem the art for this key is loaded from.
    pub fn stem(&self) -> String {
        match self {
            Self::Bird(frame) => format!("bird-{frame}"),
            Self::Enemy(frame) => format!("enemy-{frame}"),
            Self::Pipe => "pipe".to_string(),
            Self::PowerUp(PowerUpKind::Speed) => "power-up-speed".to_string(),
            Self::PowerUp(PowerUpKind::Shield) => "power-up-shield".to_string(),
            Self::PowerUp(PowerUpKind::ExtraLife) => "power-up-extra-life".to_string(),
        }
    }

    fn color(&self) -> Color {
        match self {
            Self::Bird(_) => Color::Yellow,
            Self::Enemy(_) => Color::Red,
            Self::Pipe => Color::Green,
            Self::PowerUp(PowerUpKind::Speed) => Color::Yellow,
            Self::PowerUp(PowerUpKind::Shield) => Color::Cyan,
            Self::PowerUp(PowerUpKind::ExtraLife) => Color::Magenta,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Color,
}

/// Row-major grid; `None` cells are transparent.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub width: usize,
    pub height: usize,
    cells: Vec<Option<Glyph>>,
}

impl Sprite {
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn get(&self, col: usize, row: usize) -> Option<Glyph> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells[row * self.width + col]
    }

    fn set(&mut self, col: usize, row: usize, glyph: Glyph) {
        if col < self.width && row < self.height {
            self.cells[row * self.width + col] = Some(glyph);
        }
    }

    fn fill(&mut self, ch: char, fg: Color) {
        for cell in &mut self.cells {
            *cell = Some(Glyph { ch, fg });
        }
    }
}

pub trait SpriteProvider {
    /// Always returns a sprite of exactly `width × height` cells.
    fn sprite(&self, key: SpriteKey, width: usize, height: usize) -> Sprite;
}

/// Text-art sprites with procedural fallback.
#[derive(Debug, Default)]
pub struct GlyphSprites {
    art: HashMap<SpriteKey, Vec<String>>,
}

impl GlyphSprites {
    /// Placeholders only.
    pub fn procedural() -> Self {
        Self::default()
    }

    /// Load whatever art exists under `dir`. Missing or unreadable files just
    /// leave that key on its placeholder.
    pub fn load(dir: &Path) -> Self {
        let mut art = HashMap::new();
        for key in SpriteKey::all() {
            let path = dir.join(format!("{}.txt", key.stem()));
            match fs::read_to_string(&path) {
                Ok(text) => {
                    let lines: Vec<String> = text.lines().map(str::to_string).collect();
                    if !lines.is_empty() {
                        art.insert(key, lines);
                    }
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    debug!(path = %path.display(), "no art, using placeholder");
                }
                Err(err) => {
                    warn!(path = %path.display(), "unreadable art, using placeholder: {err}");
                }
            }
        }
        Self { art }
    }

    pub fn has_art(&self, key: SpriteKey) -> bool {
        self.art.contains_key(&key)
    }

    /// Crop or pad loaded art to the requested size.
    fn from_art(key: SpriteKey, lines: &[String], width: usize, height: usize) -> Sprite {
        let mut sprite = Sprite::blank(width, height);
        let fg = key.color();
        for (row, line) in lines.iter().take(height).enumerate() {
            for (col, ch) in line.chars().take(width).enumerate() {
                if ch != ' ' {
                    sprite.set(col, row, Glyph { ch, fg });
                }
            }
        }
        sprite
    }
}

impl SpriteProvider for GlyphSprites {
    fn sprite(&self, key: SpriteKey, width: usize, height: usize) -> Sprite {
        match self.art.get(&key) {
            Some(lines) => Self::from_art(key, lines, width, height),
            None => placeholder(key, width, height),
        }
    }
}

/// Deterministic stand-in art: same key and size, same sprite.
pub fn placeholder(key: SpriteKey, width: usize, height: usize) -> Sprite {
    let mut sprite = Sprite::blank(width, height);
    if width == 0 || height == 0 {
        return sprite;
    }
    let fg = key.color();
    let mid = height / 2;

    match key {
        SpriteKey::Bird(frame) => {
            sprite.fill('█', fg);
            let wing = match frame % BIRD_FRAMES {
                0 => '^',
                1 => '-',
                _ => 'v',
            };
            sprite.set(0, mid, Glyph { ch: wing, fg: Color::DarkYellow });
            sprite.set(width - 1, mid, Glyph { ch: '>', fg: Color::DarkYellow });
        }
        SpriteKey::Enemy(frame) => {
            sprite.fill('▓', fg);
            sprite.set(0, mid, Glyph { ch: '<', fg: Color::White });
            let wing = if frame % 2 == 0 { '^' } else { 'v' };
            sprite.set(width - 1, mid, Glyph { ch: wing, fg: Color::DarkRed });
        }
        SpriteKey::Pipe => {
            sprite.fill('█', fg);
            for row in 0..height {
                sprite.set(width - 1, row, Glyph { ch: '▌', fg: Color::DarkGreen });
            }
        }
        SpriteKey::PowerUp(kind) => {
            let ch = match kind {
                PowerUpKind::Speed => '»',
                PowerUpKind::Shield => 'O',
                PowerUpKind::ExtraLife => '♥',
            };
            sprite.fill(ch, fg);
        }
    }
    sprite
}
