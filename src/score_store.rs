//! Optional high-score persistence: a single integer in a text file.

use std::io;
use std::path::{Path, PathBuf};

pub fn default_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".flappy_adventure_score")
}

/// Missing or garbled files read as 0.
pub fn load(path: &Path) -> u32 {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

pub fn save(path: &Path, score: u32) -> io::Result<()> {
    std::fs::write(path, score.to_string())
}
