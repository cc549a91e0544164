//! Sound-cue plumbing.
//!
//! The simulation never plays sound itself: it returns `CueRequest`s. The
//! front end feeds them through a `CueScheduler`, which holds delayed cues
//! until they are due and hands them to an `AudioSink`. Nothing here can
//! fail in a way the game notices.

use std::io::Write;

use tracing::debug;

use crate::entities::{CueRequest, SoundCue};

/// Fire-and-forget playback by cue key.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Plays nothing.
#[derive(Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Rings the terminal bell for the cues worth interrupting the player for.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn rings_for(cue: SoundCue) -> bool {
        matches!(
            cue,
            SoundCue::Hit | SoundCue::GameOver | SoundCue::LevelComplete
        )
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: SoundCue) {
        if !Self::rings_for(cue) {
            return;
        }
        let rung = self
            .out
            .write_all(b"\x07")
            .and_then(|_| self.out.flush());
        if let Err(err) = rung {
            debug!(cue = cue.key(), "bell failed: {err}");
        }
    }
}

/// Holds delayed cues until their due time. Replaces blocking sleeps, so the
/// frame clock never stalls waiting for a sound.
#[derive(Debug, Default)]
pub struct CueScheduler {
    /// (due time in ms, cue), in submission order.
    pending: Vec<(u64, SoundCue)>,
}

impl CueScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now_ms: u64, requests: impl IntoIterator<Item = CueRequest>) {
        self.pending
            .extend(requests.into_iter().map(|r| (now_ms + r.delay_ms, r.cue)));
    }

    /// Remove and return every cue due at `now_ms`, earliest first.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<SoundCue> {
        let mut due: Vec<(u64, SoundCue)> = Vec::new();
        self.pending.retain(|&(at, cue)| {
            if at <= now_ms {
                due.push((at, cue));
                false
            } else {
                true
            }
        });
        // Stable, so cues due together keep submission order.
        due.sort_by_key(|&(at, _)| at);
        due.into_iter().map(|(_, cue)| cue).collect()
    }

    pub fn dispatch(&mut self, now_ms: u64, sink: &mut dyn AudioSink) {
        for cue in self.take_due(now_ms) {
            sink.play(cue);
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
