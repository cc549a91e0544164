use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use flappy_adventure::audio::{AudioSink, CueScheduler, Silent, TerminalBell};
use flappy_adventure::config::GameConfig;
use flappy_adventure::display::{self, Viewport};
use flappy_adventure::game::Game;
use flappy_adventure::input::map_event;
use flappy_adventure::score_store;
use flappy_adventure::sprites::GlyphSprites;

#[derive(Parser, Debug)]
#[command(name = "flappy_adventure")]
#[command(about = "Guide a bird through pipe gaps, dodge enemies, grab power-ups")]
struct Args {
    /// simulation ticks per second [default: 60]
    #[arg(long)]
    fps: Option<u32>,

    /// RNG seed for a reproducible run (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// lives at the start of each session [default: 1]
    #[arg(long)]
    lives: Option<u32>,

    /// number of levels before wrapping back to level 1 [default: 3]
    #[arg(long)]
    max_levels: Option<u32>,

    /// logical world width [default: 800]
    #[arg(long)]
    width: Option<f32>,

    /// logical world height [default: 600]
    #[arg(long)]
    height: Option<f32>,

    /// directory of <sprite>.txt art files
    #[arg(long)]
    assets: Option<PathBuf>,

    /// no terminal bell
    #[arg(long)]
    mute: bool,

    /// keep the high score in ~/.flappy_adventure_score between runs
    #[arg(long)]
    persist_high_score: bool,

    /// where log output goes (the terminal is busy with the game)
    #[arg(long, default_value = "flappy_adventure.log")]
    log_file: PathBuf,
}

impl Args {
    fn config(&self) -> GameConfig {
        let mut config = GameConfig::default();
        if let Some(fps) = self.fps {
            config.ticks_per_second = fps;
        }
        if let Some(lives) = self.lives {
            config.starting_lives = lives;
        }
        if let Some(max_levels) = self.max_levels {
            config.max_levels = max_levels;
        }
        if let Some(width) = self.width {
            config.screen_width = width;
        }
        if let Some(height) = self.height {
            config.screen_height = height;
        }
        config
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Frame loop ────────────────────────────────────────────────────────────────

/// One input → tick → sound → draw pass per frame until the game asks to quit.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
    sprites: &GlyphSprites,
    audio: &mut dyn AudioSink,
    clock: Instant,
) -> Result<()> {
    let frame_budget = game.config().tick_duration();
    let mut scheduler = CueScheduler::new();

    loop {
        let frame_start = Instant::now();
        // One timestamp for the whole tick.
        let now = clock.elapsed().as_millis() as u64;

        let (cols, rows) = terminal::size().context("reading terminal size")?;
        let config = game.config();
        let view = Viewport::new(config.screen_width, config.screen_height, cols, rows);

        while let Ok(ev) = rx.try_recv() {
            if let Some(command) = map_event(&ev, &view) {
                let cues = game.on_input(command, now, rng);
                scheduler.schedule(now, cues);
            }
        }
        if game.should_quit() {
            return Ok(());
        }

        let cues = game.on_tick(now, rng);
        scheduler.schedule(now, cues);
        scheduler.dispatch(now, audio);

        display::render(out, game, sprites, cols, rows).context("drawing frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let score_path = score_store::default_path();
    let high_score = if args.persist_high_score {
        score_store::load(&score_path)
    } else {
        0
    };

    // Reject a bad configuration before the terminal is touched.
    let clock = Instant::now();
    let mut game = Game::new(args.config(), high_score, 0, &mut rng)
        .context("invalid game configuration")?;

    let sprites = match &args.assets {
        Some(dir) => GlyphSprites::load(dir),
        None => GlyphSprites::procedural(),
    };
    let mut audio: Box<dyn AudioSink> = if args.mute {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell::new(stdout()))
    };

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread to blocking event reads so the frame loop never
    // waits on input.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    info!(seed = ?args.seed, "starting");
    let result = game_loop(
        &mut out,
        &mut game,
        &mut rng,
        &rx,
        &sprites,
        audio.as_mut(),
        clock,
    );

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if args.persist_high_score && game.high_score() > high_score {
        if let Err(err) = score_store::save(&score_path, game.high_score()) {
            tracing::warn!("could not save high score: {err}");
        }
    }
    info!(high_score = game.high_score(), "exiting");
    result
}
