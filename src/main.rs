//! Terminal runner (default binary).
//!
//! Fixed 60 Hz loop: drain key events, advance the session one frame, play
//! sound cues, draw. Uses crossterm for input and the framebuffer renderer.

use std::io;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};

use blockfall::core::{GameSession, GameSnapshot, RulesConfig};
use blockfall::input::{should_quit, InputTracker};
use blockfall::term::{AudioSink, FrameBuffer, GameView, TerminalBell, TerminalRenderer, Viewport};
use blockfall::types::{ARE_FRAMES, DAS_FRAMES, FPS, LOCK_DELAY_FRAMES};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed for the piece sequence. The same seed and inputs replay the same game.
    /// Defaults to the current time.
    #[arg(short, long)]
    seed: Option<u32>,
    /// Frames a direction must be held before it autorepeats.
    #[arg(long, default_value_t = DAS_FRAMES)]
    das: u32,
    /// Frames between a lock and the next spawn.
    #[arg(long, default_value_t = ARE_FRAMES)]
    are: u32,
    /// Frames a resting piece waits before it locks on its own.
    #[arg(long, default_value_t = LOCK_DELAY_FRAMES)]
    lock_delay: u32,
    /// Try kick offsets when a rotation does not fit in place.
    #[arg(long)]
    wall_kicks: bool,
    /// Do not ring the terminal bell.
    #[arg(short, long)]
    mute: bool,
}

impl Args {
    fn rules(&self) -> RulesConfig {
        RulesConfig {
            das_frames: self.das,
            are_frames: self.are,
            lock_delay_frames: self.lock_delay,
            ..RulesConfig::default()
        }
        .with_wall_kicks(self.wall_kicks)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(clock_seed);
    let session = GameSession::with_rules(seed, args.rules()).context("invalid rules")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let enhanced = enable_release_events();

    let result = run(&mut term, session, &args, enhanced);

    // Always try to restore terminal state.
    if enhanced {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    let _ = term.exit();

    match &result {
        Ok(summary) => eprintln!("[Runner] seed {seed}: {summary}"),
        Err(err) => eprintln!("[Runner] seed {seed}: stopped: {err:#}"),
    }
    result.map(|_| ())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

/// Ask the terminal for key release events. Returns whether it agreed.
fn enable_release_events() -> bool {
    if !matches!(terminal::supports_keyboard_enhancement(), Ok(true)) {
        return false;
    }
    execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    )
    .is_ok()
}

fn run(
    term: &mut TerminalRenderer,
    mut session: GameSession,
    args: &Args,
    release_events: bool,
) -> Result<String> {
    let view = GameView::default();
    let mut tracker = if release_events {
        InputTracker::new().with_release_events()
    } else {
        InputTracker::new()
    };
    let mut bell = TerminalBell::new(io::stdout());
    if args.mute {
        bell = bell.muted();
    }

    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let frame = Duration::from_secs(1) / FPS;
    let mut next_frame = Instant::now() + frame;
    let mut games = 1u32;

    loop {
        // Input until the next frame is due.
        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(format!(
                            "quit after {games} game(s), score {} level {}",
                            session.score(),
                            session.level()
                        ));
                    }
                    tracker.handle_key_event(key);
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
            continue;
        }

        // Frame.
        next_frame += frame;
        let input = tracker.frame();
        let was_over = session.game_over();
        let events = session.advance(&input);
        if was_over && !session.game_over() {
            games += 1;
        }
        // Sound is best effort.
        let _ = bell.play_events(&events);

        let (w, h) = terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Fell far behind (e.g. suspended): resync instead of fast-forwarding.
        let now = Instant::now();
        if now > next_frame + frame * 10 {
            next_frame = now + frame;
        }
    }
}
