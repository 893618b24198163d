//! Game session module - owns the complete game state
//!
//! Ties together the board, the active piece, the queue and its random source,
//! scoring and the frame clock. All mutation happens inside [`GameSession::advance`]
//! (or the operations it is built from), once per frame.
//!
//! Frame order while falling:
//!
//! 1. horizontal shift (DAS gated, skipped while soft dropping)
//! 2. rotate CCW, then rotate CW (edge triggered)
//! 3. soft-drop or gravity step; a touching piece locks instead
//! 4. lock-delay expiry

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::config::{ConfigError, RulesConfig};
use crate::phase::{every_n_frames, AutoShift, DelayStep, Phase};
use crate::piece::{ActivePiece, MoveOutcome, RotateOutcome, TouchChange};
use crate::rng::{KindSource, PieceQueue, SimpleRng};
use crate::scoring::{bump_level_on_clear, bump_level_on_lock, fall_tickrate, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{FrameInput, GameEvent, PieceKind, RotateDirection, FPS, QUEUE_LEN};

/// Upper bound on events a single frame can produce
pub const MAX_EVENTS_PER_TICK: usize = 16;

/// Events emitted during one frame, in order
pub type TickEvents = ArrayVec<GameEvent, MAX_EVENTS_PER_TICK>;

/// Result of checking one row after a lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineCheck {
    Kept,
    Cleared,
    ToppedOut,
}

/// One game, from first spawn to game over
#[derive(Debug, Clone)]
pub struct GameSession<R: KindSource = SimpleRng> {
    board: Board,
    active: Option<ActivePiece>,
    /// Most recently locked piece (read-only, for observers)
    last_locked: Option<ActivePiece>,
    queue: PieceQueue,
    source: R,
    rules: RulesConfig,
    phase: Phase,
    autoshift: AutoShift,
    ticks: u64,
    /// Tick at which the active piece started touching
    lock_ticks: u64,
    /// Frames between gravity steps, refreshed at each spawn
    fall_tickrate: u32,
    score: u32,
    level: u32,
    lines: u32,
    events: TickEvents,
}

impl GameSession<SimpleRng> {
    /// Create a new game with the given RNG seed and default rules
    pub fn new(seed: u32) -> Self {
        Self::build(SimpleRng::new(seed), RulesConfig::default())
    }

    /// Create a new game with the given seed and rules
    pub fn with_rules(seed: u32, rules: RulesConfig) -> Result<Self, ConfigError> {
        Self::with_source(SimpleRng::new(seed), rules)
    }
}

impl<R: KindSource> GameSession<R> {
    /// Create a new game drawing piece kinds from `source`
    pub fn with_source(source: R, rules: RulesConfig) -> Result<Self, ConfigError> {
        rules.validate()?;
        Ok(Self::build(source, rules))
    }

    fn build(mut source: R, rules: RulesConfig) -> Self {
        let queue = PieceQueue::initialize(&mut source);
        let mut session = Self {
            board: Board::new(),
            active: None,
            last_locked: None,
            queue,
            source,
            rules,
            phase: Phase::Falling,
            autoshift: AutoShift::default(),
            ticks: 0,
            lock_ticks: 0,
            fall_tickrate: FPS,
            score: 0,
            level: 0,
            lines: 0,
            events: TickEvents::new(),
        };
        session.spawn(&FrameInput::idle());
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The unlocked piece under control, if any
    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn last_locked(&self) -> Option<&ActivePiece> {
        self.last_locked.as_ref()
    }

    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    /// Upcoming kinds after the one in play
    pub fn preview(&self) -> &[PieceKind] {
        &self.queue.kinds()[1..]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase.is_game_over()
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn source(&self) -> &R {
        &self.source
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn lock_ticks(&self) -> u64 {
        self.lock_ticks
    }

    pub fn fall_tickrate(&self) -> u32 {
        self.fall_tickrate
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Rows cleared this game
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Replace the board and the active piece, e.g. to set up a position.
    ///
    /// The piece starts untouched and in the falling phase.
    pub fn load_position(&mut self, board: Board, piece: ActivePiece) {
        self.board = board;
        self.active = Some(piece);
        self.phase = Phase::Falling;
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.queue = *self.queue.kinds();
        out.phase = self.phase.tag();
        out.game_over = self.game_over();
        out.ticks = self.ticks;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn emit(&mut self, event: GameEvent) {
        // Only fills up when direct operations run without draining.
        if self.events.try_push(event).is_err() {
            debug_assert!(false, "event buffer full, dropped {event:?}");
        }
    }

    /// Take the events emitted since the last call
    pub fn take_events(&mut self) -> TickEvents {
        std::mem::take(&mut self.events)
    }

    /// Run one frame and return the events it produced
    pub fn advance(&mut self, input: &FrameInput) -> TickEvents {
        self.ticks += 1;
        self.autoshift.update(input.horizontal);

        match self.phase {
            Phase::Falling => self.step_falling(input),
            Phase::EntryDelay { .. } => {
                if self.phase.step_delay() == DelayStep::Spawn {
                    self.fall_tickrate = fall_tickrate(self.level);
                    self.spawn(input);
                }
            }
            Phase::GameOver => {}
        }

        if input.restart && self.game_over() {
            self.restart();
        }

        self.take_events()
    }

    fn step_falling(&mut self, input: &FrameInput) {
        if self.active.is_none() {
            return;
        }

        if !input.soft_drop && self.autoshift.should_shift(self.rules.das_frames) {
            self.try_move(input.horizontal.dx(), 0);
        }
        if input.rotate_ccw {
            self.try_rotate(RotateDirection::Ccw);
        }
        if input.rotate_cw {
            self.try_rotate(RotateDirection::Cw);
        }

        let soft_step = input.soft_drop && every_n_frames(self.ticks, self.rules.soft_drop_interval);
        let gravity_step = every_n_frames(self.ticks, self.fall_tickrate);
        if soft_step || gravity_step {
            match self.active {
                Some(piece) if piece.touching() => {
                    self.lock();
                }
                Some(_) => self.drop_rows(),
                None => {}
            }
        }

        if let Some(piece) = self.active {
            let deadline = self.lock_ticks + u64::from(self.rules.lock_delay_frames);
            if piece.touching() && self.ticks > deadline {
                self.lock();
            }
        }
    }

    fn drop_rows(&mut self) {
        for _ in 0..self.rules.gravity_rows {
            if self.try_move(0, 1) != MoveOutcome::Moved {
                break;
            }
        }
    }

    /// Move the active piece by (dx, dy).
    ///
    /// A vertical move that cannot happen locks the piece in place.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> MoveOutcome {
        let Some(mut piece) = self.active else {
            return MoveOutcome::Rejected;
        };

        let outcome = piece.try_move(&self.board, dx, dy);
        match outcome {
            MoveOutcome::Moved => {
                if piece.update_touching(&self.board) == TouchChange::Began {
                    self.lock_ticks = self.ticks;
                    self.emit(GameEvent::PieceCollide);
                }
                self.active = Some(piece);
            }
            MoveOutcome::LockedImmediately => {
                self.emit(GameEvent::PieceCollide);
                self.lock();
            }
            MoveOutcome::Rejected => {}
        }
        outcome
    }

    /// Rotate the active piece one quarter turn.
    ///
    /// With wall kicks on, contact is re-evaluated after the piece turns, since
    /// a kick can lift it off the stack or push it onto it.
    pub fn try_rotate(&mut self, direction: RotateDirection) -> RotateOutcome {
        let Some(mut piece) = self.active else {
            return RotateOutcome::Rejected;
        };

        let wall_kicks = self.rules.wall_kicks;
        let outcome = piece.try_rotate(&self.board, direction, wall_kicks);
        if wall_kicks
            && outcome.rotated()
            && piece.update_touching(&self.board) == TouchChange::Began
        {
            self.lock_ticks = self.ticks;
            self.emit(GameEvent::PieceCollide);
        }
        self.active = Some(piece);
        outcome
    }

    /// Lock the active piece where it is, then check the rows it covers.
    ///
    /// Returns false when there was no active piece.
    pub fn lock(&mut self) -> bool {
        let Some(mut piece) = self.active.take() else {
            return false;
        };

        self.board.lock_blocks(&piece.positions(), piece.kind());
        piece.mark_locked();
        self.emit(GameEvent::Lock);

        let mut topped_out = false;
        for y in piece.highest_row()..=piece.lowest_row() {
            if self.check_line(y) == LineCheck::ToppedOut {
                topped_out = true;
                break;
            }
        }

        self.level = bump_level_on_lock(self.level);
        self.last_locked = Some(piece);
        self.phase = if topped_out {
            Phase::GameOver
        } else {
            Phase::entry_delay(self.rules.are_frames)
        };
        true
    }

    fn check_line(&mut self, y: i8) -> LineCheck {
        if y <= 0 {
            self.emit(GameEvent::GameOver);
            return LineCheck::ToppedOut;
        }

        let row = y as u8;
        if !self.board.line_is_full(row) {
            return LineCheck::Kept;
        }

        self.board.clear_line(row);
        self.emit(GameEvent::LineClear { row });
        self.score = self.score.saturating_add(line_clear_score(self.level));
        self.level = bump_level_on_clear(self.level);
        self.lines += 1;
        LineCheck::Cleared
    }

    /// Pull the next kind from the queue and put it on the board.
    ///
    /// The piece is placed even when it overlaps the stack: it may still
    /// shift clear, otherwise its next downward step locks and tops out.
    fn spawn(&mut self, input: &FrameInput) {
        let kind = self.queue.pull(&mut self.source);

        if input.rotate_ccw_held {
            self.emit(GameEvent::RotateIrs(RotateDirection::Ccw));
        } else if input.rotate_cw_held {
            self.emit(GameEvent::RotateIrs(RotateDirection::Cw));
        }
        self.emit(GameEvent::Spawn {
            kind,
            next: self.queue.next(),
        });

        self.active = Some(ActivePiece::spawn(kind));
        self.phase = Phase::Falling;
    }

    /// Start a fresh game, keeping the rules and the random source
    pub fn restart(&mut self) {
        self.board.clear();
        self.queue = PieceQueue::initialize(&mut self.source);
        self.active = None;
        self.last_locked = None;
        self.phase = Phase::Falling;
        self.autoshift = AutoShift::default();
        self.ticks = 0;
        self.lock_ticks = 0;
        self.fall_tickrate = FPS;
        self.score = 0;
        self.level = 0;
        self.lines = 0;
        self.spawn(&FrameInput::idle());
    }

    /// Visible queue kinds, slot 0 first
    pub fn queue_kinds(&self) -> [PieceKind; QUEUE_LEN] {
        *self.queue.kinds()
    }
}

impl Default for GameSession<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}
