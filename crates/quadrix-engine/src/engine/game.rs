use std::{mem, time::Duration};

use crate::core::{
    COLS, ROWS,
    grid::Grid,
    piece::{Piece, PieceKind},
};

use super::factory::PieceFactory;

/// Interval between automatic downward steps at level 1.
const BASE_GRAVITY_INTERVAL: Duration = Duration::from_millis(1000);

/// Gravity never accelerates past this, no matter how high the level climbs.
/// Roughly one frame at 30 FPS, so repeated halving cannot reach zero.
const MIN_GRAVITY_INTERVAL: Duration = Duration::from_millis(33);

/// Score needed for each level step.
const SCORE_PER_LEVEL: usize = 500;

/// A player request routed to the current piece.
///
/// Geometrically illegal requests are absorbed as no-ops; none of these ever
/// fails visibly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    MoveDown,
    Rotate,
    HardDrop,
    /// Starts a new game from the splash or game-over screen.
    Restart,
}

/// Notification emitted while the game state mutates.
///
/// Collaborators (audio, visual feedback) drain these with
/// [`Game::take_events`]; a headless game can simply never drain them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Rotated,
    Locked,
    LinesCleared(usize),
    LevelUp(usize),
    GameOver,
}

/// Lifecycle phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Phase {
    /// Title screen; waiting for the first [`Command::Restart`].
    Splash,
    Playing,
    GameOver,
}

/// The board controller.
///
/// Owns the grid and both pieces exclusively; every mutation funnels through
/// [`Self::apply`] and [`Self::tick`]. Renderers hold a shared reference and
/// read the accessors.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use quadrix_engine::{Command, Game, PieceFactory};
///
/// let mut game = Game::with_factory(PieceFactory::with_seed(42));
/// game.reset();
/// game.apply(Command::MoveLeft);
/// game.tick(Duration::from_millis(16));
/// assert!(game.phase().is_playing());
/// ```
#[derive(Debug)]
pub struct Game {
    grid: Grid,
    current: Piece,
    next: Piece,
    factory: PieceFactory,
    score: usize,
    lines: usize,
    level: usize,
    gravity_interval: Duration,
    phase: Phase,
    events: Vec<GameEvent>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game on the splash screen with a randomly seeded factory.
    #[must_use]
    pub fn new() -> Self {
        Self::with_factory(PieceFactory::new())
    }

    /// Like [`Self::new`], but drawing pieces from the given factory.
    #[must_use]
    pub fn with_factory(mut factory: PieceFactory) -> Self {
        let current = factory.next_piece();
        let next = factory.next_piece();
        Self {
            grid: Grid::new(),
            current,
            next,
            factory,
            score: 0,
            lines: 0,
            level: 1,
            gravity_interval: BASE_GRAVITY_INTERVAL,
            phase: Phase::Splash,
            events: Vec::new(),
        }
    }

    /// Starts a fresh game: empty grid, zeroed score, level 1, two new
    /// pieces, phase [`Phase::Playing`].
    pub fn reset(&mut self) {
        self.grid = Grid::new();
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.gravity_interval = BASE_GRAVITY_INTERVAL;
        self.current = self.factory.next_piece();
        self.current.start_falling();
        self.next = self.factory.next_piece();
        self.events.clear();
        self.phase = Phase::Playing;
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn current(&self) -> &Piece {
        &self.current
    }

    /// Kind of the upcoming piece, for the preview panel.
    #[must_use]
    pub fn next_kind(&self) -> PieceKind {
        self.next.kind()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn lines(&self) -> usize {
        self.lines
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    #[must_use]
    pub fn gravity_interval(&self) -> Duration {
        self.gravity_interval
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Drains the pending notifications.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    /// Routes one command. Gameplay commands act only while playing;
    /// [`Command::Restart`] acts only while not.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Restart if !self.phase.is_playing() => self.reset(),
            _ if !self.phase.is_playing() => {}
            Command::MoveLeft => {
                self.try_move(-1, 0);
            }
            Command::MoveRight => {
                self.try_move(1, 0);
            }
            Command::MoveDown => {
                self.try_move(0, 1);
            }
            Command::Rotate => self.try_rotate(),
            Command::HardDrop => self.hard_drop(),
            Command::Restart => {}
        }
    }

    /// Advances the game by `dt` of elapsed time.
    ///
    /// When the current piece's fall timer runs out it steps down one row; a
    /// piece that can no longer step down locks instead. At most one lock
    /// happens per call.
    pub fn tick(&mut self, dt: Duration) {
        if !self.phase.is_playing() {
            return;
        }
        if !self.current.advance_fall_timer(dt, self.gravity_interval) {
            return;
        }
        if !self.try_move(0, 1) {
            self.lock_current();
        }
    }

    /// Whether the candidate stays inside the side and bottom walls and
    /// overlaps no locked cell. Cells above the board are legal; pieces live
    /// there right after spawning.
    fn fits(&self, piece: &Piece) -> bool {
        piece.cells().all(|cell| {
            (0..COLS).contains(&cell.x) && cell.y < ROWS && !self.grid.is_occupied(cell)
        })
    }

    /// Attempt-then-revert: the shifted candidate replaces the current piece
    /// only when it fits.
    fn try_move(&mut self, dx: i16, dy: i16) -> bool {
        let moved = self.current.moved(dx, dy);
        if self.fits(&moved) {
            self.current = moved;
            true
        } else {
            false
        }
    }

    /// Rotation succeeds in place or not at all; there is no wall kick.
    fn try_rotate(&mut self) {
        let rotated = self.current.rotated();
        if self.fits(&rotated) {
            self.current = rotated;
            self.events.push(GameEvent::Rotated);
        }
    }

    /// Drop to the floor. Locking is left to the next gravity tick.
    fn hard_drop(&mut self) {
        while self.try_move(0, 1) {}
    }

    /// The lock sequence: freeze the piece into the grid, then either end the
    /// game (top breach) or clear lines, score, and promote the next piece.
    fn lock_current(&mut self) {
        let breached_top = self.current.cells().any(|cell| cell.y < 0);
        self.grid
            .lock(self.current.cells(), self.current.kind())
            .expect("piece placement was collision-checked");
        self.events.push(GameEvent::Locked);

        if breached_top {
            self.phase = Phase::GameOver;
            self.events.push(GameEvent::GameOver);
            return;
        }

        let cleared = self.grid.clear_completed_rows();
        if cleared > 0 {
            self.apply_clear_score(cleared);
        }

        self.current = mem::replace(&mut self.next, self.factory.next_piece());
        self.current.start_falling();
    }

    fn apply_clear_score(&mut self, cleared: usize) {
        self.lines += cleared;
        self.score += 10 * cleared * cleared;
        self.events.push(GameEvent::LinesCleared(cleared));

        let level = 1 + self.score / SCORE_PER_LEVEL;
        if level > self.level {
            self.level = level;
            self.gravity_interval = (self.gravity_interval / 2).max(MIN_GRAVITY_INTERVAL);
            self.events.push(GameEvent::LevelUp(level));
        }
    }
}
