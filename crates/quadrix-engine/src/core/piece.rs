use std::time::Duration;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};

/// One board position in cell units.
///
/// `x` grows rightward, `y` grows downward. Coordinates are signed: a freshly
/// spawned piece sits partly above the visible board, so its cells have
/// negative `y` until gravity carries them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("({x}, {y})")]
pub struct Cell {
    pub x: i16,
    pub y: i16,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Column/row index into the visible board, if the cell lies on it.
    pub(crate) fn board_index(self) -> Option<(usize, usize)> {
        let x = usize::try_from(self.x).ok()?;
        let y = usize::try_from(self.y).ok()?;
        (x < super::GRID_COLS && y < super::GRID_ROWS).then_some((x, y))
    }
}

/// The seven tetromino shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(0..PieceKind::LEN) {
            0 => PieceKind::I,
            1 => PieceKind::O,
            2 => PieceKind::T,
            3 => PieceKind::S,
            4 => PieceKind::Z,
            5 => PieceKind::J,
            _ => PieceKind::L,
        }
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    /// The fixed rotation states of this shape.
    ///
    /// State counts differ per shape: O has one, S/Z/I two, J/L/T four. The
    /// active state is always selected modulo this list's length.
    pub(crate) const fn states(self) -> &'static [Pattern] {
        match self {
            PieceKind::I => I_STATES,
            PieceKind::O => O_STATES,
            PieceKind::T => T_STATES,
            PieceKind::S => S_STATES,
            PieceKind::Z => Z_STATES,
            PieceKind::J => J_STATES,
            PieceKind::L => L_STATES,
        }
    }

    /// Width and height of the spawn-orientation bounding box, for preview
    /// panels.
    #[must_use]
    pub fn size(self) -> (usize, usize) {
        let pattern = self.states()[0];
        (pattern[0].len(), pattern.len())
    }

    /// Whether the spawn-orientation pattern covers `(x, y)`.
    #[must_use]
    pub fn is_occupied(self, x: usize, y: usize) -> bool {
        let pattern = self.states()[0];
        pattern
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }
}

/// Boolean occupancy pattern of one rotation state, row-major.
pub(crate) type Pattern = &'static [&'static [bool]];

const C: bool = true;
const E: bool = false;

const I_STATES: &[Pattern] = &[&[&[C, C, C, C]], &[&[C], &[C], &[C], &[C]]];
const O_STATES: &[Pattern] = &[&[&[C, C], &[C, C]]];
const T_STATES: &[Pattern] = &[
    &[&[E, C, E], &[C, C, C]],
    &[&[C, E], &[C, C], &[C, E]],
    &[&[C, C, C], &[E, C, E]],
    &[&[E, C], &[C, C], &[E, C]],
];
const S_STATES: &[Pattern] = &[
    &[&[E, C, C], &[C, C, E]],
    &[&[C, E], &[C, C], &[E, C]],
];
const Z_STATES: &[Pattern] = &[
    &[&[C, C, E], &[E, C, C]],
    &[&[E, C], &[C, C], &[C, E]],
];
const J_STATES: &[Pattern] = &[
    &[&[C, E, E], &[C, C, C]],
    &[&[C, C], &[C, E], &[C, E]],
    &[&[C, C, C], &[E, E, C]],
    &[&[E, C], &[E, C], &[C, C]],
];
const L_STATES: &[Pattern] = &[
    &[&[E, E, C], &[C, C, C]],
    &[&[C, E], &[C, E], &[C, C]],
    &[&[C, C, C], &[C, E, E]],
    &[&[C, C], &[E, C], &[E, C]],
];

/// A movable tetromino: shape kind, rotation state, and cell-space position.
///
/// Movement and rotation build candidate pieces; the board controller is the
/// only place a candidate is checked against the grid, so a piece on its own
/// knows nothing about collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rotation: usize,
    position: Cell,
    falling: bool,
    fall_timer: Duration,
}

impl Piece {
    /// Where new pieces enter: centered horizontally, two rows above the board.
    pub(crate) const SPAWN: Cell = Cell::new(4, -2);

    /// Creates a piece at the spawn position, not yet falling.
    #[must_use]
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            position: Self::SPAWN,
            falling: false,
            fall_timer: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn position(&self) -> Cell {
        self.position
    }

    #[must_use]
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    #[must_use]
    pub fn is_falling(&self) -> bool {
        self.falling
    }

    fn pattern(&self) -> Pattern {
        let states = self.kind.states();
        states[self.rotation % states.len()]
    }

    /// Absolute cell coordinates of the active rotation state.
    ///
    /// Recomputed from the current rotation and position on every call; never
    /// cached, since both change between calls.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let origin = self.position;
        self.pattern().iter().zip(0i16..).flat_map(move |(row, dy)| {
            row.iter().zip(0i16..).filter_map(move |(&filled, dx)| {
                filled.then_some(Cell::new(origin.x + dx, origin.y + dy))
            })
        })
    }

    /// Candidate piece shifted by whole cells.
    #[must_use]
    pub(crate) fn moved(&self, dx: i16, dy: i16) -> Self {
        Self {
            position: Cell::new(self.position.x + dx, self.position.y + dy),
            ..*self
        }
    }

    /// Candidate piece advanced to the next rotation state.
    #[must_use]
    pub(crate) fn rotated(&self) -> Self {
        Self {
            rotation: (self.rotation + 1) % self.kind.states().len(),
            ..*self
        }
    }

    pub(crate) fn start_falling(&mut self) {
        self.falling = true;
        self.fall_timer = Duration::ZERO;
    }

    /// Accumulates elapsed time and reports whether gravity fires.
    ///
    /// Returns `true` once per elapsed `interval` while the piece is falling;
    /// the timer resets when it fires.
    pub(crate) fn advance_fall_timer(&mut self, dt: Duration, interval: Duration) -> bool {
        if !self.falling {
            return false;
        }
        self.fall_timer += dt;
        if self.fall_timer < interval {
            return false;
        }
        self.fall_timer = Duration::ZERO;
        true
    }
}

#[cfg(test)]
impl Piece {
    /// Test constructor: a falling piece at an arbitrary position.
    pub(crate) fn at(kind: PieceKind, position: Cell) -> Self {
        Self {
            kind,
            rotation: 0,
            position,
            falling: true,
            fall_timer: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [PieceKind; PieceKind::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    #[test]
    fn every_rotation_state_has_four_cells() {
        for kind in ALL_KINDS {
            for (rotation, pattern) in kind.states().iter().enumerate() {
                let cells = pattern.iter().copied().flatten().filter(|&&c| c).count();
                assert_eq!(cells, 4, "{kind:?} rotation {rotation}");
            }
        }
    }

    #[test]
    fn rotation_state_counts_match_shape_symmetry() {
        assert_eq!(PieceKind::O.states().len(), 1);
        assert_eq!(PieceKind::I.states().len(), 2);
        assert_eq!(PieceKind::S.states().len(), 2);
        assert_eq!(PieceKind::Z.states().len(), 2);
        assert_eq!(PieceKind::T.states().len(), 4);
        assert_eq!(PieceKind::J.states().len(), 4);
        assert_eq!(PieceKind::L.states().len(), 4);
    }

    #[test]
    fn spawn_sits_above_the_board() {
        let piece = Piece::spawn(PieceKind::T);
        assert_eq!(piece.position(), Cell::new(4, -2));
        assert_eq!(piece.rotation(), 0);
        assert!(!piece.is_falling());
        assert!(piece.cells().all(|cell| cell.y < 0));
    }

    #[test]
    fn cells_follow_position_and_rotation() {
        let piece = Piece::at(PieceKind::T, Cell::new(3, 5));
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(
            cells,
            [
                Cell::new(4, 5),
                Cell::new(3, 6),
                Cell::new(4, 6),
                Cell::new(5, 6)
            ]
        );

        let moved: Vec<_> = piece.moved(-1, 2).cells().collect();
        assert_eq!(
            moved,
            [
                Cell::new(3, 7),
                Cell::new(2, 8),
                Cell::new(3, 8),
                Cell::new(4, 8)
            ]
        );

        let rotated: Vec<_> = piece.rotated().cells().collect();
        assert_eq!(
            rotated,
            [
                Cell::new(3, 5),
                Cell::new(3, 6),
                Cell::new(4, 6),
                Cell::new(3, 7)
            ]
        );
    }

    #[test]
    fn rotation_wraps_around_the_state_list() {
        let mut piece = Piece::at(PieceKind::J, Cell::new(0, 0));
        for expected in [1, 2, 3, 0, 1] {
            piece = piece.rotated();
            assert_eq!(piece.rotation(), expected);
        }

        let square = Piece::at(PieceKind::O, Cell::new(0, 0)).rotated();
        assert_eq!(square.rotation(), 0);
    }

    #[test]
    fn fall_timer_fires_once_per_interval() {
        let interval = Duration::from_millis(100);
        let mut piece = Piece::at(PieceKind::I, Cell::new(0, 0));

        assert!(!piece.advance_fall_timer(Duration::from_millis(60), interval));
        assert!(piece.advance_fall_timer(Duration::from_millis(60), interval));
        // Timer reset when it fired; the next short step stays below the bar.
        assert!(!piece.advance_fall_timer(Duration::from_millis(60), interval));
    }

    #[test]
    fn fall_timer_is_inert_until_the_piece_falls() {
        let interval = Duration::from_millis(100);
        let mut piece = Piece::spawn(PieceKind::I);

        assert!(!piece.advance_fall_timer(Duration::from_secs(10), interval));
        piece.start_falling();
        assert!(piece.advance_fall_timer(Duration::from_millis(100), interval));
    }

    #[test]
    fn board_index_rejects_cells_off_the_board() {
        assert_eq!(Cell::new(0, 0).board_index(), Some((0, 0)));
        assert_eq!(Cell::new(9, 19).board_index(), Some((9, 19)));
        assert_eq!(Cell::new(4, -1).board_index(), None);
        assert_eq!(Cell::new(-1, 4).board_index(), None);
        assert_eq!(Cell::new(10, 4).board_index(), None);
        assert_eq!(Cell::new(4, 20).board_index(), None);
    }
}
