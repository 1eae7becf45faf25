use crate::CellOccupiedError;

use super::{
    GRID_COLS, GRID_ROWS,
    piece::{Cell, PieceKind},
};

/// Occupancy table of locked blocks.
///
/// Each cell either is empty or records the kind of the piece locked there,
/// so the same array serves as the identity map for rendering and as the
/// occupancy view for line-completion checks: a cell is occupied exactly when
/// it holds a kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: [[Option<PieceKind>; GRID_COLS]; GRID_ROWS],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Creates an empty grid.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: [[None; GRID_COLS]; GRID_ROWS],
        }
    }

    /// The kind locked at `cell`, if any. Cells off the board are never
    /// occupied.
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<PieceKind> {
        let (x, y) = cell.board_index()?;
        self.rows[y][x]
    }

    #[must_use]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.get(cell).is_some()
    }

    /// Iterates the visible rows top to bottom.
    pub fn cell_rows(&self) -> impl Iterator<Item = &[Option<PieceKind>; GRID_COLS]> {
        self.rows.iter()
    }

    /// Iterates every occupied cell with its locked kind.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (Cell, PieceKind)> {
        self.rows.iter().zip(0i16..).flat_map(|(row, y)| {
            row.iter()
                .zip(0i16..)
                .filter_map(move |(&kind, x)| Some((Cell::new(x, y), kind?)))
        })
    }

    /// Marks each given cell as locked by `kind`.
    ///
    /// Cells above the board (`y < 0`, the spawn overhang) are skipped.
    /// Locking an already-occupied cell is a contract violation; callers
    /// must have collision-checked the placement first.
    pub fn lock(
        &mut self,
        cells: impl IntoIterator<Item = Cell>,
        kind: PieceKind,
    ) -> Result<(), CellOccupiedError> {
        for cell in cells {
            let Some((x, y)) = cell.board_index() else {
                continue;
            };
            if self.rows[y][x].is_some() {
                return Err(CellOccupiedError { cell });
            }
            self.rows[y][x] = Some(kind);
        }
        Ok(())
    }

    /// Removes every complete row and cascades the rows above it down.
    ///
    /// Rows are scanned top to bottom; each clear shifts only the rows
    /// strictly above the cleared one, so several clears in one pass
    /// accumulate correctly. Returns the number of rows cleared.
    pub fn clear_completed_rows(&mut self) -> usize {
        let mut cleared = 0;
        for y in 0..GRID_ROWS {
            if self.rows[y].iter().all(Option::is_some) {
                for row in (1..=y).rev() {
                    self.rows[row] = self.rows[row - 1];
                }
                self.rows[0] = [None; GRID_COLS];
                cleared += 1;
            }
        }
        cleared
    }

    /// Builds a grid from ASCII art for tests: `#` is a locked cell, `.` is
    /// empty. Rows are listed top to bottom and trailing empty rows may be
    /// omitted.
    ///
    /// # Panics
    ///
    /// Panics if a row does not have exactly [`GRID_COLS`] cells or there are
    /// more than [`GRID_ROWS`] rows.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut grid = Self::new();
        let lines = art.lines().filter(|line| !line.trim().is_empty());

        for (y, line) in lines.enumerate() {
            assert!(y < GRID_ROWS, "too many rows");
            let cells: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                cells.len(),
                GRID_COLS,
                "row {y} must have exactly {GRID_COLS} cells"
            );
            for (x, &ch) in cells.iter().enumerate() {
                if ch == '#' {
                    grid.rows[y][x] = Some(PieceKind::O);
                }
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new();
        assert_eq!(grid.occupied_cells().count(), 0);
        for y in 0..20 {
            for x in 0..10 {
                assert!(!grid.is_occupied(Cell::new(x, y)));
            }
        }
    }

    #[test]
    fn occupied_iff_present_in_the_map() {
        let mut grid = Grid::new();
        grid.lock([Cell::new(3, 17), Cell::new(4, 17)], PieceKind::S)
            .unwrap();

        for y in 0..20 {
            for x in 0..10 {
                let cell = Cell::new(x, y);
                assert_eq!(grid.is_occupied(cell), grid.get(cell).is_some());
            }
        }
        assert_eq!(grid.get(Cell::new(3, 17)), Some(PieceKind::S));
        assert_eq!(grid.get(Cell::new(5, 17)), None);
        assert_eq!(grid.occupied_cells().count(), 2);
    }

    #[test]
    fn off_board_cells_are_never_occupied() {
        let grid = Grid::from_ascii("##########");
        assert!(!grid.is_occupied(Cell::new(0, -1)));
        assert!(!grid.is_occupied(Cell::new(-1, 0)));
        assert!(!grid.is_occupied(Cell::new(10, 0)));
        assert!(!grid.is_occupied(Cell::new(0, 20)));
    }

    #[test]
    fn lock_rejects_an_occupied_cell() {
        let mut grid = Grid::new();
        grid.lock([Cell::new(5, 10)], PieceKind::I).unwrap();

        let err = grid
            .lock([Cell::new(4, 10), Cell::new(5, 10)], PieceKind::T)
            .unwrap_err();
        assert_eq!(err.cell, Cell::new(5, 10));
    }

    #[test]
    fn lock_skips_the_spawn_overhang() {
        let mut grid = Grid::new();
        grid.lock([Cell::new(4, -1), Cell::new(4, 0)], PieceKind::L)
            .unwrap();

        assert_eq!(grid.occupied_cells().count(), 1);
        assert!(grid.is_occupied(Cell::new(4, 0)));
    }

    #[test]
    fn clearing_with_no_complete_row_changes_nothing() {
        let art = "
            ..........
            #########.
            .#########
        ";
        let mut grid = Grid::from_ascii(art);
        let before = grid.clone();

        assert_eq!(grid.clear_completed_rows(), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn clearing_the_bottom_row_keeps_the_stack_order() {
        let mut grid = Grid::new();
        // Distinct kinds above the full bottom row to track relative order.
        grid.lock([Cell::new(0, 17)], PieceKind::I).unwrap();
        grid.lock([Cell::new(0, 18)], PieceKind::T).unwrap();
        for x in 0..10 {
            grid.lock([Cell::new(x, 19)], PieceKind::O).unwrap();
        }

        assert_eq!(grid.clear_completed_rows(), 1);
        assert_eq!(grid.occupied_cells().count(), 2);
        assert_eq!(grid.get(Cell::new(0, 18)), Some(PieceKind::I));
        assert_eq!(grid.get(Cell::new(0, 19)), Some(PieceKind::T));
    }

    #[test]
    fn adjacent_complete_rows_clear_in_one_pass() {
        let art = "
            ..#.......
            ##########
            ##########
        ";
        let mut grid = Grid::from_ascii(art);
        let before = grid.occupied_cells().count();

        assert_eq!(grid.clear_completed_rows(), 2);
        assert_eq!(grid.occupied_cells().count(), before - 2 * GRID_COLS);
        // The lone block two rows up landed on what is now row 2.
        assert!(grid.is_occupied(Cell::new(2, 2)));
        assert!(!grid.is_occupied(Cell::new(2, 0)));
    }

    #[test]
    fn separated_complete_rows_cascade_correctly() {
        let art = "
            #.........
            ##########
            .#........
            ##########
        ";
        let mut grid = Grid::from_ascii(art);

        assert_eq!(grid.clear_completed_rows(), 2);
        assert_eq!(grid.occupied_cells().count(), 2);
        // Top block fell past both cleared rows, middle block past one.
        assert!(grid.is_occupied(Cell::new(0, 2)));
        assert!(grid.is_occupied(Cell::new(1, 3)));
    }

    #[test]
    fn full_board_clears_every_row() {
        let mut grid = Grid::new();
        for y in 0..20 {
            for x in 0..10 {
                grid.lock([Cell::new(x, y)], PieceKind::Z).unwrap();
            }
        }

        assert_eq!(grid.clear_completed_rows(), GRID_ROWS);
        assert_eq!(grid.occupied_cells().count(), 0);
    }
}
