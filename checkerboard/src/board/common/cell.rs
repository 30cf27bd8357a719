use std::{convert::TryFrom, fmt};

use crate::board::BOARD_SIZE;

/// Coordinates of a single square on the board. Both `row` and `col` are always in
/// `[0, 8)`; there is no way to build a [`Cell`] outside the board.
///
/// Row 0 is the black side of the board, row 7 the white side.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Cell {
    row: usize,
    col: usize,
}

impl Cell {
    /// Construct a [`Cell`] from the given `row` and `col`.
    /// Panics if either coordinate is outside the board.
    pub fn new(row: usize, col: usize) -> Self {
        match Self::try_new(row, col) {
            Some(cell) => cell,
            None => panic!(
                "({}, {}) is out of bounds for a {}x{} board",
                row, col, BOARD_SIZE, BOARD_SIZE
            ),
        }
    }

    /// Construct a [`Cell`] from the given `row` and `col`. Returns `None` if either
    /// coordinate is outside the board.
    pub fn try_new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Row of this cell.
    pub fn row(self) -> usize {
        self.row
    }

    /// Column of this cell.
    pub fn col(self) -> usize {
        self.col
    }

    /// Whether this is one of the dark squares pieces are placed on.
    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// Position of this cell in a row-major walk of the board.
    #[inline]
    pub(crate) fn linearize(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// Inverse of [`Cell::linearize`]. Panics if `idx` is past the end of the board.
    #[inline]
    pub(crate) fn un_linearize(idx: usize) -> Self {
        Self::new(idx / BOARD_SIZE, idx % BOARD_SIZE)
    }

    /// Iterate every cell of the board, row by row.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..BOARD_SIZE * BOARD_SIZE).map(Self::un_linearize)
    }
}

impl TryFrom<(usize, usize)> for Cell {
    type Error = (usize, usize);

    /// Construct a [`Cell`] from a `(row, col)` pair, handing the pair back if it is off
    /// the board.
    fn try_from((row, col): (usize, usize)) -> Result<Self, Self::Error> {
        Self::try_new(row, col).ok_or((row, col))
    }
}

impl From<Cell> for (usize, usize) {
    /// Convert the [`Cell`] into a `(row, col)` pair.
    fn from(cell: Cell) -> Self {
        (cell.row, cell.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_off_board() {
        assert!(Cell::try_new(8, 0).is_none());
        assert!(Cell::try_new(0, 8).is_none());
        assert_eq!(Cell::try_from((9, 9)), Err((9, 9)));
        assert_eq!(Cell::try_from((7, 7)).map(<(usize, usize)>::from), Ok((7, 7)));
    }

    #[test]
    #[should_panic]
    fn new_panics_off_board() {
        Cell::new(3, 8);
    }

    #[test]
    fn linear_walk_covers_board() {
        let cells: Vec<_> = Cell::all().collect();
        assert_eq!(cells.len(), 64);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[9], Cell::new(1, 1));
        assert_eq!(cells[63], Cell::new(7, 7));
        for cell in cells {
            assert_eq!(Cell::un_linearize(cell.linearize()), cell);
        }
    }

    #[test]
    fn dark_squares() {
        assert!(!Cell::new(0, 0).is_dark());
        assert!(Cell::new(0, 1).is_dark());
        assert!(Cell::new(5, 0).is_dark());
        assert_eq!(Cell::all().filter(|c| c.is_dark()).count(), 32);
    }
}
