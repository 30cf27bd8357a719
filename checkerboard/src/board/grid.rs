//! The 8x8 occupancy grid. Grids are plain `Copy` values so the history can keep whole
//! snapshots and callers can hold on to a position without borrowing the board.

use std::ops::{Index, IndexMut};

use crate::board::{Cell, Color, Piece, BOARD_SIZE};

/// Occupancy of every cell on the board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Grid {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Grid {
    /// A grid with no pieces on it.
    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// The standard starting layout: the three back rows of each side filled on the
    /// dark squares.
    pub fn starting() -> Self {
        let mut grid = Self::empty();
        for cell in Cell::all().filter(|cell| cell.is_dark()) {
            grid[cell] = match cell.row() {
                r if r < 3 => Some(Piece::BlackMan),
                r if r > 4 => Some(Piece::WhiteMan),
                _ => None,
            };
        }
        grid
    }

    /// Get the piece on the given cell, if any.
    #[inline]
    pub fn get(&self, cell: Cell) -> Option<Piece> {
        self.cells[cell.row()][cell.col()]
    }

    /// Whether the given cell holds no piece.
    #[inline]
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell).is_none()
    }

    /// Remove and return the piece on the given cell.
    pub fn take(&mut self, cell: Cell) -> Option<Piece> {
        self.cells[cell.row()][cell.col()].take()
    }

    /// Get an iterator over rows of this grid. Each row is an iterator over the cells of
    /// that row paired with their contents.
    pub fn rows<'a>(
        &'a self,
    ) -> impl 'a + Iterator<Item = impl 'a + Iterator<Item = (Cell, Option<Piece>)>> {
        (0..BOARD_SIZE).map(move |row| {
            (0..BOARD_SIZE).map(move |col| {
                let cell = Cell::new(row, col);
                (cell, self.get(cell))
            })
        })
    }

    /// Iterate the occupied cells and the pieces on them.
    pub fn pieces<'a>(&'a self) -> impl 'a + Iterator<Item = (Cell, Piece)> {
        Cell::all().filter_map(move |cell| self.get(cell).map(|piece| (cell, piece)))
    }

    /// Count the pieces, men and kings alike, belonging to `color`.
    pub fn count(&self, color: Color) -> usize {
        self.pieces()
            .filter(|(_, piece)| piece.color() == color)
            .count()
    }
}

impl Default for Grid {
    /// The starting layout.
    fn default() -> Self {
        Self::starting()
    }
}

impl Index<Cell> for Grid {
    type Output = Option<Piece>;

    fn index(&self, cell: Cell) -> &Self::Output {
        &self.cells[cell.row()][cell.col()]
    }
}

impl IndexMut<Cell> for Grid {
    fn index_mut(&mut self, cell: Cell) -> &mut Self::Output {
        &mut self.cells[cell.row()][cell.col()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_layout() {
        let grid = Grid::starting();
        for (cell, piece) in grid.rows().flatten() {
            let expected = match cell.row() {
                r if r < 3 && cell.is_dark() => Some(Piece::BlackMan),
                r if r > 4 && cell.is_dark() => Some(Piece::WhiteMan),
                _ => None,
            };
            assert_eq!(piece, expected, "{}", cell);
        }
        assert_eq!(grid.count(Color::White), 12);
        assert_eq!(grid.count(Color::Black), 12);
    }

    #[test]
    fn take_empties_cell() {
        let mut grid = Grid::starting();
        let cell = Cell::new(5, 0);
        assert_eq!(grid.take(cell), Some(Piece::WhiteMan));
        assert!(grid.is_empty(cell));
        assert_eq!(grid.take(cell), None);
        assert_eq!(grid.count(Color::White), 11);
    }

    #[test]
    fn copies_are_independent() {
        let grid = Grid::starting();
        let mut copy = grid;
        copy[Cell::new(0, 1)] = None;
        assert_eq!(grid[Cell::new(0, 1)], Some(Piece::BlackMan));
        assert_ne!(grid, copy);
    }
}
