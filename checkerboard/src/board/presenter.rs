//! Hook through which a front end learns that the board changed.

use enumflags2::BitFlags;

use crate::board::{Cell, CellSet, GameResult, Grid};

/// Parts of the board state touched by an operation.
#[derive(BitFlags, Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum Change {
    /// Piece placement or history depth.
    Grid = 0b0001,
    /// The active cell.
    Selection = 0b0010,
    /// The highlight set.
    Highlight = 0b0100,
    /// The recorded game result.
    Result = 0b1000,
}

/// Read-only view of everything a front end needs to draw the board.
#[derive(Debug, Copy, Clone)]
pub struct BoardView<'a> {
    pub(super) grid: &'a Grid,
    pub(super) active: Option<Cell>,
    pub(super) highlighted: &'a CellSet,
    pub(super) result: GameResult,
    pub(super) depth: usize,
}

impl<'a> BoardView<'a> {
    /// The current position.
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// The selected origin cell, if any.
    pub fn active(&self) -> Option<Cell> {
        self.active
    }

    /// Cells marked as candidate destinations.
    pub fn highlighted(&self) -> &'a CellSet {
        self.highlighted
    }

    /// The recorded result.
    pub fn result(&self) -> GameResult {
        self.result
    }

    /// Number of snapshots in the history, including the starting position.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Receives a notification at the end of every mutating board operation.
///
/// Refresh is called synchronously on the caller's thread. The view borrows the board,
/// so a presenter can read anything but change nothing.
pub trait Presenter {
    fn refresh(&mut self, view: BoardView<'_>, changed: BitFlags<Change>);
}

/// Presenter that ignores every notification.
#[derive(Debug, Copy, Clone, Default)]
pub struct NoPresenter;

impl Presenter for NoPresenter {
    fn refresh(&mut self, _: BoardView<'_>, _: BitFlags<Change>) {}
}

impl<F: FnMut(BoardView<'_>, BitFlags<Change>)> Presenter for F {
    fn refresh(&mut self, view: BoardView<'_>, changed: BitFlags<Change>) {
        self(view, changed)
    }
}
