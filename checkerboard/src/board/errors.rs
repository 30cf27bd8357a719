//! Errors returned by the [`Board`][crate::Board] when asked to do something its state
//! does not allow.

use thiserror::Error;

use crate::board::{Cell, Move};

/// Reason why a move could not be applied.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum IllegalMoveReason {
    /// The destination cell already holds a piece.
    #[error("the destination cell is occupied")]
    DestinationOccupied,
    /// The source cell holds no piece, or its piece would be removed by the capture.
    #[error("the source cell is empty")]
    SourceEmpty,
    /// A hop of a capture chain did not start where the previous hop ended.
    #[error("the hop does not continue from the previous one")]
    DetachedHop,
}

/// Error returned when a move cannot be applied. The board is left unchanged.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("could not apply move {mv}: {reason}")]
pub struct IllegalMove {
    /// Reason why the move was rejected.
    reason: IllegalMoveReason,

    /// The rejected move.
    mv: Move,
}

impl IllegalMove {
    /// Construct an illegal-move error with the given reason for the specified move.
    pub(super) fn new(reason: IllegalMoveReason, mv: Move) -> Self {
        Self { reason, mv }
    }

    /// Get the reason the move was rejected.
    pub fn reason(&self) -> IllegalMoveReason {
        self.reason
    }

    /// Get the move that was rejected.
    pub fn mv(&self) -> &Move {
        &self.mv
    }

    /// Extract the rejected move.
    pub fn into_move(self) -> Move {
        self.mv
    }
}

/// Reason why a piece could not be crowned.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum InvalidPromotionReason {
    /// There is no piece on the cell.
    #[error("the cell is empty")]
    Empty,
    /// The piece on the cell is already a king.
    #[error("the piece is already a king")]
    AlreadyKing,
}

/// Error returned when promotion is requested on a cell that cannot be promoted. The
/// board is left unchanged.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("could not promote the piece on {cell}: {reason}")]
pub struct InvalidPromotion {
    /// Reason why promotion was rejected.
    reason: InvalidPromotionReason,

    /// The cell promotion was requested on.
    cell: Cell,
}

impl InvalidPromotion {
    /// Construct a promotion error with the given reason for the specified cell.
    pub(super) fn new(reason: InvalidPromotionReason, cell: Cell) -> Self {
        Self { reason, cell }
    }

    /// Get the reason promotion was rejected.
    pub fn reason(&self) -> InvalidPromotionReason {
        self.reason
    }

    /// Get the cell promotion was requested on.
    pub fn cell(&self) -> Cell {
        self.cell
    }
}
