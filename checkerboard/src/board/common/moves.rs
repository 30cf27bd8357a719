use std::fmt;

use crate::board::Cell;

/// A single piece transfer, optionally removing a captured piece on the way.
///
/// A [`Move`] carries no notion of legality: the board only checks that `from` holds a
/// piece and `to` is empty when the move is applied.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Move {
    /// Cell the piece leaves.
    pub from: Cell,
    /// Cell the piece arrives on.
    pub to: Cell,
    /// Cell whose piece is removed as part of this move, if any.
    pub captured: Option<Cell>,
}

impl Move {
    /// A move that captures nothing.
    pub fn new(from: Cell, to: Cell) -> Self {
        Self {
            from,
            to,
            captured: None,
        }
    }

    /// A move that removes the piece on `captured`.
    pub fn capturing(from: Cell, to: Cell, captured: Cell) -> Self {
        Self {
            from,
            to,
            captured: Some(captured),
        }
    }

    /// Whether this move removes a piece.
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.captured {
            Some(captured) => write!(f, "{} -> {} x {}", self.from, self.to, captured),
            None => write!(f, "{} -> {}", self.from, self.to),
        }
    }
}
