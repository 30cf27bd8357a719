//! Pieces and the sides that own them.

/// One of the two sides of the game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Color {
    /// Starts on rows 5-7 and moves towards row 0.
    White,
    /// Starts on rows 0-2 and moves towards row 7.
    Black,
}

impl Color {
    /// Get the opponent of this side.
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The row on which a man of this color is crowned.
    pub fn crowning_row(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

/// A piece occupying a cell of the grid. Empty cells are represented by `None`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Piece {
    /// Uncrowned white piece, moving towards row 0.
    WhiteMan,
    /// Uncrowned black piece, moving towards row 7.
    BlackMan,
    /// Crowned white piece.
    WhiteKing,
    /// Crowned black piece.
    BlackKing,
}

impl Piece {
    /// Get the color of this piece.
    pub fn color(self) -> Color {
        match self {
            Piece::WhiteMan | Piece::WhiteKing => Color::White,
            Piece::BlackMan | Piece::BlackKing => Color::Black,
        }
    }

    /// Whether this piece has been crowned.
    pub fn is_king(self) -> bool {
        match self {
            Piece::WhiteKing | Piece::BlackKing => true,
            Piece::WhiteMan | Piece::BlackMan => false,
        }
    }

    /// Get the king of the same color. Kings are returned unchanged.
    pub fn crowned(self) -> Self {
        match self {
            Piece::WhiteMan | Piece::WhiteKing => Piece::WhiteKing,
            Piece::BlackMan | Piece::BlackKing => Piece::BlackKing,
        }
    }

    /// Whether a man arriving on `row` is crowned. Always false for kings.
    pub fn promotes_on(self, row: usize) -> bool {
        !self.is_king() && row == self.color().crowning_row()
    }
}
