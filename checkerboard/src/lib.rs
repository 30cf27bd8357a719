//! Authoritative board state for a two-player game of checkers.
//!
//! [`Board`] owns the current 8x8 [`Grid`], the [`History`] of every position reached
//! so far and the transient selection state used by an interactive front end. It only
//! enforces occupancy and promotion bookkeeping: deciding whether a move is legal
//! checkers is left to whatever rules layer drives the board.
//!
//! ```
//! use checkerboard::{Board, Cell, Move, Piece};
//!
//! let mut board = Board::new();
//! board.apply_move(Move::new(Cell::new(5, 0), Cell::new(4, 1)), 0).unwrap();
//! assert_eq!(board.grid()[Cell::new(4, 1)], Some(Piece::WhiteMan));
//!
//! board.undo();
//! assert_eq!(board.history().len(), 1);
//! ```
//!
//! Front ends observe the board through the [`Presenter`] hook, which is invoked after
//! every mutation with a read-only [`BoardView`].

pub mod board;

pub use board::{
    BitFlags, Board, BoardView, Cell, CellSet, Change, Color, GameResult, Grid, History,
    IllegalMove, IllegalMoveReason, InvalidPromotion, InvalidPromotionReason, Move,
    NoPresenter, Piece, Presenter, Snapshot, BOARD_SIZE,
};
