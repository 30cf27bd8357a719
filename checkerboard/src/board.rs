//! The checkers board state machine.

use log::{debug, trace};

pub use enumflags2::BitFlags;

pub use self::{
    common::{Cell, Move},
    errors::{IllegalMove, IllegalMoveReason, InvalidPromotion, InvalidPromotionReason},
    grid::Grid,
    highlight::CellSet,
    history::{History, Snapshot},
    piece::{Color, Piece},
    presenter::{BoardView, Change, NoPresenter, Presenter},
};

pub mod common;
mod errors;
mod grid;
mod highlight;
mod history;
mod piece;
mod presenter;


/// Number of rows and columns on the board.
pub const BOARD_SIZE: usize = 8;

/// Outcome of the game as recorded by whatever decides it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GameResult {
    InProgress,
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameResult {
    /// The result where `color` has won.
    pub fn win_for(color: Color) -> Self {
        match color {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }

    /// Whether a final result has been recorded.
    pub fn is_over(self) -> bool {
        self != GameResult::InProgress
    }
}

impl Default for GameResult {
    fn default() -> Self {
        GameResult::InProgress
    }
}

/// Authoritative state of a single game: the current grid, every position reached so
/// far, and the selection state of the front end driving it.
///
/// The board checks occupancy and applies promotion but knows nothing of legal moves.
/// After every mutating operation the [`Presenter`] is told what changed.
#[derive(Debug)]
pub struct Board<P: Presenter = NoPresenter> {
    /// Current position. Always equal to the newest snapshot in `history`.
    grid: Grid,

    /// Every position since the last reset.
    history: History,

    /// Origin cell selected by the front end.
    active: Option<Cell>,

    /// Candidate destinations marked by the front end.
    highlighted: CellSet,

    result: GameResult,

    presenter: P,
}

impl Board {
    /// Construct a board in the starting position that notifies nobody.
    pub fn new() -> Self {
        Self::with_presenter(NoPresenter)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Presenter> Board<P> {
    /// Construct a board in the starting position that reports changes to `presenter`.
    pub fn with_presenter(presenter: P) -> Self {
        let grid = Grid::starting();
        let mut board = Self {
            grid,
            history: History::new(grid),
            active: None,
            highlighted: CellSet::new(),
            result: GameResult::InProgress,
            presenter,
        };
        board.notify(BitFlags::all());
        board
    }

    /// Start a new game: restore the starting layout, drop all history and forget the
    /// selection and result.
    pub fn reset(&mut self) {
        self.grid = Grid::starting();
        self.history = History::new(self.grid);
        self.active = None;
        self.highlighted.clear();
        self.result = GameResult::InProgress;
        debug!("board reset to the starting position");
        self.notify(BitFlags::all());
    }

    /// Apply a move and record the resulting position.
    ///
    /// `capture_series` is the number of capture hops the current turn has made so far,
    /// including this move, and `0` for a move that captures nothing. [`Board::undo`]
    /// uses it to roll back a whole chain at once.
    ///
    /// The captured cell is cleared before the piece moves, so a move cannot capture
    /// its own piece. A man arriving on its crowning row becomes a king. Fails if the
    /// destination is occupied or the source is empty, in which case nothing changes.
    pub fn apply_move(&mut self, mv: Move, capture_series: usize) -> Result<(), IllegalMove> {
        self.grid = Self::moved(self.grid, mv)?;
        self.history.push(self.grid, capture_series);
        trace!("applied {} (series {})", mv, capture_series);
        self.notify(Change::Grid.into());
        Ok(())
    }

    /// Apply the hops of one capturing turn. Hop `i` (counting from 1) is recorded with
    /// capture series `i`, so a single [`Board::undo`] reverts the whole turn.
    ///
    /// Every hop must start where the previous one ended. The chain is checked in full
    /// before anything is recorded: if any hop fails the board is unchanged.
    pub fn apply_capture_chain(&mut self, hops: &[Move]) -> Result<(), IllegalMove> {
        let mut positions = Vec::with_capacity(hops.len());
        let mut grid = self.grid;
        for (i, &hop) in hops.iter().enumerate() {
            if i > 0 && hops[i - 1].to != hop.from {
                return Err(IllegalMove::new(IllegalMoveReason::DetachedHop, hop));
            }
            grid = Self::moved(grid, hop)?;
            positions.push(grid);
        }
        if positions.is_empty() {
            return Ok(());
        }
        for (i, position) in positions.into_iter().enumerate() {
            self.history.push(position, i + 1);
        }
        self.grid = grid;
        trace!("applied capture chain of {} hops", hops.len());
        self.notify(Change::Grid.into());
        Ok(())
    }

    /// Crown the man on `cell` and record the resulting position.
    pub fn promote(&mut self, cell: Cell) -> Result<(), InvalidPromotion> {
        match self.grid[cell] {
            None => Err(InvalidPromotion::new(InvalidPromotionReason::Empty, cell)),
            Some(piece) if piece.is_king() => Err(InvalidPromotion::new(
                InvalidPromotionReason::AlreadyKing,
                cell,
            )),
            Some(piece) => {
                self.grid[cell] = Some(piece.crowned());
                self.history.push(self.grid, 0);
                trace!("promoted {:?} on {}", piece, cell);
                self.notify(Change::Grid.into());
                Ok(())
            }
        }
    }

    /// Revert the most recent turn: as many snapshots as its capture series, at least
    /// one, but never past the starting position. Clears the selection. Returns the
    /// number of snapshots removed.
    pub fn undo(&mut self) -> usize {
        let removed = self.history.roll_back();
        self.grid = *self.history.last().grid();
        self.active = None;
        self.highlighted.clear();
        debug!(
            "undo removed {} snapshots, history depth {}",
            removed,
            self.history.len()
        );
        self.notify(Change::Grid | Change::Selection | Change::Highlight);
        removed
    }

    /// Select the origin cell of the move being entered.
    pub fn set_active(&mut self, cell: Cell) {
        self.active = Some(cell);
        self.notify(Change::Selection.into());
    }

    /// Forget the selected origin cell.
    pub fn clear_active(&mut self) {
        self.active = None;
        self.notify(Change::Selection.into());
    }

    /// The selected origin cell, if any.
    pub fn active(&self) -> Option<Cell> {
        self.active
    }

    /// Add cells to the highlight set.
    pub fn highlight<I: IntoIterator<Item = Cell>>(&mut self, cells: I) {
        self.highlighted.extend(cells);
        self.notify(Change::Highlight.into());
    }

    /// Remove every cell from the highlight set.
    pub fn clear_highlight(&mut self) {
        self.highlighted.clear();
        self.notify(Change::Highlight.into());
    }

    /// Whether `cell` is in the highlight set.
    pub fn is_highlighted(&self, cell: Cell) -> bool {
        self.highlighted.contains(cell)
    }

    /// Cells marked as candidate destinations.
    pub fn highlighted(&self) -> &CellSet {
        &self.highlighted
    }

    /// Record the outcome of the game. The board stays fully usable afterwards.
    pub fn record_result(&mut self, result: GameResult) {
        self.result = result;
        debug!("result recorded: {:?}", result);
        self.notify(Change::Result.into());
    }

    /// The recorded result, [`GameResult::InProgress`] until one is recorded.
    pub fn result(&self) -> GameResult {
        self.result
    }

    /// A copy of the current position.
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Every position reached since the last reset.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Ask the presenter to redraw without changing anything.
    pub fn refresh(&mut self) {
        self.notify(BitFlags::empty());
    }

    /// Read-only view of the whole state, as handed to the presenter.
    pub fn view(&self) -> BoardView<'_> {
        BoardView {
            grid: &self.grid,
            active: self.active,
            highlighted: &self.highlighted,
            result: self.result,
            depth: self.history.len(),
        }
    }

    /// Get the presenter notified by this board.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Get mutable access to the presenter, for state the board does not own.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Consume the board, returning its presenter.
    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Compute the position after `mv` without touching the board.
    fn moved(mut grid: Grid, mv: Move) -> Result<Grid, IllegalMove> {
        if !grid.is_empty(mv.to) {
            return Err(IllegalMove::new(IllegalMoveReason::DestinationOccupied, mv));
        }
        if let Some(captured) = mv.captured {
            grid.take(captured);
        }
        let piece = grid
            .take(mv.from)
            .ok_or_else(|| IllegalMove::new(IllegalMoveReason::SourceEmpty, mv))?;
        grid[mv.to] = Some(if piece.promotes_on(mv.to.row()) {
            piece.crowned()
        } else {
            piece
        });
        Ok(grid)
    }

    fn notify(&mut self, changed: BitFlags<Change>) {
        let view = BoardView {
            grid: &self.grid,
            active: self.active,
            highlighted: &self.highlighted,
            result: self.result,
            depth: self.history.len(),
        };
        self.presenter.refresh(view, changed);
    }
}
