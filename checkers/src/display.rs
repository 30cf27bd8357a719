//! Terminal presentation of the board.
//!
//! The display owns the terminal for as long as it lives: starting it switches to the
//! alternate screen and dropping it switches back.

use std::{
    env,
    fmt::Write as _,
    io::{self, Write},
};

use log::{debug, trace, warn};
use thiserror::Error;

use checkerboard::{
    BitFlags, BoardView, Cell, Change, Color, GameResult, Piece, Presenter, BOARD_SIZE,
};

/// Terminal size assumed when it cannot be read from the environment.
const FALLBACK_TERMINAL: (usize, usize) = (80, 24);

/// The board is drawn on a 10x10 layout: eight cells plus a margin on either side.
const LAYOUT_CELLS: usize = BOARD_SIZE + 2;

const ENTER_ALT_SCREEN: &str = "\x1b[?1049h";
const LEAVE_ALT_SCREEN: &str = "\x1b[?1049l";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Glyphs used to draw the board.
#[derive(Debug, Clone)]
pub struct Theme {
    pub white_man: char,
    pub black_man: char,
    pub white_king: char,
    pub black_king: char,
    /// Fill for the squares pieces are placed on.
    pub dark: char,
    /// Fill for the other squares.
    pub light: char,
    pub white_wins: &'static str,
    pub black_wins: &'static str,
    pub draw: &'static str,
}

impl Theme {
    /// Plain ASCII glyphs, safe on any terminal.
    pub fn ascii() -> Self {
        Self {
            white_man: 'w',
            black_man: 'b',
            white_king: 'W',
            black_king: 'B',
            dark: '.',
            light: ' ',
            white_wins: "*** WHITE WINS ***",
            black_wins: "*** BLACK WINS ***",
            draw: "*** DRAW ***",
        }
    }

    /// Box-drawing and circle glyphs for terminals with Unicode fonts.
    pub fn unicode() -> Self {
        Self {
            white_man: '○',
            black_man: '●',
            white_king: '◎',
            black_king: '◉',
            dark: '░',
            light: ' ',
            white_wins: "══ White wins ══",
            black_wins: "══ Black wins ══",
            draw: "══ Draw ══",
        }
    }

    fn glyph(&self, piece: Piece) -> char {
        match piece {
            Piece::WhiteMan => self.white_man,
            Piece::BlackMan => self.black_man,
            Piece::WhiteKing => self.white_king,
            Piece::BlackKing => self.black_king,
        }
    }

    fn banner(&self, result: GameResult) -> Option<&'static str> {
        match result {
            GameResult::InProgress => None,
            GameResult::WhiteWins => Some(self.white_wins),
            GameResult::BlackWins => Some(self.black_wins),
            GameResult::Draw => Some(self.draw),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::ascii()
    }
}

/// Configuration handed to the display when it starts.
#[derive(Debug, Clone, Default)]
pub struct DisplayConfig {
    /// Width of the drawing area in columns. 0 derives the size from the terminal.
    pub width: usize,
    /// Height of the drawing area in rows. 0 derives the size from the terminal.
    pub height: usize,
    pub theme: Theme,
    /// Whether to drive the terminal with escape sequences.
    pub ansi: bool,
}

/// Failure to set up or draw on the terminal.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// The requested drawing area cannot fit the board.
    #[error("a {width}x{height} drawing area is too small, need at least {min_width}x{min_height}")]
    TooSmall {
        width: usize,
        height: usize,
        min_width: usize,
        min_height: usize,
    },
    /// Writing to the terminal failed.
    #[error("terminal output failed: {0}")]
    Io(#[from] io::Error),
}

impl DisplayError {
    /// Process exit code the controller reports for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            DisplayError::TooSmall { .. } => 2,
            DisplayError::Io(_) => 1,
        }
    }
}

/// Size of the drawing area and of each cell within it, in character cells.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Layout {
    width: usize,
    height: usize,
    cell_width: usize,
    cell_height: usize,
}

impl Layout {
    /// Smallest drawing area that fits the board and its labels.
    pub const MIN_WIDTH: usize = 3 * LAYOUT_CELLS;
    pub const MIN_HEIGHT: usize = LAYOUT_CELLS;

    /// Compute the layout for a drawing area of the given size. If either dimension is
    /// 0, both are derived from the terminal.
    pub fn new(width: usize, height: usize) -> Result<Self, DisplayError> {
        let (width, height) = if width == 0 || height == 0 {
            Self::from_terminal()
        } else {
            (width, height)
        };
        if width < Self::MIN_WIDTH || height < Self::MIN_HEIGHT {
            return Err(DisplayError::TooSmall {
                width,
                height,
                min_width: Self::MIN_WIDTH,
                min_height: Self::MIN_HEIGHT,
            });
        }
        Ok(Self {
            width,
            height,
            cell_width: width / LAYOUT_CELLS,
            cell_height: height / LAYOUT_CELLS,
        })
    }

    /// Largest square area that fits the terminal, less a small margin. Character cells
    /// are about twice as tall as they are wide, so a square is twice as many columns as
    /// rows.
    fn from_terminal() -> (usize, usize) {
        let read = |name: &str| env::var(name).ok().and_then(|v| v.trim().parse::<usize>().ok());
        let (columns, lines) = match (read("COLUMNS"), read("LINES")) {
            (Some(columns), Some(lines)) => (columns, lines),
            _ => {
                warn!(
                    "terminal size not available, assuming {}x{}",
                    FALLBACK_TERMINAL.0, FALLBACK_TERMINAL.1
                );
                FALLBACK_TERMINAL
            }
        };
        let mut side = columns.min(lines.saturating_mul(2));
        side -= side / 15;
        (side, side / 2)
    }

    /// Width of the drawing area in columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the drawing area in rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Columns taken by one board cell.
    pub fn cell_width(&self) -> usize {
        self.cell_width
    }

    /// Rows taken by one board cell.
    pub fn cell_height(&self) -> usize {
        self.cell_height
    }
}

/// Draws the board on a terminal. Renders a new frame whenever the board reports a
/// change; [`TerminalDisplay::present`] puts the latest frame on screen.
pub struct TerminalDisplay<W: Write> {
    out: W,
    layout: Layout,
    theme: Theme,
    ansi: bool,
    /// Most recently rendered board.
    frame: String,
    /// One-off message shown under the next presented frame.
    status: Option<String>,
}

impl<W: Write> TerminalDisplay<W> {
    /// Take over the terminal behind `out`.
    pub fn start(config: DisplayConfig, mut out: W) -> Result<Self, DisplayError> {
        let layout = Layout::new(config.width, config.height)?;
        if config.ansi {
            out.write_all(ENTER_ALT_SCREEN.as_bytes())?;
            out.flush()?;
        }
        debug!("display started with {:?}", layout);
        Ok(Self {
            out,
            layout,
            theme: config.theme,
            ansi: config.ansi,
            frame: String::new(),
            status: None,
        })
    }

    /// Current size of the drawing area and its cells.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Recompute the layout for a new drawing area size. The board must be refreshed
    /// afterwards for the frame to follow.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), DisplayError> {
        self.layout = Layout::new(width, height)?;
        debug!("display resized to {:?}", self.layout);
        Ok(())
    }

    /// Show `message` under the next presented frame.
    pub fn set_status<S: Into<String>>(&mut self, message: S) {
        self.status = Some(message.into());
    }

    /// Write the latest frame and any pending status message to the terminal.
    pub fn present(&mut self) -> io::Result<()> {
        if self.ansi {
            self.out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        self.out.write_all(self.frame.as_bytes())?;
        if let Some(status) = self.status.take() {
            writeln!(self.out, "{}", status)?;
        }
        self.out.flush()
    }

    /// The latest rendered frame.
    pub fn frame(&self) -> &str {
        &self.frame
    }

    fn render(&self, view: &BoardView<'_>) -> String {
        let cw = self.layout.cell_width;
        let ch = self.layout.cell_height;
        let mut frame = String::new();

        // Writing to a String cannot fail.
        let _ = write!(frame, "{:>2} ", "");
        for col in 0..BOARD_SIZE {
            let _ = write!(frame, "{:^width$}", col, width = cw);
        }
        frame.push('\n');

        for row in 0..BOARD_SIZE {
            for line in 0..ch {
                let label_line = line == ch / 2;
                if label_line {
                    let _ = write!(frame, "{:>2} ", row);
                } else {
                    frame.push_str("   ");
                }
                for col in 0..BOARD_SIZE {
                    let cell = Cell::new(row, col);
                    self.render_cell(&mut frame, view, cell, label_line);
                }
                frame.push('\n');
            }
        }

        frame.push('\n');
        if let Some(banner) = self.theme.banner(view.result()) {
            let _ = writeln!(frame, "{:^width$}", banner, width = cw * BOARD_SIZE + 3);
        }
        let _ = writeln!(
            frame,
            "positions: {}  white: {}  black: {}   (undo | new | help)",
            view.depth(),
            view.grid().count(Color::White),
            view.grid().count(Color::Black),
        );
        frame
    }

    /// Render one line of a cell. The piece glyph and the selection markers go on the
    /// middle line only.
    fn render_cell(&self, frame: &mut String, view: &BoardView<'_>, cell: Cell, label_line: bool) {
        let cw = self.layout.cell_width;
        let fill = if cell.is_dark() {
            self.theme.dark
        } else {
            self.theme.light
        };
        let mut chars = vec![fill; cw];
        if label_line {
            if let Some(piece) = view.grid()[cell] {
                chars[cw / 2] = self.theme.glyph(piece);
            }
            let markers = if view.active() == Some(cell) {
                Some(('<', '>'))
            } else if view.highlighted().contains(cell) {
                Some(('[', ']'))
            } else {
                None
            };
            if let Some((open, close)) = markers {
                chars[0] = open;
                chars[cw - 1] = close;
            }
        }
        frame.extend(chars);
    }
}

impl<W: Write> Presenter for TerminalDisplay<W> {
    fn refresh(&mut self, view: BoardView<'_>, changed: BitFlags<Change>) {
        trace!("redrawing after {:?}", changed);
        self.frame = self.render(&view);
    }
}

impl<W: Write> Drop for TerminalDisplay<W> {
    fn drop(&mut self) {
        if self.ansi {
            if let Err(err) = self
                .out
                .write_all(LEAVE_ALT_SCREEN.as_bytes())
                .and_then(|_| self.out.flush())
            {
                warn!("could not restore the terminal: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use checkerboard::{Board, Move};

    fn plain(width: usize, height: usize) -> DisplayConfig {
        DisplayConfig {
            width,
            height,
            theme: Theme::ascii(),
            ansi: false,
        }
    }

    #[test]
    fn layout_from_explicit_size() {
        let layout = Layout::new(50, 20).unwrap();
        assert_eq!(layout.cell_width(), 5);
        assert_eq!(layout.cell_height(), 2);
    }

    #[test]
    fn layout_too_small() {
        let err = Layout::new(20, 20).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(matches!(err, DisplayError::TooSmall { width: 20, .. }));
    }

    /// The only test that touches the environment, so the variables cannot race.
    #[test]
    fn layout_from_terminal_environment() {
        env::set_var("COLUMNS", "120");
        env::set_var("LINES", "40");
        let layout = Layout::new(0, 0).unwrap();
        assert_eq!((layout.width(), layout.height()), (75, 37));
        assert_eq!((layout.cell_width(), layout.cell_height()), (7, 3));

        env::set_var("COLUMNS", "100");
        env::set_var("LINES", usize::MAX.to_string());
        let layout = Layout::new(0, 0).unwrap();
        assert_eq!((layout.width(), layout.height()), (94, 47));

        env::remove_var("COLUMNS");
        env::remove_var("LINES");
        let layout = Layout::new(0, 0).unwrap();
        assert_eq!((layout.width(), layout.height()), (45, 22));
    }

    #[test]
    fn resize_changes_cell_size_after_refresh() {
        let display = TerminalDisplay::start(plain(30, 10), Vec::new()).unwrap();
        let mut board = Board::with_presenter(display);
        let row_width = |board: &Board<TerminalDisplay<Vec<u8>>>| {
            board.presenter().frame().lines().nth(1).map(|l| l.chars().count())
        };
        assert_eq!(row_width(&board), Some(3 + 8 * 3));

        board.presenter_mut().resize(50, 20).unwrap();
        assert_eq!(row_width(&board), Some(3 + 8 * 3));
        board.refresh();
        assert_eq!(board.presenter().layout().cell_width(), 5);
        assert_eq!(row_width(&board), Some(3 + 8 * 5));

        assert!(board.presenter_mut().resize(10, 5).is_err());
        assert_eq!(board.presenter().layout().cell_width(), 5);
    }

    #[test]
    fn renders_pieces_and_markers() {
        let display = TerminalDisplay::start(plain(30, 10), Vec::new()).unwrap();
        let mut board = Board::with_presenter(display);
        board.set_active(Cell::new(5, 0));
        board.highlight(vec![Cell::new(4, 1)]);

        let frame = board.presenter().frame().to_owned();
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines[0], "    0  1  2  3  4  5  6  7 ");
        assert_eq!(lines[1], " 0    .b.   .b.   .b.   .b.");
        assert_eq!(lines[5], " 4    [.]   ...   ...   ...");
        assert_eq!(lines[6], " 5 <w>   .w.   .w.   .w.   ");
        assert!(frame.contains("positions: 1  white: 12  black: 12"));
    }

    #[test]
    fn shows_result_banner() {
        let display = TerminalDisplay::start(plain(30, 10), Vec::new()).unwrap();
        let mut board = Board::with_presenter(display);
        assert!(!board.presenter().frame().contains("WINS"));
        board.record_result(GameResult::WhiteWins);
        assert!(board.presenter().frame().contains("*** WHITE WINS ***"));
    }

    #[test]
    fn present_writes_frame_and_status_once() {
        let display = TerminalDisplay::start(plain(30, 10), Vec::new()).unwrap();
        let mut board = Board::with_presenter(display);
        board
            .apply_move(Move::new(Cell::new(5, 0), Cell::new(4, 1)), 0)
            .unwrap();
        let display = board.presenter_mut();
        display.set_status("moved");
        display.present().unwrap();
        display.present().unwrap();

        let written = String::from_utf8(display.out.clone()).unwrap();
        assert_eq!(written.matches("positions: 2").count(), 2);
        assert_eq!(written.matches("moved").count(), 1);
        assert!(!written.contains(ENTER_ALT_SCREEN));
    }

    #[test]
    fn ansi_display_restores_terminal_on_drop() {
        let mut out = Vec::new();
        {
            let config = DisplayConfig {
                ansi: true,
                ..plain(30, 10)
            };
            let mut display = TerminalDisplay::start(config, &mut out).unwrap();
            display.present().unwrap();
        }
        let written = String::from_utf8(out).unwrap();
        assert!(written.starts_with(ENTER_ALT_SCREEN));
        assert!(written.ends_with(LEAVE_ALT_SCREEN));
    }
}
