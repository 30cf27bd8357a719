//! Parsing of the line commands typed by the players, and turning a typed path into
//! the moves the board understands.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use checkerboard::{Cell, GameResult, Grid, Move};

/// A command entered at the prompt.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Command {
    /// Move a piece along the given cells.
    Move(Vec<Cell>),
    /// Select the origin cell of a move.
    Select(Cell),
    /// Highlight the given cells.
    Mark(Vec<Cell>),
    /// Clear the selection and all highlights.
    Clear,
    Promote(Cell),
    Undo,
    /// Start a new game.
    New,
    /// Record the outcome of the game.
    Result(GameResult),
    /// List the positions recorded so far.
    History,
    /// Change the size of the drawing area. 0 derives it from the terminal.
    Resize(usize, usize),
    Help,
    Quit,
}

/// Reason a typed command could not be understood.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum CommandError {
    #[error("unknown command \"{0}\", type help or ? for commands")]
    Unknown(String),
    #[error("invalid cell \"{0}\", expected row,col with both in [0,7]")]
    InvalidCell(String),
    #[error("a move needs at least two cells")]
    TooFewCells,
    #[error("invalid result \"{0}\", choose \"white\", \"black\", or \"draw\"")]
    InvalidResult(String),
    #[error("only capturing hops can be chained")]
    QuietHopInChain,
}

/// Matches one `row,col` pair.
static CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<row>[0-9]+)\s*,\s*(?P<col>[0-9]+)").unwrap());

/// Matches a list of cells separated by whitespace or arrows.
static CELL_LIST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?x)
        [0-9]+\s*,\s*[0-9]+
        (?:(?:\s+|\s*-+>?\s*)[0-9]+\s*,\s*[0-9]+)*$",
    )
    .unwrap()
});

/// Matches a drawing area size such as `60x20`.
static SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<width>[0-9]+)\s*[x,]\s*(?P<height>[0-9]+)$").unwrap());

static WITH_ARGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<verb>[a-z?]+)(?:\s+(?P<args>.*))?$").unwrap());

/// Parse one line of input. Input is expected to be trimmed and lower case.
pub fn parse(input: &str) -> Result<Command, CommandError> {
    let captures = WITH_ARGS
        .captures(input)
        .ok_or_else(|| CommandError::Unknown(input.to_owned()))?;
    let verb = captures.name("verb").map_or("", |m| m.as_str());
    let args = captures.name("args").map_or("", |m| m.as_str().trim());

    Ok(match (verb, args) {
        ("move" | "m" | "mv", args) => {
            let path = parse_cells(args)?;
            if path.len() < 2 {
                return Err(CommandError::TooFewCells);
            }
            Command::Move(path)
        }
        ("select" | "sel" | "s", args) => Command::Select(parse_cell(args)?),
        ("mark" | "hl" | "highlight", args) => Command::Mark(parse_cells(args)?),
        ("promote" | "crown" | "p", args) => Command::Promote(parse_cell(args)?),
        ("result" | "final", args) => Command::Result(match args {
            "white" | "w" => GameResult::WhiteWins,
            "black" | "b" => GameResult::BlackWins,
            "draw" | "d" => GameResult::Draw,
            other => return Err(CommandError::InvalidResult(other.to_owned())),
        }),
        ("resize" | "size", "") => Command::Resize(0, 0),
        ("resize" | "size", args) => {
            let invalid = || CommandError::Unknown(input.to_owned());
            let size = SIZE.captures(args).ok_or_else(invalid)?;
            let width = size["width"].parse().map_err(|_| invalid())?;
            let height = size["height"].parse().map_err(|_| invalid())?;
            Command::Resize(width, height)
        }
        ("clear" | "c", "") => Command::Clear,
        ("undo" | "u" | "back", "") => Command::Undo,
        ("new" | "replay" | "restart", "") => Command::New,
        ("history" | "hist", "") => Command::History,
        ("help" | "h" | "?", "") => Command::Help,
        ("quit" | "exit" | "q", "") => Command::Quit,
        _ => return Err(CommandError::Unknown(input.to_owned())),
    })
}

/// Parse a single `row,col` cell.
fn parse_cell(input: &str) -> Result<Cell, CommandError> {
    match parse_cells(input)?.as_slice() {
        [cell] => Ok(*cell),
        _ => Err(CommandError::InvalidCell(input.to_owned())),
    }
}

/// Parse a list of cells such as `5,0 4,1` or `5,0 -> 3,2 -> 1,4`.
fn parse_cells(input: &str) -> Result<Vec<Cell>, CommandError> {
    if !CELL_LIST.is_match(input) {
        return Err(CommandError::InvalidCell(input.to_owned()));
    }
    CELL.captures_iter(input)
        .map(|captures| {
            let text = captures.get(0).map_or("", |m| m.as_str());
            let row = captures["row"].parse().ok();
            let col = captures["col"].parse().ok();
            row.zip(col)
                .and_then(|(row, col)| Cell::try_new(row, col))
                .ok_or_else(|| CommandError::InvalidCell(text.to_owned()))
        })
        .collect()
}

/// What the controller should ask of the board for a typed path.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Turn {
    /// A single move that captures nothing.
    Quiet(Move),
    /// One or more capturing hops by the same piece.
    Captures(Vec<Move>),
}

/// Turn a path of cells into moves. A hop along a diagonal that passes over exactly one
/// piece captures that piece; any other hop is quiet. Only a single hop may be quiet.
///
/// This is bookkeeping for the player's convenience, not a legality check: the rules
/// layer is expected to reject moves that break the rules of the game.
pub fn plan_turn(grid: &Grid, path: &[Cell]) -> Result<Turn, CommandError> {
    if path.len() < 2 {
        return Err(CommandError::TooFewCells);
    }
    let mut grid = *grid;
    let mut hops = Vec::with_capacity(path.len() - 1);
    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let mut jumped = diagonal_between(from, to).filter(|&cell| !grid.is_empty(cell));
        let hop = match (jumped.next(), jumped.next()) {
            (Some(captured), None) => Move::capturing(from, to, captured),
            _ => Move::new(from, to),
        };
        // Follow the piece on the scratch grid so later hops see earlier captures.
        if let Some(captured) = hop.captured {
            grid.take(captured);
        }
        if let Some(piece) = grid.take(from) {
            grid[to] = Some(piece);
        }
        hops.push(hop);
    }
    match hops.as_slice() {
        [hop] if !hop.is_capture() => Ok(Turn::Quiet(*hop)),
        hops if hops.iter().all(Move::is_capture) => Ok(Turn::Captures(hops.to_vec())),
        _ => Err(CommandError::QuietHopInChain),
    }
}

/// Cells strictly between `from` and `to` if they share a diagonal, otherwise none.
fn diagonal_between(from: Cell, to: Cell) -> impl Iterator<Item = Cell> {
    let (r0, c0) = (from.row() as isize, from.col() as isize);
    let (r1, c1) = (to.row() as isize, to.col() as isize);
    let (dr, dc) = (r1 - r0, c1 - c0);
    let steps = if dr.abs() == dc.abs() { dr.abs() } else { 0 };
    let (sr, sc) = (dr.signum(), dc.signum());
    (1..steps).map(move |i| Cell::new((r0 + sr * i) as usize, (c0 + sc * i) as usize))
}
