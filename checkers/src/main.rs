use std::{
    fs::OpenOptions,
    io::{self, BufRead, Write},
    process,
};

use clap::{App, Arg, ArgMatches};
use log::{error, info, warn};

use checkerboard::{Board, Color, GameResult, Presenter};

use crate::{
    command::{Command, Turn},
    display::{DisplayConfig, TerminalDisplay, Theme},
};

mod command;
mod display;

const HELP: &str = "Available Commands:
    move <r,c> <r,c> [<r,c> ...]  move a piece along the given cells. Jumping over a
        single piece on a diagonal captures it; list several cells to chain captures.
    select <r,c>                  mark the origin of the move you are planning.
    mark <r,c> [<r,c> ...]        highlight candidate destinations.
    clear                         clear the selection and highlights.
    promote <r,c>                 crown the man on the given cell.
    undo                          take back the last turn, including a whole capture chain.
    new                           start a new game.
    result <white|black|draw>     record the outcome of the game.
    history                       list the positions recorded so far.
    resize [<w>x<h>]              redraw for a new terminal size, derived when omitted.
    help                          show this message.
    quit                          leave the game.

Cells are given as row,col with both in [0,7]. White starts on rows 5-7.";

fn main() {
    let matches = App::new("Checkers")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Two-player checkers on the command line.")
        .arg(
            Arg::with_name("width")
                .short("w")
                .long("width")
                .value_name("COLUMNS")
                .help("width of the drawing area, 0 to fit the terminal")
                .takes_value(true)
                .default_value("0"),
        )
        .arg(
            Arg::with_name("height")
                .short("H")
                .long("height")
                .value_name("ROWS")
                .help("height of the drawing area, 0 to fit the terminal")
                .takes_value(true)
                .default_value("0"),
        )
        .arg(
            Arg::with_name("theme")
                .short("t")
                .long("theme")
                .value_name("THEME")
                .help("glyphs used to draw the board")
                .takes_value(true)
                .possible_values(&["ascii", "unicode"])
                .case_insensitive(true)
                .default_value("ascii"),
        )
        .arg(
            Arg::with_name("plain")
                .long("plain")
                .help("do not use terminal escape sequences"),
        )
        .arg(
            Arg::with_name("log_file")
                .long("log-file")
                .value_name("PATH")
                .help("file failures are appended to")
                .takes_value(true)
                .default_value("log.txt"),
        )
        .get_matches();

    init_logging(matches.value_of("log_file").unwrap_or("log.txt"));

    let config = match display_config(&matches) {
        Ok(config) => config,
        Err(message) => {
            error!("{}", message);
            eprintln!("{}", message);
            process::exit(2);
        }
    };
    let display = match TerminalDisplay::start(config, io::stdout()) {
        Ok(display) => display,
        Err(err) => {
            error!("could not start the display: {}", err);
            eprintln!("could not start the display: {}", err);
            process::exit(err.exit_code());
        }
    };
    info!("game started");

    let stdin = io::stdin();
    let mut input = InputReader::new(stdin.lock());
    let mut board = Board::with_presenter(display);
    if let Err(err) = run(&mut board, &mut input) {
        error!("terminal i/o failed: {}", err);
        drop(board);
        eprintln!("terminal i/o failed: {}", err);
        process::exit(1);
    }
    info!("game ended with {:?}", board.result());
}

/// Send log records to the append-only log file, falling back to stderr if it cannot
/// be opened.
fn init_logging(path: &str) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(err) => eprintln!("could not open log file {}: {}", path, err),
    }
    builder.init();
}

/// Build the display configuration from the command line.
fn display_config(matches: &ArgMatches) -> Result<DisplayConfig, String> {
    let dimension = |name: &str| -> Result<usize, String> {
        let value = matches.value_of(name).unwrap_or("0");
        value
            .parse()
            .map_err(|_| format!("invalid {}: {}, must be a non-negative number", name, value))
    };
    let theme = match matches.value_of("theme") {
        Some(theme) if theme.eq_ignore_ascii_case("unicode") => Theme::unicode(),
        _ => Theme::ascii(),
    };
    Ok(DisplayConfig {
        width: dimension("width")?,
        height: dimension("height")?,
        theme,
        ansi: !matches.is_present("plain"),
    })
}

/// Drive the board from typed commands until the player quits or input ends.
fn run<W: Write>(
    board: &mut Board<TerminalDisplay<W>>,
    input: &mut InputReader<impl BufRead>,
) -> io::Result<()> {
    loop {
        board.presenter_mut().present()?;
        let line = match input.read_line_lower("> ")? {
            Some(line) => line,
            None => return Ok(()),
        };
        if line.is_empty() {
            continue;
        }
        let cmd = match command::parse(&line) {
            Ok(cmd) => cmd,
            Err(err) => {
                board.presenter_mut().set_status(err.to_string());
                continue;
            }
        };
        if let Command::Quit = cmd {
            return Ok(());
        }
        let status = execute(board, cmd);
        if let Some(status) = status {
            board.presenter_mut().set_status(status);
        }
    }
}

/// Apply one command to the board. Returns a message for the player, if any.
fn execute<W: Write>(board: &mut Board<TerminalDisplay<W>>, cmd: Command) -> Option<String> {
    match cmd {
        Command::Move(path) => {
            let outcome = command::plan_turn(&board.grid(), &path)
                .map_err(|err| err.to_string())
                .and_then(|turn| {
                    let applied = match turn {
                        Turn::Quiet(mv) => board.apply_move(mv, 0),
                        Turn::Captures(hops) => board.apply_capture_chain(&hops),
                    };
                    applied.map_err(|err| {
                        warn!("rejected move: {}", err);
                        err.to_string()
                    })
                });
            match outcome {
                Ok(()) => {
                    board.clear_active();
                    board.clear_highlight();
                    record_wipeout(board)
                }
                Err(message) => Some(message),
            }
        }
        Command::Select(cell) => {
            board.set_active(cell);
            None
        }
        Command::Mark(cells) => {
            board.highlight(cells);
            None
        }
        Command::Clear => {
            board.clear_active();
            board.clear_highlight();
            None
        }
        Command::Promote(cell) => match board.promote(cell) {
            Ok(()) => None,
            Err(err) => {
                warn!("rejected promotion: {}", err);
                Some(err.to_string())
            }
        },
        Command::Undo => match board.undo() {
            0 => Some("nothing to undo".to_owned()),
            1 => None,
            n => Some(format!("took back a capture chain of {} hops", n)),
        },
        Command::New => {
            board.reset();
            info!("new game");
            None
        }
        Command::Result(result) => {
            board.record_result(result);
            info!("result recorded: {:?}", result);
            None
        }
        Command::History => Some(describe_history(board)),
        Command::Resize(width, height) => match board.presenter_mut().resize(width, height) {
            Ok(()) => {
                board.refresh();
                None
            }
            Err(err) => {
                warn!("could not resize the display: {}", err);
                Some(err.to_string())
            }
        },
        Command::Help => Some(HELP.to_owned()),
        Command::Quit => None,
    }
}

/// Record a win once one side has no pieces left.
fn record_wipeout<P: Presenter>(board: &mut Board<P>) -> Option<String> {
    if board.result().is_over() {
        return None;
    }
    let grid = board.grid();
    let winner = [Color::White, Color::Black]
        .iter()
        .copied()
        .find(|&color| grid.count(color.opponent()) == 0)?;
    board.record_result(GameResult::win_for(winner));
    info!("{:?} captured every piece", winner);
    Some(format!("{:?} wins!", winner))
}

/// One line per recorded position, noting capture chains.
fn describe_history<P: Presenter>(board: &Board<P>) -> String {
    let mut lines = Vec::new();
    for (i, snapshot) in board.history().iter().enumerate() {
        let grid = snapshot.grid();
        let series = match snapshot.capture_series() {
            0 if i == 0 => "start".to_owned(),
            0 => "quiet".to_owned(),
            n => format!("capture {}", n),
        };
        lines.push(format!(
            "{:>3}: {:<10} white {:>2}  black {:>2}",
            i,
            series,
            grid.count(Color::White),
            grid.count(Color::Black),
        ));
    }
    lines.join("\n")
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Print the prompt and read one trimmed, lower-cased line. Returns `None` once the
    /// input is exhausted.
    fn read_line_lower(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            return Ok(None);
        }
        self.buf.make_ascii_lowercase();
        Ok(Some(self.buf.trim().to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use checkerboard::{Cell, Move};

    use crate::display::Layout;

    fn test_board() -> Board<TerminalDisplay<Vec<u8>>> {
        let config = DisplayConfig {
            width: Layout::MIN_WIDTH,
            height: Layout::MIN_HEIGHT,
            theme: Theme::ascii(),
            ansi: false,
        };
        Board::with_presenter(TerminalDisplay::start(config, Vec::new()).unwrap())
    }

    fn play(board: &mut Board<TerminalDisplay<Vec<u8>>>, line: &str) -> Option<String> {
        execute(board, command::parse(line).unwrap())
    }

    #[test]
    fn moves_and_undo() {
        let mut board = test_board();
        assert_eq!(play(&mut board, "move 5,0 4,1"), None);
        assert_eq!(play(&mut board, "move 2,1 3,0"), None);
        assert_eq!(board.history().len(), 3);
        assert_eq!(play(&mut board, "undo"), None);
        assert_eq!(board.history().len(), 2);
        assert_eq!(play(&mut board, "undo"), None);
        assert_eq!(
            play(&mut board, "undo"),
            Some("nothing to undo".to_owned())
        );
    }

    #[test]
    fn jump_captures_and_undoes() {
        let mut board = test_board();
        assert_eq!(play(&mut board, "move 5,2 4,3"), None);
        assert_eq!(play(&mut board, "move 2,5 3,4"), None);
        let depth = board.history().len();
        assert_eq!(play(&mut board, "move 4,3 -> 2,5"), None);
        assert_eq!(board.grid()[Cell::new(3, 4)], None);
        assert_eq!(board.grid().count(Color::Black), 11);
        assert_eq!(board.history().last().capture_series(), 1);
        assert_eq!(play(&mut board, "undo"), None);
        assert_eq!(board.history().len(), depth);
        assert_eq!(board.grid().count(Color::Black), 12);
    }

    #[test]
    fn rejected_move_reports_reason() {
        let mut board = test_board();
        let message = play(&mut board, "move 5,0 6,1").unwrap();
        assert!(message.contains("destination cell is occupied"), "{}", message);
        assert_eq!(board.history().len(), 1);
        let message = play(&mut board, "move 5,0 4,1 3,2").unwrap();
        assert!(message.contains("only capturing hops"), "{}", message);
    }

    #[test]
    fn last_piece_captured_records_win() {
        let mut board = test_board();
        let blacks: Vec<Cell> = board
            .grid()
            .pieces()
            .filter(|(_, piece)| piece.color() == Color::Black)
            .map(|(cell, _)| cell)
            .collect();
        let (out, back) = (Cell::new(4, 1), Cell::new(5, 0));
        for &black in &blacks[1..] {
            board.apply_move(Move::capturing(back, out, black), 1).unwrap();
            board.apply_move(Move::new(out, back), 0).unwrap();
            assert_eq!(record_wipeout(&mut board), None);
        }
        assert_eq!(board.grid().count(Color::Black), 1);

        board
            .apply_move(Move::capturing(back, out, blacks[0]), 1)
            .unwrap();
        assert_eq!(record_wipeout(&mut board), Some("White wins!".to_owned()));
        assert_eq!(board.result(), GameResult::WhiteWins);
        assert_eq!(record_wipeout(&mut board), None);
    }

    #[test]
    fn rejected_move_keeps_selection() {
        let mut board = test_board();
        play(&mut board, "select 5,0");
        play(&mut board, "mark 4,1");
        assert!(play(&mut board, "move 5,0 6,1").is_some());
        assert!(play(&mut board, "move 5,0 4,1 3,2").is_some());
        assert_eq!(board.active(), Some(Cell::new(5, 0)));
        assert!(board.is_highlighted(Cell::new(4, 1)));

        assert_eq!(play(&mut board, "move 5,0 4,1"), None);
        assert_eq!(board.active(), None);
        assert!(board.highlighted().is_empty());
    }

    #[test]
    fn resize_redraws_or_reports_too_small() {
        let mut board = test_board();
        assert_eq!(play(&mut board, "resize 50x20"), None);
        assert_eq!(board.presenter().layout().cell_width(), 5);
        assert!(board.presenter().frame().starts_with("     0    1"));

        let message = play(&mut board, "resize 10x5").unwrap();
        assert_eq!(
            message,
            "a 10x5 drawing area is too small, need at least 30x10"
        );
        assert_eq!(board.presenter().layout().cell_width(), 5);
    }

    #[test]
    fn history_listing() {
        let mut board = test_board();
        play(&mut board, "move 5,0 4,1");
        let listing = play(&mut board, "history").unwrap();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("start"));
        assert!(lines[1].contains("quiet"));
    }

    #[test]
    fn input_reader_stops_at_end() {
        let mut input = InputReader::new(&b"Move 5,0 4,1\n"[..]);
        assert_eq!(
            input.read_line_lower(">").unwrap(),
            Some("move 5,0 4,1".to_owned())
        );
        assert_eq!(input.read_line_lower(">").unwrap(), None);
    }
}
