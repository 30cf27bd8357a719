use checkerboard::{Board, Cell, Grid, Move, Piece};

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

#[test]
fn opening_exchange_and_undo() {
    let mut board = Board::new();
    board
        .apply_move(Move::new(Cell::new(5, 0), Cell::new(4, 1)), 0)
        .unwrap();
    let after_first = board.grid();
    board
        .apply_move(Move::new(Cell::new(2, 1), Cell::new(3, 0)), 0)
        .unwrap();

    let grid = board.grid();
    assert_eq!(grid[Cell::new(4, 1)], Some(Piece::WhiteMan));
    assert_eq!(grid[Cell::new(3, 0)], Some(Piece::BlackMan));
    assert_eq!(grid[Cell::new(5, 0)], None);
    assert_eq!(grid[Cell::new(2, 1)], None);
    assert_eq!(board.history().len(), 3);

    board.undo();
    assert_eq!(board.history().len(), 2);
    assert_eq!(board.grid(), after_first);
}

/// Shuffle pieces around at random, occasionally capturing, and check that undo walks
/// back through exactly the positions that were recorded.
#[test]
fn random_walk_undoes_to_start() {
    let mut rng = StdRng::seed_from_u64(0x0c4e_c4e5);
    let mut board = Board::new();
    let mut seen: Vec<Grid> = vec![board.grid()];

    for _ in 0..200 {
        let grid = board.grid();
        let occupied: Vec<Cell> = grid.pieces().map(|(cell, _)| cell).collect();
        let empty: Vec<Cell> = Cell::all().filter(|&cell| grid.is_empty(cell)).collect();
        let from = *occupied.choose(&mut rng).unwrap();
        let to = *empty.choose(&mut rng).unwrap();
        let mv = if occupied.len() > 2 && rng.gen_range(0, 4) == 0 {
            let captured = *occupied
                .iter()
                .filter(|&&cell| cell != from)
                .collect::<Vec<_>>()
                .choose(&mut rng)
                .unwrap();
            Move::capturing(from, to, *captured)
        } else {
            Move::new(from, to)
        };
        board.apply_move(mv, 0).unwrap();
        seen.push(board.grid());
        assert_eq!(board.history().last().grid(), &board.grid());
    }
    assert_eq!(board.history().len(), seen.len());

    seen.pop();
    while let Some(expected) = seen.pop() {
        assert_eq!(board.undo(), 1);
        assert_eq!(board.grid(), expected);
    }
    assert_eq!(board.undo(), 0);
    assert_eq!(board.grid(), Grid::starting());
}

#[test]
fn invalid_requests_leave_board_alone() {
    let mut board = Board::new();
    board
        .apply_move(Move::new(Cell::new(5, 2), Cell::new(4, 3)), 0)
        .unwrap();
    let before = board.grid();

    assert!(board
        .apply_move(Move::new(Cell::new(4, 3), Cell::new(6, 1)), 0)
        .is_err());
    assert!(board
        .apply_move(Move::new(Cell::new(4, 1), Cell::new(3, 2)), 0)
        .is_err());
    assert!(board.promote(Cell::new(3, 4)).is_err());

    assert_eq!(board.grid(), before);
    assert_eq!(board.history().len(), 2);
}
