use super::board::Board;
use super::types::{Mark, Position, WinningLine};

/// All eight lines as (row, col) triples: rows, then columns, then the two diagonals.
pub const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

pub fn line_owner(board: &Board, line: &[(usize, usize); 3]) -> Option<Mark> {
    let [(r0, c0), (r1, c1), (r2, c2)] = *line;
    let first = board.cells[r0][c0];
    if first != Mark::Empty && board.cells[r1][c1] == first && board.cells[r2][c2] == first {
        Some(first)
    } else {
        None
    }
}

pub fn check_win(board: &Board) -> Option<Mark> {
    LINES.iter().find_map(|line| line_owner(board, line))
}

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    LINES.iter().find_map(|line| {
        line_owner(board, line).map(|mark| {
            let (start_row, start_col) = line[0];
            let (end_row, end_col) = line[2];
            WinningLine::new(
                mark,
                Position::new(start_row, start_col),
                Position::new(end_row, end_col),
            )
        })
    })
}
