use std::collections::HashSet;

use super::board::Board;
use super::types::Mark;

/// Every board reachable from the empty board with X moving first, terminal
/// ones included, in discovery order.
pub(crate) fn all_reachable_boards() -> Vec<Board> {
    fn visit(board: Board, to_move: Mark, seen: &mut HashSet<Board>, boards: &mut Vec<Board>) {
        if !seen.insert(board) {
            return;
        }
        boards.push(board);
        if board.is_terminal() {
            return;
        }
        let next_mark = to_move.opponent().unwrap_or(Mark::X);
        for position in board.legal_moves() {
            if let Some(next) = board.with_move(position, to_move) {
                visit(next, next_mark, seen, boards);
            }
        }
    }

    let mut seen = HashSet::new();
    let mut boards = Vec::new();
    visit(Board::new(), Mark::X, &mut seen, &mut boards);
    boards
}

/// Non-terminal reachable boards paired with the mark to move.
pub(crate) fn reachable_positions() -> Vec<(Board, Mark)> {
    all_reachable_boards()
        .into_iter()
        .filter(|board| !board.is_terminal())
        .map(|board| {
            let to_move = if board.count(Mark::X) == board.count(Mark::O) {
                Mark::X
            } else {
                Mark::O
            };
            (board, to_move)
        })
        .collect()
}

#[test]
fn test_reachable_board_count() {
    let boards = all_reachable_boards();
    assert_eq!(boards.len(), 5478);

    for board in boards {
        let (x, o) = (board.count(Mark::X), board.count(Mark::O));
        assert!(x == o || x == o + 1, "{}", board);
        assert!(!(board.has_line(Mark::X) && board.has_line(Mark::O)), "{}", board);
    }
}
