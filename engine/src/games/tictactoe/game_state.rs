use super::board::Board;
use super::types::{GameStatus, Mark, Position, TicTacToeError, WinningLine};
use super::win_detector::check_win_with_line;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayedMove {
    pub mark: Mark,
    pub position: Position,
}

/// Turn-aware wrapper around `Board` for driving a game loop. X always moves first.
#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    pub board: Board,
    pub current_mark: Mark,
    pub status: GameStatus,
    pub last_move: Option<Position>,
    moves: Vec<PlayedMove>,
}

impl TicTacToeGameState {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_mark: Mark::X,
            status: GameStatus::InProgress,
            last_move: None,
            moves: Vec::new(),
        }
    }

    pub fn place_mark(&mut self, row: usize, col: usize) -> Result<(), TicTacToeError> {
        if self.status.is_over() {
            return Err(TicTacToeError::GameOver);
        }

        self.board.place(row, col, self.current_mark)?;

        let position = Position::new(row, col);
        self.last_move = Some(position);
        self.moves.push(PlayedMove {
            mark: self.current_mark,
            position,
        });
        self.status = self.board.status();

        if self.status == GameStatus::InProgress {
            self.switch_turn();
        }

        Ok(())
    }

    fn switch_turn(&mut self) {
        self.current_mark = match self.current_mark {
            Mark::X => Mark::O,
            _ => Mark::X,
        };
    }

    pub fn moves(&self) -> &[PlayedMove] {
        &self.moves
    }

    pub fn available_moves(&self) -> Vec<Position> {
        if self.status.is_over() {
            return Vec::new();
        }
        self.board.legal_moves()
    }

    pub fn winner(&self) -> Option<Mark> {
        self.status.winner()
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        check_win_with_line(&self.board)
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }
}

impl Default for TicTacToeGameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::SessionRng;
    use crate::games::BotRng;

    #[test]
    fn test_turns_alternate_starting_with_x() {
        let mut state = TicTacToeGameState::new();

        assert_eq!(state.current_mark, Mark::X);
        state.place_mark(0, 0).unwrap();
        assert_eq!(state.current_mark, Mark::O);
        state.place_mark(1, 1).unwrap();
        assert_eq!(state.current_mark, Mark::X);
        assert_eq!(state.last_move, Some(Position::new(1, 1)));
        assert_eq!(state.moves().len(), 2);
        assert_eq!(state.moves()[0], PlayedMove { mark: Mark::X, position: Position::new(0, 0) });
    }

    #[test]
    fn test_invalid_move_keeps_turn() {
        let mut state = TicTacToeGameState::new();
        state.place_mark(0, 0).unwrap();

        let occupied = state.place_mark(0, 0);
        let outside = state.place_mark(5, 1);

        assert_eq!(occupied, Err(TicTacToeError::InvalidMove { row: 0, col: 0 }));
        assert_eq!(outside, Err(TicTacToeError::InvalidMove { row: 5, col: 1 }));
        assert_eq!(state.current_mark, Mark::O);
        assert_eq!(state.moves().len(), 1);
    }

    #[test]
    fn test_win_ends_game() {
        let mut state = TicTacToeGameState::new();
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            state.place_mark(row, col).unwrap();
        }

        assert_eq!(state.status, GameStatus::XWon);
        assert_eq!(state.winner(), Some(Mark::X));
        assert_eq!(state.current_mark, Mark::X);
        let line = state.winning_line().unwrap();
        assert_eq!((line.start, line.end), (Position::new(0, 0), Position::new(0, 2)));
        assert!(state.available_moves().is_empty());
        assert_eq!(state.place_mark(2, 2), Err(TicTacToeError::GameOver));
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let mut state = TicTacToeGameState::new();
        for (row, col) in [(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)] {
            state.place_mark(row, col).unwrap();
        }

        assert_eq!(state.status, GameStatus::Draw);
        assert_eq!(state.winner(), None);
        assert!(state.winning_line().is_none());
    }

    #[test]
    fn test_mark_counts_stay_balanced_in_random_games() {
        for seed in 0..300 {
            let mut rng = SessionRng::new(seed);
            let mut state = TicTacToeGameState::new();

            while !state.is_over() {
                let moves = state.available_moves();
                let position = moves[rng.pick_index(moves.len())];
                state.place_mark(position.row, position.col).unwrap();

                let x = state.board.count(Mark::X);
                let o = state.board.count(Mark::O);
                assert!(x == o || x == o + 1);
                assert!(state.board.move_count() <= 9);
            }
        }
    }
}
