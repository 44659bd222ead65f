use std::fmt;
use std::str::FromStr;

use super::types::{BOARD_SIZE, CELL_COUNT, GameStatus, Mark, Position, TicTacToeError};
use super::win_detector::{LINES, check_win, line_owner};

/// A 3x3 grid of marks. `Copy`, so every search branch works on its own snapshot.
///
/// The board does not know whose turn it is; callers track the mover.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    pub(crate) cells: [[Mark; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Mark> {
        self.cells.get(row)?.get(col).copied()
    }

    pub fn is_legal_move(&self, row: usize, col: usize) -> bool {
        Position::new(row, col).is_on_board() && self.cells[row][col] == Mark::Empty
    }

    pub fn place(&mut self, row: usize, col: usize, mark: Mark) -> Result<(), TicTacToeError> {
        if mark == Mark::Empty || !self.is_legal_move(row, col) {
            return Err(TicTacToeError::InvalidMove { row, col });
        }
        self.cells[row][col] = mark;
        Ok(())
    }

    /// Returns a copy with `mark` placed at `position`, or `None` when the cell is taken.
    pub fn with_move(&self, position: Position, mark: Mark) -> Option<Board> {
        let mut next = *self;
        next.place(position.row, position.col, mark).ok()?;
        Some(next)
    }

    /// Empty cells in row-major order. Search tie-breaking depends on this order.
    pub fn legal_moves(&self) -> Vec<Position> {
        let mut moves = Vec::with_capacity(CELL_COUNT);
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == Mark::Empty {
                    moves.push(Position::new(row, col));
                }
            }
        }
        moves
    }

    pub fn has_line(&self, mark: Mark) -> bool {
        mark != Mark::Empty && LINES.iter().any(|line| line_owner(self, line) == Some(mark))
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Mark::Empty))
    }

    pub fn is_terminal(&self) -> bool {
        self.has_line(Mark::X) || self.has_line(Mark::O) || self.is_full()
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell == mark)
            .count()
    }

    pub fn move_count(&self) -> usize {
        CELL_COUNT - self.count(Mark::Empty)
    }

    pub fn winner(&self) -> Option<Mark> {
        check_win(self)
    }

    pub fn status(&self) -> GameStatus {
        match self.winner() {
            Some(Mark::X) => GameStatus::XWon,
            Some(Mark::O) => GameStatus::OWon,
            _ if self.is_full() => GameStatus::Draw,
            _ => GameStatus::InProgress,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.cells.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

/// Parses nine cells written with `X`, `O` and `.` (or `-`/`_`).
/// Whitespace and `/` separators are ignored, so `"XO./.X./..O"` works.
impl FromStr for Board {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::new();
        let mut index = 0;

        for symbol in s.chars().filter(|c| !c.is_whitespace() && *c != '/') {
            let mark = Mark::from_symbol(symbol)
                .ok_or_else(|| format!("Unexpected board symbol '{}'", symbol))?;
            if index >= CELL_COUNT {
                return Err(format!("Board has more than {} cells", CELL_COUNT));
            }
            board.cells[index / BOARD_SIZE][index % BOARD_SIZE] = mark;
            index += 1;
        }

        if index != CELL_COUNT {
            return Err(format!("Board needs {} cells, got {}", CELL_COUNT, index));
        }
        Ok(board)
    }
}
