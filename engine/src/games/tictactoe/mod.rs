mod board;
mod bot_controller;
mod difficulty;
mod game_state;
pub mod search;
#[cfg(test)]
mod test_support;
mod types;
mod win_detector;

pub use board::Board;
pub use bot_controller::{BotInput, calculate_move, choose_move, choose_move_with_config};
pub use difficulty::{BotConfig, Difficulty, DifficultySettings, decide_move};
pub use game_state::{PlayedMove, TicTacToeGameState};
pub use search::{SearchDepth, SearchOptions, SearchOutcome, SearchStats, ScoredMove, best_move, rank_moves};
pub use types::{BOARD_SIZE, CELL_COUNT, GameStatus, Mark, Position, TicTacToeError, WinningLine};
pub use win_detector::{check_win, check_win_with_line};
