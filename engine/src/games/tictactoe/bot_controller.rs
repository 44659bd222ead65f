use crate::games::BotRng;
use crate::log;
use super::board::Board;
use super::difficulty::{BotConfig, Difficulty, DifficultySettings, decide_move};
use super::game_state::TicTacToeGameState;
use super::types::{Mark, Position, TicTacToeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotInput {
    pub board: Board,
    pub mover: Mark,
    pub opponent: Mark,
}

impl BotInput {
    pub fn new(board: Board, mover: Mark, opponent: Mark) -> Self {
        Self {
            board,
            mover,
            opponent,
        }
    }

    pub fn from_game_state(state: &TicTacToeGameState) -> Result<Self, TicTacToeError> {
        let mover = state.current_mark;
        let opponent = mover.opponent().ok_or(TicTacToeError::InvalidMarks {
            mover,
            opponent: Mark::Empty,
        })?;
        Ok(Self::new(state.board, mover, opponent))
    }

    fn validate(&self) -> Result<(), TicTacToeError> {
        if self.mover == Mark::Empty || self.opponent == Mark::Empty || self.mover == self.opponent {
            return Err(TicTacToeError::InvalidMarks {
                mover: self.mover,
                opponent: self.opponent,
            });
        }
        Ok(())
    }
}

/// Entry point for front ends: one move for `difficulty` using the default tier settings.
///
/// Fails with `NoLegalMove` on a full board. Whether the game is already won
/// is the caller's concern.
pub fn choose_move<R: BotRng>(
    input: BotInput,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Position, TicTacToeError> {
    calculate_move(input, &difficulty.default_settings(), rng)
}

/// Same as `choose_move`, taking the tier settings from a loaded `BotConfig`.
pub fn choose_move_with_config<R: BotRng>(
    input: BotInput,
    difficulty: Difficulty,
    config: &BotConfig,
    rng: &mut R,
) -> Result<Position, TicTacToeError> {
    calculate_move(input, &config.settings(difficulty), rng)
}

pub fn calculate_move<R: BotRng>(
    input: BotInput,
    settings: &DifficultySettings,
    rng: &mut R,
) -> Result<Position, TicTacToeError> {
    input.validate()?;

    let position = decide_move(&input.board, input.mover, input.opponent, settings, rng)?;
    log!("Bot {} plays {}", input.mover, position);
    Ok(position)
}
