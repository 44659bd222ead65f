use std::fmt;

use tictactoe_engine::BotRng;
use tictactoe_engine::log;
use tictactoe_engine::tictactoe::{
    BotInput, DifficultySettings, GameStatus, Mark, TicTacToeError, TicTacToeGameState, calculate_move,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SelfPlaySummary {
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
}

impl SelfPlaySummary {
    fn record(&mut self, status: GameStatus) {
        match status {
            GameStatus::XWon => self.x_wins += 1,
            GameStatus::OWon => self.o_wins += 1,
            GameStatus::Draw => self.draws += 1,
            GameStatus::InProgress => {}
        }
    }

    pub fn games(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }
}

impl fmt::Display for SelfPlaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: X won {}, O won {}, draws {}",
            self.games(),
            self.x_wins,
            self.o_wins,
            self.draws
        )
    }
}

fn play_game<R: BotRng>(
    x_settings: &DifficultySettings,
    o_settings: &DifficultySettings,
    rng: &mut R,
) -> Result<GameStatus, TicTacToeError> {
    let mut state = TicTacToeGameState::new();

    while !state.is_over() {
        let input = BotInput::from_game_state(&state)?;
        let settings = match input.mover {
            Mark::X => x_settings,
            _ => o_settings,
        };
        let position = calculate_move(input, settings, rng)?;
        state.place_mark(position.row, position.col)?;
    }

    Ok(state.status)
}

/// Plays `games` bot-vs-bot games, X using `x_settings` and O using `o_settings`.
pub fn run_self_play<R: BotRng>(
    games: u32,
    x_settings: &DifficultySettings,
    o_settings: &DifficultySettings,
    rng: &mut R,
) -> Result<SelfPlaySummary, TicTacToeError> {
    let mut summary = SelfPlaySummary::default();

    for game in 0..games {
        let status = play_game(x_settings, o_settings, rng)?;
        log!("Self-play game {} ended with {:?}", game + 1, status);
        summary.record(status);
    }

    Ok(summary)
}
