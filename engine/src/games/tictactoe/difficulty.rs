use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use crate::games::BotRng;
use crate::log;
use super::board::Board;
use super::search::{SearchOptions, best_move, find_winning_move, rank_moves};
use super::types::{Mark, Position, TicTacToeError};

/// How many ranked alternatives below the top move a suboptimal pick may choose from.
const SUBOPTIMAL_CANDIDATES: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn default_settings(&self) -> DifficultySettings {
        match self {
            Difficulty::Easy => DifficultySettings {
                depth_limit: Some(2),
                random_move_chance: 0.4,
                missed_block_chance: 0.0,
                suboptimal_move_chance: 0.0,
            },
            Difficulty::Medium => DifficultySettings {
                depth_limit: Some(4),
                random_move_chance: 0.0,
                missed_block_chance: 0.15,
                suboptimal_move_chance: 0.1,
            },
            Difficulty::Hard => DifficultySettings::perfect(),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "Unknown difficulty '{}', expected easy, medium or hard",
                other
            )),
        }
    }
}

/// Imperfections layered over the search for one difficulty tier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    /// Lookahead in plies; `None` searches to the end of the game.
    pub depth_limit: Option<usize>,
    /// Chance of ignoring the search and playing a uniformly random move.
    pub random_move_chance: f64,
    /// Chance of not blocking an opponent's immediate win.
    pub missed_block_chance: f64,
    /// Chance of playing one of the next-best ranked moves instead of the best.
    pub suboptimal_move_chance: f64,
}

impl DifficultySettings {
    pub fn perfect() -> Self {
        Self {
            depth_limit: None,
            random_move_chance: 0.0,
            missed_block_chance: 0.0,
            suboptimal_move_chance: 0.0,
        }
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            depth: self.depth_limit.into(),
            pruning: true,
        }
    }
}

fn validate_probability(name: &str, value: f64) -> Result<(), String> {
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("{} must be between 0 and 1, got {}", name, value));
    }
    Ok(())
}

impl Validate for DifficultySettings {
    fn validate(&self) -> Result<(), String> {
        if self.depth_limit == Some(0) {
            return Err("depth_limit must be at least 1".to_string());
        }
        validate_probability("random_move_chance", self.random_move_chance)?;
        validate_probability("missed_block_chance", self.missed_block_chance)?;
        validate_probability("suboptimal_move_chance", self.suboptimal_move_chance)?;
        Ok(())
    }
}

/// Per-tier settings, loadable from YAML through `ConfigManager`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    pub easy: DifficultySettings,
    pub medium: DifficultySettings,
    pub hard: DifficultySettings,
}

impl BotConfig {
    pub fn settings(&self, difficulty: Difficulty) -> DifficultySettings {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            easy: Difficulty::Easy.default_settings(),
            medium: Difficulty::Medium.default_settings(),
            hard: Difficulty::Hard.default_settings(),
        }
    }
}

impl Validate for BotConfig {
    fn validate(&self) -> Result<(), String> {
        for difficulty in Difficulty::ALL {
            self.settings(difficulty)
                .validate()
                .map_err(|e| format!("{} settings: {}", difficulty, e))?;
        }
        // Only Easy may skip an available win.
        if self.medium.random_move_chance != 0.0 {
            return Err("medium settings: random_move_chance must be 0".to_string());
        }
        if self.hard != DifficultySettings::perfect() {
            return Err("hard settings: no depth limit and no mistake chances allowed".to_string());
        }
        Ok(())
    }
}

fn pick<R: BotRng>(moves: &[Position], rng: &mut R) -> Option<Position> {
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.pick_index(moves.len())])
}

/// Picks a move for `mover` under `settings`.
///
/// Order of checks: random move, own immediate win, missed block,
/// suboptimal pick, then the (possibly depth-capped) search. An available
/// win is always taken unless the random-move roll fired first.
pub fn decide_move<R: BotRng>(
    board: &Board,
    mover: Mark,
    opponent: Mark,
    settings: &DifficultySettings,
    rng: &mut R,
) -> Result<Position, TicTacToeError> {
    let legal_moves = board.legal_moves();
    if legal_moves.is_empty() {
        return Err(TicTacToeError::NoLegalMove);
    }

    if settings.random_move_chance > 0.0
        && rng.chance(settings.random_move_chance)
        && let Some(position) = pick(&legal_moves, rng)
    {
        log!("Random move {} for {}", position, mover);
        return Ok(position);
    }

    if let Some(position) = find_winning_move(board, mover) {
        log!("Winning move {} for {}", position, mover);
        return Ok(position);
    }

    if settings.missed_block_chance > 0.0
        && let Some(block) = find_winning_move(board, opponent)
        && rng.chance(settings.missed_block_chance)
    {
        let elsewhere: Vec<Position> = legal_moves
            .iter()
            .copied()
            .filter(|&position| {
                board
                    .with_move(position, opponent)
                    .is_none_or(|next| !next.has_line(opponent))
            })
            .collect();
        if let Some(position) = pick(&elsewhere, rng) {
            log!("Missed block at {} for {}, playing {}", block, mover, position);
            return Ok(position);
        }
    }

    let options = settings.search_options();

    if settings.suboptimal_move_chance > 0.0 && rng.chance(settings.suboptimal_move_chance) {
        let ranked = rank_moves(board, mover, opponent, options);
        let alternatives: Vec<Position> = ranked
            .iter()
            .skip(1)
            .take(SUBOPTIMAL_CANDIDATES)
            .map(|scored| scored.position)
            .collect();
        if let Some(position) = pick(&alternatives, rng) {
            log!("Suboptimal move {} for {}", position, mover);
            return Ok(position);
        }
    }

    let outcome = best_move(board, mover, opponent, options);
    log!(
        "Search move {:?} for {} scored {} ({} nodes, {} cutoffs)",
        outcome.best_move,
        mover,
        outcome.score,
        outcome.stats.nodes,
        outcome.stats.cutoffs
    );
    outcome.best_move.ok_or(TicTacToeError::NoLegalMove)
}
