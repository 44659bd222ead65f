use std::io::{self, BufRead, Write};

use tictactoe_engine::BotRng;
use tictactoe_engine::log;
use tictactoe_engine::tictactoe::{
    BotInput, DifficultySettings, GameStatus, Mark, Position, TicTacToeGameState, calculate_move,
};

/// Who sits at the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Players {
    /// One human playing `human` against the bot.
    VsBot { human: Mark },
    /// Two humans taking turns at the same keyboard.
    TwoHumans,
}

impl Players {
    fn is_human(&self, mark: Mark) -> bool {
        match self {
            Players::VsBot { human } => *human == mark,
            Players::TwoHumans => true,
        }
    }
}

/// Parses `row col`, `row,col` or `rowcol` with zero-based digits.
pub fn parse_move(line: &str) -> Result<Position, String> {
    let digits: Vec<usize> = line
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| {
            c.to_digit(10)
                .map(|d| d as usize)
                .ok_or_else(|| format!("'{}' is not a digit", c))
        })
        .collect::<Result<_, _>>()?;

    match digits.as_slice() {
        [row, col] => Ok(Position::new(*row, *col)),
        _ => Err("Enter a move as two numbers: row col (0-2)".to_string()),
    }
}

fn print_board<W: Write>(output: &mut W, state: &TicTacToeGameState) -> io::Result<()> {
    writeln!(output, "  012")?;
    for (row, line) in state.board.to_string().lines().enumerate() {
        writeln!(output, "{} {}", row, line)?;
    }
    Ok(())
}

fn print_result<W: Write>(output: &mut W, state: &TicTacToeGameState, players: Players) -> io::Result<()> {
    match state.status {
        GameStatus::Draw => writeln!(output, "It's a draw!")?,
        status => {
            let Some(winner) = status.winner() else {
                return Ok(());
            };
            let who = match players {
                Players::TwoHumans => format!("{} wins", winner),
                Players::VsBot { human } if human == winner => "You win".to_string(),
                Players::VsBot { .. } => "Bot wins".to_string(),
            };
            match state.winning_line() {
                Some(line) => writeln!(output, "{}! Line {} -> {}", who, line.start, line.end)?,
                None => writeln!(output, "{}!", who)?,
            }
        }
    }
    Ok(())
}

/// Plays one interactive game. Returns `None` when a player quits or input ends.
pub fn run_console_game<I, W, R>(
    input: &mut I,
    output: &mut W,
    settings: &DifficultySettings,
    players: Players,
    rng: &mut R,
) -> io::Result<Option<GameStatus>>
where
    I: BufRead,
    W: Write,
    R: BotRng,
{
    let mut state = TicTacToeGameState::new();
    print_board(output, &state)?;

    while !state.is_over() {
        let mark = state.current_mark;
        if players.is_human(mark) {
            match players {
                Players::TwoHumans => write!(output, "Player {} move, row col: ", mark)?,
                Players::VsBot { .. } => write!(output, "Your move ({}), row col: ", mark)?,
            }
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                return Ok(None);
            }
            let line = line.trim();
            if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
                return Ok(None);
            }

            let placed = parse_move(line)
                .and_then(|position| state.place_mark(position.row, position.col).map_err(|e| e.to_string()));
            if let Err(message) = placed {
                writeln!(output, "{}", message)?;
                continue;
            }
        } else {
            let bot_input = BotInput::from_game_state(&state).map_err(io::Error::other)?;
            let position = calculate_move(bot_input, settings, rng).map_err(io::Error::other)?;
            state.place_mark(position.row, position.col).map_err(io::Error::other)?;
            writeln!(output, "Bot ({}) plays {}", bot_input.mover, position)?;
        }
        print_board(output, &state)?;
    }

    print_result(output, &state, players)?;
    log!("Game finished with {:?} after {} moves", state.status, state.moves().len());
    Ok(Some(state.status))
}
