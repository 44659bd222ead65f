mod config;
mod offline;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use tictactoe_engine::tictactoe::{Difficulty, Mark};
use tictactoe_engine::{SessionRng, log, logger};

use config::get_config_manager;
use offline::{Players, run_console_game, run_self_play};

#[derive(Parser)]
#[command(name = "tictactoe_console", about = "Tic-tac-toe against a minimax bot")]
struct Args {
    /// Bot difficulty: easy, medium or hard.
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Mark played by the human: X (moves first) or O.
    #[arg(long)]
    human: Option<Mark>,

    /// Seed for the bot's random decisions.
    #[arg(long)]
    seed: Option<u64>,

    /// Two humans share the console; no bot moves.
    #[arg(long, conflicts_with = "self_play")]
    two_players: bool,

    /// Let the bot play itself this many games and print a tally.
    #[arg(long, value_name = "GAMES")]
    self_play: Option<u32>,

    /// Difficulty of the O side in self-play; defaults to --difficulty.
    #[arg(long)]
    versus: Option<Difficulty>,

    /// Config file; defaults to tictactoe_console_config.yaml next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings back to the config file.
    #[arg(long)]
    save_config: bool,

    /// Print bot decisions to stderr.
    #[arg(long)]
    verbose: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.verbose {
        let prefix = if args.use_log_prefix {
            Some("Console".to_string())
        } else {
            None
        };
        logger::init_logger(prefix);
    }

    let config_manager = get_config_manager(args.config.as_deref());
    let mut config = config_manager.get_config()?;

    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(human) = args.human {
        config.human_mark = human;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.save_config {
        config_manager.set_config(&config)?;
    }

    let mut rng = config.seed.map_or_else(SessionRng::from_random, SessionRng::new);
    log!("Using seed {}", rng.seed());

    let settings = config.bot.settings(config.difficulty);

    if let Some(games) = args.self_play {
        let opponent = config.bot.settings(args.versus.unwrap_or(config.difficulty));
        let summary = run_self_play(games, &settings, &opponent, &mut rng)?;
        println!("{}", summary);
        return Ok(());
    }

    let players = if args.two_players {
        println!("Two players, X moves first. Enter moves as: row col (0-2), q to quit.");
        Players::TwoHumans
    } else {
        println!(
            "You play {} against the {} bot, X moves first. Enter moves as: row col (0-2), q to quit.",
            config.human_mark, config.difficulty
        );
        Players::VsBot {
            human: config.human_mark,
        }
    };
    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = run_console_game(
        &mut stdin.lock(),
        &mut stdout.lock(),
        &settings,
        players,
        &mut rng,
    )?;
    if result.is_none() {
        println!("Game abandoned.");
    }

    Ok(())
}
