mod console_game;
mod self_play;

pub use console_game::{Players, run_console_game};
pub use self_play::run_self_play;
