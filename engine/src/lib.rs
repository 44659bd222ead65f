pub mod config;
pub mod games;
pub mod logger;

pub use games::tictactoe;
pub use games::{BotRng, SessionRng};
