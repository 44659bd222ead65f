use std::io::{self, Write};
use std::sync::{Mutex, OnceLock};

use chrono::{DateTime, Local};

static LOGGER: OnceLock<Logger> = OnceLock::new();

type Sink = Box<dyn Write + Send>;

/// Writes bot decisions and game events as `[time][prefix][file:line] message`.
pub struct Logger {
    prefix: Option<String>,
    sink: Mutex<Sink>,
}

impl Logger {
    fn new(prefix: Option<String>, sink: Sink) -> Self {
        Self {
            prefix,
            sink: Mutex::new(sink),
        }
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        let record = format_record(Local::now(), self.prefix.as_deref(), file, line, message);
        // A poisoned or failing sink loses the line; the game goes on.
        if let Ok(mut sink) = self.sink.lock() {
            let _ = writeln!(sink, "{}", record);
        }
    }
}

fn format_record(time: DateTime<Local>, prefix: Option<&str>, file: &str, line: u32, message: &str) -> String {
    let timestamp = time.format("%Y-%m-%d %H:%M:%S");
    let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
    match prefix {
        Some(prefix) => format!("[{}][{}][{}:{}] {}", timestamp, prefix, file_name, line, message),
        None => format!("[{}][{}:{}] {}", timestamp, file_name, line, message),
    }
}

/// Logs to stderr; stdout is left to the board and prompts.
pub fn init_logger(prefix: Option<String>) {
    init_logger_with_sink(prefix, Box::new(io::stderr()));
}

/// Returns `false` if a logger was already installed; the first one stays.
pub fn init_logger_with_sink(prefix: Option<String>, sink: Sink) -> bool {
    LOGGER.set(Logger::new(prefix, sink)).is_ok()
}

pub fn is_initialized() -> bool {
    LOGGER.get().is_some()
}

/// Messages logged before initialization are dropped.
pub fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        if $crate::logger::is_initialized() {
            $crate::logger::log(file!(), line!(), &format!($($arg)*))
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 12, 0, 5).single().unwrap()
    }

    #[test]
    fn test_record_uses_file_name_only() {
        let record = format_record(noon(), None, "engine/src/games/tictactoe/difficulty.rs", 42, "Winning move (0, 2) for X");

        assert_eq!(record, "[2024-03-09 12:00:05][difficulty.rs:42] Winning move (0, 2) for X");
    }

    #[test]
    fn test_record_with_prefix_and_windows_path() {
        let record = format_record(noon(), Some("Console"), "src\\main.rs", 7, "Using seed 3");

        assert_eq!(record, "[2024-03-09 12:00:05][Console][main.rs:7] Using seed 3");
    }

    #[test]
    fn test_logger_writes_one_line_per_message() {
        let buffer = SharedBuffer::default();
        let logger = Logger::new(Some("Bot".to_string()), Box::new(buffer.clone()));

        logger.log("search.rs", 1, "first");
        logger.log("search.rs", 2, "second");

        let written = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[Bot][search.rs:1] first"));
        assert!(lines[1].ends_with("[Bot][search.rs:2] second"));
    }
}
