//! `log` backend for the browser: records go to the devtools console
//! through zoon's console macros.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = console_line(record);
        if record.level() <= Level::Warn {
            zoon::eprintln!("{line}");
        } else {
            zoon::println!("{line}");
        }
    }

    fn flush(&self) {}
}

/// Installs the console logger once; later calls only adjust the level.
pub fn install(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_err() {
        zoon::println!("waterfall: a logger is already installed");
    }
    log::set_max_level(level);
}

pub fn console_line(record: &Record) -> String {
    format!("[{} {}] {}", record.level(), record.target(), record.args())
}
