//! Logging setup: dependencies at warn, this crate at info (debug with `--verbose`).

use colored::{ColoredString, Colorize};
use env_logger::Builder;
use log::{Level, LevelFilter, Record};
use std::io::Write;
use std::thread;

/// Install the logger. `RUST_LOG` still applies on top. Later calls are ignored.
pub fn setup_logging(verbose: bool) {
    let own_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = Builder::from_default_env()
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_PKG_NAME"), own_level)
        .format(|buf, record| writeln!(buf, "{}", format_record(record)))
        .try_init();
}

fn level_tag(level: Level) -> Option<ColoredString> {
    match level {
        Level::Error => Some("ERROR".red()),
        Level::Warn => Some("WARN".yellow()),
        _ => None,
    }
}

/// `[lsfd WARN target] msg` for problems; `[lsfd] msg` otherwise. Debug lines from collector
/// threads carry the thread name so interleaved output can be told apart.
fn format_record(record: &Record) -> String {
    let name = env!("CARGO_PKG_NAME").cyan();
    if let Some(tag) = level_tag(record.level()) {
        return format!("[{} {} {}] {}", name, tag, record.target().white(), record.args());
    }
    match thread::current().name() {
        Some(worker) if record.level() == Level::Debug && worker != "main" => {
            format!("[{} {}] {}", name, worker.dimmed(), record.args())
        }
        _ => format!("[{}] {}", name, record.args()),
    }
}
