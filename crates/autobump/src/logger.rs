//! Logging for the Actions runner
//!
//! Uses env_logger with a format that turns warnings and errors into workflow
//! annotations, so they show up on the run summary. The level defaults to
//! `info` and can be changed with `RUST_LOG`.

use crate::workflow::WorkflowCommand;
use log::{Level, LevelFilter};
use std::io::Write;

/// Initialize logging to stdout
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let _ = env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_env(env_logger::Env::default())
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            let message = record.args().to_string();
            writeln!(buf, "{}", format_record(record.level(), &message))
        })
        .try_init();
}

/// Render one log record as the runner expects it
pub fn format_record(level: Level, message: &str) -> String {
    let message = message.to_string();
    match level {
        Level::Error => WorkflowCommand::Error { message }.to_string(),
        Level::Warn => WorkflowCommand::Warning { message }.to_string(),
        Level::Info => message,
        Level::Debug | Level::Trace => WorkflowCommand::Debug { message }.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_record() {
        assert_eq!(format_record(Level::Info, "Handling push"), "Handling push");
        assert_eq!(format_record(Level::Warn, "skipped"), "::warning::skipped");
        assert_eq!(format_record(Level::Error, "failed"), "::error::failed");
        assert_eq!(format_record(Level::Debug, "payload"), "::debug::payload");
        assert_eq!(format_record(Level::Trace, "raw"), "::debug::raw");
    }
}
