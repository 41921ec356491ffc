use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Local};
use log::{LevelFilter, Log, Metadata, Record};

use crate::error::AppError;

/// Writes log records to a file, since the terminal itself is taken over by the game screen.
#[derive(Debug)]
struct FileLogger {
    file: Mutex<File>,
    level: LevelFilter,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(Local::now(), record.level(), record.target(), record.args());
        if let Ok(mut file) = self.file.lock() {
            // nowhere left to report a failed log write
            let _ = writeln!(file, "{line}");
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

fn format_line(
    timestamp: DateTime<Local>,
    level: log::Level,
    target: &str,
    args: &fmt::Arguments,
) -> String {
    format!(
        "[{}][{:<5}][{}] {}",
        timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
        level,
        target,
        args
    )
}

/// Installs the file logger. Records above `level` are dropped.
pub(crate) fn init(path: &Path, level: LevelFilter) -> Result<(), AppError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    log::set_boxed_logger(Box::new(FileLogger {
        file: Mutex::new(file),
        level,
    }))?;
    log::set_max_level(level);
    log::info!("Logging to {} at {}", path.display(), level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn line_has_timestamp_level_and_target() {
        let timestamp = Local.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
        let line = format_line(
            timestamp,
            log::Level::Warn,
            "mineterm_core::engine",
            &format_args!("Mine hit at {:?}", (1, 2)),
        );

        assert_eq!(
            line,
            "[2024-03-01 12:30:05.000][WARN ][mineterm_core::engine] Mine hit at (1, 2)"
        );
    }
}
