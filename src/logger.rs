use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::{stderr, Write};

/// 输出到 stderr 的彩色日志，避免和 shell 的 stdout 输出混在一起
struct ShellLogger;

static LOGGER: ShellLogger = ShellLogger;

impl Log for ShellLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = format!("{:5}", record.level());
        let level = match record.level() {
            Level::Error => level.bright_red(),
            Level::Warn => level.bright_yellow(),
            Level::Info => level.bright_blue(),
            Level::Debug => level.bright_cyan(),
            Level::Trace => level.bright_magenta(),
        };
        let _ = writeln!(
            stderr(),
            "{} {} {}",
            level,
            format!("[{}]", record.target()).bright_black(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = stderr().flush();
    }
}

/// 安装日志后端，只能成功一次
pub fn init(level: LevelFilter) -> Result<(), String> {
    log::set_logger(&LOGGER).map_err(|e| format!("cannot install logger: {}", e))?;
    log::set_max_level(level);
    Ok(())
}
