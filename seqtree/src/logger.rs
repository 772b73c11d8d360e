//! Terminal logger for the `log` facade.
use std::io::Write;

use log::{Level, LevelFilter, Log, Metadata, Record};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// One formatted log record.
pub struct LogMessage {
    pub level: Level,
    pub timepoint: chrono::NaiveDateTime,
    pub message: String,
    pub module: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub thread_name: Option<String>,
}

impl LogMessage {
    fn from_record(record: &Record<'_>) -> Self {
        Self {
            level: record.level(),
            timepoint: chrono::Local::now().naive_local(),
            message: record.args().to_string(),
            module: record.module_path().unwrap_or("<unknown>").to_string(),
            file: record.file().map(str::to_string),
            line: record.line(),
            thread_name: std::thread::current().name().map(str::to_string),
        }
    }

    fn level_spec(&self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match self.level {
            Level::Error => spec.set_fg(Some(Color::Red)).set_bold(true),
            Level::Warn => spec.set_fg(Some(Color::Yellow)).set_bold(true),
            Level::Info => spec.set_fg(Some(Color::Green)),
            Level::Debug => spec.set_fg(Some(Color::Blue)),
            Level::Trace => spec.set_fg(Some(Color::Magenta)).set_dimmed(true),
        };
        spec
    }

    fn write_to(&self, out: &mut impl WriteColor, with_location: bool) -> std::io::Result<()> {
        out.set_color(ColorSpec::new().set_dimmed(true))?;
        write!(out, "{} ", self.timepoint.format("%H:%M:%S%.3f"))?;
        out.set_color(&self.level_spec())?;
        write!(out, "{:<5}", self.level)?;
        out.reset()?;

        out.set_color(ColorSpec::new().set_dimmed(true))?;
        write!(out, " [{}", self.module)?;
        if let Some(thread) = &self.thread_name {
            write!(out, "@{thread}")?;
        }
        if with_location && let (Some(file), Some(line)) = (&self.file, self.line) {
            write!(out, " {file}:{line}")?;
        }
        write!(out, "]")?;
        out.reset()?;

        writeln!(out, " {}", self.message)
    }
}

/// Logger writing colored records to stderr.
pub struct TermLogger {
    level: LevelFilter,
}

impl TermLogger {
    /// Level filter for `-v` repeated `verbosity` times.
    pub fn level_for(verbosity: u8) -> LevelFilter {
        match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Install the logger globally.
    pub fn init(verbosity: u8) -> Result<(), log::SetLoggerError> {
        let level = Self::level_for(verbosity);
        log::set_boxed_logger(Box::new(TermLogger { level }))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for TermLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = LogMessage::from_record(record);
        let stderr = StandardStream::stderr(ColorChoice::Auto);
        let mut stderr = stderr.lock();
        // Nowhere left to report a failing stderr.
        let _ = message.write_to(&mut stderr, self.level >= LevelFilter::Trace);
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::NoColor;

    #[test]
    fn verbosity_levels() {
        assert_eq!(TermLogger::level_for(0), LevelFilter::Warn);
        assert_eq!(TermLogger::level_for(2), LevelFilter::Debug);
        assert_eq!(TermLogger::level_for(9), LevelFilter::Trace);
    }

    #[test]
    fn message_layout() {
        let message = LogMessage {
            level: Level::Info,
            timepoint: chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
                .and_then(|d| d.and_hms_milli_opt(3, 4, 5, 6))
                .unwrap(),
            message: "grown".to_string(),
            module: "seqcore::tree".to_string(),
            file: Some("tree.rs".to_string()),
            line: Some(12),
            thread_name: None,
        };
        let mut out = NoColor::new(Vec::new());
        message.write_to(&mut out, true).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(text, "03:04:05.006 INFO  [seqcore::tree tree.rs:12] grown\n");
    }
}
