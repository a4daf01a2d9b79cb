//! Record formatters used by the built-in sinks

use colored::{Color, Colorize};
use contracts::{LogRecord, RecordFormatter, Severity};

/// `YYYY-MM-DD HH:MM:SS`
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `<time> - <LEVEL> - <message>`, no styling
#[derive(Debug, Clone)]
pub struct PlainFormatter {
    time_format: String,
}

impl PlainFormatter {
    pub fn new() -> Self {
        Self::with_time_format(DEFAULT_TIME_FORMAT)
    }

    /// Use a custom `chrono` strftime pattern
    pub fn with_time_format(time_format: impl Into<String>) -> Self {
        Self {
            time_format: time_format.into(),
        }
    }
}

impl Default for PlainFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordFormatter for PlainFormatter {
    fn format(&self, record: &LogRecord) -> String {
        format!(
            "{} - {} - {}",
            record.timestamp().format(&self.time_format),
            record.severity(),
            record.message()
        )
    }
}

/// `<time> - <LEVEL padded to 8, colored> - <message>`
#[derive(Debug, Clone)]
pub struct ColorFormatter {
    time_format: String,
    colorize: bool,
}

impl ColorFormatter {
    pub fn new() -> Self {
        Self {
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            colorize: true,
        }
    }

    /// Same column layout without ANSI styling
    pub fn without_color() -> Self {
        Self {
            colorize: false,
            ..Self::new()
        }
    }

    pub fn with_time_format(mut self, time_format: impl Into<String>) -> Self {
        self.time_format = time_format.into();
        self
    }
}

impl Default for ColorFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Foreground and optional background for a level
pub fn severity_style(severity: Severity) -> (Color, Option<Color>) {
    match severity {
        Severity::Debug => (Color::Cyan, None),
        Severity::Info => (Color::Green, None),
        Severity::Warning => (Color::Yellow, None),
        Severity::Error => (Color::Red, None),
        Severity::Critical => (Color::Red, Some(Color::White)),
    }
}

impl RecordFormatter for ColorFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let level = format!("{:<8}", record.severity());
        let level = if self.colorize {
            let (fg, bg) = severity_style(record.severity());
            let styled = level.color(fg);
            match bg {
                Some(bg) => styled.on_color(bg).to_string(),
                None => styled.to_string(),
            }
        } else {
            level
        };

        format!(
            "{} - {} - {}",
            record.timestamp().format(&self.time_format),
            level,
            record.message()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn record(severity: Severity, message: &str) -> LogRecord {
        let ts = Local.with_ymd_and_hms(2024, 5, 17, 8, 4, 9).unwrap();
        LogRecord::at(ts, "test", severity, message)
    }

    #[test]
    fn test_plain_layout() {
        let line = PlainFormatter::new().format(&record(Severity::Warning, "low disk"));
        assert_eq!(line, "2024-05-17 08:04:09 - WARNING - low disk");
    }

    #[test]
    fn test_plain_custom_time_format() {
        let line = PlainFormatter::with_time_format("%H:%M").format(&record(Severity::Info, "x"));
        assert_eq!(line, "08:04 - INFO - x");
    }

    #[test]
    fn test_color_formatter_without_color_pads_level() {
        let line = ColorFormatter::without_color().format(&record(Severity::Info, "ready"));
        assert_eq!(line, "2024-05-17 08:04:09 - INFO     - ready");
    }

    #[test]
    fn test_color_formatter_is_deterministic() {
        colored::control::set_override(true);
        let formatter = ColorFormatter::new();
        let rec = record(Severity::Critical, "meltdown");
        let first = formatter.format(&rec);
        assert_eq!(first, formatter.format(&rec));
        assert!(first.contains("CRITICAL"));
        assert!(first.ends_with(" - meltdown"));
        colored::control::unset_override();
    }

    #[test]
    fn test_critical_has_background() {
        assert_eq!(
            severity_style(Severity::Critical),
            (Color::Red, Some(Color::White))
        );
        assert_eq!(severity_style(Severity::Debug).1, None);
    }
}
