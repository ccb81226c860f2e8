use crate::Record;
use std::io::Write;

/// Function type for format functions.
///
/// If you want to write the log lines in your own format,
/// implement a function with this signature and provide it to a
/// [`FormattingWriter`](crate::writers::FormattingWriter).
///
/// The line terminator is appended by the writer, the format function must not write one.
pub type FormatFunction = fn(write: &mut dyn Write, record: &Record) -> Result<(), std::io::Error>;

/// The canonical form of a [`Record`], see its `Display` implementation.
///
/// ```text
/// 2016-01-13 15:25:01 INFO my_prog.some_submodule main.rs:26 Task successfully read from conf.json
/// ```
///
/// # Errors
///
/// See `std::write`
pub fn default_format(w: &mut dyn Write, record: &Record) -> Result<(), std::io::Error> {
    write!(w, "{record}")
}

/// A logline-formatter that produces only the message.
///
/// # Errors
///
/// See `std::write`
pub fn minimal_format(w: &mut dyn Write, record: &Record) -> Result<(), std::io::Error> {
    write!(w, "{}", record.message())
}

/// A logline-formatter that produces log lines like
/// <br>
/// ```WARNING Task successfully read from conf.json```
///
/// # Errors
///
/// See `std::write`
pub fn basic_format(w: &mut dyn Write, record: &Record) -> Result<(), std::io::Error> {
    write!(w, "{} {}", record.level(), record.message())
}

/// A logline-formatter that produces log lines like
/// <br>
/// ```[2016-01-13 15:25:01.640870 +00:00] INFO [foo.bar] src/foo/bar.rs:26: Task successfully read from conf.json```
/// <br>
/// i.e. with timestamp, module name and file location.
///
/// # Errors
///
/// See `std::write`
pub fn detailed_format(w: &mut dyn Write, record: &Record) -> Result<(), std::io::Error> {
    write!(
        w,
        "[{}] {} [{}] {}:{}: {}",
        record.timestamp().format("%Y-%m-%d %H:%M:%S%.6f %:z"),
        record.level(),
        record.module(),
        record.file(),
        record.line(),
        record.message()
    )
}

/// Like [`default_format`], but the level is colored:
/// `Critical` and `Error` red, `Warning` yellow, `Info` green, `Debug` blue
/// and `Trace` purple.
///
/// # Errors
///
/// See `std::write`
#[cfg(feature = "colors")]
#[cfg_attr(docsrs, doc(cfg(feature = "colors")))]
pub fn colored_default_format(w: &mut dyn Write, record: &Record) -> Result<(), std::io::Error> {
    let style = style(record.level());
    write!(
        w,
        "{} {} {} {}:{} {}",
        record.timestamp().format("%Y-%m-%d %H:%M:%S"),
        style.paint(record.level().as_str()),
        record.module(),
        record.file_name(),
        record.line(),
        style.paint(record.message())
    )
}

/// Helper function that is used in the provided coloring format function to apply
/// colors based on the log level.
#[cfg(feature = "colors")]
#[cfg_attr(docsrs, doc(cfg(feature = "colors")))]
#[must_use]
pub fn style(level: crate::Level) -> nu_ansi_term::Style {
    use crate::Level;
    use nu_ansi_term::{Color, Style};
    match level {
        Level::Critical => Color::Red.bold().reverse(),
        Level::Error => Color::Red.bold(),
        Level::Warning => Color::Yellow.bold(),
        Level::Info => Color::Green.normal(),
        Level::Debug => Color::Blue.normal(),
        Level::Trace => Color::Purple.normal(),
        Level::Unspecified => Style::new(),
    }
}

#[cfg(test)]
mod test {
    use crate::{Level, Record};
    use chrono::{TimeZone, Utc};

    fn record() -> Record {
        Record::new(Level::Error, "foo.bar", "src/foo/bar.rs", 26, "it broke")
            .with_timestamp(Utc.with_ymd_and_hms(2016, 1, 13, 15, 25, 1).unwrap())
    }

    fn render(format: super::FormatFunction) -> String {
        let mut buf = Vec::new();
        format(&mut buf, &record()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn provided_formats() {
        assert_eq!(
            render(super::default_format),
            "2016-01-13 15:25:01 ERROR foo.bar bar.rs:26 it broke"
        );
        assert_eq!(render(super::minimal_format), "it broke");
        assert_eq!(render(super::basic_format), "ERROR it broke");
        assert_eq!(
            render(super::detailed_format),
            "[2016-01-13 15:25:01.000000 +00:00] ERROR [foo.bar] src/foo/bar.rs:26: it broke"
        );
    }

    #[cfg(feature = "colors")]
    #[test]
    fn colored_format_keeps_content() {
        let line = render(super::colored_default_format);
        assert!(line.contains("ERROR"));
        assert!(line.contains("bar.rs:26"));
        assert!(line.contains("it broke"));
        assert!(line.contains('\u{1b}'));
    }
}
