use super::LogWriter;
use crate::{Level, Record};
use std::io;

/// Forwards records that are at least as severe as a given floor, and silently
/// drops all others.
///
/// Exposes the floor via [`LogWriter::min_level`], so that a
/// [`TeeWriter`](crate::writers::TeeWriter) around it can take it into account.
pub struct MinLevelWriter<W> {
    writer: W,
    level: Level,
}

impl<W: LogWriter> MinLevelWriter<W> {
    /// Wraps `writer`; with `Level::Unspecified` every record passes.
    pub fn new(writer: W, level: Level) -> Self {
        Self { writer, level }
    }

    /// The wrapped writer.
    pub fn inner(&self) -> &W {
        &self.writer
    }
}

impl<W: LogWriter> LogWriter for MinLevelWriter<W> {
    fn write(&self, record: &Record) -> io::Result<()> {
        if !record.level().is_enabled(self.level) {
            return Ok(());
        }
        self.writer.write(record)
    }

    fn flush(&self) -> io::Result<()> {
        self.writer.flush()
    }

    fn min_level(&self) -> Option<Level> {
        Some(self.level)
    }
}
