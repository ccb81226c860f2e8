use crate::{Level, Record};
use std::io;

/// Writes to a single log output stream.
///
/// Implementations are shared between threads, and receive each record by reference.
///
/// Instances can be registered with a [`WriterRegistry`](crate::WriterRegistry),
/// or combined with the composing writers of this module.
pub trait LogWriter: Sync + Send {
    /// Writes out a log record.
    ///
    /// # Errors
    ///
    /// If writing to the output fails; the caller decides whether that matters.
    fn write(&self, record: &Record) -> io::Result<()>;

    /// Flushes any buffered records.
    ///
    /// # Errors
    ///
    /// If flushing the output fails.
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }

    /// The least severe level this writer will accept, if it is known.
    ///
    /// `None` means the writer does not tell; composing writers then have to
    /// assume it may want every record. `Some(Level::Unspecified)` means it
    /// accepts every record.
    fn min_level(&self) -> Option<Level> {
        None
    }
}

impl<W: LogWriter + ?Sized> LogWriter for Box<W> {
    fn write(&self, record: &Record) -> io::Result<()> {
        (**self).write(record)
    }
    fn flush(&self) -> io::Result<()> {
        (**self).flush()
    }
    fn min_level(&self) -> Option<Level> {
        (**self).min_level()
    }
}

impl<W: LogWriter + ?Sized> LogWriter for std::sync::Arc<W> {
    fn write(&self, record: &Record) -> io::Result<()> {
        (**self).write(record)
    }
    fn flush(&self) -> io::Result<()> {
        (**self).flush()
    }
    fn min_level(&self) -> Option<Level> {
        (**self).min_level()
    }
}

// Whether a writer with this floor wants the record; opaque writers get everything.
pub(crate) fn admits(min_level: Option<Level>, level: Level) -> bool {
    min_level.is_none_or(|floor| level.is_enabled(floor))
}
