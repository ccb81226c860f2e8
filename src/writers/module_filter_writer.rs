use super::LogWriter;
use crate::{Level, Record};
use std::io;

/// Forwards only records of one particular logger; the name must match exactly.
pub struct ModuleFilterWriter<W> {
    module: String,
    writer: W,
}

impl<W: LogWriter> ModuleFilterWriter<W> {
    /// Wraps `writer`, letting only records of logger `module` through.
    ///
    /// Logger names are lowercase, so `module` is lowercased as well.
    pub fn new<S: AsRef<str>>(module: S, writer: W) -> Self {
        Self {
            module: module.as_ref().to_lowercase(),
            writer,
        }
    }
}

impl<W: LogWriter> LogWriter for ModuleFilterWriter<W> {
    fn write(&self, record: &Record) -> io::Result<()> {
        if record.module() != self.module {
            return Ok(());
        }
        self.writer.write(record)
    }

    fn flush(&self) -> io::Result<()> {
        self.writer.flush()
    }

    fn min_level(&self) -> Option<Level> {
        self.writer.min_level()
    }
}
