use super::{FormattingWriter, LogWriter};
use crate::{formats::FormatFunction, Level, Record};
use std::{io, sync::Arc};

/// Routes records by severity to one of two writers:
/// `Warning` and more severe records go to the "err" writer,
/// all others (`Info`, `Debug`, `Trace`) to the "out" writer.
pub struct StdioSplitWriter {
    out: Arc<dyn LogWriter>,
    err: Arc<dyn LogWriter>,
}

impl StdioSplitWriter {
    /// Creates a split over the given writers, which stay shared with the caller.
    #[must_use]
    pub fn new(out: Arc<dyn LogWriter>, err: Arc<dyn LogWriter>) -> Self {
        Self { out, err }
    }

    /// Creates a split that writes formatted lines to stdout and stderr.
    #[must_use]
    pub fn std(format: Option<FormatFunction>) -> Self {
        Self::new(
            Arc::new(FormattingWriter::stdout(format)),
            Arc::new(FormattingWriter::stderr(format)),
        )
    }

    fn target(&self, level: Level) -> &Arc<dyn LogWriter> {
        if level.is_enabled(Level::Warning) {
            &self.err
        } else {
            &self.out
        }
    }
}

impl LogWriter for StdioSplitWriter {
    fn write(&self, record: &Record) -> io::Result<()> {
        self.target(record.level()).write(record)
    }

    fn flush(&self) -> io::Result<()> {
        let r_out = self.out.flush();
        let r_err = self.err.flush();
        r_out.and(r_err)
    }

    fn min_level(&self) -> Option<Level> {
        match (self.out.min_level(), self.err.min_level()) {
            (Some(out), Some(err)) => Some(out.least_severe(err)),
            _ => None,
        }
    }
}
