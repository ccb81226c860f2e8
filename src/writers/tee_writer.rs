use super::{log_writer::admits, LogWriter};
use crate::{Level, Record};
use std::{io, sync::Arc};

/// Writes each record to a list of writers, in the order they were given.
///
/// Inner writers that expose a floor only get the records they admit;
/// writers without a floor get every record.
///
/// The combined floor of the tee, i.e. the least severe level at which at least
/// one of the inner writers would write, is determined once, at construction.
/// If any inner writer does not expose its floor, nothing can be ruled out, and
/// the tee reports `Level::Unspecified`.
pub struct TeeWriter {
    combined_min_level: Level,
    writers: Vec<Arc<dyn LogWriter>>,
}

impl TeeWriter {
    /// Creates a tee over the given writers.
    ///
    /// The writers stay shared with the caller.
    #[must_use]
    pub fn new(writers: Vec<Arc<dyn LogWriter>>) -> Self {
        let combined_min_level = writers
            .iter()
            .map(|w| w.min_level())
            .try_fold(None::<Level>, |combined, o_level| {
                o_level.map(|level| Some(combined.map_or(level, |c| c.least_severe(level))))
            })
            .flatten()
            .unwrap_or(Level::Unspecified);
        Self {
            combined_min_level,
            writers,
        }
    }

    /// The inner writers.
    #[must_use]
    pub fn writers(&self) -> &[Arc<dyn LogWriter>] {
        &self.writers
    }
}

impl LogWriter for TeeWriter {
    fn write(&self, record: &Record) -> io::Result<()> {
        let mut result = Ok(());
        for writer in &self.writers {
            if !admits(writer.min_level(), record.level()) {
                continue;
            }
            // keep going, report the first failure
            if let Err(e) = writer.write(record) {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }

    fn flush(&self) -> io::Result<()> {
        let mut result = Ok(());
        for writer in &self.writers {
            if let Err(e) = writer.flush() {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }

    fn min_level(&self) -> Option<Level> {
        Some(self.combined_min_level)
    }
}

#[cfg(test)]
mod test {
    use super::TeeWriter;
    use crate::{
        writers::{DiscardWriter, LogWriter, MinLevelWriter, TestWriter},
        Level, Record,
    };
    use std::sync::Arc;

    #[test]
    fn combined_floor() {
        let writers: Vec<Arc<dyn LogWriter>> = vec![
            Arc::new(MinLevelWriter::new(DiscardWriter, Level::Warning)),
            Arc::new(MinLevelWriter::new(DiscardWriter, Level::Info)),
        ];
        let tee = TeeWriter::new(writers);
        assert_eq!(tee.min_level(), Some(Level::Info));
    }

    #[test]
    fn opaque_writer_degrades_floor() {
        let writers: Vec<Arc<dyn LogWriter>> = vec![
            Arc::new(MinLevelWriter::new(DiscardWriter, Level::Error)),
            Arc::new(TestWriter::new()),
        ];
        let tee = TeeWriter::new(writers);
        assert_eq!(tee.min_level(), Some(Level::Unspecified));
    }

    #[test]
    fn empty_tee_accepts_all() {
        assert_eq!(TeeWriter::new(Vec::new()).min_level(), Some(Level::Unspecified));
    }

    #[test]
    fn writes_in_order_and_filters() {
        let recorder = Arc::new(TestWriter::new());
        let strict = Arc::new(MinLevelWriter::new(Arc::clone(&recorder), Level::Error));
        let writers: Vec<Arc<dyn LogWriter>> = vec![
            strict as Arc<dyn LogWriter>,
            Arc::clone(&recorder) as Arc<dyn LogWriter>,
        ];
        let tee = TeeWriter::new(writers);

        tee.write(&Record::new(Level::Critical, "m", "f.rs", 1, "both"))
            .unwrap();
        tee.write(&Record::new(Level::Info, "m", "f.rs", 2, "second only"))
            .unwrap();
        let messages: Vec<String> = recorder
            .log()
            .iter()
            .map(|r| r.message().to_string())
            .collect();
        assert_eq!(messages, vec!["both", "both", "second only"]);
    }
}
