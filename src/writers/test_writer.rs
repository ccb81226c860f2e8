use super::LogWriter;
use crate::Record;
use std::{
    io,
    sync::{Mutex, MutexGuard, PoisonError},
};

/// Keeps all records it receives in memory, so that tests can inspect them.
#[derive(Debug, Default)]
pub struct TestWriter {
    log: Mutex<Vec<Record>>,
}

impl TestWriter {
    /// Creates an empty instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of all records received so far, in order of arrival.
    #[must_use]
    pub fn log(&self) -> Vec<Record> {
        self.lock().clone()
    }

    /// Forgets all records received so far.
    pub fn clear(&self) {
        self.lock().clear();
    }

    // a panic in a test must not hide the records of other threads
    fn lock(&self) -> MutexGuard<'_, Vec<Record>> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogWriter for TestWriter {
    fn write(&self, record: &Record) -> io::Result<()> {
        self.lock().push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::TestWriter;
    use crate::{writers::LogWriter, Level, Record};

    #[test]
    fn keeps_and_clears() {
        let writer = TestWriter::new();
        let record = Record::new(Level::Debug, "m", "f.rs", 3, "kept");
        writer.write(&record).unwrap();
        assert_eq!(writer.log(), vec![record]);
        writer.clear();
        assert!(writer.log().is_empty());
    }
}
