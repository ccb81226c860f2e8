use super::LogWriter;
use crate::{Level, Record};
use regex::Regex;
use std::io;

/// Forwards only records whose message matches a regular expression.
pub struct TextFilterWriter<W> {
    filter: Regex,
    writer: W,
}

impl<W: LogWriter> TextFilterWriter<W> {
    /// Wraps `writer`, letting only records through whose message matches `filter`.
    pub fn new(filter: Regex, writer: W) -> Self {
        Self { filter, writer }
    }
}

impl<W: LogWriter> LogWriter for TextFilterWriter<W> {
    fn write(&self, record: &Record) -> io::Result<()> {
        if !self.filter.is_match(record.message()) {
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

#[cfg(test)]
mod test {
    use super::TextFilterWriter;
    use crate::{
        writers::{LogWriter, TestWriter},
        Level, Record,
    };
    use regex::Regex;
    use std::sync::Arc;

    #[test]
    fn bars_only() {
        let recorder = Arc::new(TestWriter::new());
        let writer = TextFilterWriter::new(Regex::new("bar").unwrap(), Arc::clone(&recorder));
        for msg in ["barista", "foo", "bar", "gaga"] {
            writer
                .write(&Record::new(Level::Info, "m", "f.rs", 1, msg))
                .unwrap();
        }
        let messages: Vec<String> = recorder
            .log()
            .iter()
            .map(|r| r.message().to_string())
            .collect();
        assert_eq!(messages, vec!["barista", "bar"]);
    }
}
