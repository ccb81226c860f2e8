use super::LogWriter;
use crate::{
    formats::{default_format, FormatFunction},
    util::{eprint_err, io_err, write_buffered, ErrorCode},
    ModlogError, Record,
};
use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::Path,
    sync::Mutex,
};

/// Writes each record as one formatted line to a byte stream.
///
/// Each record is formatted with the given [`FormatFunction`], or, without one, with
/// the record's canonical form ([`default_format`]), and written, followed by a
/// newline, with a single call to the stream. Writing is synchronous; nothing is
/// buffered beyond what the stream itself does.
pub struct FormattingWriter {
    format: FormatFunction,
    w: Mutex<Box<dyn Write + Send>>,
}

impl FormattingWriter {
    /// Writes to the given stream.
    pub fn new<W: Write + Send + 'static>(w: W, format: Option<FormatFunction>) -> Self {
        Self {
            format: format.unwrap_or(default_format),
            w: Mutex::new(Box::new(w)),
        }
    }

    /// Writes to stderr.
    #[must_use]
    pub fn stderr(format: Option<FormatFunction>) -> Self {
        Self::new(io::stderr(), format)
    }

    /// Writes to stdout.
    #[must_use]
    pub fn stdout(format: Option<FormatFunction>) -> Self {
        Self::new(io::stdout(), format)
    }

    /// Appends to the given file, which is created if it does not exist.
    ///
    /// # Errors
    ///
    /// [`ModlogError::Io`] if the file cannot be opened.
    pub fn append_to_file<P: AsRef<Path>>(
        path: P,
        format: Option<FormatFunction>,
    ) -> Result<Self, ModlogError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(Self::new(file, format))
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, Box<dyn Write + Send>>> {
        self.w.lock().map_err(|e| {
            eprint_err(ErrorCode::Poison, "FormattingWriter is poisoned", &e);
            io_err("FormattingWriter is poisoned")
        })
    }
}

impl LogWriter for FormattingWriter {
    fn write(&self, record: &Record) -> io::Result<()> {
        let mut w = self.lock()?;
        write_buffered(self.format, record, &mut **w)
    }

    fn flush(&self) -> io::Result<()> {
        self.lock()?.flush()
    }
}

#[cfg(test)]
mod test {
    use super::FormattingWriter;
    use crate::{formats::basic_format, writers::LogWriter, Level, Record};
    use std::{
        io::{self, Write},
        sync::{Arc, Mutex},
    };

    // a Write impl whose content can be inspected after handing it over
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);
    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn one_line_per_record() {
        let buf = SharedBuf::default();
        let writer = FormattingWriter::new(buf.clone(), Some(basic_format));
        writer
            .write(&Record::new(Level::Warning, "m", "f.rs", 1, "careful"))
            .unwrap();
        writer
            .write(&Record::new(Level::Error, "m", "f.rs", 2, "broken\n"))
            .unwrap();
        assert_eq!(buf.text(), "WARNING careful\nERROR broken\n");
    }

    #[test]
    fn canonical_form_without_format() {
        let buf = SharedBuf::default();
        let writer = FormattingWriter::new(buf.clone(), None);
        let record = Record::new(Level::Info, "a.b", "src/x.rs", 7, "hello");
        writer.write(&record).unwrap();
        assert_eq!(buf.text(), format!("{record}\n"));
        assert_eq!(writer.min_level(), None);
    }

    struct Broken;
    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_are_returned() {
        let writer = FormattingWriter::new(Broken, None);
        assert!(writer
            .write(&Record::new(Level::Info, "m", "f.rs", 1, "lost"))
            .is_err());
    }
}
