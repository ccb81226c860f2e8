use crate::Level;
use chrono::{DateTime, Utc};
use std::{fmt, path::Path};

/// A single logging event, as it is handed to the writers.
///
/// Records are immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    level: Level,
    module: String,
    file: String,
    line: u32,
    timestamp: DateTime<Utc>,
    message: String,
}

impl Record {
    /// Creates a record stamped with the current time.
    ///
    /// A single trailing newline of the message is removed.
    #[must_use]
    pub fn new<M, F, S>(level: Level, module: M, file: F, line: u32, message: S) -> Self
    where
        M: Into<String>,
        F: Into<String>,
        S: Into<String>,
    {
        let mut message = message.into();
        if message.ends_with('\n') {
            message.pop();
        }
        Self {
            level,
            module: module.into(),
            file: file.into(),
            line,
            timestamp: Utc::now(),
            message,
        }
    }

    /// Replaces the timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The severity of the record.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Name of the logger that produced the record.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Path of the source file that produced the record.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// The last component of [`Record::file`].
    #[must_use]
    pub fn file_name(&self) -> &str {
        Path::new(&self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.file)
    }

    /// Source line that produced the record.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Creation time of the record.
    #[must_use]
    pub fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }

    /// The log message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Canonical form: `2024-05-01 10:11:12 WARNING module file.rs:42 message`,
/// with the timestamp in UTC at second resolution.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}:{} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.level,
            self.module,
            self.file_name(),
            self.line,
            self.message
        )
    }
}
