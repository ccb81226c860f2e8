use crate::{Level, LoggerNode, Record, WriterRegistry};
use std::{fmt, panic::Location, sync::Arc};

/// Handle for emitting records under one logger name.
///
/// Obtained from [`Context::get_logger`](crate::Context::get_logger); cheap to clone.
///
/// All logging methods first check the logger's effective level, so that records
/// that would be dropped are never formatted. Source file and line of the record
/// are those of the calling code.
///
/// # Example
///
/// ```rust
/// use modlog::{Context, Level};
///
/// let context = Context::new(Level::Info);
/// let logger = context.get_logger("app.startup");
/// logger.info(format_args!("listening on port {}", 8080));
/// logger.debug(format_args!("not formatted, not written"));
/// ```
#[derive(Clone)]
pub struct Logger {
    node: Arc<LoggerNode>,
    writers: Arc<WriterRegistry>,
}

impl Logger {
    pub(crate) fn new(node: Arc<LoggerNode>, writers: Arc<WriterRegistry>) -> Self {
        Self { node, writers }
    }

    /// The name of the logger, `<root>` for the root logger.
    #[must_use]
    pub fn name(&self) -> &str {
        self.node.display_name()
    }

    /// The node of this logger in its [`ModuleRegistry`](crate::ModuleRegistry).
    #[must_use]
    pub fn node(&self) -> &Arc<LoggerNode> {
        &self.node
    }

    /// The level set on this logger itself, see [`LoggerNode::level`].
    #[must_use]
    pub fn level(&self) -> Level {
        self.node.level()
    }

    /// The level that governs this logger, see [`LoggerNode::effective_level`].
    #[must_use]
    pub fn effective_level(&self) -> Level {
        self.node.effective_level()
    }

    /// Sets the level of this logger, see [`LoggerNode::set_level`].
    pub fn set_level(&self, level: Level) {
        self.node.set_level(level);
    }

    /// Returns whether a record with the given level would be emitted.
    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        self.node.is_level_enabled(level)
    }

    /// Emits a record with the given level, if the level is enabled.
    #[track_caller]
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if !self.is_enabled(level) {
            return;
        }
        let location = Location::caller();
        self.emit(level, location.file(), location.line(), args);
    }

    /// Emits a record with an explicitly given source location, if the level is enabled.
    pub fn log_at(&self, level: Level, file: &str, line: u32, args: fmt::Arguments<'_>) {
        if !self.is_enabled(level) {
            return;
        }
        self.emit(level, file, line, args);
    }

    fn emit(&self, level: Level, file: &str, line: u32, args: fmt::Arguments<'_>) {
        let message = match args.as_str() {
            Some(s) => s.to_string(),
            None => fmt::format(args),
        };
        let record = Record::new(level, self.name(), file, line, message);
        self.writers.dispatch(&record);
    }

    /// Emits a record with level `Critical`.
    #[track_caller]
    pub fn critical(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Critical, args);
    }

    /// Emits a record with level `Error`.
    #[track_caller]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }

    /// Emits a record with level `Warning`.
    #[track_caller]
    pub fn warning(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warning, args);
    }

    /// Emits a record with level `Info`.
    #[track_caller]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    /// Emits a record with level `Debug`.
    #[track_caller]
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }

    /// Emits a record with level `Trace`.
    #[track_caller]
    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Trace, args);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("level", &self.level())
            .finish()
    }
}
