use crate::{
    formats::{default_format, minimal_format, FormatFunction},
    writers::FormattingWriter,
    Context, Level, LoggersConfig, ModlogError, DEFAULT_WRITER_NAME,
};
use std::{io::Write, path::PathBuf, sync::Arc};

/// Name under which [`LogOptions::start`] registers the log file writer.
pub const LOGFILE_WRITER_NAME: &str = "logfile";

/// Name under which [`LogOptions::start`] registers the warnings-only writer.
pub const WARNING_WRITER_NAME: &str = "warning";

/// Describes the logging setup of a command line program, and applies it to a
/// [`Context`] with [`LogOptions::start`].
///
/// Without any option set, only warnings and more severe records are shown, and only
/// with their message text. `show_log` shows everything from `Info` on in full
/// format, `debug` everything from `Debug` on.
///
/// # Example
///
/// ```rust
/// use modlog::{Context, LogOptions};
///
/// # fn main() -> Result<(), modlog::ModlogError> {
/// let context = Context::default();
/// LogOptions::new()
///     .show_log(true)
///     .config("db=trace")
///     .start(&context, std::io::stderr())?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct LogOptions {
    default_config: Option<String>,
    path: Option<PathBuf>,
    debug: bool,
    show_log: bool,
    config: Option<String>,
    format: Option<FormatFunction>,
}

impl LogOptions {
    /// All options switched off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Logger configuration that is applied before the one given with [`LogOptions::config`].
    #[must_use]
    pub fn default_config<S: Into<String>>(mut self, spec: S) -> Self {
        self.default_config = Some(spec.into());
        self
    }

    /// Additionally write all records into the given file.
    ///
    /// The file is created if necessary, and appended to otherwise.
    #[must_use]
    pub fn path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Show records from `Debug` on; implies [`LogOptions::show_log`].
    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Show records from `Info` on, in full format.
    #[must_use]
    pub fn show_log(mut self, show_log: bool) -> Self {
        self.show_log = show_log;
        self
    }

    /// Logger configuration that overrides the root level and the default configuration.
    #[must_use]
    pub fn config<S: Into<String>>(mut self, spec: S) -> Self {
        self.config = Some(spec.into());
        self
    }

    /// Format for the log file and for the shown log; [`default_format`] if not set.
    #[must_use]
    pub fn format(mut self, format: FormatFunction) -> Self {
        self.format = Some(format);
        self
    }

    /// Applies the options to the given context.
    ///
    /// * with a path, a writer for that file is registered as `logfile`, at level `Trace`;
    /// * if the log is shown, the default writer is replaced by one that writes to `stderr`;
    ///   otherwise the default writer is removed, and a writer that only shows the
    ///   message text is registered on `stderr` as `warning`, at level `Warning`;
    /// * the root logger is set to `Warning`, `Info` or `Debug`;
    /// * finally the default configuration and then the configuration are applied.
    ///
    /// Everything that can fail is checked before the context is touched, so a
    /// failing call leaves the context as it was (unless other threads change its
    /// writers at the same time).
    ///
    /// # Errors
    ///
    /// [`ModlogError::Config`] if one of the configurations is malformed,
    /// [`ModlogError::Io`] if the log file cannot be opened,
    /// [`ModlogError::DuplicateWriter`] or [`ModlogError::WriterNotFound`] if the writer
    /// registry of the context does not have the expected content.
    pub fn start<W: Write + Send + 'static>(
        &mut self,
        context: &Context,
        stderr: W,
    ) -> Result<(), ModlogError> {
        let default_config = self
            .default_config
            .as_deref()
            .map(LoggersConfig::parse)
            .transpose()?;
        let config = self.config.as_deref().map(LoggersConfig::parse).transpose()?;

        let mut level = Level::Warning;
        let mut show_log = self.show_log;
        if show_log {
            level = Level::Info;
        }
        if self.debug {
            show_log = true;
            level = Level::Debug;
        }

        let writers = context.writers();
        let names = writers.names();
        let registered = |name: &str| names.iter().any(|n| n == name);
        if self.path.is_some() && registered(LOGFILE_WRITER_NAME) {
            return Err(ModlogError::DuplicateWriter(LOGFILE_WRITER_NAME.to_string()));
        }
        if show_log && !registered(DEFAULT_WRITER_NAME) {
            return Err(ModlogError::WriterNotFound(DEFAULT_WRITER_NAME.to_string()));
        }
        if !show_log && registered(WARNING_WRITER_NAME) {
            return Err(ModlogError::DuplicateWriter(WARNING_WRITER_NAME.to_string()));
        }

        let format = self.format.unwrap_or(default_format);
        let o_logfile = match self.path {
            Some(ref path) => Some(FormattingWriter::append_to_file(path, Some(format))?),
            None => None,
        };

        if let Some(logfile) = o_logfile {
            writers.register(LOGFILE_WRITER_NAME, Arc::new(logfile), Level::Trace)?;
        }
        if show_log {
            writers.replace_default(Arc::new(FormattingWriter::new(stderr, Some(format))))?;
        } else {
            // there may be no default writer anymore; that is fine here
            writers.remove(DEFAULT_WRITER_NAME).ok();
            writers.register(
                WARNING_WRITER_NAME,
                Arc::new(FormattingWriter::new(stderr, Some(minimal_format))),
                Level::Warning,
            )?;
        }
        self.show_log = show_log;

        context.root().set_level(level);
        for config in [default_config, config].iter().flatten() {
            context.modules().apply(config);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{LogOptions, LOGFILE_WRITER_NAME, WARNING_WRITER_NAME};
    use crate::{Context, Level, ModlogError, DEFAULT_WRITER_NAME};

    #[test]
    fn quiet_by_default() {
        let context = Context::new(Level::Trace);
        LogOptions::new().start(&context, Vec::new()).unwrap();
        assert_eq!(context.writers().names(), vec![WARNING_WRITER_NAME]);
        assert_eq!(context.root().level(), Level::Warning);
    }

    #[test]
    fn debug_implies_show_log() {
        let context = Context::new(Level::Trace);
        let mut options = LogOptions::new().debug(true);
        options.start(&context, Vec::new()).unwrap();
        assert!(options.show_log);
        assert_eq!(context.writers().names(), vec![DEFAULT_WRITER_NAME]);
        assert_eq!(context.root().level(), Level::Debug);
    }

    #[test]
    fn configurations_are_applied_in_order() {
        let context = Context::new(Level::Trace);
        LogOptions::new()
            .show_log(true)
            .default_config("a=trace;b=error")
            .config("<root>=critical;a=debug")
            .start(&context, Vec::new())
            .unwrap();
        assert_eq!(context.root().level(), Level::Critical);
        assert_eq!(context.get_logger("a").level(), Level::Debug);
        assert_eq!(context.get_logger("b").level(), Level::Error);
    }

    #[test]
    fn malformed_config_is_reported() {
        let context = Context::new(Level::Trace);
        assert!(LogOptions::new()
            .config("a=loud")
            .start(&context, Vec::new())
            .is_err());
    }

    #[test]
    fn failed_start_changes_nothing() {
        let dir = temp_dir::TempDir::new().unwrap();
        let path = dir.path().join("start.log");
        let context = Context::new(Level::Trace);

        let mut options = LogOptions::new().path(&path).config("a=loud");
        assert!(matches!(
            options.start(&context, Vec::new()),
            Err(ModlogError::Config(_))
        ));
        assert_eq!(context.writers().names(), vec![DEFAULT_WRITER_NAME]);
        assert_eq!(context.root().level(), Level::Trace);

        context.writers().remove(DEFAULT_WRITER_NAME).unwrap();
        let mut options = LogOptions::new().path(&path).show_log(true);
        assert!(matches!(
            options.start(&context, Vec::new()),
            Err(ModlogError::WriterNotFound(_))
        ));
        assert!(context.writers().is_empty());

        // a corrected retry succeeds
        let mut options = LogOptions::new().path(&path).config("a=debug");
        options.start(&context, Vec::new()).unwrap();
        assert_eq!(
            context.writers().names(),
            vec![LOGFILE_WRITER_NAME, WARNING_WRITER_NAME]
        );
        assert_eq!(context.get_logger("a").level(), Level::Debug);
    }
}
