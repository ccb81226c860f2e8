use crate::{Context, Level};

/// Implements `log::Log` on top of a [`Context`], see [`Context::install_log_bridge`].
pub struct LogBridge {
    context: Context,
}

impl LogBridge {
    /// Creates a bridge into the given context.
    #[must_use]
    pub fn new(context: Context) -> Self {
        Self { context }
    }
}

// `my_crate::db` becomes `my_crate.db`
fn logger_name(target: &str) -> String {
    target.replace("::", ".")
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.context
            .get_logger(&logger_name(metadata.target()))
            .is_enabled(Level::from(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        let logger = self.context.get_logger(&logger_name(record.target()));
        logger.log_at(
            Level::from(record.level()),
            record.file().unwrap_or("???"),
            record.line().unwrap_or(0),
            *record.args(),
        );
    }

    fn flush(&self) {
        self.context.writers().flush();
    }
}
