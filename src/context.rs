use crate::{
    log_bridge::LogBridge, Level, Logger, LoggersConfig, ModlogError, ModuleRegistry,
    WriterRegistry,
};
use std::sync::Arc;

/// Bundles a [`ModuleRegistry`] and a [`WriterRegistry`], and hands out [`Logger`]s
/// that emit into them.
///
/// Create one context at program start and pass it (or clones of it; clones share
/// the registries) to the components that need to log. Independent contexts are
/// completely isolated from each other, which is handy for tests.
///
/// # Example
///
/// ```rust
/// use modlog::{Context, Level};
///
/// # fn main() -> Result<(), modlog::ModlogError> {
/// let context = Context::new(Level::Warning);
/// context.configure("db=debug; http.client=error")?;
///
/// let logger = context.get_logger("db.pool");
/// assert_eq!(logger.effective_level(), Level::Debug);
/// logger.debug(format_args!("connection {} opened", 7));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Context {
    modules: Arc<ModuleRegistry>,
    writers: Arc<WriterRegistry>,
}

impl Context {
    /// Creates a context with a fresh module registry with the given root level,
    /// and a writer registry that contains only the default writer (to stderr).
    #[must_use]
    pub fn new(root_level: Level) -> Self {
        Self::with_registries(
            Arc::new(ModuleRegistry::new(root_level)),
            Arc::new(WriterRegistry::new()),
        )
    }

    /// Creates a context from existing registries.
    #[must_use]
    pub fn with_registries(modules: Arc<ModuleRegistry>, writers: Arc<WriterRegistry>) -> Self {
        Self { modules, writers }
    }

    /// Returns the logger with the given name, see [`ModuleRegistry::get`].
    #[must_use]
    pub fn get_logger(&self, name: &str) -> Logger {
        Logger::new(self.modules.get(name), Arc::clone(&self.writers))
    }

    /// Returns the root logger.
    #[must_use]
    pub fn root(&self) -> Logger {
        Logger::new(self.modules.root(), Arc::clone(&self.writers))
    }

    /// The module registry.
    #[must_use]
    pub fn modules(&self) -> &Arc<ModuleRegistry> {
        &self.modules
    }

    /// The writer registry.
    #[must_use]
    pub fn writers(&self) -> &Arc<WriterRegistry> {
        &self.writers
    }

    /// The current logger configuration, see [`ModuleRegistry::snapshot_config`].
    #[must_use]
    pub fn config(&self) -> LoggersConfig {
        self.modules.snapshot_config()
    }

    /// Parses and applies a logger configuration, see [`ModuleRegistry::configure`].
    ///
    /// # Errors
    ///
    /// [`ModlogError::Config`] if the text is malformed; then nothing is applied.
    pub fn configure(&self, spec: &str) -> Result<(), ModlogError> {
        self.modules.configure(spec)
    }

    /// Resets the levels of all loggers, see [`ModuleRegistry::reset_all`].
    pub fn reset_logger_levels(&self) {
        self.modules.reset_all();
    }

    /// Routes the output of the `log` crate's macros into this context.
    ///
    /// The target of a `log` record (usually the module path, e.g. `my_crate::db`)
    /// is mapped to the logger name `my_crate.db`.
    ///
    /// # Errors
    ///
    /// [`ModlogError::Log`] if a logger for the `log` crate is already installed.
    pub fn install_log_bridge(&self) -> Result<(), ModlogError> {
        log::set_boxed_logger(Box::new(LogBridge::new(self.clone())))?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(crate::DEFAULT_ROOT_LEVEL)
    }
}
