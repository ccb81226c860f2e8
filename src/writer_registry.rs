use crate::{
    util::{eprint_err, ErrorCode},
    writers::{FormattingWriter, LogWriter},
    Level, ModlogError, Record,
};
use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// Name under which the default writer is registered.
pub const DEFAULT_WRITER_NAME: &str = "default";

#[derive(Clone)]
struct Entry {
    name: String,
    writer: Arc<dyn LogWriter>,
    min_level: Level,
}

/// The set of named writers that log records are delivered to.
///
/// Each writer is registered under a unique name, together with a minimum level;
/// [`WriterRegistry::dispatch`] hands a record to every writer whose minimum level
/// admits it, in the order in which the writers were registered.
///
/// Registering, removing and replacing writers is serialized on a mutex.
/// Dispatching only holds that mutex for taking a snapshot of the current writers,
/// so slow writers do not block changes to the registry, and changes never
/// affect a dispatch that is already running.
///
/// # Example
///
/// ```rust
/// use modlog::{writers::FormattingWriter, Level, WriterRegistry, DEFAULT_WRITER_NAME};
/// use std::sync::Arc;
///
/// # fn main() -> Result<(), modlog::ModlogError> {
/// let registry = WriterRegistry::new();
/// registry.register(
///     "logfile",
///     Arc::new(FormattingWriter::append_to_file("app.log", None)?),
///     Level::Trace,
/// )?;
/// registry.remove(DEFAULT_WRITER_NAME)?;
/// # Ok(())
/// # }
/// ```
pub struct WriterRegistry {
    entries: Mutex<Arc<[Entry]>>,
}

impl WriterRegistry {
    /// Creates a registry that contains only the default writer, which writes
    /// records in their canonical form to stderr and accepts every level.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Arc::from(vec![default_entry()])),
        }
    }

    /// Creates a registry without any writer.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Mutex::new(Arc::from(Vec::new())),
        }
    }

    // The lock only guards the swapping of a complete list, so a poisoned
    // lock still protects a consistent list.
    fn lock(&self) -> MutexGuard<'_, Arc<[Entry]>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(&self) -> Arc<[Entry]> {
        Arc::clone(&*self.lock())
    }

    /// Adds a writer under the given name.
    ///
    /// The writer receives all records that are at least as severe as `min_level`;
    /// with [`Level::Unspecified`] it receives every record.
    ///
    /// # Errors
    ///
    /// [`ModlogError::DuplicateWriter`] if a writer with this name is already registered.
    pub fn register(
        &self,
        name: &str,
        writer: Arc<dyn LogWriter>,
        min_level: Level,
    ) -> Result<(), ModlogError> {
        let mut entries = self.lock();
        if entries.iter().any(|e| e.name == name) {
            return Err(ModlogError::DuplicateWriter(name.to_string()));
        }
        let mut new_entries = entries.to_vec();
        new_entries.push(Entry {
            name: name.to_string(),
            writer,
            min_level,
        });
        *entries = Arc::from(new_entries);
        Ok(())
    }

    /// Removes the writer with the given name, and returns it with its minimum level.
    ///
    /// # Errors
    ///
    /// [`ModlogError::WriterNotFound`] if no writer with this name is registered.
    pub fn remove(&self, name: &str) -> Result<(Arc<dyn LogWriter>, Level), ModlogError> {
        let mut entries = self.lock();
        let Some(idx) = entries.iter().position(|e| e.name == name) else {
            return Err(ModlogError::WriterNotFound(name.to_string()));
        };
        let mut new_entries = entries.to_vec();
        let removed = new_entries.remove(idx);
        *entries = Arc::from(new_entries);
        Ok((removed.writer, removed.min_level))
    }

    /// Replaces the writer that is registered as [`DEFAULT_WRITER_NAME`], keeping
    /// its position and minimum level, and returns the previous writer.
    ///
    /// # Errors
    ///
    /// [`ModlogError::WriterNotFound`] if there is no default writer.
    pub fn replace_default(
        &self,
        writer: Arc<dyn LogWriter>,
    ) -> Result<Arc<dyn LogWriter>, ModlogError> {
        let mut entries = self.lock();
        let Some(idx) = entries.iter().position(|e| e.name == DEFAULT_WRITER_NAME) else {
            return Err(ModlogError::WriterNotFound(DEFAULT_WRITER_NAME.to_string()));
        };
        let mut new_entries = entries.to_vec();
        let previous = std::mem::replace(&mut new_entries[idx].writer, writer);
        *entries = Arc::from(new_entries);
        Ok(previous)
    }

    /// Removes all writers and registers the default writer again.
    pub fn reset(&self) {
        let previous = std::mem::replace(&mut *self.lock(), Arc::from(vec![default_entry()]));
        // writers may run arbitrary code on drop, so this happens after unlocking
        drop(previous);
    }

    /// The names of the registered writers, in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.snapshot().iter().map(|e| e.name.clone()).collect()
    }

    /// Number of registered writers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Returns `true` if no writer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hands the record to every writer whose minimum level admits it,
    /// in registration order.
    ///
    /// Failing writers are reported on stderr and otherwise ignored;
    /// the remaining writers still get the record. Nothing is retried.
    pub fn dispatch(&self, record: &Record) {
        let entries = self.snapshot();
        for entry in entries.iter() {
            if !record.level().is_enabled(entry.min_level) {
                continue;
            }
            entry.writer.write(record).unwrap_or_else(|e| {
                eprint_err(
                    ErrorCode::Write,
                    &format!("writing log line to writer {:?} failed", entry.name),
                    &e,
                );
            });
        }
    }

    /// Flushes all writers; failures are reported on stderr.
    pub fn flush(&self) {
        let entries = self.snapshot();
        for entry in entries.iter() {
            entry.writer.flush().unwrap_or_else(|e| {
                eprint_err(
                    ErrorCode::Flush,
                    &format!("flushing writer {:?} failed", entry.name),
                    &e,
                );
            });
        }
    }
}

impl Default for WriterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WriterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.snapshot();
        f.debug_map()
            .entries(entries.iter().map(|e| (&e.name, e.min_level)))
            .finish()
    }
}

fn default_entry() -> Entry {
    Entry {
        name: DEFAULT_WRITER_NAME.to_string(),
        writer: Arc::new(FormattingWriter::stderr(None)),
        min_level: Level::Trace,
    }
}
