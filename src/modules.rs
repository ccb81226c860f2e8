use crate::{Level, LoggersConfig, ModlogError, ROOT_NAME};
use std::{
    collections::HashMap,
    fmt,
    sync::{
        atomic::{AtomicU8, Ordering},
        Arc, Mutex, MutexGuard,
    },
};

/// Level of the root logger if nothing else is configured.
pub const DEFAULT_ROOT_LEVEL: Level = Level::Warning;

// module name of the root logger within the registry
const ROOT_MODULE_NAME: &str = "";

/// A named logger in the hierarchy of a [`ModuleRegistry`].
///
/// Each node carries its own level, which may be [`Level::Unspecified`]; the level
/// that actually applies is found by walking up to the closest ancestor with a
/// concrete level (see [`LoggerNode::effective_level`]).
///
/// Nodes are created by [`ModuleRegistry::get`] and live as long as the registry.
pub struct LoggerNode {
    name: String,
    level: AtomicU8,
    parent: Option<Arc<LoggerNode>>,
    // replaces Unspecified on the root
    fallback: Level,
}

impl LoggerNode {
    fn root(level: Level) -> Self {
        Self {
            name: ROOT_MODULE_NAME.to_string(),
            level: AtomicU8::new(level as u8),
            parent: None,
            fallback: level,
        }
    }

    fn child(name: &str, parent: Arc<LoggerNode>, level: Level) -> Self {
        Self {
            name: name.to_string(),
            level: AtomicU8::new(level as u8),
            parent: Some(parent),
            fallback: Level::Unspecified,
        }
    }

    /// The lowercase, dot-separated name of the logger; empty for the root.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Like [`LoggerNode::name`], but returns [`ROOT_NAME`] for the root.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.is_root() {
            ROOT_NAME
        } else {
            &self.name
        }
    }

    /// Returns `true` for the root logger.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// The parent logger; `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<&Arc<LoggerNode>> {
        self.parent.as_ref()
    }

    /// The level set on this logger itself, which can be [`Level::Unspecified`].
    #[must_use]
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// The level that governs this logger: its own level if that is concrete,
    /// otherwise the effective level of its parent.
    #[must_use]
    pub fn effective_level(&self) -> Level {
        let mut node = self;
        loop {
            let level = node.level();
            if level.is_concrete() {
                return level;
            }
            match node.parent {
                Some(ref parent) => node = parent,
                None => return node.fallback,
            }
        }
    }

    /// Sets the level of this logger.
    ///
    /// [`Level::Unspecified`] makes the logger inherit its parent's level again;
    /// the root logger cannot inherit and falls back to the root level its registry
    /// was created with.
    pub fn set_level(&self, level: Level) {
        let level = if self.is_root() && !level.is_concrete() {
            self.fallback
        } else {
            level
        };
        self.level.store(level as u8, Ordering::Relaxed);
    }

    /// Returns whether records of the given level pass the effective level.
    #[must_use]
    pub fn is_level_enabled(&self, level: Level) -> bool {
        level.is_enabled(self.effective_level())
    }
}

// parents are shown by name only
impl fmt::Debug for LoggerNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerNode")
            .field("name", &self.display_name())
            .field("level", &self.level())
            .field("parent", &self.parent.as_ref().map(|p| p.display_name()))
            .finish()
    }
}

// Releasing the last reference to a deep node would otherwise release its
// ancestors recursively, one stack frame per level.
impl Drop for LoggerNode {
    fn drop(&mut self) {
        let mut o_parent = self.parent.take();
        while let Some(parent) = o_parent {
            o_parent = Arc::into_inner(parent).and_then(|mut node| node.parent.take());
        }
    }
}

/// The hierarchical namespace of loggers.
///
/// Logger names are dot-separated paths (`a.b.c`), compared case-insensitively;
/// `a.b.c` is a child of `a.b`, which is a child of `a`, which is a child of the root.
/// Looking up a name creates the logger and all its missing ancestors.
///
/// A process typically works with one registry, created at start-up and handed to
/// whoever needs it (see [`Context`](crate::Context)); further instances can be
/// created for isolated subsystems or for tests.
///
/// All lookups and structural changes are serialized on a single mutex.
/// Levels of nodes are atomics, so checking the effective level of an already
/// obtained [`LoggerNode`] does not take the lock.
///
/// # Example
///
/// ```rust
/// use modlog::{Level, ModuleRegistry};
///
/// let registry = ModuleRegistry::new(Level::Warning);
/// registry.get("db").set_level(Level::Debug);
/// assert_eq!(registry.get("db.pool").effective_level(), Level::Debug);
/// assert_eq!(registry.get("http").effective_level(), Level::Warning);
/// ```
#[derive(Debug)]
pub struct ModuleRegistry {
    root_level: Level,
    default_level: Level,
    o_modules: Mutex<Option<Modules>>,
}

#[derive(Debug)]
struct Modules {
    default_level: Level,
    all: HashMap<String, Arc<LoggerNode>>,
}

impl ModuleRegistry {
    /// Creates a registry that contains only the root logger, with the given level.
    ///
    /// An `Unspecified` root level is replaced by [`DEFAULT_ROOT_LEVEL`].
    /// Loggers created later start with [`Level::Unspecified`], i.e. they inherit.
    #[must_use]
    pub fn new(root_level: Level) -> Self {
        Self::with_default_level(root_level, Level::Unspecified)
    }

    /// Like [`ModuleRegistry::new`], but newly created loggers start with
    /// `default_level` rather than inheriting.
    #[must_use]
    pub fn with_default_level(root_level: Level, default_level: Level) -> Self {
        let registry = Self {
            root_level: if root_level.is_concrete() {
                root_level
            } else {
                DEFAULT_ROOT_LEVEL
            },
            default_level,
            o_modules: Mutex::new(None),
        };
        drop(registry.lock());
        registry
    }

    /// Creates a registry without allocating anything; the root logger is created
    /// (with [`DEFAULT_ROOT_LEVEL`]) by the first operation.
    ///
    /// Being `const`, this can initialize a `static`.
    #[must_use]
    pub const fn lazy() -> Self {
        Self {
            root_level: DEFAULT_ROOT_LEVEL,
            default_level: Level::Unspecified,
            o_modules: Mutex::new(None),
        }
    }

    /// The level the root logger is reset to.
    #[must_use]
    pub fn root_level(&self) -> Level {
        self.root_level
    }

    /// The level that newly created loggers start with.
    #[must_use]
    pub fn default_level(&self) -> Level {
        self.default_level
    }

    // Locks the modules, and creates the root on first use.
    //
    // A panic while the lock is held cannot leave the map in a broken state
    // (insertions are single operations), so a poisoned lock is just taken over.
    fn lock(&self) -> MutexGuard<'_, Option<Modules>> {
        let mut guard = self
            .o_modules
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if guard.is_none() {
            *guard = Some(Modules::new(self.root_level, self.default_level));
        }
        guard
    }

    fn with_modules<R>(&self, f: impl FnOnce(&mut Modules) -> R) -> R {
        let mut guard = self.lock();
        match guard.as_mut() {
            Some(modules) => f(modules),
            None => unreachable!("initialized by lock()"),
        }
    }

    /// Returns the logger with the given name, creating it and all its missing
    /// ancestors if necessary.
    ///
    /// The name is lowercased; [`ROOT_NAME`] and the empty string denote the root.
    /// Repeated calls with the same name return the same node.
    pub fn get(&self, name: &str) -> Arc<LoggerNode> {
        let name = name.to_lowercase();
        self.with_modules(|modules| modules.resolve(&name))
    }

    /// The root logger.
    #[must_use]
    pub fn root(&self) -> Arc<LoggerNode> {
        self.get(ROOT_MODULE_NAME)
    }

    /// Returns the levels of all loggers that have a concrete level of their own.
    ///
    /// Loggers that inherit are not included. The result is an independent copy.
    #[must_use]
    pub fn snapshot_config(&self) -> LoggersConfig {
        self.with_modules(|modules| {
            modules
                .all
                .values()
                .map(|node| (node.display_name(), node.level()))
                .filter(|(_, level)| level.is_concrete())
                .collect()
        })
    }

    /// Resets the level of every logger: the root gets the root level again,
    /// all others the default level. No logger is removed.
    pub fn reset_all(&self) {
        self.with_modules(|modules| {
            for node in modules.all.values() {
                if node.is_root() {
                    node.set_level(node.fallback);
                } else {
                    node.set_level(modules.default_level);
                }
            }
        });
    }

    /// Sets the levels of the loggers named in the configuration, creating them
    /// if necessary. Loggers not mentioned keep their level.
    pub fn apply(&self, config: &LoggersConfig) {
        self.with_modules(|modules| {
            for (name, level) in config.iter() {
                modules.resolve(name).set_level(level);
            }
        });
    }

    /// Parses the textual configuration and applies it.
    ///
    /// Nothing is applied if any part of the text is malformed.
    ///
    /// # Errors
    ///
    /// [`ModlogError::Config`] if the text is malformed.
    pub fn configure(&self, spec: &str) -> Result<(), ModlogError> {
        let config = LoggersConfig::parse(spec)?;
        self.apply(&config);
        Ok(())
    }

    /// Number of known loggers, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.with_modules(|modules| modules.all.len())
    }

    /// Always `false`, because the root logger always exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_LEVEL)
    }
}

impl Modules {
    fn new(root_level: Level, default_level: Level) -> Self {
        let mut all = HashMap::new();
        all.insert(
            ROOT_MODULE_NAME.to_string(),
            Arc::new(LoggerNode::root(root_level)),
        );
        Self { default_level, all }
    }

    // Must only be called with the registry lock held; never goes through the
    // public, locking entry points.
    fn resolve(&mut self, name: &str) -> Arc<LoggerNode> {
        let name = if name == ROOT_NAME {
            ROOT_MODULE_NAME
        } else {
            name
        };
        // walk up to the closest existing ancestor; the root always exists
        let mut missing = Vec::new();
        let mut current = name;
        let mut node = loop {
            if let Some(node) = self.all.get(current) {
                break Arc::clone(node);
            }
            missing.push(current);
            current = current.rfind('.').map_or(ROOT_MODULE_NAME, |i| &current[..i]);
        };
        for name in missing.into_iter().rev() {
            let child = Arc::new(LoggerNode::child(name, node, self.default_level));
            self.all.insert(name.to_string(), Arc::clone(&child));
            node = child;
        }
        node
    }
}
