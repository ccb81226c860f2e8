use thiserror::Error;

/// Describes errors in the configuration and setup of `modlog`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ModlogError {
    /// A writer with this name is already registered.
    #[error("writer {0:?} is already registered")]
    DuplicateWriter(String),

    /// No writer with this name is registered.
    #[error("writer {0:?} is not registered")]
    WriterNotFound(String),

    /// The textual logger configuration is malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An output destination could not be opened or written.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Installing the bridge for the `log` crate failed, because another logger is
    /// already installed.
    #[error(transparent)]
    Log(#[from] log::SetLoggerError),

    /// The logger configuration file cannot be parsed.
    #[cfg(feature = "specfile")]
    #[cfg_attr(docsrs, doc(cfg(feature = "specfile")))]
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// The logger configuration cannot be serialized.
    #[cfg(feature = "specfile")]
    #[cfg_attr(docsrs, doc(cfg(feature = "specfile")))]
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}

/// Describes what is wrong with a textual logger configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An entry is not of the form `name=level`.
    #[error("logger configuration expected '=', found {0:?}")]
    MissingEquals(String),

    /// An entry has an empty name or an empty level.
    #[error("logger configuration entry {0:?} has blank name or level")]
    BlankNameOrLevel(String),

    /// The level token is not known.
    #[error("unknown severity level {0:?}")]
    UnknownLevel(String),
}
