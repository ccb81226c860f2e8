// only enables the `doc_cfg` feature when the `docsrs` configuration attribute is defined
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! A module-oriented logger.
//!
//! Loggers are named with dot-separated, case-insensitive names like `net.http.client`,
//! and form a hierarchy: `net.http` is the parent of `net.http.client`, and the
//! unnamed root logger is the ancestor of all loggers.
//! Each logger can have its own severity level; a logger without a level of its own
//! uses the level of its closest ancestor that has one.
//! Levels can be changed at any time, also while other threads are logging,
//! and a textual configuration like `<root>=WARNING; db=DEBUG` can be applied at once.
//!
//! Records that pass the level check of their logger are handed to all writers in a
//! [`WriterRegistry`]. Each writer is registered under a name and with a minimum level.
//! The module [`writers`] contains writers for output streams and files, and writers
//! that filter, combine and split records.
//!
//! # Example
//!
//! ```rust
//! use modlog::{writers::FormattingWriter, Context, Level};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), modlog::ModlogError> {
//! let context = Context::new(Level::Warning);
//! context.configure("db=debug")?;
//! context.writers().register(
//!     "logfile",
//!     Arc::new(FormattingWriter::append_to_file("app.log", None)?),
//!     Level::Trace,
//! )?;
//!
//! let logger = context.get_logger("db.pool");
//! logger.debug(format_args!("opening {} connections", 4));
//! # Ok(())
//! # }
//! ```
//!
//! Code that uses the macros of the [`log`](https://docs.rs/log) crate can be routed
//! into a context with [`Context::install_log_bridge`].
//!
//! See also
//!
//! * [`LoggersConfig`] for the syntax of the textual configuration,
//! * [`LogOptions`] for a ready-made setup of command line programs,
//! * module [`error_info`] for the messages `modlog` prints about its own problems.

mod config;
mod context;
mod formats;
mod level;
mod log_bridge;
mod log_options;
mod logger;
mod modlog_error;
mod modules;
mod record;
mod util;
mod writer_registry;

pub mod error_info;
pub mod writers;

pub use crate::config::LoggersConfig;
pub use crate::context::Context;
pub use crate::formats::*;
pub use crate::level::Level;
pub use crate::log_bridge::LogBridge;
pub use crate::log_options::{LogOptions, LOGFILE_WRITER_NAME, WARNING_WRITER_NAME};
pub use crate::logger::Logger;
pub use crate::modlog_error::{ConfigError, ModlogError};
pub use crate::modules::{LoggerNode, ModuleRegistry, DEFAULT_ROOT_LEVEL};
pub use crate::record::Record;
pub use crate::writer_registry::{WriterRegistry, DEFAULT_WRITER_NAME};

/// Name of the root logger in configurations and records.
///
/// The empty name is accepted as well wherever a logger name is expected.
pub const ROOT_NAME: &str = "<root>";
