//! Contains the trait [`LogWriter`] for the outputs of `modlog`,
//! and the concrete implementations that come with it.
//!
//! Leaf writers produce output:
//!
//! * [`FormattingWriter`] writes one formatted line per record to any byte stream,
//!   e.g. stderr, stdout, or a file opened in append mode,
//! * [`TestWriter`] keeps the records in memory for inspection,
//! * [`DiscardWriter`] drops everything.
//!
//! Composing writers wrap other writers:
//!
//! * [`MinLevelWriter`] drops records below a floor,
//! * [`TeeWriter`] writes to several writers in order,
//! * [`ModuleFilterWriter`] lets only the records of one logger through,
//! * [`StdioSplitWriter`] sends warnings and errors to one writer, everything else to
//!   another,
//! * `TextFilterWriter` (with feature `textfilter`) filters on the message text.
//!
//! Writers are registered with a [`WriterRegistry`](crate::WriterRegistry)
//! under a name, together with a minimum level.
//!
//! # Example
//!
//! ```rust
//! use modlog::{
//!     writers::{FormattingWriter, LogWriter, MinLevelWriter, StdioSplitWriter, TeeWriter},
//!     Level, WriterRegistry,
//! };
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), modlog::ModlogError> {
//! let registry = WriterRegistry::empty();
//! let alerts: Arc<dyn LogWriter> = Arc::new(MinLevelWriter::new(
//!     FormattingWriter::append_to_file("alerts.log", None)?,
//!     Level::Error,
//! ));
//! let console: Arc<dyn LogWriter> = Arc::new(StdioSplitWriter::std(None));
//! registry.register("main", Arc::new(TeeWriter::new(vec![alerts, console])), Level::Info)?;
//! # Ok(())
//! # }
//! ```

mod discard_writer;
mod formatting_writer;
mod log_writer;
mod min_level_writer;
mod module_filter_writer;
mod stdio_split_writer;
mod tee_writer;
mod test_writer;
#[cfg(feature = "textfilter")]
#[cfg_attr(docsrs, doc(cfg(feature = "textfilter")))]
mod text_filter_writer;

pub use self::discard_writer::DiscardWriter;
pub use self::formatting_writer::FormattingWriter;
pub use self::log_writer::LogWriter;
pub use self::min_level_writer::MinLevelWriter;
pub use self::module_filter_writer::ModuleFilterWriter;
pub use self::stdio_split_writer::StdioSplitWriter;
pub use self::tee_writer::TeeWriter;
pub use self::test_writer::TestWriter;
#[cfg(feature = "textfilter")]
#[cfg_attr(docsrs, doc(cfg(feature = "textfilter")))]
pub use self::text_filter_writer::TextFilterWriter;
