//! Error codes of `modlog`.
//!
//! `modlog` cannot report its own problems through itself. Failures that happen while
//! records are being written are therefore printed directly to `stderr`, and do not
//! reach the code that logged. Each such message carries one of the following codes.
//!
//! ## `Write`
//!
//! Writing a log record to one of the registered writers failed.
//!
//! Example:
//!
//! ```text
//! [modlog][ERRCODE::Write] writing log line to writer "logfile" failed, caused by Os { code: 28, kind: StorageFull, message: "No space left on device" }
//! ```
//!
//! The record is not retried. All other writers have still received it.
//!
//! ## `Flush`
//!
//! Flushing one of the registered writers failed.
//!
//! Example:
//!
//! ```text
//! [modlog][ERRCODE::Flush] flushing writer "default" failed, caused by ...
//! ```
//!
//! ## `Format`
//!
//! The chosen format function had produced an error.
//!
//! Example:
//!
//! ```text
//! [modlog][ERRCODE::Format] formatting failed, caused by ...
//! ```
//!
//! If this happens with one of the format functions provided by `modlog`,
//! please open an issue.
//!
//! ## `Poison`
//!
//! Log records can be written by all threads of your program. Writers thus keep
//! their mutable parts in `Mutex`es. In case that a thread panics while owning
//! one of these locks, the lock is subsequently considered "poisoned".
//!
//! Most likely the root cause for this is some `panic!` in a `Debug` or `Display`
//! implementation of a value that is logged, or in a custom format function.
//! The writer whose lock is poisoned refuses further records.
