use crate::{formats::FormatFunction, Record};
use std::{cell::RefCell, io::Write};

// Reasons for the messages that modlog prints to stderr about its own problems.
// See module error_info for the documentation.
#[derive(Copy, Clone, Debug)]
pub(crate) enum ErrorCode {
    Write,
    Flush,
    Format,
    Poison,
}
impl ErrorCode {
    fn as_index(self) -> &'static str {
        match self {
            Self::Write => "write",
            Self::Flush => "flush",
            Self::Format => "format",
            Self::Poison => "poison",
        }
    }
}

// A broken log sink must not break the program that logs, so problems with
// writing are reported here and otherwise swallowed.
pub(crate) fn eprint_err(error_code: ErrorCode, msg: &str, err: &dyn std::error::Error) {
    let s = format!(
        "[modlog][ERRCODE::{code:?}] {msg}, caused by {err:?}\n    \
         See https://docs.rs/modlog/latest/modlog/error_info/index.html#{code_lc}",
        code = error_code,
        msg = msg,
        err = err,
        code_lc = error_code.as_index(),
    );
    try_to_write(&s);
}

fn try_to_write(s: &str) {
    let w = std::io::stderr();
    let mut wl = w.lock();
    // if stderr is broken as well, there is nothing left to report to
    writeln!(wl, "{s}").ok();
}

pub(crate) fn io_err(s: &'static str) -> std::io::Error {
    std::io::Error::other(s)
}

// Thread-local buffer
pub(crate) fn buffer_with<F>(f: F)
where
    F: FnOnce(&RefCell<Vec<u8>>),
{
    thread_local! {
        static BUFFER: RefCell<Vec<u8>> = RefCell::new(Vec::with_capacity(200));
    }
    BUFFER.with(f);
}

// Use the thread-local buffer for formatting before writing into the given writer,
// so that each log line reaches the writer with a single write_all.
pub(crate) fn write_buffered(
    format_function: FormatFunction,
    record: &Record,
    w: &mut dyn Write,
) -> Result<(), std::io::Error> {
    let mut result: Result<(), std::io::Error> = Ok(());

    buffer_with(|tl_buf| match tl_buf.try_borrow_mut() {
        Ok(mut buffer) => {
            (format_function)(&mut *buffer, record)
                .unwrap_or_else(|e| eprint_err(ErrorCode::Format, "formatting failed", &e));
            buffer
                .write_all(b"\n")
                .unwrap_or_else(|e| eprint_err(ErrorCode::Format, "formatting failed", &e));

            result = w.write_all(&buffer);
            buffer.clear();
        }
        Err(_e) => {
            // We arrive here in the rare cases of recursive logging
            // (e.g. log calls in Debug or Display implementations)
            let mut tmp_buf = Vec::<u8>::with_capacity(200);
            (format_function)(&mut tmp_buf, record)
                .unwrap_or_else(|e| eprint_err(ErrorCode::Format, "formatting failed", &e));
            tmp_buf
                .write_all(b"\n")
                .unwrap_or_else(|e| eprint_err(ErrorCode::Format, "formatting failed", &e));

            result = w.write_all(&tmp_buf);
        }
    });
    result
}
