
use modlog::{
    detailed_format, Context, Level, LogOptions, DEFAULT_WRITER_NAME, LOGFILE_WRITER_NAME,
    WARNING_WRITER_NAME,
};

#[test]
fn test_quiet_start_with_logfile() {
    let dir = test_utils::dir();
    let path = test_utils::file(&dir, "quiet.log");

    let context = Context::new(Level::Trace);
    LogOptions::new()
        .path(&path)
        .config("noisy=trace")
        .start(&context, std::io::sink())
        .unwrap();

    assert_eq!(
        context.writers().names(),
        vec![LOGFILE_WRITER_NAME, WARNING_WRITER_NAME]
    );
    assert_eq!(context.root().level(), Level::Warning);

    context.get_logger("calm").info(format_args!("not logged"));
    context.get_logger("calm").warning(format_args!("careful"));
    context.get_logger("noisy").trace(format_args!("details"));
    context.writers().flush();

    let lines = test_utils::read_lines(&path);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("careful"));
    assert!(lines[1].ends_with("details"));
}

#[test]
fn test_show_log_with_format() {
    let dir = test_utils::dir();
    let path = test_utils::file(&dir, "shown.log");

    let context = Context::new(Level::Trace);
    LogOptions::new()
        .show_log(true)
        .path(&path)
        .format(detailed_format)
        .start(&context, std::io::sink())
        .unwrap();

    assert_eq!(
        context.writers().names(),
        vec![DEFAULT_WRITER_NAME, LOGFILE_WRITER_NAME]
    );
    assert_eq!(context.root().level(), Level::Info);

    context.get_logger("svc").info(format_args!("started"));
    context.writers().flush();
    let lines = test_utils::read_lines(&path);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with('['));
    assert!(lines[0].contains("] INFO [svc] "));
    assert!(lines[0].ends_with(": started"));
}
