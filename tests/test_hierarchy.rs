
use modlog::{Level, LoggersConfig, ROOT_NAME};

#[test]
fn test_inherited_levels() {
    let (context, recorder) = test_utils::recording_context(Level::Warning);

    let app = context.get_logger("app");
    let db = context.get_logger("app.db");
    let pool = context.get_logger("app.db.pool");

    app.info(format_args!("app info, suppressed"));
    pool.warning(format_args!("pool warning"));

    context.configure("app=info").unwrap();
    assert_eq!(pool.effective_level(), Level::Info);
    pool.info(format_args!("pool info"));

    db.set_level(Level::Error);
    pool.warning(format_args!("pool warning, suppressed"));
    app.warning(format_args!("app warning"));

    db.set_level(Level::Unspecified);
    pool.info(format_args!("pool info again"));

    assert_eq!(
        test_utils::messages(&recorder),
        vec!["pool warning", "pool info", "app warning", "pool info again"]
    );
}

#[test]
fn test_names_are_case_insensitive() {
    let (context, _recorder) = test_utils::recording_context(Level::Warning);
    context.get_logger("Net.HTTP").set_level(Level::Trace);
    assert_eq!(context.get_logger("net.http").level(), Level::Trace);
    assert_eq!(context.get_logger("NET.http").name(), "net.http");
    assert_eq!(context.config().to_string(), "<root>=WARNING;net.http=TRACE");
}

#[test]
fn test_config_roundtrip() {
    let (context, _recorder) = test_utils::recording_context(Level::Warning);
    context
        .configure("<root>=error, a.b = debug; c=warn; d=unspecified")
        .unwrap();

    let config = context.config();
    assert_eq!(config.to_string(), "<root>=ERROR;a.b=DEBUG;c=WARNING");
    assert_eq!(config.get("d"), None);

    let (other, _) = test_utils::recording_context(Level::Trace);
    other.modules().apply(&config);
    assert_eq!(other.config(), config);
}

#[test]
fn test_bad_config_changes_nothing() {
    let (context, _recorder) = test_utils::recording_context(Level::Warning);
    context.configure("a=info").unwrap();
    assert!(context.configure("b=debug; c").is_err());
    assert!(context.configure("b=debug; c=chatty").is_err());
    assert!(context.configure("b=debug; =info").is_err());
    assert_eq!(context.config().to_string(), "<root>=WARNING;a=INFO");
}

#[test]
fn test_single_level_configures_root() {
    let config = LoggersConfig::parse("debug").unwrap();
    assert_eq!(config.get(ROOT_NAME), Some(Level::Debug));
    assert_eq!(config.len(), 1);

    let (context, recorder) = test_utils::recording_context(Level::Warning);
    context.modules().apply(&config);
    context.get_logger("any.thing").debug(format_args!("visible"));
    assert_eq!(test_utils::messages(&recorder), vec!["visible"]);
}

#[test]
fn test_reset() {
    let (context, recorder) = test_utils::recording_context(Level::Info);
    context.configure("<root>=trace;x=critical").unwrap();
    context.reset_logger_levels();

    let x = context.get_logger("x");
    assert_eq!(x.level(), Level::Unspecified);
    x.debug(format_args!("suppressed"));
    x.info(format_args!("visible"));
    assert_eq!(test_utils::messages(&recorder), vec!["visible"]);
}

#[test]
fn test_root_cannot_become_unspecified() {
    let (context, _recorder) = test_utils::recording_context(Level::Error);
    context.root().set_level(Level::Unspecified);
    assert_eq!(context.root().level(), Level::Error);
    context.configure("<root>=unspecified").unwrap();
    assert_eq!(context.get_logger("a.b").effective_level(), Level::Error);
}
