use panelkit_domain::config::LoggerConfig;
use panelkit_logger::{LevelFilter, Logger, LoggerError};

#[test]
fn second_install_is_a_subscriber_error() {
    let logger = Logger::builder()
        .name("panelkit-init-twice")
        .level(LevelFilter::INFO)
        .init()
        .expect("first init should succeed");
    assert!(logger.guard().is_none(), "console-only logger holds no file guard");

    let err = Logger::from_config("panelkit-init-twice-second", &LoggerConfig::default())
        .expect_err("second init should fail");

    assert!(matches!(err, LoggerError::Subscriber { .. }), "unexpected error: {err}");
}
