use notes_ai_proxy::setup_logging;

#[test]
fn test_logging_setup() {
    // This test verifies that the logging setup function doesn't panic
    let result = std::panic::catch_unwind(|| {
        setup_logging();
    });

    assert!(result.is_ok(), "setup_logging function should not panic");
}

#[test]
fn test_logging_setup_is_idempotent() {
    // Warm Lambda containers may call this again; a second global
    // subscriber must not abort the process.
    setup_logging();
    setup_logging();
}
