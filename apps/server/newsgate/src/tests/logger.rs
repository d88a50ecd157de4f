// Unit tests for logger module initialization logic
// Tests focus on idempotence and error handling

use crate::error::NewsgateError;
use crate::logger::{LOG_FILE_NAME, initialize, initialize_internal};

use std::path::PathBuf;

use log::LevelFilter;

/// **VALUE**: Verifies that calling initialize() multiple times doesn't panic or fail.
///
/// **WHY THIS MATTERS**: Startup code and tests may both initialize logging. A second
/// call that errors would abort the server during startup.
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are removed,
/// causing fern to fail when trying to set a global logger twice.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A valid temporary directory
    let temp_dir = tempfile::tempdir().unwrap();

    // WHEN: Calling initialize twice
    let result1 = initialize(temp_dir.path(), Some(LevelFilter::Info));
    let result2 = initialize(temp_dir.path(), None);

    // THEN: Both should return Ok (second one logs warning but doesn't error)
    assert!(result1.is_ok(), "First initialization should succeed");
    assert!(
        result2.is_ok(),
        "Second initialization should succeed (idempotent)"
    );
    assert!(temp_dir.path().join(LOG_FILE_NAME).exists());
}

/// **VALUE**: Verifies that an unusable log directory produces a Startup error.
///
/// **WHY THIS MATTERS**: A missing or read-only log directory must stop startup with
/// a clear message instead of a panic.
///
/// **BUG THIS CATCHES**: Would catch if `fern::log_file()` unwraps instead of returning
/// a Result.
#[test]
fn given_invalid_log_dir_when_initializing_dispatch_then_returns_startup_error() {
    // GIVEN: A path that cannot hold a file
    let invalid_dir = PathBuf::from("/dev/null/invalid-path");

    // WHEN: Building the dispatch (fails before touching the global logger)
    let result = initialize_internal(&invalid_dir, LevelFilter::Info);

    // THEN: Startup error, not a panic
    match result {
        Err(NewsgateError::Startup { message, .. }) => {
            assert!(message.contains("Failed to create log file"));
        }
        other => panic!("expected Startup error, got {other:?}"),
    }
}
