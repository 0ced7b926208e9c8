//! Capture-file failure tests.
//!
//! Kept in their own test binary because they change `TMPDIR` for the
//! whole process.

#![cfg(unix)]

use proc_run::{run, ProcRunError};

#[test]
fn test_missing_temp_dir_is_call_failure() {
    std::env::set_var("TMPDIR", "/nonexistent/proc-run-tmp");

    let result = run("printf hi", None);

    std::env::remove_var("TMPDIR");

    let err = result.unwrap_err();
    assert!(matches!(err, ProcRunError::TempStore(_)));
    assert_eq!(err.code(), "TEMP_STORE_FAILED");
}
