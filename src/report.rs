//! JSON report types.

use serde::Serialize;

use crate::error::ProcRunError;
use crate::runner::RunResult;

/// Serializable view of a [`RunResult`].
///
/// Byte streams are decoded as lossy UTF-8.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Exit code, or the unavailable sentinel.
    pub exit_code: i32,
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr; omitted when the child wrote nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    /// Terminating signal (Unix).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<i32>,
    /// I/O failure recorded during the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub io_error: Option<IoErrorReport>,
}

/// Serializable view of an I/O failure.
#[derive(Debug, Clone, Serialize)]
pub struct IoErrorReport {
    pub stage: &'static str,
    pub message: String,
}

impl RunReport {
    pub fn from_result(result: &RunResult) -> Self {
        Self {
            exit_code: result.exit_code,
            stdout: result.stdout_lossy(),
            stderr: result.stderr_lossy(),
            signal: result.signal,
            io_error: result.io_error.as_ref().map(|failure| IoErrorReport {
                stage: failure.stage.as_str(),
                message: failure.message.clone(),
            }),
        }
    }
}

/// Report for a call that could not complete.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    /// Error code (e.g., "SPAWN_FAILED").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorReport {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn from_error(err: &ProcRunError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{IoFailure, IoStage};
    use serde_json::json;

    #[test]
    fn test_report_omits_absent_stderr() {
        let result = RunResult::new(0, b"hello".to_vec());
        let value = serde_json::to_value(RunReport::from_result(&result)).unwrap();
        assert_eq!(value, json!({"exit_code": 0, "stdout": "hello"}));
    }

    #[test]
    fn test_report_includes_stderr() {
        let result = RunResult::new(3, Vec::new()).with_stderr(b"err\n".to_vec());
        let value = serde_json::to_value(RunReport::from_result(&result)).unwrap();
        assert_eq!(value["exit_code"], 3);
        assert_eq!(value["stdout"], "");
        assert_eq!(value["stderr"], "err\n");
    }

    #[test]
    fn test_report_io_error() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let result =
            RunResult::new(0, Vec::new()).with_io_error(IoFailure::new(IoStage::ReadStderr, &err));
        let value = serde_json::to_value(RunReport::from_result(&result)).unwrap();
        assert_eq!(value["io_error"]["stage"], "read_stderr");
        assert_eq!(value["io_error"]["message"], "boom");
    }

    #[test]
    fn test_error_report_from_error() {
        let err = ProcRunError::Join("cancelled".into());
        let report = ErrorReport::from_error(&err);
        assert_eq!(report.code, "JOIN_FAILED");
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"code\":\"JOIN_FAILED\""));
    }
}
