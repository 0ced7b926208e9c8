//! Run result types.

use std::fmt;

/// Exit code reported when no real exit code could be obtained.
///
/// Out of the 0..=255 range a POSIX process can return.
pub const EXIT_CODE_UNAVAILABLE: i32 = 32767;

/// Step of a run at which an I/O operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoStage {
    /// Writing the input payload to the child's stdin.
    WriteStdin,
    /// Draining the child's stdout.
    ReadStdout,
    /// Waiting for the child to terminate.
    Wait,
    /// Reading back the stderr capture file.
    ReadStderr,
}

impl IoStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WriteStdin => "write_stdin",
            Self::ReadStdout => "read_stdout",
            Self::Wait => "wait",
            Self::ReadStderr => "read_stderr",
        }
    }
}

impl fmt::Display for IoStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An I/O failure that happened after the child was started.
///
/// These do not abort the run; the runner records the first one and keeps
/// going so the child is always waited on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoFailure {
    /// Where it happened.
    pub stage: IoStage,
    /// OS error kind.
    pub kind: std::io::ErrorKind,
    /// Human-readable message.
    pub message: String,
}

impl IoFailure {
    pub fn new(stage: IoStage, err: &std::io::Error) -> Self {
        Self {
            stage,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for IoFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.stage, self.message)
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// Exit code of the child, or [`EXIT_CODE_UNAVAILABLE`].
    pub exit_code: i32,
    /// Everything the child wrote to stdout.
    pub stdout: Vec<u8>,
    /// Everything the child wrote to stderr; `None` when it wrote nothing.
    pub stderr: Option<Vec<u8>>,
    /// Signal that terminated the child, if any (Unix only).
    pub signal: Option<i32>,
    /// First I/O failure encountered after spawning, if any.
    pub io_error: Option<IoFailure>,
}

impl RunResult {
    /// Create a result with the given exit code and stdout.
    pub fn new(exit_code: i32, stdout: Vec<u8>) -> Self {
        Self {
            exit_code,
            stdout,
            stderr: None,
            signal: None,
            io_error: None,
        }
    }

    /// Set the captured stderr. Empty captures are stored as `None`.
    pub fn with_stderr(mut self, stderr: Vec<u8>) -> Self {
        self.stderr = (!stderr.is_empty()).then_some(stderr);
        self
    }

    /// Record the terminating signal.
    pub fn with_signal(mut self, signal: i32) -> Self {
        self.signal = Some(signal);
        self
    }

    /// Record an I/O failure.
    pub fn with_io_error(mut self, failure: IoFailure) -> Self {
        self.io_error = Some(failure);
        self
    }

    /// Whether a real exit code was obtained.
    pub fn has_exit_code(&self) -> bool {
        self.exit_code != EXIT_CODE_UNAVAILABLE
    }

    /// Exit code 0 and no recorded I/O failure.
    pub fn success(&self) -> bool {
        self.exit_code == 0 && self.io_error.is_none()
    }

    /// Nonzero or missing exit code, or an I/O failure.
    pub fn failed(&self) -> bool {
        !self.success()
    }

    /// Stdout decoded as UTF-8, lossily.
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Stderr decoded as UTF-8, lossily.
    pub fn stderr_lossy(&self) -> Option<String> {
        self.stderr
            .as_deref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

impl Default for RunResult {
    fn default() -> Self {
        Self::new(EXIT_CODE_UNAVAILABLE, Vec::new())
    }
}
