//! Process runner.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::process::{Child, Command, ExitStatus, Stdio};

use tracing::{debug, warn};

use super::invocation::Invocation;
use super::result::{IoFailure, IoStage, RunResult, EXIT_CODE_UNAVAILABLE};
use crate::error::ProcRunError;
use crate::Result;

/// Shell used to interpret command lines.
#[cfg(not(windows))]
pub const DEFAULT_SHELL: &str = "/bin/sh";
#[cfg(windows)]
pub const DEFAULT_SHELL: &str = "cmd";

/// Flag that makes [`DEFAULT_SHELL`] run its next argument as a command line.
#[cfg(not(windows))]
pub const DEFAULT_SHELL_FLAG: &str = "-c";
#[cfg(windows)]
pub const DEFAULT_SHELL_FLAG: &str = "/C";

/// Runs command lines through the host shell and captures their output.
///
/// Each run is straight-line and blocking:
///
/// 1. stdin is written in full and closed,
/// 2. stdout is drained to EOF,
/// 3. the child is waited on,
/// 4. stderr is read back from an anonymous temporary file.
///
/// Stderr goes to a file rather than a pipe so a child producing lots of
/// stderr can never block on it. Stdout and stdin are not multiplexed: a
/// child that fills its stdout pipe before reading a large input payload
/// will deadlock the run.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    shell: String,
    shell_flag: String,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRunner {
    /// Create a runner using the platform shell.
    pub fn new() -> Self {
        Self {
            shell: DEFAULT_SHELL.to_string(),
            shell_flag: DEFAULT_SHELL_FLAG.to_string(),
        }
    }

    /// Use a different shell executable.
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    /// Use a different command flag for the shell.
    pub fn with_shell_flag(mut self, flag: impl Into<String>) -> Self {
        self.shell_flag = flag.into();
        self
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }

    pub fn shell_flag(&self) -> &str {
        &self.shell_flag
    }

    /// Run `command`, optionally feeding `input` to its stdin.
    pub fn run(&self, command: &str, input: Option<&[u8]>) -> Result<RunResult> {
        let invocation = Invocation::new(command).maybe_input(input.map(<[u8]>::to_vec));
        self.run_invocation(&invocation)
    }

    /// Run an invocation to completion.
    ///
    /// Returns an error only when the capture file cannot be created or the
    /// child cannot be started. Later I/O failures are recorded in
    /// [`RunResult::io_error`].
    pub fn run_invocation(&self, invocation: &Invocation) -> Result<RunResult> {
        // Dropping the file deletes it, so every return path releases it.
        let mut capture = tempfile::tempfile().map_err(ProcRunError::TempStore)?;
        let stderr_sink = capture.try_clone().map_err(ProcRunError::TempStore)?;

        let mut child = self.spawn(&invocation.command, stderr_sink)?;
        debug!(pid = child.id(), command = %invocation.command, "process started");

        let mut io_error = None;

        if let Some(mut stdin) = child.stdin.take() {
            if let Some(bytes) = invocation.input_bytes() {
                match stdin.write_all(bytes).and_then(|()| stdin.flush()) {
                    Ok(()) => debug!(bytes = bytes.len(), "input written"),
                    // The child closed stdin without reading everything.
                    Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                        debug!("child closed stdin early")
                    }
                    Err(err) => record(&mut io_error, IoStage::WriteStdin, &err),
                }
            }
        }

        let mut stdout = Vec::new();
        if let Some(mut pipe) = child.stdout.take() {
            if let Err(err) = pipe.read_to_end(&mut stdout) {
                record(&mut io_error, IoStage::ReadStdout, &err);
            }
        }
        debug!(bytes = stdout.len(), "stdout drained");

        let (exit_code, signal) = match child.wait() {
            Ok(status) => {
                debug!(%status, "process exited");
                (status.code().unwrap_or(EXIT_CODE_UNAVAILABLE), exit_signal(&status))
            }
            Err(err) => {
                record(&mut io_error, IoStage::Wait, &err);
                (EXIT_CODE_UNAVAILABLE, None)
            }
        };

        let stderr = match read_capture(&mut capture) {
            Ok(bytes) => bytes,
            Err(err) => {
                record(&mut io_error, IoStage::ReadStderr, &err);
                Vec::new()
            }
        };
        drop(capture);

        let mut result = RunResult::new(exit_code, stdout).with_stderr(stderr);
        if let Some(signal) = signal {
            result = result.with_signal(signal);
        }
        if let Some(failure) = io_error {
            result = result.with_io_error(failure);
        }

        Ok(result)
    }

    /// Run an invocation on tokio's blocking pool.
    ///
    /// Same semantics as [`ProcessRunner::run_invocation`].
    pub async fn run_async(&self, invocation: Invocation) -> Result<RunResult> {
        let runner = self.clone();
        tokio::task::spawn_blocking(move || runner.run_invocation(&invocation))
            .await
            .map_err(|e| ProcRunError::Join(e.to_string()))?
    }

    fn spawn(&self, command_line: &str, stderr: File) -> Result<Child> {
        let mut command = Command::new(&self.shell);
        command.arg(&self.shell_flag);
        add_command_line(&mut command, command_line);

        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::from(stderr))
            .spawn()
            .map_err(|source| ProcRunError::Spawn {
                command: command_line.to_string(),
                source,
            })
    }
}

/// Run `command` with the platform shell.
///
/// # Example
///
/// ```no_run
/// let result = proc_run::run("printf hello", None).unwrap();
/// assert_eq!(result.stdout, b"hello");
/// assert!(result.stderr.is_none());
/// ```
pub fn run(command: &str, input: Option<&[u8]>) -> Result<RunResult> {
    ProcessRunner::new().run(command, input)
}

fn record(slot: &mut Option<IoFailure>, stage: IoStage, err: &io::Error) {
    warn!(%stage, error = %err, "I/O failure while running process");
    if slot.is_none() {
        *slot = Some(IoFailure::new(stage, err));
    }
}

fn read_capture(capture: &mut File) -> io::Result<Vec<u8>> {
    capture.seek(SeekFrom::Start(0))?;
    let mut bytes = Vec::new();
    capture.read_to_end(&mut bytes)?;
    Ok(bytes)
}

#[cfg(windows)]
fn add_command_line(command: &mut Command, command_line: &str) {
    use std::os::windows::process::CommandExt;
    // cmd.exe does its own parsing; quoting it again would change the meaning.
    command.raw_arg(command_line);
}

#[cfg(not(windows))]
fn add_command_line(command: &mut Command, command_line: &str) {
    command.arg(command_line);
}

#[cfg(unix)]
fn exit_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn exit_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_defaults() {
        let runner = ProcessRunner::new();
        assert_eq!(runner.shell(), DEFAULT_SHELL);
        assert_eq!(runner.shell_flag(), DEFAULT_SHELL_FLAG);
    }

    #[test]
    fn test_runner_builder() {
        let runner = ProcessRunner::new().with_shell("/bin/bash").with_shell_flag("-lc");
        assert_eq!(runner.shell(), "/bin/bash");
        assert_eq!(runner.shell_flag(), "-lc");
    }

    #[test]
    fn test_missing_shell_is_spawn_error() {
        let runner = ProcessRunner::new().with_shell("/definitely/not/a/shell-7f3a");
        let err = runner.run("echo hi", None).unwrap_err();
        assert!(matches!(err, ProcRunError::Spawn { ref command, .. } if command == "echo hi"));
    }

    // Real runs cannot be made to fail on WriteStdin, ReadStdout or
    // ReadStderr from a test, so those paths are exercised through
    // `record` and `read_capture` directly.
    #[test]
    fn test_record_keeps_first_failure() {
        let mut slot = None;
        let first = io::Error::new(io::ErrorKind::Other, "first");
        let second = io::Error::new(io::ErrorKind::Other, "second");
        record(&mut slot, IoStage::ReadStdout, &first);
        record(&mut slot, IoStage::ReadStderr, &second);

        let failure = slot.unwrap();
        assert_eq!(failure.stage, IoStage::ReadStdout);
        assert_eq!(failure.message, "first");
    }

    #[test]
    fn test_read_capture_rewinds() {
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(b"captured").unwrap();
        assert_eq!(read_capture(&mut file).unwrap(), b"captured");
    }

    #[cfg(unix)]
    #[test]
    fn test_printf_hello() {
        let result = run("printf hello", None).unwrap();
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout, b"hello");
        assert!(result.stderr.is_none());
        assert!(result.io_error.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_signal_gives_sentinel() {
        let result = run("kill -9 $$", None).unwrap();
        assert_eq!(result.exit_code, EXIT_CODE_UNAVAILABLE);
        assert_eq!(result.signal, Some(9));
        assert!(!result.has_exit_code());
    }
}
