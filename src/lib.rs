//! # proc-run
//!
//! Run a shell command, feed it stdin, and capture its stdout, stderr and
//! exit code in one result.
//!
//! ## Features
//!
//! - **One call**: [`run`] blocks until the child exits and returns a [`RunResult`]
//! - **Deadlock-free stderr**: stderr is captured through an anonymous temporary file
//! - **Explicit failures**: setup failures are errors, I/O hiccups are recorded in the result
//! - **Async entry point**: [`ProcessRunner::run_async`] runs on tokio's blocking pool
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> proc_run::Result<()> {
//!     proc_run::logging::try_init().ok();
//!
//!     let result = proc_run::run("sh -c 'echo err 1>&2; exit 3'", None)?;
//!     assert_eq!(result.exit_code, 3);
//!     assert_eq!(result.stdout, b"");
//!     assert_eq!(result.stderr.as_deref(), Some(&b"err\n"[..]));
//!
//!     Ok(())
//! }
//! ```
//!
//! Commands are passed to the host shell unmodified. Never build them from
//! untrusted input.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod runner;

// Re-export commonly used types
pub use error::{ProcRunError, Result};
pub use runner::{
    run, Invocation, IoFailure, IoStage, ProcessRunner, RunResult, EXIT_CODE_UNAVAILABLE,
};
