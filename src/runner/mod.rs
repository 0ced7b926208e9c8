//! Process runner.
//!
//! Runs one command line through the host shell, feeds it optional stdin,
//! and returns everything it wrote together with its exit code.
//!
//! # Example
//!
//! ```no_run
//! use proc_run::runner::{Invocation, ProcessRunner};
//!
//! let runner = ProcessRunner::new();
//! let result = runner
//!     .run_invocation(&Invocation::new("cat").input("abc"))
//!     .unwrap();
//! assert_eq!(result.stdout, b"abc");
//! ```
//!
//! Commands are interpreted by the shell. Never build them from untrusted
//! input.

mod executor;
mod invocation;
mod result;

pub use executor::{run, ProcessRunner, DEFAULT_SHELL, DEFAULT_SHELL_FLAG};
pub use invocation::Invocation;
pub use result::{IoFailure, IoStage, RunResult, EXIT_CODE_UNAVAILABLE};
