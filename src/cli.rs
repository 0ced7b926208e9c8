//! Command-line interface for proc-run.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Command line to run. Positional words are joined with spaces.
    pub command: Option<String>,
    /// Literal stdin payload.
    pub input: Option<String>,
    /// Forward this process's own stdin to the child.
    pub stdin: bool,
    /// Shell executable (overrides config file).
    pub shell: Option<String>,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Pretty-print the JSON report.
    pub pretty: bool,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut words: Vec<String> = Vec::new();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('i') | Long("input") => {
                result.input = Some(parser.value()?.parse()?);
            }
            Long("stdin") => {
                result.stdin = true;
            }
            Short('s') | Long("shell") => {
                let value: String = parser.value()?.parse()?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidValue("shell", value));
                }
                result.shell = Some(value);
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Long("pretty") => {
                result.pretty = true;
            }
            Value(val) => {
                words.push(val.string()?);
                // Everything after the first word belongs to the command.
                for rest in parser.raw_args()? {
                    words.push(rest.into_string().map_err(lexopt::Error::NonUnicodeValue)?);
                }
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    if result.input.is_some() && result.stdin {
        return Err(ArgsError::Conflict("--input", "--stdin"));
    }

    if !words.is_empty() {
        result.command = Some(words.join(" "));
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"proc-run {version}
Run a shell command and report its stdout, stderr and exit code as JSON

USAGE:
    proc-run [OPTIONS] <COMMAND>...

OPTIONS:
    -i, --input <TEXT>      Send TEXT to the command's stdin
        --stdin             Forward this process's stdin to the command
    -s, --shell <PATH>      Shell that interprets the command
    -c, --config <FILE>     Path to configuration file (JSON)
    -l, --log-level <LVL>   Log level (error, warn, info, debug, trace)
        --pretty            Pretty-print the JSON report
    -h, --help              Print help
    -V, --version           Print version

ENVIRONMENT VARIABLES:
    PROC_RUN_SHELL          Shell executable (overrides config)
    PROC_RUN_LOG_LEVEL      Log level (overrides config)
    RUST_LOG                Alternative log level setting

EXIT STATUS:
    0   the command ran (its own exit code is in the report)
    1   the command could not be run
    2   invalid arguments or configuration

EXAMPLES:
    proc-run printf hello
    proc-run -i abc cat
    echo data | proc-run --stdin 'tr a-z A-Z'

Commands are interpreted by the shell. Do not pass untrusted input.
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("proc-run {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
    /// Two options that cannot be combined.
    Conflict(&'static str, &'static str),
    /// No command was given.
    MissingCommand,
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for --{}: '{}'", name, value)
            }
            Self::Conflict(a, b) => write!(f, "{} cannot be used with {}", a, b),
            Self::MissingCommand => write!(f, "missing command to run"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
