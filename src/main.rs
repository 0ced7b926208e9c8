//! proc-run binary entry point.

use std::io::Read;
use std::process::ExitCode;

use proc_run::cli::{self, Args, ArgsError};
use proc_run::config::Config;
use proc_run::report::{ErrorReport, RunReport};
use proc_run::{logging, Invocation};
use serde::Serialize;
use tracing::{debug, error};

const EXIT_RUN_FAILED: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => return usage_error(&e),
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => return usage_error(&e),
    };

    // Ignore failure if a subscriber is already set
    let _ = logging::try_init_with_filter(config.log_filter());

    let Some(command) = args.command.clone() else {
        return usage_error(&ArgsError::MissingCommand);
    };

    let input = match read_input(&args) {
        Ok(input) => input,
        Err(e) => {
            error!(error = %e, "failed to read stdin");
            return ExitCode::from(EXIT_RUN_FAILED);
        }
    };

    let runner = config.to_runner();
    debug!(shell = runner.shell(), %command, "running command");

    match runner.run_async(Invocation::new(command).maybe_input(input)).await {
        Ok(result) => {
            print_json(&RunReport::from_result(&result), args.pretty);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "command could not be run");
            print_json(&ErrorReport::from_error(&e), args.pretty);
            ExitCode::from(EXIT_RUN_FAILED)
        }
    }
}

fn read_input(args: &Args) -> std::io::Result<Option<Vec<u8>>> {
    if args.stdin {
        let mut buf = Vec::new();
        std::io::stdin().lock().read_to_end(&mut buf)?;
        return Ok(Some(buf));
    }
    Ok(args.input.as_ref().map(|text| text.clone().into_bytes()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match rendered {
        Ok(json) => println!("{}", json),
        Err(e) => error!(error = %e, "failed to serialize report"),
    }
}

fn usage_error(e: &dyn std::error::Error) -> ExitCode {
    eprintln!("error: {}", e);
    eprintln!("Try 'proc-run --help' for more information.");
    ExitCode::from(EXIT_USAGE)
}
