//! CLI entry point for computing connected components.
//!
//! Parses command-line arguments with clap, executes the build, renders the
//! summary to stdout, and maps errors to the process exit code. Logging is
//! initialised first so every later step emits structured diagnostics.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use tessera_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let core = err.downcast_ref::<CliError>().and_then(|cli_error| match cli_error {
            CliError::Core(core) => Some(core),
            _ => None,
        });

        let code_field = core.map(|core| field::display(core.code().as_str()));
        let data_source_code_field = core
            .and_then(|core| core.data_source_code())
            .map(|code| field::display(code.as_str()));
        let sink_code_field = core
            .and_then(|core| core.sink_code())
            .map(|code| field::display(code.as_str()));

        error!(
            error = %format_args!("{err:#}"),
            code = code_field,
            data_source_code = data_source_code_field,
            sink_code = sink_code_field,
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
