//! Command-line interface orchestration for tessera.
//!
//! The `run` command reads a vertex file and a relation file, either as
//! line-oriented text or as Parquet, computes the connected components, and
//! either lists them or writes them to an output file in the same format.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, ParquetArgs, RunCommand, RunOutput, RunSource,
    TextArgs, render_summary, run_cli,
};

#[cfg(test)]
mod test_fixtures;
#[cfg(test)]
mod test_helpers;
