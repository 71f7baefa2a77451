//! Small helpers shared across CLI tests.

use std::path::PathBuf;

use tempfile::TempDir;

use super::commands::run_command;
use super::{CliError, ExecutionSummary, RunCommand, RunOutput, RunSource, TextArgs};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn text_command(vertices: PathBuf, relations: PathBuf) -> RunCommand {
    RunCommand {
        allow_duplicates: false,
        output: None,
        source: RunSource::Text(TextArgs {
            vertices,
            relations,
            name: None,
        }),
    }
}

pub(super) fn run_command_expecting_error(cmd: RunCommand, panic_msg: &str) -> CliError {
    match run_command(cmd) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

/// Returns the inline components of `summary` as raw id lists.
pub(super) fn inline_components(summary: &ExecutionSummary) -> Vec<Vec<i64>> {
    match &summary.output {
        RunOutput::Inline(components) => components
            .iter()
            .map(|component| component.members().iter().map(|id| id.get()).collect())
            .collect(),
        RunOutput::Written { path, .. } => {
            panic!("expected inline components, found output at {}", path.display())
        }
    }
}
