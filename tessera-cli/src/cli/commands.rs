//! Command implementations and argument parsing for the tessera CLI.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tessera_core::{
    BuildStats, Component, ComponentSink, DuplicatePolicy, PersistSummary, RelationSource,
    Tessera, TesseraBuilder, TesseraError, VertexSource, persist,
};
use tessera_providers_parquet::{
    DEFAULT_COMPONENT_COLUMN, DEFAULT_ID_COLUMN, DEFAULT_RELATED_COLUMN, DEFAULT_SOURCE_COLUMN,
    ParquetComponentSink, ParquetProviderError, ParquetRelationSource, ParquetVertexSource,
};
use tessera_providers_text::{TextComponentSink, TextRelationSource, TextVertexSource};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DERIVED_NAME: &str = "<derived>";
const STDOUT_LABEL: &str = "<stdout>";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "tessera", about = "Compute connected components of a graph.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Register the vertices, apply the relations, and emit the components.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Accept repeated vertex ids instead of failing the build.
    #[arg(long)]
    pub allow_duplicates: bool,

    /// Write components to this file in the input format instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Input format and locations.
    #[command(subcommand)]
    pub source: RunSource,
}

/// Input formats supported by `run`.
#[derive(Debug, Subcommand, Clone)]
pub enum RunSource {
    /// Read line-oriented text files.
    Text(TextArgs),
    /// Read Parquet files with `Int64` id columns.
    Parquet(ParquetArgs),
}

/// Text ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct TextArgs {
    /// File with one vertex id per line.
    #[arg(long)]
    pub vertices: PathBuf,

    /// File with one relation per line: a source id followed by related ids.
    #[arg(long)]
    pub relations: PathBuf,

    /// Override name for the vertex source (defaults to the file stem).
    #[arg(long)]
    pub name: Option<String>,
}

/// Parquet ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct ParquetArgs {
    /// Parquet file holding the vertex ids.
    #[arg(long)]
    pub vertices: PathBuf,

    /// Parquet file holding the relations.
    #[arg(long)]
    pub relations: PathBuf,

    /// `Int64` column with vertex ids.
    #[arg(long, default_value = DEFAULT_ID_COLUMN)]
    pub id_column: String,

    /// `Int64` column with the relation source id.
    #[arg(long, default_value = DEFAULT_SOURCE_COLUMN)]
    pub source_column: String,

    /// `List<Int64>` column with the related ids.
    #[arg(long, default_value = DEFAULT_RELATED_COLUMN)]
    pub related_column: String,

    /// `List<Int64>` column written when `--output` is given.
    #[arg(long, default_value = DEFAULT_COMPONENT_COLUMN)]
    pub output_column: String,

    /// Override name for the vertex source (defaults to the file stem).
    #[arg(long)]
    pub name: Option<String>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Opening an input or creating an output file failed.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The Parquet output could not be initialised.
    #[error(transparent)]
    Parquet(#[from] ParquetProviderError),
    /// The build or the sink failed.
    #[error(transparent)]
    Core(#[from] TesseraError),
}

/// Where the components of a run ended up.
#[derive(Debug, Clone)]
pub enum RunOutput {
    /// Components kept in memory for rendering.
    Inline(Vec<Component>),
    /// Components persisted to a file.
    Written {
        /// Output file.
        path: PathBuf,
        /// Totals reported by the sink loop.
        persisted: PersistSummary,
    },
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name reported by the vertex source.
    pub data_source: String,
    /// Build counters.
    pub stats: BuildStats,
    /// Components or the file they were written to.
    pub output: RunOutput,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when an input cannot be opened, the build fails, or
/// the output cannot be written.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use tessera_cli::cli::{Cli, Command, RunCommand, RunOutput, RunSource, TextArgs, run_cli};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let vertices = dir.path().join("vertices.txt");
/// let relations = dir.path().join("relations.txt");
/// std::fs::write(&vertices, "1\n2\n3\n")?;
/// std::fs::write(&relations, "1: 3\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         allow_duplicates: false,
///         output: None,
///         source: RunSource::Text(TextArgs { vertices, relations, name: None }),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.stats.components, 2);
/// assert!(matches!(summary.output, RunOutput::Inline(ref components) if components.len() == 2));
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(duplicate_policy = field::Empty, source = field::Empty, output = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let RunCommand {
        allow_duplicates,
        output,
        source,
    } = command;
    let policy = if allow_duplicates {
        DuplicatePolicy::Overwrite
    } else {
        DuplicatePolicy::Reject
    };
    let tessera = TesseraBuilder::new().with_duplicate_policy(policy).build()?;

    let span = Span::current();
    span.record("duplicate_policy", field::debug(policy));
    span.record(
        "output",
        field::display(
            output
                .as_deref()
                .map_or_else(|| STDOUT_LABEL.into(), Path::to_string_lossy),
        ),
    );

    let summary = match source {
        RunSource::Text(args) => {
            span.record("source", field::display("text"));
            run_text(&tessera, args, output)?
        }
        RunSource::Parquet(args) => {
            span.record("source", field::display("parquet"));
            run_parquet(&tessera, args, output)?
        }
    };

    info!(
        data_source = summary.data_source.as_str(),
        elements = summary.stats.elements,
        components = summary.stats.components,
        "command completed"
    );
    Ok(summary)
}

#[instrument(
    name = "cli.run_text",
    err,
    skip(tessera, args, output),
    fields(vertices = field::Empty, relations = field::Empty, override_name = field::Empty),
)]
pub(super) fn run_text(
    tessera: &Tessera,
    args: TextArgs,
    output: Option<PathBuf>,
) -> Result<ExecutionSummary, CliError> {
    let TextArgs {
        vertices,
        relations,
        name,
    } = args;
    record_inputs(&vertices, &relations, name.as_deref());

    let mut vertex_source = TextVertexSource::new(
        derive_data_source_name(&vertices, name.as_deref()),
        open_text_reader(&vertices)?,
    );
    let mut relation_source = TextRelationSource::new(
        derive_data_source_name(&relations, None),
        open_text_reader(&relations)?,
    );

    let Some(path) = output else {
        return collect_inline(tessera, &mut vertex_source, &mut relation_source);
    };
    persist_to(tessera, &mut vertex_source, &mut relation_source, path, |path| {
        Ok(TextComponentSink::new(
            derive_data_source_name(path, None),
            BufWriter::new(create_output_file(path)?),
        ))
    })
}

#[instrument(
    name = "cli.run_parquet",
    err,
    skip(tessera, args, output),
    fields(
        vertices = field::Empty,
        relations = field::Empty,
        override_name = field::Empty,
        id_column = %args.id_column,
        source_column = %args.source_column,
        related_column = %args.related_column,
    ),
)]
pub(super) fn run_parquet(
    tessera: &Tessera,
    args: ParquetArgs,
    output: Option<PathBuf>,
) -> Result<ExecutionSummary, CliError> {
    let ParquetArgs {
        vertices,
        relations,
        id_column,
        source_column,
        related_column,
        output_column,
        name,
    } = args;
    record_inputs(&vertices, &relations, name.as_deref());

    let mut vertex_source = ParquetVertexSource::new(
        derive_data_source_name(&vertices, name.as_deref()),
        open_input(&vertices)?,
        id_column,
    );
    let mut relation_source = ParquetRelationSource::new(
        derive_data_source_name(&relations, None),
        open_input(&relations)?,
        source_column,
        related_column,
    );

    let Some(path) = output else {
        return collect_inline(tessera, &mut vertex_source, &mut relation_source);
    };
    persist_to(tessera, &mut vertex_source, &mut relation_source, path, |path| {
        let sink = ParquetComponentSink::try_new(
            derive_data_source_name(path, None),
            create_output_file(path)?,
            &output_column,
        )?;
        Ok(sink)
    })
}

fn record_inputs(vertices: &Path, relations: &Path, override_name: Option<&str>) {
    let span = Span::current();
    span.record("vertices", field::display(vertices.display()));
    span.record("relations", field::display(relations.display()));
    span.record(
        "override_name",
        field::display(override_name.unwrap_or(DERIVED_NAME)),
    );
}

fn collect_inline<V, R>(
    tessera: &Tessera,
    vertex_source: &mut V,
    relation_source: &mut R,
) -> Result<ExecutionSummary, CliError>
where
    V: VertexSource,
    R: RelationSource,
{
    let (components, stats) = tessera.run(vertex_source, relation_source)?.into_parts();
    Ok(ExecutionSummary {
        data_source: vertex_source.name().to_owned(),
        stats,
        output: RunOutput::Inline(components.collect()),
    })
}

/// Builds the components, then creates the sink at `path` and persists them.
///
/// The output file is only created once the build has succeeded, so a failed
/// build leaves any existing file untouched.
fn persist_to<V, R, S, F>(
    tessera: &Tessera,
    vertex_source: &mut V,
    relation_source: &mut R,
    path: PathBuf,
    open_sink: F,
) -> Result<ExecutionSummary, CliError>
where
    V: VertexSource,
    R: RelationSource,
    S: ComponentSink,
    F: FnOnce(&Path) -> Result<S, CliError>,
{
    let (components, stats) = tessera.run(vertex_source, relation_source)?.into_parts();
    let mut sink = open_sink(&path)?;
    let persisted = persist(components, &mut sink)?;
    info!(
        path = %path.display(),
        components = persisted.components,
        "components written"
    );
    Ok(ExecutionSummary {
        data_source: vertex_source.name().to_owned(),
        stats,
        output: RunOutput::Written { path, persisted },
    })
}

#[instrument(name = "cli.open_input", err, fields(path = field::Empty))]
pub(super) fn open_input(path: &Path) -> Result<File, CliError> {
    Span::current().record("path", field::display(path.display()));
    File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(super) fn open_text_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    open_input(path).map(BufReader::new)
}

fn create_output_file(path: &Path) -> Result<File, CliError> {
    File::create(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "data_source".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// Inline components are listed one per line as the root id, a tab, and the
/// space-separated members.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use tessera_cli::cli::{ExecutionSummary, RunOutput, render_summary};
/// # use tessera_core::{BuildStats, Component, ElementId};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let members = vec![ElementId::new(3), ElementId::new(1)];
/// let component = Component::new(ElementId::new(3), members).ok_or("empty")?;
/// let summary = ExecutionSummary {
///     data_source: "demo".into(),
///     stats: BuildStats { elements: 2, components: 1, ..BuildStats::default() },
///     output: RunOutput::Inline(vec![component]),
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.ends_with("3\t3 1\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "data source: {}", summary.data_source)?;
    writeln!(writer, "elements: {}", summary.stats.elements)?;
    writeln!(writer, "components: {}", summary.stats.components)?;
    match &summary.output {
        RunOutput::Inline(components) => {
            for component in components {
                write!(writer, "{}\t", component.root())?;
                let mut separator = "";
                for member in component.members() {
                    write!(writer, "{separator}{member}")?;
                    separator = " ";
                }
                writeln!(writer)?;
            }
        }
        RunOutput::Written { path, persisted } => {
            writeln!(
                writer,
                "written: {} ({} components)",
                path.display(),
                persisted.components
            )?;
        }
    }
    Ok(())
}
