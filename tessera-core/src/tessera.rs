//! Core orchestration for the Tessera library.
//!
//! Provides the [`Tessera`] entry point that registers the vertex stream,
//! ingests the relation stream, and hands back the extracted components.

use tracing::{Span, field, info, instrument, warn};

use crate::{
    Result,
    builder::DuplicatePolicy,
    components::Components,
    datasource::{RelationSource, VertexSource},
    disjoint_set::{DisjointSet, IngestStats, RegistrationStats},
    element::{ElementId, Relation},
    error::{DataSourceError, TesseraError},
    sink::{ComponentSink, PersistSummary, persist},
};

type DataSourceResult<T> = core::result::Result<T, DataSourceError>;

/// Name reported for failures of a vertex stream passed to [`Tessera::build`].
pub const VERTEX_STREAM_NAME: &str = "vertices";
/// Name reported for failures of a relation stream passed to [`Tessera::build`].
pub const RELATION_STREAM_NAME: &str = "relations";

/// Counters describing one completed build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Distinct elements registered.
    pub elements: usize,
    /// Repeated vertex ids accepted under [`DuplicatePolicy::Overwrite`].
    pub duplicates_overwritten: usize,
    /// Relation items consumed.
    pub relations: usize,
    /// Edges applied across all relations.
    pub edges: usize,
    /// Edges that merged two components.
    pub merges: usize,
    /// Components produced.
    pub components: usize,
}

impl BuildStats {
    fn from_stages(registered: RegistrationStats, ingested: IngestStats, components: usize) -> Self {
        Self {
            elements: registered.inserted,
            duplicates_overwritten: registered.overwritten,
            relations: ingested.relations,
            edges: ingested.edges,
            merges: ingested.merges,
            components,
        }
    }
}

/// Components and statistics produced by a successful build.
#[derive(Debug)]
pub struct BuildOutput {
    components: Components,
    stats: BuildStats,
}

impl BuildOutput {
    /// Returns the build statistics.
    #[must_use]
    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Consumes the output, returning the component sequence.
    #[must_use]
    pub fn into_components(self) -> Components {
        self.components
    }

    /// Consumes the output, returning components and statistics.
    #[must_use]
    pub fn into_parts(self) -> (Components, BuildStats) {
        (self.components, self.stats)
    }
}

/// Statistics for a build whose components were persisted to a sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Build statistics.
    pub stats: BuildStats,
    /// Totals reported by the persistence loop.
    pub persisted: PersistSummary,
}

/// Entry point for computing connected components.
///
/// Each call owns a fresh registry; no state survives between calls, so one
/// instance can serve any number of builds.
///
/// # Examples
/// ```
/// use tessera_core::{ElementId, Relation, TesseraBuilder};
///
/// let tessera = TesseraBuilder::new().build()?;
/// let vertices = (1..=5).map(|raw| Ok(ElementId::new(raw)));
/// let relations = [Relation::from_raw(1, [2]), Relation::from_raw(4, [5])].map(Ok);
/// let output = tessera.build(vertices, relations)?;
/// assert_eq!(output.stats().merges, 2);
/// let groups = output.into_components().into_id_lists();
/// assert_eq!(groups.len(), 3);
/// # Ok::<(), tessera_core::TesseraError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Tessera {
    duplicate_policy: DuplicatePolicy,
    capacity_hint: usize,
}

impl Tessera {
    pub(crate) fn new(duplicate_policy: DuplicatePolicy, capacity_hint: usize) -> Self {
        Self {
            duplicate_policy,
            capacity_hint,
        }
    }

    /// Returns the duplicate policy used when registering vertices.
    #[must_use]
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    /// Returns the registry capacity hint.
    #[must_use]
    pub fn capacity_hint(&self) -> usize {
        self.capacity_hint
    }

    /// Registers `vertices`, ingests `relations`, and extracts the components.
    ///
    /// `relations` is not touched until every vertex has been registered.
    /// Source failures are reported under [`VERTEX_STREAM_NAME`] and
    /// [`RELATION_STREAM_NAME`].
    ///
    /// # Errors
    /// Returns [`TesseraError::DataSource`] when either stream yields an error,
    /// [`TesseraError::DuplicateElement`] when a vertex repeats under
    /// [`DuplicatePolicy::Reject`], and [`TesseraError::UnknownElement`] when a
    /// relation names an unregistered vertex. No components are returned on
    /// failure.
    pub fn build<V, R>(&self, vertices: V, relations: R) -> Result<BuildOutput>
    where
        V: IntoIterator<Item = DataSourceResult<ElementId>>,
        R: IntoIterator<Item = DataSourceResult<Relation>>,
    {
        self.execute(
            VERTEX_STREAM_NAME,
            vertices,
            RELATION_STREAM_NAME,
            || Ok(relations),
        )
    }

    /// Builds components from a [`VertexSource`] and a [`RelationSource`].
    ///
    /// The relation stream is opened only after the vertex stream has been
    /// fully registered.
    ///
    /// # Errors
    /// As for [`Self::build`]; source failures carry the source's name.
    ///
    /// # Examples
    /// ```
    /// use tessera_core::{MemoryGraph, Relation, TesseraBuilder};
    ///
    /// let mut graph = MemoryGraph::from_raw("demo", 1..=4, [Relation::from_raw(1, [3])]);
    /// let mut relations = graph.clone();
    /// let tessera = TesseraBuilder::new().build()?;
    /// let output = tessera.run(&mut graph, &mut relations)?;
    /// assert_eq!(output.stats().components, 3);
    /// # Ok::<(), tessera_core::TesseraError>(())
    /// ```
    pub fn run<V, R>(&self, vertex_source: &mut V, relation_source: &mut R) -> Result<BuildOutput>
    where
        V: VertexSource,
        R: RelationSource,
    {
        let vertex_name = vertex_source.name().to_owned();
        let relation_name = relation_source.name().to_owned();
        let vertices = vertex_source
            .vertices()
            .map_err(|error| TesseraError::data_source(&vertex_name, error))?;
        self.execute(&vertex_name, vertices, &relation_name, || {
            relation_source.relations()
        })
    }

    /// Runs [`Self::run`] and persists the components to `sink`.
    ///
    /// # Errors
    /// Returns any error from [`Self::run`], or [`TesseraError::Sink`] when the
    /// sink fails. A sink failure leaves earlier writes in place.
    pub fn run_into<V, R, S>(
        &self,
        vertex_source: &mut V,
        relation_source: &mut R,
        sink: &mut S,
    ) -> Result<RunReport>
    where
        V: VertexSource,
        R: RelationSource,
        S: ComponentSink + ?Sized,
    {
        let (components, stats) = self.run(vertex_source, relation_source)?.into_parts();
        let persisted = persist(components, sink)?;
        Ok(RunReport { stats, persisted })
    }

    #[instrument(
        name = "core.build",
        err,
        skip(self, vertex_source, vertices, relation_source, open_relations),
        fields(
            vertex_source = %vertex_source,
            relation_source = %relation_source,
            duplicate_policy = ?self.duplicate_policy,
            elements = field::Empty,
            components = field::Empty,
        ),
    )]
    fn execute<V, R, F>(
        &self,
        vertex_source: &str,
        vertices: V,
        relation_source: &str,
        open_relations: F,
    ) -> Result<BuildOutput>
    where
        V: IntoIterator<Item = DataSourceResult<ElementId>>,
        R: IntoIterator<Item = DataSourceResult<Relation>>,
        F: FnOnce() -> DataSourceResult<R>,
    {
        let mut forest = DisjointSet::with_capacity(self.capacity_hint);
        let registered = self.register(&mut forest, vertex_source, vertices)?;
        let relations =
            open_relations().map_err(|error| TesseraError::data_source(relation_source, error))?;
        let ingested = Self::ingest(&mut forest, relation_source, relations)?;
        let components = forest.components();

        let stats = BuildStats::from_stages(registered, ingested, components.len());
        let span = Span::current();
        span.record("elements", stats.elements);
        span.record("components", stats.components);
        record_metrics(&stats);
        info!(
            elements = stats.elements,
            edges = stats.edges,
            merges = stats.merges,
            components = stats.components,
            "build completed"
        );
        Ok(BuildOutput { components, stats })
    }

    #[instrument(
        name = "core.register",
        err,
        skip(self, forest, data_source, vertices),
        fields(data_source = %data_source, inserted = field::Empty, overwritten = field::Empty),
    )]
    fn register<V>(
        &self,
        forest: &mut DisjointSet,
        data_source: &str,
        vertices: V,
    ) -> Result<RegistrationStats>
    where
        V: IntoIterator<Item = DataSourceResult<ElementId>>,
    {
        let items = vertices
            .into_iter()
            .map(|item| item.map_err(|error| TesseraError::data_source(data_source, error)));
        let stats = forest.register_all(items, self.duplicate_policy)?;

        let span = Span::current();
        span.record("inserted", stats.inserted);
        span.record("overwritten", stats.overwritten);
        if stats.inserted == 0 {
            warn!(data_source, "vertex stream is empty");
        }
        Ok(stats)
    }

    #[instrument(
        name = "core.ingest",
        err,
        skip(forest, data_source, relations),
        fields(data_source = %data_source, relations = field::Empty, merges = field::Empty),
    )]
    fn ingest<R>(forest: &mut DisjointSet, data_source: &str, relations: R) -> Result<IngestStats>
    where
        R: IntoIterator<Item = DataSourceResult<Relation>>,
    {
        let items = relations
            .into_iter()
            .map(|item| item.map_err(|error| TesseraError::data_source(data_source, error)));
        let stats = forest.ingest_all(items)?;

        let span = Span::current();
        span.record("relations", stats.relations);
        span.record("merges", stats.merges);
        Ok(stats)
    }
}

#[cfg(feature = "metrics")]
fn record_metrics(stats: &BuildStats) {
    metrics::counter!("tessera_elements_registered").increment(metric_count(stats.elements));
    metrics::counter!("tessera_edges_applied").increment(metric_count(stats.edges));
    metrics::counter!("tessera_merges").increment(metric_count(stats.merges));
    metrics::histogram!("tessera_components_per_build").record(metric_sample(stats.components));
}

#[cfg(not(feature = "metrics"))]
fn record_metrics(_stats: &BuildStats) {}

/// Saturates at `u64::MAX`.
#[cfg(feature = "metrics")]
fn metric_count(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

/// Saturates at `u32::MAX`, which `f64` represents exactly.
#[cfg(feature = "metrics")]
fn metric_sample(value: usize) -> f64 {
    f64::from(u32::try_from(value).unwrap_or(u32::MAX))
}
