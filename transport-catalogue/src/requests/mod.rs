//! JSON request processing for the two CLI phases.
//!
//! `make_base` reads base requests and settings, builds the catalogue and
//! route graph, and writes a snapshot. `process_requests` loads that
//! snapshot and prints one answer per stat request, in request order.

mod answer;
mod dto;
mod error;
mod handler;

use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use crate::catalogue::TransportCatalogue;
use crate::render::RenderSettings;
use crate::router::RouteGraphBuilder;
use crate::snapshot::{Snapshot, SnapshotMode};

pub use answer::{Answer, NOT_FOUND, RouteItem};
pub use dto::{
    BaseDocument, BaseRequest, BusRequest, ColorDto, RenderSettingsDto, SerializationSettings,
    StatDocument, StatRequest, StopRequest,
};
pub use error::AppError;
pub use handler::{RequestHandler, ingest};

/// What `make_base` produced.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSummary {
    pub path: PathBuf,
    pub stops: usize,
    pub buses: usize,
    /// Edges in the stored route graph, if one was built.
    pub graph_edges: Option<usize>,
}

/// Run the `make_base` phase: read a base document and write its snapshot.
pub fn build_and_serialize<R: Read>(reader: R) -> Result<BuildSummary, AppError> {
    let started = Instant::now();
    let document: BaseDocument = serde_json::from_reader(reader)?;

    let mut catalogue = TransportCatalogue::new();
    ingest(&mut catalogue, &document.base_requests)?;
    info!(
        stops = catalogue.stop_count(),
        buses = catalogue.bus_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "catalogue ingested"
    );

    let graph = match document.routing_settings {
        Some(settings) => Some(RouteGraphBuilder::new(settings)?.build(&catalogue)),
        None => None,
    };
    let graph_edges = graph.as_ref().map(|g| g.graph().edge_count());

    let summary_counts = (catalogue.stop_count(), catalogue.bus_count());
    let mut snapshot = Snapshot::new(catalogue);
    if let Some(graph) = graph {
        snapshot = snapshot.with_graph(graph);
    }
    if let Some(render) = document.render_settings {
        snapshot = snapshot.with_render_settings(RenderSettings::from(render));
    }

    let path = document.serialization_settings.file;
    snapshot.save(&path, SnapshotMode::WithGraph)?;

    info!(
        path = %path.display(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "base built"
    );

    Ok(BuildSummary {
        path,
        stops: summary_counts.0,
        buses: summary_counts.1,
        graph_edges,
    })
}

/// Run the `process_requests` phase: load the snapshot named in the
/// document and write the answers as a JSON array.
///
/// Returns the number of answers written.
pub fn deserialize_and_answer<R: Read, W: Write>(
    reader: R,
    mut writer: W,
) -> Result<usize, AppError> {
    let started = Instant::now();
    let document: StatDocument = serde_json::from_reader(reader)?;

    let mut snapshot = Snapshot::load(&document.serialization_settings.file)?;
    let answers = answer_requests(&mut snapshot, &document.stat_requests)?;

    serde_json::to_writer_pretty(&mut writer, &answers)?;
    writeln!(writer)?;
    writer.flush()?;

    info!(
        answers = answers.len(),
        not_found = answers.iter().filter(|a| a.is_not_found()).count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "requests answered"
    );
    Ok(answers.len())
}

/// Answer stat requests against a loaded snapshot, rebuilding its route
/// graph first if it was stored without one.
pub fn answer_requests(
    snapshot: &mut Snapshot,
    requests: &[StatRequest],
) -> Result<Vec<Answer>, AppError> {
    snapshot.route_graph()?;

    let mut handler = RequestHandler::new(&snapshot.catalogue);
    if let Some(graph) = &snapshot.graph {
        handler = handler.with_route_graph(graph);
    }
    if let Some(settings) = &snapshot.render_settings {
        handler = handler.with_render_settings(settings);
    }
    Ok(handler.answer_all(requests))
}
