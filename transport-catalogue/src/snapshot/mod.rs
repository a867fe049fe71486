//! Binary snapshots of a built catalogue.
//!
//! A snapshot is the `TCAT` magic, a little-endian format version, then a
//! bincode payload. Decoding checks every cross reference before building
//! anything, so a damaged file is rejected as a whole.

mod error;
mod format;

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::catalogue::TransportCatalogue;
use crate::render::RenderSettings;
use crate::router::{RouteGraph, RouteGraphBuilder, RouterError, RoutingSettings};

pub use error::SnapshotError;
pub use format::{FORMAT_VERSION, MAGIC};

use format::SnapshotData;

const HEADER_LEN: usize = MAGIC.len() + 4;

/// Upper bound on bytes the payload decoder may claim, so a damaged length
/// prefix fails with an error instead of a huge allocation.
const PAYLOAD_LIMIT: usize = 1 << 30;

fn bincode_config() -> impl bincode::config::Config {
    bincode::config::standard().with_limit::<PAYLOAD_LIMIT>()
}

/// Whether the routing graph is written alongside the catalogue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SnapshotMode {
    /// Only the catalogue and settings; the graph is rebuilt on load.
    CatalogueOnly,
    /// Also store the routing graph so loading skips the build.
    #[default]
    WithGraph,
}

/// Everything the query phase needs.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub catalogue: TransportCatalogue,
    pub routing: Option<RoutingSettings>,
    pub graph: Option<RouteGraph>,
    pub render_settings: Option<RenderSettings>,
}

impl Snapshot {
    pub fn new(catalogue: TransportCatalogue) -> Self {
        Self {
            catalogue,
            routing: None,
            graph: None,
            render_settings: None,
        }
    }

    pub fn with_routing(mut self, routing: RoutingSettings) -> Self {
        self.routing = Some(routing);
        self
    }

    pub fn with_graph(mut self, graph: RouteGraph) -> Self {
        self.routing = Some(*graph.settings());
        self.graph = Some(graph);
        self
    }

    pub fn with_render_settings(mut self, settings: RenderSettings) -> Self {
        self.render_settings = Some(settings);
        self
    }

    /// Serialize to bytes.
    pub fn encode(&self, mode: SnapshotMode) -> Result<Vec<u8>, SnapshotError> {
        let graph = match mode {
            SnapshotMode::WithGraph => self.graph.as_ref(),
            SnapshotMode::CatalogueOnly => None,
        };
        let data = SnapshotData::capture(
            &self.catalogue,
            self.routing,
            graph,
            self.render_settings.as_ref(),
        );

        let mut bytes = Vec::with_capacity(HEADER_LEN);
        bytes.extend_from_slice(&MAGIC);
        bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        bytes.extend(bincode::serde::encode_to_vec(&data, bincode_config())?);
        Ok(bytes)
    }

    /// Parse bytes written by [`Snapshot::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self, SnapshotError> {
        if bytes.len() < MAGIC.len() || bytes[..MAGIC.len()] != MAGIC {
            return Err(SnapshotError::BadMagic);
        }

        let version_bytes: [u8; 4] = bytes
            .get(MAGIC.len()..HEADER_LEN)
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| SnapshotError::Corrupt("truncated header".to_string()))?;
        let found = u32::from_le_bytes(version_bytes);
        if found != FORMAT_VERSION {
            return Err(SnapshotError::VersionMismatch {
                expected: FORMAT_VERSION,
                found,
            });
        }

        let (data, read): (SnapshotData, usize) =
            bincode::serde::decode_from_slice(&bytes[HEADER_LEN..], bincode_config())?;
        if HEADER_LEN + read != bytes.len() {
            return Err(SnapshotError::Corrupt(format!(
                "{} trailing bytes",
                bytes.len() - HEADER_LEN - read
            )));
        }

        data.validate()?;
        let (catalogue, routing, graph, render_settings) = data.into_parts();

        debug!(
            stops = catalogue.stop_count(),
            buses = catalogue.bus_count(),
            has_graph = graph.is_some(),
            "snapshot decoded"
        );

        Ok(Self {
            catalogue,
            routing,
            graph,
            render_settings,
        })
    }

    /// Write the snapshot to `path`, creating parent directories.
    ///
    /// The file is written next to its destination and renamed into place.
    pub fn save(&self, path: &Path, mode: SnapshotMode) -> Result<(), SnapshotError> {
        let started = Instant::now();
        let bytes = self.encode(mode)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(".tmp");
        std::fs::write(&temp_name, &bytes)?;
        if let Err(e) = std::fs::rename(&temp_name, path) {
            let _ = std::fs::remove_file(&temp_name);
            return Err(e.into());
        }

        info!(
            path = %path.display(),
            bytes = bytes.len(),
            ?mode,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "snapshot saved"
        );
        Ok(())
    }

    /// Read a snapshot written by [`Snapshot::save`].
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let started = Instant::now();
        let bytes = std::fs::read(path)?;
        let snapshot = Self::decode(&bytes)?;
        info!(
            path = %path.display(),
            bytes = bytes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    /// The routing graph, building it from the catalogue if the snapshot
    /// was saved without one.
    ///
    /// Returns `Ok(None)` when no routing settings were stored.
    pub fn route_graph(&mut self) -> Result<Option<&RouteGraph>, RouterError> {
        if self.graph.is_none()
            && let Some(settings) = self.routing
        {
            debug!("rebuilding route graph from snapshot catalogue");
            self.graph = Some(RouteGraphBuilder::new(settings)?.build(&self.catalogue));
        }
        Ok(self.graph.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinates;
    use crate::render::{Color, MapRenderer};
    use crate::router::TransportRouter;

    fn catalogue() -> TransportCatalogue {
        let mut catalogue = TransportCatalogue::new();
        catalogue.add_stop("Tolstopaltsevo", Coordinates::new(55.611087, 37.20829));
        catalogue.add_stop("Marushkino", Coordinates::new(55.595884, 37.209755));
        catalogue.add_stop("Rasskazovka", Coordinates::new(55.632761, 37.333324));
        catalogue.add_stop("Biryusinka", Coordinates::new(55.581065, 37.64839));
        catalogue.add_stop("Lonely", Coordinates::new(55.0, 37.0));
        catalogue
            .add_distance("Tolstopaltsevo", "Marushkino", 3900)
            .unwrap();
        catalogue
            .add_distance("Marushkino", "Rasskazovka", 9900)
            .unwrap();
        catalogue
            .add_distance("Rasskazovka", "Marushkino", 9500)
            .unwrap();
        catalogue
            .add_bus(
                "750",
                &["Tolstopaltsevo", "Marushkino", "Rasskazovka"],
                false,
            )
            .unwrap();
        catalogue
            .add_bus(
                "256",
                &["Biryusinka", "Marushkino", "Biryusinka"],
                true,
            )
            .unwrap();
        catalogue
    }

    fn snapshot() -> Snapshot {
        let catalogue = catalogue();
        let graph = RouteGraphBuilder::new(RoutingSettings::new(6, 40.0))
            .unwrap()
            .build(&catalogue);
        let mut render = RenderSettings::default();
        render.color_palette = vec![
            Color::named("green"),
            Color::Rgba {
                red: 255,
                green: 160,
                blue: 0,
                opacity: 0.5,
            },
        ];
        Snapshot::new(catalogue)
            .with_graph(graph)
            .with_render_settings(render)
    }

    fn assert_same_answers(original: &mut Snapshot, loaded: &mut Snapshot) {
        for name in ["750", "256", "missing"] {
            let a = original.catalogue.bus(name);
            let b = loaded.catalogue.bus(name);
            assert_eq!(a.map(|bus| bus.distance), b.map(|bus| bus.distance));
            assert_eq!(a.map(|bus| bus.curvature), b.map(|bus| bus.curvature));
            assert_eq!(a.map(|bus| bus.stop_count()), b.map(|bus| bus.stop_count()));
            assert_eq!(a.map(|bus| bus.unique_stops), b.map(|bus| bus.unique_stops));
        }
        for name in ["Marushkino", "Lonely", "missing"] {
            assert_eq!(
                original.catalogue.stop(name).map(|s| s.buses.clone()),
                loaded.catalogue.stop(name).map(|s| s.buses.clone())
            );
        }

        let original_map = MapRenderer::new(
            &original.catalogue,
            original.render_settings.as_ref().unwrap(),
        )
        .render();
        let loaded_map = MapRenderer::new(
            &loaded.catalogue,
            loaded.render_settings.as_ref().unwrap(),
        )
        .render();
        assert_eq!(original_map, loaded_map);

        let original_graph = original.route_graph().unwrap().unwrap().clone();
        let loaded_graph = loaded.route_graph().unwrap().unwrap().clone();
        let a = TransportRouter::new(&original.catalogue, &original_graph);
        let b = TransportRouter::new(&loaded.catalogue, &loaded_graph);
        let names = ["Tolstopaltsevo", "Marushkino", "Rasskazovka", "Biryusinka", "Lonely"];
        for from in names {
            for to in names {
                assert_eq!(a.compute_route(from, to), b.compute_route(from, to));
            }
        }
    }

    #[test]
    fn round_trip_with_graph() {
        let mut original = snapshot();
        let bytes = original.encode(SnapshotMode::WithGraph).unwrap();
        assert_eq!(&bytes[..4], b"TCAT");

        let mut loaded = Snapshot::decode(&bytes).unwrap();
        assert_eq!(loaded.graph, original.graph);
        assert_eq!(loaded.routing, original.routing);
        assert_eq!(loaded.render_settings, original.render_settings);
        assert_same_answers(&mut original, &mut loaded);
    }

    #[test]
    fn catalogue_only_rebuilds_graph() {
        let mut original = snapshot();
        let bytes = original.encode(SnapshotMode::CatalogueOnly).unwrap();

        let mut loaded = Snapshot::decode(&bytes).unwrap();
        assert!(loaded.graph.is_none());
        assert_eq!(loaded.routing, Some(RoutingSettings::new(6, 40.0)));
        assert_same_answers(&mut original, &mut loaded);
        assert_eq!(loaded.graph, original.graph);
    }

    #[test]
    fn no_routing_means_no_graph() {
        let mut snapshot = Snapshot::new(catalogue());
        let bytes = snapshot.encode(SnapshotMode::WithGraph).unwrap();
        let mut loaded = Snapshot::decode(&bytes).unwrap();
        assert!(snapshot.route_graph().unwrap().is_none());
        assert!(loaded.route_graph().unwrap().is_none());
        assert!(loaded.render_settings.is_none());
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = snapshot().encode(SnapshotMode::WithGraph).unwrap();
        bytes[0] = b'X';
        assert!(matches!(
            Snapshot::decode(&bytes),
            Err(SnapshotError::BadMagic)
        ));
        assert!(matches!(Snapshot::decode(b"TC"), Err(SnapshotError::BadMagic)));
        assert!(matches!(Snapshot::decode(&[]), Err(SnapshotError::BadMagic)));
    }

    #[test]
    fn rejects_other_version() {
        let mut bytes = snapshot().encode(SnapshotMode::WithGraph).unwrap();
        bytes[4..8].copy_from_slice(&7u32.to_le_bytes());
        assert!(matches!(
            Snapshot::decode(&bytes),
            Err(SnapshotError::VersionMismatch {
                expected: FORMAT_VERSION,
                found: 7
            })
        ));
    }

    #[test]
    fn rejects_truncated_blob() {
        let bytes = snapshot().encode(SnapshotMode::WithGraph).unwrap();
        let truncated = &bytes[..bytes.len() / 2];
        assert!(Snapshot::decode(truncated).is_err());
        assert!(matches!(
            Snapshot::decode(&bytes[..6]),
            Err(SnapshotError::Corrupt(_))
        ));
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut bytes = snapshot().encode(SnapshotMode::WithGraph).unwrap();
        bytes.push(0);
        assert!(matches!(
            Snapshot::decode(&bytes),
            Err(SnapshotError::Corrupt(_))
        ));
    }

    #[test]
    fn oversized_length_prefix_is_decode_error() {
        let mut bytes = MAGIC.to_vec();
        bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        // One stop whose name claims u64::MAX / 2 bytes
        bytes.push(1);
        bytes.push(253);
        bytes.extend_from_slice(&(u64::MAX / 2).to_le_bytes());
        assert!(matches!(
            Snapshot::decode(&bytes),
            Err(SnapshotError::Decode(_))
        ));
    }

    fn encode_data(data: &SnapshotData) -> Vec<u8> {
        let mut bytes = MAGIC.to_vec();
        bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        bytes.extend(bincode::serde::encode_to_vec(data, bincode_config()).unwrap());
        bytes
    }

    fn captured() -> SnapshotData {
        let snapshot = snapshot();
        SnapshotData::capture(
            &snapshot.catalogue,
            snapshot.routing,
            snapshot.graph.as_ref(),
            snapshot.render_settings.as_ref(),
        )
    }

    #[test]
    fn rejects_dangling_bus_stop() {
        let mut data = captured();
        data.buses[0].stops.push(99);
        assert!(matches!(
            Snapshot::decode(&encode_data(&data)),
            Err(SnapshotError::Corrupt(_))
        ));
    }

    #[test]
    fn rejects_dangling_distance() {
        let mut data = captured();
        data.distances[0].to = 5;
        assert!(matches!(
            Snapshot::decode(&encode_data(&data)),
            Err(SnapshotError::Corrupt(_))
        ));
    }

    #[test]
    fn rejects_wrong_vertex_count() {
        let mut data = captured();
        if let Some(graph) = data.graph.as_mut() {
            graph.vertex_count += 1;
        }
        assert!(matches!(
            Snapshot::decode(&encode_data(&data)),
            Err(SnapshotError::Corrupt(_))
        ));
    }

    #[test]
    fn rejects_bad_edge() {
        let mut data = captured();
        if let Some(graph) = data.graph.as_mut() {
            graph.edges[0].weight = f64::NAN;
        }
        assert!(matches!(
            Snapshot::decode(&encode_data(&data)),
            Err(SnapshotError::Corrupt(_))
        ));

        let mut data = captured();
        if let Some(graph) = data.graph.as_mut() {
            let last = graph.edges.len() - 1;
            graph.edges[last].info = format::EdgeInfoRecord::Ride {
                stop: 0,
                bus: 42,
                span_count: 1,
            };
        }
        assert!(matches!(
            Snapshot::decode(&encode_data(&data)),
            Err(SnapshotError::Corrupt(_))
        ));
    }

    #[test]
    fn rejects_duplicate_bus_names() {
        let mut data = captured();
        data.buses[1].name = data.buses[0].name.clone();
        assert!(matches!(
            Snapshot::decode(&encode_data(&data)),
            Err(SnapshotError::Corrupt(_))
        ));
    }

    #[test]
    fn rejects_graph_without_settings() {
        let mut data = captured();
        data.routing = None;
        assert!(matches!(
            Snapshot::decode(&encode_data(&data)),
            Err(SnapshotError::Corrupt(_))
        ));
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("base.db");

        let mut original = snapshot();
        original.save(&path, SnapshotMode::WithGraph).unwrap();
        assert!(path.exists());

        let mut loaded = Snapshot::load(&path).unwrap();
        assert_same_answers(&mut original, &mut loaded);
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base.db");
        // Renaming a file over a directory fails
        std::fs::create_dir(&path).unwrap();

        let err = snapshot().save(&path, SnapshotMode::WithGraph).unwrap_err();
        assert!(matches!(err, SnapshotError::Io(_)));
        assert!(!dir.path().join("base.db.tmp").exists());
        assert!(path.is_dir());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Snapshot::load(&dir.path().join("absent.db")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io(_)));
    }
}
