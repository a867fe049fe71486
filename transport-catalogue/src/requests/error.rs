//! Top-level error type for the two processing phases.

use crate::catalogue::CatalogueError;
use crate::router::RouterError;
use crate::snapshot::SnapshotError;

/// Any failure that aborts `make_base` or `process_requests`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Input JSON is malformed or has an unknown request type
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Catalogue(#[from] CatalogueError),

    #[error(transparent)]
    Router(#[from] RouterError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Reading input or writing answers failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
