//! Catalogue error types.

/// Errors raised while populating the catalogue.
///
/// These indicate malformed ingestion data and are fatal for a build run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueError {
    /// A bus or distance refers to a stop that was never added
    #[error("unknown stop: {0}")]
    UnknownStop(String),
}
