//! Snapshot error types.

/// Errors from writing or reading a snapshot.
///
/// Every read error is fatal: a snapshot is either loaded completely or
/// not at all.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Reading or writing the snapshot file failed
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The blob does not start with the snapshot magic bytes
    #[error("not a transport catalogue snapshot")]
    BadMagic,

    /// The blob was written by an incompatible format version
    #[error("snapshot format version {found} is not supported (expected {expected})")]
    VersionMismatch { expected: u32, found: u32 },

    /// Payload serialization failed
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    /// Payload could not be decoded
    #[error("failed to decode snapshot: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    /// Payload decoded but refers to records that do not exist
    #[error("corrupt snapshot: {0}")]
    Corrupt(String),
}
