// ---------------------------------------------------------------------------
// SaveError: typed errors for the region-map cache
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors raised while persisting or restoring the region-map cache.
///
/// A typed enum rather than ad-hoc stderr output, so callers can match on
/// the cause: a stale cache means "recompute and overwrite", corruption
/// means "discard", an I/O failure may be worth surfacing to the user.
#[derive(Debug)]
pub enum SaveError {
    /// I/O error (file not found, permission denied, disk full, etc.)
    Io(std::io::Error),
    /// Bitcode or lz4 decoding failed.
    Decode(String),
    /// Cache was written by a newer build than this one supports.
    VersionMismatch { expected_max: u32, found: u32 },
    /// Structural damage: bad magic, truncated header, checksum mismatch.
    Corrupted(String),
    /// Cache was computed for a different floorplan or sensor layout.
    StaleConfig { expected: u32, found: u32 },
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "I/O error: {e}"),
            SaveError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            SaveError::VersionMismatch {
                expected_max,
                found,
            } => write!(
                f,
                "Version mismatch: cache is v{found}, but this build only supports up to v{expected_max}"
            ),
            SaveError::Corrupted(msg) => write!(f, "Cache is corrupted: {msg}"),
            SaveError::StaleConfig { expected, found } => write!(
                f,
                "Cache is stale: expected configuration key {expected:#010x}, found {found:#010x}"
            ),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<bitcode::Error> for SaveError {
    fn from(e: bitcode::Error) -> Self {
        SaveError::Decode(e.to_string())
    }
}
