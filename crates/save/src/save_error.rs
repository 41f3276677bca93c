// ---------------------------------------------------------------------------
// SaveError: typed errors for overlay save/load operations
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur while (de)serializing overlay payloads.
///
/// All of these are non-fatal at the persistence boundary: the driver logs
/// them and skips the affected payload, never propagating into host code.
#[derive(Debug)]
pub enum SaveError {
    /// I/O error from the host's save stream.
    Io(std::io::Error),
    /// Malformed or truncated payload bytes.
    Decode(String),
    /// Payload was written by a newer format version.
    VersionMismatch { expected_max: i32, found: i32 },
    /// Dense-array payload length does not match the arena capacity.
    LengthMismatch { expected: usize, found: usize },
    /// Container type identifier is not one this overlay understands.
    UnknownContainer(String),
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
                "Version mismatch: payload is v{found}, but this build only supports up to v{expected_max}"
            ),
            SaveError::LengthMismatch { expected, found } => write!(
                f,
                "Length mismatch: payload holds {found} entries, arena expects {expected}"
            ),
            SaveError::UnknownContainer(id) => {
                write!(f, "Unknown container type identifier: {id:?}")
            }
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
