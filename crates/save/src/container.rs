// ---------------------------------------------------------------------------
// container – versioned payload framing with legacy identifier impersonation
// ---------------------------------------------------------------------------
//
// Container stream layout (little-endian, no padding):
//   [0..4]  data version (i32)
//   [4..6]  type identifier length (u16)
//   [6..n]  type identifier (UTF-8)
//   [n..]   payload bytes
//
// Two of the payloads predate this overlay: precision corrections were
// introduced by the standalone Prop Precision mod and dense raw heights by
// the original Prop Snapping mod. To keep saves readable by historical
// tooling, containers written under this overlay's own identifiers are
// re-tagged on the way out with the predecessors' verbatim identifier
// strings, and the reader accepts either spelling. Only the identifier is
// substituted; payload bytes are untouched.

use bevy::prelude::*;

use crate::save_error::SaveError;
use crate::serialization::{ByteReader, ByteWriter};

/// Extension-map key for precision-correction data.
pub const PRECISION_DATA_KEY: &str = "PropPrecision";
/// Extension-map key for legacy snapping height data.
pub const SNAPPING_DATA_KEY: &str = "PropSnapping";
/// Extension-map key for scaling data.
pub const SCALING_DATA_KEY: &str = "PropScaling";

/// This overlay's own namespace-qualified container identifiers.
pub const PRECISION_TYPE: &str = "PropPrecision.Data, PropControl";
pub const SNAPPING_TYPE: &str = "PropSnapping.Data, PropControl";
pub const SCALING_TYPE: &str = "PropScaling.Data, PropControl";

/// Verbatim identifier of the standalone Prop Precision mod's container.
/// Byte-for-byte, trailing period included; historical tooling matches the
/// exact string.
pub const LEGACY_PRECISION_TYPE: &str =
    "PropPrecision.Data, PropPrecision, Version=1.0.6149.17591, Culture=neutral, PublicKeyToken=null.";

/// Verbatim identifier of the original Prop Snapping mod's container.
pub const LEGACY_SNAPPING_TYPE: &str =
    "PropSnapping.Data, PropSnapping, Version=1.0.0.0, Culture=neutral, PublicKeyToken=null.";

/// Which deserializer a container routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Precision,
    Snapping,
    Scaling,
}

/// Wrap a payload in a container frame, impersonating the matching legacy
/// identifier where one exists.
pub fn write_container(version: i32, type_id: &str, payload: &[u8]) -> Vec<u8> {
    let written_id = impersonated_type(type_id);
    let mut writer = ByteWriter::with_capacity(6 + written_id.len() + payload.len());
    writer.write_i32(version);
    writer.write_str(written_id);
    writer.write_bytes(payload);
    writer.into_bytes()
}

/// Split a container frame into version, type identifier, and payload.
pub fn read_container(bytes: &[u8]) -> Result<(i32, String, &[u8]), SaveError> {
    let mut reader = ByteReader::new(bytes);
    let version = reader.read_i32()?;
    let type_id = reader.read_str()?;
    Ok((version, type_id, reader.read_remaining()))
}

/// Map a container type identifier, native or legacy, to its deserializer.
pub fn resolve_type(type_id: &str) -> Result<ContainerKind, SaveError> {
    if type_id == LEGACY_PRECISION_TYPE || type_id.starts_with(PRECISION_TYPE) {
        Ok(ContainerKind::Precision)
    } else if type_id == LEGACY_SNAPPING_TYPE || type_id.starts_with(SNAPPING_TYPE) {
        Ok(ContainerKind::Snapping)
    } else if type_id.starts_with(SCALING_TYPE) {
        Ok(ContainerKind::Scaling)
    } else {
        Err(SaveError::UnknownContainer(type_id.to_string()))
    }
}

/// Identifier actually written to the stream. Prefix match, like the
/// original interception: any identifier qualified with this overlay's
/// namespace is re-tagged with the predecessor's string.
fn impersonated_type(type_id: &str) -> &str {
    if type_id.starts_with(PRECISION_TYPE) {
        info!("writing precision data under the legacy Prop Precision identifier");
        LEGACY_PRECISION_TYPE
    } else if type_id.starts_with(SNAPPING_TYPE) {
        info!("writing height data under the legacy Prop Snapping identifier");
        LEGACY_SNAPPING_TYPE
    } else {
        type_id
    }
}
