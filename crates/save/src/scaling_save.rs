// ---------------------------------------------------------------------------
// scaling_save – dense per-slot scale array payload
// ---------------------------------------------------------------------------
//
// Payload layout (little-endian, no padding):
//   i32  format_version  (currently 0)
//   i32  length          (must equal the arena capacity)
//   length × f32 scale
//
// A version from a newer build or a length that does not match the arena
// aborts the read without mutating the live array; a foreign save must not
// clobber in-memory state.

use props::scaling::ScalingOverlay;

use crate::save_error::SaveError;
use crate::serialization::{ByteReader, ByteWriter};

/// Current scaling payload format version.
pub const SCALING_FORMAT_VERSION: i32 = 0;

pub fn serialize_scaling(overlay: &ScalingOverlay) -> Vec<u8> {
    let scales = overlay.as_slice();
    let mut writer = ByteWriter::with_capacity(8 + scales.len() * 4);
    writer.write_i32(SCALING_FORMAT_VERSION);
    writer.write_i32(scales.len() as i32);
    for &scale in scales {
        writer.write_f32(scale);
    }
    writer.into_bytes()
}

/// Overwrite the overlay element-for-element from a payload.
///
/// The whole payload is decoded before the overlay is touched, so any
/// failure leaves the live array exactly as it was.
pub fn deserialize_scaling(bytes: &[u8], overlay: &mut ScalingOverlay) -> Result<(), SaveError> {
    let mut reader = ByteReader::new(bytes);

    let version = reader.read_i32()?;
    if version > SCALING_FORMAT_VERSION {
        return Err(SaveError::VersionMismatch {
            expected_max: SCALING_FORMAT_VERSION,
            found: version,
        });
    }

    let length = reader.read_i32()?;
    if length < 0 || length as usize != overlay.capacity() {
        return Err(SaveError::LengthMismatch {
            expected: overlay.capacity(),
            found: length.max(0) as usize,
        });
    }

    let mut scales = Vec::with_capacity(length as usize);
    for _ in 0..length {
        scales.push(reader.read_f32()?);
    }

    overlay.restore(&scales);
    Ok(())
}
