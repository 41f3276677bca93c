// ---------------------------------------------------------------------------
// snapping_save – dense raw-height payload (legacy Prop Snapping format)
// ---------------------------------------------------------------------------
//
// Payload layout (little-endian, no padding):
//   i32  buffer_size
//   buffer_size × u16 raw_height
//
// Heights 0x0000 and 0xFFFF are questionable data in the legacy format:
// they are delivered as `None` so the host can clear its fixed-height flag
// for that slot instead of applying a bogus height.

use crate::save_error::SaveError;
use crate::serialization::{ByteReader, ByteWriter};

/// Raw height treated as "unset" by the legacy format.
const SENTINEL_LOW: u16 = 0;
/// Raw height treated as corrupt by the legacy format.
const SENTINEL_HIGH: u16 = u16::MAX;

/// Serialize every slot's raw height, slot 0 included.
pub fn serialize_heights(heights: &[u16]) -> Vec<u8> {
    let mut writer = ByteWriter::with_capacity(4 + heights.len() * 2);
    writer.write_i32(heights.len() as i32);
    for &height in heights {
        writer.write_u16(height);
    }
    writer.into_bytes()
}

/// Decode a height payload, handing each slot to `apply` in order. Sentinel
/// heights arrive as `None`.
///
/// The payload is fully decoded before `apply` runs, so a malformed stream
/// is a no-op for the host.
pub fn deserialize_heights(
    bytes: &[u8],
    mut apply: impl FnMut(usize, Option<u16>),
) -> Result<(), SaveError> {
    let mut reader = ByteReader::new(bytes);
    let buffer_size = reader.read_i32()?;
    if buffer_size < 0 {
        return Err(SaveError::Decode(format!(
            "negative snapping buffer size {buffer_size}"
        )));
    }

    let needed = buffer_size as usize * 2;
    if reader.remaining() < needed {
        return Err(SaveError::Decode(format!(
            "snapping payload truncated: {buffer_size} heights need {needed} bytes, have {}",
            reader.remaining()
        )));
    }

    let mut heights = Vec::with_capacity(buffer_size as usize);
    for _ in 0..buffer_size {
        heights.push(reader.read_u16()?);
    }

    for (slot, height) in heights.into_iter().enumerate() {
        let valid = height != SENTINEL_LOW && height != SENTINEL_HIGH;
        apply(slot, valid.then_some(height));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_with_sentinels() {
        let heights = [0_u16, 640, 65535, 1, 32000];
        let bytes = serialize_heights(&heights);
        assert_eq!(bytes.len(), 4 + heights.len() * 2);

        let mut seen = Vec::new();
        deserialize_heights(&bytes, |slot, height| seen.push((slot, height))).unwrap();

        assert_eq!(
            seen,
            vec![
                (0, None),
                (1, Some(640)),
                (2, None),
                (3, Some(1)),
                (4, Some(32000)),
            ]
        );
    }

    #[test]
    fn test_truncated_payload_never_calls_apply() {
        let bytes = serialize_heights(&[100, 200, 300]);
        let err = deserialize_heights(&bytes[..bytes.len() - 1], |_, _| {
            panic!("apply ran on a malformed payload")
        });
        assert!(err.is_err());
    }

    #[test]
    fn test_negative_buffer_size_rejected() {
        let mut writer = ByteWriter::new();
        writer.write_i32(-5);
        let err = deserialize_heights(&writer.into_bytes(), |_, _| {}).unwrap_err();
        assert!(matches!(err, SaveError::Decode(_)));
    }

    #[test]
    fn test_empty_buffer() {
        let bytes = serialize_heights(&[]);
        let mut calls = 0;
        deserialize_heights(&bytes, |_, _| calls += 1).unwrap();
        assert_eq!(calls, 0);
    }
}
