// ---------------------------------------------------------------------------
// precision_save – sparse correction table payload
// ---------------------------------------------------------------------------
//
// Payload layout (little-endian, no padding), unchanged from the legacy
// Prop Precision format:
//   i32  entry_count
//   entry_count × { u16 prop_id, u16 correction_x, u16 correction_z }

use props::position::PrecisionCorrection;
use props::precision::PrecisionStore;
use props::PropId;

use crate::save_error::SaveError;
use crate::serialization::{ByteReader, ByteWriter};

/// Serialize corrections for currently-created props only, in ascending id
/// order for reproducible output.
pub fn serialize_precision(
    store: &PrecisionStore,
    mut is_created: impl FnMut(PropId) -> bool,
) -> Vec<u8> {
    let entries: Vec<_> = store
        .sorted_entries()
        .into_iter()
        .filter(|&(id, _)| is_created(id))
        .collect();

    let mut writer = ByteWriter::with_capacity(4 + entries.len() * 6);
    writer.write_i32(entries.len() as i32);
    for (id, correction) in entries {
        writer.write_u16(id);
        writer.write_u16(correction.x);
        writer.write_u16(correction.z);
    }
    writer.into_bytes()
}

/// Rebuild the store from a payload, admitting only entries whose prop the
/// host still reports as created; the rest are silently dropped.
///
/// The payload is fully parsed before the store is touched, so a malformed
/// stream leaves in-memory state exactly as it was.
pub fn deserialize_precision(
    bytes: &[u8],
    store: &mut PrecisionStore,
    mut is_created: impl FnMut(PropId) -> bool,
) -> Result<(), SaveError> {
    let mut reader = ByteReader::new(bytes);
    let entry_count = reader.read_i32()?;
    if entry_count < 0 {
        return Err(SaveError::Decode(format!(
            "negative precision entry count {entry_count}"
        )));
    }

    // Validate up front so a hostile count can't trigger a huge allocation.
    let needed = entry_count as usize * 6;
    if reader.remaining() < needed {
        return Err(SaveError::Decode(format!(
            "precision payload truncated: {entry_count} entries need {needed} bytes, have {}",
            reader.remaining()
        )));
    }

    let mut entries = Vec::with_capacity(entry_count as usize);
    for _ in 0..entry_count {
        let id = reader.read_u16()?;
        let correction = PrecisionCorrection {
            x: reader.read_u16()?,
            z: reader.read_u16()?,
        };
        entries.push((id, correction));
    }

    store.clear();
    for (id, correction) in entries {
        if id != 0 && is_created(id) {
            store.set(id, correction);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(entries: &[(PropId, u16, u16)]) -> PrecisionStore {
        let mut store = PrecisionStore::default();
        for &(id, x, z) in entries {
            store.set(id, PrecisionCorrection { x, z });
        }
        store
    }

    #[test]
    fn test_roundtrip_preserves_created_entries() {
        let store = store_with(&[(5, 100, 200), (2, 1, 2), (9, 65535, 0)]);
        let bytes = serialize_precision(&store, |_| true);

        let mut restored = PrecisionStore::default();
        deserialize_precision(&bytes, &mut restored, |_| true).unwrap();

        assert_eq!(restored.len(), 3);
        assert_eq!(
            restored.get(5),
            Some(PrecisionCorrection { x: 100, z: 200 })
        );
        assert_eq!(restored.get(9), Some(PrecisionCorrection { x: 65535, z: 0 }));
    }

    #[test]
    fn test_serialize_skips_destroyed_props() {
        let store = store_with(&[(1, 1, 1), (2, 2, 2), (3, 3, 3)]);
        let bytes = serialize_precision(&store, |id| id != 2);

        // Count reflects the filter, not the store occupancy.
        assert_eq!(&bytes[..4], &2_i32.to_le_bytes());

        let mut restored = PrecisionStore::default();
        deserialize_precision(&bytes, &mut restored, |_| true).unwrap();
        assert!(restored.get(2).is_none());
        assert_eq!(restored.len(), 2);
    }

    #[test]
    fn test_serialize_is_ascending_and_stable() {
        let store = store_with(&[(40, 0, 0), (7, 0, 0), (1000, 0, 0)]);
        let a = serialize_precision(&store, |_| true);
        let b = serialize_precision(&store, |_| true);
        assert_eq!(a, b);

        let mut reader = ByteReader::new(&a);
        assert_eq!(reader.read_i32().unwrap(), 3);
        let mut ids = Vec::new();
        for _ in 0..3 {
            ids.push(reader.read_u16().unwrap());
            reader.read_u16().unwrap();
            reader.read_u16().unwrap();
        }
        assert_eq!(ids, vec![7, 40, 1000]);
    }

    #[test]
    fn test_deserialize_filters_at_load_time() {
        // Entry exists in the save, but the prop is gone by load time.
        let store = store_with(&[(4, 9, 9), (6, 8, 8)]);
        let bytes = serialize_precision(&store, |_| true);

        let mut restored = store_with(&[(1, 1, 1)]);
        deserialize_precision(&bytes, &mut restored, |id| id == 6).unwrap();

        // Load clears pre-existing state and admits only created props.
        assert!(restored.get(1).is_none());
        assert!(restored.get(4).is_none());
        assert_eq!(restored.get(6), Some(PrecisionCorrection { x: 8, z: 8 }));
    }

    #[test]
    fn test_malformed_payload_leaves_store_untouched() {
        let store = store_with(&[(4, 9, 9)]);
        let bytes = serialize_precision(&store, |_| true);

        let mut target = store_with(&[(2, 5, 5)]);
        let err = deserialize_precision(&bytes[..bytes.len() - 1], &mut target, |_| true);
        assert!(err.is_err());
        assert_eq!(target.get(2), Some(PrecisionCorrection { x: 5, z: 5 }));
    }

    #[test]
    fn test_negative_count_rejected() {
        let mut writer = ByteWriter::new();
        writer.write_i32(-1);
        let bytes = writer.into_bytes();

        let mut target = PrecisionStore::default();
        let err = deserialize_precision(&bytes, &mut target, |_| true).unwrap_err();
        assert!(matches!(err, SaveError::Decode(_)));
    }

    #[test]
    fn test_empty_store_roundtrip() {
        let store = PrecisionStore::default();
        let bytes = serialize_precision(&store, |_| true);
        assert_eq!(bytes, 0_i32.to_le_bytes());

        let mut restored = store_with(&[(3, 1, 1)]);
        deserialize_precision(&bytes, &mut restored, |_| true).unwrap();
        assert!(restored.is_empty());
    }
}
