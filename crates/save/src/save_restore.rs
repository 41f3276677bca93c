// ---------------------------------------------------------------------------
// save_restore – the persistence boundary
// ---------------------------------------------------------------------------
//
// Drives the payload codecs against the host's extension map at save/load
// time. Everything here is fail-soft: a corrupt, foreign, or truncated blob
// is logged and skipped, leaving the matching in-memory state untouched.
// Errors never propagate into host code.

use std::collections::BTreeMap;

use bevy::prelude::*;

use props::precision::PrecisionStore;
use props::scaling::ScalingOverlay;
use props::PropId;

use crate::container::{
    self, ContainerKind, PRECISION_DATA_KEY, PRECISION_TYPE, SCALING_DATA_KEY, SCALING_TYPE,
    SNAPPING_DATA_KEY, SNAPPING_TYPE,
};
use crate::save_error::SaveError;
use crate::{precision_save, scaling_save, snapping_save};

/// Container data version for precision payloads (last legacy version was 1).
pub const PRECISION_DATA_VERSION: i32 = 1;
/// Container data version for snapping payloads (last legacy version was 1).
pub const SNAPPING_DATA_VERSION: i32 = 1;
/// Container data version for scaling payloads.
pub const SCALING_DATA_VERSION: i32 = 0;

/// Serialize the whole overlay into extension-map blobs.
///
/// Assumes exclusive arena access; `heights` is the host's raw Y column,
/// one entry per slot.
pub fn save_overlay(
    precision: &PrecisionStore,
    scaling: &ScalingOverlay,
    heights: &[u16],
    is_created: impl FnMut(PropId) -> bool,
) -> BTreeMap<String, Vec<u8>> {
    let mut extensions = BTreeMap::new();

    extensions.insert(
        PRECISION_DATA_KEY.to_string(),
        container::write_container(
            PRECISION_DATA_VERSION,
            PRECISION_TYPE,
            &precision_save::serialize_precision(precision, is_created),
        ),
    );
    extensions.insert(
        SNAPPING_DATA_KEY.to_string(),
        container::write_container(
            SNAPPING_DATA_VERSION,
            SNAPPING_TYPE,
            &snapping_save::serialize_heights(heights),
        ),
    );
    extensions.insert(
        SCALING_DATA_KEY.to_string(),
        container::write_container(
            SCALING_DATA_VERSION,
            SCALING_TYPE,
            &scaling_save::serialize_scaling(scaling),
        ),
    );

    extensions
}

/// Restore the overlay from extension-map blobs. Absent keys leave the
/// matching state unchanged (the pre-load reset already put it at
/// defaults).
///
/// Returns whether snapping height data was present, so the host can reset
/// props to ground level when loading a save that predates it.
pub fn restore_overlay(
    extensions: &BTreeMap<String, Vec<u8>>,
    precision: &mut PrecisionStore,
    scaling: &mut ScalingOverlay,
    mut is_created: impl FnMut(PropId) -> bool,
    mut apply_height: impl FnMut(usize, Option<u16>),
) -> bool {
    let mut has_snapping_data = false;

    for (key, blob) in extensions {
        if key != PRECISION_DATA_KEY && key != SNAPPING_DATA_KEY && key != SCALING_DATA_KEY {
            continue;
        }

        let result = restore_blob(
            blob,
            precision,
            scaling,
            &mut is_created,
            &mut apply_height,
        );
        match result {
            Ok(ContainerKind::Snapping) => has_snapping_data = true,
            Ok(_) => {}
            Err(e) => warn!("skipping overlay data under key {key:?}: {e}"),
        }
    }

    has_snapping_data
}

fn restore_blob(
    blob: &[u8],
    precision: &mut PrecisionStore,
    scaling: &mut ScalingOverlay,
    is_created: &mut impl FnMut(PropId) -> bool,
    apply_height: &mut impl FnMut(usize, Option<u16>),
) -> Result<ContainerKind, SaveError> {
    let (version, type_id, payload) = container::read_container(blob)?;
    let kind = container::resolve_type(&type_id)?;
    debug!("restoring {kind:?} container v{version} ({} bytes)", payload.len());

    match kind {
        ContainerKind::Precision => {
            precision_save::deserialize_precision(payload, precision, is_created)?;
        }
        ContainerKind::Snapping => {
            snapping_save::deserialize_heights(payload, apply_height)?;
        }
        ContainerKind::Scaling => {
            scaling_save::deserialize_scaling(payload, scaling)?;
        }
    }
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use props::position::PrecisionCorrection;

    const CAPACITY: usize = 8;

    fn populated() -> (PrecisionStore, ScalingOverlay, Vec<u16>) {
        let mut precision = PrecisionStore::default();
        precision.set(1, PrecisionCorrection { x: 11, z: 12 });
        precision.set(3, PrecisionCorrection { x: 31, z: 32 });

        let mut scaling = ScalingOverlay::new(CAPACITY);
        scaling.set(1, 1.4);
        scaling.set(3, 0.25);

        let mut heights = vec![0_u16; CAPACITY];
        heights[1] = 640;
        heights[3] = 65535;

        (precision, scaling, heights)
    }

    #[test]
    fn test_save_restore_full_cycle() {
        let (precision, scaling, heights) = populated();
        let extensions = save_overlay(&precision, &scaling, &heights, |_| true);
        assert_eq!(extensions.len(), 3);

        let mut restored_precision = PrecisionStore::default();
        let mut restored_scaling = ScalingOverlay::new(CAPACITY);
        let mut applied = vec![None; CAPACITY];
        let has_snapping = restore_overlay(
            &extensions,
            &mut restored_precision,
            &mut restored_scaling,
            |_| true,
            |slot, height| applied[slot] = height,
        );

        assert!(has_snapping);
        assert_eq!(
            restored_precision.get(1),
            Some(PrecisionCorrection { x: 11, z: 12 })
        );
        assert_eq!(restored_scaling.as_slice(), scaling.as_slice());
        assert_eq!(applied[1], Some(640));
        // Sentinel heights come back as unset.
        assert_eq!(applied[3], None);
    }

    #[test]
    fn test_destroyed_props_dropped_on_restore() {
        let (precision, scaling, heights) = populated();
        let extensions = save_overlay(&precision, &scaling, &heights, |_| true);

        let mut restored_precision = PrecisionStore::default();
        let mut restored_scaling = ScalingOverlay::new(CAPACITY);
        restore_overlay(
            &extensions,
            &mut restored_precision,
            &mut restored_scaling,
            |id| id == 3,
            |_, _| {},
        );

        assert!(restored_precision.get(1).is_none());
        assert!(restored_precision.get(3).is_some());
    }

    #[test]
    fn test_missing_keys_leave_state_alone() {
        let extensions = BTreeMap::new();
        let mut precision = PrecisionStore::default();
        precision.set(2, PrecisionCorrection { x: 1, z: 1 });
        let mut scaling = ScalingOverlay::new(CAPACITY);

        let has_snapping = restore_overlay(
            &extensions,
            &mut precision,
            &mut scaling,
            |_| true,
            |_, _| panic!("no heights to apply"),
        );

        assert!(!has_snapping);
        assert!(precision.get(2).is_some());
    }

    #[test]
    fn test_corrupt_blob_is_skipped_not_fatal() {
        let (precision, scaling, heights) = populated();
        let mut extensions = save_overlay(&precision, &scaling, &heights, |_| true);

        // Truncate the scaling blob mid-payload.
        let blob = extensions.get_mut(SCALING_DATA_KEY).unwrap();
        blob.truncate(blob.len() - 3);

        let mut restored_precision = PrecisionStore::default();
        let mut restored_scaling = ScalingOverlay::new(CAPACITY);
        restored_scaling.set(5, 9.0);
        restore_overlay(
            &extensions,
            &mut restored_precision,
            &mut restored_scaling,
            |_| true,
            |_, _| {},
        );

        // Precision still loads; scaling is untouched by the bad blob.
        assert_eq!(restored_precision.len(), 2);
        assert_eq!(restored_scaling.get(5), 9.0);
        assert_eq!(restored_scaling.get(1), 1.0);
    }

    #[test]
    fn test_capacity_mismatch_keeps_live_array() {
        let (precision, scaling, heights) = populated();
        let extensions = save_overlay(&precision, &scaling, &heights, |_| true);

        let mut restored_precision = PrecisionStore::default();
        let mut smaller = ScalingOverlay::new(4);
        smaller.set(2, 7.0);
        restore_overlay(
            &extensions,
            &mut restored_precision,
            &mut smaller,
            |_| true,
            |_, _| {},
        );

        assert_eq!(smaller.get(2), 7.0);
    }

    #[test]
    fn test_foreign_container_is_skipped() {
        let mut extensions = BTreeMap::new();
        extensions.insert(
            PRECISION_DATA_KEY.to_string(),
            container::write_container(9, "SomeOtherMod.Data, SomeOtherMod", &[1, 2, 3]),
        );

        let mut precision = PrecisionStore::default();
        precision.set(7, PrecisionCorrection { x: 7, z: 7 });
        let mut scaling = ScalingOverlay::new(CAPACITY);
        restore_overlay(&extensions, &mut precision, &mut scaling, |_| true, |_, _| {});

        assert!(precision.get(7).is_some());
    }
}
