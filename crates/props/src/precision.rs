use std::collections::HashMap;

use bevy::prelude::*;

use crate::position::PrecisionCorrection;
use crate::PropId;

/// Sparse per-prop sub-grid correction table.
///
/// Occupancy is typically far below the arena capacity (only props written
/// in simulation mode carry a correction), so entries live in a hash map
/// rather than a dense slab. The store never owns prop lifetime; stale
/// entries are filtered against the host's created-flags on load.
#[derive(Resource, Default)]
pub struct PrecisionStore {
    entries: HashMap<PropId, PrecisionCorrection>,
}

impl PrecisionStore {
    pub fn get(&self, id: PropId) -> Option<PrecisionCorrection> {
        self.entries.get(&id).copied()
    }

    /// Overwrite semantics: a new write replaces any previous correction.
    pub fn set(&mut self, id: PropId, correction: PrecisionCorrection) {
        assert_ne!(id, 0, "prop id 0 is the null handle");
        self.entries.insert(id, correction);
    }

    /// Clear the correction for a single prop (asset-editor writes).
    pub fn remove(&mut self, id: PropId) {
        self.entries.remove(&id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop entries whose prop the host no longer reports as created.
    ///
    /// Invoked only from load filtering; nothing calls this implicitly.
    pub fn retain_created(&mut self, mut is_created: impl FnMut(PropId) -> bool) {
        self.entries.retain(|&id, _| is_created(id));
    }

    /// Entries in ascending id order, for reproducible serialization.
    pub fn sorted_entries(&self) -> Vec<(PropId, PrecisionCorrection)> {
        let mut entries: Vec<_> = self.entries.iter().map(|(&id, &c)| (id, c)).collect();
        entries.sort_unstable_by_key(|&(id, _)| id);
        entries
    }
}
