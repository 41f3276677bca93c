use bevy::prelude::*;

use crate::config::{DEFAULT_SCALE, MIN_SCALE, PROP_CAPACITY};
use crate::PropId;

/// Dense per-slot render-scale multipliers, always exactly one entry per
/// arena slot (slot 0 included, though it never denotes a real prop).
///
/// Out-of-range access is a host/core contract violation and panics; it is
/// never clamped or silently ignored.
#[derive(Resource)]
pub struct ScalingOverlay {
    scales: Vec<f32>,
}

impl Default for ScalingOverlay {
    fn default() -> Self {
        Self::new(PROP_CAPACITY)
    }
}

impl ScalingOverlay {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 2, "arena needs at least the null slot plus one");
        Self {
            scales: vec![DEFAULT_SCALE; capacity],
        }
    }

    /// Arena capacity, including the reserved null slot.
    pub fn capacity(&self) -> usize {
        self.scales.len()
    }

    pub fn get(&self, id: PropId) -> f32 {
        self.scales[self.slot(id)]
    }

    /// Store a scale, applying the 0.01 floor.
    pub fn set(&mut self, id: PropId, value: f32) {
        let slot = self.slot(id);
        self.scales[slot] = value.max(MIN_SCALE);
    }

    pub fn increment(&mut self, id: PropId, delta: f32) {
        self.set(id, self.get(id) + delta);
    }

    /// Unconditional overwrite on prop creation with the tool's pending
    /// scale. Runs for every creation so a stale value can never survive
    /// slot reuse.
    pub fn assign_on_create(&mut self, id: PropId, value: f32) {
        self.set(id, value);
    }

    /// Read-only accessor for the render hook.
    pub fn render_scale(&self, id: PropId) -> f32 {
        self.get(id)
    }

    /// Clone-tool support: a duplicated prop inherits its source's scale.
    pub fn copy(&mut self, src: PropId, dst: PropId) {
        let value = self.get(src);
        let slot = self.slot(dst);
        self.scales[slot] = value;
    }

    /// Raw view for serialization.
    pub fn as_slice(&self) -> &[f32] {
        &self.scales
    }

    /// Replace the whole array with values read from a savegame. Saved
    /// values are taken as-is; legacy saves predate the 0.01 floor.
    ///
    /// Length mismatches are the caller's job to reject before getting here.
    pub fn restore(&mut self, values: &[f32]) {
        assert_eq!(values.len(), self.scales.len(), "scaling array length");
        self.scales.copy_from_slice(values);
    }

    fn slot(&self, id: PropId) -> usize {
        let slot = usize::from(id);
        assert!(
            slot >= 1 && slot < self.scales.len(),
            "prop id {id} outside arena bounds 1..{}",
            self.scales.len()
        );
        slot
    }
}
