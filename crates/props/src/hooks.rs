//! Host-facing hook points.
//!
//! The host owns the prop arena and calls into the overlay at well-defined
//! moments of its own update/render cycle, always passing the prop's index
//! explicitly. The overlay never infers identity from memory layout and
//! never touches instance lifetime.

use crate::elevation::{self, ElevationSettings};
use crate::position::{self, CodecMode, RawPosition, WorldPosition};
use crate::precision::PrecisionStore;
use crate::scaling::ScalingOverlay;
use crate::PropId;

/// Position-read hook: decode a raw position, applying any stored
/// correction in simulation mode.
pub fn on_position_read(
    id: PropId,
    raw: RawPosition,
    mode: CodecMode,
    precision: &PrecisionStore,
    capacity: usize,
) -> WorldPosition {
    assert_valid_id(id, capacity);
    position::decode(raw, mode, precision.get(id).as_ref())
}

/// Position-write hook: encode a world position and keep the precision
/// store in sync (simulation writes store the new correction, asset-editor
/// writes clear any stale one). Returns the raw position for the host to
/// store in its arena.
pub fn on_position_write(
    id: PropId,
    world: WorldPosition,
    mode: CodecMode,
    precision: &mut PrecisionStore,
    capacity: usize,
) -> RawPosition {
    assert_valid_id(id, capacity);
    let (raw, correction) = position::encode(world, mode);
    match correction {
        Some(c) => precision.set(id, c),
        None => precision.remove(id),
    }
    raw
}

/// Creation hook: assign the pending tool scale to the new prop's slot and
/// resolve its initial height (terrain-sampled only when the stored height
/// is the uninitialized sentinel). Returns the height for the host to store.
pub fn on_instance_created(
    id: PropId,
    scaling: &mut ScalingOverlay,
    configured_scale: f32,
    stored_y: u16,
    sample_terrain: impl FnOnce() -> f32,
) -> u16 {
    scaling.assign_on_create(id, configured_scale);
    elevation::initial_height(stored_y, sample_terrain)
}

/// Terrain-update hook: pick the prop's height under the current elevation
/// mode. The host applies the result to its own storage.
pub fn on_terrain_step(
    id: PropId,
    settings: &ElevationSettings,
    terrain_y: u16,
    stored_y: u16,
    terrain_tool_active: bool,
    capacity: usize,
) -> u16 {
    assert_valid_id(id, capacity);
    elevation::resolve_height(settings.mode, terrain_y, stored_y, terrain_tool_active)
}

/// Render hook: the scale multiplier for this prop. No side effects.
pub fn on_render(id: PropId, scaling: &ScalingOverlay) -> f32 {
    scaling.render_scale(id)
}

fn assert_valid_id(id: PropId, capacity: usize) {
    assert!(
        id != 0 && usize::from(id) < capacity,
        "prop id {id} outside arena bounds 1..{capacity}"
    );
}
