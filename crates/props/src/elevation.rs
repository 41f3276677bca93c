use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::position::quantize_height;

/// How a prop's stored height reacts to terrain changes. Single global
/// setting, persisted with the mod settings rather than the savegame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ElevationMode {
    /// Follow terrain edits, but only while a terrain-editing operation is
    /// actually in progress. Unrelated terrain recalculations must not reset
    /// the height of a freshly placed prop.
    #[default]
    TerrainFollow,
    /// Never sink below the terrain surface; props above it keep their height.
    KeepAboveGround,
    /// Stored heights are never touched by terrain updates.
    Freeze,
}

/// Global elevation policy.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ElevationSettings {
    pub mode: ElevationMode,
}

/// Pick a prop's vertical coordinate after a terrain update.
///
/// Heights are in raw 1/64-step units; the host applies the result back to
/// its own storage.
pub fn resolve_height(
    mode: ElevationMode,
    terrain_y: u16,
    stored_y: u16,
    terrain_tool_active: bool,
) -> u16 {
    match mode {
        ElevationMode::TerrainFollow => {
            if terrain_tool_active {
                terrain_y
            } else {
                stored_y
            }
        }
        ElevationMode::KeepAboveGround => terrain_y.max(stored_y),
        ElevationMode::Freeze => stored_y,
    }
}

/// Height for a newly created prop, independent of the elevation mode.
///
/// A stored height of 0 is the uninitialized sentinel (props from saves that
/// predate height data); only then is the terrain sampled.
pub fn initial_height(stored_y: u16, sample_terrain: impl FnOnce() -> f32) -> u16 {
    if stored_y == 0 {
        quantize_height(sample_terrain())
    } else {
        stored_y
    }
}
