use bevy::prelude::*;

pub mod config;
pub mod elevation;
pub mod hooks;
pub mod position;
pub mod precision;
pub mod scaling;
pub mod settings;
pub mod tool;


use elevation::ElevationSettings;
use precision::PrecisionStore;
use scaling::ScalingOverlay;
use settings::ModSettings;
use tool::PropToolState;

/// Handle into the host's fixed-capacity prop arena. 0 is the null handle;
/// valid ids are `1..capacity`.
pub type PropId = u16;

/// Registers every overlay resource. The host drives the overlay through
/// the functions in [`hooks`]; there are no systems to schedule.
pub struct PropOverlayPlugin;

impl Plugin for PropOverlayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PrecisionStore>()
            .init_resource::<ScalingOverlay>()
            .init_resource::<ElevationSettings>()
            .init_resource::<PropToolState>()
            .init_resource::<ModSettings>();
    }
}

/// New-game / pre-load lifecycle pass: return all savegame-coupled overlay
/// state to defaults.
///
/// The scaling overlay keeps its configured capacity. `ModSettings` and the
/// elevation mode survive deliberately; they are user preferences, not
/// savegame state.
pub fn reset_overlay(world: &mut World) {
    let capacity = world.resource::<ScalingOverlay>().capacity();
    world.insert_resource(PrecisionStore::default());
    world.insert_resource(ScalingOverlay::new(capacity));
    world.resource_mut::<PropToolState>().reset_adjustments();
}
