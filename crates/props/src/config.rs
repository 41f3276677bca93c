/// Fixed capacity of the host's prop arena. Slot 0 is reserved as the null
/// handle, so valid prop ids are `1..PROP_CAPACITY`.
pub const PROP_CAPACITY: usize = 65536;

/// Floor applied to every stored per-prop scale factor.
pub const MIN_SCALE: f32 = 0.01;

/// Scale assigned to freshly initialized slots.
pub const DEFAULT_SCALE: f32 = 1.0;

/// Default placement-tool elevation adjustment.
pub const DEFAULT_ELEVATION_ADJUSTMENT: f32 = 0.0;
