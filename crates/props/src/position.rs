// ---------------------------------------------------------------------------
// position – conversion between world space and the host's fixed-point grid
// ---------------------------------------------------------------------------
//
// The host stores prop positions as three 16-bit integers on a coarse grid:
//   x, z: i16 grid steps (clamped to [-32767, 32767])
//   y:    u16 in 1/64 world-unit steps
//
// Simulation mode loses sub-grid precision on encode; the remainder is
// captured as a PrecisionCorrection (fraction of one grid step scaled to
// [0, 65535]) and stored out-of-band in the PrecisionStore. Asset-editor
// mode uses a finer grid and never carries corrections.

/// World units per grid step when decoding simulation-mode coordinates.
pub const SIM_DECODE_SCALE: f32 = 0.263671875;

/// Grid steps per world unit when encoding simulation-mode coordinates.
///
/// NOT the reciprocal of `SIM_DECODE_SCALE`. The mismatch is inherited from
/// the host's save format and has to be preserved exactly; "fixing" either
/// constant would shift every prop in existing saves.
pub const SIM_ENCODE_SCALE: f32 = 3.79259253;

/// World units per grid step when decoding asset-editor coordinates.
pub const EDITOR_DECODE_SCALE: f32 = 0.0164794922;

/// Grid steps per world unit when encoding asset-editor coordinates.
pub const EDITOR_ENCODE_SCALE: f32 = 60.68148;

/// Raw heights are stored in 1/64 world-unit steps.
pub const HEIGHT_SCALE: f32 = 64.0;

/// Which coordinate grid the host is currently using.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecMode {
    /// Asset editor: fine grid, no precision corrections.
    AssetEditor,
    /// In-game simulation: coarse grid plus out-of-band corrections.
    Simulation,
}

/// Full-precision world-space position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// The host's lossy fixed-point position representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawPosition {
    pub x: i16,
    pub z: i16,
    pub y: u16,
}

/// Magnitude of the simulation-mode quantization error, as a fraction of one
/// grid step scaled to `[0, 65535]`. The sign is not stored; it is inferred
/// from the sign of the matching raw component, with raw zero taking the
/// non-negative branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecisionCorrection {
    pub x: u16,
    pub z: u16,
}

/// Convert a raw fixed-point position back to world space.
///
/// `correction` is only consulted in simulation mode; the asset editor grid
/// is fine enough that no correction is kept for it.
pub fn decode(
    raw: RawPosition,
    mode: CodecMode,
    correction: Option<&PrecisionCorrection>,
) -> WorldPosition {
    // Y is decoded the same way in both modes.
    let y = f32::from(raw.y) * (1.0 / HEIGHT_SCALE);

    match mode {
        CodecMode::AssetEditor => WorldPosition {
            x: f32::from(raw.x) * EDITOR_DECODE_SCALE,
            y,
            z: f32::from(raw.z) * EDITOR_DECODE_SCALE,
        },
        CodecMode::Simulation => match correction {
            Some(c) => WorldPosition {
                x: decode_axis(raw.x, c.x),
                y,
                z: decode_axis(raw.z, c.z),
            },
            None => WorldPosition {
                x: f32::from(raw.x) * SIM_DECODE_SCALE,
                y,
                z: f32::from(raw.z) * SIM_DECODE_SCALE,
            },
        },
    }
}

/// Convert a world-space position to the host's fixed-point representation.
///
/// Simulation mode truncates toward zero and returns the lost fraction as a
/// correction; asset-editor mode rounds and returns no correction (callers
/// clear any previously stored one). Inputs outside the representable range
/// are clamped, so encoding is total.
pub fn encode(world: WorldPosition, mode: CodecMode) -> (RawPosition, Option<PrecisionCorrection>) {
    let y = quantize_height(world.y);

    match mode {
        CodecMode::AssetEditor => {
            let raw = RawPosition {
                x: clamp_grid((world.x * EDITOR_ENCODE_SCALE).round()),
                z: clamp_grid((world.z * EDITOR_ENCODE_SCALE).round()),
                y,
            };
            (raw, None)
        }
        CodecMode::Simulation => {
            let (x, correction_x) = encode_axis(world.x);
            let (z, correction_z) = encode_axis(world.z);
            let raw = RawPosition { x, z, y };
            (
                raw,
                Some(PrecisionCorrection {
                    x: correction_x,
                    z: correction_z,
                }),
            )
        }
    }
}

/// Quantize a world-space height to raw 1/64-step units.
pub fn quantize_height(y: f32) -> u16 {
    ((y * HEIGHT_SCALE).round() as i32).clamp(0, 65535) as u16
}

fn decode_axis(raw: i16, correction: u16) -> f32 {
    let fraction = f32::from(correction) / f32::from(u16::MAX);

    // The correction is a magnitude; raw zero takes the non-negative branch.
    if raw >= 0 {
        (f32::from(raw) + fraction) * SIM_DECODE_SCALE
    } else {
        (f32::from(raw) - fraction) * SIM_DECODE_SCALE
    }
}

fn encode_axis(world: f32) -> (i16, u16) {
    let scaled = world * SIM_ENCODE_SCALE;

    // Truncation toward zero, matching the host's storage convention.
    let raw = (scaled as i32).clamp(-32767, 32767) as i16;

    // `as u16` saturates, which also covers the clamped-input case where the
    // residual exceeds one grid step.
    let correction = (f32::from(u16::MAX) * (scaled - f32::from(raw)).abs()).round() as u16;

    (raw, correction)
}

fn clamp_grid(rounded: f32) -> i16 {
    (rounded as i32).clamp(-32767, 32767) as i16
}
