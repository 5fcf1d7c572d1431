//! Centralised heat aura and tanker constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place. [`crate::config::HeatAuraConfig`] mirrors them and can
//! override any subset at startup from `assets/heat_aura.toml`.

// ── Heat Aura ─────────────────────────────────────────────────────────────────

/// Radius (world units) of the molten heat aura around the tanker's centre.
///
/// Anything at or beyond this distance is untouched by the aura.
pub const HEAT_AURA_RADIUS: f32 = 3.0;

/// Health removed from a limb standing at the exact aura centre, per tick.
///
/// Falls off linearly to zero at `HEAT_AURA_RADIUS`.
pub const HEAT_DAMAGE_AMOUNT: f32 = 0.5;

/// Seconds between two aura ticks.
pub const HEAT_DAMAGE_INTERVAL: f32 = 0.2;

/// Ignition probability for a limb at the aura centre, per tick.
pub const HEAT_AURA_IGNITE_CHANCE: f32 = 0.5;

/// Scale applied to the ignition probability of inert physical objects.
///
/// Earlier revisions of the mod used 1.0 here; 0.3 makes props three times
/// harder to light than flesh.
pub const OBJECT_IGNITE_FACTOR: f32 = 0.3;

/// Degrees added to a temperature-simulating object at the aura centre, per tick.
pub const OBJECT_HEAT_GAIN: f32 = 30.0;

// ── Self-Regulation ───────────────────────────────────────────────────────────

/// Ceiling for the tanker's own limb temperatures while molten.
pub const MAX_SELF_TEMPERATURE: f32 = 200.0;

// ── Diagnostics ───────────────────────────────────────────────────────────────

/// An "aura affecting N targets" line is logged at most once per this many cycles.
pub const HEAT_REPORT_EVERY_CYCLES: u64 = 100;

// ── Spatial Grid ──────────────────────────────────────────────────────────────

/// Side length (world units) of one spatial grid cell.
///
/// Keep it in the same order of magnitude as `HEAT_AURA_RADIUS`: a 3.0 radius
/// query over 4.0 cells checks a 3×3 block.
pub const GRID_CELL_SIZE: f32 = 4.0;

// ── Tanker Body ───────────────────────────────────────────────────────────────

/// Health of one ordinary ragdoll limb.
pub const LIMB_BASE_HEALTH: f32 = 100.0;

/// The tanker's limbs are this many times more durable than an ordinary body.
pub const TANKER_HEALTH_MULTIPLIER: f32 = 2.0;

/// Ambient temperature every spawned body and prop starts at (degrees).
pub const AMBIENT_TEMPERATURE: f32 = 20.0;

/// Limb offsets from the body origin for a standard humanoid ragdoll.
///
/// Head, upper torso, middle torso, lower torso, two arms and two legs.
pub const HUMANOID_LIMB_OFFSETS: [[f32; 2]; 8] = [
    [0.0, 1.6],
    [0.0, 1.1],
    [0.0, 0.7],
    [0.0, 0.3],
    [-0.4, 1.0],
    [0.4, 1.0],
    [-0.2, -0.5],
    [0.2, -0.5],
];
