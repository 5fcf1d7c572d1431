//! Runtime heat aura configuration loaded from `assets/heat_aura.toml`.
//!
//! [`HeatAuraConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_heat_aura_config`] reads
//! `assets/heat_aura.toml` and overwrites the defaults with any values present
//! in the file.  Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the constants you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<HeatAuraConfig>` to any system parameter list and read
//! values with `config.radius`, `config.tick_interval`, etc.  Aura sessions
//! copy what they need into a [`crate::heat::HeatProfile`] when they start, so
//! a config change only affects sessions started afterwards.

use crate::constants::*;
use crate::error::{
    validate_non_negative, validate_positive, validate_probability, SimError, SimResult,
};
use bevy::prelude::*;
use serde::Deserialize;

/// Path of the optional override file, relative to the working directory.
pub const HEAT_AURA_CONFIG_PATH: &str = "assets/heat_aura.toml";

/// Runtime-tunable heat aura configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeatAuraConfig {
    // ── Heat Aura ────────────────────────────────────────────────────────────
    pub radius: f32,
    pub damage_amount: f32,
    pub tick_interval: f32,
    pub ignite_chance: f32,
    pub object_ignite_factor: f32,
    pub object_heat_gain: f32,

    // ── Self-Regulation ──────────────────────────────────────────────────────
    pub max_self_temperature: f32,

    // ── Diagnostics ──────────────────────────────────────────────────────────
    pub report_every_cycles: u64,

    // ── Spatial Grid ─────────────────────────────────────────────────────────
    pub grid_cell_size: f32,

    // ── Tanker Body ──────────────────────────────────────────────────────────
    pub limb_base_health: f32,
    pub tanker_health_multiplier: f32,

    /// Fixed seed for ignition rolls; `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for HeatAuraConfig {
    fn default() -> Self {
        Self {
            radius: HEAT_AURA_RADIUS,
            damage_amount: HEAT_DAMAGE_AMOUNT,
            tick_interval: HEAT_DAMAGE_INTERVAL,
            ignite_chance: HEAT_AURA_IGNITE_CHANCE,
            object_ignite_factor: OBJECT_IGNITE_FACTOR,
            object_heat_gain: OBJECT_HEAT_GAIN,
            max_self_temperature: MAX_SELF_TEMPERATURE,
            report_every_cycles: HEAT_REPORT_EVERY_CYCLES,
            grid_cell_size: GRID_CELL_SIZE,
            limb_base_health: LIMB_BASE_HEALTH,
            tanker_health_multiplier: TANKER_HEALTH_MULTIPLIER,
            rng_seed: None,
        }
    }
}

impl HeatAuraConfig {
    /// Parse a TOML document and validate the result.
    pub fn from_toml_str(contents: &str) -> SimResult<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| SimError::InvalidConfig {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the aura divide by zero, spin on a
    /// zero-length timer or roll impossible probabilities.
    pub fn validate(&self) -> SimResult<()> {
        validate_positive("radius", self.radius)?;
        validate_positive("tick_interval", self.tick_interval)?;
        validate_positive("grid_cell_size", self.grid_cell_size)?;
        validate_positive("limb_base_health", self.limb_base_health)?;
        validate_positive("tanker_health_multiplier", self.tanker_health_multiplier)?;
        validate_non_negative("damage_amount", self.damage_amount)?;
        validate_non_negative("object_heat_gain", self.object_heat_gain)?;
        validate_non_negative("max_self_temperature", self.max_self_temperature)?;
        validate_probability("ignite_chance", self.ignite_chance)?;
        validate_probability("object_ignite_factor", self.object_ignite_factor)?;
        Ok(())
    }
}

/// Startup system: attempt to load `assets/heat_aura.toml` and overwrite the
/// `HeatAuraConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  Parse and validation errors
/// are logged but do not abort the simulation.  A missing file is silently
/// ignored (defaults are already in place from `insert_resource`).
pub fn load_heat_aura_config(mut config: ResMut<HeatAuraConfig>) {
    let path = HEAT_AURA_CONFIG_PATH;
    match std::fs::read_to_string(path) {
        Ok(contents) => match HeatAuraConfig::from_toml_str(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded heat aura config from {path}");
            }
            Err(e) => {
                warn!("Failed to load {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            info!("No {path} found; using compiled defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(HeatAuraConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = HeatAuraConfig::from_toml_str("radius = 2.0\nrng_seed = 7\n").unwrap();
        assert_eq!(config.radius, 2.0);
        assert_eq!(config.rng_seed, Some(7));
        assert_eq!(config.damage_amount, HEAT_DAMAGE_AMOUNT);
        assert_eq!(config.object_ignite_factor, OBJECT_IGNITE_FACTOR);
    }

    #[test]
    fn malformed_toml_is_invalid_config() {
        let err = HeatAuraConfig::from_toml_str("radius = [").unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig { .. }));
    }

    #[test]
    fn zero_radius_is_rejected() {
        let err = HeatAuraConfig::from_toml_str("radius = 0.0").unwrap_err();
        assert!(matches!(err, SimError::UnsafeConstant { name: "radius", .. }));
    }

    #[test]
    fn ignite_chance_above_one_is_rejected() {
        assert!(HeatAuraConfig::from_toml_str("ignite_chance = 1.5").is_err());
    }
}
